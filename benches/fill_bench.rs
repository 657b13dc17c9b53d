// SPDX-License-Identifier: Apache-2.0
// Copyright 2025 itsakeyfut
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.
use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use quadtex::core::fill::{fill_quad, FillMethod, FillOptions, PointSource};
use quadtex::core::geometry::{Point, ProjectiveMapping, Quad};
use quadtex::core::surface::{Color, Framebuffer, Texture};
use std::hint::black_box;

fn wall() -> Quad {
    Quad::new([
        Point::new(140.0, 40.0),
        Point::new(180.0, 40.0),
        Point::new(300.0, 220.0),
        Point::new(20.0, 220.0),
    ])
}

fn projection_benchmark(c: &mut Criterion) {
    let quad = wall();

    c.bench_function("projective_solve", |b| {
        b.iter(|| black_box(ProjectiveMapping::solve(black_box(&quad)).unwrap()));
    });

    c.bench_function("projective_project", |b| {
        let mapping = ProjectiveMapping::solve(&quad).unwrap();
        b.iter(|| black_box(mapping.project(black_box(Point::new(0.3, 0.7))).unwrap()));
    });
}

fn point_source_benchmark(c: &mut Criterion) {
    let mut group = c.benchmark_group("point_source");
    let quad = wall();

    for method in [FillMethod::Bilinear, FillMethod::Perspective] {
        group.bench_function(method.as_str(), |b| {
            let source = PointSource::build(method, &quad).unwrap();
            b.iter(|| {
                for row in 0..10 {
                    for col in 0..10 {
                        black_box(source.point(row as f64, col as f64, 10).unwrap());
                    }
                }
            });
        });
    }

    group.finish();
}

fn fill_benchmark(c: &mut Criterion) {
    let mut group = c.benchmark_group("fill_quad");
    let texture = Texture::checkerboard(256, 256, 16, Color::BLACK, Color::WHITE);
    let source = Quad::rect(0.0, 0.0, 256.0, 256.0);
    let destination = wall();

    // Grid resolution trades triangle count against per-triangle pixel work
    for tiles in [1u32, 10, 32].iter() {
        for method in [FillMethod::Bilinear, FillMethod::Perspective] {
            group.bench_with_input(
                BenchmarkId::new(method.as_str(), tiles),
                tiles,
                |b, &tiles| {
                    let mut fb = Framebuffer::new(320, 240);
                    let options = FillOptions::new(tiles, method).unwrap();
                    b.iter(|| {
                        black_box(
                            fill_quad(&mut fb, &texture, &source, &destination, &options).unwrap(),
                        );
                    });
                },
            );
        }
    }

    group.finish();
}

criterion_group!(
    benches,
    projection_benchmark,
    point_source_benchmark,
    fill_benchmark
);
criterion_main!(benches);
