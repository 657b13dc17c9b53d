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

//! Custom assertions for framebuffer contents

use quadtex::core::geometry::{Point, Quad};
use quadtex::core::surface::{ClipMask, Color, Framebuffer};

/// Distance from `p` to the nearest edge of a convex quad, negative outside
#[allow(dead_code)]
pub fn inset_distance(quad: &Quad, p: Point) -> f64 {
    let c = quad.corners();
    let sign = if quad.signed_area() >= 0.0 { 1.0 } else { -1.0 };
    (0..4)
        .map(|i| {
            let (a, b) = (c[i], c[(i + 1) % 4]);
            sign * a.cross(b, p) / a.distance(b)
        })
        .fold(f64::INFINITY, f64::min)
}

/// Assert every pixel whose center lies at least `margin` inside `quad` was written
#[allow(dead_code)]
pub fn assert_interior_covered(fb: &Framebuffer, quad: &Quad, margin: f64) {
    for y in 0..fb.height() {
        for x in 0..fb.width() {
            let center = Point::new(x as f64 + 0.5, y as f64 + 0.5);
            if inset_distance(quad, center) < margin {
                continue;
            }
            assert_ne!(
                fb.get_pixel(x, y),
                Some(Color::TRANSPARENT),
                "hole at pixel ({}, {})",
                x,
                y
            );
        }
    }
}

/// Assert no pixel outside the quad's clip mask was written
#[allow(dead_code)]
pub fn assert_nothing_outside(fb: &Framebuffer, quad: &Quad) {
    let mask = ClipMask::from_polygon(fb.width(), fb.height(), quad.corners());
    for y in 0..fb.height() {
        for x in 0..fb.width() {
            if mask.contains(x, y) {
                continue;
            }
            assert_eq!(
                fb.get_pixel(x, y),
                Some(Color::TRANSPARENT),
                "pixel ({}, {}) written outside the quad",
                x,
                y
            );
        }
    }
}

/// Count non-transparent pixels
#[allow(dead_code)]
pub fn written_pixels(fb: &Framebuffer) -> usize {
    fb.pixels()
        .iter()
        .filter(|&&p| p != Color::TRANSPARENT)
        .count()
}
