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

//! Test fixtures for common fill scenarios

use quadtex::core::geometry::{Point, Quad};
use quadtex::core::surface::{Color, Texture};

/// Texture where every texel has a distinct opaque color
#[allow(dead_code)]
pub fn unique_texture(width: u32, height: u32) -> Texture {
    Texture::from_fn(width, height, |x, y| Color::rgb(x as u8, y as u8, 0x80))
}

/// Opaque black/white checkerboard
#[allow(dead_code)]
pub fn checkerboard(size: u32) -> Texture {
    Texture::checkerboard(size, size, 8, Color::BLACK, Color::WHITE)
}

/// Texture whose green channel encodes the texel row
#[allow(dead_code)]
pub fn row_gradient() -> Texture {
    Texture::from_fn(64, 256, |_, y| Color::rgb(0, y as u8, 0))
}

/// Full-texture source quad
#[allow(dead_code)]
pub fn texture_quad(texture: &Texture) -> Quad {
    Quad::rect(0.0, 0.0, texture.width() as f64, texture.height() as f64)
}

/// A wall receding toward the top of a 320x240 canvas
#[allow(dead_code)]
pub fn receding_wall() -> Quad {
    Quad::new([
        Point::new(140.0, 40.0),
        Point::new(180.0, 40.0),
        Point::new(300.0, 220.0),
        Point::new(20.0, 220.0),
    ])
}

/// A convex quad with no parallel sides
#[allow(dead_code)]
pub fn skewed_quad() -> Quad {
    Quad::new([
        Point::new(30.0, 20.0),
        Point::new(250.0, 45.0),
        Point::new(290.0, 200.0),
        Point::new(15.0, 170.0),
    ])
}
