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

//! Software Rasterizer
//!
//! This module implements the affine textured-triangle fill used by
//! [`Framebuffer`](super::Framebuffer).
//!
//! # Algorithm
//!
//! The rasterizer walks the bounding box of the destination triangle:
//!
//! 1. Compute the bounding box and clamp it to the buffer
//! 2. For each pixel center, compute barycentric weights
//! 3. Skip pixels outside the triangle or outside the clip mask
//! 4. Interpolate the texture coordinate with the same weights and sample
//!
//! Interpolation is affine within a triangle. Perspective correctness comes
//! from the quad filler subdividing the quad finely enough.
//!
//! # References
//!
//! - [Scratchapixel: Rasterization](https://www.scratchapixel.com/lessons/3d-basic-rendering/rasterization-practical-implementation)

use super::clip::ClipMask;
use super::texture::{Color, Texture};
use crate::core::error::FillError;
use crate::core::geometry::{Point, Triangle};

/// Barycentric denominator below which a triangle has no area
const DEGENERATE_AREA: f64 = 1e-12;

/// Textured triangle rasterizer over a row-major color buffer
///
/// # Examples
///
/// ```
/// use quadtex::core::geometry::Point;
/// use quadtex::core::surface::{Color, Rasterizer, Texture};
///
/// let mut pixels = vec![Color::TRANSPARENT; 16 * 16];
/// let rasterizer = Rasterizer::new(16, 16);
/// let texture = Texture::from_fn(2, 2, |_, _| Color::RED);
///
/// rasterizer
///     .draw_textured_triangle(
///         &mut pixels,
///         None,
///         &texture,
///         &[Point::new(0.0, 0.0), Point::new(2.0, 0.0), Point::new(0.0, 2.0)],
///         &[Point::new(0.0, 0.0), Point::new(16.0, 0.0), Point::new(0.0, 16.0)],
///     )
///     .unwrap();
///
/// assert_eq!(pixels[2 * 16 + 2], Color::RED);
/// assert_eq!(pixels[15 * 16 + 15], Color::TRANSPARENT);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rasterizer {
    /// Row stride of the target buffer
    width: usize,
    /// Rows of the target buffer
    height: usize,
}

impl Rasterizer {
    /// Rasterizer for a row-major `width x height` buffer
    ///
    /// Finer clipping is done with a [`ClipMask`].
    pub fn new(width: usize, height: usize) -> Self {
        Self { width, height }
    }

    /// Fill `destination` with the `source` triangle of `texture`
    ///
    /// Pixels are sampled at their centers. When `mask` is given, only
    /// pixels it covers are written. Zero-area triangles draw nothing.
    ///
    /// # Errors
    ///
    /// Returns [`FillError::NumericFailure`] if any vertex is not finite.
    pub fn draw_textured_triangle(
        &self,
        pixels: &mut [Color],
        mask: Option<&ClipMask>,
        texture: &Texture,
        source: &Triangle,
        destination: &Triangle,
    ) -> Result<(), FillError> {
        if source.iter().chain(destination.iter()).any(|p| !p.is_finite()) {
            return Err(FillError::NumericFailure(format!(
                "non-finite triangle {:?} -> {:?}",
                source, destination
            )));
        }

        let [v0, v1, v2] = *destination;
        let [t0, t1, t2] = *source;

        // A short buffer only has as many rows as it can hold
        let rows = self.height.min(pixels.len() / self.width.max(1));

        // Bounding box clamped to the buffer
        let min_x = clamp_index(v0.x.min(v1.x).min(v2.x).floor(), self.width);
        let max_x = clamp_index(v0.x.max(v1.x).max(v2.x).ceil(), self.width);
        let min_y = clamp_index(v0.y.min(v1.y).min(v2.y).floor(), rows);
        let max_y = clamp_index(v0.y.max(v1.y).max(v2.y).ceil(), rows);

        let Some(weights) = Barycentric::new(v0, v1, v2) else {
            return Ok(());
        };

        for y in min_y..max_y {
            let row = y * self.width;
            for x in min_x..max_x {
                if let Some(mask) = mask {
                    if !mask.contains(x, y) {
                        continue;
                    }
                }

                let (w0, w1, w2) = weights.at(Point::new(x as f64 + 0.5, y as f64 + 0.5));
                if w0 < 0.0 || w1 < 0.0 || w2 < 0.0 {
                    continue;
                }

                let u = t0.x * w0 + t1.x * w1 + t2.x * w2;
                let v = t0.y * w0 + t1.y * w1 + t2.y * w2;
                pixels[row + x] = texture.sample(u, v);
            }
        }

        Ok(())
    }
}

/// Clamp a pixel coordinate into `[0, limit]` for use as a range bound
#[inline]
fn clamp_index(value: f64, limit: usize) -> usize {
    value.clamp(0.0, limit as f64) as usize
}

/// Precomputed barycentric setup for one triangle
#[derive(Debug, Clone, Copy)]
struct Barycentric {
    v2: Point,
    d12: (f64, f64),
    d20: (f64, f64),
    inv_denom: f64,
}

impl Barycentric {
    fn new(v0: Point, v1: Point, v2: Point) -> Option<Self> {
        let denom = (v1.y - v2.y) * (v0.x - v2.x) + (v2.x - v1.x) * (v0.y - v2.y);
        if denom.abs() < DEGENERATE_AREA {
            return None;
        }
        Some(Self {
            v2,
            d12: (v1.y - v2.y, v2.x - v1.x),
            d20: (v2.y - v0.y, v0.x - v2.x),
            inv_denom: 1.0 / denom,
        })
    }

    #[inline(always)]
    fn at(&self, p: Point) -> (f64, f64, f64) {
        let (dx, dy) = (p.x - self.v2.x, p.y - self.v2.y);
        let w0 = (self.d12.0 * dx + self.d12.1 * dy) * self.inv_denom;
        let w1 = (self.d20.0 * dx + self.d20.1 * dy) * self.inv_denom;
        (w0, w1, 1.0 - w0 - w1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::geometry::Quad;

    fn gradient_texture() -> Texture {
        Texture::from_fn(16, 16, |x, y| Color::rgb(x as u8, y as u8, 0))
    }

    #[test]
    fn test_barycentric_weights() {
        let b = Barycentric::new(
            Point::new(0.0, 0.0),
            Point::new(10.0, 0.0),
            Point::new(0.0, 10.0),
        )
        .unwrap();

        let (w0, w1, w2) = b.at(Point::new(0.0, 0.0));
        assert!((w0 - 1.0).abs() < 1e-12 && w1.abs() < 1e-12 && w2.abs() < 1e-12);

        let (w0, w1, w2) = b.at(Point::new(5.0, 0.0));
        assert!((w0 - 0.5).abs() < 1e-12 && (w1 - 0.5).abs() < 1e-12 && w2.abs() < 1e-12);
    }

    #[test]
    fn test_barycentric_either_winding() {
        let cw = Barycentric::new(
            Point::new(0.0, 0.0),
            Point::new(10.0, 0.0),
            Point::new(0.0, 10.0),
        )
        .unwrap();
        let ccw = Barycentric::new(
            Point::new(0.0, 0.0),
            Point::new(0.0, 10.0),
            Point::new(10.0, 0.0),
        )
        .unwrap();

        let inside = Point::new(2.0, 3.0);
        let (a0, a1, a2) = cw.at(inside);
        let (b0, b1, b2) = ccw.at(inside);
        assert!(a0 >= 0.0 && a1 >= 0.0 && a2 >= 0.0);
        assert!(b0 >= 0.0 && b1 >= 0.0 && b2 >= 0.0);
    }

    #[test]
    fn test_degenerate_triangle() {
        let mut pixels = vec![Color::TRANSPARENT; 16 * 16];
        let rasterizer = Rasterizer::new(16, 16);

        let flat = [
            Point::new(1.0, 5.0),
            Point::new(8.0, 5.0),
            Point::new(14.0, 5.0),
        ];
        rasterizer
            .draw_textured_triangle(&mut pixels, None, &gradient_texture(), &flat, &flat)
            .unwrap();

        assert!(pixels.iter().all(|&p| p == Color::TRANSPARENT));
    }

    #[test]
    fn test_identity_copy() {
        let mut pixels = vec![Color::TRANSPARENT; 16 * 16];
        let rasterizer = Rasterizer::new(16, 16);
        let texture = gradient_texture();

        let tri = [
            Point::new(0.0, 0.0),
            Point::new(16.0, 0.0),
            Point::new(0.0, 16.0),
        ];
        rasterizer
            .draw_textured_triangle(&mut pixels, None, &texture, &tri, &tri)
            .unwrap();

        // Pixel centers strictly below the diagonal copy their own texel
        assert_eq!(pixels[3 * 16 + 5], Color::rgb(5, 3, 0));
        assert_eq!(pixels[10 * 16 + 2], Color::rgb(2, 10, 0));
        // Above the diagonal nothing is written
        assert_eq!(pixels[12 * 16 + 12], Color::TRANSPARENT);
    }

    #[test]
    fn test_scaled_copy() {
        let mut pixels = vec![Color::TRANSPARENT; 32 * 32];
        let rasterizer = Rasterizer::new(32, 32);
        let texture = gradient_texture();

        let src = [
            Point::new(0.0, 0.0),
            Point::new(16.0, 0.0),
            Point::new(0.0, 16.0),
        ];
        let dst = [
            Point::new(0.0, 0.0),
            Point::new(32.0, 0.0),
            Point::new(0.0, 32.0),
        ];
        rasterizer
            .draw_textured_triangle(&mut pixels, None, &texture, &src, &dst)
            .unwrap();

        assert_eq!(pixels[7 * 32 + 9], Color::rgb(4, 3, 0));
    }

    #[test]
    fn test_clip_mask() {
        let mut pixels = vec![Color::TRANSPARENT; 16 * 16];
        let rasterizer = Rasterizer::new(16, 16);

        let quad = [
            Point::new(0.0, 0.0),
            Point::new(16.0, 0.0),
            Point::new(16.0, 16.0),
            Point::new(0.0, 16.0),
        ];
        let left_half = [quad[0], Point::new(8.0, 0.0), Point::new(8.0, 16.0), quad[3]];
        let mask = ClipMask::from_polygon(16, 16, &left_half);
        let tri = [quad[0], quad[1], quad[2]];

        rasterizer
            .draw_textured_triangle(&mut pixels, Some(&mask), &gradient_texture(), &tri, &tri)
            .unwrap();

        assert_eq!(pixels[2 * 16 + 7], Color::rgb(7, 2, 0));
        assert_eq!(pixels[2 * 16 + 8], Color::TRANSPARENT);
    }

    #[test]
    fn test_short_buffer_limits_rows() {
        // Declared 16x16 but only four rows of storage
        let mut pixels = vec![Color::TRANSPARENT; 16 * 4];
        let rasterizer = Rasterizer::new(16, 16);
        let quad = Quad::rect(0.0, 0.0, 16.0, 16.0);
        let c = quad.corners();

        for tri in [[c[0], c[1], c[2]], [c[2], c[3], c[0]]] {
            rasterizer
                .draw_textured_triangle(&mut pixels, None, &gradient_texture(), &tri, &tri)
                .unwrap();
        }

        assert_eq!(pixels[3 * 16 + 15], Color::rgb(15, 3, 0));
        assert!(pixels.iter().all(|&p| p != Color::TRANSPARENT));
    }

    #[test]
    fn test_triangle_outside_buffer() {
        let mut pixels = vec![Color::TRANSPARENT; 16 * 16];
        let rasterizer = Rasterizer::new(16, 16);
        let tri = [
            Point::new(20.0, 30.0),
            Point::new(40.0, 30.0),
            Point::new(20.0, 50.0),
        ];

        rasterizer
            .draw_textured_triangle(&mut pixels, None, &gradient_texture(), &tri, &tri)
            .unwrap();

        assert!(pixels.iter().all(|&p| p == Color::TRANSPARENT));
    }

    #[test]
    fn test_bounds_checking() {
        let mut pixels = vec![Color::TRANSPARENT; 16 * 16];
        let rasterizer = Rasterizer::new(16, 16);

        // Triangle far larger than the buffer must not panic
        let dst = [
            Point::new(-1e6, -1e6),
            Point::new(1e6, -1e6),
            Point::new(0.0, 1e6),
        ];
        let src = [
            Point::new(0.0, 0.0),
            Point::new(16.0, 0.0),
            Point::new(8.0, 16.0),
        ];
        rasterizer
            .draw_textured_triangle(&mut pixels, None, &gradient_texture(), &src, &dst)
            .unwrap();

        assert!(pixels.iter().all(|&p| p != Color::TRANSPARENT));
    }

    #[test]
    fn test_non_finite_vertex() {
        let mut pixels = vec![Color::TRANSPARENT; 4];
        let rasterizer = Rasterizer::new(2, 2);
        let tri = [
            Point::new(0.0, 0.0),
            Point::new(f64::INFINITY, 0.0),
            Point::new(0.0, 1.0),
        ];

        assert!(matches!(
            rasterizer.draw_textured_triangle(
                &mut pixels,
                None,
                &gradient_texture(),
                &tri,
                &tri
            ),
            Err(FillError::NumericFailure(_))
        ));
    }
}
