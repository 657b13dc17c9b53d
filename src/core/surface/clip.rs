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

//! Polygon clip masks
//!
//! A clip polygon is rasterized once into a per-pixel coverage mask, so the
//! triangle rasterizer only needs a lookup per pixel.
//!
//! # Algorithm
//!
//! Scanline fill with the even-odd rule, sampled at pixel centers:
//!
//! 1. For each row, intersect the horizontal line `y + 0.5` with every edge
//! 2. Sort the crossing X coordinates
//! 3. Mark pixels whose center lies between each consecutive pair of crossings
//!
//! Edges are treated half-open in Y (`a.y <= yc < b.y`), so a vertex shared
//! by two edges is counted exactly once.

use crate::core::geometry::Point;

/// Per-pixel coverage of a clip region
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClipMask {
    width: usize,
    height: usize,
    coverage: Vec<bool>,
}

impl ClipMask {
    /// Mask covering the whole surface
    pub fn full(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            coverage: vec![true; width * height],
        }
    }

    /// Rasterize `polygon` (implicitly closed)
    ///
    /// Fewer than three points, or any non-finite point, yield an empty mask.
    ///
    /// # Examples
    ///
    /// ```
    /// use quadtex::core::geometry::Quad;
    /// use quadtex::core::surface::ClipMask;
    ///
    /// let mask = ClipMask::from_polygon(8, 8, Quad::rect(2.0, 2.0, 4.0, 4.0).corners());
    /// assert!(mask.contains(2, 2));
    /// assert!(mask.contains(5, 5));
    /// assert!(!mask.contains(6, 6));
    /// assert_eq!(mask.count(), 16);
    /// ```
    pub fn from_polygon(width: usize, height: usize, polygon: &[Point]) -> Self {
        let mut mask = Self {
            width,
            height,
            coverage: vec![false; width * height],
        };

        if polygon.len() < 3 || polygon.iter().any(|p| !p.is_finite()) {
            return mask;
        }

        let mut crossings: Vec<f64> = Vec::with_capacity(polygon.len());

        for y in 0..height {
            let yc = y as f64 + 0.5;

            crossings.clear();
            for (i, &a) in polygon.iter().enumerate() {
                let b = polygon[(i + 1) % polygon.len()];
                if (a.y <= yc) != (b.y <= yc) {
                    crossings.push(a.x + (yc - a.y) * (b.x - a.x) / (b.y - a.y));
                }
            }
            crossings.sort_by(|l, r| l.total_cmp(r));

            let row = y * width;
            for span in crossings.chunks_exact(2) {
                // Pixel x is inside when span[0] <= x + 0.5 < span[1]
                let start = (span[0] - 0.5).ceil().clamp(0.0, width as f64) as usize;
                let end = (span[1] - 0.5).ceil().clamp(0.0, width as f64) as usize;
                for covered in &mut mask.coverage[row + start..row + end.max(start)] {
                    *covered = true;
                }
            }
        }

        mask
    }

    /// Keep only the pixels covered by both masks
    pub fn intersect(&mut self, other: &ClipMask) {
        if self.width != other.width || self.height != other.height {
            log::warn!(
                "Intersecting clip masks of different sizes ({}x{} vs {}x{})",
                self.width,
                self.height,
                other.width,
                other.height
            );
        }
        for y in 0..self.height {
            for x in 0..self.width {
                let index = y * self.width + x;
                self.coverage[index] &= other.contains(x, y);
            }
        }
    }

    #[inline(always)]
    pub fn contains(&self, x: usize, y: usize) -> bool {
        x < self.width && y < self.height && self.coverage[y * self.width + x]
    }

    /// Number of covered pixels
    pub fn count(&self) -> usize {
        self.coverage.iter().filter(|&&c| c).count()
    }
}
