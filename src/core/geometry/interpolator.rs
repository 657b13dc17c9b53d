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

//! Bilinear quad interpolation
//!
//! Parametrizes a quad over the unit square by interpolating along its
//! top and bottom edges and then between the two edge points:
//!
//! ```text
//!   q0 --P01(s)-- q1
//!   |      |       |
//!   |    (s,t)     |
//!   |      |       |
//!   q3 --P32(s)-- q2
//! ```

use super::{Point, Quad};

/// Bilinear patch over the four corners of a quad
///
/// Cheap to evaluate, but straight grid lines in the unit square stay evenly
/// spaced across the quad, so it does not model perspective foreshortening.
///
/// # Examples
///
/// ```
/// use quadtex::core::geometry::{BilinearInterpolator, Point, Quad};
///
/// let lerp = BilinearInterpolator::new(&Quad::rect(0.0, 0.0, 100.0, 50.0));
/// assert_eq!(lerp.eval(0.5, 0.5), Point::new(50.0, 25.0));
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BilinearInterpolator {
    corners: [Point; 4],
}

impl BilinearInterpolator {
    pub fn new(quad: &Quad) -> Self {
        Self {
            corners: *quad.corners(),
        }
    }

    /// Evaluate the patch at `(s, t)`
    ///
    /// `s` runs along the top and bottom edges, `t` from top to bottom.
    /// Values slightly outside `[0, 1]` extrapolate linearly.
    #[inline]
    pub fn eval(&self, s: f64, t: f64) -> Point {
        let [q0, q1, q2, q3] = self.corners;
        let p01 = q0.lerp(q1, s);
        let p32 = q3.lerp(q2, s);
        p01.lerp(p32, t)
    }
}
