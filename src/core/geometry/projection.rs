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

//! Forward projective mapping from the unit square to a quad
//!
//! A projective (homography) transform is defined by eight coefficients:
//!
//! ```text
//! x = (A*u + B*v + C) / (G*u + H*v + 1)
//! y = (D*u + E*v + F) / (G*u + H*v + 1)
//! ```
//!
//! # Algorithm
//!
//! Each corner correspondence `(u, v) -> (x, y)` yields two linear equations
//! once the denominator is multiplied out:
//!
//! ```text
//! A*u + B*v + C - G*u*x - H*v*x = x
//! D*u + E*v + F - G*u*y - H*v*y = y
//! ```
//!
//! The four unit square corners give an 8x8 system that is solved with
//! Gaussian elimination and partial pivoting.
//!
//! # References
//!
//! - Heckbert, "Fundamentals of Texture Mapping and Image Warping", 1989, ch. 2.2

use super::{Point, Quad};
use crate::core::error::FillError;

/// Relative pivot threshold below which the system is treated as singular
const PIVOT_EPSILON: f64 = 1e-12;

/// Relative determinant threshold for the solved homogeneous matrix
const DETERMINANT_EPSILON: f64 = 1e-12;

/// Unit square corners in quad winding order
const UNIT_CORNERS: [(f64, f64); 4] = [(0.0, 0.0), (1.0, 0.0), (1.0, 1.0), (0.0, 1.0)];

/// Projective transform from unit-square `(u, v)` to a quad's plane
///
/// Stored as the coefficients `[A, B, C, D, E, F, G, H]` of a 3x3 homogeneous
/// matrix whose bottom-right entry is normalized to 1.
///
/// # Examples
///
/// ```
/// use quadtex::core::geometry::{Point, ProjectiveMapping, Quad};
///
/// let quad = Quad::new([
///     Point::new(40.0, 0.0),
///     Point::new(60.0, 0.0),
///     Point::new(100.0, 100.0),
///     Point::new(0.0, 100.0),
/// ]);
/// let mapping = ProjectiveMapping::solve(&quad).unwrap();
///
/// let p = mapping.project(Point::new(1.0, 1.0)).unwrap();
/// assert!((p.x - 100.0).abs() < 1e-9 && (p.y - 100.0).abs() < 1e-9);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProjectiveMapping {
    coeffs: [f64; 8],
}

impl Default for ProjectiveMapping {
    fn default() -> Self {
        Self::identity()
    }
}

impl ProjectiveMapping {
    pub const fn identity() -> Self {
        Self {
            coeffs: [1.0, 0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0],
        }
    }

    /// Wrap raw coefficients `[A, B, C, D, E, F, G, H]` without validation
    pub const fn from_coefficients(coeffs: [f64; 8]) -> Self {
        Self { coeffs }
    }

    /// Derive the mapping sending the unit square corners onto `quad`
    ///
    /// # Errors
    ///
    /// Returns [`FillError::DegenerateGeometry`] when three corners are
    /// collinear, a corner is not finite, the quad is not convex, or the
    /// system turns out singular.
    pub fn solve(quad: &Quad) -> Result<Self, FillError> {
        if !quad.is_finite() {
            return Err(FillError::DegenerateGeometry(format!(
                "quad has non-finite corners: {:?}",
                quad.corners()
            )));
        }
        if let Some(corner) = quad.collinear_corner() {
            return Err(FillError::DegenerateGeometry(format!(
                "corner {} of {:?} is collinear with its neighbours",
                corner,
                quad.corners()
            )));
        }
        if !quad.is_convex() {
            return Err(FillError::DegenerateGeometry(format!(
                "quad {:?} is concave or self-intersecting",
                quad.corners()
            )));
        }

        let mut a = [[0.0f64; 8]; 8];
        let mut b = [0.0f64; 8];

        for (i, (&(u, v), p)) in UNIT_CORNERS.iter().zip(quad.corners()).enumerate() {
            let (x, y) = (p.x, p.y);
            a[i * 2] = [u, v, 1.0, 0.0, 0.0, 0.0, -u * x, -v * x];
            b[i * 2] = x;
            a[i * 2 + 1] = [0.0, 0.0, 0.0, u, v, 1.0, -u * y, -v * y];
            b[i * 2 + 1] = y;
        }

        let coeffs = solve_linear_system(&mut a, &mut b).ok_or_else(|| {
            FillError::DegenerateGeometry(format!(
                "projective system for {:?} is singular",
                quad.corners()
            ))
        })?;

        let mapping = Self { coeffs };
        mapping.check_invertible()?;

        log::trace!("Solved projective mapping {:?}", mapping.coeffs);
        Ok(mapping)
    }

    /// Reject a solution that collapses the plane or overflowed
    fn check_invertible(&self) -> Result<(), FillError> {
        if self.coeffs.iter().any(|c| !c.is_finite()) {
            return Err(FillError::DegenerateGeometry(format!(
                "projective coefficients are not finite: {:?}",
                self.coeffs
            )));
        }

        let [a, b, c, d, e, f, g, h] = self.coeffs;
        let det = a * (e - f * h) - b * (d - f * g) + c * (d * h - e * g);
        let scale = [a, b, c, d, e, f]
            .iter()
            .fold(1.0f64, |acc, v| acc.max(v.abs()));

        if det.abs() <= DETERMINANT_EPSILON * scale * scale {
            return Err(FillError::DegenerateGeometry(format!(
                "projective matrix is singular (det = {:e})",
                det
            )));
        }
        Ok(())
    }

    /// Map a unit-square coordinate onto the quad plane
    ///
    /// `point.x` is `u`, `point.y` is `v`. Coordinates slightly outside
    /// `[0, 1]` are accepted.
    ///
    /// # Errors
    ///
    /// Returns [`FillError::NumericFailure`] if the perspective divide hits a
    /// zero denominator or the result is not finite.
    #[inline]
    pub fn project(&self, point: Point) -> Result<Point, FillError> {
        let [a, b, c, d, e, f, g, h] = self.coeffs;
        let (u, v) = (point.x, point.y);

        let w = g * u + h * v + 1.0;
        if w == 0.0 {
            return Err(FillError::NumericFailure(format!(
                "zero perspective denominator at ({}, {})",
                u, v
            )));
        }

        let projected = Point {
            x: (a * u + b * v + c) / w,
            y: (d * u + e * v + f) / w,
        };
        if !projected.is_finite() {
            return Err(FillError::NumericFailure(format!(
                "projection of ({}, {}) is not finite",
                u, v
            )));
        }
        Ok(projected)
    }

    /// Coefficients `[A, B, C, D, E, F, G, H]`
    pub fn coefficients(&self) -> [f64; 8] {
        self.coeffs
    }

    /// Full 3x3 homogeneous matrix (row-major)
    pub fn matrix(&self) -> [[f64; 3]; 3] {
        let [a, b, c, d, e, f, g, h] = self.coeffs;
        [[a, b, c], [d, e, f], [g, h, 1.0]]
    }
}

/// Solve an 8x8 linear system using Gaussian elimination with partial pivoting
///
/// Returns `None` when a pivot falls below the relative threshold.
fn solve_linear_system(a: &mut [[f64; 8]; 8], b: &mut [f64; 8]) -> Option<[f64; 8]> {
    let n = 8;

    let scale = a
        .iter()
        .flat_map(|row| row.iter())
        .fold(0.0f64, |acc, v| acc.max(v.abs()));
    if scale == 0.0 {
        return None;
    }
    let threshold = PIVOT_EPSILON * scale;

    // Forward elimination
    for col in 0..n {
        let mut max_row = col;
        let mut max_val = a[col][col].abs();
        for (row, values) in a.iter().enumerate().skip(col + 1) {
            if values[col].abs() > max_val {
                max_val = values[col].abs();
                max_row = row;
            }
        }

        if max_val < threshold {
            return None;
        }

        if max_row != col {
            a.swap(col, max_row);
            b.swap(col, max_row);
        }

        let pivot = a[col][col];
        for row in (col + 1)..n {
            let factor = a[row][col] / pivot;
            if factor == 0.0 {
                continue;
            }
            for j in col..n {
                a[row][j] -= factor * a[col][j];
            }
            b[row] -= factor * b[col];
        }
    }

    // Back substitution
    let mut x = [0.0f64; 8];
    for i in (0..n).rev() {
        let mut sum = b[i];
        for j in (i + 1)..n {
            sum -= a[i][j] * x[j];
        }
        x[i] = sum / a[i][i];
    }

    Some(x)
}
