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

//! Planar geometry used by the quad filler
//!
//! This module contains the value types shared by every stage of a fill:
//! points, quads and triangles, plus the two ways of parametrizing a quad
//! over the unit square:
//! - [`BilinearInterpolator`]: straight-edge interpolation (cheap, affine per edge)
//! - [`ProjectiveMapping`]: exact projective transform (perspective-correct)
//!
//! # Coordinate System
//!
//! Points live either in texture space (texel units) or in surface space
//! (pixel units). Both use the same convention:
//! - Origin (0, 0) is at top-left
//! - X increases to the right
//! - Y increases downward
//!
//! # Quad Winding
//!
//! Quad corners are always ordered `[top-left, top-right, bottom-right, bottom-left]`
//! and correspond to the unit square corners `(0,0), (1,0), (1,1), (0,1)`.

mod interpolator;
mod projection;

pub use interpolator::BilinearInterpolator;
pub use projection::ProjectiveMapping;

use super::error::FillError;

/// Relative tolerance used to decide that three corners are collinear
///
/// Compared against the triangle area normalized by the squared extent
/// of the quad, so the check does not depend on the coordinate scale.
pub const COLLINEAR_EPSILON: f64 = 1e-9;

/// A 2D coordinate in texture or surface space
///
/// # Examples
///
/// ```
/// use quadtex::core::geometry::Point;
///
/// let a = Point::new(0.0, 0.0);
/// let b = Point::new(10.0, 4.0);
/// assert_eq!(a.lerp(b, 0.5), Point::new(5.0, 2.0));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point {
    /// X coordinate
    pub x: f64,
    /// Y coordinate
    pub y: f64,
}

impl Point {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Linear interpolation towards `other`
    ///
    /// `t` is not clamped: values outside `[0, 1]` extrapolate along the line,
    /// which seam padding relies on.
    #[inline]
    pub fn lerp(self, other: Point, t: f64) -> Point {
        Point {
            x: self.x + (other.x - self.x) * t,
            y: self.y + (other.y - self.y) * t,
        }
    }

    /// Z component of the cross product of `(a - self)` and `(b - self)`
    ///
    /// Twice the signed area of the triangle `(self, a, b)`.
    #[inline]
    pub fn cross(self, a: Point, b: Point) -> f64 {
        (a.x - self.x) * (b.y - self.y) - (a.y - self.y) * (b.x - self.x)
    }

    pub fn distance(self, other: Point) -> f64 {
        (self.x - other.x).hypot(self.y - other.y)
    }

    pub fn is_finite(self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

impl From<(f64, f64)> for Point {
    fn from((x, y): (f64, f64)) -> Self {
        Self { x, y }
    }
}

impl From<[f64; 2]> for Point {
    fn from([x, y]: [f64; 2]) -> Self {
        Self { x, y }
    }
}

/// Three points handed to a triangle-fill primitive
pub type Triangle = [Point; 3];

/// Orientation of a quad's corner sequence
///
/// Measured in y-down coordinates, so `Clockwise` is clockwise as seen on screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Winding {
    Clockwise,
    CounterClockwise,
    /// Zero signed area
    Degenerate,
}

/// Four corners in `[top-left, top-right, bottom-right, bottom-left]` order
///
/// A quad is owned by the caller for the duration of a fill and is never
/// mutated by the filler.
///
/// # Examples
///
/// ```
/// use quadtex::core::geometry::{Point, Quad, Winding};
///
/// let quad = Quad::rect(0.0, 0.0, 64.0, 32.0);
/// assert_eq!(quad.corners()[2], Point::new(64.0, 32.0));
/// assert_eq!(quad.winding(), Winding::Clockwise);
/// assert!(!quad.is_degenerate());
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Quad {
    corners: [Point; 4],
}

impl Quad {
    pub const fn new(corners: [Point; 4]) -> Self {
        Self { corners }
    }

    /// Build a quad from an arbitrary point list
    ///
    /// # Errors
    ///
    /// Returns [`FillError::InvalidArgument`] unless exactly four points are given.
    pub fn from_points(points: &[Point]) -> Result<Self, FillError> {
        let corners: [Point; 4] = points.try_into().map_err(|_| {
            FillError::InvalidArgument(format!(
                "a quad needs exactly 4 points, got {}",
                points.len()
            ))
        })?;
        Ok(Self { corners })
    }

    /// Axis-aligned rectangle with its top-left corner at `(x, y)`
    pub fn rect(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self::new([
            Point::new(x, y),
            Point::new(x + width, y),
            Point::new(x + width, y + height),
            Point::new(x, y + height),
        ])
    }

    /// The unit square `(0,0), (1,0), (1,1), (0,1)`
    pub fn unit() -> Self {
        Self::rect(0.0, 0.0, 1.0, 1.0)
    }

    pub fn corners(&self) -> &[Point; 4] {
        &self.corners
    }

    /// Shoelace area, positive for clockwise (y-down) winding
    pub fn signed_area(&self) -> f64 {
        let c = &self.corners;
        let mut twice_area = 0.0;
        for i in 0..4 {
            let a = c[i];
            let b = c[(i + 1) % 4];
            twice_area += a.x * b.y - b.x * a.y;
        }
        twice_area * 0.5
    }

    pub fn winding(&self) -> Winding {
        let area = self.signed_area();
        if area > 0.0 {
            Winding::Clockwise
        } else if area < 0.0 {
            Winding::CounterClockwise
        } else {
            Winding::Degenerate
        }
    }

    /// Squared length of the bounding box diagonal
    fn extent_squared(&self) -> f64 {
        let (mut min_x, mut min_y) = (f64::INFINITY, f64::INFINITY);
        let (mut max_x, mut max_y) = (f64::NEG_INFINITY, f64::NEG_INFINITY);
        for p in &self.corners {
            min_x = min_x.min(p.x);
            min_y = min_y.min(p.y);
            max_x = max_x.max(p.x);
            max_y = max_y.max(p.y);
        }
        (max_x - min_x).powi(2) + (max_y - min_y).powi(2)
    }

    /// Index of the middle corner of the first collinear (or coincident) triple
    ///
    /// The four cyclically consecutive triples cover every 3-of-4 combination.
    pub fn collinear_corner(&self) -> Option<usize> {
        let extent = self.extent_squared();
        if extent == 0.0 || !extent.is_finite() {
            return Some(0);
        }
        let c = &self.corners;
        (0..4).find(|&i| {
            let prev = c[(i + 3) % 4];
            let next = c[(i + 1) % 4];
            (c[i].cross(prev, next) / extent).abs() < COLLINEAR_EPSILON
        })
    }

    /// True when any three corners are collinear or coincident
    pub fn is_degenerate(&self) -> bool {
        self.collinear_corner().is_some()
    }

    /// True when every corner turns the same way
    ///
    /// Concave ("dart") and self-intersecting ("bow-tie") quads are not
    /// convex. Either winding is accepted.
    pub fn is_convex(&self) -> bool {
        let c = &self.corners;
        let turns = (0..4).map(|i| c[i].cross(c[(i + 3) % 4], c[(i + 1) % 4]));
        let (mut positive, mut negative) = (false, false);
        for turn in turns {
            positive |= turn > 0.0;
            negative |= turn < 0.0;
        }
        !(positive && negative)
    }

    pub fn is_finite(&self) -> bool {
        self.corners.iter().all(|p| p.is_finite())
    }
}

impl From<[Point; 4]> for Quad {
    fn from(corners: [Point; 4]) -> Self {
        Self::new(corners)
    }
}

impl TryFrom<&[Point]> for Quad {
    type Error = FillError;

    fn try_from(points: &[Point]) -> Result<Self, Self::Error> {
        Self::from_points(points)
    }
}
