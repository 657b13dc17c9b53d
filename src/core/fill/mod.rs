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

//! Quad texture filling
//!
//! Fills a destination quad on a [`DrawSurface`] with the content of a source
//! quad of a texture, warped by one of two methods:
//! - [`FillMethod::Bilinear`]: bilinear patch on both quads (cheap, no foreshortening)
//! - [`FillMethod::Perspective`]: projective mapping on both quads (perspective-correct)
//!
//! # Algorithm
//!
//! 1. Validate options (fail fast, nothing drawn)
//! 2. Build a [`PointSource`] for the source and destination quad
//! 3. Clip the surface to the exact destination quad
//! 4. For every grid cell, map the padded cell triangles through both
//!    point sources and hand each (source, destination) pair to the surface
//! 5. Release the clip (also on error)
//!
//! The padded triangles deliberately overdraw past cell edges to hide seams;
//! the clip in step 3 discards whatever lands outside the quad.

mod decompose;
#[cfg(test)]
mod tests;

pub use decompose::{cell_triangles, cell_triangles_with_overlap, SEAM_OVERLAP};

use std::fmt;
use std::str::FromStr;

use log::{debug, trace, warn};
use serde::{Deserialize, Serialize};

use super::error::FillError;
use super::geometry::{BilinearInterpolator, Point, ProjectiveMapping, Quad, Winding};
use super::surface::{ClipScope, DrawSurface};

/// Default grid resolution per quad side
pub const DEFAULT_TILES: u32 = 10;

/// How unit-square grid positions are mapped onto a quad
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FillMethod {
    /// Straight-edge interpolation
    #[default]
    Bilinear,
    /// Exact projective transform
    Perspective,
}

impl FillMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            FillMethod::Bilinear => "bilinear",
            FillMethod::Perspective => "perspective",
        }
    }
}

impl fmt::Display for FillMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FillMethod {
    type Err = FillError;

    /// Parse `"bilinear"` or `"perspective"` (case-insensitive)
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "bilinear" => Ok(FillMethod::Bilinear),
            "perspective" => Ok(FillMethod::Perspective),
            _ => Err(FillError::UnsupportedMethod(s.to_string())),
        }
    }
}

/// Validated fill options
///
/// # Examples
///
/// ```
/// use quadtex::core::fill::{FillMethod, FillOptions};
///
/// let options = FillOptions::default();
/// assert_eq!(options.tiles, 10);
/// assert_eq!(options.method, FillMethod::Bilinear);
///
/// assert!(FillOptions::new(0, FillMethod::Perspective).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FillOptions {
    /// Grid cells per quad side (`>= 1`)
    pub tiles: u32,
    /// Mapping used for both quads
    pub method: FillMethod,
}

impl Default for FillOptions {
    fn default() -> Self {
        Self {
            tiles: DEFAULT_TILES,
            method: FillMethod::default(),
        }
    }
}

impl FillOptions {
    pub fn new(tiles: u32, method: FillMethod) -> Result<Self, FillError> {
        let options = Self { tiles, method };
        options.validate()?;
        Ok(options)
    }

    /// Check the tile count
    ///
    /// The fields are public, so [`fill_quad`] re-validates on every call.
    pub fn validate(&self) -> Result<(), FillError> {
        validate_tiles(self.tiles as i64).map(|_| ())
    }
}

fn validate_tiles(tiles: i64) -> Result<u32, FillError> {
    if tiles < 1 {
        return Err(FillError::InvalidArgument(format!(
            "tiles must be at least 1, got {}",
            tiles
        )));
    }
    u32::try_from(tiles).map_err(|_| {
        FillError::InvalidArgument(format!("tiles {} does not fit in a u32", tiles))
    })
}

/// Unvalidated fill options as they arrive from callers and config files
///
/// Missing fields fall back to the defaults of [`FillOptions`].
///
/// # Examples
///
/// ```
/// use quadtex::core::error::FillError;
/// use quadtex::core::fill::{FillMethod, RawFillOptions};
///
/// let raw = RawFillOptions { tiles: Some(4), method: Some("Perspective".into()) };
/// let options = raw.resolve().unwrap();
/// assert_eq!(options.method, FillMethod::Perspective);
///
/// let raw = RawFillOptions { tiles: None, method: Some("affine".into()) };
/// assert!(matches!(raw.resolve(), Err(FillError::UnsupportedMethod(_))));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RawFillOptions {
    pub tiles: Option<i64>,
    pub method: Option<String>,
}

impl RawFillOptions {
    /// Validate into [`FillOptions`]
    ///
    /// # Errors
    ///
    /// - [`FillError::UnsupportedMethod`] for an unknown method name
    /// - [`FillError::InvalidArgument`] for a tile count below 1 (or beyond `u32`)
    pub fn resolve(&self) -> Result<FillOptions, FillError> {
        let method = match &self.method {
            Some(name) => name.parse()?,
            None => FillMethod::default(),
        };
        let tiles = match self.tiles {
            Some(tiles) => validate_tiles(tiles)?,
            None => DEFAULT_TILES,
        };
        Ok(FillOptions { tiles, method })
    }
}

impl From<FillOptions> for RawFillOptions {
    fn from(options: FillOptions) -> Self {
        Self {
            tiles: Some(options.tiles as i64),
            method: Some(options.method.to_string()),
        }
    }
}

/// Grid-point generator for one quad, tagged by fill method
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PointSource {
    Bilinear(BilinearInterpolator),
    Perspective(ProjectiveMapping),
}

impl PointSource {
    /// Build the point source `method` needs for `quad`
    ///
    /// # Errors
    ///
    /// Returns [`FillError::DegenerateGeometry`] when a perspective mapping
    /// cannot be solved. Bilinear sources never fail.
    pub fn build(method: FillMethod, quad: &Quad) -> Result<Self, FillError> {
        match method {
            FillMethod::Bilinear => Ok(PointSource::Bilinear(BilinearInterpolator::new(quad))),
            FillMethod::Perspective => {
                ProjectiveMapping::solve(quad).map(PointSource::Perspective)
            }
        }
    }

    /// Point at grid position `(row, col)` of a `tiles x tiles` grid
    ///
    /// Fractional and slightly out-of-range positions are allowed.
    #[inline]
    pub fn point(&self, row: f64, col: f64, tiles: u32) -> Result<Point, FillError> {
        let tiles = tiles as f64;
        match self {
            PointSource::Bilinear(lerp) => Ok(lerp.eval(col / tiles, row / tiles)),
            PointSource::Perspective(mapping) => {
                mapping.project(Point::new(col / tiles, row / tiles))
            }
        }
    }

    pub fn method(&self) -> FillMethod {
        match self {
            PointSource::Bilinear(_) => FillMethod::Bilinear,
            PointSource::Perspective(_) => FillMethod::Perspective,
        }
    }
}

/// Work done by a fill call
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct FillStats {
    /// Grid cells visited
    pub cells: u64,
    /// Triangles handed to the surface (two per cell)
    pub triangles: u64,
}

/// Fill `destination` on `surface` with the `source` region of `texture`
///
/// Both quads use the same method so that grid cells line up. Drawing is
/// clipped to the exact destination quad for the duration of the call.
///
/// # Errors
///
/// - [`FillError::InvalidArgument`] if `options.tiles` is out of range
/// - [`FillError::DegenerateGeometry`] if a quad cannot be solved under
///   [`FillMethod::Perspective`]
/// - [`FillError::NumericFailure`] from projection or the surface
///
/// Option and geometry errors are raised before anything is drawn. An error
/// from the surface aborts the fill; pixels written before it remain.
///
/// # Examples
///
/// ```
/// use quadtex::core::fill::{fill_quad, FillMethod, FillOptions};
/// use quadtex::core::geometry::Quad;
/// use quadtex::core::surface::{Color, Framebuffer, Texture};
///
/// let texture = Texture::from_fn(8, 8, |_, _| Color::WHITE);
/// let mut fb = Framebuffer::new(32, 32);
///
/// let options = FillOptions::new(4, FillMethod::Perspective).unwrap();
/// fill_quad(
///     &mut fb,
///     &texture,
///     &Quad::rect(0.0, 0.0, 8.0, 8.0),
///     &Quad::rect(4.0, 4.0, 16.0, 16.0),
///     &options,
/// )
/// .unwrap();
///
/// assert_eq!(fb.get_pixel(10, 10), Some(Color::WHITE));
/// assert_eq!(fb.get_pixel(1, 1), Some(Color::TRANSPARENT));
/// ```
pub fn fill_quad<S: DrawSurface + ?Sized>(
    surface: &mut S,
    texture: &S::Texture,
    source: &Quad,
    destination: &Quad,
    options: &FillOptions,
) -> Result<FillStats, FillError> {
    options.validate()?;
    let tiles = options.tiles;

    debug!(
        "Filling quad {:?} from {:?} ({} method, {}x{} tiles)",
        destination.corners(),
        source.corners(),
        options.method,
        tiles,
        tiles
    );

    let (src_winding, dst_winding) = (source.winding(), destination.winding());
    if src_winding != dst_winding
        && src_winding != Winding::Degenerate
        && dst_winding != Winding::Degenerate
    {
        warn!(
            "Source winding {:?} differs from destination winding {:?}, texture will be mirrored",
            src_winding, dst_winding
        );
    }

    let src = PointSource::build(options.method, source)?;
    let dst = PointSource::build(options.method, destination)?;

    // Clip to the unpadded quad so seam padding never leaks outside it
    let mut scope = ClipScope::new(surface, destination.corners());

    let mut stats = FillStats::default();
    for row in 0..tiles {
        for col in 0..tiles {
            let [src_top, src_bot] = cell_triangles(row, col, &src, tiles)?;
            let [dst_top, dst_bot] = cell_triangles(row, col, &dst, tiles)?;

            trace!(
                "Cell ({}, {}): top {:?} -> {:?}, bottom {:?} -> {:?}",
                row,
                col,
                src_top,
                dst_top,
                src_bot,
                dst_bot
            );

            scope.fill_textured_triangle(texture, &src_top, &dst_top)?;
            scope.fill_textured_triangle(texture, &src_bot, &dst_bot)?;

            stats.cells += 1;
            stats.triangles += 2;
        }
    }

    debug!(
        "Filled {} cells ({} triangles)",
        stats.cells, stats.triangles
    );
    Ok(stats)
}

/// [`fill_quad`] with loosely typed options
///
/// Options are resolved before any geometry is computed, so an unknown
/// method name fails with [`FillError::UnsupportedMethod`] without touching
/// the surface.
pub fn fill_quad_raw<S: DrawSurface + ?Sized>(
    surface: &mut S,
    texture: &S::Texture,
    source: &Quad,
    destination: &Quad,
    options: &RawFillOptions,
) -> Result<FillStats, FillError> {
    let options = options.resolve()?;
    fill_quad(surface, texture, source, destination, &options)
}
