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

//! Grid cell to triangle decomposition
//!
//! The unit square is divided into `tiles x tiles` cells. Each cell is split
//! along its top-left to bottom-right diagonal into two triangles so that an
//! affine (3-point) texture fill can approximate the nonlinear quad mapping:
//!
//! ```text
//!   0-----1              2
//!    \    |              |\
//!      \  |  top         |  \   bottom
//!        \|              |    \
//!         2              1-----0
//! ```
//!
//! # Seam Padding
//!
//! Every triangle is grown by [`SEAM_OVERLAP`] of a cell before its corners
//! are mapped, so neighbouring triangles overlap instead of leaving
//! sub-pixel gaps. The diagonal corners get twice the padding because the
//! shared diagonal is where gaps show up first. The overdraw past the quad's
//! outer boundary is masked by the clip the filler installs.

use super::PointSource;
use crate::core::error::FillError;
use crate::core::geometry::Triangle;

/// Overlap added to triangle corners, as a fraction of one grid cell
pub const SEAM_OVERLAP: f64 = 0.02;

/// Return the `[top, bottom]` triangles covering cell `(row, col)`
///
/// `row` runs along `t`/`v` (downward) and `col` along `s`/`u` (rightward).
///
/// # Errors
///
/// Propagates [`FillError::NumericFailure`] from the projective source.
pub fn cell_triangles(
    row: u32,
    col: u32,
    source: &PointSource,
    tiles: u32,
) -> Result<[Triangle; 2], FillError> {
    cell_triangles_with_overlap(row, col, source, tiles, SEAM_OVERLAP)
}

/// Same as [`cell_triangles`] with an explicit overlap
pub fn cell_triangles_with_overlap(
    row: u32,
    col: u32,
    source: &PointSource,
    tiles: u32,
    pad: f64,
) -> Result<[Triangle; 2], FillError> {
    let p = |r: f64, c: f64| source.point(r, c, tiles);
    let (row, col) = (row as f64, col as f64);

    let top = [
        p(row - pad, col - pad * 2.0)?,
        p(row - pad, col + 1.0 + pad)?,
        p(row + 1.0 + pad * 2.0, col + 1.0 + pad)?,
    ];

    let bottom = [
        p(row + 1.0 + pad, col + 1.0 + pad)?,
        p(row + 1.0 + pad, col - pad)?,
        p(row - pad, col - pad)?,
    ];

    Ok([top, bottom])
}
