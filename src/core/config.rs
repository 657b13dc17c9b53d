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

//! Fill job configuration
//!
//! A fill job describes one quad fill: which texture to read, which quads to
//! map, how large the output canvas is and which options to use. Jobs are
//! read from TOML or JSON files and can be overridden field by field from
//! the command line.
//!
//! # Example
//!
//! ```toml
//! texture = "brick.png"
//! output = "wall.png"
//! width = 320
//! height = 240
//! destination = [[140, 40], [180, 40], [300, 220], [20, 220]]
//!
//! [fill]
//! tiles = 16
//! method = "perspective"
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use super::error::{FillError, QuadTexError, Result};
use super::fill::RawFillOptions;
use super::geometry::{Point, Quad};

/// One fill job; every field is optional so files and CLI flags can be layered
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FillConfig {
    /// Texture image to sample
    pub texture: Option<PathBuf>,
    /// Output image path
    pub output: Option<PathBuf>,
    /// Canvas width in pixels
    pub width: Option<usize>,
    /// Canvas height in pixels
    pub height: Option<usize>,
    /// Source quad corners in texel units
    pub source: Option<Vec<[f64; 2]>>,
    /// Destination quad corners in pixel units
    pub destination: Option<Vec<[f64; 2]>>,
    /// Fill options (unvalidated)
    pub fill: RawFillOptions,
}

impl FillConfig {
    /// Load a job file, picking the parser from the extension
    ///
    /// `.json` files are parsed as JSON, everything else as TOML.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let contents = fs::read_to_string(path)?;

        let is_json = path
            .extension()
            .map(|ext| ext.eq_ignore_ascii_case("json"))
            .unwrap_or(false);

        let config = if is_json {
            Self::from_json_str(&contents)
        } else {
            Self::from_toml_str(&contents)
        }
        .map_err(|e| QuadTexError::Parse(format!("{}: {}", path.display(), e)))?;

        log::debug!("Loaded fill config from {}", path.display());
        Ok(config)
    }

    pub fn from_toml_str(contents: &str) -> Result<Self> {
        toml::from_str(contents).map_err(|e| QuadTexError::Parse(e.to_string()))
    }

    pub fn from_json_str(contents: &str) -> Result<Self> {
        serde_json::from_str(contents).map_err(|e| QuadTexError::Parse(e.to_string()))
    }

    /// Layer `overrides` on top of `self`; set fields in `overrides` win
    pub fn merge(self, overrides: FillConfig) -> FillConfig {
        FillConfig {
            texture: overrides.texture.or(self.texture),
            output: overrides.output.or(self.output),
            width: overrides.width.or(self.width),
            height: overrides.height.or(self.height),
            source: overrides.source.or(self.source),
            destination: overrides.destination.or(self.destination),
            fill: RawFillOptions {
                tiles: overrides.fill.tiles.or(self.fill.tiles),
                method: overrides.fill.method.or(self.fill.method),
            },
        }
    }

    /// Source quad, if configured
    ///
    /// # Errors
    ///
    /// [`FillError::InvalidArgument`] unless exactly four corners are listed.
    pub fn source_quad(&self) -> Result<Option<Quad>> {
        Ok(self.source.as_deref().map(corners_to_quad).transpose()?)
    }

    /// Destination quad, if configured
    pub fn destination_quad(&self) -> Result<Option<Quad>> {
        Ok(self.destination.as_deref().map(corners_to_quad).transpose()?)
    }
}

fn corners_to_quad(corners: &[[f64; 2]]) -> std::result::Result<Quad, FillError> {
    let points: Vec<Point> = corners.iter().copied().map(Point::from).collect();
    Quad::from_points(&points)
}

/// Parse a flat `x0,y0,x1,y1,...` coordinate list into corner pairs
///
/// # Examples
///
/// ```
/// use quadtex::core::config::parse_corners;
///
/// let corners = parse_corners("0,0, 10,0, 10,5, 0,5").unwrap();
/// assert_eq!(corners, vec![[0.0, 0.0], [10.0, 0.0], [10.0, 5.0], [0.0, 5.0]]);
/// ```
pub fn parse_corners(s: &str) -> Result<Vec<[f64; 2]>> {
    let values = s
        .split(',')
        .map(|v| {
            v.trim()
                .parse::<f64>()
                .map_err(|e| QuadTexError::Parse(format!("invalid coordinate {:?}: {}", v, e)))
        })
        .collect::<Result<Vec<f64>>>()?;

    if values.len() % 2 != 0 {
        return Err(QuadTexError::Parse(format!(
            "odd number of coordinates ({}) in {:?}",
            values.len(),
            s
        )));
    }

    Ok(values.chunks_exact(2).map(|c| [c[0], c[1]]).collect())
}
