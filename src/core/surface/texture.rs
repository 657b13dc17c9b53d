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

//! Colors and textures
//!
//! Textures are stored as row-major RGBA8 texels. Texture-space coordinates
//! are in texel units: texel `(x, y)` covers `[x, x+1) x [y, y+1)`.

use std::path::Path;

use crate::core::error::{FillError, Result};

/// An 8-bit per channel RGBA color
///
/// # Examples
///
/// ```
/// use quadtex::core::surface::Color;
///
/// let color = Color::rgba(0x11, 0x22, 0x33, 0x44);
/// assert_eq!(color.to_bytes(), [0x11, 0x22, 0x33, 0x44]);
/// assert_eq!(Color::rgb(1, 2, 3).a, 255);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Color {
    /// Red channel (0-255)
    pub r: u8,
    /// Green channel (0-255)
    pub g: u8,
    /// Blue channel (0-255)
    pub b: u8,
    /// Alpha channel (0 = transparent, 255 = opaque)
    pub a: u8,
}

impl Color {
    pub const TRANSPARENT: Color = Color::rgba(0, 0, 0, 0);
    pub const BLACK: Color = Color::rgb(0, 0, 0);
    pub const WHITE: Color = Color::rgb(255, 255, 255);
    pub const RED: Color = Color::rgb(255, 0, 0);
    pub const GREEN: Color = Color::rgb(0, 255, 0);
    pub const BLUE: Color = Color::rgb(0, 0, 255);

    /// Opaque color
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    pub fn to_bytes(self) -> [u8; 4] {
        [self.r, self.g, self.b, self.a]
    }
}

/// RGBA texel grid sampled by the textured-triangle rasterizer
#[derive(Debug, Clone, PartialEq)]
pub struct Texture {
    width: u32,
    height: u32,
    pixels: Vec<Color>,
}

impl Texture {
    /// Create a texture filled with opaque white
    pub fn new(width: u32, height: u32) -> Self {
        Self::from_fn(width, height, |_, _| Color::WHITE)
    }

    /// Create a texture by evaluating `f(x, y)` for every texel
    ///
    /// # Examples
    ///
    /// ```
    /// use quadtex::core::surface::{Color, Texture};
    ///
    /// let texture = Texture::from_fn(4, 2, |x, y| Color::rgb(x as u8, y as u8, 0));
    /// assert_eq!(texture.get(3, 1), Some(Color::rgb(3, 1, 0)));
    /// ```
    pub fn from_fn(width: u32, height: u32, mut f: impl FnMut(u32, u32) -> Color) -> Self {
        let mut pixels = Vec::with_capacity(width as usize * height as usize);
        for y in 0..height {
            for x in 0..width {
                pixels.push(f(x, y));
            }
        }
        Self {
            width,
            height,
            pixels,
        }
    }

    /// Wrap an existing texel buffer
    ///
    /// # Errors
    ///
    /// Returns [`FillError::InvalidArgument`] if a dimension is zero or the
    /// buffer length does not match `width * height`.
    pub fn from_pixels(
        width: u32,
        height: u32,
        pixels: Vec<Color>,
    ) -> std::result::Result<Self, FillError> {
        if width == 0 || height == 0 {
            return Err(FillError::InvalidArgument(format!(
                "texture dimensions must be non-zero, got {}x{}",
                width, height
            )));
        }
        if pixels.len() != width as usize * height as usize {
            return Err(FillError::InvalidArgument(format!(
                "texture {}x{} needs {} texels, got {}",
                width,
                height,
                width as usize * height as usize,
                pixels.len()
            )));
        }
        Ok(Self {
            width,
            height,
            pixels,
        })
    }

    /// Two-color checkerboard with square cells of `cell` texels
    pub fn checkerboard(width: u32, height: u32, cell: u32, a: Color, b: Color) -> Self {
        let cell = cell.max(1);
        Self::from_fn(width, height, |x, y| {
            if ((x / cell) + (y / cell)) % 2 == 0 {
                a
            } else {
                b
            }
        })
    }

    /// Load a texture from an image file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let rgba = image::open(path)?.to_rgba8();
        let (width, height) = rgba.dimensions();

        let pixels = rgba
            .pixels()
            .map(|p| Color::rgba(p[0], p[1], p[2], p[3]))
            .collect();

        log::debug!("Loaded {}x{} texture from {}", width, height, path.display());
        Ok(Self::from_pixels(width, height, pixels)?)
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn pixels(&self) -> &[Color] {
        &self.pixels
    }

    /// Texel at integer coordinates, `None` when out of bounds
    pub fn get(&self, x: u32, y: u32) -> Option<Color> {
        if x >= self.width || y >= self.height {
            return None;
        }
        Some(self.pixels[y as usize * self.width as usize + x as usize])
    }

    /// Nearest-texel sample at texture-space coordinates
    ///
    /// Coordinates outside the texture clamp to the edge texels, which is
    /// what seam padding past the source quad needs. An empty texture
    /// samples as transparent.
    #[inline]
    pub fn sample(&self, u: f64, v: f64) -> Color {
        if self.pixels.is_empty() {
            return Color::TRANSPARENT;
        }
        let x = clamp_texel(u, self.width);
        let y = clamp_texel(v, self.height);
        self.pixels[y * self.width as usize + x]
    }
}

#[inline]
fn clamp_texel(coord: f64, size: u32) -> usize {
    let max = size.saturating_sub(1) as f64;
    // NaN lands on texel 0
    coord.floor().clamp(0.0, max) as usize
}
