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

//! In-memory RGBA framebuffer
//!
//! # Layout
//!
//! Pixels are stored row-major (left-to-right, top-to-bottom) as [`Color`]
//! values. A fresh framebuffer is fully transparent, which makes unwritten
//! pixels easy to detect.
//!
//! # Clipping
//!
//! Clip polygons form a stack. Each pushed polygon is rasterized into a
//! [`ClipMask`] and intersected with the mask below it, so nested clips only
//! ever shrink the drawable region. Popping restores the previous mask.

use std::path::Path;

use super::clip::ClipMask;
use super::rasterizer::Rasterizer;
use super::texture::{Color, Texture};
use super::DrawSurface;
use crate::core::error::{FillError, Result};
use crate::core::geometry::{Point, Triangle};

/// RGBA pixel buffer implementing [`DrawSurface`]
///
/// # Examples
///
/// ```
/// use quadtex::core::surface::{Color, Framebuffer};
///
/// let mut fb = Framebuffer::new(320, 240);
/// fb.set_pixel(100, 100, Color::WHITE);
/// assert_eq!(fb.get_pixel(100, 100), Some(Color::WHITE));
/// assert_eq!(fb.get_pixel(320, 0), None);
/// ```
#[derive(Debug, Clone)]
pub struct Framebuffer {
    width: usize,
    height: usize,
    pixels: Vec<Color>,

    /// Triangle rasterizer covering the full buffer
    rasterizer: Rasterizer,

    /// Active clip masks, innermost last
    clip_stack: Vec<ClipMask>,
}

impl Framebuffer {
    /// Create a transparent framebuffer
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            pixels: vec![Color::TRANSPARENT; width * height],
            rasterizer: Rasterizer::new(width, height),
            clip_stack: Vec::new(),
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn pixels(&self) -> &[Color] {
        &self.pixels
    }

    #[inline(always)]
    pub fn get_pixel(&self, x: usize, y: usize) -> Option<Color> {
        if x >= self.width || y >= self.height {
            return None;
        }
        Some(self.pixels[y * self.width + x])
    }

    /// Write a pixel, ignoring coordinates outside the buffer
    ///
    /// Direct writes bypass the clip stack.
    #[inline(always)]
    pub fn set_pixel(&mut self, x: usize, y: usize, color: Color) {
        if x >= self.width || y >= self.height {
            return;
        }
        self.pixels[y * self.width + x] = color;
    }

    /// Fill every pixel with `color` (ignores clipping)
    pub fn clear(&mut self, color: Color) {
        self.pixels.fill(color);
    }

    /// Number of clip regions currently pushed
    pub fn clip_depth(&self) -> usize {
        self.clip_stack.len()
    }

    /// Currently effective clip mask, `None` when unclipped
    pub fn clip_mask(&self) -> Option<&ClipMask> {
        self.clip_stack.last()
    }

    /// Raw RGBA bytes, row-major
    pub fn to_rgba_bytes(&self) -> Vec<u8> {
        self.pixels.iter().flat_map(|p| p.to_bytes()).collect()
    }

    /// Encode the framebuffer as an image file (format from the extension)
    pub fn save_png<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        image::save_buffer(
            path,
            &self.to_rgba_bytes(),
            self.width as u32,
            self.height as u32,
            image::ColorType::Rgba8,
        )?;
        log::debug!(
            "Saved {}x{} framebuffer to {}",
            self.width,
            self.height,
            path.display()
        );
        Ok(())
    }
}

impl DrawSurface for Framebuffer {
    type Texture = Texture;

    fn push_clip(&mut self, polygon: &[Point]) {
        let mut mask = ClipMask::from_polygon(self.width, self.height, polygon);
        if let Some(outer) = self.clip_stack.last() {
            mask.intersect(outer);
        }
        log::trace!(
            "Push clip #{} ({} pixels) for polygon {:?}",
            self.clip_stack.len() + 1,
            mask.count(),
            polygon
        );
        self.clip_stack.push(mask);
    }

    fn pop_clip(&mut self) {
        if self.clip_stack.pop().is_none() {
            log::warn!("pop_clip called with no clip region pushed");
        }
    }

    fn fill_textured_triangle(
        &mut self,
        texture: &Texture,
        source: &Triangle,
        destination: &Triangle,
    ) -> std::result::Result<(), FillError> {
        self.rasterizer.draw_textured_triangle(
            &mut self.pixels,
            self.clip_stack.last(),
            texture,
            source,
            destination,
        )
    }
}
