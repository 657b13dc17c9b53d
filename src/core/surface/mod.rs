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

//! Drawing surfaces
//!
//! The quad filler never touches pixels itself. It talks to a [`DrawSurface`],
//! which must provide:
//! - a polygon clip region with save/restore (stack) semantics
//! - an affine textured-triangle fill primitive
//!
//! This module also ships an in-memory implementation of that contract:
//! - [`Framebuffer`]: RGBA pixel buffer with a polygon clip stack
//! - [`Texture`]: RGBA texel source with nearest-texel sampling
//! - [`Rasterizer`]: barycentric textured-triangle rasterizer

mod clip;
mod framebuffer;
mod rasterizer;
mod texture;

use std::ops::{Deref, DerefMut};

pub use clip::ClipMask;
pub use framebuffer::Framebuffer;
pub use rasterizer::Rasterizer;
pub use texture::{Color, Texture};

use super::error::FillError;
use super::geometry::{Point, Triangle};

/// Contract of a surface the quad filler can draw into
///
/// Implementations are driven by a single owner; the filler takes `&mut self`
/// for the whole call.
pub trait DrawSurface {
    /// Texel source sampled by [`DrawSurface::fill_textured_triangle`]
    type Texture;

    /// Restrict subsequent drawing to the inside of `polygon`
    ///
    /// Clips nest: the effective region is the intersection of every pushed
    /// polygon still on the stack.
    fn push_clip(&mut self, polygon: &[Point]);

    /// Restore the clip region active before the matching [`DrawSurface::push_clip`]
    fn pop_clip(&mut self);

    /// Affinely warp the `source` triangle of `texture` onto `destination`
    ///
    /// `source` is in texel units, `destination` in surface pixel units.
    fn fill_textured_triangle(
        &mut self,
        texture: &Self::Texture,
        source: &Triangle,
        destination: &Triangle,
    ) -> Result<(), FillError>;
}

/// Scoped clip region
///
/// Pushes a clip polygon on creation and pops it when dropped, so the
/// surface is never left clipped after an early return or a panic.
///
/// # Examples
///
/// ```
/// use quadtex::core::geometry::Quad;
/// use quadtex::core::surface::{ClipScope, Framebuffer};
///
/// let mut fb = Framebuffer::new(16, 16);
/// {
///     let scope = ClipScope::new(&mut fb, Quad::rect(0.0, 0.0, 8.0, 8.0).corners());
///     assert_eq!(scope.clip_depth(), 1);
/// }
/// assert_eq!(fb.clip_depth(), 0);
/// ```
pub struct ClipScope<'a, S: DrawSurface + ?Sized> {
    surface: &'a mut S,
}

impl<'a, S: DrawSurface + ?Sized> ClipScope<'a, S> {
    pub fn new(surface: &'a mut S, polygon: &[Point]) -> Self {
        surface.push_clip(polygon);
        Self { surface }
    }
}

impl<S: DrawSurface + ?Sized> Deref for ClipScope<'_, S> {
    type Target = S;

    fn deref(&self) -> &S {
        self.surface
    }
}

impl<S: DrawSurface + ?Sized> DerefMut for ClipScope<'_, S> {
    fn deref_mut(&mut self) -> &mut S {
        self.surface
    }
}

impl<S: DrawSurface + ?Sized> Drop for ClipScope<'_, S> {
    fn drop(&mut self) {
        self.surface.pop_clip();
    }
}
