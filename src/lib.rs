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

//! Quad-to-quad texture mapping rasterizer
//!
//! This library fills an arbitrary destination quad on a drawing surface with
//! the content of an arbitrary source quad of a texture, warped either by a
//! cheap bilinear approximation or by an exact projective transform.
//!
//! # Example
//!
//! ```
//! use quadtex::core::fill::{fill_quad, FillMethod, FillOptions};
//! use quadtex::core::geometry::{Point, Quad};
//! use quadtex::core::surface::{Color, Framebuffer, Texture};
//!
//! let texture = Texture::checkerboard(64, 64, 8, Color::BLACK, Color::WHITE);
//! let mut fb = Framebuffer::new(320, 240);
//!
//! // A wall receding into the distance
//! let wall = Quad::new([
//!     Point::new(140.0, 40.0),
//!     Point::new(180.0, 40.0),
//!     Point::new(300.0, 220.0),
//!     Point::new(20.0, 220.0),
//! ]);
//!
//! let options = FillOptions::new(16, FillMethod::Perspective).unwrap();
//! fill_quad(&mut fb, &texture, &Quad::rect(0.0, 0.0, 64.0, 64.0), &wall, &options).unwrap();
//! ```

pub mod core;
