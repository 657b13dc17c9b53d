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

//! Core components
//!
//! This module contains all components of the quad filler:
//! - Geometry (points, quads, bilinear and projective mappings)
//! - Fill (grid decomposition and the quad fill orchestrator)
//! - Surface (drawing surface contract and an in-memory framebuffer)
//! - Config (fill job files)

pub mod config;
pub mod error;
pub mod fill;
pub mod geometry;
pub mod surface;

// Re-export commonly used types
pub use config::FillConfig;
pub use error::{FillError, QuadTexError, Result};
pub use fill::{fill_quad, fill_quad_raw, FillMethod, FillOptions, RawFillOptions};
pub use geometry::{Point, Quad, Triangle};
pub use surface::{Color, DrawSurface, Framebuffer, Texture};
