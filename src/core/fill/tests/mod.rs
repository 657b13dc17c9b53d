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

//! Fill module tests
//!
//! Tests are organized into the following modules:
//! - `options`: method parsing and option validation
//! - `pipeline`: dispatch order, clip handling and error propagation
//! - `scenarios`: geometric properties of the emitted triangle pairs

mod options;

use crate::core::error::FillError;
use crate::core::geometry::{Point, Triangle};
use crate::core::surface::DrawSurface;

/// Call observed by [`RecordingSurface`]
#[derive(Debug, Clone, PartialEq)]
pub(super) enum SurfaceCall {
    PushClip(Vec<Point>),
    PopClip,
    Fill { source: Triangle, destination: Triangle },
}

/// Surface that records every call instead of drawing
#[derive(Debug, Default)]
pub(super) struct RecordingSurface {
    pub calls: Vec<SurfaceCall>,
    /// Fail the N-th (0-based) triangle fill with a numeric failure
    pub fail_at: Option<usize>,
    pub clip_depth: usize,
    fills: usize,
}

impl RecordingSurface {
    pub fn failing_at(index: usize) -> Self {
        Self {
            fail_at: Some(index),
            ..Default::default()
        }
    }

    pub fn triangle_pairs(&self) -> Vec<(Triangle, Triangle)> {
        self.calls
            .iter()
            .filter_map(|call| match call {
                SurfaceCall::Fill {
                    source,
                    destination,
                } => Some((*source, *destination)),
                _ => None,
            })
            .collect()
    }
}

impl DrawSurface for RecordingSurface {
    type Texture = ();

    fn push_clip(&mut self, polygon: &[Point]) {
        self.clip_depth += 1;
        self.calls.push(SurfaceCall::PushClip(polygon.to_vec()));
    }

    fn pop_clip(&mut self) {
        self.clip_depth -= 1;
        self.calls.push(SurfaceCall::PopClip);
    }

    fn fill_textured_triangle(
        &mut self,
        _texture: &(),
        source: &Triangle,
        destination: &Triangle,
    ) -> Result<(), FillError> {
        if self.fail_at == Some(self.fills) {
            return Err(FillError::NumericFailure("injected failure".to_string()));
        }
        self.fills += 1;
        self.calls.push(SurfaceCall::Fill {
            source: *source,
            destination: *destination,
        });
        Ok(())
    }
}
