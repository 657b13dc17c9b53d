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

/// Error types for quad texture filling
use thiserror::Error;

/// Result type for operations that touch files, images or configuration
pub type Result<T> = std::result::Result<T, QuadTexError>;

/// Main error type for the crate
#[derive(Error, Debug)]
pub enum QuadTexError {
    #[error("Fill error: {0}")]
    Fill(#[from] FillError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Image error: {0}")]
    Image(#[from] image::ImageError),

    #[error("Parse error: {0}")]
    Parse(String),

    #[error("Configuration error: {0}")]
    Config(String),
}

/// Errors raised by the geometry and fill pipeline
///
/// Every variant aborts the whole fill call. None of them are retried
/// internally; falling back to another method is up to the caller.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum FillError {
    /// A precondition on an argument was violated (quad arity, tile count, ...)
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// The requested fill method is not recognized
    #[error("Unsupported fill method: {0:?}")]
    UnsupportedMethod(String),

    /// The projective system for a quad is singular
    #[error("Degenerate geometry: {0}")]
    DegenerateGeometry(String),

    /// A perspective divide or rasterization step produced no finite result
    #[error("Numeric failure: {0}")]
    NumericFailure(String),
}
