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

//! Method parsing and option validation tests

use super::super::*;

#[test]
fn test_method_parsing() {
    assert_eq!("bilinear".parse::<FillMethod>(), Ok(FillMethod::Bilinear));
    assert_eq!("perspective".parse::<FillMethod>(), Ok(FillMethod::Perspective));
    assert_eq!(" PERSPECTIVE ".parse::<FillMethod>(), Ok(FillMethod::Perspective));
}

#[test]
fn test_unknown_method() {
    assert_eq!(
        "affine".parse::<FillMethod>(),
        Err(FillError::UnsupportedMethod("affine".to_string()))
    );
    assert!(matches!(
        "".parse::<FillMethod>(),
        Err(FillError::UnsupportedMethod(_))
    ));
}

#[test]
fn test_method_display_round_trip() {
    for method in [FillMethod::Bilinear, FillMethod::Perspective] {
        assert_eq!(method.to_string().parse::<FillMethod>(), Ok(method));
    }
}

#[test]
fn test_default_options() {
    let options = FillOptions::default();
    assert_eq!(options.tiles, DEFAULT_TILES);
    assert_eq!(options.method, FillMethod::Bilinear);
    assert!(options.validate().is_ok());
}

#[test]
fn test_tiles_bounds() {
    assert!(matches!(
        FillOptions::new(0, FillMethod::Bilinear),
        Err(FillError::InvalidArgument(_))
    ));
    assert!(FillOptions::new(1, FillMethod::Bilinear).is_ok());
    assert!(FillOptions::new(2000, FillMethod::Bilinear).is_ok());
    assert!(FillOptions::new(u32::MAX, FillMethod::Perspective).is_ok());
}

#[test]
fn test_raw_options_large_tiles() {
    let raw = RawFillOptions {
        tiles: Some(2000),
        method: Some("bilinear".to_string()),
    };
    assert_eq!(raw.resolve().map(|o| o.tiles), Ok(2000));

    let raw = RawFillOptions {
        tiles: Some(u32::MAX as i64 + 1),
        method: None,
    };
    assert!(matches!(
        raw.resolve(),
        Err(FillError::InvalidArgument(_))
    ));
}

#[test]
fn test_raw_options_defaults() {
    let options = RawFillOptions::default().resolve().unwrap();
    assert_eq!(options, FillOptions::default());
}

#[test]
fn test_raw_options_negative_tiles() {
    for tiles in [0, -1, -100] {
        let raw = RawFillOptions {
            tiles: Some(tiles),
            method: None,
        };
        assert!(matches!(
            raw.resolve(),
            Err(FillError::InvalidArgument(_))
        ));
    }
}

#[test]
fn test_raw_options_method_checked_first() {
    let raw = RawFillOptions {
        tiles: Some(0),
        method: Some("wireframe".to_string()),
    };
    assert!(matches!(
        raw.resolve(),
        Err(FillError::UnsupportedMethod(_))
    ));
}

#[test]
fn test_raw_options_from_validated() {
    let options = FillOptions::new(7, FillMethod::Perspective).unwrap();
    let raw = RawFillOptions::from(options);
    assert_eq!(raw.tiles, Some(7));
    assert_eq!(raw.method.as_deref(), Some("perspective"));
    assert_eq!(raw.resolve(), Ok(options));
}
