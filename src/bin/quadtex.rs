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

use std::path::PathBuf;

use clap::Parser;
use log::{error, info, warn};
use quadtex::core::config::parse_corners;
use quadtex::core::error::{QuadTexError, Result};
use quadtex::core::fill::{fill_quad, FillMethod, FillOptions, FillStats};
use quadtex::core::geometry::{Point, Quad};
use quadtex::core::surface::{Color, Framebuffer, Texture};
use quadtex::core::{FillConfig, FillError};

const DEFAULT_WIDTH: usize = 320;
const DEFAULT_HEIGHT: usize = 240;
const DEFAULT_OUTPUT: &str = "quadtex.png";

/// Quad-to-quad texture mapper
#[derive(Parser)]
#[command(name = "quadtex")]
#[command(about = "Render a texture region into an arbitrary quad", long_about = None)]
struct Args {
    /// Fill job file (.toml or .json)
    #[arg(short = 'c', long)]
    config: Option<PathBuf>,

    /// Texture image (a checkerboard is generated when omitted)
    #[arg(short = 't', long)]
    texture: Option<PathBuf>,

    /// Output PNG path
    #[arg(short = 'o', long)]
    output: Option<PathBuf>,

    /// Canvas width in pixels
    #[arg(long)]
    width: Option<usize>,

    /// Canvas height in pixels
    #[arg(long)]
    height: Option<usize>,

    /// Destination quad as x0,y0,x1,y1,x2,y2,x3,y3
    #[arg(short = 'd', long, allow_hyphen_values = true)]
    dest: Option<String>,

    /// Source quad in texel units as x0,y0,x1,y1,x2,y2,x3,y3
    #[arg(short = 's', long, allow_hyphen_values = true)]
    source: Option<String>,

    /// Grid cells per quad side
    #[arg(short = 'n', long, allow_hyphen_values = true)]
    tiles: Option<i64>,

    /// Mapping method: bilinear or perspective
    #[arg(short = 'm', long)]
    method: Option<String>,

    /// Retry with the bilinear method when a perspective fill fails
    #[arg(long)]
    fallback: bool,
}

impl Args {
    /// Command-line values as a config layer
    fn overrides(&self) -> Result<FillConfig> {
        let mut config = FillConfig {
            texture: self.texture.clone(),
            output: self.output.clone(),
            width: self.width,
            height: self.height,
            ..Default::default()
        };
        config.destination = self.dest.as_deref().map(parse_corners).transpose()?;
        config.source = self.source.as_deref().map(parse_corners).transpose()?;
        config.fill.tiles = self.tiles;
        config.fill.method = self.method.clone();
        Ok(config)
    }
}

/// Wall receding toward the top of the canvas
fn default_destination(width: usize, height: usize) -> Quad {
    let (w, h) = (width as f64, height as f64);
    Quad::new([
        Point::new(w * 0.4375, h / 6.0),
        Point::new(w * 0.5625, h / 6.0),
        Point::new(w * 0.9375, h * 11.0 / 12.0),
        Point::new(w * 0.0625, h * 11.0 / 12.0),
    ])
}

fn load_texture(config: &FillConfig) -> Result<Texture> {
    match &config.texture {
        Some(path) => {
            info!("Loading texture from: {}", path.display());
            Texture::load(path)
        }
        None => {
            info!("No texture given, using a generated checkerboard");
            Ok(Texture::checkerboard(
                256,
                256,
                32,
                Color::rgb(0xC0, 0x40, 0x30),
                Color::rgb(0xF0, 0xE0, 0xC0),
            ))
        }
    }
}

/// Whether a failed perspective fill is worth retrying as bilinear
fn is_recoverable(err: &FillError) -> bool {
    matches!(
        err,
        FillError::DegenerateGeometry(_) | FillError::NumericFailure(_)
    )
}

fn render(
    fb: &mut Framebuffer,
    texture: &Texture,
    source: &Quad,
    destination: &Quad,
    config: &FillConfig,
    fallback: bool,
) -> Result<FillStats> {
    let options = config.fill.resolve()?;

    match fill_quad(fb, texture, source, destination, &options) {
        Ok(stats) => Ok(stats),
        Err(e) if fallback && options.method == FillMethod::Perspective && is_recoverable(&e) => {
            warn!("Perspective fill failed ({}), falling back to bilinear", e);
            fb.clear(Color::TRANSPARENT);
            let options = FillOptions::new(options.tiles, FillMethod::Bilinear)?;
            Ok(fill_quad(fb, texture, source, destination, &options)?)
        }
        Err(e) => Err(e.into()),
    }
}

fn run(args: Args) -> Result<()> {
    let base = match &args.config {
        Some(path) => {
            info!("Loading fill job from: {}", path.display());
            FillConfig::load(path)?
        }
        None => FillConfig::default(),
    };
    let config = base.merge(args.overrides()?);

    let width = config.width.unwrap_or(DEFAULT_WIDTH);
    let height = config.height.unwrap_or(DEFAULT_HEIGHT);
    if width == 0 || height == 0 {
        return Err(QuadTexError::Config(format!(
            "canvas must be non-empty, got {}x{}",
            width, height
        )));
    }

    let texture = load_texture(&config)?;
    let source = config.source_quad()?.unwrap_or_else(|| {
        Quad::rect(0.0, 0.0, texture.width() as f64, texture.height() as f64)
    });
    let destination = config
        .destination_quad()?
        .unwrap_or_else(|| default_destination(width, height));

    info!(
        "Mapping {:?} -> {:?} on a {}x{} canvas",
        source.corners(),
        destination.corners(),
        width,
        height
    );

    let mut fb = Framebuffer::new(width, height);
    let stats = render(&mut fb, &texture, &source, &destination, &config, args.fallback)?;
    info!(
        "Filled {} cells ({} triangles)",
        stats.cells, stats.triangles
    );

    let output = config
        .output
        .unwrap_or_else(|| PathBuf::from(DEFAULT_OUTPUT));
    fb.save_png(&output)?;
    info!("Wrote {}", output.display());

    Ok(())
}

fn main() -> Result<()> {
    // Pick up RUST_LOG and friends from a local .env file
    dotenvy::dotenv().ok();

    // Initialize logger with default level INFO
    env_logger::Builder::from_default_env()
        .filter_level(log::LevelFilter::Info)
        .parse_default_env()
        .init();

    info!("quadtex v{}", env!("CARGO_PKG_VERSION"));

    let args = Args::parse();

    if let Err(e) = run(args) {
        error!("{}", e);
        return Err(e);
    }

    Ok(())
}
