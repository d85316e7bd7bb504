use std::path::PathBuf;

use anyhow::{anyhow, Result};
use clap::Parser;

#[derive(Parser, Debug)]
#[command(
    name = "tilespin",
    author,
    version,
    about = "Interactive procedural tile-pattern shader viewer"
)]
pub struct Args {
    /// Override the window size (e.g. `1280x720`).
    #[arg(long, value_name = "WIDTHxHEIGHT")]
    pub size: Option<String>,

    /// Vertex shader source file; defaults to the built-in stage.
    #[arg(long, value_name = "PATH")]
    pub vertex: Option<PathBuf>,

    /// Fragment shader source file; defaults to the built-in pattern.
    #[arg(long, value_name = "PATH")]
    pub fragment: Option<PathBuf>,

    /// Synthetic time increment applied every frame.
    #[arg(long, value_name = "STEP", default_value_t = renderer::DEFAULT_TIME_STEP)]
    pub time_step: f32,

    /// Window title.
    #[arg(long, default_value = "tilespin")]
    pub title: String,
}

pub fn parse() -> Args {
    Args::parse()
}

/// Parses `WIDTHxHEIGHT` into a pixel pair.
pub fn parse_surface_size(value: &str) -> Result<(u32, u32)> {
    let (width, height) = value
        .split_once(['x', 'X'])
        .ok_or_else(|| anyhow!("expected WIDTHxHEIGHT, got '{value}'"))?;
    let width: u32 = width
        .trim()
        .parse()
        .map_err(|_| anyhow!("invalid width in '{value}'"))?;
    let height: u32 = height
        .trim()
        .parse()
        .map_err(|_| anyhow!("invalid height in '{value}'"))?;
    if width == 0 || height == 0 {
        return Err(anyhow!("surface size must be non-zero, got '{value}'"));
    }
    Ok((width, height))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_well_formed_sizes() {
        assert_eq!(parse_surface_size("1280x720").unwrap(), (1280, 720));
        assert_eq!(parse_surface_size("800X600").unwrap(), (800, 600));
        assert_eq!(parse_surface_size(" 640 x 480 ").unwrap(), (640, 480));
    }

    #[test]
    fn rejects_malformed_sizes() {
        assert!(parse_surface_size("1280").is_err());
        assert!(parse_surface_size("0x600").is_err());
        assert!(parse_surface_size("widexhigh").is_err());
    }
}
