use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use renderer::{ShaderSources, ViewerConfig};
use tracing_subscriber::EnvFilter;

use crate::cli::{parse_surface_size, Args};
use crate::defaults;

pub fn run(args: Args) -> Result<()> {
    initialise_tracing();

    let surface_size = match args.size.as_deref() {
        Some(value) => parse_surface_size(value)?,
        None => ViewerConfig::default().surface_size,
    };

    let vertex = load_stage(args.vertex.as_deref(), defaults::VERTEX_SOURCE)?;
    let fragment = load_stage(args.fragment.as_deref(), defaults::FRAGMENT_SOURCE)?;

    let config = ViewerConfig {
        surface_size,
        title: args.title,
        shader: ShaderSources::new(vertex, fragment),
        time_step: args.time_step,
        ..ViewerConfig::default()
    };

    tracing::info!(
        width = surface_size.0,
        height = surface_size.1,
        time_step = config.time_step,
        "starting tilespin viewer"
    );
    renderer::run(config)
}

fn initialise_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();
}

fn load_stage(path: Option<&Path>, built_in: &str) -> Result<String> {
    match path {
        Some(path) => fs::read_to_string(path)
            .with_context(|| format!("failed to read shader source at {}", path.display())),
        None => Ok(built_in.to_string()),
    }
}
