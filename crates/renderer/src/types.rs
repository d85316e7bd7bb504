use crate::state::{DEFAULT_TIME_SEED, DEFAULT_TIME_STEP};

/// The two program-text strings supplied at start-up.
#[derive(Debug, Clone, Default)]
pub struct ShaderSources {
    pub vertex: String,
    pub fragment: String,
}

impl ShaderSources {
    pub fn new(vertex: impl Into<String>, fragment: impl Into<String>) -> Self {
        Self {
            vertex: vertex.into(),
            fragment: fragment.into(),
        }
    }
}

/// Immutable configuration passed to the renderer at start-up.
#[derive(Debug, Clone)]
pub struct ViewerConfig {
    /// Initial window size in physical pixels.
    pub surface_size: (u32, u32),
    /// Window title.
    pub title: String,
    /// Vertex and fragment program text.
    pub shader: ShaderSources,
    /// Synthetic time increment per frame.
    pub time_step: f32,
    /// Initial value of the time accumulator.
    pub time_seed: f32,
}

impl Default for ViewerConfig {
    /// A 1280x720 window with no shader selected.
    fn default() -> Self {
        Self {
            surface_size: (1280, 720),
            title: "tilespin".to_string(),
            shader: ShaderSources::default(),
            time_step: DEFAULT_TIME_STEP,
            time_seed: DEFAULT_TIME_SEED,
        }
    }
}
