//! Real-time viewer for a procedural full-screen shader pattern.
//!
//! The crate owns the whole path from program text to pixels:
//!
//! ```text
//!   CLI / tilespin
//!          │ ViewerConfig
//!          ▼
//!   run ──▶ GlContext ──▶ ShaderProgram ──▶ QuadGeometry ──▶ UniformRegistry
//!                                    │
//!          winit event loop ──▶ frame() ─▶ clock.advance() ─▶ set_time ─▶ draw
//!                     │
//!                     └─▶ resize / click ─▶ PipelineState ─▶ uniform push
//! ```
//!
//! Start-up is a strict compile → link → configure sequence; any missing
//! shader stage, vertex input, or uniform is a fatal [`RendererError`]. After
//! that the frame loop runs indefinitely at display-refresh cadence, advancing
//! a fixed synthetic clock rather than measuring wall time.
//!
//! [`pattern`] holds a pure CPU transcription of the fragment stage so the
//! procedural formula stays testable without a GPU.

mod context;
mod error;
mod geometry;
pub mod pattern;
mod program;
mod state;
mod types;
mod uniforms;
mod window;

pub use error::RendererError;
pub use geometry::{POSITION_ATTRIBUTE, QUAD_VERTICES};
pub use program::{ShaderProgram, ShaderStage};
pub use state::{
    FrameClock, PipelineState, PointerState, DEFAULT_TIME_SEED, DEFAULT_TIME_STEP,
};
pub use types::{ShaderSources, ViewerConfig};
pub use uniforms::{
    UniformRegistry, UNIFORM_HEIGHT, UNIFORM_POINTER, UNIFORM_TIME, UNIFORM_WIDTH,
};
pub use window::run;
