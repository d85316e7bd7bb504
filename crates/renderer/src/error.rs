use crate::program::ShaderStage;

/// Fatal start-up configuration errors.
///
/// Every variant is raised while the pipeline is being assembled, before the
/// first frame. There is no recovery path: the caller is expected to abort and
/// surface the diagnostic. No per-frame error condition exists once start-up
/// has succeeded.
#[derive(Debug, thiserror::Error)]
pub enum RendererError {
    /// A shader stage was rejected by the GL compiler.
    #[error("{stage} shader failed to compile: {log}")]
    ShaderCompile { stage: ShaderStage, log: String },

    /// The compiled stages could not be linked into a program.
    #[error("shader program failed to link: {log}")]
    ShaderLink { log: String },

    /// The linked program exposes no per-vertex input with the expected name,
    /// which indicates a vertex-stage/source mismatch.
    #[error("vertex input '{name}' not found in linked program")]
    InputBinding { name: String },

    /// A required uniform is absent from the linked program. The fragment
    /// stage cannot produce correct output without it.
    #[error("uniform '{name}' not found in linked program")]
    UniformBinding { name: String },

    /// The GL driver refused to allocate an object (shader, program, buffer).
    #[error("GL object creation failed: {0}")]
    Resource(String),
}
