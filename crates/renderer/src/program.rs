use std::fmt;

use glow::HasContext;

use crate::error::RendererError;

/// Identifies which stage produced a compile diagnostic.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShaderStage {
    Vertex,
    Fragment,
}

impl ShaderStage {
    fn gl_type(self) -> u32 {
        match self {
            ShaderStage::Vertex => glow::VERTEX_SHADER,
            ShaderStage::Fragment => glow::FRAGMENT_SHADER,
        }
    }
}

impl fmt::Display for ShaderStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ShaderStage::Vertex => f.write_str("vertex"),
            ShaderStage::Fragment => f.write_str("fragment"),
        }
    }
}

/// Linked GPU program built from a vertex and a fragment stage.
///
/// Created once at start-up and never mutated. The underlying GL object is
/// released with the context at process exit rather than managed explicitly.
pub struct ShaderProgram {
    raw: glow::NativeProgram,
}

impl ShaderProgram {
    /// Compiles both stages and links them, failing loudly on the first
    /// diagnostic. A compile or link failure is a fatal configuration error;
    /// there is no fallback shader and no retry.
    pub fn link(
        gl: &glow::Context,
        vertex_src: &str,
        fragment_src: &str,
    ) -> Result<Self, RendererError> {
        let vertex = compile_stage(gl, ShaderStage::Vertex, vertex_src)?;
        let fragment = match compile_stage(gl, ShaderStage::Fragment, fragment_src) {
            Ok(shader) => shader,
            Err(err) => {
                unsafe { gl.delete_shader(vertex) };
                return Err(err);
            }
        };

        let program = unsafe {
            let program = gl
                .create_program()
                .map_err(|err| RendererError::Resource(format!("create_program: {err}")))?;
            gl.attach_shader(program, vertex);
            gl.attach_shader(program, fragment);
            gl.link_program(program);

            // The stage objects are no longer needed once the program holds
            // the linked binary.
            gl.detach_shader(program, vertex);
            gl.detach_shader(program, fragment);
            gl.delete_shader(vertex);
            gl.delete_shader(fragment);

            if !gl.get_program_link_status(program) {
                let log = gl.get_program_info_log(program);
                gl.delete_program(program);
                return Err(RendererError::ShaderLink { log });
            }
            program
        };

        tracing::debug!("shader program linked");
        Ok(Self { raw: program })
    }

    pub(crate) fn raw(&self) -> glow::NativeProgram {
        self.raw
    }

    /// Makes this program current for subsequent uniform writes and draws.
    pub(crate) fn bind(&self, gl: &glow::Context) {
        unsafe { gl.use_program(Some(self.raw)) };
    }
}

fn compile_stage(
    gl: &glow::Context,
    stage: ShaderStage,
    source: &str,
) -> Result<glow::NativeShader, RendererError> {
    unsafe {
        let shader = gl
            .create_shader(stage.gl_type())
            .map_err(|err| RendererError::Resource(format!("create_shader({stage}): {err}")))?;
        gl.shader_source(shader, source);
        gl.compile_shader(shader);
        if !gl.get_shader_compile_status(shader) {
            let log = gl.get_shader_info_log(shader);
            gl.delete_shader(shader);
            return Err(RendererError::ShaderCompile { stage, log });
        }
        Ok(shader)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stage_identity_reported_in_diagnostics() {
        let err = RendererError::ShaderCompile {
            stage: ShaderStage::Fragment,
            log: "0:12: 'tangent' : undeclared identifier".into(),
        };
        let message = err.to_string();
        assert!(message.contains("fragment"));
        assert!(message.contains("undeclared identifier"));
    }

    #[test]
    fn stage_maps_to_gl_enum() {
        assert_eq!(ShaderStage::Vertex.gl_type(), glow::VERTEX_SHADER);
        assert_eq!(ShaderStage::Fragment.gl_type(), glow::FRAGMENT_SHADER);
    }
}
