use glow::HasContext;

use crate::error::RendererError;
use crate::program::ShaderProgram;

/// Uniform names the fragment stage must declare.
pub const UNIFORM_WIDTH: &str = "width";
pub const UNIFORM_HEIGHT: &str = "height";
pub const UNIFORM_TIME: &str = "u_time";
pub const UNIFORM_POINTER: &str = "u_mouse";

/// Resolved handles for the program's external inputs.
///
/// Every handle is resolved from the linked program before the first draw; a
/// missing uniform is a fatal configuration error, never a silent no-op. Each
/// setter pushes the value to the GPU immediately — there is no staging or
/// batching layer, and no call is queued.
pub struct UniformRegistry {
    width: glow::NativeUniformLocation,
    height: glow::NativeUniformLocation,
    time: glow::NativeUniformLocation,
    pointer: glow::NativeUniformLocation,
}

impl UniformRegistry {
    /// Resolves all recognized uniforms, naming the first one the linked
    /// program does not expose.
    pub fn resolve(gl: &glow::Context, program: &ShaderProgram) -> Result<Self, RendererError> {
        Ok(Self {
            width: resolve(gl, program, UNIFORM_WIDTH)?,
            height: resolve(gl, program, UNIFORM_HEIGHT)?,
            time: resolve(gl, program, UNIFORM_TIME)?,
            pointer: resolve(gl, program, UNIFORM_POINTER)?,
        })
    }

    pub fn set_width(&self, gl: &glow::Context, value: f32) {
        unsafe { gl.uniform_1_f32(Some(&self.width), value) };
    }

    pub fn set_height(&self, gl: &glow::Context, value: f32) {
        unsafe { gl.uniform_1_f32(Some(&self.height), value) };
    }

    pub fn set_time(&self, gl: &glow::Context, value: f32) {
        unsafe { gl.uniform_1_f32(Some(&self.time), value) };
    }

    pub fn set_pointer(&self, gl: &glow::Context, position: [f32; 2]) {
        unsafe { gl.uniform_2_f32(Some(&self.pointer), position[0], position[1]) };
    }
}

fn resolve(
    gl: &glow::Context,
    program: &ShaderProgram,
    name: &str,
) -> Result<glow::NativeUniformLocation, RendererError> {
    unsafe { gl.get_uniform_location(program.raw(), name) }.ok_or_else(|| {
        RendererError::UniformBinding {
            name: name.to_string(),
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_uniform_is_named_in_the_error() {
        let err = RendererError::UniformBinding {
            name: UNIFORM_POINTER.to_string(),
        };
        assert!(err.to_string().contains("u_mouse"));
    }
}
