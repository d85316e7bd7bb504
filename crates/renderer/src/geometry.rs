use glow::HasContext;

use crate::error::RendererError;
use crate::program::ShaderProgram;

/// Name of the single per-vertex input declared by the vertex stage.
pub const POSITION_ATTRIBUTE: &str = "position";

/// Screen-covering quad in clip space, wound for a triangle strip:
/// top-left, bottom-left, top-right, bottom-right.
pub const QUAD_VERTICES: [[f32; 2]; 4] = [[-1.0, 1.0], [-1.0, -1.0], [1.0, 1.0], [1.0, -1.0]];

const VERTEX_STRIDE: i32 = 2 * std::mem::size_of::<f32>() as i32;

/// Static full-screen quad bound to the program's `position` input.
///
/// Uploaded once at start-up (write-once, read-many) and never mutated; the
/// GL objects are released with the context at teardown.
pub struct QuadGeometry {
    vao: glow::NativeVertexArray,
    _vbo: glow::NativeBuffer,
}

impl QuadGeometry {
    pub fn upload(gl: &glow::Context, program: &ShaderProgram) -> Result<Self, RendererError> {
        let location = unsafe { gl.get_attrib_location(program.raw(), POSITION_ATTRIBUTE) }
            .ok_or_else(|| RendererError::InputBinding {
                name: POSITION_ATTRIBUTE.to_string(),
            })?;

        unsafe {
            let vao = gl
                .create_vertex_array()
                .map_err(|err| RendererError::Resource(format!("create_vertex_array: {err}")))?;
            let vbo = gl
                .create_buffer()
                .map_err(|err| RendererError::Resource(format!("create_buffer: {err}")))?;

            gl.bind_vertex_array(Some(vao));
            gl.bind_buffer(glow::ARRAY_BUFFER, Some(vbo));
            gl.buffer_data_u8_slice(
                glow::ARRAY_BUFFER,
                bytemuck::cast_slice(&QUAD_VERTICES),
                glow::STATIC_DRAW,
            );
            gl.enable_vertex_attrib_array(location);
            gl.vertex_attrib_pointer_f32(location, 2, glow::FLOAT, false, VERTEX_STRIDE, 0);
            gl.bind_buffer(glow::ARRAY_BUFFER, None);
            gl.bind_vertex_array(None);

            Ok(Self { vao, _vbo: vbo })
        }
    }

    /// Issues the single draw call covering the whole viewport.
    pub fn draw(&self, gl: &glow::Context) {
        unsafe {
            gl.bind_vertex_array(Some(self.vao));
            gl.draw_arrays(glow::TRIANGLE_STRIP, 0, QUAD_VERTICES.len() as i32);
            gl.bind_vertex_array(None);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn quad_spans_clip_space() {
        for vertex in QUAD_VERTICES {
            assert!(vertex.iter().all(|c| c.abs() == 1.0));
        }
        let min_x = QUAD_VERTICES.iter().map(|v| v[0]).fold(f32::MAX, f32::min);
        let max_y = QUAD_VERTICES.iter().map(|v| v[1]).fold(f32::MIN, f32::max);
        assert_eq!(min_x, -1.0);
        assert_eq!(max_y, 1.0);
    }

    #[test]
    fn vertex_layout_is_two_packed_floats() {
        assert_eq!(VERTEX_STRIDE, 8);
        assert_eq!(bytemuck::cast_slice::<_, u8>(&QUAD_VERTICES).len(), 32);
    }
}
