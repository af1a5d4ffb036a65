//! The renderer: owns the GL objects for the quad and issues the per-frame
//! draw call.

use std::sync::Arc;

use glow::HasContext;

use crate::shaders;
use crate::source::ShaderSource;
use crate::types::{Vertex, QUAD_INDICES, QUAD_VERTICES};

/// Convert a `u32` to `i32` for GL API calls.
///
/// # Panics
///
/// Panics if `value > i32::MAX`. In practice, this is unreachable for
/// normal viewport dimensions.
fn gl_size(value: u32) -> i32 {
    i32::try_from(value).expect("dimension exceeds i32::MAX")
}

/// Cached uniform locations for the quad program.
struct QuadUniforms {
    /// `u_color` — the animated fill color.
    color: glow::UniformLocation,
}

/// Renders the demo quad with a color uniform set once per frame.
///
/// The quad's vertex and index data are uploaded once at creation time with
/// `STATIC_DRAW` and never modified afterwards; each frame only re-binds the
/// program and VAO, updates the uniform, and draws.
///
/// # Safety
///
/// All methods issue raw GL calls and require a valid, current OpenGL
/// context — the same one the renderer was created with.
pub struct QuadRenderer {
    /// The OpenGL context, shared via [`Arc`] with whoever owns the window.
    gl: Arc<glow::Context>,

    /// Compiled shader program for the quad.
    program: glow::Program,
    /// Cached uniform locations for [`program`](Self::program).
    uniforms: QuadUniforms,

    /// Vertex array object with a single `vec2` position attribute.
    vao: glow::VertexArray,
    /// Vertex buffer holding the static quad corners.
    vbo: glow::Buffer,
    /// Element (index) buffer holding the two quad triangles.
    ebo: glow::Buffer,
}

impl QuadRenderer {
    /// Create a new renderer from parsed shader sources.
    ///
    /// Compiles and links the program, creates the GL buffer objects, and
    /// uploads the static quad geometry.
    ///
    /// # Safety
    ///
    /// The `gl` context must be current and valid. The caller must ensure
    /// that [`destroy`](Self::destroy) is called before the context is
    /// dropped.
    ///
    /// # Errors
    ///
    /// Returns an error string if shader compilation, program linking, or
    /// GL resource creation fails.
    ///
    /// # Panics
    ///
    /// Panics if the `u_color` uniform cannot be found, which indicates a
    /// bug in the shader source code.
    pub unsafe fn new(gl: Arc<glow::Context>, source: &ShaderSource) -> Result<Self, String> {
        let program = unsafe { shaders::compile_program(&gl, &source.vertex, &source.fragment) }?;

        let uniforms = unsafe {
            QuadUniforms {
                color: gl
                    .get_uniform_location(program, "u_color")
                    .expect("u_color missing from quad shader"),
            }
        };

        let (vao, vbo, ebo) = unsafe {
            let vao = gl.create_vertex_array()?;
            let vbo = gl.create_buffer()?;
            let ebo = gl.create_buffer()?;

            // Set up the VAO with a single vec2 position attribute and
            // upload the immutable quad data.
            gl.bind_vertex_array(Some(vao));

            gl.bind_buffer(glow::ARRAY_BUFFER, Some(vbo));
            gl.buffer_data_u8_slice(
                glow::ARRAY_BUFFER,
                bytemuck::cast_slice(&QUAD_VERTICES),
                glow::STATIC_DRAW,
            );

            gl.bind_buffer(glow::ELEMENT_ARRAY_BUFFER, Some(ebo));
            gl.buffer_data_u8_slice(
                glow::ELEMENT_ARRAY_BUFFER,
                bytemuck::cast_slice(&QUAD_INDICES),
                glow::STATIC_DRAW,
            );

            gl.enable_vertex_attrib_array(0);
            gl.vertex_attrib_pointer_f32(
                0,
                2,
                glow::FLOAT,
                false,
                // Vertex is 8 bytes — well within i32 range.
                #[expect(clippy::cast_possible_truncation, clippy::cast_possible_wrap)]
                {
                    std::mem::size_of::<Vertex>() as i32
                },
                0,
            );
            gl.bind_vertex_array(None);

            (vao, vbo, ebo)
        };

        log::info!("OpenGL version: {}", unsafe {
            gl.get_parameter_string(glow::VERSION)
        });

        let renderer = Self {
            gl,
            program,
            uniforms,
            vao,
            vbo,
            ebo,
        };
        unsafe { renderer.check_errors("setup") };
        Ok(renderer)
    }

    /// Draw one frame: clear, set the color uniform, draw the quad.
    ///
    /// # Safety
    ///
    /// Requires a current GL context matching the one passed to
    /// [`new`](Self::new).
    ///
    /// # Panics
    ///
    /// Panics if the index count exceeds `i32::MAX` (unreachable for the
    /// fixed quad).
    pub unsafe fn render(&self, color: [f32; 4]) {
        let gl = &self.gl;

        unsafe {
            gl.clear_color(0.0, 0.0, 0.0, 1.0);
            gl.clear(glow::COLOR_BUFFER_BIT);

            gl.use_program(Some(self.program));
            gl.uniform_4_f32(
                Some(&self.uniforms.color),
                color[0],
                color[1],
                color[2],
                color[3],
            );

            gl.bind_vertex_array(Some(self.vao));
            let index_count =
                i32::try_from(QUAD_INDICES.len()).expect("index count exceeds i32::MAX");
            gl.draw_elements(glow::TRIANGLES, index_count, glow::UNSIGNED_INT, 0);
            gl.bind_vertex_array(None);
        }

        unsafe { self.check_errors("render") };
    }

    /// Update the GL viewport after a window resize.
    ///
    /// # Safety
    ///
    /// Requires a current GL context matching the one passed to
    /// [`new`](Self::new).
    pub unsafe fn resize(&self, width: u32, height: u32) {
        unsafe { self.gl.viewport(0, 0, gl_size(width), gl_size(height)) };
    }

    /// Clean up all GL resources owned by this renderer.
    ///
    /// # Safety
    ///
    /// Must be called with the same GL context that was used to create the
    /// renderer, and must be called exactly once.
    pub unsafe fn destroy(&self) {
        let gl = &self.gl;
        unsafe {
            gl.delete_program(self.program);
            gl.delete_vertex_array(self.vao);
            gl.delete_buffer(self.vbo);
            gl.delete_buffer(self.ebo);
        }
    }

    /// Drain the GL error queue, logging anything pending.
    ///
    /// Active in debug builds only. Each pending error is logged, then a
    /// debug assertion trips.
    ///
    /// # Safety
    ///
    /// Requires a current GL context matching the one passed to
    /// [`new`](Self::new).
    #[cfg(debug_assertions)]
    unsafe fn check_errors(&self, stage: &str) {
        let mut pending = false;
        loop {
            let code = unsafe { self.gl.get_error() };
            if code == glow::NO_ERROR {
                break;
            }
            log::error!("OpenGL error {code:#06x} after {stage}");
            pending = true;
        }
        debug_assert!(!pending, "OpenGL error after {stage}");
    }

    #[cfg(not(debug_assertions))]
    unsafe fn check_errors(&self, _stage: &str) {}
}
