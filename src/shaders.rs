//! Built-in GLSL sources and shader compilation helpers.
//!
//! All shaders target GLSL 1.40 (OpenGL 3.1), which is widely supported on
//! desktop platforms.

use glow::HasContext;

use crate::source::ShaderSource;

/// Vertex shader for the demo quad.
///
/// Positions are already in normalized device coordinates, so this is a
/// pass-through stage.
pub const QUAD_VERTEX_SRC: &str = r"#version 140

in vec2 a_position;

void main() {
    gl_Position = vec4(a_position, 0.0, 1.0);
}
";

/// Fragment shader for the demo quad.
///
/// # Uniforms
///
/// | Name      | Type   | Description                      |
/// |-----------|--------|----------------------------------|
/// | `u_color` | `vec4` | Fill color, animated every frame |
pub const QUAD_FRAGMENT_SRC: &str = r"#version 140

uniform vec4 u_color;

out vec4 frag_color;

void main() {
    frag_color = u_color;
}
";

/// The built-in shader pair, equivalent to `res/shaders/basic.shader`.
///
/// Used as the fallback when the on-disk shader file cannot be loaded or
/// compiled.
#[must_use]
pub fn builtin_source() -> ShaderSource {
    ShaderSource {
        vertex: QUAD_VERTEX_SRC.to_owned(),
        fragment: QUAD_FRAGMENT_SRC.to_owned(),
    }
}

/// Compile a shader program from vertex and fragment source strings.
///
/// The compiled shader objects are detached and deleted after successful
/// linking, so only the program handle needs to be cleaned up by the caller.
///
/// # Safety
///
/// Requires a valid, current OpenGL context.
///
/// # Errors
///
/// Returns a descriptive error string if shader compilation or program
/// linking fails.
pub unsafe fn compile_program(
    gl: &glow::Context,
    vertex_src: &str,
    fragment_src: &str,
) -> Result<glow::Program, String> {
    let program = unsafe { gl.create_program() }?;

    let vs = unsafe { compile_shader(gl, glow::VERTEX_SHADER, vertex_src) }?;
    let fs = unsafe { compile_shader(gl, glow::FRAGMENT_SHADER, fragment_src) }?;

    unsafe {
        gl.attach_shader(program, vs);
        gl.attach_shader(program, fs);
        gl.link_program(program);

        if !gl.get_program_link_status(program) {
            let log = gl.get_program_info_log(program);
            gl.delete_program(program);
            gl.delete_shader(vs);
            gl.delete_shader(fs);
            return Err(format!("Program link error: {log}"));
        }

        // Shaders can be detached and deleted after successful linking.
        gl.detach_shader(program, vs);
        gl.detach_shader(program, fs);
        gl.delete_shader(vs);
        gl.delete_shader(fs);
    }

    Ok(program)
}

/// Compile a single shader stage (vertex or fragment) from source.
///
/// On failure the shader object is deleted and the info log is returned in
/// the error.
///
/// # Safety
///
/// Requires a valid, current OpenGL context.
unsafe fn compile_shader(
    gl: &glow::Context,
    shader_type: u32,
    source: &str,
) -> Result<glow::Shader, String> {
    unsafe {
        let shader = gl.create_shader(shader_type)?;
        gl.shader_source(shader, source);
        gl.compile_shader(shader);

        if !gl.get_shader_compile_status(shader) {
            let log = gl.get_shader_info_log(shader);
            gl.delete_shader(shader);
            return Err(format!("Shader compile error: {log}"));
        }

        Ok(shader)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_source_matches_the_shipped_shader_file() {
        let shipped = ShaderSource::parse(include_str!("../res/shaders/basic.shader"));
        let builtin = builtin_source();
        assert_eq!(shipped.vertex.trim(), builtin.vertex.trim());
        assert_eq!(shipped.fragment.trim(), builtin.fragment.trim());
    }
}
