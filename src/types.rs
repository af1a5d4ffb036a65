//! Geometry types and the static quad data.

use bytemuck::{Pod, Zeroable};

/// A two-dimensional vertex, ready for the GPU.
#[derive(Copy, Clone, Debug, Pod, Zeroable)]
#[repr(C)]
pub struct Vertex {
    /// Position in normalized device coordinates.
    pub position: [f32; 2],
}

/// The four corners of the demo quad, centered on the origin.
///
/// Uploaded once with `GL_STATIC_DRAW` and never touched again.
pub const QUAD_VERTICES: [Vertex; 4] = [
    Vertex {
        position: [-0.5, -0.5],
    },
    Vertex {
        position: [0.5, -0.5],
    },
    Vertex {
        position: [0.5, 0.5],
    },
    Vertex {
        position: [-0.5, 0.5],
    },
];

/// Two counter-clockwise triangles covering the quad.
///
/// Drawn with `glDrawElements(GL_TRIANGLES, ...)`.
pub const QUAD_INDICES: [u32; 6] = [0, 1, 2, 2, 3, 0];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn quad_indices_address_the_four_vertices() {
        for &index in &QUAD_INDICES {
            assert!(
                (index as usize) < QUAD_VERTICES.len(),
                "index {index} out of range"
            );
        }
        // Every vertex participates in at least one triangle.
        for vertex in 0..QUAD_VERTICES.len() as u32 {
            assert!(QUAD_INDICES.contains(&vertex), "vertex {vertex} unused");
        }
    }

    #[test]
    fn quad_triangles_are_non_degenerate() {
        for triangle in QUAD_INDICES.chunks(3) {
            assert_ne!(triangle[0], triangle[1]);
            assert_ne!(triangle[1], triangle[2]);
            assert_ne!(triangle[0], triangle[2]);
        }
    }

    #[test]
    fn quad_is_centered_on_the_origin() {
        let (sum_x, sum_y) = QUAD_VERTICES
            .iter()
            .fold((0.0f32, 0.0f32), |(x, y), v| {
                (x + v.position[0], y + v.position[1])
            });
        assert!(sum_x.abs() < f32::EPSILON);
        assert!(sum_y.abs() < f32::EPSILON);
    }
}
