//! Literal geometry for the demos, in NDC.

use anyhow::Result;
use glint_engine::paint::Color;
use glint_engine::render::{ColorVertex, Mesh, PositionVertex};

/// Two separate triangles, one in the lower left and one in the upper right.
pub const TRIANGLE_PAIR: [PositionVertex; 6] = [
    // triangle 1
    PositionVertex::new(-0.8, -0.8, 0.0),
    PositionVertex::new(-0.2, -0.8, 0.0),
    PositionVertex::new(-0.4, 0.0, 0.0),
    // triangle 2
    PositionVertex::new(0.5, 0.0, 0.0),
    PositionVertex::new(0.8, 0.0, 0.0),
    PositionVertex::new(0.0, 0.8, 0.0),
];

/// Corners of a centered square with a color each.
pub const QUAD_VERTICES: [ColorVertex; 4] = [
    ColorVertex::new([-0.5, -0.5, 0.0], Color::RED.to_rgb_array()), // bottom left
    ColorVertex::new([0.5, -0.5, 0.0], Color::GREEN.to_rgb_array()), // bottom right
    ColorVertex::new([-0.5, 0.5, 0.0], Color::BLUE.to_rgb_array()), // top left
    ColorVertex::new([0.5, 0.5, 0.0], Color::RED.to_rgb_array()), // top right
];

/// Two triangles sharing the bottom-right/top-left diagonal.
pub const QUAD_INDICES: [u16; 6] = [2, 0, 1, 3, 2, 1];

pub fn triangle_pair() -> Result<Mesh<PositionVertex>> {
    Mesh::unindexed(TRIANGLE_PAIR.to_vec())
}

pub fn indexed_quad() -> Result<Mesh<ColorVertex>> {
    Mesh::indexed(QUAD_VERTICES.to_vec(), QUAD_INDICES.to_vec())
}

#[cfg(test)]
mod tests {
    use super::*;
    use glint_engine::render::DrawCall;

    #[test]
    fn triangle_pair_submits_six_vertices_unindexed() {
        let mesh = triangle_pair().unwrap();
        assert_eq!(mesh.draw_call(), DrawCall::Arrays { vertices: 0..6 });
        assert!(mesh.indices().is_none());
    }

    #[test]
    fn triangle_pair_stays_in_clip_space() {
        for v in TRIANGLE_PAIR {
            assert!(v.position.iter().all(|c| (-1.0..=1.0).contains(c)));
        }
    }

    #[test]
    fn quad_submits_six_indices_over_four_vertices() {
        let mesh = indexed_quad().unwrap();
        assert_eq!(
            mesh.draw_call(),
            DrawCall::Indexed { indices: 0..6, base_vertex: 0 }
        );
        assert_eq!(mesh.vertices().len(), 4);
    }

    #[test]
    fn quad_indices_use_every_vertex() {
        let mesh = indexed_quad().unwrap();
        let indices = mesh.indices().unwrap();
        for v in 0..mesh.vertices().len() as u16 {
            assert!(indices.contains(&v), "vertex {v} never drawn");
        }
    }

    #[test]
    fn quad_triangles_are_not_degenerate() {
        for tri in QUAD_INDICES.chunks(3) {
            let [a, b, c] = [tri[0], tri[1], tri[2]].map(|i| QUAD_VERTICES[i as usize].position);
            let area = (b[0] - a[0]) * (c[1] - a[1]) - (c[0] - a[0]) * (b[1] - a[1]);
            assert!(area.abs() > 0.0);
        }
    }
}
