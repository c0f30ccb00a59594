use std::ops::Range;

use anyhow::{ensure, Result};
use wgpu::util::DeviceExt;

use super::Vertex;

/// CPU-side geometry: a triangle list, optionally indexed.
#[derive(Debug, Clone, PartialEq)]
pub struct Mesh<V> {
    vertices: Vec<V>,
    indices: Option<Vec<u16>>,
}

impl<V: Vertex> Mesh<V> {
    /// Triangle list drawn in vertex order; every 3 vertices form a triangle.
    pub fn unindexed(vertices: Vec<V>) -> Result<Self> {
        ensure!(!vertices.is_empty(), "mesh has no vertices");
        ensure!(
            vertices.len() % 3 == 0,
            "unindexed triangle list needs a multiple of 3 vertices, got {}",
            vertices.len()
        );

        Ok(Self {
            vertices,
            indices: None,
        })
    }

    /// Triangle list drawn through an index buffer.
    pub fn indexed(vertices: Vec<V>, indices: Vec<u16>) -> Result<Self> {
        ensure!(!vertices.is_empty(), "mesh has no vertices");
        ensure!(!indices.is_empty(), "indexed mesh has no indices");
        ensure!(
            indices.len() % 3 == 0,
            "indexed triangle list needs a multiple of 3 indices, got {}",
            indices.len()
        );
        if let Some(bad) = indices.iter().find(|&&i| usize::from(i) >= vertices.len()) {
            anyhow::bail!("index {bad} out of range for {} vertices", vertices.len());
        }

        Ok(Self {
            vertices,
            indices: Some(indices),
        })
    }

    pub fn vertices(&self) -> &[V] {
        &self.vertices
    }

    pub fn indices(&self) -> Option<&[u16]> {
        self.indices.as_deref()
    }

    /// The one draw call that renders this mesh.
    pub fn draw_call(&self) -> DrawCall {
        match &self.indices {
            None => DrawCall::Arrays {
                vertices: 0..self.vertices.len() as u32,
            },
            Some(indices) => DrawCall::Indexed {
                indices: 0..indices.len() as u32,
                base_vertex: 0,
            },
        }
    }

    /// Copies the mesh into device buffers.
    pub fn upload(&self, device: &wgpu::Device, label: &str) -> GpuMesh {
        let vertex_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some(&format!("{label} vbo")),
            contents: bytemuck::cast_slice(&self.vertices),
            usage: wgpu::BufferUsages::VERTEX,
        });

        let elements = match &self.indices {
            None => GpuElements::Arrays {
                vertices: 0..self.vertices.len() as u32,
            },
            Some(indices) => GpuElements::Indexed {
                buffer: device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
                    label: Some(&format!("{label} ibo")),
                    contents: bytemuck::cast_slice(indices),
                    usage: wgpu::BufferUsages::INDEX,
                }),
                indices: 0..indices.len() as u32,
                base_vertex: 0,
            },
        };

        log::debug!(
            "uploaded `{label}`: {} vertices, {} indices",
            self.vertices.len(),
            self.indices.as_ref().map_or(0, Vec::len)
        );

        GpuMesh {
            vertex_buffer,
            elements,
        }
    }
}

/// Element range submitted by a single draw.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DrawCall {
    Arrays { vertices: Range<u32> },
    Indexed { indices: Range<u32>, base_vertex: i32 },
}

impl DrawCall {
    /// Vertices (unindexed) or indices (indexed) consumed by the draw.
    pub fn element_count(&self) -> u32 {
        match self {
            Self::Arrays { vertices } => vertices.len() as u32,
            Self::Indexed { indices, .. } => indices.len() as u32,
        }
    }

    pub fn is_indexed(&self) -> bool {
        matches!(self, Self::Indexed { .. })
    }
}

/// Device-side copy of a `Mesh`.
pub struct GpuMesh {
    vertex_buffer: wgpu::Buffer,
    elements: GpuElements,
}

/// What a draw walks: the vertex buffer directly, or an index buffer over it.
enum GpuElements {
    Arrays {
        vertices: Range<u32>,
    },
    Indexed {
        buffer: wgpu::Buffer,
        indices: Range<u32>,
        base_vertex: i32,
    },
}

impl GpuMesh {
    pub fn draw_call(&self) -> DrawCall {
        match &self.elements {
            GpuElements::Arrays { vertices } => DrawCall::Arrays {
                vertices: vertices.clone(),
            },
            GpuElements::Indexed {
                indices,
                base_vertex,
                ..
            } => DrawCall::Indexed {
                indices: indices.clone(),
                base_vertex: *base_vertex,
            },
        }
    }

    /// Binds the buffers and issues the draw. The pipeline must already be set.
    pub fn draw(&self, rpass: &mut wgpu::RenderPass<'_>) {
        rpass.set_vertex_buffer(0, self.vertex_buffer.slice(..));

        match &self.elements {
            GpuElements::Arrays { vertices } => {
                rpass.draw(vertices.clone(), 0..1);
            }
            GpuElements::Indexed {
                buffer,
                indices,
                base_vertex,
            } => {
                rpass.set_index_buffer(buffer.slice(..), wgpu::IndexFormat::Uint16);
                rpass.draw_indexed(indices.clone(), *base_vertex, 0..1);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::PositionVertex;

    fn verts(n: usize) -> Vec<PositionVertex> {
        (0..n).map(|i| PositionVertex::new(i as f32, 0.0, 0.0)).collect()
    }

    #[test]
    fn unindexed_draws_every_vertex() {
        let mesh = Mesh::unindexed(verts(6)).unwrap();
        assert_eq!(mesh.draw_call(), DrawCall::Arrays { vertices: 0..6 });
        assert_eq!(mesh.draw_call().element_count(), 6);
        assert!(mesh.indices().is_none());
    }

    #[test]
    fn indexed_draws_every_index() {
        let mesh = Mesh::indexed(verts(4), vec![2, 0, 1, 3, 2, 1]).unwrap();
        let draw = mesh.draw_call();
        assert!(draw.is_indexed());
        assert_eq!(draw, DrawCall::Indexed { indices: 0..6, base_vertex: 0 });
        assert_eq!(mesh.vertices().len(), 4);
    }

    #[test]
    fn rejects_partial_triangle() {
        assert!(Mesh::unindexed(verts(4)).is_err());
        assert!(Mesh::indexed(verts(4), vec![0, 1, 2, 3]).is_err());
    }

    #[test]
    fn rejects_empty() {
        assert!(Mesh::<PositionVertex>::unindexed(Vec::new()).is_err());
        assert!(Mesh::indexed(verts(3), Vec::new()).is_err());
    }

    #[test]
    fn uploaded_mesh_keeps_its_draw_call() {
        let (device, _queue) = crate::testing::noop_device();

        let tris = Mesh::unindexed(verts(6)).unwrap().upload(&device, "tris");
        assert_eq!(tris.draw_call(), DrawCall::Arrays { vertices: 0..6 });

        let quad = Mesh::indexed(verts(4), vec![2, 0, 1, 3, 2, 1])
            .unwrap()
            .upload(&device, "quad");
        assert_eq!(quad.draw_call(), DrawCall::Indexed { indices: 0..6, base_vertex: 0 });
    }

    #[test]
    fn rejects_out_of_range_index() {
        let err = Mesh::indexed(verts(3), vec![0, 1, 3]).unwrap_err();
        assert!(err.to_string().contains("index 3 out of range"));
    }
}
