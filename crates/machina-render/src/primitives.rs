//! Mesh primitives and vertex layout

use bytemuck::{Pod, Zeroable};

/// A vertex with position, normal, and color
#[repr(C)]
#[derive(Copy, Clone, Debug, Pod, Zeroable)]
pub struct Vertex {
    pub position: [f32; 3],
    pub normal: [f32; 3],
    pub color: [f32; 4],
}

impl Vertex {
    const ATTRIBS: [wgpu::VertexAttribute; 3] = wgpu::vertex_attr_array![
        0 => Float32x3,
        1 => Float32x3,
        2 => Float32x4,
    ];

    pub fn desc() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<Vertex>() as wgpu::BufferAddress,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &Self::ATTRIBS,
        }
    }
}

/// A mesh with vertices and indices
pub struct Mesh {
    pub vertices: Vec<Vertex>,
    pub indices: Vec<u32>,
}

/// Create a grid mesh for the ground plane
pub fn create_grid_mesh(size: f32, divisions: u32, color: [f32; 4]) -> Mesh {
    let half = size / 2.0;
    let step = size / divisions as f32;

    let mut vertices = Vec::new();
    let mut indices = Vec::new();

    let mut idx = 0u32;

    // Lines along X axis
    for i in 0..=divisions {
        let z = -half + i as f32 * step;
        vertices.push(Vertex {
            position: [-half, 0.0, z],
            normal: [0.0, 1.0, 0.0],
            color,
        });
        vertices.push(Vertex {
            position: [half, 0.0, z],
            normal: [0.0, 1.0, 0.0],
            color,
        });
        indices.push(idx);
        indices.push(idx + 1);
        idx += 2;
    }

    // Lines along Z axis
    for i in 0..=divisions {
        let x = -half + i as f32 * step;
        vertices.push(Vertex {
            position: [x, 0.0, -half],
            normal: [0.0, 1.0, 0.0],
            color,
        });
        vertices.push(Vertex {
            position: [x, 0.0, half],
            normal: [0.0, 1.0, 0.0],
            color,
        });
        indices.push(idx);
        indices.push(idx + 1);
        idx += 2;
    }

    Mesh { vertices, indices }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_grid_mesh_counts() {
        let grid = create_grid_mesh(10.0, 10, [0.3, 0.3, 0.3, 1.0]);
        // (divisions + 1) lines per axis, two vertices per line
        assert_eq!(grid.vertices.len(), 2 * 2 * 11);
        assert_eq!(grid.indices.len(), grid.vertices.len());
    }
}
