//! Import result types

/// Result of importing a model file
#[derive(Debug, Default)]
pub struct ImportResult {
    /// Source file stem, used as the display name for the model
    pub name: String,
    /// Extracted mesh primitives
    pub meshes: Vec<ImportedMesh>,
    /// Extracted PBR materials
    pub materials: Vec<ImportedMaterial>,
    /// glTF scene graph nodes with transforms
    pub nodes: Vec<ImportedNode>,
    /// Indices of top-level (root) nodes in the scene graph
    pub root_nodes: Vec<usize>,
}

impl ImportResult {
    /// Compute the combined bounding box across all meshes
    pub fn bounds(&self) -> Option<MeshBounds> {
        self.meshes
            .iter()
            .filter_map(|m| m.bounds())
            .reduce(|a, b| a.union(&b))
    }
}

/// Axis-aligned bounding box computed from vertex positions
#[derive(Debug, Clone, Copy)]
pub struct MeshBounds {
    pub min: [f32; 3],
    pub max: [f32; 3],
}

impl MeshBounds {
    /// Compute bounds from a set of vertex positions
    pub fn from_positions(positions: &[[f32; 3]]) -> Option<Self> {
        if positions.is_empty() {
            return None;
        }
        let mut min = positions[0];
        let mut max = positions[0];
        for p in positions.iter().skip(1) {
            for i in 0..3 {
                if p[i] < min[i] { min[i] = p[i]; }
                if p[i] > max[i] { max[i] = p[i]; }
            }
        }
        Some(Self { min, max })
    }

    /// Size along each axis
    pub fn size(&self) -> [f32; 3] {
        [
            self.max[0] - self.min[0],
            self.max[1] - self.min[1],
            self.max[2] - self.min[2],
        ]
    }

    /// Center point
    pub fn center(&self) -> [f32; 3] {
        [
            (self.min[0] + self.max[0]) / 2.0,
            (self.min[1] + self.max[1]) / 2.0,
            (self.min[2] + self.max[2]) / 2.0,
        ]
    }

    /// Merge with another bounds to get the union
    pub fn union(&self, other: &MeshBounds) -> MeshBounds {
        MeshBounds {
            min: [
                self.min[0].min(other.min[0]),
                self.min[1].min(other.min[1]),
                self.min[2].min(other.min[2]),
            ],
            max: [
                self.max[0].max(other.max[0]),
                self.max[1].max(other.max[1]),
                self.max[2].max(other.max[2]),
            ],
        }
    }
}

/// An imported mesh primitive with vertex data
#[derive(Debug, Clone)]
pub struct ImportedMesh {
    pub name: String,
    pub positions: Vec<[f32; 3]>,
    pub normals: Vec<[f32; 3]>,
    pub indices: Vec<u32>,
    pub material_index: Option<usize>,
}

impl ImportedMesh {
    /// Compute the axis-aligned bounding box of this mesh's vertices
    pub fn bounds(&self) -> Option<MeshBounds> {
        MeshBounds::from_positions(&self.positions)
    }
}

/// An imported PBR material
#[derive(Debug, Clone)]
pub struct ImportedMaterial {
    pub name: String,
    pub base_color: [f32; 4],
    pub emissive: [f32; 3],
    pub metallic: f32,
    pub roughness: f32,
}

/// A node from the glTF scene graph, preserving transform hierarchy
#[derive(Debug, Clone)]
pub struct ImportedNode {
    pub name: String,
    pub translation: [f32; 3],
    pub rotation: [f32; 4], // quaternion [x, y, z, w]
    pub scale: [f32; 3],
    pub mesh_primitive_indices: Vec<usize>, // indices into ImportResult.meshes
    pub children: Vec<usize>,               // indices into ImportResult.nodes
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bounds_from_positions() {
        let positions = [[-1.0, 0.0, 2.0], [3.0, -2.0, 0.5], [0.0, 1.0, 1.0]];
        let bounds = MeshBounds::from_positions(&positions).unwrap();
        assert_eq!(bounds.min, [-1.0, -2.0, 0.5]);
        assert_eq!(bounds.max, [3.0, 1.0, 2.0]);
        assert_eq!(bounds.size(), [4.0, 3.0, 1.5]);
    }

    #[test]
    fn test_bounds_empty() {
        assert!(MeshBounds::from_positions(&[]).is_none());
    }

    #[test]
    fn test_bounds_union() {
        let a = MeshBounds { min: [0.0; 3], max: [1.0; 3] };
        let b = MeshBounds { min: [-1.0; 3], max: [0.5; 3] };
        let u = a.union(&b);
        assert_eq!(u.min, [-1.0; 3]);
        assert_eq!(u.max, [1.0; 3]);
    }
}
