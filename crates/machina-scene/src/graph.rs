//! Scene graph built from an imported model

use machina_core::{mat4_mul, NodeId, Transform, Vec3};
use machina_import::{ImportResult, ImportedMesh, MeshBounds};

/// Material values the renderer reads per node.
///
/// `emissive` is the only field mutated after load (by the transient
/// highlight); everything else comes straight from the import.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NodeMaterial {
    pub base_color: [f32; 4],
    pub emissive: [f32; 3],
    pub metallic: f32,
    pub roughness: f32,
}

impl Default for NodeMaterial {
    fn default() -> Self {
        Self {
            base_color: [0.7, 0.7, 0.7, 1.0],
            emissive: [0.0, 0.0, 0.0],
            metallic: 0.0,
            roughness: 0.5,
        }
    }
}

/// A single node in the loaded scene
#[derive(Debug, Clone)]
pub struct SceneNode {
    pub id: NodeId,
    pub name: String,
    pub transform: Transform,
    pub parent: Option<NodeId>,
    /// Index into the scene's mesh list, when this node carries geometry
    pub mesh: Option<usize>,
    pub material: NodeMaterial,
    /// Local-space bounds of the node's mesh
    pub local_bounds: Option<MeshBounds>,
}

impl SceneNode {
    /// Nodes without geometry are grouping nodes; a viewport pick never
    /// hits them and the highlight skips them.
    pub fn has_mesh(&self) -> bool {
        self.mesh.is_some()
    }
}

/// The loaded scene: a flat node list with parent links, plus the CPU-side
/// mesh data the renderer uploads.
pub struct Scene {
    pub name: String,
    meshes: Vec<ImportedMesh>,
    nodes: Vec<SceneNode>,
    roots: Vec<NodeId>,
    /// Turntable angle applied around +Y above every root node
    turntable_angle: f32,
}

impl Scene {
    /// Build a scene from an import result.
    ///
    /// One `SceneNode` per glTF node; a node whose mesh has several
    /// primitives gets one child node per primitive so each stays
    /// individually pickable.
    pub fn from_import(import: ImportResult) -> Self {
        let ImportResult {
            name,
            meshes,
            materials,
            nodes: imported_nodes,
            root_nodes,
        } = import;

        let material_of = |index: Option<usize>| -> NodeMaterial {
            index
                .and_then(|i| materials.get(i))
                .map(|m| NodeMaterial {
                    base_color: m.base_color,
                    emissive: m.emissive,
                    metallic: m.metallic,
                    roughness: m.roughness,
                })
                .unwrap_or_default()
        };

        let mut nodes: Vec<SceneNode> = Vec::new();
        let mut roots = Vec::new();

        // Recursive expansion of the imported hierarchy
        fn expand(
            imported: &[machina_import::ImportedNode],
            meshes: &[ImportedMesh],
            material_of: &dyn Fn(Option<usize>) -> NodeMaterial,
            index: usize,
            parent: Option<NodeId>,
            nodes: &mut Vec<SceneNode>,
        ) -> NodeId {
            let src = &imported[index];
            let id = NodeId::from_raw(nodes.len() as u32);

            let transform = Transform::from_position(Vec3::from_array(src.translation))
                .with_rotation_quat(src.rotation)
                .with_scale(Vec3::from_array(src.scale));

            let single_mesh = if src.mesh_primitive_indices.len() == 1 {
                Some(src.mesh_primitive_indices[0])
            } else {
                None
            };

            nodes.push(SceneNode {
                id,
                name: src.name.clone(),
                transform,
                parent,
                mesh: single_mesh,
                material: single_mesh
                    .map(|i| material_of(meshes[i].material_index))
                    .unwrap_or_default(),
                local_bounds: single_mesh.and_then(|i| meshes[i].bounds()),
            });

            // Extra primitives become pickable child nodes
            if src.mesh_primitive_indices.len() > 1 {
                for (n, &mesh_index) in src.mesh_primitive_indices.iter().enumerate() {
                    let child_id = NodeId::from_raw(nodes.len() as u32);
                    nodes.push(SceneNode {
                        id: child_id,
                        name: format!("{}_{}", src.name, n),
                        transform: Transform::IDENTITY,
                        parent: Some(id),
                        mesh: Some(mesh_index),
                        material: material_of(meshes[mesh_index].material_index),
                        local_bounds: meshes[mesh_index].bounds(),
                    });
                }
            }

            for &child in &src.children {
                expand(imported, meshes, material_of, child, Some(id), nodes);
            }

            id
        }

        for &root in &root_nodes {
            let id = expand(
                &imported_nodes,
                &meshes,
                &material_of,
                root,
                None,
                &mut nodes,
            );
            roots.push(id);
        }

        Self {
            name,
            meshes,
            nodes,
            roots,
            turntable_angle: 0.0,
        }
    }

    /// An empty scene, shown until the first model finishes loading
    pub fn empty() -> Self {
        Self {
            name: String::new(),
            meshes: Vec::new(),
            nodes: Vec::new(),
            roots: Vec::new(),
            turntable_angle: 0.0,
        }
    }

    pub fn nodes(&self) -> &[SceneNode] {
        &self.nodes
    }

    pub fn roots(&self) -> &[NodeId] {
        &self.roots
    }

    pub fn meshes(&self) -> &[ImportedMesh] {
        &self.meshes
    }

    pub fn node(&self, id: NodeId) -> Option<&SceneNode> {
        self.nodes.get(id.raw() as usize)
    }

    pub fn node_mut(&mut self, id: NodeId) -> Option<&mut SceneNode> {
        self.nodes.get_mut(id.raw() as usize)
    }

    pub fn contains(&self, id: NodeId) -> bool {
        (id.raw() as usize) < self.nodes.len()
    }

    pub fn find_by_name(&self, name: &str) -> Option<&SceneNode> {
        self.nodes.iter().find(|n| n.name == name)
    }

    /// Advance the turntable rotation (radians around +Y)
    pub fn spin(&mut self, delta: f32) {
        self.turntable_angle = (self.turntable_angle + delta)
            .rem_euclid(std::f32::consts::TAU);
    }

    pub fn turntable_angle(&self) -> f32 {
        self.turntable_angle
    }

    /// World matrix of a node: turntable yaw, then the ancestor chain
    pub fn world_matrix(&self, id: NodeId) -> [[f32; 4]; 4] {
        let mut chain = Vec::new();
        let mut current = Some(id);
        while let Some(node_id) = current {
            match self.node(node_id) {
                Some(node) => {
                    chain.push(node.transform.to_matrix());
                    current = node.parent;
                }
                None => break,
            }
        }

        let mut world = yaw_matrix(self.turntable_angle);
        for local in chain.iter().rev() {
            world = mat4_mul(&world, local);
        }
        world
    }
}

/// Rotation matrix around +Y (column-major)
fn yaw_matrix(angle: f32) -> [[f32; 4]; 4] {
    let (s, c) = (angle.sin(), angle.cos());
    [
        [c, 0.0, -s, 0.0],
        [0.0, 1.0, 0.0, 0.0],
        [s, 0.0, c, 0.0],
        [0.0, 0.0, 0.0, 1.0],
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use machina_import::{ImportedMaterial, ImportedMesh, ImportedNode};

    fn unit_quad(name: &str, material_index: Option<usize>) -> ImportedMesh {
        ImportedMesh {
            name: name.to_string(),
            positions: vec![
                [-0.5, -0.5, 0.0],
                [0.5, -0.5, 0.0],
                [0.5, 0.5, 0.0],
                [-0.5, 0.5, 0.0],
            ],
            normals: vec![[0.0, 0.0, 1.0]; 4],
            indices: vec![0, 1, 2, 0, 2, 3],
            material_index,
        }
    }

    fn sample_import() -> ImportResult {
        ImportResult {
            name: "turbine".to_string(),
            meshes: vec![unit_quad("Fan", Some(0)), unit_quad("Housing", None)],
            materials: vec![ImportedMaterial {
                name: "steel".to_string(),
                base_color: [0.8, 0.8, 0.9, 1.0],
                emissive: [0.0, 0.0, 0.0],
                metallic: 1.0,
                roughness: 0.3,
            }],
            nodes: vec![
                ImportedNode {
                    name: "Root".to_string(),
                    translation: [0.0, 0.0, 0.0],
                    rotation: [0.0, 0.0, 0.0, 1.0],
                    scale: [1.0, 1.0, 1.0],
                    mesh_primitive_indices: vec![],
                    children: vec![1, 2],
                },
                ImportedNode {
                    name: "Fan".to_string(),
                    translation: [2.0, 0.0, 0.0],
                    rotation: [0.0, 0.0, 0.0, 1.0],
                    scale: [1.0, 1.0, 1.0],
                    mesh_primitive_indices: vec![0],
                    children: vec![],
                },
                ImportedNode {
                    name: "Housing".to_string(),
                    translation: [0.0, 1.0, 0.0],
                    rotation: [0.0, 0.0, 0.0, 1.0],
                    scale: [1.0, 1.0, 1.0],
                    mesh_primitive_indices: vec![1],
                    children: vec![],
                },
            ],
            root_nodes: vec![0],
        }
    }

    #[test]
    fn test_from_import_builds_hierarchy() {
        let scene = Scene::from_import(sample_import());
        assert_eq!(scene.nodes().len(), 3);
        assert_eq!(scene.roots().len(), 1);

        let fan = scene.find_by_name("Fan").unwrap();
        assert!(fan.has_mesh());
        assert_eq!(fan.parent, Some(scene.roots()[0]));
        assert_eq!(fan.material.metallic, 1.0);

        let root = scene.node(scene.roots()[0]).unwrap();
        assert!(!root.has_mesh());
    }

    #[test]
    fn test_world_matrix_composes_parent_chain() {
        let scene = Scene::from_import(sample_import());
        let fan = scene.find_by_name("Fan").unwrap();
        let m = scene.world_matrix(fan.id);
        // Root is at origin, Fan offset by [2, 0, 0]
        assert!((m[3][0] - 2.0).abs() < 1e-6);
        assert!(m[3][1].abs() < 1e-6);
    }

    #[test]
    fn test_turntable_rotates_world_matrix() {
        let mut scene = Scene::from_import(sample_import());
        scene.spin(std::f32::consts::FRAC_PI_2);
        let fan = scene.find_by_name("Fan").unwrap();
        let m = scene.world_matrix(fan.id);
        // A quarter turn around +Y maps +X to -Z
        assert!(m[3][0].abs() < 1e-5);
        assert!((m[3][2] + 2.0).abs() < 1e-5);
    }

    #[test]
    fn test_multi_primitive_node_expands_children() {
        let mut import = sample_import();
        import.nodes[1].mesh_primitive_indices = vec![0, 1];
        let scene = Scene::from_import(import);

        let fan = scene.find_by_name("Fan").unwrap();
        assert!(!fan.has_mesh());
        let part = scene.find_by_name("Fan_0").unwrap();
        assert!(part.has_mesh());
        assert_eq!(part.parent, Some(fan.id));
    }

    #[test]
    fn test_empty_scene() {
        let scene = Scene::empty();
        assert!(scene.nodes().is_empty());
        assert!(!scene.contains(NodeId::from_raw(0)));
    }
}
