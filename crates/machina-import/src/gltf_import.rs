//! glTF/GLB file importer

use crate::types::{ImportResult, ImportedMaterial, ImportedMesh, ImportedNode};
use machina_core::{MachinaError, Result};
use std::path::Path;

/// Import a glTF or GLB file.
///
/// Flattens every mesh primitive into its own `ImportedMesh` and preserves
/// the node hierarchy so the scene crate can rebuild the part structure.
pub fn import_gltf<P: AsRef<Path>>(path: P) -> Result<ImportResult> {
    let path = path.as_ref();
    let (document, buffers, _images) = gltf::import(path).map_err(|e| {
        MachinaError::ImportError(format!("Failed to import glTF: {}", e))
    })?;

    let file_name = path
        .file_stem()
        .and_then(|n| n.to_str())
        .unwrap_or("unnamed")
        .to_string();

    // Flatten primitives; remember which slice of the flat list each
    // glTF mesh maps to so node resolution below stays index-based.
    let mut meshes = Vec::new();
    let mut primitive_map: Vec<Vec<usize>> = Vec::new();

    for mesh in document.meshes() {
        let mesh_name = mesh
            .name()
            .map(String::from)
            .unwrap_or_else(|| format!("mesh_{}", mesh.index()));

        let mut primitive_indices = Vec::new();

        for primitive in mesh.primitives() {
            let reader = primitive.reader(|buffer| Some(&buffers[buffer.index()]));

            let positions: Vec<[f32; 3]> = reader
                .read_positions()
                .map(|iter| iter.collect())
                .unwrap_or_default();

            let normals: Vec<[f32; 3]> = reader
                .read_normals()
                .map(|iter| iter.collect())
                .unwrap_or_default();

            let indices: Vec<u32> = reader
                .read_indices()
                .map(|iter| iter.into_u32().collect())
                .unwrap_or_default();

            primitive_indices.push(meshes.len());
            meshes.push(ImportedMesh {
                name: mesh_name.clone(),
                positions,
                normals,
                indices,
                material_index: primitive.material().index(),
            });
        }

        primitive_map.push(primitive_indices);
    }

    let mut materials = Vec::new();
    for material in document.materials() {
        let mat_name = material
            .name()
            .map(String::from)
            .unwrap_or_else(|| format!("material_{}", material.index().unwrap_or(0)));

        let pbr = material.pbr_metallic_roughness();

        materials.push(ImportedMaterial {
            name: mat_name,
            base_color: pbr.base_color_factor(),
            emissive: material.emissive_factor(),
            metallic: pbr.metallic_factor(),
            roughness: pbr.roughness_factor(),
        });
    }

    // document.nodes() iterates in index order, so the resulting vec is
    // indexable by glTF node index.
    let mut nodes = Vec::new();
    for node in document.nodes() {
        let node_name = node
            .name()
            .map(String::from)
            .unwrap_or_else(|| format!("node_{}", node.index()));

        let (translation, rotation, scale) = node.transform().decomposed();

        let mesh_primitive_indices = node
            .mesh()
            .map(|m| primitive_map[m.index()].clone())
            .unwrap_or_default();

        nodes.push(ImportedNode {
            name: node_name,
            translation,
            rotation,
            scale,
            mesh_primitive_indices,
            children: node.children().map(|c| c.index()).collect(),
        });
    }

    let root_nodes = document
        .default_scene()
        .or_else(|| document.scenes().next())
        .map(|scene| scene.nodes().map(|n| n.index()).collect())
        .unwrap_or_default();

    Ok(ImportResult {
        name: file_name,
        meshes,
        materials,
        nodes,
        root_nodes,
    })
}
