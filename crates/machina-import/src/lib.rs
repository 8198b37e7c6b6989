//! Machina Import - glTF/GLB model loading
//!
//! Reads a glTF or GLB file into plain vertex/material/node data that the
//! scene and renderer crates consume without touching the gltf crate.

mod gltf_import;
mod types;

pub use gltf_import::import_gltf;
pub use types::{
    ImportResult, ImportedMaterial, ImportedMesh, ImportedNode, MeshBounds,
};
