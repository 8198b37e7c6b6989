//! Machina Scene - the viewer's scene model
//!
//! This crate owns everything between the importer and the renderer:
//! - `Scene` / `SceneNode` - a lightweight named node graph built from an import
//! - `SelectionHub` - the single source of truth for the current selection
//! - `PartCatalog` - static part metadata shown in the detail panel
//! - `ModelPlaylist` - the fixed, cycling list of model files

mod catalog;
mod graph;
mod playlist;
mod selection;

pub use catalog::{PartCatalog, PartInfo, UNKNOWN_MATERIAL, UNKNOWN_TEMPERATURE};
pub use graph::{NodeMaterial, Scene, SceneNode};
pub use playlist::ModelPlaylist;
pub use selection::{SelectionEvent, SelectionHub};
