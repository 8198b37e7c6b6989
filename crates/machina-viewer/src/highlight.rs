//! Transient highlight effect
//!
//! Overrides the selected node's emissive color and restores the original
//! after a fixed delay. Expiry is checked each frame against `Instant`,
//! so there is no timer thread to cancel when the scene is replaced.

use machina_core::NodeId;
use machina_scene::Scene;
use std::time::{Duration, Instant};

/// Emissive color applied while the highlight is active
const HIGHLIGHT_EMISSIVE: [f32; 3] = [1.0, 0.25, 0.05];

/// How long the highlight stays before the original emissive returns
const HIGHLIGHT_DURATION: Duration = Duration::from_secs(2);

struct ActiveHighlight {
    node: NodeId,
    original_emissive: [f32; 3],
    expires_at: Instant,
}

/// Drives the highlight lifecycle; owned by the viewer app
#[derive(Default)]
pub struct HighlightController {
    active: Option<ActiveHighlight>,
}

impl HighlightController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_active(&self) -> bool {
        self.active.is_some()
    }

    /// Apply the highlight to the current selection.
    ///
    /// Does nothing (and reports false) when there is no selection or the
    /// selected node carries no mesh.
    pub fn trigger(
        &mut self,
        scene: &mut Scene,
        selection: Option<NodeId>,
        now: Instant,
    ) -> bool {
        let Some(id) = selection else {
            return false;
        };

        // Re-triggering the same node only extends the timer; the stored
        // original must survive, otherwise we would "restore" the
        // highlight color itself.
        if let Some(active) = &mut self.active {
            if active.node == id {
                active.expires_at = now + HIGHLIGHT_DURATION;
                return true;
            }
        }

        // Switching targets restores the previous node first
        self.revert(scene);

        let Some(node) = scene.node_mut(id) else {
            return false;
        };
        if !node.has_mesh() {
            return false;
        }

        let original_emissive = node.material.emissive;
        node.material.emissive = HIGHLIGHT_EMISSIVE;
        self.active = Some(ActiveHighlight {
            node: id,
            original_emissive,
            expires_at: now + HIGHLIGHT_DURATION,
        });
        true
    }

    /// Expire the highlight once its delay has elapsed
    pub fn update(&mut self, scene: &mut Scene, now: Instant) {
        if let Some(active) = &self.active {
            if now >= active.expires_at {
                self.revert(scene);
            }
        }
    }

    /// Drop any active highlight without touching the scene.
    /// Used when the scene itself is replaced.
    pub fn forget(&mut self) {
        self.active = None;
    }

    fn revert(&mut self, scene: &mut Scene) {
        if let Some(active) = self.active.take() {
            if let Some(node) = scene.node_mut(active.node) {
                node.material.emissive = active.original_emissive;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use machina_import::{ImportResult, ImportedMesh, ImportedNode};

    fn test_scene() -> Scene {
        Scene::from_import(ImportResult {
            name: "rig".to_string(),
            meshes: vec![ImportedMesh {
                name: "Fan".to_string(),
                positions: vec![[0.0, 0.0, 0.0], [1.0, 0.0, 0.0], [0.0, 1.0, 0.0]],
                normals: vec![[0.0, 0.0, 1.0]; 3],
                indices: vec![0, 1, 2],
                material_index: None,
            }],
            materials: vec![],
            nodes: vec![
                ImportedNode {
                    name: "Group".to_string(),
                    translation: [0.0; 3],
                    rotation: [0.0, 0.0, 0.0, 1.0],
                    scale: [1.0; 3],
                    mesh_primitive_indices: vec![],
                    children: vec![1],
                },
                ImportedNode {
                    name: "Fan".to_string(),
                    translation: [0.0; 3],
                    rotation: [0.0, 0.0, 0.0, 1.0],
                    scale: [1.0; 3],
                    mesh_primitive_indices: vec![0],
                    children: vec![],
                },
            ],
            root_nodes: vec![0],
        })
    }

    #[test]
    fn test_trigger_without_selection_is_noop() {
        let mut scene = test_scene();
        let before: Vec<_> = scene.nodes().iter().map(|n| n.material).collect();

        let mut highlight = HighlightController::new();
        assert!(!highlight.trigger(&mut scene, None, Instant::now()));
        assert!(!highlight.is_active());

        let after: Vec<_> = scene.nodes().iter().map(|n| n.material).collect();
        assert_eq!(before, after);
    }

    #[test]
    fn test_trigger_on_meshless_node_is_noop() {
        let mut scene = test_scene();
        let group = scene.find_by_name("Group").unwrap().id;

        let mut highlight = HighlightController::new();
        assert!(!highlight.trigger(&mut scene, Some(group), Instant::now()));
        assert!(!highlight.is_active());
    }

    #[test]
    fn test_highlight_applies_and_expires() {
        let mut scene = test_scene();
        let fan = scene.find_by_name("Fan").unwrap().id;
        let original = scene.node(fan).unwrap().material.emissive;

        let mut highlight = HighlightController::new();
        let start = Instant::now();
        assert!(highlight.trigger(&mut scene, Some(fan), start));
        assert_eq!(scene.node(fan).unwrap().material.emissive, HIGHLIGHT_EMISSIVE);

        // Still active just before the deadline
        highlight.update(&mut scene, start + HIGHLIGHT_DURATION - Duration::from_millis(1));
        assert!(highlight.is_active());

        // Reverted at the deadline
        highlight.update(&mut scene, start + HIGHLIGHT_DURATION);
        assert!(!highlight.is_active());
        assert_eq!(scene.node(fan).unwrap().material.emissive, original);
    }

    #[test]
    fn test_retrigger_extends_without_losing_original() {
        let mut scene = test_scene();
        let fan = scene.find_by_name("Fan").unwrap().id;
        let original = scene.node(fan).unwrap().material.emissive;

        let mut highlight = HighlightController::new();
        let start = Instant::now();
        highlight.trigger(&mut scene, Some(fan), start);
        highlight.trigger(&mut scene, Some(fan), start + Duration::from_secs(1));

        // Original deadline passes; the extension keeps it active
        highlight.update(&mut scene, start + HIGHLIGHT_DURATION);
        assert!(highlight.is_active());

        highlight.update(&mut scene, start + Duration::from_secs(1) + HIGHLIGHT_DURATION);
        assert_eq!(scene.node(fan).unwrap().material.emissive, original);
    }
}
