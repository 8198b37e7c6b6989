//! Part detail panel — shows metadata for the selected node

use machina_core::NodeId;
use machina_scene::{PartCatalog, Scene, SelectionEvent, SelectionHub};
use std::sync::mpsc::Receiver;

/// Action requested by the panel, applied by the app after the egui pass
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DetailAction {
    None,
    ClearSelection,
}

/// Read-only detail panel fed by a selection subscription.
///
/// The panel never reads the hub directly; it tracks the selection through
/// the same event stream any other observer would use.
pub struct DetailPanel {
    catalog: PartCatalog,
    events: Receiver<SelectionEvent>,
    current: Option<NodeId>,
}

impl DetailPanel {
    pub fn new(hub: &mut SelectionHub) -> Self {
        Self {
            catalog: PartCatalog::sample(),
            events: hub.subscribe(),
            current: None,
        }
    }

    /// Drain pending selection events; call once per frame
    pub fn pump(&mut self) {
        while let Ok(event) = self.events.try_recv() {
            self.current = match event {
                SelectionEvent::Selected(id) => Some(id),
                SelectionEvent::Cleared => None,
            };
        }
    }

    pub fn current(&self) -> Option<NodeId> {
        self.current
    }

    /// Draw the panel contents
    pub fn ui(&self, ui: &mut egui::Ui, scene: &Scene) -> DetailAction {
        ui.heading("Part Details");
        ui.separator();

        let Some(id) = self.current else {
            ui.label("Click a part in the viewport.");
            return DetailAction::None;
        };

        let Some(node) = scene.node(id) else {
            ui.label("Selection is no longer in the scene.");
            return DetailAction::None;
        };

        let info = self.catalog.lookup(&node.name);

        ui.label(format!("Name: {}", node.name));
        ui.horizontal(|ui| {
            ui.label("Material:");
            ui.monospace(info.material);
        });
        ui.horizontal(|ui| {
            ui.label("Temperature:");
            ui.monospace(info.temperature);
        });

        ui.separator();
        if ui.button("Close").clicked() {
            return DetailAction::ClearSelection;
        }

        DetailAction::None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pump_tracks_hub() {
        let mut hub = SelectionHub::new();
        let mut panel = DetailPanel::new(&mut hub);

        panel.pump();
        assert_eq!(panel.current(), None);

        let id = NodeId::from_raw(2);
        hub.select(id);
        panel.pump();
        assert_eq!(panel.current(), Some(id));

        hub.clear();
        panel.pump();
        assert_eq!(panel.current(), None);
    }
}
