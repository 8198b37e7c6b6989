//! Top toolbar with the viewer actions

/// Action requested by a toolbar button, applied after the egui pass
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToolbarAction {
    TogglePanels,
    SwitchModel,
    HighlightSelection,
    ResetCamera,
}

/// The viewer's top toolbar
#[derive(Default)]
pub struct Toolbar;

impl Toolbar {
    pub fn new() -> Self {
        Self
    }

    /// Draw the toolbar; returns the clicked action, if any.
    /// `model_label` describes the current playlist entry.
    pub fn ui(&self, ui: &mut egui::Ui, model_label: &str) -> Option<ToolbarAction> {
        let mut action = None;

        ui.horizontal(|ui| {
            if ui.button("☰ Menu").clicked() {
                action = Some(ToolbarAction::TogglePanels);
            }
            ui.separator();
            if ui.button("Switch Model").clicked() {
                action = Some(ToolbarAction::SwitchModel);
            }
            if ui.button("Highlight").clicked() {
                action = Some(ToolbarAction::HighlightSelection);
            }
            if ui.button("Reset Camera").clicked() {
                action = Some(ToolbarAction::ResetCamera);
            }
            ui.separator();
            ui.label(model_label);
        });

        action
    }
}
