//! GUI panels for the viewer

mod detail_panel;
mod render_stats;
mod toolbar;

pub use detail_panel::{DetailAction, DetailPanel};
pub use render_stats::RenderStats;
pub use toolbar::{Toolbar, ToolbarAction};
