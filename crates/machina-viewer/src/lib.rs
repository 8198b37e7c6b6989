//! Machina Viewer - the interactive part-viewer application
//!
//! Owns the winit event loop, the egui panels, viewport picking, the
//! background model loader, and the per-frame update (turntable, camera
//! damping, highlight expiry).

mod app;
mod config;
mod highlight;
mod loader;
mod panels;
mod picking;

pub use app::{run, ViewerApp};
pub use config::ViewerConfig;
