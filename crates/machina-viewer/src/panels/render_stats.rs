//! Render statistics panel — FPS counter

use std::time::{Duration, Instant};

/// Tracks rendering performance over a sliding one-second window
pub struct RenderStats {
    window_start: Instant,
    frames_in_window: u32,
    fps: f32,
}

impl Default for RenderStats {
    fn default() -> Self {
        Self {
            window_start: Instant::now(),
            frames_in_window: 0,
            fps: 0.0,
        }
    }
}

impl RenderStats {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record that a frame was rendered
    pub fn record_frame(&mut self) {
        self.frames_in_window += 1;
        let elapsed = self.window_start.elapsed();
        if elapsed >= Duration::from_secs(1) {
            self.fps = self.frames_in_window as f32 / elapsed.as_secs_f32();
            self.frames_in_window = 0;
            self.window_start = Instant::now();
        }
    }

    /// Draw the stats UI
    pub fn ui(&self, ui: &mut egui::Ui) {
        ui.monospace(format!("FPS: {:.0}", self.fps));
        if self.fps > 0.0 {
            ui.monospace(format!("Frame: {:.1}ms", 1000.0 / self.fps));
        }
    }
}
