//! Background model loading
//!
//! Each load runs on its own thread and reports back over a channel. A
//! monotonically increasing generation tags every request so a slow load
//! that finishes after a newer one was requested is simply discarded —
//! the displayed model can never be clobbered by a stale result.

use machina_core::Result;
use machina_import::{import_gltf, ImportResult};
use std::path::PathBuf;
use std::sync::mpsc::{channel, Receiver, Sender};

/// Completed (or failed) load, delivered on the app thread
pub struct AssetMessage {
    pub generation: u64,
    pub path: PathBuf,
    pub result: Result<ImportResult>,
}

/// Spawns load threads and collects their results
pub struct AssetLoader {
    tx: Sender<AssetMessage>,
    rx: Receiver<AssetMessage>,
    generation: u64,
}

impl Default for AssetLoader {
    fn default() -> Self {
        let (tx, rx) = channel();
        Self {
            tx,
            rx,
            generation: 0,
        }
    }
}

impl AssetLoader {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start loading a model in the background; returns the request's generation
    pub fn request(&mut self, path: PathBuf) -> u64 {
        self.generation += 1;
        let generation = self.generation;
        let tx = self.tx.clone();

        std::thread::spawn(move || {
            let result = import_gltf(&path);
            // The receiver may be gone during shutdown
            let _ = tx.send(AssetMessage {
                generation,
                path,
                result,
            });
        });

        generation
    }

    /// True when the message belongs to the most recent request
    pub fn is_current(&self, generation: u64) -> bool {
        generation == self.generation
    }

    /// Non-blocking poll for a finished load
    pub fn poll(&self) -> Option<AssetMessage> {
        self.rx.try_recv().ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::{Duration, Instant};

    fn wait_for_message(loader: &AssetLoader) -> AssetMessage {
        let deadline = Instant::now() + Duration::from_secs(5);
        loop {
            if let Some(msg) = loader.poll() {
                return msg;
            }
            assert!(Instant::now() < deadline, "loader never delivered");
            std::thread::sleep(Duration::from_millis(10));
        }
    }

    #[test]
    fn test_missing_file_reports_error() {
        let mut loader = AssetLoader::new();
        let generation = loader.request(PathBuf::from("does-not-exist.glb"));

        let msg = wait_for_message(&loader);
        assert_eq!(msg.generation, generation);
        assert!(msg.result.is_err());
        assert!(loader.is_current(generation));
    }

    #[test]
    fn test_newer_request_supersedes_older() {
        let mut loader = AssetLoader::new();
        let first = loader.request(PathBuf::from("first.glb"));
        let second = loader.request(PathBuf::from("second.glb"));

        assert!(!loader.is_current(first));
        assert!(loader.is_current(second));

        // Both results arrive; only the second passes the generation guard
        let mut current = 0;
        for _ in 0..2 {
            let msg = wait_for_message(&loader);
            if loader.is_current(msg.generation) {
                current += 1;
                assert_eq!(msg.generation, second);
            }
        }
        assert_eq!(current, 1);
    }
}
