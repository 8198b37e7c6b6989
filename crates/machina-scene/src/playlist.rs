//! The fixed, cycling list of model files

use machina_core::{MachinaError, Result};
use std::path::{Path, PathBuf};

/// Ordered list of model paths the "switch model" action cycles through
pub struct ModelPlaylist {
    paths: Vec<PathBuf>,
    index: usize,
}

impl ModelPlaylist {
    pub fn new(paths: Vec<PathBuf>) -> Result<Self> {
        if paths.is_empty() {
            return Err(MachinaError::ConfigError(
                "model playlist is empty".to_string(),
            ));
        }
        Ok(Self { paths, index: 0 })
    }

    pub fn current(&self) -> &Path {
        &self.paths[self.index]
    }

    /// Step to the next model, wrapping past the last back to the first
    pub fn advance(&mut self) -> &Path {
        self.index = (self.index + 1) % self.paths.len();
        &self.paths[self.index]
    }

    pub fn len(&self) -> usize {
        self.paths.len()
    }

    pub fn is_empty(&self) -> bool {
        self.paths.is_empty()
    }

    pub fn position(&self) -> usize {
        self.index
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn playlist() -> ModelPlaylist {
        ModelPlaylist::new(vec![
            PathBuf::from("a.glb"),
            PathBuf::from("b.glb"),
            PathBuf::from("c.glb"),
        ])
        .unwrap()
    }

    #[test]
    fn test_cycles_and_wraps() {
        let mut pl = playlist();
        assert_eq!(pl.current(), Path::new("a.glb"));
        assert_eq!(pl.advance(), Path::new("b.glb"));
        assert_eq!(pl.advance(), Path::new("c.glb"));
        // Wraps back to the first after the last
        assert_eq!(pl.advance(), Path::new("a.glb"));
        assert_eq!(pl.position(), 0);
    }

    #[test]
    fn test_empty_playlist_rejected() {
        assert!(ModelPlaylist::new(vec![]).is_err());
    }
}
