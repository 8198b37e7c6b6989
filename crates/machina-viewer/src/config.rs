//! Viewer configuration

use machina_core::Result;
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// TOML-backed viewer configuration. Every field has a default, so a
/// partial file (or none at all) is fine.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ViewerConfig {
    /// Window title
    pub title: String,
    /// Initial window size in physical pixels
    pub width: u32,
    pub height: u32,
    /// Model files the "switch model" action cycles through
    pub models: Vec<PathBuf>,
}

impl Default for ViewerConfig {
    fn default() -> Self {
        Self {
            title: "Machina Viewer".to_string(),
            width: 1600,
            height: 900,
            models: vec![
                PathBuf::from("assets/models/turbine.glb"),
                PathBuf::from("assets/models/gearbox.glb"),
                PathBuf::from("assets/models/pump.glb"),
            ],
        }
    }
}

impl ViewerConfig {
    /// Load a config from a TOML file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        let config = toml::from_str(&text)?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = ViewerConfig::default();
        assert_eq!(config.models.len(), 3);
        assert!(config.width > 0 && config.height > 0);
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let config: ViewerConfig = toml::from_str(
            r#"
            title = "Bench"
            models = ["x.glb"]
            "#,
        )
        .unwrap();
        assert_eq!(config.title, "Bench");
        assert_eq!(config.models, vec![PathBuf::from("x.glb")]);
        assert_eq!(config.width, 1600);
    }
}
