//! Error types for Machina

use thiserror::Error;

/// The main error type for Machina operations
#[derive(Debug, Error)]
pub enum MachinaError {
    #[error("Node not found: {0}")]
    NodeNotFound(String),

    #[error("Import error: {0}")]
    ImportError(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Config error: {0}")]
    ConfigError(String),

    #[error("TOML parse error: {0}")]
    TomlParseError(String),

    #[error("Scene error: {0}")]
    SceneError(String),

    #[error("Render error: {0}")]
    RenderError(String),
}

/// Result type alias for Machina operations
pub type Result<T> = std::result::Result<T, MachinaError>;

impl From<toml::de::Error> for MachinaError {
    fn from(err: toml::de::Error) -> Self {
        MachinaError::TomlParseError(err.to_string())
    }
}
