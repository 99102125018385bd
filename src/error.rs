use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum SyncError {
    #[error("Invalid version format '{0}'")]
    InvalidFormat(String),

    #[error("Malformed manifest '{}': {reason}", .path.display())]
    MalformedManifest { path: PathBuf, reason: String },

    #[error("Invalid substitution rule '{pattern}': {reason}")]
    InvalidRule { pattern: String, reason: String },

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Project validation failed: {0}")]
    ProjectValidation(String),

    #[error("Failed to access '{}': {source}", .path.display())]
    ArtifactIo {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),
}

pub type Result<T> = std::result::Result<T, SyncError>;
