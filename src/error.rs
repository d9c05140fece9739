//! Error types for loading prompts and values

use std::path::PathBuf;

use thiserror::Error;

use crate::presets::PresetError;

/// Errors from the configuration layer: prompt files, value files, presets
///
/// The engine operations themselves never fail.
#[derive(Error, Debug)]
pub enum PromptError {
    #[error("Failed to read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse prompt TOML: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("Failed to parse values JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Preset(#[from] PresetError),

    #[error("invalid assignment '{0}': expected name=value")]
    InvalidAssignment(String),

    #[error("no template given: pass a prompt file or --template")]
    MissingTemplate,
}

impl PromptError {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}
