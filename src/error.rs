//! Error type shared by every `codei` operation.

use std::path::PathBuf;
use thiserror::Error;

/// Errors returned by library functions.
///
/// Declining to overwrite an existing template is not an error; see
/// [`crate::templates::SaveOutcome::Exists`].
#[derive(Error, Debug)]
#[allow(clippy::module_name_repetitions, reason = "exported for tests")]
pub enum CodeiError {
    #[error("Settings for provided project type does not exist: {0}")]
    TemplateNotFound(String),
    #[error("no local settings found at {}", .0.display())]
    MissingLocalSettings(PathBuf),
    #[error("invalid template name '{0}'")]
    InvalidTemplateName(String),
    #[error("invalid settings document {}: {source}", path.display())]
    InvalidDocument {
        path: PathBuf,
        #[source]
        source: serde_path_to_error::Error<serde_json::Error>,
    },
    #[error("io error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to write output: {0}")]
    Output(#[source] std::io::Error),
    #[error("unable to locate the templates directory: {0}")]
    TemplatesDirUnknown(#[source] std::io::Error),
    #[error("failed to serialize settings: {0}")]
    Serialize(#[from] serde_json::Error),
    #[error("configuration error: {0}")]
    Config(#[from] ortho_config::OrthoError),
}

impl CodeiError {
    /// Wrap an I/O error with the path that caused it.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}
