//! Error types for icon rendering and packaging

use std::path::PathBuf;

use thiserror::Error;

/// Result type alias for icon operations
pub type Result<T> = std::result::Result<T, IconError>;

/// Errors that can occur while rendering or packaging the icon
#[derive(Error, Debug)]
pub enum IconError {
    /// Failed to encode or decode a PNG
    #[error("Image error for {path}: {source}")]
    Image {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    /// Filesystem operation failed
    #[error("I/O error for {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Invalid configuration
    #[error("Invalid configuration: {0}")]
    Config(String),

    /// The icon compiler could not be started
    #[error("Failed to run {program}: {source}")]
    CompilerSpawn {
        program: String,
        #[source]
        source: std::io::Error,
    },

    /// The icon compiler ran but reported failure
    #[error("{program} exited with {}: {stderr}", exit_desc(.code))]
    CompilerFailed {
        program: String,
        code: Option<i32>,
        stderr: String,
    },

    /// The staging directory does not match what the compiler expects
    #[error("Iconset {dir} is invalid: {reason}")]
    Staging { dir: PathBuf, reason: String },
}

fn exit_desc(code: &Option<i32>) -> String {
    match code {
        Some(c) => format!("status {c}"),
        None => "a signal".to_string(),
    }
}

impl IconError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        IconError::Io { path: path.into(), source }
    }

    pub(crate) fn image(path: impl Into<PathBuf>, source: image::ImageError) -> Self {
        IconError::Image { path: path.into(), source }
    }
}
