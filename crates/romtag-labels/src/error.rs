//! Error types for romtag-labels

use thiserror::Error;

/// Label storage errors
#[derive(Error, Debug)]
pub enum LabelError {
    /// Label tool is not installed (L001)
    #[error("[L001] Label tool '{program}' not found. Install it or use --dry-run.")]
    ToolMissing { program: String },

    /// Label tool could not be started (L002)
    #[error("[L002] Failed to run '{program}': {source}")]
    Spawn {
        program: String,
        source: std::io::Error,
    },

    /// Label tool reported an error (L003)
    #[error("[L003] '{program} {args}' failed ({status}): {stderr}")]
    CommandFailed {
        program: String,
        args: String,
        status: String,
        stderr: String,
    },

    /// Label cannot be sent in a comma-joined batch (L004)
    #[error("[L004] Label '{label}' contains a comma")]
    InvalidLabel { label: String },

    /// File to label does not exist (L005)
    #[error("[L005] File not found: {path}")]
    FileNotFound { path: String },
}

/// Result type alias for LabelError
pub type LabelResult<T> = Result<T, LabelError>;
