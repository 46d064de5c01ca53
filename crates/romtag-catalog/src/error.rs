//! Error types for romtag-catalog

use romtag_core::CoreError;
use thiserror::Error;

/// Catalog access errors
#[derive(Error, Debug)]
pub enum CatalogError {
    /// Catalog file does not exist (Q001)
    #[error("[Q001] Catalog file not found: {path}")]
    CatalogNotFound { path: String },

    /// Query program could not be started (Q002)
    #[error("[Q002] Failed to run '{program}': {source}")]
    Spawn {
        program: String,
        source: std::io::Error,
    },

    /// Query program reported an error (Q003)
    #[error("[Q003] Query {query} for '{subject}' failed ({status}): {stderr}")]
    QueryFailed {
        query: String,
        subject: String,
        status: String,
        stderr: String,
    },

    /// Query output was not valid UTF-8 (Q004)
    #[error("[Q004] Query {query} for '{subject}' returned invalid UTF-8")]
    InvalidOutput { query: String, subject: String },

    /// Cache or record store failure (Q005)
    #[error("[Q005] {0}")]
    Store(#[from] CoreError),
}

impl CatalogError {
    /// Whether the error ends the whole run rather than just the current item
    pub fn is_fatal_for_run(&self) -> bool {
        !matches!(
            self,
            CatalogError::QueryFailed { .. } | CatalogError::InvalidOutput { .. }
        )
    }
}

/// Result type alias for CatalogError
pub type CatalogResult<T> = Result<T, CatalogError>;
