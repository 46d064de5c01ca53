//! Error types for romtag-core

use thiserror::Error;

/// Core error type for romtag
#[derive(Error, Debug)]
pub enum CoreError {
    /// C001: Configuration file not found
    #[error("[C001] Config file not found: {path}")]
    ConfigNotFound { path: String },

    /// C002: Invalid configuration value
    #[error("[C002] Invalid config: {message}")]
    ConfigInvalid { message: String },

    /// C003: Config YAML parse error
    #[error("[C003] Config parse error: {0}")]
    YamlParse(#[from] serde_yaml::Error),

    /// C004: Item identifier cannot be used as a store key
    #[error("[C004] Invalid item identifier '{value}': {reason}")]
    InvalidItemId { value: String, reason: String },

    /// C005: Store key is not a plain file name
    #[error("[C005] Invalid store key '{key}'")]
    InvalidStoreKey { key: String },

    /// C006: Scan directory does not exist
    #[error("[C006] Scan directory not found: {path}")]
    ScanDirNotFound { path: String },

    /// C007: Path cannot be turned into a glob pattern
    #[error("[C007] Invalid file pattern '{pattern}': {message}")]
    GlobPattern { pattern: String, message: String },

    /// C008: No versioned cache exists yet
    #[error("[C008] No record store found under {path}. Run `romtag build` with a catalog first.")]
    NoCacheVersion { path: String },

    /// C009: IO error
    #[error("[C009] IO error: {0}")]
    Io(#[from] std::io::Error),

    /// C010: IO error with file path context
    #[error("[C010] Failed to access '{path}': {source}")]
    IoWithPath {
        path: String,
        source: std::io::Error,
    },
}

/// Result type alias for CoreError
pub type CoreResult<T> = Result<T, CoreError>;
