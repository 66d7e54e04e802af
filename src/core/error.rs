//! Error types for core infrastructure
//!
//! Settings persistence and window setup report failures through [`CoreError`]
//! rather than panicking; callers log and fall back to defaults.

use thiserror::Error;

/// Errors raised by core infrastructure
#[derive(Error, Debug)]
pub enum CoreError {
    /// Settings file could not be read or written
    #[error("settings I/O error: {0}")]
    SettingsIo(#[from] std::io::Error),

    /// Settings file contents could not be (de)serialized
    #[error("settings serialization error: {0}")]
    SettingsSerialization(#[from] serde_json::Error),

    /// A required resource was missing during startup
    #[error("resource initialization failed: {message}")]
    ResourceInit { message: String },
}

/// Result type alias for core operations
pub type CoreResult<T> = Result<T, CoreError>;
