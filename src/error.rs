use std::io;
use thiserror::Error;

// Import module-level errors for AppError
use crate::config::settings::ConfigError;
use crate::security::ValidationError;

/// Errors that can occur while invoking git
#[derive(Debug, Error)]
pub enum GitError {
    /// A validator rejected an input before any process was constructed.
    /// Carries the operation name so the rejection can be audited without
    /// re-deriving it from logs.
    #[error("operation {operation} rejected: {source}")]
    Rejected {
        operation: &'static str,
        #[source]
        source: ValidationError,
    },

    #[error("git command failed: {0}")]
    CommandFailed(String),

    #[error("failed to execute git: {0}")]
    SpawnFailed(String),

    #[error("failed to parse git output: {0}")]
    ParseError(String),

    #[error("git version {0} is too old. Minimum required: 2.20")]
    GitVersionTooOld(String),

    #[error("failed to detect git version: {0}")]
    GitVersionDetectionFailed(String),

    #[error("IO error: {0}")]
    IoError(#[from] io::Error),
}

/// Top-level application error that wraps all module-specific errors
///
/// This provides a unified error type for application-level code while
/// preserving the specific error context from each module. All module errors
/// automatically convert to AppError via the `From` trait.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Git error: {0}")]
    Git(#[from] GitError),

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Security validation error: {0}")]
    Validation(#[from] ValidationError),

    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}

/// Result type for git operations
pub type GitResult<T> = std::result::Result<T, GitError>;

/// Result type for application-level operations
pub type AppResult<T> = std::result::Result<T, AppError>;
