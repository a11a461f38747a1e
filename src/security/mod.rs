pub mod argument;
pub mod path;

pub use argument::{is_valid_commit_hash, sanitize_argument, validate_commit_message};
pub use path::{validate_file_path, validate_project_path};

use thiserror::Error;

/// Denylist for single-token subprocess arguments (paths, hashes, refs).
///
/// This is deliberately broader than shell metacharacters: arguments reach
/// git as discrete vector elements and never pass through a shell, but git's
/// own pathspec/revision grammar treats some of these specially.
///
/// Loosening this list requires careful security review.
pub const DANGEROUS_ARGUMENT_CHARS: &[char] = &[
    ';', '&', '|', '`', '$', '(', ')', '<', '>', '\\', '\n', '\r',
];

/// Denylist for commit messages.
///
/// A commit message is free text passed as one argument, so single dangerous
/// characters are allowed in prose (a lone `$` is fine); only the separator
/// characters and multi-character substitution patterns are rejected. The
/// `\n--` pattern blocks a flag-like line from being injected when the
/// message is later rendered or parsed elsewhere.
pub const DANGEROUS_MESSAGE_PATTERNS: &[&str] =
    &[";", "&", "|", "`", "$(", "<(", ">${", "\n--"];

#[derive(Debug, Error)]
pub enum ValidationError {
    #[error("path contains traversal sequence: {0}")]
    Traversal(String),

    #[error("file path escapes allowed directory: {0}")]
    Escape(String),

    #[error("path outside allowed directory: {0}")]
    OutsideRoot(String),

    #[error("absolute file paths not allowed: {0}")]
    AbsolutePath(String),

    #[error("argument contains dangerous character {ch:?}: {arg}")]
    DangerousCharacter { arg: String, ch: char },

    #[error("commit message contains dangerous pattern: {0:?}")]
    DangerousPattern(String),

    #[error("invalid commit hash format: {0}")]
    InvalidHashFormat(String),

    #[error("commit message cannot be empty")]
    EmptyMessage,

    #[error("failed to resolve path: {0}")]
    Resolution(String),
}
