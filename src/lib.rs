pub mod audit;
pub mod config;
pub mod error;
pub mod git;
pub mod security;

// Re-export commonly used types for convenience
pub use error::{AppError, AppResult, GitError, GitResult};
pub use git::{GitGateway, GitVersion};
pub use security::ValidationError;
