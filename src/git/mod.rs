pub mod executor;
pub mod gateway;
pub mod version;

// Re-export commonly used types
pub use executor::{CommandOutput, GitExecutor};
pub use gateway::GitGateway;
pub use version::GitVersion;
