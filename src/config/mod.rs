pub mod settings;

pub use settings::{AuditConfig, Config, GitConfig, ProjectsConfig};
