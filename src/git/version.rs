use crate::error::{GitError, GitResult};
use std::fmt;
use std::process::Command;

/// Minimum required git version
const MIN_GIT_VERSION: (u32, u32) = (2, 20);

/// Installed git version, as reported by `git --version`
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct GitVersion {
    pub major: u32,
    pub minor: u32,
    pub patch: u32,
}

impl GitVersion {
    /// Detect the installed git version
    pub fn detect() -> GitResult<Self> {
        let output = Command::new("git")
            .arg("--version")
            .output()
            .map_err(|e| GitError::GitVersionDetectionFailed(e.to_string()))?;

        if !output.status.success() {
            return Err(GitError::GitVersionDetectionFailed(
                "git --version exited with failure".to_string(),
            ));
        }

        Self::parse(&String::from_utf8_lossy(&output.stdout))
    }

    /// Parse output like "git version 2.39.2" (suffixes such as
    /// "2.39.2.windows.1" are tolerated)
    pub fn parse(version_str: &str) -> GitResult<Self> {
        let numbers = version_str
            .trim()
            .strip_prefix("git version ")
            .ok_or_else(|| {
                GitError::ParseError(format!("unexpected git version output: {}", version_str))
            })?;

        let mut fields = numbers.split('.');
        let mut next_number = |name: &str| -> GitResult<u32> {
            fields
                .next()
                .and_then(|f| f.parse().ok())
                .ok_or_else(|| GitError::ParseError(format!("invalid {} version: {}", name, numbers)))
        };

        let major = next_number("major")?;
        let minor = next_number("minor")?;
        let patch = next_number("patch").unwrap_or(0);

        Ok(GitVersion { major, minor, patch })
    }

    /// Check if this version meets the minimum requirement
    pub fn is_supported(&self) -> bool {
        (self.major, self.minor) >= MIN_GIT_VERSION
    }

    /// Detect the installed git and refuse versions below the minimum
    pub fn validate() -> GitResult<Self> {
        let version = Self::detect()?;
        if !version.is_supported() {
            return Err(GitError::GitVersionTooOld(version.to_string()));
        }
        Ok(version)
    }
}

impl fmt::Display for GitVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}.{}", self.major, self.minor, self.patch)
    }
}
