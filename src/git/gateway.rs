use crate::audit::AuditLogger;
use crate::config::Config;
use crate::error::{GitError, GitResult};
use crate::git::executor::{CommandOutput, GitExecutor};
use crate::security::{self, ValidationError};
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Orchestrates the validators for every supported git operation and builds
/// the final subprocess invocation.
///
/// Each operation runs its gates in a fixed order — root containment,
/// relative-path shape, argument sanitization, hash shape or message check,
/// combined-path re-containment — and only then constructs an argument
/// vector for the executor. A failed gate short-circuits before any process
/// exists, wrapping the validator's error with the operation name.
///
/// The projects root is held here explicitly instead of in process-global
/// state; every method is `&self` and safe to call concurrently.
#[derive(Debug)]
pub struct GitGateway {
    projects_root: PathBuf,
    timeout: Duration,
    audit: Option<AuditLogger>,
}

impl GitGateway {
    /// Create a gateway confined to the given projects root.
    ///
    /// The root must be an absolute directory path; candidates are compared
    /// against it on every call.
    pub fn new<P: AsRef<Path>>(projects_root: P) -> Self {
        Self {
            projects_root: projects_root.as_ref().to_path_buf(),
            timeout: Duration::from_secs(30),
            audit: None,
        }
    }

    /// Create a gateway from loaded configuration, attaching the default
    /// audit logger when operation logging is enabled
    pub fn from_config(config: &Config) -> GitResult<Self> {
        let mut gateway = Self::new(&config.projects.root)
            .with_timeout(Duration::from_secs(config.git.timeout_seconds));

        if config.audit.log_operations {
            gateway.audit = Some(AuditLogger::new()?);
        }

        Ok(gateway)
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Attach an audit logger; executed operations and rejected inputs are
    /// both recorded.
    pub fn with_audit(mut self, audit: AuditLogger) -> Self {
        self.audit = Some(audit);
        self
    }

    pub fn projects_root(&self) -> &Path {
        &self.projects_root
    }

    /// Get the commit history touching a file: `git log -<limit> -- <path>`
    pub fn file_log(&self, project_path: &Path, file_path: &str, limit: u32) -> GitResult<String> {
        const OP: &str = "file_log";
        self.check_project(OP, project_path)?;
        let full_path = self.checked_join(OP, project_path, file_path)?;

        let limit_arg = format!("-{}", limit);
        let full_arg = full_path.display().to_string();
        let output = self.run(OP, project_path, &["log", &limit_arg, "--", &full_arg])?;
        Ok(output.stdout)
    }

    /// Get stat summary for a commit: `git show --stat <hash>`
    pub fn commit_stats(&self, project_path: &Path, commit_hash: &str) -> GitResult<String> {
        const OP: &str = "commit_stats";
        self.check_project(OP, project_path)?;
        self.check_hash(OP, commit_hash)?;

        let output = self.run(OP, project_path, &["show", "--stat", commit_hash])?;
        Ok(output.stdout)
    }

    /// Get the diff between two commits: `git diff <hash1> <hash2>`
    pub fn diff_between(
        &self,
        project_path: &Path,
        commit_hash1: &str,
        commit_hash2: &str,
    ) -> GitResult<String> {
        const OP: &str = "diff_between";
        self.check_project(OP, project_path)?;
        self.check_hash(OP, commit_hash1)?;
        self.check_hash(OP, commit_hash2)?;

        let output = self.run(OP, project_path, &["diff", commit_hash1, commit_hash2])?;
        Ok(output.stdout)
    }

    /// Get the diff introduced by the most recent commit
    pub fn latest_diff(&self, project_path: &Path) -> GitResult<String> {
        const OP: &str = "latest_diff";
        self.check_project(OP, project_path)?;

        let output = self.run(OP, project_path, &["diff", "HEAD~1", "HEAD"])?;
        Ok(output.stdout)
    }

    /// Get the full diff for a single commit: `git show <hash>`
    pub fn commit_diff(&self, project_path: &Path, commit_hash: &str) -> GitResult<String> {
        const OP: &str = "commit_diff";
        self.check_project(OP, project_path)?;
        self.check_hash(OP, commit_hash)?;

        let output = self.run(OP, project_path, &["show", commit_hash])?;
        Ok(output.stdout)
    }

    /// Get uncommitted changes in a worktree
    pub fn worktree_diff(&self, worktree_path: &Path) -> GitResult<String> {
        const OP: &str = "worktree_diff";
        self.check_project(OP, worktree_path)?;

        let output = self.run(OP, worktree_path, &["diff"])?;
        Ok(output.stdout)
    }

    /// Get porcelain status of a worktree
    pub fn worktree_status(&self, worktree_path: &Path) -> GitResult<String> {
        const OP: &str = "worktree_status";
        self.check_project(OP, worktree_path)?;

        let output = self.run(OP, worktree_path, &["status", "--porcelain"])?;
        Ok(output.stdout)
    }

    /// Get uncommitted changes for a single file in a worktree
    pub fn worktree_file_diff(&self, worktree_path: &Path, file_path: &str) -> GitResult<String> {
        const OP: &str = "worktree_file_diff";
        self.check_project(OP, worktree_path)?;
        let full_path = self.checked_join(OP, worktree_path, file_path)?;

        let full_arg = full_path.display().to_string();
        let output = self.run(OP, worktree_path, &["diff", "--", &full_arg])?;
        Ok(output.stdout)
    }

    /// Stage a file in a worktree
    pub fn stage_file(&self, worktree_path: &Path, file_path: &str) -> GitResult<()> {
        const OP: &str = "stage_file";
        self.check_project(OP, worktree_path)?;
        let full_path = self.checked_join(OP, worktree_path, file_path)?;

        let full_arg = full_path.display().to_string();
        self.run(OP, worktree_path, &["add", "--", &full_arg])?;
        Ok(())
    }

    /// Create a commit in a worktree with the given message.
    ///
    /// The message is gated by the commit-message validator only; it is
    /// passed to git as one argument and the stricter single-character
    /// denylist would reject ordinary prose.
    pub fn commit(&self, worktree_path: &Path, message: &str) -> GitResult<()> {
        const OP: &str = "commit";
        self.check_project(OP, worktree_path)?;
        self.gate(OP, security::validate_commit_message(message))?;

        self.run(OP, worktree_path, &["commit", "-m", message])?;
        Ok(())
    }

    /// Get the current branch name of a worktree
    pub fn current_branch(&self, worktree_path: &Path) -> GitResult<String> {
        const OP: &str = "current_branch";
        self.check_project(OP, worktree_path)?;

        let output = self.run(OP, worktree_path, &["rev-parse", "--abbrev-ref", "HEAD"])?;
        Ok(output.stdout.trim().to_string())
    }

    /// Wrap a validator result with the operation name, recording rejections
    /// in the audit log
    fn gate(&self, operation: &'static str, check: Result<(), ValidationError>) -> GitResult<()> {
        match check {
            Ok(()) => Ok(()),
            Err(source) => {
                if let Some(audit) = &self.audit {
                    let _ = audit.log_rejection(operation, &source.to_string());
                }
                Err(GitError::Rejected { operation, source })
            }
        }
    }

    fn check_project(&self, operation: &'static str, candidate: &Path) -> GitResult<()> {
        self.gate(
            operation,
            security::validate_project_path(&self.projects_root, candidate),
        )
    }

    fn check_hash(&self, operation: &'static str, hash: &str) -> GitResult<()> {
        self.gate(operation, security::sanitize_argument(hash))?;

        let shape = if security::is_valid_commit_hash(hash) {
            Ok(())
        } else {
            Err(ValidationError::InvalidHashFormat(hash.to_string()))
        };
        self.gate(operation, shape)
    }

    /// Validate a file fragment, sanitize it, and join it onto the project
    /// path, re-validating the combined result.
    ///
    /// The re-validation is not redundant: the fragment and the root can each
    /// pass their own checks while the join still lands outside the root
    /// under unusual root shapes. The combined check is the final gate.
    fn checked_join(
        &self,
        operation: &'static str,
        project_path: &Path,
        file_path: &str,
    ) -> GitResult<PathBuf> {
        self.gate(operation, security::validate_file_path(Path::new(file_path)))?;
        self.gate(operation, security::sanitize_argument(file_path))?;

        let full_path = project_path.join(file_path);
        self.gate(
            operation,
            security::validate_project_path(&self.projects_root, &full_path),
        )?;

        Ok(full_path)
    }

    fn run(&self, operation: &str, workdir: &Path, args: &[&str]) -> GitResult<CommandOutput> {
        let executor = GitExecutor::new(workdir);
        let result = executor.run_with_timeout(args, self.timeout);

        if let Some(audit) = &self.audit {
            let exit_code = match &result {
                Ok(output) => output.exit_code,
                Err(_) => -1,
            };
            let _ = audit.log_operation(operation, args, workdir, exit_code);
        }

        result
    }
}
