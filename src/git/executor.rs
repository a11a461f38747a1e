use crate::error::{GitError, GitResult};
use std::path::{Path, PathBuf};
use std::process::{Command, Output};
use std::time::Duration;

/// Result of executing a git command
#[derive(Debug, Clone)]
pub struct CommandOutput {
    pub stdout: String,
    pub stderr: String,
    pub exit_code: i32,
    pub success: bool,
}

/// Runs git with a pre-validated argument vector inside a fixed working
/// directory.
///
/// Arguments are handed to the process directly; there is no shell-string
/// intermediate anywhere, so nothing here re-interprets quoting or
/// metacharacters. Callers are responsible for validating every element of
/// the vector first.
#[derive(Debug)]
pub struct GitExecutor {
    workdir: PathBuf,
}

impl GitExecutor {
    /// Create a new GitExecutor scoped to the given working directory
    pub fn new<P: AsRef<Path>>(workdir: P) -> Self {
        Self {
            workdir: workdir.as_ref().to_path_buf(),
        }
    }

    /// Execute git with the given arguments and return the captured output
    ///
    /// Example: executor.run(&["status", "--porcelain"])
    pub fn run(&self, args: &[&str]) -> GitResult<CommandOutput> {
        self.run_with_timeout(args, Duration::from_secs(30))
    }

    /// Execute git with a custom timeout.
    ///
    /// The timeout is carried for integrating systems; std::process offers no
    /// portable kill-after, so this layer does not enforce it itself.
    pub fn run_with_timeout(&self, args: &[&str], _timeout: Duration) -> GitResult<CommandOutput> {
        if args.is_empty() {
            return Err(GitError::CommandFailed("empty argument vector".to_string()));
        }

        let output = Command::new("git")
            .args(args)
            .current_dir(&self.workdir)
            .output()
            .map_err(|e| GitError::SpawnFailed(e.to_string()))?;

        self.process_output(output, args)
    }

    /// Process command output into CommandOutput struct
    fn process_output(&self, output: Output, args: &[&str]) -> GitResult<CommandOutput> {
        let stdout = String::from_utf8_lossy(&output.stdout).to_string();
        let stderr = String::from_utf8_lossy(&output.stderr).to_string();
        let exit_code = output.status.code().unwrap_or(-1);
        let success = output.status.success();

        if !success {
            return Err(GitError::CommandFailed(format!(
                "'git {}' failed with exit code {}: {}",
                args.join(" "),
                exit_code,
                stderr.trim()
            )));
        }

        Ok(CommandOutput {
            stdout,
            stderr,
            exit_code,
            success,
        })
    }

    /// Get the working directory
    pub fn workdir(&self) -> &Path {
        &self.workdir
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn create_test_repo() -> (TempDir, PathBuf) {
        let temp_dir = TempDir::new().unwrap();
        let repo_path = temp_dir.path().to_path_buf();

        // Initialize git repo
        Command::new("git")
            .args(["init"])
            .current_dir(&repo_path)
            .output()
            .unwrap();

        // Configure git
        Command::new("git")
            .args(["config", "user.name", "Test User"])
            .current_dir(&repo_path)
            .output()
            .unwrap();

        Command::new("git")
            .args(["config", "user.email", "test@example.com"])
            .current_dir(&repo_path)
            .output()
            .unwrap();

        (temp_dir, repo_path)
    }

    #[test]
    fn test_run_status() {
        let (_temp, repo_path) = create_test_repo();
        let executor = GitExecutor::new(&repo_path);

        let result = executor.run(&["status", "--porcelain"]);
        assert!(result.is_ok());

        let output = result.unwrap();
        assert!(output.success);
        assert_eq!(output.exit_code, 0);
    }

    #[test]
    fn test_run_log_empty_repo() {
        let (_temp, repo_path) = create_test_repo();
        let executor = GitExecutor::new(&repo_path);

        // Log command should fail in empty repo
        let result = executor.run(&["log", "--oneline"]);
        assert!(matches!(result, Err(GitError::CommandFailed(_))));
    }

    #[test]
    fn test_empty_argument_vector() {
        let (_temp, repo_path) = create_test_repo();
        let executor = GitExecutor::new(&repo_path);

        let result = executor.run(&[]);
        assert!(result.is_err());
    }

    #[test]
    fn test_arguments_are_not_shell_interpreted() {
        let (_temp, repo_path) = create_test_repo();
        let executor = GitExecutor::new(&repo_path);

        // A metacharacter-laden argument reaches git as one literal token;
        // git rejects it as an unknown revision rather than executing anything
        let result = executor.run(&["log", "$(whoami)"]);
        assert!(matches!(result, Err(GitError::CommandFailed(_))));
    }

    #[test]
    fn test_argument_with_spaces_is_one_token() {
        let (_temp, repo_path) = create_test_repo();
        let executor = GitExecutor::new(&repo_path);

        let result = executor.run(&["commit", "-m", "test message with spaces"]);

        // Fails because there is nothing to commit, not because the message
        // was split into separate arguments
        if let Err(e) = result {
            let msg = e.to_string();
            assert!(
                msg.contains("nothing to commit")
                    || msg.contains("nothing added")
                    || msg.contains("failed with exit code"),
                "error should come from git itself: {}",
                msg
            );
            assert!(!msg.contains("pathspec 'message"));
        }
    }

    #[test]
    fn test_workdir() {
        let (_temp, repo_path) = create_test_repo();
        let executor = GitExecutor::new(&repo_path);

        assert_eq!(executor.workdir(), repo_path.as_path());
    }
}
