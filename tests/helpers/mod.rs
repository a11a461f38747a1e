use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;
use tempfile::TempDir;

/// Run a git command in a test repository, panicking on failure
pub fn git(repo_path: &Path, args: &[&str]) -> String {
    let output = Command::new("git")
        .args(args)
        .current_dir(repo_path)
        .output()
        .unwrap();
    assert!(
        output.status.success(),
        "git {:?} failed: {}",
        args,
        String::from_utf8_lossy(&output.stderr)
    );
    String::from_utf8_lossy(&output.stdout).to_string()
}

/// Create a projects root containing one initialized git repository with an
/// initial commit.
///
/// Returns the root tempdir (keep it alive) and the project path inside it.
pub fn create_project_repo() -> (TempDir, PathBuf) {
    let root = TempDir::new().unwrap();
    let project = root.path().join("proj");
    fs::create_dir(&project).unwrap();

    git(&project, &["init", "-b", "main"]);
    git(&project, &["config", "user.name", "Test User"]);
    git(&project, &["config", "user.email", "test@example.com"]);

    fs::write(project.join("a.txt"), "first\n").unwrap();
    git(&project, &["add", "a.txt"]);
    git(&project, &["commit", "-m", "Initial commit"]);

    (root, project)
}

/// Get the full hash of HEAD
pub fn head_hash(project: &Path) -> String {
    git(project, &["rev-parse", "HEAD"]).trim().to_string()
}
