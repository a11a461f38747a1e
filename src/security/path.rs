use std::path::{Component, MAIN_SEPARATOR, Path, PathBuf};

use crate::security::ValidationError;

/// Validate that `candidate` resolves inside `root`.
///
/// The raw string is checked for `..` before any normalization: the lexical
/// clean below would collapse most traversal attempts anyway, but path
/// normalization is exactly the kind of code platforms disagree on, so the
/// pre-normalization check stands on its own. Containment is then decided on
/// the absolute forms with a trailing separator appended to both sides, which
/// closes the sibling-prefix hole (root `/foo/bar` must not admit
/// `/foo/barbaz`). The root itself is a valid candidate.
///
/// No filesystem access: symlinks are not resolved, and the candidate does
/// not need to exist.
pub fn validate_project_path(root: &Path, candidate: &Path) -> Result<(), ValidationError> {
    if candidate.to_string_lossy().contains("..") {
        return Err(ValidationError::Traversal(candidate.display().to_string()));
    }

    let abs_root = absolutize(root)?;
    let abs_candidate = absolutize(&lexical_clean(candidate))?;

    if abs_candidate == abs_root {
        return Ok(());
    }

    let root_with_sep = format!("{}{}", abs_root.display(), MAIN_SEPARATOR);
    let candidate_with_sep = format!("{}{}", abs_candidate.display(), MAIN_SEPARATOR);

    if !candidate_with_sep.starts_with(&root_with_sep) {
        return Err(ValidationError::OutsideRoot(candidate.display().to_string()));
    }

    Ok(())
}

/// Validate a relative file-path fragment before it is joined onto a
/// validated project path.
///
/// Absolute paths are rejected outright even when they would land inside the
/// root: `Path::join` replaces the base entirely when handed an absolute
/// path, so an absolute fragment denotes whatever it wants regardless of the
/// root it is nominally joined onto.
pub fn validate_file_path(candidate: &Path) -> Result<(), ValidationError> {
    if candidate.to_string_lossy().contains("..") {
        return Err(ValidationError::Traversal(candidate.display().to_string()));
    }

    // Unreachable while the raw check above rejects every literal `..`, but
    // kept as an independent gate should that check ever loosen.
    if lexical_clean(candidate).starts_with("..") {
        return Err(ValidationError::Escape(candidate.display().to_string()));
    }

    if candidate.is_absolute() {
        return Err(ValidationError::AbsolutePath(candidate.display().to_string()));
    }

    Ok(())
}

/// Purely syntactic path normalization: collapses `.` components and
/// redundant separators, folds `name/..` pairs, and preserves leading `..`
/// components of relative paths. Never touches the filesystem.
fn lexical_clean(path: &Path) -> PathBuf {
    let mut out = PathBuf::new();
    let mut poppable = 0usize;

    for component in path.components() {
        match component {
            Component::Prefix(_) | Component::RootDir => out.push(component.as_os_str()),
            Component::CurDir => {}
            Component::ParentDir => {
                if poppable > 0 {
                    out.pop();
                    poppable -= 1;
                } else if !path.has_root() {
                    out.push("..");
                }
            }
            Component::Normal(name) => {
                out.push(name);
                poppable += 1;
            }
        }
    }

    if out.as_os_str().is_empty() {
        out.push(".");
    }

    out
}

/// Resolve a path to absolute form against the current directory, then clean
/// it. The current-directory read is the only step here that can fail.
fn absolutize(path: &Path) -> Result<PathBuf, ValidationError> {
    if path.is_absolute() {
        return Ok(lexical_clean(path));
    }

    let cwd = std::env::current_dir().map_err(|e| {
        ValidationError::Resolution(format!("cannot determine current directory: {}", e))
    })?;

    Ok(lexical_clean(&cwd.join(path)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_candidate_inside_root() {
        let root = Path::new("/work");
        assert!(validate_project_path(root, Path::new("/work/proj")).is_ok());
        assert!(validate_project_path(root, Path::new("/work/nested/deep/proj")).is_ok());
    }

    #[test]
    fn test_root_itself_is_valid() {
        let root = Path::new("/work");
        assert!(validate_project_path(root, Path::new("/work")).is_ok());
    }

    #[test]
    fn test_sibling_prefix_rejected() {
        // /foo/barbaz shares a string prefix with /foo/bar but is a sibling
        let root = Path::new("/foo/bar");
        let result = validate_project_path(root, Path::new("/foo/barbaz"));
        assert!(matches!(result, Err(ValidationError::OutsideRoot(_))));
    }

    #[test]
    fn test_absolute_path_outside_root() {
        let root = Path::new("/work");
        let result = validate_project_path(root, Path::new("/etc/passwd"));
        assert!(matches!(result, Err(ValidationError::OutsideRoot(_))));
    }

    #[test]
    fn test_raw_traversal_rejected_regardless_of_resolution() {
        let root = Path::new("/work");

        // Would resolve back inside the root, still rejected on the raw string
        let result = validate_project_path(root, Path::new("/work/proj/../proj"));
        assert!(matches!(result, Err(ValidationError::Traversal(_))));

        let result = validate_project_path(root, Path::new("/work/../etc/passwd"));
        assert!(matches!(result, Err(ValidationError::Traversal(_))));

        let result = validate_project_path(root, Path::new("../secret"));
        assert!(matches!(result, Err(ValidationError::Traversal(_))));
    }

    #[test]
    fn test_trailing_slash_on_candidate() {
        let root = Path::new("/work");
        assert!(validate_project_path(root, Path::new("/work/proj/")).is_ok());
    }

    #[test]
    fn test_curdir_components_collapse() {
        let root = Path::new("/work");
        assert!(validate_project_path(root, Path::new("/work/./proj")).is_ok());
    }

    #[test]
    fn test_file_path_valid_fragments() {
        assert!(validate_file_path(Path::new("src/main.rs")).is_ok());
        assert!(validate_file_path(Path::new("README.md")).is_ok());
        assert!(validate_file_path(Path::new("deep/nested/path/file.txt")).is_ok());
        assert!(validate_file_path(Path::new("./config.json")).is_ok());
    }

    #[test]
    fn test_file_path_traversal() {
        let result = validate_file_path(Path::new("../etc/passwd"));
        assert!(matches!(result, Err(ValidationError::Traversal(_))));

        // Raw check fires before normalization reveals the escape
        let result = validate_file_path(Path::new("subdir/../../../etc/passwd"));
        assert!(matches!(result, Err(ValidationError::Traversal(_))));

        // Even when `..` is not adjacent to a separator
        let result = validate_file_path(Path::new("..secret"));
        assert!(matches!(result, Err(ValidationError::Traversal(_))));
    }

    #[test]
    fn test_file_path_absolute_rejected() {
        let result = validate_file_path(Path::new("/etc/passwd"));
        assert!(matches!(result, Err(ValidationError::AbsolutePath(_))));
    }

    #[test]
    fn test_lexical_clean_reveals_escape() {
        // The escape is only visible after folding: a/../../b -> ../b
        assert_eq!(lexical_clean(Path::new("a/../../b")), PathBuf::from("../b"));
        assert_eq!(lexical_clean(Path::new("a/./b//c")), PathBuf::from("a/b/c"));
        assert_eq!(lexical_clean(Path::new("a/b/../..")), PathBuf::from("."));
        assert_eq!(lexical_clean(Path::new("/..")), PathBuf::from("/"));
        assert_eq!(lexical_clean(Path::new("../a/..")), PathBuf::from(".."));
    }

    #[test]
    fn test_relative_candidate_resolves_against_cwd() {
        // A relative candidate resolves against the current directory, which
        // is not under this root
        let root = Path::new("/nonexistent-gitward-root");
        let result = validate_project_path(root, Path::new("proj"));
        assert!(matches!(result, Err(ValidationError::OutsideRoot(_))));
    }
}
