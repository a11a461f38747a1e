use crate::security::{
    DANGEROUS_ARGUMENT_CHARS, DANGEROUS_MESSAGE_PATTERNS, ValidationError,
};

/// Check a single subprocess argument against the character denylist.
///
/// Fails closed on the first dangerous character found, reporting both the
/// character and the full offending argument.
pub fn sanitize_argument(arg: &str) -> Result<(), ValidationError> {
    if let Some(ch) = arg.chars().find(|c| DANGEROUS_ARGUMENT_CHARS.contains(c)) {
        return Err(ValidationError::DangerousCharacter {
            arg: arg.to_string(),
            ch,
        });
    }
    Ok(())
}

/// Whether a string has the shape of a git object reference: 4 to 40 hex
/// digits, either case.
///
/// Pure predicate; callers wrap a `false` with their own error. The `..`
/// check is unreachable with the current hex charset but guards the
/// traversal invariant should the charset ever loosen to full revision
/// syntax.
pub fn is_valid_commit_hash(hash: &str) -> bool {
    if hash.is_empty() {
        return false;
    }
    if hash.len() < 4 || hash.len() > 40 {
        return false;
    }
    if !hash.chars().all(|c| c.is_ascii_hexdigit()) {
        return false;
    }
    if hash.contains("..") {
        return false;
    }
    true
}

/// Validate a commit message: non-empty after trimming and free of the
/// message pattern denylist.
///
/// Messages go through this check only, not `sanitize_argument`: they are
/// handed to git as one argument and ordinary prose punctuation must
/// survive.
pub fn validate_commit_message(message: &str) -> Result<(), ValidationError> {
    if message.trim().is_empty() {
        return Err(ValidationError::EmptyMessage);
    }

    for pattern in DANGEROUS_MESSAGE_PATTERNS {
        if message.contains(pattern) {
            return Err(ValidationError::DangerousPattern((*pattern).to_string()));
        }
    }

    Ok(())
}
