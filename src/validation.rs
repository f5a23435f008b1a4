//! Checkpoint name validation
//!
//! Checkpoint names become git branch names, so they are checked before any
//! marker is created.

use crate::error::{Result, TutError};
use crate::models::constants::{CONFIG_BRANCH, SCRATCH_PREFIX};

/// Maximum allowed length for checkpoint names.
pub const MAX_NAME_LENGTH: usize = 128;

/// Names that would collide with refs tut or git already use.
const RESERVED_NAMES: &[&str] = &[CONFIG_BRANCH, "HEAD", "FETCH_HEAD", "ORIG_HEAD"];

/// Validates that a checkpoint name is usable as a branch name.
///
/// A name is valid if:
/// - It is not empty and no longer than MAX_NAME_LENGTH characters
/// - It contains only ASCII alphanumerics, dashes, underscores and dots
/// - It does not start with a dot or dash, contain `..`, or end in `.lock`
/// - It is not a reserved name or the main line
///
/// # Examples
///
/// ```
/// use tut::validation::validate_name;
///
/// assert!(validate_name("step-1", "master").is_ok());
/// assert!(validate_name("", "master").is_err());
/// assert!(validate_name("master", "master").is_err());
/// ```
pub fn validate_name(name: &str, head: &str) -> Result<()> {
    let invalid = |reason: &str| TutError::InvalidName {
        name: name.to_string(),
        reason: reason.to_string(),
    };

    if name.is_empty() {
        return Err(invalid("name cannot be empty"));
    }

    if name.len() > MAX_NAME_LENGTH {
        return Err(invalid(&format!(
            "too long: {} characters (max {MAX_NAME_LENGTH})",
            name.len()
        )));
    }

    let valid_chars = name
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_' || c == '.');
    if !valid_chars {
        return Err(invalid(
            "use only alphanumeric characters, dashes (-), underscores (_) and dots (.)",
        ));
    }

    if name.starts_with('.') || name.starts_with('-') {
        return Err(invalid("cannot start with '.' or '-'"));
    }

    if name.contains("..") || name.ends_with(".lock") {
        return Err(invalid("cannot contain '..' or end with '.lock'"));
    }

    if RESERVED_NAMES.contains(&name) || name == head {
        return Err(invalid("reserved name"));
    }

    if name.starts_with(SCRATCH_PREFIX.trim_end_matches('/')) {
        return Err(invalid("reserved for edit sessions"));
    }

    Ok(())
}

/// Clap value parser for checkpoint name arguments.
///
/// The main line is not known at parse time; the lifecycle re-checks it.
pub fn clap_name_validator(s: &str) -> std::result::Result<String, String> {
    validate_name(s, "").map_err(|e| e.to_string())?;
    Ok(s.to_string())
}
