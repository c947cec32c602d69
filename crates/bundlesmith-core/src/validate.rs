//! Input validation for build options.

use std::path::Path;

use crate::error::AppError;
use crate::result::AppResult;

/// Characters that break filenames on at least one supported platform.
const FORBIDDEN_NAME_CHARS: &[char] = &['<', '>', ':', '"', '/', '\\', '|', '?', '*'];

/// Maximum accepted application name length.
const MAX_APP_NAME_LEN: usize = 100;

/// Check that the entry script is set and points at a file.
pub fn validate_entry_script(path: &str) -> AppResult<()> {
    if path.trim().is_empty() {
        return Err(AppError::validation("entry script is not set"));
    }
    let script = Path::new(path);
    if !script.exists() {
        return Err(AppError::validation(format!(
            "entry script not found: {path}"
        )));
    }
    if !script.is_file() {
        return Err(AppError::validation(format!(
            "entry script is not a file: {path}"
        )));
    }
    Ok(())
}

/// Check an application name.
///
/// An empty name is fine; the backend derives one from the entry script.
pub fn validate_app_name(name: &str) -> AppResult<()> {
    if name.is_empty() {
        return Ok(());
    }
    if name.len() > MAX_APP_NAME_LEN {
        return Err(AppError::validation(format!(
            "application name exceeds {MAX_APP_NAME_LEN} characters"
        )));
    }
    if let Some(bad) = name.chars().find(|c| FORBIDDEN_NAME_CHARS.contains(c)) {
        return Err(AppError::validation(format!(
            "application name contains forbidden character {bad:?}"
        )));
    }
    Ok(())
}

/// Reduce an arbitrary string to something safe to use as a filename.
///
/// Alphanumerics, `-`, `_` and `.` pass through, whitespace becomes `_`,
/// everything else is dropped. The result is capped at 200 characters and
/// never empty.
pub fn sanitize_filename(name: &str) -> String {
    let cleaned: String = name
        .chars()
        .filter_map(|c| {
            if c.is_alphanumeric() || c == '-' || c == '_' || c == '.' {
                Some(c)
            } else if c.is_whitespace() {
                Some('_')
            } else {
                None
            }
        })
        .take(200)
        .collect();

    if cleaned.is_empty() {
        "unnamed".to_string()
    } else {
        cleaned
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;

    #[test]
    fn entry_script_must_be_set() {
        let err = validate_entry_script("").unwrap_err();
        assert_eq!(err.kind, ErrorKind::Validation);
        let err = validate_entry_script("   ").unwrap_err();
        assert_eq!(err.kind, ErrorKind::Validation);
    }

    #[test]
    fn entry_script_must_exist() {
        let err = validate_entry_script("/definitely/not/here.py").unwrap_err();
        assert!(err.message.contains("not found"));
    }

    #[test]
    fn entry_script_must_be_a_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = validate_entry_script(dir.path().to_str().unwrap()).unwrap_err();
        assert!(err.message.contains("not a file"));
    }

    #[test]
    fn entry_script_accepts_existing_file() {
        let dir = tempfile::tempdir().unwrap();
        let script = dir.path().join("main.py");
        std::fs::write(&script, "print('hi')").unwrap();
        validate_entry_script(script.to_str().unwrap()).unwrap();
    }

    #[test]
    fn empty_app_name_is_allowed() {
        validate_app_name("").unwrap();
    }

    #[test]
    fn app_name_rejects_path_separators() {
        for name in ["a/b", "a\\b", "a:b", "a?b", "a*b", "a<b", "a>b", "a|b", "a\"b"] {
            assert!(validate_app_name(name).is_err(), "accepted {name}");
        }
    }

    #[test]
    fn app_name_rejects_overlong_names() {
        let name = "x".repeat(101);
        assert!(validate_app_name(&name).is_err());
        let name = "x".repeat(100);
        validate_app_name(&name).unwrap();
    }

    #[test]
    fn sanitize_keeps_safe_characters() {
        assert_eq!(sanitize_filename("My App v2.1"), "My_App_v2.1");
        assert_eq!(sanitize_filename("report-final_3"), "report-final_3");
    }

    #[test]
    fn sanitize_drops_everything_else() {
        assert_eq!(sanitize_filename("a/b\\c:d"), "abcd");
        assert_eq!(sanitize_filename("../../etc/passwd"), "....etcpasswd");
    }

    #[test]
    fn sanitize_never_returns_empty() {
        assert_eq!(sanitize_filename(""), "unnamed");
        assert_eq!(sanitize_filename("///"), "unnamed");
    }
}
