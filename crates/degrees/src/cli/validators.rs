//! CLI input validation functions.
//!
//! These validators are used by clap's `value_parser` attribute to validate
//! user input at parse time, providing immediate feedback for invalid values.

/// Maximum length of a user's display name, in characters
pub const MAX_NAME_LENGTH: usize = 100;

/// Validate a reference user ID.
///
/// Delegates to the config validator to keep a single source of truth.
pub fn validate_reference_user(s: &str) -> Result<i64, String> {
    let id = validate_user_id(s)?;
    crate::config::validate_reference_user(id).map_err(|e| e.to_string())?;
    Ok(id)
}

/// Validate a user ID: a positive integer.
///
/// Any user may be configured as the reference user, so IDs accepted here
/// follow the same rule as `reference-user`.
pub fn validate_user_id(s: &str) -> Result<i64, String> {
    let s = s.trim();
    if s.is_empty() {
        return Err("User ID cannot be empty".to_string());
    }
    let id = s
        .parse::<i64>()
        .map_err(|_| format!("Invalid user ID '{s}'. Expected an integer"))?;
    if id < 1 {
        return Err(format!("Invalid user ID '{s}'. User IDs must be positive"));
    }
    Ok(id)
}

/// Validate a display name.
pub fn validate_name(s: &str) -> Result<String, String> {
    let s = s.trim();

    if s.is_empty() {
        return Err("Name cannot be empty".to_string());
    }

    if s.chars().count() > MAX_NAME_LENGTH {
        return Err(format!("Name cannot exceed {MAX_NAME_LENGTH} characters"));
    }

    if s.chars().any(char::is_control) {
        return Err("Name cannot contain control characters".to_string());
    }

    Ok(s.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case::positive("42", 42)]
    #[case::large("9000000000", 9_000_000_000)]
    #[case::padded(" 3 ", 3)]
    fn test_validate_user_id_valid(#[case] input: &str, #[case] expected: i64) {
        assert_eq!(validate_user_id(input), Ok(expected));
    }

    #[rstest]
    #[case::empty("", "empty")]
    #[case::word("ada", "integer")]
    #[case::float("1.5", "integer")]
    #[case::zero("0", "positive")]
    #[case::negative("-7", "positive")]
    fn test_validate_user_id_invalid(#[case] input: &str, #[case] expected_error: &str) {
        let err = validate_user_id(input).unwrap_err();
        assert!(
            err.contains(expected_error),
            "Expected error to contain '{expected_error}', got: '{err}'"
        );
    }

    #[rstest]
    #[case::zero("0")]
    #[case::negative("-1")]
    fn test_validate_reference_user_rejects_non_positive(#[case] input: &str) {
        assert!(validate_reference_user(input).is_err());
    }

    #[rstest]
    #[case::one("1")]
    #[case::large("9000000000")]
    fn test_every_user_id_can_be_reference(#[case] input: &str) {
        assert_eq!(validate_user_id(input), validate_reference_user(input));
    }

    #[test]
    fn test_validate_name() {
        assert_eq!(validate_name("  Ada Lovelace "), Ok("Ada Lovelace".to_string()));
        assert!(validate_name("   ").is_err());
        assert!(validate_name(&"x".repeat(MAX_NAME_LENGTH + 1)).is_err());
        assert!(validate_name("tab\there").is_err());
    }
}
