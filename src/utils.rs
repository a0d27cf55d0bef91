use std::sync::LazyLock;

use regex::Regex;
use validator::ValidationError;

pub mod error;

static EMAIL_RE: LazyLock<Regex> =
  LazyLock::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email pattern compiles"));

/// Loose syntactic check: something, an `@`, something, a dot, something.
pub fn is_valid_email(email: &str) -> bool {
  EMAIL_RE.is_match(&email.to_lowercase())
}

pub fn is_non_empty_string(value: &str) -> bool {
  !value.trim().is_empty()
}

pub fn validate_email_address(email: &str) -> Result<(), ValidationError> {
  if !is_non_empty_string(email) {
    return Err(ValidationError::new("email_required"));
  }

  if !is_valid_email(email) {
    return Err(ValidationError::new("email_invalid"));
  }

  Ok(())
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_is_valid_email_valid() {
    assert!(is_valid_email("user@example.com"));
    assert!(is_valid_email("First.Last+tag@sub.example.org"));
    assert!(is_valid_email("a@b.co"));
  }

  #[test]
  fn test_is_valid_email_invalid() {
    assert!(!is_valid_email(""));
    assert!(!is_valid_email("invalid-email"));
    assert!(!is_valid_email("user@example"));
    assert!(!is_valid_email("user @example.com"));
    assert!(!is_valid_email("user@@example.com"));
  }

  #[test]
  fn test_is_non_empty_string() {
    assert!(is_non_empty_string("x"));
    assert!(!is_non_empty_string(""));
    assert!(!is_non_empty_string(" \t\n"));
  }

  #[test]
  fn test_validate_email_address_codes() {
    assert!(validate_email_address("user@example.com").is_ok());

    let err = validate_email_address("  ").unwrap_err();
    assert_eq!(err.code, "email_required");

    let err = validate_email_address("nope").unwrap_err();
    assert_eq!(err.code, "email_invalid");
  }
}
