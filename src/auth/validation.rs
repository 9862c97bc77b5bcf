//! Input validation for account registration fields.

use thiserror::Error;

/// Minimum username length.
pub const MIN_USERNAME_LENGTH: usize = 3;

/// Maximum username length.
pub const MAX_USERNAME_LENGTH: usize = 32;

/// Validation errors for registration input.
#[derive(Error, Debug, PartialEq)]
pub enum ValidationError {
    /// Username is too short.
    #[error("username must be at least {MIN_USERNAME_LENGTH} characters")]
    UsernameTooShort,

    /// Username is too long.
    #[error("username must be at most {MAX_USERNAME_LENGTH} characters")]
    UsernameTooLong,

    /// Username contains invalid characters.
    #[error("username may only contain letters, digits, and underscores")]
    UsernameInvalidChars,

    /// Email address is malformed.
    #[error("invalid email address")]
    InvalidEmail,
}

/// Validate a username.
///
/// Usernames must be 3-32 characters and contain only ASCII letters,
/// digits, and underscores. Usernames are case-sensitive throughout
/// the system, so `Alice` and `alice` are distinct accounts.
pub fn validate_username(username: &str) -> Result<(), ValidationError> {
    if username.len() < MIN_USERNAME_LENGTH {
        return Err(ValidationError::UsernameTooShort);
    }
    if username.len() > MAX_USERNAME_LENGTH {
        return Err(ValidationError::UsernameTooLong);
    }
    if !username
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || c == '_')
    {
        return Err(ValidationError::UsernameInvalidChars);
    }
    Ok(())
}

/// Validate an email address.
///
/// This is a lightweight structural check: the address must contain
/// exactly one `@` with a non-empty local part and a domain that
/// contains at least one dot.
pub fn validate_email(email: &str) -> Result<(), ValidationError> {
    let Some((local, domain)) = email.split_once('@') else {
        return Err(ValidationError::InvalidEmail);
    };
    if local.is_empty() || domain.is_empty() {
        return Err(ValidationError::InvalidEmail);
    }
    if domain.contains('@') || !domain.contains('.') {
        return Err(ValidationError::InvalidEmail);
    }
    if domain.starts_with('.') || domain.ends_with('.') {
        return Err(ValidationError::InvalidEmail);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_usernames() {
        assert!(validate_username("abc").is_ok());
        assert!(validate_username("alice").is_ok());
        assert!(validate_username("Alice_99").is_ok());
        assert!(validate_username("user_name_with_underscores").is_ok());
        assert!(validate_username(&"a".repeat(32)).is_ok());
    }

    #[test]
    fn test_username_too_short() {
        assert_eq!(
            validate_username("ab"),
            Err(ValidationError::UsernameTooShort)
        );
        assert_eq!(validate_username(""), Err(ValidationError::UsernameTooShort));
    }

    #[test]
    fn test_username_too_long() {
        assert_eq!(
            validate_username(&"a".repeat(33)),
            Err(ValidationError::UsernameTooLong)
        );
    }

    #[test]
    fn test_username_invalid_chars() {
        assert_eq!(
            validate_username("user name"),
            Err(ValidationError::UsernameInvalidChars)
        );
        assert_eq!(
            validate_username("user@host"),
            Err(ValidationError::UsernameInvalidChars)
        );
        assert_eq!(
            validate_username("user-name"),
            Err(ValidationError::UsernameInvalidChars)
        );
        assert_eq!(
            validate_username("日本語ユーザー"),
            Err(ValidationError::UsernameInvalidChars)
        );
    }

    #[test]
    fn test_valid_emails() {
        assert!(validate_email("alice@example.com").is_ok());
        assert!(validate_email("a.b+tag@sub.example.org").is_ok());
    }

    #[test]
    fn test_invalid_emails() {
        assert_eq!(validate_email("no-at-sign"), Err(ValidationError::InvalidEmail));
        assert_eq!(validate_email("@example.com"), Err(ValidationError::InvalidEmail));
        assert_eq!(validate_email("alice@"), Err(ValidationError::InvalidEmail));
        assert_eq!(validate_email("alice@nodot"), Err(ValidationError::InvalidEmail));
        assert_eq!(
            validate_email("alice@.example.com"),
            Err(ValidationError::InvalidEmail)
        );
        assert_eq!(
            validate_email("alice@example.com."),
            Err(ValidationError::InvalidEmail)
        );
        assert_eq!(
            validate_email("a@b@example.com"),
            Err(ValidationError::InvalidEmail)
        );
    }
}
