//! Account rules: username, display name and password policy.

use crate::error::CoreError;

/// Minimum username length.
pub const MIN_USERNAME_LENGTH: usize = 3;

/// Maximum username length.
pub const MAX_USERNAME_LENGTH: usize = 50;

/// Maximum display name length.
pub const MAX_FULL_NAME_LENGTH: usize = 50;

/// Minimum password length.
pub const MIN_PASSWORD_LENGTH: usize = 6;

/// Maximum password length.
pub const MAX_PASSWORD_LENGTH: usize = 100;

/// Validate a login name: 3-50 characters, no whitespace.
pub fn validate_username(username: &str) -> Result<(), CoreError> {
    let len = username.chars().count();
    if !(MIN_USERNAME_LENGTH..=MAX_USERNAME_LENGTH).contains(&len) {
        return Err(CoreError::Validation(format!(
            "Username must be between {MIN_USERNAME_LENGTH}-{MAX_USERNAME_LENGTH} characters"
        )));
    }
    if username.chars().any(char::is_whitespace) {
        return Err(CoreError::Validation(
            "Username must not contain whitespace".to_string(),
        ));
    }
    Ok(())
}

/// Validate a display name: present and at most 50 characters.
pub fn validate_full_name(full_name: &str) -> Result<(), CoreError> {
    if full_name.trim().is_empty() {
        return Err(CoreError::Validation("Full name is required".to_string()));
    }
    if full_name.chars().count() > MAX_FULL_NAME_LENGTH {
        return Err(CoreError::Validation(format!(
            "Full name must be at most {MAX_FULL_NAME_LENGTH} characters"
        )));
    }
    Ok(())
}

/// Enforce the password policy.
///
/// Every violated rule is reported, joined with `"; "`.
pub fn validate_password_policy(password: &str) -> Result<(), CoreError> {
    let mut problems = Vec::new();

    let len = password.chars().count();
    if len < MIN_PASSWORD_LENGTH {
        problems.push(format!(
            "Password must be at least {MIN_PASSWORD_LENGTH} characters long"
        ));
    }
    if len > MAX_PASSWORD_LENGTH {
        problems.push(format!(
            "Password must be at most {MAX_PASSWORD_LENGTH} characters long"
        ));
    }
    if !password.chars().any(|c| c.is_ascii_uppercase()) {
        problems.push("Password must contain at least one uppercase letter".to_string());
    }
    if !password.chars().any(|c| c.is_ascii_lowercase()) {
        problems.push("Password must contain at least one lowercase letter".to_string());
    }
    if !password.chars().any(|c| c.is_ascii_digit()) {
        problems.push("Password must contain at least one digit".to_string());
    }
    if password.chars().all(|c| c.is_ascii_alphanumeric()) {
        problems.push("Password must contain at least one special character".to_string());
    }

    if problems.is_empty() {
        Ok(())
    } else {
        Err(CoreError::Validation(problems.join("; ")))
    }
}

/// Registration requires the password to be typed twice.
pub fn validate_password_confirmation(password: &str, confirm: &str) -> Result<(), CoreError> {
    if password != confirm {
        return Err(CoreError::Validation("Passwords do not match".to_string()));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn message(result: Result<(), CoreError>) -> String {
        match result {
            Err(CoreError::Validation(msg)) => msg,
            other => panic!("expected validation error, got {other:?}"),
        }
    }

    #[test]
    fn strong_password_passes() {
        assert!(validate_password_policy("Secret1!").is_ok());
    }

    #[test]
    fn each_missing_class_is_reported() {
        assert!(message(validate_password_policy("secret1!")).contains("uppercase"));
        assert!(message(validate_password_policy("SECRET1!")).contains("lowercase"));
        assert!(message(validate_password_policy("Secret!!")).contains("digit"));
        assert!(message(validate_password_policy("Secret11")).contains("special"));
    }

    #[test]
    fn length_limits() {
        assert!(message(validate_password_policy("Se1!")).contains("at least 6"));
        let long = format!("Aa1!{}", "x".repeat(97));
        assert!(message(validate_password_policy(&long)).contains("at most 100"));
    }

    #[test]
    fn all_problems_are_joined() {
        let msg = message(validate_password_policy("abc"));
        assert!(msg.contains("at least 6"));
        assert!(msg.contains("uppercase"));
        assert!(msg.contains("digit"));
        assert!(msg.contains("; "));
    }

    #[test]
    fn usernames() {
        assert!(validate_username("alice").is_ok());
        assert!(validate_username("al").is_err());
        assert!(validate_username("al ice").is_err());
        assert!(validate_username(&"a".repeat(51)).is_err());
    }

    #[test]
    fn full_names() {
        assert!(validate_full_name("Alice A").is_ok());
        assert!(validate_full_name(" ").is_err());
        assert!(validate_full_name(&"a".repeat(51)).is_err());
    }

    #[test]
    fn confirmation_must_match() {
        assert!(validate_password_confirmation("Secret1!", "Secret1!").is_ok());
        assert!(validate_password_confirmation("Secret1!", "Secret2!").is_err());
    }
}
