//! Password strength rules.
//!
//! Validation is purely structural; hashing lives in the server's auth
//! service, not here.

/// Symbols accepted when checking for a special character.
pub const ALLOWED_SYMBOLS: &str = "!@#$%^&*()_+-=[]{};':\",.<>/?\\|`~";

/// Minimum password length.
pub const MIN_LENGTH: usize = 8;

/// Errors that can occur when validating password strength.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum PasswordError {
    /// The password is shorter than [`MIN_LENGTH`].
    #[error("password must be at least {MIN_LENGTH} characters")]
    TooShort,
    /// No uppercase letter.
    #[error("password must contain an uppercase letter")]
    MissingUppercase,
    /// No lowercase letter.
    #[error("password must contain a lowercase letter")]
    MissingLowercase,
    /// No decimal digit.
    #[error("password must contain a digit")]
    MissingDigit,
    /// No symbol from the allowed set.
    #[error("password must contain a symbol")]
    MissingSymbol,
}

/// Validate that a plaintext password meets the strength requirements.
///
/// Requires at least [`MIN_LENGTH`] characters, one uppercase letter, one
/// lowercase letter, one digit, and one symbol from [`ALLOWED_SYMBOLS`].
///
/// # Errors
///
/// Returns the first [`PasswordError`] rule the password fails.
pub fn validate_strength(password: &str) -> Result<(), PasswordError> {
    if password.chars().count() < MIN_LENGTH {
        return Err(PasswordError::TooShort);
    }
    if !password.chars().any(|c| c.is_ascii_uppercase()) {
        return Err(PasswordError::MissingUppercase);
    }
    if !password.chars().any(|c| c.is_ascii_lowercase()) {
        return Err(PasswordError::MissingLowercase);
    }
    if !password.chars().any(|c| c.is_ascii_digit()) {
        return Err(PasswordError::MissingDigit);
    }
    if !password.chars().any(|c| ALLOWED_SYMBOLS.contains(c)) {
        return Err(PasswordError::MissingSymbol);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accepts_valid_password() {
        assert!(validate_strength("Valid1Pass!").is_ok());
    }

    #[test]
    fn test_rejects_too_short() {
        assert_eq!(validate_strength("short1!"), Err(PasswordError::TooShort));
    }

    #[test]
    fn test_rejects_missing_uppercase() {
        assert_eq!(
            validate_strength("alllowercase1!"),
            Err(PasswordError::MissingUppercase)
        );
    }

    #[test]
    fn test_rejects_missing_lowercase() {
        assert_eq!(
            validate_strength("ALLUPPER1!"),
            Err(PasswordError::MissingLowercase)
        );
    }

    #[test]
    fn test_rejects_missing_digit() {
        assert_eq!(
            validate_strength("NoDigits!"),
            Err(PasswordError::MissingDigit)
        );
    }

    #[test]
    fn test_rejects_missing_symbol() {
        assert_eq!(
            validate_strength("NoSymbol1"),
            Err(PasswordError::MissingSymbol)
        );
    }
}
