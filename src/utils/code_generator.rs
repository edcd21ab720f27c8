//! Short code generation and validation utilities.
//!
//! Generated codes are drawn from an alphabet without look-alike characters
//! (`0`/`O`, `1`/`l`/`I`), so they survive being read aloud or retyped.

use crate::error::AppError;
use rand::Rng;

/// Alphabet for generated codes.
pub const CODE_ALPHABET: &[u8] = b"23456789abcdefghijkmnopqrstuvwxyzABCDEFGHJKLMNPQRSTUVWXYZ";

/// Length of generated codes.
pub const CODE_LENGTH: usize = 7;

/// Maximum length of a caller-supplied code.
pub const MAX_CUSTOM_CODE_LENGTH: usize = 32;

/// Codes that would shadow fixed routes.
const RESERVED_CODES: &[&str] = &["api", "health"];

/// Generates a random short code of [`CODE_LENGTH`] characters from
/// [`CODE_ALPHABET`].
///
/// # Examples
///
/// ```ignore
/// let code = generate_code();
/// assert_eq!(code.len(), CODE_LENGTH);
/// ```
pub fn generate_code() -> String {
    let mut rng = rand::rng();

    (0..CODE_LENGTH)
        .map(|_| {
            let idx = rng.random_range(0..CODE_ALPHABET.len());
            CODE_ALPHABET[idx] as char
        })
        .collect()
}

/// Validates a user-provided custom short code.
///
/// # Rules
///
/// - Length: 1-32 characters
/// - Allowed characters: URL-unreserved ASCII (letters, digits, `-`, `.`,
///   `_`, `~`), so the code is one path segment with no escaping
/// - Cannot be `.` or `..`, which clients collapse out of the path
/// - Cannot be a reserved route segment
///
/// # Errors
///
/// Returns [`AppError::Validation`] if any rule is violated.
pub fn validate_custom_code(code: &str) -> Result<(), AppError> {
    if code.is_empty() || code.len() > MAX_CUSTOM_CODE_LENGTH {
        return Err(AppError::bad_request(format!(
            "Custom code must be 1-{MAX_CUSTOM_CODE_LENGTH} characters"
        )));
    }

    if !code.chars().all(is_unreserved) {
        return Err(AppError::bad_request(
            "Custom code can only contain letters, digits and - . _ ~",
        ));
    }

    if code == "." || code == ".." {
        return Err(AppError::bad_request("Custom code cannot be a dot segment"));
    }

    if RESERVED_CODES.contains(&code) {
        return Err(AppError::bad_request("This code is reserved"));
    }

    Ok(())
}

fn is_unreserved(c: char) -> bool {
    c.is_ascii_alphanumeric() || matches!(c, '-' | '.' | '_' | '~')
}
