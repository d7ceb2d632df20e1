//! Input sanitization and validation for free-text account fields
//!
//! Everything written to the store from untrusted input passes through here,
//! so stored usernames and emails can never carry markup or script.

use crate::error::{AuthError, AuthResult};
use regex::Regex;
use std::sync::LazyLock;

const MIN_USERNAME_LENGTH: usize = 3;
const MAX_USERNAME_LENGTH: usize = 50;
const MIN_PASSWORD_LENGTH: usize = 6;
const MAX_EMAIL_LENGTH: usize = 254; // RFC 5321 SMTP limit

static EMAIL_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[a-zA-Z0-9._%+-]+@[a-zA-Z0-9.-]+\.[a-zA-Z]{2,}$").expect("valid email regex")
});

/// Escape HTML-significant characters in a free-text field
///
/// Entity-escapes rather than strips, so legitimate characters survive in a
/// harmless form.
pub fn sanitize_text(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for c in input.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#x27;"),
            _ => out.push(c),
        }
    }
    out
}

/// Validate a username as supplied, before sanitization
pub fn validate_username(username: &str) -> AuthResult<()> {
    if username.len() < MIN_USERNAME_LENGTH || username.len() > MAX_USERNAME_LENGTH {
        return Err(AuthError::InvalidInput(format!(
            "Username must be between {MIN_USERNAME_LENGTH} and {MAX_USERNAME_LENGTH} characters"
        )));
    }
    Ok(())
}

/// Validate an email address shape
pub fn validate_email(email: &str) -> AuthResult<()> {
    if email.len() > MAX_EMAIL_LENGTH || !EMAIL_REGEX.is_match(email) {
        return Err(AuthError::InvalidInput(
            "Invalid email address".to_string(),
        ));
    }
    Ok(())
}

/// Validate a raw password before it is hashed
pub fn validate_password(password: &str) -> AuthResult<()> {
    if password.len() < MIN_PASSWORD_LENGTH {
        return Err(AuthError::InvalidInput(format!(
            "Password must be at least {MIN_PASSWORD_LENGTH} characters"
        )));
    }
    Ok(())
}
