//! Authentication forms
//!
//! Client-side validation only; nothing here talks to a backend.

use std::sync::LazyLock;

use regex::Regex;

pub mod errors;
pub mod forms;
pub mod password_reset;

pub use errors::{Field, FormError};
pub use forms::{LoginForm, RegisterForm};
pub use password_reset::{ForgotPasswordForm, RESET_DELAY, ResetStatus};

#[expect(clippy::expect_used, reason = "the pattern is a literal")]
static EMAIL_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\S+@\S+\.\S+").expect("email pattern compiles"));

/// Whether `email` looks like an address: something, `@`, something, `.`, something.
pub fn validate_email(email: &str) -> bool {
    EMAIL_PATTERN.is_match(email)
}

/// Check that a required email field is filled and well formed.
///
/// # Errors
///
/// - [`FormError::Required`]: the email is empty.
/// - [`FormError::InvalidEmail`]: the email does not match the address pattern.
pub fn check_email(email: &str) -> Result<(), FormError> {
    if email.is_empty() {
        return Err(FormError::Required(Field::Email));
    }

    if !validate_email(email) {
        return Err(FormError::InvalidEmail);
    }

    Ok(())
}

/// Check that a required field is filled.
///
/// # Errors
///
/// Returns [`FormError::Required`] if the value is empty or whitespace.
pub fn check_required(field: Field, value: &str) -> Result<(), FormError> {
    if value.trim().is_empty() {
        Err(FormError::Required(field))
    } else {
        Ok(())
    }
}
