//! Form validation errors.

use std::fmt;

use thiserror::Error;

/// Form fields that can fail validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    /// Full name (registration)
    FullName,

    /// Email address
    Email,

    /// Password
    Password,

    /// Repeated password (registration)
    PasswordConfirmation,
}

impl Field {
    /// Field label as shown next to the input.
    pub fn label(self) -> &'static str {
        match self {
            Field::FullName => "Ad soyad",
            Field::Email => "E-posta adresi",
            Field::Password => "Şifre",
            Field::PasswordConfirmation => "Şifre tekrarı",
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Inline form error. The message is shown under the offending field and
/// cleared on the next edit.
#[derive(Debug, Clone, Copy, Error, PartialEq, Eq)]
pub enum FormError {
    /// A required field is empty
    #[error("{0} gereklidir")]
    Required(Field),

    /// The email does not look like an address
    #[error("Geçerli bir e-posta adresi giriniz")]
    InvalidEmail,

    /// Password and confirmation differ
    #[error("Şifreler eşleşmiyor")]
    PasswordMismatch,
}

impl FormError {
    /// The field the message belongs to.
    pub fn field(self) -> Field {
        match self {
            FormError::Required(field) => field,
            FormError::InvalidEmail => Field::Email,
            FormError::PasswordMismatch => Field::PasswordConfirmation,
        }
    }
}
