//! Login and registration forms.

use tracing::debug;

use crate::auth::{Field, FormError, check_email, check_required};

/// Sign in form state
#[derive(Debug, Clone, Default)]
pub struct LoginForm {
    email: String,
    password: String,
    error: Option<FormError>,
}

impl LoginForm {
    /// Empty form
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Edit the email field, clearing any inline error.
    pub fn set_email(&mut self, email: impl Into<String>) {
        self.email = email.into();
        self.error = None;
    }

    /// Edit the password field, clearing any inline error.
    pub fn set_password(&mut self, password: impl Into<String>) {
        self.password = password.into();
        self.error = None;
    }

    /// Email field
    pub fn email(&self) -> &str {
        &self.email
    }

    /// Inline error from the last submit, if any.
    pub fn error(&self) -> Option<FormError> {
        self.error
    }

    /// Validate the form. The first failure is kept as the inline error.
    ///
    /// # Errors
    ///
    /// Returns the first [`FormError`] found, checking email then password.
    pub fn submit(&mut self) -> Result<(), FormError> {
        let result = check_email(&self.email)
            .and_then(|()| check_required(Field::Password, &self.password));

        self.error = result.err();

        debug!(valid = result.is_ok(), "login form submitted");

        result
    }
}

/// Registration form state
#[derive(Debug, Clone, Default)]
pub struct RegisterForm {
    full_name: String,
    email: String,
    password: String,
    password_confirmation: String,
    error: Option<FormError>,
}

impl RegisterForm {
    /// Empty form
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Edit the full name field, clearing any inline error.
    pub fn set_full_name(&mut self, full_name: impl Into<String>) {
        self.full_name = full_name.into();
        self.error = None;
    }

    /// Edit the email field, clearing any inline error.
    pub fn set_email(&mut self, email: impl Into<String>) {
        self.email = email.into();
        self.error = None;
    }

    /// Edit the password field, clearing any inline error.
    pub fn set_password(&mut self, password: impl Into<String>) {
        self.password = password.into();
        self.error = None;
    }

    /// Edit the password confirmation field, clearing any inline error.
    pub fn set_password_confirmation(&mut self, password: impl Into<String>) {
        self.password_confirmation = password.into();
        self.error = None;
    }

    /// Inline error from the last submit, if any.
    pub fn error(&self) -> Option<FormError> {
        self.error
    }

    /// Validate the form. The first failure is kept as the inline error.
    ///
    /// # Errors
    ///
    /// Returns the first [`FormError`] found, in field order.
    pub fn submit(&mut self) -> Result<(), FormError> {
        let result = self.validate();

        self.error = result.err();

        debug!(valid = result.is_ok(), "register form submitted");

        result
    }

    fn validate(&self) -> Result<(), FormError> {
        check_required(Field::FullName, &self.full_name)?;
        check_email(&self.email)?;
        check_required(Field::Password, &self.password)?;
        check_required(Field::PasswordConfirmation, &self.password_confirmation)?;

        if self.password != self.password_confirmation {
            return Err(FormError::PasswordMismatch);
        }

        Ok(())
    }
}
