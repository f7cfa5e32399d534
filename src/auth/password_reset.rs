//! Forgot password flow.
//!
//! There is no reset service behind the form: a valid submission waits a fixed
//! delay and always succeeds.

use std::time::Duration;

use tracing::info;

use crate::auth::{FormError, check_email};

/// Simulated round trip of a reset request.
pub const RESET_DELAY: Duration = Duration::from_millis(1500);

/// Where the reset request is.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ResetStatus {
    /// Waiting for the visitor to submit
    #[default]
    Idle,

    /// Request in flight
    Sending,

    /// Reset link "sent"
    Sent,
}

/// Password reset request form state
#[derive(Debug, Clone)]
pub struct ForgotPasswordForm {
    email: String,
    error: Option<FormError>,
    status: ResetStatus,
    delay: Duration,
}

impl Default for ForgotPasswordForm {
    fn default() -> Self {
        Self::with_delay(RESET_DELAY)
    }
}

impl ForgotPasswordForm {
    /// Empty form using [`RESET_DELAY`].
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Empty form with a custom simulated delay.
    #[must_use]
    pub fn with_delay(delay: Duration) -> Self {
        Self {
            email: String::new(),
            error: None,
            status: ResetStatus::Idle,
            delay,
        }
    }

    /// Edit the email field, clearing any inline error.
    pub fn set_email(&mut self, email: impl Into<String>) {
        self.email = email.into();
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

    /// Current request status
    pub fn status(&self) -> ResetStatus {
        self.status
    }

    /// Validate the email and "send" the reset link.
    ///
    /// # Errors
    ///
    /// Returns a [`FormError`] if the email is empty or malformed; the form stays idle.
    pub async fn submit(&mut self) -> Result<(), FormError> {
        if let Err(error) = check_email(&self.email) {
            self.error = Some(error);

            return Err(error);
        }

        self.error = None;
        self.status = ResetStatus::Sending;

        info!(email = %self.email, "password reset requested");

        tokio::time::sleep(self.delay).await;

        self.status = ResetStatus::Sent;

        Ok(())
    }

    /// Start over after a sent request, clearing the email.
    pub fn resend(&mut self) {
        self.email.clear();
        self.error = None;
        self.status = ResetStatus::Idle;
    }
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;
    use tokio::time::Instant;

    use crate::auth::Field;

    use super::*;

    #[tokio::test(start_paused = true)]
    async fn valid_email_resolves_to_sent_after_delay() -> TestResult {
        let mut form = ForgotPasswordForm::new();
        form.set_email("ayse@ornek.com");

        let started = Instant::now();
        form.submit().await?;

        assert_eq!(form.status(), ResetStatus::Sent);
        assert!(started.elapsed() >= RESET_DELAY);
        assert!(form.error().is_none());

        Ok(())
    }

    #[tokio::test(start_paused = true)]
    async fn empty_email_stays_idle() {
        let mut form = ForgotPasswordForm::new();

        let started = Instant::now();
        let result = form.submit().await;

        assert_eq!(result, Err(FormError::Required(Field::Email)));
        assert_eq!(form.status(), ResetStatus::Idle);
        assert_eq!(form.error(), Some(FormError::Required(Field::Email)));
        assert!(started.elapsed() < RESET_DELAY);
    }

    #[tokio::test(start_paused = true)]
    async fn malformed_email_is_rejected_and_cleared_on_edit() {
        let mut form = ForgotPasswordForm::new();
        form.set_email("ayse");

        assert_eq!(form.submit().await, Err(FormError::InvalidEmail));

        form.set_email("ayse@");

        assert!(form.error().is_none());
    }

    #[tokio::test(start_paused = true)]
    async fn resend_returns_to_idle_with_empty_email() -> TestResult {
        let mut form = ForgotPasswordForm::with_delay(Duration::from_millis(10));
        form.set_email("ayse@ornek.com");
        form.submit().await?;

        form.resend();

        assert_eq!(form.status(), ResetStatus::Idle);
        assert_eq!(form.email(), "");

        Ok(())
    }

    #[test]
    fn default_delay_is_one_and_a_half_seconds() {
        assert_eq!(RESET_DELAY, Duration::from_millis(1500));
        assert_eq!(ForgotPasswordForm::new().delay, RESET_DELAY);
    }
}
