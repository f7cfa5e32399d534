use std::{
    io::{self, Write},
    time::Duration,
};

use bullion_store::auth::{ForgotPasswordForm, RESET_DELAY};
use clap::Args;

#[derive(Debug, Args)]
pub(crate) struct ResetPasswordArgs {
    /// Account email address
    email: String,

    /// Simulated delay in milliseconds
    #[arg(long, default_value_t = duration_millis(RESET_DELAY))]
    delay_ms: u64,
}

pub(crate) async fn run(args: ResetPasswordArgs) -> anyhow::Result<()> {
    let mut form = ForgotPasswordForm::with_delay(Duration::from_millis(args.delay_ms));
    let mut out = io::stdout().lock();

    form.set_email(args.email);

    writeln!(out, "Şifre sıfırlama bağlantısı gönderiliyor...")?;
    out.flush()?;

    form.submit().await?;

    writeln!(
        out,
        "Şifre sıfırlama bağlantısı {} adresine gönderildi.",
        form.email()
    )?;

    Ok(())
}

fn duration_millis(duration: Duration) -> u64 {
    u64::try_from(duration.as_millis()).unwrap_or(u64::MAX)
}
