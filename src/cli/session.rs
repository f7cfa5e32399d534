use std::io::{self, BufRead, Write};

use bullion_store::{session::Session, store::Storefront};
use tracing::warn;

/// Run commands from stdin until EOF. A failed command is reported and the
/// session carries on.
pub(crate) fn run(store: Storefront) -> anyhow::Result<()> {
    let mut session = Session::new(store);
    let mut out = io::stdout().lock();

    for line in io::stdin().lock().lines() {
        let line = line?;

        if let Err(error) = session.run_line(&line, &mut out) {
            warn!(%error, line = %line, "session command failed");
            writeln!(out, "hata: {error}")?;
        }
    }

    Ok(())
}
