use std::future::Future;
use std::io::{self, BufRead, Read};

use tracing::{debug, info};

use super::DisplayConfig;
use crate::error::TotpError;
use crate::presenter::Presenter;
use crate::refresh::RefreshLoop;
use crate::secret::Secret;
use crate::totp::GetTime;
use crate::writer::OutErr;

// Longest line read from stdin. Anything past it is left unread.
pub const MAX_LINE: u64 = 1024;

/// Reads exactly one line and decodes it. Bytes that are not UTF-8 become
/// U+FFFD, which the decoder skips like any other stray character.
pub fn read_secret<R: BufRead>(input: R) -> Result<Secret, TotpError> {
    let mut line = Vec::new();
    match input.take(MAX_LINE).read_until(b'\n', &mut line) {
        Ok(0) => Err(TotpError::InputRead(io::Error::new(
            io::ErrorKind::UnexpectedEof,
            "stdin closed before a secret was entered",
        ))),
        Ok(_) => Secret::from_base32(&String::from_utf8_lossy(&line)),
        Err(err) => Err(TotpError::InputRead(err)),
    }
}

/// Returns the process exit code. Only returns once `shutdown` resolves,
/// or straight away if the secret cannot be read.
pub async fn run_watch<R, W, C, F>(
    config: &DisplayConfig,
    input: R,
    writer: &mut W,
    clock: &C,
    shutdown: F,
) -> i32
where
    R: BufRead,
    W: OutErr,
    C: GetTime,
    F: Future,
{
    let secret = match read_secret(input) {
        Ok(secret) => secret,
        Err(err) => {
            debug!(error = ?err, "startup failed");
            writer.write_err(&format!("{}\n", err));
            return err.exit_code();
        }
    };
    info!(len = secret.len(), mode = ?config.mode, "secret loaded");

    let mut presenter = Presenter::new(writer, config.mode);
    presenter.banner();
    RefreshLoop::new(secret).run(clock, &mut presenter, shutdown).await;

    0
}
