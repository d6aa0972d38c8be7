use std::io;
use std::process;

use tracing::warn;

mod cmd;
mod error;
mod hotp;
mod presenter;
mod refresh;
mod secret;
#[cfg(test)]
mod tests;
mod totp;
mod writer;

use cmd::watch::run_watch;
use cmd::DisplayConfig;
use totp::Clock;
use writer::OtpWriter;

// TOTP https://datatracker.ietf.org/doc/html/rfc6238
// HOTP https://datatracker.ietf.org/doc/html/rfc4226

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        warn!(%err, "unable to listen for Ctrl+C");
        std::future::pending::<()>().await;
    }
}

#[tokio::main(flavor = "current_thread")]
async fn main() {
    let matches = cmd::command().get_matches();
    let config = DisplayConfig::from_matches(&matches);
    cmd::init_logging(&config);

    let mut writer = OtpWriter::new();
    let stdin = io::stdin();

    let exit_code = run_watch(
        &config,
        stdin.lock(),
        &mut writer,
        &Clock::new(),
        shutdown_signal(),
    )
    .await;

    process::exit(exit_code);
}
