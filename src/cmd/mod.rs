pub mod watch;

use clap::{arg, command, ArgMatches, Command};
use tracing::Level;

use crate::presenter::DisplayMode;

pub fn command() -> Command<'static> {
    command!()
        .about("Show the current TOTP code for a Base32 secret read from stdin")
        .args(&[
            arg!(-a --append "Print one line per tick instead of redrawing in place")
                .required(false),
            arg!(-v --verbose ... "Log to stderr (-v info, -vv debug, -vvv trace)")
                .required(false),
        ])
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DisplayConfig {
    pub mode: DisplayMode,
    pub verbosity: u64,
}

impl DisplayConfig {
    pub fn from_matches(matches: &ArgMatches) -> Self {
        let mode = match matches.is_present("append") {
            true => DisplayMode::Append,
            false => DisplayMode::Redraw,
        };

        DisplayConfig {
            mode,
            verbosity: matches.occurrences_of("verbose"),
        }
    }

    pub fn log_level(&self) -> Level {
        match self.verbosity {
            0 => Level::WARN,
            1 => Level::INFO,
            2 => Level::DEBUG,
            _ => Level::TRACE,
        }
    }
}

// stdout belongs to the status line, logs go to stderr
pub fn init_logging(config: &DisplayConfig) {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_max_level(config.log_level())
        .with_target(false)
        .init();
}
