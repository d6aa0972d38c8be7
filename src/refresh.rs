use std::future::Future;
use std::time::Duration;

use tracing::{debug, info};

use crate::presenter::Presenter;
use crate::secret::Secret;
use crate::totp::{get_totp, get_totp_moving_factor, remaining_seconds, unix_seconds, GetTime};
use crate::writer::OutErr;

pub const TICK_INTERVAL: Duration = Duration::from_secs(1);

/// What to show for one tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Frame {
    pub code: u32,
    pub remaining: u64,
    /// The step changed on this tick and the code was recomputed.
    pub recomputed: bool,
}

/// Keeps the code for the current time step and only rehashes when the
/// step moves on.
pub struct RefreshLoop {
    secret: Secret,
    last_step: Option<u64>,
    code: u32,
}

impl RefreshLoop {
    pub fn new(secret: Secret) -> Self {
        RefreshLoop {
            secret,
            last_step: None,
            code: 0,
        }
    }

    pub fn tick(&mut self, timestamp: u64) -> Frame {
        let step = get_totp_moving_factor(timestamp);
        let recomputed = self.last_step != Some(step);

        if recomputed {
            self.code = get_totp(&self.secret, timestamp);
            self.last_step = Some(step);
        }

        Frame {
            code: self.code,
            remaining: remaining_seconds(timestamp),
            recomputed,
        }
    }

    /// Draws a frame every `TICK_INTERVAL` until `shutdown` resolves.
    pub async fn run<C, W, F>(&mut self, clock: &C, presenter: &mut Presenter<W>, shutdown: F)
    where
        C: GetTime,
        W: OutErr,
        F: Future,
    {
        tokio::pin!(shutdown);

        loop {
            let frame = self.tick(unix_seconds(clock));
            if frame.recomputed {
                debug!(remaining = frame.remaining, "time step changed, code refreshed");
            }
            presenter.draw(frame.remaining, frame.code);

            tokio::select! {
                biased;
                _ = &mut shutdown => break,
                _ = tokio::time::sleep(TICK_INTERVAL) => {}
            }
        }

        presenter.finish();
        info!("shutting down");
    }
}
