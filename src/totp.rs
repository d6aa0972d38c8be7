use std::time::SystemTime;

use tracing::warn;

use crate::hotp::get_hotp;
use crate::secret::Secret;

// TOTP https://datatracker.ietf.org/doc/html/rfc6238

pub const TIME_STEP: u64 = 30;

pub trait GetTime {
    fn get_now(&self) -> SystemTime;
}

pub struct Clock {}

impl Clock {
    pub fn new() -> Self {
        Clock {}
    }
}

impl GetTime for Clock {
    fn get_now(&self) -> SystemTime {
        SystemTime::now()
    }
}

/// Whole seconds since the Unix epoch. A clock set before 1970 reads as 0.
pub fn unix_seconds(clock: &impl GetTime) -> u64 {
    match clock.get_now().duration_since(SystemTime::UNIX_EPOCH) {
        Ok(elapsed) => elapsed.as_secs(),
        Err(err) => {
            warn!(behind = ?err.duration(), "system clock is before the Unix epoch");
            0
        }
    }
}

pub fn get_totp_moving_factor(timestamp: u64) -> u64 {
    timestamp / TIME_STEP
}

// 8 bytes, big-endian, zero padded
pub fn counter_bytes(moving_factor: u64) -> [u8; 8] {
    moving_factor.to_be_bytes()
}

/// Seconds until the current step ends, in `1..=TIME_STEP`.
pub fn remaining_seconds(timestamp: u64) -> u64 {
    TIME_STEP - timestamp % TIME_STEP
}

pub fn get_totp(secret: &Secret, timestamp: u64) -> u32 {
    let moving_factor = get_totp_moving_factor(timestamp);
    get_hotp(secret, &counter_bytes(moving_factor))
}
