//! Clock abstraction for time-dependent logic.
//!
//! Every expiry comparison in the session services takes its notion of
//! "now" from an injected [`Clock`] so that rotation and cleanup behavior
//! can be tested deterministically.

use chrono::{DateTime, Utc};

/// Source of the current time
pub trait Clock: Send + Sync {
    /// Returns the current UTC time
    fn now(&self) -> DateTime<Utc>;
}

/// Production clock backed by the system time
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}
