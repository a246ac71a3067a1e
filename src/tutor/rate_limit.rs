//! Client-side minimum-interval throttle
//!
//! A single "last accepted request" timestamp. Sends arriving closer
//! together than the configured interval are rejected locally before any
//! network activity. This is a courtesy throttle for a free service, not
//! abuse protection.

use crate::tutor::error::TutorError;
use std::time::{Duration, Instant};

/// Default minimum interval between accepted sends (contract value)
pub const DEFAULT_MIN_INTERVAL: Duration = Duration::from_millis(2000);

/// Rejects requests issued less than a fixed interval apart
#[derive(Debug)]
pub struct MinIntervalLimiter {
    min_interval: Duration,
    last_accepted: Option<Instant>,
}

impl MinIntervalLimiter {
    /// Create a limiter with the given minimum interval
    pub fn new(min_interval: Duration) -> Self {
        Self {
            min_interval,
            last_accepted: None,
        }
    }

    /// Check whether a send may proceed now
    ///
    /// On acceptance the current time is recorded as the new baseline.
    /// Rejection records nothing, so a rejected burst does not push the
    /// window further out.
    pub fn check(&mut self) -> Result<(), TutorError> {
        let now = Instant::now();
        if let Some(last) = self.last_accepted {
            if now.duration_since(last) < self.min_interval {
                return Err(TutorError::RateLimited {
                    min_interval_ms: self.min_interval.as_millis() as u64,
                });
            }
        }
        self.last_accepted = Some(now);
        Ok(())
    }
}

impl Default for MinIntervalLimiter {
    fn default() -> Self {
        Self::new(DEFAULT_MIN_INTERVAL)
    }
}
