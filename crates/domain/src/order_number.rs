//! Order number generation.

use std::sync::{Mutex, PoisonError};

use chrono::{DateTime, Utc};
use serde::Serialize;

const PREFIX: &str = "ORD-";
const TIMESTAMP_FORMAT: &str = "%Y%m%d%H%M%S";

/// Customer-facing order reference of the form `ORD-YYYYMMDDHHMMSS` (UTC).
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct OrderNumber(String);

impl OrderNumber {
    fn from_timestamp(at: DateTime<Utc>) -> Self {
        Self(format!("{PREFIX}{}", at.format(TIMESTAMP_FORMAT)))
    }

    /// Returns the order number as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for OrderNumber {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Issues order numbers that never repeat within the process.
///
/// Each number encodes a UTC second. When a request arrives in a second that
/// has already been issued, the generator moves to the next unused second,
/// so under bursts the encoded time may run slightly ahead of the clock.
#[derive(Debug, Default)]
pub struct OrderNumberGenerator {
    last_issued: Mutex<Option<i64>>,
}

impl OrderNumberGenerator {
    /// Creates a new generator.
    pub fn new() -> Self {
        Self::default()
    }

    /// Issues the next order number based on the current time.
    pub fn next(&self) -> OrderNumber {
        self.next_at(Utc::now())
    }

    /// Issues the next order number as if the clock read `now`.
    pub fn next_at(&self, now: DateTime<Utc>) -> OrderNumber {
        let mut last = self
            .last_issued
            .lock()
            .unwrap_or_else(PoisonError::into_inner);

        let mut secs = now.timestamp();
        if let Some(prev) = *last {
            if secs <= prev {
                tracing::debug!(clock = secs, issued = prev + 1, "order number second already used");
                secs = prev + 1;
            }
        }
        *last = Some(secs);

        let at = DateTime::from_timestamp(secs, 0).unwrap_or(now);
        OrderNumber::from_timestamp(at)
    }
}
