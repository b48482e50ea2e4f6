//! Clock trait supplying "now" to time-dependent operations
//!
//! Scheduling rejects appointments in the past and medical records are
//! numbered from their creation instant. Both read time through `Clock` so
//! that `apply()` stays deterministic under test.

use chrono::{Local, NaiveDateTime};

/// Source of the current local date-time
pub trait Clock {
    fn now(&self) -> NaiveDateTime;
}

/// Wall clock in the local timezone
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> NaiveDateTime {
        Local::now().naive_local()
    }
}

/// Clock frozen at a fixed instant
///
/// # Example
/// ```
/// use chrono::NaiveDate;
/// use hospital_core::{Clock, FixedClock};
///
/// let at = NaiveDate::from_ymd_opt(2025, 1, 1)
///     .and_then(|d| d.and_hms_opt(9, 0, 0))
///     .unwrap();
/// assert_eq!(FixedClock(at).now(), at);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedClock(pub NaiveDateTime);

impl Clock for FixedClock {
    fn now(&self) -> NaiveDateTime {
        self.0
    }
}
