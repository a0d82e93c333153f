//! Logger metrics for observability
//!
//! Sink write failures never reach the caller of `log`; they are counted
//! here instead.

use std::sync::atomic::{AtomicU64, Ordering};

/// Counters describing what the logger has done so far
///
/// # Example
///
/// ```
/// use leveled_logger::LoggerMetrics;
///
/// let metrics = LoggerMetrics::new();
/// metrics.record_logged();
/// metrics.record_write_failure();
///
/// assert_eq!(metrics.records_logged(), 1);
/// assert_eq!(metrics.write_failures(), 1);
/// ```
#[derive(Debug)]
pub struct LoggerMetrics {
    /// Records that passed the level gate and were dispatched
    records_logged: AtomicU64,

    /// Records rejected by the level gate
    records_filtered: AtomicU64,

    /// Individual destination writes that returned an error
    write_failures: AtomicU64,
}

impl LoggerMetrics {
    pub const fn new() -> Self {
        Self {
            records_logged: AtomicU64::new(0),
            records_filtered: AtomicU64::new(0),
            write_failures: AtomicU64::new(0),
        }
    }

    #[inline]
    pub fn records_logged(&self) -> u64 {
        self.records_logged.load(Ordering::Relaxed)
    }

    #[inline]
    pub fn records_filtered(&self) -> u64 {
        self.records_filtered.load(Ordering::Relaxed)
    }

    #[inline]
    pub fn write_failures(&self) -> u64 {
        self.write_failures.load(Ordering::Relaxed)
    }

    /// Returns the previous value
    #[inline]
    pub fn record_logged(&self) -> u64 {
        self.records_logged.fetch_add(1, Ordering::Relaxed)
    }

    #[inline]
    pub fn record_filtered(&self) -> u64 {
        self.records_filtered.fetch_add(1, Ordering::Relaxed)
    }

    #[inline]
    pub fn record_write_failure(&self) -> u64 {
        self.write_failures.fetch_add(1, Ordering::Relaxed)
    }

    pub fn reset(&self) {
        self.records_logged.store(0, Ordering::Relaxed);
        self.records_filtered.store(0, Ordering::Relaxed);
        self.write_failures.store(0, Ordering::Relaxed);
    }
}

impl Default for LoggerMetrics {
    fn default() -> Self {
        Self::new()
    }
}

impl Clone for LoggerMetrics {
    /// Create a snapshot of the current metrics values
    fn clone(&self) -> Self {
        Self {
            records_logged: AtomicU64::new(self.records_logged()),
            records_filtered: AtomicU64::new(self.records_filtered()),
            write_failures: AtomicU64::new(self.write_failures()),
        }
    }
}
