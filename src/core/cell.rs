//! First-construction-wins holder for a shared logger
//!
//! [`Logger::new`](super::Logger::new) is backed by a process-wide
//! `LoggerCell`. Embedders and tests that want the same contract without
//! global state own a cell of their own and hand the `Arc<Logger>` to the
//! code that logs.

use super::logger::{Logger, LoggerBuilder};
use super::severity::Severity;
use std::io::Write;
use std::sync::{Arc, OnceLock};

pub(crate) static GLOBAL: LoggerCell = LoggerCell::new();

#[derive(Debug, Default)]
pub struct LoggerCell {
    inner: OnceLock<Arc<Logger>>,
}

impl LoggerCell {
    pub const fn new() -> Self {
        Self {
            inner: OnceLock::new(),
        }
    }

    pub fn get(&self) -> Option<Arc<Logger>> {
        self.inner.get().cloned()
    }

    /// Create the logger on the first call; later calls ignore their
    /// arguments and return the existing instance.
    pub fn get_or_init<W: Write + Send + 'static>(
        &self,
        level: Severity,
        color_enabled: bool,
        primary: W,
    ) -> Arc<Logger> {
        self.get_or_init_with(
            Logger::builder()
                .level(level)
                .color_enabled(color_enabled)
                .primary(primary),
        )
    }

    /// Same contract as [`LoggerCell::get_or_init`] for a full builder.
    pub fn get_or_init_with(&self, builder: LoggerBuilder) -> Arc<Logger> {
        Arc::clone(self.inner.get_or_init(|| Arc::new(builder.build())))
    }
}
