//! Main logger implementation

use super::{
    cell::GLOBAL,
    color_filter::ColorFilterWriter,
    config::LoggerConfig,
    error::{LoggerError, Result},
    format,
    metrics::LoggerMetrics,
    severity::Severity,
    tag::render_tag,
    timestamp::TimestampFormat,
    value::Value,
};
use crate::sinks::ConsoleSink;
use parking_lot::{Mutex, RwLock};
use std::collections::BTreeMap;
use std::fmt;
use std::io::Write;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::Arc;

/// Any byte consumer can be a destination.
pub type Sink = Box<dyn Write + Send>;

/// Invoked with the configured exit code instead of exiting the process.
pub type FatalCallback = Arc<dyn Fn(i32) + Send + Sync>;

/// Exit code used on a fatal record unless configured otherwise.
pub const DEFAULT_FATAL_EXIT_CODE: i32 = 0;

/// Identity of one destination registration.
///
/// Every call to [`Logger::add_writer`] returns a fresh id, even when the
/// same underlying sink is registered twice; cancel with the id you got.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SinkId(u64);

impl SinkId {
    /// The sink passed at construction time.
    pub const PRIMARY: SinkId = SinkId(0);
}

impl fmt::Display for SinkId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "sink#{}", self.0)
    }
}

struct Destination {
    /// Only the primary sink may receive color sequences.
    colorable: bool,
    writer: Mutex<Sink>,
}

impl Destination {
    fn write_record(&self, record: &[u8]) -> std::io::Result<()> {
        let mut writer = self.writer.lock();
        writer.write_all(record)?;
        writer.flush()
    }
}

struct LoggerState {
    /// Raw threshold; values outside the severity range are tolerated.
    level: i32,
    color_enabled: bool,
    destinations: BTreeMap<SinkId, Destination>,
}

pub struct Logger {
    state: RwLock<LoggerState>,
    next_id: AtomicU64,
    timestamp_format: TimestampFormat,
    exit_code: i32,
    on_fatal: Option<FatalCallback>,
    terminated: AtomicBool,
    metrics: LoggerMetrics,
}

impl Logger {
    /// Return the process-wide logger, creating it on the first call.
    ///
    /// Only the first call's arguments take effect; later calls get the
    /// same instance back and their arguments (including `primary`) are
    /// dropped.
    ///
    /// ```no_run
    /// use leveled_logger::{Logger, Severity};
    ///
    /// let logger = Logger::new(Severity::Info, true, std::io::stdout());
    /// let again = Logger::new(Severity::Fatal, false, std::io::stderr());
    /// assert!(std::sync::Arc::ptr_eq(&logger, &again));
    /// ```
    pub fn new<W: Write + Send + 'static>(
        level: Severity,
        color_enabled: bool,
        primary: W,
    ) -> Arc<Logger> {
        GLOBAL.get_or_init(level, color_enabled, primary)
    }

    /// The process-wide logger, if [`Logger::new`] has run.
    pub fn global() -> Option<Arc<Logger>> {
        GLOBAL.get()
    }

    /// Register an extra destination. It always receives plain text.
    pub fn add_writer<W: Write + Send + 'static>(&self, sink: W) -> SinkId {
        let id = SinkId(self.next_id.fetch_add(1, Ordering::Relaxed));
        let writer: Sink = Box::new(ColorFilterWriter::new(sink));
        let destination = Destination {
            colorable: false,
            writer: Mutex::new(writer),
        };
        self.state.write().destinations.insert(id, destination);
        id
    }

    /// Remove a registration. Returns `false` when `id` is not registered.
    pub fn cancel_writer(&self, id: SinkId) -> bool {
        self.state.write().destinations.remove(&id).is_some()
    }

    pub fn set_level(&self, level: Severity) {
        self.set_level_rank(level.rank());
    }

    /// Set the threshold from a raw rank. Not validated: a rank above
    /// `Fatal` silences every record, a negative one admits all.
    pub fn set_level_rank(&self, rank: i32) {
        self.state.write().level = rank;
    }

    pub fn set_color_enabled(&self, enabled: bool) {
        self.state.write().color_enabled = enabled;
    }

    pub fn level_rank(&self) -> i32 {
        self.state.read().level
    }

    /// The threshold as a severity, `None` when it is out of range.
    pub fn level(&self) -> Option<Severity> {
        Severity::from_rank(self.level_rank())
    }

    pub fn color_enabled(&self) -> bool {
        self.state.read().color_enabled
    }

    pub fn writer_count(&self) -> usize {
        self.state.read().destinations.len()
    }

    pub fn is_writer_registered(&self, id: SinkId) -> bool {
        self.state.read().destinations.contains_key(&id)
    }

    /// `true` once a fatal record has been accepted.
    pub fn is_terminated(&self) -> bool {
        self.terminated.load(Ordering::Acquire)
    }

    pub fn metrics(&self) -> &LoggerMetrics {
        &self.metrics
    }

    /// Render and write one record to every destination.
    ///
    /// Records below the threshold are dropped before rendering. Write
    /// errors are counted in [`LoggerMetrics::write_failures`] and otherwise
    /// ignored. A `Fatal` record stops after the first destination and then
    /// terminates: the process exits with the configured code, or the
    /// `on_fatal` callback runs and the logger stops accepting records.
    pub fn log(&self, level: Severity, template: &str, args: &[Value]) {
        if self.is_terminated() {
            return;
        }

        let state = self.state.read();
        if level.rank() < state.level {
            self.metrics.record_filtered();
            return;
        }
        // Only one fatal record may claim termination.
        if level.is_terminal() && self.terminated.swap(true, Ordering::AcqRel) {
            return;
        }

        let message = format::render(template, args);
        let timestamp = self.timestamp_format.now();
        self.metrics.record_logged();

        for destination in state.destinations.values() {
            let colored = destination.colorable && state.color_enabled;
            let record = format!("{}{message}", render_tag(level, &timestamp, colored));
            if destination.write_record(record.as_bytes()).is_err() {
                self.metrics.record_write_failure();
            }
            if level.is_terminal() {
                break;
            }
        }
        drop(state);

        if level.is_terminal() {
            self.terminate();
        }
    }

    /// Like [`Logger::log`], with out-of-range ranks logged as `Info`.
    pub fn log_rank(&self, rank: i32, template: &str, args: &[Value]) {
        self.log(Severity::from_rank_or_info(rank), template, args);
    }

    #[inline]
    pub fn info(&self, template: &str, args: &[Value]) {
        self.log(Severity::Info, template, args);
    }

    #[inline]
    pub fn warning(&self, template: &str, args: &[Value]) {
        self.log(Severity::Warning, template, args);
    }

    #[inline]
    pub fn error(&self, template: &str, args: &[Value]) {
        self.log(Severity::Error, template, args);
    }

    #[inline]
    pub fn fatal(&self, template: &str, args: &[Value]) {
        self.log(Severity::Fatal, template, args);
    }

    pub fn flush(&self) -> Result<()> {
        let state = self.state.read();
        for (id, destination) in &state.destinations {
            destination.writer.lock().flush().map_err(|e| {
                LoggerError::io_operation("flushing destination", id.to_string(), e)
            })?;
        }
        Ok(())
    }

    fn terminate(&self) {
        match &self.on_fatal {
            Some(callback) => callback(self.exit_code),
            None => std::process::exit(self.exit_code),
        }
    }
}

impl fmt::Debug for Logger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = self.state.read();
        f.debug_struct("Logger")
            .field("level", &state.level)
            .field("color_enabled", &state.color_enabled)
            .field("destinations", &state.destinations.keys().collect::<Vec<_>>())
            .field("timestamp_format", &self.timestamp_format)
            .field("exit_code", &self.exit_code)
            .field("terminated", &self.is_terminated())
            .finish()
    }
}

/// Builder for constructing a standalone Logger with a fluent API
///
/// # Example
/// ```
/// use leveled_logger::prelude::*;
///
/// let capture = MemorySink::new();
/// let logger = Logger::builder()
///     .level(Severity::Warning)
///     .color_enabled(false)
///     .primary(capture.clone())
///     .build();
///
/// logger.warning("disk at {0}%\n", &[93.into()]);
/// assert!(capture.contents_string().ends_with("[warning] disk at 93%\n"));
/// ```
pub struct LoggerBuilder {
    level: i32,
    color_enabled: bool,
    primary: Option<Sink>,
    timestamp_format: TimestampFormat,
    exit_code: i32,
    on_fatal: Option<FatalCallback>,
}

impl LoggerBuilder {
    /// Create a new builder with default values
    pub fn new() -> Self {
        Self {
            level: Severity::Info.rank(),
            color_enabled: true,
            primary: None,
            timestamp_format: TimestampFormat::default(),
            exit_code: DEFAULT_FATAL_EXIT_CODE,
            on_fatal: None,
        }
    }

    /// Start from a loaded configuration
    pub fn from_config(config: &LoggerConfig) -> Self {
        Self::new()
            .level(config.level)
            .color_enabled(config.color)
            .timestamp_format(config.timestamp.clone())
            .fatal_exit_code(config.exit_code)
    }

    #[must_use = "builder methods return a new value"]
    pub fn level(mut self, level: Severity) -> Self {
        self.level = level.rank();
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn level_rank(mut self, rank: i32) -> Self {
        self.level = rank;
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn color_enabled(mut self, enabled: bool) -> Self {
        self.color_enabled = enabled;
        self
    }

    /// Set the primary destination. Defaults to stdout.
    #[must_use = "builder methods return a new value"]
    pub fn primary<W: Write + Send + 'static>(mut self, sink: W) -> Self {
        self.primary = Some(Box::new(sink));
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn timestamp_format(mut self, format: TimestampFormat) -> Self {
        self.timestamp_format = format;
        self
    }

    /// Exit code for fatal records (default 0)
    #[must_use = "builder methods return a new value"]
    pub fn fatal_exit_code(mut self, code: i32) -> Self {
        self.exit_code = code;
        self
    }

    /// Replace process exit on fatal records with a callback.
    ///
    /// # Example
    ///
    /// ```
    /// use leveled_logger::prelude::*;
    /// use std::sync::atomic::{AtomicI32, Ordering};
    /// use std::sync::Arc;
    ///
    /// let seen = Arc::new(AtomicI32::new(-1));
    /// let seen_clone = Arc::clone(&seen);
    /// let logger = Logger::builder()
    ///     .primary(MemorySink::new())
    ///     .fatal_exit_code(3)
    ///     .on_fatal(Arc::new(move |code| seen_clone.store(code, Ordering::SeqCst)))
    ///     .build();
    ///
    /// logger.fatal("giving up\n", &[]);
    /// assert_eq!(seen.load(Ordering::SeqCst), 3);
    /// assert!(logger.is_terminated());
    /// ```
    #[must_use = "builder methods return a new value"]
    pub fn on_fatal(mut self, callback: FatalCallback) -> Self {
        self.on_fatal = Some(callback);
        self
    }

    /// Build the Logger
    pub fn build(self) -> Logger {
        let primary: Sink = match self.primary {
            Some(sink) => sink,
            None => Box::new(ConsoleSink::stdout()),
        };

        let mut destinations = BTreeMap::new();
        destinations.insert(
            SinkId::PRIMARY,
            Destination {
                colorable: true,
                writer: Mutex::new(primary),
            },
        );

        Logger {
            state: RwLock::new(LoggerState {
                level: self.level,
                color_enabled: self.color_enabled,
                destinations,
            }),
            next_id: AtomicU64::new(1),
            timestamp_format: self.timestamp_format,
            exit_code: self.exit_code,
            on_fatal: self.on_fatal,
            terminated: AtomicBool::new(false),
            metrics: LoggerMetrics::new(),
        }
    }
}

impl Default for LoggerBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl Logger {
    /// Create a builder for a standalone Logger
    #[must_use]
    pub fn builder() -> LoggerBuilder {
        LoggerBuilder::new()
    }
}
