//! The logging facade.
//!
//! [`Logger`] is an explicitly constructed, cheaply cloneable handle: defaults
//! are assembled once by [`LoggerBuilder`] at startup and the handle is passed
//! down to call sites; there is no process-wide mutable logger state.
//!
//! Per log call, the facade scrubs the free-form payload, looks up the active
//! trace context on the calling thread, encodes one JSON record, and fans it
//! out to every configured sink. Sink failures are reported on the process
//! diagnostic channel and never surface to the caller.

mod record;

use std::error::Error;
use std::fmt;
use std::sync::Arc;

use crate::scrub::{FaultPolicy, FieldSet, Fields, Scrubber};
use crate::sink::{ConsoleSink, Sink};
use crate::trace::TraceContext;

// =============================================================================
// Level
// =============================================================================

/// Log severity, in ascending order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Level {
    Debug,
    Info,
    Warn,
    Error,
    Fatal,
}

impl Level {
    /// The lowercase name used in encoded records.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Debug => "debug",
            Self::Info => "info",
            Self::Warn => "warn",
            Self::Error => "error",
            Self::Fatal => "fatal",
        }
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// =============================================================================
// Logger
// =============================================================================

/// The structured logging facade.
///
/// ```
/// use scrublog::{Logger, MemorySink, fields};
///
/// let sink = MemorySink::new();
/// let logger = Logger::builder("auth-service", "test")
///     .scrub_fields(["password"])
///     .sink(sink.clone())
///     .build();
///
/// logger.info(
///     fields! { "username" => "bob", "password" => "hunter2" },
///     "login attempt",
/// );
///
/// let record = &sink.records()[0];
/// assert!(record.contains("\"password\":\"***scrubbed***\""));
/// assert!(!record.contains("hunter2"));
/// ```
#[derive(Clone)]
pub struct Logger {
    service: String,
    env: String,
    scrubber: Scrubber,
    sinks: Vec<Arc<dyn Sink>>,
    min_level: Level,
    pretty: bool,
}

impl Logger {
    /// Starts building a logger for the given service name and environment.
    pub fn builder(service: impl Into<String>, env: impl Into<String>) -> LoggerBuilder {
        LoggerBuilder::new(service, env)
    }

    /// The configured service name.
    #[must_use]
    pub fn service(&self) -> &str {
        &self.service
    }

    /// The configured environment name.
    #[must_use]
    pub fn env(&self) -> &str {
        &self.env
    }

    /// The scrubber applied to every payload.
    #[must_use]
    pub fn scrubber(&self) -> &Scrubber {
        &self.scrubber
    }

    /// Logs at debug severity.
    pub fn debug(&self, context: Fields, message: &str) {
        self.log(Level::Debug, None, context, message);
    }

    /// Logs at info severity.
    pub fn info(&self, context: Fields, message: &str) {
        self.log(Level::Info, None, context, message);
    }

    /// Logs at warn severity.
    pub fn warn(&self, context: Fields, message: &str) {
        self.log(Level::Warn, None, context, message);
    }

    /// Logs at error severity, attaching the error chain and a stack
    /// representation to the record.
    pub fn error(&self, err: &dyn Error, context: Fields, message: &str) {
        self.log(Level::Error, Some(err), context, message);
    }

    /// Logs at fatal severity.
    ///
    /// Unlike some logging libraries, this does not terminate the process;
    /// exiting is the caller's decision.
    pub fn fatal(&self, err: &dyn Error, context: Fields, message: &str) {
        self.log(Level::Fatal, Some(err), context, message);
    }

    /// Logs one record at the given severity.
    ///
    /// This is the primitive the severity methods delegate to. The payload is
    /// scrubbed, the active trace context (if any) is attached, and the
    /// encoded record is written to every sink. A failing sink is reported
    /// via `tracing::error!` and never fails the call.
    pub fn log(&self, level: Level, err: Option<&dyn Error>, context: Fields, message: &str) {
        if level < self.min_level {
            return;
        }

        let scrubbed = self.scrubber.scrub(&context.into_value());
        let line = record::encode(
            level,
            scrubbed.to_json(),
            &self.service,
            &self.env,
            message,
            TraceContext::current(),
            err,
            self.pretty,
        );

        for sink in &self.sinks {
            if let Err(error) = sink.write(&line) {
                tracing::error!(target: "scrublog", error = %error, "log sink write failed");
            }
        }
    }

    /// Flushes every sink. Failures are reported on the diagnostic channel.
    pub fn flush(&self) {
        for sink in &self.sinks {
            if let Err(error) = sink.flush() {
                tracing::error!(target: "scrublog", error = %error, "log sink flush failed");
            }
        }
    }
}

impl fmt::Debug for Logger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Logger")
            .field("service", &self.service)
            .field("env", &self.env)
            .field("min_level", &self.min_level)
            .field("sinks", &self.sinks.len())
            .finish_non_exhaustive()
    }
}

// =============================================================================
// LoggerBuilder
// =============================================================================

/// Assembles a [`Logger`].
///
/// Defaults: no scrubbed fields, fail-open fault policy, debug minimum level,
/// compact encoding, and, when no sink is registered, a stdout console sink.
pub struct LoggerBuilder {
    service: String,
    env: String,
    scrub_fields: Vec<String>,
    fault_policy: FaultPolicy,
    min_level: Level,
    pretty: bool,
    sinks: Vec<Arc<dyn Sink>>,
}

impl fmt::Debug for LoggerBuilder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LoggerBuilder")
            .field("service", &self.service)
            .field("env", &self.env)
            .field("scrub_fields", &self.scrub_fields)
            .field("min_level", &self.min_level)
            .finish_non_exhaustive()
    }
}

impl LoggerBuilder {
    fn new(service: impl Into<String>, env: impl Into<String>) -> Self {
        Self {
            service: service.into(),
            env: env.into(),
            scrub_fields: Vec::new(),
            fault_policy: FaultPolicy::default(),
            min_level: Level::Debug,
            pretty: false,
            sinks: Vec::new(),
        }
    }

    /// Sets the field names whose values are scrubbed from every payload.
    /// Names are matched case-insensitively.
    #[must_use]
    pub fn scrub_fields<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.scrub_fields.extend(names.into_iter().map(Into::into));
        self
    }

    /// Sets how the scrubber recovers from traversal faults.
    #[must_use]
    pub fn fault_policy(mut self, policy: FaultPolicy) -> Self {
        self.fault_policy = policy;
        self
    }

    /// Discards records below the given severity.
    #[must_use]
    pub fn min_level(mut self, level: Level) -> Self {
        self.min_level = level;
        self
    }

    /// Encodes records as indented, human-readable JSON.
    #[must_use]
    pub fn pretty(mut self, pretty: bool) -> Self {
        self.pretty = pretty;
        self
    }

    /// Registers a sink. Every record is written to all registered sinks.
    #[must_use]
    pub fn sink(mut self, sink: impl Sink + 'static) -> Self {
        self.sinks.push(Arc::new(sink));
        self
    }

    /// Finishes the logger.
    #[must_use]
    pub fn build(self) -> Logger {
        let sinks = if self.sinks.is_empty() {
            vec![Arc::new(ConsoleSink::stdout()) as Arc<dyn Sink>]
        } else {
            self.sinks
        };

        Logger {
            service: self.service,
            env: self.env,
            scrubber: Scrubber::new(FieldSet::new(self.scrub_fields))
                .with_fault_policy(self.fault_policy),
            sinks,
            min_level: self.min_level,
            pretty: self.pretty,
        }
    }
}
