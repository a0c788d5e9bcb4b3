//! Capture front-ends
//!
//! These are what the logging macros expand to. Both styles resolve the target
//! logger and check its floor up front; when the record would be filtered out
//! (or the logger does not exist) they become inert and skip all formatting.
//!
//! - [`LogFormat`] formats `format_args!` output in one go.
//! - [`LogStream`] and [`WideLogStream`] accumulate pieces and push the record
//!   when flushed or dropped, whichever comes first.

use std::fmt::{self, Display, Write as _};
use std::mem;
use std::sync::Arc;

use crate::level::Level;
use crate::logger::Logger;
use crate::record::{
    current_thread_id, DebugRecord, Record, Timestamp, WideDebugRecord, WideRecord,
};
use crate::registry::Registry;
use crate::transcode::to_wide;

const INITIAL_CAPACITY: usize = 256;

/// Whether the logging macros attach the call site to records.
///
/// Decided by this crate's `cancel-verbose` feature, not the caller's.
pub const CAPTURE_LOCATION: bool = !cfg!(feature = "cancel-verbose");

/// Something that names a logger.
///
/// Names are looked up in the global [`Registry`].
pub trait IntoLogger {
    fn into_logger(self) -> Option<Arc<Logger>>;
}

impl IntoLogger for Arc<Logger> {
    fn into_logger(self) -> Option<Arc<Logger>> {
        Some(self)
    }
}

impl IntoLogger for &Arc<Logger> {
    fn into_logger(self) -> Option<Arc<Logger>> {
        Some(self.clone())
    }
}

impl IntoLogger for Option<Arc<Logger>> {
    fn into_logger(self) -> Option<Arc<Logger>> {
        self
    }
}

impl IntoLogger for &str {
    fn into_logger(self) -> Option<Arc<Logger>> {
        Registry::instance().get_logger(self)
    }
}

impl IntoLogger for &String {
    fn into_logger(self) -> Option<Arc<Logger>> {
        self.as_str().into_logger()
    }
}

/// The global registry's default logger.
#[derive(Clone, Copy, Debug, Default)]
pub struct DefaultTarget;

impl IntoLogger for DefaultTarget {
    fn into_logger(self) -> Option<Arc<Logger>> {
        Registry::instance().get_default_logger()
    }
}

/// Source position of a logging call.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Location {
    pub file: &'static str,
    pub line: u32,
    pub func: &'static str,
}

impl Location {
    pub const fn new(file: &'static str, line: u32, func: &'static str) -> Self {
        Self { file, line, func }
    }
}

/// Everything about a record except its message, fixed when capture starts.
struct Capture {
    logger: Arc<Logger>,
    level: Level,
    timestamp: Timestamp,
    thread_id: u64,
    location: Option<Location>,
}

impl Capture {
    fn start(target: impl IntoLogger, level: Level) -> Option<Self> {
        let logger = target.into_logger()?;
        if !logger.consume(level) {
            return None;
        }
        Some(Self {
            logger,
            level,
            timestamp: Timestamp::now(),
            thread_id: current_thread_id(),
            location: None,
        })
    }

    fn push(self, message: String) {
        let record = Record::from_parts(self.timestamp, self.level, self.thread_id, message);
        match self.location {
            Some(loc) => self
                .logger
                .push_record(&DebugRecord::new(record, loc.file, loc.line, loc.func)),
            None => self.logger.push_record(&record),
        }
    }

    fn push_wide(self, message: Vec<u16>) {
        let record = WideRecord {
            timestamp: self.timestamp,
            level: self.level,
            thread_id: self.thread_id,
            message,
        };
        match self.location {
            Some(loc) => self.logger.push_record(&WideDebugRecord {
                record,
                file: to_wide(loc.file),
                line: loc.line,
                func: to_wide(loc.func),
            }),
            None => self.logger.push_record(&record),
        }
    }
}

/// Format-string capture.
#[must_use = "nothing is logged until `emit` is called"]
pub struct LogFormat {
    capture: Option<Capture>,
}

impl LogFormat {
    pub fn new(target: impl IntoLogger, level: Level) -> Self {
        Self {
            capture: Capture::start(target, level),
        }
    }

    pub fn disabled() -> Self {
        Self { capture: None }
    }

    pub fn with_location(mut self, location: Option<Location>) -> Self {
        if let Some(capture) = self.capture.as_mut() {
            capture.location = location;
        }
        self
    }

    /// False when the record would be dropped anyway.
    pub fn is_enabled(&self) -> bool {
        self.capture.is_some()
    }

    /// Format `args` and push the record.
    ///
    /// A `Display` impl that reports an error yields an empty message.
    pub fn emit(self, args: fmt::Arguments<'_>) {
        let Some(capture) = self.capture else {
            return;
        };
        let mut message = String::with_capacity(INITIAL_CAPACITY);
        if fmt::write(&mut message, args).is_err() {
            message.clear();
        }
        capture.push(message);
    }
}

/// Stream-style capture of a UTF-8 message.
///
/// ```ignore
/// logs!(Level::Info).append("loaded ").append(count).append(" items");
///
/// let mut stream = logs!(target: "net", Level::Debug);
/// write!(stream, "{peer} sent {n} bytes")?;
/// // pushed here, when `stream` goes out of scope
/// ```
pub struct LogStream {
    capture: Option<Capture>,
    buf: String,
    failed: bool,
}

impl LogStream {
    pub fn new(target: impl IntoLogger, level: Level) -> Self {
        let capture = Capture::start(target, level);
        let buf = if capture.is_some() {
            String::with_capacity(INITIAL_CAPACITY)
        } else {
            String::new()
        };
        Self {
            capture,
            buf,
            failed: false,
        }
    }

    /// A stream that does nothing unless `cond` holds.
    pub fn new_if(cond: bool, target: impl IntoLogger, level: Level) -> Self {
        if cond {
            Self::new(target, level)
        } else {
            Self::disabled()
        }
    }

    pub fn disabled() -> Self {
        Self {
            capture: None,
            buf: String::new(),
            failed: false,
        }
    }

    pub fn with_location(mut self, location: Option<Location>) -> Self {
        if let Some(capture) = self.capture.as_mut() {
            capture.location = location;
        }
        self
    }

    pub fn is_enabled(&self) -> bool {
        self.capture.is_some()
    }

    /// Text buffered so far.
    pub fn buffer(&self) -> &str {
        &self.buf
    }

    /// Append `value`. A `Display` error empties the final message.
    pub fn append(mut self, value: impl Display) -> Self {
        if self.capture.is_some() {
            let _ = write!(self, "{value}");
        }
        self
    }

    /// Push the record now instead of at drop.
    pub fn flush(mut self) {
        self.push();
    }

    fn push(&mut self) {
        if let Some(capture) = self.capture.take() {
            let message = mem::take(&mut self.buf);
            capture.push(if self.failed { String::new() } else { message });
        }
    }
}

impl fmt::Write for LogStream {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        if self.capture.is_some() {
            self.buf.push_str(s);
        }
        Ok(())
    }

    fn write_fmt(&mut self, args: fmt::Arguments<'_>) -> fmt::Result {
        let result = fmt::write(self, args);
        self.failed |= result.is_err();
        result
    }
}

impl Drop for LogStream {
    fn drop(&mut self) {
        self.push();
    }
}

/// Stream-style capture of a UTF-16 message.
pub struct WideLogStream {
    capture: Option<Capture>,
    buf: Vec<u16>,
    failed: bool,
}

impl WideLogStream {
    pub fn new(target: impl IntoLogger, level: Level) -> Self {
        Self {
            capture: Capture::start(target, level),
            buf: Vec::new(),
            failed: false,
        }
    }

    pub fn new_if(cond: bool, target: impl IntoLogger, level: Level) -> Self {
        if cond {
            Self::new(target, level)
        } else {
            Self::disabled()
        }
    }

    pub fn disabled() -> Self {
        Self {
            capture: None,
            buf: Vec::new(),
            failed: false,
        }
    }

    pub fn with_location(mut self, location: Option<Location>) -> Self {
        if let Some(capture) = self.capture.as_mut() {
            capture.location = location;
        }
        self
    }

    pub fn is_enabled(&self) -> bool {
        self.capture.is_some()
    }

    pub fn append(mut self, value: impl Display) -> Self {
        if self.capture.is_some() {
            let _ = write!(self, "{value}");
        }
        self
    }

    /// Append UTF-16 text as-is.
    pub fn append_wide(mut self, units: &[u16]) -> Self {
        if self.capture.is_some() {
            self.buf.extend_from_slice(units);
        }
        self
    }

    pub fn flush(mut self) {
        self.push();
    }

    fn push(&mut self) {
        if let Some(capture) = self.capture.take() {
            let message = mem::take(&mut self.buf);
            capture.push_wide(if self.failed { Vec::new() } else { message });
        }
    }
}

impl fmt::Write for WideLogStream {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        if self.capture.is_some() {
            self.buf.extend(s.encode_utf16());
        }
        Ok(())
    }

    fn write_fmt(&mut self, args: fmt::Arguments<'_>) -> fmt::Result {
        let result = fmt::write(self, args);
        self.failed |= result.is_err();
        result
    }
}

impl Drop for WideLogStream {
    fn drop(&mut self) {
        self.push();
    }
}
