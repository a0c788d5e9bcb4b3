//! Named loggers
//!
//! A [`Logger`] owns a severity floor and an ordered list of sinks. Front-ends
//! ask [`Logger::consume`] before building a record and then hand it to
//! [`Logger::push_record`], which fans it out to every open sink in the order
//! the sinks were attached.

use std::fmt;
use std::sync::Arc;

use parking_lot::RwLock;

use crate::adapter::{Deliver, SinkAdapter};
use crate::level::{AtomicLevel, Level};
use crate::record::Record;
use crate::sink::Sink;
use crate::title::{self, DEFAULT_TITLE};
use crate::transcode::to_wide;

pub struct Logger {
    name: String,
    level: AtomicLevel,
    adapters: RwLock<Vec<SinkAdapter>>,
}

impl Logger {
    /// A logger with no sinks that accepts every level.
    pub fn new(name: impl Into<String>) -> Self {
        Self::with_level(name, Level::Trace)
    }

    pub fn with_level(name: impl Into<String>, level: Level) -> Self {
        Self {
            name: name.into(),
            level: AtomicLevel::new(level),
            adapters: RwLock::new(Vec::new()),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn level(&self) -> Level {
        self.level.get()
    }

    /// Change the floor. Records already pushed are unaffected.
    pub fn set_level(&self, level: Level) {
        self.level.set(level);
    }

    /// Attach `sink` and return a handle for further tuning.
    ///
    /// The sink is attached before the handle is returned.
    pub fn create_sink<S: Sink + 'static>(&self, sink: S) -> Arc<S> {
        self.add_sink(Arc::new(sink))
    }

    /// Attach a sink that was built and shared elsewhere.
    pub fn add_sink<S: Sink + 'static>(&self, sink: Arc<S>) -> Arc<S> {
        self.adapters.write().push(SinkAdapter::new(sink.clone()));
        sink
    }

    /// Attach a type-erased sink.
    pub fn add_dyn_sink(&self, sink: Arc<dyn Sink>) {
        self.adapters.write().push(SinkAdapter::new(sink));
    }

    pub fn sink_count(&self) -> usize {
        self.adapters.read().len()
    }

    /// Whether a record at `level` passes this logger's floor.
    pub fn consume(&self, level: Level) -> bool {
        self.level.allows(level)
    }

    /// Deliver `record` to every open sink.
    ///
    /// No floor check happens here; callers check [`consume`](Self::consume)
    /// first. Each sink still applies its own floor.
    pub fn push_record<R: Deliver>(&self, record: &R) {
        let adapters = self.adapters.read_recursive();
        for adapter in adapters.iter() {
            if adapter.is_open() {
                record.deliver(adapter);
            }
        }
    }

    /// Build and push a record if `level` passes the floor.
    pub fn log(&self, level: Level, message: impl Into<String>) {
        if self.consume(level) {
            self.push_record(&Record::new(level, message));
        }
    }

    /// Banner text for marking the start of a session.
    pub fn title(text: &str) -> String {
        title::title(text)
    }

    /// Banner as UTF-16 text.
    pub fn title_wide(text: &[u16]) -> Vec<u16> {
        to_wide(&title::title_wide(text))
    }

    pub fn title_default() -> String {
        title::title(DEFAULT_TITLE)
    }
}

impl fmt::Debug for Logger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Logger")
            .field("name", &self.name)
            .field("level", &self.level())
            .field("sinks", &self.sink_count())
            .finish()
    }
}
