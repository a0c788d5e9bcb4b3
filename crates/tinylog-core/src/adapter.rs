//! Bridge between a logger and the sinks attached to it.
//!
//! Sinks only understand UTF-8 records. A [`SinkAdapter`] accepts both the
//! UTF-8 and the UTF-16 record forms and converts the latter on the way
//! through, so loggers and callers never need width-specific code.

use std::sync::Arc;

use crate::level::Level;
use crate::record::{DebugRecord, Record, WideDebugRecord, WideRecord};
use crate::sink::Sink;

#[derive(Clone)]
pub struct SinkAdapter {
    sink: Arc<dyn Sink>,
}

impl SinkAdapter {
    pub fn new(sink: Arc<dyn Sink>) -> Self {
        Self { sink }
    }

    pub fn sink(&self) -> &Arc<dyn Sink> {
        &self.sink
    }

    pub fn is_open(&self) -> bool {
        self.sink.is_open()
    }

    pub fn consume(&self, record: &Record) {
        self.sink.consume(record);
    }

    pub fn consume_debug(&self, record: &DebugRecord) {
        self.sink.consume_debug(record);
    }

    pub fn consume_wide(&self, record: &WideRecord) {
        self.sink.consume(&record.to_narrow());
    }

    /// Converts the message, file and function fields.
    pub fn consume_wide_debug(&self, record: &WideDebugRecord) {
        self.sink.consume_debug(&record.to_narrow());
    }
}

mod private {
    pub trait Sealed {}

    impl Sealed for crate::record::Record {}
    impl Sealed for crate::record::DebugRecord {}
    impl Sealed for crate::record::WideRecord {}
    impl Sealed for crate::record::WideDebugRecord {}
}

/// A record form a logger can push to its adapters.
pub trait Deliver: private::Sealed {
    fn level(&self) -> Level;

    fn deliver(&self, adapter: &SinkAdapter);
}

impl Deliver for Record {
    fn level(&self) -> Level {
        Record::level(self)
    }

    fn deliver(&self, adapter: &SinkAdapter) {
        adapter.consume(self);
    }
}

impl Deliver for DebugRecord {
    fn level(&self) -> Level {
        self.record().level()
    }

    fn deliver(&self, adapter: &SinkAdapter) {
        adapter.consume_debug(self);
    }
}

impl Deliver for WideRecord {
    fn level(&self) -> Level {
        self.level
    }

    fn deliver(&self, adapter: &SinkAdapter) {
        adapter.consume_wide(self);
    }
}

impl Deliver for WideDebugRecord {
    fn level(&self) -> Level {
        self.record.level
    }

    fn deliver(&self, adapter: &SinkAdapter) {
        adapter.consume_wide_debug(self);
    }
}
