//! `tracing` integration.
//!
//! [`TinylogLayer`] forwards `tracing` events into a tinylog [`Logger`], so
//! libraries instrumented with `tracing` end up in the same sinks as the
//! application's own records.

use std::fmt::Write as FmtWrite;
use std::sync::Arc;

use tracing::field::{Field, Visit};
use tracing::{Event, Subscriber};
use tracing_subscriber::layer::Context;
use tracing_subscriber::registry::LookupSpan;
use tracing_subscriber::Layer;

use crate::level::Level;
use crate::logger::Logger;
use crate::record::{DebugRecord, Record};

/// Target prefix of tinylog's own diagnostics, never forwarded.
const OWN_TARGET: &str = "tinylog_core";

/// A tracing Layer that writes events through a tinylog logger.
pub struct TinylogLayer {
    logger: Arc<Logger>,
}

impl TinylogLayer {
    pub fn new(logger: Arc<Logger>) -> Self {
        Self { logger }
    }

    pub fn logger(&self) -> &Arc<Logger> {
        &self.logger
    }
}

fn map_level(level: &tracing::Level) -> Level {
    match *level {
        tracing::Level::TRACE => Level::Trace,
        tracing::Level::DEBUG => Level::Debug,
        tracing::Level::INFO => Level::Info,
        tracing::Level::WARN => Level::Warn,
        tracing::Level::ERROR => Level::Error,
    }
}

impl<S> Layer<S> for TinylogLayer
where
    S: Subscriber + for<'a> LookupSpan<'a>,
{
    fn on_event(&self, event: &Event<'_>, ctx: Context<'_, S>) {
        let metadata = event.metadata();

        // Our own diagnostics would recurse into the sinks that produced them.
        if metadata.target().starts_with(OWN_TARGET) {
            return;
        }

        let level = map_level(metadata.level());
        if !self.logger.consume(level) {
            return;
        }

        let mut visitor = MessageVisitor::default();
        event.record(&mut visitor);

        let mut message = String::new();
        if let Some(scope) = ctx.event_scope(event) {
            let spans: Vec<&str> = scope.from_root().map(|span| span.name()).collect();
            if !spans.is_empty() {
                message.push_str(&spans.join(" > "));
                message.push_str(": ");
            }
        }
        message.push_str(&visitor.message);
        message.push_str(&visitor.fields);

        let record = Record::new(level, message);
        match (metadata.file(), metadata.line()) {
            (Some(file), Some(line)) => {
                let func = metadata.module_path().unwrap_or_else(|| metadata.target());
                self.logger
                    .push_record(&DebugRecord::new(record, file, line, func));
            }
            _ => self.logger.push_record(&record),
        }
    }
}

/// Renders the `message` field plus ` key=value` for every other field.
#[derive(Default)]
struct MessageVisitor {
    message: String,
    fields: String,
}

impl Visit for MessageVisitor {
    fn record_debug(&mut self, field: &Field, value: &dyn std::fmt::Debug) {
        if field.name() == "message" {
            let _ = write!(&mut self.message, "{:?}", value);
        } else {
            let _ = write!(&mut self.fields, " {}={:?}", field.name(), value);
        }
    }

    fn record_str(&mut self, field: &Field, value: &str) {
        if field.name() == "message" {
            self.message.push_str(value);
        } else {
            let _ = write!(&mut self.fields, " {}={}", field.name(), value);
        }
    }

    fn record_error(&mut self, field: &Field, value: &(dyn std::error::Error + 'static)) {
        let _ = write!(&mut self.fields, " {}={}", field.name(), value);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::{DefaultLayout, Field as LayoutField};
    use crate::sink::tests::SharedBuf;
    use crate::sink::{Sink, WriterSink};
    use tracing_subscriber::prelude::*;

    fn logger_with_buf(level: Level) -> (Arc<Logger>, SharedBuf) {
        let logger = Arc::new(Logger::with_level("bridge", level));
        let buf = SharedBuf::default();
        let sink = logger.create_sink(
            WriterSink::from_writer(buf.clone()).with_layout(
                DefaultLayout::new().with_fields([LayoutField::Level, LayoutField::Message]),
            ),
        );
        sink.set_verbose(false);
        (logger, buf)
    }

    #[test]
    fn test_layer_forwards_events() {
        let (logger, buf) = logger_with_buf(Level::Info);
        let subscriber = tracing_subscriber::registry().with(TinylogLayer::new(logger));

        tracing::subscriber::with_default(subscriber, || {
            // Events from this module would carry a tinylog_core target.
            tracing::debug!(target: "app", "filtered by logger floor");
            tracing::info!(target: "app", "Test message");
            tracing::warn!(target: "app", count = 42, "Warning with field");
        });

        let content = buf.contents();
        let lines: Vec<_> = content.lines().collect();
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0], format!("[{}] Test message", Level::Info.label()));
        assert_eq!(
            lines[1],
            format!("[{}] Warning with field count=42", Level::Warn.label())
        );
    }

    #[test]
    fn test_layer_prefixes_span_scope() {
        let (logger, buf) = logger_with_buf(Level::Trace);
        let subscriber = tracing_subscriber::registry().with(TinylogLayer::new(logger));

        tracing::subscriber::with_default(subscriber, || {
            let outer = tracing::info_span!("request");
            let _outer = outer.enter();
            let inner = tracing::info_span!("db");
            let _inner = inner.enter();
            tracing::error!(target: "app", "timeout");
        });

        assert!(buf.contents().ends_with("] request > db: timeout\n"));
    }

    #[test]
    fn test_own_diagnostics_are_skipped() {
        let (logger, buf) = logger_with_buf(Level::Trace);
        let subscriber = tracing_subscriber::registry().with(TinylogLayer::new(logger));

        tracing::subscriber::with_default(subscriber, || {
            tracing::warn!(target: "tinylog_core::sink", "cannot open log file");
        });

        assert_eq!(buf.contents(), "");
    }
}
