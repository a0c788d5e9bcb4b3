//! TinyLog Core Library
//!
//! Lightweight embeddable logging: named loggers, multiple sinks per logger,
//! severity filtering and size-bounded file rotation.
//!
//! ## Overview
//!
//! A record travels through the pipeline like this:
//!
//! ```text
//! logf!/logs!  ->  Logger (floor)  ->  SinkAdapter  ->  Sink (floor, layout, lock)  ->  destination
//! ```
//!
//! - **Registry**: process-wide directory of named loggers
//! - **Logger**: severity floor plus an ordered list of sinks
//! - **Sink**: console, rotating file, UTF-8 file or debugger output, each
//!   with its own floor and its own lock
//! - **Capture front-ends**: the macros, which skip all formatting when a
//!   record would be filtered out
//!
//! Logging never fails: a sink that cannot write drops the record and reports
//! the problem through `tracing`. Only setup (creating loggers, loading
//! configuration) returns [`LogError`].
//!
//! ## Quick Start
//!
//! ```ignore
//! use tinylog_core::sink::{ConsoleSink, FileSink};
//! use tinylog_core::{log_info, logf, logs, Level, Logger, Registry};
//!
//! fn main() -> Result<(), tinylog_core::LogError> {
//!     let logger = Registry::instance().create_default_logger()?;
//!     logger.set_level(Level::Debug);
//!     logger.create_sink(ConsoleSink::stdout());
//!     let file = logger.create_sink(FileSink::builder("app.log").max_file_size(1 << 20).build());
//!     file.set_level(Level::Warn);
//!
//!     logs!(Level::Info).append(Logger::title_default());
//!     log_info!("started with {} workers", 4);
//!     logf!(Level::Warn, "disk {}% full", 91);
//!     Ok(())
//! }
//! ```
//!
//! ## Features
//!
//! - `color` (default): colored console output
//! - `verbose`: sinks start with source-location output enabled
//! - `cancel-verbose`: the macros never capture the call site
//! - `simplified-chinese`: localised level and location labels

#[macro_use]
mod macros;

pub mod adapter;
pub mod bridge;
pub mod capture;
pub mod config;
pub mod error;
pub mod layout;
pub mod level;
pub mod logger;
pub mod record;
pub mod registry;
pub mod sink;
pub mod title;
pub mod transcode;

// Re-exports
pub use adapter::SinkAdapter;
pub use bridge::TinylogLayer;
pub use capture::{IntoLogger, Location, LogFormat, LogStream, WideLogStream};
pub use config::LoggingConfig;
pub use error::{LogError, LogResult};
pub use layout::{DefaultLayout, Layout};
pub use level::Level;
pub use logger::Logger;
pub use record::{DebugRecord, Record, Timestamp};
pub use registry::{Registry, DEFAULT_LOGGER_NAME};
pub use sink::{ConsoleSink, DebugConsoleSink, FileSink, Sink, Utf8FileSink, WriterSink};
pub use transcode::Encoding;
