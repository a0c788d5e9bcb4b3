//! Sinks: where formatted records end up
//!
//! Every built-in sink is a [`BasicSink`], which owns the write path:
//!
//! 1. drop the record if it is below the sink's floor
//! 2. format it with the sink's [`Layout`]
//! 3. [`WriteHooks::before_write`] turns the text into bytes (outside the lock)
//! 4. lock the [`Destination`], then run `before_writing`, `writing` and
//!    `after_writing`
//! 5. unlock, then [`WriteHooks::after_write`]
//!
//! Only step 4 is serialized, so expensive transforms never hold up other
//! threads writing to the same sink. A destination that fails is reported
//! through `tracing` and the record is dropped; nothing reaches the caller.
//!
//! Custom destinations implement [`Destination`] and wrap it in a
//! `BasicSink`; anything else can implement [`Sink`] directly.

mod console;
mod debug_console;
mod file;

pub use console::{ConsoleDestination, ConsoleSink, ConsoleStream};
pub use debug_console::{DebugConsoleDestination, DebugConsoleSink};
pub use file::{FileDestination, FileSink, FileSinkBuilder, Utf8FileSink, DEFAULT_MAX_FILE_SIZE};

use std::io::{self, Write};
use std::sync::atomic::{AtomicBool, Ordering};

use parking_lot::Mutex;

use crate::layout::{DefaultLayout, Layout};
use crate::level::{AtomicLevel, Level};
use crate::record::{DebugRecord, Record};
use crate::transcode::{encode, Encoding};

/// A consumer of log records.
///
/// Sinks are shared between threads and between the logger and the caller,
/// so every method takes `&self`.
pub trait Sink: Send + Sync {
    /// Whether the destination can currently accept writes.
    fn is_open(&self) -> bool;

    fn level(&self) -> Level;

    /// Set this sink's floor, independent of any logger's floor.
    fn set_level(&self, level: Level);

    fn is_verbose(&self) -> bool;

    /// Include the source-location line for debug records.
    fn set_verbose(&self, verbose: bool);

    fn consume(&self, record: &Record);

    fn consume_debug(&self, record: &DebugRecord);
}

/// The locked part of a sink: the thing that actually holds a file or stream.
///
/// All methods run while the sink's mutex is held. Keep them short.
pub trait Destination: Send + 'static {
    fn is_open(&self) -> bool;

    /// Runs before `writing`; `pending` is the byte length about to be written.
    fn before_writing(&mut self, _level: Level, _pending: usize) {}

    fn writing(&mut self, level: Level, bytes: &[u8]) -> io::Result<()>;

    fn after_writing(&mut self, _level: Level) {}
}

/// The unlocked part of a sink's write path.
pub trait WriteHooks: Send + Sync + 'static {
    /// Convert formatted text into the bytes handed to the destination.
    fn before_write(&self, text: String) -> Vec<u8> {
        text.into_bytes()
    }

    /// Runs after the lock is released; `written` is the byte count handed over.
    fn after_write(&self, _level: Level, _written: usize) {}
}

/// Hooks that pass text through as UTF-8.
#[derive(Clone, Copy, Debug, Default)]
pub struct Utf8Text;

impl WriteHooks for Utf8Text {}

impl WriteHooks for Encoding {
    fn before_write(&self, text: String) -> Vec<u8> {
        match self {
            Encoding::Utf8 => text.into_bytes(),
            other => encode(&text, *other),
        }
    }
}

/// A sink built from a destination, hooks and a layout.
pub struct BasicSink<D, H = Utf8Text> {
    level: AtomicLevel,
    verbose: AtomicBool,
    open: AtomicBool,
    layout: Box<dyn Layout>,
    hooks: H,
    dest: Mutex<D>,
}

impl<D: Destination> BasicSink<D, Utf8Text> {
    pub fn new(dest: D) -> Self {
        Self::with_hooks(dest, Utf8Text)
    }
}

impl<D: Destination, H: WriteHooks> BasicSink<D, H> {
    pub fn with_hooks(dest: D, hooks: H) -> Self {
        let open = dest.is_open();
        Self {
            level: AtomicLevel::default(),
            verbose: AtomicBool::new(cfg!(feature = "verbose")),
            open: AtomicBool::new(open),
            layout: Box::new(DefaultLayout::new()),
            hooks,
            dest: Mutex::new(dest),
        }
    }

    /// Replace the default layout.
    pub fn with_layout(mut self, layout: impl Layout + 'static) -> Self {
        self.layout = Box::new(layout);
        self
    }

    /// Builder form of [`Sink::set_level`].
    pub fn with_level(self, level: Level) -> Self {
        self.level.set(level);
        self
    }

    pub fn hooks(&self) -> &H {
        &self.hooks
    }

    /// Run `f` with the destination locked.
    pub fn with_destination<R>(&self, f: impl FnOnce(&mut D) -> R) -> R {
        let mut dest = self.dest.lock();
        f(&mut dest)
    }

    fn write(&self, level: Level, text: String) {
        let bytes = self.hooks.before_write(text);
        let written = bytes.len();

        {
            let mut dest = self.dest.lock();
            if !dest.is_open() {
                self.open.store(false, Ordering::Relaxed);
                return;
            }
            dest.before_writing(level, written);
            if dest.is_open() {
                if let Err(e) = dest.writing(level, &bytes) {
                    tracing::debug!(error = %e, "log write failed, record dropped");
                }
            }
            dest.after_writing(level);
            self.open.store(dest.is_open(), Ordering::Relaxed);
        }

        self.hooks.after_write(level, written);
    }
}

impl<D: Destination, H: WriteHooks> Sink for BasicSink<D, H> {
    fn is_open(&self) -> bool {
        self.open.load(Ordering::Relaxed)
    }

    fn level(&self) -> Level {
        self.level.get()
    }

    fn set_level(&self, level: Level) {
        self.level.set(level);
    }

    fn is_verbose(&self) -> bool {
        self.verbose.load(Ordering::Relaxed)
    }

    fn set_verbose(&self, verbose: bool) {
        self.verbose.store(verbose, Ordering::Relaxed);
    }

    fn consume(&self, record: &Record) {
        if !self.level.allows(record.level()) {
            return;
        }
        let text = self.layout.format(record);
        self.write(record.level(), text);
    }

    fn consume_debug(&self, record: &DebugRecord) {
        if !self.level.allows(record.level()) {
            return;
        }
        let text = self.layout.format_debug(record, self.is_verbose());
        self.write(record.level(), text);
    }
}

/// Destination writing to any `io::Write`, flushing after every record.
pub struct WriterDestination<W> {
    writer: W,
}

impl<W: Write + Send + 'static> WriterDestination<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }

    pub fn get_ref(&self) -> &W {
        &self.writer
    }
}

impl<W: Write + Send + 'static> Destination for WriterDestination<W> {
    fn is_open(&self) -> bool {
        true
    }

    fn writing(&mut self, _level: Level, bytes: &[u8]) -> io::Result<()> {
        self.writer.write_all(bytes)?;
        self.writer.flush()
    }
}

/// Sink writing plain text into any writer.
pub type WriterSink<W> = BasicSink<WriterDestination<W>>;

impl<W: Write + Send + 'static> WriterSink<W> {
    pub fn from_writer(writer: W) -> Self {
        Self::new(WriterDestination::new(writer))
    }
}
