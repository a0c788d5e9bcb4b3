//! Debugger output sink.
//!
//! On Windows records go to `OutputDebugStringW`, visible in an attached
//! debugger or DebugView. Other platforms have no such channel, so the text
//! goes to standard error instead.

use std::io;

use crate::level::Level;

use super::{BasicSink, Destination};

#[derive(Debug, Default)]
pub struct DebugConsoleDestination;

impl Destination for DebugConsoleDestination {
    fn is_open(&self) -> bool {
        true
    }

    fn writing(&mut self, _level: Level, bytes: &[u8]) -> io::Result<()> {
        output_debug_string(bytes)
    }
}

#[cfg(windows)]
fn output_debug_string(bytes: &[u8]) -> io::Result<()> {
    #[link(name = "kernel32")]
    extern "system" {
        fn OutputDebugStringW(output: *const u16);
    }

    let mut wide = crate::transcode::to_wide(&String::from_utf8_lossy(bytes));
    wide.push(0);
    // SAFETY: `wide` is NUL-terminated and outlives the call.
    unsafe { OutputDebugStringW(wide.as_ptr()) };
    Ok(())
}

#[cfg(not(windows))]
fn output_debug_string(bytes: &[u8]) -> io::Result<()> {
    use std::io::Write;

    let mut err = io::stderr().lock();
    err.write_all(bytes)?;
    err.flush()
}

/// Sink writing to the platform debug output.
pub type DebugConsoleSink = BasicSink<DebugConsoleDestination>;

impl DebugConsoleSink {
    pub fn open() -> Self {
        Self::new(DebugConsoleDestination)
    }
}
