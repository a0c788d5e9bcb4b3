//! Console sink with per-level colors.

use std::io::{self, Write};

use crate::level::Level;

use super::{BasicSink, Destination};

/// Standard stream a console sink writes to.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ConsoleStream {
    #[default]
    Stdout,
    Stderr,
}

pub struct ConsoleDestination {
    out: Box<dyn Write + Send>,
    color: bool,
}

impl ConsoleDestination {
    pub fn new(stream: ConsoleStream) -> Self {
        let out: Box<dyn Write + Send> = match stream {
            ConsoleStream::Stdout => Box::new(io::stdout()),
            ConsoleStream::Stderr => Box::new(io::stderr()),
        };
        Self::from_writer(out)
    }

    /// Console output redirected into `out`.
    pub fn from_writer(out: Box<dyn Write + Send>) -> Self {
        #[cfg(all(windows, feature = "color"))]
        {
            let _ = colored::control::set_virtual_terminal(true);
        }
        Self {
            out,
            color: cfg!(feature = "color"),
        }
    }

    pub fn color(&self) -> bool {
        self.color
    }

    /// Has no effect when built without the `color` feature.
    pub fn set_color(&mut self, color: bool) {
        self.color = color && cfg!(feature = "color");
    }
}

impl Destination for ConsoleDestination {
    fn is_open(&self) -> bool {
        true
    }

    fn writing(&mut self, level: Level, bytes: &[u8]) -> io::Result<()> {
        if self.color {
            let text = String::from_utf8_lossy(bytes);
            for line in text.split_inclusive('\n') {
                let body = line.strip_suffix('\n').unwrap_or(line);
                write!(self.out, "{}", paint(level, body))?;
                if body.len() != line.len() {
                    self.out.write_all(b"\n")?;
                }
            }
        } else {
            self.out.write_all(bytes)?;
        }
        self.out.flush()
    }
}

#[cfg(feature = "color")]
fn paint(level: Level, line: &str) -> colored::ColoredString {
    use colored::Colorize;

    match level {
        Level::Trace => line.white(),
        Level::Debug => line.cyan(),
        Level::Info => line.green(),
        Level::Warn => line.yellow().bold(),
        Level::Error => line.red().bold(),
        Level::Fatal => line.white().on_red().bold(),
    }
}

#[cfg(not(feature = "color"))]
fn paint(_level: Level, line: &str) -> &str {
    line
}

/// Sink writing to standard output or standard error.
pub type ConsoleSink = BasicSink<ConsoleDestination>;

impl ConsoleSink {
    pub fn stdout() -> Self {
        Self::new(ConsoleDestination::new(ConsoleStream::Stdout))
    }

    pub fn stderr() -> Self {
        Self::new(ConsoleDestination::new(ConsoleStream::Stderr))
    }

    /// Console formatting into an arbitrary writer.
    pub fn to_writer(out: impl Write + Send + 'static) -> Self {
        Self::new(ConsoleDestination::from_writer(Box::new(out)))
    }

    pub fn set_color(&self, color: bool) {
        self.with_destination(|dest| dest.set_color(color));
    }

    pub fn is_color(&self) -> bool {
        self.with_destination(|dest| dest.color())
    }
}
