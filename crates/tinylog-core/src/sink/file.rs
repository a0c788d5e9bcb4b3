//! Rotating file sinks.
//!
//! A file sink appends to one path. When the next record would bring the
//! file to `max_file_size` bytes or more, the file is closed, renamed to
//! `<path>.bak` (replacing any older backup) and reopened empty. A record is
//! never split, so the file can exceed the cap by at most one record, and only
//! when that record alone is larger than the cap.
//!
//! If the rename fails, writing continues in the live file and the next
//! attempt waits until another `max_file_size` bytes have been appended.

use std::ffi::OsString;
use std::fs::{self, File, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use crate::level::Level;
use crate::transcode::Encoding;

use super::{BasicSink, Destination, Utf8Text, WriteHooks};

/// Rotation threshold used when none is given: 10 MiB.
pub const DEFAULT_MAX_FILE_SIZE: u64 = 10 * 1024 * 1024;

/// An append-only log file with single-backup rotation.
pub struct FileDestination {
    path: PathBuf,
    backup: PathBuf,
    max_file_size: u64,
    file: Option<File>,
    size: u64,
    rotate_at: u64,
    rotation_failures: u64,
}

impl FileDestination {
    /// Open `path` for appending, or truncate it first when `truncate` is set.
    ///
    /// Failure is not an error: the destination reports itself closed and
    /// stays that way.
    pub fn open(path: impl Into<PathBuf>, max_file_size: u64, truncate: bool) -> Self {
        let path = path.into();
        let backup = backup_path(&path);
        let max_file_size = max_file_size.max(1);
        let mut dest = Self {
            path,
            backup,
            max_file_size,
            file: None,
            size: 0,
            rotate_at: max_file_size,
            rotation_failures: 0,
        };
        dest.reopen(truncate);
        dest
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Where the previous generation is kept after rotation.
    pub fn backup_path(&self) -> &Path {
        &self.backup
    }

    pub fn max_file_size(&self) -> u64 {
        self.max_file_size
    }

    /// Bytes in the live file.
    pub fn size(&self) -> u64 {
        self.size
    }

    /// Renames to the backup path that have failed so far.
    pub fn rotation_failures(&self) -> u64 {
        self.rotation_failures
    }

    fn reopen(&mut self, truncate: bool) {
        match open_log_file(&self.path, truncate) {
            Ok(file) => {
                self.size = file.metadata().map(|m| m.len()).unwrap_or(0);
                self.file = Some(file);
            }
            Err(e) => {
                tracing::warn!(path = %self.path.display(), error = %e, "cannot open log file");
                self.file = None;
                self.size = 0;
            }
        }
    }

    fn rotate(&mut self) {
        // Close before renaming; Windows refuses to move an open file.
        self.file = None;
        match fs::rename(&self.path, &self.backup) {
            Ok(()) => {
                self.reopen(true);
                self.rotate_at = self.max_file_size;
            }
            Err(e) => {
                self.rotation_failures += 1;
                tracing::warn!(
                    path = %self.path.display(),
                    backup = %self.backup.display(),
                    error = %e,
                    failures = self.rotation_failures,
                    "log rotation failed, continuing in current file"
                );
                self.reopen(false);
                self.rotate_at = self.size.saturating_add(self.max_file_size);
            }
        }
    }
}

impl Destination for FileDestination {
    fn is_open(&self) -> bool {
        self.file.is_some()
    }

    fn before_writing(&mut self, _level: Level, pending: usize) {
        if self.size > 0 && self.size.saturating_add(pending as u64) >= self.rotate_at {
            self.rotate();
        }
    }

    fn writing(&mut self, _level: Level, bytes: &[u8]) -> io::Result<()> {
        let Some(file) = self.file.as_mut() else {
            return Ok(());
        };
        file.write_all(bytes)?;
        self.size += bytes.len() as u64;
        Ok(())
    }
}

fn open_log_file(path: &Path, truncate: bool) -> io::Result<File> {
    let mut options = OpenOptions::new();
    options.create(true);
    if truncate {
        options.write(true).truncate(true);
    } else {
        options.append(true);
    }
    options.open(path)
}

fn backup_path(path: &Path) -> PathBuf {
    let mut name = OsString::from(path.as_os_str());
    name.push(".bak");
    PathBuf::from(name)
}

/// File sink whose bytes use a configurable encoding (UTF-8 unless set).
pub type FileSink = BasicSink<FileDestination, Encoding>;

/// File sink whose bytes are always UTF-8.
pub type Utf8FileSink = BasicSink<FileDestination, Utf8Text>;

/// Options for opening a file sink.
#[derive(Clone, Debug)]
pub struct FileSinkBuilder {
    path: PathBuf,
    max_file_size: u64,
    encoding: Encoding,
    truncate: bool,
}

impl FileSinkBuilder {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            max_file_size: DEFAULT_MAX_FILE_SIZE,
            encoding: Encoding::default(),
            truncate: false,
        }
    }

    pub fn max_file_size(mut self, bytes: u64) -> Self {
        self.max_file_size = bytes;
        self
    }

    /// Ignored by [`build_utf8`](Self::build_utf8).
    pub fn encoding(mut self, encoding: Encoding) -> Self {
        self.encoding = encoding;
        self
    }

    /// Start from an empty file instead of appending.
    pub fn truncate(mut self, truncate: bool) -> Self {
        self.truncate = truncate;
        self
    }

    pub fn build(self) -> FileSink {
        let dest = FileDestination::open(self.path, self.max_file_size, self.truncate);
        BasicSink::with_hooks(dest, self.encoding)
    }

    pub fn build_utf8(self) -> Utf8FileSink {
        let dest = FileDestination::open(self.path, self.max_file_size, self.truncate);
        BasicSink::new(dest)
    }
}

impl FileSink {
    /// Append to `path` with the default size cap.
    pub fn open(path: impl Into<PathBuf>) -> Self {
        FileSinkBuilder::new(path).build()
    }

    pub fn builder(path: impl Into<PathBuf>) -> FileSinkBuilder {
        FileSinkBuilder::new(path)
    }

    pub fn encoding(&self) -> Encoding {
        *self.hooks()
    }
}

impl Utf8FileSink {
    /// Append to `path` with the default size cap.
    pub fn open(path: impl Into<PathBuf>) -> Self {
        FileSinkBuilder::new(path).build_utf8()
    }
}

impl<H: WriteHooks> BasicSink<FileDestination, H> {
    pub fn path(&self) -> PathBuf {
        self.with_destination(|d| d.path().to_path_buf())
    }

    pub fn max_file_size(&self) -> u64 {
        self.with_destination(|d| d.max_file_size())
    }

    /// Bytes in the live file.
    pub fn file_size(&self) -> u64 {
        self.with_destination(|d| d.size())
    }

    pub fn rotation_failures(&self) -> u64 {
        self.with_destination(|d| d.rotation_failures())
    }
}
