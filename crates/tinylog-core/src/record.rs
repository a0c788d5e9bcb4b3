//! Log records
//!
//! A [`Record`] is the immutable value built once per logging call: when it
//! happened, how severe it is, which thread produced it, and the message.
//! [`DebugRecord`] adds the source location. The `Wide*` forms carry UTF-16
//! text and only exist at the boundary with UTF-16 call sites; the sink
//! adapter converts them before any sink sees them.

use std::cell::Cell;
use std::ops::Deref;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{SystemTime, UNIX_EPOCH};

use crate::level::Level;
use crate::transcode::from_wide;

/// Wall-clock time of a record, seconds and microseconds since the Unix epoch.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Timestamp {
    pub secs: i64,
    pub micros: u32,
}

impl Timestamp {
    pub fn new(secs: i64, micros: u32) -> Self {
        Self { secs, micros }
    }

    /// Current system time. A clock set before 1970 reads as the epoch.
    pub fn now() -> Self {
        let since_epoch = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap_or_default();
        Self {
            secs: since_epoch.as_secs() as i64,
            micros: since_epoch.subsec_micros(),
        }
    }
}

static NEXT_THREAD_ID: AtomicU64 = AtomicU64::new(1);

thread_local! {
    static THREAD_ID: Cell<u64> = const { Cell::new(0) };
}

/// Small process-unique id of the calling thread.
///
/// The first thread to log gets 1, the next 2, and so on. The value is cached
/// per thread, so repeated calls from one thread always agree.
pub fn current_thread_id() -> u64 {
    THREAD_ID.with(|cell| {
        let id = cell.get();
        if id != 0 {
            return id;
        }
        let id = NEXT_THREAD_ID.fetch_add(1, Ordering::Relaxed);
        cell.set(id);
        id
    })
}

/// One logging event.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Record {
    timestamp: Timestamp,
    level: Level,
    thread_id: u64,
    message: String,
}

impl Record {
    /// Stamp a record with the current time and calling thread.
    pub fn new(level: Level, message: impl Into<String>) -> Self {
        Self::from_parts(Timestamp::now(), level, current_thread_id(), message)
    }

    /// Build a record from values captured earlier.
    pub fn from_parts(
        timestamp: Timestamp,
        level: Level,
        thread_id: u64,
        message: impl Into<String>,
    ) -> Self {
        Self {
            timestamp,
            level,
            thread_id,
            message: message.into(),
        }
    }

    pub fn timestamp(&self) -> Timestamp {
        self.timestamp
    }

    pub fn level(&self) -> Level {
        self.level
    }

    pub fn thread_id(&self) -> u64 {
        self.thread_id
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

/// A record carrying the source location that produced it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DebugRecord {
    record: Record,
    file: String,
    line: u32,
    func: String,
}

impl DebugRecord {
    pub fn new(
        record: Record,
        file: impl Into<String>,
        line: u32,
        func: impl Into<String>,
    ) -> Self {
        Self {
            record,
            file: file.into(),
            line,
            func: func.into(),
        }
    }

    pub fn record(&self) -> &Record {
        &self.record
    }

    pub fn file(&self) -> &str {
        &self.file
    }

    pub fn line(&self) -> u32 {
        self.line
    }

    pub fn func(&self) -> &str {
        &self.func
    }
}

impl Deref for DebugRecord {
    type Target = Record;

    fn deref(&self) -> &Record {
        &self.record
    }
}

/// A record whose message is UTF-16 text.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct WideRecord {
    pub timestamp: Timestamp,
    pub level: Level,
    pub thread_id: u64,
    pub message: Vec<u16>,
}

impl WideRecord {
    pub fn new(level: Level, message: Vec<u16>) -> Self {
        Self {
            timestamp: Timestamp::now(),
            level,
            thread_id: current_thread_id(),
            message,
        }
    }

    /// Convert to the narrow form, replacing unpaired surrogates.
    pub fn to_narrow(&self) -> Record {
        Record::from_parts(
            self.timestamp,
            self.level,
            self.thread_id,
            from_wide(&self.message),
        )
    }
}

/// A debug record whose text fields are UTF-16.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct WideDebugRecord {
    pub record: WideRecord,
    pub file: Vec<u16>,
    pub line: u32,
    pub func: Vec<u16>,
}

impl WideDebugRecord {
    pub fn to_narrow(&self) -> DebugRecord {
        DebugRecord::new(
            self.record.to_narrow(),
            from_wide(&self.file),
            self.line,
            from_wide(&self.func),
        )
    }
}
