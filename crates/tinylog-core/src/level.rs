//! Severity levels
//!
//! Levels are totally ordered: `Trace < Debug < Info < Warn < Error < Fatal`.
//! The same enum tags records and acts as the floor on loggers and sinks. A
//! record passes a floor when `record.level() >= floor`.

use std::fmt;
use std::str::FromStr;
use std::sync::atomic::{AtomicU8, Ordering};

use serde::{Deserialize, Serialize};

use crate::error::LogError;

/// Defines the severity levels for log records.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
#[repr(u8)]
pub enum Level {
    /// Very fine-grained tracing.
    #[default]
    Trace = 0,
    /// Information useful while debugging.
    Debug = 1,
    /// Coarse-grained progress of the application.
    Info = 2,
    /// Potentially harmful situations.
    Warn = 3,
    /// Errors the application can still recover from.
    Error = 4,
    /// Errors the application cannot recover from.
    Fatal = 5,
}

impl Level {
    /// Every level, lowest first.
    pub const ALL: [Level; 6] = [
        Level::Trace,
        Level::Debug,
        Level::Info,
        Level::Warn,
        Level::Error,
        Level::Fatal,
    ];

    /// Upper-case English name.
    pub fn as_str(self) -> &'static str {
        match self {
            Level::Trace => "TRACE",
            Level::Debug => "DEBUG",
            Level::Info => "INFO",
            Level::Warn => "WARN",
            Level::Error => "ERROR",
            Level::Fatal => "FATAL",
        }
    }

    /// Label printed between brackets by the default layout.
    #[cfg(not(feature = "simplified-chinese"))]
    pub fn label(self) -> &'static str {
        self.as_str()
    }

    /// Label printed between brackets by the default layout.
    #[cfg(feature = "simplified-chinese")]
    pub fn label(self) -> &'static str {
        match self {
            Level::Trace => "跟踪",
            Level::Debug => "调试",
            Level::Info => "信息",
            Level::Warn => "警告",
            Level::Error => "错误",
            Level::Fatal => "严重",
        }
    }

    fn from_u8(value: u8) -> Level {
        match value {
            0 => Level::Trace,
            1 => Level::Debug,
            2 => Level::Info,
            3 => Level::Warn,
            4 => Level::Error,
            _ => Level::Fatal,
        }
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Level {
    type Err = LogError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "trace" => Ok(Level::Trace),
            "debug" => Ok(Level::Debug),
            "info" => Ok(Level::Info),
            "warn" | "warning" => Ok(Level::Warn),
            "error" => Ok(Level::Error),
            "fatal" => Ok(Level::Fatal),
            _ => Err(LogError::InvalidLevel(s.to_string())),
        }
    }
}

/// A level that can be read and replaced without a lock.
///
/// Loggers and sinks keep their floor in one of these so the hot path only
/// pays for a relaxed atomic load.
#[derive(Debug)]
pub struct AtomicLevel(AtomicU8);

impl AtomicLevel {
    pub fn new(level: Level) -> Self {
        Self(AtomicU8::new(level as u8))
    }

    pub fn get(&self) -> Level {
        Level::from_u8(self.0.load(Ordering::Relaxed))
    }

    pub fn set(&self, level: Level) {
        self.0.store(level as u8, Ordering::Relaxed);
    }

    /// True when `level` meets this floor.
    pub fn allows(&self, level: Level) -> bool {
        level >= self.get()
    }
}

impl Default for AtomicLevel {
    fn default() -> Self {
        Self::new(Level::default())
    }
}
