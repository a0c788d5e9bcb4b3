//! Process-wide directory of named loggers
//!
//! [`Registry::instance`] is created on first use and lives until the process
//! exits. Tests and embedders that want isolation can build their own
//! [`Registry::new`] instead.
//!
//! The registry lock only guards the name map. It is never held while a
//! record is written, so a slow sink cannot block logger lookup.

use std::collections::HashMap;
use std::sync::{Arc, OnceLock};

use parking_lot::Mutex;

use crate::error::{LogError, LogResult};
use crate::level::Level;
use crate::logger::Logger;
use crate::transcode::from_wide;

/// Name of the logger used when a call site names none.
pub const DEFAULT_LOGGER_NAME: &str = "_TINYLOG_DEFAULT_";

struct Inner {
    level: Level,
    loggers: HashMap<String, Arc<Logger>>,
}

pub struct Registry {
    inner: Mutex<Inner>,
}

static INSTANCE: OnceLock<Registry> = OnceLock::new();

impl Registry {
    pub fn new() -> Self {
        Self {
            inner: Mutex::new(Inner {
                level: Level::Trace,
                loggers: HashMap::new(),
            }),
        }
    }

    /// The global registry.
    pub fn instance() -> &'static Registry {
        INSTANCE.get_or_init(Registry::new)
    }

    /// Floor given to loggers created from now on.
    ///
    /// Existing loggers keep their own floor.
    pub fn set_level(&self, level: Level) {
        self.inner.lock().level = level;
    }

    pub fn level(&self) -> Level {
        self.inner.lock().level
    }

    /// Create and register a logger, failing if the name is taken.
    pub fn create_logger(&self, name: &str) -> LogResult<Arc<Logger>> {
        let mut inner = self.inner.lock();
        if inner.loggers.contains_key(name) {
            return Err(LogError::LoggerExists(name.to_string()));
        }
        let logger = Arc::new(Logger::with_level(name, inner.level));
        inner.loggers.insert(name.to_string(), logger.clone());
        tracing::trace!(logger = name, "logger created");
        Ok(logger)
    }

    pub fn create_logger_wide(&self, name: &[u16]) -> LogResult<Arc<Logger>> {
        self.create_logger(&from_wide(name))
    }

    /// Create the logger used by call sites that name none.
    pub fn create_default_logger(&self) -> LogResult<Arc<Logger>> {
        self.create_logger(DEFAULT_LOGGER_NAME)
    }

    /// Register a logger built elsewhere.
    pub fn add_logger(&self, logger: Arc<Logger>) -> LogResult<Arc<Logger>> {
        let mut inner = self.inner.lock();
        if inner.loggers.contains_key(logger.name()) {
            return Err(LogError::LoggerExists(logger.name().to_string()));
        }
        inner
            .loggers
            .insert(logger.name().to_string(), logger.clone());
        Ok(logger)
    }

    /// Look a logger up. Absence is not an error.
    pub fn get_logger(&self, name: &str) -> Option<Arc<Logger>> {
        self.inner.lock().loggers.get(name).cloned()
    }

    pub fn get_logger_wide(&self, name: &[u16]) -> Option<Arc<Logger>> {
        self.get_logger(&from_wide(name))
    }

    pub fn get_default_logger(&self) -> Option<Arc<Logger>> {
        self.get_logger(DEFAULT_LOGGER_NAME)
    }

    /// Unregister a logger. Handles already held elsewhere keep working.
    pub fn erase_logger(&self, name: &str) -> Option<Arc<Logger>> {
        self.inner.lock().loggers.remove(name)
    }

    pub fn erase_default_logger(&self) -> Option<Arc<Logger>> {
        self.erase_logger(DEFAULT_LOGGER_NAME)
    }

    pub fn erase_all_logger(&self) {
        self.inner.lock().loggers.clear();
    }

    /// Registered names, sorted.
    pub fn logger_names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.inner.lock().loggers.keys().cloned().collect();
        names.sort();
        names
    }
}

impl Default for Registry {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transcode::to_wide;

    #[test]
    fn test_names_are_unique() {
        let registry = Registry::new();
        registry.create_logger("app").unwrap();

        let err = registry.create_logger("app").unwrap_err();
        assert!(matches!(err, LogError::LoggerExists(name) if name == "app"));
    }

    #[test]
    fn test_name_reusable_after_erase() {
        let registry = Registry::new();
        let first = registry.create_logger("app").unwrap();
        assert!(registry.erase_logger("app").is_some());

        let second = registry.create_logger("app").unwrap();
        assert!(!Arc::ptr_eq(&first, &second));
    }

    #[test]
    fn test_get_missing_is_none() {
        let registry = Registry::new();
        assert!(registry.get_logger("nobody").is_none());
        assert!(registry.get_default_logger().is_none());
    }

    #[test]
    fn test_default_level_applies_at_creation() {
        let registry = Registry::new();
        registry.set_level(Level::Info);
        let early = registry.create_logger("early").unwrap();
        registry.set_level(Level::Error);
        let late = registry.create_logger("late").unwrap();

        assert_eq!(early.level(), Level::Info);
        assert_eq!(late.level(), Level::Error);
    }

    #[test]
    fn test_default_logger() {
        let registry = Registry::new();
        let logger = registry.create_default_logger().unwrap();
        assert_eq!(logger.name(), DEFAULT_LOGGER_NAME);
        assert!(Arc::ptr_eq(&logger, &registry.get_default_logger().unwrap()));
        assert!(registry.create_default_logger().is_err());

        registry.erase_default_logger();
        assert!(registry.get_default_logger().is_none());
    }

    #[test]
    fn test_wide_names_and_add_logger() {
        let registry = Registry::new();
        registry.create_logger_wide(&to_wide("宽")).unwrap();
        assert!(registry.get_logger("宽").is_some());
        assert!(registry.get_logger_wide(&to_wide("宽")).is_some());

        let external = Arc::new(Logger::new("external"));
        registry.add_logger(external.clone()).unwrap();
        assert!(registry.add_logger(external).is_err());
        assert_eq!(registry.logger_names(), vec!["external", "宽"]);

        registry.erase_all_logger();
        assert!(registry.logger_names().is_empty());
    }
}
