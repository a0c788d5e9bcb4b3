//! JSON configuration of loggers and sinks.
//!
//! ```json
//! {
//!   "default_level": "info",
//!   "loggers": [
//!     {
//!       "name": "app",
//!       "level": "debug",
//!       "sinks": [
//!         { "kind": "console", "stream": "stderr", "color": false },
//!         { "kind": "file", "path": "app.log", "max_file_size": 1048576, "level": "warn" }
//!       ]
//!     }
//!   ]
//! }
//! ```
//!
//! A logger without a `name` is the registry's default logger.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::error::{LogError, LogResult};
use crate::level::Level;
use crate::logger::Logger;
use crate::registry::{Registry, DEFAULT_LOGGER_NAME};
use crate::sink::{
    ConsoleDestination, ConsoleSink, ConsoleStream, DebugConsoleSink, FileSinkBuilder, Sink,
};
use crate::transcode::Encoding;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Applied with [`Registry::set_level`] before any logger is created.
    pub default_level: Option<Level>,
    pub loggers: Vec<LoggerConfig>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggerConfig {
    pub name: Option<String>,
    pub level: Option<Level>,
    pub sinks: Vec<SinkConfig>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SinkKind {
    #[default]
    Console,
    File,
    Utf8File,
    DebugConsole,
}

/// One sink. Fields that do not apply to `kind` are ignored.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SinkConfig {
    pub kind: SinkKind,
    pub level: Option<Level>,
    pub verbose: Option<bool>,
    /// Console only.
    pub color: Option<bool>,
    /// Console only.
    pub stream: ConsoleStream,
    /// Required for file kinds.
    pub path: Option<PathBuf>,
    pub max_file_size: Option<u64>,
    /// `file` only; `utf8_file` is always UTF-8.
    pub encoding: Option<Encoding>,
    pub truncate: bool,
}

impl LoggingConfig {
    pub fn from_json(json: &str) -> LogResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn load(path: impl AsRef<Path>) -> LogResult<Self> {
        let text = std::fs::read_to_string(path)?;
        Self::from_json(&text)
    }

    pub fn to_json(&self) -> LogResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Create every configured logger in `registry`.
    ///
    /// Fails on a name that is already registered or a file sink without a
    /// path. Loggers created before the failure stay registered.
    pub fn apply(&self, registry: &Registry) -> LogResult<Vec<Arc<Logger>>> {
        if let Some(level) = self.default_level {
            registry.set_level(level);
        }
        self.loggers
            .iter()
            .map(|config| config.create(registry))
            .collect()
    }
}

impl LoggerConfig {
    fn create(&self, registry: &Registry) -> LogResult<Arc<Logger>> {
        let sinks = self
            .sinks
            .iter()
            .map(SinkConfig::build)
            .collect::<LogResult<Vec<_>>>()?;

        let name = self.name.as_deref().unwrap_or(DEFAULT_LOGGER_NAME);
        let logger = registry.create_logger(name)?;
        if let Some(level) = self.level {
            logger.set_level(level);
        }
        for sink in sinks {
            logger.add_dyn_sink(sink);
        }
        Ok(logger)
    }
}

impl SinkConfig {
    pub fn build(&self) -> LogResult<Arc<dyn Sink>> {
        let sink: Arc<dyn Sink> = match self.kind {
            SinkKind::Console => {
                let sink = ConsoleSink::new(ConsoleDestination::new(self.stream));
                if let Some(color) = self.color {
                    sink.set_color(color);
                }
                Arc::new(sink)
            }
            SinkKind::File => Arc::new(
                self.file_builder()?
                    .encoding(self.encoding.unwrap_or_default())
                    .build(),
            ),
            SinkKind::Utf8File => Arc::new(self.file_builder()?.build_utf8()),
            SinkKind::DebugConsole => Arc::new(DebugConsoleSink::open()),
        };
        if let Some(level) = self.level {
            sink.set_level(level);
        }
        if let Some(verbose) = self.verbose {
            sink.set_verbose(verbose);
        }
        Ok(sink)
    }

    fn file_builder(&self) -> LogResult<FileSinkBuilder> {
        let path = self
            .path
            .as_ref()
            .ok_or_else(|| LogError::Config(format!("{:?} sink needs a path", self.kind)))?;
        let mut builder = FileSinkBuilder::new(path).truncate(self.truncate);
        if let Some(max) = self.max_file_size {
            builder = builder.max_file_size(max);
        }
        Ok(builder)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_parse_full_config() {
        let config = LoggingConfig::from_json(
            r#"{
                "default_level": "info",
                "loggers": [
                    {
                        "name": "app",
                        "level": "debug",
                        "sinks": [
                            { "kind": "console", "stream": "stderr", "color": false },
                            { "kind": "file", "path": "app.log", "encoding": "utf16le" },
                            { "kind": "utf8_file", "path": "u.log", "level": "warn" },
                            { "kind": "debug_console" }
                        ]
                    },
                    {}
                ]
            }"#,
        )
        .unwrap();

        assert_eq!(config.default_level, Some(Level::Info));
        assert_eq!(config.loggers.len(), 2);
        let sinks = &config.loggers[0].sinks;
        assert_eq!(sinks[0].stream, ConsoleStream::Stderr);
        assert_eq!(sinks[1].encoding, Some(Encoding::Utf16Le));
        assert_eq!(sinks[2].kind, SinkKind::Utf8File);
        assert_eq!(sinks[3].kind, SinkKind::DebugConsole);
        assert!(config.loggers[1].name.is_none());
    }

    #[test]
    fn test_unknown_level_is_rejected() {
        let err = LoggingConfig::from_json(r#"{ "default_level": "loud" }"#).unwrap_err();
        assert!(matches!(err, LogError::Serialization(_)));
    }

    #[test]
    fn test_apply_creates_loggers() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("app.log");
        let config = LoggingConfig {
            default_level: Some(Level::Warn),
            loggers: vec![
                LoggerConfig {
                    name: Some("app".into()),
                    level: None,
                    sinks: vec![SinkConfig {
                        kind: SinkKind::Utf8File,
                        path: Some(path.clone()),
                        level: Some(Level::Error),
                        ..Default::default()
                    }],
                },
                LoggerConfig::default(),
            ],
        };

        let registry = Registry::new();
        let loggers = config.apply(&registry).unwrap();

        assert_eq!(loggers.len(), 2);
        assert_eq!(loggers[0].level(), Level::Warn);
        assert_eq!(loggers[0].sink_count(), 1);
        assert!(registry.get_default_logger().is_some());
        assert_eq!(registry.level(), Level::Warn);

        loggers[0].log(Level::Warn, "below sink floor");
        loggers[0].log(Level::Error, "written");
        let content = std::fs::read_to_string(&path).unwrap();
        assert_eq!(content.lines().count(), 1);
        assert!(content.contains("written"));
    }

    #[test]
    fn test_file_sink_without_path_fails() {
        let config = LoggingConfig::from_json(
            r#"{ "loggers": [ { "name": "x", "sinks": [ { "kind": "file" } ] } ] }"#,
        )
        .unwrap();
        let registry = Registry::new();
        assert!(matches!(config.apply(&registry), Err(LogError::Config(_))));
        assert!(registry.get_logger("x").is_none());
    }

    #[test]
    fn test_duplicate_name_fails() {
        let config = LoggingConfig::from_json(
            r#"{ "loggers": [ { "name": "dup" }, { "name": "dup" } ] }"#,
        )
        .unwrap();
        let registry = Registry::new();
        assert!(matches!(
            config.apply(&registry),
            Err(LogError::LoggerExists(name)) if name == "dup"
        ));
    }

    #[test]
    fn test_load_from_file() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("logging.json");
        let config = LoggingConfig {
            default_level: Some(Level::Debug),
            loggers: vec![LoggerConfig::default()],
        };
        std::fs::write(&path, config.to_json().unwrap()).unwrap();

        let loaded = LoggingConfig::load(&path).unwrap();
        assert_eq!(loaded.default_level, Some(Level::Debug));
        assert_eq!(loaded.loggers.len(), 1);
    }
}
