//! Record layouts
//!
//! A [`Layout`] turns a record into the text a sink writes. The default
//! arrangement is
//!
//! ```text
//! 2024/05/20 19:30:27.042133 [WARN] #3 disk almost full
//! file src/main.rs, line 24, func app::main
//! ```
//!
//! where the second line only appears for debug records on a verbose sink.

use chrono::{Local, TimeZone};

use crate::record::{DebugRecord, Record, Timestamp};

const DATETIME_FORMAT: &str = "%Y/%m/%d %H:%M:%S%.6f";
const LF: char = '\n';

/// Converts records into output text.
///
/// Implementors provide the two building blocks; `format` and
/// `format_debug` compose them and rarely need overriding.
pub trait Layout: Send + Sync {
    /// Main line of a record, ending in exactly one newline.
    fn gen_record_msg(&self, record: &Record) -> String;

    /// Append the source-location line of a debug record to `out`.
    fn append_debug_msg(&self, out: &mut String, record: &DebugRecord);

    fn format(&self, record: &Record) -> String {
        self.gen_record_msg(record)
    }

    /// Format a debug record; the location line is only added when `verbose`.
    fn format_debug(&self, record: &DebugRecord, verbose: bool) -> String {
        let mut out = self.gen_record_msg(record);
        if verbose {
            self.append_debug_msg(&mut out, record);
        }
        out
    }
}

/// A field of the main record line.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Field {
    /// `YYYY/MM/DD HH:MM:SS.ffffff`, local time
    Timestamp,
    /// `[LEVEL]`
    Level,
    /// `#<id>`
    ThreadId,
    Message,
}

/// Field-arrangement layout used by every built-in sink.
#[derive(Clone, Debug)]
pub struct DefaultLayout {
    fields: Vec<Field>,
    separator: String,
}

impl DefaultLayout {
    pub fn new() -> Self {
        Self {
            fields: vec![Field::Timestamp, Field::Level, Field::ThreadId, Field::Message],
            separator: " ".to_string(),
        }
    }

    /// Replace the field order. Fields may be omitted or repeated.
    pub fn with_fields(mut self, fields: impl Into<Vec<Field>>) -> Self {
        self.fields = fields.into();
        self
    }

    pub fn with_separator(mut self, separator: impl Into<String>) -> Self {
        self.separator = separator.into();
        self
    }

    pub fn fields(&self) -> &[Field] {
        &self.fields
    }
}

impl Default for DefaultLayout {
    fn default() -> Self {
        Self::new()
    }
}

impl Layout for DefaultLayout {
    fn gen_record_msg(&self, record: &Record) -> String {
        let mut out = String::with_capacity(48 + record.message().len());
        for (i, field) in self.fields.iter().enumerate() {
            if i > 0 {
                out.push_str(&self.separator);
            }
            match field {
                Field::Timestamp => out.push_str(&format_timestamp(record.timestamp())),
                Field::Level => {
                    out.push('[');
                    out.push_str(record.level().label());
                    out.push(']');
                }
                Field::ThreadId => {
                    out.push('#');
                    out.push_str(&record.thread_id().to_string());
                }
                Field::Message => out.push_str(record.message()),
            }
        }
        end_with(&mut out, LF);
        out
    }

    fn append_debug_msg(&self, out: &mut String, record: &DebugRecord) {
        let mut info = debug_line(record);
        end_with(&mut info, LF);
        out.push_str(&info);
    }
}

#[cfg(not(feature = "simplified-chinese"))]
fn debug_line(record: &DebugRecord) -> String {
    format!(
        "file {}, line {}, func {}",
        record.file(),
        record.line(),
        record.func()
    )
}

#[cfg(feature = "simplified-chinese")]
fn debug_line(record: &DebugRecord) -> String {
    format!(
        "文件 {}, 行 {}, 函数 {}",
        record.file(),
        record.line(),
        record.func()
    )
}

/// Push `delimiter` unless `s` already ends with it.
pub fn end_with(s: &mut String, delimiter: char) {
    if !s.ends_with(delimiter) {
        s.push(delimiter);
    }
}

/// Local time of `ts` as `YYYY/MM/DD HH:MM:SS.ffffff`.
///
/// Returns an empty string when the time cannot be represented locally.
pub fn format_timestamp(ts: Timestamp) -> String {
    Local
        .timestamp_opt(ts.secs, ts.micros.saturating_mul(1_000))
        .earliest()
        .map(|dt| dt.format(DATETIME_FORMAT).to_string())
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::level::Level;

    fn record(message: &str) -> Record {
        Record::from_parts(Timestamp::new(0, 5), Level::Warn, 3, message)
    }

    #[test]
    fn test_timestamp_shape() {
        let text = format_timestamp(Timestamp::new(1_700_000_000, 42));
        // 2023/11/14 22:13:20.000042 in UTC; the date part depends on the zone
        assert_eq!(text.len(), 26);
        assert_eq!(&text[4..5], "/");
        assert_eq!(&text[7..8], "/");
        assert_eq!(&text[19..20], ".");
        assert!(text.ends_with("000042"));
    }

    #[test]
    fn test_timestamp_out_of_range_is_empty() {
        assert_eq!(format_timestamp(Timestamp::new(i64::MAX, 0)), "");
    }

    #[test]
    fn test_default_arrangement() {
        let line = DefaultLayout::new().gen_record_msg(&record("disk low"));
        let expected_tail = format!(" [{}] #3 disk low\n", Level::Warn.label());
        assert!(line.ends_with(&expected_tail), "got {line:?}");
        assert!(line.starts_with(&format_timestamp(Timestamp::new(0, 5))));
    }

    #[test]
    fn test_single_trailing_newline() {
        let layout = DefaultLayout::new();
        let plain = layout.gen_record_msg(&record("done"));
        let already = layout.gen_record_msg(&record("done\n"));
        assert_eq!(plain, already);
        assert!(!plain.ends_with("\n\n"));
    }

    #[test]
    fn test_empty_message_still_ends_line() {
        let layout = DefaultLayout::new().with_fields([Field::Message]);
        assert_eq!(layout.gen_record_msg(&record("")), "\n");
    }

    #[test]
    fn test_custom_fields_and_separator() {
        let layout = DefaultLayout::new()
            .with_fields([Field::ThreadId, Field::Level, Field::Message])
            .with_separator(" | ");
        let line = layout.gen_record_msg(&record("x"));
        assert_eq!(line, format!("#3 | [{}] | x\n", Level::Warn.label()));
    }

    #[cfg(not(feature = "simplified-chinese"))]
    #[test]
    fn test_debug_line_only_when_verbose() {
        let layout = DefaultLayout::new().with_fields([Field::Message]);
        let debug = DebugRecord::new(record("boom"), "main.rs", 24, "app::main");

        assert_eq!(layout.format_debug(&debug, false), "boom\n");
        assert_eq!(
            layout.format_debug(&debug, true),
            "boom\nfile main.rs, line 24, func app::main\n"
        );
    }

    #[cfg(feature = "simplified-chinese")]
    #[test]
    fn test_localised_debug_line() {
        let layout = DefaultLayout::new().with_fields([Field::Level, Field::Message]);
        let debug = DebugRecord::new(record("boom"), "main.rs", 24, "app::main");

        assert_eq!(
            layout.format_debug(&debug, true),
            "[警告] boom\n文件 main.rs, 行 24, 函数 app::main\n"
        );
    }
}
