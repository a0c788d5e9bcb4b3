//! Hex dumps of byte buffers
//!
//! Output is a fixed-width table, one row per 16 bytes:
//!
//! ```text
//! DEC OFF | 0  1  2  3  4  5  6  7  8  9  A  B  C  D  E  F |   ANSI ASCII
//! --------------------------------------------------------------------------
//! 0000000 |41 42 00                                        |AB.
//! ```
//!
//! Every line, header included, is [`ROW_WIDTH`] characters wide and ends
//! with a newline.

use std::fmt::{self, Write};

use tinylog_core::transcode::to_wide;

/// Bytes per row.
pub const ROW_BYTES: usize = 16;

/// Width of every line of the table, newline excluded.
pub const ROW_WIDTH: usize = OFFSET_WIDTH + 1 + ROW_BYTES * 3 + 1 + ROW_BYTES;

const OFFSET_WIDTH: usize = 8;
const ASCII_TITLE: &str = "ANSI ASCII";
const PLACEHOLDER: char = '.';

/// Radix of the offset column.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Offset {
    #[default]
    Decimal,
    Hex,
}

impl Offset {
    fn title(self) -> &'static str {
        match self {
            Offset::Decimal => "DEC OFF",
            Offset::Hex => "HEX OFF",
        }
    }
}

/// Dump `data` with decimal offsets.
pub fn hexdump(data: &[u8]) -> String {
    hexdump_with(data, Offset::Decimal)
}

/// Dump `data` with the given offset radix.
pub fn hexdump_with(data: &[u8], offset: Offset) -> String {
    let rows = data.len().div_ceil(ROW_BYTES);
    let mut out = String::with_capacity((rows + 2) * (ROW_WIDTH + 1));
    // Writing into a String cannot fail.
    let _ = render(&mut out, data, offset);
    out
}

/// Dump a UTF-16 buffer as its native-endian bytes.
pub fn hexdump_wide(units: &[u16], offset: Offset) -> String {
    let bytes: Vec<u8> = units.iter().flat_map(|unit| unit.to_ne_bytes()).collect();
    hexdump_with(&bytes, offset)
}

/// [`hexdump_with`], returned as UTF-16 for wide-character sinks.
pub fn whexdump(data: &[u8], offset: Offset) -> Vec<u16> {
    to_wide(&hexdump_with(data, offset))
}

fn render(out: &mut String, data: &[u8], offset: Offset) -> fmt::Result {
    write_header(out, offset)?;
    for (row, chunk) in data.chunks(ROW_BYTES).enumerate() {
        write_row(out, row * ROW_BYTES, chunk, offset)?;
    }
    Ok(())
}

fn write_header(out: &mut String, offset: Offset) -> fmt::Result {
    write!(out, "{:<width$}|", offset.title(), width = OFFSET_WIDTH)?;
    for column in 0..ROW_BYTES {
        write!(out, "{column:>2X} ")?;
    }
    writeln!(out, "|{ASCII_TITLE:^width$}", width = ROW_BYTES)?;
    writeln!(out, "{}", "-".repeat(ROW_WIDTH))
}

fn write_row(out: &mut String, start: usize, chunk: &[u8], offset: Offset) -> fmt::Result {
    match offset {
        Offset::Decimal => write!(out, "{start:07} |")?,
        Offset::Hex => write!(out, "{start:07X} |")?,
    }

    for byte in chunk {
        write!(out, "{byte:02X} ")?;
    }
    for _ in chunk.len()..ROW_BYTES {
        out.push_str("   ");
    }

    out.push('|');
    for &byte in chunk {
        out.push(printable(byte));
    }
    for _ in chunk.len()..ROW_BYTES {
        out.push(' ');
    }
    out.push('\n');
    Ok(())
}

fn printable(byte: u8) -> char {
    if byte.is_ascii_graphic() || byte == b' ' {
        char::from(byte)
    } else {
        PLACEHOLDER
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lines(dump: &str) -> Vec<&str> {
        dump.lines().collect()
    }

    #[test]
    fn test_header_layout() {
        let dump = hexdump(b"");
        let lines = lines(&dump);
        assert_eq!(lines.len(), 2);
        assert_eq!(
            lines[0],
            "DEC OFF | 0  1  2  3  4  5  6  7  8  9  A  B  C  D  E  F |   ANSI ASCII   "
        );
        assert_eq!(lines[1], "-".repeat(74));
        assert_eq!(ROW_WIDTH, 74);
    }

    #[test]
    fn test_hex_header() {
        let dump = hexdump_with(b"", Offset::Hex);
        assert!(dump.starts_with("HEX OFF |"));
    }

    #[test]
    fn test_short_row_padded_with_blanks() {
        let dump = hexdump(b"AB\0");
        let row = lines(&dump)[2];
        assert_eq!(row.len(), ROW_WIDTH);
        assert!(row.starts_with("0000000 |41 42 00 "));
        assert_eq!(&row[9..18], "41 42 00 ");
        assert_eq!(row[18..57].trim(), "");
        assert_eq!(&row[57..], format!("|AB.{}", " ".repeat(13)));
    }

    #[test]
    fn test_offsets_decimal_and_hex() {
        let data: Vec<u8> = (0..=40).collect();

        let dec = hexdump(&data);
        let offsets: Vec<&str> = lines(&dec)[2..].iter().map(|l| &l[..7]).collect();
        assert_eq!(offsets, ["0000000", "0000016", "0000032"]);

        let hex = hexdump_with(&data, Offset::Hex);
        let offsets: Vec<&str> = lines(&hex)[2..].iter().map(|l| &l[..7]).collect();
        assert_eq!(offsets, ["0000000", "0000010", "0000020"]);
    }

    #[test]
    fn test_full_row() {
        let data: Vec<u8> = (b'a'..b'a' + 16).collect();
        let dump = hexdump(&data);
        let row = lines(&dump)[2];
        assert_eq!(
            row,
            "0000000 |61 62 63 64 65 66 67 68 69 6A 6B 6C 6D 6E 6F 70 |abcdefghijklmnop"
        );
    }

    #[test]
    fn test_non_printable_bytes() {
        let dump = hexdump(&[0x7F, 0xFF, b'\n', b' ']);
        let row = lines(&dump)[2];
        assert!(row.starts_with("0000000 |7F FF 0A 20 "));
        assert!(row.ends_with(&format!("|...{}", " ".repeat(13))));
    }

    #[test]
    fn test_wide_input_uses_native_bytes() {
        let units = [0x0041u16, 0x4E2D];
        let dump = hexdump_wide(&units, Offset::Decimal);
        let expected = if cfg!(target_endian = "little") {
            "0000000 |41 00 2D 4E "
        } else {
            "0000000 |00 41 4E 2D "
        };
        assert!(lines(&dump)[2].starts_with(expected));
    }

    #[test]
    fn test_wide_output() {
        let wide = whexdump(b"hi", Offset::Hex);
        assert_eq!(String::from_utf16(&wide).unwrap(), hexdump_with(b"hi", Offset::Hex));
    }
}
