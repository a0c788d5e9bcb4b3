//! Text encoding conversions
//!
//! Everything inside the pipeline is UTF-8 `String`. These functions are the
//! boundary: UTF-16 call sites come in through [`from_wide`], and file sinks
//! that must write a different byte encoding go out through [`encode`].

use serde::{Deserialize, Serialize};

use crate::error::{LogError, LogResult};

/// Byte encoding of text written to a destination.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Encoding {
    #[default]
    Utf8,
    Utf16Le,
    Utf16Be,
}

impl Encoding {
    /// The platform's native wide text encoding.
    pub fn native() -> Self {
        if cfg!(windows) {
            Encoding::Utf16Le
        } else {
            Encoding::Utf8
        }
    }
}

/// Encode `text` into bytes. No byte-order mark is written.
pub fn encode(text: &str, encoding: Encoding) -> Vec<u8> {
    match encoding {
        Encoding::Utf8 => text.as_bytes().to_vec(),
        Encoding::Utf16Le => text.encode_utf16().flat_map(u16::to_le_bytes).collect(),
        Encoding::Utf16Be => text.encode_utf16().flat_map(u16::to_be_bytes).collect(),
    }
}

/// Decode bytes in `encoding`, rejecting malformed input.
pub fn decode(bytes: &[u8], encoding: Encoding) -> LogResult<String> {
    match encoding {
        Encoding::Utf8 => std::str::from_utf8(bytes)
            .map(str::to_owned)
            .map_err(|e| LogError::Transcode(e.to_string())),
        Encoding::Utf16Le | Encoding::Utf16Be => {
            if bytes.len() % 2 != 0 {
                return Err(LogError::Transcode(format!(
                    "odd byte count {} for UTF-16 input",
                    bytes.len()
                )));
            }
            let units: Vec<u16> = bytes
                .chunks_exact(2)
                .map(|pair| match encoding {
                    Encoding::Utf16Be => u16::from_be_bytes([pair[0], pair[1]]),
                    _ => u16::from_le_bytes([pair[0], pair[1]]),
                })
                .collect();
            String::from_utf16(&units).map_err(|e| LogError::Transcode(e.to_string()))
        }
    }
}

/// Re-encode bytes from one encoding to another.
pub fn transcode(bytes: &[u8], from: Encoding, to: Encoding) -> LogResult<Vec<u8>> {
    if from == to {
        return Ok(bytes.to_vec());
    }
    let text = decode(bytes, from)?;
    Ok(encode(&text, to))
}

/// UTF-16 code units of `text`.
pub fn to_wide(text: &str) -> Vec<u16> {
    text.encode_utf16().collect()
}

/// UTF-8 text from UTF-16 code units. Unpaired surrogates become U+FFFD.
pub fn from_wide(units: &[u16]) -> String {
    String::from_utf16_lossy(units)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_encode_utf16_byte_orders() {
        assert_eq!(encode("A", Encoding::Utf16Le), vec![0x41, 0x00]);
        assert_eq!(encode("A", Encoding::Utf16Be), vec![0x00, 0x41]);
        assert_eq!(encode("é", Encoding::Utf8), vec![0xC3, 0xA9]);
    }

    #[test]
    fn test_transcode_between_encodings() {
        let le = encode("日志", Encoding::Utf16Le);
        let be = transcode(&le, Encoding::Utf16Le, Encoding::Utf16Be).unwrap();
        assert_eq!(decode(&be, Encoding::Utf16Be).unwrap(), "日志");
        let utf8 = transcode(&le, Encoding::Utf16Le, Encoding::Utf8).unwrap();
        assert_eq!(utf8, "日志".as_bytes());
    }

    #[test]
    fn test_decode_rejects_malformed_input() {
        assert!(matches!(
            decode(&[0xFF, 0xFE, 0x00], Encoding::Utf16Le),
            Err(LogError::Transcode(_))
        ));
        assert!(matches!(
            decode(&[0xC3], Encoding::Utf8),
            Err(LogError::Transcode(_))
        ));
    }

    #[test]
    fn test_from_wide_is_lossy() {
        assert_eq!(from_wide(&to_wide("tiny")), "tiny");
        assert_eq!(from_wide(&[0xD800]), "\u{FFFD}");
    }
}
