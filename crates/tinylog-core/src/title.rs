//! Session banner
//!
//! ```text
//!
//! +++++++++++++++++++++++++++++++++++++++++++++++++++++++++++++++++++++++++++++++
//! +                                                                             +
//! +                                   TinyLog                                   +
//! +                                                                             +
//! +++++++++++++++++++++++++++++++++++++++++++++++++++++++++++++++++++++++++++++++
//! ```

use crate::transcode::from_wide;

/// Width of every banner line, in characters.
pub const TITLE_WIDTH: usize = 79;

/// Default border character.
pub const TITLE_CHAR: char = '+';

/// Text used when no title is given.
pub const DEFAULT_TITLE: &str = "TinyLog";

/// Banner around `text` using the default border character.
pub fn title(text: &str) -> String {
    title_with(text, TITLE_CHAR)
}

/// Banner around UTF-16 `text`.
pub fn title_wide(text: &[u16]) -> String {
    title(&from_wide(text))
}

/// Banner around `text` bordered with `sep`.
///
/// Text longer than half the width does not fit and only the frame is drawn.
pub fn title_with(text: &str, sep: char) -> String {
    let inner = TITLE_WIDTH - 2;
    let rule = sep.to_string().repeat(TITLE_WIDTH);
    let blank = format!("{sep}{}{sep}", " ".repeat(inner));

    let mut out = String::with_capacity((TITLE_WIDTH + 1) * 5 + 1);
    out.push('\n');
    out.push_str(&rule);
    out.push('\n');
    out.push_str(&blank);
    out.push('\n');

    let len = text.chars().count();
    if len <= TITLE_WIDTH / 2 {
        let left = (inner - len) / 2;
        let right = inner - len - left;
        out.push(sep);
        out.push_str(&" ".repeat(left));
        out.push_str(text);
        out.push_str(&" ".repeat(right));
        out.push(sep);
        out.push('\n');
        out.push_str(&blank);
        out.push('\n');
    }

    out.push_str(&rule);
    out.push('\n');
    out
}
