//! TinyLog Extras
//!
//! Formatting helpers for log messages. Nothing here touches the logging
//! pipeline: both modules turn values into text that is then handed to a
//! logger like any other message.
//!
//! - [`pretty`]: `Display` adapters for pairs, tuples, sequences and maps
//!   (feature `pretty`, on by default)
//! - [`hexdump`]: fixed-width offset/hex/ASCII tables of byte buffers
//!
//! ```ignore
//! use std::collections::BTreeMap;
//! use tinylog_core::log_info;
//! use tinylog_extra::{hexdump, pretty};
//!
//! let ports = BTreeMap::from([("http", 80), ("https", 443)]);
//! log_info!("ports {}", pretty(&ports));
//! log_info!("packet\n{}", hexdump(b"\x01\x02GET /"));
//! ```

pub mod hexdump;
#[cfg(feature = "pretty")]
pub mod pretty;

pub use hexdump::{hexdump, hexdump_wide, hexdump_with, whexdump, Offset};
#[cfg(feature = "pretty")]
pub use pretty::{pretty, Pretty, PrettyPrint, MAX_PRINT_COUNT};
