//! # dawg-rs
//!
//! Read-only DAWG dictionaries stored as double-array tries, in the binary
//! layout produced by the `dawgdic` family of builders.
//!
//! A file holds a dictionary section (an array of 32-bit units) and, for
//! views that enumerate keys, a guide section that orders each node's
//! children. Views layered on top decide what a key carries:
//!
//! - [`Dawg`] / [`CompletionDawg`]: a key set
//! - [`IntDawg`] / [`IntCompletionDawg`]: keys with 31-bit integer values
//! - [`BytesDawg`]: keys with one or more byte payloads
//! - [`RecordDawg`]: keys with one or more fixed-layout records
//!
//! ## Example
//!
//! ```rust,no_run
//! use dawg_rs::{CompletionDawg, Load};
//!
//! let dawg = CompletionDawg::load("words.dawg")?;
//! assert!(dawg.contains("foo"));
//! for key in dawg.iter_keys("fo") {
//!     println!("{}", String::from_utf8_lossy(&key));
//! }
//! # Ok::<(), dawg_rs::DawgError>(())
//! ```

#![deny(unsafe_op_in_unsafe_fn)]

mod completer;
mod config;
mod dictionary;
mod error;
mod guide;
mod layout;
mod load;
mod record;
mod similar;
pub mod units;
mod views;

#[cfg(test)]
mod testutil;

#[cfg(test)]
mod proptests;

pub use completer::Completer;
pub use config::{ByteOrder, Config, PAYLOAD_SEPARATOR};
pub use dictionary::Dictionary;
pub use error::{DawgError, Result};
pub use guide::Guide;
pub use load::Load;
pub use record::{Field, RecordCodec, StructFormat, MAX_RECORD_SIZE};
pub use similar::Replaces;
pub use views::{
    BytesDawg, BytesItems, CompletionDawg, Dawg, IntCompletionDawg, IntDawg, IntItems, Keys,
    RecordDawg, RecordItems,
};
