//! An in-place store for a single JSON object held in one fixed-capacity byte
//! buffer.
//!
//! There is no parse tree. Lookups scan the buffer forward and hand back
//! [`Value`] views (byte offsets plus a kind), and writes shift bytes inside
//! the same buffer. Nothing grows past the capacity chosen at construction.
//!
//! ```rust
//! use jsonfrag::{Document, DocumentOptions, NewValue, ValueKind};
//!
//! let mut doc = Document::from_json(
//!     DocumentOptions { capacity: 64, ..Default::default() },
//!     br#"{ "a": "1", "c": { "d": "x" } }"#,
//! )
//! .unwrap();
//!
//! let d = doc.resolve("d", &["c"]);
//! assert_eq!(d.kind(), ValueKind::String);
//! assert_eq!(doc.text(&d).unwrap(), b"x");
//!
//! doc.upsert("e", NewValue::Raw("[1,2]"), &["c"]).unwrap();
//! assert_eq!(doc.as_bytes(), br#"{"a":"1","c":{"e":[1,2],"d":"x"}}"#);
//! ```
//!
//! Views are only valid until the next mutating call. Every mutation bumps
//! the document's generation and the accessors refuse views from an older
//! generation with [`DocumentError::StaleView`].

#![no_std]
extern crate alloc;

#[cfg(test)]
extern crate std;

mod check;
mod document;
mod error;
mod ingest;
mod locate;
mod members;
mod mutate;
mod number;
mod options;
mod path;
mod span;

#[cfg(test)]
mod tests;

pub use document::Document;
pub use error::{DocumentError, LookupError};
pub use ingest::Ingest;
pub use members::Members;
pub use mutate::NewValue;
pub use options::{DocumentOptions, StorageIntent};
pub use path::ParentPath;
pub use span::{Key, Span, Value, ValueKind};
