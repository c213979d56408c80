//! Byte-at-a-time ingestion.
//!
//! The cursor lives with the caller and is threaded through every call, so a
//! document can be filled from a UART, a socket or a file in whatever chunks
//! arrive.

use crate::{Document, DocumentError};

/// Position of an ingestion adapter in its input stream.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Ingest {
    /// Input bytes consumed so far, stored or dropped.
    pub position: usize,
    /// Bytes appended to the document.
    pub accepted: usize,
    /// Whitespace and control bytes dropped.
    pub dropped: usize,
}

impl Ingest {
    /// A cursor at the start of a stream.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            position: 0,
            accepted: 0,
            dropped: 0,
        }
    }
}

impl<S: AsRef<[u8]> + AsMut<[u8]>> Document<S> {
    /// Appends `bytes` in order, dropping anything `<= 0x20`.
    ///
    /// On failure `cursor.position` is the index in the overall stream of the
    /// byte that did not fit; everything before it was stored.
    ///
    /// # Errors
    ///
    /// [`DocumentError::OutOfSpace`] when the buffer fills up.
    pub fn ingest(&mut self, cursor: &mut Ingest, bytes: &[u8]) -> Result<(), DocumentError> {
        for &byte in bytes {
            if self.append(byte)? {
                cursor.accepted += 1;
            } else {
                cursor.dropped += 1;
            }
            cursor.position += 1;
        }
        log::trace!(
            "ingested {} bytes, document at {}/{}",
            bytes.len(),
            self.len,
            self.capacity()
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::DocumentOptions;

    #[test]
    fn cursor_is_threaded_across_chunks() {
        let mut doc = Document::new(DocumentOptions {
            capacity: 32,
            ..Default::default()
        });
        let mut cursor = Ingest::new();
        doc.ingest(&mut cursor, b"{ \"k\":\r\n").unwrap();
        doc.ingest(&mut cursor, b" \"v\" }").unwrap();
        assert_eq!(doc.as_bytes(), br#"{"k":"v"}"#);
        assert_eq!(
            cursor,
            Ingest {
                position: 14,
                accepted: 9,
                dropped: 5,
            }
        );
    }

    #[test]
    fn overflow_reports_position() {
        let mut doc = Document::new(DocumentOptions {
            capacity: 4,
            ..Default::default()
        });
        let mut cursor = Ingest::new();
        let err = doc.ingest(&mut cursor, b"{ \"ab\"}").unwrap_err();
        assert!(matches!(err, DocumentError::OutOfSpace { capacity: 4, .. }));
        assert_eq!(cursor.position, 5);
        assert_eq!(doc.as_bytes(), b"{\"ab");
    }
}
