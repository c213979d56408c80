use alloc::{boxed::Box, vec};
use core::fmt;

use bstr::BStr;

use crate::{DocumentError, DocumentOptions, Ingest, Span, StorageIntent, Value, ValueKind};

/// A single JSON object held in a fixed-capacity byte buffer.
///
/// `S` is the backing region. [`Document::new`] allocates a boxed slice once;
/// [`Document::with_storage`] accepts any caller-provided region such as a
/// `[u8; N]` array or a `&mut [u8]`.
///
/// Invariants kept by every operation:
/// - `len <= capacity`
/// - no byte `<= 0x20` is stored
/// - a non-empty document that came through [`Document::reset`] or a
///   successful [`Document::from_json`] starts with `{` and ends with `}`
pub struct Document<S = Box<[u8]>> {
    pub(crate) storage: S,
    pub(crate) len: usize,
    pub(crate) generation: u32,
    pub(crate) options: DocumentOptions,
}

impl Document {
    /// Allocates a buffer of `options.capacity` bytes.
    #[must_use]
    pub fn new(options: DocumentOptions) -> Self {
        let storage = vec![0u8; options.effective_capacity()].into_boxed_slice();
        let mut doc = Self {
            storage,
            len: 0,
            generation: 0,
            options,
        };
        if options.initialize_empty_object {
            doc.reset();
        }
        doc
    }

    /// Builds a document from JSON text, dropping whitespace and control
    /// bytes.
    ///
    /// # Errors
    ///
    /// [`DocumentError::OutOfSpace`] if the compacted text does not fit, or
    /// [`DocumentError::Malformed`] if it is not delimited by `{` and `}`.
    pub fn from_json(options: DocumentOptions, text: &[u8]) -> Result<Self, DocumentError> {
        let mut doc = Self::new(DocumentOptions {
            initialize_empty_object: false,
            ..options
        });
        doc.ingest(&mut Ingest::new(), text)?;
        doc.check_delimiters()?;
        Ok(doc)
    }
}

impl<S: AsRef<[u8]> + AsMut<[u8]>> Document<S> {
    /// Wraps a caller-provided region. The capacity is the region's length;
    /// `options.capacity` is ignored.
    ///
    /// # Errors
    ///
    /// [`DocumentError::OutOfSpace`] if the region is shorter than the two
    /// bytes of an empty object.
    pub fn with_storage(storage: S, options: DocumentOptions) -> Result<Self, DocumentError> {
        let capacity = storage.as_ref().len();
        if capacity < DocumentOptions::MIN_CAPACITY {
            return Err(DocumentError::out_of_space(
                DocumentOptions::MIN_CAPACITY,
                capacity,
            ));
        }
        let mut doc = Self {
            storage,
            len: 0,
            generation: 0,
            options: DocumentOptions {
                capacity,
                ..options
            },
        };
        if options.initialize_empty_object {
            doc.reset();
        }
        Ok(doc)
    }

    /// Fixed size of the buffer in bytes.
    pub fn capacity(&self) -> usize {
        self.storage.as_ref().len()
    }

    /// Number of bytes in use.
    pub fn len(&self) -> usize {
        self.len
    }

    /// Returns `true` if no bytes are in use.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Storage medium recorded at construction.
    pub fn storage_intent(&self) -> StorageIntent {
        self.options.storage
    }

    /// Counter bumped by every call that changes the buffer.
    pub fn generation(&self) -> u32 {
        self.generation
    }

    /// The live bytes.
    pub fn as_bytes(&self) -> &[u8] {
        &self.storage.as_ref()[..self.len]
    }

    /// The byte at `index`.
    ///
    /// # Errors
    ///
    /// [`DocumentError::IndexOutOfRange`] if `index >= len`.
    pub fn byte_at(&self, index: usize) -> Result<u8, DocumentError> {
        self.as_bytes()
            .get(index)
            .copied()
            .ok_or(DocumentError::IndexOutOfRange {
                index,
                len: self.len,
            })
    }

    /// Appends one byte. Bytes `<= 0x20` are dropped and `Ok(false)` is
    /// returned; stored bytes return `Ok(true)`.
    ///
    /// # Errors
    ///
    /// [`DocumentError::OutOfSpace`] if the buffer is full.
    pub fn append(&mut self, byte: u8) -> Result<bool, DocumentError> {
        if byte <= b' ' {
            return Ok(false);
        }
        let capacity = self.capacity();
        if self.len == capacity {
            log::warn!("append rejected: buffer full at {capacity} bytes");
            return Err(DocumentError::out_of_space(self.len + 1, capacity));
        }
        self.storage.as_mut()[self.len] = byte;
        self.len += 1;
        self.bump();
        Ok(true)
    }

    /// Sets the buffer to the empty object `{}`.
    pub fn reset(&mut self) {
        self.wipe();
        let buf = self.storage.as_mut();
        buf[0] = b'{';
        buf[1] = b'}';
        self.len = 2;
        self.bump();
    }

    /// Drops all content. The document has no root object until the next
    /// [`reset`](Self::reset) or ingestion.
    pub fn clear(&mut self) {
        self.wipe();
        self.len = 0;
        self.bump();
    }

    /// The content of a located value. Strings come back without quotes.
    ///
    /// # Errors
    ///
    /// [`DocumentError::StaleView`] if the document changed since `value`
    /// was produced, and [`DocumentError::IndexOutOfRange`] if `value` points
    /// past the live length (a view taken from another document).
    pub fn text(&self, value: &Value) -> Result<&[u8], DocumentError> {
        self.view_slice(value, value.span)
    }

    /// The value as written in the buffer, quotes included.
    ///
    /// # Errors
    ///
    /// As for [`text`](Self::text).
    pub fn raw_text(&self, value: &Value) -> Result<&[u8], DocumentError> {
        if value.kind == ValueKind::Null {
            self.check_view(value)?;
            return Ok(&[]);
        }
        self.view_slice(value, value.raw_span())
    }

    /// The text of the key that owns `value`, or `None` for a not-found
    /// value.
    ///
    /// # Errors
    ///
    /// As for [`text`](Self::text).
    pub fn key_text(&self, value: &Value) -> Result<Option<&[u8]>, DocumentError> {
        self.check_view(value)?;
        value.key.map(|key| self.slice(key.span)).transpose()
    }

    pub(crate) fn check_view(&self, value: &Value) -> Result<(), DocumentError> {
        if value.generation == self.generation {
            Ok(())
        } else {
            Err(DocumentError::StaleView {
                view: value.generation,
                current: self.generation,
            })
        }
    }

    fn view_slice(&self, value: &Value, span: Span) -> Result<&[u8], DocumentError> {
        self.check_view(value)?;
        self.slice(span)
    }

    /// The live bytes under `span`.
    pub(crate) fn slice(&self, span: Span) -> Result<&[u8], DocumentError> {
        self.as_bytes()
            .get(span.offset..span.end())
            .ok_or(DocumentError::IndexOutOfRange {
                index: span.end(),
                len: self.len,
            })
    }

    pub(crate) fn bump(&mut self) {
        self.generation = self.generation.wrapping_add(1);
    }

    pub(crate) fn check_delimiters(&self) -> Result<(), DocumentError> {
        match self.as_bytes() {
            [b'{', .., b'}'] => Ok(()),
            _ => Err(DocumentError::Malformed(
                "document must be a single object",
            )),
        }
    }

    fn wipe(&mut self) {
        if self.options.wipe_on_clear {
            self.storage.as_mut().fill(0);
        }
    }
}

impl<S: AsRef<[u8]>> fmt::Debug for Document<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let bytes = self.storage.as_ref();
        f.debug_struct("Document")
            .field("json", &BStr::new(&bytes[..self.len]))
            .field("len", &self.len)
            .field("capacity", &bytes.len())
            .field("generation", &self.generation)
            .finish()
    }
}

impl<S: AsRef<[u8]>> fmt::Display for Document<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(BStr::new(&self.storage.as_ref()[..self.len]), f)
    }
}
