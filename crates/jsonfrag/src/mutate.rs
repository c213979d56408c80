//! Insert and update by shifting bytes inside the buffer.
//!
//! Every write goes through [`Document::splice`]: the resulting length is
//! checked against the capacity before a single byte moves, so a rejected
//! write leaves the buffer exactly as it was.

use crate::{
    Document, DocumentError, LookupError, ParentPath,
    check,
    locate::{Scope, find_key},
    number::IntText,
};

const QUOTE: &[u8] = b"\"";
const KEY_END: &[u8] = b"\":";
const COMMA: &[u8] = b",";
const NOTHING: &[u8] = b"";

/// Text to store as a value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NewValue<'a> {
    /// Written between quotes. The text itself must not contain an unescaped
    /// quote.
    String(&'a str),
    /// Written bare, e.g. `"42"` or `"-1.5e3"`.
    Integer(&'a str),
    /// Written bare: a complete array or object (`"[1,2]"`, `"{\"k\":1}"`)
    /// or one of `true`, `false`, `null`.
    Raw(&'a str),
}

impl<'a> NewValue<'a> {
    /// Picks [`NewValue::Raw`] for text starting with `{` or `[` and
    /// [`NewValue::String`] for anything else.
    #[must_use]
    pub fn infer(text: &'a str) -> Self {
        match text.as_bytes().first() {
            Some(b'{' | b'[') => Self::Raw(text),
            _ => Self::String(text),
        }
    }

    fn text(&self) -> &'a str {
        match *self {
            Self::String(text) | Self::Integer(text) | Self::Raw(text) => text,
        }
    }

    /// Bytes of the value as written into the buffer.
    fn encoded_len(&self) -> usize {
        match self {
            Self::String(text) => text.len() + 2,
            Self::Integer(text) | Self::Raw(text) => text.len(),
        }
    }

    fn validate(&self) -> Result<(), DocumentError> {
        let text = self.text().as_bytes();
        if text.iter().any(|&b| b <= b' ') {
            return Err(DocumentError::Malformed(
                "value contains whitespace or control bytes",
            ));
        }
        match self {
            Self::String(_) => {
                let mut i = 0;
                while i < text.len() {
                    match text[i] {
                        b'"' => {
                            return Err(DocumentError::Malformed(
                                "string value contains an unescaped quote",
                            ));
                        }
                        b'\\' if i + 1 == text.len() => {
                            return Err(DocumentError::Malformed(
                                "string value ends inside an escape",
                            ));
                        }
                        b'\\' => i += 2,
                        _ => i += 1,
                    }
                }
                Ok(())
            }
            Self::Integer(_) => {
                if check::number_end(text, 0) == Some(text.len()) {
                    Ok(())
                } else {
                    Err(DocumentError::Malformed("integer value is not a number"))
                }
            }
            Self::Raw(_) => match text.first() {
                Some(b'{' | b'[' | b't' | b'f' | b'n') if check::is_value(text) => Ok(()),
                Some(b'{' | b'[') => Err(DocumentError::Malformed("raw value is not valid JSON")),
                _ => Err(DocumentError::Malformed(
                    "raw value must be an array, an object or a literal",
                )),
            },
        }
    }
}

fn validate_key(key: &str) -> Result<(), DocumentError> {
    if key.bytes().any(|b| b <= b' ' || b == b'"' || b == b'\\') {
        return Err(DocumentError::Malformed(
            "key contains whitespace, quotes or backslashes",
        ));
    }
    Ok(())
}

impl<S: AsRef<[u8]> + AsMut<[u8]>> Document<S> {
    /// Replaces `remove` bytes at `at` with the concatenation of `parts`.
    ///
    /// The tail after the removed range is shifted left or right first, then
    /// the parts are copied into the gap.
    pub(crate) fn splice(
        &mut self,
        at: usize,
        remove: usize,
        parts: &[&[u8]],
    ) -> Result<(), DocumentError> {
        let insert: usize = parts.iter().map(|part| part.len()).sum();
        let needed = self.len - remove + insert;
        let capacity = self.capacity();
        if needed > capacity {
            log::warn!(
                "write of {insert} bytes over {remove} rejected: {needed} > capacity {capacity}"
            );
            return Err(DocumentError::out_of_space(needed, capacity));
        }

        let tail = at + remove..self.len;
        let buf = self.storage.as_mut();
        buf.copy_within(tail, at + insert);
        let mut cursor = at;
        for part in parts {
            buf[cursor..cursor + part.len()].copy_from_slice(part);
            cursor += part.len();
        }
        self.len = needed;
        self.bump();
        Ok(())
    }

    /// Inserts `key` into the object named by `path`, or replaces its value
    /// if it is already a member.
    ///
    /// New members go first in their object. Views taken before a successful
    /// call are invalid afterwards.
    ///
    /// ```rust
    /// use jsonfrag::{Document, DocumentOptions, NewValue};
    ///
    /// let mut doc = Document::new(DocumentOptions {
    ///     capacity: 32,
    ///     initialize_empty_object: true,
    ///     ..Default::default()
    /// });
    /// doc.upsert("a", NewValue::String("x"), "").unwrap();
    /// doc.upsert("b", NewValue::Integer("1"), "").unwrap();
    /// doc.upsert("a", NewValue::Raw("[]"), "").unwrap();
    /// assert_eq!(doc.as_bytes(), br#"{"b":1,"a":[]}"#);
    /// ```
    ///
    /// # Errors
    ///
    /// - [`DocumentError::Lookup`] with [`LookupError::ParentNotFound`] or
    ///   [`LookupError::ParentNotObject`] if `path` does not name an object
    /// - [`DocumentError::OutOfSpace`] if the result would not fit; the
    ///   buffer is unchanged
    /// - [`DocumentError::Malformed`] if `key` or `value` cannot be written
    ///   without breaking the document
    pub fn upsert<'p>(
        &mut self,
        key: &str,
        value: NewValue<'_>,
        path: impl Into<ParentPath<'p>>,
    ) -> Result<(), DocumentError> {
        validate_key(key)?;
        value.validate()?;
        let scope = self.object_scope(path.into())?;

        let (open, close) = match value {
            NewValue::String(_) => (QUOTE, QUOTE),
            NewValue::Integer(_) | NewValue::Raw(_) => (NOTHING, NOTHING),
        };
        let text = value.text().as_bytes();

        match find_key(self.as_bytes(), scope.inner, key.as_bytes(), Scope::Members) {
            Ok(found) => {
                let old = found.raw();
                log::debug!(
                    "update {key:?}: {} bytes -> {} bytes at {}",
                    old.len,
                    value.encoded_len(),
                    old.offset
                );
                self.splice(old.offset, old.len, &[open, text, close])
            }
            Err(LookupError::KeyNotFound) => {
                let separator = if scope.inner.is_empty() { NOTHING } else { COMMA };
                log::debug!(
                    "insert {key:?}: {} bytes at {}",
                    key.len() + 3 + value.encoded_len() + separator.len(),
                    scope.inner.offset
                );
                self.splice(
                    scope.inner.offset,
                    0,
                    &[QUOTE, key.as_bytes(), KEY_END, open, text, close, separator],
                )
            }
            Err(err) => Err(err.into()),
        }
    }

    /// Stores `value` as a bare integer under `key`.
    ///
    /// # Errors
    ///
    /// As for [`upsert`](Self::upsert).
    pub fn upsert_int<'p>(
        &mut self,
        key: &str,
        value: i64,
        path: impl Into<ParentPath<'p>>,
    ) -> Result<(), DocumentError> {
        let text = IntText::new(value);
        self.upsert(key, NewValue::Integer(text.as_str()), path)
    }
}
