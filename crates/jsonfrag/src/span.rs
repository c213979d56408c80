//! Views into a [`Document`](crate::Document) buffer.
//!
//! A view is a pair of byte offsets plus the generation of the document at
//! the time it was produced. Views never own bytes; read them back through
//! [`Document::text`](crate::Document::text) and friends.

/// Half-open byte range `[offset, offset + len)` in a document buffer.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Span {
    /// Offset of the first byte.
    pub offset: usize,
    /// Number of bytes.
    pub len: usize,
}

impl Span {
    /// Creates a span from a start offset and a length.
    #[must_use]
    pub const fn new(offset: usize, len: usize) -> Self {
        Self { offset, len }
    }

    /// Creates a span from start (inclusive) and end (exclusive) offsets.
    #[must_use]
    pub const fn from_bounds(start: usize, end: usize) -> Self {
        Self {
            offset: start,
            len: end - start,
        }
    }

    /// Offset one past the last byte.
    #[must_use]
    pub const fn end(&self) -> usize {
        self.offset + self.len
    }

    /// Returns `true` if the span covers no bytes.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// The span with one byte removed from each end.
    ///
    /// Used to step inside a value's enclosing delimiters.
    pub(crate) const fn inner(&self) -> Self {
        if self.len < 2 {
            Self::new(self.offset, 0)
        } else {
            Self::new(self.offset + 1, self.len - 2)
        }
    }
}

/// The kind of a located value, decided by its first byte.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ValueKind {
    /// Starts with an ASCII digit or `-`.
    Integer,
    /// A quoted string. The value's span excludes the quotes.
    String,
    /// `[...]`, delimiters included.
    Array,
    /// `{...}`, delimiters included.
    Object,
    /// A bare `true`, `false` or `null` token.
    Literal,
    /// Nothing was found. This is not the JSON `null` literal.
    Null,
}

impl ValueKind {
    /// Scalars carry no nested delimiters.
    #[must_use]
    pub const fn is_scalar(self) -> bool {
        matches!(self, Self::Integer | Self::String | Self::Literal)
    }
}

/// A key located in the buffer, quotes excluded.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Key {
    /// The key text.
    pub span: Span,
    /// The key of the enclosing object, when the lookup went through a path.
    pub parent: Option<Span>,
}

/// A value located in the buffer.
///
/// Valid only for the document generation it was produced in.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Value {
    pub(crate) span: Span,
    pub(crate) kind: ValueKind,
    pub(crate) key: Option<Key>,
    pub(crate) generation: u32,
}

impl Value {
    pub(crate) const fn null(generation: u32) -> Self {
        Self {
            span: Span::new(0, 0),
            kind: ValueKind::Null,
            key: None,
            generation,
        }
    }

    /// The value's content span. Strings exclude their quotes.
    #[must_use]
    pub const fn span(&self) -> Span {
        self.span
    }

    /// The value's span as written in the buffer, quotes included.
    #[must_use]
    pub const fn raw_span(&self) -> Span {
        match self.kind {
            ValueKind::String => Span::new(self.span.offset - 1, self.span.len + 2),
            _ => self.span,
        }
    }

    /// The kind of the value.
    #[must_use]
    pub const fn kind(&self) -> ValueKind {
        self.kind
    }

    /// The key that owns this value, if one was found.
    #[must_use]
    pub const fn key(&self) -> Option<Key> {
        self.key
    }

    /// Returns `true` if the lookup that produced this value found nothing.
    #[must_use]
    pub const fn is_null(&self) -> bool {
        matches!(self.kind, ValueKind::Null)
    }

    /// The document generation this view belongs to.
    #[must_use]
    pub const fn generation(&self) -> u32 {
        self.generation
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn inner_strips_one_byte_each_side() {
        assert_eq!(Span::new(3, 5).inner(), Span::new(4, 3));
        assert_eq!(Span::new(3, 2).inner(), Span::new(4, 0));
        assert_eq!(Span::new(3, 1).inner(), Span::new(3, 0));
    }

    #[test]
    fn raw_span_adds_quotes_for_strings_only() {
        let mut v = Value::null(0);
        v.span = Span::new(6, 1);
        v.kind = ValueKind::String;
        assert_eq!(v.raw_span(), Span::new(5, 3));
        v.kind = ValueKind::Integer;
        assert_eq!(v.raw_span(), Span::new(6, 1));
    }
}
