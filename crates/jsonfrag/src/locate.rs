//! Key/value locator.
//!
//! Everything here is a forward scan over `&[u8]`. Two counters are kept
//! while scanning: the nesting depth (`{`/`[` up, `}`/`]` down) and whether
//! the scanner is inside a string literal. Bytes inside strings never count
//! as delimiters, and a backslash inside a string skips the byte after it.
//!
//! A key only matches when its full quoted text equals the requested key and
//! the closing quote is followed by `:`. By default only direct members of
//! the searched object match; [`Scope::Descendants`] lifts that restriction.

use crate::{Document, LookupError, Span, Value, ValueKind, span::Key};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Scope {
    /// Keys at depth 0 of the searched range.
    Members,
    /// Keys at any depth, first in document order.
    Descendants,
}

/// A key and its bounded value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Located {
    pub(crate) key: Span,
    pub(crate) value: Span,
    pub(crate) kind: ValueKind,
}

impl Located {
    /// The value as written, quotes included.
    pub(crate) fn raw(&self) -> Span {
        match self.kind {
            ValueKind::String => Span::new(self.value.offset - 1, self.value.len + 2),
            _ => self.value,
        }
    }
}

/// Index of the quote closing the string whose opening quote is at `open`.
pub(crate) fn string_end(bytes: &[u8], open: usize, end: usize) -> Option<usize> {
    let mut i = open + 1;
    while i < end {
        match bytes[i] {
            b'"' => return Some(i),
            b'\\' => i += 2,
            _ => i += 1,
        }
    }
    None
}

/// Classifies the value starting at `start` and bounds it, stopping at `end`.
pub(crate) fn bound_value(
    bytes: &[u8],
    start: usize,
    end: usize,
) -> Result<(Span, ValueKind), LookupError> {
    let Some(&first) = bytes.get(start).filter(|_| start < end) else {
        return Err(LookupError::MalformedDocument);
    };
    match first {
        b'0'..=b'9' | b'-' => Ok((scalar_end(bytes, start, end), ValueKind::Integer)),
        b't' | b'f' | b'n' => Ok((scalar_end(bytes, start, end), ValueKind::Literal)),
        b'"' => {
            let close = string_end(bytes, start, end).ok_or(LookupError::MalformedDocument)?;
            Ok((Span::from_bounds(start + 1, close), ValueKind::String))
        }
        b'[' => Ok((composite_end(bytes, start, end)?, ValueKind::Array)),
        b'{' => Ok((composite_end(bytes, start, end)?, ValueKind::Object)),
        _ => Err(LookupError::MalformedDocument),
    }
}

/// A bare scalar runs until the next separator or closer, or the range end.
fn scalar_end(bytes: &[u8], start: usize, end: usize) -> Span {
    let stop = bytes[start..end]
        .iter()
        .position(|b| matches!(b, b',' | b'}' | b']'))
        .map_or(end, |n| start + n);
    Span::from_bounds(start, stop)
}

/// An array or object ends at the closer that brings depth back to zero.
fn composite_end(bytes: &[u8], start: usize, end: usize) -> Result<Span, LookupError> {
    let mut depth = 0usize;
    let mut i = start;
    while i < end {
        match bytes[i] {
            b'"' => {
                i = string_end(bytes, i, end).ok_or(LookupError::MalformedDocument)?;
            }
            b'{' | b'[' => depth += 1,
            b'}' | b']' => {
                depth -= 1;
                if depth == 0 {
                    return Ok(Span::from_bounds(start, i + 1));
                }
            }
            _ => {}
        }
        i += 1;
    }
    Err(LookupError::MalformedDocument)
}

/// Finds `key` in `range` and bounds its value.
pub(crate) fn find_key(
    bytes: &[u8],
    range: Span,
    key: &[u8],
    scope: Scope,
) -> Result<Located, LookupError> {
    let end = range.end().min(bytes.len());
    let mut depth = 0usize;
    let mut i = range.offset;
    while i < end {
        match bytes[i] {
            b'"' => {
                let close = string_end(bytes, i, end).ok_or(LookupError::MalformedDocument)?;
                let is_key = bytes.get(close + 1) == Some(&b':') && close + 1 < end;
                if is_key
                    && (depth == 0 || scope == Scope::Descendants)
                    && &bytes[i + 1..close] == key
                {
                    let (value, kind) = bound_value(bytes, close + 2, end)?;
                    return Ok(Located {
                        key: Span::from_bounds(i + 1, close),
                        value,
                        kind,
                    });
                }
                i = close;
            }
            b'{' | b'[' => depth += 1,
            b'}' | b']' => depth = depth.saturating_sub(1),
            _ => {}
        }
        i += 1;
    }
    log::trace!("key {:?} not found in {range:?}", bstr::BStr::new(key));
    Err(LookupError::KeyNotFound)
}

impl<S: AsRef<[u8]> + AsMut<[u8]>> Document<S> {
    /// The root object's members, without its braces.
    pub(crate) fn root_span(&self) -> Result<Span, LookupError> {
        match self.as_bytes() {
            [b'{', .., b'}'] => Ok(Span::new(0, self.len).inner()),
            _ => Err(LookupError::ParentNotFound),
        }
    }

    pub(crate) fn value_at(&self, located: Located, parent: Option<Span>) -> Value {
        Value {
            span: located.value,
            kind: located.kind,
            key: Some(Key {
                span: located.key,
                parent,
            }),
            generation: self.generation,
        }
    }

    pub(crate) fn lookup_or_null(&self, found: Result<Value, LookupError>) -> Value {
        found.unwrap_or_else(|_| Value::null(self.generation))
    }

    /// Looks up a member of the root object.
    ///
    /// Returns a [`ValueKind::Null`] value if the key is absent.
    pub fn locate(&self, key: &str) -> Value {
        self.lookup_or_null(self.try_locate(key))
    }

    /// Looks up a member of the root object, saying why nothing was found.
    ///
    /// # Errors
    ///
    /// [`LookupError::KeyNotFound`] if the key is not a member,
    /// [`LookupError::ParentNotFound`] if there is no root object, and
    /// [`LookupError::MalformedDocument`] if the value is truncated.
    pub fn try_locate(&self, key: &str) -> Result<Value, LookupError> {
        let range = self.root_span()?;
        self.try_locate_in(key, range)
    }

    /// Looks up `key` among the members found directly in `range`.
    ///
    /// `range` is usually the inner span of an object (between its braces);
    /// it is clamped to the live length.
    pub fn locate_in(&self, key: &str, range: Span) -> Value {
        self.lookup_or_null(self.try_locate_in(key, range))
    }

    /// As [`locate_in`](Self::locate_in), saying why nothing was found.
    ///
    /// # Errors
    ///
    /// [`LookupError::KeyNotFound`] or [`LookupError::MalformedDocument`].
    pub fn try_locate_in(&self, key: &str, range: Span) -> Result<Value, LookupError> {
        let located = find_key(self.as_bytes(), range, key.as_bytes(), Scope::Members)?;
        Ok(self.value_at(located, None))
    }

    /// Finds the first key named `key` at any depth, in document order.
    ///
    /// Returns a [`ValueKind::Null`] value if there is none.
    pub fn locate_deep(&self, key: &str) -> Value {
        let found = self.root_span().and_then(|range| {
            find_key(self.as_bytes(), range, key.as_bytes(), Scope::Descendants)
        });
        self.lookup_or_null(found.map(|located| self.value_at(located, None)))
    }
}
