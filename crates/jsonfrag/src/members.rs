use core::iter::FusedIterator;

use crate::{
    Document, Key, LookupError, ParentPath, Span, Value,
    locate::{bound_value, string_end},
};

/// Iterator over the members of one object, in document order.
///
/// Created by [`Document::members`]. Yields each member's value; the key is
/// available through [`Value::key`]. Iteration stops at the first byte that
/// does not fit the `"key":value,` shape.
#[derive(Debug, Clone)]
pub struct Members<'d> {
    bytes: &'d [u8],
    pos: usize,
    end: usize,
    parent: Option<Span>,
    generation: u32,
}

impl Members<'_> {
    fn member(&self) -> Result<(Span, Span, crate::ValueKind), LookupError> {
        let open = self.pos;
        if self.bytes.get(open) != Some(&b'"') {
            return Err(LookupError::MalformedDocument);
        }
        let close = string_end(self.bytes, open, self.end).ok_or(LookupError::MalformedDocument)?;
        if self.bytes.get(close + 1) != Some(&b':') {
            return Err(LookupError::MalformedDocument);
        }
        let (value, kind) = bound_value(self.bytes, close + 2, self.end)?;
        Ok((Span::from_bounds(open + 1, close), value, kind))
    }
}

impl Iterator for Members<'_> {
    type Item = Value;

    fn next(&mut self) -> Option<Self::Item> {
        if self.pos >= self.end {
            return None;
        }
        match self.member() {
            Ok((key, span, kind)) => {
                let value = Value {
                    span,
                    kind,
                    key: Some(Key {
                        span: key,
                        parent: self.parent,
                    }),
                    generation: self.generation,
                };
                let raw_end = value.raw_span().end();
                self.pos = if self.bytes.get(raw_end) == Some(&b',') {
                    raw_end + 1
                } else {
                    self.end
                };
                Some(value)
            }
            Err(_) => {
                log::trace!("member scan stopped at offset {}", self.pos);
                self.pos = self.end;
                None
            }
        }
    }
}

impl FusedIterator for Members<'_> {}

impl<S: AsRef<[u8]> + AsMut<[u8]>> Document<S> {
    /// Iterates the members of the object named by `path`.
    ///
    /// ```rust
    /// use jsonfrag::{Document, DocumentOptions};
    ///
    /// let doc = Document::from_json(
    ///     DocumentOptions::default(),
    ///     br#"{"a":1,"b":{"c":[2],"d":"x"}}"#,
    /// )
    /// .unwrap();
    /// let keys: Vec<_> = doc
    ///     .members("b")
    ///     .unwrap()
    ///     .map(|v| doc.key_text(&v).unwrap().unwrap().to_vec())
    ///     .collect();
    /// assert_eq!(keys, [b"c".to_vec(), b"d".to_vec()]);
    /// ```
    ///
    /// # Errors
    ///
    /// [`LookupError::ParentNotFound`] or [`LookupError::ParentNotObject`] if
    /// `path` does not name an object.
    pub fn members<'p>(&self, path: impl Into<ParentPath<'p>>) -> Result<Members<'_>, LookupError> {
        let scope = self.object_scope(path.into())?;
        Ok(Members {
            bytes: self.as_bytes(),
            pos: scope.inner.offset,
            end: scope.inner.end(),
            parent: scope.key,
            generation: self.generation,
        })
    }
}
