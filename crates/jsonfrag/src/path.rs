use core::{iter::Filter, slice, str::Split};

use crate::{
    Document, LookupError, Span, Value, ValueKind,
    locate::{Scope, find_key},
};

/// The chain of object keys from the root down to a value's parent.
///
/// An empty path is the root object. Paths convert from key slices and from
/// `'/'`-separated strings. Empty segments of a slashed path are ignored, so
/// `""`, `"/"` and `&[]` all name the root; a slice keeps every key as given,
/// so `&[""]` names the member whose key is empty.
///
/// ```rust
/// use jsonfrag::ParentPath;
///
/// let a = ParentPath::parse("user/address");
/// let b = ParentPath::from(&["user", "address"]);
/// assert!(a.segments().eq(b.segments()));
/// assert!(ParentPath::root().is_root());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParentPath<'p> {
    /// One key per segment.
    Keys(&'p [&'p str]),
    /// Segments joined by `'/'`.
    Slashed(&'p str),
}

impl<'p> ParentPath<'p> {
    /// The root object.
    #[must_use]
    pub const fn root() -> Self {
        Self::Keys(&[])
    }

    /// A `'/'`-separated path such as `"config/net"`.
    #[must_use]
    pub const fn parse(text: &'p str) -> Self {
        Self::Slashed(text)
    }

    /// Iterates the segments from the root down.
    #[must_use]
    pub fn segments(&self) -> Segments<'p> {
        match *self {
            Self::Keys(keys) => Segments::Keys(keys.iter()),
            Self::Slashed(text) => {
                Segments::Slashed(text.split('/').filter(non_empty as fn(&&'p str) -> bool))
            }
        }
    }

    /// Returns `true` if the path has no segments.
    #[must_use]
    pub fn is_root(&self) -> bool {
        self.segments().next().is_none()
    }
}

impl Default for ParentPath<'_> {
    fn default() -> Self {
        Self::root()
    }
}

impl<'p> From<&'p str> for ParentPath<'p> {
    fn from(text: &'p str) -> Self {
        Self::parse(text)
    }
}

impl<'p, 'k: 'p> From<&'p [&'k str]> for ParentPath<'p> {
    fn from(keys: &'p [&'k str]) -> Self {
        Self::Keys(keys)
    }
}

impl<'p, 'k: 'p, const N: usize> From<&'p [&'k str; N]> for ParentPath<'p> {
    fn from(keys: &'p [&'k str; N]) -> Self {
        Self::Keys(keys)
    }
}

fn non_empty(segment: &&str) -> bool {
    !segment.is_empty()
}

/// Iterator over the segments of a [`ParentPath`].
#[derive(Debug, Clone)]
pub enum Segments<'p> {
    #[doc(hidden)]
    Keys(slice::Iter<'p, &'p str>),
    #[doc(hidden)]
    Slashed(Filter<Split<'p, char>, fn(&&'p str) -> bool>),
}

impl<'p> Iterator for Segments<'p> {
    type Item = &'p str;

    fn next(&mut self) -> Option<Self::Item> {
        match self {
            Self::Keys(keys) => keys.next().copied(),
            Self::Slashed(parts) => parts.next(),
        }
    }
}

/// An object reached by walking a path.
#[derive(Debug, Clone, Copy)]
pub(crate) struct ObjectScope {
    /// The object's members, braces excluded.
    pub(crate) inner: Span,
    /// The key that names the object, `None` for the root.
    pub(crate) key: Option<Span>,
}

impl<S: AsRef<[u8]> + AsMut<[u8]>> Document<S> {
    /// Walks `path` from the root, narrowing to each named object in turn.
    pub(crate) fn object_scope(&self, path: ParentPath<'_>) -> Result<ObjectScope, LookupError> {
        let mut scope = ObjectScope {
            inner: self.root_span()?,
            key: None,
        };
        for segment in path.segments() {
            let found = match find_key(self.as_bytes(), scope.inner, segment.as_bytes(), Scope::Members)
            {
                Ok(found) => found,
                Err(LookupError::KeyNotFound) => {
                    log::trace!("path segment {segment:?} not found");
                    return Err(LookupError::ParentNotFound);
                }
                Err(err) => return Err(err),
            };
            if found.kind != ValueKind::Object {
                log::trace!("path segment {segment:?} is {:?}, not an object", found.kind);
                return Err(LookupError::ParentNotObject);
            }
            scope = ObjectScope {
                inner: found.value.inner(),
                key: Some(found.key),
            };
        }
        Ok(scope)
    }

    /// Looks up `key` in the object named by `path`.
    ///
    /// Returns a [`ValueKind::Null`] value if any path segment is missing or
    /// not an object, or if the key is absent.
    pub fn resolve<'p>(&self, key: &str, path: impl Into<ParentPath<'p>>) -> Value {
        self.lookup_or_null(self.try_resolve(key, path))
    }

    /// As [`resolve`](Self::resolve), saying why nothing was found.
    ///
    /// # Errors
    ///
    /// [`LookupError::ParentNotFound`], [`LookupError::ParentNotObject`],
    /// [`LookupError::KeyNotFound`] or [`LookupError::MalformedDocument`].
    pub fn try_resolve<'p>(
        &self,
        key: &str,
        path: impl Into<ParentPath<'p>>,
    ) -> Result<Value, LookupError> {
        let scope = self.object_scope(path.into())?;
        let found = find_key(self.as_bytes(), scope.inner, key.as_bytes(), Scope::Members)?;
        Ok(self.value_at(found, scope.key))
    }

    /// The members span of the object named by `path`, braces excluded.
    ///
    /// # Errors
    ///
    /// As for [`try_resolve`](Self::try_resolve), minus `KeyNotFound`.
    pub fn parent_span<'p>(&self, path: impl Into<ParentPath<'p>>) -> Result<Span, LookupError> {
        self.object_scope(path.into()).map(|scope| scope.inner)
    }
}
