use thiserror::Error;

/// Why a lookup produced no value.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum LookupError {
    /// The key is not a member of the searched object.
    #[error("key not found")]
    KeyNotFound,
    /// A path segment names no member of its object.
    #[error("parent not found")]
    ParentNotFound,
    /// A path segment names a member that is not an object.
    #[error("parent is not an object")]
    ParentNotObject,
    /// The key was found but its value runs off the end of the search range.
    #[error("malformed document")]
    MalformedDocument,
}

/// Errors reported by [`Document`](crate::Document) operations.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum DocumentError {
    /// The operation needs more bytes than the buffer can hold. The buffer is
    /// unchanged.
    #[error("out of space: need {needed} bytes, capacity is {capacity}")]
    OutOfSpace {
        /// Length the buffer would have had after the operation.
        needed: usize,
        /// The fixed capacity.
        capacity: usize,
    },
    /// A direct byte access was past the live length.
    #[error("index {index} out of range for length {len}")]
    IndexOutOfRange {
        /// Requested index.
        index: usize,
        /// Live length of the buffer.
        len: usize,
    },
    /// A lookup failed.
    #[error(transparent)]
    Lookup(#[from] LookupError),
    /// A view was produced before the most recent mutation.
    #[error("view is stale: produced at generation {view}, document is at {current}")]
    StaleView {
        /// Generation recorded in the view.
        view: u32,
        /// Current generation of the document.
        current: u32,
    },
    /// The buffer or the text to write is not a JSON shape the store accepts.
    #[error("malformed input: {0}")]
    Malformed(&'static str),
}

impl DocumentError {
    pub(crate) const fn out_of_space(needed: usize, capacity: usize) -> Self {
        Self::OutOfSpace { needed, capacity }
    }
}

#[cfg(test)]
mod tests {
    use alloc::string::ToString;

    use super::*;

    #[test]
    fn display_messages() {
        assert_eq!(
            DocumentError::out_of_space(12, 8).to_string(),
            "out of space: need 12 bytes, capacity is 8"
        );
        assert_eq!(
            DocumentError::from(LookupError::ParentNotObject).to_string(),
            "parent is not an object"
        );
        assert_eq!(
            DocumentError::IndexOutOfRange { index: 4, len: 2 }.to_string(),
            "index 4 out of range for length 2"
        );
    }
}
