/// Where the caller intends to keep the buffer.
///
/// The store itself only needs a contiguous mutable byte region; the intent
/// is recorded so the code that allocates that region can act on it.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum StorageIntent {
    /// Working memory.
    #[default]
    Volatile,
    /// Non-volatile memory such as EEPROM or flash.
    Persistent,
}

/// Configuration for a [`Document`](crate::Document).
///
/// # Examples
///
/// ```rust
/// use jsonfrag::{Document, DocumentOptions, StorageIntent};
///
/// let doc = Document::new(DocumentOptions {
///     capacity: 128,
///     storage: StorageIntent::Persistent,
///     initialize_empty_object: true,
///     ..Default::default()
/// });
/// assert_eq!(doc.as_bytes(), b"{}");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DocumentOptions {
    /// Fixed size of the buffer in bytes.
    ///
    /// Values below 2 are raised to 2 so that the empty object always fits.
    ///
    /// # Default
    ///
    /// `256`
    pub capacity: usize,

    /// Storage medium the caller intends to back the buffer with.
    ///
    /// # Default
    ///
    /// [`StorageIntent::Volatile`]
    pub storage: StorageIntent,

    /// Whether `clear` and `reset` zero the whole buffer.
    ///
    /// When `false` only the length changes and the stale bytes past it are
    /// left in place, unreachable.
    ///
    /// # Default
    ///
    /// `false`
    pub wipe_on_clear: bool,

    /// Whether a new document starts as `{}` rather than empty.
    ///
    /// Leave this off when an ingestion adapter is going to fill the buffer.
    ///
    /// # Default
    ///
    /// `false`
    pub initialize_empty_object: bool,
}

impl DocumentOptions {
    pub(crate) const MIN_CAPACITY: usize = 2;

    pub(crate) fn effective_capacity(&self) -> usize {
        self.capacity.max(Self::MIN_CAPACITY)
    }
}

impl Default for DocumentOptions {
    fn default() -> Self {
        Self {
            capacity: 256,
            storage: StorageIntent::Volatile,
            wipe_on_clear: false,
            initialize_empty_object: false,
        }
    }
}
