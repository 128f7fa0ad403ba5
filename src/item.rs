//! Configuration items and their scalar kinds

/// Scalar type tag for a configuration item.
///
/// `Unset` marks an item that has not been populated yet. It is never
/// written to disk and never appears in a loaded store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Kind {
    /// Free-form text value.
    Text,
    /// Integer value, stored as decimal text.
    Integer,
    /// Internal sentinel, never persisted.
    #[default]
    Unset,
}

impl Kind {
    /// Returns the on-disk code for this kind, or `None` for `Unset`.
    pub(crate) fn code(self) -> Option<u8> {
        match self {
            Kind::Text => Some(0),
            Kind::Integer => Some(1),
            Kind::Unset => None,
        }
    }

    /// Maps an on-disk kind code back to a kind.
    ///
    /// Codes outside the persisted set are rejected rather than carried as
    /// an unknown variant; the caller drops the line.
    pub(crate) fn from_code(code: u32) -> Option<Self> {
        match code {
            0 => Some(Kind::Text),
            1 => Some(Kind::Integer),
            _ => None,
        }
    }
}

/// One stored configuration entry.
///
/// The original name of the entry is not retained; `digest` is its durable
/// identity both in memory and on disk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Item {
    /// Scalar type tag.
    pub kind: Kind,
    /// Digest of the entry's name (32 lowercase hex characters).
    pub digest: String,
    /// Value exactly as stored. Integer items hold their decimal text form.
    pub raw_value: String,
}
