//! Association handle used for optionally hydrated references.

use serde::{Deserialize, Serialize};

/// Reference from one entity to another.
///
/// Reads fill `Key` when the related row was not requested and `Loaded`
/// when the caller asked for eager loading.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Related<K, T> {
    /// No association set yet.
    #[default]
    Unset,
    /// Association known by key only.
    Key(K),
    /// Association hydrated with the related entity.
    Loaded(T),
}

impl<K, T> Related<K, T> {
    /// Returns the hydrated entity, if loaded.
    pub fn loaded(&self) -> Option<&T> {
        match self {
            Self::Loaded(value) => Some(value),
            _ => None,
        }
    }

    pub fn is_loaded(&self) -> bool {
        matches!(self, Self::Loaded(_))
    }

    pub fn is_unset(&self) -> bool {
        matches!(self, Self::Unset)
    }
}

/// Entities that expose a storage-assigned key.
pub trait Keyed {
    type Key: Copy;

    fn key(&self) -> Option<Self::Key>;
}

impl<K: Copy, T: Keyed<Key = K>> Related<K, T> {
    /// Returns the referenced key regardless of hydration state.
    pub fn key(&self) -> Option<K> {
        match self {
            Self::Unset => None,
            Self::Key(key) => Some(*key),
            Self::Loaded(value) => value.key(),
        }
    }
}
