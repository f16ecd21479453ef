//! Reading and writing the persisted panel size.

use crate::direction::Axis;
use crate::storage::{KeyValueStore, StorageError};
use kurbo::Size;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors raised while loading or saving a persisted size.
#[derive(Debug, Error)]
pub enum PersistError {
    /// The stored value exists but is not a `{width?, height?}` record.
    #[error("Invalid size data in storage under {key:?}: {source}")]
    Corrupt {
        key: String,
        #[source]
        source: serde_json::Error,
    },
    /// The record could not be serialized for writing.
    #[error("Failed to encode size record for {key:?}: {source}")]
    Encode {
        key: String,
        #[source]
        source: serde_json::Error,
    },
    #[error(transparent)]
    Storage(#[from] StorageError),
}

/// Partial size record. Absent axes are omitted from the serialized form.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct PersistedSize {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub width: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub height: Option<f64>,
}

impl PersistedSize {
    /// A record holding only the extent of `size` along `axis`.
    pub fn for_axis(axis: Axis, size: Size) -> Self {
        match axis {
            Axis::Horizontal => Self {
                width: Some(size.width),
                height: None,
            },
            Axis::Vertical => Self {
                width: None,
                height: Some(size.height),
            },
        }
    }

    /// Width worth applying: present, finite and non-zero.
    pub fn usable_width(&self) -> Option<f64> {
        self.width.filter(|w| w.is_finite() && *w != 0.0)
    }

    /// Height worth applying: present, finite and non-zero.
    pub fn usable_height(&self) -> Option<f64> {
        self.height.filter(|h| h.is_finite() && *h != 0.0)
    }
}

/// Load the record stored under `key`.
///
/// Returns `Ok(None)` if nothing is stored. A stored value that does not
/// parse as a size record is an error, never an empty record.
pub fn load(store: &dyn KeyValueStore, key: &str) -> Result<Option<PersistedSize>, PersistError> {
    let Some(raw) = store.get(key)? else {
        return Ok(None);
    };
    serde_json::from_str(&raw)
        .map(Some)
        .map_err(|source| PersistError::Corrupt {
            key: key.to_string(),
            source,
        })
}

/// Overwrite the record under `key` with `record`. No merge with the previous value.
pub fn save(
    store: &dyn KeyValueStore,
    key: &str,
    record: &PersistedSize,
) -> Result<(), PersistError> {
    let json = serde_json::to_string(record).map_err(|source| PersistError::Encode {
        key: key.to_string(),
        source,
    })?;
    store.set(key, &json)?;
    log::debug!("Persisted size {} under {:?}", json, key);
    Ok(())
}

/// Remove any record under `key`.
pub fn clear(store: &dyn KeyValueStore, key: &str) -> Result<(), PersistError> {
    store.remove(key)?;
    Ok(())
}
