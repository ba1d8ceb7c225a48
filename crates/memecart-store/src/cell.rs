//! Typed, persistent read/write cells over a [`StorageMedium`].

use std::sync::Arc;

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::medium::StorageMedium;

/// A typed value persisted as JSON under one storage key.
///
/// The persisted value is loaded synchronously in [`DurableCell::open`], so the
/// first [`DurableCell::get`] already reflects storage. Storage faults never
/// escape: an unreadable or corrupt blob yields the default (and the corrupt
/// entry is cleared), and a failed write keeps the in-memory value.
///
/// Two cells opened on the same key do not observe each other's writes until
/// [`DurableCell::reload`]; the medium itself is last-write-wins.
pub struct DurableCell<T> {
    medium: Arc<dyn StorageMedium>,
    key: String,
    default: T,
    value: T,
}

impl<T> DurableCell<T>
where
    T: Serialize + DeserializeOwned + Clone,
{
    pub fn open(medium: Arc<dyn StorageMedium>, key: impl Into<String>, default: T) -> Self {
        let key = key.into();
        let value = Self::read(medium.as_ref(), &key).unwrap_or_else(|| default.clone());
        Self {
            medium,
            key,
            default,
            value,
        }
    }

    /// Reads and decodes the blob under `key`.
    ///
    /// Returns `None` when the key is absent, the medium fails, or the blob
    /// does not decode as `T`. Undecodable blobs are removed from the medium.
    pub fn read(medium: &dyn StorageMedium, key: &str) -> Option<T> {
        let raw = match medium.get(key) {
            Ok(Some(raw)) => raw,
            Ok(None) => return None,
            Err(e) => {
                tracing::warn!(key, error = %e, "storage read failed; using default");
                return None;
            }
        };

        match serde_json::from_str::<T>(&raw) {
            Ok(value) => Some(value),
            Err(e) => {
                tracing::warn!(key, error = %e, "discarding corrupt stored value");
                if let Err(e) = medium.remove(key) {
                    tracing::warn!(key, error = %e, "failed to clear corrupt stored value");
                }
                None
            }
        }
    }

    /// Encodes `value` and stores it under `key`.
    ///
    /// Returns `false` when the write was lost; the fault is logged, not raised.
    pub fn write(medium: &dyn StorageMedium, key: &str, value: &T) -> bool {
        let encoded = match serde_json::to_string(value) {
            Ok(encoded) => encoded,
            Err(e) => {
                tracing::warn!(key, error = %e, "failed to encode value for storage");
                return false;
            }
        };

        match medium.set(key, &encoded) {
            Ok(()) => true,
            Err(e) => {
                tracing::warn!(key, error = %e, "storage write failed; keeping in-memory value");
                false
            }
        }
    }

    #[must_use]
    pub fn key(&self) -> &str {
        &self.key
    }

    #[must_use]
    pub fn get(&self) -> &T {
        &self.value
    }

    /// Replaces the value and persists it.
    pub fn set(&mut self, value: T) {
        self.value = value;
        self.persist();
    }

    /// Mutates the value in place and persists it when `f` reports a change.
    ///
    /// Returns what `f` returned.
    pub fn update_if<F>(&mut self, f: F) -> bool
    where
        F: FnOnce(&mut T) -> bool,
    {
        let changed = f(&mut self.value);
        if changed {
            self.persist();
        }
        changed
    }

    /// Re-reads the medium, picking up writes made through other cells.
    ///
    /// An absent or unreadable key resets the value to the default.
    pub fn reload(&mut self) {
        self.value =
            Self::read(self.medium.as_ref(), &self.key).unwrap_or_else(|| self.default.clone());
    }

    fn persist(&self) -> bool {
        Self::write(self.medium.as_ref(), &self.key, &self.value)
    }
}

impl<T> std::fmt::Debug for DurableCell<T>
where
    T: std::fmt::Debug,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DurableCell")
            .field("key", &self.key)
            .field("value", &self.value)
            .finish_non_exhaustive()
    }
}
