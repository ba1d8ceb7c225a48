use thiserror::Error;

/// Faults raised by a [`crate::StorageMedium`].
///
/// These never leave the crate's public read/write paths: [`crate::DurableCell`]
/// logs them and falls back to its in-memory value.
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("storage medium unavailable: {reason}")]
    Unavailable { reason: String },

    #[error("quota exceeded writing {key}: {needed} bytes needed, capacity is {capacity}")]
    QuotaExceeded {
        key: String,
        needed: usize,
        capacity: usize,
    },

    #[error("invalid storage key \"{key}\"")]
    InvalidKey { key: String },

    #[error("storage I/O error for {key}: {source}")]
    Io {
        key: String,
        #[source]
        source: std::io::Error,
    },
}
