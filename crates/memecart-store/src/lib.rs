pub mod cart;
pub mod cell;
pub mod error;
pub mod medium;
pub mod metadata;

pub use cart::{Cart, CartLine, CART_KEY};
pub use cell::DurableCell;
pub use error::StorageError;
pub use medium::{FileMedium, MemoryMedium, StorageMedium};
pub use metadata::{MetadataCache, MetadataRecord, METADATA_KEY};
