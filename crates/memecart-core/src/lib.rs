pub mod app_config;
pub mod catalog;
pub mod config;
pub mod filters;

pub use app_config::{AppConfig, Environment};
pub use catalog::{CatalogItem, Category, EnrichedItem, ItemMetadata, Rating};
pub use config::{load_app_config, load_app_config_from_env};
pub use filters::{CategoryFilter, SortKey};

use thiserror::Error;

#[derive(Debug, Error)]
pub enum CoreError {
    #[error("invalid rating {0}: must be between 1 and 5")]
    InvalidRating(u8),

    #[error("invalid category: {0}")]
    InvalidCategory(String),

    #[error("invalid sort key: {0}")]
    InvalidSortKey(String),
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid value for {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },
}
