pub mod boundary;
pub mod client;
pub mod error;
pub mod normalize;
pub mod rate_limit;
pub mod source;
pub mod types;

pub use boundary::{FetchBoundary, LoadTicket};
pub use client::ImgflipClient;
pub use error::SourceError;
pub use normalize::{normalize_catalog, normalize_meme};
pub use source::CatalogSource;
pub use types::{ImgflipData, ImgflipMeme, ImgflipResponse};
