use std::future::Future;

use memecart_core::CatalogItem;

use crate::error::SourceError;

/// Provider of the raw catalog listing.
///
/// The source returns the complete listing in one read; all filtering and
/// paging happen client-side.
pub trait CatalogSource {
    /// Fetches the full catalog.
    ///
    /// # Errors
    ///
    /// Returns [`SourceError`] on any transport, status, or payload failure.
    fn fetch_catalog(&self) -> impl Future<Output = Result<Vec<CatalogItem>, SourceError>> + Send;
}
