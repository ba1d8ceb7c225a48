//! Loading/error/data state around an asynchronous catalog fetch.
//!
//! Every load is stamped with a [`LoadTicket`] carrying the boundary's
//! generation at the time it started. Starting a new load or cancelling bumps
//! the generation, so a response arriving for an older ticket is dropped
//! instead of overwriting newer state.

use memecart_core::CatalogItem;

use crate::error::SourceError;
use crate::source::CatalogSource;

/// Identifies one load attempt. Only the most recent ticket may settle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoadTicket(u64);

/// Observable state of the most recent load.
///
/// A failed load keeps the data from the last successful one.
#[derive(Debug)]
pub struct FetchBoundary<T> {
    data: Option<T>,
    loading: bool,
    error: Option<SourceError>,
    generation: u64,
}

impl<T> Default for FetchBoundary<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> FetchBoundary<T> {
    /// Creates a boundary in the loading state with no data.
    #[must_use]
    pub fn new() -> Self {
        Self {
            data: None,
            loading: true,
            error: None,
            generation: 0,
        }
    }

    #[must_use]
    pub fn data(&self) -> Option<&T> {
        self.data.as_ref()
    }

    #[must_use]
    pub fn loading(&self) -> bool {
        self.loading
    }

    #[must_use]
    pub fn error(&self) -> Option<&SourceError> {
        self.error.as_ref()
    }

    /// Starts a load, superseding any load still in flight.
    pub fn begin(&mut self) -> LoadTicket {
        self.generation += 1;
        self.loading = true;
        LoadTicket(self.generation)
    }

    #[must_use]
    pub fn is_current(&self, ticket: LoadTicket) -> bool {
        ticket.0 == self.generation
    }

    /// Applies the outcome of the load identified by `ticket`.
    ///
    /// Returns `false`, leaving state untouched, when the ticket has been
    /// superseded by a later [`begin`](Self::begin) or [`cancel`](Self::cancel).
    pub fn settle(&mut self, ticket: LoadTicket, result: Result<T, SourceError>) -> bool {
        if !self.is_current(ticket) {
            tracing::debug!(
                ticket = ticket.0,
                generation = self.generation,
                "dropping stale fetch result"
            );
            return false;
        }

        self.loading = false;
        match result {
            Ok(data) => {
                self.data = Some(data);
                self.error = None;
            }
            Err(e) => {
                tracing::warn!(
                    error = %e,
                    has_prior_data = self.data.is_some(),
                    "catalog fetch failed"
                );
                self.error = Some(e);
            }
        }
        true
    }

    /// Abandons any in-flight load; its result will be ignored.
    pub fn cancel(&mut self) {
        self.generation += 1;
        self.loading = false;
    }
}

impl FetchBoundary<Vec<CatalogItem>> {
    /// Fetches the catalog from `source` and settles the result.
    ///
    /// Also used to retry after a failure. Returns whether the result was
    /// applied; a ticket taken earlier with [`begin`](Self::begin) is
    /// superseded by this load.
    ///
    /// The boundary stays mutably borrowed until the fetch completes, so
    /// loads issued through this method never overlap. A consumer that needs
    /// to start a newer load while one is in flight takes a ticket with
    /// [`begin`](Self::begin), runs the fetch itself, and hands the outcome
    /// to [`settle`](Self::settle).
    #[must_use]
    pub async fn load<S: CatalogSource>(&mut self, source: &S) -> bool {
        let ticket = self.begin();
        let result = source.fetch_catalog().await;
        self.settle(ticket, result)
    }
}
