//! Shared handles for command handlers: config, storage, and the catalog
//! source.

use std::path::Path;
use std::sync::Arc;

use memecart_core::{AppConfig, EnrichedItem};
use memecart_source::{FetchBoundary, ImgflipClient};
use memecart_store::{Cart, FileMedium, MemoryMedium, MetadataCache, StorageMedium};

pub(crate) struct Context {
    pub(crate) config: AppConfig,
    medium: Arc<dyn StorageMedium>,
    client: ImgflipClient,
}

impl Context {
    /// # Errors
    ///
    /// Returns an error if the catalog client cannot be built from `config`.
    /// Storage problems never fail here; see [`open_medium`].
    pub(crate) fn open(config: AppConfig) -> anyhow::Result<Self> {
        let client = ImgflipClient::from_config(&config)
            .map_err(|e| anyhow::anyhow!("failed to build catalog client: {e}"))?;
        let medium = open_medium(&config.storage_dir);
        Ok(Self {
            config,
            medium,
            client,
        })
    }

    pub(crate) fn cart(&self) -> Cart {
        Cart::open(Arc::clone(&self.medium))
    }

    /// Fetches the catalog and attaches persisted (or newly assigned)
    /// metadata to every item.
    ///
    /// # Errors
    ///
    /// Returns the fetch error when the catalog source fails.
    pub(crate) async fn load_catalog(&self) -> anyhow::Result<Vec<EnrichedItem>> {
        let mut boundary = FetchBoundary::new();
        if !boundary.load(&self.client).await {
            anyhow::bail!("catalog load was superseded before it completed");
        }
        if let Some(err) = boundary.error() {
            anyhow::bail!(
                "failed to load catalog from {}: {err}",
                self.client.catalog_url()
            );
        }

        let items = boundary.data().map(Vec::as_slice).unwrap_or_default();
        let mut metadata = MetadataCache::open(Arc::clone(&self.medium), self.config.unit_price);
        let enriched = metadata.enrich(items);
        tracing::info!(
            items = enriched.len(),
            cached = metadata.len(),
            "catalog loaded"
        );
        Ok(enriched)
    }
}

/// Opens the on-disk store, falling back to process memory when the
/// directory cannot be used. State then lasts only for this run.
pub(crate) fn open_medium(dir: &Path) -> Arc<dyn StorageMedium> {
    match FileMedium::open(dir) {
        Ok(medium) => Arc::new(medium),
        Err(e) => {
            tracing::warn!(
                dir = %dir.display(),
                error = %e,
                "storage directory unavailable; state will not persist"
            );
            Arc::new(MemoryMedium::new())
        }
    }
}
