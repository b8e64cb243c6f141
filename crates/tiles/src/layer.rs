use std::future::Future;

use runtime::metrics::Metrics;
use storage::KeyValueStore;
use tracing::warn;

use crate::error::TileError;
use crate::id::{TileId, UrlTemplate};
use crate::image::TileImage;

pub const COUNTER_CACHE_HIT: &str = "tiles.cache_hit";
pub const COUNTER_CACHE_MISS: &str = "tiles.cache_miss";
pub const COUNTER_FETCH_FAILED: &str = "tiles.fetch_failed";
pub const COUNTER_STORE_WRITE_FAILED: &str = "tiles.store_write_failed";

/// Network boundary for tile bytes.
pub trait TileFetch {
    fn fetch(&self, url: &str) -> impl Future<Output = Result<Vec<u8>, TileError>> + Send;
}

/// Tile layer with a persisted load-once-then-offline cache.
///
/// Policy is write-after-read-miss keyed by the exact expanded URL:
/// - a cache hit decodes the stored data URI and never re-fetches;
/// - a miss fetches, decodes, re-encodes as a data URI, and persists it;
/// - persisting may fail (store quota) without affecting the returned tile;
/// - every failure is scoped to its own tile, siblings keep loading.
///
/// Writes are idempotent per URL, so overlapping loads of the same tile
/// cannot corrupt the store: the last writer wins with identical content.
#[derive(Debug)]
pub struct CachedTileLayer<S, F> {
    template: UrlTemplate,
    store: S,
    fetcher: F,
    metrics: Metrics,
    closed: bool,
}

impl<S: KeyValueStore, F: TileFetch> CachedTileLayer<S, F> {
    pub fn new(template: UrlTemplate, store: S, fetcher: F) -> Self {
        Self {
            template,
            store,
            fetcher,
            metrics: Metrics::new(),
            closed: false,
        }
    }

    pub fn metrics(&self) -> &Metrics {
        &self.metrics
    }

    pub fn url_for(&self, tile: TileId) -> String {
        self.template.expand(tile)
    }

    /// Resolves one tile, from the persisted cache or the network.
    pub async fn load(&mut self, tile: TileId) -> Result<TileImage, TileError> {
        if self.closed {
            return Err(TileError::LayerClosed);
        }

        let url = self.template.expand(tile);

        // An unreadable store entry counts as a miss; a readable one is
        // authoritative even if it no longer decodes.
        if let Ok(Some(cached)) = self.store.get(&url) {
            self.metrics.inc_counter(COUNTER_CACHE_HIT);
            return TileImage::from_data_uri(&cached);
        }

        self.metrics.inc_counter(COUNTER_CACHE_MISS);
        let bytes = match self.fetcher.fetch(&url).await {
            Ok(bytes) => bytes,
            Err(err) => {
                self.metrics.inc_counter(COUNTER_FETCH_FAILED);
                return Err(err);
            }
        };
        let image = TileImage::decode(bytes)?;

        // Swallowed on purpose: rendering must not depend on cache durability.
        if let Err(err) = self.store.put(&url, &image.to_data_uri()) {
            self.metrics.inc_counter(COUNTER_STORE_WRITE_FAILED);
            warn!(%url, "tile cache write failed: {err}");
        }

        Ok(image)
    }

    /// Tears the layer down; later loads fail fast and issue no fetches.
    pub fn close(&mut self) {
        self.closed = true;
    }

    pub fn is_closed(&self) -> bool {
        self.closed
    }
}
