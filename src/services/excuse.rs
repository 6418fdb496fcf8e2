//! Excuse delivery flow
//!
//! Ties the renderer, the cache and the uploader together: a caption pair
//! resolves to a hosted URL, rendering and uploading at most once per pair.

use std::sync::Arc;

use tracing::debug;

use crate::cache::{Cache, CacheKey};
use crate::errors::AppError;
use crate::render::{encode_png, Renderer};
use crate::upload::Uploader;

#[derive(Clone)]
pub struct ExcuseService {
    renderer: Renderer,
    cache: Arc<dyn Cache>,
    uploader: Arc<dyn Uploader>,
}

impl ExcuseService {
    pub fn new(renderer: Renderer, cache: Arc<dyn Cache>, uploader: Arc<dyn Uploader>) -> Self {
        Self {
            renderer,
            cache,
            uploader,
        }
    }

    /// Returns the hosted URL for a caption pair.
    ///
    /// On a cache hit nothing is rendered or uploaded. On a miss the pair is
    /// composed, encoded into a scratch file, uploaded, and only then
    /// cached; any failure on the way leaves the cache untouched. The
    /// scratch file does not outlive the call.
    pub async fn resolve(&self, short: &str, long: &str) -> Result<String, AppError> {
        let key = CacheKey::new(short, long);
        if let Some(url) = self.cache.get(&key).await {
            debug!("cache hit for ({short}, {long})");
            return Ok(url);
        }

        let bitmap = self.renderer.compose(short, long)?;
        let png = encode_png(&bitmap)?;

        let scratch = tempfile::Builder::new()
            .prefix("excuse")
            .suffix(".png")
            .tempfile()?;
        tokio::fs::write(scratch.path(), &png).await?;

        let url = self.uploader.upload(scratch.path()).await?;
        self.cache.set(key, url.clone()).await;
        Ok(url)
    }
}
