//! Caption-pair → hosted-URL cache
//!
//! Keeps one URL per caption pair for the lifetime of the process so a
//! repeated request never re-renders or re-uploads. There is no eviction
//! and no expiry; unbounded growth is accepted.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;

/// One generated image is identified by its caption pair. Equality is
/// structural, so swapping short and long produces a different key.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CacheKey {
    pub short: String,
    pub long: String,
}

impl CacheKey {
    pub fn new(short: impl Into<String>, long: impl Into<String>) -> Self {
        Self {
            short: short.into(),
            long: long.into(),
        }
    }
}

#[async_trait]
pub trait Cache: Send + Sync {
    async fn get(&self, key: &CacheKey) -> Option<String>;
    async fn set(&self, key: CacheKey, url: String);
}

/// Process-lifetime cache behind a reader/writer lock: concurrent request
/// handlers share clones of the same map, readers run in parallel, writers
/// are exclusive.
#[derive(Clone)]
pub struct InMemoryCache {
    urls: Arc<RwLock<HashMap<CacheKey, String>>>,
}

impl InMemoryCache {
    pub fn new() -> Self {
        Self {
            urls: Arc::new(RwLock::new(HashMap::new())),
        }
    }
}

impl Default for InMemoryCache {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Cache for InMemoryCache {
    async fn get(&self, key: &CacheKey) -> Option<String> {
        let urls = self.urls.read().await;
        urls.get(key).cloned()
    }

    async fn set(&self, key: CacheKey, url: String) {
        let mut urls = self.urls.write().await;
        urls.insert(key, url);
    }
}
