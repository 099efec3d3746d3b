//! Time-based page cache with explicit revalidation.
//!
//! Entries are keyed by route path (`/`, `/gallery/{id}`, ...) and hold the
//! serialized page view. A write revalidates every dependent path, so the next
//! request loads fresh data. Expired entries are swept whenever a new one is
//! stored.

use serde::Serialize;
use serde_json::Value;
use std::collections::HashMap;
use std::future::Future;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::RwLock;
use tracing::{debug, error};

use crate::config::CacheConfig;

/// Key of the shared layout shell (nav, footer, theme)
pub const LAYOUT: &str = "layout";

#[derive(Debug, Clone)]
struct Entry {
    stored_at: Instant,
    value: Arc<Value>,
}

#[derive(Debug)]
pub struct PageCache {
    enabled: bool,
    ttl: Duration,
    entries: RwLock<HashMap<String, Entry>>,
    /// Bumped by every revalidation
    generation: AtomicU64,
}

impl PageCache {
    pub fn new(config: &CacheConfig) -> Self {
        Self {
            enabled: config.enabled,
            ttl: Duration::from_secs(config.page_ttl_secs),
            entries: RwLock::new(HashMap::new()),
            generation: AtomicU64::new(0),
        }
    }

    pub async fn get(&self, key: &str) -> Option<Arc<Value>> {
        if !self.enabled {
            return None;
        }
        let entries = self.entries.read().await;
        let entry = entries.get(key)?;
        if entry.stored_at.elapsed() >= self.ttl {
            return None;
        }
        debug!("Page cache hit: {}", key);
        Some(entry.value.clone())
    }

    pub async fn put(&self, key: &str, value: Value) -> Arc<Value> {
        self.store(key, value, None).await
    }

    /// Serve a fresh entry or run `load` and remember its result.
    ///
    /// `None` from the loader (a missing record) is never cached. A result whose
    /// load overlapped a revalidation is served but not stored.
    pub async fn get_or_load<T, F, Fut>(&self, key: &str, load: F) -> Option<Arc<Value>>
    where
        T: Serialize,
        F: FnOnce() -> Fut,
        Fut: Future<Output = Option<T>>,
    {
        if let Some(hit) = self.get(key).await {
            return Some(hit);
        }

        let started = self.generation.load(Ordering::SeqCst);
        let page = load().await?;
        match serde_json::to_value(&page) {
            Ok(value) => Some(self.store(key, value, Some(started)).await),
            Err(e) => {
                error!("Failed to serialize page {}: {}", key, e);
                None
            }
        }
    }

    async fn store(&self, key: &str, value: Value, started: Option<u64>) -> Arc<Value> {
        let value = Arc::new(value);
        if !self.enabled {
            return value;
        }

        let mut entries = self.entries.write().await;
        if started.is_some_and(|g| g != self.generation.load(Ordering::SeqCst)) {
            debug!("Not caching {}: revalidated during load", key);
            return value;
        }

        let ttl = self.ttl;
        entries.retain(|_, entry| entry.stored_at.elapsed() < ttl);
        entries.insert(
            key.to_string(),
            Entry {
                stored_at: Instant::now(),
                value: value.clone(),
            },
        );
        value
    }

    /// Drop the given paths so the next request reloads them.
    pub async fn revalidate<I, S>(&self, paths: I)
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut entries = self.entries.write().await;
        self.generation.fetch_add(1, Ordering::SeqCst);
        for path in paths {
            let path = path.as_ref();
            if entries.remove(path).is_some() {
                debug!("Revalidated {}", path);
            }
        }
    }

    pub async fn len(&self) -> usize {
        self.entries.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}
