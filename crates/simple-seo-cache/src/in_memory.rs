//! In-memory cache implementation

use crate::cache_trait::Cache;
use crate::entry::CacheEntry;
use crate::error::CacheResult;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::RwLock;

/// Process-local cache backend
///
/// Expired entries are treated as misses on read and replaced on the next
/// write to the same key.
#[derive(Clone, Default)]
pub struct InMemoryCache {
	store: Arc<RwLock<HashMap<String, CacheEntry>>>,
	default_ttl: Option<Duration>,
}

impl InMemoryCache {
	/// Create a new in-memory cache
	///
	/// # Examples
	///
	/// ```
	/// use simple_seo_cache::{Cache, InMemoryCache};
	///
	/// # async fn example() {
	/// let cache = InMemoryCache::new();
	/// cache.set("key", &"value", None).await.unwrap();
	///
	/// let value: Option<String> = cache.get("key").await.unwrap();
	/// assert_eq!(value.as_deref(), Some("value"));
	/// # }
	/// ```
	pub fn new() -> Self {
		Self::default()
	}

	/// Set a default TTL for entries stored without one
	pub fn with_default_ttl(mut self, ttl: Duration) -> Self {
		self.default_ttl = Some(ttl);
		self
	}

	/// All keys, including expired entries not yet overwritten
	pub async fn list_keys(&self) -> Vec<String> {
		let store = self.store.read().await;
		store.keys().cloned().collect()
	}
}

#[async_trait]
impl Cache for InMemoryCache {
	async fn get<T>(&self, key: &str) -> CacheResult<Option<T>>
	where
		T: for<'de> Deserialize<'de> + Send,
	{
		let store = self.store.read().await;

		match store.get(key) {
			Some(entry) if !entry.is_expired() => {
				let value = serde_json::from_slice(&entry.value)?;
				Ok(Some(value))
			}
			_ => Ok(None),
		}
	}

	async fn set<T>(&self, key: &str, value: &T, ttl: Option<Duration>) -> CacheResult<()>
	where
		T: Serialize + Send + Sync,
	{
		let serialized = serde_json::to_vec(value)?;
		let entry = CacheEntry::new(serialized, ttl.or(self.default_ttl));

		let mut store = self.store.write().await;
		store.insert(key.to_string(), entry);

		Ok(())
	}

	async fn delete(&self, key: &str) -> CacheResult<()> {
		let mut store = self.store.write().await;
		store.remove(key);
		Ok(())
	}

	async fn has_key(&self, key: &str) -> CacheResult<bool> {
		let store = self.store.read().await;
		Ok(store.get(key).is_some_and(|entry| !entry.is_expired()))
	}

	async fn clear(&self) -> CacheResult<()> {
		let mut store = self.store.write().await;
		store.clear();
		Ok(())
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[tokio::test]
	async fn test_in_memory_cache_basic() {
		let cache = InMemoryCache::new();

		cache.set("key1", &"value1", None).await.unwrap();
		let value: Option<String> = cache.get("key1").await.unwrap();
		assert_eq!(value, Some("value1".to_string()));

		assert!(cache.has_key("key1").await.unwrap());
		assert!(!cache.has_key("key2").await.unwrap());

		cache.delete("key1").await.unwrap();
		let value: Option<String> = cache.get("key1").await.unwrap();
		assert_eq!(value, None);
	}

	#[tokio::test]
	async fn test_in_memory_cache_ttl() {
		let cache = InMemoryCache::new();

		cache
			.set("key1", &"value1", Some(Duration::from_millis(100)))
			.await
			.unwrap();

		let value: Option<String> = cache.get("key1").await.unwrap();
		assert_eq!(value, Some("value1".to_string()));

		tokio::time::sleep(Duration::from_millis(150)).await;

		let value: Option<String> = cache.get("key1").await.unwrap();
		assert_eq!(value, None);
	}

	#[tokio::test]
	async fn test_default_ttl_applies_when_none_given() {
		let cache = InMemoryCache::new().with_default_ttl(Duration::from_millis(50));

		cache.set("key1", &"value1", None).await.unwrap();
		assert!(cache.has_key("key1").await.unwrap());

		tokio::time::sleep(Duration::from_millis(80)).await;
		assert!(!cache.has_key("key1").await.unwrap());
	}

	#[tokio::test]
	async fn test_expired_entry_is_listed_until_overwritten() {
		let cache = InMemoryCache::new();

		cache
			.set("key1", &"value1", Some(Duration::from_millis(100)))
			.await
			.unwrap();
		tokio::time::sleep(Duration::from_millis(150)).await;

		assert_eq!(cache.list_keys().await, vec!["key1".to_string()]);
		assert_eq!(cache.get::<String>("key1").await.unwrap(), None);

		cache.set("key1", &"value2", None).await.unwrap();
		let value: Option<String> = cache.get("key1").await.unwrap();
		assert_eq!(value.as_deref(), Some("value2"));
	}

	#[tokio::test]
	async fn test_clear() {
		let cache = InMemoryCache::new();

		cache.set("key1", &"value1", None).await.unwrap();
		cache.set("key2", &"value2", None).await.unwrap();
		cache.clear().await.unwrap();

		assert!(!cache.has_key("key1").await.unwrap());
		assert!(cache.list_keys().await.is_empty());
	}
}
