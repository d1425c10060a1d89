//! Cache backend trait

use crate::error::CacheResult;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Key/value store holding serialized values with an optional TTL.
#[async_trait]
pub trait Cache: Send + Sync {
	/// Gets a value; expired and missing keys both yield `None`.
	async fn get<T>(&self, key: &str) -> CacheResult<Option<T>>
	where
		T: for<'de> Deserialize<'de> + Send;

	/// Stores a value. `None` falls back to the backend's default TTL.
	async fn set<T>(&self, key: &str, value: &T, ttl: Option<Duration>) -> CacheResult<()>
	where
		T: Serialize + Send + Sync;

	/// Removes a key. Missing keys are not an error.
	async fn delete(&self, key: &str) -> CacheResult<()>;

	/// Whether a live (non-expired) value exists for `key`.
	async fn has_key(&self, key: &str) -> CacheResult<bool>;

	/// Removes every key.
	async fn clear(&self) -> CacheResult<()>;
}
