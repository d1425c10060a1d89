//! Cache error types

use thiserror::Error;

/// Result type for cache operations.
pub type CacheResult<T> = Result<T, CacheError>;

/// Errors raised by cache backends.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum CacheError {
	/// The value could not be encoded or decoded.
	#[error("cache serialization error: {0}")]
	Serialization(String),

	/// The backend could not be reached.
	#[error("cache backend unavailable: {0}")]
	Unavailable(String),
}

impl From<serde_json::Error> for CacheError {
	fn from(e: serde_json::Error) -> Self {
		CacheError::Serialization(e.to_string())
	}
}
