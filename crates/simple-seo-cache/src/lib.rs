//! # simple-seo cache
//!
//! Cache backends for rendered metadata markup.
//!
//! The metadata renderer uses the cache-aside pattern: it looks a page's
//! markup up by key, renders it on a miss, and stores the result with a TTL.
//! Edits to metadata records do not invalidate entries; staleness is bounded
//! by the TTL alone.

#![warn(missing_docs)]

mod cache_trait;
mod entry;
mod error;
mod in_memory;
mod key;

pub use cache_trait::Cache;
pub use error::{CacheError, CacheResult};
pub use in_memory::InMemoryCache;
pub use key::CacheKeyBuilder;
