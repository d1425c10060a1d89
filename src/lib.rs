//! # simple-seo
//!
//! Per-page SEO metadata for content sites: titles, descriptions, keywords,
//! Open Graph and Twitter tags, stored per view and rendered as markup.
//!
//! ## How a page is rendered
//!
//! 1. The page's cache key is built from the view name, the subject's
//!    content type, the locale and the request path. Cached markup is
//!    returned as is.
//! 2. Otherwise the most specific record is resolved: the oldest record for
//!    the view (narrowed by content type when the page has a subject), or
//!    the site-wide default record when none matches.
//! 3. Records pass through the population cascade when loaded, so empty
//!    Open Graph and Twitter fields are seeded once from the plain title
//!    and description and stored.
//! 4. Fields render in declaration order, with the default record's values
//!    available to templates as `default`, and the markup is cached.
//!
//! ## Crates
//!
//! - [`simple_seo_core`]: tag values, record types, records and the cascade
//! - [`simple_seo_cache`]: cache backends
//! - [`simple_seo_conf`]: layered settings
//!
//! ## Quick Example
//!
//! ```
//! use simple_seo::prelude::*;
//! use std::sync::Arc;
//!
//! # async fn example() {
//! let schema = MetadataSchema::standard("PageMetadata");
//! let store = Arc::new(InMemoryMetadataStore::new());
//! let manager = MetadataManager::new(store.clone(), schema.clone());
//!
//! let mut default = manager.get_or_create_default().await.unwrap();
//! default.set_value("title", "My Site").unwrap();
//! manager.save(&mut default).await.unwrap();
//!
//! let node = MetadataNode::new(
//!     store,
//!     InMemoryCache::new(),
//!     MetadataRegistry::new(schema),
//!     SeoSettings::default(),
//! );
//! let html = node.render(&PageRequest::new("/about/").with_view_name("about")).await;
//! assert!(html.contains("<title>My Site</title>"));
//! # }
//! ```

#![warn(missing_docs)]

pub mod node;
pub mod registry;
pub mod renderer;
pub mod resolver;
pub mod store;

pub use node::{MetadataNode, PageRequest, ViewResolver};
pub use registry::MetadataRegistry;
pub use renderer::TagRenderer;
pub use resolver::{MetadataResolver, Resolution, cache_key};
pub use store::{InMemoryMetadataStore, MetadataManager, MetadataStore};

/// Commonly used types
pub mod prelude {
	pub use crate::node::{MetadataNode, PageRequest, ViewResolver};
	pub use crate::registry::MetadataRegistry;
	pub use crate::renderer::TagRenderer;
	pub use crate::resolver::{MetadataResolver, Resolution};
	pub use crate::store::{InMemoryMetadataStore, MetadataManager, MetadataStore};
	pub use simple_seo_cache::{Cache, InMemoryCache};
	pub use simple_seo_conf::{SeoSettings, SettingsBuilder};
	pub use simple_seo_core::{
		ContentType, FieldSpec, MetadataRecord, MetadataSchema, SeoError, SeoResult, SeoSubject,
		Subject,
	};
}
