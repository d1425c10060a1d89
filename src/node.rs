//! Request-level metadata rendering
//!
//! [`MetadataNode`] ties the pieces together for one page: it builds the
//! cache key, returns cached markup when present, and otherwise resolves
//! the records, renders them and caches the result.

use crate::registry::MetadataRegistry;
use crate::renderer::TagRenderer;
use crate::resolver::{MetadataResolver, cache_key};
use crate::store::{MetadataManager, MetadataStore};
use simple_seo_cache::{Cache, CacheKeyBuilder};
use simple_seo_conf::SeoSettings;
use simple_seo_core::{SeoSubject, Subject};
use std::sync::Arc;

/// Maps a request path to the name of the view handling it.
pub trait ViewResolver: Send + Sync {
	/// View name for `path`, or `None` when no named view matches.
	fn resolve(&self, path: &str) -> Option<String>;
}

impl<F> ViewResolver for F
where
	F: Fn(&str) -> Option<String> + Send + Sync,
{
	fn resolve(&self, path: &str) -> Option<String> {
		self(path)
	}
}

/// The page being rendered.
#[derive(Debug, Clone, Default)]
pub struct PageRequest {
	/// Full request path, including the query string if it changes content.
	pub path: String,
	/// Name of the handling view; resolved from the path when `None`.
	pub view_name: Option<String>,
	/// Active locale; the configured language code when `None`.
	pub locale: Option<String>,
	/// Object the page is about.
	pub subject: Option<Subject>,
}

impl PageRequest {
	/// Creates a request for `path`.
	pub fn new(path: impl Into<String>) -> Self {
		Self {
			path: path.into(),
			..Default::default()
		}
	}

	/// Sets the view name.
	pub fn with_view_name(mut self, view_name: impl Into<String>) -> Self {
		self.view_name = Some(view_name.into());
		self
	}

	/// Sets the active locale.
	pub fn with_locale(mut self, locale: impl Into<String>) -> Self {
		self.locale = Some(locale.into());
		self
	}

	/// Sets the page's subject object.
	pub fn with_subject(mut self, subject: Subject) -> Self {
		self.subject = Some(subject);
		self
	}

	/// Snapshots `object` as the page's subject.
	pub fn with_object<T: SeoSubject>(self, object: &T) -> Self {
		self.with_subject(Subject::from_object(object))
	}
}

/// Renders the metadata tags of a page.
///
/// Rendering never fails: store errors produce empty markup and cache errors
/// are treated as misses, both logged at `warn`. Cached markup is not
/// invalidated when records change; it expires after the configured TTL.
///
/// # Examples
///
/// ```
/// use simple_seo::{InMemoryMetadataStore, MetadataManager, MetadataNode, MetadataRegistry, PageRequest};
/// use simple_seo_cache::InMemoryCache;
/// use simple_seo_conf::SeoSettings;
/// use simple_seo_core::MetadataSchema;
/// use std::sync::Arc;
///
/// # async fn example() {
/// let schema = MetadataSchema::standard("PageMetadata");
/// let store = Arc::new(InMemoryMetadataStore::new());
///
/// let manager = MetadataManager::new(store.clone(), schema.clone());
/// let mut home = manager.create("home");
/// home.set_value("title", "Home").unwrap();
/// manager.save(&mut home).await.unwrap();
///
/// let node = MetadataNode::new(
///     store,
///     InMemoryCache::new(),
///     MetadataRegistry::new(schema),
///     SeoSettings::default(),
/// );
/// let html = node.render(&PageRequest::new("/").with_view_name("home")).await;
/// assert!(html.starts_with("<title>Home</title>"));
/// # }
/// ```
pub struct MetadataNode<S, C> {
	store: Arc<S>,
	cache: C,
	registry: MetadataRegistry,
	settings: SeoSettings,
	keys: CacheKeyBuilder,
	renderer: TagRenderer,
	view_resolver: Option<Box<dyn ViewResolver>>,
}

impl<S: MetadataStore, C: Cache> MetadataNode<S, C> {
	/// Creates a node reading records from `store` and caching in `cache`.
	pub fn new(
		store: Arc<S>,
		cache: C,
		registry: MetadataRegistry,
		settings: SeoSettings,
	) -> Self {
		Self {
			store,
			cache,
			registry,
			keys: CacheKeyBuilder::new(settings.cache_prefix.clone()),
			renderer: TagRenderer::from_settings(&settings),
			settings,
			view_resolver: None,
		}
	}

	/// Resolves view names from request paths when requests carry none.
	pub fn with_view_resolver(mut self, resolver: impl ViewResolver + 'static) -> Self {
		self.view_resolver = Some(Box::new(resolver));
		self
	}

	/// Settings in effect.
	pub fn settings(&self) -> &SeoSettings {
		&self.settings
	}

	/// Cache backend.
	pub fn cache(&self) -> &C {
		&self.cache
	}

	/// Cache key the markup of `request` is stored under.
	pub fn cache_key(&self, request: &PageRequest) -> String {
		let view_name = self.view_name(request);
		self.key_for(request, view_name.as_deref())
	}

	/// Markup for `request`; empty when no metadata applies.
	pub async fn render(&self, request: &PageRequest) -> String {
		let view_name = self.view_name(request);
		let key = self.key_for(request, view_name.as_deref());

		if self.settings.use_cache {
			match self.cache.get::<String>(&key).await {
				Ok(Some(html)) if !html.is_empty() => {
					tracing::debug!(key = %key, "Metadata cache hit");
					return html;
				}
				Ok(_) => tracing::debug!(key = %key, "Metadata cache miss"),
				Err(e) => tracing::warn!(key = %key, "Metadata cache unavailable: {}", e),
			}
		}

		let view_name = view_name.unwrap_or_default();
		let schema = self.registry.schema_for(&view_name).clone();
		let manager = MetadataManager::new(self.store.clone(), schema);
		let content_type = request.subject.as_ref().map(|s| &s.content_type);

		let resolution = match MetadataResolver::new(&manager)
			.resolve(&view_name, content_type)
			.await
		{
			Ok(resolution) => resolution,
			Err(e) => {
				tracing::warn!(view_name = %view_name, "Failed to resolve metadata: {}", e);
				return String::new();
			}
		};

		let Some(metadata) = &resolution.metadata else {
			return String::new();
		};
		let html = self.renderer.render(
			metadata,
			resolution.default_metadata.as_ref(),
			request.subject.as_ref(),
		);

		if !html.is_empty()
			&& self.settings.use_cache
			&& let Err(e) = self
				.cache
				.set(&key, &html, Some(self.settings.cache_ttl()))
				.await
		{
			tracing::warn!(key = %key, "Failed to cache metadata: {}", e);
		}

		html
	}

	fn view_name(&self, request: &PageRequest) -> Option<String> {
		request.view_name.clone().or_else(|| {
			self.view_resolver
				.as_ref()
				.and_then(|resolver| resolver.resolve(&request.path))
		})
	}

	fn key_for(&self, request: &PageRequest, view_name: Option<&str>) -> String {
		let locale = request
			.locale
			.as_deref()
			.unwrap_or(&self.settings.language_code);
		cache_key(
			&self.keys,
			view_name.unwrap_or("None"),
			request.subject.as_ref().map(|s| &s.content_type),
			locale,
			&request.path,
		)
	}
}
