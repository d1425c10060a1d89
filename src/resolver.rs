//! Metadata resolution with specificity fallback

use crate::store::{MetadataManager, MetadataStore};
use simple_seo_cache::CacheKeyBuilder;
use simple_seo_core::{ContentType, MetadataRecord, SeoResult};

/// Outcome of resolving the metadata for one page.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Resolution {
	/// Record to render.
	pub metadata: Option<MetadataRecord>,
	/// Site-wide default, kept as advisory context while rendering a
	/// specific record. `None` when `metadata` is itself the default.
	pub default_metadata: Option<MetadataRecord>,
}

impl Resolution {
	/// Whether there is nothing to render.
	pub fn is_empty(&self) -> bool {
		self.metadata.is_none()
	}
}

/// Finds the most specific record for a page.
///
/// Specific records for the view win, narrowed by content type when one is
/// known; among several matches the lowest primary key (the oldest record)
/// is chosen. Without a specific match the default record is used.
pub struct MetadataResolver<'a, S> {
	manager: &'a MetadataManager<S>,
}

impl<'a, S: MetadataStore> MetadataResolver<'a, S> {
	/// Creates a resolver reading through `manager`.
	pub fn new(manager: &'a MetadataManager<S>) -> Self {
		Self { manager }
	}

	/// Resolves the records for `view_name`.
	///
	/// `content_type` of `None` applies no content-type filter. An empty
	/// `view_name` (a page with no named view) only gets the default.
	pub async fn resolve(
		&self,
		view_name: &str,
		content_type: Option<&ContentType>,
	) -> SeoResult<Resolution> {
		let default_metadata = self.manager.get_default().await?;
		let specific = if view_name.is_empty() {
			None
		} else {
			self.manager
				.filter(view_name, content_type)
				.await?
				.into_iter()
				.next()
		};

		let resolution = match specific {
			Some(metadata) => Resolution {
				metadata: Some(metadata),
				default_metadata,
			},
			None => Resolution {
				metadata: default_metadata,
				default_metadata: None,
			},
		};

		tracing::debug!(
			view_name,
			content_type = ?content_type.map(ContentType::id),
			record = ?resolution.metadata.as_ref().map(ToString::to_string),
			"Resolved metadata"
		);
		Ok(resolution)
	}
}

/// Cache key of a page's rendered markup.
///
/// The same key is used to look markup up and to store it:
/// `prefix:view:content_type:locale:path`, with `None` for a missing content
/// type.
///
/// # Examples
///
/// ```
/// use simple_seo::cache_key;
/// use simple_seo_cache::CacheKeyBuilder;
/// use simple_seo_core::ContentType;
///
/// let keys = CacheKeyBuilder::new("simple_seo");
/// assert_eq!(cache_key(&keys, "home", None, "en", "/"), "simple_seo:home:None:en:/");
///
/// let article = ContentType::new("blog", "article");
/// assert_eq!(
///     cache_key(&keys, "detail", Some(&article), "pt-br", "/a/1/"),
///     "simple_seo:detail:blog.article:pt-br:/a/1/"
/// );
/// ```
pub fn cache_key(
	keys: &CacheKeyBuilder,
	view_name: &str,
	content_type: Option<&ContentType>,
	locale: &str,
	path: &str,
) -> String {
	let content_type = content_type.map_or_else(|| "None".to_string(), ContentType::id);
	keys.build_parts(&[view_name, &content_type, locale, path])
}
