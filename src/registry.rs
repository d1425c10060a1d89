//! Which record type holds the metadata of which view

use simple_seo_core::MetadataSchema;
use std::collections::HashMap;
use std::sync::Arc;

/// Maps view names to the metadata record type registered for them.
///
/// Views without a registration use the fallback type.
///
/// # Examples
///
/// ```
/// use simple_seo::MetadataRegistry;
/// use simple_seo_core::MetadataSchema;
///
/// let pages = MetadataSchema::standard("PageMetadata");
/// let articles = MetadataSchema::standard("ArticleMetadata");
///
/// let mut registry = MetadataRegistry::new(pages);
/// registry.register(articles, ["article_list", "article_detail"]);
///
/// assert_eq!(registry.schema_for("article_detail").name(), "ArticleMetadata");
/// assert_eq!(registry.schema_for("home").name(), "PageMetadata");
/// assert_eq!(registry.view_names(), vec!["article_detail", "article_list"]);
/// ```
#[derive(Debug, Clone)]
pub struct MetadataRegistry {
	fallback: Arc<MetadataSchema>,
	views: HashMap<String, Arc<MetadataSchema>>,
}

impl MetadataRegistry {
	/// Creates a registry where every view uses `fallback`.
	pub fn new(fallback: Arc<MetadataSchema>) -> Self {
		Self {
			fallback,
			views: HashMap::new(),
		}
	}

	/// Registers `schema` for the given views, replacing earlier registrations.
	pub fn register<I, V>(&mut self, schema: Arc<MetadataSchema>, view_names: I) -> &mut Self
	where
		I: IntoIterator<Item = V>,
		V: Into<String>,
	{
		for view_name in view_names {
			self.views.insert(view_name.into(), schema.clone());
		}
		self
	}

	/// Record type holding metadata for `view_name`.
	pub fn schema_for(&self, view_name: &str) -> &Arc<MetadataSchema> {
		self.views.get(view_name).unwrap_or(&self.fallback)
	}

	/// Fallback record type.
	pub fn fallback(&self) -> &Arc<MetadataSchema> {
		&self.fallback
	}

	/// Registered view names, sorted; the choices offered to editors.
	pub fn view_names(&self) -> Vec<&str> {
		let mut names: Vec<&str> = self.views.keys().map(String::as_str).collect();
		names.sort_unstable();
		names
	}

	/// Distinct record types, fallback first, then by name.
	pub fn schemas(&self) -> Vec<Arc<MetadataSchema>> {
		let mut schemas: Vec<Arc<MetadataSchema>> = Vec::new();
		let mut registered: Vec<&Arc<MetadataSchema>> = self.views.values().collect();
		registered.sort_by(|a, b| a.name().cmp(b.name()));
		for schema in std::iter::once(&self.fallback).chain(registered) {
			if !schemas.iter().any(|s| s.name() == schema.name()) {
				schemas.push(schema.clone());
			}
		}
		schemas
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use rstest::rstest;

	#[rstest]
	fn test_reregistering_replaces() {
		let mut registry = MetadataRegistry::new(MetadataSchema::standard("Page"));
		registry
			.register(MetadataSchema::standard("A"), ["detail"])
			.register(MetadataSchema::standard("B"), ["detail"]);

		assert_eq!(registry.schema_for("detail").name(), "B");
		assert_eq!(registry.view_names(), vec!["detail"]);
	}

	#[rstest]
	fn test_schemas_are_distinct() {
		let articles = MetadataSchema::standard("Article");
		let mut registry = MetadataRegistry::new(MetadataSchema::standard("Page"));
		registry.register(articles, ["list", "detail"]);

		let names: Vec<String> = registry
			.schemas()
			.iter()
			.map(|s| s.name().to_string())
			.collect();
		assert_eq!(names, vec!["Page", "Article"]);
	}
}
