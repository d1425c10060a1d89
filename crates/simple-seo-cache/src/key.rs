//! Cache key construction

/// Builds namespaced cache keys: `prefix:part[:part...]`.
///
/// # Examples
///
/// ```
/// use simple_seo_cache::CacheKeyBuilder;
///
/// let builder = CacheKeyBuilder::new("simple_seo");
/// assert_eq!(builder.build("home"), "simple_seo:home");
/// assert_eq!(
///     builder.build_parts(&["home", "None", "en", "/"]),
///     "simple_seo:home:None:en:/"
/// );
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CacheKeyBuilder {
	prefix: String,
}

impl CacheKeyBuilder {
	/// Creates a builder for the given namespace prefix.
	pub fn new(prefix: impl Into<String>) -> Self {
		Self {
			prefix: prefix.into(),
		}
	}

	/// Namespace prefix.
	pub fn prefix(&self) -> &str {
		&self.prefix
	}

	/// Builds a key from a single part.
	pub fn build(&self, key: &str) -> String {
		self.build_parts(&[key])
	}

	/// Builds a key from several parts joined with `:`.
	pub fn build_parts(&self, parts: &[&str]) -> String {
		let mut key = self.prefix.clone();
		for part in parts {
			key.push(':');
			key.push_str(part);
		}
		key
	}
}
