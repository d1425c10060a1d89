//! Resolved settings

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Settings for metadata rendering and caching.
///
/// Every field has a default, so an empty configuration is valid.
///
/// # Examples
///
/// ```
/// use simple_seo_conf::SeoSettings;
/// use std::time::Duration;
///
/// let settings = SeoSettings::default();
/// assert_eq!(settings.cache_prefix, "simple_seo");
/// assert_eq!(settings.cache_ttl(), Duration::from_secs(86400));
/// assert!(settings.use_cache);
/// assert!(!settings.use_i18n);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SeoSettings {
	/// Namespace prefix of rendered-markup cache keys.
	pub cache_prefix: String,
	/// Lifetime of cached markup, in seconds.
	pub cache_timeout: u64,
	/// Whether rendered markup is cached at all.
	pub use_cache: bool,
	/// Whether locale-variant fields are recognized and skipped.
	pub use_i18n: bool,
	/// Configured site language codes.
	pub languages: Vec<String>,
	/// Locale used when a request carries none.
	pub language_code: String,
	/// Prefix for relative image paths.
	pub media_url: String,
}

impl Default for SeoSettings {
	fn default() -> Self {
		Self {
			cache_prefix: "simple_seo".to_string(),
			cache_timeout: 60 * 60 * 24,
			use_cache: true,
			use_i18n: false,
			languages: vec!["en".to_string()],
			language_code: "en".to_string(),
			media_url: "/media/".to_string(),
		}
	}
}

impl SeoSettings {
	/// Cache lifetime as a [`Duration`].
	pub fn cache_ttl(&self) -> Duration {
		Duration::from_secs(self.cache_timeout)
	}

	/// Language codes consulted for locale-variant detection.
	///
	/// Empty when i18n is off, so no field is ever treated as a variant.
	pub fn active_languages(&self) -> &[String] {
		if self.use_i18n {
			&self.languages
		} else {
			&[]
		}
	}
}
