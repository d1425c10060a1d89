//! Settings builder merging layered sources

use crate::settings::SeoSettings;
use crate::sources::{ConfigSource, SourceError};
use serde_json::{Map, Value};

/// Errors raised while building settings
#[non_exhaustive]
#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
	/// A source failed to load
	#[error("failed to load {source_name}: {error}")]
	Source {
		/// Description of the failing source
		source_name: String,
		/// Underlying error
		error: SourceError,
	},

	/// The merged values do not fit the settings type
	#[error("invalid settings value: {0}")]
	Deserialize(#[from] serde_json::Error),

	/// A value is well-typed but unusable
	#[error("invalid setting '{key}': {message}")]
	Invalid {
		/// Setting name
		key: String,
		/// What is wrong with it
		message: String,
	},
}

/// Builds [`SeoSettings`] from prioritized sources.
///
/// Keys from higher-priority sources override lower ones; keys no source
/// sets keep their [`SeoSettings::default`] value.
///
/// # Examples
///
/// ```
/// use simple_seo_conf::{DefaultSource, SettingsBuilder};
/// use serde_json::json;
///
/// let settings = SettingsBuilder::new()
///     .add_source(DefaultSource::new().with_value("use_cache", json!(false)))
///     .build()
///     .unwrap();
/// assert!(!settings.use_cache);
/// assert_eq!(settings.cache_prefix, "simple_seo");
/// ```
#[derive(Default)]
pub struct SettingsBuilder {
	sources: Vec<Box<dyn ConfigSource>>,
}

impl SettingsBuilder {
	/// Create a builder with no sources
	pub fn new() -> Self {
		Self::default()
	}

	/// Add a configuration source
	pub fn add_source<S: ConfigSource + 'static>(mut self, source: S) -> Self {
		self.sources.push(Box::new(source));
		self
	}

	/// Merge all sources and validate the result
	pub fn build(mut self) -> Result<SeoSettings, SettingsError> {
		// Stable: equal priorities keep insertion order, later wins.
		self.sources.sort_by_key(|source| source.priority());

		let mut merged = Map::new();
		for source in &self.sources {
			let values = source.load().map_err(|error| SettingsError::Source {
				source_name: source.description(),
				error,
			})?;
			tracing::debug!(
				source = %source.description(),
				keys = values.len(),
				"Loaded settings source"
			);
			merged.extend(values);
		}

		let settings: SeoSettings = serde_json::from_value(Value::Object(merged))?;
		validate(&settings)?;
		Ok(settings)
	}
}

fn validate(settings: &SeoSettings) -> Result<(), SettingsError> {
	if settings.cache_prefix.trim().is_empty() {
		return Err(SettingsError::Invalid {
			key: "cache_prefix".to_string(),
			message: "must not be empty".to_string(),
		});
	}
	if settings.language_code.trim().is_empty() {
		return Err(SettingsError::Invalid {
			key: "language_code".to_string(),
			message: "must not be empty".to_string(),
		});
	}
	if settings.languages.iter().any(|code| code.trim().is_empty()) {
		return Err(SettingsError::Invalid {
			key: "languages".to_string(),
			message: "language codes must not be empty".to_string(),
		});
	}
	Ok(())
}
