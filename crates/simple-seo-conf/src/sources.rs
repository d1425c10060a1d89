//! Configuration sources for layered settings
//!
//! Sources are merged in priority order: environment variables override
//! TOML files, which override defaults.

use indexmap::IndexMap;
use serde_json::Value;
use std::fs;
use std::path::PathBuf;

/// Trait for configuration sources
pub trait ConfigSource: Send + Sync {
	/// Load configuration from this source
	fn load(&self) -> Result<IndexMap<String, Value>, SourceError>;

	/// Get the priority of this source (higher = more important)
	fn priority(&self) -> u8;

	/// Get a description of this source
	fn description(&self) -> String;
}

/// Error type for configuration sources
#[non_exhaustive]
#[derive(Debug, thiserror::Error)]
pub enum SourceError {
	/// Reading a file failed
	#[error("IO error: {0}")]
	Io(#[from] std::io::Error),

	/// The source content has an unexpected shape
	#[error("Parse error: {0}")]
	Parse(String),

	/// TOML syntax error
	#[error("TOML error: {0}")]
	Toml(#[from] toml::de::Error),

	/// JSON conversion error
	#[error("JSON error: {0}")]
	Json(#[from] serde_json::Error),

	/// A required source is missing
	#[error("Missing source: {0}")]
	Missing(String),
}

const BOOL_KEYS: &[&str] = &["use_cache", "use_i18n"];
const LIST_KEYS: &[&str] = &["languages"];
const NUMBER_KEYS: &[&str] = &["cache_timeout"];

/// Environment variable configuration source
///
/// Reads variables starting with the prefix (`SEO_` by default), strips it
/// and lowercases the rest, so `SEO_CACHE_TIMEOUT` sets `cache_timeout`.
pub struct EnvSource {
	prefix: String,
}

impl EnvSource {
	/// Create a source reading `SEO_*` variables
	///
	/// # Examples
	///
	/// ```
	/// use simple_seo_conf::EnvSource;
	///
	/// let source = EnvSource::new().with_prefix("MYSITE_SEO_");
	/// ```
	pub fn new() -> Self {
		Self {
			prefix: "SEO_".to_string(),
		}
	}

	/// Set the variable prefix
	pub fn with_prefix(mut self, prefix: impl Into<String>) -> Self {
		self.prefix = prefix.into();
		self
	}

	fn parse_value(key: &str, value: String) -> Value {
		if BOOL_KEYS.contains(&key) {
			return match value.trim().to_lowercase().as_str() {
				"true" | "1" | "yes" | "on" => Value::Bool(true),
				"false" | "0" | "no" | "off" => Value::Bool(false),
				_ => Value::String(value),
			};
		}
		if LIST_KEYS.contains(&key) {
			let list = value
				.split(',')
				.map(str::trim)
				.filter(|s| !s.is_empty())
				.map(|s| Value::String(s.to_string()))
				.collect();
			return Value::Array(list);
		}
		if NUMBER_KEYS.contains(&key)
			&& let Ok(num) = value.trim().parse::<u64>()
		{
			return Value::Number(num.into());
		}
		Value::String(value)
	}
}

impl Default for EnvSource {
	fn default() -> Self {
		Self::new()
	}
}

impl ConfigSource for EnvSource {
	fn load(&self) -> Result<IndexMap<String, Value>, SourceError> {
		let mut config = IndexMap::new();

		for (key, value) in std::env::vars() {
			let Some(clean_key) = key.strip_prefix(&self.prefix) else {
				continue;
			};
			let lower_key = clean_key.to_lowercase();
			let parsed = Self::parse_value(&lower_key, value);
			config.insert(lower_key, parsed);
		}

		Ok(config)
	}

	fn priority(&self) -> u8 {
		100
	}

	fn description(&self) -> String {
		format!("Environment variables (prefix: {})", self.prefix)
	}
}

/// TOML file configuration source
///
/// Settings are read from the `[seo]` table, so they can share a file with
/// the rest of a site's configuration.
pub struct TomlFileSource {
	path: PathBuf,
	table: String,
	required: bool,
}

impl TomlFileSource {
	/// Create a source for the `[seo]` table of a file
	///
	/// # Examples
	///
	/// ```
	/// use simple_seo_conf::TomlFileSource;
	///
	/// let source = TomlFileSource::new("settings.toml").required(true);
	/// ```
	pub fn new(path: impl Into<PathBuf>) -> Self {
		Self {
			path: path.into(),
			table: "seo".to_string(),
			required: false,
		}
	}

	/// Read another table instead of `[seo]`
	pub fn with_table(mut self, table: impl Into<String>) -> Self {
		self.table = table.into();
		self
	}

	/// Fail instead of yielding nothing when the file does not exist
	pub fn required(mut self, required: bool) -> Self {
		self.required = required;
		self
	}
}

impl ConfigSource for TomlFileSource {
	fn load(&self) -> Result<IndexMap<String, Value>, SourceError> {
		if !self.path.exists() {
			if self.required {
				return Err(SourceError::Missing(self.path.display().to_string()));
			}
			tracing::debug!(path = %self.path.display(), "Settings file not found, skipping");
			return Ok(IndexMap::new());
		}

		let content = fs::read_to_string(&self.path)?;
		let toml_value: toml::Value = toml::from_str(&content)?;
		let json_value = serde_json::to_value(toml_value)?;

		let Some(table) = json_value.get(&self.table) else {
			return Ok(IndexMap::new());
		};
		let map = table.as_object().ok_or_else(|| {
			SourceError::Parse(format!("Expected [{}] to be a table", self.table))
		})?;

		Ok(map.iter().map(|(k, v)| (k.clone(), v.clone())).collect())
	}

	fn priority(&self) -> u8 {
		50
	}

	fn description(&self) -> String {
		format!("TOML file: {} [{}]", self.path.display(), self.table)
	}
}

/// Default values configuration source
pub struct DefaultSource {
	values: IndexMap<String, Value>,
}

impl DefaultSource {
	/// Create an empty default source
	///
	/// # Examples
	///
	/// ```
	/// use simple_seo_conf::DefaultSource;
	/// use serde_json::json;
	///
	/// let source = DefaultSource::new().with_value("cache_timeout", json!(300));
	/// ```
	pub fn new() -> Self {
		Self {
			values: IndexMap::new(),
		}
	}

	/// Add a default value for a configuration key
	pub fn with_value(mut self, key: impl Into<String>, value: Value) -> Self {
		self.values.insert(key.into(), value);
		self
	}
}

impl Default for DefaultSource {
	fn default() -> Self {
		Self::new()
	}
}

impl ConfigSource for DefaultSource {
	fn load(&self) -> Result<IndexMap<String, Value>, SourceError> {
		Ok(self.values.clone())
	}

	fn priority(&self) -> u8 {
		0
	}

	fn description(&self) -> String {
		"Default values".to_string()
	}
}
