//! Integration tests for building settings from layered sources.

use rstest::*;
use serde_json::json;
use serial_test::serial;
use simple_seo_conf::{
	DefaultSource, EnvSource, SeoSettings, SettingsBuilder, SettingsError, TomlFileSource,
};
use std::fs;
use std::path::PathBuf;
use std::time::Duration;
use tempfile::TempDir;

#[fixture]
fn temp_dir() -> TempDir {
	TempDir::new().expect("Failed to create temporary directory")
}

fn write_settings(dir: &TempDir, content: &str) -> PathBuf {
	let path = dir.path().join("settings.toml");
	fs::write(&path, content).expect("Failed to write settings.toml");
	path
}

#[rstest]
fn test_no_sources_yields_defaults() {
	let settings = SettingsBuilder::new().build().unwrap();
	assert_eq!(settings, SeoSettings::default());
}

#[rstest]
#[serial(seo_env)]
fn test_env_overrides_file_overrides_defaults(temp_dir: TempDir) {
	let path = write_settings(
		&temp_dir,
		r#"
[seo]
cache_prefix = "from_file"
cache_timeout = 600
languages = ["en", "pt-br"]
"#,
	);
	unsafe {
		std::env::set_var("SEOLAYER_CACHE_TIMEOUT", "30");
		std::env::set_var("SEOLAYER_USE_I18N", "on");
	}

	let result = SettingsBuilder::new()
		// Added first but highest priority
		.add_source(EnvSource::new().with_prefix("SEOLAYER_"))
		.add_source(TomlFileSource::new(&path))
		.add_source(DefaultSource::new().with_value("cache_prefix", json!("from_defaults")))
		.build();

	unsafe {
		std::env::remove_var("SEOLAYER_CACHE_TIMEOUT");
		std::env::remove_var("SEOLAYER_USE_I18N");
	}
	let settings = result.unwrap();

	assert_eq!(settings.cache_prefix, "from_file");
	assert_eq!(settings.cache_ttl(), Duration::from_secs(30));
	assert!(settings.use_i18n);
	assert_eq!(settings.languages, vec!["en", "pt-br"]);
	assert_eq!(settings.active_languages(), ["en", "pt-br"]);
	assert!(settings.use_cache);
}

#[rstest]
#[case(json!({"cache_prefix": ""}), "cache_prefix")]
#[case(json!({"cache_prefix": "  "}), "cache_prefix")]
#[case(json!({"language_code": ""}), "language_code")]
#[case(json!({"languages": ["en", ""]}), "languages")]
fn test_validation_errors(#[case] values: serde_json::Value, #[case] expected_key: &str) {
	let mut defaults = DefaultSource::new();
	for (key, value) in values.as_object().unwrap() {
		defaults = defaults.with_value(key.clone(), value.clone());
	}

	let err = SettingsBuilder::new().add_source(defaults).build().unwrap_err();

	match err {
		SettingsError::Invalid { key, .. } => assert_eq!(key, expected_key),
		other => panic!("expected validation error, got {other:?}"),
	}
}

#[rstest]
fn test_wrong_type_is_rejected() {
	let err = SettingsBuilder::new()
		.add_source(DefaultSource::new().with_value("use_cache", json!("maybe")))
		.build()
		.unwrap_err();
	assert!(matches!(err, SettingsError::Deserialize(_)));
}

#[rstest]
fn test_required_file_missing(temp_dir: TempDir) {
	let err = SettingsBuilder::new()
		.add_source(TomlFileSource::new(temp_dir.path().join("absent.toml")).required(true))
		.build()
		.unwrap_err();

	match err {
		SettingsError::Source { source_name, .. } => {
			assert!(source_name.contains("absent.toml"))
		}
		other => panic!("expected source error, got {other:?}"),
	}
}
