//! # simple-seo settings
//!
//! Settings for metadata rendering, loaded from defaults, an optional TOML
//! file and `SEO_*` environment variables.
//!
//! ```no_run
//! use simple_seo_conf::{EnvSource, SettingsBuilder, TomlFileSource};
//!
//! let settings = SettingsBuilder::new()
//!     .add_source(TomlFileSource::new("settings.toml"))
//!     .add_source(EnvSource::new())
//!     .build()
//!     .unwrap();
//! println!("caching for {:?}", settings.cache_ttl());
//! ```

#![warn(missing_docs)]

mod builder;
mod settings;
mod sources;

pub use builder::{SettingsBuilder, SettingsError};
pub use settings::SeoSettings;
pub use sources::{ConfigSource, DefaultSource, EnvSource, SourceError, TomlFileSource};
