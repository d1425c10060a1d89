//! Rendering a resolved record into markup

use simple_seo_conf::SeoSettings;
use simple_seo_core::i18n::is_locale_variant;
use simple_seo_core::{MetadataRecord, Subject, TagContext};

/// Turns a metadata record into newline-separated tags.
///
/// Fields render in declaration order. Locale-variant fields (such as
/// `title_pt_br` when `pt-br` is a configured language) are skipped.
#[derive(Debug, Clone, Default)]
pub struct TagRenderer {
	languages: Vec<String>,
	media_url: String,
}

impl TagRenderer {
	/// Creates a renderer skipping variants for the given language codes.
	pub fn new(languages: Vec<String>) -> Self {
		Self {
			languages,
			media_url: String::new(),
		}
	}

	/// Renderer configured from settings.
	///
	/// Locale variants are only recognized when `use_i18n` is on.
	pub fn from_settings(settings: &SeoSettings) -> Self {
		Self::new(settings.active_languages().to_vec()).with_media_url(&settings.media_url)
	}

	/// Sets the prefix for relative image paths.
	pub fn with_media_url(mut self, media_url: impl Into<String>) -> Self {
		self.media_url = media_url.into();
		self
	}

	/// Renders `metadata`.
	///
	/// When `default_metadata` is given, each field's template sees the
	/// default record's same-named value as `default`. It is not substituted
	/// for an empty field: only the field's own value is printed.
	pub fn render(
		&self,
		metadata: &MetadataRecord,
		default_metadata: Option<&MetadataRecord>,
		subject: Option<&Subject>,
	) -> String {
		let mut context = TagContext::new(subject.map(|s| s.data.clone()))
			.with_media_url(self.media_url.clone());
		let mut lines = Vec::new();

		for (field, value) in metadata.fields() {
			if is_locale_variant(&field.name, &self.languages) {
				continue;
			}
			if let Some(default) = default_metadata {
				context.set_default(Some(
					default
						.get(&field.attname)
						.map(ToString::to_string)
						.unwrap_or_default(),
				));
			}
			if let Some(tag) = value.render(&context) {
				lines.push(tag);
			}
		}

		lines.join("\n")
	}
}
