//! Tag values and their markup
//!
//! A [`TagValue`] is the content of one metadata slot. Self-closing tags keep
//! their content in `meta_content` (rendered as `<meta content="...">`), the
//! `<title>` tag keeps it in `tag_value` (rendered as element text).
//!
//! Values are small templates: an editor may write
//! `{{ object.name }} | {{ default }}` and have it filled from the page's
//! subject object and the site-wide default record. A variable the page
//! does not provide renders as an empty string; only a template that fails
//! to parse or evaluate drops the tag.

use regex::{Captures, Regex};
use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;
use std::borrow::Cow;
use std::sync::LazyLock;
use tera::{Context, Tera};

/// `{{ path` followed by a filter pipe or the closing delimiter.
static VARIABLE_BLOCK: LazyLock<Regex> = LazyLock::new(|| {
	Regex::new(
		r"\{\{(-?)\s*([A-Za-z_][A-Za-z0-9_]*(?:\.[A-Za-z0-9_]+|\[[^\]]*\])*)\s*(\|\s*default\b|\||-?\}\})",
	)
	.unwrap()
});

/// The kind of tag a metadata field renders as.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TagKind {
	/// `<title>...</title>`
	Title,
	/// `<meta name="keywords" content="...">`
	Keywords,
	/// Plain `<meta>` tag
	Meta,
	/// `<meta>` tag holding a URL
	Url,
	/// `<meta>` tag holding an uploaded image path
	Image,
}

impl TagKind {
	/// Whether the value lives in an attribute rather than the element body.
	pub fn self_closed(self) -> bool {
		!matches!(self, TagKind::Title)
	}
}

/// Values exposed to tag templates while rendering.
#[derive(Debug, Clone, Default)]
pub struct TagContext {
	/// JSON snapshot of the page's subject object, available as `object`.
	pub object: Option<JsonValue>,
	/// Same-named value of the site-wide default record, available as `default`.
	pub default: Option<String>,
	/// Prefix for relative image paths.
	pub media_url: String,
}

impl TagContext {
	/// Creates a context with the given subject object.
	pub fn new(object: Option<JsonValue>) -> Self {
		Self {
			object,
			default: None,
			media_url: String::new(),
		}
	}

	/// Sets the media prefix used by image tags.
	pub fn with_media_url(mut self, media_url: impl Into<String>) -> Self {
		self.media_url = media_url.into();
		self
	}

	/// Replaces the advisory default value.
	pub fn set_default(&mut self, default: Option<String>) {
		self.default = default;
	}

	fn to_tera(&self) -> Context {
		let mut context = Context::new();
		context.insert("object", &self.object.clone().unwrap_or(JsonValue::Null));
		context.insert("default", self.default.as_deref().unwrap_or(""));
		context
	}
}

/// Content of one metadata field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TagValue {
	name: String,
	kind: TagKind,
	/// Attribute content of self-closing tags.
	pub meta_content: Option<String>,
	/// Element text of non-self-closing tags.
	pub tag_value: Option<String>,
}

impl TagValue {
	/// Creates an empty value for a tag with the given declared name.
	pub fn new(name: impl Into<String>, kind: TagKind) -> Self {
		Self {
			name: name.into(),
			kind,
			meta_content: None,
			tag_value: None,
		}
	}

	/// Declared tag name, e.g. `og:title`.
	pub fn name(&self) -> &str {
		&self.name
	}

	/// Tag kind.
	pub fn kind(&self) -> TagKind {
		self.kind
	}

	/// Whether the effective content lives in `meta_content`.
	pub fn self_closed(&self) -> bool {
		self.kind.self_closed()
	}

	/// Effective content, `None` when unset or empty.
	pub fn value(&self) -> Option<&str> {
		let value = if self.self_closed() {
			self.meta_content.as_deref()
		} else {
			self.tag_value.as_deref()
		};
		value.filter(|v| !v.is_empty())
	}

	/// Whether the effective content is present.
	pub fn is_set(&self) -> bool {
		self.value().is_some()
	}

	/// Renders the tag, or `None` when there is nothing to print.
	pub fn render(&self, context: &TagContext) -> Option<String> {
		let raw = self.value()?;
		let content = self.expand(raw, context)?;
		let content = content.trim();
		if content.is_empty() {
			return None;
		}

		let markup = match self.kind {
			TagKind::Title => format!("<title>{}</title>", escape(content)),
			TagKind::Image => {
				let url = absolute_media_url(&context.media_url, content);
				self.meta_tag(&url)
			}
			TagKind::Keywords | TagKind::Meta | TagKind::Url => self.meta_tag(content),
		};
		Some(markup)
	}

	fn meta_tag(&self, content: &str) -> String {
		let attr = if self.name.starts_with("og:") {
			"property"
		} else {
			"name"
		};
		format!(
			"<meta {}=\"{}\" content=\"{}\" />",
			attr,
			escape(&self.name),
			escape(content)
		)
	}

	fn expand(&self, raw: &str, context: &TagContext) -> Option<String> {
		if !(raw.contains("{{") || raw.contains("{%") || raw.contains("{#")) {
			return Some(raw.to_string());
		}
		match Tera::one_off(&lenient_lookups(raw), &context.to_tera(), false) {
			Ok(rendered) => Some(rendered),
			Err(e) => {
				tracing::warn!(tag = %self.name, "Failed to render tag template: {}", e);
				None
			}
		}
	}
}

impl std::fmt::Display for TagValue {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.write_str(self.value().unwrap_or(""))
	}
}

/// Gives bare variable lookups an empty fallback so missing values print as
/// nothing. Lookups already starting with a `default` filter keep their own.
fn lenient_lookups(raw: &str) -> Cow<'_, str> {
	VARIABLE_BLOCK.replace_all(raw, |caps: &Captures<'_>| {
		let tail = &caps[3];
		if tail.len() > 1 && tail.starts_with('|') {
			return caps[0].to_string();
		}
		format!("{{{{{} {} | default(value=\"\") {}", &caps[1], &caps[2], tail)
	})
}

fn absolute_media_url(media_url: &str, path: &str) -> String {
	if path.starts_with("http://")
		|| path.starts_with("https://")
		|| path.starts_with("//")
		|| path.starts_with('/')
	{
		return path.to_string();
	}
	format!(
		"{}/{}",
		media_url.trim_end_matches('/'),
		path.trim_start_matches('/')
	)
}

/// Escapes HTML special characters for element text and attribute values.
pub fn escape(text: &str) -> String {
	let mut result = String::with_capacity(text.len() + 10);
	for ch in text.chars() {
		match ch {
			'&' => result.push_str("&amp;"),
			'<' => result.push_str("&lt;"),
			'>' => result.push_str("&gt;"),
			'"' => result.push_str("&quot;"),
			'\'' => result.push_str("&#x27;"),
			_ => result.push(ch),
		}
	}
	result
}
