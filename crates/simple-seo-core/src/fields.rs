//! Field declarations and metadata record types
//!
//! Every metadata record type is described once by a [`MetadataSchema`]: an
//! ordered list of [`FieldSpec`]s. Declaration order is rendering order.
//!
//! ```
//! use simple_seo_core::fields::{FieldSpec, MetadataSchema};
//!
//! let schema = MetadataSchema::builder("PageMetadata")
//!     .fields(simple_seo_core::fields::simple_fields())
//!     .field(FieldSpec::meta("og_title").named("og:title").populate_from("title"))
//!     .build()
//!     .unwrap();
//!
//! assert_eq!(schema.field_index("og:title"), schema.field_index("og_title"));
//! ```

use crate::error::{SeoError, SeoResult};
use crate::tags::{TagKind, TagValue};
use std::collections::HashSet;
use std::sync::Arc;

/// Static declaration of one metadata field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldSpec {
	/// Attribute name used by code and storage, e.g. `og_title`.
	pub attname: String,
	/// Declared tag name used in markup, e.g. `og:title`.
	pub name: String,
	/// Tag kind.
	pub kind: TagKind,
	/// Maximum length of editor-supplied values, in characters.
	pub max_length: Option<usize>,
	/// Field whose value seeds this one when it is empty.
	pub populate_from: Option<String>,
}

impl FieldSpec {
	/// Declares a field of the given kind. The tag name defaults to the attribute name.
	pub fn new(attname: impl Into<String>, kind: TagKind) -> Self {
		let attname = attname.into();
		Self {
			name: attname.clone(),
			attname,
			kind,
			max_length: None,
			populate_from: None,
		}
	}

	/// `<title>` field.
	pub fn title(attname: impl Into<String>) -> Self {
		Self::new(attname, TagKind::Title)
	}

	/// Keywords `<meta>` field.
	pub fn keywords(attname: impl Into<String>) -> Self {
		Self::new(attname, TagKind::Keywords)
	}

	/// Plain `<meta>` field.
	pub fn meta(attname: impl Into<String>) -> Self {
		Self::new(attname, TagKind::Meta)
	}

	/// URL `<meta>` field.
	pub fn url(attname: impl Into<String>) -> Self {
		Self::new(attname, TagKind::Url)
	}

	/// Image `<meta>` field.
	pub fn image(attname: impl Into<String>) -> Self {
		Self::new(attname, TagKind::Image)
	}

	/// Sets the declared tag name.
	pub fn named(mut self, name: impl Into<String>) -> Self {
		self.name = name.into();
		self
	}

	/// Limits editor-supplied values to `max_length` characters.
	pub fn max_length(mut self, max_length: usize) -> Self {
		self.max_length = Some(max_length);
		self
	}

	/// Seeds this field from another field (by attribute or tag name).
	pub fn populate_from(mut self, source: impl Into<String>) -> Self {
		self.populate_from = Some(source.into());
		self
	}

	/// Whether values of this field live in `meta_content`.
	pub fn self_closed(&self) -> bool {
		self.kind.self_closed()
	}

	/// Fresh, empty value slot for this field.
	pub fn empty_value(&self) -> TagValue {
		TagValue::new(self.name.clone(), self.kind)
	}
}

/// Ordered field set of one metadata record type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MetadataSchema {
	name: String,
	fields: Vec<FieldSpec>,
	populate_sources: Vec<Option<usize>>,
}

impl MetadataSchema {
	/// Starts declaring a record type.
	pub fn builder(name: impl Into<String>) -> MetadataSchemaBuilder {
		MetadataSchemaBuilder {
			name: name.into(),
			fields: Vec::new(),
		}
	}

	/// Simple, Open Graph and Twitter fields together.
	pub fn standard(name: impl Into<String>) -> Arc<Self> {
		let schema = Self::builder(name)
			.fields(simple_fields())
			.fields(open_graph_fields())
			.fields(twitter_fields())
			.build();
		match schema {
			Ok(schema) => schema,
			Err(e) => unreachable!("builtin metadata fields are consistent: {}", e),
		}
	}

	/// Record type name; also the storage namespace.
	pub fn name(&self) -> &str {
		&self.name
	}

	/// Fields in declaration order.
	pub fn fields(&self) -> &[FieldSpec] {
		&self.fields
	}

	/// Position of a field, looked up by attribute name first, then tag name.
	pub fn field_index(&self, name: &str) -> Option<usize> {
		self.fields
			.iter()
			.position(|f| f.attname == name)
			.or_else(|| self.fields.iter().position(|f| f.name == name))
	}

	/// Field declaration by attribute or tag name.
	pub fn field(&self, name: &str) -> Option<&FieldSpec> {
		self.field_index(name).map(|i| &self.fields[i])
	}

	/// Resolved `populate_from` source of the field at `index`.
	pub fn populate_source(&self, index: usize) -> Option<usize> {
		self.populate_sources.get(index).copied().flatten()
	}
}

/// Builder for [`MetadataSchema`].
#[derive(Debug, Clone)]
pub struct MetadataSchemaBuilder {
	name: String,
	fields: Vec<FieldSpec>,
}

impl MetadataSchemaBuilder {
	/// Appends one field.
	pub fn field(mut self, field: FieldSpec) -> Self {
		self.fields.push(field);
		self
	}

	/// Appends a group of fields, e.g. one of the builtin mixins.
	pub fn fields(mut self, fields: impl IntoIterator<Item = FieldSpec>) -> Self {
		self.fields.extend(fields);
		self
	}

	/// Validates names and cascade sources and freezes the schema.
	pub fn build(self) -> SeoResult<Arc<MetadataSchema>> {
		let mut seen = HashSet::new();
		for field in &self.fields {
			if !seen.insert(field.attname.as_str()) {
				return Err(SeoError::DuplicateField(field.attname.clone()));
			}
			if field.name != field.attname && !seen.insert(field.name.as_str()) {
				return Err(SeoError::DuplicateField(field.name.clone()));
			}
		}

		let mut schema = MetadataSchema {
			name: self.name,
			fields: self.fields,
			populate_sources: Vec::new(),
		};

		let mut sources = Vec::with_capacity(schema.fields.len());
		for field in &schema.fields {
			let source = match &field.populate_from {
				Some(source) => Some(schema.field_index(source).ok_or_else(|| {
					SeoError::UnknownPopulateSource {
						field: field.name.clone(),
						source_field: source.clone(),
					}
				})?),
				None => None,
			};
			sources.push(source);
		}
		schema.populate_sources = sources;

		Ok(Arc::new(schema))
	}
}

/// `title`, `keywords`, `description` and `author`.
pub fn simple_fields() -> Vec<FieldSpec> {
	vec![
		FieldSpec::title("title"),
		FieldSpec::keywords("keywords"),
		FieldSpec::meta("description"),
		FieldSpec::meta("author"),
	]
}

/// Open Graph tags; title and description seed from the simple fields.
pub fn open_graph_fields() -> Vec<FieldSpec> {
	vec![
		FieldSpec::meta("og_title")
			.named("og:title")
			.max_length(95)
			.populate_from("title"),
		FieldSpec::meta("og_type").named("og:type").max_length(15),
		FieldSpec::image("og_image").named("og:image"),
		FieldSpec::url("og_url").named("og:url"),
		FieldSpec::meta("og_description")
			.named("og:description")
			.max_length(297)
			.populate_from("description"),
		FieldSpec::meta("og_admins").named("og:admins").max_length(297),
	]
}

/// Twitter card tags; seeded from the Open Graph tags.
pub fn twitter_fields() -> Vec<FieldSpec> {
	vec![
		FieldSpec::meta("twitter_title")
			.named("twitter:title")
			.max_length(70)
			.populate_from("og:title"),
		FieldSpec::meta("twitter_card")
			.named("twitter:card")
			.max_length(15),
		FieldSpec::image("twitter_image")
			.named("twitter:image")
			.populate_from("og:image"),
		FieldSpec::meta("twitter_description")
			.named("twitter:description")
			.max_length(200)
			.populate_from("og:description"),
	]
}
