//! Metadata records, content types and subject objects

use crate::error::{SeoError, SeoResult};
use crate::fields::{FieldSpec, MetadataSchema};
use crate::tags::TagValue;
use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;
use std::fmt;
use std::sync::Arc;

/// Identifies the kind of object a record targets.
///
/// # Examples
///
/// ```
/// use simple_seo_core::ContentType;
///
/// let ct = ContentType::new("blog", "article");
/// assert_eq!(ct.id(), "blog.article");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ContentType {
	/// Application label.
	pub app_label: String,
	/// Model name, lowercased.
	pub model: String,
}

impl ContentType {
	/// Creates a content type; the model name is lowercased.
	pub fn new(app_label: impl Into<String>, model: impl Into<String>) -> Self {
		Self {
			app_label: app_label.into(),
			model: model.into().to_lowercase(),
		}
	}

	/// Stable identifier, `app_label.model`.
	pub fn id(&self) -> String {
		format!("{}.{}", self.app_label, self.model)
	}
}

impl fmt::Display for ContentType {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "{}.{}", self.app_label, self.model)
	}
}

/// An object a page is about, e.g. the article on an article detail page.
pub trait SeoSubject: Serialize {
	/// Content type of this object.
	fn content_type(&self) -> ContentType;
}

/// Owned snapshot of a subject object, usable as template context.
#[derive(Debug, Clone, PartialEq)]
pub struct Subject {
	/// Content type of the object.
	pub content_type: ContentType,
	/// Serialized object, exposed to tag templates as `object`.
	pub data: JsonValue,
}

impl Subject {
	/// Creates a subject from raw parts.
	pub fn new(content_type: ContentType, data: JsonValue) -> Self {
		Self { content_type, data }
	}

	/// Snapshots an object. Serialization failures degrade to a `null` object.
	pub fn from_object<T: SeoSubject>(object: &T) -> Self {
		let data = serde_json::to_value(object).unwrap_or_else(|e| {
			tracing::warn!("Failed to serialize subject object: {}", e);
			JsonValue::Null
		});
		Self {
			content_type: object.content_type(),
			data,
		}
	}
}

/// A metadata record: identity fields plus one [`TagValue`] per declared field.
#[derive(Debug, Clone, PartialEq)]
pub struct MetadataRecord {
	/// Primary key, assigned by the store on first save.
	pub id: Option<i64>,
	/// View this record applies to; empty means site-wide default.
	pub view_name: Option<String>,
	/// Optional narrowing to one kind of subject object.
	pub content_type: Option<ContentType>,
	schema: Arc<MetadataSchema>,
	values: Vec<TagValue>,
}

impl MetadataRecord {
	/// Creates an unsaved default record with every field empty.
	pub fn new(schema: Arc<MetadataSchema>) -> Self {
		let values = schema.fields().iter().map(FieldSpec::empty_value).collect();
		Self {
			id: None,
			view_name: None,
			content_type: None,
			schema,
			values,
		}
	}

	/// Creates an unsaved record for one view.
	pub fn for_view(schema: Arc<MetadataSchema>, view_name: impl Into<String>) -> Self {
		let mut record = Self::new(schema);
		record.view_name = Some(view_name.into());
		record
	}

	/// Narrows the record to one content type.
	pub fn with_content_type(mut self, content_type: ContentType) -> Self {
		self.content_type = Some(content_type);
		self
	}

	/// Record type description.
	pub fn schema(&self) -> &Arc<MetadataSchema> {
		&self.schema
	}

	/// Whether this is the site-wide default record.
	pub fn is_default(&self) -> bool {
		self.view_name.as_deref().unwrap_or("").is_empty() && self.content_type.is_none()
	}

	/// Whether this record is scoped to a named view.
	pub fn is_specific(&self) -> bool {
		!self.view_name.as_deref().unwrap_or("").is_empty()
	}

	/// Field declarations paired with their values, in declaration order.
	pub fn fields(&self) -> impl Iterator<Item = (&FieldSpec, &TagValue)> {
		self.schema.fields().iter().zip(self.values.iter())
	}

	/// Value by attribute or tag name.
	pub fn get(&self, name: &str) -> Option<&TagValue> {
		self.schema.field_index(name).map(|i| &self.values[i])
	}

	/// Value at a declaration position.
	pub fn value_at(&self, index: usize) -> Option<&TagValue> {
		self.values.get(index)
	}

	pub(crate) fn value_at_mut(&mut self, index: usize) -> Option<&mut TagValue> {
		self.values.get_mut(index)
	}

	/// Sets the element text of a field, enforcing its declared length.
	pub fn set_tag_value(&mut self, name: &str, value: impl Into<String>) -> SeoResult<()> {
		let (index, value) = self.checked(name, value.into())?;
		self.values[index].tag_value = Some(value);
		Ok(())
	}

	/// Sets the attribute content of a field, enforcing its declared length.
	pub fn set_meta_content(&mut self, name: &str, value: impl Into<String>) -> SeoResult<()> {
		let (index, value) = self.checked(name, value.into())?;
		self.values[index].meta_content = Some(value);
		Ok(())
	}

	/// Sets whichever attribute is effective for the field's kind.
	pub fn set_value(&mut self, name: &str, value: impl Into<String>) -> SeoResult<()> {
		let field = self
			.schema
			.field(name)
			.ok_or_else(|| SeoError::UnknownField(name.to_string()))?;
		if field.self_closed() {
			self.set_meta_content(name, value)
		} else {
			self.set_tag_value(name, value)
		}
	}

	/// Loads stored attribute values into the field slots.
	///
	/// Used by stores when materializing a record; no length checks apply.
	pub fn restore(
		&mut self,
		name: &str,
		meta_content: Option<String>,
		tag_value: Option<String>,
	) -> SeoResult<()> {
		let index = self
			.schema
			.field_index(name)
			.ok_or_else(|| SeoError::UnknownField(name.to_string()))?;
		let slot = &mut self.values[index];
		slot.meta_content = meta_content;
		slot.tag_value = tag_value;
		Ok(())
	}

	fn checked(&self, name: &str, value: String) -> SeoResult<(usize, String)> {
		let index = self
			.schema
			.field_index(name)
			.ok_or_else(|| SeoError::UnknownField(name.to_string()))?;
		let field = &self.schema.fields()[index];
		if let Some(max_length) = field.max_length {
			let actual = value.chars().count();
			if actual > max_length {
				return Err(SeoError::ValueTooLong {
					field: field.name.clone(),
					max_length,
					actual,
				});
			}
		}
		Ok((index, value))
	}
}

impl fmt::Display for MetadataRecord {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		let view_name = self.view_name.as_deref().unwrap_or("");
		match &self.content_type {
			Some(ct) => write!(f, "{} - {}", view_name, ct),
			None => write!(f, "{} - None", view_name),
		}
	}
}
