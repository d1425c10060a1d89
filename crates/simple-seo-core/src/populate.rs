//! Field population cascade
//!
//! Seeds empty fields from the field named in their `populate_from`
//! declaration. The cascade only fills gaps: a value that is already set is
//! never overwritten, so running it again after its writes were persisted
//! changes nothing.
//!
//! | destination | source | copied |
//! |---|---|---|
//! | self-closed | self-closed | `meta_content` → `meta_content` |
//! | self-closed | content tag | `tag_value` → `meta_content` |
//! | content tag | content tag | `tag_value` → `tag_value` |
//! | content tag | self-closed | nothing |

use crate::record::MetadataRecord;

/// Attribute a cascade step wrote to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CascadeTarget {
	/// `meta_content` of a self-closing field
	MetaContent,
	/// `tag_value` of a content field
	TagValue,
}

/// One value copied by the cascade.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CascadeWrite {
	/// Declared tag name of the destination field.
	pub field: String,
	/// Declared tag name of the source field.
	pub source: String,
	/// Attribute that received the value.
	pub target: CascadeTarget,
}

/// Runs the cascade for the field at `index`.
///
/// Returns the writes performed; empty when the field has no
/// `populate_from`, is already set, or its source has nothing to give yet.
pub fn populate_field(record: &mut MetadataRecord, index: usize) -> Vec<CascadeWrite> {
	let mut writes = Vec::new();
	let Some(source_index) = record.schema().populate_source(index) else {
		return writes;
	};
	if source_index == index {
		return writes;
	}
	let Some(source) = record.value_at(source_index).cloned() else {
		return writes;
	};
	let Some(destination) = record.value_at_mut(index) else {
		return writes;
	};

	if destination.self_closed() && is_blank(destination.meta_content.as_deref()) {
		let copied = if source.self_closed() {
			source.meta_content.as_deref()
		} else {
			source.tag_value.as_deref()
		};
		if let Some(value) = copied.filter(|v| !v.is_empty()) {
			destination.meta_content = Some(value.to_string());
			writes.push(CascadeWrite {
				field: destination.name().to_string(),
				source: source.name().to_string(),
				target: CascadeTarget::MetaContent,
			});
		}
	}

	if !destination.self_closed()
		&& !source.self_closed()
		&& is_blank(destination.tag_value.as_deref())
		&& let Some(value) = source.tag_value.as_deref().filter(|v| !v.is_empty())
	{
		destination.tag_value = Some(value.to_string());
		writes.push(CascadeWrite {
			field: destination.name().to_string(),
			source: source.name().to_string(),
			target: CascadeTarget::TagValue,
		});
	}

	writes
}

/// Runs the cascade over every field in declaration order.
///
/// Chains declared in order (`title` → `og:title` → `twitter:title`) settle
/// in a single pass.
pub fn populate_fields(record: &mut MetadataRecord) -> Vec<CascadeWrite> {
	let count = record.schema().fields().len();
	let mut writes = Vec::new();
	for index in 0..count {
		writes.extend(populate_field(record, index));
	}
	if !writes.is_empty() {
		tracing::debug!(record = %record, writes = writes.len(), "Populated metadata fields");
	}
	writes
}

fn is_blank(value: Option<&str>) -> bool {
	value.is_none_or(str::is_empty)
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::fields::{FieldSpec, MetadataSchema};
	use rstest::rstest;
	use std::sync::Arc;

	fn pair(destination: FieldSpec, source: FieldSpec) -> MetadataRecord {
		let schema = MetadataSchema::builder("Pair")
			.field(source)
			.field(destination.populate_from("src"))
			.build()
			.unwrap();
		MetadataRecord::new(schema)
	}

	#[rstest]
	fn test_self_closed_from_self_closed_copies_meta_content() {
		let mut record = pair(FieldSpec::meta("dst"), FieldSpec::meta("src"));
		record.restore("src", Some("meta".into()), Some("text".into())).unwrap();

		let writes = populate_field(&mut record, 1);

		assert_eq!(writes.len(), 1);
		assert_eq!(writes[0].target, CascadeTarget::MetaContent);
		assert_eq!(record.get("dst").unwrap().meta_content.as_deref(), Some("meta"));
		assert_eq!(record.get("dst").unwrap().tag_value, None);
	}

	#[rstest]
	fn test_self_closed_from_content_copies_tag_value() {
		let mut record = pair(FieldSpec::meta("dst"), FieldSpec::title("src"));
		record.restore("src", Some("meta".into()), Some("text".into())).unwrap();

		populate_field(&mut record, 1);

		assert_eq!(record.get("dst").unwrap().meta_content.as_deref(), Some("text"));
		assert_eq!(record.get("dst").unwrap().tag_value, None);
	}

	#[rstest]
	fn test_content_from_content_copies_tag_value() {
		let mut record = pair(FieldSpec::title("dst"), FieldSpec::title("src"));
		record.restore("src", Some("meta".into()), Some("text".into())).unwrap();

		let writes = populate_field(&mut record, 1);

		assert_eq!(writes[0].target, CascadeTarget::TagValue);
		assert_eq!(record.get("dst").unwrap().tag_value.as_deref(), Some("text"));
		assert_eq!(record.get("dst").unwrap().meta_content, None);
	}

	#[rstest]
	fn test_content_from_self_closed_is_untouched() {
		let mut record = pair(FieldSpec::title("dst"), FieldSpec::meta("src"));
		record.restore("src", Some("meta".into()), Some("text".into())).unwrap();
		let before = record.get("dst").cloned();

		let writes = populate_field(&mut record, 1);

		assert!(writes.is_empty());
		assert_eq!(record.get("dst").cloned(), before);
	}

	#[rstest]
	fn test_explicit_value_is_never_overwritten() {
		let mut record = pair(FieldSpec::meta("dst"), FieldSpec::meta("src"));
		record.restore("src", Some("source".into()), None).unwrap();
		record.restore("dst", Some("explicit".into()), None).unwrap();

		assert!(populate_field(&mut record, 1).is_empty());
		assert_eq!(record.get("dst").unwrap().meta_content.as_deref(), Some("explicit"));
	}

	#[rstest]
	fn test_empty_source_is_skipped() {
		let mut record = pair(FieldSpec::meta("dst"), FieldSpec::meta("src"));
		record.restore("src", Some(String::new()), None).unwrap();

		assert!(populate_field(&mut record, 1).is_empty());
		assert_eq!(record.get("dst").unwrap().meta_content, None);
	}

	#[rstest]
	fn test_chain_settles_in_one_pass() {
		let schema: Arc<MetadataSchema> = MetadataSchema::standard("TestMetadata");
		let mut record = MetadataRecord::for_view(schema, "home");
		record.set_value("title", "Home").unwrap();

		let writes = populate_fields(&mut record);
		let fields: Vec<_> = writes.iter().map(|w| w.field.as_str()).collect();

		assert_eq!(fields, vec!["og:title", "twitter:title"]);
		assert_eq!(record.get("og:title").unwrap().meta_content.as_deref(), Some("Home"));
		assert_eq!(record.get("twitter:title").unwrap().meta_content.as_deref(), Some("Home"));
	}
}
