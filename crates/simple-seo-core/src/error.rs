//! Error types for metadata schemas, records and stores.

use thiserror::Error;

/// Result type for metadata operations.
pub type SeoResult<T> = Result<T, SeoError>;

/// Errors raised while declaring schemas, editing records or talking to a store.
///
/// None of these reach the end user: the request-level renderer logs them
/// and emits empty markup instead.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum SeoError {
	/// The record type has no field with this attribute or tag name.
	#[error("unknown metadata field: {0}")]
	UnknownField(String),

	/// Two fields of one schema share an attribute or tag name.
	#[error("duplicate metadata field: {0}")]
	DuplicateField(String),

	/// A `populate_from` declaration points at a field the schema does not have.
	#[error("field '{field}' populates from unknown field '{source_field}'")]
	UnknownPopulateSource {
		/// Destination field.
		field: String,
		/// Declared source name.
		source_field: String,
	},

	/// An editor-supplied value exceeds the field's declared length.
	#[error("value for '{field}' is {actual} characters long, max is {max_length}")]
	ValueTooLong {
		/// Field name.
		field: String,
		/// Declared maximum length.
		max_length: usize,
		/// Length of the rejected value.
		actual: usize,
	},

	/// A second site-wide default record was saved for the same record type.
	#[error("a default metadata record already exists for '{0}'")]
	DuplicateDefault(String),

	/// A record was handed to a store or manager built for another schema.
	#[error("record of type '{found}' used where '{expected}' was expected")]
	SchemaMismatch {
		/// Schema the caller asked for.
		expected: String,
		/// Schema the record was built with.
		found: String,
	},

	/// The persistence backend failed.
	#[error("metadata store error: {0}")]
	Store(String),
}
