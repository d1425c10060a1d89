//! # simple-seo core
//!
//! Building blocks for per-page SEO metadata: tag values and their markup,
//! statically declared record types, metadata records, and the one-time
//! population cascade that seeds Open Graph and Twitter tags from the
//! plain title and description.
//!
//! ## Quick Example
//!
//! ```
//! use simple_seo_core::{MetadataRecord, MetadataSchema, populate_fields};
//!
//! let schema = MetadataSchema::standard("PageMetadata");
//! let mut record = MetadataRecord::for_view(schema, "home");
//! record.set_value("title", "Home").unwrap();
//!
//! populate_fields(&mut record);
//! assert_eq!(record.get("og:title").unwrap().meta_content.as_deref(), Some("Home"));
//! ```

#![warn(missing_docs)]

pub mod error;
pub mod fields;
pub mod i18n;
pub mod populate;
pub mod record;
pub mod tags;

pub use error::{SeoError, SeoResult};
pub use fields::{FieldSpec, MetadataSchema, MetadataSchemaBuilder};
pub use populate::{CascadeTarget, CascadeWrite, populate_field, populate_fields};
pub use record::{ContentType, MetadataRecord, SeoSubject, Subject};
pub use tags::{TagContext, TagKind, TagValue};
