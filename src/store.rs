//! Persistence of metadata records
//!
//! [`MetadataStore`] is the raw storage interface. [`MetadataManager`] wraps
//! a store for one record type and runs the population cascade on every
//! record it hands out, writing cascaded values back immediately.

use async_trait::async_trait;
use parking_lot::RwLock;
use simple_seo_core::{
	ContentType, MetadataRecord, MetadataSchema, SeoError, SeoResult, populate_field,
};
use std::collections::BTreeMap;
use std::sync::Arc;

/// Storage backend for metadata records.
///
/// Records of different schemas never mix: every query is scoped to the
/// schema passed in. Query results come back in ascending primary-key order.
#[async_trait]
pub trait MetadataStore: Send + Sync {
	/// The site-wide default record (`view_name` empty, no content type).
	async fn get_default(&self, schema: &Arc<MetadataSchema>) -> SeoResult<Option<MetadataRecord>>;

	/// Specific records for a view, optionally narrowed to one content type.
	async fn filter(
		&self,
		schema: &Arc<MetadataSchema>,
		view_name: &str,
		content_type: Option<&ContentType>,
	) -> SeoResult<Vec<MetadataRecord>>;

	/// Record by primary key.
	async fn get(&self, schema: &Arc<MetadataSchema>, id: i64) -> SeoResult<Option<MetadataRecord>>;

	/// Inserts or updates a record, assigning a primary key on first save.
	async fn save(&self, record: &mut MetadataRecord) -> SeoResult<()>;

	/// Deletes a record; returns whether it existed.
	async fn delete(&self, schema: &Arc<MetadataSchema>, id: i64) -> SeoResult<bool>;

	/// Every record except the default one.
	async fn list_specific(&self, schema: &Arc<MetadataSchema>) -> SeoResult<Vec<MetadataRecord>>;
}

#[async_trait]
impl<T: MetadataStore + ?Sized> MetadataStore for Arc<T> {
	async fn get_default(&self, schema: &Arc<MetadataSchema>) -> SeoResult<Option<MetadataRecord>> {
		(**self).get_default(schema).await
	}

	async fn filter(
		&self,
		schema: &Arc<MetadataSchema>,
		view_name: &str,
		content_type: Option<&ContentType>,
	) -> SeoResult<Vec<MetadataRecord>> {
		(**self).filter(schema, view_name, content_type).await
	}

	async fn get(&self, schema: &Arc<MetadataSchema>, id: i64) -> SeoResult<Option<MetadataRecord>> {
		(**self).get(schema, id).await
	}

	async fn save(&self, record: &mut MetadataRecord) -> SeoResult<()> {
		(**self).save(record).await
	}

	async fn delete(&self, schema: &Arc<MetadataSchema>, id: i64) -> SeoResult<bool> {
		(**self).delete(schema, id).await
	}

	async fn list_specific(&self, schema: &Arc<MetadataSchema>) -> SeoResult<Vec<MetadataRecord>> {
		(**self).list_specific(schema).await
	}
}

#[derive(Default)]
struct StoreState {
	next_id: i64,
	// schema name -> primary key -> record
	tables: BTreeMap<String, BTreeMap<i64, MetadataRecord>>,
}

/// Process-local [`MetadataStore`].
///
/// Primary keys are assigned from a single counter, so ascending key order is
/// insertion order.
#[derive(Default)]
pub struct InMemoryMetadataStore {
	state: RwLock<StoreState>,
}

impl InMemoryMetadataStore {
	/// Creates an empty store.
	pub fn new() -> Self {
		Self::default()
	}

	fn select(
		&self,
		schema: &MetadataSchema,
		predicate: impl Fn(&MetadataRecord) -> bool,
	) -> Vec<MetadataRecord> {
		let state = self.state.read();
		state
			.tables
			.get(schema.name())
			.map(|table| table.values().filter(|r| predicate(r)).cloned().collect())
			.unwrap_or_default()
	}
}

#[async_trait]
impl MetadataStore for InMemoryMetadataStore {
	async fn get_default(&self, schema: &Arc<MetadataSchema>) -> SeoResult<Option<MetadataRecord>> {
		Ok(self
			.select(schema, MetadataRecord::is_default)
			.into_iter()
			.next())
	}

	async fn filter(
		&self,
		schema: &Arc<MetadataSchema>,
		view_name: &str,
		content_type: Option<&ContentType>,
	) -> SeoResult<Vec<MetadataRecord>> {
		Ok(self.select(schema, |record| {
			record.view_name.as_deref() == Some(view_name)
				&& content_type.is_none_or(|ct| record.content_type.as_ref() == Some(ct))
		}))
	}

	async fn get(&self, schema: &Arc<MetadataSchema>, id: i64) -> SeoResult<Option<MetadataRecord>> {
		let state = self.state.read();
		Ok(state
			.tables
			.get(schema.name())
			.and_then(|table| table.get(&id))
			.cloned())
	}

	async fn save(&self, record: &mut MetadataRecord) -> SeoResult<()> {
		let mut state = self.state.write();
		let schema_name = record.schema().name().to_string();

		if record.is_default() {
			let duplicate = state.tables.get(&schema_name).is_some_and(|table| {
				table
					.values()
					.any(|other| other.is_default() && other.id != record.id)
			});
			if duplicate {
				return Err(SeoError::DuplicateDefault(schema_name));
			}
		}

		let id = match record.id {
			Some(id) => id,
			None => {
				state.next_id += 1;
				state.next_id
			}
		};
		record.id = Some(id);
		state
			.tables
			.entry(schema_name)
			.or_default()
			.insert(id, record.clone());
		Ok(())
	}

	async fn delete(&self, schema: &Arc<MetadataSchema>, id: i64) -> SeoResult<bool> {
		let mut state = self.state.write();
		Ok(state
			.tables
			.get_mut(schema.name())
			.is_some_and(|table| table.remove(&id).is_some()))
	}

	async fn list_specific(&self, schema: &Arc<MetadataSchema>) -> SeoResult<Vec<MetadataRecord>> {
		Ok(self.select(schema, |record| !record.is_default()))
	}
}

/// Loads and saves the records of one metadata type.
///
/// Every record read through the manager goes through the population
/// cascade; a field that received cascaded values is saved right away, so
/// the next load finds them already stored.
pub struct MetadataManager<S> {
	store: S,
	schema: Arc<MetadataSchema>,
}

impl<S: MetadataStore> MetadataManager<S> {
	/// Creates a manager for `schema` records held in `store`.
	pub fn new(store: S, schema: Arc<MetadataSchema>) -> Self {
		Self { store, schema }
	}

	/// Record type handled by this manager.
	pub fn schema(&self) -> &Arc<MetadataSchema> {
		&self.schema
	}

	/// Underlying store.
	pub fn store(&self) -> &S {
		&self.store
	}

	/// A new, unsaved record of this type for `view_name`.
	pub fn create(&self, view_name: impl Into<String>) -> MetadataRecord {
		MetadataRecord::for_view(self.schema.clone(), view_name)
	}

	/// The site-wide default record, if one exists.
	pub async fn get_default(&self) -> SeoResult<Option<MetadataRecord>> {
		match self.store.get_default(&self.schema).await? {
			Some(record) => Ok(Some(self.materialize(record).await)),
			None => Ok(None),
		}
	}

	/// The default record, created empty when missing.
	pub async fn get_or_create_default(&self) -> SeoResult<MetadataRecord> {
		if let Some(record) = self.get_default().await? {
			return Ok(record);
		}
		let mut record = MetadataRecord::new(self.schema.clone());
		self.store.save(&mut record).await?;
		tracing::debug!(schema = %self.schema.name(), "Created default metadata record");
		Ok(record)
	}

	/// Specific records for a view in primary-key order.
	pub async fn filter(
		&self,
		view_name: &str,
		content_type: Option<&ContentType>,
	) -> SeoResult<Vec<MetadataRecord>> {
		let records = self
			.store
			.filter(&self.schema, view_name, content_type)
			.await?;
		let mut materialized = Vec::with_capacity(records.len());
		for record in records {
			materialized.push(self.materialize(record).await);
		}
		Ok(materialized)
	}

	/// Record by primary key.
	pub async fn get(&self, id: i64) -> SeoResult<Option<MetadataRecord>> {
		match self.store.get(&self.schema, id).await? {
			Some(record) => Ok(Some(self.materialize(record).await)),
			None => Ok(None),
		}
	}

	/// Every record except the default one.
	pub async fn list_specific(&self) -> SeoResult<Vec<MetadataRecord>> {
		let records = self.store.list_specific(&self.schema).await?;
		let mut materialized = Vec::with_capacity(records.len());
		for record in records {
			materialized.push(self.materialize(record).await);
		}
		Ok(materialized)
	}

	/// Saves a record of this manager's type.
	pub async fn save(&self, record: &mut MetadataRecord) -> SeoResult<()> {
		self.check_schema(record)?;
		self.store.save(record).await
	}

	/// Deletes a record by primary key.
	pub async fn delete(&self, id: i64) -> SeoResult<bool> {
		self.store.delete(&self.schema, id).await
	}

	fn check_schema(&self, record: &MetadataRecord) -> SeoResult<()> {
		if record.schema().name() != self.schema.name() {
			return Err(SeoError::SchemaMismatch {
				expected: self.schema.name().to_string(),
				found: record.schema().name().to_string(),
			});
		}
		Ok(())
	}

	async fn materialize(&self, mut record: MetadataRecord) -> MetadataRecord {
		for index in 0..self.schema.fields().len() {
			let writes = populate_field(&mut record, index);
			if writes.is_empty() {
				continue;
			}
			for write in &writes {
				tracing::debug!(
					record = %record,
					field = %write.field,
					source = %write.source,
					"Populated field from source"
				);
			}
			// Concurrent loads may repeat this write; the copied value is the same.
			if let Err(e) = self.store.save(&mut record).await {
				tracing::warn!(record = %record, "Failed to persist populated fields: {}", e);
			}
		}
		record
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use rstest::{fixture, rstest};

	#[fixture]
	fn schema() -> Arc<MetadataSchema> {
		MetadataSchema::standard("PageMetadata")
	}

	#[rstest]
	#[tokio::test]
	async fn test_filter_in_primary_key_order(schema: Arc<MetadataSchema>) {
		let store = InMemoryMetadataStore::new();
		let article = ContentType::new("blog", "article");

		let mut first = MetadataRecord::for_view(schema.clone(), "detail");
		store.save(&mut first).await.unwrap();
		let mut second = MetadataRecord::for_view(schema.clone(), "detail")
			.with_content_type(article.clone());
		store.save(&mut second).await.unwrap();
		let mut other = MetadataRecord::for_view(schema.clone(), "other");
		store.save(&mut other).await.unwrap();

		let all = store.filter(&schema, "detail", None).await.unwrap();
		assert_eq!(
			all.iter().map(|r| r.id).collect::<Vec<_>>(),
			vec![first.id, second.id]
		);

		let typed = store.filter(&schema, "detail", Some(&article)).await.unwrap();
		assert_eq!(typed.len(), 1);
		assert_eq!(typed[0].id, second.id);
	}

	#[rstest]
	#[tokio::test]
	async fn test_single_default_per_schema(schema: Arc<MetadataSchema>) {
		let store = InMemoryMetadataStore::new();

		let mut default = MetadataRecord::new(schema.clone());
		store.save(&mut default).await.unwrap();
		// Re-saving the same record is an update.
		store.save(&mut default).await.unwrap();

		let mut second = MetadataRecord::new(schema.clone());
		let err = store.save(&mut second).await.unwrap_err();
		assert!(matches!(err, SeoError::DuplicateDefault(name) if name == "PageMetadata"));

		// Another record type has its own default.
		let mut other = MetadataRecord::new(MetadataSchema::standard("ArticleMetadata"));
		store.save(&mut other).await.unwrap();
	}

	#[rstest]
	#[tokio::test]
	async fn test_schemas_do_not_mix(schema: Arc<MetadataSchema>) {
		let store = InMemoryMetadataStore::new();
		let other_schema = MetadataSchema::standard("ArticleMetadata");

		let mut record = MetadataRecord::for_view(other_schema, "home");
		store.save(&mut record).await.unwrap();

		assert!(store.filter(&schema, "home", None).await.unwrap().is_empty());
		assert!(store.get(&schema, record.id.unwrap()).await.unwrap().is_none());
		assert!(!store.delete(&schema, record.id.unwrap()).await.unwrap());
	}

	#[rstest]
	#[tokio::test]
	async fn test_manager_persists_cascade(schema: Arc<MetadataSchema>) {
		let store = Arc::new(InMemoryMetadataStore::new());
		let manager = MetadataManager::new(store.clone(), schema.clone());

		let mut record = manager.create("home");
		record.set_value("title", "Home").unwrap();
		manager.save(&mut record).await.unwrap();

		let raw = store.get(&schema, record.id.unwrap()).await.unwrap().unwrap();
		assert!(!raw.get("og:title").unwrap().is_set());

		let loaded = manager.get(record.id.unwrap()).await.unwrap().unwrap();
		assert_eq!(loaded.get("og:title").unwrap().value(), Some("Home"));
		assert_eq!(loaded.get("twitter:title").unwrap().value(), Some("Home"));

		let raw = store.get(&schema, record.id.unwrap()).await.unwrap().unwrap();
		assert_eq!(raw.get("og:title").unwrap().value(), Some("Home"));
		assert_eq!(raw.get("twitter:title").unwrap().value(), Some("Home"));
	}

	#[rstest]
	#[tokio::test]
	async fn test_cascade_is_a_one_time_seed(schema: Arc<MetadataSchema>) {
		let manager = MetadataManager::new(InMemoryMetadataStore::new(), schema);

		let mut record = manager.create("home");
		record.set_value("title", "Home").unwrap();
		manager.save(&mut record).await.unwrap();
		let mut loaded = manager.get(record.id.unwrap()).await.unwrap().unwrap();

		loaded.set_value("title", "Welcome").unwrap();
		manager.save(&mut loaded).await.unwrap();

		let reloaded = manager.get(record.id.unwrap()).await.unwrap().unwrap();
		assert_eq!(reloaded.get("title").unwrap().value(), Some("Welcome"));
		assert_eq!(reloaded.get("og:title").unwrap().value(), Some("Home"));
	}

	#[rstest]
	#[tokio::test]
	async fn test_manager_rejects_foreign_schema(schema: Arc<MetadataSchema>) {
		let manager = MetadataManager::new(InMemoryMetadataStore::new(), schema);
		let mut foreign = MetadataRecord::for_view(MetadataSchema::standard("Other"), "home");

		let err = manager.save(&mut foreign).await.unwrap_err();
		assert!(matches!(err, SeoError::SchemaMismatch { .. }));
		assert_eq!(foreign.id, None);
	}

	#[rstest]
	#[tokio::test]
	async fn test_get_or_create_default(schema: Arc<MetadataSchema>) {
		let manager = MetadataManager::new(InMemoryMetadataStore::new(), schema);

		let created = manager.get_or_create_default().await.unwrap();
		assert!(created.is_default());
		assert!(created.id.is_some());

		let again = manager.get_or_create_default().await.unwrap();
		assert_eq!(again.id, created.id);
		assert!(manager.list_specific().await.unwrap().is_empty());
	}
}
