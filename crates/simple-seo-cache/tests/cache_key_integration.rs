//! Integration tests for storing rendered markup under namespaced keys.

use rstest::*;
use simple_seo_cache::{Cache, CacheKeyBuilder, InMemoryCache};
use std::time::Duration;

#[fixture]
fn cache() -> InMemoryCache {
	InMemoryCache::new()
}

#[rstest]
#[tokio::test]
async fn test_keys_differ_per_locale_and_path(cache: InMemoryCache) {
	let keys = CacheKeyBuilder::new("simple_seo");
	let en = keys.build_parts(&["home", "None", "en", "/"]);
	let pt = keys.build_parts(&["home", "None", "pt-br", "/"]);
	let other_path = keys.build_parts(&["home", "None", "en", "/?page=2"]);

	cache.set(&en, &"<title>Home</title>", None).await.unwrap();

	let hit: Option<String> = cache.get(&en).await.unwrap();
	assert_eq!(hit.as_deref(), Some("<title>Home</title>"));
	assert_eq!(cache.get::<String>(&pt).await.unwrap(), None);
	assert_eq!(cache.get::<String>(&other_path).await.unwrap(), None);
}

#[rstest]
#[tokio::test]
async fn test_prefixes_keep_namespaces_apart(cache: InMemoryCache) {
	let seo = CacheKeyBuilder::new("simple_seo");
	let other = CacheKeyBuilder::new("other_site");

	cache
		.set(&seo.build("home"), &"<title>Home</title>", Some(Duration::from_secs(60)))
		.await
		.unwrap();

	assert!(cache.has_key("simple_seo:home").await.unwrap());
	assert!(!cache.has_key(&other.build("home")).await.unwrap());
	assert_eq!(cache.list_keys().await, vec!["simple_seo:home".to_string()]);
}

#[rstest]
#[tokio::test]
async fn test_type_mismatch_is_serialization_error(cache: InMemoryCache) {
	cache.set("k", &"markup", None).await.unwrap();

	let result = cache.get::<u64>("k").await;
	assert!(matches!(
		result,
		Err(simple_seo_cache::CacheError::Serialization(_))
	));
}
