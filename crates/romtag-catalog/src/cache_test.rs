use super::*;
use crate::error::CatalogError;
use crate::queries;
use crate::test_utils::{FakeCatalog, FakeMachine};
use romtag_core::{DirStore, MemoryStore};
use tempfile::tempdir;

fn id(s: &str) -> ItemId {
    ItemId::new(s).unwrap()
}

#[tokio::test]
async fn test_second_lookup_is_served_from_cache() {
    let catalog = Arc::new(FakeCatalog::new([FakeMachine::new("pacman").year("1980")]));
    let cache = QueryCache::new(catalog.clone(), Box::new(MemoryStore::new()));

    let first = cache.lookup(&queries::YEAR, &id("pacman")).await.unwrap();
    let second = cache.lookup(&queries::YEAR, &id("pacman")).await.unwrap();

    assert_eq!(first, QueryOutcome::Found("1980".to_string()));
    assert_eq!(second, first);
    assert_eq!(catalog.calls(), 1);
    assert_eq!(cache.stats(), CacheStats { hits: 1, misses: 1 });
}

#[tokio::test]
async fn test_distinct_pairs_get_distinct_entries() {
    let catalog = Arc::new(FakeCatalog::new([
        FakeMachine::new("pacman").year("1980").manufacturer("Namco"),
        FakeMachine::new("galaga").year("1981"),
    ]));
    let store = Arc::new(MemoryStore::new());
    let cache = QueryCache::new(catalog.clone(), Box::new(SharedStore(store.clone())));

    cache.lookup(&queries::YEAR, &id("pacman")).await.unwrap();
    cache.lookup(&queries::YEAR, &id("galaga")).await.unwrap();
    cache.lookup(&queries::MANUFACTURER, &id("pacman")).await.unwrap();
    cache.lookup(&queries::YEAR, &id("pacman")).await.unwrap();

    assert_eq!(store.len(), 3);
    assert_eq!(catalog.calls(), 3);
}

#[tokio::test]
async fn test_not_recognized_is_not_cached() {
    let catalog = Arc::new(FakeCatalog::new([]));
    let store = Arc::new(MemoryStore::new());
    let cache = QueryCache::new(catalog.clone(), Box::new(SharedStore(store.clone())));

    for _ in 0..2 {
        let outcome = cache.lookup(&queries::DUMPED, &id("unknown")).await.unwrap();
        assert_eq!(outcome, QueryOutcome::NotRecognized);
    }
    assert!(store.is_empty());
    assert_eq!(catalog.calls(), 2);
}

#[tokio::test]
async fn test_failure_is_not_cached() {
    let catalog = Arc::new(FakeCatalog::new([FakeMachine::new("pacman").year("1980")]));
    catalog.fail_query(queries::YEAR.name);
    let store = Arc::new(MemoryStore::new());
    let cache = QueryCache::new(catalog.clone(), Box::new(SharedStore(store.clone())));

    let err = cache.lookup(&queries::YEAR, &id("pacman")).await.unwrap_err();
    assert!(matches!(err, CatalogError::QueryFailed { .. }));
    assert!(store.is_empty());
}

#[tokio::test]
async fn test_cache_persists_across_instances() {
    let temp = tempdir().unwrap();
    let catalog = Arc::new(FakeCatalog::new([FakeMachine::new("pacman").year("1980")]));

    let cache = QueryCache::new(catalog.clone(), Box::new(DirStore::open(temp.path()).unwrap()));
    cache.lookup(&queries::YEAR, &id("pacman")).await.unwrap();
    drop(cache);

    let cache = QueryCache::new(catalog.clone(), Box::new(DirStore::open(temp.path()).unwrap()));
    let outcome = cache.lookup(&queries::YEAR, &id("pacman")).await.unwrap();
    assert_eq!(outcome, QueryOutcome::Found("1980".to_string()));
    assert_eq!(catalog.calls(), 1);
}

/// Lets a test keep a handle on the store it hands to the cache
struct SharedStore(Arc<MemoryStore>);

impl KeyValueStore for SharedStore {
    fn get(&self, key: &str) -> romtag_core::CoreResult<Option<String>> {
        self.0.get(key)
    }

    fn put(&self, key: &str, value: &str) -> romtag_core::CoreResult<()> {
        self.0.put(key, value)
    }
}
