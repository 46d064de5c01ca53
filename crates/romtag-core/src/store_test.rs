use super::*;
use tempfile::tempdir;

#[test]
fn test_dir_store_creates_root() {
    let temp = tempdir().unwrap();
    let root = temp.path().join("a").join("b");
    let store = DirStore::open(&root).unwrap();
    assert!(root.is_dir());
    assert_eq!(store.root(), root.as_path());
}

#[test]
fn test_dir_store_get_missing_is_none() {
    let temp = tempdir().unwrap();
    let store = DirStore::open(temp.path()).unwrap();
    assert_eq!(store.get("pacman").unwrap(), None);
    assert!(!store.contains("pacman").unwrap());
}

#[test]
fn test_dir_store_put_then_get() {
    let temp = tempdir().unwrap();
    let store = DirStore::open(temp.path()).unwrap();

    store.put("pacman", "status:good\n").unwrap();

    assert_eq!(store.get("pacman").unwrap().as_deref(), Some("status:good\n"));
    assert!(store.contains("pacman").unwrap());
}

#[test]
fn test_dir_store_leaves_no_temp_files() {
    let temp = tempdir().unwrap();
    let store = DirStore::open(temp.path()).unwrap();
    store.put("galaga", "x").unwrap();
    store.put("digdug", "y").unwrap();

    let mut names: Vec<String> = std::fs::read_dir(temp.path())
        .unwrap()
        .map(|e| e.unwrap().file_name().to_string_lossy().to_string())
        .collect();
    names.sort();
    assert_eq!(names, vec![".staging", "digdug", "galaga"]);
    let staged = std::fs::read_dir(temp.path().join(".staging")).unwrap().count();
    assert_eq!(staged, 0);
}

#[test]
fn test_dir_store_rejects_path_like_keys() {
    let temp = tempdir().unwrap();
    let store = DirStore::open(temp.path()).unwrap();

    for key in ["", ".", "..", ".staging", "a/b", "a\\b"] {
        assert!(
            matches!(store.put(key, "v"), Err(CoreError::InvalidStoreKey { .. })),
            "key {:?} should be rejected",
            key
        );
    }
}

#[test]
fn test_dir_store_accepts_temp_like_keys() {
    let temp = tempdir().unwrap();
    let store = DirStore::open(temp.path()).unwrap();

    store.put("notes.tmp", "status:good\n").unwrap();
    store.put(".staging.1.tmp", "x").unwrap();

    assert_eq!(store.get("notes.tmp").unwrap().as_deref(), Some("status:good\n"));
    assert!(store.contains(".staging.1.tmp").unwrap());
}

#[test]
fn test_memory_store() {
    let store = MemoryStore::new();
    assert!(store.is_empty());

    store.put("k", "v").unwrap();
    assert_eq!(store.get("k").unwrap().as_deref(), Some("v"));
    assert!(store.contains("k").unwrap());
    assert_eq!(store.len(), 1);
}
