//! Catalog to labels, end to end, against in-memory backends

use romtag_catalog::test_utils::{FakeCatalog, FakeMachine};
use romtag_catalog::{QueryCache, RecordBuilder};
use romtag_core::{
    compute, managed_vocabulary, resolve, DirStore, ItemId, MemoryStore, RecordStore, ScanContext,
};
use romtag_labels::{MemoryLabels, ReconcileOutcome, TagReconciler};
use std::collections::BTreeSet;
use std::fs;
use std::path::Path;
use std::sync::Arc;
use tempfile::tempdir;

fn catalog() -> Arc<FakeCatalog> {
    Arc::new(FakeCatalog::new([
        FakeMachine::new("game1")
            .status("imperfect")
            .device()
            .device_ref("dev1")
            .disk("diskA,v2"),
        FakeMachine::new("dev1").device(),
    ]))
}

fn builder(catalog: Arc<FakeCatalog>, records: &Path) -> RecordBuilder {
    RecordBuilder::new(
        QueryCache::new(catalog, Box::new(MemoryStore::new())),
        RecordStore::new(Box::new(DirStore::open(records).unwrap())),
    )
}

fn set(labels: &[&str]) -> BTreeSet<String> {
    labels.iter().map(|l| l.to_string()).collect()
}

async fn tag_game1(
    builder: &RecordBuilder,
    reconciler: &TagReconciler,
    scan_dir: &Path,
    check_deps: bool,
) -> ReconcileOutcome {
    let item = ItemId::new("game1").unwrap();
    let record = builder
        .ensure(&item)
        .await
        .unwrap()
        .into_record()
        .unwrap();
    let ctx = ScanContext {
        item,
        scan_dir: scan_dir.to_path_buf(),
        check_deps,
        sample_dir: None,
        archive_extensions: vec!["zip".to_string(), "7z".to_string()],
    };
    let resolved = resolve(&record, &ctx).unwrap();
    let tags = compute(&record, &resolved);
    reconciler
        .reconcile(
            &scan_dir.join("game1.zip"),
            &tags,
            &managed_vocabulary(&resolved),
            false,
        )
        .await
        .unwrap()
}

#[tokio::test]
async fn test_game1_is_tagged_with_an_add_only_mutation() {
    let temp = tempdir().unwrap();
    let scan_dir = temp.path().join("roms");
    fs::create_dir_all(&scan_dir).unwrap();
    fs::write(scan_dir.join("game1.zip"), b"").unwrap();
    fs::write(scan_dir.join("dev1.zip"), b"").unwrap();

    let labels = Arc::new(MemoryLabels::new());
    labels.set(&scan_dir.join("game1.zip"), ["Red"]);
    let reconciler = TagReconciler::new(labels.clone(), false);
    let builder = builder(catalog(), &temp.path().join("records"));

    let outcome = tag_game1(&builder, &reconciler, &scan_dir, true).await;

    let expected = set(&[
        "Imperfect",
        "Device",
        "+device:dev1",
        "-disk:diskA:comma:v2",
        "Incomplete",
    ]);
    match outcome {
        ReconcileOutcome::Applied { added, removed, .. } => {
            assert_eq!(added, expected);
            assert!(removed.is_empty());
        }
        other => panic!("expected Applied, got {:?}", other),
    }
    assert_eq!(labels.mutations(), 1);

    let mut with_user_label = expected.clone();
    with_user_label.insert("Red".to_string());
    assert_eq!(labels.labels(&scan_dir.join("game1.zip")), with_user_label);
}

#[tokio::test]
async fn test_second_run_makes_no_mutations() {
    let temp = tempdir().unwrap();
    let scan_dir = temp.path().join("roms");
    fs::create_dir_all(&scan_dir).unwrap();
    fs::write(scan_dir.join("game1.zip"), b"").unwrap();
    fs::write(scan_dir.join("dev1.zip"), b"").unwrap();

    let labels = Arc::new(MemoryLabels::new());
    let reconciler = TagReconciler::new(labels.clone(), false);
    let catalog = catalog();
    let builder = builder(catalog.clone(), &temp.path().join("records"));

    tag_game1(&builder, &reconciler, &scan_dir, true).await;
    let mutations = labels.mutations();
    let calls = catalog.calls();

    let outcome = tag_game1(&builder, &reconciler, &scan_dir, true).await;

    assert_eq!(outcome, ReconcileOutcome::Unchanged);
    assert_eq!(labels.mutations(), mutations);
    // record came from the store this time
    assert_eq!(catalog.calls(), calls);
}

#[tokio::test]
async fn test_disk_arriving_flips_its_prefix() {
    let temp = tempdir().unwrap();
    let scan_dir = temp.path().join("roms");
    fs::create_dir_all(&scan_dir).unwrap();
    fs::write(scan_dir.join("game1.zip"), b"").unwrap();
    fs::write(scan_dir.join("dev1.zip"), b"").unwrap();

    let labels = Arc::new(MemoryLabels::new());
    let reconciler = TagReconciler::new(labels.clone(), false);
    let builder = builder(catalog(), &temp.path().join("records"));

    tag_game1(&builder, &reconciler, &scan_dir, true).await;

    fs::create_dir_all(scan_dir.join("game1")).unwrap();
    fs::write(scan_dir.join("game1").join("diskA,v2.chd"), b"").unwrap();

    match tag_game1(&builder, &reconciler, &scan_dir, true).await {
        ReconcileOutcome::Applied { added, removed, .. } => {
            assert_eq!(added, set(&["+disk:diskA:comma:v2"]));
            assert_eq!(removed, set(&["-disk:diskA:comma:v2", "Incomplete"]));
        }
        other => panic!("expected Applied, got {:?}", other),
    }
}

#[tokio::test]
async fn test_game1_without_dependency_checking() {
    let temp = tempdir().unwrap();
    let scan_dir = temp.path().join("roms");
    fs::create_dir_all(&scan_dir).unwrap();
    fs::write(scan_dir.join("game1.zip"), b"").unwrap();

    let labels = Arc::new(MemoryLabels::new());
    let reconciler = TagReconciler::new(labels.clone(), false);
    let builder = builder(catalog(), &temp.path().join("records"));

    tag_game1(&builder, &reconciler, &scan_dir, false).await;

    assert_eq!(
        labels.labels(&scan_dir.join("game1.zip")),
        set(&["Imperfect", "Device", "device:dev1", "disk:diskA:comma:v2"])
    );
}
