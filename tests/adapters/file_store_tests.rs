//! The JSON dedup state file in a scratch directory.

use super::helpers::window_end;
use camino::Utf8PathBuf;
use rstest::{fixture, rstest};
use std::fs;
use tempfile::TempDir;
use waybill::transfer::{
    adapters::file_store::JsonFileDedupStore,
    domain::{DedupRecord, TransferId},
    ports::{DedupStore, StoreError},
};

struct Scratch {
    // Held so the directory outlives the test.
    _dir: TempDir,
    state_path: Utf8PathBuf,
}

impl Scratch {
    fn store(&self) -> JsonFileDedupStore {
        JsonFileDedupStore::open(&self.state_path).expect("store should open")
    }

    fn write(&self, contents: &str) {
        fs::write(&self.state_path, contents).expect("state file should be written");
    }

    fn read(&self) -> String {
        fs::read_to_string(&self.state_path).expect("state file should be readable")
    }
}

#[fixture]
fn scratch() -> Scratch {
    let dir = tempfile::tempdir().expect("temp dir");
    let state_path = Utf8PathBuf::from_path_buf(dir.path().join("processed_transfers.json"))
        .expect("utf-8 temp path");
    Scratch {
        _dir: dir,
        state_path,
    }
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn missing_file_loads_as_an_empty_record(scratch: Scratch) {
    let record = scratch.store().load().await.expect("load should succeed");

    assert_eq!(record, DedupRecord::new());
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn saved_record_reloads_unchanged(scratch: Scratch) {
    let store = scratch.store();
    let mut record = DedupRecord::with_processed([TransferId::from(1002_i64), "T1".into()]);
    record.record_run(window_end());

    store.save(&record).await.expect("save should succeed");
    let reloaded = store.load().await.expect("load should succeed");

    assert_eq!(reloaded, record);
    assert_eq!(
        scratch.read(),
        "{\n  \"processedIds\": [\n    1002,\n    \"T1\"\n  ],\n  \"lastRunAt\": \"2025-01-15T14:30:00Z\"\n}\n"
    );
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn saving_an_unchanged_record_is_byte_stable(scratch: Scratch) {
    let store = scratch.store();
    let record = DedupRecord::with_processed([TransferId::from(3_i64), TransferId::from(1_i64)]);

    store.save(&record).await.expect("first save");
    let first = scratch.read();
    let reloaded = store.load().await.expect("load");
    store.save(&reloaded).await.expect("second save");

    assert_eq!(scratch.read(), first);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn save_leaves_no_temporary_file_behind(scratch: Scratch) {
    scratch
        .store()
        .save(&DedupRecord::new())
        .await
        .expect("save should succeed");

    let parent = scratch.state_path.parent().expect("state file has a parent");
    let names: Vec<String> = fs::read_dir(parent)
        .expect("list scratch dir")
        .filter_map(Result::ok)
        .map(|entry| entry.file_name().to_string_lossy().into_owned())
        .collect();
    assert_eq!(names, vec!["processed_transfers.json".to_owned()]);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn corrupt_file_is_reported_and_left_untouched(scratch: Scratch) {
    scratch.write("{\"processedIds\": [1, 2,");

    let result = scratch.store().load().await;

    assert!(matches!(
        result,
        Err(StoreError::Corrupt { ref reason }) if reason.contains("processed_transfers.json")
    ));
    assert_eq!(scratch.read(), "{\"processedIds\": [1, 2,");
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn non_utf8_file_is_reported_as_corrupt(scratch: Scratch) {
    fs::write(&scratch.state_path, [0xff, 0xfe, 0x7b]).expect("state file should be written");

    let result = scratch.store().load().await;

    assert!(
        matches!(result, Err(StoreError::Corrupt { .. })),
        "expected a corrupt state error, got {result:?}"
    );
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn legacy_script_file_is_loaded(scratch: Scratch) {
    scratch.write(
        "{\n  \"transfer_ids\": [\n    1001,\n    1002\n  ],\n  \"last_run\": \"2025-01-15T14:30:00\"\n}",
    );

    let record = scratch.store().load().await.expect("legacy file should load");

    assert_eq!(record.len(), 2);
    assert_eq!(record.last_run_at(), Some(window_end()));
}

#[rstest]
fn opening_under_a_missing_directory_fails(scratch: Scratch) {
    let orphan = scratch
        .state_path
        .parent()
        .expect("state file has a parent")
        .join("missing")
        .join("state.json");

    let result = JsonFileDedupStore::open(&orphan);

    assert!(matches!(result, Err(StoreError::Io(_))));
}
