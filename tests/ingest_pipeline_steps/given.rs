//! Given steps for pipeline BDD scenarios.

use super::world::IngestWorld;
use rstest_bdd_macros::given;
use waybill::transfer::{
    adapters::memory::{InMemoryDedupStore, RecordingTaskSink},
    domain::{DedupRecord, TransferId, TransferRecord},
    ports::UpstreamError,
};

#[given("the upstream window is empty")]
fn upstream_window_is_empty(world: &mut IngestWorld) {
    world.records.clear();
}

#[given(r#"the upstream window returns transfer "{id}" from "{shipper}""#)]
fn upstream_window_returns_transfer(world: &mut IngestWorld, id: String, shipper: String) {
    let record = TransferRecord::new(id.as_str())
        .with_manifest_number(format!("M-{id}"))
        .with_shipper_name(shipper)
        .with_created_at("2025-01-15T09:05:00Z");
    world.records.push(record);
}

#[given("the upstream is unavailable")]
fn upstream_is_unavailable(world: &mut IngestWorld) {
    world.upstream_failure = Some(UpstreamError::Status {
        status: 503,
        body: "service unavailable".to_owned(),
    });
}

#[given(r#"transfer "{id}" was already processed"#)]
fn transfer_was_already_processed(world: &mut IngestWorld, id: String) {
    world.processed.push(TransferId::from(id));
    world.store =
        InMemoryDedupStore::with_record(DedupRecord::with_processed(world.processed.clone()));
}

#[given(r#"the task service rejects tasks for "{shipper}""#)]
fn task_service_rejects(world: &mut IngestWorld, shipper: String) {
    world.sink = RecordingTaskSink::new().rejecting(shipper);
}

#[given("the dedup state is corrupt")]
fn dedup_state_is_corrupt(world: &mut IngestWorld) {
    world.store = InMemoryDedupStore::corrupt();
}
