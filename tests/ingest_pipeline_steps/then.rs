//! Then steps for pipeline BDD scenarios.

use super::world::IngestWorld;
use rstest_bdd_macros::then;
use waybill::transfer::{
    domain::TransferId,
    ports::StoreError,
    services::{IngestError, IngestReport},
};

fn last_report(world: &IngestWorld) -> Result<&IngestReport, eyre::Report> {
    match world.last_result.as_ref() {
        Some(Ok(report)) => Ok(report),
        Some(Err(err)) => Err(eyre::eyre!("pipeline run failed: {err}")),
        None => Err(eyre::eyre!("the pipeline has not run in this scenario")),
    }
}

fn tracked(world: &IngestWorld) -> Vec<TransferId> {
    world
        .store
        .snapshot()
        .map(|record| record.processed_ids().cloned().collect())
        .unwrap_or_default()
}

#[then("the run succeeds")]
fn run_succeeds(world: &IngestWorld) -> Result<(), eyre::Report> {
    last_report(world).map(|_| ())
}

#[then("the number of filed tasks is {count:usize}")]
fn number_of_filed_tasks(world: &IngestWorld, count: usize) -> Result<(), eyre::Report> {
    let filed = world.sink.submitted().len();
    if filed != count {
        return Err(eyre::eyre!("expected {count} filed task(s), found {filed}"));
    }
    Ok(())
}

#[then("the number of failed transfers is {count:usize}")]
fn number_of_failed_transfers(world: &IngestWorld, count: usize) -> Result<(), eyre::Report> {
    let failed = last_report(world)?.failed;
    if failed != count {
        return Err(eyre::eyre!("expected {count} failed transfer(s), found {failed}"));
    }
    Ok(())
}

#[then(r#"a task titled "{title}" is filed"#)]
fn task_titled_is_filed(world: &IngestWorld, title: String) -> Result<(), eyre::Report> {
    let submitted = world.sink.submitted();
    if !submitted.iter().any(|task| task.draft.title() == title) {
        let titles: Vec<_> = submitted.iter().map(|task| task.draft.title()).collect();
        return Err(eyre::eyre!("no task titled {title:?}; filed {titles:?}"));
    }
    Ok(())
}

#[then("the processed set is empty")]
fn processed_set_is_empty(world: &IngestWorld) -> Result<(), eyre::Report> {
    let ids = tracked(world);
    if !ids.is_empty() {
        return Err(eyre::eyre!("expected no processed ids, found {ids:?}"));
    }
    Ok(())
}

#[then(r#"the processed set is "{ids}""#)]
fn processed_set_is(world: &IngestWorld, ids: String) -> Result<(), eyre::Report> {
    let expected: Vec<TransferId> = ids.split(',').map(|id| TransferId::from(id.trim())).collect();
    let actual = tracked(world);
    if actual != expected {
        return Err(eyre::eyre!("expected processed ids {expected:?}, found {actual:?}"));
    }
    Ok(())
}

#[then("the last run time is recorded")]
fn last_run_time_is_recorded(world: &IngestWorld) -> Result<(), eyre::Report> {
    let recorded = world
        .store
        .snapshot()
        .and_then(|record| record.last_run_at());
    if recorded.is_none() {
        return Err(eyre::eyre!("the dedup state carries no last run time"));
    }
    Ok(())
}

#[then("the run fails because the dedup state is corrupt")]
fn run_fails_with_corrupt_state(world: &IngestWorld) -> Result<(), eyre::Report> {
    let result = world
        .last_result
        .as_ref()
        .ok_or_else(|| eyre::eyre!("the pipeline has not run in this scenario"))?;
    if !matches!(result, Err(IngestError::Store(StoreError::Corrupt { .. }))) {
        return Err(eyre::eyre!("expected a corrupt state error, got {result:?}"));
    }
    Ok(())
}
