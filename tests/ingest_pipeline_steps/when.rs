//! When steps for pipeline BDD scenarios.

use super::world::{IngestWorld, run_async};
use eyre::WrapErr;
use mockable::DefaultClock;
use rstest_bdd_macros::when;
use std::sync::Arc;
use waybill::transfer::{
    adapters::memory::StaticTransferSource, domain::TaskTarget, services::IngestService,
};

fn run_pipeline(world: &mut IngestWorld) -> Result<(), eyre::Report> {
    let source = world.upstream_failure.clone().map_or_else(
        || StaticTransferSource::new(world.records.clone()),
        StaticTransferSource::failing,
    );
    let target =
        TaskTarget::new("ws-1", "proj-1").wrap_err("build task target for pipeline scenario")?;
    let service = IngestService::new(
        Arc::new(source),
        Arc::new(world.sink.clone()),
        Arc::new(world.store.clone()),
        Arc::new(DefaultClock),
        target,
    );

    world.last_result = Some(run_async(service.run()));
    Ok(())
}

#[when("the pipeline runs")]
fn pipeline_runs(world: &mut IngestWorld) -> Result<(), eyre::Report> {
    run_pipeline(world)
}

#[when("the pipeline runs again")]
fn pipeline_runs_again(world: &mut IngestWorld) -> Result<(), eyre::Report> {
    run_pipeline(world)
}
