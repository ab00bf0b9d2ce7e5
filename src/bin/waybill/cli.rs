//! Argument parsing and subcommand wiring.

use super::{BoxError, prompt, render};
use camino::{Utf8Path, Utf8PathBuf};
use clap::{Parser, Subcommand};
use mockable::DefaultClock;
use std::io::{self, Write};
use std::sync::Arc;
use tracing::info;
use waybill::config::{
    ConfigArtifact, DEFAULT_CONFIG_FILE, DEFAULT_STATE_FILE, TaskServiceSettings,
    UpstreamSettings, WaybillConfig,
};
use waybill::transfer::{
    adapters::{asana::AsanaTaskSink, file_store::JsonFileDedupStore, metrc::MetrcTransferSource},
    domain::FetchWindow,
    services::{IngestService, SetupError, SetupService, TransferPreviewService},
};

#[derive(Debug, Parser)]
#[command(
    name = "waybill",
    version,
    about = "Files tracking tasks for inbound METRC transfers"
)]
pub(crate) struct Cli {
    /// Configuration file written by `waybill setup`.
    #[arg(long, global = true, env = "WAYBILL_CONFIG_FILE", default_value = DEFAULT_CONFIG_FILE)]
    pub(crate) config_file: Utf8PathBuf,

    /// File recording the transfers that already produced a task.
    #[arg(long, global = true, env = "WAYBILL_STATE_FILE", default_value = DEFAULT_STATE_FILE)]
    pub(crate) state_file: Utf8PathBuf,

    #[command(subcommand)]
    pub(crate) command: Command,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Subcommand)]
pub(crate) enum Command {
    /// File tasks for new transfers in the production window.
    Run,

    /// Show what a run would do over a wider window, without side effects.
    Inspect {
        /// Lookback in hours, 1 to 24.
        #[arg(long, default_value_t = FetchWindow::DIAGNOSTIC.hours())]
        hours: u32,
    },

    /// Choose the workspace and project tasks are filed under.
    Setup,
}

pub(crate) async fn dispatch(cli: &Cli) -> Result<(), BoxError> {
    match cli.command {
        Command::Run => run(&cli.config_file, &cli.state_file).await,
        Command::Inspect { hours } => inspect(&cli.state_file, FetchWindow::new(hours)?).await,
        Command::Setup => setup(&cli.config_file).await,
    }
}

fn env_lookup(key: &str) -> Option<String> {
    std::env::var(key).ok()
}

async fn run(config_file: &Utf8Path, state_file: &Utf8Path) -> Result<(), BoxError> {
    let artifact = ConfigArtifact::load(config_file)?;
    let config = WaybillConfig::from_env(artifact.as_ref())?;
    let target = config.task_service.task_target()?;
    info!(
        workspace = target.workspace_id(),
        project = target.project_id(),
        "task target configured"
    );

    let service = IngestService::new(
        Arc::new(MetrcTransferSource::new(config.upstream)?),
        Arc::new(AsanaTaskSink::new(config.task_service)?),
        Arc::new(JsonFileDedupStore::open(state_file)?),
        Arc::new(DefaultClock),
        target,
    )
    .with_window(config.window);

    let report = service.run().await?;
    render::write_report(&mut io::stdout().lock(), &report)?;
    Ok(())
}

async fn inspect(state_file: &Utf8Path, window: FetchWindow) -> Result<(), BoxError> {
    let settings = UpstreamSettings::resolve(&env_lookup)?;
    let service = TransferPreviewService::new(
        Arc::new(MetrcTransferSource::new(settings)?),
        Arc::new(JsonFileDedupStore::open(state_file)?),
        Arc::new(DefaultClock),
    );

    let preview = service.preview(window).await?;
    render::write_preview(&mut io::stdout().lock(), &preview)?;
    Ok(())
}

async fn setup(config_file: &Utf8Path) -> Result<(), BoxError> {
    let settings = TaskServiceSettings::resolve(&env_lookup, None)?;
    let service = SetupService::new(Arc::new(AsanaTaskSink::new(settings)?));

    let workspaces = service.discover().await?;
    let workspace =
        prompt::choose_entry(&mut io::stdin().lock(), &mut io::stdout(), "workspace", &workspaces)?;
    let projects = service.projects(&workspace.gid).await?;
    let project =
        prompt::choose_entry(&mut io::stdin().lock(), &mut io::stdout(), "project", &projects)?;

    let artifact = ConfigArtifact {
        workspace_id: workspace.gid.clone(),
        project_id: project.gid.clone(),
    };
    artifact.save(config_file).map_err(SetupError::from)?;
    info!(%config_file, "saved task target");

    let mut stdout = io::stdout().lock();
    writeln!(stdout, "Workspace: {} ({})", workspace.name, workspace.gid)?;
    writeln!(stdout, "Project: {} ({})", project.name, project.gid)?;
    writeln!(stdout, "Saved to {config_file}")?;
    Ok(())
}
