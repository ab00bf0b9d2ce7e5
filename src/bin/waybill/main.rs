//! Command-line entry point for the transfer-to-task pipeline.
//!
//! Usage:
//!
//! ```text
//! waybill run                 # file tasks for the production window
//! waybill inspect --hours 24  # dry run over a wider window
//! waybill setup               # choose the workspace and project
//! ```
//!
//! Credentials are read from the environment (`METRC_INTEGRATOR_KEY`,
//! `METRC_USER_KEY`, `METRC_LICENSE`, `ASANA_PAT`). The workspace and project
//! come from `ASANA_WORKSPACE_ID`/`ASANA_PROJECT_ID` or from the file written
//! by `waybill setup`. Set `RUST_LOG` to adjust log verbosity.

mod cli;
mod prompt;
mod render;


use clap::Parser;
use tokio::runtime::Builder;
use tracing::error;

/// Boxed error type for the main result.
type BoxError = Box<dyn std::error::Error + Send + Sync>;

fn main() -> Result<(), BoxError> {
    waybill::telemetry::init_tracing()?;
    let cli = cli::Cli::parse();
    let runtime = Builder::new_current_thread().enable_all().build()?;
    runtime
        .block_on(cli::dispatch(&cli))
        .inspect_err(|err| error!(error = %err, "waybill failed"))
}
