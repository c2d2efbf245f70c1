mod cli;
mod input;
mod logging;

use std::fs;
use std::process::ExitCode;

use anyhow::Context;
use clap::Parser;

use cli::Cli;
use input::{build_unit, UnitInput};
use logging::init_logging;
use relforge_driver::{run, PipelineInputs};

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(&cli.log_args);

    match run_cli(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            tracing::error!(error = %err, "generation failed");
            ExitCode::FAILURE
        }
    }
}

fn run_cli(cli: &Cli) -> anyhow::Result<()> {
    let options = cli.to_options()?;
    let database = options.database;

    let raw = fs::read_to_string(&cli.input)
        .with_context(|| format!("reading semantic-graph fixture `{}`", cli.input.display()))?;
    let unit_input: UnitInput = serde_json::from_str(&raw)
        .with_context(|| format!("parsing semantic-graph fixture `{}`", cli.input.display()))?;
    let mut unit = build_unit(unit_input)?;

    let base = cli
        .input
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "schema".to_string());

    let inputs = PipelineInputs {
        base,
        changelog_path: cli.changelog_out.clone(),
        migration_dir: cli.changelog_dir.clone(),
    };

    let report = run(&mut unit, &options, database, &inputs)?;

    if options.show_sloc {
        tracing::info!(sloc = report.sloc, "generation complete");
    }
    if let Some((pre, post)) = &report.migration_written {
        tracing::info!(pre = %pre.display(), post = %post.display(), "migration scripts written");
    }

    Ok(())
}
