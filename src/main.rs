mod input;
mod logging;
mod metrics;
mod model;
mod pipeline;
mod report;
mod simd;

use std::path::{Path, PathBuf};

use clap::{Args, Parser, Subcommand};
use thiserror::Error;

use crate::input::config::load_run_config;
use crate::input::json::write_trajectory_json;
use crate::input::traj_bin::write_traj_bin;
use crate::input::{InputError, find_trajectory_path, load_trajectories, trajectory_stem};
use crate::metrics::select_metrics;
use crate::pipeline::stage1_score::DegeneratePolicy;
use crate::pipeline::stage3_report::{EvalMode, output_stem, write_reports};
use crate::pipeline::{EvalError, run_pipeline};
use crate::report::ReportError;

#[derive(Debug, Parser)]
#[command(name = "sysid-eval", version, about)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Score a model's stored predictions and write the reports next to them.
    Evaluate(EvaluateArgs),
    /// Convert a trajectory file; the output extension picks the format.
    Pack { input: PathBuf, output: PathBuf },
}

#[derive(Debug, Args)]
struct EvaluateArgs {
    #[arg(long, value_enum)]
    mode: EvalMode,
    #[arg(long, env = "CONFIGURATION")]
    config: PathBuf,
    #[arg(long = "result-dir", env = "RESULT_DIRECTORY")]
    result_dir: PathBuf,
    /// Restrict scoring to these metrics (repeatable).
    #[arg(long = "metric")]
    metrics: Vec<String>,
    #[arg(long, value_enum, default_value_t = DegeneratePolicy::Fail)]
    degenerate: DegeneratePolicy,
    model: String,
}

#[derive(Debug, Error)]
enum RunError {
    #[error(transparent)]
    Input(#[from] InputError),
    #[error(transparent)]
    Eval(#[from] EvalError),
    #[error(transparent)]
    Report(#[from] ReportError),
    #[error("{0}")]
    Usage(String),
}

fn main() {
    logging::init();
    if let Err(err) = run(Cli::parse()) {
        if let RunError::Eval(eval) = &err {
            tracing::error!(class = ?eval.class(), "{err}");
        } else {
            tracing::error!("{err}");
        }
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<(), RunError> {
    match cli.command {
        Command::Evaluate(args) => evaluate(&args),
        Command::Pack { input, output } => pack(&input, &output),
    }
}

fn evaluate(args: &EvaluateArgs) -> Result<(), RunError> {
    tracing::info!(simd = simd::backend_name(), model = %args.model, "starting evaluation");

    let config = load_run_config(&args.config)?;
    let registry = select_metrics(&args.metrics).map_err(RunError::Usage)?;

    let model_dir = args.result_dir.join(&args.model);
    let stem = trajectory_stem(args.mode, config.window, config.horizon);
    let path = find_trajectory_path(&model_dir, &stem)?;
    let set = load_trajectories(&path)?;

    let (report, summary) = run_pipeline(&set, &registry, &config.state_names, args.degenerate)?;

    let out_stem = output_stem(args.mode, config.window, config.horizon);
    let paths = write_reports(&report, &summary, &model_dir, &out_stem)?;
    tracing::info!(
        summary = %paths.summary.display(),
        samples = report.file_names.len(),
        "evaluation finished"
    );
    Ok(())
}

fn pack(input: &Path, output: &Path) -> Result<(), RunError> {
    if input == output {
        return Err(RunError::Usage(
            "pack: input and output must differ".to_string(),
        ));
    }
    let set = load_trajectories(input)?;
    if is_binary_path(output) {
        write_traj_bin(output, &set)?;
    } else {
        write_trajectory_json(output, &set)?;
    }
    tracing::info!(output = %output.display(), samples = set.len(), "packed trajectories");
    Ok(())
}

fn is_binary_path(path: &Path) -> bool {
    path.extension().is_some_and(|ext| ext == "bin")
}

#[cfg(test)]
#[path = "../tests/src_inline/main_inline.rs"]
mod tests;
