use std::collections::BTreeMap;
use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use clap::ValueEnum;

use crate::pipeline::EvalError;
use crate::pipeline::stage1_score::{MetricScores, ScoredMetric};
use crate::pipeline::stage2_aggregate::aggregate_all;
use crate::report::json::{render_report_json, render_summary_json};
use crate::report::text::render_report_text;
use crate::report::{Report, ReportError, Summary, ToolMeta, format_f64_6};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum EvalMode {
    Test,
    Validation,
}

impl EvalMode {
    pub fn as_str(self) -> &'static str {
        match self {
            EvalMode::Test => "test",
            EvalMode::Validation => "validation",
        }
    }

    fn scores_prefix(self) -> &'static str {
        match self {
            EvalMode::Test => "scores",
            EvalMode::Validation => "validation_scores",
        }
    }
}

/// `scores-w_<window>-h_<horizon>` or `validation_scores-w_<window>-h_<horizon>`.
pub fn output_stem(mode: EvalMode, window: usize, horizon: usize) -> String {
    format!("{}-w_{}-h_{}", mode.scores_prefix(), window, horizon)
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportPaths {
    pub summary: PathBuf,
    pub full: PathBuf,
    pub samples_tsv: PathBuf,
    pub text: PathBuf,
}

impl ReportPaths {
    pub fn new(out_dir: &Path, stem: &str) -> Self {
        Self {
            summary: out_dir.join(format!("{stem}.json")),
            full: out_dir.join(format!("{stem}.full.json")),
            samples_tsv: out_dir.join(format!("{stem}.tsv")),
            text: out_dir.join(format!("{stem}.txt")),
        }
    }
}

/// Packs scored metrics into the full report and the summary. Per-sample
/// tables are aggregated with `steps` as weights.
pub fn assemble_report(
    metrics: &[ScoredMetric],
    steps: &[usize],
    file_names: &[String],
    state_names: &[String],
) -> Result<(Report, Summary), EvalError> {
    if file_names.len() != steps.len() {
        return Err(EvalError::LengthMismatch {
            what: "file names".to_string(),
            expected: steps.len(),
            actual: file_names.len(),
        });
    }
    for m in metrics {
        let (rows, channels) = match &m.scores {
            MetricScores::PerSample(table) => (Some(table.n_rows()), table.channels()),
            MetricScores::Collection(values) => (None, values.len()),
        };
        if channels != state_names.len() {
            return Err(EvalError::ConfigurationMismatch {
                names: state_names.len(),
                channels,
            });
        }
        if let Some(rows) = rows {
            if rows != steps.len() {
                return Err(EvalError::LengthMismatch {
                    what: format!("rows of `{}`", m.name),
                    expected: steps.len(),
                    actual: rows,
                });
            }
        }
    }

    let aggregates = aggregate_all(metrics, steps)?;

    let mut per_sample = BTreeMap::new();
    let mut collection = BTreeMap::new();
    for m in metrics {
        match &m.scores {
            MetricScores::PerSample(table) => {
                per_sample.insert(m.name.to_string(), table.to_rows());
            }
            MetricScores::Collection(values) => {
                collection.insert(m.name.to_string(), values.clone());
            }
        }
    }

    let report = Report {
        tool: ToolMeta::current(),
        state_names: state_names.to_vec(),
        file_names: file_names.to_vec(),
        steps: steps.to_vec(),
        metrics: metrics.iter().map(|m| m.name.to_string()).collect(),
        per_sample,
        collection,
    };
    let summary = Summary {
        scores: aggregates
            .into_iter()
            .map(|a| (a.name.to_string(), a.values))
            .collect(),
        state_names: state_names.to_vec(),
    };
    Ok((report, summary))
}

/// Renders everything first, then writes the four files.
pub fn write_reports(
    report: &Report,
    summary: &Summary,
    out_dir: &Path,
    stem: &str,
) -> Result<ReportPaths, ReportError> {
    let summary_json = render_summary_json(summary)?;
    let report_json = render_report_json(report)?;
    let text = render_report_text(report, summary);

    fs::create_dir_all(out_dir)?;
    let paths = ReportPaths::new(out_dir, stem);
    write_text(&paths.summary, &summary_json)?;
    write_text(&paths.full, &report_json)?;
    write_samples_tsv(report, &paths.samples_tsv)?;
    write_text(&paths.text, &text)?;

    tracing::info!(
        summary = %paths.summary.display(),
        full = %paths.full.display(),
        "wrote reports"
    );
    Ok(paths)
}

fn write_samples_tsv(report: &Report, path: &Path) -> std::io::Result<()> {
    let mut w = BufWriter::new(File::create(path)?);

    let tables = report
        .metrics
        .iter()
        .filter_map(|name| report.per_sample.get(name).map(|rows| (name, rows)))
        .collect::<Vec<_>>();

    let mut header = vec!["file_name".to_string(), "steps".to_string()];
    for (name, _) in &tables {
        for state in &report.state_names {
            header.push(format!("{name}:{state}"));
        }
    }
    writeln!(w, "{}", header.join("\t"))?;

    for (sample, file_name) in report.file_names.iter().enumerate() {
        let mut row = vec![file_name.clone(), report.steps[sample].to_string()];
        for (_, rows) in &tables {
            for v in &rows[sample] {
                row.push(format_f64_6(*v));
            }
        }
        writeln!(w, "{}", row.join("\t"))?;
    }
    w.flush()
}

fn write_text(path: &Path, text: &str) -> std::io::Result<()> {
    let mut w = BufWriter::new(File::create(path)?);
    w.write_all(text.as_bytes())?;
    w.write_all(b"\n")?;
    w.flush()
}

#[cfg(test)]
#[path = "../../tests/src_inline/pipeline/stage3_report.rs"]
mod tests;
