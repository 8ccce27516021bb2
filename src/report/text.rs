use crate::report::{Report, Summary, format_f64_6, median};

const WORST_SAMPLES: usize = 3;

pub fn render_report_text(report: &Report, summary: &Summary) -> String {
    let mut out = String::new();

    out.push_str("Multi-step Prediction Scores\n");
    out.push_str("============================\n\n");

    out.push_str("1. Samples\n");
    let steps = report.steps.iter().map(|&s| s as f64).collect::<Vec<_>>();
    let total: usize = report.steps.iter().sum();
    out.push_str(&format!("Samples: {}\n", report.file_names.len()));
    out.push_str(&format!("Total steps: {}\n", total));
    out.push_str(&format!(
        "Steps per sample (min/median/max): {}/{}/{}\n\n",
        report.steps.iter().min().copied().unwrap_or(0),
        median(&steps),
        report.steps.iter().max().copied().unwrap_or(0)
    ));

    out.push_str("2. Step-weighted scores\n");
    let width = summary
        .scores
        .iter()
        .map(|(name, _)| name.len())
        .max()
        .unwrap_or(0)
        .max("metric".len());
    out.push_str(&format!("{:<width$}", "metric"));
    for state in &summary.state_names {
        out.push_str(&format!("\t{}", state));
    }
    out.push('\n');
    for (name, values) in summary.scores.iter() {
        out.push_str(&format!("{:<width$}", name));
        for v in values {
            out.push('\t');
            out.push_str(&format_f64_6(*v));
        }
        if report.collection.contains_key(name) {
            out.push_str("\t(across samples)");
        }
        out.push('\n');
    }
    out.push('\n');

    if let Some(rmse) = report.per_sample.get("rmse") {
        out.push_str("3. Worst samples by mean rmse\n");
        for (idx, score) in worst_samples(rmse, WORST_SAMPLES) {
            out.push_str(&format!(
                "{} (steps={}): {}\n",
                report.file_names[idx],
                report.steps[idx],
                format_f64_6(score)
            ));
        }
    }

    out
}

/// Indices of the `k` rows with the largest channel mean, largest first.
/// Ties keep sample order; NaN rows sort last.
fn worst_samples(rows: &[Vec<f64>], k: usize) -> Vec<(usize, f64)> {
    let mut scored = rows
        .iter()
        .enumerate()
        .map(|(i, row)| {
            let mean = if row.is_empty() {
                0.0
            } else {
                row.iter().sum::<f64>() / row.len() as f64
            };
            (i, mean)
        })
        .collect::<Vec<_>>();
    scored.sort_by(|a, b| match (a.1.is_nan(), b.1.is_nan()) {
        (false, true) => std::cmp::Ordering::Less,
        (true, false) => std::cmp::Ordering::Greater,
        _ => b.1.total_cmp(&a.1).then(a.0.cmp(&b.0)),
    });
    scored.truncate(k);
    scored
}
