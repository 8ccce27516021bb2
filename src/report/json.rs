use crate::report::{Report, Summary};

/// `{"scores": {...}, "state_names": [...]}`. NaN scores render as `null`.
pub fn render_summary_json(summary: &Summary) -> Result<String, serde_json::Error> {
    serde_json::to_string(summary)
}

pub fn render_report_json(report: &Report) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(report)
}
