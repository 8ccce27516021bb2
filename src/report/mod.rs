pub mod json;
pub mod text;

use std::collections::BTreeMap;
use std::ops::Index;

use serde::ser::SerializeMap;
use serde::{Deserialize, Serialize, Serializer};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ReportError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ToolMeta {
    pub name: String,
    pub version: String,
    pub simd_backend: String,
}

impl ToolMeta {
    pub fn current() -> Self {
        Self {
            name: env!("CARGO_PKG_NAME").to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
            simd_backend: crate::simd::backend_name().to_string(),
        }
    }
}

/// Everything scored in one run, per sample, for later inspection.
///
/// `file_names`, `steps` and the rows of every `per_sample` table share
/// one order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Report {
    pub tool: ToolMeta,
    pub state_names: Vec<String>,
    pub file_names: Vec<String>,
    pub steps: Vec<usize>,
    /// Metric names in evaluation order.
    pub metrics: Vec<String>,
    pub per_sample: BTreeMap<String, Vec<Vec<f64>>>,
    pub collection: BTreeMap<String, Vec<f64>>,
}

/// Condensed, human-facing result: one aggregate vector per metric.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Summary {
    pub scores: ScoreMap,
    pub state_names: Vec<String>,
}

/// Metric name to per-channel values, kept in evaluation order. Serializes
/// as a JSON object whose keys follow that order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ScoreMap {
    entries: Vec<(String, Vec<f64>)>,
}

impl ScoreMap {
    /// Replaces the values of an existing `name` in place.
    pub fn insert(&mut self, name: String, values: Vec<f64>) {
        match self.entries.iter_mut().find(|(n, _)| *n == name) {
            Some(entry) => entry.1 = values,
            None => self.entries.push((name, values)),
        }
    }

    pub fn get(&self, name: &str) -> Option<&Vec<f64>> {
        self.entries
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, values)| values)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &Vec<f64>)> {
        self.entries.iter().map(|(n, v)| (n, v))
    }
}

impl FromIterator<(String, Vec<f64>)> for ScoreMap {
    fn from_iter<I: IntoIterator<Item = (String, Vec<f64>)>>(iter: I) -> Self {
        let mut map = ScoreMap::default();
        for (name, values) in iter {
            map.insert(name, values);
        }
        map
    }
}

impl Index<&str> for ScoreMap {
    type Output = Vec<f64>;

    fn index(&self, name: &str) -> &Vec<f64> {
        match self.get(name) {
            Some(values) => values,
            None => panic!("no scores for metric `{name}`"),
        }
    }
}

impl Serialize for ScoreMap {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (name, values) in &self.entries {
            map.serialize_entry(name, values)?;
        }
        map.end()
    }
}

pub fn format_f64_6(v: f64) -> String {
    format!("{:.6}", v)
}

/// Mean of the two middle values for even counts; 0 for an empty slice.
pub fn median(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    let mut sorted = values.to_vec();
    sorted.sort_by(f64::total_cmp);
    let mid = sorted.len() / 2;
    if sorted.len() % 2 == 0 {
        (sorted[mid - 1] + sorted[mid]) / 2.0
    } else {
        sorted[mid]
    }
}

#[cfg(test)]
#[path = "../../tests/src_inline/report/mod.rs"]
mod tests;
