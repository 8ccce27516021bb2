use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};

use flate2::read::GzDecoder;
use thiserror::Error;

pub mod config;
pub mod json;
pub mod traj_bin;

use crate::model::ShapeError;
use crate::model::sequence::Sequence;
use crate::pipeline::stage3_report::EvalMode;

/// Ordered samples of one evaluation run: identifier, truth and prediction.
#[derive(Debug, Clone, PartialEq)]
pub struct TrajectorySet {
    pub file_names: Vec<String>,
    pub trues: Vec<Sequence>,
    pub predicted: Vec<Sequence>,
}

impl TrajectorySet {
    pub fn new(
        file_names: Vec<String>,
        trues: Vec<Sequence>,
        predicted: Vec<Sequence>,
    ) -> Result<Self, InputError> {
        if trues.len() != file_names.len() || predicted.len() != file_names.len() {
            return Err(InputError::InvalidInput(format!(
                "sample count mismatch: {} file names, {} true, {} predicted",
                file_names.len(),
                trues.len(),
                predicted.len()
            )));
        }
        Ok(Self {
            file_names,
            trues,
            predicted,
        })
    }

    pub fn len(&self) -> usize {
        self.file_names.len()
    }

    /// Step count of every sample, taken from the predicted sequence.
    pub fn steps(&self) -> Vec<usize> {
        self.predicted.iter().map(Sequence::steps).collect()
    }

    pub fn channels(&self) -> Option<usize> {
        self.trues.first().map(Sequence::channels)
    }
}

#[derive(Debug, Error)]
pub enum InputError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("missing input: {0}")]
    MissingInput(String),
    #[error("invalid input: {0}")]
    InvalidInput(String),
    #[error("parse error: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("sample {sample} ({side}): {source}")]
    Sequence {
        sample: usize,
        side: &'static str,
        #[source]
        source: ShapeError,
    },
}

pub fn open_maybe_gz(path: &Path) -> Result<Box<dyn BufRead>, InputError> {
    let file = File::open(path)?;
    if path.extension().is_some_and(|ext| ext == "gz") {
        Ok(Box::new(BufReader::new(GzDecoder::new(file))))
    } else {
        Ok(Box::new(BufReader::new(file)))
    }
}

/// `<mode>-w_<window>-h_<horizon>`, the stem of a model's prediction file.
pub fn trajectory_stem(mode: EvalMode, window: usize, horizon: usize) -> String {
    format!("{}-w_{}-h_{}", mode.as_str(), window, horizon)
}

/// First existing of `<stem>.bin`, `<stem>.json`, `<stem>.json.gz` in `model_dir`.
pub fn find_trajectory_path(model_dir: &Path, stem: &str) -> Result<PathBuf, InputError> {
    for ext in ["bin", "json", "json.gz"] {
        let candidate = model_dir.join(format!("{stem}.{ext}"));
        if candidate.exists() {
            return Ok(candidate);
        }
    }
    Err(InputError::MissingInput(format!(
        "no {stem}.bin, {stem}.json or {stem}.json.gz in {}",
        model_dir.display()
    )))
}

pub fn load_trajectories(path: &Path) -> Result<TrajectorySet, InputError> {
    let set = if path.extension().is_some_and(|ext| ext == "bin") {
        traj_bin::read_traj_bin(path)?
    } else {
        json::read_trajectory_json(path)?
    };
    tracing::info!(
        path = %path.display(),
        samples = set.len(),
        channels = set.channels().unwrap_or(0),
        "loaded trajectories"
    );
    Ok(set)
}

#[cfg(test)]
#[path = "../../tests/src_inline/input/tests.rs"]
mod tests;
