use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use flate2::Compression;
use flate2::write::GzEncoder;
use serde::{Deserialize, Serialize};

use crate::input::{InputError, TrajectorySet, open_maybe_gz};
use crate::model::sequence::Sequence;

/// On-disk layout: `sample -> step -> channel`.
#[derive(Debug, Serialize, Deserialize)]
pub struct TrajectoryFile {
    pub file_names: Vec<String>,
    #[serde(rename = "true")]
    pub truth: Vec<Vec<Vec<f64>>>,
    pub predicted: Vec<Vec<Vec<f64>>>,
}

impl TrajectoryFile {
    pub fn into_set(self) -> Result<TrajectorySet, InputError> {
        let trues = to_sequences(&self.truth, "true")?;
        let predicted = to_sequences(&self.predicted, "predicted")?;
        TrajectorySet::new(self.file_names, trues, predicted)
    }

    pub fn from_set(set: &TrajectorySet) -> Self {
        Self {
            file_names: set.file_names.clone(),
            truth: set.trues.iter().map(Sequence::to_rows).collect(),
            predicted: set.predicted.iter().map(Sequence::to_rows).collect(),
        }
    }
}

fn to_sequences(samples: &[Vec<Vec<f64>>], side: &'static str) -> Result<Vec<Sequence>, InputError> {
    samples
        .iter()
        .enumerate()
        .map(|(sample, rows)| {
            Sequence::from_rows(rows).map_err(|source| InputError::Sequence {
                sample,
                side,
                source,
            })
        })
        .collect()
}

pub fn read_trajectory_json(path: &Path) -> Result<TrajectorySet, InputError> {
    let reader = open_maybe_gz(path)?;
    let file: TrajectoryFile = serde_json::from_reader(reader)?;
    file.into_set()
}

/// Gzip-compressed when `path` ends in `.gz`.
pub fn write_trajectory_json(path: &Path, set: &TrajectorySet) -> Result<(), InputError> {
    let file = TrajectoryFile::from_set(set);
    let w = BufWriter::new(File::create(path)?);
    if path.extension().is_some_and(|ext| ext == "gz") {
        let mut gz = GzEncoder::new(w, Compression::default());
        serde_json::to_writer(&mut gz, &file)?;
        gz.finish()?.flush()?;
    } else {
        let mut w = w;
        serde_json::to_writer(&mut w, &file)?;
        w.flush()?;
    }
    Ok(())
}
