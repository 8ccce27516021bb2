use ndarray::{Array2, ArrayView1, Axis};

use crate::model::ShapeError;

/// One metric's scores: a row per sample, a column per channel.
#[derive(Debug, Clone, PartialEq)]
pub struct ScoreTable {
    values: Array2<f64>,
}

impl ScoreTable {
    pub fn from_rows(channels: usize, rows: Vec<Vec<f64>>) -> Result<Self, ShapeError> {
        let n_rows = rows.len();
        let mut flat = Vec::with_capacity(n_rows * channels);
        for (row, values) in rows.into_iter().enumerate() {
            if values.len() != channels {
                return Err(ShapeError::Ragged {
                    row,
                    expected: channels,
                    actual: values.len(),
                });
            }
            flat.extend(values);
        }
        let actual = flat.len();
        let values = Array2::from_shape_vec((n_rows, channels), flat).map_err(|_| {
            ShapeError::Length {
                shape: (n_rows, channels),
                expected: n_rows * channels,
                actual,
            }
        })?;
        Ok(Self { values })
    }

    pub fn n_rows(&self) -> usize {
        self.values.nrows()
    }

    pub fn channels(&self) -> usize {
        self.values.ncols()
    }

    pub fn rows(&self) -> impl Iterator<Item = ArrayView1<'_, f64>> {
        self.values.axis_iter(Axis(0))
    }

    pub fn column(&self, channel: usize) -> Vec<f64> {
        self.values.column(channel).to_vec()
    }

    pub fn to_rows(&self) -> Vec<Vec<f64>> {
        self.rows().map(|r| r.to_vec()).collect()
    }
}
