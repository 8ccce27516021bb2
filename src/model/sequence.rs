use ndarray::{Array2, ArrayView1, Axis};

use crate::model::{Shape, ShapeError};

/// One trajectory: `steps` rows by `channels` columns, row-major.
#[derive(Debug, Clone, PartialEq)]
pub struct Sequence {
    values: Array2<f64>,
}

impl Sequence {
    pub fn new(steps: usize, channels: usize, values: Vec<f64>) -> Result<Self, ShapeError> {
        let actual = values.len();
        let values =
            Array2::from_shape_vec((steps, channels), values).map_err(|_| ShapeError::Length {
                shape: (steps, channels),
                expected: steps * channels,
                actual,
            })?;
        Ok(Self { values })
    }

    /// Builds a sequence from per-step rows. An empty slice yields shape `(0, 0)`.
    pub fn from_rows(rows: &[Vec<f64>]) -> Result<Self, ShapeError> {
        let channels = rows.first().map_or(0, Vec::len);
        let mut flat = Vec::with_capacity(rows.len() * channels);
        for (row, values) in rows.iter().enumerate() {
            if values.len() != channels {
                return Err(ShapeError::Ragged {
                    row,
                    expected: channels,
                    actual: values.len(),
                });
            }
            flat.extend_from_slice(values);
        }
        Self::new(rows.len(), channels, flat)
    }

    pub fn steps(&self) -> usize {
        self.values.nrows()
    }

    pub fn channels(&self) -> usize {
        self.values.ncols()
    }

    pub fn shape(&self) -> Shape {
        (self.steps(), self.channels())
    }

    pub fn is_empty(&self) -> bool {
        self.steps() == 0
    }

    pub fn view(&self) -> &Array2<f64> {
        &self.values
    }

    /// Contiguous copy of one channel over time.
    pub fn channel(&self, channel: usize) -> Vec<f64> {
        self.values.column(channel).to_vec()
    }

    pub fn rows(&self) -> impl Iterator<Item = ArrayView1<'_, f64>> {
        self.values.axis_iter(Axis(0))
    }

    pub fn to_rows(&self) -> Vec<Vec<f64>> {
        self.rows().map(|r| r.to_vec()).collect()
    }
}
