pub mod scores;
pub mod sequence;

use thiserror::Error;

/// `(steps, channels)`.
pub type Shape = (usize, usize);

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ShapeError {
    #[error("expected {expected} values for shape {shape:?}, got {actual}")]
    Length {
        shape: Shape,
        expected: usize,
        actual: usize,
    },
    #[error("row {row} has {actual} values, expected {expected}")]
    Ragged {
        row: usize,
        expected: usize,
        actual: usize,
    },
}
