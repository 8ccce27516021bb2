use crate::metrics::{DegenerateKind, MetricError, ScoreVector};
use crate::model::scores::ScoreTable;
use crate::simd::sum_f64;

/// Population standard deviation (ddof = 0) of each column across rows.
///
/// Applied to the rmse table this is `rmse-std`: how much accuracy varies
/// from one sample to the next.
pub fn column_std(table: &ScoreTable) -> Result<ScoreVector, MetricError> {
    let n = table.n_rows();
    if n == 0 {
        return Err(DegenerateKind::EmptyTable.into());
    }
    let mut out = Vec::with_capacity(table.channels());
    for c in 0..table.channels() {
        let column = table.column(c);
        let mean = sum_f64(&column) / n as f64;
        let mut acc = 0f64;
        for v in &column {
            let d = v - mean;
            acc += d * d;
        }
        out.push((acc / n as f64).sqrt());
    }
    Ok(out)
}
