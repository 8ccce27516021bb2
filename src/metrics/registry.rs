use crate::metrics::agreement::index_of_agreement;
use crate::metrics::fourier::fourier_amplitude_error;
use crate::metrics::gradient::{mean_absolute_gradient_error, mean_squared_gradient_error};
use crate::metrics::pointwise::{mean_absolute_error, mean_squared_error, root_mean_squared_error};
use crate::metrics::spread::column_std;
use crate::metrics::{PerSampleFn, TableReduceFn};

#[derive(Debug, Clone, Copy)]
pub enum MetricKind {
    /// One score row per sample, aggregated by step-count weighting.
    PerSample(PerSampleFn),
    /// A statistic of the whole collection: `basis` is scored per sample,
    /// then `reduce` collapses the table to one value per channel.
    CollectionLevel {
        basis: PerSampleFn,
        reduce: TableReduceFn,
    },
}

#[derive(Debug, Clone, Copy)]
pub struct Metric {
    pub name: &'static str,
    pub kind: MetricKind,
}

impl Metric {
    pub const fn per_sample(name: &'static str, f: PerSampleFn) -> Self {
        Self {
            name,
            kind: MetricKind::PerSample(f),
        }
    }

    pub const fn collection(name: &'static str, basis: PerSampleFn, reduce: TableReduceFn) -> Self {
        Self {
            name,
            kind: MetricKind::CollectionLevel { basis, reduce },
        }
    }
}

/// The full metric battery, in report order.
pub fn default_registry() -> Vec<Metric> {
    vec![
        Metric::per_sample("mse", mean_squared_error),
        Metric::per_sample("rmse", root_mean_squared_error),
        Metric::collection("rmse-std", root_mean_squared_error, column_std),
        Metric::per_sample("mae", mean_absolute_error),
        Metric::per_sample("d1", index_of_agreement),
        Metric::per_sample("mae_grad", mean_absolute_gradient_error),
        Metric::per_sample("mse_grad", mean_squared_gradient_error),
        Metric::per_sample("fourier_error", fourier_amplitude_error),
    ]
}

/// Restricts the default registry to `names`, keeping registry order.
/// An empty selection keeps every metric.
pub fn select_metrics(names: &[String]) -> Result<Vec<Metric>, String> {
    let all = default_registry();
    if names.is_empty() {
        return Ok(all);
    }
    for name in names {
        if !all.iter().any(|m| m.name == name) {
            let known = all.iter().map(|m| m.name).collect::<Vec<_>>().join(", ");
            return Err(format!("unknown metric `{name}` (known: {known})"));
        }
    }
    Ok(all
        .into_iter()
        .filter(|m| names.iter().any(|n| n == m.name))
        .collect())
}
