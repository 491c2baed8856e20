use super::aggregate::{
    compute_correlation_matrix, compute_mean_load, AggregateRow, CorrelationMatrix,
};
use super::error::AggregationError;
use super::filter::compactness_options;
use super::model::Dataset;

// ---------------------------------------------------------------------------
// Dashboard – everything derived once per loaded dataset
// ---------------------------------------------------------------------------

/// Immutable result of running the aggregation engine over a dataset.
/// Each output keeps its own `Result` so one failing chart does not take
/// the other down.
#[derive(Debug, Clone)]
pub struct Dashboard {
    pub dataset: Dataset,
    pub mean_load: Result<Vec<AggregateRow>, AggregationError>,
    pub correlation: Result<CorrelationMatrix, AggregationError>,
    /// Distinct compactness values, ascending.
    pub compactness_values: Vec<f64>,
}

impl Dashboard {
    pub fn build(dataset: Dataset) -> Self {
        let mean_load = compute_mean_load(&dataset.normalized);
        let correlation = compute_correlation_matrix(&dataset.correlation_table);

        if let Err(e) = &mean_load {
            log::warn!("Mean load aggregation unavailable: {e}");
        }
        if let Err(e) = &correlation {
            log::warn!("Correlation matrix unavailable: {e}");
        }

        let compactness_values = compactness_options(&dataset);
        Dashboard {
            dataset,
            mean_load,
            correlation,
            compactness_values,
        }
    }

    /// The initial selection: the smallest compactness value.
    pub fn default_compactness(&self) -> Option<f64> {
        self.compactness_values.first().copied()
    }
}
