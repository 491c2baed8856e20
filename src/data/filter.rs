use super::aggregate::AggregateRow;
use super::model::Dataset;

// ---------------------------------------------------------------------------
// Selection filter over the precomputed aggregate rows
// ---------------------------------------------------------------------------

/// Room heights charted as separate series.
pub const ROOM_HEIGHTS: [f64; 2] = [3.5, 7.0];

/// Rows whose compactness and height equal the given values exactly.
/// No match is a valid, empty answer.
pub fn filter_by_compactness_and_height(
    rows: &[AggregateRow],
    compactness: f64,
    height: f64,
) -> Vec<&AggregateRow> {
    rows.iter()
        .filter(|r| r.relative_compactness == compactness && r.overall_height == height)
        .collect()
}

/// Distinct compactness values of the dataset, ascending.  The first one
/// is the default selection.
pub fn compactness_options(dataset: &Dataset) -> Vec<f64> {
    let mut values: Vec<f64> = dataset
        .normalized
        .observations()
        .map(|o| o.relative_compactness)
        .collect();
    values.sort_by(f64::total_cmp);
    values.dedup();
    values
}

// ---------------------------------------------------------------------------
// CompactnessView – everything the charts need for one selection
// ---------------------------------------------------------------------------

/// Aggregate rows of one room height.
#[derive(Debug, Clone, PartialEq)]
pub struct HeightSeries<'a> {
    pub height: f64,
    pub rows: Vec<&'a AggregateRow>,
}

/// The aggregate table sliced for one compactness value, one series per
/// entry of [`ROOM_HEIGHTS`].
#[derive(Debug, Clone, PartialEq)]
pub struct CompactnessView<'a> {
    pub compactness: f64,
    pub series: Vec<HeightSeries<'a>>,
}

impl<'a> CompactnessView<'a> {
    pub fn build(rows: &'a [AggregateRow], compactness: f64) -> Self {
        let series = ROOM_HEIGHTS
            .iter()
            .map(|&height| HeightSeries {
                height,
                rows: filter_by_compactness_and_height(rows, compactness, height),
            })
            .collect();
        CompactnessView {
            compactness,
            series,
        }
    }

    /// True when no series has a row.
    pub fn is_empty(&self) -> bool {
        self.series.iter().all(|s| s.rows.is_empty())
    }

    /// All rows of all series, in series order.
    pub fn rows(&self) -> impl Iterator<Item = &'a AggregateRow> + '_ {
        self.series.iter().flat_map(|s| s.rows.iter().copied())
    }

    /// One sentence per empty series, or `None` when every height has data.
    pub fn no_data_message(&self) -> Option<String> {
        let parts: Vec<String> = self
            .series
            .iter()
            .filter(|s| s.rows.is_empty())
            .map(|s| {
                format!(
                    "No data available for the room height of {} for the relative compactness of {}.",
                    s.height, self.compactness
                )
            })
            .collect();
        (!parts.is_empty()).then(|| parts.join(" "))
    }

    /// Caption naming the height of the first series.
    pub fn current_height_text(&self) -> String {
        match self.series.first().and_then(|s| s.rows.first()) {
            Some(row) => format!("Current Room Height: {}", row.overall_height),
            None => "Current Room Height: N/A".to_string(),
        }
    }

    pub fn chart_title(&self) -> String {
        if self.is_empty() {
            format!(
                "NOTE: No data available for Relative Compactness: {}",
                self.compactness
            )
        } else {
            format!("Mean Total Load per Glazing Area ({})", self.compactness)
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
