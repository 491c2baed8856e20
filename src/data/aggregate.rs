use std::cmp::Ordering;
use std::collections::BTreeMap;

use super::error::AggregationError;
use super::model::{DataTable, NormalizedTable};

// ---------------------------------------------------------------------------
// GroupKey – (compactness, glazing area, height)
// ---------------------------------------------------------------------------

/// Grouping key of the mean-load aggregation.  Ordered field by field with
/// `f64::total_cmp` so it can live in a `BTreeMap`; build it with
/// [`GroupKey::new`] so `-0.0` and `0.0` land in the same group.
#[derive(Debug, Clone, Copy)]
pub struct GroupKey {
    pub relative_compactness: f64,
    pub glazing_area: f64,
    pub overall_height: f64,
}

impl GroupKey {
    pub fn new(relative_compactness: f64, glazing_area: f64, overall_height: f64) -> Self {
        // `-0.0 + 0.0 == +0.0`
        GroupKey {
            relative_compactness: relative_compactness + 0.0,
            glazing_area: glazing_area + 0.0,
            overall_height: overall_height + 0.0,
        }
    }
}

impl PartialEq for GroupKey {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for GroupKey {}

impl PartialOrd for GroupKey {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for GroupKey {
    fn cmp(&self, other: &Self) -> Ordering {
        self.relative_compactness
            .total_cmp(&other.relative_compactness)
            .then_with(|| self.glazing_area.total_cmp(&other.glazing_area))
            .then_with(|| self.overall_height.total_cmp(&other.overall_height))
    }
}

// ---------------------------------------------------------------------------
// AggregateRow
// ---------------------------------------------------------------------------

/// Mean total load of one (compactness, glazing area, height) group.
#[derive(Debug, Clone, PartialEq)]
pub struct AggregateRow {
    pub relative_compactness: f64,
    pub glazing_area: f64,
    pub overall_height: f64,
    /// Mean rounded to one decimal, for charting.
    pub total_load: f64,
    /// `total_load` as displayed: `"36.0"`, `"12.3"`.
    pub total_load_text: String,
}

impl AggregateRow {
    pub fn key(&self) -> GroupKey {
        GroupKey::new(self.relative_compactness, self.glazing_area, self.overall_height)
    }
}

/// Round to one decimal, ties to even on the value scaled by 10
/// (`1.25` → `1.2`, `1.75` → `1.8`).
pub fn round_one_decimal(value: f64) -> f64 {
    (value * 10.0).round_ties_even() / 10.0
}

/// Whole numbers keep one fractional digit (`12.0`), everything else uses
/// the shortest representation that round-trips.
pub fn format_load(value: f64) -> String {
    if value.is_finite() && value.fract() == 0.0 {
        format!("{value:.1}")
    } else {
        format!("{value}")
    }
}

/// Mean `total_load` per (compactness, glazing area, height), sorted by key.
pub fn compute_mean_load(table: &NormalizedTable) -> Result<Vec<AggregateRow>, AggregationError> {
    let NormalizedTable::WithTotalLoad(rows) = table else {
        return Err(AggregationError::MissingTotalLoad);
    };

    // key → (sum, count)
    let mut groups: BTreeMap<GroupKey, (f64, usize)> = BTreeMap::new();
    for row in rows {
        let obs = &row.observation;
        let key = GroupKey::new(obs.relative_compactness, obs.glazing_area, obs.overall_height);
        let entry = groups.entry(key).or_insert((0.0, 0));
        entry.0 += row.total_load;
        entry.1 += 1;
    }
    log::debug!("{} observations grouped into {} aggregate rows", rows.len(), groups.len());

    Ok(groups
        .into_iter()
        .map(|(key, (sum, count))| {
            let mean = round_one_decimal(sum / count as f64);
            AggregateRow {
                relative_compactness: key.relative_compactness,
                glazing_area: key.glazing_area,
                overall_height: key.overall_height,
                total_load: mean,
                total_load_text: format_load(mean),
            }
        })
        .collect())
}

// ---------------------------------------------------------------------------
// Correlation matrix
// ---------------------------------------------------------------------------

/// Pairwise Pearson correlation across every column of a table.
#[derive(Debug, Clone, PartialEq)]
pub struct CorrelationMatrix {
    pub labels: Vec<String>,
    /// Row-major, `labels.len()` × `labels.len()`.
    pub values: Vec<Vec<f64>>,
}

impl CorrelationMatrix {
    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    pub fn get(&self, i: usize, j: usize) -> f64 {
        self.values[i][j]
    }
}

/// Pearson correlation of two equally long series.  A zero-variance
/// series correlates 0.0 with anything.
fn pearson(x: &[f64], y: &[f64]) -> f64 {
    let n = x.len() as f64;
    let mean_x = x.iter().sum::<f64>() / n;
    let mean_y = y.iter().sum::<f64>() / n;

    let (mut cov, mut var_x, mut var_y) = (0.0, 0.0, 0.0);
    for (xi, yi) in x.iter().zip(y) {
        let dx = xi - mean_x;
        let dy = yi - mean_y;
        cov += dx * dy;
        var_x += dx * dx;
        var_y += dy * dy;
    }

    let denom = (var_x * var_y).sqrt();
    if denom == 0.0 {
        0.0
    } else {
        (cov / denom).clamp(-1.0, 1.0)
    }
}

/// Full correlation matrix over the unfiltered table.
pub fn compute_correlation_matrix(table: &DataTable) -> Result<CorrelationMatrix, AggregationError> {
    let columns = table.columns();
    if columns.len() < 2 || table.len() < 2 {
        return Err(AggregationError::InsufficientData {
            columns: columns.len(),
            rows: table.len(),
        });
    }

    let n = columns.len();
    let mut values = vec![vec![0.0; n]; n];
    for i in 0..n {
        values[i][i] = 1.0;
        for j in (i + 1)..n {
            let r = pearson(&columns[i].values, &columns[j].values);
            values[i][j] = r;
            values[j][i] = r;
        }
    }

    Ok(CorrelationMatrix {
        labels: columns.iter().map(|c| c.name.clone()).collect(),
        values,
    })
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
