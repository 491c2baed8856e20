use std::collections::BTreeSet;

use super::error::DataLoadError;

// ---------------------------------------------------------------------------
// Column names
// ---------------------------------------------------------------------------

pub const RELATIVE_COMPACTNESS: &str = "relative_compactness";
pub const SURFACE_AREA: &str = "surface_area";
pub const WALL_AREA: &str = "wall_area";
pub const ROOF_AREA: &str = "roof_area";
pub const OVERALL_HEIGHT: &str = "overall_height";
pub const GLAZING_AREA: &str = "glazing_area";
pub const HEATING_LOAD: &str = "heating_load";
pub const COOLING_LOAD: &str = "cooling_load";
pub const TOTAL_LOAD: &str = "total_load";

/// Columns every input file must carry.
pub const REQUIRED_COLUMNS: [&str; 6] = [
    RELATIVE_COMPACTNESS,
    SURFACE_AREA,
    WALL_AREA,
    ROOF_AREA,
    OVERALL_HEIGHT,
    GLAZING_AREA,
];

/// Canonical form of a header: trimmed, lowercase, spaces and hyphens
/// replaced by `_`.  `Relative_Compactness` → `relative_compactness`.
pub fn normalize_column_name(raw: &str) -> String {
    raw.trim()
        .chars()
        .map(|c| match c {
            ' ' | '-' => '_',
            c => c.to_ascii_lowercase(),
        })
        .collect()
}

// ---------------------------------------------------------------------------
// DataTable – column-major numeric table straight out of the loader
// ---------------------------------------------------------------------------

/// A single named numeric column.
#[derive(Debug, Clone, PartialEq)]
pub struct Column {
    pub name: String,
    pub values: Vec<f64>,
}

/// Column-major numeric table.  All columns have the same length and
/// unique (normalized) names; order follows the source file.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DataTable {
    columns: Vec<Column>,
    rows: usize,
}

impl DataTable {
    /// Build a table from named columns, normalizing names.
    pub fn from_columns(columns: Vec<(String, Vec<f64>)>) -> Result<Self, DataLoadError> {
        if columns.is_empty() {
            return Err(DataLoadError::NoColumns);
        }
        let rows = columns[0].1.len();
        let mut seen = BTreeSet::new();
        let mut out = Vec::with_capacity(columns.len());
        for (raw_name, values) in columns {
            let name = normalize_column_name(&raw_name);
            if !seen.insert(name.clone()) {
                return Err(DataLoadError::DuplicateColumn(name));
            }
            if values.len() != rows {
                return Err(DataLoadError::MalformedRow {
                    row: values.len().min(rows),
                    detail: format!(
                        "column '{name}' has {} values, expected {rows}",
                        values.len()
                    ),
                });
            }
            out.push(Column { name, values });
        }
        Ok(DataTable { columns: out, rows })
    }

    /// Number of rows.
    pub fn len(&self) -> usize {
        self.rows
    }

    pub fn is_empty(&self) -> bool {
        self.rows == 0
    }

    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    pub fn column_names(&self) -> Vec<&str> {
        self.columns.iter().map(|c| c.name.as_str()).collect()
    }

    pub fn column(&self, name: &str) -> Option<&[f64]> {
        self.columns
            .iter()
            .find(|c| c.name == name)
            .map(|c| c.values.as_slice())
    }

    pub fn has_column(&self, name: &str) -> bool {
        self.columns.iter().any(|c| c.name == name)
    }

    fn require(&self, name: &str) -> Result<&[f64], DataLoadError> {
        self.column(name)
            .ok_or_else(|| DataLoadError::MissingColumn(name.to_string()))
    }

    /// Append a derived column.  The caller guarantees the length matches.
    fn push_column(&mut self, name: &str, values: Vec<f64>) {
        debug_assert_eq!(values.len(), self.rows);
        self.columns.push(Column {
            name: name.to_string(),
            values,
        });
    }
}

// ---------------------------------------------------------------------------
// Observation – one row of the working table
// ---------------------------------------------------------------------------

/// One building configuration, with wall/roof area already dropped.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Observation {
    pub relative_compactness: f64,
    pub surface_area: f64,
    pub overall_height: f64,
    pub glazing_area: f64,
}

/// An [`Observation`] with its derived heating + cooling load.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LoadedObservation {
    pub observation: Observation,
    pub total_load: f64,
}

/// The working table used for aggregation.  Whether `total_load` exists
/// depends on the input shape, so it is carried in the type.
#[derive(Debug, Clone, PartialEq)]
pub enum NormalizedTable {
    WithTotalLoad(Vec<LoadedObservation>),
    WithoutTotalLoad(Vec<Observation>),
}

impl NormalizedTable {
    pub fn len(&self) -> usize {
        match self {
            NormalizedTable::WithTotalLoad(rows) => rows.len(),
            NormalizedTable::WithoutTotalLoad(rows) => rows.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn has_total_load(&self) -> bool {
        matches!(self, NormalizedTable::WithTotalLoad(_))
    }

    /// Iterate the observations regardless of variant.
    pub fn observations(&self) -> Box<dyn Iterator<Item = &Observation> + '_> {
        match self {
            NormalizedTable::WithTotalLoad(rows) => Box::new(rows.iter().map(|r| &r.observation)),
            NormalizedTable::WithoutTotalLoad(rows) => Box::new(rows.iter()),
        }
    }
}

// ---------------------------------------------------------------------------
// Dataset – what the rest of the app consumes
// ---------------------------------------------------------------------------

/// A loaded and normalized dataset.
#[derive(Debug, Clone, PartialEq)]
pub struct Dataset {
    /// Every numeric source column plus `total_load` when it was derived.
    /// Input to the correlation matrix.
    pub correlation_table: DataTable,
    /// Working table for the mean-load aggregation.
    pub normalized: NormalizedTable,
}

impl Dataset {
    /// Check required columns and derive `total_load` when both load
    /// columns are present.
    pub fn from_table(mut table: DataTable) -> Result<Self, DataLoadError> {
        for name in REQUIRED_COLUMNS {
            table.require(name)?;
        }

        let observations: Vec<Observation> = {
            let compactness = table.require(RELATIVE_COMPACTNESS)?;
            let surface = table.require(SURFACE_AREA)?;
            let height = table.require(OVERALL_HEIGHT)?;
            let glazing = table.require(GLAZING_AREA)?;
            (0..table.len())
                .map(|i| Observation {
                    relative_compactness: compactness[i],
                    surface_area: surface[i],
                    overall_height: height[i],
                    glazing_area: glazing[i],
                })
                .collect()
        };

        let derived: Option<Vec<f64>> = match (table.column(HEATING_LOAD), table.column(COOLING_LOAD)) {
            (Some(heating), Some(cooling)) => Some(
                heating
                    .iter()
                    .zip(cooling.iter())
                    .map(|(h, c)| h + c)
                    .collect(),
            ),
            _ => None,
        };

        // A source file may already carry `total_load`; it is only derived
        // when both load columns exist.
        let total = match derived {
            Some(_) if table.has_column(TOTAL_LOAD) => {
                return Err(DataLoadError::DuplicateColumn(TOTAL_LOAD.to_string()));
            }
            Some(total) => {
                table.push_column(TOTAL_LOAD, total.clone());
                Some(total)
            }
            None => table.column(TOTAL_LOAD).map(<[f64]>::to_vec),
        };

        let normalized = match total {
            Some(total) => NormalizedTable::WithTotalLoad(
                observations
                    .into_iter()
                    .zip(total)
                    .map(|(observation, total_load)| LoadedObservation {
                        observation,
                        total_load,
                    })
                    .collect(),
            ),
            None => {
                log::warn!(
                    "'{HEATING_LOAD}' and/or '{COOLING_LOAD}' missing; mean load chart disabled"
                );
                NormalizedTable::WithoutTotalLoad(observations)
            }
        };

        Ok(Dataset {
            correlation_table: table,
            normalized,
        })
    }

    /// Number of observations.
    pub fn len(&self) -> usize {
        self.normalized.len()
    }

    pub fn is_empty(&self) -> bool {
        self.normalized.is_empty()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    /// Two-row table with the full column set, loads included.
    pub(crate) fn sample_table() -> DataTable {
        DataTable::from_columns(vec![
            ("Relative_Compactness".into(), vec![0.98, 0.98]),
            ("Surface_Area".into(), vec![514.5, 514.5]),
            ("Wall_Area".into(), vec![294.0, 294.0]),
            ("Roof_Area".into(), vec![110.25, 110.25]),
            ("Overall_Height".into(), vec![3.5, 3.5]),
            ("Glazing_Area".into(), vec![0.10, 0.10]),
            ("Heating_Load".into(), vec![15.55, 14.45]),
            ("Cooling_Load".into(), vec![21.33, 20.67]),
        ])
        .unwrap()
    }

    #[test]
    fn test_normalize_column_name() {
        assert_eq!(normalize_column_name("Relative_Compactness"), "relative_compactness");
        assert_eq!(normalize_column_name(" Overall Height "), "overall_height");
        assert_eq!(normalize_column_name("glazing-area"), "glazing_area");
    }

    #[test]
    fn test_from_columns_rejects_duplicates() {
        let err = DataTable::from_columns(vec![
            ("Wall_Area".into(), vec![1.0]),
            ("wall_area".into(), vec![2.0]),
        ])
        .unwrap_err();
        assert!(matches!(err, DataLoadError::DuplicateColumn(name) if name == "wall_area"));
    }

    #[test]
    fn test_from_columns_rejects_ragged() {
        let err = DataTable::from_columns(vec![
            ("a".into(), vec![1.0, 2.0]),
            ("b".into(), vec![1.0]),
        ])
        .unwrap_err();
        assert!(matches!(err, DataLoadError::MalformedRow { .. }));
    }

    #[test]
    fn test_derives_total_load() {
        let ds = Dataset::from_table(sample_table()).unwrap();
        let total = ds.correlation_table.column(TOTAL_LOAD).unwrap();
        assert!((total[0] - 36.88).abs() < 1e-9);
        assert!((total[1] - 35.12).abs() < 1e-9);

        // Correlation table keeps every source column.
        for name in [WALL_AREA, ROOF_AREA, HEATING_LOAD, COOLING_LOAD] {
            assert!(ds.correlation_table.has_column(name), "{name} dropped");
        }

        match &ds.normalized {
            NormalizedTable::WithTotalLoad(rows) => {
                assert_eq!(rows.len(), 2);
                assert_eq!(rows[0].observation.relative_compactness, 0.98);
                assert_eq!(rows[0].observation.overall_height, 3.5);
            }
            other => panic!("expected WithTotalLoad, got {other:?}"),
        }
    }

    #[test]
    fn test_missing_cooling_load_is_degraded_mode() {
        let table = DataTable::from_columns(vec![
            ("relative_compactness".into(), vec![0.98]),
            ("surface_area".into(), vec![514.5]),
            ("wall_area".into(), vec![294.0]),
            ("roof_area".into(), vec![110.25]),
            ("overall_height".into(), vec![7.0]),
            ("glazing_area".into(), vec![0.0]),
            ("heating_load".into(), vec![15.55]),
        ])
        .unwrap();

        let ds = Dataset::from_table(table).unwrap();
        assert!(!ds.normalized.has_total_load());
        assert!(!ds.correlation_table.has_column(TOTAL_LOAD));
        assert!(ds.correlation_table.has_column(HEATING_LOAD));
        assert_eq!(ds.len(), 1);
    }

    #[test]
    fn test_missing_required_column() {
        let table = DataTable::from_columns(vec![
            ("relative_compactness".into(), vec![0.98]),
            ("surface_area".into(), vec![514.5]),
        ])
        .unwrap();
        let err = Dataset::from_table(table).unwrap_err();
        assert!(matches!(err, DataLoadError::MissingColumn(name) if name == WALL_AREA));
    }
}
