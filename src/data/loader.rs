use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use arrow::array::{Array, AsArray};
use arrow::datatypes::{DataType, Float64Type};
use parquet::arrow::arrow_reader::ParquetRecordBatchReaderBuilder;
use serde_json::{Map, Value as JsonValue};

use super::error::DataLoadError;
use super::model::{DataTable, Dataset};

// ---------------------------------------------------------------------------
// Options
// ---------------------------------------------------------------------------

/// Knobs for the delimited-text readers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoadOptions {
    /// Field delimiter for `.csv` files.  `.tsv` always uses a tab.
    pub delimiter: u8,
}

impl Default for LoadOptions {
    fn default() -> Self {
        Self { delimiter: b',' }
    }
}

// ---------------------------------------------------------------------------
// Public entry-points
// ---------------------------------------------------------------------------

/// Load and normalize a dataset: parse the file, check the required
/// columns, derive `total_load`.
pub fn load_dataset(path: &Path, options: &LoadOptions) -> Result<Dataset, DataLoadError> {
    let table = load_file(path, options)?;
    let dataset = Dataset::from_table(table)?;
    if dataset.correlation_table.is_empty() {
        log::warn!("{} has a header but no rows", path.display());
    }
    log::info!(
        "Loaded {} observations from {} with columns {:?}",
        dataset.len(),
        path.display(),
        dataset.correlation_table.column_names()
    );
    Ok(dataset)
}

/// Parse a file into a numeric [`DataTable`].  Dispatch by extension.
///
/// Supported formats:
/// * `.csv`     – header row, delimiter from [`LoadOptions`]
/// * `.tsv`     – header row, tab-delimited
/// * `.json`    – `[{ "relative_compactness": 0.98, ... }, ...]`
/// * `.parquet` – one numeric (int or float) column per field
pub fn load_file(path: &Path, options: &LoadOptions) -> Result<DataTable, DataLoadError> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_ascii_lowercase();

    match ext.as_str() {
        "csv" => load_delimited(path, options.delimiter),
        "tsv" => load_delimited(path, b'\t'),
        "json" => load_json(path),
        "parquet" | "pq" => load_parquet(path),
        other => Err(DataLoadError::UnsupportedExtension(other.to_string())),
    }
}

/// Reject `NaN` and infinities; `f64::from_str` accepts `NaN`, `inf`, `-inf`.
fn finite(value: f64, row: usize, column: &str, raw: impl ToString) -> Result<f64, DataLoadError> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(DataLoadError::NotNumeric {
            row,
            column: column.to_string(),
            value: raw.to_string(),
        })
    }
}

fn open(path: &Path) -> Result<File, DataLoadError> {
    File::open(path).map_err(|source| DataLoadError::Io {
        path: path.to_path_buf(),
        source,
    })
}

// ---------------------------------------------------------------------------
// Delimited text loader
// ---------------------------------------------------------------------------

/// Header row with column names, every other cell a number.  Rows with a
/// different field count than the header are rejected by the reader.
fn load_delimited(path: &Path, delimiter: u8) -> Result<DataTable, DataLoadError> {
    let mut reader = csv::ReaderBuilder::new()
        .delimiter(delimiter)
        .trim(csv::Trim::All)
        .from_reader(open(path)?);

    let headers: Vec<String> = reader.headers()?.iter().map(|h| h.to_string()).collect();
    let mut columns: Vec<Vec<f64>> = vec![Vec::new(); headers.len()];

    for (row_no, result) in reader.records().enumerate() {
        let record = result?;
        for (col_idx, cell) in record.iter().enumerate() {
            let value = cell.parse::<f64>().map_err(|_| DataLoadError::NotNumeric {
                row: row_no,
                column: headers[col_idx].clone(),
                value: cell.to_string(),
            })?;
            columns[col_idx].push(finite(value, row_no, &headers[col_idx], cell)?);
        }
    }

    DataTable::from_columns(headers.into_iter().zip(columns).collect())
}

// ---------------------------------------------------------------------------
// JSON loader
// ---------------------------------------------------------------------------

/// Records-oriented JSON, the default of `df.to_json(orient='records')`:
///
/// ```json
/// [
///   { "Relative_Compactness": 0.98, "Overall_Height": 7.0, ... },
///   ...
/// ]
/// ```
///
/// Every record must carry the same keys as the first one.
fn load_json(path: &Path) -> Result<DataTable, DataLoadError> {
    let records: Vec<Map<String, JsonValue>> =
        serde_json::from_reader(BufReader::new(open(path)?))?;

    let Some(first) = records.first() else {
        return Err(DataLoadError::NoColumns);
    };
    let headers: Vec<String> = first.keys().cloned().collect();
    let mut columns: Vec<Vec<f64>> = vec![Vec::with_capacity(records.len()); headers.len()];

    for (row_no, record) in records.iter().enumerate() {
        if record.len() != headers.len() {
            return Err(DataLoadError::MalformedRow {
                row: row_no,
                detail: format!("{} fields, expected {}", record.len(), headers.len()),
            });
        }
        for (col_idx, name) in headers.iter().enumerate() {
            let value = record.get(name).ok_or_else(|| DataLoadError::MalformedRow {
                row: row_no,
                detail: format!("missing field '{name}'"),
            })?;
            let number = value.as_f64().ok_or_else(|| DataLoadError::NotNumeric {
                row: row_no,
                column: name.clone(),
                value: value.to_string(),
            })?;
            columns[col_idx].push(finite(number, row_no, name, value)?);
        }
    }

    DataTable::from_columns(headers.into_iter().zip(columns).collect())
}

// ---------------------------------------------------------------------------
// Parquet loader
// ---------------------------------------------------------------------------

/// Load a Parquet file whose columns are all numeric.
///
/// Integer, float and numeric-string columns are cast to `Float64`;
/// nulls (including strings that fail to parse) are rejected.  Works with
/// files written by both Pandas (`df.to_parquet()`) and Polars.
fn load_parquet(path: &Path) -> Result<DataTable, DataLoadError> {
    let builder = ParquetRecordBatchReaderBuilder::try_new(open(path)?)?;
    let headers: Vec<String> = builder
        .schema()
        .fields()
        .iter()
        .map(|f| f.name().clone())
        .collect();
    let reader = builder.build()?;

    let mut columns: Vec<Vec<f64>> = vec![Vec::new(); headers.len()];
    let mut row_offset = 0;

    for batch_result in reader {
        let batch = batch_result?;
        for (col_idx, name) in headers.iter().enumerate() {
            let cast = arrow::compute::cast(batch.column(col_idx), &DataType::Float64)?;
            let values = cast.as_primitive::<Float64Type>();
            if let Some(row) = (0..values.len()).find(|&r| values.is_null(r)) {
                return Err(DataLoadError::NotNumeric {
                    row: row_offset + row,
                    column: name.clone(),
                    value: "null".to_string(),
                });
            }
            for (row, &value) in values.values().iter().enumerate() {
                columns[col_idx].push(finite(value, row_offset + row, name, value)?);
            }
        }
        row_offset += batch.num_rows();
    }

    DataTable::from_columns(headers.into_iter().zip(columns).collect())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use std::io::Write;
    use std::sync::Arc;

    use arrow::array::{Float64Array, Int64Array};
    use arrow::datatypes::{Field, Schema};
    use arrow::record_batch::RecordBatch;
    use parquet::arrow::ArrowWriter;
    use tempfile::TempDir;

    use super::*;
    use crate::data::model::{NormalizedTable, TOTAL_LOAD};

    const HEADER: &str = "Relative_Compactness,Surface_Area,Wall_Area,Roof_Area,Overall_Height,Orientation,Glazing_Area,Glazing_Area_Distribution,Heating_Load,Cooling_Load";

    fn write_file(dir: &TempDir, name: &str, contents: &str) -> std::path::PathBuf {
        let path = dir.path().join(name);
        let mut file = File::create(&path).unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        path
    }

    #[test]
    fn test_load_csv_dataset() {
        let dir = TempDir::new().unwrap();
        let path = write_file(
            &dir,
            "energy.csv",
            &format!(
                "{HEADER}\n\
                 0.98,514.5,294.0,110.25,7.0,2,0.0,0,15.55,21.33\n\
                 0.98,514.5,294.0,110.25,7.0,3,0.0,0,15.55,21.33\n\
                 0.62,808.5,367.5,220.5,3.5,5,0.4,5,16.64,16.03\n"
            ),
        );

        let ds = load_dataset(&path, &LoadOptions::default()).unwrap();
        assert_eq!(ds.len(), 3);
        assert_eq!(ds.correlation_table.columns().len(), 11);
        assert_eq!(ds.correlation_table.column_names()[0], "relative_compactness");
        assert_eq!(ds.correlation_table.column_names()[10], TOTAL_LOAD);
        assert!(matches!(ds.normalized, NormalizedTable::WithTotalLoad(_)));
    }

    #[test]
    fn test_load_csv_custom_delimiter() {
        let dir = TempDir::new().unwrap();
        let path = write_file(&dir, "energy.csv", "a;b\n1;2\n3;4\n");
        let table = load_file(&path, &LoadOptions { delimiter: b';' }).unwrap();
        assert_eq!(table.column("b"), Some(&[2.0, 4.0][..]));
    }

    #[test]
    fn test_load_tsv() {
        let dir = TempDir::new().unwrap();
        let path = write_file(&dir, "energy.tsv", "a\tb\n1\t2\n");
        let table = load_file(&path, &LoadOptions::default()).unwrap();
        assert_eq!(table.len(), 1);
        assert_eq!(table.column("a"), Some(&[1.0][..]));
    }

    #[test]
    fn test_missing_file() {
        let err = load_file(Path::new("/no/such/energy.csv"), &LoadOptions::default()).unwrap_err();
        assert!(matches!(err, DataLoadError::Io { .. }));
    }

    #[test]
    fn test_wrong_column_count() {
        let dir = TempDir::new().unwrap();
        let path = write_file(&dir, "energy.csv", "a,b\n1,2\n3\n");
        let err = load_file(&path, &LoadOptions::default()).unwrap_err();
        assert!(matches!(err, DataLoadError::Csv(_)), "{err:?}");
    }

    #[test]
    fn test_non_numeric_cell() {
        let dir = TempDir::new().unwrap();
        let path = write_file(&dir, "energy.csv", "a,b\n1,2\n3,oops\n");
        let err = load_file(&path, &LoadOptions::default()).unwrap_err();
        match err {
            DataLoadError::NotNumeric { row, column, value } => {
                assert_eq!(row, 1);
                assert_eq!(column, "b");
                assert_eq!(value, "oops");
            }
            other => panic!("unexpected error {other:?}"),
        }
    }

    #[test]
    fn test_non_finite_cells_rejected() {
        let dir = TempDir::new().unwrap();
        for cell in ["NaN", "nan", "inf", "-inf"] {
            let path = write_file(&dir, "energy.csv", &format!("a,b\n1,2\n3,{cell}\n"));
            let err = load_file(&path, &LoadOptions::default()).unwrap_err();
            match err {
                DataLoadError::NotNumeric { row, column, value } => {
                    assert_eq!(row, 1);
                    assert_eq!(column, "b");
                    assert_eq!(value, cell);
                }
                other => panic!("{cell}: unexpected error {other:?}"),
            }
        }
    }

    #[test]
    fn test_non_finite_load_never_reaches_dataset() {
        let dir = TempDir::new().unwrap();
        let path = write_file(
            &dir,
            "energy.csv",
            &format!(
                "{HEADER}\n\
                 0.98,514.5,294.0,110.25,3.5,2,0.1,1,NaN,21.33\n\
                 0.9,563.5,318.5,122.5,7.0,2,0.25,1,inf,20.0\n"
            ),
        );
        let err = load_dataset(&path, &LoadOptions::default()).unwrap_err();
        assert!(
            matches!(&err, DataLoadError::NotNumeric { row: 0, column, .. } if column == "Heating_Load"),
            "{err:?}"
        );
    }

    #[test]
    fn test_header_only_csv_is_empty_dataset() {
        let dir = TempDir::new().unwrap();
        let path = write_file(&dir, "energy.csv", &format!("{HEADER}\n"));
        let ds = load_dataset(&path, &LoadOptions::default()).unwrap();
        assert!(ds.is_empty());
        assert!(ds.correlation_table.is_empty());
        assert!(ds.normalized.is_empty());
        assert!(ds.normalized.has_total_load());
    }

    #[test]
    fn test_unsupported_extension() {
        let err = load_file(Path::new("energy.xlsx"), &LoadOptions::default()).unwrap_err();
        assert!(matches!(err, DataLoadError::UnsupportedExtension(ext) if ext == "xlsx"));
    }

    #[test]
    fn test_missing_required_column_fails_load() {
        let dir = TempDir::new().unwrap();
        let path = write_file(
            &dir,
            "energy.csv",
            "Relative_Compactness,Surface_Area,Overall_Height,Glazing_Area\n0.98,514.5,7.0,0.0\n",
        );
        let err = load_dataset(&path, &LoadOptions::default()).unwrap_err();
        assert!(matches!(err, DataLoadError::MissingColumn(name) if name == "wall_area"));
    }

    #[test]
    fn test_load_json_records() {
        let dir = TempDir::new().unwrap();
        let path = write_file(
            &dir,
            "energy.json",
            r#"[
                {"Relative_Compactness": 0.98, "Surface_Area": 514.5, "Wall_Area": 294.0,
                 "Roof_Area": 110.25, "Overall_Height": 7, "Glazing_Area": 0.0},
                {"Relative_Compactness": 0.9, "Surface_Area": 563.5, "Wall_Area": 318.5,
                 "Roof_Area": 122.5, "Overall_Height": 7, "Glazing_Area": 0.1}
            ]"#,
        );
        let ds = load_dataset(&path, &LoadOptions::default()).unwrap();
        assert_eq!(ds.len(), 2);
        assert!(!ds.normalized.has_total_load());
        assert_eq!(
            ds.correlation_table.column("overall_height"),
            Some(&[7.0, 7.0][..])
        );
    }

    #[test]
    fn test_load_json_rejects_strings() {
        let dir = TempDir::new().unwrap();
        let path = write_file(&dir, "energy.json", r#"[{"a": 1.0}, {"a": "x"}]"#);
        let err = load_file(&path, &LoadOptions::default()).unwrap_err();
        assert!(matches!(err, DataLoadError::NotNumeric { row: 1, .. }));
    }

    #[test]
    fn test_load_json_rejects_ragged_records() {
        let dir = TempDir::new().unwrap();
        let path = write_file(&dir, "energy.json", r#"[{"a": 1.0, "b": 2.0}, {"a": 3.0}]"#);
        let err = load_file(&path, &LoadOptions::default()).unwrap_err();
        assert!(matches!(err, DataLoadError::MalformedRow { row: 1, .. }));
    }

    #[test]
    fn test_load_parquet_rejects_non_finite() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("energy.parquet");

        let schema = Arc::new(Schema::new(vec![Field::new("Heating_Load", DataType::Float64, false)]));
        let batch = RecordBatch::try_new(
            schema.clone(),
            vec![Arc::new(Float64Array::from(vec![15.55, f64::INFINITY]))],
        )
        .unwrap();
        let mut writer = ArrowWriter::try_new(File::create(&path).unwrap(), schema, None).unwrap();
        writer.write(&batch).unwrap();
        writer.close().unwrap();

        let err = load_file(&path, &LoadOptions::default()).unwrap_err();
        assert!(matches!(err, DataLoadError::NotNumeric { row: 1, .. }), "{err:?}");
    }

    #[test]
    fn test_load_parquet_casts_integers() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("energy.parquet");

        let schema = Arc::new(Schema::new(vec![
            Field::new("Overall_Height", DataType::Float64, false),
            Field::new("Orientation", DataType::Int64, false),
        ]));
        let batch = RecordBatch::try_new(
            schema.clone(),
            vec![
                Arc::new(Float64Array::from(vec![3.5, 7.0])),
                Arc::new(Int64Array::from(vec![2, 5])),
            ],
        )
        .unwrap();
        let mut writer = ArrowWriter::try_new(File::create(&path).unwrap(), schema, None).unwrap();
        writer.write(&batch).unwrap();
        writer.close().unwrap();

        let table = load_file(&path, &LoadOptions::default()).unwrap();
        assert_eq!(table.column("overall_height"), Some(&[3.5, 7.0][..]));
        assert_eq!(table.column("orientation"), Some(&[2.0, 5.0][..]));
    }
}
