use std::fs::File;
use std::sync::Arc;

use anyhow::{Context, Result};
use arrow::array::{ArrayRef, Float64Array};
use arrow::datatypes::{DataType, Field, Schema};
use arrow::record_batch::RecordBatch;
use arrow::util::pretty::pretty_format_batches;
use parquet::arrow::ArrowWriter;
use serde::Serialize;

const CSV_PATH: &str = "energy_efficiency_data.csv";
const PARQUET_PATH: &str = "energy_efficiency_data.parquet";

/// (relative compactness, surface area, wall area, roof area, overall height)
const SHAPES: [(f64, f64, f64, f64, f64); 12] = [
    (0.98, 514.5, 294.0, 110.25, 7.0),
    (0.90, 563.5, 318.5, 122.5, 7.0),
    (0.86, 588.0, 294.0, 147.0, 7.0),
    (0.82, 612.5, 318.5, 147.0, 7.0),
    (0.79, 637.0, 343.0, 147.0, 7.0),
    (0.76, 661.5, 416.5, 122.5, 7.0),
    (0.74, 686.0, 245.0, 220.5, 3.5),
    (0.71, 710.5, 269.5, 220.5, 3.5),
    (0.69, 735.0, 294.0, 220.5, 3.5),
    (0.66, 759.5, 318.5, 220.5, 3.5),
    (0.64, 784.0, 343.0, 220.5, 3.5),
    (0.62, 808.5, 367.5, 220.5, 3.5),
];
const ORIENTATIONS: [f64; 4] = [2.0, 3.0, 4.0, 5.0];
const GLAZING_AREAS: [f64; 3] = [0.10, 0.25, 0.40];

#[derive(Debug, Clone, Serialize)]
struct Row {
    #[serde(rename = "Relative_Compactness")]
    relative_compactness: f64,
    #[serde(rename = "Surface_Area")]
    surface_area: f64,
    #[serde(rename = "Wall_Area")]
    wall_area: f64,
    #[serde(rename = "Roof_Area")]
    roof_area: f64,
    #[serde(rename = "Overall_Height")]
    overall_height: f64,
    #[serde(rename = "Orientation")]
    orientation: f64,
    #[serde(rename = "Glazing_Area")]
    glazing_area: f64,
    #[serde(rename = "Glazing_Area_Distribution")]
    glazing_area_distribution: f64,
    #[serde(rename = "Heating_Load")]
    heating_load: f64,
    #[serde(rename = "Cooling_Load")]
    cooling_load: f64,
}

/// SplitMix64: deterministic, good enough for jitter.
struct Jitter(u64);

impl Jitter {
    fn next_unit(&mut self) -> f64 {
        self.0 = self.0.wrapping_add(0x9E37_79B9_7F4A_7C15);
        let mut z = self.0;
        z = (z ^ (z >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
        z = (z ^ (z >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
        z ^= z >> 31;
        (z >> 11) as f64 / (1u64 << 53) as f64
    }

    /// Uniform in [-amplitude, amplitude].
    fn around(&mut self, amplitude: f64) -> f64 {
        (self.next_unit() * 2.0 - 1.0) * amplitude
    }
}

fn round2(v: f64) -> f64 {
    (v * 100.0).round() / 100.0
}

fn simulate(jitter: &mut Jitter) -> Vec<Row> {
    // (glazing area, distribution): no glazing has distribution 0,
    // every other area appears with distributions 1..=5.
    let mut glazing: Vec<(f64, f64)> = vec![(0.0, 0.0)];
    for &area in &GLAZING_AREAS {
        glazing.extend((1..=5).map(|d| (area, d as f64)));
    }

    let mut rows = Vec::with_capacity(SHAPES.len() * ORIENTATIONS.len() * glazing.len());
    for &(glazing_area, distribution) in &glazing {
        for &(compactness, surface, wall, roof, height) in &SHAPES {
            for &orientation in &ORIENTATIONS {
                let tall = if height > 5.0 { 1.0 } else { 0.0 };
                let heating = 6.0 + 20.0 * tall + 28.0 * glazing_area
                    + 0.01 * wall
                    + jitter.around(1.5);
                let cooling = 11.0 + 16.0 * tall + 14.0 * glazing_area
                    + 0.008 * wall
                    + jitter.around(1.5);
                rows.push(Row {
                    relative_compactness: compactness,
                    surface_area: surface,
                    wall_area: wall,
                    roof_area: roof,
                    overall_height: height,
                    orientation,
                    glazing_area,
                    glazing_area_distribution: distribution,
                    heating_load: round2(heating),
                    cooling_load: round2(cooling),
                });
            }
        }
    }
    rows
}

fn write_csv(rows: &[Row]) -> Result<()> {
    let mut writer = csv::Writer::from_path(CSV_PATH).context("creating CSV")?;
    for row in rows {
        writer.serialize(row).context("writing CSV row")?;
    }
    writer.flush().context("flushing CSV")?;
    Ok(())
}

fn to_batch(rows: &[Row]) -> Result<RecordBatch> {
    let columns: [(&str, fn(&Row) -> f64); 10] = [
        ("Relative_Compactness", |r| r.relative_compactness),
        ("Surface_Area", |r| r.surface_area),
        ("Wall_Area", |r| r.wall_area),
        ("Roof_Area", |r| r.roof_area),
        ("Overall_Height", |r| r.overall_height),
        ("Orientation", |r| r.orientation),
        ("Glazing_Area", |r| r.glazing_area),
        ("Glazing_Area_Distribution", |r| r.glazing_area_distribution),
        ("Heating_Load", |r| r.heating_load),
        ("Cooling_Load", |r| r.cooling_load),
    ];

    let schema = Arc::new(Schema::new(
        columns
            .iter()
            .map(|(name, _)| Field::new(*name, DataType::Float64, false))
            .collect::<Vec<_>>(),
    ));
    let arrays: Vec<ArrayRef> = columns
        .iter()
        .map(|(_, get)| Arc::new(Float64Array::from_iter_values(rows.iter().map(get))) as ArrayRef)
        .collect();

    RecordBatch::try_new(schema, arrays).context("building record batch")
}

fn write_parquet(batch: &RecordBatch) -> Result<()> {
    let file = File::create(PARQUET_PATH).context("creating Parquet file")?;
    let mut writer = ArrowWriter::try_new(file, batch.schema(), None).context("creating writer")?;
    writer.write(batch).context("writing batch")?;
    writer.close().context("closing writer")?;
    Ok(())
}

fn main() -> Result<()> {
    let mut jitter = Jitter(42);
    let rows = simulate(&mut jitter);

    write_csv(&rows)?;
    let batch = to_batch(&rows)?;
    write_parquet(&batch)?;

    println!("{}", pretty_format_batches(&[batch.slice(0, 5)])?);
    println!("Wrote {} rows to {CSV_PATH} and {PARQUET_PATH}", rows.len());
    Ok(())
}
