use std::path::Path;
use std::sync::Arc;

use anyhow::{Context, Result, bail};
use arrow::array::{Array, AsArray, Int32Array, Int64Array, StringArray};
use arrow::datatypes::DataType;
use parquet::arrow::arrow_reader::ParquetRecordBatchReaderBuilder;
use parquet::file::reader::ChunkReader;
use serde::Deserialize;
use serde_json::Value as JsonValue;

use super::model::{RankingDataset, UniversityRecord, parse_grouped_int};

// ---------------------------------------------------------------------------
// Public entry-point
// ---------------------------------------------------------------------------

/// Load a ranking dataset from a file.  Dispatch by extension.
///
/// Supported formats:
/// * `.csv`     – header row with `name, rank, stats_number_students, region, location`
/// * `.json`    – `[{ "name": ..., "rank": ..., ... }, ...]`
/// * `.parquet` – flat columns with the same names
pub fn load_file(path: &Path) -> Result<RankingDataset> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_ascii_lowercase();

    match ext.as_str() {
        "csv" => load_csv(path),
        "json" => load_json(path),
        "parquet" | "pq" => load_parquet(path),
        other => bail!("Unsupported file extension: .{other}"),
    }
}

// ---------------------------------------------------------------------------
// CSV loader
// ---------------------------------------------------------------------------

/// One raw CSV/JSON row before numeric coercion.  `rank` and
/// `stats_number_students` stay textual here because the source data writes
/// student counts with `,` thousands separators (`"10,000"`).
#[derive(Debug, Deserialize)]
struct RawRow {
    name: String,
    rank: String,
    stats_number_students: String,
    region: String,
    #[serde(default)]
    location: String,
}

impl RawRow {
    fn coerce(self) -> Result<UniversityRecord> {
        Ok(UniversityRecord {
            rank: parse_grouped_int("rank", &self.rank)?,
            students: parse_grouped_int("stats_number_students", &self.stats_number_students)?,
            name: self.name,
            region: self.region,
            location: self.location,
        })
    }
}

fn load_csv(path: &Path) -> Result<RankingDataset> {
    let file = std::fs::File::open(path).context("opening CSV")?;
    read_csv(file)
}

/// CSV layout: header row with column names; extra columns are ignored.
fn read_csv<R: std::io::Read>(input: R) -> Result<RankingDataset> {
    let mut reader = csv::Reader::from_reader(input);
    let mut records = Vec::new();

    for (row_no, result) in reader.deserialize::<RawRow>().enumerate() {
        let raw = result.with_context(|| format!("CSV row {row_no}"))?;
        records.push(raw.coerce().with_context(|| format!("CSV row {row_no}"))?);
    }

    Ok(RankingDataset::from_records(records))
}

// ---------------------------------------------------------------------------
// JSON loader
// ---------------------------------------------------------------------------

/// Expected JSON schema (records-oriented):
///
/// ```json
/// [
///   {
///     "name": "Example University",
///     "rank": 1,
///     "stats_number_students": "25,000",
///     "region": "Europe",
///     "location": "Example City"
///   },
///   ...
/// ]
/// ```
///
/// `rank` and `stats_number_students` may be JSON numbers or grouped strings.
fn load_json(path: &Path) -> Result<RankingDataset> {
    let text = std::fs::read_to_string(path).context("reading JSON file")?;
    let root: JsonValue = serde_json::from_str(&text).context("parsing JSON")?;
    read_json(&root)
}

fn read_json(root: &JsonValue) -> Result<RankingDataset> {
    let rows = root.as_array().context("Expected top-level JSON array")?;

    let mut records = Vec::with_capacity(rows.len());

    for (i, row) in rows.iter().enumerate() {
        let obj = row
            .as_object()
            .with_context(|| format!("Row {i} is not a JSON object"))?;

        let name = json_string(obj, "name", i)?;
        let region = json_string(obj, "region", i)?;
        let location = obj
            .get("location")
            .and_then(|v| v.as_str())
            .unwrap_or("")
            .to_string();
        let rank = json_int(obj, "rank", i)?;
        let students = json_int(obj, "stats_number_students", i)?;

        records.push(UniversityRecord {
            name,
            rank,
            students,
            region,
            location,
        });
    }

    Ok(RankingDataset::from_records(records))
}

fn json_string(
    obj: &serde_json::Map<String, JsonValue>,
    key: &str,
    row: usize,
) -> Result<String> {
    obj.get(key)
        .and_then(|v| v.as_str())
        .map(str::to_string)
        .with_context(|| format!("Row {row}: missing or non-string '{key}'"))
}

fn json_int(
    obj: &serde_json::Map<String, JsonValue>,
    key: &'static str,
    row: usize,
) -> Result<u32> {
    let val = obj
        .get(key)
        .with_context(|| format!("Row {row}: missing '{key}'"))?;

    match val {
        JsonValue::Number(n) => n
            .as_u64()
            .and_then(|v| u32::try_from(v).ok())
            .with_context(|| format!("Row {row}: '{key}' is not a non-negative integer")),
        JsonValue::String(s) => {
            Ok(parse_grouped_int(key, s).with_context(|| format!("Row {row}"))?)
        }
        other => bail!("Row {row}: '{key}' is neither a number nor a string ({other})"),
    }
}

// ---------------------------------------------------------------------------
// Parquet loader
// ---------------------------------------------------------------------------

/// Load a Parquet file with flat ranking columns.
///
/// Expected schema:
/// - `name`, `region`, `location`: Utf8 (`location` optional)
/// - `rank`, `stats_number_students`: Int64/Int32, or Utf8 with grouped digits
fn load_parquet(path: &Path) -> Result<RankingDataset> {
    let file = std::fs::File::open(path).context("opening parquet file")?;
    read_parquet(file)
}

fn read_parquet<R: ChunkReader + 'static>(input: R) -> Result<RankingDataset> {
    let builder =
        ParquetRecordBatchReaderBuilder::try_new(input).context("reading parquet metadata")?;
    let reader = builder.build().context("building parquet reader")?;

    let mut records = Vec::new();

    for batch_result in reader {
        let batch = batch_result.context("reading parquet record batch")?;
        let schema = batch.schema();

        let name_idx = schema
            .index_of("name")
            .map_err(|_| anyhow::anyhow!("Parquet file missing 'name' column"))?;
        let rank_idx = schema
            .index_of("rank")
            .map_err(|_| anyhow::anyhow!("Parquet file missing 'rank' column"))?;
        let students_idx = schema.index_of("stats_number_students").map_err(|_| {
            anyhow::anyhow!("Parquet file missing 'stats_number_students' column")
        })?;
        let region_idx = schema
            .index_of("region")
            .map_err(|_| anyhow::anyhow!("Parquet file missing 'region' column"))?;
        let location_idx = schema.index_of("location").ok();

        for row in 0..batch.num_rows() {
            let name = utf8_cell(batch.column(name_idx), row, "name")?;
            let region = utf8_cell(batch.column(region_idx), row, "region")?;
            // `location` is optional: an absent column or a null cell means
            // empty, but a column of the wrong type is an error like any
            // other column.
            let location = match location_idx {
                Some(idx) => {
                    let col = batch.column(idx);
                    if col.is_null(row) {
                        String::new()
                    } else {
                        utf8_cell(col, row, "location")
                            .with_context(|| format!("Row {row}"))?
                    }
                }
                None => String::new(),
            };
            let rank = int_cell(batch.column(rank_idx), row, "rank")
                .with_context(|| format!("Row {row}"))?;
            let students = int_cell(batch.column(students_idx), row, "stats_number_students")
                .with_context(|| format!("Row {row}"))?;

            records.push(UniversityRecord {
                name,
                rank,
                students,
                region,
                location,
            });
        }
    }

    Ok(RankingDataset::from_records(records))
}

// -- Parquet / Arrow helpers --

/// Extract a string cell from a Utf8 or LargeUtf8 column.
fn utf8_cell(col: &Arc<dyn Array>, row: usize, field: &'static str) -> Result<String> {
    if col.is_null(row) {
        bail!("null value in '{field}' column");
    }
    match col.data_type() {
        DataType::Utf8 => {
            let arr = col
                .as_any()
                .downcast_ref::<StringArray>()
                .context("expected StringArray")?;
            Ok(arr.value(row).to_string())
        }
        DataType::LargeUtf8 => {
            let arr = col.as_string::<i64>();
            Ok(arr.value(row).to_string())
        }
        other => bail!("'{field}' has unsupported type {other:?}, expected Utf8"),
    }
}

/// Extract a non-negative integer cell.  Utf8 cells go through the same
/// grouped-digits coercion the CSV path uses.
fn int_cell(col: &Arc<dyn Array>, row: usize, field: &'static str) -> Result<u32> {
    if col.is_null(row) {
        bail!("null value in '{field}' column");
    }
    match col.data_type() {
        DataType::Int64 => {
            let arr = col.as_any().downcast_ref::<Int64Array>().unwrap();
            u32::try_from(arr.value(row))
                .map_err(|_| anyhow::anyhow!("'{field}' value out of range"))
        }
        DataType::Int32 => {
            let arr = col.as_any().downcast_ref::<Int32Array>().unwrap();
            u32::try_from(arr.value(row))
                .map_err(|_| anyhow::anyhow!("'{field}' value out of range"))
        }
        DataType::Utf8 | DataType::LargeUtf8 => {
            let text = utf8_cell(col, row, field)?;
            Ok(parse_grouped_int(field, &text)?)
        }
        other => bail!("'{field}' has unsupported type {other:?}, expected integer or Utf8"),
    }
}
