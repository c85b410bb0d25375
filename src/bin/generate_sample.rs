//! Writes a deterministic `top_100_universities` sample dataset as CSV and
//! Parquet, for trying out the viewer without real data.

use std::sync::Arc;

use anyhow::{Context, Result};
use arrow::array::{Int64Array, StringArray};
use arrow::datatypes::{DataType, Field, Schema};
use arrow::record_batch::RecordBatch;
use parquet::arrow::ArrowWriter;

const REGIONS: [&str; 3] = ["North America", "Europe", "Asia"];

const CITIES: [&[&str]; 3] = [
    &["Boston, USA", "Toronto, Canada", "Palo Alto, USA", "Chicago, USA"],
    &["Cambridge, UK", "Zurich, Switzerland", "Paris, France", "Munich, Germany"],
    &["Tokyo, Japan", "Singapore", "Seoul, South Korea", "Beijing, China"],
];

struct SampleRow {
    name: String,
    rank: i64,
    students: i64,
    region: &'static str,
    location: &'static str,
}

fn main() -> Result<()> {
    let rows = generate_rows(100);
    write_csv("top_100_universities.csv", &rows)?;
    write_parquet("top_100_universities.parquet", &rows)?;
    println!(
        "Wrote top_100_universities.csv and top_100_universities.parquet ({} rows)",
        rows.len()
    );
    Ok(())
}

/// Student counts fall off with rank, with deterministic jitter so the
/// scatter doesn't look like a straight line.
fn generate_rows(n: usize) -> Vec<SampleRow> {
    let mut rng = SplitMix64::new(0x5EED);

    (1..=n as i64)
        .map(|rank| {
            let region_idx = (rng.next() % REGIONS.len() as u64) as usize;
            let region = REGIONS[region_idx];
            let cities = CITIES[region_idx];
            let location = cities[(rng.next() % cities.len() as u64) as usize];

            let base = 55_000 - rank * 320;
            let jitter = (rng.next() % 20_000) as i64;
            let students = (base + jitter).max(1_000);

            SampleRow {
                name: format!("Sample University {rank:03}"),
                rank,
                students,
                region,
                location,
            }
        })
        .collect()
}

/// Minimal deterministic PRNG (SplitMix64).
struct SplitMix64 {
    state: u64,
}

impl SplitMix64 {
    fn new(seed: u64) -> Self {
        SplitMix64 { state: seed }
    }

    fn next(&mut self) -> u64 {
        self.state = self.state.wrapping_add(0x9E3779B97F4A7C15);
        let mut z = self.state;
        z = (z ^ (z >> 30)).wrapping_mul(0xBF58476D1CE4E5B9);
        z = (z ^ (z >> 27)).wrapping_mul(0x94D049BB133111EB);
        z ^ (z >> 31)
    }
}

/// Group digits with `,` as the source data does (`15000` → `"15,000"`).
fn grouped(n: i64) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

// ---------------------------------------------------------------------------
// CSV output – student counts written with thousands separators, matching
// the original export format
// ---------------------------------------------------------------------------

fn write_csv(path: &str, rows: &[SampleRow]) -> Result<()> {
    let mut writer = csv::Writer::from_path(path).context("creating CSV file")?;
    writer
        .write_record(["name", "rank", "stats_number_students", "region", "location"])
        .context("writing CSV header")?;

    for row in rows {
        writer
            .write_record([
                row.name.as_str(),
                &row.rank.to_string(),
                &grouped(row.students),
                row.region,
                row.location,
            ])
            .context("writing CSV row")?;
    }

    writer.flush().context("flushing CSV")?;
    Ok(())
}

// ---------------------------------------------------------------------------
// Parquet output – plain Int64 columns for the numeric fields
// ---------------------------------------------------------------------------

fn write_parquet(path: &str, rows: &[SampleRow]) -> Result<()> {
    let schema = Arc::new(Schema::new(vec![
        Field::new("name", DataType::Utf8, false),
        Field::new("rank", DataType::Int64, false),
        Field::new("stats_number_students", DataType::Int64, false),
        Field::new("region", DataType::Utf8, false),
        Field::new("location", DataType::Utf8, false),
    ]));

    let names: StringArray = rows.iter().map(|r| Some(r.name.as_str())).collect();
    let ranks = Int64Array::from_iter_values(rows.iter().map(|r| r.rank));
    let students = Int64Array::from_iter_values(rows.iter().map(|r| r.students));
    let regions: StringArray = rows.iter().map(|r| Some(r.region)).collect();
    let locations: StringArray = rows.iter().map(|r| Some(r.location)).collect();

    let batch = RecordBatch::try_new(
        schema.clone(),
        vec![
            Arc::new(names),
            Arc::new(ranks),
            Arc::new(students),
            Arc::new(regions),
            Arc::new(locations),
        ],
    )
    .context("building record batch")?;

    let file = std::fs::File::create(path).context("creating parquet file")?;
    let mut writer = ArrowWriter::try_new(file, schema, None).context("creating parquet writer")?;
    writer.write(&batch).context("writing parquet batch")?;
    writer.close().context("closing parquet writer")?;

    Ok(())
}
