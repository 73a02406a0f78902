use std::sync::Arc;

use anyhow::{Context, Result};
use arrow::array::{Float64Array, Int64Array, StringArray};
use arrow::datatypes::{DataType, Field, Schema};
use arrow::record_batch::RecordBatch;
use arrow::util::pretty::print_batches;
use parquet::arrow::ArrowWriter;

const LAUNCH_COUNT: usize = 56;

/// (site, share of launches in percent)
const SITES: [(&str, u64); 4] = [
    ("CCAFS LC-40", 45),
    ("VAFB SLC-4E", 18),
    ("KSC LC-39A", 23),
    ("CCAFS SLC-40", 14),
];

/// (category, first flight index, success probability, max payload kg)
const BOOSTERS: [(&str, usize, f64, f64); 5] = [
    ("v1.0", 0, 0.2, 700.0),
    ("v1.1", 5, 0.35, 4500.0),
    ("FT", 20, 0.7, 9600.0),
    ("B4", 38, 0.55, 15600.0),
    ("B5", 50, 0.95, 15600.0),
];

/// Minimal deterministic PRNG (xoshiro256**)
struct SimpleRng {
    state: [u64; 4],
}

impl SimpleRng {
    fn new(seed: u64) -> Self {
        let mut s = [0u64; 4];
        let mut x = seed;
        for slot in &mut s {
            x = x.wrapping_mul(6364136223846793005).wrapping_add(1);
            *slot = x;
        }
        SimpleRng { state: s }
    }

    fn next_u64(&mut self) -> u64 {
        let result = (self.state[1].wrapping_mul(5))
            .rotate_left(7)
            .wrapping_mul(9);
        let t = self.state[1] << 17;
        self.state[2] ^= self.state[0];
        self.state[3] ^= self.state[1];
        self.state[1] ^= self.state[2];
        self.state[0] ^= self.state[3];
        self.state[2] ^= t;
        self.state[3] = self.state[3].rotate_left(45);
        result
    }

    fn next_f64(&mut self) -> f64 {
        (self.next_u64() >> 11) as f64 / (1u64 << 53) as f64
    }
}

struct Launch {
    flight_number: i64,
    site: &'static str,
    class: i64,
    payload_kg: f64,
    booster_version: String,
    booster_category: &'static str,
}

fn pick_site(rng: &mut SimpleRng) -> &'static str {
    let mut roll = rng.next_u64() % 100;
    for (site, share) in SITES {
        if roll < share {
            return site;
        }
        roll -= share;
    }
    SITES[0].0
}

fn generate(rng: &mut SimpleRng) -> Vec<Launch> {
    (0..LAUNCH_COUNT)
        .map(|i| {
            let (category, _, p_success, max_payload) = BOOSTERS
                .iter()
                .rev()
                .find(|(_, first, _, _)| i >= *first)
                .copied()
                .unwrap_or(BOOSTERS[0]);

            // Round to whole kilograms like the published manifests.
            let payload_kg = (rng.next_f64() * max_payload).round();
            let class = i64::from(rng.next_f64() < p_success);

            Launch {
                flight_number: i as i64 + 1,
                site: pick_site(rng),
                class,
                payload_kg,
                booster_version: format!("F9 {category} B{:04}", 1000 + i),
                booster_category: category,
            }
        })
        .collect()
}

fn to_batch(launches: &[Launch]) -> Result<RecordBatch> {
    let schema = Arc::new(Schema::new(vec![
        Field::new("Flight Number", DataType::Int64, false),
        Field::new("Launch Site", DataType::Utf8, false),
        Field::new("class", DataType::Int64, false),
        Field::new("Payload Mass (kg)", DataType::Float64, false),
        Field::new("Booster Version", DataType::Utf8, false),
        Field::new("Booster Version Category", DataType::Utf8, false),
    ]));

    RecordBatch::try_new(
        schema,
        vec![
            Arc::new(Int64Array::from_iter_values(launches.iter().map(|l| l.flight_number))),
            Arc::new(StringArray::from_iter_values(launches.iter().map(|l| l.site))),
            Arc::new(Int64Array::from_iter_values(launches.iter().map(|l| l.class))),
            Arc::new(Float64Array::from_iter_values(launches.iter().map(|l| l.payload_kg))),
            Arc::new(StringArray::from_iter_values(
                launches.iter().map(|l| l.booster_version.as_str()),
            )),
            Arc::new(StringArray::from_iter_values(
                launches.iter().map(|l| l.booster_category),
            )),
        ],
    )
    .context("building record batch")
}

fn write_csv(path: &str, launches: &[Launch]) -> Result<()> {
    let mut writer = csv::Writer::from_path(path).context("creating CSV file")?;
    writer.write_record([
        "Flight Number",
        "Launch Site",
        "class",
        "Payload Mass (kg)",
        "Booster Version",
        "Booster Version Category",
    ])?;
    for l in launches {
        writer.write_record([
            l.flight_number.to_string(),
            l.site.to_string(),
            l.class.to_string(),
            format!("{:.1}", l.payload_kg),
            l.booster_version.clone(),
            l.booster_category.to_string(),
        ])?;
    }
    writer.flush().context("flushing CSV file")?;
    Ok(())
}

fn write_parquet(path: &str, batch: &RecordBatch) -> Result<()> {
    let file = std::fs::File::create(path).context("creating parquet file")?;
    let mut writer = ArrowWriter::try_new(file, batch.schema(), None)?;
    writer.write(batch)?;
    writer.close()?;
    Ok(())
}

fn main() -> Result<()> {
    let mut rng = SimpleRng::new(42);
    let launches = generate(&mut rng);
    let batch = to_batch(&launches)?;

    write_csv("spacex_launch_dash.csv", &launches)?;
    write_parquet("spacex_launch_dash.parquet", &batch)?;

    print_batches(&[batch.slice(0, 5)])?;
    println!(
        "Wrote {} launches to spacex_launch_dash.csv and spacex_launch_dash.parquet",
        launches.len()
    );
    Ok(())
}
