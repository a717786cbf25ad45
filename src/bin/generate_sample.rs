use std::sync::Arc;

use arrow::array::{ArrayRef, Date32Array, Float64Array, Int64Array, StringArray};
use arrow::datatypes::{DataType, Field, Schema};
use arrow::record_batch::RecordBatch;
use chrono::{Datelike, Duration, NaiveDate};
use parquet::arrow::ArrowWriter;
use serde::Serialize;

const EMPLOYEES: usize = 311;

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

    fn range(&mut self, lo: i64, hi: i64) -> i64 {
        lo + (self.next_f64() * (hi - lo + 1) as f64) as i64
    }

    /// Box-Muller transform for normal distribution
    fn gauss(&mut self, mean: f64, std_dev: f64) -> f64 {
        let u1 = self.next_f64().max(1e-15);
        let u2 = self.next_f64();
        let z = (-2.0 * u1.ln()).sqrt() * (2.0 * std::f64::consts::PI * u2).cos();
        mean + std_dev * z
    }

    fn pick<'a>(&mut self, items: &[&'a str]) -> &'a str {
        items[self.range(0, items.len() as i64 - 1) as usize]
    }
}

/// One CSV row; field names are the source column names.
#[derive(Debug, Serialize)]
struct EmployeeRow {
    id_employee: i64,
    name_employee: String,
    birth_date: NaiveDate,
    age: i64,
    gender: String,
    marital_status: String,
    hiring_date: NaiveDate,
    position: String,
    salary: f64,
    performance_score: i64,
    last_performance_date: NaiveDate,
    average_work_hours: f64,
    satisfaction_level: f64,
    absences: i64,
}

fn generate(rng: &mut SimpleRng) -> Vec<EmployeeRow> {
    let first_names = ["Ana", "Luis", "Rosa", "Juan", "Eva", "Raul", "Sofia", "Diego", "Lucia", "Pablo"];
    let last_names = ["Lopez", "Garcia", "Martinez", "Hernandez", "Perez", "Sanchez", "Ramirez", "Torres"];
    let statuses = ["Single", "Married", "Married", "Divorced", "Separated", "Widowed"];
    let positions: [(&str, f64); 5] = [
        ("Analyst", 45_000.0),
        ("Developer", 60_000.0),
        ("Manager", 80_000.0),
        ("Director", 110_000.0),
        ("Assistant", 35_000.0),
    ];
    let today = NaiveDate::from_ymd_opt(2023, 12, 31).expect("valid date");

    (0..EMPLOYEES)
        .map(|i| {
            let age = rng.range(28, 70);
            let (position, base_salary) = positions[rng.range(0, positions.len() as i64 - 1) as usize];
            // The source file writes male as "M " with a trailing space.
            let gender = if rng.next_f64() < 0.5 { "M " } else { "F" };

            let birth_date = today
                .with_year(today.year() - age as i32)
                .unwrap_or(today)
                - Duration::days(rng.range(0, 364));
            let tenure_days = rng.range(30, 365 * (age - 22).min(25));
            let hiring_date = today - Duration::days(tenure_days);
            let last_performance_date = today - Duration::days(rng.range(0, 365));

            let score = rng.gauss(3.0, 0.8).round().clamp(1.0, 5.0) as i64;
            let salary = (base_salary * (1.0 + (age - 28) as f64 * 0.01) + rng.gauss(0.0, 4_000.0))
                .max(20_000.0)
                .round();

            EmployeeRow {
                id_employee: i as i64 + 1,
                name_employee: format!("{} {}", rng.pick(&first_names), rng.pick(&last_names)),
                birth_date,
                age,
                gender: gender.to_string(),
                marital_status: rng.pick(&statuses).to_string(),
                hiring_date,
                position: position.to_string(),
                salary,
                performance_score: score,
                last_performance_date,
                average_work_hours: (rng.gauss(42.0, 3.0) * 10.0).round() / 10.0,
                satisfaction_level: (rng.gauss(3.5, 0.7).clamp(1.0, 5.0) * 10.0).round() / 10.0,
                absences: rng.range(0, 20),
            }
        })
        .collect()
}

fn days_since_epoch(date: NaiveDate) -> i32 {
    let epoch = NaiveDate::from_ymd_opt(1970, 1, 1).expect("valid date");
    (date - epoch).num_days() as i32
}

fn write_csv(rows: &[EmployeeRow], path: &str) {
    let mut writer = csv::Writer::from_path(path).expect("Failed to create CSV file");
    for row in rows {
        writer.serialize(row).expect("Failed to write CSV row");
    }
    writer.flush().expect("Failed to flush CSV file");
}

fn write_parquet(rows: &[EmployeeRow], path: &str) {
    let text = |f: fn(&EmployeeRow) -> &str| -> ArrayRef {
        Arc::new(StringArray::from(rows.iter().map(f).collect::<Vec<_>>()))
    };
    let int = |f: fn(&EmployeeRow) -> i64| -> ArrayRef {
        Arc::new(Int64Array::from(rows.iter().map(f).collect::<Vec<_>>()))
    };
    let float = |f: fn(&EmployeeRow) -> f64| -> ArrayRef {
        Arc::new(Float64Array::from(rows.iter().map(f).collect::<Vec<_>>()))
    };
    let date = |f: fn(&EmployeeRow) -> NaiveDate| -> ArrayRef {
        Arc::new(Date32Array::from(
            rows.iter().map(|r| days_since_epoch(f(r))).collect::<Vec<_>>(),
        ))
    };

    let columns: Vec<(&str, DataType, ArrayRef)> = vec![
        ("id_employee", DataType::Int64, int(|r| r.id_employee)),
        ("name_employee", DataType::Utf8, text(|r| &r.name_employee)),
        ("birth_date", DataType::Date32, date(|r| r.birth_date)),
        ("age", DataType::Int64, int(|r| r.age)),
        ("gender", DataType::Utf8, text(|r| &r.gender)),
        ("marital_status", DataType::Utf8, text(|r| &r.marital_status)),
        ("hiring_date", DataType::Date32, date(|r| r.hiring_date)),
        ("position", DataType::Utf8, text(|r| &r.position)),
        ("salary", DataType::Float64, float(|r| r.salary)),
        ("performance_score", DataType::Int64, int(|r| r.performance_score)),
        ("last_performance_date", DataType::Date32, date(|r| r.last_performance_date)),
        ("average_work_hours", DataType::Float64, float(|r| r.average_work_hours)),
        ("satisfaction_level", DataType::Float64, float(|r| r.satisfaction_level)),
        ("absences", DataType::Int64, int(|r| r.absences)),
    ];

    let schema = Arc::new(Schema::new(
        columns
            .iter()
            .map(|(name, dtype, _)| Field::new(*name, dtype.clone(), false))
            .collect::<Vec<_>>(),
    ));
    let arrays: Vec<ArrayRef> = columns.into_iter().map(|(_, _, array)| array).collect();
    let batch = RecordBatch::try_new(schema.clone(), arrays).expect("Failed to create RecordBatch");

    let file = std::fs::File::create(path).expect("Failed to create output file");
    let mut writer = ArrowWriter::try_new(file, schema, None).expect("Failed to create writer");
    writer.write(&batch).expect("Failed to write batch");
    writer.close().expect("Failed to close writer");
}

fn main() {
    let mut rng = SimpleRng::new(42);
    let rows = generate(&mut rng);

    write_csv(&rows, "employee_data.csv");
    write_parquet(&rows, "employee_data.parquet");

    println!(
        "Wrote {} employees to employee_data.csv and employee_data.parquet",
        rows.len()
    );
}
