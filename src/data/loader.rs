use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};

use arrow::array::{Array, ArrayRef, AsArray};
use arrow::datatypes::{DataType, Date32Type, Float32Type, Float64Type, Int32Type, Int64Type};
use chrono::{DateTime, NaiveDate, NaiveDateTime};
use parquet::arrow::arrow_reader::ParquetRecordBatchReaderBuilder;
use parquet::arrow::ProjectionMask;
use serde_json::Value as JsonValue;
use thiserror::Error;

use super::model::{Column, EmployeeDataset, EmployeeRecord, Gender, MaritalStatus};

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

#[derive(Debug, Error)]
pub enum LoadError {
    #[error("cannot read {}: {source}", path.display())]
    DataUnavailable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("required column '{field}' is missing")]
    MissingField { field: Column },
    #[error("unsupported file extension: .{extension}")]
    UnsupportedFormat { extension: String },
    /// `row` counts data rows from 0, excluding any header line.
    #[error("data row {row} (counting from 0): invalid {field} value '{value}'")]
    InvalidValue {
        row: usize,
        field: Column,
        value: String,
    },
    #[error("malformed data: {message}")]
    Malformed { message: String },
}

impl LoadError {
    fn malformed(err: impl std::fmt::Display) -> Self {
        LoadError::Malformed {
            message: err.to_string(),
        }
    }

    /// I/O failures while streaming CSV are `DataUnavailable`; everything
    /// else the reader reports is `Malformed`.
    fn from_csv(err: csv::Error, origin: &Path, context: &str) -> Self {
        if !err.is_io_error() {
            return LoadError::Malformed {
                message: format!("{context}: {err}"),
            };
        }
        match err.into_kind() {
            csv::ErrorKind::Io(source) => LoadError::DataUnavailable {
                path: origin.to_path_buf(),
                source,
            },
            other => LoadError::Malformed {
                message: format!("{context}: {other:?}"),
            },
        }
    }
}

// ---------------------------------------------------------------------------
// Public entry-point
// ---------------------------------------------------------------------------

/// Load the employee dataset from a file.  Dispatch by extension.
///
/// Supported formats:
/// * `.csv`     – header row naming the columns
/// * `.json`    – `[{ "name_employee": "...", "age": 34, ... }, ...]`
/// * `.parquet` – flat columns as written by `df.to_parquet()`
///
/// Only the columns listed in [`Column::ALL`] are read; others are ignored.
pub fn load_file(path: &Path) -> Result<EmployeeDataset, LoadError> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_ascii_lowercase();

    let unavailable = |source| LoadError::DataUnavailable {
        path: path.to_path_buf(),
        source,
    };

    match ext.as_str() {
        "csv" => read_csv(File::open(path).map_err(unavailable)?, path),
        "json" => load_json(&std::fs::read_to_string(path).map_err(unavailable)?),
        "parquet" | "pq" => load_parquet(File::open(path).map_err(unavailable)?),
        other => Err(LoadError::UnsupportedFormat {
            extension: other.to_string(),
        }),
    }
}

// ---------------------------------------------------------------------------
// Cell – one source value before projection
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq)]
enum Cell {
    Text(String),
    Integer(i64),
    Float(f64),
    Bool(bool),
    Date(NaiveDate),
    /// A value of a type the dashboard cannot interpret.
    Unsupported(String),
    Null,
}

impl Cell {
    fn raw(&self) -> String {
        match self {
            Cell::Text(s) | Cell::Unsupported(s) => s.clone(),
            Cell::Integer(i) => i.to_string(),
            Cell::Float(f) => f.to_string(),
            Cell::Bool(b) => b.to_string(),
            Cell::Date(d) => d.to_string(),
            Cell::Null => String::new(),
        }
    }
}

/// Converts the cells of one row into typed fields, reporting the row and
/// column of the first value that does not parse.
struct RowParser<F> {
    row: usize,
    cell: F,
}

impl<F> RowParser<F>
where
    F: FnMut(Column) -> Result<Cell, LoadError>,
{
    fn invalid(&self, field: Column, cell: &Cell) -> LoadError {
        LoadError::InvalidValue {
            row: self.row,
            field,
            value: cell.raw(),
        }
    }

    fn text(&mut self, field: Column) -> Result<String, LoadError> {
        match (self.cell)(field)? {
            Cell::Unsupported(s) => Err(self.invalid(field, &Cell::Unsupported(s))),
            cell => Ok(cell.raw().trim().to_string()),
        }
    }

    /// Finite number; `inf` and `NaN` are rejected.
    fn float(&mut self, field: Column) -> Result<Option<f64>, LoadError> {
        let cell = (self.cell)(field)?;
        let value = match &cell {
            Cell::Null => return Ok(None),
            Cell::Integer(i) => *i as f64,
            Cell::Float(f) => *f,
            Cell::Text(s) if s.trim().is_empty() => return Ok(None),
            Cell::Text(s) => s
                .trim()
                .parse::<f64>()
                .map_err(|_| self.invalid(field, &cell))?,
            _ => return Err(self.invalid(field, &cell)),
        };
        if value.is_finite() {
            Ok(Some(value))
        } else {
            Err(self.invalid(field, &cell))
        }
    }

    /// Non-negative integer; integral floats such as `34.0` are accepted.
    fn count(&mut self, field: Column) -> Result<Option<u32>, LoadError> {
        let Some(v) = self.float(field)? else {
            return Ok(None);
        };
        if v.fract() == 0.0 && v >= 0.0 && v <= f64::from(u32::MAX) {
            Ok(Some(v as u32))
        } else {
            Err(self.invalid(field, &Cell::Float(v)))
        }
    }

    fn date(&mut self, field: Column) -> Result<Option<NaiveDate>, LoadError> {
        let cell = (self.cell)(field)?;
        match &cell {
            Cell::Null => Ok(None),
            Cell::Date(d) => Ok(Some(*d)),
            Cell::Text(s) if s.trim().is_empty() => Ok(None),
            Cell::Text(s) => parse_date(s)
                .map(Some)
                .ok_or_else(|| self.invalid(field, &cell)),
            _ => Err(self.invalid(field, &cell)),
        }
    }

    fn gender(&mut self) -> Result<Gender, LoadError> {
        let raw = self.text(Column::Gender)?;
        Gender::parse(&raw).ok_or_else(|| self.invalid(Column::Gender, &Cell::Text(raw)))
    }

    fn marital_status(&mut self) -> Result<MaritalStatus, LoadError> {
        let raw = self.text(Column::MaritalStatus)?;
        MaritalStatus::parse(&raw)
            .ok_or_else(|| self.invalid(Column::MaritalStatus, &Cell::Text(raw)))
    }

    fn record(mut self) -> Result<EmployeeRecord, LoadError> {
        Ok(EmployeeRecord {
            name: self.text(Column::Name)?,
            birth_date: self.date(Column::BirthDate)?,
            age: self.count(Column::Age)?,
            gender: self.gender()?,
            marital_status: self.marital_status()?,
            hiring_date: self.date(Column::HiringDate)?,
            position: self.text(Column::Position)?,
            salary: self.float(Column::Salary)?,
            performance_score: self.float(Column::PerformanceScore)?,
            last_performance_date: self.date(Column::LastPerformanceDate)?,
            average_work_hours: self.float(Column::AverageWorkHours)?,
            satisfaction_level: self.float(Column::SatisfactionLevel)?,
            absences: self.count(Column::Absences)?,
        })
    }
}

/// Project one source row onto an [`EmployeeRecord`].
fn project_row<F>(row: usize, cell: F) -> Result<EmployeeRecord, LoadError>
where
    F: FnMut(Column) -> Result<Cell, LoadError>,
{
    RowParser { row, cell }.record()
}

/// Accepts ISO dates, `DD/MM/YYYY`, `MM/DD/YYYY` and ISO datetimes.
fn parse_date(value: &str) -> Option<NaiveDate> {
    let trimmed = value.trim();

    for fmt in ["%Y-%m-%d", "%d/%m/%Y", "%m/%d/%Y"] {
        if let Ok(date) = NaiveDate::parse_from_str(trimmed, fmt) {
            return Some(date);
        }
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(trimmed) {
        return Some(dt.date_naive());
    }

    NaiveDateTime::parse_from_str(trimmed, "%Y-%m-%d %H:%M:%S")
        .ok()
        .map(|dt| dt.date())
}

// ---------------------------------------------------------------------------
// CSV loader
// ---------------------------------------------------------------------------

/// Read a CSV table with a header row. Cells are trimmed; an empty cell is
/// a missing value.
pub fn load_csv<R: Read>(reader: R) -> Result<EmployeeDataset, LoadError> {
    read_csv(reader, Path::new("<stream>"))
}

fn read_csv<R: Read>(reader: R, origin: &Path) -> Result<EmployeeDataset, LoadError> {
    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);

    let headers: Vec<String> = reader
        .headers()
        .map_err(|e| LoadError::from_csv(e, origin, "CSV header"))?
        .iter()
        .map(|h| h.to_string())
        .collect();

    let mut positions = [0usize; Column::ALL.len()];
    for (slot, col) in positions.iter_mut().zip(Column::ALL) {
        *slot = headers
            .iter()
            .position(|h| h == col.name())
            .ok_or(LoadError::MissingField { field: col })?;
    }
    let ignored = headers.len().saturating_sub(positions.len());
    if ignored > 0 {
        log::debug!("ignoring {ignored} extra CSV columns");
    }

    let mut records = Vec::new();
    for (row_no, result) in reader.records().enumerate() {
        let row = result.map_err(|e| LoadError::from_csv(e, origin, &format!("CSV data row {row_no}")))?;

        let rec = project_row(row_no, |col| {
            let idx = positions[col.index()];
            Ok(Cell::Text(row.get(idx).unwrap_or("").to_string()))
        })?;
        records.push(rec);
    }

    Ok(EmployeeDataset::from_records(records))
}

// ---------------------------------------------------------------------------
// JSON loader
// ---------------------------------------------------------------------------

/// Expected JSON schema (records-oriented, `df.to_json(orient='records')`):
///
/// ```json
/// [
///   { "name_employee": "Ana", "age": 31, "gender": "F", ... },
///   ...
/// ]
/// ```
pub fn load_json(text: &str) -> Result<EmployeeDataset, LoadError> {
    let root: JsonValue = serde_json::from_str(text).map_err(LoadError::malformed)?;
    let rows = root
        .as_array()
        .ok_or_else(|| LoadError::malformed("expected top-level JSON array"))?;

    let mut records = Vec::with_capacity(rows.len());
    for (i, row) in rows.iter().enumerate() {
        let obj = row.as_object().ok_or_else(|| LoadError::Malformed {
            message: format!("row {i} is not a JSON object"),
        })?;

        let rec = project_row(i, |col| {
            obj.get(col.name())
                .map(json_to_cell)
                .ok_or(LoadError::MissingField { field: col })
        })?;
        records.push(rec);
    }

    Ok(EmployeeDataset::from_records(records))
}

fn json_to_cell(val: &JsonValue) -> Cell {
    match val {
        JsonValue::String(s) => Cell::Text(s.clone()),
        JsonValue::Number(n) => {
            if let Some(i) = n.as_i64() {
                Cell::Integer(i)
            } else if let Some(f) = n.as_f64() {
                Cell::Float(f)
            } else {
                Cell::Text(n.to_string())
            }
        }
        JsonValue::Bool(b) => Cell::Bool(*b),
        JsonValue::Null => Cell::Null,
        other => Cell::Unsupported(other.to_string()),
    }
}

// ---------------------------------------------------------------------------
// Parquet loader
// ---------------------------------------------------------------------------

/// Load a Parquet file with one flat column per field.
///
/// Works with files written by both **Pandas** (`df.to_parquet()`) and
/// **Polars** (`df.write_parquet()`). Only the required columns are decoded.
pub fn load_parquet(file: File) -> Result<EmployeeDataset, LoadError> {
    let builder = ParquetRecordBatchReaderBuilder::try_new(file).map_err(LoadError::malformed)?;

    let schema = builder.schema().clone();
    let mut roots = Vec::with_capacity(Column::ALL.len());
    for col in Column::ALL {
        let idx = schema
            .index_of(col.name())
            .map_err(|_| LoadError::MissingField { field: col })?;
        roots.push(idx);
    }
    let mask = ProjectionMask::roots(builder.parquet_schema(), roots);
    let reader = builder
        .with_projection(mask)
        .build()
        .map_err(LoadError::malformed)?;

    let mut records = Vec::new();
    let mut offset = 0;

    for batch_result in reader {
        let batch = batch_result.map_err(LoadError::malformed)?;

        for row in 0..batch.num_rows() {
            let rec = project_row(offset + row, |col| {
                batch
                    .column_by_name(col.name())
                    .map(|array| extract_cell(array, row))
                    .ok_or(LoadError::MissingField { field: col })
            })?;
            records.push(rec);
        }
        offset += batch.num_rows();
    }

    Ok(EmployeeDataset::from_records(records))
}

/// Extract a single value from an Arrow column at a given row.
fn extract_cell(col: &ArrayRef, row: usize) -> Cell {
    if col.is_null(row) {
        return Cell::Null;
    }
    match col.data_type() {
        DataType::Utf8 => Cell::Text(col.as_string::<i32>().value(row).to_string()),
        DataType::LargeUtf8 => Cell::Text(col.as_string::<i64>().value(row).to_string()),
        DataType::Int32 => Cell::Integer(i64::from(col.as_primitive::<Int32Type>().value(row))),
        DataType::Int64 => Cell::Integer(col.as_primitive::<Int64Type>().value(row)),
        DataType::Float32 => Cell::Float(f64::from(col.as_primitive::<Float32Type>().value(row))),
        DataType::Float64 => Cell::Float(col.as_primitive::<Float64Type>().value(row)),
        DataType::Boolean => Cell::Bool(col.as_boolean().value(row)),
        DataType::Date32 => col
            .as_primitive::<Date32Type>()
            .value_as_date(row)
            .map_or(Cell::Null, Cell::Date),
        other => Cell::Unsupported(format!("{other:?}")),
    }
}
