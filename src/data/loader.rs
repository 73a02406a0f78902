use std::collections::{BTreeMap, BTreeSet};
use std::path::Path;

use anyhow::{Context, Result};
use arrow::array::{Array, ArrayRef, AsArray};
use arrow::compute::{can_cast_types, cast};
use arrow::datatypes::{
    DataType, Float32Type, Float64Type, Int16Type, Int32Type, Int64Type, Int8Type, UInt16Type,
    UInt32Type, UInt64Type, UInt8Type,
};
use parquet::arrow::arrow_reader::ParquetRecordBatchReaderBuilder;
use serde_json::Value as JsonValue;

use super::model::{CellValue, LaunchDataset, LaunchRecord, REQUIRED_COLUMNS};
use crate::error::DataError;

// ---------------------------------------------------------------------------
// Public entry-point
// ---------------------------------------------------------------------------

/// Load the launch dataset from a file.  Dispatch by extension.
///
/// Supported formats:
/// * `.csv`     – header row with column names (the usual export)
/// * `.parquet` – one column per field, as written by Pandas or Polars
/// * `.json`    – `[{ "Launch Site": "...", "class": 1, ... }, ...]`
///
/// Any failure here is fatal: the dashboard does not start without data.
pub fn load_file(path: &Path) -> Result<LaunchDataset> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_ascii_lowercase();

    let records = match ext.as_str() {
        "csv" => load_csv(path),
        "parquet" | "pq" => load_parquet(path),
        "json" => load_json(path),
        other => Err(DataError::UnsupportedFormat(other.to_string()).into()),
    }
    .with_context(|| format!("loading launch records from {}", path.display()))?;

    let dataset = LaunchDataset::from_records(records)?;
    log::info!(
        "Loaded {} launch records from {} (payload {}..={} kg, {} sites)",
        dataset.len(),
        path.display(),
        dataset.min_payload(),
        dataset.max_payload(),
        dataset.distinct_sites().len()
    );
    Ok(dataset)
}

fn check_required_columns<'a>(names: impl IntoIterator<Item = &'a str>) -> Result<()> {
    let present: BTreeSet<&str> = names.into_iter().collect();
    match REQUIRED_COLUMNS.iter().find(|c| !present.contains(**c)) {
        Some(missing) => Err(DataError::MissingColumn(missing.to_string()).into()),
        None => Ok(()),
    }
}

// ---------------------------------------------------------------------------
// CSV loader
// ---------------------------------------------------------------------------

/// CSV layout:  header row with column names, one launch per line.
/// Cells are typed by inspection (integer, float, bool, text, empty → null).
fn load_csv(path: &Path) -> Result<Vec<LaunchRecord>> {
    let mut reader = csv::Reader::from_path(path).context("opening CSV")?;
    let headers: Vec<String> = reader
        .headers()
        .context("reading CSV headers")?
        .iter()
        .map(|h| h.trim().to_string())
        .collect();

    check_required_columns(headers.iter().map(String::as_str))?;

    let mut records = Vec::new();

    for (row_no, result) in reader.records().enumerate() {
        let record = result.with_context(|| format!("CSV row {row_no}"))?;

        let cells: BTreeMap<String, CellValue> = headers
            .iter()
            .zip(record.iter())
            .map(|(name, value)| (name.clone(), guess_cell_type(value.trim())))
            .collect();

        records.push(LaunchRecord::from_cells(row_no, cells)?);
    }

    Ok(records)
}

fn guess_cell_type(s: &str) -> CellValue {
    if s.is_empty() {
        return CellValue::Null;
    }
    if let Ok(i) = s.parse::<i64>() {
        return CellValue::Integer(i);
    }
    if let Ok(f) = s.parse::<f64>() {
        return CellValue::Float(f);
    }
    if s == "true" || s == "false" {
        return CellValue::Bool(s == "true");
    }
    CellValue::String(s.to_string())
}

// ---------------------------------------------------------------------------
// JSON loader
// ---------------------------------------------------------------------------

/// Expected JSON schema (records-oriented, `df.to_json(orient='records')`):
///
/// ```json
/// [
///   { "Launch Site": "CCAFS LC-40", "Payload Mass (kg)": 525.0,
///     "class": 0, "Booster Version Category": "v1.0" },
///   ...
/// ]
/// ```
fn load_json(path: &Path) -> Result<Vec<LaunchRecord>> {
    let text = std::fs::read_to_string(path).context("reading JSON file")?;
    let root: JsonValue = serde_json::from_str(&text).context("parsing JSON")?;

    let rows = root.as_array().context("Expected top-level JSON array")?;

    let mut records = Vec::with_capacity(rows.len());

    for (i, row) in rows.iter().enumerate() {
        let obj = row
            .as_object()
            .with_context(|| format!("Row {i} is not a JSON object"))?;

        if i == 0 {
            check_required_columns(obj.keys().map(String::as_str))?;
        }

        let cells: BTreeMap<String, CellValue> = obj
            .iter()
            .map(|(key, val)| (key.clone(), json_to_cell(val)))
            .collect();

        records.push(LaunchRecord::from_cells(i, cells)?);
    }

    Ok(records)
}

fn json_to_cell(val: &JsonValue) -> CellValue {
    match val {
        JsonValue::String(s) => CellValue::String(s.clone()),
        JsonValue::Number(n) => {
            if let Some(i) = n.as_i64() {
                CellValue::Integer(i)
            } else if let Some(f) = n.as_f64() {
                CellValue::Float(f)
            } else {
                CellValue::String(n.to_string())
            }
        }
        JsonValue::Bool(b) => CellValue::Bool(*b),
        JsonValue::Null => CellValue::Null,
        other => CellValue::String(other.to_string()),
    }
}

// ---------------------------------------------------------------------------
// Parquet loader
// ---------------------------------------------------------------------------

/// Load a Parquet file containing launch records, one scalar column per
/// field. Works with files written by both **Pandas** (`df.to_parquet()`)
/// and **Polars** (`df.write_parquet()`).
fn load_parquet(path: &Path) -> Result<Vec<LaunchRecord>> {
    let file = std::fs::File::open(path).context("opening parquet file")?;
    let builder =
        ParquetRecordBatchReaderBuilder::try_new(file).context("reading parquet metadata")?;

    check_required_columns(
        builder
            .schema()
            .fields()
            .iter()
            .map(|f| f.name().as_str()),
    )?;

    let reader = builder.build().context("building parquet reader")?;

    let mut records = Vec::new();
    let mut row_offset = 0;

    for batch_result in reader {
        let batch = batch_result.context("reading parquet record batch")?;
        let schema = batch.schema();

        // Normalise once per batch so the row loop only sees scalar types.
        let mut columns: Vec<(String, ArrayRef)> = Vec::with_capacity(schema.fields().len());
        for (field, col) in schema.fields().iter().zip(batch.columns()) {
            if let Some(col) = normalise_column(field.name(), col)? {
                columns.push((field.name().clone(), col));
            }
        }

        for row in 0..batch.num_rows() {
            let cells: BTreeMap<String, CellValue> = columns
                .iter()
                .map(|(name, col)| (name.clone(), extract_cell_value(col, row)))
                .collect();

            records.push(LaunchRecord::from_cells(row_offset + row, cells)?);
        }
        row_offset += batch.num_rows();
    }

    Ok(records)
}

// -- Parquet / Arrow helpers --

fn is_scalar_type(data_type: &DataType) -> bool {
    matches!(
        data_type,
        DataType::Null
            | DataType::Boolean
            | DataType::Utf8
            | DataType::LargeUtf8
            | DataType::Int8
            | DataType::Int16
            | DataType::Int32
            | DataType::Int64
            | DataType::UInt8
            | DataType::UInt16
            | DataType::UInt32
            | DataType::UInt64
            | DataType::Float32
            | DataType::Float64
    )
}

/// Bring a column to one of the types [`extract_cell_value`] reads.
///
/// Dictionary-encoded columns (Pandas categoricals, Polars `Categorical`)
/// are unpacked to their value type; string views and half floats are cast
/// to their plain counterparts. Other types fail on a required column and
/// are rendered as text, or dropped, on a passthrough column.
fn normalise_column(name: &str, col: &ArrayRef) -> Result<Option<ArrayRef>> {
    let target = match col.data_type() {
        t if is_scalar_type(t) => return Ok(Some(col.clone())),
        DataType::Dictionary(_, value_type) => value_type.as_ref().clone(),
        DataType::Utf8View => DataType::Utf8,
        DataType::Float16 => DataType::Float64,
        _ if REQUIRED_COLUMNS.contains(&name) => {
            return Err(DataError::UnsupportedColumnType {
                column: name.to_string(),
                data_type: col.data_type().to_string(),
            }
            .into())
        }
        _ => DataType::Utf8,
    };

    if !can_cast_types(col.data_type(), &target) {
        if REQUIRED_COLUMNS.contains(&name) {
            return Err(DataError::UnsupportedColumnType {
                column: name.to_string(),
                data_type: col.data_type().to_string(),
            }
            .into());
        }
        log::debug!("dropping column '{name}' of type {}", col.data_type());
        return Ok(None);
    }

    let cast_col = cast(col, &target)
        .with_context(|| format!("casting column '{name}' to {target}"))?;
    // A dictionary over string views needs a second pass.
    normalise_column(name, &cast_col)
}

/// Extract a single cell from a normalised Arrow column at a given row.
fn extract_cell_value(col: &ArrayRef, row: usize) -> CellValue {
    if col.is_null(row) {
        return CellValue::Null;
    }
    match col.data_type() {
        DataType::Utf8 => CellValue::String(col.as_string::<i32>().value(row).to_string()),
        DataType::LargeUtf8 => CellValue::String(col.as_string::<i64>().value(row).to_string()),
        DataType::Int8 => CellValue::Integer(col.as_primitive::<Int8Type>().value(row).into()),
        DataType::Int16 => CellValue::Integer(col.as_primitive::<Int16Type>().value(row).into()),
        DataType::Int32 => CellValue::Integer(col.as_primitive::<Int32Type>().value(row).into()),
        DataType::Int64 => CellValue::Integer(col.as_primitive::<Int64Type>().value(row)),
        DataType::UInt8 => CellValue::Integer(col.as_primitive::<UInt8Type>().value(row).into()),
        DataType::UInt16 => CellValue::Integer(col.as_primitive::<UInt16Type>().value(row).into()),
        DataType::UInt32 => CellValue::Integer(col.as_primitive::<UInt32Type>().value(row).into()),
        DataType::UInt64 => {
            let v = col.as_primitive::<UInt64Type>().value(row);
            i64::try_from(v).map_or(CellValue::Float(v as f64), CellValue::Integer)
        }
        DataType::Float32 => CellValue::Float(col.as_primitive::<Float32Type>().value(row).into()),
        DataType::Float64 => CellValue::Float(col.as_primitive::<Float64Type>().value(row)),
        DataType::Boolean => CellValue::Bool(col.as_boolean().value(row)),
        // Null-typed columns, and nothing else after `normalise_column`.
        _ => CellValue::Null,
    }
}
