use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

use crate::error::DataError;

/// Column holding the launch site identifier.
pub const COL_LAUNCH_SITE: &str = "Launch Site";
/// Column holding the payload mass in kilograms.
pub const COL_PAYLOAD_MASS: &str = "Payload Mass (kg)";
/// Column holding the binary outcome class.
pub const COL_CLASS: &str = "class";
/// Column holding the booster version category.
pub const COL_BOOSTER_CATEGORY: &str = "Booster Version Category";

/// Columns every input file must provide.
pub const REQUIRED_COLUMNS: [&str; 4] = [
    COL_LAUNCH_SITE,
    COL_PAYLOAD_MASS,
    COL_CLASS,
    COL_BOOSTER_CATEGORY,
];

// ---------------------------------------------------------------------------
// CellValue – a single cell of the source table
// ---------------------------------------------------------------------------

/// A dynamically-typed cell mirroring common dataframe dtypes.
#[derive(Debug, Clone, PartialEq)]
pub enum CellValue {
    String(String),
    Integer(i64),
    Float(f64),
    Bool(bool),
    Null,
}

impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CellValue::String(s) => write!(f, "{s}"),
            CellValue::Integer(i) => write!(f, "{i}"),
            CellValue::Float(v) => write!(f, "{v}"),
            CellValue::Bool(b) => write!(f, "{b}"),
            CellValue::Null => write!(f, "<null>"),
        }
    }
}

impl CellValue {
    /// Try to interpret the value as an `f64`.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            CellValue::Float(v) => Some(*v),
            CellValue::Integer(i) => Some(*i as f64),
            _ => None,
        }
    }

    /// Text form of the value, `None` for nulls.
    pub fn as_text(&self) -> Option<String> {
        match self {
            CellValue::Null => None,
            CellValue::String(s) => Some(s.clone()),
            other => Some(other.to_string()),
        }
    }
}

// ---------------------------------------------------------------------------
// OutcomeClass
// ---------------------------------------------------------------------------

/// Binary launch outcome. Only 0 and 1 are accepted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum OutcomeClass {
    Failure,
    Success,
}

impl OutcomeClass {
    /// Numeric value as stored in the `class` column.
    pub fn value(self) -> u8 {
        match self {
            OutcomeClass::Failure => 0,
            OutcomeClass::Success => 1,
        }
    }

    /// Segment label used by the proportion chart.
    pub fn label(self) -> &'static str {
        match self {
            OutcomeClass::Failure => "Failed",
            OutcomeClass::Success => "Success",
        }
    }

    /// Interpret a cell as an outcome class. Floats are accepted only when
    /// they are exactly 0.0 or 1.0, since some writers store integer columns
    /// as doubles.
    pub fn from_cell(cell: &CellValue) -> Option<Self> {
        match cell {
            CellValue::Integer(0) | CellValue::Bool(false) => Some(OutcomeClass::Failure),
            CellValue::Integer(1) | CellValue::Bool(true) => Some(OutcomeClass::Success),
            CellValue::Float(v) if *v == 0.0 => Some(OutcomeClass::Failure),
            CellValue::Float(v) if *v == 1.0 => Some(OutcomeClass::Success),
            _ => None,
        }
    }
}

// ---------------------------------------------------------------------------
// LaunchRecord – one row of the dataset
// ---------------------------------------------------------------------------

/// A single launch (one row of the source table).
#[derive(Debug, Clone, PartialEq)]
pub struct LaunchRecord {
    pub launch_site: String,
    /// Payload mass in kilograms, always finite.
    pub payload_mass_kg: f64,
    pub class: OutcomeClass,
    pub booster_category: String,
    /// Passthrough columns: column_name → value.
    pub extra: BTreeMap<String, CellValue>,
}

impl LaunchRecord {
    /// Build a record from a parsed row, moving the required columns out of
    /// `cells` and keeping the remainder as passthrough data.
    pub fn from_cells(
        row: usize,
        mut cells: BTreeMap<String, CellValue>,
    ) -> Result<Self, DataError> {
        let mut take = |column: &str| {
            cells
                .remove(column)
                .ok_or_else(|| DataError::MissingColumn(column.to_string()))
        };

        let site = take(COL_LAUNCH_SITE)?;
        let payload = take(COL_PAYLOAD_MASS)?;
        let class = take(COL_CLASS)?;
        let booster = take(COL_BOOSTER_CATEGORY)?;

        let launch_site = site.as_text().ok_or_else(|| DataError::EmptyCell {
            row,
            column: COL_LAUNCH_SITE.to_string(),
        })?;
        let payload_mass_kg = payload
            .as_f64()
            .filter(|v| v.is_finite())
            .ok_or_else(|| DataError::InvalidPayload {
                row,
                value: payload.to_string(),
            })?;
        let class = OutcomeClass::from_cell(&class).ok_or_else(|| DataError::InvalidOutcome {
            row,
            value: class.to_string(),
        })?;
        let booster_category = booster.as_text().ok_or_else(|| DataError::EmptyCell {
            row,
            column: COL_BOOSTER_CATEGORY.to_string(),
        })?;

        Ok(LaunchRecord {
            launch_site,
            payload_mass_kg,
            class,
            booster_category,
            extra: cells,
        })
    }
}

// ---------------------------------------------------------------------------
// LaunchDataset – the complete loaded dataset
// ---------------------------------------------------------------------------

/// The full parsed dataset with pre-computed summary statistics.
/// Immutable once built.
#[derive(Debug, Clone)]
pub struct LaunchDataset {
    records: Vec<LaunchRecord>,
    min_payload: f64,
    max_payload: f64,
    /// Sites in order of first appearance.
    distinct_sites: Vec<String>,
    distinct_boosters: BTreeSet<String>,
}

impl LaunchDataset {
    /// Build the summary statistics from the loaded records.
    pub fn from_records(records: Vec<LaunchRecord>) -> Result<Self, DataError> {
        if records.is_empty() {
            return Err(DataError::EmptyDataset);
        }

        let mut min_payload = f64::INFINITY;
        let mut max_payload = f64::NEG_INFINITY;
        let mut distinct_sites: Vec<String> = Vec::new();
        let mut distinct_boosters = BTreeSet::new();

        for rec in &records {
            min_payload = min_payload.min(rec.payload_mass_kg);
            max_payload = max_payload.max(rec.payload_mass_kg);
            if !distinct_sites.contains(&rec.launch_site) {
                distinct_sites.push(rec.launch_site.clone());
            }
            distinct_boosters.insert(rec.booster_category.clone());
        }

        Ok(LaunchDataset {
            records,
            min_payload,
            max_payload,
            distinct_sites,
            distinct_boosters,
        })
    }

    pub fn records(&self) -> &[LaunchRecord] {
        &self.records
    }

    pub fn min_payload(&self) -> f64 {
        self.min_payload
    }

    pub fn max_payload(&self) -> f64 {
        self.max_payload
    }

    pub fn distinct_sites(&self) -> &[String] {
        &self.distinct_sites
    }

    pub fn distinct_boosters(&self) -> &BTreeSet<String> {
        &self.distinct_boosters
    }

    /// Number of launch records.
    pub fn len(&self) -> usize {
        self.records.len()
    }
}
