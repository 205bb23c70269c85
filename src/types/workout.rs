use std::fmt;

use chrono::{DateTime, NaiveDate, Utc};

use crate::schema::CategorySchema;
use crate::types::sport::SportCategory;

/// Identity shared by every row of one recording.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Workout {
    /// `yyyyMMddHHmm` of the earliest sample.
    pub workout_id: i64,
    pub date: NaiveDate,
}

#[derive(Debug, Clone, PartialEq)]
pub struct NormalizedRow {
    pub timestamp: DateTime<Utc>,
    pub elapsed_time: f64,
    /// One value per measure column of the category schema, in schema order.
    pub measures: Vec<f64>,
}

/// A table reduced to its category's fixed columns, one row per timestamp.
#[derive(Debug, Clone, PartialEq)]
pub struct NormalizedTable {
    pub category: SportCategory,
    pub hr_zones: String,
    pub power_zones: String,
    pub rows: Vec<NormalizedRow>,
}

impl NormalizedTable {
    pub fn schema(&self) -> &'static CategorySchema {
        CategorySchema::for_category(self.category)
    }

    pub fn column_names(&self) -> Vec<&'static str> {
        self.schema().column_names().collect()
    }

    pub fn measure(&self, row: &NormalizedRow, column: &str) -> Option<f64> {
        let idx = self.schema().measure_index(column)?;
        row.measures.get(idx).copied()
    }
}

/// A single value in a projected destination row.
#[derive(Debug, Clone, PartialEq)]
pub enum Cell {
    Int(i64),
    Float(f64),
    Text(String),
    Date(NaiveDate),
    Timestamp(DateTime<Utc>),
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Cell::Int(v) => write!(f, "{}", v),
            Cell::Float(v) => write!(f, "{}", v),
            Cell::Text(s) => f.write_str(s),
            Cell::Date(d) => write!(f, "{}", d.format("%Y-%m-%d")),
            Cell::Timestamp(t) => write!(f, "{}", t.format("%Y-%m-%d %H:%M:%S%.3f")),
        }
    }
}
