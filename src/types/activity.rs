use std::collections::BTreeMap;
use std::fmt;

use chrono::{DateTime, Utc};

/// A single decoded field value as it came out of the device stream.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    Float(f64),
    Int(i64),
    Text(String),
    Timestamp(DateTime<Utc>),
}

impl FieldValue {
    /// Numeric view of the value. Text is parsed when it holds a number;
    /// anything else (including NaN and infinities) is missing.
    pub fn as_f64(&self) -> Option<f64> {
        let value = match self {
            FieldValue::Float(v) => *v,
            FieldValue::Int(v) => *v as f64,
            FieldValue::Text(s) => s.trim().parse::<f64>().ok()?,
            FieldValue::Timestamp(_) => return None,
        };
        value.is_finite().then_some(value)
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            FieldValue::Text(s) => Some(s),
            _ => None,
        }
    }
}

impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldValue::Float(v) => write!(f, "{}", v),
            FieldValue::Int(v) => write!(f, "{}", v),
            FieldValue::Text(s) => f.write_str(s),
            FieldValue::Timestamp(t) => write!(f, "{}", t.to_rfc3339()),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct RecordMessage {
    pub timestamp: Option<DateTime<Utc>>,
    pub fields: BTreeMap<String, FieldValue>,
}

impl RecordMessage {
    pub fn at(timestamp: DateTime<Utc>) -> Self {
        Self {
            timestamp: Some(timestamp),
            fields: BTreeMap::new(),
        }
    }

    pub fn with(mut self, name: &str, value: FieldValue) -> Self {
        self.fields.insert(name.to_string(), value);
        self
    }
}

#[derive(Debug, Clone, Default)]
pub struct EventMessage {
    pub timestamp: Option<DateTime<Utc>>,
    pub event: Option<String>,
    pub event_type: Option<String>,
    pub timer_trigger: Option<String>,
}

impl EventMessage {
    pub fn is_timer_start(&self) -> bool {
        self.event.as_deref() == Some("timer") && self.event_type.as_deref() == Some("start")
    }
}

/// One configured zone boundary (`high_bpm` for heart rate, `high_value` for power).
#[derive(Debug, Clone, PartialEq)]
pub struct ZoneMessage {
    pub high: FieldValue,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SportMessage {
    pub sport: Option<String>,
    pub sub_sport: Option<String>,
}

impl SportMessage {
    pub fn new(sport: &str, sub_sport: &str) -> Self {
        Self {
            sport: Some(sport.to_string()),
            sub_sport: Some(sub_sport.to_string()),
        }
    }
}

impl fmt::Display for SportMessage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "sport={} sub_sport={}",
            self.sport.as_deref().unwrap_or("<none>"),
            self.sub_sport.as_deref().unwrap_or("<none>")
        )
    }
}

/// Decoded messages of one recording, grouped by kind.
#[derive(Debug, Clone, Default)]
pub struct RawMessageSet {
    pub records: Vec<RecordMessage>,
    pub events: Vec<EventMessage>,
    pub hr_zones: Vec<ZoneMessage>,
    pub power_zones: Vec<ZoneMessage>,
    pub sports: Vec<SportMessage>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SampleRow {
    pub timestamp: DateTime<Utc>,
    /// Seconds since the start marker of the segment this sample belongs to.
    pub elapsed_time: f64,
    pub fields: BTreeMap<String, FieldValue>,
}

impl SampleRow {
    pub fn get(&self, column: &str) -> Option<&FieldValue> {
        self.fields.get(column)
    }

    /// Non-missing values in the row, the timestamp included.
    pub fn recorded_values(&self) -> usize {
        1 + self.fields.len()
    }
}

/// Unclassified per-file table, ordered by timestamp.
#[derive(Debug, Clone, Default)]
pub struct ActivityTable {
    pub rows: Vec<SampleRow>,
    pub hr_zones: String,
    pub power_zones: String,
}

impl ActivityTable {
    pub fn has_column(&self, column: &str) -> bool {
        self.rows.iter().any(|row| row.fields.contains_key(column))
    }

    fn numeric(&self, column: &str) -> impl Iterator<Item = f64> + '_ {
        let column = column.to_string();
        self.rows
            .iter()
            .filter_map(move |row| row.get(&column).and_then(FieldValue::as_f64))
    }

    pub fn column_max(&self, column: &str) -> Option<f64> {
        self.numeric(column).reduce(f64::max)
    }

    pub fn column_mean(&self, column: &str) -> Option<f64> {
        let (sum, count) = self
            .numeric(column)
            .fold((0.0, 0usize), |(sum, count), v| (sum + v, count + 1));
        (count > 0).then(|| sum / count as f64)
    }

    pub fn max_elapsed_time(&self) -> Option<f64> {
        self.rows.iter().map(|row| row.elapsed_time).reduce(f64::max)
    }

    pub fn text_values<'a>(&'a self, column: &'a str) -> impl Iterator<Item = &'a str> + 'a {
        self.rows
            .iter()
            .filter_map(move |row| row.get(column).and_then(FieldValue::as_str))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileFormat {
    Fit,
    Gzip,
    Zip,
}

impl FileFormat {
    pub fn from_filename(filename: &str) -> Option<Self> {
        let (_, ext) = filename.rsplit_once('.')?;
        match ext.to_lowercase().as_str() {
            "fit" => Some(FileFormat::Fit),
            "gz" => Some(FileFormat::Gzip),
            "zip" => Some(FileFormat::Zip),
            _ => None,
        }
    }
}
