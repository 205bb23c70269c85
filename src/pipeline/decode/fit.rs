use std::collections::BTreeMap;

use chrono::Utc;
use fitparser::profile::MesgNum;
use fitparser::{FitDataField, FitDataRecord, Value};

use crate::error::DecodeError;
use crate::pipeline::decode::Decoder;
use crate::types::activity::{
    EventMessage, FieldValue, RawMessageSet, RecordMessage, SportMessage, ZoneMessage,
};

pub struct FitDecoder;

impl Decoder for FitDecoder {
    fn decode(&self, bytes: &[u8]) -> Result<RawMessageSet, DecodeError> {
        let data = fitparser::from_bytes(bytes)
            .map_err(|e| DecodeError::InvalidFit(format!("Failed to parse FIT file: {}", e)))?;

        let mut messages = RawMessageSet::default();

        for record in data {
            match record.kind() {
                MesgNum::Record => messages.records.push(record_message(&record)),
                MesgNum::Event => messages.events.push(event_message(&record)),
                MesgNum::HrZone => {
                    if let Some(high) = field_value(&record, "high_bpm") {
                        messages.hr_zones.push(ZoneMessage { high });
                    }
                }
                MesgNum::PowerZone => {
                    if let Some(high) = field_value(&record, "high_value") {
                        messages.power_zones.push(ZoneMessage { high });
                    }
                }
                MesgNum::Sport => messages.sports.push(SportMessage {
                    sport: field_text(&record, "sport"),
                    sub_sport: field_text(&record, "sub_sport"),
                }),
                _ => {}
            }
        }

        tracing::debug!(
            "Decoded {} records, {} events, {} sport messages",
            messages.records.len(),
            messages.events.len(),
            messages.sports.len()
        );

        Ok(messages)
    }
}

fn record_message(record: &FitDataRecord) -> RecordMessage {
    let mut timestamp = None;
    let mut fields = BTreeMap::new();

    for field in record.fields() {
        match (field.name(), field.value()) {
            ("timestamp", Value::Timestamp(ts)) => {
                timestamp = Some(ts.with_timezone(&Utc));
            }
            ("position_lat" | "position_long", Value::SInt32(val)) => {
                fields.insert(
                    field.name().to_string(),
                    FieldValue::Float(semicircles_to_degrees(*val)),
                );
            }
            _ => {
                if let Some(value) = convert(field.value()) {
                    fields.insert(field.name().to_string(), value);
                }
            }
        }
    }

    RecordMessage { timestamp, fields }
}

fn event_message(record: &FitDataRecord) -> EventMessage {
    let timestamp = record.fields().iter().find_map(|field| match field.value() {
        Value::Timestamp(ts) if field.name() == "timestamp" => Some(ts.with_timezone(&Utc)),
        _ => None,
    });

    EventMessage {
        timestamp,
        event: field_text(record, "event"),
        event_type: field_text(record, "event_type"),
        timer_trigger: field_text(record, "timer_trigger"),
    }
}

fn find_field<'a>(record: &'a FitDataRecord, name: &str) -> Option<&'a FitDataField> {
    record.fields().iter().find(|field| field.name() == name)
}

fn field_value(record: &FitDataRecord, name: &str) -> Option<FieldValue> {
    find_field(record, name).and_then(|field| convert(field.value()))
}

fn field_text(record: &FitDataRecord, name: &str) -> Option<String> {
    find_field(record, name).map(|field| match field.value() {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    })
}

fn convert(value: &Value) -> Option<FieldValue> {
    match value {
        Value::Timestamp(ts) => Some(FieldValue::Timestamp(ts.with_timezone(&Utc))),
        Value::String(s) => Some(FieldValue::Text(s.clone())),
        Value::Float32(v) => Some(FieldValue::Float(*v as f64)),
        Value::Float64(v) => Some(FieldValue::Float(*v)),
        Value::SInt8(v) => Some(FieldValue::Int(*v as i64)),
        Value::UInt8(v) => Some(FieldValue::Int(*v as i64)),
        Value::UInt8z(v) => Some(FieldValue::Int(*v as i64)),
        Value::Byte(v) => Some(FieldValue::Int(*v as i64)),
        Value::SInt16(v) => Some(FieldValue::Int(*v as i64)),
        Value::UInt16(v) => Some(FieldValue::Int(*v as i64)),
        Value::UInt16z(v) => Some(FieldValue::Int(*v as i64)),
        Value::SInt32(v) => Some(FieldValue::Int(*v as i64)),
        Value::UInt32(v) => Some(FieldValue::Int(*v as i64)),
        Value::UInt32z(v) => Some(FieldValue::Int(*v as i64)),
        Value::SInt64(v) => Some(FieldValue::Int(*v)),
        Value::UInt64(v) => i64::try_from(*v).ok().map(FieldValue::Int),
        Value::UInt64z(v) => i64::try_from(*v).ok().map(FieldValue::Int),
        Value::Array(values) => values.iter().find_map(convert),
        _ => None,
    }
}

fn semicircles_to_degrees(semicircles: i32) -> f64 {
    (semicircles as f64) * (180.0 / 2_147_483_648.0)
}
