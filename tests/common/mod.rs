#![allow(dead_code)]

use std::io::Write;
use std::path::PathBuf;
use std::sync::Mutex;

use chrono::{DateTime, Duration, TimeZone, Utc};
use fitstore_rs::config::Config;
use fitstore_rs::error::DecodeError;
use fitstore_rs::pipeline::decode::Decoder;
use fitstore_rs::types::activity::{
    EventMessage, FieldValue, RawMessageSet, RecordMessage, SportMessage, ZoneMessage,
};
use fitstore_rs::types::sport::SportCategory;

/// 2021-03-11T07:30:00Z
pub fn start() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2021, 3, 11, 7, 30, 0).unwrap()
}

pub fn at(seconds: i64) -> DateTime<Utc> {
    start() + Duration::seconds(seconds)
}

pub fn float(v: f64) -> FieldValue {
    FieldValue::Float(v)
}

pub fn int(v: i64) -> FieldValue {
    FieldValue::Int(v)
}

pub fn text(v: &str) -> FieldValue {
    FieldValue::Text(v.to_string())
}

pub fn record(seconds: i64, fields: &[(&str, FieldValue)]) -> RecordMessage {
    fields
        .iter()
        .fold(RecordMessage::at(at(seconds)), |rec, (name, value)| {
            rec.with(name, value.clone())
        })
}

pub fn timer_start(seconds: i64) -> EventMessage {
    EventMessage {
        timestamp: Some(at(seconds)),
        event: Some("timer".to_string()),
        event_type: Some("start".to_string()),
        timer_trigger: Some("manual".to_string()),
    }
}

pub fn timer_stop(seconds: i64) -> EventMessage {
    EventMessage {
        timestamp: Some(at(seconds)),
        event: Some("timer".to_string()),
        event_type: Some("stop_all".to_string()),
        timer_trigger: Some("manual".to_string()),
    }
}

pub fn zones(values: &[i64]) -> Vec<ZoneMessage> {
    values
        .iter()
        .map(|v| ZoneMessage { high: int(*v) })
        .collect()
}

/// An indoor ride: three distinct timestamps, the second one recorded twice
/// with heart rate 120 and 130.
pub fn indoor_ride() -> RawMessageSet {
    RawMessageSet {
        records: vec![
            record(0, &[("heart_rate", int(110)), ("power", int(180)), ("cadence", int(85))]),
            record(1, &[("heart_rate", int(120)), ("power", int(190)), ("cadence", int(86))]),
            record(1, &[("heart_rate", int(130)), ("power", int(185)), ("cadence", int(87))]),
            record(2, &[("heart_rate", int(125)), ("power", int(200)), ("cadence", int(88))]),
        ],
        events: vec![timer_start(0)],
        hr_zones: zones(&[120, 140, 160]),
        power_zones: zones(&[150, 200, 250]),
        sports: vec![SportMessage::new("cycling", "indoor_cycling")],
    }
}

/// An outdoor ride without any sport metadata.
pub fn anonymous_ride() -> RawMessageSet {
    let records = (0..5)
        .map(|i| {
            record(
                i,
                &[
                    ("distance", float(1250.0 * i as f64)),
                    ("power", int(if i == 2 { 250 } else { 200 })),
                    ("speed", float(8.5)),
                    ("position_lat", float(47.3)),
                    ("position_long", float(8.5)),
                ],
            )
        })
        .collect();

    RawMessageSet {
        records,
        events: vec![timer_start(0)],
        ..RawMessageSet::default()
    }
}

pub fn test_config() -> Config {
    Config {
        port: 0,
        max_file_size: 25 * 1024 * 1024,
        database_path: PathBuf::from("unused.db"),
        persistence_enabled: true,
        use_test_tables: false,
        debug_dump_dir: None,
        persist_sports: SportCategory::ALL
            .iter()
            .map(|c| c.as_str().to_string())
            .collect(),
    }
}

pub fn all_sports() -> Vec<String> {
    test_config().persist_sports
}

/// Decoder stand-in: the payload names a prepared message set, anything
/// unknown is a decode error.
pub struct StubDecoder {
    sets: Vec<(&'static str, RawMessageSet)>,
    seen: Mutex<Vec<String>>,
}

impl StubDecoder {
    pub fn new(sets: Vec<(&'static str, RawMessageSet)>) -> Self {
        Self {
            sets,
            seen: Mutex::new(Vec::new()),
        }
    }

    pub fn seen(&self) -> Vec<String> {
        self.seen.lock().unwrap().clone()
    }
}

impl Decoder for StubDecoder {
    fn decode(&self, bytes: &[u8]) -> Result<RawMessageSet, DecodeError> {
        let key = String::from_utf8_lossy(bytes).to_string();
        self.seen.lock().unwrap().push(key.clone());
        self.sets
            .iter()
            .find(|(name, _)| *name == key)
            .map(|(_, set)| set.clone())
            .ok_or_else(|| DecodeError::InvalidFit(format!("unknown payload {}", key)))
    }
}

pub fn gzip(bytes: &[u8]) -> Vec<u8> {
    let mut encoder = flate2::write::GzEncoder::new(Vec::new(), flate2::Compression::default());
    encoder.write_all(bytes).unwrap();
    encoder.finish().unwrap()
}

pub fn zip_of(members: &[(&str, Vec<u8>)]) -> Vec<u8> {
    let mut writer = zip::ZipWriter::new(std::io::Cursor::new(Vec::new()));
    for (name, bytes) in members {
        writer
            .start_file(*name, zip::write::SimpleFileOptions::default())
            .unwrap();
        writer.write_all(bytes).unwrap();
    }
    writer.finish().unwrap().into_inner()
}

/// Zip with every member stored uncompressed, so member data sits verbatim
/// in the archive.
pub fn stored_zip_of(members: &[(&str, Vec<u8>)]) -> Vec<u8> {
    let options =
        zip::write::SimpleFileOptions::default().compression_method(zip::CompressionMethod::Stored);
    let mut writer = zip::ZipWriter::new(std::io::Cursor::new(Vec::new()));
    for (name, bytes) in members {
        writer.start_file(*name, options).unwrap();
        writer.write_all(bytes).unwrap();
    }
    writer.finish().unwrap().into_inner()
}

const LOCAL_HEADER: [u8; 4] = [0x50, 0x4b, 0x03, 0x04];
const CENTRAL_HEADER: [u8; 4] = [0x50, 0x4b, 0x01, 0x02];

fn read_u16(bytes: &[u8], at: usize) -> usize {
    u16::from_le_bytes([bytes[at], bytes[at + 1]]) as usize
}

/// Offsets of the headers with `signature` whose file name is `name`.
/// `name_len_at` and `name_at` are relative to the signature.
fn headers_for(
    bytes: &[u8],
    signature: [u8; 4],
    name_len_at: usize,
    name_at: usize,
    name: &str,
) -> Vec<usize> {
    (0..bytes.len().saturating_sub(name_at))
        .filter(|&i| bytes[i..i + 4] == signature)
        .filter(|&i| {
            let len = read_u16(bytes, i + name_len_at);
            bytes.get(i + name_at..i + name_at + len) == Some(name.as_bytes())
        })
        .collect()
}

/// Rewrites the compression method recorded for `name` in both the local
/// and the central directory header.
pub fn set_compression_method(bytes: &mut [u8], name: &str, method: u16) {
    let locals = headers_for(bytes, LOCAL_HEADER, 26, 30, name);
    let centrals = headers_for(bytes, CENTRAL_HEADER, 28, 46, name);
    assert_eq!((locals.len(), centrals.len()), (1, 1), "member {name} not found");
    bytes[locals[0] + 8..locals[0] + 10].copy_from_slice(&method.to_le_bytes());
    bytes[centrals[0] + 10..centrals[0] + 12].copy_from_slice(&method.to_le_bytes());
}

/// Flips the first data byte of a stored member so its CRC no longer matches.
pub fn corrupt_member_data(bytes: &mut [u8], name: &str) {
    let locals = headers_for(bytes, LOCAL_HEADER, 26, 30, name);
    assert_eq!(locals.len(), 1, "member {name} not found");
    let header = locals[0];
    let data = header + 30 + read_u16(bytes, header + 26) + read_u16(bytes, header + 28);
    bytes[data] ^= 0xff;
}
