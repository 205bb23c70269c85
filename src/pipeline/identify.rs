use chrono::{DateTime, Datelike, Timelike, Utc};

use crate::error::FileRejected;
use crate::types::workout::{NormalizedTable, Workout};

/// Unix seconds of the FIT epoch (1989-12-31T00:00:00Z); a raw zero FIT
/// timestamp decodes to this instant.
pub const FIT_EPOCH_SECONDS: i64 = 631_065_600;

pub fn identify(table: &NormalizedTable) -> Result<Workout, FileRejected> {
    let start = table
        .rows
        .iter()
        .map(|row| row.timestamp)
        .min()
        .ok_or(FileRejected::NoSamples)?;
    workout_for(start)
}

pub fn workout_for(start: DateTime<Utc>) -> Result<Workout, FileRejected> {
    if is_epoch_zero(start) {
        return Err(FileRejected::ZeroTimestamp);
    }

    let workout_id = i64::from(start.year()) * 100_000_000
        + i64::from(start.month()) * 1_000_000
        + i64::from(start.day()) * 10_000
        + i64::from(start.hour()) * 100
        + i64::from(start.minute());

    Ok(Workout {
        workout_id,
        date: start.date_naive(),
    })
}

fn is_epoch_zero(timestamp: DateTime<Utc>) -> bool {
    let seconds = timestamp.timestamp();
    seconds == 0 || seconds == FIT_EPOCH_SECONDS
}
