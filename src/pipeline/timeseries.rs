use std::collections::HashSet;

use chrono::{DateTime, Utc};

use crate::pipeline::zones;
use crate::types::activity::{ActivityTable, RawMessageSet, SampleRow};

/// Builds the per-file table: one row per record (sorted by timestamp), the
/// elapsed time inside its timer segment, and the file's zone strings.
pub fn build(messages: &RawMessageSet) -> ActivityTable {
    let mut rows: Vec<SampleRow> = Vec::with_capacity(messages.records.len());
    let mut untimed = 0usize;

    for record in &messages.records {
        let Some(timestamp) = record.timestamp else {
            untimed += 1;
            continue;
        };
        rows.push(SampleRow {
            timestamp,
            elapsed_time: 0.0,
            fields: record.fields.clone(),
        });
    }

    if untimed > 0 {
        tracing::debug!("Dropped {} records without timestamp", untimed);
    }

    rows.sort_by_key(|row| row.timestamp);

    let starts: HashSet<DateTime<Utc>> = messages
        .events
        .iter()
        .filter(|event| event.is_timer_start())
        .filter_map(|event| event.timestamp)
        .collect();

    assign_elapsed_time(&mut rows, &starts);

    let zones = zones::extract(&messages.hr_zones, &messages.power_zones);

    ActivityTable {
        rows,
        hr_zones: zones.hr_zones,
        power_zones: zones.power_zones,
    }
}

/// A row whose timestamp carries a timer-start marker opens a new segment.
/// Rows before the first marker form an implicit segment starting at the
/// first sample.
fn assign_elapsed_time(rows: &mut [SampleRow], starts: &HashSet<DateTime<Utc>>) {
    let Some(first) = rows.first().map(|row| row.timestamp) else {
        return;
    };

    let mut segment_start = first;
    for row in rows.iter_mut() {
        if starts.contains(&row.timestamp) {
            segment_start = row.timestamp;
        }
        row.elapsed_time = seconds_between(segment_start, row.timestamp);
    }
}

fn seconds_between(from: DateTime<Utc>, to: DateTime<Utc>) -> f64 {
    (to - from).num_milliseconds() as f64 / 1000.0
}
