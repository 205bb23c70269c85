use std::collections::BTreeMap;

use chrono::{DateTime, Utc};

use crate::schema::{CategorySchema, ColumnKind, MIN_RECORDED_VALUES};
use crate::types::activity::{ActivityTable, FieldValue, SampleRow};
use crate::types::sport::SportCategory;
use crate::types::workout::{NormalizedRow, NormalizedTable};

/// Reduces a table to the category's columns: prunes sparse rows when the
/// category asks for it, coerces and fills every measure, then collapses
/// duplicate timestamps.
pub fn normalize(category: SportCategory, table: &ActivityTable) -> NormalizedTable {
    let schema = CategorySchema::for_category(category);

    let kept: Vec<&SampleRow> = if schema.prune_sparse {
        let kept: Vec<&SampleRow> = table
            .rows
            .iter()
            .filter(|row| row.recorded_values() >= MIN_RECORDED_VALUES)
            .collect();
        if kept.len() < table.rows.len() {
            tracing::debug!("Pruned {} sparse rows", table.rows.len() - kept.len());
        }
        kept
    } else {
        table.rows.iter().collect()
    };

    for spec in schema.measures() {
        if !table.has_column(spec.name) {
            tracing::debug!("Data has no value for {}, filling default", spec.name);
        }
    }

    let rows = kept.into_iter().map(|row| project_row(schema, row)).collect();

    NormalizedTable {
        category,
        hr_zones: table.hr_zones.clone(),
        power_zones: table.power_zones.clone(),
        rows: dedup_max(rows),
    }
}

fn project_row(schema: &CategorySchema, row: &SampleRow) -> NormalizedRow {
    let measures = schema
        .measures()
        .map(|spec| {
            let ColumnKind::Measure { default } = spec.kind else {
                return 0.0;
            };
            row.get(spec.name)
                .and_then(FieldValue::as_f64)
                .unwrap_or(default)
        })
        .collect();

    NormalizedRow {
        timestamp: row.timestamp,
        elapsed_time: row.elapsed_time,
        measures,
    }
}

/// Groups rows by timestamp, keeping the per-column maximum. Output is
/// ordered by timestamp.
pub fn dedup_max(rows: Vec<NormalizedRow>) -> Vec<NormalizedRow> {
    let mut grouped: BTreeMap<DateTime<Utc>, NormalizedRow> = BTreeMap::new();

    for row in rows {
        match grouped.get_mut(&row.timestamp) {
            Some(existing) => {
                existing.elapsed_time = existing.elapsed_time.max(row.elapsed_time);
                for (current, candidate) in existing.measures.iter_mut().zip(&row.measures) {
                    *current = current.max(*candidate);
                }
            }
            None => {
                grouped.insert(row.timestamp, row);
            }
        }
    }

    grouped.into_values().collect()
}
