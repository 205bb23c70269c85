use std::collections::BTreeSet;

use crate::config::Config;
use crate::error::{PersistenceError, UnsupportedCategoryError};
use crate::schema::{CategorySchema, ColumnKind};
use crate::store::{Destination, UpsertBatch};
use crate::types::sport::SportCategory;
use crate::types::workout::{Cell, NormalizedTable, Workout};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PersistOutcome {
    Written { table: &'static str, rows: usize },
    /// Persistence is switched off; nothing left the process.
    Disabled { table: &'static str, rows: usize },
    /// The category is not part of the upload's selection.
    NotSelected,
}

/// Routes normalised tables to their category table.
pub struct Persister<'a> {
    destination: &'a dyn Destination,
    enabled: bool,
    use_test_tables: bool,
    selected: BTreeSet<SportCategory>,
}

impl<'a> Persister<'a> {
    /// Resolves the selected category names up front so an unknown name
    /// aborts before anything is written.
    pub fn new(
        destination: &'a dyn Destination,
        config: &Config,
        selection: &[String],
    ) -> Result<Self, UnsupportedCategoryError> {
        let selected = selection
            .iter()
            .map(|name| name.parse::<SportCategory>())
            .collect::<Result<BTreeSet<_>, _>>()?;

        Ok(Self {
            destination,
            enabled: config.persistence_enabled,
            use_test_tables: config.use_test_tables,
            selected,
        })
    }

    pub fn accepts(&self, category: SportCategory) -> bool {
        self.selected.contains(&category)
    }

    pub fn persist(
        &self,
        table: &NormalizedTable,
        workout: &Workout,
    ) -> Result<PersistOutcome, PersistenceError> {
        if !self.accepts(table.category) {
            return Ok(PersistOutcome::NotSelected);
        }

        let schema = table.schema();
        let target = schema.table_name(self.use_test_tables);
        let rows = project(table, workout);

        if !self.enabled {
            tracing::info!(
                "Persistence disabled, skipping {} rows for {}",
                rows.len(),
                target
            );
            return Ok(PersistOutcome::Disabled {
                table: target,
                rows: rows.len(),
            });
        }

        let written = self.destination.upsert(&UpsertBatch {
            table: target,
            columns: schema.columns,
            rows: &rows,
        })?;

        Ok(PersistOutcome::Written {
            table: target,
            rows: written,
        })
    }
}

/// Lays the table out row by row in its schema's column order.
pub fn project(table: &NormalizedTable, workout: &Workout) -> Vec<Vec<Cell>> {
    let schema: &CategorySchema = table.schema();

    table
        .rows
        .iter()
        .map(|row| {
            let mut measures = row.measures.iter();
            schema
                .columns
                .iter()
                .map(|spec| match spec.kind {
                    ColumnKind::WorkoutId => Cell::Int(workout.workout_id),
                    ColumnKind::Date => Cell::Date(workout.date),
                    ColumnKind::Timestamp => Cell::Timestamp(row.timestamp),
                    ColumnKind::ElapsedTime => Cell::Float(row.elapsed_time),
                    ColumnKind::Measure { default } => {
                        Cell::Float(measures.next().copied().unwrap_or(default))
                    }
                    ColumnKind::HrZones => Cell::Text(table.hr_zones.clone()),
                    ColumnKind::PowerZones => Cell::Text(table.power_zones.clone()),
                })
                .collect()
        })
        .collect()
}
