mod memory;
mod sqlite;

pub use memory::MemoryDestination;
pub use sqlite::SqliteDestination;

use crate::error::PersistenceError;
use crate::schema::ColumnSpec;
use crate::types::workout::Cell;

/// Columns every destination table is keyed on.
pub const KEY_COLUMNS: [&str; 2] = ["workout_id", "timestamp"];

/// Rows for one destination table, ordered like `columns`.
pub struct UpsertBatch<'a> {
    pub table: &'a str,
    pub columns: &'a [ColumnSpec],
    pub rows: &'a [Vec<Cell>],
}

impl UpsertBatch<'_> {
    pub fn key_positions(&self) -> Result<[usize; 2], PersistenceError> {
        let mut positions = [0usize; 2];
        for (slot, key) in positions.iter_mut().zip(KEY_COLUMNS) {
            *slot = self
                .columns
                .iter()
                .position(|c| c.name == key)
                .ok_or_else(|| PersistenceError::MissingKey {
                    table: self.table.to_string(),
                    column: key,
                })?;
        }
        Ok(positions)
    }
}

/// Durable sink for normalised rows. Rows sharing (`workout_id`, `timestamp`)
/// with an existing row overwrite it. A failed call leaves nothing behind.
pub trait Destination: Send + Sync {
    fn upsert(&self, batch: &UpsertBatch<'_>) -> Result<usize, PersistenceError>;
}
