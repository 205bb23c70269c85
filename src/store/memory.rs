use dashmap::DashMap;

use crate::error::PersistenceError;
use crate::store::{Destination, UpsertBatch};
use crate::types::workout::Cell;

type RowKey = (String, String);

/// In-process destination, one map per table keyed like the real tables.
#[derive(Default)]
pub struct MemoryDestination {
    tables: DashMap<String, DashMap<RowKey, Vec<Cell>>>,
}

impl MemoryDestination {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn row_count(&self, table: &str) -> usize {
        self.tables.get(table).map(|rows| rows.len()).unwrap_or(0)
    }

    /// Rows of `table` sorted by key.
    pub fn rows(&self, table: &str) -> Vec<Vec<Cell>> {
        let Some(rows) = self.tables.get(table) else {
            return Vec::new();
        };
        let mut entries: Vec<(RowKey, Vec<Cell>)> = rows
            .iter()
            .map(|entry| (entry.key().clone(), entry.value().clone()))
            .collect();
        entries.sort_by(|a, b| a.0.cmp(&b.0));
        entries.into_iter().map(|(_, row)| row).collect()
    }

    pub fn table_names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.tables.iter().map(|t| t.key().clone()).collect();
        names.sort();
        names
    }
}

impl Destination for MemoryDestination {
    fn upsert(&self, batch: &UpsertBatch<'_>) -> Result<usize, PersistenceError> {
        let [id_pos, ts_pos] = batch.key_positions()?;

        let mut staged = Vec::with_capacity(batch.rows.len());
        for row in batch.rows {
            let (Some(id), Some(ts)) = (row.get(id_pos), row.get(ts_pos)) else {
                return Err(PersistenceError::Database(format!(
                    "row with {} values does not match {} columns",
                    row.len(),
                    batch.columns.len()
                )));
            };
            staged.push(((id.to_string(), ts.to_string()), row.clone()));
        }

        let table = self.tables.entry(batch.table.to_string()).or_default();
        for (key, row) in staged {
            table.insert(key, row);
        }
        Ok(batch.rows.len())
    }
}
