use std::path::{Path, PathBuf};

use rusqlite::types::{ToSql, ToSqlOutput};
use rusqlite::{params_from_iter, Connection};

use crate::error::PersistenceError;
use crate::store::{Destination, UpsertBatch, KEY_COLUMNS};
use crate::types::workout::Cell;

/// SQLite-backed destination. A connection is opened per batch and dropped
/// before `upsert` returns, whatever the outcome.
pub struct SqliteDestination {
    path: PathBuf,
}

impl SqliteDestination {
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }
}

impl Destination for SqliteDestination {
    fn upsert(&self, batch: &UpsertBatch<'_>) -> Result<usize, PersistenceError> {
        batch.key_positions()?;

        let mut conn = Connection::open(&self.path)?;
        conn.execute_batch(&create_table_sql(batch))?;

        let sql = upsert_sql(batch);
        tracing::info!("Saving data to: {} ({})", batch.table, sql);

        // Dropping an uncommitted transaction rolls it back.
        let tx = conn.transaction()?;
        {
            let mut stmt = tx.prepare(&sql)?;
            for row in batch.rows {
                stmt.execute(params_from_iter(row.iter()))?;
            }
        }
        tx.commit()?;

        Ok(batch.rows.len())
    }
}

fn create_table_sql(batch: &UpsertBatch<'_>) -> String {
    let columns = batch
        .columns
        .iter()
        .map(|c| format!("\"{}\" {}", c.name, c.sql_type()))
        .collect::<Vec<_>>()
        .join(", ");
    let key = KEY_COLUMNS
        .iter()
        .map(|k| format!("\"{}\"", k))
        .collect::<Vec<_>>()
        .join(", ");
    format!(
        "CREATE TABLE IF NOT EXISTS \"{}\" ({}, PRIMARY KEY ({}));",
        batch.table, columns, key
    )
}

fn upsert_sql(batch: &UpsertBatch<'_>) -> String {
    let names = batch
        .columns
        .iter()
        .map(|c| format!("\"{}\"", c.name))
        .collect::<Vec<_>>()
        .join(", ");
    let placeholders = vec!["?"; batch.columns.len()].join(", ");
    format!(
        "INSERT OR REPLACE INTO \"{}\" ({}) VALUES ({})",
        batch.table, names, placeholders
    )
}

impl ToSql for Cell {
    fn to_sql(&self) -> rusqlite::Result<ToSqlOutput<'_>> {
        Ok(match self {
            Cell::Int(v) => ToSqlOutput::from(*v),
            Cell::Float(v) => ToSqlOutput::from(*v),
            Cell::Text(s) => ToSqlOutput::from(s.as_str()),
            Cell::Date(_) | Cell::Timestamp(_) => ToSqlOutput::from(self.to_string()),
        })
    }
}
