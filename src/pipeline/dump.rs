use std::fs::OpenOptions;
use std::path::{Path, PathBuf};

use crate::pipeline::persist::project;
use crate::types::workout::{NormalizedTable, Workout};

/// Appends the table to `<dir>/<category>.csv`. Best effort: failures are
/// logged and swallowed.
pub fn append(dir: &Path, table: &NormalizedTable, workout: &Workout) {
    if let Err(err) = write_csv(dir, table, workout) {
        tracing::warn!("Debug dump for {} failed: {}", table.category, err);
    }
}

pub fn dump_path(dir: &Path, table: &NormalizedTable) -> PathBuf {
    dir.join(format!("{}.csv", table.category))
}

fn write_csv(dir: &Path, table: &NormalizedTable, workout: &Workout) -> Result<(), csv::Error> {
    std::fs::create_dir_all(dir)?;
    let path = dump_path(dir, table);
    let is_new = !path.is_file();

    let file = OpenOptions::new().create(true).append(true).open(&path)?;
    let mut writer = csv::Writer::from_writer(file);

    if is_new {
        writer.write_record(table.schema().column_names())?;
    }
    for row in project(table, workout) {
        writer.write_record(row.iter().map(|cell| cell.to_string()))?;
    }
    writer.flush()?;
    Ok(())
}
