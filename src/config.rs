use std::path::PathBuf;

use crate::types::sport::SportCategory;

#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub max_file_size: usize,
    pub database_path: PathBuf,
    /// When false the pipeline runs to the end but nothing is written.
    pub persistence_enabled: bool,
    /// Route writes to the `_TEST` twin of every category table.
    pub use_test_tables: bool,
    pub debug_dump_dir: Option<PathBuf>,
    /// Categories persisted when an upload does not name any.
    pub persist_sports: Vec<String>,
}

impl Config {
    pub fn from_env() -> Self {
        let port = std::env::var("PORT")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(3000);

        let max_file_size_mb = std::env::var("MAX_FILE_SIZE_MB")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(25);

        let database_path = std::env::var("DATABASE_PATH")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("fitstore.db"));

        let persistence_enabled = env_flag("PERSISTENCE_ENABLED").unwrap_or(true);
        let use_test_tables = env_flag("USE_TEST_TABLES").unwrap_or(false);

        let debug_dump_dir = std::env::var("DEBUG_DUMP_DIR")
            .ok()
            .filter(|s| !s.trim().is_empty())
            .map(PathBuf::from);

        let persist_sports = std::env::var("PERSIST_SPORTS")
            .ok()
            .map(|s| parse_list(&s))
            .filter(|list| !list.is_empty())
            .unwrap_or_else(default_sports);

        Self {
            port,
            max_file_size: max_file_size_mb * 1024 * 1024,
            database_path,
            persistence_enabled,
            use_test_tables,
            debug_dump_dir,
            persist_sports,
        }
    }
}

fn env_flag(key: &str) -> Option<bool> {
    let value = std::env::var(key).ok()?;
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

fn parse_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

fn default_sports() -> Vec<String> {
    [
        SportCategory::CyclingIndoor,
        SportCategory::CyclingOutdoor,
        SportCategory::Running,
        SportCategory::SwimmingPool,
        SportCategory::SwimmingOpenWater,
    ]
    .iter()
    .map(|c| c.as_str().to_string())
    .collect()
}
