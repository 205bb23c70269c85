use std::sync::Arc;

use crate::config::Config;
use crate::pipeline::decode::{Decoder, FitDecoder};
use crate::store::{Destination, SqliteDestination};

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub decoder: Arc<dyn Decoder>,
    pub destination: Arc<dyn Destination>,
}

impl AppState {
    pub fn new(config: Config) -> Self {
        let destination = SqliteDestination::new(&config.database_path);
        Self::with_parts(config, Arc::new(FitDecoder), Arc::new(destination))
    }

    pub fn with_parts(
        config: Config,
        decoder: Arc<dyn Decoder>,
        destination: Arc<dyn Destination>,
    ) -> Self {
        Self {
            config: Arc::new(config),
            decoder,
            destination,
        }
    }
}
