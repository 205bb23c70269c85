mod fit;

pub use fit::FitDecoder;

use crate::error::DecodeError;
use crate::types::activity::RawMessageSet;

/// Turns the bytes of one recording into typed messages.
pub trait Decoder: Send + Sync {
    fn decode(&self, bytes: &[u8]) -> Result<RawMessageSet, DecodeError>;
}
