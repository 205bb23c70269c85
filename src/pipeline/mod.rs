pub mod archive;
pub mod classify;
pub mod decode;
pub mod driver;
pub mod dump;
pub mod identify;
pub mod normalize;
pub mod persist;
pub mod timeseries;
pub mod zones;
