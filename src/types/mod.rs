pub mod activity;
pub mod sport;
pub mod workout;
