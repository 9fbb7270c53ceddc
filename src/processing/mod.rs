pub mod capacity_normalizer;
pub mod time_floor;

pub use capacity_normalizer::{normalize, CapacityNormalizer};
pub use time_floor::floor_timestamp;
