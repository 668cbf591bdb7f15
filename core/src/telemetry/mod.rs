pub mod stats;

pub use stats::DecodeStats;
