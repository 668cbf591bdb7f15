pub mod projector;

pub use projector::{PolarProjector, RadarGeometry, DETECTION_THRESHOLD_CM};
