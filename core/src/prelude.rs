pub use crate::geometry::{PolarProjector, RadarGeometry, DETECTION_THRESHOLD_CM};
pub use crate::render::{Color, SweepCanvas, SweepRenderer, TextSize};
pub use crate::telemetry::DecodeStats;
pub use crate::wire::{DecodeError, FrameDecoder, Sample, SampleStore};
