//! Decode and rendering core for the serial sweep-radar display.
//!
//! The modules turn the raw serial byte stream into typed (angle, distance)
//! samples and map them onto a persistence-faded radar view through a
//! backend-agnostic canvas capability.

pub mod geometry;
pub mod prelude;
pub mod render;
pub mod telemetry;
pub mod wire;

pub use prelude::{FrameDecoder, SampleStore, SweepRenderer};
