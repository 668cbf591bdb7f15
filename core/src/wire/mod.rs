pub mod decoder;
pub mod sample;

pub use decoder::{DecodeError, FrameDecoder, TERMINATOR};
pub use sample::{Sample, SampleStore};
