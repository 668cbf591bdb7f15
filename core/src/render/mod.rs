pub mod canvas;
pub mod recording;
pub mod sweep;

pub use canvas::{
    Color, SweepCanvas, TextSize, ALERT_RED, BACKDROP, GRID_GREEN, PANEL_BLACK, SWEEP_GREEN,
    TEXT_GREEN,
};
pub use recording::{DrawCall, RecordingCanvas};
pub use sweep::SweepRenderer;
