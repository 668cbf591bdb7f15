use crate::render::canvas::{Color, SweepCanvas, TextSize};

/// One recorded canvas call.
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCall {
    FillRect {
        x: i32,
        y: i32,
        w: u32,
        h: u32,
        color: Color,
        alpha: f32,
    },
    Line {
        x0: i32,
        y0: i32,
        x1: i32,
        y1: i32,
        color: Color,
        width: f32,
    },
    Arc {
        cx: i32,
        cy: i32,
        radius: f32,
        start_rad: f32,
        end_rad: f32,
        color: Color,
        thickness: f32,
    },
    Circle {
        cx: i32,
        cy: i32,
        radius: i32,
        color: Color,
    },
    Text {
        x: i32,
        y: i32,
        text: String,
        size: TextSize,
        color: Color,
    },
}

/// Canvas double that records every call instead of rasterizing, so the
/// renderer's drawing decisions are assertable without a graphics backend.
#[derive(Debug)]
pub struct RecordingCanvas {
    width: u32,
    height: u32,
    calls: Vec<DrawCall>,
}

impl RecordingCanvas {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            calls: Vec::new(),
        }
    }

    pub fn calls(&self) -> &[DrawCall] {
        &self.calls
    }

    pub fn texts(&self) -> Vec<&str> {
        self.calls
            .iter()
            .filter_map(|call| match call {
                DrawCall::Text { text, .. } => Some(text.as_str()),
                _ => None,
            })
            .collect()
    }

    pub fn circles(&self) -> Vec<&DrawCall> {
        self.calls
            .iter()
            .filter(|call| matches!(call, DrawCall::Circle { .. }))
            .collect()
    }

    pub fn clear(&mut self) {
        self.calls.clear();
    }
}

impl SweepCanvas for RecordingCanvas {
    fn width(&self) -> u32 {
        self.width
    }

    fn height(&self) -> u32 {
        self.height
    }

    fn fill_rect(&mut self, x: i32, y: i32, w: u32, h: u32, color: Color, alpha: f32) {
        self.calls.push(DrawCall::FillRect {
            x,
            y,
            w,
            h,
            color,
            alpha,
        });
    }

    fn draw_line(&mut self, x0: i32, y0: i32, x1: i32, y1: i32, color: Color, width: f32) {
        self.calls.push(DrawCall::Line {
            x0,
            y0,
            x1,
            y1,
            color,
            width,
        });
    }

    fn draw_arc(
        &mut self,
        cx: i32,
        cy: i32,
        radius: f32,
        start_rad: f32,
        end_rad: f32,
        color: Color,
        thickness: f32,
    ) {
        self.calls.push(DrawCall::Arc {
            cx,
            cy,
            radius,
            start_rad,
            end_rad,
            color,
            thickness,
        });
    }

    fn fill_circle(&mut self, cx: i32, cy: i32, radius: i32, color: Color) {
        self.calls.push(DrawCall::Circle {
            cx,
            cy,
            radius,
            color,
        });
    }

    fn blit_text(&mut self, x: i32, y: i32, text: &str, size: TextSize, color: Color) {
        self.calls.push(DrawCall::Text {
            x,
            y,
            text: text.to_owned(),
            size,
            color,
        });
    }
}
