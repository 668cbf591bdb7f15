use serde::{Deserialize, Serialize};

/// Distance at and beyond which a reading counts as "no object".
pub const DETECTION_THRESHOLD_CM: i32 = 40;

/// Fixed display geometry for the 480x320 reference panel.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RadarGeometry {
    pub canvas_width: u32,
    pub canvas_height: u32,
    pub center_x: i32,
    pub center_y: i32,
    pub sweep_radius_px: f32,
    pub px_per_cm: f32,
    pub detection_threshold_cm: i32,
    /// Top edge of the opaque status bar; the fade stops here.
    pub status_bar_y: i32,
}

impl Default for RadarGeometry {
    fn default() -> Self {
        Self {
            canvas_width: 480,
            canvas_height: 320,
            center_x: 240,
            center_y: 210,
            sweep_radius_px: 200.0,
            px_per_cm: 5.0,
            detection_threshold_cm: DETECTION_THRESHOLD_CM,
            status_bar_y: 235,
        }
    }
}

/// Pure mapper from sensor-local polar space to device pixels.
///
/// Sensor-local space has its origin at the radar pivot, angles measured
/// from the positive x-axis and y growing upward; `to_screen` applies the
/// y-flip into the y-down pixel grid and truncates. Projections are defined
/// for angles in [0, 180] degrees; values outside that range extrapolate
/// geometrically without rejection.
#[derive(Debug, Clone, Copy)]
pub struct PolarProjector {
    cx: f32,
    cy: f32,
}

impl PolarProjector {
    pub fn new(geometry: &RadarGeometry) -> Self {
        Self {
            cx: geometry.center_x as f32,
            cy: geometry.center_y as f32,
        }
    }

    pub fn polar_to_local(&self, angle_deg: f32, radius: f32) -> (f32, f32) {
        let rad = angle_deg.to_radians();
        (radius * rad.cos(), radius * rad.sin())
    }

    pub fn to_screen(&self, x_local: f32, y_local: f32) -> (i32, i32) {
        ((self.cx + x_local) as i32, (self.cy - y_local) as i32)
    }

    /// `to_screen` composed over `polar_to_local`.
    pub fn project(&self, angle_deg: f32, radius: f32) -> (i32, i32) {
        let (x, y) = self.polar_to_local(angle_deg, radius);
        self.to_screen(x, y)
    }
}
