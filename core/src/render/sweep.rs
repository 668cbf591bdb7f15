use crate::geometry::{PolarProjector, RadarGeometry};
use crate::render::canvas::{
    SweepCanvas, TextSize, ALERT_RED, BACKDROP, GRID_GREEN, PANEL_BLACK, SWEEP_GREEN, TEXT_GREEN,
};
use crate::wire::Sample;
use std::f32::consts::PI;

/// Fade strength per frame; at 30 Hz an unrefreshed trail decays to the
/// backdrop over a few seconds. Tunable, not a correctness requirement.
const FADE_ALPHA: f32 = 10.0 / 255.0;

/// Grid ring radii as fractions of the sweep radius.
const RING_FRACTIONS: [f32; 4] = [0.25, 0.5, 0.75, 1.0];

const GUIDE_RAY_DEGREES: [i32; 5] = [30, 60, 90, 120, 150];
const SCALE_TICK_CM: [i32; 4] = [10, 20, 30, 40];
const RIM_LABEL_DEGREES: [i32; 5] = [0, 45, 90, 135, 180];

/// Orchestrates one render pass over the persistence surface: fade, static
/// grid, sweep ray, detection marker, status overlay. Owns the canvas; the
/// host composes it onto the display and presents.
pub struct SweepRenderer<C: SweepCanvas> {
    canvas: C,
    geometry: RadarGeometry,
    projector: PolarProjector,
}

impl<C: SweepCanvas> SweepRenderer<C> {
    pub fn new(canvas: C, geometry: RadarGeometry) -> Self {
        let projector = PolarProjector::new(&geometry);
        Self {
            canvas,
            geometry,
            projector,
        }
    }

    pub fn canvas(&self) -> &C {
        &self.canvas
    }

    pub fn geometry(&self) -> &RadarGeometry {
        &self.geometry
    }

    /// Echo radius in pixels, or `None` when the reading is at or beyond
    /// the detection threshold. This is the sole in/out decision; marker,
    /// status word, and distance readout all follow it.
    pub fn detection(&self, sample: &Sample) -> Option<f32> {
        (sample.distance_cm < self.geometry.detection_threshold_cm)
            .then(|| sample.distance_cm as f32 * self.geometry.px_per_cm)
    }

    pub fn render_frame(&mut self, sample: &Sample) {
        self.fade();
        self.draw_grid();
        self.draw_sweep(sample);
        self.draw_detection(sample);
        self.draw_overlay(sample);
    }

    /// Translucent backdrop pass over the sweep region only; the status bar
    /// below is repainted opaquely each frame.
    fn fade(&mut self) {
        self.canvas.fill_rect(
            0,
            0,
            self.geometry.canvas_width,
            self.geometry.status_bar_y as u32,
            BACKDROP,
            FADE_ALPHA,
        );
    }

    fn draw_grid(&mut self) {
        let radius = self.geometry.sweep_radius_px;
        let (cx, cy) = (self.geometry.center_x, self.geometry.center_y);

        // Screen-space [π, 2π] is the visual upper half once y is flipped.
        for fraction in RING_FRACTIONS {
            self.canvas
                .draw_arc(cx, cy, radius * fraction, PI, 2.0 * PI, GRID_GREEN, 2.0);
        }

        let (bx0, by0) = self.projector.to_screen(-radius, 0.0);
        let (bx1, by1) = self.projector.to_screen(radius, 0.0);
        self.canvas.draw_line(bx0, by0, bx1, by1, GRID_GREEN, 1.0);

        let origin = self.projector.to_screen(0.0, 0.0);
        for deg in GUIDE_RAY_DEGREES {
            let (x, y) = self.projector.project(deg as f32, radius);
            self.canvas
                .draw_line(origin.0, origin.1, x, y, GRID_GREEN, 1.0);
        }
    }

    fn draw_sweep(&mut self, sample: &Sample) {
        let origin = self.projector.to_screen(0.0, 0.0);
        let (x, y) = self
            .projector
            .project(sample.angle_deg as f32, self.geometry.sweep_radius_px);
        self.canvas
            .draw_line(origin.0, origin.1, x, y, SWEEP_GREEN, 2.0);
    }

    fn draw_detection(&mut self, sample: &Sample) {
        let Some(echo_radius) = self.detection(sample) else {
            return;
        };
        let angle = sample.angle_deg as f32;
        let (ex, ey) = self.projector.project(angle, echo_radius);
        let (rx, ry) = self
            .projector
            .project(angle, self.geometry.sweep_radius_px);

        self.canvas.draw_line(ex, ey, rx, ry, ALERT_RED, 3.0);
        self.canvas.fill_circle(ex, ey, 3, ALERT_RED);
    }

    fn draw_overlay(&mut self, sample: &Sample) {
        let width = self.geometry.canvas_width;
        let bar_y = self.geometry.status_bar_y;
        let bar_height = self.geometry.canvas_height - bar_y as u32;
        self.canvas
            .fill_rect(0, bar_y, width, bar_height, PANEL_BLACK, 1.0);
        self.canvas
            .draw_line(0, bar_y, width as i32, bar_y, GRID_GREEN, 1.0);

        self.draw_scale_ticks();

        self.canvas
            .blit_text(5, 5, "RADAR", TextSize::Medium, SWEEP_GREEN);

        let in_range = self.detection(sample).is_some();
        let status = if in_range { "In" } else { "Out" };
        let status_color = if in_range { ALERT_RED } else { TEXT_GREEN };
        self.canvas
            .blit_text(5, bar_y + 5, status, TextSize::Small, status_color);

        let angle_readout = format!("A:{:03}\u{00b0}", sample.angle_deg);
        self.canvas
            .blit_text(5, bar_y + 20, &angle_readout, TextSize::Small, TEXT_GREEN);

        let (distance_readout, distance_color) = if in_range {
            (format!("D:{}cm", sample.distance_cm), ALERT_RED)
        } else {
            ("D:---".to_owned(), TEXT_GREEN)
        };
        self.canvas.blit_text(
            5,
            bar_y + 35,
            &distance_readout,
            TextSize::Small,
            distance_color,
        );

        self.draw_rim_labels();
    }

    fn draw_scale_ticks(&mut self) {
        let cy = self.geometry.center_y;
        for cm in SCALE_TICK_CM {
            let x = self.geometry.center_x + (cm as f32 * self.geometry.px_per_cm) as i32;
            if x >= self.geometry.canvas_width as i32 - 20 {
                continue;
            }
            let label = format!("{cm}");
            self.canvas
                .blit_text(x - 5, cy + 5, &label, TextSize::Small, TEXT_GREEN);
            self.canvas
                .draw_line(x, cy - 3, x, cy + 3, GRID_GREEN, 1.0);
        }
    }

    fn draw_rim_labels(&mut self) {
        let label_radius = self.geometry.sweep_radius_px + 15.0;
        for deg in RIM_LABEL_DEGREES {
            let (x, y) = self.projector.project(deg as f32, label_radius);
            let label = format!("{deg}");
            let half_width = label.len() as i32 * 3;
            self.canvas.blit_text(
                x - half_width,
                y - 4,
                &label,
                TextSize::Small,
                SWEEP_GREEN,
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::recording::{DrawCall, RecordingCanvas};

    fn renderer() -> SweepRenderer<RecordingCanvas> {
        let geometry = RadarGeometry::default();
        let canvas = RecordingCanvas::new(geometry.canvas_width, geometry.canvas_height);
        SweepRenderer::new(canvas, geometry)
    }

    #[test]
    fn detection_gate_is_strict_at_the_threshold() {
        let renderer = renderer();
        assert_eq!(renderer.detection(&Sample::new(90, 40)), None);
        assert_eq!(renderer.detection(&Sample::new(90, 39)), Some(195.0));
    }

    #[test]
    fn frame_starts_with_a_translucent_fade_over_the_sweep_region() {
        let mut renderer = renderer();
        renderer.render_frame(&Sample::new(0, 99));
        match renderer.canvas().calls().first() {
            Some(DrawCall::FillRect { y, h, alpha, color, .. }) => {
                assert_eq!(*y, 0);
                assert_eq!(*h, 235);
                assert!(*alpha < 0.1);
                assert_eq!(*color, BACKDROP);
            }
            other => panic!("expected fade fill first, got {other:?}"),
        }
    }

    #[test]
    fn grid_draws_four_rings_at_quarter_fractions() {
        let mut renderer = renderer();
        renderer.render_frame(&Sample::new(0, 99));
        let radii: Vec<f32> = renderer
            .canvas()
            .calls()
            .iter()
            .filter_map(|call| match call {
                DrawCall::Arc { radius, .. } => Some(*radius),
                _ => None,
            })
            .collect();
        assert_eq!(radii, vec![50.0, 100.0, 150.0, 200.0]);
    }

    #[test]
    fn sweep_ray_tracks_the_sample_angle() {
        let mut renderer = renderer();
        renderer.render_frame(&Sample::new(0, 99));
        let found = renderer.canvas().calls().iter().any(|call| {
            matches!(
                call,
                DrawCall::Line { x0: 240, y0: 210, x1: 440, y1: 210, color, .. }
                if *color == SWEEP_GREEN
            )
        });
        assert!(found, "sweep ray from origin to (0°, 200px) expected");
    }

    #[test]
    fn marker_renders_below_threshold_only() {
        let mut detected = renderer();
        detected.render_frame(&Sample::new(0, 20));
        assert_eq!(detected.canvas().circles().len(), 1);
        match detected.canvas().circles()[0] {
            DrawCall::Circle { cx, cy, color, .. } => {
                assert_eq!((*cx, *cy), (340, 210));
                assert_eq!(*color, ALERT_RED);
            }
            _ => unreachable!(),
        }

        let mut clear = renderer();
        clear.render_frame(&Sample::new(0, 40));
        assert!(clear.canvas().circles().is_empty());
    }

    #[test]
    fn overlay_reports_an_in_range_reading() {
        let mut renderer = renderer();
        renderer.render_frame(&Sample::new(45, 12));
        let texts = renderer.canvas().texts();
        assert!(texts.contains(&"RADAR"));
        assert!(texts.contains(&"In"));
        assert!(texts.contains(&"A:045\u{00b0}"));
        assert!(texts.contains(&"D:12cm"));
    }

    #[test]
    fn overlay_masks_the_distance_when_out_of_range() {
        let mut renderer = renderer();
        renderer.render_frame(&Sample::new(170, 88));
        let texts = renderer.canvas().texts();
        assert!(texts.contains(&"Out"));
        assert!(texts.contains(&"A:170\u{00b0}"));
        assert!(texts.contains(&"D:---"));
    }

    #[test]
    fn rim_labels_cover_the_sweep_span() {
        let mut renderer = renderer();
        renderer.render_frame(&Sample::new(0, 99));
        let texts = renderer.canvas().texts();
        for label in ["0", "45", "90", "135", "180"] {
            assert!(texts.contains(&label), "missing rim label {label}");
        }
    }
}
