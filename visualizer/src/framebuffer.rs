use embedded_graphics::{
    draw_target::DrawTarget,
    geometry::{OriginDimensions, Point, Size},
    mono_font::{
        ascii::{FONT_5X8, FONT_6X10},
        MonoTextStyle,
    },
    pixelcolor::{Rgb888, RgbColor},
    text::{Baseline, Text},
    Drawable, Pixel,
};
use std::f32::consts::PI;
use sweepcore::render::{Color, SweepCanvas, TextSize, BACKDROP};

/// Persistent RGBA raster backing the persistence surface.
///
/// Contents carry over between frames; the renderer's translucent fade pass
/// is what ages them. Blits straight into a `pixels` frame of the same size.
pub struct FrameCanvas {
    width: u32,
    height: u32,
    buf: Vec<u8>,
}

impl FrameCanvas {
    pub fn new(width: u32, height: u32) -> Self {
        let mut canvas = Self {
            width,
            height,
            buf: vec![0; (width * height * 4) as usize],
        };
        canvas.fill_rect(0, 0, width, height, BACKDROP, 1.0);
        canvas
    }

    pub fn data(&self) -> &[u8] {
        &self.buf
    }

    fn blend_pixel(&mut self, x: i32, y: i32, color: Color, alpha: f32) {
        if x < 0 || y < 0 || x >= self.width as i32 || y >= self.height as i32 {
            return;
        }
        let idx = ((y as u32 * self.width + x as u32) * 4) as usize;
        let a = alpha.clamp(0.0, 1.0);
        let blend = |src: u8, dst: u8| (src as f32 * a + dst as f32 * (1.0 - a)).round() as u8;
        self.buf[idx] = blend(color.r, self.buf[idx]);
        self.buf[idx + 1] = blend(color.g, self.buf[idx + 1]);
        self.buf[idx + 2] = blend(color.b, self.buf[idx + 2]);
        self.buf[idx + 3] = 0xff;
    }

    #[cfg(test)]
    fn rgb_at(&self, x: u32, y: u32) -> (u8, u8, u8) {
        let idx = ((y * self.width + x) * 4) as usize;
        (self.buf[idx], self.buf[idx + 1], self.buf[idx + 2])
    }
}

impl SweepCanvas for FrameCanvas {
    fn width(&self) -> u32 {
        self.width
    }

    fn height(&self) -> u32 {
        self.height
    }

    fn fill_rect(&mut self, x: i32, y: i32, w: u32, h: u32, color: Color, alpha: f32) {
        let x0 = x.max(0);
        let y0 = y.max(0);
        let x1 = (x + w as i32).min(self.width as i32);
        let y1 = (y + h as i32).min(self.height as i32);
        for py in y0..y1 {
            for px in x0..x1 {
                self.blend_pixel(px, py, color, alpha);
            }
        }
    }

    fn draw_line(&mut self, x0: i32, y0: i32, x1: i32, y1: i32, color: Color, width: f32) {
        let pad = width.ceil() as i32 + 1;
        let dx = (x1 - x0) as f32;
        let dy = (y1 - y0) as f32;
        let len_sq = dx * dx + dy * dy;
        for y in (y0.min(y1) - pad)..=(y0.max(y1) + pad) {
            for x in (x0.min(x1) - pad)..=(x0.max(x1) + pad) {
                let px = (x - x0) as f32;
                let py = (y - y0) as f32;
                let t = if len_sq > 0.0 {
                    ((px * dx + py * dy) / len_sq).clamp(0.0, 1.0)
                } else {
                    0.0
                };
                let lx = x0 as f32 + t * dx;
                let ly = y0 as f32 + t * dy;
                let dist = ((lx - x as f32).powi(2) + (ly - y as f32).powi(2)).sqrt();
                let aa = (1.0 - (dist - width / 2.0).clamp(0.0, 1.0)).clamp(0.0, 1.0);
                if aa > 0.01 {
                    self.blend_pixel(x, y, color, aa);
                }
            }
        }
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
        let tau = 2.0 * PI;
        let span = (end_rad - start_rad).clamp(0.0, tau);
        let start = start_rad.rem_euclid(tau);
        let inner = radius - thickness;
        let ext = (radius + thickness).ceil() as i32 + 1;

        for y in (cy - ext)..=(cy + ext) {
            for x in (cx - ext)..=(cx + ext) {
                let dx = (x - cx) as f32;
                let dy = (y - cy) as f32;
                let dist = (dx * dx + dy * dy).sqrt();
                if dist < inner - 1.0 || dist > radius + 1.0 {
                    continue;
                }
                let angle = dy.atan2(dx).rem_euclid(tau);
                if (angle - start).rem_euclid(tau) > span {
                    continue;
                }
                let aa = if dist > radius {
                    1.0 - (dist - radius).min(1.0)
                } else if dist < inner {
                    1.0 - (inner - dist).min(1.0)
                } else {
                    1.0
                };
                if aa > 0.0 {
                    self.blend_pixel(x, y, color, aa);
                }
            }
        }
    }

    fn fill_circle(&mut self, cx: i32, cy: i32, radius: i32, color: Color) {
        let r = radius as f32;
        for dy in -radius..=radius {
            for dx in -radius..=radius {
                let dist = ((dx * dx + dy * dy) as f32).sqrt();
                if dist > r + 1.0 {
                    continue;
                }
                let aa = if dist > r { 1.0 - (dist - r).min(1.0) } else { 1.0 };
                if aa > 0.0 {
                    self.blend_pixel(cx + dx, cy + dy, color, aa);
                }
            }
        }
    }

    fn blit_text(&mut self, x: i32, y: i32, text: &str, size: TextSize, color: Color) {
        let fill = Rgb888::new(color.r, color.g, color.b);
        let position = Point::new(x, y);
        let _ = match size {
            TextSize::Small => Text::with_baseline(
                text,
                position,
                MonoTextStyle::new(&FONT_5X8, fill),
                Baseline::Top,
            )
            .draw(self),
            TextSize::Medium => Text::with_baseline(
                text,
                position,
                MonoTextStyle::new(&FONT_6X10, fill),
                Baseline::Top,
            )
            .draw(self),
        };
    }
}

impl OriginDimensions for FrameCanvas {
    fn size(&self) -> Size {
        Size::new(self.width, self.height)
    }
}

impl DrawTarget for FrameCanvas {
    type Color = Rgb888;
    type Error = std::convert::Infallible;

    fn draw_iter<I>(&mut self, pixels: I) -> Result<(), Self::Error>
    where
        I: IntoIterator<Item = Pixel<Self::Color>>,
    {
        for Pixel(point, color) in pixels {
            self.blend_pixel(
                point.x,
                point.y,
                Color::new(color.r(), color.g(), color.b()),
                1.0,
            );
        }
        Ok(())
    }
}
