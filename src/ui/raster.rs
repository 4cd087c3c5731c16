#![allow(
    clippy::cast_possible_truncation,
    clippy::cast_possible_wrap,
    clippy::cast_precision_loss,
    clippy::cast_sign_loss
)]

use crate::domain::visual::Rgb;

/// Opaque RGB pixel buffer that the renderer paints into each frame.
#[derive(Debug, Clone, PartialEq)]
pub struct Surface {
    width: usize,
    height: usize,
    pixels: Vec<Rgb>,
}

impl Surface {
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            pixels: vec![Rgb::BLACK; width * height],
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn pixels(&self) -> &[Rgb] {
        &self.pixels
    }

    pub fn resize(&mut self, width: usize, height: usize) {
        if width == self.width && height == self.height {
            return;
        }
        self.width = width;
        self.height = height;
        self.pixels.clear();
        self.pixels.resize(width * height, Rgb::BLACK);
    }

    pub fn clear(&mut self, color: Rgb) {
        self.pixels.fill(color);
    }

    #[must_use]
    pub fn pixel(&self, x: usize, y: usize) -> Option<Rgb> {
        (x < self.width && y < self.height).then(|| self.pixels[y * self.width + x])
    }

    pub fn set(&mut self, x: usize, y: usize, color: Rgb) {
        if x < self.width && y < self.height {
            self.pixels[y * self.width + x] = color;
        }
    }

    pub fn row_mut(&mut self, y: usize) -> Option<&mut [Rgb]> {
        if y >= self.height {
            return None;
        }
        let start = y * self.width;
        Some(&mut self.pixels[start..start + self.width])
    }

    /// Source-over blend of `color` at `alpha`.
    pub fn blend(&mut self, x: usize, y: usize, color: Rgb, alpha: f32) {
        if let Some(dst) = self.pixel_mut(x, y) {
            *dst = mix(*dst, color, alpha);
        }
    }

    /// Screen blend: lightens only, used for glows.
    pub fn screen(&mut self, x: usize, y: usize, color: Rgb, alpha: f32) {
        if let Some(dst) = self.pixel_mut(x, y) {
            *dst = screen(*dst, color, alpha);
        }
    }

    pub fn blend_all(&mut self, color: Rgb, alpha: f32) {
        if alpha <= 0.0 {
            return;
        }
        for px in &mut self.pixels {
            *px = mix(*px, color, alpha);
        }
    }

    /// Anti-aliased filled circle.
    pub fn fill_disc(&mut self, cx: f32, cy: f32, radius: f32, color: Rgb, alpha: f32) {
        self.for_each_in_radius(cx, cy, radius + 0.5, |surface, x, y, dist| {
            let coverage = (radius + 0.5 - dist).clamp(0.0, 1.0);
            surface.blend(x, y, color, alpha * coverage);
        });
    }

    /// Circle whose alpha follows `falloff(dist / radius)` from centre to edge.
    pub fn fill_radial(
        &mut self,
        cx: f32,
        cy: f32,
        radius: f32,
        color: Rgb,
        falloff: impl Fn(f32) -> f32,
    ) {
        if radius <= 0.0 {
            return;
        }
        self.for_each_in_radius(cx, cy, radius, |surface, x, y, dist| {
            let a = falloff(dist / radius);
            if a > 0.0 {
                surface.blend(x, y, color, a);
            }
        });
    }

    /// Round-capped line segment of the given width.
    pub fn stroke_line(
        &mut self,
        (x0, y0): (f32, f32),
        (x1, y1): (f32, f32),
        width: f32,
        color: Rgb,
        alpha: f32,
    ) {
        let half = (width * 0.5).max(0.5);
        let min_x = x0.min(x1) - half - 1.0;
        let max_x = x0.max(x1) + half + 1.0;
        let min_y = y0.min(y1) - half - 1.0;
        let max_y = y0.max(y1) + half + 1.0;
        let Some((xs, ys)) = self.clip(min_x, max_x, min_y, max_y) else {
            return;
        };
        let (dx, dy) = (x1 - x0, y1 - y0);
        let len_sq = dx * dx + dy * dy;
        for y in ys {
            for x in xs.clone() {
                let (px, py) = (x as f32 + 0.5, y as f32 + 0.5);
                let t = if len_sq > 0.0 {
                    (((px - x0) * dx + (py - y0) * dy) / len_sq).clamp(0.0, 1.0)
                } else {
                    0.0
                };
                let (qx, qy) = (x0 + dx * t, y0 + dy * t);
                let dist = ((px - qx).powi(2) + (py - qy).powi(2)).sqrt();
                let coverage = (half + 0.5 - dist).clamp(0.0, 1.0);
                if coverage > 0.0 {
                    self.blend(x, y, color, alpha * coverage);
                }
            }
        }
    }

    /// Packed RGBA8 bytes, row-major, alpha always opaque.
    pub fn to_rgba_bytes(&self) -> Vec<u8> {
        self.pixels
            .iter()
            .flat_map(|px| [px.r, px.g, px.b, 255])
            .collect()
    }

    fn pixel_mut(&mut self, x: usize, y: usize) -> Option<&mut Rgb> {
        if x < self.width && y < self.height {
            Some(&mut self.pixels[y * self.width + x])
        } else {
            None
        }
    }

    fn for_each_in_radius(
        &mut self,
        cx: f32,
        cy: f32,
        radius: f32,
        mut visit: impl FnMut(&mut Self, usize, usize, f32),
    ) {
        if radius <= 0.0 || !cx.is_finite() || !cy.is_finite() {
            return;
        }
        let Some((xs, ys)) = self.clip(cx - radius, cx + radius, cy - radius, cy + radius) else {
            return;
        };
        for y in ys {
            let py = y as f32 + 0.5 - cy;
            for x in xs.clone() {
                let px = x as f32 + 0.5 - cx;
                let dist = (px * px + py * py).sqrt();
                if dist <= radius {
                    visit(self, x, y, dist);
                }
            }
        }
    }

    fn clip(
        &self,
        min_x: f32,
        max_x: f32,
        min_y: f32,
        max_y: f32,
    ) -> Option<(std::ops::Range<usize>, std::ops::Range<usize>)> {
        if self.width == 0 || self.height == 0 {
            return None;
        }
        let x0 = min_x.floor().max(0.0) as usize;
        let y0 = min_y.floor().max(0.0) as usize;
        let x1 = (max_x.ceil().max(0.0) as usize).min(self.width);
        let y1 = (max_y.ceil().max(0.0) as usize).min(self.height);
        (x0 < x1 && y0 < y1).then_some((x0..x1, y0..y1))
    }
}

#[must_use]
pub fn mix(dst: Rgb, src: Rgb, alpha: f32) -> Rgb {
    let a = alpha.clamp(0.0, 1.0);
    let ch = |d: u8, s: u8| (f32::from(d) + (f32::from(s) - f32::from(d)) * a).round() as u8;
    Rgb::new(ch(dst.r, src.r), ch(dst.g, src.g), ch(dst.b, src.b))
}

#[must_use]
pub fn screen(dst: Rgb, src: Rgb, alpha: f32) -> Rgb {
    let a = alpha.clamp(0.0, 1.0);
    let ch = |d: u8, s: u8| {
        let d = f32::from(d) / 255.0;
        let s = f32::from(s) / 255.0 * a;
        ((1.0 - (1.0 - d) * (1.0 - s)) * 255.0).round().clamp(0.0, 255.0) as u8
    };
    Rgb::new(ch(dst.r, src.r), ch(dst.g, src.g), ch(dst.b, src.b))
}
