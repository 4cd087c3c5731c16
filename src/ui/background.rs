#![allow(
    clippy::cast_possible_truncation,
    clippy::cast_precision_loss,
    clippy::cast_sign_loss
)]

use std::f32::consts::{PI, TAU};

use crate::{
    domain::visual::{AuroraSpec, GradientStop, Rgb},
    ui::raster::Surface,
};

// 4x4 ordered-dither thresholds, centred on zero, in 1/16 steps.
const BAYER_4X4: [[f32; 4]; 4] = [
    [0.0, 8.0, 2.0, 10.0],
    [12.0, 4.0, 14.0, 6.0],
    [3.0, 11.0, 1.0, 9.0],
    [15.0, 7.0, 13.0, 5.0],
];

/// Fills the whole surface with a 135° ramp (top-left to bottom-right) through
/// `stops`. An empty stop list clears to black.
pub fn paint_gradient(surface: &mut Surface, stops: &[GradientStop], dither: bool) {
    let (w, h) = (surface.width(), surface.height());
    if w == 0 || h == 0 {
        return;
    }
    if stops.is_empty() {
        surface.clear(Rgb::BLACK);
        return;
    }

    // The ramp is constant along x + y, so one colour per diagonal suffices.
    let diagonals = w + h - 1;
    let ramp: Vec<[f32; 3]> = (0..diagonals)
        .map(|d| sample_stops(stops, gradient_ratio(d, diagonals)))
        .collect();

    for y in 0..h {
        let Some(row) = surface.row_mut(y) else {
            continue;
        };
        for (x, px) in row.iter_mut().enumerate() {
            let [r, g, b] = ramp[x + y];
            let offset = if dither {
                (BAYER_4X4[y % 4][x % 4] + 0.5) / 16.0 - 0.5
            } else {
                0.0
            };
            *px = Rgb::new(quantize(r + offset), quantize(g + offset), quantize(b + offset));
        }
    }
}

fn gradient_ratio(diagonal: usize, diagonals: usize) -> f32 {
    if diagonals <= 1 {
        0.0
    } else {
        diagonal as f32 / (diagonals - 1) as f32
    }
}

fn quantize(value: f32) -> u8 {
    value.round().clamp(0.0, 255.0) as u8
}

/// Colour at `t` (0..=1) along the stop list, composited over black.
#[must_use]
pub fn sample_stops(stops: &[GradientStop], t: f32) -> [f32; 3] {
    let pos = t.clamp(0.0, 1.0) * 100.0;
    let (Some(first), Some(last)) = (stops.first(), stops.last()) else {
        return [0.0; 3];
    };
    if pos <= first.position {
        return premultiplied(first);
    }
    if pos >= last.position {
        return premultiplied(last);
    }
    for pair in stops.windows(2) {
        let (a, b) = (&pair[0], &pair[1]);
        if pos >= a.position && pos <= b.position {
            let span = b.position - a.position;
            let local = if span > 0.0 { (pos - a.position) / span } else { 0.0 };
            return lerp_color(premultiplied(a), premultiplied(b), local);
        }
    }
    premultiplied(last)
}

fn premultiplied(stop: &GradientStop) -> [f32; 3] {
    let a = stop.opacity.clamp(0.0, 1.0);
    [
        f32::from(stop.color.r) * a,
        f32::from(stop.color.g) * a,
        f32::from(stop.color.b) * a,
    ]
}

fn lerp_color(a: [f32; 3], b: [f32; 3], t: f32) -> [f32; 3] {
    [
        a[0] + (b[0] - a[0]) * t,
        a[1] + (b[1] - a[1]) * t,
        a[2] + (b[2] - a[2]) * t,
    ]
}

const RIBBON_BAND: f32 = 0.12;
const RIBBON_WAVES: f32 = 3.0;
const RIBBON_AMPLITUDE: f32 = 0.05;
const RIBBON_CYCLE_SECS: f32 = 20.0;
const RIBBON_SPACING: f32 = 0.3;

/// Soft horizontal ribbons screened over the sky, drifting with `clock`.
pub fn paint_aurora(surface: &mut Surface, aurora: &AuroraSpec, ribbons: usize, clock: f32) {
    let (w, h) = (surface.width(), surface.height());
    if w == 0 || h == 0 || aurora.colors.is_empty() {
        return;
    }
    let intensity = aurora.intensity.clamp(0.0, 1.0);
    let drift = clock * aurora.speed.max(0.0) * TAU / RIBBON_CYCLE_SECS;
    let band = (h as f32 * RIBBON_BAND).max(1.0);

    for ribbon in 0..ribbons {
        let base = h as f32 * (0.2 + RIBBON_SPACING * ribbon as f32);
        let lag = ribbon as f32 * 0.5;
        for x in 0..w {
            let u = if w > 1 { x as f32 / (w - 1) as f32 } else { 0.5 };
            let envelope = ribbon_envelope(u);
            if envelope <= 0.0 {
                continue;
            }
            let color = ribbon_color(&aurora.colors, u);
            let centre = base
                + (u * PI * RIBBON_WAVES + drift + lag).sin() * RIBBON_AMPLITUDE * h as f32;
            let top = (centre - band).floor().max(0.0) as usize;
            let bottom = ((centre + band).ceil().max(0.0) as usize).min(h);
            for y in top..bottom {
                let d = ((y as f32 + 0.5) - centre) / band;
                let falloff = (1.0 - d * d).max(0.0);
                surface.screen(x, y, color, intensity * envelope * falloff);
            }
        }
    }
}

/// Transparent at both edges, full strength across the middle 60%.
fn ribbon_envelope(u: f32) -> f32 {
    if u < 0.2 {
        u / 0.2
    } else if u > 0.8 {
        (1.0 - u) / 0.2
    } else {
        1.0
    }
}

fn ribbon_color(colors: &[Rgb], u: f32) -> Rgb {
    if colors.len() == 1 {
        return colors[0];
    }
    let span = ((u - 0.2) / 0.6).clamp(0.0, 1.0) * (colors.len() - 1) as f32;
    let idx = (span.floor() as usize).min(colors.len() - 2);
    let t = span - idx as f32;
    let [r, g, b] = lerp_color(
        [f32::from(colors[idx].r), f32::from(colors[idx].g), f32::from(colors[idx].b)],
        [
            f32::from(colors[idx + 1].r),
            f32::from(colors[idx + 1].g),
            f32::from(colors[idx + 1].b),
        ],
        t,
    );
    Rgb::new(quantize(r), quantize(g), quantize(b))
}

/// Bright elliptical glow high in the sky, scaled by `level` (0..=1).
pub fn paint_flash(surface: &mut Surface, level: f32) {
    let (w, h) = (surface.width() as f32, surface.height() as f32);
    if level <= 0.0 || w <= 0.0 || h <= 0.0 {
        return;
    }
    let (cx, cy) = (w * 0.5, h * 0.2);
    let (rx, ry) = (w * 0.5, h * 0.5);
    let glow = Rgb::new(230, 238, 255);
    for y in 0..surface.height() {
        let dy = (y as f32 + 0.5 - cy) / ry;
        for x in 0..surface.width() {
            let dx = (x as f32 + 0.5 - cx) / rx;
            let r = (dx * dx + dy * dy).sqrt();
            if r < 1.0 {
                surface.screen(x, y, glow, 0.8 * level * (1.0 - r));
            }
        }
    }
}

const PULSE_SECS: f32 = 4.0;
const PULSE_PAUSE_SECS: f32 = 0.5;
const PULSE_PEAK_OPACITY: f32 = 0.5;

/// Opacity and scale of the storm pulse `elapsed` seconds in: a 4 s swell
/// from nothing to half strength and back, then a short pause.
#[must_use]
pub fn pulse_glow(elapsed: f32) -> (f32, f32) {
    if !elapsed.is_finite() || elapsed <= 0.0 {
        return (0.0, 0.95);
    }
    let t = elapsed % (PULSE_SECS + PULSE_PAUSE_SECS);
    if t >= PULSE_SECS {
        return (0.0, 0.95);
    }
    let swell = 1.0 - (2.0 * t / PULSE_SECS - 1.0).abs();
    (PULSE_PEAK_OPACITY * swell, 0.95 + 0.2 * swell)
}

/// White radial glow centred a third of the way down, strongest at the centre
/// and gone at 70% of the reach to the farthest corner.
pub fn paint_pulse(surface: &mut Surface, opacity: f32, scale: f32) {
    let (w, h) = (surface.width() as f32, surface.height() as f32);
    if opacity <= 0.0 || w <= 0.0 || h <= 0.0 {
        return;
    }
    let (cx, cy) = (w * 0.5, h * 0.3);
    let reach = (cx * cx + (h - cy) * (h - cy)).sqrt() * scale.max(0.1);
    let white = Rgb::new(255, 255, 255);
    for y in 0..surface.height() {
        let dy = y as f32 + 0.5 - cy;
        for x in 0..surface.width() {
            let dx = x as f32 + 0.5 - cx;
            let a = pulse_falloff((dx * dx + dy * dy).sqrt() / reach);
            if a > 0.0 {
                surface.screen(x, y, white, opacity * a);
            }
        }
    }
}

fn pulse_falloff(r: f32) -> f32 {
    if r < 0.4 {
        0.15 - 0.1 * r / 0.4
    } else if r < 0.7 {
        0.05 * (0.7 - r) / 0.3
    } else {
        0.0
    }
}
