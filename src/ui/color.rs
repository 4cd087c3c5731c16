#![allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]

use ratatui::style::Color;

use crate::domain::visual::Rgb;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColorCapability {
    TrueColor,
    Xterm256,
    Basic16,
}

impl ColorCapability {
    pub fn label(self) -> &'static str {
        match self {
            ColorCapability::TrueColor => "truecolor",
            ColorCapability::Xterm256 => "256",
            ColorCapability::Basic16 => "16",
        }
    }
}

pub fn detect_color_capability() -> ColorCapability {
    let term = std::env::var("TERM").ok();
    let colorterm = std::env::var("COLORTERM").ok();
    let no_color = std::env::var("NO_COLOR").ok();
    detect_color_capability_from(term.as_deref(), colorterm.as_deref(), no_color.as_deref())
}

#[must_use]
pub fn detect_color_capability_from(
    term: Option<&str>,
    colorterm: Option<&str>,
    no_color: Option<&str>,
) -> ColorCapability {
    let term = term.unwrap_or_default().to_lowercase();
    let colorterm = colorterm.unwrap_or_default().to_lowercase();
    if no_color.is_some_and(|value| !value.is_empty()) || term == "dumb" {
        return ColorCapability::Basic16;
    }
    if truecolor_hint(&colorterm) || truecolor_hint(&term) {
        ColorCapability::TrueColor
    } else if term.contains("256color") {
        ColorCapability::Xterm256
    } else {
        ColorCapability::Basic16
    }
}

fn truecolor_hint(value: &str) -> bool {
    value.contains("truecolor") || value.contains("24bit") || value.ends_with("direct")
}

/// Terminal colour for a raster pixel, reduced to what the terminal can show.
#[must_use]
pub fn terminal_color(rgb: Rgb, capability: ColorCapability) -> Color {
    match capability {
        ColorCapability::TrueColor => Color::Rgb(rgb.r, rgb.g, rgb.b),
        ColorCapability::Xterm256 => Color::Indexed(xterm256_index(rgb)),
        ColorCapability::Basic16 => basic16(rgb),
    }
}

/// Nearest entry in the 6x6x6 cube, or the 24-step grey ramp for near-greys.
fn xterm256_index(rgb: Rgb) -> u8 {
    let (r, g, b) = (i32::from(rgb.r), i32::from(rgb.g), i32::from(rgb.b));
    if (r - g).abs() < 8 && (g - b).abs() < 8 && (r - b).abs() < 8 {
        let avg = (r + g + b) / 3;
        if avg < 4 {
            return 16;
        }
        if avg > 246 {
            return 231;
        }
        return 232 + ((avg - 8).max(0) / 10).min(23) as u8;
    }
    let cube = |v: u8| -> u8 { ((f32::from(v) / 255.0) * 5.0).round() as u8 };
    16 + 36 * cube(rgb.r) + 6 * cube(rgb.g) + cube(rgb.b)
}

const HUE_SECTORS: [(Color, Color); 6] = [
    (Color::Red, Color::LightRed),
    (Color::Yellow, Color::LightYellow),
    (Color::Green, Color::LightGreen),
    (Color::Cyan, Color::LightCyan),
    (Color::Blue, Color::LightBlue),
    (Color::Magenta, Color::LightMagenta),
];

fn basic16(rgb: Rgb) -> Color {
    let (r, g, b) = (
        f32::from(rgb.r) / 255.0,
        f32::from(rgb.g) / 255.0,
        f32::from(rgb.b) / 255.0,
    );
    let max = r.max(g).max(b);
    let min = r.min(g).min(b);
    let delta = max - min;
    let light = (max + min) / 2.0;

    if delta < 0.08 {
        return match light {
            l if l < 0.20 => Color::Black,
            l if l < 0.40 => Color::DarkGray,
            l if l < 0.72 => Color::Gray,
            _ => Color::White,
        };
    }

    let hue = if (max - r).abs() < f32::EPSILON {
        60.0 * ((g - b) / delta).rem_euclid(6.0)
    } else if (max - g).abs() < f32::EPSILON {
        60.0 * ((b - r) / delta + 2.0)
    } else {
        60.0 * ((r - g) / delta + 4.0)
    };
    // Sectors are centred on red (0°), yellow (60°), ...
    let sector = (((hue + 30.0) / 60.0).floor() as usize) % HUE_SECTORS.len();
    let (dim, bright) = HUE_SECTORS[sector];
    if light >= 0.55 { bright } else { dim }
}
