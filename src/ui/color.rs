#![allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]

use ratatui::style::Color;

use crate::domain::Rgba;

/// Linear working color, channels in `0.0..=255.0`.
pub type Rgb = (f32, f32, f32);

pub const WHITE: Rgb = (255.0, 255.0, 255.0);

#[must_use]
pub fn rgb(r: u8, g: u8, b: u8) -> Rgb {
    (f32::from(r), f32::from(g), f32::from(b))
}

#[must_use]
pub fn rgba_to_rgb(color: Rgba) -> Rgb {
    rgb(color.r, color.g, color.b)
}

/// Approximates named terminal colors so they can be blended.
#[must_use]
pub fn color_to_rgb(color: Color) -> Rgb {
    match color {
        Color::Rgb(r, g, b) => rgb(r, g, b),
        Color::DarkGray => (85., 85., 85.),
        Color::Gray => (170., 170., 170.),
        Color::White => WHITE,
        Color::LightBlue => (85., 85., 255.),
        Color::LightCyan => (85., 255., 255.),
        _ => (0., 0., 0.),
    }
}

#[must_use]
pub fn to_color(value: Rgb) -> Color {
    let channel = |v: f32| v.clamp(0.0, 255.0).round() as u8;
    Color::Rgb(channel(value.0), channel(value.1), channel(value.2))
}

#[must_use]
pub fn lerp_rgb(a: Rgb, b: Rgb, t: f32) -> Rgb {
    (
        a.0 + (b.0 - a.0) * t,
        a.1 + (b.1 - a.1) * t,
        a.2 + (b.2 - a.2) * t,
    )
}

/// Source-over compositing of `over` at `alpha` onto `base`.
#[must_use]
pub fn blend(base: Rgb, over: Rgb, alpha: f32) -> Rgb {
    lerp_rgb(base, over, alpha.clamp(0.0, 1.0))
}
