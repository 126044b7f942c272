use ratatui::style::Color;

use crate::cli::ColorArg;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColorCapability {
    TrueColor,
    Xterm256,
    Basic16,
}

/// Base fill behind every layer.
pub const BACKDROP: (u8, u8, u8) = (0x14, 0x14, 0x14);

/// Colors of the frosted card. Alphas are white overlays blended onto
/// whatever the storm left in the cell.
#[derive(Debug, Clone, Copy)]
pub struct CardPalette {
    pub frost_alpha: f32,
    pub link_alpha: f32,
    pub link_hover_alpha: f32,
    pub border: Color,
    pub text: Color,
    pub muted_text: Color,
    pub neon: Color,
    pub avatar_bg: Color,
    pub avatar_text: Color,
}

#[must_use]
pub fn card_palette(capability: ColorCapability) -> CardPalette {
    match capability {
        ColorCapability::Basic16 => CardPalette {
            frost_alpha: 0.10,
            link_alpha: 0.05,
            link_hover_alpha: 0.20,
            border: Color::Gray,
            text: Color::White,
            muted_text: Color::Gray,
            neon: Color::LightCyan,
            avatar_bg: Color::DarkGray,
            avatar_text: Color::White,
        },
        ColorCapability::TrueColor | ColorCapability::Xterm256 => CardPalette {
            frost_alpha: 0.10,
            link_alpha: 0.05,
            link_hover_alpha: 0.20,
            border: Color::Rgb(112, 112, 112),
            text: Color::Rgb(255, 255, 255),
            muted_text: Color::Rgb(209, 213, 219),
            neon: Color::Rgb(125, 211, 252),
            avatar_bg: Color::Rgb(55, 65, 81),
            avatar_text: Color::Rgb(243, 244, 246),
        },
    }
}

pub fn detect_color_capability(mode: ColorArg) -> ColorCapability {
    let term = std::env::var("TERM").ok();
    let colorterm = std::env::var("COLORTERM").ok();
    let no_color = std::env::var("NO_COLOR").ok();
    detect_color_capability_from(
        mode,
        term.as_deref(),
        colorterm.as_deref(),
        no_color.as_deref(),
    )
}

pub fn detect_color_capability_from(
    mode: ColorArg,
    term: Option<&str>,
    colorterm: Option<&str>,
    no_color: Option<&str>,
) -> ColorCapability {
    let term = term.unwrap_or_default().to_ascii_lowercase();
    let colorterm = colorterm.unwrap_or_default().to_ascii_lowercase();
    let no_color = no_color.is_some_and(|value| !value.is_empty());

    match mode {
        ColorArg::Never => return ColorCapability::Basic16,
        ColorArg::Auto if no_color || term == "dumb" => return ColorCapability::Basic16,
        ColorArg::Always if term == "dumb" => return ColorCapability::Basic16,
        _ => {}
    }

    if [colorterm.as_str(), term.as_str()]
        .iter()
        .any(|value| advertises_truecolor(value))
    {
        ColorCapability::TrueColor
    } else if term.contains("256color") {
        ColorCapability::Xterm256
    } else {
        ColorCapability::Basic16
    }
}

fn advertises_truecolor(value: &str) -> bool {
    value.contains("truecolor") || value.contains("24bit") || value.ends_with("direct")
}

/// Maps an RGB color onto what the terminal can show.
pub fn quantize(color: Color, capability: ColorCapability) -> Color {
    let Color::Rgb(r, g, b) = color else {
        return color;
    };
    match capability {
        ColorCapability::TrueColor => color,
        ColorCapability::Xterm256 => {
            let level = |v: u8| -> u8 { ((f32::from(v) / 255.0) * 5.0).round() as u8 };
            Color::Indexed(16 + 36 * level(r) + 6 * level(g) + level(b))
        }
        ColorCapability::Basic16 => basic16_from_rgb(r, g, b),
    }
}

const HUE_BUCKETS: [(f32, Color, Color); 5] = [
    (90.0, Color::Yellow, Color::LightYellow),
    (150.0, Color::Green, Color::LightGreen),
    (210.0, Color::Cyan, Color::LightCyan),
    (270.0, Color::Blue, Color::LightBlue),
    (330.0, Color::Magenta, Color::LightMagenta),
];

pub(crate) fn basic16_from_rgb(r: u8, g: u8, b: u8) -> Color {
    let [rf, gf, bf] = [r, g, b].map(|v| f32::from(v) / 255.0);
    let max = rf.max(gf).max(bf);
    let min = rf.min(gf).min(bf);
    let delta = max - min;
    let light = (max + min) / 2.0;

    // Near-grey storm colors collapse onto the four neutral slots.
    if delta < 0.08 {
        return match light {
            l if l < 0.20 => Color::Black,
            l if l < 0.40 => Color::DarkGray,
            l if l < 0.72 => Color::Gray,
            _ => Color::White,
        };
    }

    let hue = if max == rf {
        60.0 * ((gf - bf) / delta).rem_euclid(6.0)
    } else if max == gf {
        60.0 * (((bf - rf) / delta) + 2.0)
    } else {
        60.0 * (((rf - gf) / delta) + 4.0)
    };
    let bright = light >= 0.55;
    let pick = |dark: Color, light: Color| if bright { light } else { dark };

    if !(30.0..330.0).contains(&hue) {
        return pick(Color::Red, Color::LightRed);
    }
    HUE_BUCKETS
        .iter()
        .find(|(upper, _, _)| hue < *upper)
        .map_or(pick(Color::Magenta, Color::LightMagenta), |(_, dark, light)| {
            pick(*dark, *light)
        })
}
