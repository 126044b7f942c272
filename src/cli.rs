#![allow(clippy::missing_errors_doc)]

use std::path::PathBuf;

use clap::{Parser, ValueEnum};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, ValueEnum, PartialEq, Eq)]
pub enum ColorArg {
    Auto,
    Always,
    Never,
}

#[derive(Debug, Clone, Copy, ValueEnum, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
pub enum IconMode {
    #[default]
    Unicode,
    Nerd,
    Ascii,
}

#[allow(clippy::struct_excessive_bools)]
#[derive(Debug, Parser, Clone)]
#[command(
    name = "stormbio",
    version,
    about = "Link-in-bio card over an animated terminal thunderstorm"
)]
pub struct Cli {
    /// Profile JSON file (default: ~/.config/stormbio/profile.json)
    #[arg(long)]
    pub profile: Option<PathBuf>,

    /// Target FPS (15..60)
    #[arg(long, default_value_t = 30, value_parser = clap::value_parser!(u8).range(15..=60))]
    pub fps: u8,

    /// Draw a single still frame without timers
    #[arg(long)]
    pub no_animation: bool,

    /// Disable the lightning flash overlay
    #[arg(long)]
    pub no_flash: bool,

    /// Ring the terminal bell on thunder
    #[arg(long)]
    pub bell: bool,

    /// Link icon set
    #[arg(long, value_enum, default_value_t = IconMode::Unicode)]
    pub icons: IconMode,

    /// Color output policy
    #[arg(long, value_enum, default_value_t = ColorArg::Auto, conflicts_with = "no_color")]
    pub color: ColorArg,

    /// Alias for --color never
    #[arg(long, conflicts_with = "color")]
    pub no_color: bool,

    /// Seed for the storm's randomness
    #[arg(long)]
    pub seed: Option<u64>,

    /// Append logs to this file (RUST_LOG filters, default warn)
    #[arg(long)]
    pub log_file: Option<PathBuf>,

    /// Print the card as plain text and exit (non-interactive)
    #[arg(long)]
    pub one_shot: bool,

    /// Write the built-in profile to the profile path and exit
    #[arg(long, conflicts_with = "one_shot")]
    pub init_profile: bool,
}

impl Cli {
    #[must_use]
    pub fn effective_color_mode(&self) -> ColorArg {
        if self.no_color {
            ColorArg::Never
        } else {
            self.color
        }
    }

    /// Animation runs at a reduced frame rate when colors are off; the
    /// backdrop is barely visible there.
    #[must_use]
    pub fn effective_fps(&self) -> u8 {
        if self.effective_color_mode() == ColorArg::Never {
            self.fps.min(20)
        } else {
            self.fps
        }
    }
}
