use crate::{
    cli::{Cli, IconMode},
    ui::theme::{ColorCapability, detect_color_capability},
};

/// How the storm is allowed to move.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MotionSetting {
    Full,
    /// One still frame, no timers.
    Off,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RuntimeSettings {
    pub fps: u8,
    pub motion: MotionSetting,
    pub flash: bool,
    pub bell: bool,
    pub icon_mode: IconMode,
    pub color_capability: ColorCapability,
    pub seed: Option<u64>,
}

impl RuntimeSettings {
    pub fn from_cli(cli: &Cli) -> Self {
        Self::with_capability(cli, detect_color_capability(cli.effective_color_mode()))
    }

    /// Same as [`RuntimeSettings::from_cli`] without probing the environment.
    pub fn with_capability(cli: &Cli, color_capability: ColorCapability) -> Self {
        let motion = if cli.no_animation {
            MotionSetting::Off
        } else {
            MotionSetting::Full
        };

        Self {
            fps: cli.effective_fps(),
            motion,
            flash: !cli.no_flash,
            bell: cli.bell,
            icon_mode: cli.icons,
            color_capability,
            seed: cli.seed,
        }
    }

    #[must_use]
    pub fn animates(&self) -> bool {
        self.motion == MotionSetting::Full
    }
}
