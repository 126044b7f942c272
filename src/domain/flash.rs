use std::time::Duration;

use super::Rgba;

/// Flash opacity above which fog and reflections light up.
pub const BRIGHT_THRESHOLD: f32 = 0.1;

const RESTING_COLOR: Rgba = Rgba::new(200, 230, 255, 0.8);

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LightningFlash {
    pub opacity: f32,
    pub duration: Duration,
    pub color: Rgba,
}

impl LightningFlash {
    #[must_use]
    pub const fn dark(color: Rgba) -> Self {
        Self {
            opacity: 0.0,
            duration: Duration::ZERO,
            color,
        }
    }

    #[must_use]
    pub fn is_bright(&self) -> bool {
        self.opacity > BRIGHT_THRESHOLD
    }
}

impl Default for LightningFlash {
    fn default() -> Self {
        Self::dark(RESTING_COLOR)
    }
}

/// The one decay timer a lit flash is owed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DecayTicket {
    pub generation: u64,
    pub after: Duration,
}

/// Current screen flash plus the generation counter that pairs each flash
/// with its decay timer. A decay carrying an older generation is ignored.
#[derive(Debug, Clone, Default)]
pub struct FlashState {
    current: LightningFlash,
    generation: u64,
}

impl FlashState {
    #[must_use]
    pub fn current(&self) -> LightningFlash {
        self.current
    }

    #[must_use]
    pub fn opacity(&self) -> f32 {
        self.current.opacity
    }

    #[must_use]
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Replaces the flash. A lit flash gets exactly one ticket for its decay.
    pub fn ignite(&mut self, flash: LightningFlash) -> Option<DecayTicket> {
        self.generation = self.generation.wrapping_add(1);
        self.current = flash;
        (flash.opacity > 0.0).then_some(DecayTicket {
            generation: self.generation,
            after: flash.duration,
        })
    }

    /// Drops the flash to zero if `generation` is still the live one.
    pub fn decay(&mut self, generation: u64) -> bool {
        if generation != self.generation || self.current.opacity <= 0.0 {
            return false;
        }
        self.current = LightningFlash::dark(self.current.color);
        true
    }
}
