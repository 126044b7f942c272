use rand::Rng;

use crate::domain::{Viewport, flash::LightningFlash};

/// Share of the viewport height covered by the reflection band.
pub const BAND_SHARE: f32 = 0.3;
/// Peak alpha of the dark band at the bottom edge.
pub const BAND_ALPHA: f32 = 0.15;
const GLINT_COUNT: usize = 5;
/// Alpha of the glint fill per unit of flash opacity, before each glint's own
/// strength.
const GLINT_FILL_ALPHA: f32 = 0.3;

/// A bright patch of reflected lightning on the ground.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Glint {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
    pub alpha: f32,
}

#[derive(Debug, Clone, Default)]
pub struct ReflectionLayer {
    pub glints: Vec<Glint>,
}

impl ReflectionLayer {
    /// Scatters fresh glints while the flash is bright, clears them otherwise.
    pub fn update<R: Rng + ?Sized>(
        &mut self,
        rng: &mut R,
        viewport: Viewport,
        flash: &LightningFlash,
    ) {
        self.glints.clear();
        if !flash.is_bright() || viewport.width <= 0.0 {
            return;
        }
        let (band_top, _) = band(viewport);
        let fill = flash.opacity * GLINT_FILL_ALPHA;
        for _ in 0..GLINT_COUNT {
            self.glints.push(Glint {
                x: rng.random_range(0.0..1.0) * viewport.width,
                y: band_top + rng.random_range(0.0..50.0),
                width: rng.random_range(50.0..250.0),
                height: rng.random_range(20.0..70.0),
                alpha: fill * flash.opacity * rng.random_range(0.1..0.3),
            });
        }
    }
}

/// Top edge and height of the reflection band.
#[must_use]
pub fn band(viewport: Viewport) -> (f32, f32) {
    let height = viewport.height * BAND_SHARE;
    (viewport.height - height, height)
}
