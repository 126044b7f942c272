use std::time::Duration;

use rand::Rng;

use crate::domain::{Viewport, field::FogParticle, frame_steps, weather::WeatherState};

#[derive(Debug, Clone, Default)]
pub struct FogLayer {
    pub particles: Vec<FogParticle>,
}

impl FogLayer {
    #[must_use]
    pub fn new(particles: Vec<FogParticle>) -> Self {
        Self { particles }
    }

    pub fn update<R: Rng + ?Sized>(
        &mut self,
        rng: &mut R,
        viewport: Viewport,
        weather: &WeatherState,
        dt: Duration,
    ) {
        let steps = frame_steps(dt);
        for particle in &mut self.particles {
            particle.drift(rng, viewport, weather, steps);
        }
    }
}
