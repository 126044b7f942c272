pub mod fog;
pub mod lightning;
pub mod rain;
pub mod reflection;

use std::time::Duration;

use rand::rngs::StdRng;

use crate::domain::{
    Point, Viewport,
    bolt::{BoltSpec, ThunderBolt},
    field::ParticleField,
    flash::{DecayTicket, FlashState, LightningFlash},
    weather::WeatherState,
};
use fog::FogLayer;
use lightning::Strike;
use rain::RainLayer;
use reflection::ReflectionLayer;

const STRIKE_BRANCH_CHANCE: f32 = 0.5;

/// The animated thunderstorm behind the card: three independently updated
/// layers plus the screen flash they react to.
#[derive(Debug)]
pub struct WeatherScene {
    viewport: Viewport,
    rng: StdRng,
    pub rain: RainLayer,
    pub fog: FogLayer,
    pub reflection: ReflectionLayer,
    pub flash: FlashState,
}

impl WeatherScene {
    pub fn new(viewport: Viewport, weather: &WeatherState, mut rng: StdRng) -> Self {
        let field = ParticleField::populate(&mut rng, viewport, weather);
        Self {
            viewport,
            rng,
            rain: RainLayer::new(field.drops, field.puddles),
            fog: FogLayer::new(field.fog),
            reflection: ReflectionLayer::default(),
            flash: FlashState::default(),
        }
    }

    #[must_use]
    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    /// Re-runs the particle initializer for a new viewport.
    pub fn resize(&mut self, viewport: Viewport, weather: &WeatherState) {
        self.viewport = viewport;
        let field = ParticleField::populate(&mut self.rng, viewport, weather);
        self.rain.reseed(field.drops, field.puddles);
        self.fog = FogLayer::new(field.fog);
        self.reflection.glints.clear();
    }

    /// Advances every layer by `dt` against one weather snapshot.
    pub fn tick(&mut self, dt: Duration, weather: WeatherState, pointer: Option<Point>) {
        let flash = self.flash.current();
        self.rain
            .update(&mut self.rng, self.viewport, &weather, pointer, dt);
        self.fog.update(&mut self.rng, self.viewport, &weather, dt);
        self.reflection.update(&mut self.rng, self.viewport, &flash);
    }

    /// Lights the primary flash and appends the strike's bolts.
    pub fn apply_strike(&mut self, strike: &Strike) -> Option<DecayTicket> {
        self.add_bolts(strike);
        self.ignite(strike.flash)
    }

    /// Grows the strike's bolts against the current viewport.
    pub fn add_bolts(&mut self, strike: &Strike) {
        for seed in &strike.bolts {
            let spec = BoltSpec {
                start: Point::new(seed.start_x * self.viewport.width, 0.0),
                end_y: self.viewport.height * seed.reach,
                width: seed.width,
                color: seed.color,
                branch_chance: STRIKE_BRANCH_CHANCE,
                complexity: strike.complexity,
            };
            self.rain.bolts.push(ThunderBolt::grow(&mut self.rng, spec));
        }
    }

    pub fn ignite(&mut self, flash: LightningFlash) -> Option<DecayTicket> {
        self.flash.ignite(flash)
    }

    pub fn decay_flash(&mut self, generation: u64) -> bool {
        self.flash.decay(generation)
    }
}
