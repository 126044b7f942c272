use std::time::Duration;

use rand::Rng;

use crate::domain::{
    Point, Viewport,
    bolt::ThunderBolt,
    field::{Puddle, RainDrop},
    frame_steps,
    weather::WeatherState,
};

/// Drops within this many pixels of the pointer are pushed away.
pub const RIPPLE_RADIUS: f32 = 100.0;
const RIPPLE_STRENGTH: f32 = 20.0;
const LANDING_SPLASH_CHANCE: f64 = 0.1;
const AMBIENT_SPLASHES: usize = 15;
const SPLASH_BASELINE_OFFSET: f32 = 5.0;

/// A short-lived splash mark; rebuilt every frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Splash {
    pub x: f32,
    pub y: f32,
    pub radius: f32,
    pub alpha: f32,
}

/// Rain, puddles and thunder bolts: the front-most animated layer.
#[derive(Debug, Clone, Default)]
pub struct RainLayer {
    pub drops: Vec<RainDrop>,
    pub puddles: Vec<Puddle>,
    pub bolts: Vec<ThunderBolt>,
    /// Marks left this frame by drops that hit the ground.
    pub landings: Vec<Splash>,
    /// Faint bottom-edge marks independent of real landings.
    pub ambient: Vec<Splash>,
    pub pointer: Option<Point>,
    time_ms: f32,
}

impl RainLayer {
    #[must_use]
    pub fn new(drops: Vec<RainDrop>, puddles: Vec<Puddle>) -> Self {
        Self {
            drops,
            puddles,
            ..Self::default()
        }
    }

    /// Swaps in a freshly populated field; active bolts survive.
    pub fn reseed(&mut self, drops: Vec<RainDrop>, puddles: Vec<Puddle>) {
        self.drops = drops;
        self.puddles = puddles;
        self.landings.clear();
    }

    #[must_use]
    pub fn time_ms(&self) -> f32 {
        self.time_ms
    }

    pub fn update<R: Rng + ?Sized>(
        &mut self,
        rng: &mut R,
        viewport: Viewport,
        weather: &WeatherState,
        pointer: Option<Point>,
        dt: Duration,
    ) {
        let steps = frame_steps(dt);
        self.time_ms += dt.as_secs_f32() * 1000.0;
        self.pointer = pointer;

        self.advance_drops(rng, viewport, weather, steps);
        self.scatter_ambient_splashes(rng, viewport);
        for puddle in &mut self.puddles {
            puddle.grow(weather.rain_intensity, steps);
        }
        self.bolts.retain_mut(|bolt| bolt.advance(steps));
    }

    fn advance_drops<R: Rng + ?Sized>(
        &mut self,
        rng: &mut R,
        viewport: Viewport,
        weather: &WeatherState,
        steps: f32,
    ) {
        let wind = wind_term(self.time_ms, weather.wind_intensity);
        self.landings.clear();

        for drop in &mut self.drops {
            drop.advance(wind, steps);
            if !drop.is_outside(viewport) {
                continue;
            }
            if drop.landed(viewport) && rng.random_bool(LANDING_SPLASH_CHANCE) {
                self.landings.push(Splash {
                    x: drop.x,
                    y: viewport.height - SPLASH_BASELINE_OFFSET,
                    radius: rng.random_range(2.0..5.0),
                    alpha: 0.2,
                });
            }
            *drop = RainDrop::spawn(rng, viewport, weather, true);
        }
    }

    fn scatter_ambient_splashes<R: Rng + ?Sized>(&mut self, rng: &mut R, viewport: Viewport) {
        self.ambient.clear();
        if viewport.width <= 0.0 {
            return;
        }
        for _ in 0..AMBIENT_SPLASHES {
            self.ambient.push(Splash {
                x: rng.random_range(0.0..1.0) * viewport.width,
                y: viewport.height - SPLASH_BASELINE_OFFSET,
                radius: rng.random_range(0.5..2.5),
                alpha: rng.random_range(0.0..0.1),
            });
        }
    }

    /// Where `drop` is drawn once the pointer ripple pushes it aside.
    #[must_use]
    pub fn displaced(&self, drop: &RainDrop) -> Point {
        ripple_position(Point::new(drop.x, drop.y), self.pointer)
    }
}

/// Horizontal wind bend applied to every drop, oscillating over time.
#[must_use]
pub fn wind_term(time_ms: f32, wind_intensity: f32) -> f32 {
    (time_ms / 1000.0).sin() * 0.2 * wind_intensity
}

/// Pushes `position` radially away from `pointer` when it is inside the
/// ripple radius. The stored drop position is never changed.
#[must_use]
pub fn ripple_position(position: Point, pointer: Option<Point>) -> Point {
    let Some(pointer) = pointer else {
        return position;
    };
    let dx = position.x - pointer.x;
    let dy = position.y - pointer.y;
    let distance = dx.hypot(dy);
    if distance >= RIPPLE_RADIUS || distance <= f32::EPSILON {
        return position;
    }
    let force = (1.0 - distance / RIPPLE_RADIUS) * RIPPLE_STRENGTH;
    Point::new(
        position.x + dx / distance * force,
        position.y + dy / distance * force,
    )
}
