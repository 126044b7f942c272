use std::f32::consts::FRAC_PI_2;

use rand::Rng;

use super::{Point, Viewport, weather::WeatherState};

/// Vertical position recycled drops restart from, just above the top edge.
pub const RECYCLE_Y: f32 = -20.0;
/// One puddle per this many pixels of viewport width.
const PUDDLE_SPACING_PX: f32 = 200.0;

#[derive(Debug, Clone, PartialEq)]
pub struct RainDrop {
    pub x: f32,
    pub y: f32,
    pub length: f32,
    pub speed: f32,
    pub opacity: f32,
    pub angle: f32,
}

impl RainDrop {
    pub fn spawn<R: Rng + ?Sized>(
        rng: &mut R,
        viewport: Viewport,
        weather: &WeatherState,
        at_top: bool,
    ) -> Self {
        let rain = weather.rain_intensity;
        Self {
            x: rng.random_range(0.0..1.0) * viewport.width,
            y: if at_top {
                RECYCLE_Y
            } else {
                rng.random_range(0.0..1.0) * viewport.height
            },
            length: rng.random_range(4.0..10.0) + rain * 10.0,
            speed: rng.random_range(6.0..14.0) + rain * 10.0,
            opacity: rng.random_range(0.1..0.25) + rain * 0.2,
            angle: FRAC_PI_2 + weather.wind_direction + rng.random_range(-0.1..0.1),
        }
    }

    /// Tail of the streak drawn from `(x, y)` along the travel angle.
    #[must_use]
    pub fn tail(&self, from: Point) -> Point {
        Point::new(
            from.x + self.angle.cos() * self.length,
            from.y + self.angle.sin() * self.length,
        )
    }

    /// Moves the drop along its angle; `wind` bends the horizontal component.
    pub fn advance(&mut self, wind: f32, steps: f32) {
        self.x += (self.angle + wind).cos() * self.speed * 0.1 * steps;
        self.y += self.angle.sin() * self.speed * steps;
    }

    #[must_use]
    pub fn is_outside(&self, viewport: Viewport) -> bool {
        self.y > viewport.height || self.x < 0.0 || self.x > viewport.width
    }

    #[must_use]
    pub fn landed(&self, viewport: Viewport) -> bool {
        self.y > viewport.height
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Puddle {
    pub x: f32,
    pub y: f32,
    pub size: f32,
    pub opacity: f32,
    pub growth_rate: f32,
    pub max_size: f32,
}

impl Puddle {
    pub fn spawn<R: Rng + ?Sized>(rng: &mut R, viewport: Viewport) -> Self {
        Self {
            x: rng.random_range(0.0..1.0) * viewport.width,
            y: viewport.height - 10.0 - rng.random_range(0.0..20.0),
            size: rng.random_range(5.0..10.0),
            opacity: rng.random_range(0.05..0.1),
            growth_rate: rng.random_range(0.01..0.03),
            max_size: rng.random_range(30.0..100.0),
        }
    }

    /// Grows toward `max_size`; never shrinks and never overshoots.
    pub fn grow(&mut self, rain_intensity: f32, steps: f32) {
        if self.size < self.max_size {
            let growth = self.growth_rate * rain_intensity * 2.0 * steps;
            self.size = (self.size + growth.max(0.0)).min(self.max_size);
        }
    }

    /// Horizontal and vertical radii of the breathing ellipse at `time_ms`.
    #[must_use]
    pub fn ripple_radii(&self, time_ms: f32) -> (f32, f32) {
        let radius = (self.size + (time_ms / 500.0).sin() * 2.0).max(0.0);
        (radius, radius * 0.3)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct FogParticle {
    pub x: f32,
    pub y: f32,
    pub radius: f32,
    pub opacity: f32,
    pub speed: f32,
}

impl FogParticle {
    pub fn spawn<R: Rng + ?Sized>(rng: &mut R, viewport: Viewport) -> Self {
        Self {
            x: rng.random_range(0.0..1.0) * viewport.width,
            y: rng.random_range(0.0..1.0) * viewport.height,
            radius: rng.random_range(50.0..150.0),
            opacity: rng.random_range(0.02..0.07),
            speed: rng.random_range(0.1..0.3),
        }
    }

    /// Drifts with the wind and wraps to the opposite edge at a fresh height.
    pub fn drift<R: Rng + ?Sized>(
        &mut self,
        rng: &mut R,
        viewport: Viewport,
        weather: &WeatherState,
        steps: f32,
    ) {
        self.x += weather.wind_direction.cos() * self.speed * weather.wind_intensity * steps;

        if self.x > viewport.width + self.radius {
            self.x = -self.radius;
            self.y = rng.random_range(0.0..1.0) * viewport.height;
        } else if self.x < -self.radius {
            self.x = viewport.width + self.radius;
            self.y = rng.random_range(0.0..1.0) * viewport.height;
        }
    }
}

/// Every fixed-cardinality particle collection, built together on mount and
/// on resize.
#[derive(Debug, Clone, Default)]
pub struct ParticleField {
    pub drops: Vec<RainDrop>,
    pub puddles: Vec<Puddle>,
    pub fog: Vec<FogParticle>,
}

impl ParticleField {
    pub fn populate<R: Rng + ?Sized>(
        rng: &mut R,
        viewport: Viewport,
        weather: &WeatherState,
    ) -> Self {
        let drops = (0..rain_drop_count(viewport, weather))
            .map(|_| RainDrop::spawn(rng, viewport, weather, false))
            .collect();
        let puddles = (0..puddle_count(viewport))
            .map(|_| Puddle::spawn(rng, viewport))
            .collect();
        let fog = (0..fog_particle_count(viewport, weather))
            .map(|_| FogParticle::spawn(rng, viewport))
            .collect();
        Self {
            drops,
            puddles,
            fog,
        }
    }
}

#[must_use]
pub fn rain_drop_count(viewport: Viewport, weather: &WeatherState) -> usize {
    (viewport.width * weather.rain_intensity).floor().max(0.0) as usize
}

#[must_use]
pub fn puddle_count(viewport: Viewport) -> usize {
    (viewport.width / PUDDLE_SPACING_PX).floor().max(0.0) as usize
}

#[must_use]
pub fn fog_particle_count(viewport: Viewport, weather: &WeatherState) -> usize {
    (viewport.width * weather.fog_intensity / 10.0).floor().max(0.0) as usize
}

#[cfg(test)]
mod tests {
    use rand::{SeedableRng, rngs::StdRng};

    use super::*;

    fn viewport() -> Viewport {
        Viewport::new(1000.0, 600.0)
    }

    #[test]
    fn thousand_pixels_of_light_rain_yield_150_drops() {
        let mut rng = StdRng::seed_from_u64(1);
        let weather = WeatherState {
            rain_intensity: 0.15,
            ..WeatherState::default()
        };
        let field = ParticleField::populate(&mut rng, viewport(), &weather);
        assert_eq!(field.drops.len(), 150);
        assert_eq!(field.puddles.len(), 5);
        assert_eq!(field.fog.len(), 30);
    }

    #[test]
    fn empty_viewport_has_no_particles() {
        let mut rng = StdRng::seed_from_u64(1);
        let field =
            ParticleField::populate(&mut rng, Viewport::new(0.0, 0.0), &WeatherState::default());
        assert!(field.drops.is_empty());
        assert!(field.puddles.is_empty());
        assert!(field.fog.is_empty());
    }

    #[test]
    fn spawned_drops_follow_the_wind_angle() {
        let mut rng = StdRng::seed_from_u64(5);
        let weather = WeatherState::default();
        for _ in 0..200 {
            let drop = RainDrop::spawn(&mut rng, viewport(), &weather, true);
            let base = FRAC_PI_2 + weather.wind_direction;
            assert!((drop.angle - base).abs() <= 0.1);
            assert!((drop.y - RECYCLE_Y).abs() < f32::EPSILON);
            assert!((0.0..1000.0).contains(&drop.x));
        }
    }

    #[test]
    fn puddle_growth_stops_at_max_size() {
        let mut puddle = Puddle {
            x: 10.0,
            y: 10.0,
            size: 29.9,
            opacity: 0.1,
            growth_rate: 0.03,
            max_size: 30.0,
        };
        for _ in 0..10 {
            puddle.grow(0.3, 5.0);
        }
        assert!((puddle.size - 30.0).abs() < f32::EPSILON);
    }

    #[test]
    fn fog_wraps_from_right_to_left_edge() {
        let mut rng = StdRng::seed_from_u64(9);
        let weather = WeatherState {
            wind_direction: 0.0,
            wind_intensity: 0.5,
            ..WeatherState::default()
        };
        let mut particle = FogParticle {
            x: 1000.0 + 60.0,
            y: 100.0,
            radius: 60.0,
            opacity: 0.05,
            speed: 0.3,
        };
        particle.drift(&mut rng, viewport(), &weather, 1.0);
        assert!((particle.x + 60.0).abs() < f32::EPSILON);
        assert!((0.0..600.0).contains(&particle.y));
    }

    #[test]
    fn fog_wraps_from_left_to_right_edge() {
        let mut rng = StdRng::seed_from_u64(9);
        let weather = WeatherState {
            wind_direction: std::f32::consts::PI,
            wind_intensity: 0.5,
            ..WeatherState::default()
        };
        let mut particle = FogParticle {
            x: -60.0,
            y: 100.0,
            radius: 60.0,
            opacity: 0.05,
            speed: 0.3,
        };
        particle.drift(&mut rng, viewport(), &weather, 1.0);
        assert!((particle.x - 1060.0).abs() < f32::EPSILON);
    }
}
