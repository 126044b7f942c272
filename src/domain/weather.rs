use std::{f32::consts::PI, ops::RangeInclusive, time::Duration};

use rand::Rng;

pub const WIND_INTENSITY_RANGE: RangeInclusive<f32> = 0.1..=0.5;
pub const RAIN_INTENSITY_RANGE: RangeInclusive<f32> = 0.1..=0.3;
pub const FOG_INTENSITY_RANGE: RangeInclusive<f32> = 0.1..=0.5;
pub const THUNDER_PROBABILITY_RANGE: RangeInclusive<f32> = 0.5..=0.9;

pub const FIRST_DRIFT_DELAY: Duration = Duration::from_secs(15);
const DRIFT_INTERVAL_MS: std::ops::Range<u64> = 10_000..30_000;

/// Scalar knobs that modulate every particle layer.
///
/// Published by replacement: readers copy the whole value once per frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WeatherState {
    pub wind_intensity: f32,
    /// Radians off vertical; unbounded.
    pub wind_direction: f32,
    pub rain_intensity: f32,
    pub fog_intensity: f32,
    pub thunder_probability: f32,
}

impl Default for WeatherState {
    fn default() -> Self {
        Self {
            wind_intensity: 0.2,
            wind_direction: PI / 6.0,
            rain_intensity: 0.15,
            fog_intensity: 0.3,
            thunder_probability: 0.7,
        }
    }
}

impl WeatherState {
    /// Next weather after one drift step, every bounded knob clamped to its range.
    #[must_use]
    pub fn drifted<R: Rng + ?Sized>(self, rng: &mut R) -> Self {
        Self {
            wind_intensity: nudge(rng, self.wind_intensity, 0.1, &WIND_INTENSITY_RANGE),
            wind_direction: self.wind_direction + rng.random_range(-0.1..0.1),
            rain_intensity: nudge(rng, self.rain_intensity, 0.05, &RAIN_INTENSITY_RANGE),
            fog_intensity: nudge(rng, self.fog_intensity, 0.05, &FOG_INTENSITY_RANGE),
            thunder_probability: nudge(
                rng,
                self.thunder_probability,
                0.1,
                &THUNDER_PROBABILITY_RANGE,
            ),
        }
    }

    #[must_use]
    pub fn within_ranges(&self) -> bool {
        WIND_INTENSITY_RANGE.contains(&self.wind_intensity)
            && RAIN_INTENSITY_RANGE.contains(&self.rain_intensity)
            && FOG_INTENSITY_RANGE.contains(&self.fog_intensity)
            && THUNDER_PROBABILITY_RANGE.contains(&self.thunder_probability)
            && self.wind_direction.is_finite()
    }
}

pub fn next_drift_delay<R: Rng + ?Sized>(rng: &mut R) -> Duration {
    Duration::from_millis(rng.random_range(DRIFT_INTERVAL_MS))
}

fn nudge<R: Rng + ?Sized>(
    rng: &mut R,
    value: f32,
    spread: f32,
    range: &RangeInclusive<f32>,
) -> f32 {
    (value + rng.random_range(-spread..spread)).clamp(*range.start(), *range.end())
}

#[cfg(test)]
mod tests {
    use rand::{SeedableRng, rngs::StdRng};

    use super::*;

    #[test]
    fn default_weather_starts_inside_ranges() {
        assert!(WeatherState::default().within_ranges());
    }

    #[test]
    fn drift_clamps_values_pinned_at_the_edges() {
        let mut rng = StdRng::seed_from_u64(7);
        let mut weather = WeatherState {
            wind_intensity: 0.5,
            wind_direction: 0.0,
            rain_intensity: 0.1,
            fog_intensity: 0.5,
            thunder_probability: 0.9,
        };
        for _ in 0..200 {
            weather = weather.drifted(&mut rng);
            assert!(weather.within_ranges(), "{weather:?}");
        }
    }

    #[test]
    fn drift_moves_each_knob_by_a_small_step() {
        let mut rng = StdRng::seed_from_u64(11);
        let before = WeatherState::default();
        let after = before.drifted(&mut rng);
        assert!((after.wind_intensity - before.wind_intensity).abs() <= 0.1);
        assert!((after.wind_direction - before.wind_direction).abs() <= 0.1);
        assert!((after.rain_intensity - before.rain_intensity).abs() <= 0.05);
        assert!((after.fog_intensity - before.fog_intensity).abs() <= 0.05);
        assert!((after.thunder_probability - before.thunder_probability).abs() <= 0.1);
    }

    #[test]
    fn drift_interval_stays_between_ten_and_thirty_seconds() {
        let mut rng = StdRng::seed_from_u64(3);
        for _ in 0..100 {
            let delay = next_drift_delay(&mut rng);
            assert!(delay >= Duration::from_secs(10));
            assert!(delay < Duration::from_secs(30));
        }
    }
}
