use std::{ops::Range, time::Duration};

use rand::Rng;

use crate::domain::{Rgba, bolt::BoltPalette, flash::LightningFlash};

const FIRST_CHECK_MS: Range<u64> = 2_000..5_000;
const HOLD_RETRY_MS: Range<u64> = 3_000..8_000;
const AFTER_STRIKE_MS: Range<u64> = 5_000..20_000;
const TONE_DELAY_MS: Range<u64> = 100..400;
const THIRD_FLASH_CHANCE: f32 = 0.4;

/// Outcome of one periodic trigger check.
#[derive(Debug, Clone, PartialEq)]
pub enum TriggerDecision {
    /// The draw missed the thunder probability; check again later.
    Hold { retry_in: Duration },
    Strike(Strike),
}

/// Where one bolt of a strike starts and how far down it reaches, relative to
/// the viewport so the plan stays valid across resizes.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoltSeed {
    pub start_x: f32,
    pub reach: f32,
    pub width: f32,
    pub color: Rgba,
}

/// A dimmer flash following the primary one.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FlashEcho {
    /// Offset from the strike.
    pub after: Duration,
    pub flash: LightningFlash,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FollowUp {
    Flash(LightningFlash),
    Tone,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Strike {
    pub flash: LightningFlash,
    pub bolts: Vec<BoltSeed>,
    pub complexity: f32,
    pub echoes: Vec<FlashEcho>,
    pub tone_after: Duration,
    pub next_check_in: Duration,
}

impl Strike {
    /// Echo flashes and the tone, ordered by their offset from the strike.
    #[must_use]
    pub fn follow_ups(&self) -> Vec<(Duration, FollowUp)> {
        let mut follow_ups: Vec<(Duration, FollowUp)> = self
            .echoes
            .iter()
            .map(|echo| (echo.after, FollowUp::Flash(echo.flash)))
            .collect();
        follow_ups.push((self.tone_after, FollowUp::Tone));
        follow_ups.sort_by_key(|(after, _)| *after);
        follow_ups
    }
}

pub fn first_check_delay<R: Rng + ?Sized>(rng: &mut R) -> Duration {
    millis(rng, FIRST_CHECK_MS)
}

/// Rolls against `thunder_probability`; a hit plans a complete strike.
pub fn check<R: Rng + ?Sized>(rng: &mut R, thunder_probability: f32) -> TriggerDecision {
    if rng.random::<f32>() > thunder_probability {
        return TriggerDecision::Hold {
            retry_in: millis(rng, HOLD_RETRY_MS),
        };
    }
    TriggerDecision::Strike(plan_strike(rng))
}

fn plan_strike<R: Rng + ?Sized>(rng: &mut R) -> Strike {
    let palette = BoltPalette::pick(rng);
    let color = palette.flash_color(rng);

    let flash = LightningFlash {
        opacity: rng.random_range(0.6..0.9),
        duration: millis(rng, 50..100),
        color,
    };

    let bolt_count = rng.random_range(1..=3);
    let complexity = rng.random_range(1.0..2.5);
    let bolts = (0..bolt_count)
        .map(|_| BoltSeed {
            start_x: rng.random_range(0.0..1.0),
            reach: rng.random_range(0.3..0.8),
            width: rng.random_range(2.0..5.0),
            color: palette.bolt_color(rng),
        })
        .collect();

    let tone_after = millis(rng, TONE_DELAY_MS);
    let echoes = plan_echoes(rng, color);

    Strike {
        flash,
        bolts,
        complexity,
        echoes,
        tone_after,
        next_check_in: millis(rng, AFTER_STRIKE_MS),
    }
}

fn plan_echoes<R: Rng + ?Sized>(rng: &mut R, color: Rgba) -> Vec<FlashEcho> {
    let second_at = millis(rng, 50..150);
    let mut echoes = vec![FlashEcho {
        after: second_at,
        flash: LightningFlash {
            opacity: rng.random_range(0.3..0.6),
            duration: millis(rng, 100..200),
            color,
        },
    }];

    if rng.random::<f32>() < THIRD_FLASH_CHANCE {
        echoes.push(FlashEcho {
            after: second_at + millis(rng, 100..300),
            flash: LightningFlash {
                opacity: rng.random_range(0.1..0.3),
                duration: millis(rng, 50..100),
                color,
            },
        });
    }
    echoes
}

fn millis<R: Rng + ?Sized>(rng: &mut R, range: Range<u64>) -> Duration {
    Duration::from_millis(rng.random_range(range))
}

#[cfg(test)]
mod tests {
    use rand::{SeedableRng, rngs::StdRng};

    use super::*;

    #[test]
    fn certain_thunder_always_strikes_with_one_to_three_bolts() {
        let mut rng = StdRng::seed_from_u64(2024);
        for _ in 0..500 {
            match check(&mut rng, 1.0) {
                TriggerDecision::Strike(strike) => {
                    assert!((1..=3).contains(&strike.bolts.len()));
                    assert!(strike.flash.opacity >= 0.6);
                }
                TriggerDecision::Hold { .. } => panic!("probability 1.0 must strike"),
            }
        }
    }

    #[test]
    fn impossible_thunder_holds_for_three_to_eight_seconds() {
        let mut rng = StdRng::seed_from_u64(5);
        for _ in 0..200 {
            match check(&mut rng, -1.0) {
                TriggerDecision::Hold { retry_in } => {
                    assert!(retry_in >= Duration::from_secs(3));
                    assert!(retry_in < Duration::from_secs(8));
                }
                TriggerDecision::Strike(_) => panic!("negative probability must hold"),
            }
        }
    }

    #[test]
    fn strikes_reschedule_five_to_twenty_seconds_out() {
        let mut rng = StdRng::seed_from_u64(6);
        for _ in 0..200 {
            if let TriggerDecision::Strike(strike) = check(&mut rng, 1.0) {
                assert!(strike.next_check_in >= Duration::from_secs(5));
                assert!(strike.next_check_in < Duration::from_secs(20));
            }
        }
    }

    #[test]
    fn echoes_are_dimmer_and_ordered() {
        let mut rng = StdRng::seed_from_u64(77);
        for _ in 0..200 {
            let TriggerDecision::Strike(strike) = check(&mut rng, 1.0) else {
                continue;
            };
            assert!((1..=2).contains(&strike.echoes.len()));
            let mut previous = Duration::ZERO;
            for echo in &strike.echoes {
                assert!(echo.after > previous);
                assert!(echo.flash.opacity < strike.flash.opacity);
                assert_eq!(echo.flash.color, strike.flash.color);
                previous = echo.after;
            }
        }
    }

    #[test]
    fn follow_ups_are_sorted_and_include_the_tone() {
        let mut rng = StdRng::seed_from_u64(19);
        let TriggerDecision::Strike(strike) = check(&mut rng, 1.0) else {
            panic!("expected strike");
        };
        let follow_ups = strike.follow_ups();
        assert_eq!(follow_ups.len(), strike.echoes.len() + 1);
        assert!(follow_ups.windows(2).all(|pair| pair[0].0 <= pair[1].0));
        assert!(follow_ups.iter().any(|(_, f)| *f == FollowUp::Tone));
    }

    #[test]
    fn first_check_lands_between_two_and_five_seconds() {
        let mut rng = StdRng::seed_from_u64(1);
        let delay = first_check_delay(&mut rng);
        assert!(delay >= Duration::from_secs(2) && delay < Duration::from_secs(5));
    }
}
