use rand::Rng;

use super::{Point, Rgba};

const MIN_SEGMENTS: usize = 5;
const JITTER_PX: f32 = 50.0;
const BRANCH_WIDTH_FACTOR: f32 = 0.6;
const BRANCH_CHANCE_FACTOR: f32 = 0.5;
const BRANCH_COMPLEXITY_FACTOR: f32 = 0.8;
/// Fraction of life spent fading in.
const FADE_IN: f32 = 0.2;
/// Life fraction after which the bolt fades out.
const FADE_OUT_START: f32 = 0.6;
/// Opacity multiplier applied to each branch level when drawing.
pub const BRANCH_OPACITY: f32 = 0.8;

/// Color family for one strike; the flash and all of its bolts share it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BoltPalette {
    Ice,
    Violet,
}

impl BoltPalette {
    /// Violet strikes are the rarer variant, about three in ten.
    pub fn pick<R: Rng + ?Sized>(rng: &mut R) -> Self {
        if rng.random::<f32>() > 0.7 {
            Self::Violet
        } else {
            Self::Ice
        }
    }

    pub fn flash_color<R: Rng + ?Sized>(self, rng: &mut R) -> Rgba {
        match self {
            Self::Violet => Rgba::new(
                channel(rng, 200.0, 55.0),
                channel(rng, 150.0, 50.0),
                channel(rng, 230.0, 25.0),
                0.8,
            ),
            Self::Ice => Rgba::new(
                channel(rng, 200.0, 55.0),
                channel(rng, 230.0, 25.0),
                255,
                0.8,
            ),
        }
    }

    pub fn bolt_color<R: Rng + ?Sized>(self, rng: &mut R) -> Rgba {
        match self {
            Self::Violet => Rgba::new(
                channel(rng, 220.0, 35.0),
                channel(rng, 180.0, 40.0),
                255,
                1.0,
            ),
            Self::Ice => Rgba::new(
                channel(rng, 220.0, 35.0),
                channel(rng, 220.0, 35.0),
                255,
                1.0,
            ),
        }
    }
}

fn channel<R: Rng + ?Sized>(rng: &mut R, base: f32, spread: f32) -> u8 {
    (base + rng.random_range(0.0..spread)).clamp(0.0, 255.0) as u8
}

/// Parameters for growing one bolt tree.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoltSpec {
    pub start: Point,
    pub end_y: f32,
    pub width: f32,
    pub color: Rgba,
    pub branch_chance: f32,
    pub complexity: f32,
}

/// A branching lightning polyline. Branches are owned children; only the
/// root's life counters drive the fade.
#[derive(Debug, Clone, PartialEq)]
pub struct ThunderBolt {
    pub points: Vec<Point>,
    pub width: f32,
    pub opacity: f32,
    pub color: Rgba,
    pub branches: Vec<ThunderBolt>,
    /// Reference frames the bolt stays visible.
    pub lifespan: f32,
    pub current_life: f32,
}

impl ThunderBolt {
    pub fn grow<R: Rng + ?Sized>(rng: &mut R, spec: BoltSpec) -> Self {
        let points = jagged_path(rng, &spec);
        let mut branches = Vec::new();

        if spec.width > 1.0 && rng.random::<f32>() < spec.branch_chance {
            let count = (rng.random::<f32>() * 2.0 * spec.complexity).floor() as usize + 1;
            for _ in 0..count {
                let fork = points[rng.random_range(1..points.len() - 1)];
                let reach = rng.random_range(0.3..0.8);
                branches.push(Self::grow(
                    rng,
                    BoltSpec {
                        start: fork,
                        end_y: fork.y + (spec.end_y - fork.y) * reach,
                        width: spec.width * BRANCH_WIDTH_FACTOR,
                        color: spec.color,
                        branch_chance: spec.branch_chance * BRANCH_CHANCE_FACTOR,
                        complexity: spec.complexity * BRANCH_COMPLEXITY_FACTOR,
                    },
                ));
            }
        }

        Self {
            points,
            width: spec.width,
            opacity: rng.random_range(0.8..1.0),
            color: spec.color,
            branches,
            lifespan: rng.random_range(100.0..250.0),
            current_life: 0.0,
        }
    }

    /// Ages the bolt and reports whether it is still alive.
    pub fn advance(&mut self, steps: f32) -> bool {
        self.current_life += steps.max(f32::EPSILON);
        !self.expired()
    }

    #[must_use]
    pub fn expired(&self) -> bool {
        self.current_life > self.lifespan
    }

    /// Opacity after the fade-in / fade-out envelope.
    #[must_use]
    pub fn envelope_opacity(&self) -> f32 {
        let life = self.current_life;
        let span = self.lifespan.max(f32::EPSILON);
        let factor = if life < span * FADE_IN {
            life / (span * FADE_IN)
        } else if life > span * FADE_OUT_START {
            1.0 - (life - span * FADE_OUT_START) / (span * (1.0 - FADE_OUT_START))
        } else {
            1.0
        };
        (self.opacity * factor).clamp(0.0, 1.0)
    }

    /// Nodes in the tree, root included.
    #[cfg(test)]
    fn node_count(&self) -> usize {
        1 + self.branches.iter().map(Self::node_count).sum::<usize>()
    }

    #[cfg(test)]
    fn depth(&self) -> usize {
        1 + self.branches.iter().map(Self::depth).max().unwrap_or(0)
    }
}

fn jagged_path<R: Rng + ?Sized>(rng: &mut R, spec: &BoltSpec) -> Vec<Point> {
    let segments = (rng.random::<f32>() * 5.0 * spec.complexity).floor() as usize + MIN_SEGMENTS;
    let segment_height = (spec.end_y - spec.start.y) / segments as f32;
    let mut points = Vec::with_capacity(segments + 1);
    points.push(spec.start);

    let mut y = spec.start.y;
    for _ in 0..segments {
        y += segment_height;
        let jitter = rng.random_range(-JITTER_PX..JITTER_PX) * spec.complexity;
        points.push(Point::new(spec.start.x + jitter, y));
    }
    points
}
