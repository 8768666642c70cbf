//! Animation states: per-point color and scale snapshots, and the circular
//! sequence the render loop walks through.

use rand::{rngs::StdRng, Rng, SeedableRng};
use serde::{Deserialize, Serialize};

use crate::easing::Easing;
use crate::error::{Error, Result};
use crate::palette::Palette;

pub fn remap_sin(i: f64) -> f32 {
    (0.5 + i.sin() * 0.5) as f32
}

pub fn remap_cos(i: f64) -> f32 {
    (0.5 + i.cos() * 0.5) as f32
}

/// How per-point values are chosen for each state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "kebab-case")]
pub enum StateSource {
    /// `sin`/`cos` of `index * state_position`.
    Periodic,
    /// Uniform draws from an RNG seeded per state position.
    Seeded { seed: u64 },
}

/// One interpolation endpoint.
#[derive(Debug, Clone, PartialEq)]
pub struct AnimationState {
    /// Flat `[r, g, b]` per point.
    pub colors: Vec<f32>,
    pub scales: Vec<f32>,
}

impl AnimationState {
    /// Every point gets the same color and scale.
    pub fn uniform(count: usize, color: [f32; 3], scale: f32) -> Self {
        Self {
            colors: color.repeat(count),
            scales: vec![scale; count],
        }
    }

    pub fn len(&self) -> usize {
        self.scales.len()
    }

    pub fn is_empty(&self) -> bool {
        self.scales.is_empty()
    }

    fn validate(&self, count: usize) -> Result<()> {
        if self.scales.len() != count {
            return Err(Error::LengthMismatch {
                what: "scales",
                expected: count,
                actual: self.scales.len(),
            });
        }
        if self.colors.len() != count * 3 {
            return Err(Error::LengthMismatch {
                what: "colors",
                expected: count * 3,
                actual: self.colors.len(),
            });
        }
        Ok(())
    }

    /// What the vertex stage computes for `progress`, on the CPU.
    pub fn blend(&self, next: &AnimationState, progress: f32, easing: Easing) -> AnimationState {
        let t = easing.apply(progress);
        let mix = |a: &[f32], b: &[f32]| -> Vec<f32> {
            a.iter().zip(b).map(|(a, b)| a + (b - a) * t).collect()
        };
        AnimationState {
            colors: mix(&self.colors, &next.colors),
            scales: mix(&self.scales, &next.scales),
        }
    }
}

/// Produces [`AnimationState`]s as a pure function of
/// `(count, state_position)`.
#[derive(Debug, Clone)]
pub struct StateGenerator {
    palette: Palette,
    min_scale: f32,
    max_scale: f32,
    source: StateSource,
}

impl StateGenerator {
    pub fn new(
        palette: Palette,
        min_scale: f32,
        max_scale: f32,
        source: StateSource,
    ) -> Result<Self> {
        if !(min_scale <= max_scale) {
            return Err(Error::InvalidScaleRange {
                min: min_scale,
                max: max_scale,
            });
        }
        Ok(Self {
            palette,
            min_scale,
            max_scale,
            source,
        })
    }

    pub fn palette(&self) -> &Palette {
        &self.palette
    }

    fn scale_for(&self, selector: f32) -> f32 {
        let scale = self.min_scale + (self.max_scale - self.min_scale) * selector;
        scale.clamp(self.min_scale, self.max_scale)
    }

    pub fn generate(&self, count: usize, position: usize) -> Result<AnimationState> {
        if count == 0 {
            return Err(Error::ZeroCount);
        }
        let mut colors = Vec::with_capacity(count * 3);
        let mut scales = Vec::with_capacity(count);

        match self.source {
            StateSource::Periodic => {
                for i in 0..count {
                    let x = i as f64 * position as f64;
                    colors.extend_from_slice(&self.palette.pick(remap_sin(x)));
                    scales.push(self.scale_for(remap_cos(x)));
                }
            }
            StateSource::Seeded { seed } => {
                let mut rng = StdRng::seed_from_u64(seed ^ position as u64);
                for _ in 0..count {
                    colors.extend_from_slice(&self.palette.pick(rng.gen::<f32>()));
                    scales.push(self.scale_for(rng.gen::<f32>()));
                }
            }
        }

        Ok(AnimationState { colors, scales })
    }
}

/// A fixed, circular, non-empty run of states with matching lengths.
#[derive(Debug, Clone)]
pub struct StateSequence {
    states: Vec<AnimationState>,
    count: usize,
}

impl StateSequence {
    pub fn new(states: Vec<AnimationState>) -> Result<Self> {
        let first = states.first().ok_or(Error::EmptySequence)?;
        let count = first.len();
        if count == 0 {
            return Err(Error::ZeroCount);
        }
        for state in &states {
            state.validate(count)?;
        }
        Ok(Self { states, count })
    }

    /// Generates states `0..num_states` eagerly.
    pub fn build(generator: &StateGenerator, count: usize, num_states: usize) -> Result<Self> {
        let states = (0..num_states)
            .map(|position| generator.generate(count, position))
            .collect::<Result<Vec<_>>>()?;
        Self::new(states)
    }

    pub fn len(&self) -> usize {
        self.states.len()
    }

    pub fn is_empty(&self) -> bool {
        self.states.is_empty()
    }

    /// Points per state.
    pub fn count(&self) -> usize {
        self.count
    }

    pub fn states(&self) -> &[AnimationState] {
        &self.states
    }

    /// The state at `index` and the one after it, wrapping at the end.
    pub fn pair(&self, index: usize) -> (&AnimationState, &AnimationState) {
        let len = self.states.len();
        (&self.states[index % len], &self.states[(index + 1) % len])
    }
}
