//! Discrete palettes sampled from perceptually-uniform color ramps.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString};

use crate::error::{Error, Result};

/// Normalized `[r, g, b]`, ready for a float vertex attribute.
pub type Rgb = [f32; 3];

/// A continuous color ramp.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display, EnumString, EnumIter,
)]
#[serde(rename_all = "kebab-case")]
#[strum(serialize_all = "kebab-case")]
pub enum Ramp {
    Viridis,
    Magma,
    Inferno,
    Cool,
}

impl Ramp {
    fn gradient(self) -> colorous::Gradient {
        match self {
            Ramp::Viridis => colorous::VIRIDIS,
            Ramp::Magma => colorous::MAGMA,
            Ramp::Inferno => colorous::INFERNO,
            Ramp::Cool => colorous::COOL,
        }
    }

    /// Color at `t`, with `t` clamped into `[0, 1]`.
    pub fn sample(self, t: f32) -> Rgb {
        let color = self.gradient().eval_continuous(t.clamp(0.0, 1.0) as f64);
        to_gl([color.r, color.g, color.b])
    }

    /// Like [`Ramp::sample`], but `t` is first remapped into `[floor, 1]`
    /// so the low end of the ramp is never used.
    pub fn sample_clipped(self, t: f32, floor: f32) -> Rgb {
        let t = t.clamp(0.0, 1.0);
        self.sample(floor + (1.0 - floor) * t)
    }

    /// The ramp after this one, wrapping around.
    pub fn next(self) -> Self {
        match self {
            Ramp::Viridis => Ramp::Magma,
            Ramp::Magma => Ramp::Inferno,
            Ramp::Inferno => Ramp::Cool,
            Ramp::Cool => Ramp::Viridis,
        }
    }
}

fn to_gl(rgb: [u8; 3]) -> Rgb {
    rgb.map(|c| c as f32 / 255.0)
}

/// Classes 5..9 of ColorBrewer's 9-class PuBu scheme.
const BREWER_PUBU_DARK: [[u8; 3]; 4] = [
    [0x36, 0x90, 0xc0],
    [0x05, 0x70, 0xb0],
    [0x04, 0x5a, 0x8d],
    [0x02, 0x38, 0x58],
];

/// Where the discrete palette comes from.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "kebab-case")]
pub enum PaletteSource {
    Ramp { ramp: Ramp, stops: Vec<f32> },
    BrewerPubu,
}

impl PaletteSource {
    /// Nine stops from 0.8 down to 0, the darkest color last.
    pub fn magma_nine() -> Self {
        Self::Ramp {
            ramp: Ramp::Magma,
            stops: vec![0.8, 0.7, 0.6, 0.5, 0.4, 0.3, 0.2, 0.1, 0.0],
        }
    }

    pub fn build(&self) -> Result<Palette> {
        match self {
            PaletteSource::Ramp { ramp, stops } => Palette::sample(*ramp, stops),
            PaletteSource::BrewerPubu => Ok(Palette::brewer_pubu()),
        }
    }
}

/// A small, ordered, non-empty set of colors.
#[derive(Debug, Clone, PartialEq)]
pub struct Palette {
    colors: Vec<Rgb>,
}

impl Palette {
    pub fn new(colors: Vec<Rgb>) -> Result<Self> {
        if colors.is_empty() {
            return Err(Error::EmptyPalette);
        }
        Ok(Self { colors })
    }

    pub fn sample(ramp: Ramp, stops: &[f32]) -> Result<Self> {
        Self::new(stops.iter().map(|&t| ramp.sample(t)).collect())
    }

    pub fn brewer_pubu() -> Self {
        Self {
            colors: BREWER_PUBU_DARK.iter().copied().map(to_gl).collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.colors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.colors.is_empty()
    }

    pub fn colors(&self) -> &[Rgb] {
        &self.colors
    }

    /// Index for a selector in `[0, 1]`. A selector of exactly 1.0 picks the
    /// last color instead of running off the end.
    pub fn index_for(&self, selector: f32) -> usize {
        let idx = (self.colors.len() as f32 * selector).floor();
        if idx.is_nan() || idx < 0.0 {
            0
        } else {
            (idx as usize).min(self.colors.len() - 1)
        }
    }

    pub fn pick(&self, selector: f32) -> Rgb {
        self.colors[self.index_for(selector)]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn boundary_selector_picks_last() {
        let palette = Palette::brewer_pubu();
        assert_eq!(palette.index_for(1.0), 3);
        assert_eq!(palette.index_for(0.0), 0);
        assert_eq!(palette.index_for(0.999), 3);
        assert_eq!(palette.index_for(0.26), 1);
    }

    #[test]
    fn magma_ends_are_black_and_pale() {
        let dark = Ramp::Magma.sample(0.0);
        let light = Ramp::Magma.sample(1.0);
        assert!(dark.iter().all(|&c| c < 0.05));
        assert!(light.iter().all(|&c| c > 0.5));
    }

    #[test]
    fn clipped_sampling_skips_low_end() {
        assert_eq!(Ramp::Viridis.sample_clipped(0.0, 0.4), Ramp::Viridis.sample(0.4));
        assert_eq!(Ramp::Viridis.sample_clipped(1.0, 0.4), Ramp::Viridis.sample(1.0));
    }

    #[test]
    fn empty_stops_are_rejected() {
        assert!(matches!(
            PaletteSource::Ramp {
                ramp: Ramp::Cool,
                stops: vec![],
            }
            .build(),
            Err(Error::EmptyPalette)
        ));
    }

    #[test]
    fn ramp_names_parse() {
        assert_eq!("inferno".parse::<Ramp>().unwrap(), Ramp::Inferno);
        assert_eq!(Ramp::Cool.next(), Ramp::Viridis);
    }
}
