//! Sketch configuration and the stock presets.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString};

use crate::easing::Easing;
use crate::error::{Error, Result};
use crate::layout::Layout;
use crate::palette::{PaletteSource, Ramp};
use crate::states::StateSource;
use crate::tween::{frames_per_cycle, Clock};

/// Smallest scale the stock presets use, so a point never fully vanishes.
pub const MIN_SCALE: f32 = 1e-6;

/// How overlapping points combine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum BlendMode {
    /// `rgb: src*SRC_ALPHA + dst`, `alpha: src*SRC_COLOR + dst`.
    Additive,
    /// Standard over-compositing with alpha accumulated additively.
    Alpha,
}

/// Soft edge of each round point, as distances from its center in units of
/// the point's half-size.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "kebab-case")]
pub enum EdgeFalloff {
    Fixed { inner: f32, outer: f32, opacity: f32 },
    /// Fades from `0.001 * scale` out to `scale`.
    ScaleRelative,
}

impl EdgeFalloff {
    /// `(inner, outer, opacity, scale_relative)` shader uniforms.
    pub fn uniforms(self) -> (f32, f32, f32, f32) {
        match self {
            EdgeFalloff::Fixed {
                inner,
                outer,
                opacity,
            } => (inner, outer, opacity, 0.0),
            EdgeFalloff::ScaleRelative => (0.001, 1.0, 1.0, 1.0),
        }
    }
}

/// A grid of circles tweening through precomputed color/scale states.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StateTweenConfig {
    pub cols: u32,
    pub fps: f64,
    pub tween_seconds: f64,
    #[serde(default)]
    pub clock: Clock,
    pub num_states: usize,
    pub min_scale: f32,
    pub max_scale: f32,
    pub palette: PaletteSource,
    pub source: StateSource,
    #[serde(default)]
    pub easing: Easing,
    pub blend: BlendMode,
    pub edge: EdgeFalloff,
    pub background: [f32; 4],
}

impl StateTweenConfig {
    pub fn frames_per_cycle(&self) -> Result<u64> {
        frames_per_cycle(self.fps, self.tween_seconds)
    }
}

/// A point cloud morphing between layouts on a staggered timer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LayoutMorphConfig {
    pub num_points: usize,
    pub point_width: f32,
    pub point_margin: f32,
    pub duration_ms: f32,
    /// Delay of the last point relative to the first.
    pub total_delay_ms: f32,
    pub first_layout: Layout,
    pub first_ramp: Ramp,
    pub background: [f32; 4],
}

impl LayoutMorphConfig {
    pub fn spacing(&self) -> f32 {
        self.point_width + self.point_margin
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "sketch", rename_all = "kebab-case")]
pub enum SketchConfig {
    StateTween(StateTweenConfig),
    LayoutMorph(LayoutMorphConfig),
}

impl Default for SketchConfig {
    fn default() -> Self {
        Preset::default().config()
    }
}

impl SketchConfig {
    pub fn from_json(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Rejects configs that could never produce a frame.
    pub fn validate(&self) -> Result<()> {
        match self {
            SketchConfig::StateTween(c) => {
                c.frames_per_cycle()?;
                if c.num_states == 0 {
                    return Err(Error::EmptySequence);
                }
                if c.cols == 0 {
                    return Err(Error::EmptyGrid { cols: 0, rows: 0 });
                }
                if !(c.min_scale <= c.max_scale) {
                    return Err(Error::InvalidScaleRange {
                        min: c.min_scale,
                        max: c.max_scale,
                    });
                }
                Ok(())
            }
            SketchConfig::LayoutMorph(c) => {
                if c.num_points == 0 {
                    return Err(Error::ZeroCount);
                }
                if c.spacing() <= 0.0 {
                    return Err(Error::Config(format!(
                        "point spacing must be positive, got {}",
                        c.spacing()
                    )));
                }
                for (what, ms) in [
                    ("duration_ms", c.duration_ms),
                    ("total_delay_ms", c.total_delay_ms),
                ] {
                    if !(ms.is_finite() && ms >= 0.0) {
                        return Err(Error::Config(format!(
                            "{what} must be finite and non-negative, got {ms}"
                        )));
                    }
                }
                Ok(())
            }
        }
    }
}

/// The stock sketches.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Display, EnumString, EnumIter)]
#[strum(serialize_all = "kebab-case")]
pub enum Preset {
    /// Slow additive magma grid driven by the periodic remap.
    #[default]
    PulseGrid,
    /// Same as [`Preset::PulseGrid`] with the brewer blues.
    PubuGrid,
    /// Dense grid flickering through random states.
    FlickerGrid,
    LayoutMorph,
}

impl Preset {
    pub fn config(self) -> SketchConfig {
        match self {
            Preset::PulseGrid => SketchConfig::StateTween(pulse_grid(PaletteSource::magma_nine())),
            Preset::PubuGrid => SketchConfig::StateTween(pulse_grid(PaletteSource::BrewerPubu)),
            Preset::FlickerGrid => SketchConfig::StateTween(StateTweenConfig {
                cols: 100,
                fps: 60.0,
                tween_seconds: 0.75,
                clock: Clock::Tick,
                num_states: 300,
                min_scale: MIN_SCALE,
                max_scale: 1.0,
                palette: PaletteSource::magma_nine(),
                source: StateSource::Seeded { seed: 0x5eed },
                easing: Easing::Linear,
                blend: BlendMode::Alpha,
                edge: EdgeFalloff::ScaleRelative,
                background: [0.0, 0.0, 0.0, 1.0],
            }),
            Preset::LayoutMorph => SketchConfig::LayoutMorph(LayoutMorphConfig {
                num_points: 100_000,
                point_width: 4.0,
                point_margin: 1.0,
                duration_ms: 1500.0,
                total_delay_ms: 500.0,
                first_layout: Layout::Phyllotaxis,
                first_ramp: Ramp::Viridis,
                background: [0.0, 0.0, 0.0, 1.0],
            }),
        }
    }
}

fn pulse_grid(palette: PaletteSource) -> StateTweenConfig {
    StateTweenConfig {
        cols: 50,
        fps: 60.0,
        tween_seconds: 6.0,
        clock: Clock::Tick,
        num_states: 50,
        min_scale: MIN_SCALE,
        max_scale: 2.0,
        palette,
        source: StateSource::Periodic,
        easing: Easing::Linear,
        blend: BlendMode::Additive,
        edge: EdgeFalloff::Fixed {
            inner: 0.95,
            outer: 1.0,
            opacity: 0.85,
        },
        background: [0.0, 0.0, 0.0, 1.0],
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use strum::IntoEnumIterator;

    #[test]
    fn presets_validate() {
        for preset in Preset::iter() {
            preset.config().validate().unwrap();
        }
    }

    #[test]
    fn preset_names_round_trip() {
        assert_eq!("flicker-grid".parse::<Preset>().unwrap(), Preset::FlickerGrid);
        assert_eq!(Preset::LayoutMorph.to_string(), "layout-morph");
    }

    #[test]
    fn json_config_is_validated() {
        let mut config = match Preset::PulseGrid.config() {
            SketchConfig::StateTween(c) => c,
            SketchConfig::LayoutMorph(_) => unreachable!(),
        };
        config.tween_seconds = 0.0;
        let json = serde_json::to_string(&SketchConfig::StateTween(config)).unwrap();
        assert!(matches!(
            SketchConfig::from_json(&json),
            Err(Error::ZeroFrames { .. })
        ));
    }

    #[test]
    fn morph_timings_must_be_non_negative() {
        let morph = match Preset::LayoutMorph.config() {
            SketchConfig::LayoutMorph(c) => c,
            SketchConfig::StateTween(_) => unreachable!(),
        };
        let negative = LayoutMorphConfig {
            duration_ms: -1500.0,
            total_delay_ms: -500.0,
            ..morph.clone()
        };
        let json = serde_json::to_string(&SketchConfig::LayoutMorph(negative)).unwrap();
        assert!(matches!(SketchConfig::from_json(&json), Err(Error::Config(_))));

        let nan = SketchConfig::LayoutMorph(LayoutMorphConfig {
            total_delay_ms: f32::NAN,
            ..morph
        });
        assert!(matches!(nan.validate(), Err(Error::Config(_))));
    }

    #[test]
    fn json_config_defaults_clock_and_easing() {
        let json = r#"{
            "sketch": "state-tween",
            "cols": 10, "fps": 30.0, "tween_seconds": 1.0, "num_states": 4,
            "min_scale": 0.0, "max_scale": 1.0,
            "palette": { "kind": "brewer-pubu" },
            "source": { "kind": "periodic" },
            "blend": "alpha",
            "edge": { "kind": "scale-relative" },
            "background": [0.0, 0.0, 0.0, 1.0]
        }"#;
        let SketchConfig::StateTween(config) = SketchConfig::from_json(json).unwrap() else {
            panic!("expected a state tween");
        };
        assert_eq!(config.clock, Clock::Tick);
        assert_eq!(config.easing, Easing::Linear);
        assert_eq!(config.frames_per_cycle().unwrap(), 30);
    }
}
