//! Progress remapping applied in the vertex stage before mixing.

use serde::{Deserialize, Serialize};

/// An easing curve. The GLSL each variant emits and the CPU
/// [`Easing::apply`] agree.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Easing {
    #[default]
    Linear,
    /// d3's `cubicInOut`.
    CubicInOut,
}

impl Easing {
    pub fn apply(self, t: f32) -> f32 {
        match self {
            Easing::Linear => t,
            Easing::CubicInOut => cubic_in_out(t),
        }
    }

    /// Body of `float ease(float t)` for the vertex shader.
    pub fn glsl(self) -> &'static str {
        match self {
            Easing::Linear => "float ease(float t) { return t; }\n",
            Easing::CubicInOut => {
                "float ease(float t) {\n\
                 \x20 t *= 2.0;\n\
                 \x20 if (t <= 1.0) return t * t * t / 2.0;\n\
                 \x20 t -= 2.0;\n\
                 \x20 return (t * t * t + 2.0) / 2.0;\n\
                 }\n"
            }
        }
    }
}

pub fn cubic_in_out(t: f32) -> f32 {
    let t = 2.0 * t;
    if t <= 1.0 {
        t * t * t / 2.0
    } else {
        let t = t - 2.0;
        (t * t * t + 2.0) / 2.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cubic_fixed_points() {
        assert_eq!(cubic_in_out(0.0), 0.0);
        assert_eq!(cubic_in_out(0.5), 0.5);
        assert_eq!(cubic_in_out(1.0), 1.0);
    }

    #[test]
    fn cubic_is_monotone() {
        let mut prev = 0.0;
        for i in 0..=1000 {
            let v = cubic_in_out(i as f32 / 1000.0);
            assert!(v >= prev, "ease dipped at step {i}");
            prev = v;
        }
    }

    #[test]
    fn linear_is_identity() {
        assert_eq!(Easing::Linear.apply(0.37), 0.37);
    }
}
