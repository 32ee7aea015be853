use std::str::FromStr;

use crate::foundation::error::AnaviewError;

/// Easing curve applied to the transition parameter.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Ease {
    Linear,
    InOutQuad,
    /// `4t^3` below one half, `1 - (-2t + 2)^3 / 2` above.
    #[default]
    InOutCubic,
    InOutSine,
}

impl Ease {
    pub const ALL: [Ease; 4] = [
        Ease::Linear,
        Ease::InOutQuad,
        Ease::InOutCubic,
        Ease::InOutSine,
    ];

    pub fn apply(self, t: f64) -> f64 {
        let t = t.clamp(0.0, 1.0);
        match self {
            Self::Linear => t,
            Self::InOutQuad => {
                if t < 0.5 {
                    2.0 * t * t
                } else {
                    1.0 - ((-2.0 * t + 2.0).powi(2) / 2.0)
                }
            }
            Self::InOutCubic => {
                if t < 0.5 {
                    4.0 * t * t * t
                } else {
                    1.0 - ((-2.0 * t + 2.0).powi(3) / 2.0)
                }
            }
            Self::InOutSine => -((std::f64::consts::PI * t).cos() - 1.0) / 2.0,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::Linear => "linear",
            Self::InOutQuad => "in_out_quad",
            Self::InOutCubic => "in_out_cubic",
            Self::InOutSine => "in_out_sine",
        }
    }
}

impl FromStr for Ease {
    type Err = AnaviewError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|e| e.name() == s)
            .ok_or_else(|| AnaviewError::construction(format!("unknown ease \"{s}\"")))
    }
}

#[cfg(test)]
#[path = "../../tests/unit/animation/ease.rs"]
mod tests;
