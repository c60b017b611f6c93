//! Easing curves, named the way the page's animation calls name them

use lantern_core::LanternError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Maps normalized time to normalized progress
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Easing {
    Linear,
    Power1In,
    /// Default curve for reveals (quadratic deceleration)
    #[default]
    Power1Out,
    Power1InOut,
    Power2In,
    /// Cubic deceleration, used by particles
    Power2Out,
    Power2InOut,
    Power3Out,
}

impl Easing {
    /// Evaluate the curve. `t` is clamped to [0, 1].
    pub fn apply(&self, t: f32) -> f32 {
        let t = if t.is_nan() { 0.0 } else { t.clamp(0.0, 1.0) };
        match self {
            Easing::Linear => t,
            Easing::Power1In => t * t,
            Easing::Power1Out => 1.0 - (1.0 - t).powi(2),
            Easing::Power1InOut => in_out(t, 2),
            Easing::Power2In => t * t * t,
            Easing::Power2Out => 1.0 - (1.0 - t).powi(3),
            Easing::Power2InOut => in_out(t, 3),
            Easing::Power3Out => 1.0 - (1.0 - t).powi(4),
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Easing::Linear => "none",
            Easing::Power1In => "power1.in",
            Easing::Power1Out => "power1.out",
            Easing::Power1InOut => "power1.inOut",
            Easing::Power2In => "power2.in",
            Easing::Power2Out => "power2.out",
            Easing::Power2InOut => "power2.inOut",
            Easing::Power3Out => "power3.out",
        }
    }
}

fn in_out(t: f32, power: i32) -> f32 {
    if t < 0.5 {
        (2.0 * t).powi(power) / 2.0
    } else {
        1.0 - (2.0 * (1.0 - t)).powi(power) / 2.0
    }
}

impl FromStr for Easing {
    type Err = LanternError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "none" | "linear" => Ok(Easing::Linear),
            "power1.in" => Ok(Easing::Power1In),
            "power1.out" | "power1" => Ok(Easing::Power1Out),
            "power1.inOut" => Ok(Easing::Power1InOut),
            "power2.in" => Ok(Easing::Power2In),
            "power2.out" | "power2" => Ok(Easing::Power2Out),
            "power2.inOut" => Ok(Easing::Power2InOut),
            "power3.out" | "power3" => Ok(Easing::Power3Out),
            other => Err(LanternError::UnknownEasing(other.to_string())),
        }
    }
}

impl TryFrom<String> for Easing {
    type Error = LanternError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Easing> for String {
    fn from(easing: Easing) -> Self {
        easing.name().to_string()
    }
}

impl fmt::Display for Easing {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
