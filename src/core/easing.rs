//! Easing curves
//!
//! Names follow the tweening-library convention used in the page markup
//! and scripts: `"power3.out"`, `"sine.inOut"`, `"none"`.

use std::f64::consts::PI;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::core::error::MotionError;

/// Which end of the curve is eased
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum EaseDir {
    In,
    Out,
    InOut,
}

impl EaseDir {
    fn suffix(&self) -> &'static str {
        match self {
            EaseDir::In => "in",
            EaseDir::Out => "out",
            EaseDir::InOut => "inOut",
        }
    }

    /// Build an in/out/inOut curve from an "ease in" base function
    fn shape(&self, t: f64, ease_in: impl Fn(f64) -> f64) -> f64 {
        match self {
            EaseDir::In => ease_in(t),
            EaseDir::Out => 1.0 - ease_in(1.0 - t),
            EaseDir::InOut => {
                if t < 0.5 {
                    ease_in(t * 2.0) / 2.0
                } else {
                    1.0 - ease_in((1.0 - t) * 2.0) / 2.0
                }
            }
        }
    }
}

/// Easing curve applied to a step's linear progress
#[derive(Clone, Copy, Debug, PartialEq, Default, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Ease {
    #[default]
    Linear,
    /// `power1` = quad, `power2` = cubic, `power3` = quart, `power4` = quint
    Power(u8, EaseDir),
    Sine(EaseDir),
    Expo(EaseDir),
    Circ(EaseDir),
    Back(EaseDir),
}

impl Ease {
    pub const POWER1_OUT: Ease = Ease::Power(1, EaseDir::Out);
    pub const POWER2_OUT: Ease = Ease::Power(2, EaseDir::Out);
    pub const POWER2_IN_OUT: Ease = Ease::Power(2, EaseDir::InOut);
    pub const POWER3_OUT: Ease = Ease::Power(3, EaseDir::Out);
    pub const POWER3_IN_OUT: Ease = Ease::Power(3, EaseDir::InOut);
    pub const SINE_IN_OUT: Ease = Ease::Sine(EaseDir::InOut);

    /// Map linear progress `t` (clamped to 0..=1) onto the curve.
    ///
    /// Every curve maps 0 to 0 and 1 to 1 exactly.
    pub fn apply(&self, t: f64) -> f64 {
        let t = t.clamp(0.0, 1.0);
        if t == 0.0 || t == 1.0 {
            return t;
        }
        match self {
            Ease::Linear => t,
            Ease::Power(p, dir) => {
                let exp = i32::from(*p) + 1;
                dir.shape(t, |x| x.powi(exp))
            }
            Ease::Sine(dir) => dir.shape(t, |x| 1.0 - (x * PI / 2.0).cos()),
            Ease::Expo(dir) => dir.shape(t, |x| {
                if x == 0.0 { 0.0 } else { 2f64.powf(10.0 * (x - 1.0)) }
            }),
            Ease::Circ(dir) => dir.shape(t, |x| 1.0 - (1.0 - x * x).max(0.0).sqrt()),
            Ease::Back(dir) => dir.shape(t, |x| {
                const OVERSHOOT: f64 = 1.70158;
                x * x * ((OVERSHOOT + 1.0) * x - OVERSHOOT)
            }),
        }
    }
}

impl fmt::Display for Ease {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Ease::Linear => write!(f, "none"),
            Ease::Power(p, dir) => write!(f, "power{}.{}", p, dir.suffix()),
            Ease::Sine(dir) => write!(f, "sine.{}", dir.suffix()),
            Ease::Expo(dir) => write!(f, "expo.{}", dir.suffix()),
            Ease::Circ(dir) => write!(f, "circ.{}", dir.suffix()),
            Ease::Back(dir) => write!(f, "back.{}", dir.suffix()),
        }
    }
}

impl FromStr for Ease {
    type Err = MotionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let unknown = || MotionError::UnknownEase(s.to_string());

        if matches!(s, "none" | "linear") {
            return Ok(Ease::Linear);
        }

        // A bare family name defaults to `.out`
        let (family, dir) = match s.split_once('.') {
            Some((family, "in")) => (family, EaseDir::In),
            Some((family, "out")) => (family, EaseDir::Out),
            Some((family, "inOut")) => (family, EaseDir::InOut),
            Some(_) => return Err(unknown()),
            None => (s, EaseDir::Out),
        };

        match family {
            "power1" => Ok(Ease::Power(1, dir)),
            "power2" => Ok(Ease::Power(2, dir)),
            "power3" => Ok(Ease::Power(3, dir)),
            "power4" => Ok(Ease::Power(4, dir)),
            "sine" => Ok(Ease::Sine(dir)),
            "expo" => Ok(Ease::Expo(dir)),
            "circ" => Ok(Ease::Circ(dir)),
            "back" => Ok(Ease::Back(dir)),
            _ => Err(unknown()),
        }
    }
}

impl TryFrom<String> for Ease {
    type Error = MotionError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Ease> for String {
    fn from(ease: Ease) -> Self {
        ease.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ALL: [Ease; 8] = [
        Ease::Linear,
        Ease::POWER1_OUT,
        Ease::POWER3_IN_OUT,
        Ease::Power(4, EaseDir::In),
        Ease::SINE_IN_OUT,
        Ease::Expo(EaseDir::Out),
        Ease::Circ(EaseDir::In),
        Ease::Back(EaseDir::Out),
    ];

    #[test]
    fn test_endpoints_are_exact() {
        for ease in ALL {
            assert_eq!(ease.apply(0.0), 0.0, "{ease}");
            assert_eq!(ease.apply(1.0), 1.0, "{ease}");
        }
    }

    #[test]
    fn test_progress_is_clamped() {
        assert_eq!(Ease::POWER3_OUT.apply(-0.5), 0.0);
        assert_eq!(Ease::POWER3_OUT.apply(2.0), 1.0);
    }

    #[test]
    fn test_out_curves_lead_linear() {
        assert!(Ease::POWER3_OUT.apply(0.25) > 0.25);
        assert!(Ease::Power(3, EaseDir::In).apply(0.25) < 0.25);
    }

    #[test]
    fn test_in_out_is_symmetric() {
        let ease = Ease::POWER2_IN_OUT;
        assert!((ease.apply(0.5) - 0.5).abs() < 1e-12);
        let a = ease.apply(0.2);
        let b = ease.apply(0.8);
        assert!((a + b - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_back_overshoots() {
        let peak = (1..100)
            .map(|i| Ease::Back(EaseDir::Out).apply(i as f64 / 100.0))
            .fold(f64::MIN, f64::max);
        assert!(peak > 1.0);
    }

    #[test]
    fn test_parse_names() {
        assert_eq!("power3.out".parse::<Ease>(), Ok(Ease::POWER3_OUT));
        assert_eq!("sine.inOut".parse::<Ease>(), Ok(Ease::SINE_IN_OUT));
        assert_eq!("none".parse::<Ease>(), Ok(Ease::Linear));
        assert_eq!("power2".parse::<Ease>(), Ok(Ease::POWER2_OUT));
        assert_eq!(Ease::POWER3_IN_OUT.to_string(), "power3.inOut");
    }

    #[test]
    fn test_parse_unknown() {
        assert_eq!(
            "bounce.out".parse::<Ease>(),
            Err(MotionError::UnknownEase("bounce.out".to_string()))
        );
        assert!("power3.sideways".parse::<Ease>().is_err());
    }
}
