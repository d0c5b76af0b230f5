// Copyright 2025 the Scrollstory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Easing curves.
//!
//! The set is closed on purpose: sections pick from the handful of curves the
//! page design uses, by the same names page authors write (`power2.in`,
//! `back.out(1.4)`, `none`).

use alloc::string::String;
use core::fmt;
use core::str::FromStr;

/// Default overshoot for [`Easing::BackOut`] when none is given.
const DEFAULT_BACK_OVERSHOOT: f64 = 1.70158;

/// An easing curve mapping `t ∈ [0, 1]` to eased progress.
///
/// Every curve satisfies `apply(0) == 0` and `apply(1) == 1` exactly.
/// `PowerIn(n)` is `t^(n+1)`, so `PowerIn(2)` is the cubic ease-in known as
/// `power2.in`.
#[derive(Clone, Copy, Debug, PartialEq, Default)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(try_from = "String", into = "String")
)]
pub enum Easing {
    /// No easing (`none`).
    #[default]
    Linear,
    /// Accelerating power curve.
    PowerIn(u8),
    /// Decelerating power curve.
    PowerOut(u8),
    /// Accelerate then decelerate.
    PowerInOut(u8),
    /// Decelerating curve that overshoots by the given amount before settling.
    BackOut(f64),
}

fn pow_n(x: f64, n: u32) -> f64 {
    let mut acc = 1.0;
    for _ in 0..n {
        acc *= x;
    }
    acc
}

impl Easing {
    /// Applies the curve to `t`, clamping `t` into `[0, 1]` first.
    #[must_use]
    pub fn apply(self, t: f64) -> f64 {
        if t.is_nan() || t <= 0.0 {
            return 0.0;
        }
        if t >= 1.0 {
            return 1.0;
        }
        match self {
            Self::Linear => t,
            Self::PowerIn(n) => pow_n(t, u32::from(n) + 1),
            Self::PowerOut(n) => 1.0 - pow_n(1.0 - t, u32::from(n) + 1),
            Self::PowerInOut(n) => {
                let e = u32::from(n) + 1;
                if t < 0.5 {
                    pow_n(2.0 * t, e) * 0.5
                } else {
                    1.0 - pow_n(2.0 * (1.0 - t), e) * 0.5
                }
            }
            Self::BackOut(s) => {
                let u = t - 1.0;
                1.0 + (s + 1.0) * u * u * u + s * u * u
            }
        }
    }

    /// Returns `true` if the curve can leave `[0, 1]` between the endpoints.
    #[must_use]
    pub fn overshoots(self) -> bool {
        matches!(self, Self::BackOut(s) if s > 0.0)
    }
}

/// Error returned when parsing an unknown easing name.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[error("unknown easing `{0}`")]
pub struct EasingParseError(pub String);

impl FromStr for Easing {
    type Err = EasingParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let err = || EasingParseError(String::from(s));
        let name = s.trim();
        if name == "none" || name == "linear" {
            return Ok(Self::Linear);
        }
        if let Some(rest) = name.strip_prefix("back.out") {
            if rest.is_empty() {
                return Ok(Self::BackOut(DEFAULT_BACK_OVERSHOOT));
            }
            let inner = rest
                .strip_prefix('(')
                .and_then(|r| r.strip_suffix(')'))
                .ok_or_else(err)?;
            let overshoot = inner.trim().parse::<f64>().map_err(|_| err())?;
            return if overshoot.is_finite() {
                Ok(Self::BackOut(overshoot))
            } else {
                Err(err())
            };
        }
        let rest = name.strip_prefix("power").ok_or_else(err)?;
        let (degree, kind) = rest.split_once('.').ok_or_else(err)?;
        let degree = degree.parse::<u8>().map_err(|_| err())?;
        match kind {
            "in" => Ok(Self::PowerIn(degree)),
            "out" => Ok(Self::PowerOut(degree)),
            "inOut" => Ok(Self::PowerInOut(degree)),
            _ => Err(err()),
        }
    }
}

impl fmt::Display for Easing {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Linear => f.write_str("none"),
            Self::PowerIn(n) => write!(f, "power{n}.in"),
            Self::PowerOut(n) => write!(f, "power{n}.out"),
            Self::PowerInOut(n) => write!(f, "power{n}.inOut"),
            Self::BackOut(s) => write!(f, "back.out({s})"),
        }
    }
}

impl TryFrom<String> for Easing {
    type Error = EasingParseError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Easing> for String {
    fn from(value: Easing) -> Self {
        use alloc::string::ToString;
        value.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ALL: [Easing; 7] = [
        Easing::Linear,
        Easing::PowerIn(2),
        Easing::PowerOut(2),
        Easing::PowerOut(3),
        Easing::PowerInOut(1),
        Easing::BackOut(1.4),
        Easing::PowerIn(0),
    ];

    #[test]
    fn endpoints_are_exact() {
        for e in ALL {
            assert_eq!(e.apply(0.0), 0.0, "{e}");
            assert_eq!(e.apply(1.0), 1.0, "{e}");
            assert_eq!(e.apply(-3.0), 0.0, "{e}");
            assert_eq!(e.apply(7.0), 1.0, "{e}");
        }
    }

    #[test]
    fn power_curves_are_monotonic() {
        for e in [Easing::PowerIn(2), Easing::PowerOut(2), Easing::PowerInOut(3)] {
            let mut last = 0.0;
            for i in 1..=100 {
                let v = e.apply(f64::from(i) / 100.0);
                assert!(v >= last, "{e} not monotonic at {i}");
                last = v;
            }
        }
    }

    #[test]
    fn power2_in_is_cubic() {
        assert!((Easing::PowerIn(2).apply(0.5) - 0.125).abs() < 1e-12);
        assert!((Easing::PowerOut(2).apply(0.5) - 0.875).abs() < 1e-12);
    }

    #[test]
    fn back_out_overshoots() {
        let e = Easing::BackOut(1.4);
        assert!(e.overshoots());
        assert!(e.apply(0.8) > 1.0);
        assert!(!Easing::PowerOut(2).overshoots());
    }

    #[test]
    fn parses_author_names() {
        assert_eq!("none".parse(), Ok(Easing::Linear));
        assert_eq!("power2.in".parse(), Ok(Easing::PowerIn(2)));
        assert_eq!("power3.out".parse(), Ok(Easing::PowerOut(3)));
        assert_eq!("power1.inOut".parse(), Ok(Easing::PowerInOut(1)));
        assert_eq!("back.out(1.4)".parse(), Ok(Easing::BackOut(1.4)));
        assert_eq!(
            "back.out".parse(),
            Ok(Easing::BackOut(DEFAULT_BACK_OVERSHOOT))
        );
    }

    #[test]
    fn rejects_unknown_names() {
        for bad in ["elastic.out", "power.in", "power2.sideways", "back.out(x)", ""] {
            assert!(bad.parse::<Easing>().is_err(), "{bad}");
        }
    }

    #[test]
    fn display_round_trips() {
        use alloc::string::ToString;
        for e in ALL {
            assert_eq!(e.to_string().parse::<Easing>(), Ok(e));
        }
    }
}
