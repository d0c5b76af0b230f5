// Copyright 2025 the Scrollstory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Tween endpoint values, optionally relative to the viewport.

use kurbo::Size;

/// A tween endpoint.
///
/// Offsets are usually authored relative to the viewport (`-55vw`, `18vh`) so
/// that the same section looks right at any window size. Unitless properties
/// such as opacity and scale use [`Value::Num`].
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Value {
    /// A plain number (pixels for offsets, unitless otherwise).
    Num(f64),
    /// Percent of the viewport width.
    Vw(f64),
    /// Percent of the viewport height.
    Vh(f64),
}

impl Value {
    /// Resolves the value against a viewport.
    #[must_use]
    pub fn resolve(self, viewport: Size) -> f64 {
        match self {
            Self::Num(v) => v,
            Self::Vw(pct) => viewport.width * pct / 100.0,
            Self::Vh(pct) => viewport.height * pct / 100.0,
        }
    }

    /// Returns `true` if the underlying number is finite.
    #[must_use]
    pub fn is_finite(self) -> bool {
        self.raw().is_finite()
    }

    /// Returns `true` if both values resolve identically at every viewport.
    ///
    /// Zero is zero in every unit, so `Num(0.0)` is equivalent to `Vw(0.0)`.
    #[must_use]
    pub fn is_equivalent(self, other: Self) -> bool {
        match (self, other) {
            (Self::Num(a), Self::Num(b))
            | (Self::Vw(a), Self::Vw(b))
            | (Self::Vh(a), Self::Vh(b)) => a == b,
            (a, b) => a.raw() == 0.0 && b.raw() == 0.0,
        }
    }

    fn raw(self) -> f64 {
        match self {
            Self::Num(v) | Self::Vw(v) | Self::Vh(v) => v,
        }
    }
}

impl From<f64> for Value {
    fn from(value: f64) -> Self {
        Self::Num(value)
    }
}
