// Copyright 2025 the Scrollstory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Pinned regions normalized to fractions of the total scroll distance.

use scrollstory_pin::PinnedRegion;

/// A pinned region's `start`/`center`/`end` as fractions of `maxScroll`.
///
/// Invariant: `0 <= start <= center <= end <= 1`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct NormalizedRange {
    start: f64,
    center: f64,
    end: f64,
}

impl NormalizedRange {
    /// Normalizes `region` against `max_scroll`.
    ///
    /// Returns `None` if `max_scroll` is not a positive finite number. Regions
    /// reaching past the scrollable extent are clamped into `[0, 1]`.
    #[must_use]
    pub fn new(region: PinnedRegion, max_scroll: f64) -> Option<Self> {
        if !max_scroll.is_finite() || max_scroll <= 0.0 {
            return None;
        }
        let norm = |v: f64| (v / max_scroll).clamp(0.0, 1.0);
        Some(Self {
            start: norm(region.start()),
            center: norm(region.center()),
            end: norm(region.end()),
        })
    }

    /// Builds a range directly from fractions, with `center` at the midpoint.
    ///
    /// Returns `None` unless `0 <= start <= end <= 1`.
    #[must_use]
    pub fn from_fractions(start: f64, end: f64) -> Option<Self> {
        if !(0.0..=1.0).contains(&start) || !(0.0..=1.0).contains(&end) || end < start {
            return None;
        }
        Some(Self {
            start,
            center: start + (end - start) * 0.5,
            end,
        })
    }

    /// Fraction at which the pin engages.
    #[must_use]
    pub fn start(&self) -> f64 {
        self.start
    }

    /// Resting point of the region.
    #[must_use]
    pub fn center(&self) -> f64 {
        self.center
    }

    /// Fraction at which the pin releases.
    #[must_use]
    pub fn end(&self) -> f64 {
        self.end
    }

    /// Returns `true` if `v` lies in `[start - tolerance, end + tolerance]`.
    #[must_use]
    pub fn covers(&self, v: f64, tolerance: f64) -> bool {
        v >= self.start - tolerance && v <= self.end + tolerance
    }
}
