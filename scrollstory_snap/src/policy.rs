// Copyright 2025 the Scrollstory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The snap-target function and its timing.

use alloc::vec::Vec;

use scrollstory_pin::PinRegistry;
use scrollstory_timeline::Easing;

use crate::NormalizedRange;

/// Default capture tolerance around each region, as a fraction of `maxScroll`.
const DEFAULT_TOLERANCE: f64 = 0.02;
/// Default fastest snap, in seconds.
const DEFAULT_MIN_DURATION: f64 = 0.15;
/// Default slowest snap, in seconds.
const DEFAULT_MAX_DURATION: f64 = 0.35;
/// Default snap distance (fraction of `maxScroll`) that takes the slowest snap.
const DEFAULT_FULL_DISTANCE: f64 = 0.1;
/// Default wait after mount before installing even if sections are still
/// measuring, in seconds.
const DEFAULT_SETTLE_DELAY: f64 = 0.5;

/// How long a snap takes and how it decelerates.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct SnapTiming {
    /// Duration of the shortest snap, in seconds.
    pub min_duration: f64,
    /// Duration of the longest snap, in seconds.
    pub max_duration: f64,
    /// Snap distance, as a fraction of `maxScroll`, at which `max_duration` is
    /// reached.
    pub full_distance: f64,
    /// Deceleration curve into the target.
    pub easing: Easing,
}

impl Default for SnapTiming {
    fn default() -> Self {
        Self {
            min_duration: DEFAULT_MIN_DURATION,
            max_duration: DEFAULT_MAX_DURATION,
            full_distance: DEFAULT_FULL_DISTANCE,
            easing: Easing::PowerOut(2),
        }
    }
}

impl SnapTiming {
    /// Duration for a snap covering `distance` (fraction of `maxScroll`).
    ///
    /// Grows linearly with distance and is always within
    /// `[min_duration, max_duration]`.
    #[must_use]
    pub fn duration(&self, distance: f64) -> f64 {
        let (lo, hi) = if self.min_duration <= self.max_duration {
            (self.min_duration, self.max_duration)
        } else {
            (self.max_duration, self.min_duration)
        };
        let lo = lo.max(0.0);
        let hi = hi.max(lo);
        if self.full_distance.is_nan() || self.full_distance <= 0.0 {
            return hi;
        }
        let t = (distance.abs() / self.full_distance).clamp(0.0, 1.0);
        if t.is_nan() {
            return lo;
        }
        if t >= 1.0 {
            return hi;
        }
        lo + (hi - lo) * t
    }
}

/// Page-wide snap configuration.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct SnapConfig {
    /// Capture band around each region, as a fraction of `maxScroll`.
    pub tolerance: f64,
    /// Snap animation timing.
    pub timing: SnapTiming,
    /// Upper bound, in seconds after mount, on waiting for sections to measure.
    pub settle_delay: f64,
}

impl Default for SnapConfig {
    fn default() -> Self {
        Self {
            tolerance: DEFAULT_TOLERANCE,
            timing: SnapTiming::default(),
            settle_delay: DEFAULT_SETTLE_DELAY,
        }
    }
}

/// The installed snap behavior: target function plus timing.
#[derive(Clone, Debug, PartialEq)]
pub struct SnapPolicy {
    ranges: Vec<NormalizedRange>,
    tolerance: f64,
    timing: SnapTiming,
}

impl SnapPolicy {
    /// Builds a policy over `ranges`, in registration order.
    ///
    /// Returns `None` when there is nothing to snap to; callers should then not
    /// install any snap handling at all.
    #[must_use]
    pub fn build(ranges: Vec<NormalizedRange>, config: &SnapConfig) -> Option<Self> {
        if ranges.is_empty() {
            return None;
        }
        Some(Self {
            ranges,
            tolerance: config.tolerance.max(0.0),
            timing: config.timing,
        })
    }

    /// Builds a policy from every ready region in `registry`.
    ///
    /// Pending regions are skipped. Returns `None` for a missing or zero
    /// `max_scroll` or when no region is ready.
    #[must_use]
    pub fn from_registry(
        registry: &PinRegistry,
        max_scroll: f64,
        config: &SnapConfig,
    ) -> Option<Self> {
        let ranges = registry
            .regions()
            .filter_map(|(_, region)| NormalizedRange::new(region, max_scroll))
            .collect();
        Self::build(ranges, config)
    }

    /// The normalized ranges, in registration order.
    #[must_use]
    pub fn ranges(&self) -> &[NormalizedRange] {
        &self.ranges
    }

    /// The capture tolerance.
    #[must_use]
    pub fn tolerance(&self) -> f64 {
        self.tolerance
    }

    /// The snap timing.
    #[must_use]
    pub fn timing(&self) -> SnapTiming {
        self.timing
    }

    /// Snap target for a gesture ending at scroll fraction `v`.
    ///
    /// If `v` is within the tolerance band of any region, returns the center
    /// nearest to `v` (the earliest registered region wins exact ties).
    /// Otherwise returns `v` unchanged.
    #[must_use]
    pub fn snap_to(&self, v: f64) -> f64 {
        if !self.ranges.iter().any(|r| r.covers(v, self.tolerance)) {
            return v;
        }
        let first = self.ranges[0].center();
        self.ranges.iter().fold(first, |closest, r| {
            if (r.center() - v).abs() < (closest - v).abs() {
                r.center()
            } else {
                closest
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use alloc::vec;

    use scrollstory_pin::PinnedRegion;
    use scrollstory_progress::ScrollSpan;

    use super::*;

    fn range(start: f64, end: f64) -> NormalizedRange {
        NormalizedRange::from_fractions(start, end).unwrap()
    }

    fn two_regions() -> SnapPolicy {
        SnapPolicy::build(
            vec![range(0.15, 0.45), range(0.55, 0.85)],
            &SnapConfig::default(),
        )
        .unwrap()
    }

    fn three_regions() -> SnapPolicy {
        SnapPolicy::build(
            vec![range(0.02, 0.18), range(0.42, 0.58), range(0.82, 0.98)],
            &SnapConfig::default(),
        )
        .unwrap()
    }

    #[test]
    fn nearest_center_wins() {
        let p = two_regions();
        let (a, b) = (p.ranges()[0].center(), p.ranges()[1].center());
        assert!((a - 0.30).abs() < 1e-12);
        assert!((b - 0.70).abs() < 1e-12);
        assert_eq!(p.snap_to(0.45), a);
        assert_eq!(p.snap_to(0.55), b);
    }

    #[test]
    fn centers_are_fixed_points() {
        let p = three_regions();
        for r in p.ranges() {
            assert_eq!(p.snap_to(r.center()), r.center());
        }
    }

    #[test]
    fn free_zone_is_identity() {
        let p = three_regions();
        for v in [0.21, 0.25, 0.3, 0.39, 0.61, 0.75, 0.79] {
            assert_eq!(p.snap_to(v), v);
        }
    }

    #[test]
    fn gesture_near_middle_region_snaps_to_its_center() {
        let p = three_regions();
        let center = p.ranges()[1].center();
        assert!((center - 0.5).abs() < 1e-12);
        assert_eq!(p.snap_to(0.48), center);

        let duration = p.timing().duration(center - 0.48);
        assert!((0.15..=0.35).contains(&duration));
        assert!((duration - 0.19).abs() < 1e-9);

        assert_eq!(p.snap_to(0.25), 0.25);
    }

    #[test]
    fn tolerance_captures_near_misses() {
        let p = three_regions();
        // Just past the end of the first region.
        assert_eq!(p.snap_to(0.19), p.ranges()[0].center());
        // Just before the start of the second.
        assert_eq!(p.snap_to(0.405), p.ranges()[1].center());
    }

    #[test]
    fn exact_ties_go_to_first_registered() {
        let p = SnapPolicy::build(
            vec![range(0.2, 0.4), range(0.2, 0.4)],
            &SnapConfig::default(),
        )
        .unwrap();
        assert_eq!(p.snap_to(0.25), p.ranges()[0].center());

        // Equidistant centers: 0.3 and 0.5 around 0.4.
        let p = SnapPolicy::build(
            vec![range(0.25, 0.375), range(0.375, 0.625)],
            &SnapConfig::default(),
        )
        .unwrap();
        let v = 0.4375;
        assert_eq!(p.ranges()[0].center(), 0.3125);
        assert_eq!(p.ranges()[1].center(), 0.5);
        // |0.3125 - 0.4375| == 0.125 > |0.5 - 0.4375| == 0.0625.
        assert_eq!(p.snap_to(v), 0.5);
        let v = 0.40625;
        // Both distances are 0.09375.
        assert_eq!(p.snap_to(v), 0.3125);
    }

    #[test]
    fn empty_policy_is_not_built() {
        assert_eq!(SnapPolicy::build(vec![], &SnapConfig::default()), None);
    }

    #[test]
    fn from_registry_skips_pending_and_zero_extent() {
        let mut registry = PinRegistry::new();
        let a = registry.reserve();
        let _pending = registry.reserve();
        registry.set(a, PinnedRegion::new(ScrollSpan::new(0.0, 1000.0).unwrap()));

        let config = SnapConfig::default();
        let policy = SnapPolicy::from_registry(&registry, 4000.0, &config).unwrap();
        assert_eq!(policy.ranges().len(), 1);
        assert_eq!(policy.ranges()[0].center(), 0.125);

        assert_eq!(SnapPolicy::from_registry(&registry, 0.0, &config), None);
        assert_eq!(
            SnapPolicy::from_registry(&PinRegistry::new(), 4000.0, &config),
            None
        );
    }

    #[test]
    fn duration_scales_with_distance_within_bounds() {
        let t = SnapTiming::default();
        assert_eq!(t.duration(0.0), 0.15);
        assert_eq!(t.duration(0.1), 0.35);
        assert_eq!(t.duration(0.9), 0.35);
        let mid = t.duration(0.05);
        assert!(mid > 0.15 && mid < 0.35);
        assert!(t.duration(0.02) < t.duration(0.04));
    }

    #[test]
    fn duration_tolerates_bad_config() {
        let swapped = SnapTiming {
            min_duration: 0.4,
            max_duration: 0.2,
            ..SnapTiming::default()
        };
        assert_eq!(swapped.duration(0.0), 0.2);
        assert_eq!(swapped.duration(1.0), 0.4);

        let no_distance = SnapTiming {
            full_distance: 0.0,
            ..SnapTiming::default()
        };
        assert_eq!(no_distance.duration(0.01), 0.35);
        assert_eq!(SnapTiming::default().duration(f64::NAN), 0.15);
    }
}
