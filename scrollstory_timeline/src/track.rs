// Copyright 2025 the Scrollstory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Tracks: tween rules applied to one or more elements within a phase.

use smallvec::SmallVec;

use crate::timeline::{PhaseKind, TimelineError};
use crate::{Easing, Properties, Property, Value};

/// Interpolation of one property from one value to another.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Tween {
    /// The animated property.
    pub property: Property,
    /// Value at the start of the window.
    pub from: Value,
    /// Value at the end of the window.
    pub to: Value,
}

/// A set of tweens applied to one or more elements within one phase.
///
/// Windows are expressed in phase-local progress `[0, 1]`. Element `i` of the
/// track starts at `delay + i * stagger` and runs for `duration`. If the last
/// element would run past the end of the phase, every window of the track is
/// scaled down uniformly so that it ends exactly at the phase end.
#[derive(Clone, Debug)]
pub struct Track<E> {
    targets: SmallVec<[E; 4]>,
    tweens: SmallVec<[Tween; 4]>,
    easing: Easing,
    delay: f64,
    duration: f64,
    stagger: f64,
}

impl<E: Copy> Track<E> {
    /// Creates a track over `targets` with no tweens, spanning the whole phase.
    pub fn new(targets: impl IntoIterator<Item = E>) -> Self {
        Self {
            targets: targets.into_iter().collect(),
            tweens: SmallVec::new(),
            easing: Easing::Linear,
            delay: 0.0,
            duration: 1.0,
            stagger: 0.0,
        }
    }

    /// Adds a tween of `property` from `from` to `to`.
    #[must_use]
    pub fn tween(mut self, property: Property, from: impl Into<Value>, to: impl Into<Value>) -> Self {
        self.tweens.push(Tween {
            property,
            from: from.into(),
            to: to.into(),
        });
        self
    }

    /// Sets the easing curve for every tween of the track.
    #[must_use]
    pub fn easing(mut self, easing: Easing) -> Self {
        self.easing = easing;
        self
    }

    /// Sets the phase-local start of the first element's window.
    #[must_use]
    pub fn delay(mut self, delay: f64) -> Self {
        self.delay = delay;
        self
    }

    /// Sets the phase-local length of each element's window.
    #[must_use]
    pub fn duration(mut self, duration: f64) -> Self {
        self.duration = duration;
        self
    }

    /// Sets the phase-local offset between successive elements.
    #[must_use]
    pub fn stagger(mut self, stagger: f64) -> Self {
        self.stagger = stagger;
        self
    }

    /// Elements animated by this track, in stagger order.
    #[must_use]
    pub fn targets(&self) -> &[E] {
        &self.targets
    }

    /// Tweens applied to every target.
    #[must_use]
    pub fn tweens(&self) -> &[Tween] {
        &self.tweens
    }

    /// The easing curve shared by every tween of the track.
    #[must_use]
    pub fn easing_curve(&self) -> Easing {
        self.easing
    }

    /// Phase-local `(start, end)` windows per target, after compression.
    pub fn windows(&self) -> impl Iterator<Item = (E, f64, f64)> + '_ {
        let last = self.targets.len().saturating_sub(1);
        let extent = self.delay + self.stagger * last as f64 + self.duration;
        let scale = if extent > 1.0 { extent } else { 1.0 };
        self.targets.iter().enumerate().map(move |(i, &target)| {
            let start = self.delay + self.stagger * i as f64;
            (target, start / scale, (start + self.duration) / scale)
        })
    }

    pub(crate) fn check(&self, kind: PhaseKind) -> Result<(), TimelineError> {
        let window_ok = self.delay.is_finite()
            && self.delay >= 0.0
            && self.delay < 1.0
            && self.duration.is_finite()
            && self.duration > 0.0
            && self.stagger.is_finite()
            && self.stagger >= 0.0;
        if !window_ok {
            return Err(TimelineError::InvalidWindow { kind });
        }
        let mut seen = Properties::empty();
        for tween in &self.tweens {
            if !tween.from.is_finite() || !tween.to.is_finite() {
                return Err(TimelineError::NonFiniteValue {
                    kind,
                    property: tween.property,
                });
            }
            if seen.contains(tween.property.flag()) {
                return Err(TimelineError::DuplicateProperty {
                    kind,
                    property: tween.property,
                });
            }
            seen |= tween.property.flag();
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use alloc::vec::Vec;

    use super::*;

    #[test]
    fn single_target_spans_phase() {
        let track = Track::new([7_u32]);
        let windows: Vec<_> = track.windows().collect();
        assert_eq!(windows, [(7, 0.0, 1.0)]);
    }

    #[test]
    fn stagger_within_bounds_is_untouched() {
        let track = Track::new([1_u32, 2, 3]).duration(0.5).stagger(0.1);
        let windows: Vec<_> = track.windows().collect();
        assert_eq!(windows[0], (1, 0.0, 0.5));
        assert!((windows[2].1 - 0.2).abs() < 1e-12);
        assert!((windows[2].2 - 0.7).abs() < 1e-12);
    }

    #[test]
    fn overflowing_stagger_is_compressed() {
        let track = Track::new([1_u32, 2, 3, 4]).delay(0.1).duration(0.5).stagger(0.3);
        let windows: Vec<_> = track.windows().collect();
        // Nominal extent is 0.1 + 0.9 + 0.5 = 1.5.
        assert!((windows[0].1 - 0.1 / 1.5).abs() < 1e-12);
        assert_eq!(windows[3].2, 1.0);
        for pair in windows.windows(2) {
            assert!(pair[0].1 < pair[1].1, "stagger order preserved");
        }
        for (_, start, end) in windows {
            assert!(start >= 0.0 && end <= 1.0 && start < end);
        }
    }

    #[test]
    fn rejects_bad_windows() {
        let kind = PhaseKind::Entrance;
        assert!(Track::new([1_u32]).duration(0.0).check(kind).is_err());
        assert!(Track::new([1_u32]).delay(-0.1).check(kind).is_err());
        assert!(Track::new([1_u32]).delay(1.0).check(kind).is_err());
        assert!(Track::new([1_u32]).stagger(f64::NAN).check(kind).is_err());
        assert!(Track::new([1_u32]).check(kind).is_ok());
    }

    #[test]
    fn rejects_duplicate_property() {
        let track = Track::new([1_u32])
            .tween(Property::X, 0.0, 1.0)
            .tween(Property::X, 1.0, 2.0);
        assert_eq!(
            track.check(PhaseKind::Exit),
            Err(TimelineError::DuplicateProperty {
                kind: PhaseKind::Exit,
                property: Property::X,
            })
        );
    }

    #[test]
    fn rejects_non_finite_values() {
        let track = Track::new([1_u32]).tween(Property::Opacity, f64::INFINITY, 1.0);
        assert!(matches!(
            track.check(PhaseKind::Entrance),
            Err(TimelineError::NonFiniteValue { .. })
        ));
    }
}
