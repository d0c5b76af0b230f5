// Copyright 2025 the Scrollstory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Programmatic scroll animation toward a snap target.

use scrollstory_timeline::Easing;

/// An in-flight snap from one scroll offset to another.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SnapMotion {
    from: f64,
    to: f64,
    started_at: f64,
    duration: f64,
    easing: Easing,
}

impl SnapMotion {
    /// Creates a motion from `from` to `to` (pixels) starting at `started_at`.
    #[must_use]
    pub fn new(from: f64, to: f64, started_at: f64, duration: f64, easing: Easing) -> Self {
        Self {
            from,
            to,
            started_at,
            duration: duration.max(0.0),
            easing,
        }
    }

    /// Scroll offset where the motion began.
    #[must_use]
    pub fn from(&self) -> f64 {
        self.from
    }

    /// Scroll offset the motion settles on.
    #[must_use]
    pub fn target(&self) -> f64 {
        self.to
    }

    /// Length of the motion in seconds.
    #[must_use]
    pub fn duration(&self) -> f64 {
        self.duration
    }

    /// Returns `true` once `now` has reached the end of the motion.
    #[must_use]
    pub fn is_finished(&self, now: f64) -> bool {
        now - self.started_at >= self.duration
    }

    /// Scroll offset at `now`.
    ///
    /// Never leaves the interval between `from` and `to`, even for overshooting
    /// easings, and lands exactly on the target when finished.
    #[must_use]
    pub fn position(&self, now: f64) -> f64 {
        if self.is_finished(now) {
            return self.to;
        }
        let t = ((now - self.started_at) / self.duration).clamp(0.0, 1.0);
        if t.is_nan() {
            return self.from;
        }
        let y = self.from + (self.to - self.from) * self.easing.apply(t);
        let (lo, hi) = if self.from <= self.to {
            (self.from, self.to)
        } else {
            (self.to, self.from)
        };
        y.clamp(lo, hi)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn runs_from_start_to_target() {
        let m = SnapMotion::new(1900.0, 1000.0, 2.0, 0.3, Easing::PowerOut(2));
        assert_eq!(m.position(2.0), 1900.0);
        assert_eq!(m.position(1.0), 1900.0);
        assert_eq!(m.position(2.3), 1000.0);
        assert_eq!(m.position(5.0), 1000.0);
        assert!(m.is_finished(2.3));
        assert!(!m.is_finished(2.29));
    }

    #[test]
    fn decelerates_into_target() {
        let m = SnapMotion::new(0.0, 100.0, 0.0, 1.0, Easing::PowerOut(2));
        let early = m.position(0.1) - m.position(0.0);
        let late = m.position(1.0) - m.position(0.9);
        assert!(early > late);
    }

    #[test]
    fn overshooting_easing_is_contained() {
        let m = SnapMotion::new(0.0, 100.0, 0.0, 1.0, Easing::BackOut(3.0));
        for i in 0..=20 {
            let y = m.position(f64::from(i) / 20.0);
            assert!((0.0..=100.0).contains(&y));
        }
    }

    #[test]
    fn zero_duration_lands_immediately() {
        let m = SnapMotion::new(10.0, 20.0, 0.0, 0.0, Easing::Linear);
        assert_eq!(m.position(0.0), 20.0);
        assert!(m.is_finished(0.0));
    }
}
