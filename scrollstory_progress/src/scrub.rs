// Copyright 2025 the Scrollstory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Lagged progress following ("scrub").
//!
//! A scrubbed animation does not jump with the scroll position. Instead the
//! progress fed into the timeline chases the raw scroll progress and covers
//! about 95% of any jump within the configured lag.

/// How a region's animation progress follows its scroll progress.
#[derive(Clone, Copy, Debug, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Scrub {
    /// Animation progress equals scroll progress.
    #[default]
    Immediate,
    /// Animation progress trails scroll progress by roughly this many seconds.
    Lag(f64),
}

/// `ln(20)`: after one lag period the remaining distance is 5%.
const LAG_RATE: f64 = 2.995_732_273_553_991;

/// Distance below which the follower lands exactly on its target.
const SETTLE_EPSILON: f64 = 1e-4;

/// Tracks the current animation progress for one [`Scrub`] mode.
#[derive(Clone, Copy, Debug, Default)]
pub struct ScrubFollower {
    scrub: Scrub,
    current: Option<f64>,
}

impl ScrubFollower {
    /// Creates a follower with no history; the first advance lands on target.
    #[must_use]
    pub fn new(scrub: Scrub) -> Self {
        Self {
            scrub,
            current: None,
        }
    }

    /// The configured scrub mode.
    #[must_use]
    pub fn scrub(&self) -> Scrub {
        self.scrub
    }

    /// Last emitted progress, if any.
    #[must_use]
    pub fn current(&self) -> Option<f64> {
        self.current
    }

    /// Moves toward `target` over `dt` seconds and returns the new progress.
    ///
    /// The result depends only on the previous value, `target`, and `dt`, so
    /// repeated frames with `dt == 0` are no-ops.
    pub fn advance(&mut self, target: f64, dt: f64) -> f64 {
        let target = target.clamp(0.0, 1.0);
        let next = match (self.scrub, self.current) {
            (Scrub::Lag(lag), Some(current)) if lag.is_finite() && lag > 0.0 => {
                let dt = if dt.is_finite() { dt.max(0.0) } else { 0.0 };
                let alpha = 1.0 - libm::exp(-LAG_RATE * dt / lag);
                let next = current + (target - current) * alpha;
                if (target - next).abs() < SETTLE_EPSILON {
                    target
                } else {
                    next
                }
            }
            _ => target,
        };
        self.current = Some(next);
        next
    }

    /// Forces the current progress, skipping any lag.
    pub fn jump(&mut self, progress: f64) {
        self.current = Some(progress.clamp(0.0, 1.0));
    }

    /// Forgets history so the next [`advance`](Self::advance) lands on target.
    pub fn reset(&mut self) {
        self.current = None;
    }

    /// Returns `true` if the follower has caught up with `target`.
    #[must_use]
    pub fn is_settled(&self, target: f64) -> bool {
        self.current == Some(target.clamp(0.0, 1.0))
    }
}
