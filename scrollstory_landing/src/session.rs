// Copyright 2025 the Scrollstory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Scripted scroll input against a [`Stage`].

use scrollstory_pin::AnimationHost;
use scrollstory_stage::Stage;

use crate::element::Element;
use crate::SessionConfig;

/// Upper bound on frames spent waiting for animations to come to rest.
const MAX_SETTLE_SECONDS: f64 = 10.0;

/// One completed snap.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SnapRecord {
    /// Scroll offset where the gesture ended.
    pub from: f64,
    /// Scroll offset the snap landed on.
    pub to: f64,
    /// Snap duration in seconds.
    pub duration: f64,
}

/// Drives a stage with simulated wheel gestures on a synthetic clock.
#[derive(Clone, Debug)]
pub struct Session {
    config: SessionConfig,
    now: f64,
    frames: usize,
    snaps: Vec<SnapRecord>,
}

impl Session {
    /// Creates a session whose clock starts at `start` seconds.
    #[must_use]
    pub fn new(config: SessionConfig, start: f64) -> Self {
        Self {
            config,
            now: start,
            frames: 0,
            snaps: Vec::new(),
        }
    }

    /// The synthetic clock.
    #[must_use]
    pub fn now(&self) -> f64 {
        self.now
    }

    /// Frames rendered so far.
    #[must_use]
    pub fn frames(&self) -> usize {
        self.frames
    }

    /// Snaps completed so far.
    #[must_use]
    pub fn snaps(&self) -> &[SnapRecord] {
        &self.snaps
    }

    /// Mounts the stage at the current time.
    pub fn mount<H: AnimationHost<Element>>(&mut self, stage: &mut Stage<Element, H>) {
        stage.mount(self.now);
        self.frame(stage);
    }

    /// Scrolls linearly to `to` over the configured gesture duration, waits
    /// for the gesture to go idle and lets any resulting snap play out.
    ///
    /// Returns the snap, if one happened.
    pub fn gesture<H: AnimationHost<Element>>(
        &mut self,
        stage: &mut Stage<Element, H>,
        to: f64,
    ) -> Option<SnapRecord> {
        let from = stage.scroll_y();
        let dt = self.config.frame_interval();
        #[expect(
            clippy::cast_possible_truncation,
            reason = "gesture lengths are a handful of frames"
        )]
        let steps = (self.config.gesture_duration / dt).ceil().clamp(1.0, 1e6) as u32;
        for i in 1..=steps {
            let t = f64::from(i) / f64::from(steps);
            self.advance();
            stage.scroll(from + (to - from) * t);
            self.frame(stage);
        }
        self.idle(stage, self.config.idle_delay);

        let motion = stage.scroll_end(to, self.now)?;
        tracing::info!(from = to, to = motion.target(), "snapping");
        let mut landed = to;
        let limit = self.now + motion.duration() + MAX_SETTLE_SECONDS;
        while stage.snap().is_snapping() && self.now < limit {
            self.advance();
            if let Some(y) = stage.frame(self.now) {
                landed = y;
            }
            self.frames += 1;
        }
        let record = SnapRecord {
            from: to,
            to: landed,
            duration: motion.duration(),
        };
        self.snaps.push(record);
        Some(record)
    }

    /// Runs frames for `seconds` without input.
    pub fn idle<H: AnimationHost<Element>>(&mut self, stage: &mut Stage<Element, H>, seconds: f64) {
        let end = self.now + seconds.max(0.0);
        while self.now < end {
            self.advance();
            self.frame(stage);
        }
    }

    /// Runs frames until nothing animates any more.
    pub fn settle<H: AnimationHost<Element>>(&mut self, stage: &mut Stage<Element, H>) {
        let limit = self.now + MAX_SETTLE_SECONDS;
        while stage.is_animating() && self.now < limit {
            self.advance();
            self.frame(stage);
        }
    }

    fn advance(&mut self) {
        self.now += self.config.frame_interval();
    }

    fn frame<H: AnimationHost<Element>>(&mut self, stage: &mut Stage<Element, H>) {
        stage.frame(self.now);
        self.frames += 1;
    }
}
