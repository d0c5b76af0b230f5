// Copyright 2025 the Scrollstory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Shared progress-to-visual plumbing for pinned sections and reveals.

use kurbo::Size;
use scrollstory_progress::{Scrub, ScrubFollower};
use scrollstory_timeline::{Timeline, Visual};

use crate::AnimationHost;

#[derive(Clone, Debug)]
pub(crate) struct Driver<E> {
    timeline: Timeline<E>,
    follower: ScrubFollower,
    target: f64,
    viewport: Size,
    rendered: Option<f64>,
}

impl<E: Copy + PartialEq> Driver<E> {
    pub(crate) fn new(timeline: Timeline<E>, scrub: Scrub) -> Self {
        Self {
            timeline,
            follower: ScrubFollower::new(scrub),
            target: 0.0,
            viewport: Size::ZERO,
            rendered: None,
        }
    }

    pub(crate) fn timeline(&self) -> &Timeline<E> {
        &self.timeline
    }

    pub(crate) fn set_viewport(&mut self, viewport: Size) {
        if self.viewport != viewport {
            self.viewport = viewport;
            self.rendered = None;
        }
    }

    pub(crate) fn set_target(&mut self, progress: f64) {
        self.target = progress;
    }

    pub(crate) fn progress(&self) -> Option<f64> {
        self.rendered
    }

    pub(crate) fn is_animating(&self) -> bool {
        !self.follower.is_settled(self.target)
    }

    /// Advances the scrub by `dt` and renders if the progress moved.
    pub(crate) fn step<H: AnimationHost<E>>(&mut self, host: &mut H, dt: f64) {
        let p = self.follower.advance(self.target, dt);
        if self.rendered == Some(p) {
            return;
        }
        let viewport = self.viewport;
        self.timeline
            .sample(p, viewport, |element, visual| host.apply(element, visual));
        self.rendered = Some(p);
    }

    /// Shows every element fully entered and forgets scrub history.
    pub(crate) fn show_settled<H: AnimationHost<E>>(&mut self, host: &mut H) {
        let viewport = self.viewport;
        self.timeline
            .sample_settled(viewport, |element, visual| host.apply(element, visual));
        self.follower.reset();
        self.rendered = None;
    }

    /// Puts every element back into the safe default state.
    pub(crate) fn reset<H: AnimationHost<E>>(&mut self, host: &mut H) {
        for element in self.timeline.elements() {
            host.apply(element, &Visual::SETTLED);
        }
        self.follower.reset();
        self.target = 0.0;
        self.rendered = None;
    }
}
