// Copyright 2025 the Scrollstory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! One-shot, time-driven timelines.

use kurbo::Size;
use scrollstory_pin::AnimationHost;
use scrollstory_timeline::{Playback, Timeline, Visual};

/// A timeline that plays once over a fixed duration when the page mounts,
/// independent of scroll.
#[derive(Clone, Debug)]
pub struct Intro<E> {
    timeline: Timeline<E>,
    playback: Playback,
    done: bool,
}

impl<E: Copy + PartialEq> Intro<E> {
    /// Creates an intro playing `timeline` over `duration` seconds.
    pub fn new(timeline: Timeline<E>, duration: f64) -> Self {
        Self {
            timeline,
            playback: Playback::new(duration),
            done: false,
        }
    }

    /// The intro's timeline.
    #[must_use]
    pub fn timeline(&self) -> &Timeline<E> {
        &self.timeline
    }

    /// Returns `true` while started and not yet finished.
    #[must_use]
    pub fn is_playing(&self) -> bool {
        self.playback.is_started() && !self.done
    }

    /// Returns `true` once the final frame has been rendered.
    #[must_use]
    pub fn is_done(&self) -> bool {
        self.done
    }

    /// Starts playback at `now` and renders the first frame.
    pub fn start<H: AnimationHost<E>>(&mut self, host: &mut H, now: f64, viewport: Size) {
        self.playback.start(now);
        self.done = false;
        self.render(host, now, viewport);
    }

    /// Renders the frame at `now`. Does nothing before start or after the end.
    pub fn render<H: AnimationHost<E>>(&mut self, host: &mut H, now: f64, viewport: Size) {
        if self.done {
            return;
        }
        let Some(p) = self.playback.progress(now) else {
            return;
        };
        self.timeline.sample(p, viewport, |e, v| host.apply(e, v));
        self.done = p >= 1.0;
    }

    /// Stops playback and restores every element to [`Visual::SETTLED`].
    pub fn reset<H: AnimationHost<E>>(&mut self, host: &mut H) {
        self.playback.stop();
        self.done = false;
        for element in self.timeline.elements() {
            host.apply(element, &Visual::SETTLED);
        }
    }
}
