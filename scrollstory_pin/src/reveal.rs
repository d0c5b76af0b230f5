// Copyright 2025 the Scrollstory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Unpinned scroll-scrubbed reveals.

use core::fmt::Debug;

use kurbo::Size;
use scrollstory_progress::{Anchor, ScrollSpan, Scrub};
use scrollstory_timeline::Timeline;

use crate::driver::Driver;
use crate::{AnimationHost, PinError};

/// A scrubbed animation that plays while `trigger` scrolls between two
/// viewport anchors, without pinning anything.
///
/// Typical use is a card grid fading up as its top travels from 80% to 50% of
/// the viewport. Reveals do not reserve scroll space and never take part in
/// snapping.
#[derive(Clone, Debug)]
pub struct RevealTrigger<E> {
    trigger: E,
    start: Anchor,
    end: Anchor,
    driver: Driver<E>,
    span: Option<ScrollSpan>,
}

impl<E: Copy + PartialEq + Debug> RevealTrigger<E> {
    /// Creates a reveal for `trigger` between the `start` and `end` anchors.
    pub fn new(trigger: E, timeline: Timeline<E>, start: Anchor, end: Anchor, scrub: Scrub) -> Self {
        Self {
            trigger,
            start,
            end,
            driver: Driver::new(timeline, scrub),
            span: None,
        }
    }

    /// The element whose top is tracked.
    #[must_use]
    pub fn trigger(&self) -> E {
        self.trigger
    }

    /// The measured scroll span, if any.
    #[must_use]
    pub fn span(&self) -> Option<ScrollSpan> {
        self.span
    }

    /// The reveal's timeline.
    #[must_use]
    pub fn timeline(&self) -> &Timeline<E> {
        self.driver.timeline()
    }

    /// Returns `true` while the scrub is still catching up with the scroll.
    #[must_use]
    pub fn is_animating(&self) -> bool {
        self.span.is_some() && self.driver.is_animating()
    }

    /// Measures the trigger element and recomputes the span.
    ///
    /// On failure the reveal goes inert and its elements keep their natural
    /// state.
    pub fn measure<H: AnimationHost<E>>(
        &mut self,
        host: &mut H,
        viewport: Size,
    ) -> Result<ScrollSpan, PinError> {
        let rect = host.measure(self.trigger);
        let band = viewport.height * (self.start.0 - self.end.0);
        let span = rect.and_then(|r| {
            ScrollSpan::from_anchors(r.y0, viewport.height, self.start, self.end).ok()
        });
        let Some(span) = span else {
            let height = rect.map_or(0.0, |r| r.height());
            tracing::warn!(
                trigger = ?self.trigger,
                height,
                band,
                "reveal trigger has no usable geometry"
            );
            if self.span.take().is_some() {
                self.driver.reset(host);
            }
            return Err(PinError::InvalidRegion { height, band });
        };
        self.span = Some(span);
        self.driver.set_viewport(viewport);
        Ok(span)
    }

    /// Feeds the current scroll offset through the timeline.
    pub fn on_scroll<H: AnimationHost<E>>(&mut self, host: &mut H, scroll_y: f64) {
        let Some(span) = self.span else {
            return;
        };
        self.driver.set_target(span.progress(scroll_y));
        self.driver.step(host, 0.0);
    }

    /// Advances the scrub lag by `dt` seconds.
    pub fn on_frame<H: AnimationHost<E>>(&mut self, host: &mut H, dt: f64) {
        if self.span.is_some() {
            self.driver.step(host, dt);
        }
    }

    /// Resets every element to the safe default state and goes inert.
    pub fn reset<H: AnimationHost<E>>(mut self, host: &mut H) {
        self.span = None;
        self.driver.reset(host);
    }
}

#[cfg(test)]
mod tests {
    use alloc::vec::Vec;

    use kurbo::Rect;
    use scrollstory_timeline::{Property, Track, Visual};

    use super::*;
    use crate::PinState;

    const GRID: u32 = 10;
    const CARD_A: u32 = 11;
    const CARD_B: u32 = 12;

    #[derive(Default)]
    struct Host {
        grid_top: Option<f64>,
        applied: Vec<(u32, Visual)>,
        pinned: Vec<PinState>,
    }

    impl AnimationHost<u32> for Host {
        fn measure(&self, _element: u32) -> Option<Rect> {
            self.grid_top.map(|top| Rect::new(0.0, top, 1000.0, top + 600.0))
        }
        fn set_pin(&mut self, _section: u32, state: PinState) {
            self.pinned.push(state);
        }
        fn reserve_scroll(&mut self, _section: u32, _extent: f64) {}
        fn release_scroll(&mut self, _section: u32) {}
        fn apply(&mut self, element: u32, visual: &Visual) {
            self.applied.push((element, *visual));
        }
    }

    fn cards() -> RevealTrigger<u32> {
        let timeline = Timeline::builder()
            .split(1.0, 1.0)
            .entrance(
                Track::new([CARD_A, CARD_B])
                    .tween(Property::Y, 40.0, 0.0)
                    .tween(Property::Opacity, 0.0, 1.0)
                    .duration(0.6)
                    .stagger(0.4),
            )
            .build()
            .unwrap();
        RevealTrigger::new(GRID, timeline, Anchor(0.8), Anchor(0.5), Scrub::Immediate)
    }

    #[test]
    fn span_follows_anchors() {
        let mut host = Host {
            grid_top: Some(5000.0),
            ..Host::default()
        };
        let mut reveal = cards();
        let span = reveal.measure(&mut host, Size::new(1000.0, 800.0)).unwrap();
        assert_eq!(span.start(), 5000.0 - 640.0);
        assert_eq!(span.end(), 5000.0 - 400.0);
    }

    #[test]
    fn reveals_in_stagger_order_without_pinning() {
        let mut host = Host {
            grid_top: Some(5000.0),
            ..Host::default()
        };
        let mut reveal = cards();
        let span = reveal.measure(&mut host, Size::new(1000.0, 800.0)).unwrap();

        reveal.on_scroll(&mut host, span.offset_at(0.5));
        let a = host.applied.iter().rev().find(|(e, _)| *e == CARD_A).unwrap().1;
        let b = host.applied.iter().rev().find(|(e, _)| *e == CARD_B).unwrap().1;
        assert!(a.opacity > b.opacity);

        reveal.on_scroll(&mut host, span.end() + 100.0);
        let len = host.applied.len();
        assert_eq!(host.applied[len - 2].1, Visual::SETTLED);
        assert_eq!(host.applied[len - 1].1, Visual::SETTLED);
        assert!(host.pinned.is_empty());
    }

    #[test]
    fn unmeasured_reveal_is_inert() {
        let mut host = Host::default();
        let mut reveal = cards();
        assert!(reveal.measure(&mut host, Size::new(1000.0, 800.0)).is_err());
        reveal.on_scroll(&mut host, 4500.0);
        reveal.on_frame(&mut host, 0.016);
        assert!(host.applied.is_empty());
    }

    #[test]
    fn reset_restores_defaults() {
        let mut host = Host {
            grid_top: Some(5000.0),
            ..Host::default()
        };
        let mut reveal = cards();
        reveal.measure(&mut host, Size::new(1000.0, 800.0)).unwrap();
        reveal.on_scroll(&mut host, 0.0);
        reveal.reset(&mut host);
        let len = host.applied.len();
        assert_eq!(host.applied[len - 1], (CARD_B, Visual::SETTLED));
    }
}
