// Copyright 2025 the Scrollstory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use alloc::vec::Vec;
use core::fmt::Debug;

use kurbo::Size;
use scrollstory_pin::{
    AnimationHost, PinError, PinRegistry, RegionId, RevealTrigger, SectionPin,
};
use scrollstory_progress::{Anchor, Scrub};
use scrollstory_snap::{SnapCoordinator, SnapMotion};
use scrollstory_timeline::Timeline;

use crate::{Intro, StageConfig};

/// A scroll report this close to the last snap write is that write coming
/// back from the embedder, not a user scroll.
const WRITE_ECHO_TOLERANCE: f64 = 1.0;

/// A page's pinned sections, reveals, intros and snap coordinator, bound to
/// one host.
///
/// Sections must be added in document order: each registration reserves
/// scroll space that shifts every later section down.
#[derive(Debug)]
pub struct Stage<E, H> {
    host: H,
    config: StageConfig,
    registry: PinRegistry,
    sections: Vec<SectionPin<E>>,
    reveals: Vec<RevealTrigger<E>>,
    intros: Vec<Intro<E>>,
    snap: SnapCoordinator,
    viewport: Size,
    max_scroll: f64,
    scroll_y: f64,
    pending_write: Option<f64>,
    last_frame: Option<f64>,
    mounted: bool,
}

impl<E, H> Stage<E, H>
where
    E: Copy + PartialEq + Debug,
    H: AnimationHost<E>,
{
    /// Creates an unmounted stage on `host`.
    #[must_use]
    pub fn new(host: H, config: StageConfig) -> Self {
        Self {
            host,
            config,
            registry: PinRegistry::new(),
            sections: Vec::new(),
            reveals: Vec::new(),
            intros: Vec::new(),
            snap: SnapCoordinator::new(config.snap),
            viewport: Size::ZERO,
            max_scroll: 0.0,
            scroll_y: 0.0,
            pending_write: None,
            last_frame: None,
            mounted: false,
        }
    }

    /// The host.
    #[must_use]
    pub fn host(&self) -> &H {
        &self.host
    }

    /// The host, mutably. Call [`layout`](Self::layout) after changing
    /// anything that affects measurement.
    pub fn host_mut(&mut self) -> &mut H {
        &mut self.host
    }

    /// Consumes the stage, returning the host.
    #[must_use]
    pub fn into_host(self) -> H {
        self.host
    }

    /// The configuration in use.
    #[must_use]
    pub fn config(&self) -> &StageConfig {
        &self.config
    }

    /// The pinned-region registry.
    #[must_use]
    pub fn registry(&self) -> &PinRegistry {
        &self.registry
    }

    /// The snap coordinator.
    #[must_use]
    pub fn snap(&self) -> &SnapCoordinator {
        &self.snap
    }

    /// Pinned sections, in document order.
    #[must_use]
    pub fn sections(&self) -> &[SectionPin<E>] {
        &self.sections
    }

    /// Unpinned reveals, in insertion order.
    #[must_use]
    pub fn reveals(&self) -> &[RevealTrigger<E>] {
        &self.reveals
    }

    /// Time-driven intros, in insertion order.
    #[must_use]
    pub fn intros(&self) -> &[Intro<E>] {
        &self.intros
    }

    /// The most recent scroll offset.
    #[must_use]
    pub fn scroll_y(&self) -> f64 {
        self.scroll_y
    }

    /// Returns `true` between [`mount`](Self::mount) and
    /// [`unmount`](Self::unmount).
    #[must_use]
    pub fn is_mounted(&self) -> bool {
        self.mounted
    }

    /// Returns `true` while anything still needs frames: a scrub catching up,
    /// an intro playing or a snap in flight.
    #[must_use]
    pub fn is_animating(&self) -> bool {
        self.snap.is_snapping()
            || self.intros.iter().any(Intro::is_playing)
            || self.sections.iter().any(SectionPin::is_animating)
            || self.reveals.iter().any(RevealTrigger::is_animating)
    }

    /// Number of reveals whose trigger could not be measured at the last
    /// layout. They stay inert until a later layout succeeds.
    #[must_use]
    pub fn unmeasured_reveals(&self) -> usize {
        self.reveals.iter().filter(|r| r.span().is_none()).count()
    }

    /// Adds a pinned `section` driven by `timeline`.
    ///
    /// The section's slot is reserved immediately. It registers on the next
    /// [`layout`](Self::layout), or right away if the viewport is known.
    pub fn add_section(&mut self, section: E, timeline: Timeline<E>) -> RegionId {
        let mut pin = SectionPin::new(section, timeline, self.config.pin, &mut self.registry);
        let id = pin.id();
        if self.has_viewport() {
            // Failures are logged and leave the slot pending until the next layout.
            if pin
                .register(&mut self.host, &mut self.registry, self.viewport)
                .is_ok()
            {
                pin.on_scroll(&mut self.host, self.scroll_y);
            }
        }
        self.sections.push(pin);
        id
    }

    /// Adds an unpinned reveal that plays while `trigger`'s top travels from
    /// the `start` anchor to the `end` anchor of the viewport.
    pub fn add_reveal(
        &mut self,
        trigger: E,
        timeline: Timeline<E>,
        start: Anchor,
        end: Anchor,
        scrub: Scrub,
    ) {
        let mut reveal = RevealTrigger::new(trigger, timeline, start, end, scrub);
        if self.has_viewport() && reveal.measure(&mut self.host, self.viewport).is_ok() {
            reveal.on_scroll(&mut self.host, self.scroll_y);
        }
        self.reveals.push(reveal);
    }

    /// Adds an intro that plays `timeline` over `duration` seconds from
    /// [`mount`](Self::mount).
    pub fn add_intro(&mut self, timeline: Timeline<E>, duration: f64) {
        self.intros.push(Intro::new(timeline, duration));
    }

    /// Removes the pinned section with slot `id`, restoring its normal flow.
    ///
    /// Snapping stops considering the section on the next frame.
    pub fn remove_section(&mut self, id: RegionId) -> Result<(), PinError> {
        let idx = self
            .sections
            .iter()
            .position(|s| s.id() == id)
            .ok_or(PinError::UnknownRegion(id))?;
        let pin = self.sections.remove(idx);
        pin.unregister(&mut self.host, &mut self.registry);
        Ok(())
    }

    /// Starts the page at `now`: arms the snap settle gate for the sections
    /// added so far and starts every intro.
    pub fn mount(&mut self, now: f64) {
        self.mounted = true;
        self.last_frame = Some(now);
        self.snap.mount(now, self.sections.len());
        for intro in &mut self.intros {
            intro.start(&mut self.host, now, self.viewport);
        }
        tracing::debug!(
            sections = self.sections.len(),
            reveals = self.reveals.len(),
            intros = self.intros.len(),
            "stage mounted"
        );
    }

    /// Remeasures everything after a layout change and re-renders at the
    /// current scroll offset.
    ///
    /// Sections that failed to register earlier are retried. Returns the
    /// number of pinned sections still without usable geometry.
    pub fn layout(&mut self, viewport: Size, max_scroll: f64) -> usize {
        self.viewport = viewport;
        self.max_scroll = max_scroll;
        let mut unmeasured = 0;
        for pin in &mut self.sections {
            if pin
                .register(&mut self.host, &mut self.registry, viewport)
                .is_err()
            {
                unmeasured += 1;
            }
        }
        let mut inert = 0;
        for reveal in &mut self.reveals {
            if reveal.measure(&mut self.host, viewport).is_err() {
                inert += 1;
            }
        }
        if unmeasured > 0 || inert > 0 {
            tracing::debug!(
                sections = unmeasured,
                reveals = inert,
                "layout left triggers unmeasured"
            );
        }
        self.dispatch_scroll(self.scroll_y);
        unmeasured
    }

    /// Reports a scroll to `scroll_y`.
    ///
    /// A report matching the offset last returned by [`frame`](Self::frame)
    /// is the snap's own write and leaves the snap running. Any other offset is
    /// a user scroll and cancels the snap in flight.
    pub fn scroll(&mut self, scroll_y: f64) {
        let echo = self
            .pending_write
            .is_some_and(|y| (y - scroll_y).abs() <= WRITE_ECHO_TOLERANCE);
        if !echo {
            self.pending_write = None;
            self.snap.interrupt();
        }
        self.dispatch_scroll(scroll_y);
    }

    /// Reports that scrolling went idle at `scroll_y`.
    ///
    /// Returns the snap that was started, if any; [`frame`](Self::frame) then
    /// produces its scroll offsets.
    pub fn scroll_end(&mut self, scroll_y: f64, now: f64) -> Option<SnapMotion> {
        if !self.mounted {
            return None;
        }
        self.dispatch_scroll(scroll_y);
        self.snap.tick(now, &self.registry, self.max_scroll);
        let motion = self.snap.gesture_end(scroll_y, now);
        if motion.is_some() {
            self.pending_write = None;
        }
        motion
    }

    /// Advances everything time-driven to `now`.
    ///
    /// Returns the scroll offset the embedder should write if a snap is in
    /// flight.
    pub fn frame(&mut self, now: f64) -> Option<f64> {
        if !self.mounted {
            return None;
        }
        let dt = self.last_frame.map_or(0.0, |last| (now - last).max(0.0));
        self.last_frame = Some(now);

        self.snap.tick(now, &self.registry, self.max_scroll);
        let snapped = self.snap.frame(now);
        if let Some(y) = snapped {
            self.pending_write = Some(y);
            self.dispatch_scroll(y);
        }

        for intro in &mut self.intros {
            intro.render(&mut self.host, now, self.viewport);
        }
        for pin in &mut self.sections {
            pin.on_frame(&mut self.host, dt);
        }
        for reveal in &mut self.reveals {
            reveal.on_frame(&mut self.host, dt);
        }
        snapped
    }

    /// Tears the page down: cancels any pending or installed snap, unregisters
    /// every section and resets every animated element.
    ///
    /// Safe to call at any point after [`new`](Self::new), including before the
    /// snap settle gate has opened.
    pub fn unmount(&mut self) {
        self.snap.unmount();
        for pin in self.sections.drain(..) {
            pin.unregister(&mut self.host, &mut self.registry);
        }
        for reveal in self.reveals.drain(..) {
            reveal.reset(&mut self.host);
        }
        for intro in &mut self.intros {
            intro.reset(&mut self.host);
        }
        self.intros.clear();
        self.mounted = false;
        self.pending_write = None;
        self.last_frame = None;
        tracing::debug!("stage unmounted");
    }

    fn has_viewport(&self) -> bool {
        self.viewport.width > 0.0 && self.viewport.height > 0.0
    }

    fn dispatch_scroll(&mut self, scroll_y: f64) {
        self.scroll_y = scroll_y;
        for pin in &mut self.sections {
            pin.on_scroll(&mut self.host, scroll_y);
        }
        for reveal in &mut self.reveals {
            reveal.on_scroll(&mut self.host, scroll_y);
        }
    }
}

#[cfg(test)]
mod tests {
    use alloc::vec;
    use alloc::vec::Vec;

    use kurbo::Rect;
    use scrollstory_pin::{PinConfig, PinState};
    use scrollstory_timeline::{Property, Track, Visual};

    use super::*;

    const VIEWPORT: Size = Size::new(1000.0, 800.0);
    const MAX_SCROLL: f64 = 6280.0;

    const STORY: u32 = 10;
    const STORY_TITLE: u32 = 11;
    const TOOLS: u32 = 20;
    const TOOLS_CARD: u32 = 21;
    const PRICING: u32 = 30;
    const PRICING_CARD: u32 = 31;
    const HERO_TITLE: u32 = 40;

    /// A document of stacked blocks; reserved bands push later blocks down.
    #[derive(Debug, Default)]
    struct Page {
        blocks: Vec<(u32, f64, f64)>,
        reserved: Vec<(u32, f64)>,
        pins: Vec<(u32, PinState)>,
        visuals: Vec<(u32, Visual)>,
    }

    impl Page {
        fn landing() -> Self {
            Self {
                blocks: vec![
                    (STORY, 800.0, 800.0),
                    (TOOLS, 2400.0, 800.0),
                    (PRICING, 4000.0, 400.0),
                ],
                ..Self::default()
            }
        }

        fn natural_top(&self, element: u32) -> Option<f64> {
            self.blocks
                .iter()
                .find(|b| b.0 == element)
                .map(|b| b.1)
        }

        fn visual(&self, element: u32) -> Option<Visual> {
            self.visuals
                .iter()
                .rev()
                .find(|v| v.0 == element)
                .map(|v| v.1)
        }

        fn pin(&self, section: u32) -> Option<PinState> {
            self.pins.iter().rev().find(|p| p.0 == section).map(|p| p.1)
        }

        fn band(&self, section: u32) -> Option<f64> {
            self.reserved.iter().find(|r| r.0 == section).map(|r| r.1)
        }
    }

    impl AnimationHost<u32> for Page {
        fn measure(&self, element: u32) -> Option<Rect> {
            let &(_, top, height) = self.blocks.iter().find(|b| b.0 == element)?;
            let shift: f64 = self
                .reserved
                .iter()
                .filter(|(s, _)| self.natural_top(*s).is_some_and(|t| t < top))
                .map(|(_, band)| band)
                .sum();
            Some(Rect::new(0.0, top + shift, 1000.0, top + shift + height))
        }

        fn set_pin(&mut self, section: u32, state: PinState) {
            self.pins.push((section, state));
        }

        fn reserve_scroll(&mut self, section: u32, extent: f64) {
            self.reserved.retain(|r| r.0 != section);
            self.reserved.push((section, extent));
        }

        fn release_scroll(&mut self, section: u32) {
            self.reserved.retain(|r| r.0 != section);
        }

        fn apply(&mut self, element: u32, visual: &Visual) {
            self.visuals.push((element, *visual));
        }
    }

    fn fade_in_out(element: u32) -> Timeline<u32> {
        Timeline::builder()
            .entrance(Track::new([element]).tween(Property::Opacity, 0.0, 1.0))
            .exit(Track::new([element]).tween(Property::Opacity, 1.0, 0.0))
            .build()
            .unwrap()
    }

    fn fade_in(element: u32) -> Timeline<u32> {
        Timeline::builder()
            .split(1.0, 1.0)
            .entrance(Track::new([element]).tween(Property::Opacity, 0.0, 1.0))
            .build()
            .unwrap()
    }

    fn config() -> StageConfig {
        StageConfig {
            pin: PinConfig {
                scrub: Scrub::Immediate,
                ..PinConfig::default()
            },
            ..StageConfig::default()
        }
    }

    fn stage() -> Stage<u32, Page> {
        let mut stage = Stage::new(Page::landing(), config());
        stage.add_section(STORY, fade_in_out(STORY_TITLE));
        stage.add_section(TOOLS, fade_in_out(TOOLS_CARD));
        stage.add_reveal(
            PRICING,
            fade_in(PRICING_CARD),
            Anchor(0.8),
            Anchor(0.5),
            Scrub::Immediate,
        );
        stage
    }

    fn opacity(stage: &Stage<u32, Page>, element: u32) -> f64 {
        stage.host().visual(element).unwrap().opacity
    }

    #[test]
    fn layout_registers_in_document_order() {
        let mut stage = stage();
        assert_eq!(stage.registry().ready(), 0);
        assert_eq!(stage.layout(VIEWPORT, MAX_SCROLL), 0);

        let starts: Vec<f64> = stage.registry().regions().map(|(_, r)| r.start()).collect();
        assert_eq!(starts, vec![800.0, 3440.0]);
        assert_eq!(stage.host().band(STORY), Some(1040.0));
        assert_eq!(stage.host().band(TOOLS), Some(1040.0));
        assert_eq!(stage.reveals()[0].span().unwrap().start(), 5440.0);
    }

    #[test]
    fn scroll_drives_sections_and_reveals() {
        let mut stage = stage();
        stage.layout(VIEWPORT, MAX_SCROLL);

        stage.scroll(800.0);
        assert_eq!(stage.host().pin(STORY), Some(PinState::Pinned));
        assert_eq!(opacity(&stage, STORY_TITLE), 0.0);

        stage.scroll(1320.0);
        assert_eq!(opacity(&stage, STORY_TITLE), 1.0);

        stage.scroll(2000.0);
        assert_eq!(stage.host().pin(STORY), Some(PinState::After));
        assert_eq!(opacity(&stage, STORY_TITLE), 0.0);

        stage.scroll(5560.0);
        assert_eq!(opacity(&stage, PRICING_CARD), 0.5);
        stage.scroll(5680.0);
        assert_eq!(opacity(&stage, PRICING_CARD), 1.0);
    }

    #[test]
    fn idle_scroll_snaps_to_section_center() {
        let mut stage = stage();
        stage.layout(VIEWPORT, MAX_SCROLL);
        stage.mount(0.0);
        assert_eq!(stage.frame(0.0), None);
        assert!(stage.snap().is_installed());

        stage.scroll(1700.0);
        let motion = stage.scroll_end(1700.0, 1.0).unwrap();
        assert!((motion.target() - 1320.0).abs() < 1e-9);

        assert_eq!(stage.frame(1.0), Some(1700.0));
        let landed = stage.frame(2.0).unwrap();
        assert!((landed - 1320.0).abs() < 1e-9);
        assert_eq!(stage.scroll_y(), landed);
        assert_eq!(stage.frame(2.1), None);
        assert_eq!(opacity(&stage, STORY_TITLE), 1.0);
    }

    #[test]
    fn user_scroll_interrupts_snap() {
        let mut stage = stage();
        stage.layout(VIEWPORT, MAX_SCROLL);
        stage.mount(0.0);
        stage.frame(0.0);
        assert!(stage.scroll_end(1700.0, 1.0).is_some());
        stage.scroll(1750.0);
        assert!(!stage.snap().is_snapping());
        assert_eq!(stage.frame(1.1), None);
    }

    #[test]
    fn echoed_snap_writes_do_not_interrupt() {
        let mut stage = stage();
        stage.layout(VIEWPORT, MAX_SCROLL);
        stage.mount(0.0);
        stage.frame(0.0);
        stage.scroll(1700.0);
        let motion = stage.scroll_end(1700.0, 1.0).unwrap();

        // The embedder writes every frame offset and reports it back as a scroll.
        let mut now = 1.0;
        let mut last = None;
        while let Some(y) = stage.frame(now) {
            stage.scroll(y);
            last = Some(y);
            now += 1.0 / 60.0;
        }
        assert!((last.unwrap() - motion.target()).abs() < 1e-9);
        assert!(now > 1.0 + motion.duration());
        assert!((stage.scroll_y() - 1320.0).abs() < 1e-9);

        // Rounded echoes are still recognised.
        stage.scroll(1700.0);
        assert!(stage.scroll_end(1700.0, 5.0).is_some());
        let y = stage.frame(5.05).unwrap();
        stage.scroll(y.round());
        assert!(stage.snap().is_snapping());

        // A real user scroll still wins.
        stage.scroll(y - 40.0);
        assert!(!stage.snap().is_snapping());
    }

    #[test]
    fn free_zone_does_not_snap() {
        let mut stage = stage();
        stage.layout(VIEWPORT, MAX_SCROLL);
        stage.mount(0.0);
        stage.frame(0.0);
        assert_eq!(stage.scroll_end(2700.0, 1.0), None);
    }

    #[test]
    fn removed_section_stops_snapping() {
        let mut stage = stage();
        stage.layout(VIEWPORT, MAX_SCROLL);
        stage.mount(0.0);
        stage.frame(0.0);
        let story = stage.sections()[0].id();

        stage.remove_section(story).unwrap();
        assert_eq!(stage.host().band(STORY), None);
        assert_eq!(
            stage.remove_section(story),
            Err(PinError::UnknownRegion(story))
        );

        stage.frame(0.1);
        assert_eq!(stage.snap().policy().unwrap().ranges().len(), 1);
        assert_eq!(stage.scroll_end(1700.0, 1.0), None);
    }

    #[test]
    fn unmeasured_sections_are_retried() {
        let mut page = Page::landing();
        page.blocks.retain(|b| b.0 != TOOLS);
        let mut stage = Stage::new(page, config());
        stage.add_section(STORY, fade_in_out(STORY_TITLE));
        stage.add_section(TOOLS, fade_in_out(TOOLS_CARD));

        assert_eq!(stage.layout(VIEWPORT, MAX_SCROLL), 1);
        assert_eq!(stage.registry().pending(), 1);

        stage.host_mut().blocks.push((TOOLS, 2400.0, 800.0));
        assert_eq!(stage.layout(VIEWPORT, MAX_SCROLL), 0);
        assert_eq!(stage.registry().pending(), 0);
    }

    #[test]
    fn unmeasured_reveals_are_counted_and_retried() {
        let mut page = Page::landing();
        page.blocks.retain(|b| b.0 != PRICING);
        let mut stage = Stage::new(page, config());
        stage.add_reveal(
            PRICING,
            fade_in(PRICING_CARD),
            Anchor(0.8),
            Anchor(0.5),
            Scrub::Immediate,
        );

        assert_eq!(stage.layout(VIEWPORT, MAX_SCROLL), 0);
        assert_eq!(stage.unmeasured_reveals(), 1);
        stage.scroll(4000.0);
        assert_eq!(stage.host().visual(PRICING_CARD), None);

        stage.host_mut().blocks.push((PRICING, 4000.0, 400.0));
        stage.layout(VIEWPORT, MAX_SCROLL);
        assert_eq!(stage.unmeasured_reveals(), 0);
        assert_eq!(opacity(&stage, PRICING_CARD), 1.0);
    }

    #[test]
    fn unmount_before_settle_tears_down() {
        let mut stage = stage();
        stage.layout(VIEWPORT, MAX_SCROLL);
        stage.mount(0.0);
        stage.scroll(1000.0);
        stage.unmount();

        assert_eq!(stage.frame(10.0), None);
        assert!(!stage.snap().is_installed());
        assert!(stage.host().reserved.is_empty());
        assert_eq!(stage.host().pin(STORY), Some(PinState::Before));
        assert_eq!(stage.host().visual(STORY_TITLE), Some(Visual::SETTLED));
        assert_eq!(stage.host().visual(PRICING_CARD), Some(Visual::SETTLED));
        assert!(stage.registry().is_empty());
    }

    #[test]
    fn intro_plays_on_mount() {
        let mut stage = stage();
        stage.add_intro(fade_in(HERO_TITLE), 1.0);
        stage.layout(VIEWPORT, MAX_SCROLL);
        stage.mount(0.0);
        assert_eq!(opacity(&stage, HERO_TITLE), 0.0);
        assert!(stage.is_animating());

        stage.frame(0.5);
        assert_eq!(opacity(&stage, HERO_TITLE), 0.5);
        stage.frame(1.0);
        assert_eq!(opacity(&stage, HERO_TITLE), 1.0);
        assert!(stage.intros()[0].is_done());
        assert!(!stage.is_animating());
    }

    #[test]
    fn sections_added_after_layout_register_immediately() {
        let mut stage = Stage::new(Page::landing(), config());
        stage.layout(VIEWPORT, MAX_SCROLL);
        stage.add_section(STORY, fade_in_out(STORY_TITLE));
        assert_eq!(stage.registry().ready(), 1);
        assert_eq!(stage.host().pin(STORY), Some(PinState::Before));
    }
}
