// Copyright 2025 the Scrollstory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The pinned section controller.

use core::fmt::Debug;

use kurbo::Size;
use scrollstory_progress::{ScrollSpan, Scrub};
use scrollstory_timeline::Timeline;

use crate::driver::Driver;
use crate::{AnimationHost, PinRegistry, PinState, PinnedRegion, RegionId};

/// Default extra scroll distance, as a fraction of viewport height, on top of
/// one viewport height (`+=130%`).
const DEFAULT_OVERSHOOT: f64 = 0.3;

/// Default scrub lag in seconds.
const DEFAULT_SCRUB_LAG: f64 = 0.6;

/// Per-section pin configuration.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct PinConfig {
    /// Extra pinned distance beyond one viewport height, as a fraction of it.
    pub overshoot: f64,
    /// How animation progress follows scroll progress.
    pub scrub: Scrub,
}

impl Default for PinConfig {
    fn default() -> Self {
        Self {
            overshoot: DEFAULT_OVERSHOOT,
            scrub: Scrub::Lag(DEFAULT_SCRUB_LAG),
        }
    }
}

/// Errors from pinned section registration.
#[derive(Clone, Copy, Debug, PartialEq, thiserror::Error)]
pub enum PinError {
    /// The section has no usable geometry yet (zero height, not laid out, or a
    /// zero-size viewport). Retry after the next layout pass.
    #[error("section has no usable geometry (height {height}, band {band})")]
    InvalidRegion {
        /// Measured section height, `0.0` if unmeasurable.
        height: f64,
        /// Scroll band the section would reserve.
        band: f64,
    },
    /// The section's slot is not in the registry it was given.
    #[error("region {0:?} is not in the registry")]
    UnknownRegion(RegionId),
}

/// Controller for one pinned section.
///
/// The section reserves a registry slot on creation and stays pending until
/// [`register`](Self::register) succeeds. Until then it scrolls normally and
/// its timeline is not driven.
#[derive(Clone, Debug)]
pub struct SectionPin<E> {
    section: E,
    id: RegionId,
    config: PinConfig,
    driver: Driver<E>,
    region: Option<PinnedRegion>,
    state: Option<PinState>,
    passed_end: bool,
    holding_settled: bool,
}

impl<E: Copy + PartialEq + Debug> SectionPin<E> {
    /// Creates a controller for `section` and reserves its registry slot.
    pub fn new(
        section: E,
        timeline: Timeline<E>,
        config: PinConfig,
        registry: &mut PinRegistry,
    ) -> Self {
        Self {
            section,
            id: registry.reserve(),
            config,
            driver: Driver::new(timeline, config.scrub),
            region: None,
            state: None,
            passed_end: false,
            holding_settled: false,
        }
    }

    /// The section element.
    #[must_use]
    pub fn section(&self) -> E {
        self.section
    }

    /// The registry slot of this section.
    #[must_use]
    pub fn id(&self) -> RegionId {
        self.id
    }

    /// The pin configuration.
    #[must_use]
    pub fn config(&self) -> PinConfig {
        self.config
    }

    /// The section's timeline.
    #[must_use]
    pub fn timeline(&self) -> &Timeline<E> {
        self.driver.timeline()
    }

    /// The current pinned region, if registered.
    #[must_use]
    pub fn region(&self) -> Option<PinnedRegion> {
        self.region
    }

    /// Returns `true` once the section has measured and reserved its band.
    #[must_use]
    pub fn is_registered(&self) -> bool {
        self.region.is_some()
    }

    /// Last pin state reported to the host.
    #[must_use]
    pub fn state(&self) -> Option<PinState> {
        self.state
    }

    /// Local progress last rendered, if any.
    #[must_use]
    pub fn progress(&self) -> Option<f64> {
        self.driver.progress()
    }

    /// Returns `true` while the scrub is still catching up with the scroll.
    #[must_use]
    pub fn is_animating(&self) -> bool {
        self.region.is_some() && !self.holding_settled && self.driver.is_animating()
    }

    /// Measures the section and registers (or updates) its pinned region.
    ///
    /// The region starts when the section's top reaches the top of the
    /// viewport and spans `viewport.height * (1 + overshoot)`. Call again after
    /// any layout change; an unchanged measurement is a no-op for the registry.
    ///
    /// On [`PinError::InvalidRegion`] the section drops back to normal flow and
    /// its slot returns to pending.
    pub fn register<H: AnimationHost<E>>(
        &mut self,
        host: &mut H,
        registry: &mut PinRegistry,
        viewport: Size,
    ) -> Result<PinnedRegion, PinError> {
        let rect = host.measure(self.section);
        let height = rect.map_or(0.0, |r| r.height());
        let band = viewport.height * (1.0 + self.config.overshoot);
        let span = rect
            .filter(|_| height.is_finite() && height > 0.0)
            .and_then(|r| ScrollSpan::new(r.y0, r.y0 + band).ok());
        let Some(span) = span else {
            tracing::warn!(
                section = ?self.section,
                height,
                band,
                "pinned section has no usable geometry; leaving it unpinned"
            );
            self.detach(host);
            registry.mark_pending(self.id);
            return Err(PinError::InvalidRegion { height, band });
        };

        let region = PinnedRegion::new(span);
        if !registry.set(self.id, region) {
            return Err(PinError::UnknownRegion(self.id));
        }
        if self.region != Some(region) {
            host.reserve_scroll(self.section, span.length());
            tracing::debug!(
                section = ?self.section,
                start = region.start(),
                end = region.end(),
                "registered pinned region"
            );
        }
        self.region = Some(region);
        self.driver.set_viewport(viewport);
        Ok(region)
    }

    /// Feeds the current scroll offset through the timeline.
    ///
    /// Cheap enough to call on every animation frame: one pass over the managed
    /// elements, skipped entirely if the rendered progress did not change.
    pub fn on_scroll<H: AnimationHost<E>>(&mut self, host: &mut H, scroll_y: f64) {
        let Some(region) = self.region else {
            return;
        };
        let state = if scroll_y < region.start() {
            PinState::Before
        } else if scroll_y > region.end() {
            PinState::After
        } else {
            PinState::Pinned
        };

        if self.state != Some(state) {
            host.set_pin(self.section, state);
            let previous = self.state.replace(state);
            match state {
                PinState::After => self.passed_end = true,
                PinState::Before if previous.is_some() && self.passed_end => {
                    // Left back through the start after a full pass: show the
                    // entered state instead of replaying from the initial frame.
                    self.passed_end = false;
                    self.holding_settled = true;
                    self.driver.show_settled(host);
                    tracing::trace!(section = ?self.section, "leave-back reset");
                }
                PinState::Before => {}
                PinState::Pinned => self.holding_settled = false,
            }
        }

        if self.holding_settled {
            return;
        }
        self.driver.set_target(region.span().progress(scroll_y));
        self.driver.step(host, 0.0);
    }

    /// Advances the scrub lag by `dt` seconds.
    pub fn on_frame<H: AnimationHost<E>>(&mut self, host: &mut H, dt: f64) {
        if self.region.is_none() || self.holding_settled {
            return;
        }
        self.driver.step(host, dt);
    }

    /// Releases the pin and the reserved band, resets every element to
    /// [`Visual::SETTLED`](scrollstory_timeline::Visual::SETTLED), and removes
    /// the region from the registry.
    pub fn unregister<H: AnimationHost<E>>(mut self, host: &mut H, registry: &mut PinRegistry) {
        self.detach(host);
        registry.remove(self.id);
        tracing::debug!(section = ?self.section, "unregistered pinned section");
    }

    fn detach<H: AnimationHost<E>>(&mut self, host: &mut H) {
        if matches!(self.state, Some(PinState::Pinned | PinState::After)) {
            host.set_pin(self.section, PinState::Before);
        }
        if self.region.take().is_some() {
            host.release_scroll(self.section);
        }
        self.state = None;
        self.passed_end = false;
        self.holding_settled = false;
        self.driver.reset(host);
    }
}
