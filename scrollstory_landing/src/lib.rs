// Copyright 2025 the Scrollstory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Scrollstory Landing: the marketplace landing page as a scroll story.
//!
//! The page stacks nine sections. Five of them pin to the viewport while their
//! content plays entrance, settle and exit phases; the other four scroll
//! normally and reveal their content as it comes into view. Idle scrolling
//! snaps to the resting point of whichever pinned section it ended in.
//!
//! - [`page`]: the section timelines and [`page::compose`], which adds the
//!   whole page to a [`Stage`] in document order.
//! - [`RecordingHost`]: a headless [`AnimationHost`](scrollstory_pin::AnimationHost)
//!   that lays sections out as stacked blocks and records pins, scroll
//!   reservations and visuals.
//! - [`Session`]: scripted wheel gestures on a synthetic clock.
//! - [`LandingConfig`]: TOML configuration for all of the above.
//!
//! ## Example
//!
//! ```rust
//! use scrollstory_landing::{build_stage, Element, LandingConfig, Session};
//! use scrollstory_pin::PinState;
//!
//! let config = LandingConfig::default();
//! let mut stage = build_stage(&config).unwrap();
//! let mut session = Session::new(config.session, 0.0);
//! session.mount(&mut stage);
//!
//! // Stop a little past the middle of "how it works": the page glides back.
//! let how = stage.registry().regions().nth(1).unwrap().1;
//! let snap = session.gesture(&mut stage, how.center() + 100.0).unwrap();
//! assert!((snap.to - how.center()).abs() < 1e-6);
//! assert_eq!(stage.host().pin_state(Element::HowItWorks), Some(PinState::Pinned));
//!
//! stage.unmount();
//! assert!(stage.host().is_released());
//! ```

mod config;
mod element;
mod error;
mod host;
pub mod page;
mod session;

use kurbo::Size;
use scrollstory_stage::Stage;

pub use config::{LandingConfig, LayoutConfig, SessionConfig, ViewportConfig};
pub use element::{
    Element, CITY_CARDS, FEATURED_CARDS, FINAL_LINES, HERO_BADGES, HERO_WORDS, HOW_STEPS,
    INSTRUMENT_CARDS, PRICING_CARDS, TEACHER_PROPS,
};
pub use error::{LandingError, Result};
pub use host::RecordingHost;
pub use session::{Session, SnapRecord};

/// The landing page on a [`RecordingHost`].
pub type LandingStage = Stage<Element, RecordingHost>;

/// Builds the landing page on a fresh [`RecordingHost`] and lays it out.
pub fn build_stage(config: &LandingConfig) -> Result<LandingStage> {
    let viewport = config.viewport.size()?;
    let host = RecordingHost::new(viewport, &config.layout);
    let mut stage = Stage::new(host, config.stage);
    page::compose(&mut stage)?;
    relayout(&mut stage, viewport);
    Ok(stage)
}

/// Lays the page out for `viewport` and registers every section.
///
/// Registration reserves scroll space and so changes the scroll extent; the
/// page is laid out a second time so that snapping sees the final extent.
/// Returns the number of pinned sections that could not be measured.
pub fn relayout(stage: &mut LandingStage, viewport: Size) -> usize {
    stage.layout(viewport, stage.host().max_scroll());
    let max_scroll = stage.host().max_scroll();
    let unmeasured = stage.layout(viewport, max_scroll);
    if unmeasured > 0 {
        tracing::warn!(unmeasured, "pinned sections left in normal flow");
    }
    unmeasured
}

/// Applies a viewport change: re-lays the host out and re-registers every
/// section against the new size.
pub fn resize(stage: &mut LandingStage, viewport: Size, layout: &LayoutConfig) -> usize {
    stage.host_mut().resize(viewport, layout);
    relayout(stage, viewport)
}
