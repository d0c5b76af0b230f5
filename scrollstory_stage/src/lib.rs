// Copyright 2025 the Scrollstory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Scrollstory Stage: one page's scroll choreography on one host.
//!
//! A [`Stage`] owns the [`AnimationHost`], the [`PinRegistry`], every
//! [`SectionPin`] and [`RevealTrigger`] on the page, the time-driven intros,
//! and the [`SnapCoordinator`]. The embedding event loop forwards a handful of
//! events and the stage dispatches them:
//!
//! | Event | Call |
//! |---|---|
//! | Page mounted | [`Stage::mount`] |
//! | Resize, font or image load | [`Stage::layout`] |
//! | User scroll | [`Stage::scroll`] |
//! | Scrolling went idle | [`Stage::scroll_end`] |
//! | Animation frame | [`Stage::frame`] |
//! | Page unmounted | [`Stage::unmount`] |
//!
//! [`Stage::frame`] returns a scroll offset whenever a snap is in flight; the
//! embedder writes it to the real scroll position without reporting it back
//! as a user scroll.
//!
//! ## Minimal example
//!
//! ```rust
//! use kurbo::{Rect, Size};
//! use scrollstory_pin::{AnimationHost, PinState};
//! use scrollstory_stage::{Stage, StageConfig};
//! use scrollstory_timeline::{Property, Timeline, Track, Visual};
//!
//! #[derive(Default)]
//! struct Page {
//!     band: f64,
//!     opacity: f64,
//! }
//!
//! impl AnimationHost<u32> for Page {
//!     fn measure(&self, element: u32) -> Option<Rect> {
//!         (element == 1).then(|| Rect::new(0.0, 800.0, 1000.0, 1600.0))
//!     }
//!     fn set_pin(&mut self, _: u32, _: PinState) {}
//!     fn reserve_scroll(&mut self, _: u32, extent: f64) {
//!         self.band = extent;
//!     }
//!     fn release_scroll(&mut self, _: u32) {
//!         self.band = 0.0;
//!     }
//!     fn apply(&mut self, _: u32, visual: &Visual) {
//!         self.opacity = visual.opacity;
//!     }
//! }
//!
//! let timeline = Timeline::builder()
//!     .entrance(Track::new([2_u32]).tween(Property::Opacity, 0.0, 1.0))
//!     .build()
//!     .unwrap();
//!
//! let mut stage = Stage::new(Page::default(), StageConfig::default());
//! stage.add_section(1, timeline);
//! stage.mount(0.0);
//! stage.layout(Size::new(1000.0, 800.0), 6000.0);
//! assert_eq!(stage.host().band, 1040.0);
//!
//! stage.frame(0.0);
//! assert!(stage.snap().is_installed());
//!
//! stage.unmount();
//! assert_eq!(stage.host().band, 0.0);
//! assert_eq!(stage.host().opacity, 1.0);
//! ```
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

mod config;
mod intro;
mod stage;

pub use config::StageConfig;
pub use intro::Intro;
pub use stage::Stage;

#[doc(no_inline)]
pub use scrollstory_pin::{AnimationHost, PinRegistry, RevealTrigger, SectionPin};
#[doc(no_inline)]
pub use scrollstory_snap::SnapCoordinator;
