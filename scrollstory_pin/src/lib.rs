// Copyright 2025 the Scrollstory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Scrollstory Pin: pinned section controllers and the pinned-region registry.
//!
//! A pinned section is locked in the viewport for a reserved band of scroll
//! distance (one viewport height plus an overshoot) while its
//! [`Timeline`](scrollstory_timeline::Timeline) plays through its phases.
//!
//! - [`AnimationHost`]: the seam to whatever actually owns layout and
//!   rendering. The host measures sections, pins and unpins them, reserves
//!   scroll space, and applies resolved visuals to elements.
//! - [`PinRegistry`]: the registration-ordered set of [`PinnedRegion`]s, with
//!   pending slots for sections that have not measured yet and a generation
//!   counter so readers know when to recompute.
//! - [`SectionPin`]: one pinned section. `register` measures and reserves,
//!   `on_scroll` / `on_frame` drive the timeline, `unregister` tears down.
//! - [`RevealTrigger`]: an unpinned, scrubbed animation keyed to an element
//!   crossing two viewport anchors. Reveals never enter the registry.
//!
//! ## Minimal example
//!
//! ```rust
//! use kurbo::{Rect, Size};
//! use scrollstory_pin::{AnimationHost, PinConfig, PinRegistry, PinState, SectionPin};
//! use scrollstory_progress::Scrub;
//! use scrollstory_timeline::{Property, Timeline, Track, Visual};
//!
//! #[derive(Default)]
//! struct Host {
//!     pinned: bool,
//!     last: Option<Visual>,
//! }
//!
//! impl AnimationHost<u32> for Host {
//!     fn measure(&self, _section: u32) -> Option<Rect> {
//!         Some(Rect::new(0.0, 800.0, 1000.0, 1600.0))
//!     }
//!     fn set_pin(&mut self, _section: u32, state: PinState) {
//!         self.pinned = state == PinState::Pinned;
//!     }
//!     fn reserve_scroll(&mut self, _section: u32, _extent: f64) {}
//!     fn release_scroll(&mut self, _section: u32) {}
//!     fn apply(&mut self, _element: u32, visual: &Visual) {
//!         self.last = Some(*visual);
//!     }
//! }
//!
//! let timeline = Timeline::builder()
//!     .exit(Track::new([2_u32]).tween(Property::Opacity, 1.0, 0.0))
//!     .build()
//!     .unwrap();
//! let config = PinConfig { scrub: Scrub::Immediate, ..PinConfig::default() };
//!
//! let mut host = Host::default();
//! let mut registry = PinRegistry::new();
//! let mut pin = SectionPin::new(1_u32, timeline, config, &mut registry);
//!
//! let region = pin
//!     .register(&mut host, &mut registry, Size::new(1000.0, 800.0))
//!     .unwrap();
//! assert_eq!(region.start(), 800.0);
//! assert_eq!(region.end(), 800.0 + 800.0 * 1.3);
//!
//! pin.on_scroll(&mut host, region.end());
//! assert_eq!(host.last.unwrap().opacity, 0.0);
//!
//! pin.on_scroll(&mut host, region.center());
//! assert!(host.pinned);
//! ```
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

mod driver;
mod host;
mod region;
mod reveal;
mod section;

pub use host::{AnimationHost, PinState};
pub use region::{PinRegistry, PinnedRegion, RegionId};
pub use reveal::RevealTrigger;
pub use section::{PinConfig, PinError, SectionPin};
