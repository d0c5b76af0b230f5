// Copyright 2025 the Scrollstory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Scrollstory Timeline: phase-based animation driven by local progress.
//!
//! A pinned section animates through three ordered phases as the user scrolls
//! through it:
//!
//! - **entrance**: elements fly in from their off-screen state,
//! - **settle**: elements hold position (often a plain pass-through),
//! - **exit**: elements leave toward their opposite off-screen state.
//!
//! Each phase owns a sub-range of local progress `[0, 1]` and a set of
//! [`Track`]s. A track applies property [`Tween`]s to one or more elements,
//! optionally staggered, with one [`Easing`] curve. The [`Timeline`] validates
//! that phases are contiguous and that every element's tweens chain without a
//! visual jump, then resolves any progress value into per-element [`Visual`]
//! states in a single pass.
//!
//! This crate does not touch any rendering or DOM API. Hosts receive resolved
//! [`Visual`]s and apply them through whatever primitives they have.
//!
//! ## Minimal example
//!
//! ```rust
//! use kurbo::Size;
//! use scrollstory_timeline::{Easing, Property, Timeline, Track, Value, Visual};
//!
//! const PHOTO: u32 = 1;
//!
//! let timeline = Timeline::builder()
//!     .split(0.3, 0.7)
//!     .entrance(
//!         Track::new([PHOTO])
//!             .tween(Property::X, Value::Vw(-55.0), Value::Num(0.0))
//!             .tween(Property::Opacity, 0.0, 1.0),
//!     )
//!     .exit(
//!         Track::new([PHOTO])
//!             .tween(Property::X, Value::Num(0.0), Value::Vw(-18.0))
//!             .tween(Property::Opacity, 1.0, 0.0)
//!             .easing(Easing::PowerIn(2)),
//!     )
//!     .build()
//!     .unwrap();
//!
//! let viewport = Size::new(1000.0, 800.0);
//! let mut seen = Visual::SETTLED;
//! timeline.sample(0.5, viewport, |_, visual| seen = *visual);
//! assert_eq!(seen, Visual::SETTLED);
//!
//! timeline.sample(0.0, viewport, |_, visual| seen = *visual);
//! assert_eq!(seen.offset.x, -550.0);
//! assert_eq!(seen.opacity, 0.0);
//! ```
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

mod easing;
mod playback;
mod timeline;
mod track;
mod value;
mod visual;

pub use easing::{Easing, EasingParseError};
pub use playback::Playback;
pub use timeline::{
    PhaseKind, PhasePosition, PhaseSpec, Timeline, TimelineBuilder, TimelineError,
};
pub use track::{Track, Tween};
pub use value::Value;
pub use visual::{Properties, Property, Visual};
