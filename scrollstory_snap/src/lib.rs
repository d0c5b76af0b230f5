// Copyright 2025 the Scrollstory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Scrollstory Snap: settle idle scroll gestures on pinned-region centers.
//!
//! Pinned sections are authored independently. Once they have all registered,
//! this crate reconciles them into one page-wide snap behavior: a gesture that
//! ends inside (or just beside) a pinned region glides to that region's
//! resting point, and a gesture that ends in the free-scrolling space between
//! regions stays where it is.
//!
//! - [`NormalizedRange`]: a pinned region as fractions of the total scroll
//!   distance (`maxScroll`).
//! - [`SnapPolicy`]: the snap-target function plus [`SnapTiming`].
//! - [`SettleGate`]: a readiness barrier that opens once every mounted section
//!   has measured, with a fallback deadline.
//! - [`SnapCoordinator`]: mount/tick/gesture/frame/unmount lifecycle, which
//!   installs the policy once the gate opens, rebuilds it when the registry
//!   changes, and drives programmatic [`SnapMotion`]s without re-snapping
//!   itself.
//!
//! ## Minimal example
//!
//! ```rust
//! use scrollstory_snap::{NormalizedRange, SnapConfig, SnapPolicy};
//!
//! let ranges = vec![
//!     NormalizedRange::from_fractions(0.02, 0.18).unwrap(),
//!     NormalizedRange::from_fractions(0.42, 0.58).unwrap(),
//!     NormalizedRange::from_fractions(0.82, 0.98).unwrap(),
//! ];
//! let policy = SnapPolicy::build(ranges, &SnapConfig::default()).unwrap();
//!
//! // Inside the middle region: pulled to its center.
//! let middle = policy.ranges()[1];
//! assert_eq!(policy.snap_to(0.48), middle.center());
//! assert!((middle.center() - 0.5).abs() < 1e-12);
//! // Free zone between regions: untouched.
//! assert_eq!(policy.snap_to(0.25), 0.25);
//! ```
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

mod coordinator;
mod gate;
mod motion;
mod policy;
mod range;

pub use coordinator::SnapCoordinator;
pub use gate::SettleGate;
pub use motion::SnapMotion;
pub use policy::{SnapConfig, SnapPolicy, SnapTiming};
pub use range::NormalizedRange;
