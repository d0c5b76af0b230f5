// Copyright 2025 the Scrollstory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Scrollstory Progress: map document scroll offsets to local region progress.
//!
//! Every scroll-driven animation on a page is keyed to a span of absolute
//! scroll offsets. This crate turns "where is the page scrolled to" into
//! "how far through this span are we", as a value in `[0, 1]`.
//!
//! - [`ScrollSpan`]: a validated `[start, end]` range of scroll offsets with a
//!   pure, monotonic [`ScrollSpan::progress`] mapping.
//! - [`Anchor`]: "top of element meets N% of the viewport" trigger points, used
//!   by [`ScrollSpan::from_anchors`] to build spans for unpinned reveals.
//! - [`Scrub`] and [`ScrubFollower`]: an optional lag between the raw scroll
//!   progress and the progress fed to a timeline, so that animations ease into
//!   place after the scroll stops instead of tracking it one-to-one.
//!
//! ## Minimal example
//!
//! ```rust
//! use scrollstory_progress::ScrollSpan;
//!
//! // A pinned region that engages at 1200px and releases at 2600px.
//! let span = ScrollSpan::new(1200.0, 2600.0).unwrap();
//!
//! assert_eq!(span.progress(1200.0), 0.0);
//! assert_eq!(span.progress(1900.0), 0.5);
//! assert_eq!(span.progress(2600.0), 1.0);
//!
//! // Offsets outside the span clamp.
//! assert_eq!(span.progress(0.0), 0.0);
//! assert_eq!(span.progress(9000.0), 1.0);
//! ```
//!
//! All offsets live in a caller-chosen 1D coordinate space (typically CSS
//! pixels of document scroll). This crate is `no_std`.

#![no_std]

mod scrub;
mod span;

pub use scrub::{Scrub, ScrubFollower};
pub use span::{Anchor, ScrollSpan, SpanError};
