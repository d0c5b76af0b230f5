// Copyright 2025 the Scrollstory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Absolute scroll spans and the progress mapping over them.

/// Error returned when a [`ScrollSpan`] cannot be constructed.
#[derive(Clone, Copy, Debug, PartialEq, thiserror::Error)]
pub enum SpanError {
    /// The span has zero or negative length.
    #[error("scroll span is empty: start {start} >= end {end}")]
    Empty {
        /// Requested start offset.
        start: f64,
        /// Requested end offset.
        end: f64,
    },
    /// One of the bounds is NaN or infinite.
    #[error("scroll span bounds must be finite")]
    NonFinite,
}

/// A point on the viewport, as a fraction of its height from the top.
///
/// `Anchor::TOP` is the top edge (`top top` in trigger notation), `Anchor(0.8)`
/// is 80% of the way down.
#[derive(Clone, Copy, Debug, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Anchor(pub f64);

impl Anchor {
    /// The top edge of the viewport.
    pub const TOP: Self = Self(0.0);
    /// The vertical center of the viewport.
    pub const CENTER: Self = Self(0.5);
    /// The bottom edge of the viewport.
    pub const BOTTOM: Self = Self(1.0);

    /// Scroll offset at which an element whose top is at `element_top` reaches
    /// this anchor in a viewport of `viewport_height`.
    #[must_use]
    pub fn offset_for(self, element_top: f64, viewport_height: f64) -> f64 {
        element_top - viewport_height * self.0
    }
}

/// A validated range `[start, end]` of absolute scroll offsets.
///
/// Invariant: `start` and `end` are finite and `start < end`, so
/// [`progress`](Self::progress) never divides by zero.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ScrollSpan {
    start: f64,
    end: f64,
}

impl ScrollSpan {
    /// Creates a span, rejecting empty and non-finite ranges.
    pub fn new(start: f64, end: f64) -> Result<Self, SpanError> {
        if !start.is_finite() || !end.is_finite() {
            return Err(SpanError::NonFinite);
        }
        if end <= start {
            return Err(SpanError::Empty { start, end });
        }
        Ok(Self { start, end })
    }

    /// Creates a span from two viewport anchors for an element at `element_top`.
    ///
    /// The span starts when the element's top reaches `start` and ends when it
    /// reaches `end`. With anchors further down the viewport first (for example
    /// `0.8` then `0.55`) this yields a forward span.
    pub fn from_anchors(
        element_top: f64,
        viewport_height: f64,
        start: Anchor,
        end: Anchor,
    ) -> Result<Self, SpanError> {
        Self::new(
            start.offset_for(element_top, viewport_height),
            end.offset_for(element_top, viewport_height),
        )
    }

    /// Scroll offset at which the span begins.
    #[must_use]
    pub fn start(&self) -> f64 {
        self.start
    }

    /// Scroll offset at which the span ends.
    #[must_use]
    pub fn end(&self) -> f64 {
        self.end
    }

    /// Length of the span in scroll units. Always positive.
    #[must_use]
    pub fn length(&self) -> f64 {
        self.end - self.start
    }

    /// Midpoint of the span.
    #[must_use]
    pub fn center(&self) -> f64 {
        self.start + (self.end - self.start) * 0.5
    }

    /// Returns `true` if `scroll_y` lies within `[start, end]`.
    #[must_use]
    pub fn contains(&self, scroll_y: f64) -> bool {
        scroll_y >= self.start && scroll_y <= self.end
    }

    /// Local progress through the span, clamped to `[0, 1]`.
    ///
    /// Returns exactly `0.0` at or before `start` and exactly `1.0` at or after
    /// `end`. NaN input maps to `0.0`.
    #[must_use]
    pub fn progress(&self, scroll_y: f64) -> f64 {
        if scroll_y.is_nan() || scroll_y <= self.start {
            return 0.0;
        }
        if scroll_y >= self.end {
            return 1.0;
        }
        ((scroll_y - self.start) / (self.end - self.start)).clamp(0.0, 1.0)
    }

    /// Inverse of [`progress`](Self::progress): the scroll offset at `progress`.
    #[must_use]
    pub fn offset_at(&self, progress: f64) -> f64 {
        self.start + (self.end - self.start) * progress.clamp(0.0, 1.0)
    }
}
