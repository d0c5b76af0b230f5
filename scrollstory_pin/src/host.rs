// Copyright 2025 the Scrollstory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The host seam: layout, pinning, and visual output.

use kurbo::Rect;
use scrollstory_timeline::Visual;

/// Where the scroll position is relative to a pinned region.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PinState {
    /// Scroll is above the region; the section flows normally.
    Before,
    /// Scroll is inside the region; the section is locked to the viewport.
    Pinned,
    /// Scroll is below the region; the section sits at the end of its band.
    After,
}

/// Operations the scroll engine needs from the page it runs on.
///
/// `E` is the host's handle for sections and animatable elements. All calls
/// happen on the UI thread; implementations may assume no reentrancy.
pub trait AnimationHost<E> {
    /// Bounding box of `element` in document coordinates, or `None` if it is
    /// not laid out.
    ///
    /// `y0` must already account for scroll space reserved by sections
    /// earlier in the document.
    fn measure(&self, element: E) -> Option<Rect>;

    /// Moves `section` into `state`. Only called on transitions.
    fn set_pin(&mut self, section: E, state: PinState);

    /// Reserves `extent` of extra scroll distance for `section`, replacing any
    /// earlier reservation.
    fn reserve_scroll(&mut self, section: E, extent: f64);

    /// Drops the reservation for `section` and restores normal flow.
    fn release_scroll(&mut self, section: E);

    /// Applies a resolved visual state to `element`.
    fn apply(&mut self, element: E, visual: &Visual);
}
