// Copyright 2025 the Scrollstory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Pinned regions and their registry.

use alloc::vec::Vec;

use scrollstory_progress::ScrollSpan;

/// Stable identifier of a registry slot.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RegionId(u32);

impl RegionId {
    /// Raw slot number, unique within one registry.
    #[must_use]
    pub fn get(self) -> u32 {
        self.0
    }
}

/// The band of scroll offsets during which one section is pinned.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PinnedRegion {
    span: ScrollSpan,
}

impl PinnedRegion {
    /// Wraps a validated span.
    #[must_use]
    pub fn new(span: ScrollSpan) -> Self {
        Self { span }
    }

    /// Scroll offset at which the pin engages.
    #[must_use]
    pub fn start(&self) -> f64 {
        self.span.start()
    }

    /// Scroll offset at which the pin releases.
    #[must_use]
    pub fn end(&self) -> f64 {
        self.span.end()
    }

    /// Resting point: `start + (end - start) * 0.5`.
    #[must_use]
    pub fn center(&self) -> f64 {
        self.span.center()
    }

    /// The underlying span.
    #[must_use]
    pub fn span(&self) -> ScrollSpan {
        self.span
    }
}

#[derive(Clone, Debug)]
struct Slot {
    id: RegionId,
    region: Option<PinnedRegion>,
}

/// Registration-ordered set of pinned regions.
///
/// Sections reserve a slot when they mount and fill it once they have measured
/// non-zero geometry. Slots without a region are *pending*; readers skip them.
/// Every change that affects the set of ready regions bumps
/// [`generation`](Self::generation).
#[derive(Clone, Debug, Default)]
pub struct PinRegistry {
    slots: Vec<Slot>,
    next_id: u32,
    generation: u64,
}

impl PinRegistry {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Reserves a pending slot at the end of the registration order.
    pub fn reserve(&mut self) -> RegionId {
        let id = RegionId(self.next_id);
        self.next_id += 1;
        self.slots.push(Slot { id, region: None });
        id
    }

    /// Fills or updates the slot `id`. Returns `false` if `id` is unknown.
    pub fn set(&mut self, id: RegionId, region: PinnedRegion) -> bool {
        let Some(slot) = self.slots.iter_mut().find(|s| s.id == id) else {
            return false;
        };
        if slot.region != Some(region) {
            slot.region = Some(region);
            self.generation += 1;
        }
        true
    }

    /// Returns the slot `id` to pending, for example when a remeasure fails.
    pub fn mark_pending(&mut self, id: RegionId) {
        if let Some(slot) = self.slots.iter_mut().find(|s| s.id == id) {
            if slot.region.take().is_some() {
                self.generation += 1;
            }
        }
    }

    /// Removes the slot `id`, returning its region if it had one.
    pub fn remove(&mut self, id: RegionId) -> Option<PinnedRegion> {
        let idx = self.slots.iter().position(|s| s.id == id)?;
        let slot = self.slots.remove(idx);
        self.generation += 1;
        slot.region
    }

    /// Returns `true` if `id` has a slot, pending or not.
    #[must_use]
    pub fn contains(&self, id: RegionId) -> bool {
        self.slots.iter().any(|s| s.id == id)
    }

    /// The region for `id`, if it is ready.
    #[must_use]
    pub fn get(&self, id: RegionId) -> Option<PinnedRegion> {
        self.slots.iter().find(|s| s.id == id)?.region
    }

    /// Ready regions in registration order.
    pub fn regions(&self) -> impl Iterator<Item = (RegionId, PinnedRegion)> + '_ {
        self.slots
            .iter()
            .filter_map(|s| s.region.map(|r| (s.id, r)))
    }

    /// Number of slots still measuring.
    #[must_use]
    pub fn pending(&self) -> usize {
        self.slots.iter().filter(|s| s.region.is_none()).count()
    }

    /// Number of ready regions.
    #[must_use]
    pub fn ready(&self) -> usize {
        self.slots.len() - self.pending()
    }

    /// Total number of slots.
    #[must_use]
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    /// Returns `true` if there are no slots at all.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Counter bumped whenever the set of ready regions changes.
    #[must_use]
    pub fn generation(&self) -> u64 {
        self.generation
    }
}
