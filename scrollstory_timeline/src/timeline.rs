// Copyright 2025 the Scrollstory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Phase specs, validation, and progress sampling.

use alloc::vec::Vec;

use kurbo::Size;
use smallvec::SmallVec;

use crate::{Easing, Properties, Property, Track, Value, Visual};

/// Default end of the entrance phase.
const DEFAULT_ENTRANCE_END: f64 = 0.3;
/// Default start of the exit phase.
const DEFAULT_EXIT_START: f64 = 0.7;

/// One of the three ordered phases of a section timeline.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum PhaseKind {
    /// Elements move from their initial state into place.
    Entrance,
    /// Elements hold position.
    Settle,
    /// Elements move out toward their final state.
    Exit,
}

impl PhaseKind {
    const ORDER: [Self; 3] = [Self::Entrance, Self::Settle, Self::Exit];
}

/// A phase: a sub-range `[from, to)` of local progress plus its tracks.
///
/// The exit phase additionally includes `to == 1.0`.
#[derive(Clone, Debug)]
pub struct PhaseSpec<E> {
    /// Which phase this is.
    pub kind: PhaseKind,
    /// Local progress at which the phase begins.
    pub from: f64,
    /// Local progress at which the phase ends.
    pub to: f64,
    /// Tracks animated during the phase.
    pub tracks: Vec<Track<E>>,
}

impl<E> PhaseSpec<E> {
    /// Creates a phase without tracks.
    #[must_use]
    pub fn new(kind: PhaseKind, from: f64, to: f64) -> Self {
        Self {
            kind,
            from,
            to,
            tracks: Vec::new(),
        }
    }

    /// Width of the phase in local progress.
    #[must_use]
    pub fn width(&self) -> f64 {
        self.to - self.from
    }
}

/// Where a local progress value falls among the phases.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PhasePosition {
    /// The active phase.
    pub kind: PhaseKind,
    /// Phase-local progress `q = (p - from) / (to - from)`.
    pub local: f64,
}

/// Error returned when a set of phases does not form a valid timeline.
#[derive(Clone, Copy, Debug, PartialEq, thiserror::Error)]
pub enum TimelineError {
    /// Phases are not exactly entrance, settle, exit in that order.
    #[error("phases must be entrance, settle, exit in order")]
    PhaseOrder,
    /// A phase ends before it starts, or has non-finite bounds.
    #[error("{kind:?} phase has invalid bounds")]
    InvertedPhase {
        /// The offending phase.
        kind: PhaseKind,
    },
    /// The phases do not start at 0 and end at 1.
    #[error("phases must cover [0, 1]")]
    Coverage,
    /// A phase does not begin where the previous one ended.
    #[error("phases are not contiguous at {at}")]
    Gap {
        /// End of the phase preceding the gap or overlap.
        at: f64,
    },
    /// A zero-width phase carries tracks that could never animate.
    #[error("{kind:?} phase has zero width but carries tracks")]
    EmptyPhaseWithTracks {
        /// The offending phase.
        kind: PhaseKind,
    },
    /// A track has a negative, empty, or non-finite window.
    #[error("{kind:?} phase has a track with an invalid window")]
    InvalidWindow {
        /// The offending phase.
        kind: PhaseKind,
    },
    /// A track tweens the same property twice.
    #[error("{kind:?} phase has a track tweening {property:?} twice")]
    DuplicateProperty {
        /// The offending phase.
        kind: PhaseKind,
        /// The repeated property.
        property: Property,
    },
    /// A tween endpoint is NaN or infinite.
    #[error("{kind:?} phase has a non-finite {property:?} value")]
    NonFiniteValue {
        /// The offending phase.
        kind: PhaseKind,
        /// The property with the bad value.
        property: Property,
    },
    /// Two tweens of the same element and property overlap in time.
    #[error("element #{element} has overlapping {property:?} tweens")]
    Overlap {
        /// Index of the element in first-seen order.
        element: usize,
        /// The overlapping property.
        property: Property,
    },
    /// A tween does not start where the previous tween of the same element and
    /// property ended, which would make the element jump.
    #[error("element #{element} jumps between {property:?} tweens")]
    Discontinuity {
        /// Index of the element in first-seen order.
        element: usize,
        /// The discontinuous property.
        property: Property,
    },
}

#[derive(Clone, Copy, Debug)]
struct Segment {
    start: f64,
    end: f64,
    from: Value,
    to: Value,
    easing: Easing,
}

impl Segment {
    fn value_at(&self, p: f64, viewport: Size) -> f64 {
        if p >= self.end || self.end <= self.start {
            return self.to.resolve(viewport);
        }
        let q = (p - self.start) / (self.end - self.start);
        let e = self.easing.apply(q);
        let from = self.from.resolve(viewport);
        if e == 0.0 {
            return from;
        }
        let to = self.to.resolve(viewport);
        if e == 1.0 {
            return to;
        }
        from + (to - from) * e
    }
}

#[derive(Clone, Debug)]
struct Channel {
    property: Property,
    segments: SmallVec<[Segment; 2]>,
}

impl Channel {
    fn value_at(&self, p: f64, viewport: Size) -> f64 {
        // Before the first tween the element rests at that tween's `from`.
        let Some(first) = self.segments.first() else {
            return Visual::SETTLED.get(self.property);
        };
        if p < first.start {
            return first.from.resolve(viewport);
        }
        // Last tween that has started wins.
        self.segments
            .iter()
            .rev()
            .find(|s| s.start <= p)
            .unwrap_or(first)
            .value_at(p, viewport)
    }
}

#[derive(Clone, Debug)]
struct ElementChannels<E> {
    element: E,
    properties: Properties,
    channels: SmallVec<[Channel; 4]>,
}

/// A validated entrance/settle/exit timeline over elements of type `E`.
///
/// `E` is whatever handle the host uses to address animatable elements.
#[derive(Clone, Debug)]
pub struct Timeline<E> {
    phases: Vec<PhaseSpec<E>>,
    elements: Vec<ElementChannels<E>>,
}

impl<E: Copy + PartialEq> Timeline<E> {
    /// Starts a builder with the default `0.3` / `0.7` phase split.
    #[must_use]
    pub fn builder() -> TimelineBuilder<E> {
        TimelineBuilder::default()
    }

    /// Validates `phases` and compiles them into a timeline.
    ///
    /// Requirements:
    /// - exactly one entrance, settle, and exit phase, in that order,
    /// - contiguous, non-overlapping, covering `[0, 1]`,
    /// - zero-width phases carry no tracks,
    /// - consecutive tweens of one element and property do not overlap and
    ///   chain without a jump.
    pub fn from_phases(phases: Vec<PhaseSpec<E>>) -> Result<Self, TimelineError> {
        if phases.len() != PhaseKind::ORDER.len()
            || phases.iter().zip(PhaseKind::ORDER).any(|(p, k)| p.kind != k)
        {
            return Err(TimelineError::PhaseOrder);
        }
        for phase in &phases {
            if !phase.from.is_finite() || !phase.to.is_finite() || phase.to < phase.from {
                return Err(TimelineError::InvertedPhase { kind: phase.kind });
            }
        }
        if phases[0].from != 0.0 || phases[phases.len() - 1].to != 1.0 {
            return Err(TimelineError::Coverage);
        }
        for pair in phases.windows(2) {
            if pair[0].to != pair[1].from {
                return Err(TimelineError::Gap { at: pair[0].to });
            }
        }

        let mut elements: Vec<ElementChannels<E>> = Vec::new();
        for phase in &phases {
            if phase.width() == 0.0 && !phase.tracks.is_empty() {
                return Err(TimelineError::EmptyPhaseWithTracks { kind: phase.kind });
            }
            for track in &phase.tracks {
                track.check(phase.kind)?;
                for (element, start, end) in track.windows() {
                    let idx = match elements.iter().position(|e| e.element == element) {
                        Some(idx) => idx,
                        None => {
                            elements.push(ElementChannels {
                                element,
                                properties: Properties::empty(),
                                channels: SmallVec::new(),
                            });
                            elements.len() - 1
                        }
                    };
                    let entry = &mut elements[idx];
                    for tween in track.tweens() {
                        let segment = Segment {
                            start: phase.from + phase.width() * start,
                            end: phase.from + phase.width() * end,
                            from: tween.from,
                            to: tween.to,
                            easing: track.easing_curve(),
                        };
                        if entry.properties.contains(tween.property.flag()) {
                            if let Some(channel) = entry
                                .channels
                                .iter_mut()
                                .find(|c| c.property == tween.property)
                            {
                                channel.segments.push(segment);
                            }
                        } else {
                            entry.properties |= tween.property.flag();
                            let mut segments = SmallVec::new();
                            segments.push(segment);
                            entry.channels.push(Channel {
                                property: tween.property,
                                segments,
                            });
                        }
                    }
                }
            }
        }

        for (element, entry) in elements.iter_mut().enumerate() {
            for channel in &mut entry.channels {
                channel.segments.sort_by(|a, b| a.start.total_cmp(&b.start));
                for pair in channel.segments.windows(2) {
                    if pair[1].start < pair[0].end {
                        return Err(TimelineError::Overlap {
                            element,
                            property: channel.property,
                        });
                    }
                    if !pair[0].to.is_equivalent(pair[1].from) {
                        return Err(TimelineError::Discontinuity {
                            element,
                            property: channel.property,
                        });
                    }
                }
            }
        }

        Ok(Self { phases, elements })
    }

    /// The validated phases, in order.
    #[must_use]
    pub fn phases(&self) -> &[PhaseSpec<E>] {
        &self.phases
    }

    /// Managed elements, in first-seen order.
    pub fn elements(&self) -> impl Iterator<Item = E> + '_ {
        self.elements.iter().map(|e| e.element)
    }

    /// Number of managed elements.
    #[must_use]
    pub fn len(&self) -> usize {
        self.elements.len()
    }

    /// Returns `true` if no element is animated.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    /// Properties animated on `element` anywhere in the timeline.
    #[must_use]
    pub fn animated(&self, element: E) -> Properties {
        self.elements
            .iter()
            .find(|e| e.element == element)
            .map_or(Properties::empty(), |e| e.properties)
    }

    /// Locates `p` among the phases.
    ///
    /// Zero-width phases are never active. `p` is clamped into `[0, 1]`; `1.0`
    /// belongs to the last non-empty phase.
    #[must_use]
    pub fn locate(&self, p: f64) -> PhasePosition {
        let p = if p.is_nan() { 0.0 } else { p.clamp(0.0, 1.0) };
        let mut last = None;
        for phase in self.phases.iter().filter(|ph| ph.width() > 0.0) {
            if p >= phase.from && p < phase.to {
                return PhasePosition {
                    kind: phase.kind,
                    local: (p - phase.from) / phase.width(),
                };
            }
            last = Some(phase.kind);
        }
        PhasePosition {
            kind: last.unwrap_or(PhaseKind::Exit),
            local: 1.0,
        }
    }

    /// Resolves every managed element at local progress `p` and hands each
    /// resolved [`Visual`] to `apply`, once per element, in first-seen order.
    ///
    /// Sampling is pure: the same `p` and `viewport` always yield the same
    /// visuals.
    pub fn sample(&self, p: f64, viewport: Size, mut apply: impl FnMut(E, &Visual)) {
        let p = if p.is_nan() { 0.0 } else { p.clamp(0.0, 1.0) };
        for entry in &self.elements {
            let mut visual = Visual::SETTLED;
            for channel in &entry.channels {
                visual.set(channel.property, channel.value_at(p, viewport));
            }
            apply(entry.element, &visual);
        }
    }

    /// Resolves one element at `p`, if it is managed by this timeline.
    #[must_use]
    pub fn visual_at(&self, element: E, p: f64, viewport: Size) -> Option<Visual> {
        let entry = self.elements.iter().find(|e| e.element == element)?;
        let p = if p.is_nan() { 0.0 } else { p.clamp(0.0, 1.0) };
        let mut visual = Visual::SETTLED;
        for channel in &entry.channels {
            visual.set(channel.property, channel.value_at(p, viewport));
        }
        Some(visual)
    }

    /// Local progress at which every element has fully entered: the start of
    /// the settle phase.
    #[must_use]
    pub fn settled_progress(&self) -> f64 {
        self.phases[1].from
    }

    /// Resolves every element in its fully-entered state.
    pub fn sample_settled(&self, viewport: Size, apply: impl FnMut(E, &Visual)) {
        self.sample(self.settled_progress(), viewport, apply);
    }
}

/// Builder for a [`Timeline`] with the usual three-phase split.
#[derive(Clone, Debug)]
pub struct TimelineBuilder<E> {
    entrance_end: f64,
    exit_start: f64,
    entrance: Vec<Track<E>>,
    settle: Vec<Track<E>>,
    exit: Vec<Track<E>>,
}

impl<E> Default for TimelineBuilder<E> {
    fn default() -> Self {
        Self {
            entrance_end: DEFAULT_ENTRANCE_END,
            exit_start: DEFAULT_EXIT_START,
            entrance: Vec::new(),
            settle: Vec::new(),
            exit: Vec::new(),
        }
    }
}

impl<E: Copy + PartialEq> TimelineBuilder<E> {
    /// Sets the phase split: entrance is `[0, entrance_end)`, settle is
    /// `[entrance_end, exit_start)`, exit is `[exit_start, 1]`.
    #[must_use]
    pub fn split(mut self, entrance_end: f64, exit_start: f64) -> Self {
        self.entrance_end = entrance_end;
        self.exit_start = exit_start;
        self
    }

    /// Adds a track to the entrance phase.
    #[must_use]
    pub fn entrance(mut self, track: Track<E>) -> Self {
        self.entrance.push(track);
        self
    }

    /// Adds a track to the settle phase.
    #[must_use]
    pub fn settle(mut self, track: Track<E>) -> Self {
        self.settle.push(track);
        self
    }

    /// Adds a track to the exit phase.
    #[must_use]
    pub fn exit(mut self, track: Track<E>) -> Self {
        self.exit.push(track);
        self
    }

    /// Validates and compiles the timeline.
    pub fn build(self) -> Result<Timeline<E>, TimelineError> {
        let mut entrance = PhaseSpec::new(PhaseKind::Entrance, 0.0, self.entrance_end);
        entrance.tracks = self.entrance;
        let mut settle = PhaseSpec::new(PhaseKind::Settle, self.entrance_end, self.exit_start);
        settle.tracks = self.settle;
        let mut exit = PhaseSpec::new(PhaseKind::Exit, self.exit_start, 1.0);
        exit.tracks = self.exit;
        Timeline::from_phases(alloc::vec![entrance, settle, exit])
    }
}
