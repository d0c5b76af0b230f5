// Copyright 2025 the Scrollstory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Page-level snap lifecycle.

use scrollstory_pin::PinRegistry;

use crate::{SettleGate, SnapConfig, SnapMotion, SnapPolicy};

/// Snap motions shorter than this (in pixels) are not started.
const MIN_SNAP_DISTANCE: f64 = 0.5;

/// Owns the page-wide snap policy and drives snap motions.
///
/// Lifecycle:
/// 1. [`mount`](Self::mount) arms the settle gate.
/// 2. [`tick`](Self::tick) runs every frame. Once the gate opens it builds the
///    policy from the registry, and rebuilds it whenever the registry's
///    generation or `maxScroll` changes.
/// 3. [`gesture_end`](Self::gesture_end) reports an idle scroll position and
///    may start a [`SnapMotion`]; [`frame`](Self::frame) advances it.
/// 4. [`unmount`](Self::unmount) tears everything down. A coordinator that was
///    unmounted before its gate opened never installs anything.
///
/// Motions started here do not trigger further snaps: gesture reports are
/// ignored while a motion is in flight, and the target of every motion is a
/// fixed point of the policy.
#[derive(Clone, Debug, Default)]
pub struct SnapCoordinator {
    config: SnapConfig,
    live: bool,
    gate: SettleGate,
    policy: Option<SnapPolicy>,
    built_for: Option<(u64, f64)>,
    max_scroll: f64,
    motion: Option<SnapMotion>,
}

impl SnapCoordinator {
    /// Creates an unmounted coordinator.
    #[must_use]
    pub fn new(config: SnapConfig) -> Self {
        Self {
            config,
            ..Self::default()
        }
    }

    /// The configuration in use.
    #[must_use]
    pub fn config(&self) -> &SnapConfig {
        &self.config
    }

    /// Starts waiting for `expected` pinned sections to measure.
    pub fn mount(&mut self, now: f64, expected: usize) {
        self.live = true;
        self.policy = None;
        self.built_for = None;
        self.motion = None;
        self.gate.arm(now, self.config.settle_delay, expected);
        tracing::debug!(expected, "snap coordinator mounted");
    }

    /// Removes the snap policy and stops any motion.
    pub fn unmount(&mut self) {
        self.live = false;
        self.gate.cancel();
        self.policy = None;
        self.built_for = None;
        self.motion = None;
        tracing::debug!("snap coordinator unmounted");
    }

    /// Returns `true` between [`mount`](Self::mount) and
    /// [`unmount`](Self::unmount).
    #[must_use]
    pub fn is_live(&self) -> bool {
        self.live
    }

    /// Returns `true` if a snap policy is installed.
    #[must_use]
    pub fn is_installed(&self) -> bool {
        self.policy.is_some()
    }

    /// The installed policy, if any.
    #[must_use]
    pub fn policy(&self) -> Option<&SnapPolicy> {
        self.policy.as_ref()
    }

    /// The motion in flight, if any.
    #[must_use]
    pub fn motion(&self) -> Option<&SnapMotion> {
        self.motion.as_ref()
    }

    /// Returns `true` while a snap motion is in flight.
    #[must_use]
    pub fn is_snapping(&self) -> bool {
        self.motion.is_some()
    }

    /// Polls the settle gate and keeps the policy in step with `registry`.
    pub fn tick(&mut self, now: f64, registry: &PinRegistry, max_scroll: f64) {
        if !self.live || !self.gate.poll(now, registry) {
            return;
        }
        let key = (registry.generation(), max_scroll);
        if self.built_for == Some(key) {
            return;
        }
        self.built_for = Some(key);
        self.max_scroll = max_scroll;
        self.policy = SnapPolicy::from_registry(registry, max_scroll, &self.config);
        if self.policy.is_none() {
            self.motion = None;
        }
        tracing::debug!(
            generation = registry.generation(),
            max_scroll,
            regions = self.policy.as_ref().map_or(0, |p| p.ranges().len()),
            "snap policy rebuilt"
        );
    }

    /// Reports that scrolling has gone idle at `scroll_y`.
    ///
    /// Starts and returns a snap motion if the position is captured by a
    /// pinned region and is not already at its center.
    pub fn gesture_end(&mut self, scroll_y: f64, now: f64) -> Option<SnapMotion> {
        if !self.live || self.motion.is_some() {
            return None;
        }
        // A policy only exists for a positive, finite `max_scroll`.
        let policy = self.policy.as_ref()?;
        if !scroll_y.is_finite() {
            return None;
        }
        let v = (scroll_y / self.max_scroll).clamp(0.0, 1.0);
        let target = policy.snap_to(v);
        let to = target * self.max_scroll;
        if target == v || (to - scroll_y).abs() < MIN_SNAP_DISTANCE {
            return None;
        }
        let timing = policy.timing();
        let motion = SnapMotion::new(
            scroll_y,
            to,
            now,
            timing.duration(target - v),
            timing.easing,
        );
        tracing::trace!(from = scroll_y, to, duration = motion.duration(), "snap");
        self.motion = Some(motion);
        Some(motion)
    }

    /// Advances the motion in flight, returning the scroll offset to apply.
    pub fn frame(&mut self, now: f64) -> Option<f64> {
        let motion = self.motion?;
        let y = motion.position(now);
        if motion.is_finished(now) {
            self.motion = None;
        }
        Some(y)
    }

    /// Abandons the motion in flight, for example when the user scrolls again.
    pub fn interrupt(&mut self) {
        self.motion = None;
    }
}
