// Copyright 2025 the Scrollstory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Time-driven playback of a timeline.
//!
//! Some sections also play a one-shot intro when the page loads, independent
//! of scroll. [`Playback`] turns host frame timestamps into local progress for
//! such a timeline.

/// Maps elapsed time to local progress over a fixed duration.
///
/// Timestamps are in seconds on any monotonic host clock.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Playback {
    duration: f64,
    started_at: Option<f64>,
}

impl Playback {
    /// Creates a stopped playback lasting `duration` seconds.
    ///
    /// Non-positive or non-finite durations complete instantly.
    #[must_use]
    pub fn new(duration: f64) -> Self {
        Self {
            duration: if duration.is_finite() { duration.max(0.0) } else { 0.0 },
            started_at: None,
        }
    }

    /// Total duration in seconds.
    #[must_use]
    pub fn duration(&self) -> f64 {
        self.duration
    }

    /// Starts (or restarts) playback at `now`.
    pub fn start(&mut self, now: f64) {
        self.started_at = Some(now);
    }

    /// Stops playback; [`progress`](Self::progress) returns `None` until restarted.
    pub fn stop(&mut self) {
        self.started_at = None;
    }

    /// Returns `true` if playback has been started.
    #[must_use]
    pub fn is_started(&self) -> bool {
        self.started_at.is_some()
    }

    /// Local progress at `now`, or `None` if not started.
    #[must_use]
    pub fn progress(&self, now: f64) -> Option<f64> {
        let started = self.started_at?;
        if self.duration <= 0.0 {
            return Some(1.0);
        }
        Some(((now - started) / self.duration).clamp(0.0, 1.0))
    }

    /// Returns `true` once playback has reached its end.
    #[must_use]
    pub fn is_finished(&self, now: f64) -> bool {
        self.progress(now) == Some(1.0)
    }
}
