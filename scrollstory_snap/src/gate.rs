// Copyright 2025 the Scrollstory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Readiness barrier for installing the page-wide snap.

use scrollstory_pin::PinRegistry;

/// Opens once every expected section has measured, or when its deadline
/// passes, whichever comes first.
///
/// Once open it stays open until re-armed or cancelled; sections that report
/// late are picked up by the coordinator's rebuild instead.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct SettleGate {
    state: GateState,
}

#[derive(Clone, Copy, Debug, Default, PartialEq)]
enum GateState {
    #[default]
    Idle,
    Armed {
        deadline: f64,
        expected: usize,
    },
    Open,
}

impl SettleGate {
    /// Creates an idle gate. Idle gates never open on their own.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Arms the gate at `now`, waiting for `expected` ready regions or until
    /// `delay` seconds have passed.
    pub fn arm(&mut self, now: f64, delay: f64, expected: usize) {
        let delay = if delay.is_finite() { delay.max(0.0) } else { 0.0 };
        self.state = GateState::Armed {
            deadline: now + delay,
            expected,
        };
    }

    /// Returns the gate to idle.
    pub fn cancel(&mut self) {
        self.state = GateState::Idle;
    }

    /// Returns `true` if the gate has opened.
    #[must_use]
    pub fn is_open(&self) -> bool {
        self.state == GateState::Open
    }

    /// Returns `true` if the gate is waiting.
    #[must_use]
    pub fn is_armed(&self) -> bool {
        matches!(self.state, GateState::Armed { .. })
    }

    /// Checks the barrier, opening the gate if it is satisfied.
    ///
    /// Returns whether the gate is open after the check.
    pub fn poll(&mut self, now: f64, registry: &PinRegistry) -> bool {
        match self.state {
            GateState::Idle => false,
            GateState::Open => true,
            GateState::Armed { deadline, expected } => {
                let measured = registry.pending() == 0 && registry.ready() >= expected;
                if measured || now >= deadline {
                    self.state = GateState::Open;
                    true
                } else {
                    false
                }
            }
        }
    }
}
