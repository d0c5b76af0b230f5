// Copyright 2025 the Scrollstory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use scrollstory_pin::PinConfig;
use scrollstory_snap::SnapConfig;

/// Page-wide configuration of a [`Stage`](crate::Stage).
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct StageConfig {
    /// Applied to every pinned section added with
    /// [`Stage::add_section`](crate::Stage::add_section).
    pub pin: PinConfig,
    /// Snap behavior across all pinned sections.
    pub snap: SnapConfig,
}
