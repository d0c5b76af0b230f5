// Copyright 2025 the Scrollstory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use std::path::PathBuf;

use scrollstory_timeline::TimelineError;

/// Errors from assembling or configuring the landing page.
#[derive(Debug, thiserror::Error)]
pub enum LandingError {
    /// A section timeline failed validation.
    #[error("invalid section timeline: {0}")]
    Timeline(#[from] TimelineError),
    /// The configuration file is not valid TOML for [`LandingConfig`](crate::LandingConfig).
    #[error("invalid configuration: {0}")]
    ConfigParse(#[from] toml::de::Error),
    /// The configuration could not be written as TOML.
    #[error("cannot serialize configuration: {0}")]
    ConfigWrite(#[from] toml::ser::Error),
    /// The configuration file could not be read.
    #[error("cannot read {}: {source}", path.display())]
    Io {
        /// File that failed.
        path: PathBuf,
        /// Underlying error.
        #[source]
        source: std::io::Error,
    },
    /// The viewport has no area, so nothing can be measured.
    #[error("viewport {width}x{height} has no area")]
    EmptyViewport {
        /// Configured width.
        width: f64,
        /// Configured height.
        height: f64,
    },
}

/// Result alias for this crate.
pub type Result<T, E = LandingError> = std::result::Result<T, E>;
