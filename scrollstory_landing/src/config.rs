// Copyright 2025 the Scrollstory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! TOML-backed configuration of the landing page and its simulator.

use std::path::Path;

use kurbo::Size;
use scrollstory_stage::StageConfig;
use serde::{Deserialize, Serialize};

use crate::{LandingError, Result};

/// Everything the `landing` binary can be configured with.
///
/// Every field has a default, so an empty file is a valid configuration.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LandingConfig {
    /// Browser viewport.
    pub viewport: ViewportConfig,
    /// Heights of the sections in normal flow.
    pub layout: LayoutConfig,
    /// Pin and snap behavior.
    pub stage: StageConfig,
    /// Simulated input.
    pub session: SessionConfig,
}

impl LandingConfig {
    /// Parses a configuration from TOML text.
    pub fn from_toml(text: &str) -> Result<Self> {
        Ok(toml::from_str(text)?)
    }

    /// Reads a configuration file.
    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path).map_err(|source| LandingError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml(&text)
    }

    /// Renders the configuration as TOML.
    pub fn to_toml(&self) -> Result<String> {
        Ok(toml::to_string_pretty(self)?)
    }
}

/// Viewport size in CSS pixels.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewportConfig {
    /// Width.
    pub width: f64,
    /// Height.
    pub height: f64,
}

impl Default for ViewportConfig {
    fn default() -> Self {
        Self {
            width: 1440.0,
            height: 900.0,
        }
    }
}

impl ViewportConfig {
    /// The viewport as a size, if it has an area.
    pub fn size(&self) -> Result<Size> {
        if self.width > 0.0 && self.height > 0.0 {
            Ok(Size::new(self.width, self.height))
        } else {
            Err(LandingError::EmptyViewport {
                width: self.width,
                height: self.height,
            })
        }
    }
}

/// Natural heights of the sections that scroll normally. Pinned sections are
/// always one viewport tall.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LayoutConfig {
    /// Featured teachers.
    pub featured: f64,
    /// Pricing.
    pub pricing: f64,
    /// Cities.
    pub cities: f64,
    /// Final call to action.
    pub final_cta: f64,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            featured: 1100.0,
            pricing: 1300.0,
            cities: 900.0,
            final_cta: 700.0,
        }
    }
}

/// Simulated input timing.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    /// Animation frames per second.
    pub frame_rate: f64,
    /// Quiet time after the last scroll event before the gesture counts as
    /// ended, in seconds.
    pub idle_delay: f64,
    /// Length of one simulated scroll gesture, in seconds.
    pub gesture_duration: f64,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            frame_rate: 60.0,
            idle_delay: 0.15,
            gesture_duration: 0.4,
        }
    }
}

impl SessionConfig {
    /// Seconds per frame.
    #[must_use]
    pub fn frame_interval(&self) -> f64 {
        if self.frame_rate > 0.0 {
            1.0 / self.frame_rate
        } else {
            1.0 / 60.0
        }
    }
}

#[cfg(test)]
mod tests {
    use scrollstory_progress::Scrub;
    use scrollstory_timeline::Easing;

    use super::*;

    #[test]
    fn empty_file_is_default() {
        assert_eq!(LandingConfig::from_toml("").unwrap(), LandingConfig::default());
    }

    #[test]
    fn partial_tables_keep_defaults() {
        let config = LandingConfig::from_toml(
            r#"
            [viewport]
            height = 800.0

            [stage.snap]
            tolerance = 0.05

            [stage.snap.timing]
            easing = "power3.out"

            [stage.pin]
            overshoot = 0.5
            "#,
        )
        .unwrap();
        assert_eq!(config.viewport.width, 1440.0);
        assert_eq!(config.viewport.height, 800.0);
        assert_eq!(config.stage.snap.tolerance, 0.05);
        assert_eq!(config.stage.snap.timing.easing, Easing::PowerOut(3));
        assert_eq!(config.stage.snap.timing.min_duration, 0.15);
        assert_eq!(config.stage.pin.overshoot, 0.5);
        assert_eq!(config.stage.pin.scrub, Scrub::Lag(0.6));
    }

    #[test]
    fn unknown_easing_is_rejected() {
        let err = LandingConfig::from_toml(
            r#"
            [stage.snap.timing]
            easing = "wobble"
            "#,
        )
        .unwrap_err();
        assert!(matches!(err, LandingError::ConfigParse(_)));
    }

    #[test]
    fn written_config_reads_back() {
        let config = LandingConfig::default();
        let text = config.to_toml().unwrap();
        assert_eq!(LandingConfig::from_toml(&text).unwrap(), config);
    }

    #[test]
    fn empty_viewport_is_an_error() {
        let viewport = ViewportConfig {
            width: 0.0,
            height: 900.0,
        };
        assert!(matches!(
            viewport.size(),
            Err(LandingError::EmptyViewport { .. })
        ));
    }

    #[test]
    fn missing_file_reports_path() {
        let err = LandingConfig::load(Path::new("/nonexistent/landing.toml")).unwrap_err();
        assert!(err.to_string().contains("/nonexistent/landing.toml"));
    }
}
