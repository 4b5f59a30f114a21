// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! CLI configuration loaded from environment variables.

use roomplan_geometry::WallDimensions;
use std::path::PathBuf;

/// CLI configuration.
#[derive(Debug, Clone)]
pub struct Config {
    /// Directory exported models are written to and listed from.
    pub model_dir: PathBuf,
    /// Wall and marker primitive sizes.
    pub dimensions: WallDimensions,
}

impl Config {
    /// Load configuration from environment variables.
    pub fn from_env() -> Self {
        Self::from_vars(|key| std::env::var(key).ok())
    }

    /// Load configuration from an arbitrary variable source.
    /// Unset or unparsable values fall back to their defaults.
    pub fn from_vars<F>(var: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = WallDimensions::default();
        let meters = |key: &str, default: f64| {
            var(key)
                .and_then(|v| v.trim().parse::<f64>().ok())
                .filter(|v| v.is_finite() && *v > 0.0)
                .unwrap_or(default)
        };

        Self {
            // The app kept its models in the temporary directory
            model_dir: var("ROOMPLAN_MODEL_DIR")
                .filter(|v| !v.trim().is_empty())
                .map(PathBuf::from)
                .unwrap_or_else(std::env::temp_dir),
            dimensions: WallDimensions {
                width: meters("ROOMPLAN_WALL_WIDTH", defaults.width),
                height: meters("ROOMPLAN_WALL_HEIGHT", defaults.height),
                marker_radius: meters("ROOMPLAN_MARKER_RADIUS", defaults.marker_radius),
            },
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::from_env()
    }
}
