//! # Grid Configuration
//!
//! Loaded once at startup, usually from a TOML file:
//!
//! ```toml
//! screen_width = 640.0
//! screen_height = 480.0
//! num_rows = 5
//! num_cols = 6
//! tolerance = 2.0
//! scroll_trigger = -256.0
//! ```
//!
//! Every key is optional. Missing keys take the values of
//! [`GridConfig::default`].

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{GridError, GridResult};

/// Grid construction parameters.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GridConfig {
    /// Viewport width in world units.
    pub screen_width: f32,
    /// Viewport height in world units.
    pub screen_height: f32,
    /// Number of quadrant rows, margin rows included.
    pub num_rows: usize,
    /// Number of quadrant columns, margin columns included.
    pub num_cols: usize,
    /// Slop added to every overlap test.
    pub tolerance: f32,
    /// Leftmost-quadrant coordinate at or below which a column is recycled.
    /// `None` means two cell widths left of the viewport.
    pub scroll_trigger: Option<f32>,
}

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            screen_width: 640.0,
            screen_height: 480.0,
            num_rows: 5,
            num_cols: 6,
            tolerance: 0.0,
            scroll_trigger: None,
        }
    }
}

impl GridConfig {
    /// Parses a configuration from TOML text.
    ///
    /// # Errors
    ///
    /// Returns [`GridError::Parse`] if the text is not valid TOML for this
    /// type. Values are not validated here; see [`GridConfig::validate`].
    pub fn from_toml_str(text: &str) -> GridResult<Self> {
        Ok(toml::from_str(text)?)
    }

    /// Reads and parses a TOML configuration file.
    ///
    /// # Errors
    ///
    /// Returns [`GridError::Io`] if the file cannot be read and
    /// [`GridError::Parse`] if it cannot be parsed.
    pub fn load(path: impl AsRef<Path>) -> GridResult<Self> {
        let text = std::fs::read_to_string(path)?;
        Self::from_toml_str(&text)
    }

    /// Serializes the configuration back to TOML.
    ///
    /// # Errors
    ///
    /// Returns [`GridError::InvalidConfig`] if serialization fails.
    pub fn to_toml_string(&self) -> GridResult<String> {
        toml::to_string(self).map_err(|e| GridError::InvalidConfig(e.to_string()))
    }

    /// Checks every value against the grid's preconditions.
    ///
    /// # Errors
    ///
    /// Returns the first violated precondition.
    pub fn validate(&self) -> GridResult<()> {
        crate::layout::GridLayout::from_config(self).map(|_| ())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_fill_missing_keys() {
        let config = GridConfig::from_toml_str("num_cols = 8\ntolerance = 1.5\n").unwrap();

        assert_eq!(config.num_cols, 8);
        assert_eq!(config.tolerance, 1.5);
        assert_eq!(config.num_rows, 5);
        assert_eq!(config.screen_width, 640.0);
        assert!(config.scroll_trigger.is_none());
    }

    #[test]
    fn test_scroll_trigger_parses() {
        let config = GridConfig::from_toml_str("scroll_trigger = -300.0").unwrap();
        assert_eq!(config.scroll_trigger, Some(-300.0));
    }

    #[test]
    fn test_bad_toml_is_parse_error() {
        let err = GridConfig::from_toml_str("num_rows = \"many\"").unwrap_err();
        assert!(matches!(err, GridError::Parse(_)));
    }

    #[test]
    fn test_validate_rejects_small_grid() {
        let config = GridConfig {
            num_rows: 2,
            ..GridConfig::default()
        };
        assert!(matches!(
            config.validate(),
            Err(GridError::InvalidRows { rows: 2, .. })
        ));
    }

    #[test]
    fn test_toml_round_trip_preserves_values() {
        let config = GridConfig {
            num_cols: 10,
            scroll_trigger: Some(-64.0),
            ..GridConfig::default()
        };
        let text = config.to_toml_string().unwrap();
        assert_eq!(GridConfig::from_toml_str(&text).unwrap(), config);
    }

    #[test]
    fn test_load_missing_file_is_io_error() {
        let err = GridConfig::load("/nonexistent/scrollgrid.toml").unwrap_err();
        assert!(matches!(err, GridError::Io(_)));
    }
}
