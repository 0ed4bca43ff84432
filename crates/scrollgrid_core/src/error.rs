//! # Grid Error Types
//!
//! Every failure here is a precondition violation surfaced at construction
//! or configuration load. Running the grid never fails.

use thiserror::Error;

/// Errors that can occur while configuring a quadrant grid.
#[derive(Error, Debug)]
pub enum GridError {
    /// Fewer rows than the vertical margin policy needs.
    #[error("invalid row count {rows}: at least {min} rows are required")]
    InvalidRows {
        /// The rejected row count.
        rows: usize,
        /// The minimum accepted row count.
        min: usize,
    },

    /// Fewer columns than the horizontal margin policy needs.
    #[error("invalid column count {columns}: at least {min} columns are required")]
    InvalidColumns {
        /// The rejected column count.
        columns: usize,
        /// The minimum accepted column count.
        min: usize,
    },

    /// Viewport dimensions that are not finite and positive.
    #[error("invalid viewport {width}x{height}: dimensions must be finite and positive")]
    InvalidViewport {
        /// The rejected width.
        width: f32,
        /// The rejected height.
        height: f32,
    },

    /// Any other rejected configuration value.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// Reading a configuration file failed.
    #[error("failed to read configuration: {0}")]
    Io(#[from] std::io::Error),

    /// A configuration file was not valid TOML for `GridConfig`.
    #[error("failed to parse configuration: {0}")]
    Parse(#[from] toml::de::Error),
}

/// Result type for grid operations.
pub type GridResult<T> = Result<T, GridError>;
