//! Configuration error types.
//!
//! The layout core itself never fails; these errors are raised only where
//! configuration enters the crate.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum LayoutError {
    #[error("max_lines must be at least 1")]
    ZeroMaxLines,

    #[error("max_items_in_each_line must be at least 1")]
    ZeroMaxItemsPerLine,

    #[error("negative spacing on the {axis} axis: {value}")]
    NegativeSpacing { axis: &'static str, value: i32 },

    #[error("negative {axis} constraint: min={min}, max={max}")]
    NegativeConstraint {
        axis: &'static str,
        min: i32,
        max: i32,
    },

    #[error("{axis} constraint has min greater than max: min={min}, max={max}")]
    InvertedConstraint {
        axis: &'static str,
        min: i32,
        max: i32,
    },

    #[error("invalid animation parameter {name}: {value}")]
    InvalidAnimation { name: &'static str, value: f32 },

    #[error("taffy layout does not support {0}")]
    Unsupported(&'static str),

    #[error("taffy error: {0}")]
    Taffy(String),
}
