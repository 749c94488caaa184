//! Error handling for SizeUp
//!
//! Input validation is the only failure class in the layout engine itself.
//! Lookup misses, unknown archetypes and incomplete targets are modeled as
//! ordinary values (`Option`, fallbacks, `Placement::NoTarget`) and never
//! surface here.
//!
//! All error types use `thiserror` for ergonomic error handling.

use crate::data::{DimensionAxis, SymbolicPosition};
use thiserror::Error;

/// Layout input error type
///
/// Raised at the boundary before a value reaches geometry or placement
/// computations, so no negative or NaN geometry is ever produced.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum LayoutError {
    /// A dimension was below zero
    #[error("Negative {field} dimension: {value}")]
    NegativeDimension {
        /// The offending dimension.
        field: DimensionAxis,
        /// The rejected value in centimeters.
        value: f64,
    },

    /// A dimension or distance was NaN or infinite
    #[error("{field} must be a finite number")]
    NonFiniteValue {
        /// The name of the offending field.
        field: String,
    },

    /// The gap distance was below zero
    #[error("Negative distance: {value}")]
    NegativeDistance {
        /// The rejected distance in centimeters.
        value: f64,
    },

    /// The comparator does not offer this position
    #[error("Position '{position}' is not allowed for comparator '{comparator}'")]
    PositionNotAllowed {
        /// The requested position.
        position: SymbolicPosition,
        /// The comparator id.
        comparator: String,
    },

    /// User text could not be interpreted
    #[error("Invalid input '{input}': {reason}")]
    InvalidInput {
        /// The raw input.
        input: String,
        /// Why it was rejected.
        reason: String,
    },
}

/// Validate a gap distance in centimeters
pub fn validate_distance(distance_cm: f64) -> Result<f64, LayoutError> {
    if !distance_cm.is_finite() {
        return Err(LayoutError::NonFiniteValue {
            field: "distance".to_string(),
        });
    }
    if distance_cm < 0.0 {
        return Err(LayoutError::NegativeDistance { value: distance_cm });
    }
    Ok(distance_cm)
}
