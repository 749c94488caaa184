//! # SizeUp Core
//!
//! Core types and utilities for SizeUp.
//! Provides the canonical length unit and its display conversions,
//! dimension records, shape kinds, symbolic positions, and the input
//! validation errors raised by the layout engine.

pub mod data;
pub mod error;
pub mod units;

pub use data::{
    validate_dimension, DimensionAxis, Dimensions, ShapeKind, SymbolicPosition, TargetSpec,
};

pub use error::{validate_distance, LayoutError};

pub use units::{
    convert, format, format_diameter, format_distance, format_length, parse_length,
    DistanceRange, Unit,
};
