//! Data models for shapes, dimensions and placement
//!
//! This module provides:
//! - Shape kinds (box, sphere)
//! - Dimension records in canonical centimeters
//! - Symbolic target positions relative to a comparator
//! - The user-editable target specification

use crate::error::LayoutError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Basic shape family of an object
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ShapeKind {
    /// Rectangular box described by width, height and depth
    #[default]
    Box,
    /// Sphere described by its radius
    Sphere,
}

impl ShapeKind {
    /// Dimension fields that must be populated for this kind
    pub fn required_axes(&self) -> &'static [DimensionAxis] {
        match self {
            Self::Box => &[
                DimensionAxis::Width,
                DimensionAxis::Height,
                DimensionAxis::Depth,
            ],
            Self::Sphere => &[DimensionAxis::Radius],
        }
    }
}

impl fmt::Display for ShapeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Box => write!(f, "box"),
            Self::Sphere => write!(f, "sphere"),
        }
    }
}

impl FromStr for ShapeKind {
    type Err = LayoutError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "box" => Ok(Self::Box),
            "sphere" => Ok(Self::Sphere),
            _ => Err(LayoutError::InvalidInput {
                input: s.to_string(),
                reason: "unknown shape kind".to_string(),
            }),
        }
    }
}

/// One field of a [`Dimensions`] record
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DimensionAxis {
    Width,
    Height,
    Depth,
    Radius,
}

impl fmt::Display for DimensionAxis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Width => write!(f, "width"),
            Self::Height => write!(f, "height"),
            Self::Depth => write!(f, "depth"),
            Self::Radius => write!(f, "radius"),
        }
    }
}

/// Parametric dimensions in centimeters
///
/// Box-family shapes populate `w`, `h` and `d`; spheres populate `r` only.
/// Absent fields read as zero in computations.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Dimensions {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub w: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub h: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub d: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub r: Option<f64>,
}

impl Dimensions {
    /// Box dimensions
    pub const fn cuboid(w: f64, h: f64, d: f64) -> Self {
        Self {
            w: Some(w),
            h: Some(h),
            d: Some(d),
            r: None,
        }
    }

    /// Sphere dimensions
    pub const fn sphere(r: f64) -> Self {
        Self {
            w: None,
            h: None,
            d: None,
            r: Some(r),
        }
    }

    pub fn get(&self, axis: DimensionAxis) -> Option<f64> {
        match axis {
            DimensionAxis::Width => self.w,
            DimensionAxis::Height => self.h,
            DimensionAxis::Depth => self.d,
            DimensionAxis::Radius => self.r,
        }
    }

    /// Copy with one field replaced
    pub fn with(mut self, axis: DimensionAxis, value: f64) -> Self {
        let slot = match axis {
            DimensionAxis::Width => &mut self.w,
            DimensionAxis::Height => &mut self.h,
            DimensionAxis::Depth => &mut self.d,
            DimensionAxis::Radius => &mut self.r,
        };
        *slot = Some(value);
        self
    }

    pub fn width(&self) -> f64 {
        self.w.unwrap_or(0.0)
    }

    pub fn height(&self) -> f64 {
        self.h.unwrap_or(0.0)
    }

    pub fn depth(&self) -> f64 {
        self.d.unwrap_or(0.0)
    }

    pub fn radius(&self) -> f64 {
        self.r.unwrap_or(0.0)
    }

    /// Overlay `overrides` on top of these dimensions
    ///
    /// Fields present in `overrides` win; the receiver is left untouched.
    pub fn merged_with(&self, overrides: &Dimensions) -> Dimensions {
        Dimensions {
            w: overrides.w.or(self.w),
            h: overrides.h.or(self.h),
            d: overrides.d.or(self.d),
            r: overrides.r.or(self.r),
        }
    }

    /// Keep only the fields meaningful for `kind`
    pub fn restricted_to(&self, kind: ShapeKind) -> Dimensions {
        match kind {
            ShapeKind::Box => Dimensions {
                r: None,
                ..*self
            },
            ShapeKind::Sphere => Dimensions {
                r: self.r,
                ..Dimensions::default()
            },
        }
    }

    /// True when every field required by `kind` is present and non-zero
    pub fn is_complete_for(&self, kind: ShapeKind) -> bool {
        kind.required_axes()
            .iter()
            .all(|axis| self.get(*axis).is_some_and(|v| v > 0.0))
    }

    /// Reject negative or non-finite fields
    pub fn validate(&self) -> Result<(), LayoutError> {
        for axis in [
            DimensionAxis::Width,
            DimensionAxis::Height,
            DimensionAxis::Depth,
            DimensionAxis::Radius,
        ] {
            if let Some(value) = self.get(axis) {
                validate_dimension(axis, value)?;
            }
        }
        Ok(())
    }

    /// Bounding height of an object of `kind` with these dimensions
    pub fn bounding_height(&self, kind: ShapeKind) -> f64 {
        match kind {
            ShapeKind::Box => self.height(),
            ShapeKind::Sphere => self.radius() * 2.0,
        }
    }

    /// Bounding width of an object of `kind` with these dimensions
    pub fn bounding_width(&self, kind: ShapeKind) -> f64 {
        match kind {
            ShapeKind::Box => self.width(),
            ShapeKind::Sphere => self.radius() * 2.0,
        }
    }
}

/// Reject a single negative or non-finite dimension value
pub fn validate_dimension(axis: DimensionAxis, value: f64) -> Result<f64, LayoutError> {
    if !value.is_finite() {
        return Err(LayoutError::NonFiniteValue {
            field: axis.to_string(),
        });
    }
    if value < 0.0 {
        return Err(LayoutError::NegativeDimension { field: axis, value });
    }
    Ok(value)
}

/// Qualitative placement of the target relative to the comparator's bounding box
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SymbolicPosition {
    Top,
    Right,
    Left,
    Bottom,
}

impl SymbolicPosition {
    /// All positions in control-panel order
    pub const ALL: [SymbolicPosition; 4] = [Self::Top, Self::Right, Self::Bottom, Self::Left];
}

impl fmt::Display for SymbolicPosition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Top => write!(f, "top"),
            Self::Right => write!(f, "right"),
            Self::Left => write!(f, "left"),
            Self::Bottom => write!(f, "bottom"),
        }
    }
}

impl FromStr for SymbolicPosition {
    type Err = LayoutError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "top" => Ok(Self::Top),
            "right" => Ok(Self::Right),
            "left" => Ok(Self::Left),
            "bottom" => Ok(Self::Bottom),
            _ => Err(LayoutError::InvalidInput {
                input: s.to_string(),
                reason: "unknown position".to_string(),
            }),
        }
    }
}

/// The user-specified object being sized up
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TargetSpec {
    pub shape: ShapeKind,
    pub dimensions: Dimensions,
}

impl TargetSpec {
    pub fn new(shape: ShapeKind, dimensions: Dimensions) -> Self {
        Self {
            shape,
            dimensions: dimensions.restricted_to(shape),
        }
    }

    /// Dimensions a freshly selected shape starts with
    pub fn fresh(shape: ShapeKind) -> Self {
        match shape {
            ShapeKind::Box => Self::new(shape, Dimensions::cuboid(10.0, 10.0, 10.0)),
            ShapeKind::Sphere => Self::new(shape, Dimensions::sphere(30.0)),
        }
    }

    /// Whether the target has enough dimensions to be drawn at all
    pub fn is_renderable(&self) -> bool {
        self.dimensions.is_complete_for(self.shape)
    }

    /// Half of the target's extent along x
    pub fn half_width(&self) -> f64 {
        self.dimensions.bounding_width(self.shape) / 2.0
    }

    /// Half of the target's extent along y
    pub fn half_height(&self) -> f64 {
        self.dimensions.bounding_height(self.shape) / 2.0
    }
}

impl Default for TargetSpec {
    fn default() -> Self {
        Self::new(ShapeKind::Box, Dimensions::cuboid(30.0, 20.0, 15.0))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_fields_read_as_zero() {
        let dims = Dimensions::sphere(5.0);
        assert_eq!(dims.width(), 0.0);
        assert_eq!(dims.radius(), 5.0);
    }

    #[test]
    fn test_merge_prefers_overrides() {
        let base = Dimensions::cuboid(120.0, 75.0, 60.0);
        let merged = base.merged_with(&Dimensions {
            h: Some(90.0),
            ..Default::default()
        });
        assert_eq!(merged, Dimensions::cuboid(120.0, 90.0, 60.0));
        assert_eq!(base.height(), 75.0);
    }

    #[test]
    fn test_restricted_to_kind() {
        let dims = Dimensions::cuboid(1.0, 2.0, 3.0).with(DimensionAxis::Radius, 4.0);
        assert_eq!(dims.restricted_to(ShapeKind::Sphere), Dimensions::sphere(4.0));
        assert_eq!(
            dims.restricted_to(ShapeKind::Box),
            Dimensions::cuboid(1.0, 2.0, 3.0)
        );
    }

    #[test]
    fn test_completeness() {
        assert!(Dimensions::cuboid(1.0, 1.0, 1.0).is_complete_for(ShapeKind::Box));
        assert!(!Dimensions::cuboid(1.0, 0.0, 1.0).is_complete_for(ShapeKind::Box));
        assert!(!Dimensions::sphere(0.0).is_complete_for(ShapeKind::Sphere));
        assert!(!Dimensions::default().is_complete_for(ShapeKind::Sphere));
    }

    #[test]
    fn test_validate_rejects_negative() {
        assert!(Dimensions::cuboid(0.0, 0.0, 0.0).validate().is_ok());
        let err = Dimensions::cuboid(1.0, -2.0, 1.0).validate().unwrap_err();
        assert_eq!(
            err,
            LayoutError::NegativeDimension {
                field: DimensionAxis::Height,
                value: -2.0
            }
        );
        assert!(Dimensions::sphere(f64::INFINITY).validate().is_err());
    }

    #[test]
    fn test_position_parsing() {
        assert_eq!(
            "Bottom".parse::<SymbolicPosition>().unwrap(),
            SymbolicPosition::Bottom
        );
        assert!("behind".parse::<SymbolicPosition>().is_err());
        assert_eq!(SymbolicPosition::Left.to_string(), "left");
    }

    #[test]
    fn test_fresh_targets() {
        assert_eq!(
            TargetSpec::fresh(ShapeKind::Sphere).dimensions,
            Dimensions::sphere(30.0)
        );
        assert_eq!(
            TargetSpec::fresh(ShapeKind::Box).dimensions,
            Dimensions::cuboid(10.0, 10.0, 10.0)
        );
        assert!(TargetSpec::default().is_renderable());
    }

    #[test]
    fn test_half_extents() {
        let sphere = TargetSpec::new(ShapeKind::Sphere, Dimensions::sphere(15.0));
        assert_eq!(sphere.half_width(), 15.0);
        assert_eq!(sphere.half_height(), 15.0);

        let cube = TargetSpec::new(ShapeKind::Box, Dimensions::cuboid(10.0, 20.0, 30.0));
        assert_eq!(cube.half_width(), 5.0);
        assert_eq!(cube.half_height(), 10.0);
    }
}
