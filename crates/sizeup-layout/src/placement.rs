//! Placement solver
//!
//! Resolves a symbolic position (top/right/left/bottom) and a gap distance
//! into the 3D anchor of the target object. For spheres and boxes resting on
//! the ground the anchor's y is the target's half height, so the lowest
//! point touches y = 0.

use crate::registry::{BottomPlacement, ComparatorSpec};
use glam::DVec3;
use serde::{Deserialize, Serialize};
use sizeup_core::{
    validate_distance, Dimensions, LayoutError, ShapeKind, SymbolicPosition, TargetSpec,
};
use tracing::debug;

/// Bounding box of the comparator as seen by the solver
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ComparatorBounds {
    pub width: f64,
    pub height: f64,
    pub bottom: BottomPlacement,
}

impl ComparatorBounds {
    pub fn new(kind: ShapeKind, dims: &Dimensions, bottom: BottomPlacement) -> Self {
        Self {
            width: dims.bounding_width(kind),
            height: dims.bounding_height(kind),
            bottom,
        }
    }

    /// Bounds of a catalog entry with effective dimensions `dims`
    pub fn of(spec: &ComparatorSpec, dims: &Dimensions) -> Self {
        Self::new(spec.kind, dims, spec.bottom_placement)
    }
}

/// Outcome of solving a placement
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum Placement {
    /// Target anchor in centimeters
    Positioned { anchor: DVec3 },
    /// Target dimensions are incomplete, nothing is drawn
    NoTarget,
}

impl Placement {
    pub fn anchor(&self) -> Option<DVec3> {
        match self {
            Self::Positioned { anchor } => Some(*anchor),
            Self::NoTarget => None,
        }
    }
}

/// Solve the target anchor
///
/// `position == None` places the target at the origin in ground contact.
/// Negative distance or target dimensions are rejected; a target missing
/// any required dimension yields [`Placement::NoTarget`].
pub fn solve(
    comparator: &ComparatorBounds,
    target: &TargetSpec,
    position: Option<SymbolicPosition>,
    distance: f64,
) -> Result<Placement, LayoutError> {
    let distance = validate_distance(distance)?;
    target.dimensions.validate()?;

    if !target.is_renderable() {
        debug!("Target {} has incomplete dimensions, not placed", target.shape);
        return Ok(Placement::NoTarget);
    }

    let half_width = target.half_width();
    let half_height = target.half_height();
    let ground = half_height;

    let anchor = match position {
        Some(SymbolicPosition::Right) => {
            DVec3::new(comparator.width / 2.0 + distance + half_width, ground, 0.0)
        }
        Some(SymbolicPosition::Left) => {
            DVec3::new(-(comparator.width / 2.0 + distance + half_width), ground, 0.0)
        }
        Some(SymbolicPosition::Top) => {
            DVec3::new(0.0, comparator.height + distance + half_height, 0.0)
        }
        Some(SymbolicPosition::Bottom) => match comparator.bottom {
            BottomPlacement::UnderSurface => DVec3::new(
                0.0,
                (comparator.height - distance - half_height).max(half_height),
                0.0,
            ),
            BottomPlacement::BelowGround => DVec3::new(0.0, -(distance + half_height), 0.0),
        },
        None => DVec3::new(0.0, ground, 0.0),
    };

    debug!(
        "Placed {} target at ({:.2}, {:.2}, {:.2})",
        target.shape, anchor.x, anchor.y, anchor.z
    );
    Ok(Placement::Positioned { anchor })
}
