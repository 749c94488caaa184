//! Shape registry
//!
//! Static, ordered catalog of comparator archetypes. Entries are built at
//! compile time and never mutated; user size adjustments live in a
//! [`ComparatorSelection`] next to the catalog entry.

use crate::geometry::{Archetype, Color};
use serde::Serialize;
use sizeup_core::{Dimensions, ShapeKind, SymbolicPosition};
use tracing::warn;

/// Id of the comparator selected when nothing else is requested
pub const DEFAULT_COMPARATOR_ID: &str = "desk";

/// How the target is expected to relate to the comparator (informational)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Positioning {
    Beside,
    OnTop,
}

/// How the `bottom` position is resolved for a comparator
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum BottomPlacement {
    /// Under a raised surface, clamped so the target stays on the ground
    UnderSurface,
    /// Below the ground plane
    BelowGround,
}

/// Immutable catalog entry for a reference object
#[derive(Debug, Clone, Serialize)]
pub struct ComparatorSpec {
    pub id: &'static str,
    pub name: &'static str,
    pub kind: ShapeKind,
    pub archetype: Archetype,
    /// Catalog default dimensions in centimeters
    pub dimensions: Dimensions,
    pub color: Color,
    pub positioning: Positioning,
    /// Positions the target may take; `None` allows all of them
    pub allowed_positions: Option<&'static [SymbolicPosition]>,
    pub bottom_placement: BottomPlacement,
}

impl ComparatorSpec {
    pub fn allows(&self, position: SymbolicPosition) -> bool {
        self.allowed_positions
            .is_none_or(|allowed| allowed.contains(&position))
    }

    /// Positions offered for this comparator, in control-panel order
    pub fn available_positions(&self) -> Vec<SymbolicPosition> {
        SymbolicPosition::ALL
            .into_iter()
            .filter(|p| self.allows(*p))
            .collect()
    }

    /// Keep `position` if allowed, otherwise fall back to the first allowed one
    pub fn rehome(&self, position: SymbolicPosition) -> SymbolicPosition {
        if self.allows(position) {
            return position;
        }
        self.allowed_positions
            .and_then(|allowed| allowed.first().copied())
            .unwrap_or(position)
    }
}

static COMPARATORS: [ComparatorSpec; 3] = [
    ComparatorSpec {
        id: "standing_person",
        name: "Standing Person",
        kind: ShapeKind::Box,
        archetype: Archetype::Humanoid,
        dimensions: Dimensions::cuboid(60.0, 180.0, 25.0),
        color: Color::rgb(0x8B, 0x73, 0x55),
        positioning: Positioning::Beside,
        allowed_positions: Some(&[
            SymbolicPosition::Right,
            SymbolicPosition::Left,
            SymbolicPosition::Top,
        ]),
        bottom_placement: BottomPlacement::BelowGround,
    },
    ComparatorSpec {
        id: "cupboard",
        name: "Cupboard",
        kind: ShapeKind::Box,
        archetype: Archetype::Cupboard,
        dimensions: Dimensions::cuboid(100.0, 180.0, 50.0),
        color: Color::rgb(0x8B, 0x45, 0x13),
        positioning: Positioning::OnTop,
        allowed_positions: Some(&[
            SymbolicPosition::Right,
            SymbolicPosition::Left,
            SymbolicPosition::Top,
        ]),
        bottom_placement: BottomPlacement::BelowGround,
    },
    ComparatorSpec {
        id: "desk",
        name: "Desk",
        kind: ShapeKind::Box,
        archetype: Archetype::Desk,
        dimensions: Dimensions::cuboid(120.0, 75.0, 60.0),
        color: Color::rgb(0x65, 0x43, 0x21),
        positioning: Positioning::OnTop,
        allowed_positions: Some(&[
            SymbolicPosition::Top,
            SymbolicPosition::Right,
            SymbolicPosition::Left,
            SymbolicPosition::Bottom,
        ]),
        bottom_placement: BottomPlacement::UnderSurface,
    },
];

/// Full catalog in display order
pub fn comparators() -> &'static [ComparatorSpec] {
    &COMPARATORS
}

/// Look up a catalog entry by id
pub fn find(id: &str) -> Option<&'static ComparatorSpec> {
    let found = COMPARATORS.iter().find(|c| c.id == id);
    if found.is_none() {
        warn!("Unknown comparator id '{}'", id);
    }
    found
}

/// The default catalog entry (the desk)
pub fn default_comparator() -> &'static ComparatorSpec {
    COMPARATORS
        .iter()
        .find(|c| c.id == DEFAULT_COMPARATOR_ID)
        .unwrap_or(&COMPARATORS[0])
}

/// A catalog entry plus the user's size adjustments
///
/// The catalog entry is never touched; the effective dimensions are the
/// pure merge of `catalog_defaults` and `active_override`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ComparatorSelection {
    pub spec: &'static ComparatorSpec,
    pub active_override: Option<Dimensions>,
}

impl ComparatorSelection {
    pub fn new(spec: &'static ComparatorSpec) -> Self {
        Self {
            spec,
            active_override: None,
        }
    }

    pub fn catalog_defaults(&self) -> Dimensions {
        self.spec.dimensions
    }

    /// Effective dimensions after applying the override
    pub fn dimensions(&self) -> Dimensions {
        match &self.active_override {
            Some(overrides) => self
                .catalog_defaults()
                .merged_with(overrides)
                .restricted_to(self.spec.kind),
            None => self.catalog_defaults(),
        }
    }

    /// Copy with `overrides` layered on top of any existing override
    pub fn with_override(&self, overrides: Dimensions) -> Self {
        let combined = match &self.active_override {
            Some(existing) => existing.merged_with(&overrides),
            None => overrides,
        };
        Self {
            spec: self.spec,
            active_override: Some(combined),
        }
    }
}

impl PartialEq for ComparatorSpec {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}
