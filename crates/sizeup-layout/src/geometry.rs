//! # Geometry Synthesizer
//!
//! Maps a comparator archetype and its dimensions to an ordered list of
//! primitive solids (boxes, cylinders, spheres) for the renderer.
//!
//! ## Conventions
//! - All sizes and positions are centimeters.
//! - Positions are solid centers in the object's local frame.
//! - Every archetype rests on the ground plane: its lowest point is y = 0.
//! - Named archetypes scale a fixed reference model so the silhouette spans
//!   the requested bounding width and height.

use glam::{DQuat, DVec3, EulerRot};
use serde::{Deserialize, Serialize};
use sizeup_core::{Dimensions, LayoutError, ShapeKind};
use std::fmt;
use std::str::FromStr;
use tracing::debug;

/// Opacity of comparator solids
pub const COMPARATOR_OPACITY: f32 = 0.8;

/// Opacity of the target solid
pub const TARGET_OPACITY: f32 = 0.9;

/// Color of the target solid
pub const TARGET_COLOR: Color = Color::rgb(0x3B, 0x82, 0xF6);

/// Segment counts handed to the renderer for curved solids
const CYLINDER_SEGMENTS: u32 = 8;
const SPHERE_WIDTH_SEGMENTS: u32 = 32;
const SPHERE_HEIGHT_SEGMENTS: u32 = 16;
const HEAD_SEGMENTS: u32 = 16;

/// Reference model of the humanoid archetype: arm-to-arm span and head top
const HUMANOID_REFERENCE_WIDTH: f64 = 30.0;
const HUMANOID_REFERENCE_HEIGHT: f64 = 118.0;

const DESK_TOP_THICKNESS: f64 = 5.0;
const DESK_LEG_RADIUS: f64 = 2.0;
const DESK_LEG_INSET: f64 = 5.0;

const CUPBOARD_HANDLE_COLOR: Color = Color::rgb(0x44, 0x44, 0x44);
const CUPBOARD_FRAME_COLOR: Color = Color::rgb(0x33, 0x33, 0x33);
const CUPBOARD_TRIM_OPACITY: f32 = 0.9;

/// sRGB display color, serialized as `#RRGGBB`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Parse `#RRGGBB`, `RRGGBB` or the short `#RGB` form
    pub fn from_hex(hex: &str) -> Option<Self> {
        let digits = hex.trim().trim_start_matches('#');
        if !digits.is_ascii() {
            return None;
        }
        let channel = |s: &str| u8::from_str_radix(s, 16).ok();
        match digits.len() {
            6 => Some(Self::rgb(
                channel(&digits[0..2])?,
                channel(&digits[2..4])?,
                channel(&digits[4..6])?,
            )),
            3 => {
                let expand = |i: usize| channel(&digits[i..i + 1]).map(|v| v * 17);
                Some(Self::rgb(expand(0)?, expand(1)?, expand(2)?))
            }
            _ => None,
        }
    }

    pub fn to_hex(&self) -> String {
        format!("#{:02X}{:02X}{:02X}", self.r, self.g, self.b)
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl From<Color> for String {
    fn from(color: Color) -> Self {
        color.to_hex()
    }
}

impl TryFrom<String> for Color {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Color::from_hex(&value).ok_or_else(|| format!("Invalid color: {}", value))
    }
}

/// Closed set of comparator archetypes, each with its own scaling rule
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Archetype {
    /// Single box resting on the ground
    #[default]
    Box,
    /// Single sphere resting on the ground
    Sphere,
    /// Stylized standing person: legs, torso, arms and head
    Humanoid,
    /// Table top on four legs
    Desk,
    /// Cabinet body with door handles and a door split line
    Cupboard,
}

impl Archetype {
    /// Resolve an archetype identifier
    ///
    /// Unknown identifiers degrade to [`Archetype::Box`]; this never fails.
    pub fn from_id(id: &str) -> Self {
        match id.trim().to_lowercase().as_str() {
            "box" => Self::Box,
            "sphere" => Self::Sphere,
            "humanoid" | "standing_person" | "person" => Self::Humanoid,
            "desk" | "table" => Self::Desk,
            "cupboard" | "cabinet" => Self::Cupboard,
            other => {
                debug!("Unknown archetype '{}', using plain box", other);
                Self::Box
            }
        }
    }
}

impl FromStr for Archetype {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::from_id(s))
    }
}

impl fmt::Display for Archetype {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Box => write!(f, "box"),
            Self::Sphere => write!(f, "sphere"),
            Self::Humanoid => write!(f, "humanoid"),
            Self::Desk => write!(f, "desk"),
            Self::Cupboard => write!(f, "cupboard"),
        }
    }
}

/// Shape and size of one primitive solid
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Solid {
    /// Axis-aligned box with full extents
    Box { size: DVec3 },
    /// Cylinder (or truncated cone) along the local y axis
    Cylinder {
        radius_top: f64,
        radius_bottom: f64,
        height: f64,
        radial_segments: u32,
    },
    Sphere {
        radius: f64,
        width_segments: u32,
        height_segments: u32,
    },
}

impl Solid {
    pub fn cuboid(w: f64, h: f64, d: f64) -> Self {
        Self::Box {
            size: DVec3::new(w, h, d),
        }
    }

    pub fn cylinder(radius_top: f64, radius_bottom: f64, height: f64) -> Self {
        Self::Cylinder {
            radius_top,
            radius_bottom,
            height,
            radial_segments: CYLINDER_SEGMENTS,
        }
    }

    pub fn sphere(radius: f64) -> Self {
        Self::Sphere {
            radius,
            width_segments: SPHERE_WIDTH_SEGMENTS,
            height_segments: SPHERE_HEIGHT_SEGMENTS,
        }
    }

    /// Solid for a plain box or sphere of the given dimensions
    pub fn for_shape(kind: ShapeKind, dims: &Dimensions) -> Self {
        match kind {
            ShapeKind::Box => Self::cuboid(dims.width(), dims.height(), dims.depth()),
            ShapeKind::Sphere => Self::sphere(dims.radius()),
        }
    }

    /// Half extents in the solid's unrotated local frame
    pub fn half_extents(&self) -> DVec3 {
        match *self {
            Self::Box { size } => size * 0.5,
            Self::Cylinder {
                radius_top,
                radius_bottom,
                height,
                ..
            } => {
                let r = radius_top.max(radius_bottom);
                DVec3::new(r, height / 2.0, r)
            }
            Self::Sphere { radius, .. } => DVec3::splat(radius),
        }
    }
}

/// A positioned, colored solid
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Primitive {
    pub solid: Solid,
    /// Center of the solid
    pub position: DVec3,
    /// Euler rotation (XYZ order, radians)
    pub rotation: DVec3,
    pub color: Color,
    pub opacity: f32,
}

impl Primitive {
    pub fn new(solid: Solid, position: DVec3, color: Color, opacity: f32) -> Self {
        Self {
            solid,
            position,
            rotation: DVec3::ZERO,
            color,
            opacity,
        }
    }

    pub fn rotated(mut self, rotation: DVec3) -> Self {
        self.rotation = rotation;
        self
    }

    /// Axis-aligned bounds `(min, max)` after rotation
    pub fn bounds(&self) -> (DVec3, DVec3) {
        let half = self.solid.half_extents();
        if self.rotation == DVec3::ZERO {
            return (self.position - half, self.position + half);
        }

        let rotation = DQuat::from_euler(
            EulerRot::XYZ,
            self.rotation.x,
            self.rotation.y,
            self.rotation.z,
        );
        let mut min = DVec3::splat(f64::INFINITY);
        let mut max = DVec3::splat(f64::NEG_INFINITY);
        for corner in 0..8 {
            let local = DVec3::new(
                if corner & 1 == 0 { -half.x } else { half.x },
                if corner & 2 == 0 { -half.y } else { half.y },
                if corner & 4 == 0 { -half.z } else { half.z },
            );
            let world = self.position + rotation * local;
            min = min.min(world);
            max = max.max(world);
        }
        (min, max)
    }
}

/// Bounds `(min, max)` of a list of primitives, or `None` when empty
pub fn bounds_of(primitives: &[Primitive]) -> Option<(DVec3, DVec3)> {
    primitives.iter().map(Primitive::bounds).reduce(|(amin, amax), (bmin, bmax)| {
        (amin.min(bmin), amax.max(bmax))
    })
}

/// Color and opacity applied to an archetype's main body
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Style {
    pub color: Color,
    pub opacity: f32,
}

impl Style {
    pub fn comparator(color: Color) -> Self {
        Self {
            color,
            opacity: COMPARATOR_OPACITY,
        }
    }

    pub fn target() -> Self {
        Self {
            color: TARGET_COLOR,
            opacity: TARGET_OPACITY,
        }
    }
}

/// Synthesize the primitives of an archetype scaled to `dims`
///
/// Zero dimensions yield zero-extent but valid geometry. Negative or
/// non-finite dimensions are rejected.
pub fn synthesize(
    archetype: Archetype,
    dims: &Dimensions,
    style: Style,
) -> Result<Vec<Primitive>, LayoutError> {
    dims.validate()?;

    let primitives = match archetype {
        Archetype::Box => vec![plain_box(dims, style)],
        Archetype::Sphere => {
            let r = dims.radius();
            vec![Primitive::new(
                Solid::sphere(r),
                DVec3::new(0.0, r, 0.0),
                style.color,
                style.opacity,
            )]
        }
        Archetype::Humanoid => humanoid(dims, style),
        Archetype::Desk => desk(dims, style),
        Archetype::Cupboard => cupboard(dims, style),
    };

    debug!(
        "Synthesized {} primitive(s) for {} archetype",
        primitives.len(),
        archetype
    );
    Ok(primitives)
}

fn plain_box(dims: &Dimensions, style: Style) -> Primitive {
    let (w, h, d) = (dims.width(), dims.height(), dims.depth());
    Primitive::new(
        Solid::cuboid(w, h, d),
        DVec3::new(0.0, h / 2.0, 0.0),
        style.color,
        style.opacity,
    )
}

fn humanoid(dims: &Dimensions, style: Style) -> Vec<Primitive> {
    let sx = dims.width() / HUMANOID_REFERENCE_WIDTH;
    let sy = dims.height() / HUMANOID_REFERENCE_HEIGHT;
    let part = |solid: Solid, x: f64, y: f64| {
        Primitive::new(solid, DVec3::new(x, y, 0.0), style.color, style.opacity)
    };

    let leg = Solid::cylinder(4.0 * sx, 4.0 * sx, 50.0 * sy);
    let arm = Solid::cylinder(3.0 * sx, 3.0 * sx, 40.0 * sy);
    let head = Solid::Sphere {
        radius: 8.0 * sx.min(sy),
        width_segments: HEAD_SEGMENTS,
        height_segments: HEAD_SEGMENTS,
    };

    vec![
        part(leg, -5.0 * sx, 25.0 * sy),
        part(leg, 5.0 * sx, 25.0 * sy),
        part(Solid::cylinder(12.0 * sx, 8.0 * sx, 50.0 * sy), 0.0, 75.0 * sy),
        part(arm, -15.0 * sx, 80.0 * sy),
        part(arm, 15.0 * sx, 80.0 * sy),
        part(head, 0.0, 110.0 * sy),
    ]
}

fn desk(dims: &Dimensions, style: Style) -> Vec<Primitive> {
    let (w, h, d) = (dims.width(), dims.height(), dims.depth());
    let top_thickness = DESK_TOP_THICKNESS.min(h);
    let leg_height = h - top_thickness;

    let mut parts = vec![Primitive::new(
        Solid::cuboid(w, top_thickness, d),
        DVec3::new(0.0, h - top_thickness / 2.0, 0.0),
        style.color,
        style.opacity,
    )];

    let leg_x = w / 2.0 - DESK_LEG_INSET;
    let leg_z = d / 2.0 - DESK_LEG_INSET;
    for (sx, sz) in [(-1.0, -1.0), (1.0, -1.0), (-1.0, 1.0), (1.0, 1.0)] {
        parts.push(Primitive::new(
            Solid::cylinder(DESK_LEG_RADIUS, DESK_LEG_RADIUS, leg_height),
            DVec3::new(sx * leg_x, leg_height / 2.0, sz * leg_z),
            style.color,
            style.opacity,
        ));
    }
    parts
}

fn cupboard(dims: &Dimensions, style: Style) -> Vec<Primitive> {
    let (w, h, d) = (dims.width(), dims.height(), dims.depth());
    let mut parts = vec![plain_box(dims, style)];

    // Handles lie on their side, so the radius is also their vertical half extent
    let handle_radius = (w * 0.01).max(0.5).min(h / 2.0);
    let handle_length = (d * 0.06).max(2.0);
    let handle_z = d / 2.0 + (d * 0.02).max(1.0);
    for x in [w / 4.0, -w / 4.0] {
        parts.push(
            Primitive::new(
                Solid::cylinder(handle_radius, handle_radius, handle_length),
                DVec3::new(x, h / 2.0, handle_z),
                CUPBOARD_HANDLE_COLOR,
                CUPBOARD_TRIM_OPACITY,
            )
            .rotated(DVec3::new(std::f64::consts::FRAC_PI_2, 0.0, 0.0)),
        );
    }

    parts.push(Primitive::new(
        Solid::cuboid(
            (w * 0.01).max(0.5),
            (h - 10.0).max(h * 0.9),
            (d * 0.02).max(0.5),
        ),
        DVec3::new(0.0, h / 2.0, d / 2.0 + (d * 0.01).max(0.3)),
        CUPBOARD_FRAME_COLOR,
        CUPBOARD_TRIM_OPACITY,
    ));
    parts
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f64 = 1e-9;

    fn style() -> Style {
        Style::comparator(Color::rgb(0x65, 0x43, 0x21))
    }

    #[test]
    fn test_plain_box_rests_on_ground() {
        let dims = Dimensions::cuboid(10.0, 20.0, 30.0);
        let parts = synthesize(Archetype::Box, &dims, style()).unwrap();
        assert_eq!(parts.len(), 1);
        assert_eq!(parts[0].position, DVec3::new(0.0, 10.0, 0.0));
        assert_eq!(parts[0].solid, Solid::cuboid(10.0, 20.0, 30.0));
        assert_eq!(parts[0].opacity, COMPARATOR_OPACITY);
    }

    #[test]
    fn test_sphere_rests_on_ground() {
        let parts = synthesize(Archetype::Sphere, &Dimensions::sphere(12.0), style()).unwrap();
        let (min, max) = bounds_of(&parts).unwrap();
        assert!(min.y.abs() < EPS);
        assert!((max.y - 24.0).abs() < EPS);
    }

    #[test]
    fn test_humanoid_spans_requested_size() {
        let dims = Dimensions::cuboid(60.0, 180.0, 25.0);
        let parts = synthesize(Archetype::Humanoid, &dims, style()).unwrap();
        assert_eq!(parts.len(), 6);

        let (min, max) = bounds_of(&parts).unwrap();
        assert!(min.y.abs() < EPS, "feet at {}", min.y);
        assert!((max.y - 180.0).abs() < EPS, "head top at {}", max.y);
    }

    #[test]
    fn test_desk_layout() {
        let dims = Dimensions::cuboid(120.0, 75.0, 60.0);
        let parts = synthesize(Archetype::Desk, &dims, style()).unwrap();
        assert_eq!(parts.len(), 5);

        let (min, max) = bounds_of(&parts).unwrap();
        assert!(min.y.abs() < EPS);
        assert!((max.y - 75.0).abs() < EPS);
        assert!((max.x - 60.0).abs() < EPS);

        // legs sit inset from the corners
        assert_eq!(parts[4].position, DVec3::new(55.0, 35.0, 25.0));
    }

    #[test]
    fn test_low_desk_stays_valid() {
        let dims = Dimensions::cuboid(50.0, 3.0, 40.0);
        let parts = synthesize(Archetype::Desk, &dims, style()).unwrap();
        for part in &parts {
            let (min, max) = part.bounds();
            assert!(min.y >= -EPS);
            assert!(max.y <= 3.0 + EPS);
        }
    }

    #[test]
    fn test_cupboard_trim_in_front_of_doors() {
        let dims = Dimensions::cuboid(100.0, 180.0, 50.0);
        let parts = synthesize(Archetype::Cupboard, &dims, style()).unwrap();
        assert_eq!(parts.len(), 4);
        for trim in &parts[1..] {
            assert!(trim.position.z > 25.0);
            assert_eq!(trim.opacity, 0.9);
        }
        // rotated handles lie along z
        let (min, max) = parts[1].bounds();
        assert!((max.z - min.z - 3.0).abs() < 1e-6);
        assert!((max.y - min.y - 2.0).abs() < 1e-6);
    }

    #[test]
    fn test_flat_cupboard_handles_stay_inside_body() {
        for h in [0.0, 0.5, 0.99] {
            let dims = Dimensions::cuboid(100.0, h, 50.0);
            let parts = synthesize(Archetype::Cupboard, &dims, style()).unwrap();
            for part in &parts {
                let (min, max) = part.bounds();
                assert!(min.y >= -EPS, "h = {}: part reaches {}", h, min.y);
                assert!(max.y <= h + EPS, "h = {}: part reaches {}", h, max.y);
            }
        }
    }

    #[test]
    fn test_zero_dimensions_are_valid() {
        for archetype in [
            Archetype::Box,
            Archetype::Sphere,
            Archetype::Humanoid,
            Archetype::Desk,
            Archetype::Cupboard,
        ] {
            let parts = synthesize(archetype, &Dimensions::default(), style()).unwrap();
            assert!(!parts.is_empty());
            for part in parts {
                let (min, max) = part.bounds();
                assert!(min.is_finite() && max.is_finite());
            }
        }
    }

    #[test]
    fn test_negative_dimensions_rejected() {
        let err = synthesize(Archetype::Box, &Dimensions::cuboid(-1.0, 1.0, 1.0), style());
        assert!(matches!(err, Err(LayoutError::NegativeDimension { .. })));
    }

    #[test]
    fn test_unknown_archetype_degrades_to_box() {
        assert_eq!(Archetype::from_id("grand_piano"), Archetype::Box);
        assert_eq!(Archetype::from_id("standing_person"), Archetype::Humanoid);
        assert_eq!("Cabinet".parse::<Archetype>().unwrap(), Archetype::Cupboard);
    }

    #[test]
    fn test_color_hex() {
        let color = Color::from_hex("#8B7355").unwrap();
        assert_eq!(color, Color::rgb(0x8B, 0x73, 0x55));
        assert_eq!(color.to_hex(), "#8B7355");
        assert_eq!(Color::from_hex("#444"), Some(Color::rgb(0x44, 0x44, 0x44)));
        assert_eq!(Color::from_hex("nope"), None);
    }
}
