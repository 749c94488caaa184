//! Scene composer
//!
//! Assembles comparator geometry, the placed target and the optional
//! annotation overlays into one [`SceneFrame`] for the external renderer.
//! A frame is recomputed from scratch on every call.

use crate::annotations::{self, AnnotationSet, Label};
use crate::geometry::{self, Color, Primitive, Solid, Style};
use crate::placement::{self, ComparatorBounds, Placement};
use crate::registry::ComparatorSelection;
use glam::DVec3;
use serde::Serialize;
use sizeup_core::units::{format_diameter, format_length};
use sizeup_core::{Dimensions, LayoutError, ShapeKind, SymbolicPosition, TargetSpec, Unit};
use tracing::debug;

/// Height of the comparator caption above the comparator top
const CAPTION_CLEARANCE: f64 = 20.0;

/// Height used for camera framing when the comparator has none
const FALLBACK_FRAMING_HEIGHT: f64 = 180.0;

/// Everything the composer reads
#[derive(Debug, Clone, Copy)]
pub struct SceneInput<'a> {
    pub comparator: &'a ComparatorSelection,
    pub target: &'a TargetSpec,
    pub unit: Unit,
    pub position: Option<SymbolicPosition>,
    /// Gap between comparator and target in centimeters
    pub distance: f64,
    pub show_annotations: bool,
}

/// Comparator part of a frame
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ComparatorLayer {
    pub id: String,
    pub name: String,
    pub dimensions: Dimensions,
    pub primitives: Vec<Primitive>,
    /// Name and size caption floating above the comparator
    pub caption: Label,
    pub annotations: Vec<AnnotationSet>,
}

/// Target part of a frame
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TargetLayer {
    pub anchor: DVec3,
    pub primitive: Primitive,
    pub annotations: Vec<AnnotationSet>,
}

/// Initial camera pose and orbit limits
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct CameraFraming {
    pub eye: DVec3,
    pub target: DVec3,
    /// Vertical field of view in degrees
    pub fov: f64,
    pub min_distance: f64,
    pub max_distance: f64,
    pub min_polar_angle: f64,
    pub max_polar_angle: f64,
}

impl CameraFraming {
    /// Frame a comparator of height `height` (zero falls back to 180 cm)
    pub fn for_height(height: f64) -> Self {
        let height = if height > 0.0 {
            height
        } else {
            FALLBACK_FRAMING_HEIGHT
        };
        let distance = height.max(FALLBACK_FRAMING_HEIGHT) * 2.5;

        Self {
            eye: DVec3::new(distance, height * 0.8, distance),
            target: DVec3::ZERO,
            fov: 50.0,
            min_distance: 20.0,
            max_distance: distance * 4.0,
            min_polar_angle: 0.0,
            max_polar_angle: std::f64::consts::PI / 1.8,
        }
    }
}

/// Ground grid drawn under the scene
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct GridSpec {
    pub size: f64,
    pub cell_size: f64,
    pub section_size: f64,
    pub fade_distance: f64,
}

impl Default for GridSpec {
    fn default() -> Self {
        Self {
            size: 500.0,
            cell_size: 10.0,
            section_size: 100.0,
            fade_distance: 800.0,
        }
    }
}

/// Text summary shown beside the viewport
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct InfoPanel {
    pub comparator_name: String,
    pub comparator_color: Color,
    pub comparator_size: String,
    /// Present only while the target can be drawn
    pub target_size: Option<String>,
    pub target_shape: Option<ShapeKind>,
}

/// One complete frame description for the renderer
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SceneFrame {
    pub unit: Unit,
    pub comparator: ComparatorLayer,
    pub target: Option<TargetLayer>,
    pub camera: CameraFraming,
    pub grid: GridSpec,
    pub info: InfoPanel,
}

impl SceneFrame {
    /// Serialize the frame for a renderer that consumes JSON
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

/// Human-readable size (`w × h × d` or `⌀ 2r`) in the display unit
pub fn size_summary(kind: ShapeKind, dims: &Dimensions, unit: Unit) -> String {
    match kind {
        ShapeKind::Box => format!(
            "{} × {} × {}",
            format_length(Some(dims.width()), unit),
            format_length(Some(dims.height()), unit),
            format_length(Some(dims.depth()), unit)
        ),
        ShapeKind::Sphere => format_diameter(dims.radius(), unit),
    }
}

/// Compose a frame from the current session state
pub fn compose(input: &SceneInput<'_>) -> Result<SceneFrame, LayoutError> {
    let spec = input.comparator.spec;
    let dims = input.comparator.dimensions();

    if let Some(position) = input.position {
        if !spec.allows(position) {
            return Err(LayoutError::PositionNotAllowed {
                position,
                comparator: spec.id.to_string(),
            });
        }
    }

    let primitives = geometry::synthesize(spec.archetype, &dims, Style::comparator(spec.color))?;
    let height = dims.bounding_height(spec.kind);
    let center = DVec3::new(0.0, height / 2.0, 0.0);

    let comparator = ComparatorLayer {
        id: spec.id.to_string(),
        name: spec.name.to_string(),
        dimensions: dims,
        primitives,
        caption: Label {
            anchor: DVec3::new(0.0, height + CAPTION_CLEARANCE, 0.0),
            text: format!("{}\n{}", spec.name, size_summary(spec.kind, &dims, input.unit)),
        },
        annotations: if input.show_annotations {
            annotations::build(center, &dims, spec.kind, input.unit, spec.color)
        } else {
            Vec::new()
        },
    };

    let placement = placement::solve(
        &ComparatorBounds::of(spec, &dims),
        input.target,
        input.position,
        input.distance,
    )?;

    let target = match placement {
        Placement::Positioned { anchor } => {
            let style = Style::target();
            Some(TargetLayer {
                anchor,
                primitive: Primitive::new(
                    Solid::for_shape(input.target.shape, &input.target.dimensions),
                    anchor,
                    style.color,
                    style.opacity,
                ),
                annotations: if input.show_annotations {
                    annotations::build(
                        anchor,
                        &input.target.dimensions,
                        input.target.shape,
                        input.unit,
                        style.color,
                    )
                } else {
                    Vec::new()
                },
            })
        }
        Placement::NoTarget => None,
    };

    let info = InfoPanel {
        comparator_name: spec.name.to_string(),
        comparator_color: spec.color,
        comparator_size: size_summary(spec.kind, &dims, input.unit),
        target_size: target
            .as_ref()
            .map(|_| size_summary(input.target.shape, &input.target.dimensions, input.unit)),
        target_shape: target.as_ref().map(|_| input.target.shape),
    };

    debug!(
        "Composed frame: comparator={} primitives={} target={}",
        spec.id,
        comparator.primitives.len(),
        target.is_some()
    );

    Ok(SceneFrame {
        unit: input.unit,
        comparator,
        target,
        camera: CameraFraming::for_height(height),
        grid: GridSpec::default(),
        info,
    })
}
