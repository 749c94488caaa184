//! Dimension-annotation builder
//!
//! Produces measurement overlays (a main line, two end caps and a label)
//! for a positioned box or sphere. Line geometry is always computed in
//! centimeters with fixed offsets; only the label text depends on the
//! display unit, so switching units never moves a line.

use crate::geometry::Color;
use glam::DVec3;
use serde::{Deserialize, Serialize};
use sizeup_core::units::{format_diameter, format_length};
use sizeup_core::{Dimensions, ShapeKind, Unit};

/// Thickness of lines and caps
pub const LINE_THICKNESS: f64 = 0.2;
pub const LINE_OPACITY: f32 = 0.6;
pub const CAP_OPACITY: f32 = 0.8;

/// Gap between a box edge and its width/height/depth lines
pub const EDGE_OFFSET: f64 = 6.0;

/// Extra clearance in front of the object along the depth axis
pub const DEPTH_CLEARANCE: f64 = 8.0;

pub const BOX_CAP_LENGTH: f64 = 3.0;
pub const SPHERE_CAP_LENGTH: f64 = 4.0;

/// The quantity an annotation measures
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MeasuredAxis {
    Width,
    Height,
    Depth,
    Diameter,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SegmentRole {
    Line,
    EndCap,
}

/// A straight bar drawn between two points
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Segment {
    pub start: DVec3,
    pub end: DVec3,
    pub thickness: f64,
    pub color: Color,
    pub opacity: f32,
    pub role: SegmentRole,
}

impl Segment {
    pub fn midpoint(&self) -> DVec3 {
        (self.start + self.end) * 0.5
    }

    pub fn length(&self) -> f64 {
        self.start.distance(self.end)
    }
}

/// Text anchored at a point in the scene
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Label {
    pub anchor: DVec3,
    pub text: String,
}

/// All overlay pieces for one measured axis
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnnotationSet {
    pub axis: MeasuredAxis,
    /// Measured length in centimeters
    pub value: f64,
    pub segments: Vec<Segment>,
    pub labels: Vec<Label>,
}

impl AnnotationSet {
    /// The main dimension line
    pub fn line(&self) -> Option<&Segment> {
        self.segments.iter().find(|s| s.role == SegmentRole::Line)
    }

    pub fn end_caps(&self) -> impl Iterator<Item = &Segment> {
        self.segments.iter().filter(|s| s.role == SegmentRole::EndCap)
    }
}

/// Build the annotations for an object anchored at `anchor`
///
/// `anchor` is the object's center (box center, sphere center). Spheres get
/// a single diameter annotation; boxes get width, height and depth.
pub fn build(
    anchor: DVec3,
    dims: &Dimensions,
    kind: ShapeKind,
    unit: Unit,
    color: Color,
) -> Vec<AnnotationSet> {
    match kind {
        ShapeKind::Sphere => vec![sphere_diameter(anchor, dims.radius(), unit, color)],
        ShapeKind::Box => box_dimensions(anchor, dims, unit, color),
    }
}

fn line(start: DVec3, end: DVec3, color: Color) -> Segment {
    Segment {
        start,
        end,
        thickness: LINE_THICKNESS,
        color,
        opacity: LINE_OPACITY,
        role: SegmentRole::Line,
    }
}

/// End cap of `length` centered on `at`, oriented along `direction`
fn cap(at: DVec3, direction: DVec3, length: f64, color: Color) -> Segment {
    let half = direction * (length / 2.0);
    Segment {
        start: at - half,
        end: at + half,
        thickness: LINE_THICKNESS,
        color,
        opacity: CAP_OPACITY,
        role: SegmentRole::EndCap,
    }
}

fn sphere_diameter(anchor: DVec3, r: f64, unit: Unit, color: Color) -> AnnotationSet {
    let center = anchor + DVec3::new(0.0, r, r + DEPTH_CLEARANCE);
    let start = center - DVec3::X * r;
    let end = center + DVec3::X * r;

    AnnotationSet {
        axis: MeasuredAxis::Diameter,
        value: r * 2.0,
        segments: vec![
            line(start, end, color),
            cap(start, DVec3::Y, SPHERE_CAP_LENGTH, color),
            cap(end, DVec3::Y, SPHERE_CAP_LENGTH, color),
        ],
        labels: vec![Label {
            anchor: center,
            text: format_diameter(r, unit),
        }],
    }
}

fn box_dimensions(
    anchor: DVec3,
    dims: &Dimensions,
    unit: Unit,
    color: Color,
) -> Vec<AnnotationSet> {
    let (w, h, d) = (dims.width(), dims.height(), dims.depth());
    let front = anchor.z + w.max(d) / 2.0 + DEPTH_CLEARANCE;
    let below = anchor.y - h / 2.0 - EDGE_OFFSET;

    let width_center = DVec3::new(anchor.x, below, front);
    let height_center = DVec3::new(anchor.x - w / 2.0 - EDGE_OFFSET, anchor.y, front);
    let depth_center = DVec3::new(anchor.x + w / 2.0 + EDGE_OFFSET, below, anchor.z);

    vec![
        measured(MeasuredAxis::Width, w, width_center, DVec3::X, DVec3::Y, unit, color),
        measured(MeasuredAxis::Height, h, height_center, DVec3::Y, DVec3::X, unit, color),
        measured(MeasuredAxis::Depth, d, depth_center, DVec3::Z, DVec3::X, unit, color),
    ]
}

/// Line of `length` along `along` centered on `center`, caps along `across`
fn measured(
    axis: MeasuredAxis,
    length: f64,
    center: DVec3,
    along: DVec3,
    across: DVec3,
    unit: Unit,
    color: Color,
) -> AnnotationSet {
    let start = center - along * (length / 2.0);
    let end = center + along * (length / 2.0);

    AnnotationSet {
        axis,
        value: length,
        segments: vec![
            line(start, end, color),
            cap(start, across, BOX_CAP_LENGTH, color),
            cap(end, across, BOX_CAP_LENGTH, color),
        ],
        labels: vec![Label {
            anchor: center,
            text: format_length(Some(length), unit),
        }],
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const BLUE: Color = Color::rgb(0x3B, 0x82, 0xF6);

    #[test]
    fn test_sphere_diameter_line() {
        let sets = build(
            DVec3::new(75.0, 15.0, 0.0),
            &Dimensions::sphere(15.0),
            ShapeKind::Sphere,
            Unit::Centimeters,
            BLUE,
        );
        assert_eq!(sets.len(), 1);

        let set = &sets[0];
        assert_eq!(set.axis, MeasuredAxis::Diameter);
        let line = set.line().unwrap();
        assert_eq!(line.start, DVec3::new(60.0, 30.0, 23.0));
        assert_eq!(line.end, DVec3::new(90.0, 30.0, 23.0));
        assert_eq!(line.opacity, LINE_OPACITY);
        assert_eq!(set.end_caps().count(), 2);
        assert!(set.end_caps().all(|c| (c.length() - SPHERE_CAP_LENGTH).abs() < 1e-12));
        assert_eq!(set.labels[0].text, "⌀ 30.0cm");
        assert_eq!(set.labels[0].anchor, line.midpoint());
    }

    #[test]
    fn test_box_lines() {
        let sets = build(
            DVec3::new(0.0, 37.5, 0.0),
            &Dimensions::cuboid(120.0, 75.0, 60.0),
            ShapeKind::Box,
            Unit::Centimeters,
            BLUE,
        );
        let axes: Vec<MeasuredAxis> = sets.iter().map(|s| s.axis).collect();
        assert_eq!(
            axes,
            vec![MeasuredAxis::Width, MeasuredAxis::Height, MeasuredAxis::Depth]
        );

        let width = sets[0].line().unwrap();
        assert_eq!(width.start, DVec3::new(-60.0, -6.0, 68.0));
        assert_eq!(width.end, DVec3::new(60.0, -6.0, 68.0));

        let height = sets[1].line().unwrap();
        assert_eq!(height.start, DVec3::new(-66.0, 0.0, 68.0));
        assert_eq!(height.end, DVec3::new(-66.0, 75.0, 68.0));

        let depth = sets[2].line().unwrap();
        assert_eq!(depth.start, DVec3::new(66.0, -6.0, -30.0));
        assert_eq!(depth.end, DVec3::new(66.0, -6.0, 30.0));

        assert_eq!(sets[0].labels[0].text, "120.0cm");
        assert_eq!(sets[1].labels[0].text, "75.0cm");
        assert_eq!(sets[2].labels[0].text, "60.0cm");
    }

    #[test]
    fn test_caps_sit_on_line_ends() {
        let sets = build(
            DVec3::new(10.0, 10.0, 0.0),
            &Dimensions::cuboid(20.0, 20.0, 20.0),
            ShapeKind::Box,
            Unit::Centimeters,
            BLUE,
        );
        for set in &sets {
            let line = set.line().unwrap();
            let caps: Vec<&Segment> = set.end_caps().collect();
            assert_eq!(caps[0].midpoint(), line.start);
            assert_eq!(caps[1].midpoint(), line.end);
            assert!((caps[0].length() - BOX_CAP_LENGTH).abs() < 1e-12);
        }
    }

    #[test]
    fn test_unit_only_changes_labels() {
        let dims = Dimensions::cuboid(30.0, 20.0, 15.0);
        let anchor = DVec3::new(100.0, 10.0, 0.0);
        let cm = build(anchor, &dims, ShapeKind::Box, Unit::Centimeters, BLUE);
        let inches = build(anchor, &dims, ShapeKind::Box, Unit::Inches, BLUE);

        for (a, b) in cm.iter().zip(&inches) {
            assert_eq!(a.segments, b.segments);
            assert_eq!(a.labels[0].anchor, b.labels[0].anchor);
            assert_ne!(a.labels[0].text, b.labels[0].text);
        }
        assert_eq!(inches[0].labels[0].text, "11.8\"");
    }
}
