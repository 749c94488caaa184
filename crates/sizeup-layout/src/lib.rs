//! # SizeUp Layout
//!
//! The layout engine behind SizeUp. Given a comparator from the catalog, a
//! user-specified target, a symbolic position and a gap distance, it
//! produces a renderer-neutral [`SceneFrame`]: primitive solids, the solved
//! target anchor, dimension overlays, camera framing and the info panel.
//!
//! All geometry is computed in centimeters. The display unit only affects
//! label text. The engine functions are pure; [`SessionController`] is the
//! single owner of mutable session state.

pub mod annotations;
pub mod export;
pub mod geometry;
pub mod placement;
pub mod registry;
pub mod scene;
pub mod state;

pub use annotations::{AnnotationSet, Label, MeasuredAxis, Segment, SegmentRole};
pub use export::{encode_png, export_frame, ExportError, FrameBuffer, FrameSource};
pub use geometry::{synthesize, Archetype, Color, Primitive, Solid, Style};
pub use placement::{solve, ComparatorBounds, Placement};
pub use registry::{
    comparators, default_comparator, find, BottomPlacement, ComparatorSelection, ComparatorSpec,
    Positioning,
};
pub use scene::{compose, CameraFraming, GridSpec, InfoPanel, SceneFrame, SceneInput};
pub use state::SessionController;
