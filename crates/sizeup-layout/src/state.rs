//! Session controller
//!
//! Owns the transient application state (selected comparator and its size
//! overrides, target, unit, position, gap, overlay flag, pending export) and
//! feeds it by reference to the stateless layout functions. Every setter
//! validates at the boundary; a rejected value leaves the state untouched.

use crate::export::{self, ExportError, FrameSource};
use crate::registry::{self, ComparatorSelection, ComparatorSpec};
use crate::scene::{self, SceneFrame, SceneInput};
use sizeup_core::units::{from_display, parse_length, DistanceRange};
use sizeup_core::{
    validate_dimension, validate_distance, DimensionAxis, Dimensions, LayoutError, ShapeKind,
    SymbolicPosition, TargetSpec, Unit,
};
use sizeup_settings::Config;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

/// Gap between comparator and target on launch, in centimeters
pub const STOCK_DISTANCE_CM: f64 = 30.0;

#[derive(Debug, Clone)]
pub struct SessionController {
    selection: ComparatorSelection,
    target: TargetSpec,
    unit: Unit,
    position: SymbolicPosition,
    distance_cm: f64,
    show_annotations: bool,
    export_path: PathBuf,
    pending_export: Option<PathBuf>,
}

impl Default for SessionController {
    fn default() -> Self {
        Self::new()
    }
}

impl SessionController {
    /// Stock scene (desk, 30×20×15 box, right, 30 cm) with default preferences
    pub fn new() -> Self {
        Self::from_config(&Config::default())
    }

    /// Stock scene with the saved display and export preferences applied
    pub fn from_config(config: &Config) -> Self {
        let spec = registry::default_comparator();
        Self {
            selection: ComparatorSelection::new(spec),
            target: TargetSpec::default(),
            unit: config.preferences.unit,
            position: spec.rehome(SymbolicPosition::Right),
            distance_cm: STOCK_DISTANCE_CM,
            show_annotations: config.preferences.show_dimension_lines,
            export_path: config.export.output_path(),
            pending_export: None,
        }
    }

    pub fn comparator(&self) -> &'static ComparatorSpec {
        self.selection.spec
    }

    pub fn selection(&self) -> &ComparatorSelection {
        &self.selection
    }

    /// Effective comparator dimensions in centimeters
    pub fn comparator_dimensions(&self) -> Dimensions {
        self.selection.dimensions()
    }

    pub fn target(&self) -> &TargetSpec {
        &self.target
    }

    pub fn unit(&self) -> Unit {
        self.unit
    }

    pub fn position(&self) -> SymbolicPosition {
        self.position
    }

    /// Gap between comparator and target in centimeters
    pub fn distance_cm(&self) -> f64 {
        self.distance_cm
    }

    pub fn show_annotations(&self) -> bool {
        self.show_annotations
    }

    /// Range of the gap control in the current display unit
    pub fn distance_range(&self) -> DistanceRange {
        DistanceRange::for_unit(self.unit)
    }

    /// Where the next requested export is written
    pub fn export_path(&self) -> &Path {
        &self.export_path
    }

    pub fn has_pending_export(&self) -> bool {
        self.pending_export.is_some()
    }

    /// Switch comparator; unknown ids are ignored and return false
    pub fn select_comparator(&mut self, id: &str) -> bool {
        let Some(spec) = registry::find(id) else {
            return false;
        };

        let position = spec.rehome(self.position);
        if position != self.position {
            info!(
                "Position {} not offered by {}, moved to {}",
                self.position, spec.id, position
            );
        }

        self.selection = ComparatorSelection::new(spec);
        self.position = position;
        info!("Comparator set to {}", spec.id);
        true
    }

    /// Override one comparator dimension, `value` in the display unit
    pub fn set_comparator_dimension(
        &mut self,
        axis: DimensionAxis,
        value: f64,
    ) -> Result<(), LayoutError> {
        let kind = self.selection.spec.kind;
        let cm = Self::checked_dimension(kind, axis, from_display(value, self.unit))?;
        self.selection = self
            .selection
            .with_override(Dimensions::default().with(axis, cm));
        info!("Comparator {} set to {:.2} cm", axis, cm);
        Ok(())
    }

    /// Set one target dimension, `value` in the display unit
    pub fn set_target_dimension(
        &mut self,
        axis: DimensionAxis,
        value: f64,
    ) -> Result<(), LayoutError> {
        self.apply_target_dimension(axis, from_display(value, self.unit))
    }

    /// Set one target dimension from text typed in the display unit
    pub fn set_target_dimension_text(
        &mut self,
        axis: DimensionAxis,
        input: &str,
    ) -> Result<(), LayoutError> {
        let cm = parse_length(input, self.unit).inspect_err(|e| warn!("{}", e))?;
        self.apply_target_dimension(axis, cm)
    }

    fn apply_target_dimension(&mut self, axis: DimensionAxis, cm: f64) -> Result<(), LayoutError> {
        let cm = Self::checked_dimension(self.target.shape, axis, cm)?;
        self.target = TargetSpec::new(self.target.shape, self.target.dimensions.with(axis, cm));
        info!("Target {} set to {:.2} cm", axis, cm);
        Ok(())
    }

    /// Change the target shape, resetting its dimensions
    pub fn set_target_shape(&mut self, shape: ShapeKind) {
        if shape == self.target.shape {
            return;
        }
        self.target = TargetSpec::fresh(shape);
        info!("Target shape set to {}", shape);
    }

    pub fn set_position(&mut self, position: SymbolicPosition) -> Result<(), LayoutError> {
        let spec = self.selection.spec;
        if !spec.allows(position) {
            warn!("Position {} rejected for {}", position, spec.id);
            return Err(LayoutError::PositionNotAllowed {
                position,
                comparator: spec.id.to_string(),
            });
        }
        self.position = position;
        info!("Position set to {}", position);
        Ok(())
    }

    /// Set the gap, `value` in `unit`; clamped into the control range of `unit`
    pub fn set_distance(&mut self, value: f64, unit: Unit) -> Result<(), LayoutError> {
        let cm = validate_distance(from_display(value, unit)).inspect_err(|e| warn!("{}", e))?;
        self.distance_cm = DistanceRange::for_unit(unit).clamp_cm(cm);
        info!("Distance set to {:.2} cm", self.distance_cm);
        Ok(())
    }

    /// Change the display unit; geometry, the gap included, stays as it is
    pub fn set_unit(&mut self, unit: Unit) {
        if unit == self.unit {
            return;
        }
        self.unit = unit;
        info!("Unit set to {}", unit);
    }

    pub fn set_show_annotations(&mut self, show: bool) {
        self.show_annotations = show;
        info!("Dimension lines {}", if show { "shown" } else { "hidden" });
    }

    /// Compose the frame for the current state
    pub fn compose(&self) -> Result<SceneFrame, LayoutError> {
        scene::compose(&SceneInput {
            comparator: &self.selection,
            target: &self.target,
            unit: self.unit,
            position: Some(self.position),
            distance: self.distance_cm,
            show_annotations: self.show_annotations,
        })
    }

    /// Queue an export to the configured path; it runs after the next
    /// rendered frame
    pub fn request_export(&mut self) {
        info!("Export requested: {}", self.export_path.display());
        self.pending_export = Some(self.export_path.clone());
    }

    /// Called by the renderer once a frame is on screen
    ///
    /// Runs a pending export against `surface`. Returns `None` when nothing
    /// was pending. Failures are logged and returned; the session stays
    /// usable either way.
    pub fn on_frame_rendered(
        &mut self,
        surface: Option<&dyn FrameSource>,
    ) -> Option<Result<PathBuf, ExportError>> {
        let path = self.pending_export.take()?;
        let Some(source) = surface else {
            tracing::error!("Export to {} failed: no render surface", path.display());
            return Some(Err(ExportError::NoSurface));
        };
        Some(export::export_frame(source, &path))
    }

    /// Check that `axis` belongs to `kind` and `cm` is a usable length
    fn checked_dimension(
        kind: ShapeKind,
        axis: DimensionAxis,
        cm: f64,
    ) -> Result<f64, LayoutError> {
        if !kind.required_axes().contains(&axis) {
            let err = LayoutError::InvalidInput {
                input: axis.to_string(),
                reason: format!("not a {} dimension", kind),
            };
            warn!("{}", err);
            return Err(err);
        }
        validate_dimension(axis, cm).inspect_err(|e| warn!("{}", e))
    }
}
