//! # SizeUp
//!
//! Compare the size of an object against familiar reference objects
//! (a standing person, a cupboard, a desk) in a shared 3D scene.
//!
//! ## Architecture
//!
//! SizeUp is organized as a workspace with multiple crates:
//!
//! 1. **sizeup-core** - Length units, dimension records, shape kinds, errors
//! 2. **sizeup-layout** - Catalog, geometry, placement, annotations, scene
//!    composition, session state and PNG export
//! 3. **sizeup-settings** - Persisted display and export preferences
//! 4. **sizeup** - Binary that wires the crates together
//!
//! The layout engine emits a renderer-neutral [`SceneFrame`]; drawing it is
//! left to whichever frontend consumes the frame.

pub use sizeup_core::{
    DimensionAxis, Dimensions, LayoutError, ShapeKind, SymbolicPosition, TargetSpec, Unit,
};

pub use sizeup_layout::{
    compose, AnnotationSet, CameraFraming, ComparatorSelection, ComparatorSpec, ExportError,
    FrameBuffer, FrameSource, InfoPanel, Placement, Primitive, SceneFrame, SessionController,
};

pub use sizeup_settings::{Config, Preferences, SettingsManager};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Build date (set at compile time)
pub const BUILD_DATE: &str = env!("BUILD_DATE");

/// Environment variable selecting the log format (`pretty` or `json`)
pub const LOG_FORMAT_ENV: &str = "SIZEUP_LOG_FORMAT";

/// Initialize logging with the default configuration
///
/// Sets up structured logging with:
/// - Output on stderr, leaving stdout for scene frames
/// - RUST_LOG environment variable support
/// - Pretty formatting, or JSON lines when `SIZEUP_LOG_FORMAT=json`
pub fn init_logging() -> anyhow::Result<()> {
    use tracing_subscriber::fmt;
    use tracing_subscriber::prelude::*;
    use tracing_subscriber::EnvFilter;

    let env_filter = EnvFilter::from_default_env().add_directive(tracing::Level::INFO.into());
    let json = std::env::var(LOG_FORMAT_ENV).is_ok_and(|v| v.eq_ignore_ascii_case("json"));

    if json {
        let fmt_layer = fmt::layer()
            .with_writer(std::io::stderr)
            .with_target(true)
            .json();

        tracing_subscriber::registry()
            .with(env_filter)
            .with(fmt_layer)
            .try_init()?;
    } else {
        let fmt_layer = fmt::layer()
            .with_writer(std::io::stderr)
            .with_target(true)
            .with_level(true)
            .with_line_number(true)
            .pretty();

        tracing_subscriber::registry()
            .with(env_filter)
            .with(fmt_layer)
            .try_init()?;
    }

    Ok(())
}
