//! # exckit
//!
//! Drill and slot editing for Excellon drill data.
//!
//! ## Architecture
//!
//! exckit is organized as a workspace with multiple crates:
//!
//! 1. **exckit-core** - Points, bounds, rounded tool diameters, units, geometry errors
//! 2. **exckit-settings** - Configuration and last used placement parameters
//! 3. **exckit-designer** - Primitives, arrays, resize engine, tool table, editor
//! 4. **exckit** - Binary that replays edit scripts against the editor
//!
//! ## Features
//!
//! - **Placement**: Drills, slots, linear and circular arrays of either
//! - **Resize**: Drill scaling and slot reconstruction at a new diameter
//! - **Tool table**: Shapes grouped by diameter, add/delete/edit tools
//! - **Move and copy**: Normal, linear, grid and circular copies
//! - **Documents**: JSON round-trip of the tool table

pub mod script;

pub use exckit_designer as designer;
pub use exckit_settings as settings;

pub use exckit_core::{GeometryError, Point, ToolDiameter, Units};
pub use exckit_designer::{ExcDocument, ExcEditor, ToolKind};
pub use exckit_settings::{Config, SettingsPersistence};
pub use script::{EditCommand, EditScript, ScriptReport};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Build date (set at compile time)
pub const BUILD_DATE: &str = env!("BUILD_DATE");

/// Initialize logging with the default configuration
///
/// Logs go to stderr so that documents printed to stdout stay clean.
/// `RUST_LOG` overrides the default `info` level.
pub fn init_logging() -> anyhow::Result<()> {
    use tracing_subscriber::fmt;
    use tracing_subscriber::prelude::*;
    use tracing_subscriber::EnvFilter;

    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    let fmt_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_level(true)
        .with_line_number(true);

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt_layer)
        .try_init()?;

    Ok(())
}
