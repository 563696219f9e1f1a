//! # BridgeCAM
//!
//! Interactive placement of bridges (holding tabs) on CNC milling toolpaths.
//!
//! A bridge marker is dragged along a selected toolpath, snaps onto the
//! nearest edge within its capture radius, and yields the cut points used to
//! leave a tab in the machined contour so the part stays attached to the
//! stock.
//!
//! ## Architecture
//!
//! BridgeCAM is organized as a workspace with multiple crates:
//!
//! 1. **bridgecam-core** - Errors, event bus, colors, milling enums, shared-state aliases
//! 2. **bridgecam-designer** - Geometry, scene items, bridge markers, toolpath file records
//! 3. **bridgecam-settings** - Configuration loading, saving and validation
//! 4. **bridgecam** - Session replay and the command-line binary

pub mod session;

pub use bridgecam_designer as designer;
pub use bridgecam_settings as settings;

pub use bridgecam_core::{AppEvent, BoardSide, Color, Error, EventBus, Result, SideOfMilling};
pub use bridgecam_designer::{
    ActiveBridgeSlot, BridgeCut, BridgeMarker, BridgeParams, GeometryItem, ItemId, ItemType,
    Point, ReleaseOutcome, RenderStyle, Scene, ToolpathFile,
};
pub use bridgecam_settings::Config;
pub use session::{replay, SessionOutcome, SessionScript};

/// Application version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Build date
pub const BUILD_DATE: &str = env!("BUILD_DATE");

/// Initialize logging with tracing
///
/// Filtering follows `RUST_LOG`, with INFO added. Logs go to stderr so the
/// binary's JSON output on stdout stays clean.
pub fn init_logging() -> anyhow::Result<()> {
    use tracing_subscriber::fmt;
    use tracing_subscriber::prelude::*;
    use tracing_subscriber::EnvFilter;

    let env_filter = EnvFilter::from_default_env().add_directive(tracing::Level::INFO.into());

    let fmt_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_level(true)
        .with_thread_ids(true)
        .with_thread_names(true)
        .with_line_number(true)
        .pretty();

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt_layer)
        .try_init()?;

    Ok(())
}
