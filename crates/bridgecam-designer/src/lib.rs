//! # BridgeCAM Designer
//!
//! This crate provides the interactive side of bridge (holding tab)
//! placement: a scene of toolpath geometry, draggable bridge markers that
//! snap onto selected toolpaths, and the toolpath file records the geometry
//! comes from.
//!
//! ## Core Components
//!
//! - **Geometry**: floating-point points and lines, fixed-point toolpath
//!   paths, bounding boxes and the image-space angle helpers
//! - **Items**: the `GraphicsItem` interface, path-carrying geometry items
//!   and the collision query used by snapping
//! - **Bridge**: the marker itself, its snapping search, lifecycle and glyph
//! - **Scene**: input dispatch, successor creation, deferred removal and cut
//!   collection
//! - **File**: toolpath file records and their persisted form
//!
//! ## Architecture
//!
//! ```text
//! EventBus (pointer moves from the view)
//!   └── Scene
//!         ├── GeometryItem (toolpath / gerber / drill / raw)
//!         └── BridgeMarker ── snap ──> SceneQuery::colliding_items
//!                └── ActiveBridgeSlot (shared with the editor)
//! ```
//!
//! ## Usage
//!
//! ```rust
//! use bridgecam_core::SideOfMilling;
//! use bridgecam_designer::{
//!     path_from_points, ActiveBridgeSlot, BridgeParams, GeometryItem, ItemType, Point, Scene,
//! };
//!
//! let mut scene = Scene::default();
//! let square = path_from_points(&[
//!     Point::new(0.0, 0.0),
//!     Point::new(10.0, 0.0),
//!     Point::new(10.0, 10.0),
//!     Point::new(0.0, 10.0),
//! ]);
//! scene.add_item(GeometryItem::new(ItemType::Toolpath, vec![square]).with_selected(true));
//!
//! let slot = ActiveBridgeSlot::new();
//! let params = BridgeParams::new(2.0, 1.0, SideOfMilling::Outer);
//! let id = scene.spawn_bridge(params, &slot)?;
//!
//! scene.mouse_press(id)?;
//! scene.mouse_move(id, Point::new(5.0, 0.5))?;
//! scene.mouse_release(id)?;
//!
//! let cuts = scene.bridge_cuts(SideOfMilling::Outer);
//! assert_eq!(cuts.len(), 1);
//! # Ok::<(), bridgecam_designer::DesignerError>(())
//! ```

pub mod bridge;
pub mod error;
pub mod file;
pub mod geometry;
pub mod items;
pub mod scene;

pub use bridge::{
    ActiveBridgeSlot, BridgeGlyph, BridgeMarker, BridgeParams, BridgeState, EarArc,
    PointerFollow, ReleaseOutcome, RenderStyle,
};
pub use error::{DesignerError, DesignerResult};
pub use file::{ItemGroup, ToolpathFile};
pub use geometry::{
    direction_angle, normalize_angle, path_from_points, polar, Bounds, IntPoint, LineF, Path,
    Paths, Pathss, Point, UNIT_SCALE,
};
pub use items::{GeometryItem, GraphicsItem, ItemId, ItemStore, ItemType, SceneItem, SceneQuery};
pub use scene::{BridgeCut, Scene};
