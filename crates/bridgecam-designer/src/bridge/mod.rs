//! Bridge markers.
//!
//! A bridge marker is dragged along a selected toolpath and snaps onto the
//! nearest edge within its capture radius. Once settled it yields the cut
//! points used to leave a holding tab in the machined contour.
//!
//! Input reaches a marker through two channels:
//!
//! - while idle after creation it follows the pointer passively, fed by
//!   [`ViewEvent::PointerMoved`] broadcasts on the [`EventBus`];
//! - once pressed it stops following and is dragged directly.
//!
//! Both channels end up in [`BridgeMarker::calculate`].

mod glyph;
mod slot;
pub mod snap;

pub use glyph::{body_path, build_glyph, outline_path, BridgeGlyph, EarArc, RenderStyle};
pub use slot::ActiveBridgeSlot;

use std::sync::Arc;

use bridgecam_core::{
    thread_safe_deque, AppEvent, EventBus, EventCategory, EventFilter, SideOfMilling,
    SubscriptionId, ThreadSafeDeque, ViewEvent,
};
use lyon::path::Path as LyonPath;
use serde::{Deserialize, Serialize};

use crate::error::{DesignerError, DesignerResult};
use crate::geometry::{polar, Bounds, IntPoint, LineF, Path, Point};
use crate::items::{GraphicsItem, ItemType, SceneQuery};

/// Extra length applied to each half of the cut segment so the cut fully
/// severs the toolpath.
pub const CUT_OVERLAP: f64 = 0.51;

/// Immutable marker geometry.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BridgeParams {
    /// Diameter of the capture zone and of the drawn body.
    pub capture_diameter: f64,
    /// Width of the tab left in the toolpath.
    pub tab_width: f64,
    pub side: SideOfMilling,
}

impl BridgeParams {
    pub fn new(capture_diameter: f64, tab_width: f64, side: SideOfMilling) -> Self {
        Self {
            capture_diameter,
            tab_width,
            side,
        }
    }

    pub fn validate(&self) -> DesignerResult<()> {
        if !(self.capture_diameter.is_finite() && self.capture_diameter > 0.0) {
            return Err(DesignerError::invalid(
                "capture_diameter",
                format!("must be positive and finite, got {}", self.capture_diameter),
            ));
        }
        if !(self.tab_width.is_finite() && self.tab_width > 0.0) {
            return Err(DesignerError::invalid(
                "tab_width",
                format!("must be positive and finite, got {}", self.tab_width),
            ));
        }
        Ok(())
    }

    pub fn capture_radius(&self) -> f64 {
        self.capture_diameter / 2.0
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BridgeState {
    Idle,
    Dragging,
    /// Terminal; the scene drops the marker on its next tick.
    Removed,
}

/// Result of releasing the pointer over a marker.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReleaseOutcome {
    /// Released on a valid spot without moving: a successor must be created.
    Confirmed,
    /// Released on a valid spot; nothing else happens.
    Kept,
    /// Released on an invalid spot: the marker must be removed.
    Removed,
    /// The marker was not being dragged.
    Ignored,
}

/// Passive pointer-follow subscription.
///
/// The bus handler runs on the publishing thread and only queues the pointer
/// position; the owner drains the queue on the dispatch thread. Dropping the
/// value unsubscribes.
#[derive(Debug)]
pub struct PointerFollow {
    bus: Arc<EventBus>,
    id: SubscriptionId,
    pending: ThreadSafeDeque<Point>,
}

impl PointerFollow {
    pub fn subscribe(bus: &Arc<EventBus>) -> Self {
        let pending = thread_safe_deque();
        let queue = Arc::clone(&pending);
        let id = bus.subscribe(
            EventFilter::Categories(vec![EventCategory::View]),
            move |event| {
                if let AppEvent::View(ViewEvent::PointerMoved { x, y }) = event {
                    queue.lock().push_back(Point::new(x, y));
                }
            },
        );
        Self {
            bus: Arc::clone(bus),
            id,
            pending,
        }
    }

    pub fn id(&self) -> SubscriptionId {
        self.id
    }

    /// Removes and returns every queued pointer position, oldest first.
    pub fn drain(&self) -> Vec<Point> {
        self.pending.lock().drain(..).collect()
    }
}

impl Drop for PointerFollow {
    fn drop(&mut self) {
        self.bus.unsubscribe(self.id);
    }
}

/// Draggable marker that snaps onto selected toolpath edges.
#[derive(Debug)]
pub struct BridgeMarker {
    params: BridgeParams,
    slot: ActiveBridgeSlot,
    position: Point,
    angle: f64,
    ok: bool,
    drag_start: Point,
    state: BridgeState,
    successor_spawned: bool,
    follow: Option<PointerFollow>,
}

impl BridgeMarker {
    /// Creates a marker at the origin.
    pub fn try_new(
        capture_diameter: f64,
        tab_width: f64,
        side: SideOfMilling,
        slot: ActiveBridgeSlot,
    ) -> DesignerResult<Self> {
        Self::from_params(BridgeParams::new(capture_diameter, tab_width, side), slot)
    }

    pub fn from_params(params: BridgeParams, slot: ActiveBridgeSlot) -> DesignerResult<Self> {
        params.validate()?;
        Ok(Self::with_valid_params(params, slot))
    }

    fn with_valid_params(params: BridgeParams, slot: ActiveBridgeSlot) -> Self {
        Self {
            params,
            slot,
            position: Point::default(),
            angle: 0.0,
            ok: false,
            drag_start: Point::default(),
            state: BridgeState::Idle,
            successor_spawned: false,
            follow: None,
        }
    }

    /// Next marker in the placement chain: same geometry, same slot, at the
    /// origin and not yet following the pointer.
    pub fn successor(&self) -> BridgeMarker {
        Self::with_valid_params(self.params, self.slot.clone())
    }

    /// Starts following pointer moves published on `bus`.
    pub fn follow_view(&mut self, bus: &Arc<EventBus>) {
        if self.state == BridgeState::Removed {
            return;
        }
        self.follow = Some(PointerFollow::subscribe(bus));
    }

    pub fn is_following(&self) -> bool {
        self.follow.is_some()
    }

    /// Pointer positions received since the last call.
    pub fn take_followed_points(&self) -> Vec<Point> {
        self.follow
            .as_ref()
            .map(PointerFollow::drain)
            .unwrap_or_default()
    }

    /// Snaps `proposed` onto the nearest eligible edge.
    ///
    /// Returns the position the marker should occupy and updates `ok` and
    /// `angle`. Does not move the marker; see [`Self::set_pos`].
    pub fn calculate(&mut self, proposed: Point, scene: &dyn SceneQuery) -> Point {
        let radius = self.params.capture_radius();
        let region =
            Bounds::around(proposed, radius).union(&Bounds::around(self.position, radius));
        let items = scene.colliding_items(&region);
        if items.is_empty() {
            return proposed;
        }

        let hit = snap::nearest_on_items(proposed, &items);
        if let Some(hit) = hit {
            self.angle = hit.angle;
        }
        match hit {
            Some(hit) if hit.distance < radius => {
                self.ok = true;
                tracing::debug!(
                    "Bridge snapped to ({:.4}, {:.4}) at {:.2}°, distance {:.4}",
                    hit.foot.x,
                    hit.foot.y,
                    hit.angle,
                    hit.distance
                );
                hit.foot
            }
            _ => {
                self.ok = false;
                proposed
            }
        }
    }

    /// Moves the marker to the snapped version of `proposed`.
    pub fn set_pos(&mut self, proposed: Point, scene: &dyn SceneQuery) -> Point {
        if !proposed.is_finite() {
            tracing::warn!("Ignoring non-finite bridge position {:?}", proposed);
            return self.position;
        }
        self.position = self.calculate(proposed, scene);
        self.position
    }

    /// Pointer pressed on the marker: starts a drag and stops following.
    pub fn press(&mut self) -> bool {
        if self.state == BridgeState::Removed {
            return false;
        }
        self.drag_start = self.position;
        self.state = BridgeState::Dragging;
        self.follow = None;
        true
    }

    /// Pointer moved while pressed.
    pub fn drag_to(&mut self, proposed: Point, scene: &dyn SceneQuery) -> Option<Point> {
        if self.state != BridgeState::Dragging {
            return None;
        }
        Some(self.set_pos(proposed, scene))
    }

    /// Pointer released; the caller performs the side effect the outcome
    /// names.
    pub fn release(&mut self) -> ReleaseOutcome {
        if self.state != BridgeState::Dragging {
            return ReleaseOutcome::Ignored;
        }
        if !self.ok {
            self.state = BridgeState::Removed;
            return ReleaseOutcome::Removed;
        }
        self.state = BridgeState::Idle;
        if self.position.fuzzy_eq(&self.drag_start) && !self.successor_spawned {
            self.successor_spawned = true;
            ReleaseOutcome::Confirmed
        } else {
            ReleaseOutcome::Kept
        }
    }

    /// Double click removes the marker. Returns false if it already was.
    pub fn double_click(&mut self) -> bool {
        if self.state == BridgeState::Removed {
            return false;
        }
        self.state = BridgeState::Removed;
        self.follow = None;
        true
    }

    /// Cut point on the requested side of the toolpath.
    pub fn get_point(&self, side: SideOfMilling) -> IntPoint {
        let half_tab = self.params.tab_width / 2.0;
        let p = match side {
            SideOfMilling::On => self.position,
            SideOfMilling::Outer => self.position + polar(half_tab, self.angle + 180.0),
            SideOfMilling::Inner => self.position + polar(half_tab, self.angle),
        };
        IntPoint::from(p)
    }

    /// Segment across the toolpath that the tab removes.
    pub fn get_path(&self) -> LineF {
        let reach = self.params.tab_width * CUT_OVERLAP;
        LineF::new(
            polar(reach, self.angle),
            polar(reach, self.angle + 180.0),
        )
        .translated(self.position)
    }

    /// Capture diameter.
    pub fn lenght(&self) -> f64 {
        self.params.capture_diameter
    }

    pub fn capture_diameter(&self) -> f64 {
        self.params.capture_diameter
    }

    pub fn tab_width(&self) -> f64 {
        self.params.tab_width
    }

    pub fn side(&self) -> SideOfMilling {
        self.params.side
    }

    pub fn params(&self) -> &BridgeParams {
        &self.params
    }

    pub fn slot(&self) -> &ActiveBridgeSlot {
        &self.slot
    }

    pub fn ok(&self) -> bool {
        self.ok
    }

    pub fn angle(&self) -> f64 {
        self.angle
    }

    pub fn pos(&self) -> Point {
        self.position
    }

    pub fn state(&self) -> BridgeState {
        self.state
    }

    pub fn is_removed(&self) -> bool {
        self.state == BridgeState::Removed
    }

    pub fn successor_spawned(&self) -> bool {
        self.successor_spawned
    }

    pub fn glyph(&self, style: &RenderStyle) -> BridgeGlyph {
        build_glyph(
            self.params.capture_diameter,
            self.params.tab_width,
            self.params.side,
            self.ok,
            self.angle,
            style,
        )
    }

    /// Hit shape: the body circle in local coordinates.
    pub fn shape(&self) -> LyonPath {
        body_path(self.params.capture_diameter)
    }

    /// Body and ears in scene coordinates.
    pub fn outline(&self, style: &RenderStyle) -> LyonPath {
        outline_path(&self.glyph(style), self.position)
    }
}

impl GraphicsItem for BridgeMarker {
    fn item_type(&self) -> ItemType {
        ItemType::Bridge
    }

    fn bounds(&self) -> Bounds {
        Bounds::around(self.position, self.params.capture_radius())
    }

    fn is_selected(&self) -> bool {
        self.state == BridgeState::Dragging
    }

    /// Markers carry no toolpath geometry.
    fn paths(&self) -> &[Path] {
        &[]
    }

    fn z_value(&self) -> f64 {
        f64::MAX
    }

    fn is_visible(&self) -> bool {
        self.state != BridgeState::Removed
    }
}
