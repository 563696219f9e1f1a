//! Scene holding toolpath geometry and bridge markers.
//!
//! The scene dispatches pointer input to markers, performs the side effects
//! their lifecycle asks for (successor creation, removal) and reports changes
//! on the [`EventBus`]. Removals are deferred: an item scheduled for removal
//! stays in the scene until the next [`Scene::process_events`] call.

use std::sync::Arc;

use bridgecam_core::{AppEvent, BridgeEvent, EventBus, EventBusError, SceneEvent, SideOfMilling};
use serde::{Deserialize, Serialize};

use crate::bridge::{ActiveBridgeSlot, BridgeMarker, BridgeParams, ReleaseOutcome};
use crate::error::{DesignerError, DesignerResult};
use crate::geometry::{Bounds, IntPoint, LineF, Point};
use crate::items::{GeometryItem, GraphicsItem, ItemId, ItemStore, SceneItem};

/// Cut derived from one settled marker.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BridgeCut {
    pub id: ItemId,
    pub point: IntPoint,
    pub path: LineF,
}

pub struct Scene {
    items: ItemStore,
    bus: Arc<EventBus>,
    pending_removal: Vec<ItemId>,
    grabbed: Option<ItemId>,
}

impl Scene {
    pub fn new(bus: Arc<EventBus>) -> Self {
        Self {
            items: ItemStore::new(),
            bus,
            pending_removal: Vec::new(),
            grabbed: None,
        }
    }

    pub fn bus(&self) -> &Arc<EventBus> {
        &self.bus
    }

    pub fn items(&self) -> &ItemStore {
        &self.items
    }

    pub fn item(&self, id: ItemId) -> Option<&SceneItem> {
        self.items.get(id)
    }

    pub fn contains(&self, id: ItemId) -> bool {
        self.items.contains(id)
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn bridge(&self, id: ItemId) -> Option<&BridgeMarker> {
        self.items.get(id).and_then(SceneItem::as_bridge)
    }

    pub fn bridges(&self) -> impl Iterator<Item = (ItemId, &BridgeMarker)> {
        self.items
            .iter()
            .filter_map(|(id, item)| item.as_bridge().map(|marker| (id, marker)))
    }

    /// Marker currently held by the pointer, if any.
    pub fn grabbed(&self) -> Option<ItemId> {
        self.grabbed
    }

    /// Union of all item bounds.
    pub fn bounds(&self) -> Bounds {
        self.items
            .iter()
            .map(|(_, item)| item.bounds())
            .fold(Bounds::empty(), |acc, b| acc.union(&b))
    }

    pub fn pending_removals(&self) -> &[ItemId] {
        &self.pending_removal
    }

    pub fn add_item(&mut self, item: GeometryItem) -> ItemId {
        let id = self.items.insert(item.into());
        self.emit(AppEvent::Scene(SceneEvent::ItemAdded { id: id.0 }));
        id
    }

    /// Adds a marker; idle markers start following the pointer.
    pub fn add_bridge(&mut self, mut marker: BridgeMarker) -> ItemId {
        if !marker.is_following() && !marker.is_removed() {
            marker.follow_view(&self.bus);
        }
        let id = self.items.insert(marker.into());
        self.emit(AppEvent::Scene(SceneEvent::ItemAdded { id: id.0 }));
        id
    }

    /// Creates the first marker of a placement chain and makes it the
    /// active one in `slot`.
    pub fn spawn_bridge(
        &mut self,
        params: BridgeParams,
        slot: &ActiveBridgeSlot,
    ) -> DesignerResult<ItemId> {
        let marker = BridgeMarker::from_params(params, slot.clone())?;
        let id = self.add_bridge(marker);
        slot.set(id);
        tracing::info!(
            "Bridge {} spawned (diameter {}, tab {}, side {})",
            id,
            params.capture_diameter,
            params.tab_width,
            params.side
        );
        Ok(id)
    }

    pub fn set_selected(&mut self, id: ItemId, selected: bool) -> DesignerResult<()> {
        let item = self
            .items
            .get_mut(id)
            .and_then(SceneItem::as_geometry_mut)
            .ok_or(DesignerError::UnknownItem(id))?;
        item.selected = selected;
        Ok(())
    }

    /// Moves a marker directly, snapping against the rest of the scene.
    pub fn set_bridge_pos(&mut self, id: ItemId, pos: Point) -> DesignerResult<Point> {
        let snapped = self.with_bridge(id, |marker, others| marker.set_pos(pos, others))?;
        self.report_snap(id);
        Ok(snapped)
    }

    /// Grabs a marker. Pointer moves still queued for it are applied first,
    /// so the drag starts where the pointer actually is.
    pub fn mouse_press(&mut self, id: ItemId) -> DesignerResult<bool> {
        let (caught_up, pressed) = self.with_bridge(id, |marker, others| {
            let points = marker.take_followed_points();
            for point in &points {
                marker.set_pos(*point, others);
            }
            (!points.is_empty(), marker.press())
        })?;
        if caught_up {
            self.report_snap(id);
        }
        if pressed {
            self.grabbed = Some(id);
        }
        Ok(pressed)
    }

    /// Drags the pressed marker towards `pos`. Returns `None` when the
    /// marker is not being dragged.
    pub fn mouse_move(&mut self, id: ItemId, pos: Point) -> DesignerResult<Option<Point>> {
        let moved = self.with_bridge(id, |marker, others| marker.drag_to(pos, others))?;
        if moved.is_some() {
            self.report_snap(id);
        }
        Ok(moved)
    }

    pub fn mouse_release(&mut self, id: ItemId) -> DesignerResult<ReleaseOutcome> {
        let outcome = self.with_bridge(id, |marker, _| marker.release())?;
        if self.grabbed == Some(id) {
            self.grabbed = None;
        }

        match outcome {
            ReleaseOutcome::Confirmed => {
                let (successor, slot) = match self.bridge(id) {
                    Some(marker) => (marker.successor(), marker.slot().clone()),
                    None => return Err(DesignerError::UnknownItem(id)),
                };
                let next = self.add_bridge(successor);
                slot.set(next);
                tracing::info!("Bridge {} confirmed, successor {}", id, next);
                self.emit(AppEvent::Bridge(BridgeEvent::Confirmed {
                    id: id.0,
                    successor: next.0,
                }));
            }
            ReleaseOutcome::Removed => {
                tracing::info!("Bridge {} dropped off any toolpath", id);
                self.schedule_removal(id);
            }
            ReleaseOutcome::Kept | ReleaseOutcome::Ignored => {}
        }
        Ok(outcome)
    }

    pub fn double_click(&mut self, id: ItemId) -> DesignerResult<bool> {
        let removed = self.with_bridge(id, |marker, _| marker.double_click())?;
        if removed {
            if self.grabbed == Some(id) {
                self.grabbed = None;
            }
            tracing::info!("Bridge {} removed by double click", id);
            self.schedule_removal(id);
        }
        Ok(removed)
    }

    /// Runs one tick: applies pointer moves queued for following markers,
    /// then drops items scheduled for removal.
    pub fn process_events(&mut self) {
        let following: Vec<ItemId> = self
            .bridges()
            .filter(|(_, marker)| marker.is_following())
            .map(|(id, _)| id)
            .collect();

        for id in following {
            let applied = self.with_bridge(id, |marker, others| {
                let points = marker.take_followed_points();
                for point in &points {
                    marker.set_pos(*point, others);
                }
                !points.is_empty()
            });
            if let Ok(true) = applied {
                self.report_snap(id);
            }
        }

        for id in std::mem::take(&mut self.pending_removal) {
            let Some(item) = self.items.take(id) else {
                continue;
            };
            if let Some(marker) = item.as_bridge() {
                marker.slot().clear_if(id);
            }
            drop(item);
            tracing::debug!("Item {} removed from scene", id);
            self.emit(AppEvent::Scene(SceneEvent::ItemRemoved { id: id.0 }));
        }
    }

    /// Cuts for every marker settled on a toolpath. Markers still following
    /// the pointer or already removed are skipped.
    pub fn bridge_cuts(&self, side: SideOfMilling) -> Vec<BridgeCut> {
        self.bridges()
            .filter(|(_, marker)| marker.ok() && !marker.is_following() && !marker.is_removed())
            .map(|(id, marker)| BridgeCut {
                id,
                point: marker.get_point(side),
                path: marker.get_path(),
            })
            .collect()
    }

    fn schedule_removal(&mut self, id: ItemId) {
        if !self.pending_removal.contains(&id) {
            self.pending_removal.push(id);
        }
        self.emit(AppEvent::Bridge(BridgeEvent::Removed { id: id.0 }));
    }

    /// Runs `f` on a marker with the marker lifted out of the scene, so it
    /// can query everything else.
    fn with_bridge<R>(
        &mut self,
        id: ItemId,
        f: impl FnOnce(&mut BridgeMarker, &ItemStore) -> R,
    ) -> DesignerResult<R> {
        let Some(mut item) = self.items.take(id) else {
            tracing::warn!("Input for unknown item {}", id);
            return Err(DesignerError::UnknownItem(id));
        };
        let result = match item.as_bridge_mut() {
            Some(marker) => Ok(f(marker, &self.items)),
            None => {
                tracing::warn!("Item {} is not a bridge", id);
                Err(DesignerError::UnknownItem(id))
            }
        };
        self.items.restore(id, item);
        result
    }

    fn report_snap(&self, id: ItemId) {
        if let Some(marker) = self.bridge(id) {
            if marker.ok() {
                let pos = marker.pos();
                self.emit(AppEvent::Bridge(BridgeEvent::Snapped {
                    id: id.0,
                    x: pos.x,
                    y: pos.y,
                    angle: marker.angle(),
                }));
            }
        }
    }

    fn emit(&self, event: AppEvent) {
        match self.bus.publish(event) {
            Ok(_) | Err(EventBusError::NoSubscribers) => {}
            Err(e) => tracing::debug!("Scene event not delivered: {}", e),
        }
    }
}

impl Default for Scene {
    fn default() -> Self {
        Self::new(Arc::new(EventBus::new()))
    }
}

impl std::fmt::Debug for Scene {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Scene")
            .field("items", &self.items.len())
            .field("pending_removal", &self.pending_removal)
            .field("grabbed", &self.grabbed)
            .finish()
    }
}
