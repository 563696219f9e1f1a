//! Integration tests for the drag / confirm / remove lifecycle of bridge
//! markers inside a scene.

use std::sync::Arc;

use bridgecam_core::{drain_receiver, AppEvent, BridgeEvent, EventBus, SideOfMilling};
use bridgecam_designer::{
    path_from_points, ActiveBridgeSlot, BridgeParams, BridgeState, GeometryItem, ItemId,
    ItemType, Point, ReleaseOutcome, Scene,
};

const EPS: f64 = 1e-6;

fn scene_with_square() -> (Scene, ItemId) {
    let mut scene = Scene::new(Arc::new(EventBus::new()));
    let path = path_from_points(&[
        Point::new(0.0, 0.0),
        Point::new(10.0, 0.0),
        Point::new(10.0, 10.0),
        Point::new(0.0, 10.0),
    ]);
    let id = scene.add_item(GeometryItem::new(ItemType::Toolpath, vec![path]).with_selected(true));
    (scene, id)
}

fn params() -> BridgeParams {
    BridgeParams::new(2.0, 1.0, SideOfMilling::Outer)
}

/// Drags the marker onto the bottom edge and releases it there.
fn settle(scene: &mut Scene, id: ItemId) {
    scene.mouse_press(id).unwrap();
    scene.mouse_move(id, Point::new(5.0, 0.5)).unwrap();
    assert_eq!(scene.mouse_release(id).unwrap(), ReleaseOutcome::Kept);
}

#[test]
fn test_spawn_sets_slot_and_follows() {
    let (mut scene, _) = scene_with_square();
    let slot = ActiveBridgeSlot::new();
    let id = scene.spawn_bridge(params(), &slot).unwrap();

    assert_eq!(slot.get(), Some(id));
    let marker = scene.bridge(id).unwrap();
    assert!(marker.is_following());
    assert_eq!(scene.bus().subscriber_count(), 1);
}

#[test]
fn test_spawn_rejects_invalid_params() {
    let (mut scene, _) = scene_with_square();
    let slot = ActiveBridgeSlot::new();
    let result = scene.spawn_bridge(BridgeParams::new(-1.0, 1.0, SideOfMilling::On), &slot);
    assert!(result.is_err());
    assert_eq!(slot.get(), None);
    assert_eq!(scene.len(), 1);
}

#[test]
fn test_passive_follow_until_press() {
    let (mut scene, _) = scene_with_square();
    let slot = ActiveBridgeSlot::new();
    let id = scene.spawn_bridge(params(), &slot).unwrap();

    scene
        .bus()
        .publish(AppEvent::pointer_moved(5.0, 0.4))
        .unwrap();
    // Nothing moves until the scene ticks.
    assert_eq!(scene.bridge(id).unwrap().pos(), Point::default());
    scene.process_events();
    let pos = scene.bridge(id).unwrap().pos();
    assert!(pos.distance_to(&Point::new(5.0, 0.0)) < EPS);

    scene.mouse_press(id).unwrap();
    assert_eq!(scene.bus().subscriber_count(), 0);
    let _ = scene.bus().publish(AppEvent::pointer_moved(7.0, 0.4));
    scene.process_events();
    let after = scene.bridge(id).unwrap().pos();
    assert!(after.distance_to(&pos) < EPS);
}

#[test]
fn test_press_applies_queued_pointer_moves() {
    let (mut scene, _) = scene_with_square();
    let slot = ActiveBridgeSlot::new();
    let id = scene.spawn_bridge(params(), &slot).unwrap();

    scene
        .bus()
        .publish(AppEvent::pointer_moved(5.0, 0.4))
        .unwrap();
    scene.process_events();
    scene
        .bus()
        .publish(AppEvent::pointer_moved(7.0, 0.4))
        .unwrap();

    // No tick between the last move and the press.
    scene.mouse_press(id).unwrap();
    let pressed_at = scene.bridge(id).unwrap().pos();
    assert!(pressed_at.distance_to(&Point::new(7.0, 0.0)) < EPS);

    assert_eq!(scene.mouse_release(id).unwrap(), ReleaseOutcome::Confirmed);
    let cuts = scene.bridge_cuts(SideOfMilling::On);
    assert_eq!(cuts.len(), 1);
    assert!(cuts[0].point.to_point().distance_to(&Point::new(7.0, 0.0)) < 1e-4);
}

#[test]
fn test_confirm_creates_exactly_one_successor() {
    let (mut scene, _) = scene_with_square();
    let slot = ActiveBridgeSlot::new();
    let id = scene.spawn_bridge(params(), &slot).unwrap();
    settle(&mut scene, id);
    assert_eq!(scene.len(), 2);

    // Press and release in place confirms the placement.
    scene.mouse_press(id).unwrap();
    assert_eq!(scene.mouse_release(id).unwrap(), ReleaseOutcome::Confirmed);
    assert_eq!(scene.len(), 3);

    let successor = slot.get().unwrap();
    assert_ne!(successor, id);
    let next = scene.bridge(successor).unwrap();
    assert!(next.is_following());
    assert_eq!(next.params(), &params());
    assert!(next.slot().same_slot(&slot));

    // A second confirmation on the same marker creates nothing.
    scene.mouse_press(id).unwrap();
    assert_eq!(scene.mouse_release(id).unwrap(), ReleaseOutcome::Kept);
    assert_eq!(scene.len(), 3);
    assert_eq!(slot.get(), Some(successor));
}

#[test]
fn test_invalid_release_removes_on_next_tick() {
    let (mut scene, _) = scene_with_square();
    let slot = ActiveBridgeSlot::new();
    let id = scene.spawn_bridge(params(), &slot).unwrap();

    scene.mouse_press(id).unwrap();
    scene.mouse_move(id, Point::new(5.0, 30.0)).unwrap();
    assert_eq!(scene.mouse_release(id).unwrap(), ReleaseOutcome::Removed);

    // Deferred: still present until the scene ticks.
    assert!(scene.contains(id));
    assert_eq!(scene.bridge(id).unwrap().state(), BridgeState::Removed);
    assert_eq!(scene.pending_removals(), &[id]);
    assert_eq!(scene.len(), 2);

    scene.process_events();
    assert!(!scene.contains(id));
    assert_eq!(scene.len(), 1);
    assert_eq!(slot.get(), None);
}

#[test]
fn test_double_click_removes() {
    let (mut scene, _) = scene_with_square();
    let slot = ActiveBridgeSlot::new();
    let id = scene.spawn_bridge(params(), &slot).unwrap();
    settle(&mut scene, id);

    assert!(scene.double_click(id).unwrap());
    assert!(!scene.double_click(id).unwrap());
    assert!(scene.contains(id));
    scene.process_events();
    assert!(!scene.contains(id));
}

#[test]
fn test_unknown_ids_are_errors() {
    let (mut scene, square) = scene_with_square();
    assert!(scene.mouse_press(ItemId(999)).is_err());
    assert!(scene.mouse_release(ItemId(999)).is_err());
    // Geometry items are not bridges.
    assert!(scene.mouse_press(square).is_err());
    assert!(scene.contains(square));
    assert!(scene.set_selected(ItemId(999), true).is_err());
}

#[test]
fn test_bridge_cuts_skip_unsettled_markers() {
    let (mut scene, _) = scene_with_square();
    let slot = ActiveBridgeSlot::new();
    let id = scene.spawn_bridge(params(), &slot).unwrap();
    assert!(scene.bridge_cuts(SideOfMilling::Outer).is_empty());

    settle(&mut scene, id);
    scene.mouse_press(id).unwrap();
    scene.mouse_release(id).unwrap();

    // The successor follows the pointer and is not a cut yet.
    let cuts = scene.bridge_cuts(SideOfMilling::Outer);
    assert_eq!(cuts.len(), 1);
    assert_eq!(cuts[0].id, id);
    let point = cuts[0].point.to_point();
    assert!(point.distance_to(&Point::new(5.0, -0.5)) < 1e-4);
    assert!((cuts[0].path.length() - 1.02).abs() < EPS);
}

#[test]
fn test_lifecycle_events_are_published() {
    let (mut scene, _) = scene_with_square();
    let mut rx = scene.bus().receiver();
    let slot = ActiveBridgeSlot::new();
    let id = scene.spawn_bridge(params(), &slot).unwrap();
    settle(&mut scene, id);
    scene.mouse_press(id).unwrap();
    scene.mouse_release(id).unwrap();

    let events = drain_receiver(&mut rx);
    assert!(events
        .iter()
        .any(|e| matches!(e, AppEvent::Bridge(BridgeEvent::Snapped { id: snapped, .. }) if *snapped == id.0)));
    assert!(events
        .iter()
        .any(|e| matches!(e, AppEvent::Bridge(BridgeEvent::Confirmed { id: confirmed, .. }) if *confirmed == id.0)));
}
