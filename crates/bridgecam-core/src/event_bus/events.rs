//! Event type definitions for the event bus.
//!
//! This module defines all application events organized by category.
//! Events are designed to be cloneable and serializable for logging/replay.

use serde::{Deserialize, Serialize};

/// Root event enum for all application events
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum AppEvent {
    /// Pointer input broadcast by the host view
    View(ViewEvent),
    /// Scene item collection changes
    Scene(SceneEvent),
    /// Bridge marker lifecycle
    Bridge(BridgeEvent),
}

impl AppEvent {
    /// Get the category of this event
    pub fn category(&self) -> EventCategory {
        match self {
            AppEvent::View(_) => EventCategory::View,
            AppEvent::Scene(_) => EventCategory::Scene,
            AppEvent::Bridge(_) => EventCategory::Bridge,
        }
    }

    /// Get a short description of this event for logging
    pub fn description(&self) -> String {
        match self {
            AppEvent::View(e) => e.description(),
            AppEvent::Scene(e) => e.description(),
            AppEvent::Bridge(e) => e.description(),
        }
    }

    /// Shorthand for a pointer-move broadcast
    pub fn pointer_moved(x: f64, y: f64) -> Self {
        AppEvent::View(ViewEvent::PointerMoved { x, y })
    }
}

/// Event category for filtering
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EventCategory {
    /// Host view input events.
    View,
    /// Scene item collection events.
    Scene,
    /// Bridge marker lifecycle events.
    Bridge,
}

impl std::fmt::Display for EventCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EventCategory::View => write!(f, "View"),
            EventCategory::Scene => write!(f, "Scene"),
            EventCategory::Bridge => write!(f, "Bridge"),
        }
    }
}

/// Events broadcast by the host view
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum ViewEvent {
    /// Pointer moved over the view, in scene coordinates.
    PointerMoved {
        /// Scene X coordinate.
        x: f64,
        /// Scene Y coordinate.
        y: f64,
    },
    /// View zoom changed.
    ScaleChanged {
        /// Scene units per screen pixel.
        scale: f64,
    },
}

impl ViewEvent {
    fn description(&self) -> String {
        match self {
            ViewEvent::PointerMoved { x, y } => format!("Pointer at X{:.3} Y{:.3}", x, y),
            ViewEvent::ScaleChanged { scale } => format!("View scale {}", scale),
        }
    }
}

/// Scene item collection events
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SceneEvent {
    /// Item added to the scene.
    ItemAdded {
        /// Scene item id.
        id: u64,
    },
    /// Item removed from the scene.
    ItemRemoved {
        /// Scene item id.
        id: u64,
    },
}

impl SceneEvent {
    fn description(&self) -> String {
        match self {
            SceneEvent::ItemAdded { id } => format!("Item {} added", id),
            SceneEvent::ItemRemoved { id } => format!("Item {} removed", id),
        }
    }
}

/// Bridge marker lifecycle events
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum BridgeEvent {
    /// Marker settled onto a toolpath edge.
    Snapped {
        /// Marker id.
        id: u64,
        /// Snapped X coordinate.
        x: f64,
        /// Snapped Y coordinate.
        y: f64,
        /// Marker rotation in degrees.
        angle: f64,
    },
    /// Placement confirmed and a successor marker created.
    Confirmed {
        /// Confirmed marker id.
        id: u64,
        /// Newly created successor id.
        successor: u64,
    },
    /// Marker scheduled for removal.
    Removed {
        /// Marker id.
        id: u64,
    },
}

impl BridgeEvent {
    fn description(&self) -> String {
        match self {
            BridgeEvent::Snapped { id, x, y, angle } => {
                format!("Bridge {} snapped at X{:.3} Y{:.3} ({:.1}°)", id, x, y, angle)
            }
            BridgeEvent::Confirmed { id, successor } => {
                format!("Bridge {} confirmed, next is {}", id, successor)
            }
            BridgeEvent::Removed { id } => format!("Bridge {} removed", id),
        }
    }
}
