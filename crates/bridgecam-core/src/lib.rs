//! # BridgeCAM Core
//!
//! Core types and utilities shared by the BridgeCAM crates.
//! Provides the error type, the application event bus, colors, the milling
//! side enums, and the shared-state type aliases used by the designer.

pub mod color;
pub mod error;
pub mod event_bus;
pub mod milling;
pub mod types;

pub use color::Color;
pub use error::{Error, Result};

// Re-export event bus for convenience
pub use event_bus::{
    drain_receiver, AppEvent, BridgeEvent, EventBus, EventBusConfig, EventBusError,
    EventCategory, EventFilter, SceneEvent, SubscriptionId, ViewEvent,
};

pub use milling::{BoardSide, SideOfMilling};

// Re-export type aliases for convenience
pub use types::{
    shared, thread_safe_deque, Shared, SharedOption, ThreadSafeDeque,
};
