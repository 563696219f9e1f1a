//! # Event Bus Module
//!
//! Provides a unified event bus for decoupled communication between the
//! host view, the scene, and the bridge markers living in it.
//!
//! ## Overview
//!
//! - Publishers emit typed events without knowing subscribers
//! - Subscribers filter and receive events of interest
//! - Synchronous handlers run on the publishing thread; polling receivers
//!   are available through a broadcast channel
//!
//! ## Usage
//!
//! ```rust
//! use bridgecam_core::event_bus::{AppEvent, EventBus, EventCategory, EventFilter};
//!
//! let bus = EventBus::new();
//!
//! // Subscribe to view events
//! let subscription = bus.subscribe(
//!     EventFilter::Categories(vec![EventCategory::View]),
//!     |event| {
//!         if let AppEvent::View(view) = event {
//!             println!("View event: {:?}", view);
//!         }
//!     },
//! );
//!
//! // Publish an event
//! bus.publish(AppEvent::pointer_moved(5.0, 0.5)).ok();
//!
//! // Unsubscribe when done
//! bus.unsubscribe(subscription);
//! ```

mod bus;
mod events;

pub use bus::*;
pub use events::*;
