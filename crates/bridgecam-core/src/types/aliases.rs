//! Type aliases for commonly used complex types.
//!
//! This module provides type aliases to improve code readability by giving
//! meaningful names to complex nested types used throughout the workspace.
//!
//! ## Usage
//!
//! ```rust
//! use bridgecam_core::types::*;
//!
//! // Instead of: Rc<RefCell<Option<u64>>>
//! let slot: SharedOption<u64> = shared(None);
//! *slot.borrow_mut() = Some(7);
//!
//! // Instead of: Arc<Mutex<VecDeque<f64>>>
//! let queue: ThreadSafeDeque<f64> = thread_safe_deque();
//! queue.lock().push_back(1.0);
//! ```

use parking_lot::Mutex;
use std::cell::RefCell;
use std::collections::VecDeque;
use std::rc::Rc;
use std::sync::Arc;

// =============================================================================
// SINGLE-THREADED SHARED TYPES (Rc<RefCell<T>>)
// =============================================================================

/// A reference-counted, interior-mutable wrapper for single-threaded sharing.
///
/// Use when several owners on the event-dispatch thread need to observe and
/// update the same value, e.g. the "active bridge" slot shared by a chain of
/// markers and the editor that started it.
pub type Shared<T> = Rc<RefCell<T>>;

/// An optional shared reference, for lazily-filled shared state.
pub type SharedOption<T> = Rc<RefCell<Option<T>>>;

// =============================================================================
// THREAD-SAFE SHARED TYPES (Arc<Mutex<T>>)
// =============================================================================

/// A thread-safe deque for cross-thread queue/buffer management.
///
/// Event bus handlers must be `Send + Sync`, so anything they hand over to
/// the dispatch thread goes through one of these.
pub type ThreadSafeDeque<T> = Arc<Mutex<VecDeque<T>>>;

// =============================================================================
// CONSTRUCTORS
// =============================================================================

/// Wrap a value in `Rc<RefCell<_>>`.
pub fn shared<T>(value: T) -> Shared<T> {
    Rc::new(RefCell::new(value))
}

/// Create an empty thread-safe deque.
pub fn thread_safe_deque<T>() -> ThreadSafeDeque<T> {
    Arc::new(Mutex::new(VecDeque::new()))
}
