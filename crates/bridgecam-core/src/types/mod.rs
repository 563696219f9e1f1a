//! Type system utilities and aliases.
//!
//! - [`aliases`]: Type aliases for `Rc<RefCell<T>>` and `Arc<Mutex<VecDeque<T>>>`.

pub mod aliases;

pub use aliases::*;
