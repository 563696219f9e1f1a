//! Shared "currently active bridge" cell.

use bridgecam_core::{shared, SharedOption};

use crate::items::ItemId;

/// Handle to the cell naming the marker that is currently being placed.
///
/// The editor owns the cell; every marker in a placement chain holds a clone
/// of the handle and writes its successor's id into it on confirmation.
#[derive(Debug, Clone)]
pub struct ActiveBridgeSlot(SharedOption<ItemId>);

impl ActiveBridgeSlot {
    pub fn new() -> Self {
        Self(shared(None))
    }

    pub fn get(&self) -> Option<ItemId> {
        *self.0.borrow()
    }

    pub fn set(&self, id: ItemId) {
        *self.0.borrow_mut() = Some(id);
    }

    /// Empties the cell if it still names `id`.
    pub fn clear_if(&self, id: ItemId) -> bool {
        let mut cell = self.0.borrow_mut();
        if *cell == Some(id) {
            *cell = None;
            true
        } else {
            false
        }
    }

    pub fn take(&self) -> Option<ItemId> {
        self.0.borrow_mut().take()
    }

    /// True if both handles refer to the same cell.
    pub fn same_slot(&self, other: &ActiveBridgeSlot) -> bool {
        std::rc::Rc::ptr_eq(&self.0, &other.0)
    }
}

impl Default for ActiveBridgeSlot {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clones_share_the_cell() {
        let slot = ActiveBridgeSlot::new();
        let other = slot.clone();
        other.set(ItemId(4));
        assert_eq!(slot.get(), Some(ItemId(4)));
        assert!(slot.same_slot(&other));
        assert!(!slot.same_slot(&ActiveBridgeSlot::new()));
    }

    #[test]
    fn test_clear_if() {
        let slot = ActiveBridgeSlot::new();
        slot.set(ItemId(2));
        assert!(!slot.clear_if(ItemId(3)));
        assert_eq!(slot.get(), Some(ItemId(2)));
        assert!(slot.clear_if(ItemId(2)));
        assert_eq!(slot.get(), None);
        assert_eq!(slot.take(), None);
    }
}
