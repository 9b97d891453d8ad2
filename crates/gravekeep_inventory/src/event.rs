//! Inventory events

use crate::favorites::FavoriteAssignment;

/// Changes reported to presentation collaborators.
///
/// Every mutation is followed by a `Refreshed`, which slot renderers treat
/// as "redraw everything".
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InventoryEvent {
    /// Slot contents changed; redraw the grid
    Refreshed,
    /// Units landed in a slot
    ItemAdded {
        slot: usize,
        item_id: String,
        quantity: u32,
    },
    /// Inventory full (couldn't add item)
    Full { item_id: String, overflow: u32 },
    /// Items swapped between slots
    Swapped { slot_a: usize, slot_b: usize },
    /// Units moved onto a matching stack
    Merged {
        source: usize,
        target: usize,
        amount: u32,
    },
    /// One unit split off into a new slot
    Split { source: usize, target: usize },
    /// Slot emptied into the world
    Dropped {
        slot: usize,
        item_id: String,
        quantity: u32,
    },
    /// Slot emptied without a world drop
    Removed { slot: usize, item_id: String },
    /// Slot non-consumable "use" with no further effect
    Used { slot: usize, item_id: String },
    Equipped { slot: usize },
    Unequipped { slot: usize },
    FavoriteChanged {
        slot: usize,
        assignment: FavoriteAssignment,
    },
}
