//! Gravekeep Inventory - slots, stacks, favorites and the held item
//!
//! This crate holds the inventory model shared by every input path.
//!
//! # Features
//!
//! - Fixed-size slot grid with stack limits
//! - Add with top-up then first-empty placement, partial commits on overflow
//! - Swap, merge, split, drop and remove
//! - Four tool quick-slots that follow slot indices
//! - A single held item with its visual requested through a scene seam
//! - Drop placement and world pickup targeting
//!
//! # Example
//!
//! ```ignore
//! use gravekeep_inventory::prelude::*;
//!
//! let moss = ItemDefinition::new("moss", "Moss").stackable(10).into_ref();
//!
//! let mut inventory = Inventory::new(10, 3);
//! inventory.add_item(&moss, 13);
//! assert_eq!(inventory.store().count_item("moss"), 13);
//! ```

pub mod equipment;
pub mod event;
pub mod favorites;
pub mod inventory;
pub mod item;
pub mod scene;
pub mod slot;
pub mod stacking;
pub mod store;
pub mod world;

pub mod prelude {
    pub use crate::equipment::{EquipmentController, EquippedState};
    pub use crate::event::InventoryEvent;
    pub use crate::favorites::{FavoriteAssignment, FavoritesBinder, FAVORITE_COUNT};
    pub use crate::inventory::Inventory;
    pub use crate::item::{same_item, EquipHand, ItemCategory, ItemDefinition, ItemRef};
    pub use crate::scene::{
        HeldVisualRequest, HeldVisualSpawner, RecordingScene, Scene, SpawnError, VisualId,
        WorldDrop, WorldDropSink,
    };
    pub use crate::slot::Slot;
    pub use crate::stacking::{AddPlan, Placement, ReorderAction};
    pub use crate::store::SlotStore;
    pub use crate::world::{
        DropPlacement, PickupTargeting, SpawnPose, TargetChange, WorldItem, WorldItemId,
    };
}

pub use prelude::*;
