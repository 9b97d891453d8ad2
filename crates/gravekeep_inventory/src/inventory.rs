//! Inventory: the mutation surface shared by every input path
//!
//! Drag-and-drop, the gamepad hold-drag, the context menu and the hotbar all
//! end up calling the operations here. Each one runs to completion, keeps
//! favorites and the equipped slot in step with the slots, and queues a
//! `Refreshed` event for the renderers.

use crate::equipment::{EquipmentController, EquippedState};
use crate::event::InventoryEvent;
use crate::favorites::{FavoriteAssignment, FavoritesBinder, FAVORITE_COUNT};
use crate::item::ItemRef;
use crate::scene::{HeldVisualSpawner, Scene, WorldDrop};
use crate::stacking::{self, ReorderAction};
use crate::store::SlotStore;
use crate::world::{SpawnPose, WorldItem};

/// Slot grid plus the favorites and equipment that reference it
#[derive(Debug, Clone)]
pub struct Inventory {
    store: SlotStore,
    favorites: FavoritesBinder,
    equipment: EquipmentController,
    events: Vec<InventoryEvent>,
}

impl Inventory {
    /// Create an inventory with a `columns × rows` grid
    pub fn new(columns: usize, rows: usize) -> Self {
        Self {
            store: SlotStore::new(columns, rows),
            favorites: FavoritesBinder::new(),
            equipment: EquipmentController::new(),
            events: Vec::new(),
        }
    }

    pub fn store(&self) -> &SlotStore {
        &self.store
    }

    pub fn favorites(&self) -> &FavoritesBinder {
        &self.favorites
    }

    pub fn equipped(&self) -> Option<EquippedState> {
        self.equipment.state()
    }

    pub fn equipped_slot(&self) -> Option<usize> {
        self.equipment.equipped_slot()
    }

    /// Definition of the held item, for "requires tool X" checks
    pub fn equipped_item_definition(&self) -> Option<&ItemRef> {
        self.equipment.equipped_item(&self.store)
    }

    pub fn favorite_index_of(&self, slot: usize) -> Option<usize> {
        self.favorites.favorite_index_of(slot)
    }

    /// Add units of an item.
    ///
    /// Returns `false` when some units found no room. Units that did fit
    /// stay in the inventory either way.
    pub fn add_item(&mut self, item: &ItemRef, amount: u32) -> bool {
        if amount == 0 {
            return true;
        }
        let plan = self.store.add_item(item, amount);
        for placement in &plan.placements {
            self.events.push(InventoryEvent::ItemAdded {
                slot: placement.slot,
                item_id: item.id.clone(),
                quantity: placement.amount,
            });
        }
        if !plan.is_complete() {
            log::warn!(
                "Inventory full: {} of {} x '{}' did not fit",
                plan.leftover,
                amount,
                item.id
            );
            self.events.push(InventoryEvent::Full {
                item_id: item.id.clone(),
                overflow: plan.leftover,
            });
        }
        self.refreshed();
        plan.is_complete()
    }

    /// Pick up a world item; the caller removes it from the world on `true`
    pub fn pickup(&mut self, world_item: &WorldItem) -> bool {
        self.add_item(&world_item.item, world_item.quantity)
    }

    /// Exchange two slots. Favorites and the equipped slot move with them.
    pub fn swap(&mut self, a: usize, b: usize) -> bool {
        if !self.store.swap(a, b) {
            return false;
        }
        self.favorites.on_swap(a, b);
        self.equipment.on_swap(a, b);
        self.events.push(InventoryEvent::Swapped { slot_a: a, slot_b: b });
        self.refreshed();
        true
    }

    /// Move units from `source` onto a matching stack at `target`
    pub fn merge(&mut self, source: usize, target: usize) -> u32 {
        let moved = self.store.merge(source, target);
        if moved == 0 {
            return 0;
        }
        if !self.store.is_occupied(source) {
            // the held stack was absorbed into the target stack
            self.equipment.relocate(source, target);
        }
        self.events.push(InventoryEvent::Merged {
            source,
            target,
            amount: moved,
        });
        self.refreshed();
        moved
    }

    /// Commit a reorder: merge onto a matching stack with room, otherwise swap
    pub fn reorder(&mut self, source: usize, target: usize) -> ReorderAction {
        if source == target {
            return ReorderAction::None;
        }
        let (Some(src), Some(dst)) = (self.store.get(source), self.store.get(target)) else {
            return ReorderAction::None;
        };
        let action = stacking::resolve_reorder(src, dst);
        match action {
            ReorderAction::Merge { .. } => {
                self.merge(source, target);
            }
            ReorderAction::Swap => {
                self.swap(source, target);
            }
            ReorderAction::None => {}
        }
        action
    }

    /// Split one unit off into the first empty slot
    pub fn split(&mut self, index: usize) -> Option<usize> {
        let target = self.store.split(index)?;
        self.events.push(InventoryEvent::Split {
            source: index,
            target,
        });
        self.refreshed();
        Some(target)
    }

    /// Empty a slot into the world at `pose`
    pub fn drop_item<S: Scene + ?Sized>(&mut self, index: usize, pose: SpawnPose, scene: &mut S) -> bool {
        let Some((item, quantity)) = self.release(index, scene) else {
            return false;
        };
        if item.world_prefab.is_none() {
            log::warn!("Dropping '{}' which has no world prefab", item.id);
        }
        self.events.push(InventoryEvent::Dropped {
            slot: index,
            item_id: item.id.clone(),
            quantity,
        });
        scene.spawn_dropped(WorldDrop {
            item,
            quantity,
            pose,
        });
        self.refreshed();
        true
    }

    /// Empty a slot because its item was destroyed by something outside the inventory
    pub fn remove_item<S: HeldVisualSpawner + ?Sized>(
        &mut self,
        index: usize,
        spawner: &mut S,
    ) -> Option<(ItemRef, u32)> {
        let removed = self.release(index, spawner)?;
        self.events.push(InventoryEvent::Removed {
            slot: index,
            item_id: removed.0.id.clone(),
        });
        self.refreshed();
        Some(removed)
    }

    /// Tools are equipped; anything else is only reported as used
    pub fn use_item<S: HeldVisualSpawner + ?Sized>(&mut self, index: usize, spawner: &mut S) -> bool {
        let Some(item) = self.store.item_at(index) else {
            return false;
        };
        if item.is_tool() {
            return self.equip(index, spawner);
        }
        log::info!("Used '{}' from slot {}", item.name, index);
        let item_id = item.id.clone();
        self.events.push(InventoryEvent::Used { slot: index, item_id });
        true
    }

    /// Hold the item in `index`
    pub fn equip<S: HeldVisualSpawner + ?Sized>(&mut self, index: usize, spawner: &mut S) -> bool {
        if !self.store.is_occupied(index) {
            return false;
        }
        if let Some(previous) = self.equipment.unequip(spawner) {
            self.events.push(InventoryEvent::Unequipped { slot: previous });
        }
        let equipped = self.equipment.equip(index, &self.store, spawner);
        if equipped {
            self.events.push(InventoryEvent::Equipped { slot: index });
        }
        equipped
    }

    /// Put the held item away
    pub fn unequip<S: HeldVisualSpawner + ?Sized>(&mut self, spawner: &mut S) -> Option<usize> {
        let slot = self.equipment.unequip(spawner)?;
        self.events.push(InventoryEvent::Unequipped { slot });
        Some(slot)
    }

    /// Cycle a tool slot through the quick-slots
    pub fn assign_favorite(&mut self, index: usize) -> FavoriteAssignment {
        let assignment = self.favorites.assign(index, &self.store);
        if assignment != FavoriteAssignment::Rejected {
            self.events.push(InventoryEvent::FavoriteChanged {
                slot: index,
                assignment,
            });
        }
        assignment
    }

    /// Equip whatever quick-slot `favorite` points at, or put the hands away
    pub fn equip_favorite<S: HeldVisualSpawner + ?Sized>(&mut self, favorite: usize, spawner: &mut S) -> bool {
        if favorite >= FAVORITE_COUNT {
            return false;
        }
        self.favorites.select(favorite);
        match self.favorites.resolve(favorite, &self.store) {
            Some(slot) => self.equip(slot, spawner),
            None => {
                log::info!("Favorite slot {} is empty", favorite + 1);
                self.unequip(spawner);
                false
            }
        }
    }

    /// Step the hotbar pointer and equip what it lands on
    pub fn cycle_favorite<S: HeldVisualSpawner + ?Sized>(&mut self, direction: i32, spawner: &mut S) -> bool {
        let favorite = self.favorites.cycle(direction);
        self.equip_favorite(favorite, spawner)
    }

    /// Unequip and reset the hotbar pointer
    pub fn stow<S: HeldVisualSpawner + ?Sized>(&mut self, spawner: &mut S) {
        self.unequip(spawner);
        self.favorites.clear_active();
    }

    /// Take queued events
    pub fn drain_events(&mut self) -> Vec<InventoryEvent> {
        std::mem::take(&mut self.events)
    }

    /// Check the cross-component invariants
    pub fn is_consistent(&self) -> bool {
        let equipped_ok = self
            .equipped_slot()
            .map(|slot| self.store.is_occupied(slot))
            .unwrap_or(true);
        let favorites_ok = self.favorites.bindings().iter().flatten().all(|&slot| {
            self.store.item_at(slot).map(|i| i.is_tool()).unwrap_or(false)
        });
        self.store.is_consistent() && equipped_ok && favorites_ok
    }

    /// Clear a slot, unequipping and unbinding it first
    fn release<S: HeldVisualSpawner + ?Sized>(
        &mut self,
        index: usize,
        spawner: &mut S,
    ) -> Option<(ItemRef, u32)> {
        if !self.store.is_occupied(index) {
            return None;
        }
        if self.equipped_slot() == Some(index) {
            self.unequip(spawner);
        }
        self.favorites.unbind_slot(index);
        self.store.take(index)
    }

    fn refreshed(&mut self) {
        self.favorites.prune(&self.store);
        self.events.push(InventoryEvent::Refreshed);
    }
}

impl Default for Inventory {
    fn default() -> Self {
        Self::new(10, 3)
    }
}
