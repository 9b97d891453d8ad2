//! Quick-slot favorites

use crate::store::SlotStore;

/// Number of quick-slots
pub const FAVORITE_COUNT: usize = 4;

/// Result of assigning a slot as favorite
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FavoriteAssignment {
    /// Slot is empty, out of range, or not a tool
    Rejected,
    /// Now bound to this quick-slot
    Bound(usize),
    /// Cycled past the last quick-slot and is no longer a favorite
    Unbound,
}

/// Maps the four quick-slots to inventory slot indices.
///
/// Bindings follow slot identity, not item identity: a swap moves the binding
/// along with the slot index it points at. A binding whose slot no longer
/// holds a tool is stale and treated as unbound the next time it is read.
#[derive(Debug, Clone, Default)]
pub struct FavoritesBinder {
    bindings: [Option<usize>; FAVORITE_COUNT],
    /// Quick-slot the hotbar last selected
    active: Option<usize>,
}

impl FavoritesBinder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Raw bindings, including stale ones
    pub fn bindings(&self) -> &[Option<usize>; FAVORITE_COUNT] {
        &self.bindings
    }

    /// Quick-slot currently bound to `slot`
    pub fn favorite_index_of(&self, slot: usize) -> Option<usize> {
        self.bindings.iter().position(|b| *b == Some(slot))
    }

    /// Cycle `slot` to the next quick-slot.
    ///
    /// Unbound slots go to quick-slot 0, bound ones move one further along,
    /// and a slot on the last quick-slot drops out of the favorites.
    pub fn assign(&mut self, slot: usize, store: &SlotStore) -> FavoriteAssignment {
        let is_tool = store.item_at(slot).map(|i| i.is_tool()).unwrap_or(false);
        if !is_tool {
            log::info!("Only tools can be favorited (slot {})", slot);
            return FavoriteAssignment::Rejected;
        }

        let current = self.favorite_index_of(slot);
        if let Some(fav) = current {
            self.bindings[fav] = None;
        }

        let next = current.map_or(0, |fav| fav + 1);
        if next >= FAVORITE_COUNT {
            log::info!("Slot {} removed from favorites", slot);
            FavoriteAssignment::Unbound
        } else {
            self.bindings[next] = Some(slot);
            log::info!("Slot {} assigned to favorite {}", slot, next + 1);
            FavoriteAssignment::Bound(next)
        }
    }

    /// Slot behind a quick-slot, clearing the binding if it went stale
    pub fn resolve(&mut self, favorite: usize, store: &SlotStore) -> Option<usize> {
        let slot = (*self.bindings.get(favorite)?)?;
        if Self::is_valid_target(slot, store) {
            Some(slot)
        } else {
            self.bindings[favorite] = None;
            None
        }
    }

    /// Drop every stale binding
    pub fn prune(&mut self, store: &SlotStore) {
        for binding in &mut self.bindings {
            if let Some(slot) = *binding {
                if !Self::is_valid_target(slot, store) {
                    *binding = None;
                }
            }
        }
    }

    /// Remove any binding to `slot`
    pub fn unbind_slot(&mut self, slot: usize) -> Option<usize> {
        let fav = self.favorite_index_of(slot)?;
        self.bindings[fav] = None;
        Some(fav)
    }

    /// Keep bindings on the same slot indices across a swap
    pub fn on_swap(&mut self, a: usize, b: usize) {
        for binding in &mut self.bindings {
            if *binding == Some(a) {
                *binding = Some(b);
            } else if *binding == Some(b) {
                *binding = Some(a);
            }
        }
    }

    /// Quick-slot the hotbar points at
    pub fn active(&self) -> Option<usize> {
        self.active
    }

    /// Point the hotbar at a quick-slot
    pub fn select(&mut self, favorite: usize) {
        if favorite < FAVORITE_COUNT {
            self.active = Some(favorite);
        }
    }

    pub fn clear_active(&mut self) {
        self.active = None;
    }

    /// Move the active pointer one step with wraparound and return it.
    ///
    /// With no active quick-slot, stepping forward lands on the first and
    /// stepping back lands on the last.
    pub fn cycle(&mut self, direction: i32) -> usize {
        let next = match self.active {
            Some(current) => (current as i32 + direction.signum()).rem_euclid(FAVORITE_COUNT as i32) as usize,
            None if direction < 0 => FAVORITE_COUNT - 1,
            None => 0,
        };
        self.active = Some(next);
        next
    }

    fn is_valid_target(slot: usize, store: &SlotStore) -> bool {
        store.item_at(slot).map(|i| i.is_tool()).unwrap_or(false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::item::{ItemCategory, ItemDefinition};

    fn store_with_tool_at(index: usize) -> SlotStore {
        let mut store = SlotStore::new(10, 3);
        let filler = ItemDefinition::new("stone", "Stone").into_ref();
        let shovel = ItemDefinition::new("shovel", "Shovel")
            .with_category(ItemCategory::Tool)
            .into_ref();
        for _ in 0..index {
            store.add_item(&filler, 1);
        }
        store.add_item(&shovel, 1);
        store
    }

    #[test]
    fn test_assign_cycles_then_unbinds() {
        let store = store_with_tool_at(4);
        let mut favs = FavoritesBinder::new();

        assert_eq!(favs.assign(4, &store), FavoriteAssignment::Bound(0));
        assert_eq!(favs.assign(4, &store), FavoriteAssignment::Bound(1));
        assert_eq!(favs.bindings()[0], None);
        assert_eq!(favs.assign(4, &store), FavoriteAssignment::Bound(2));
        assert_eq!(favs.bindings()[1], None);
        assert_eq!(favs.assign(4, &store), FavoriteAssignment::Bound(3));
        assert_eq!(favs.assign(4, &store), FavoriteAssignment::Unbound);
        assert_eq!(favs.bindings(), &[None; FAVORITE_COUNT]);
    }

    #[test]
    fn test_assign_rejects_non_tool() {
        let store = store_with_tool_at(4);
        let mut favs = FavoritesBinder::new();

        assert_eq!(favs.assign(0, &store), FavoriteAssignment::Rejected);
        assert_eq!(favs.assign(20, &store), FavoriteAssignment::Rejected);
        assert_eq!(favs.assign(99, &store), FavoriteAssignment::Rejected);
        assert_eq!(favs.bindings(), &[None; FAVORITE_COUNT]);
    }

    #[test]
    fn test_on_swap_follows_slots() {
        let store = store_with_tool_at(2);
        let mut favs = FavoritesBinder::new();
        favs.assign(2, &store);

        favs.on_swap(2, 7);
        assert_eq!(favs.bindings()[0], Some(7));
        favs.on_swap(2, 7);
        assert_eq!(favs.bindings()[0], Some(2));
    }

    #[test]
    fn test_resolve_clears_stale() {
        let mut store = store_with_tool_at(1);
        let mut favs = FavoritesBinder::new();
        favs.assign(1, &store);

        assert_eq!(favs.resolve(0, &store), Some(1));
        store.take(1);
        assert_eq!(favs.resolve(0, &store), None);
        assert_eq!(favs.bindings()[0], None);
    }

    #[test]
    fn test_cycle_wraps() {
        let mut favs = FavoritesBinder::new();

        assert_eq!(favs.cycle(1), 0);
        assert_eq!(favs.cycle(-1), 3);
        assert_eq!(favs.cycle(1), 0);

        let mut back = FavoritesBinder::new();
        assert_eq!(back.cycle(-1), 3);
    }

    #[test]
    fn test_unbind_slot() {
        let store = store_with_tool_at(0);
        let mut favs = FavoritesBinder::new();
        favs.assign(0, &store);

        assert_eq!(favs.unbind_slot(0), Some(0));
        assert_eq!(favs.unbind_slot(0), None);
    }
}
