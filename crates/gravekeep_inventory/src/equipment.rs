//! Held item equipment

use crate::item::ItemRef;
use crate::scene::{HeldVisualRequest, HeldVisualSpawner, VisualId};
use crate::store::SlotStore;

/// The one slot currently held in hand
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EquippedState {
    /// Slot whose item is held
    pub slot: usize,
    /// Visual spawned for it; `None` when the scene could not build one
    pub visual: Option<VisualId>,
}

/// Owns the single held visual.
///
/// At most one slot is equipped. Equipping always tears down the previous
/// visual before spawning the next, so two visuals never coexist.
#[derive(Debug, Clone, Default)]
pub struct EquipmentController {
    equipped: Option<EquippedState>,
}

impl EquipmentController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> Option<EquippedState> {
        self.equipped
    }

    /// Slot currently held
    pub fn equipped_slot(&self) -> Option<usize> {
        self.equipped.map(|e| e.slot)
    }

    /// Definition of the held item
    pub fn equipped_item<'a>(&self, store: &'a SlotStore) -> Option<&'a ItemRef> {
        store.item_at(self.equipped_slot()?)
    }

    /// Hold the item in `index`.
    ///
    /// Empty or out-of-range slots are ignored. A missing prefab or hand
    /// anchor is logged and leaves the slot equipped without a visual.
    pub fn equip<S: HeldVisualSpawner + ?Sized>(
        &mut self,
        index: usize,
        store: &SlotStore,
        spawner: &mut S,
    ) -> bool {
        let Some(item) = store.item_at(index) else {
            return false;
        };

        self.unequip(spawner);

        let visual = match HeldVisualRequest::for_item(item) {
            Some(request) => match spawner.spawn_held(&request) {
                Ok(visual) => Some(visual),
                Err(err) => {
                    log::warn!("Equipping '{}' without a visual: {}", item.id, err);
                    None
                }
            },
            None => {
                log::warn!("Item '{}' has no held or world prefab", item.id);
                None
            }
        };

        log::debug!("Equipped slot {} ({})", index, item.name);
        self.equipped = Some(EquippedState { slot: index, visual });
        true
    }

    /// Destroy the held visual and forget the slot. Calling it again is harmless.
    pub fn unequip<S: HeldVisualSpawner + ?Sized>(&mut self, spawner: &mut S) -> Option<usize> {
        let state = self.equipped.take()?;
        if let Some(visual) = state.visual {
            spawner.despawn_held(visual);
        }
        log::debug!("Unequipped slot {}", state.slot);
        Some(state.slot)
    }

    /// The held item moved to another index; the visual stays as is
    pub fn relocate(&mut self, from: usize, to: usize) {
        if let Some(state) = &mut self.equipped {
            if state.slot == from {
                state.slot = to;
            }
        }
    }

    /// Follow the held item across a swap
    pub fn on_swap(&mut self, a: usize, b: usize) {
        if let Some(state) = &mut self.equipped {
            if state.slot == a {
                state.slot = b;
            } else if state.slot == b {
                state.slot = a;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::item::{ItemCategory, ItemDefinition};
    use crate::scene::RecordingScene;

    fn store() -> SlotStore {
        let mut store = SlotStore::new(5, 1);
        let shovel = ItemDefinition::new("shovel", "Shovel")
            .with_category(ItemCategory::Tool)
            .with_world_prefab("shovel_world")
            .into_ref();
        let lantern = ItemDefinition::new("lantern", "Lantern")
            .with_category(ItemCategory::Tool)
            .with_equip_prefab("lantern_hand")
            .into_ref();
        store.add_item(&shovel, 1);
        store.add_item(&lantern, 1);
        store
    }

    #[test]
    fn test_equip_spawns_visual() {
        let store = store();
        let mut scene = RecordingScene::default();
        let mut eq = EquipmentController::new();

        assert!(eq.equip(0, &store, &mut scene));
        assert_eq!(eq.equipped_slot(), Some(0));
        assert_eq!(scene.live.len(), 1);
        assert_eq!(scene.spawned[0].prefab, "shovel_world");
    }

    #[test]
    fn test_equip_replaces_previous() {
        let store = store();
        let mut scene = RecordingScene::default();
        let mut eq = EquipmentController::new();

        eq.equip(0, &store, &mut scene);
        eq.equip(1, &store, &mut scene);

        assert_eq!(scene.live.len(), 1);
        assert_eq!(eq.equipped_item(&store).unwrap().id, "lantern");
    }

    #[test]
    fn test_equip_empty_is_noop() {
        let store = store();
        let mut scene = RecordingScene::default();
        let mut eq = EquipmentController::new();
        eq.equip(0, &store, &mut scene);

        assert!(!eq.equip(3, &store, &mut scene));
        assert!(!eq.equip(42, &store, &mut scene));
        assert_eq!(eq.equipped_slot(), Some(0));
    }

    #[test]
    fn test_unequip_idempotent() {
        let store = store();
        let mut scene = RecordingScene::default();
        let mut eq = EquipmentController::new();
        eq.equip(1, &store, &mut scene);

        assert_eq!(eq.unequip(&mut scene), Some(1));
        let after_first = eq.state();
        assert_eq!(eq.unequip(&mut scene), None);
        assert_eq!(eq.state(), after_first);
        assert!(scene.live.is_empty());
    }

    #[test]
    fn test_missing_anchor_degrades() {
        let store = store();
        let mut scene = RecordingScene {
            missing_anchor: true,
            ..Default::default()
        };
        let mut eq = EquipmentController::new();

        assert!(eq.equip(0, &store, &mut scene));
        assert_eq!(eq.state(), Some(EquippedState { slot: 0, visual: None }));
        assert!(scene.live.is_empty());
    }

    #[test]
    fn test_on_swap() {
        let store = store();
        let mut scene = RecordingScene::default();
        let mut eq = EquipmentController::new();
        eq.equip(0, &store, &mut scene);

        eq.on_swap(0, 4);
        assert_eq!(eq.equipped_slot(), Some(4));
        eq.on_swap(3, 4);
        assert_eq!(eq.equipped_slot(), Some(3));
        eq.on_swap(1, 2);
        assert_eq!(eq.equipped_slot(), Some(3));
    }
}
