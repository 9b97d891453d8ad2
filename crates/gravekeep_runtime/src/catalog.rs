//! Item catalog

use glam::Vec3;
use gravekeep_inventory::{EquipHand, ItemCategory, ItemDefinition, ItemRef};
use std::collections::HashMap;

/// Shared item definitions, looked up by id.
///
/// Created once per session; every slot refers into it.
#[derive(Debug, Clone, Default)]
pub struct ItemCatalog {
    items: HashMap<String, ItemRef>,
}

impl ItemCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Catalog with the built-in graveyard items
    pub fn with_defaults() -> Self {
        let mut catalog = Self::new();
        for item in default_items() {
            catalog.insert(item);
        }
        catalog
    }

    /// Built-in items overridden and extended by configured ones
    pub fn from_config(items: &[ItemDefinition]) -> Self {
        let mut catalog = Self::with_defaults();
        for item in items {
            if catalog.insert(item.clone()).is_some() {
                log::debug!("Config overrides item '{}'", item.id);
            }
        }
        catalog
    }

    /// Add or replace a definition, returning the one it replaced
    pub fn insert(&mut self, item: ItemDefinition) -> Option<ItemRef> {
        self.items.insert(item.id.clone(), item.into_ref())
    }

    pub fn get(&self, id: &str) -> Option<ItemRef> {
        let item = self.items.get(id).cloned();
        if item.is_none() {
            log::warn!("Unknown item '{}'", id);
        }
        item
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Item ids in sorted order
    pub fn ids(&self) -> Vec<&str> {
        let mut ids: Vec<&str> = self.items.keys().map(String::as_str).collect();
        ids.sort_unstable();
        ids
    }
}

fn default_items() -> Vec<ItemDefinition> {
    vec![
        ItemDefinition::new("shovel", "Shovel")
            .with_category(ItemCategory::Tool)
            .with_icon("icons/shovel.png")
            .with_world_prefab("props/shovel")
            .with_equip_prefab("held/shovel")
            .with_grip(EquipHand::Right, Vec3::new(0.0, -0.1, 0.05), Vec3::new(0.0, 90.0, 0.0))
            .with_hold_anim("IsHoldingShovel")
            .with_actions(true, true, true),
        ItemDefinition::new("lantern", "Lantern")
            .with_category(ItemCategory::Tool)
            .with_icon("icons/lantern.png")
            .with_world_prefab("props/lantern")
            .with_grip(EquipHand::Left, Vec3::new(0.0, -0.2, 0.0), Vec3::ZERO)
            .with_hold_anim("IsHoldingLantern")
            .with_actions(true, true, true),
        ItemDefinition::new("moss", "Moss")
            .with_category(ItemCategory::Material)
            .with_icon("icons/moss.png")
            .with_world_prefab("props/moss")
            .stackable(10)
            .with_actions(false, true, false),
        ItemDefinition::new("candle", "Candle")
            .with_category(ItemCategory::Consumable)
            .with_icon("icons/candle.png")
            .with_world_prefab("props/candle")
            .stackable(5)
            .with_actions(true, true, false),
        ItemDefinition::new("stone", "Grave Stone")
            .with_category(ItemCategory::Material)
            .with_icon("icons/stone.png")
            .with_world_prefab("props/stone")
            .stackable(20)
            .with_actions(false, true, false),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let catalog = ItemCatalog::with_defaults();

        assert_eq!(catalog.len(), 5);
        assert!(catalog.get("shovel").unwrap().is_favoritable());
        assert_eq!(catalog.get("moss").unwrap().stack_limit(), 10);
        assert!(catalog.get("coffin").is_none());
    }

    #[test]
    fn test_config_overrides() {
        let items = vec![
            ItemDefinition::new("moss", "Wet Moss").stackable(4),
            ItemDefinition::new("bones", "Bones"),
        ];
        let catalog = ItemCatalog::from_config(&items);

        assert_eq!(catalog.len(), 6);
        assert_eq!(catalog.get("moss").unwrap().name, "Wet Moss");
        assert_eq!(catalog.ids()[0], "bones");
    }
}
