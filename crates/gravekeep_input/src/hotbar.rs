//! Favorite hotkeys while the world has the input

use glam::Vec2;
use gravekeep_inventory::{HeldVisualSpawner, Inventory, FAVORITE_COUNT};
use serde::{Deserialize, Serialize};

/// Hotbar request decoded from raw input
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HotbarCommand {
    /// Equip quick-slot `n` (0-based)
    Equip(usize),
    /// Step the active quick-slot by +1 / -1
    Cycle(i32),
    /// Put the held item away and reset the pointer
    Unequip,
}

/// D-pad tuning
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HotbarSettings {
    /// Axis value that counts as a press
    pub dpad_threshold: f32,
    /// Magnitude under which the pad counts as released
    pub deadzone: f32,
}

impl Default for HotbarSettings {
    fn default() -> Self {
        Self {
            dpad_threshold: 0.5,
            deadzone: 0.1,
        }
    }
}

/// Turns number keys and D-pad input into hotbar commands.
///
/// The D-pad is edge-triggered: after a press it stays latched until the
/// pad returns inside the dead zone.
#[derive(Debug, Clone, Default)]
pub struct HotbarInput {
    settings: HotbarSettings,
    latched: bool,
}

impl HotbarInput {
    pub fn new(settings: HotbarSettings) -> Self {
        Self {
            settings,
            latched: false,
        }
    }

    /// Number key `1..=4`
    pub fn key(&self, key: usize) -> Option<HotbarCommand> {
        (1..=FAVORITE_COUNT)
            .contains(&key)
            .then(|| HotbarCommand::Equip(key - 1))
    }

    /// Current D-pad vector
    pub fn dpad(&mut self, value: Vec2) -> Option<HotbarCommand> {
        if self.latched {
            if value.length() < self.settings.deadzone {
                self.latched = false;
            }
            return None;
        }

        let threshold = self.settings.dpad_threshold;
        let command = if value.x > threshold {
            HotbarCommand::Cycle(1)
        } else if value.x < -threshold {
            HotbarCommand::Cycle(-1)
        } else if value.y < -threshold {
            HotbarCommand::Unequip
        } else {
            return None;
        };
        self.latched = true;
        Some(command)
    }

    /// Run a command against the inventory
    pub fn apply<S: HeldVisualSpawner + ?Sized>(
        command: HotbarCommand,
        inventory: &mut Inventory,
        spawner: &mut S,
    ) -> bool {
        match command {
            HotbarCommand::Equip(favorite) => inventory.equip_favorite(favorite, spawner),
            HotbarCommand::Cycle(direction) => inventory.cycle_favorite(direction, spawner),
            HotbarCommand::Unequip => {
                inventory.stow(spawner);
                true
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use gravekeep_inventory::{ItemCategory, ItemDefinition, RecordingScene};

    #[test]
    fn test_number_keys() {
        let hotbar = HotbarInput::default();

        assert_eq!(hotbar.key(1), Some(HotbarCommand::Equip(0)));
        assert_eq!(hotbar.key(4), Some(HotbarCommand::Equip(3)));
        assert_eq!(hotbar.key(0), None);
        assert_eq!(hotbar.key(5), None);
    }

    #[test]
    fn test_dpad_edge_triggered() {
        let mut hotbar = HotbarInput::default();

        assert_eq!(hotbar.dpad(Vec2::X), Some(HotbarCommand::Cycle(1)));
        assert_eq!(hotbar.dpad(Vec2::X), None);
        assert_eq!(hotbar.dpad(Vec2::new(0.3, 0.0)), None); // still outside dead zone
        assert_eq!(hotbar.dpad(Vec2::ZERO), None);
        assert_eq!(hotbar.dpad(-Vec2::X), Some(HotbarCommand::Cycle(-1)));
        hotbar.dpad(Vec2::ZERO);
        assert_eq!(hotbar.dpad(-Vec2::Y), Some(HotbarCommand::Unequip));
        hotbar.dpad(Vec2::ZERO);
        assert_eq!(hotbar.dpad(Vec2::Y), None);
    }

    #[test]
    fn test_apply_equips_and_stows() {
        let mut inventory = Inventory::new(10, 3);
        let mut scene = RecordingScene::default();
        let shovel = ItemDefinition::new("shovel", "Shovel")
            .with_category(ItemCategory::Tool)
            .with_world_prefab("shovel")
            .into_ref();
        inventory.add_item(&shovel, 1);
        inventory.assign_favorite(0);

        assert!(HotbarInput::apply(HotbarCommand::Equip(0), &mut inventory, &mut scene));
        assert_eq!(inventory.equipped_slot(), Some(0));
        assert!(!HotbarInput::apply(HotbarCommand::Equip(2), &mut inventory, &mut scene));
        assert_eq!(inventory.equipped_slot(), None);

        HotbarInput::apply(HotbarCommand::Cycle(-1), &mut inventory, &mut scene);
        assert_eq!(inventory.favorites().active(), Some(1));

        HotbarInput::apply(HotbarCommand::Unequip, &mut inventory, &mut scene);
        assert_eq!(inventory.favorites().active(), None);
        assert!(scene.live.is_empty());
    }
}
