//! Item definitions

use glam::{EulerRot, Quat, Vec3};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Shared, read-only handle to an item definition.
///
/// Definitions are authored outside the inventory and outlive it; slots only
/// ever hold references.
pub type ItemRef = Arc<ItemDefinition>;

/// Item category
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ItemCategory {
    /// Eaten, burned or otherwise used up
    Consumable,
    /// Held in hand; the only category that can be favorited
    Tool,
    /// Crafting and building material
    Material,
}

impl Default for ItemCategory {
    fn default() -> Self {
        Self::Material
    }
}

/// Which hand anchor a held item attaches to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EquipHand {
    Right,
    Left,
}

impl Default for EquipHand {
    fn default() -> Self {
        Self::Right
    }
}

/// Item definition
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ItemDefinition {
    /// Unique identifier, used for "same item" comparisons
    pub id: String,
    /// Display name (tooltips, name tags)
    pub name: String,
    /// Icon path
    pub icon: String,
    /// Category
    pub category: ItemCategory,
    /// Whether several units can share one slot
    pub stackable: bool,
    /// Maximum units per slot
    pub max_stack: u32,
    /// Prefab spawned in the world when dropped
    pub world_prefab: Option<String>,
    /// Prefab spawned in hand when equipped
    pub equip_prefab: Option<String>,
    /// Hand anchor used while held
    pub hand: EquipHand,
    /// Local grip offset relative to the hand anchor
    pub grip_position: Vec3,
    /// Local grip rotation, Euler angles in degrees
    pub grip_rotation: Vec3,
    /// Animator flag raised while the item is held
    pub hold_anim: Option<String>,
    pub can_use: bool,
    pub can_drop: bool,
    pub can_favorite: bool,
}

impl ItemDefinition {
    /// Create a new item definition
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            icon: String::new(),
            category: ItemCategory::default(),
            stackable: false,
            max_stack: 1,
            world_prefab: None,
            equip_prefab: None,
            hand: EquipHand::default(),
            grip_position: Vec3::ZERO,
            grip_rotation: Vec3::ZERO,
            hold_anim: None,
            can_use: false,
            can_drop: true,
            can_favorite: false,
        }
    }

    /// Set category
    pub fn with_category(mut self, category: ItemCategory) -> Self {
        self.category = category;
        self
    }

    /// Make stackable up to `max` units per slot
    pub fn stackable(mut self, max: u32) -> Self {
        self.stackable = true;
        self.max_stack = max.max(1);
        self
    }

    /// Set icon path
    pub fn with_icon(mut self, path: impl Into<String>) -> Self {
        self.icon = path.into();
        self
    }

    /// Set the world (drop) prefab
    pub fn with_world_prefab(mut self, prefab: impl Into<String>) -> Self {
        self.world_prefab = Some(prefab.into());
        self
    }

    /// Set the held (equip) prefab
    pub fn with_equip_prefab(mut self, prefab: impl Into<String>) -> Self {
        self.equip_prefab = Some(prefab.into());
        self
    }

    /// Set grip pose; rotation is in degrees
    pub fn with_grip(mut self, hand: EquipHand, position: Vec3, rotation: Vec3) -> Self {
        self.hand = hand;
        self.grip_position = position;
        self.grip_rotation = rotation;
        self
    }

    /// Set the animator flag raised while held
    pub fn with_hold_anim(mut self, flag: impl Into<String>) -> Self {
        self.hold_anim = Some(flag.into());
        self
    }

    /// Set context menu capabilities
    pub fn with_actions(mut self, can_use: bool, can_drop: bool, can_favorite: bool) -> Self {
        self.can_use = can_use;
        self.can_drop = can_drop;
        self.can_favorite = can_favorite;
        self
    }

    /// Check if stackable
    pub fn is_stackable(&self) -> bool {
        self.stackable
    }

    /// Units a single slot may hold. Non-stackable items always occupy one
    /// slot per unit.
    pub fn stack_limit(&self) -> u32 {
        if self.stackable {
            self.max_stack.max(1)
        } else {
            1
        }
    }

    pub fn is_tool(&self) -> bool {
        self.category == ItemCategory::Tool
    }

    /// Whether the context menu offers the favorite action
    pub fn is_favoritable(&self) -> bool {
        self.is_tool() && self.can_favorite
    }

    /// Prefab used while held, falling back to the world prefab
    pub fn held_prefab(&self) -> Option<&str> {
        self.equip_prefab
            .as_deref()
            .or(self.world_prefab.as_deref())
    }

    /// Grip rotation as a quaternion
    pub fn grip_quat(&self) -> Quat {
        Quat::from_euler(
            EulerRot::XYZ,
            self.grip_rotation.x.to_radians(),
            self.grip_rotation.y.to_radians(),
            self.grip_rotation.z.to_radians(),
        )
    }

    /// Wrap into a shared reference
    pub fn into_ref(self) -> ItemRef {
        Arc::new(self)
    }
}

impl Default for ItemDefinition {
    fn default() -> Self {
        Self::new("unknown", "Unknown Item")
    }
}

/// Whether two references describe the same item
pub fn same_item(a: &ItemDefinition, b: &ItemDefinition) -> bool {
    std::ptr::eq(a, b) || a.id == b.id
}
