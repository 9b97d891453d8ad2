//! Per-item action menu

use crate::tooltip::TooltipPresenter;
use glam::Vec2;
use gravekeep_inventory::{Inventory, ItemDefinition, Scene, SpawnPose};
use serde::{Deserialize, Serialize};

/// Actions offered for a slot
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ContextAction {
    Use,
    Drop,
    Split,
    Favorite,
}

impl ContextAction {
    /// Focus preference when the menu opens
    const FOCUS_ORDER: [ContextAction; 3] = [Self::Use, Self::Drop, Self::Split];
}

/// Which actions are enabled for the open slot
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct MenuEntries {
    pub use_item: bool,
    pub drop: bool,
    pub split: bool,
    pub favorite: bool,
}

impl MenuEntries {
    /// Derive the entries from an item's capability flags
    pub fn for_item(item: &ItemDefinition, quantity: u32) -> Self {
        Self {
            use_item: item.can_use,
            drop: item.can_drop,
            split: item.is_stackable() && quantity > 1,
            favorite: item.is_favoritable(),
        }
    }

    pub fn is_enabled(&self, action: ContextAction) -> bool {
        match action {
            ContextAction::Use => self.use_item,
            ContextAction::Drop => self.drop,
            ContextAction::Split => self.split,
            ContextAction::Favorite => self.favorite,
        }
    }
}

/// Menu placement
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ContextMenuStyle {
    /// Offset from the slot anchor
    pub offset: Vec2,
}

impl Default for ContextMenuStyle {
    fn default() -> Self {
        Self {
            offset: Vec2::new(10.0, -10.0),
        }
    }
}

/// Result of pressing a menu entry
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuOutcome {
    /// Menu closed, disabled entry, or nothing happened
    Ignored,
    /// Favorite toggled; the menu stays up with a new label
    StaysOpen,
    /// Action ran and the menu closed; focus goes back to the slot if given
    Closed { restore_focus: Option<usize> },
}

#[derive(Debug, Clone)]
struct OpenMenu {
    slot: usize,
    entries: MenuEntries,
    position: Vec2,
    focused: Option<ContextAction>,
    favorite_label: String,
}

/// Drives the context menu for one slot at a time.
///
/// While open, slot interaction is disabled and the tooltip stays pinned
/// on the item name.
#[derive(Debug, Clone, Default)]
pub struct ContextMenuController {
    style: ContextMenuStyle,
    open: Option<OpenMenu>,
}

impl ContextMenuController {
    pub fn new(style: ContextMenuStyle) -> Self {
        Self { style, open: None }
    }

    pub fn is_open(&self) -> bool {
        self.open.is_some()
    }

    /// Slots accept drags, hovers and selection only while the menu is closed
    pub fn slot_interaction_enabled(&self) -> bool {
        self.open.is_none()
    }

    /// Slot the menu was opened for
    pub fn slot(&self) -> Option<usize> {
        self.open.as_ref().map(|m| m.slot)
    }

    pub fn entries(&self) -> Option<MenuEntries> {
        self.open.as_ref().map(|m| m.entries)
    }

    pub fn position(&self) -> Option<Vec2> {
        self.open.as_ref().map(|m| m.position)
    }

    pub fn focused(&self) -> Option<ContextAction> {
        self.open.as_ref().and_then(|m| m.focused)
    }

    pub fn favorite_label(&self) -> Option<&str> {
        self.open.as_ref().map(|m| m.favorite_label.as_str())
    }

    /// Open the menu for a non-empty slot next to `anchor`
    pub fn open(
        &mut self,
        slot: usize,
        inventory: &Inventory,
        anchor: Vec2,
        tooltip: &mut TooltipPresenter,
    ) -> bool {
        if self.open.is_some() {
            return false;
        }
        let Some(stack) = inventory.store().get(slot) else {
            return false;
        };
        let Some(item) = stack.item() else {
            return false;
        };

        let entries = MenuEntries::for_item(item, stack.quantity());
        let focused = ContextAction::FOCUS_ORDER
            .into_iter()
            .chain(std::iter::once(ContextAction::Favorite))
            .find(|action| entries.is_enabled(*action));

        tooltip.pin(&item.name, anchor);
        self.open = Some(OpenMenu {
            slot,
            entries,
            position: anchor + self.style.offset,
            focused,
            favorite_label: favorite_label(inventory.favorite_index_of(slot)),
        });
        log::debug!("Context menu opened for slot {} ({})", slot, item.name);
        true
    }

    /// Move gamepad focus to another enabled entry
    pub fn focus(&mut self, action: ContextAction) -> bool {
        match &mut self.open {
            Some(menu) if menu.entries.is_enabled(action) => {
                menu.focused = Some(action);
                true
            }
            _ => false,
        }
    }

    /// Press an entry. `drop_pose` is only evaluated for drops.
    pub fn activate(
        &mut self,
        action: ContextAction,
        inventory: &mut Inventory,
        scene: &mut dyn Scene,
        drop_pose: impl FnOnce() -> SpawnPose,
        tooltip: &mut TooltipPresenter,
    ) -> MenuOutcome {
        let Some(menu) = &mut self.open else {
            return MenuOutcome::Ignored;
        };
        if !menu.entries.is_enabled(action) {
            log::debug!("Context action {:?} is disabled for slot {}", action, menu.slot);
            return MenuOutcome::Ignored;
        }
        let slot = menu.slot;

        match action {
            ContextAction::Favorite => {
                inventory.assign_favorite(slot);
                menu.favorite_label = favorite_label(inventory.favorite_index_of(slot));
                return MenuOutcome::StaysOpen;
            }
            ContextAction::Use => {
                inventory.use_item(slot, scene);
            }
            ContextAction::Drop => {
                inventory.drop_item(slot, drop_pose(), scene);
            }
            ContextAction::Split => {
                inventory.split(slot);
            }
        }

        MenuOutcome::Closed {
            restore_focus: self.close(true, tooltip),
        }
    }

    /// Close the menu and re-enable slot interaction.
    ///
    /// Returns the slot to put focus back on when `restore_selection` is set.
    pub fn close(&mut self, restore_selection: bool, tooltip: &mut TooltipPresenter) -> Option<usize> {
        let menu = self.open.take()?;
        tooltip.unpin();
        log::debug!("Context menu closed (slot {})", menu.slot);
        restore_selection.then_some(menu.slot)
    }
}

/// Label of the favorite entry for a slot bound to `favorite`
pub fn favorite_label(favorite: Option<usize>) -> String {
    match favorite {
        Some(index) => format!("Fav: {}", index + 1),
        None => "Favorite".to_string(),
    }
}
