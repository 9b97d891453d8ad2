//! Gravekeep HUD - inventory panel presentation
//!
//! This crate provides the presentation side of the inventory panel.
//!
//! # Features
//!
//! - Slot renderers with icon and quantity labels
//! - Grid layout with slot anchors and pointer hit-testing
//! - Icons that lift off their slot while dragged and snap back
//! - Item name tooltip
//! - Per-item context menu (use, drop, split, favorite)
//!
//! # Example
//!
//! ```ignore
//! use gravekeep_hud::prelude::*;
//!
//! let mut views = SlotViews::new(GridLayout::new(10, 3));
//! views.refresh(inventory.store());
//!
//! let mut tooltip = TooltipPresenter::new(TooltipStyle::default());
//! let mut menu = ContextMenuController::new(ContextMenuStyle::default());
//! menu.open(0, &inventory, views.layout().anchor(0).unwrap(), &mut tooltip);
//! ```

pub mod context_menu;
pub mod slot_view;
pub mod tooltip;

pub mod prelude {
    pub use crate::context_menu::{
        favorite_label, ContextAction, ContextMenuController, ContextMenuStyle, MenuEntries,
        MenuOutcome,
    };
    pub use crate::slot_view::{DetachedIcon, GridLayout, IconParent, SlotView, SlotViews};
    pub use crate::tooltip::{TooltipPresenter, TooltipStyle};
}

pub use prelude::*;
