//! Gravekeep Runtime - configuration, item catalog and the inventory screen
//!
//! Ties the inventory model, HUD presenters, input handling and panel
//! lifecycle into one [`InventoryScreen`](screen::InventoryScreen) driven by
//! a frame loop.
//!
//! # Features
//!
//! - Layered TOML + environment configuration
//! - Item catalog with built-in items and config overrides
//! - Input routing across pointer and gamepad with drag cancellation on
//!   scheme switches
//! - Panel open/close with focus memory and queued panel hand-off
//! - World pickup targeting and drops in front of the player
//!
//! # Example
//!
//! ```ignore
//! use gravekeep_runtime::prelude::*;
//! use rand::SeedableRng;
//!
//! let config = GravekeepConfig::load();
//! let catalog = ItemCatalog::from_config(&config.items);
//! let mut screen = InventoryScreen::new(&config, rand::rngs::StdRng::from_entropy());
//! screen.add_item(&catalog.get("shovel").unwrap(), 1);
//! ```

pub mod catalog;
pub mod config;
pub mod screen;

pub mod prelude {
    pub use crate::catalog::ItemCatalog;
    pub use crate::config::{
        ConfigError, GravekeepConfig, InputConfig, InventoryConfig, PanelConfig, PickupConfig,
    };
    pub use crate::screen::{InventoryScreen, PlayerPose};
}

pub use prelude::*;
