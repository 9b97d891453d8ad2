//! Gravekeep GameState - panels and interactables
//!
//! This crate provides the panel lifecycle that gates camera, cursor and
//! input ownership, and the world objects that open panels.
//!
//! # Features
//!
//! - Timed open/close transitions with a re-entrancy guard
//! - Camera, input context, cursor and movement-lock effects
//! - Focus memory across close and reopen
//! - Beds, phones, info boards and doors as tagged interactables
//!
//! # Example
//!
//! ```ignore
//! use gravekeep_gamestate::prelude::*;
//!
//! let mut panel = PanelLifecycle::new(0.5);
//! panel.request_open(PanelKind::Inventory);
//! panel.update(0.5);
//! assert!(panel.is_open(PanelKind::Inventory));
//! ```

pub mod interactable;
pub mod panel;

pub mod prelude {
    pub use crate::interactable::{closest, Interactable, InteractableSite, InteractionEffect};
    pub use crate::panel::{
        CameraPriority, CursorMode, InputContext, PanelEffects, PanelKind, PanelLifecycle,
        PanelNotification, PanelState,
    };
}

pub use prelude::*;
