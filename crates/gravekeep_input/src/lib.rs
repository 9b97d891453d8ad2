//! Gravekeep Input - control schemes, drag sessions and hotbar input
//!
//! # Features
//!
//! - Pointer and gamepad schemes, mutually exclusive at any instant
//! - Event routing to drag handling, the context menu, the panel or the hotbar
//! - Drag-and-drop reordering with a pointer, and hold-to-drag with a gamepad
//! - Number-key and D-pad quick-slot selection
//!
//! # Example
//!
//! ```ignore
//! use gravekeep_input::prelude::*;
//!
//! let mut drag = DragSession::new(0.25);
//! drag.gamepad_press(Some(2));
//! drag.tick(0.3, Some(2), &inventory, &mut views);
//! drag.gamepad_release(Some(5), &mut inventory, &mut views);
//! ```

pub mod drag;
pub mod hotbar;
pub mod router;
pub mod scheme;

pub mod prelude {
    pub use crate::drag::{DragOutcome, DragSession, DragState, DEFAULT_DRAG_THRESHOLD};
    pub use crate::hotbar::{HotbarCommand, HotbarInput, HotbarSettings};
    pub use crate::router::{InputModalityRouter, Route, RouteContext, SchemeSwitch};
    pub use crate::scheme::{ControlScheme, InputEvent, TaggedInput};
}

pub use prelude::*;
