//! Control schemes and the input events they produce

use glam::Vec2;
use gravekeep_hud::ContextAction;
use serde::{Deserialize, Serialize};

/// Input device family driving the UI
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ControlScheme {
    /// Keyboard and mouse
    #[default]
    Pointer,
    Gamepad,
}

impl std::fmt::Display for ControlScheme {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Pointer => write!(f, "pointer"),
            Self::Gamepad => write!(f, "gamepad"),
        }
    }
}

/// Input the inventory reacts to
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputEvent {
    /// Pointer moved to a screen position
    PointerMove(Vec2),
    /// Primary button started dragging at a screen position
    PointerDragStart(Vec2),
    /// Primary button released at the end of a drag
    PointerDrop(Vec2),
    /// Secondary button clicked
    PointerSecondaryClick(Vec2),
    /// UI focus moved to a slot (or off the grid)
    Navigate(Option<usize>),
    /// Gamepad submit button pressed
    ActionDown,
    /// Gamepad submit button released
    ActionUp,
    /// Back / escape
    Cancel,
    /// Inventory open/close button
    ToggleInventory,
    /// Number key, 1-based
    HotbarKey(usize),
    /// D-pad direction, each axis in `-1.0..=1.0`
    Dpad(Vec2),
    /// A context menu entry was pressed
    MenuSelect(ContextAction),
}

/// An input event plus the scheme that produced it
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TaggedInput {
    pub scheme: ControlScheme,
    pub event: InputEvent,
}

impl TaggedInput {
    pub fn new(scheme: ControlScheme, event: InputEvent) -> Self {
        Self { scheme, event }
    }

    /// Event from the mouse or keyboard
    pub fn pointer(event: InputEvent) -> Self {
        Self::new(ControlScheme::Pointer, event)
    }

    /// Event from a gamepad
    pub fn gamepad(event: InputEvent) -> Self {
        Self::new(ControlScheme::Gamepad, event)
    }
}
