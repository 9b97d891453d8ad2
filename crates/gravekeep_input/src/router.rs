//! Modality detection and event routing

use crate::scheme::{ControlScheme, InputEvent};

/// Component an input event should go to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    /// Slot hover, focus and drag handling
    Drag,
    /// The open context menu
    ContextMenu,
    /// Panel open/close
    Panel,
    /// Favorite hotkeys while the world has the input
    Hotbar,
    /// Nothing listens for this right now
    Ignored,
}

/// What the rest of the UI is doing when an event arrives
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RouteContext {
    /// The UI input context is active (panel opening or open)
    pub ui_active: bool,
    pub menu_open: bool,
}

/// The scheme changed since the last event
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SchemeSwitch {
    pub from: ControlScheme,
    pub to: ControlScheme,
}

/// Tracks which control scheme last produced input and routes events.
///
/// Only one scheme is active at a time. Callers must cancel any drag when
/// [`observe`](Self::observe) reports a switch.
#[derive(Debug, Clone, Default)]
pub struct InputModalityRouter {
    active: ControlScheme,
}

impl InputModalityRouter {
    pub fn new(initial: ControlScheme) -> Self {
        Self { active: initial }
    }

    pub fn active(&self) -> ControlScheme {
        self.active
    }

    /// Record the scheme of an incoming event
    pub fn observe(&mut self, scheme: ControlScheme) -> Option<SchemeSwitch> {
        if scheme == self.active {
            return None;
        }
        let switch = SchemeSwitch {
            from: self.active,
            to: scheme,
        };
        log::debug!("Control scheme switched: {} -> {}", switch.from, switch.to);
        self.active = scheme;
        Some(switch)
    }

    /// Pick the component for `event`
    pub fn dispatch(&self, event: &InputEvent, ctx: RouteContext) -> Route {
        if !ctx.ui_active {
            return match event {
                InputEvent::ToggleInventory => Route::Panel,
                InputEvent::HotbarKey(_) | InputEvent::Dpad(_) => Route::Hotbar,
                _ => Route::Ignored,
            };
        }

        match event {
            InputEvent::ToggleInventory => Route::Panel,
            InputEvent::Cancel if ctx.menu_open => Route::ContextMenu,
            InputEvent::Cancel => Route::Panel,
            InputEvent::MenuSelect(_) if ctx.menu_open => Route::ContextMenu,
            InputEvent::MenuSelect(_) => Route::Ignored,
            // moving focus away closes the menu
            InputEvent::Navigate(_) if ctx.menu_open => Route::ContextMenu,
            InputEvent::PointerSecondaryClick(_) if !ctx.menu_open => Route::ContextMenu,
            _ if ctx.menu_open => Route::Ignored,
            InputEvent::PointerMove(_)
            | InputEvent::PointerDragStart(_)
            | InputEvent::PointerDrop(_)
            | InputEvent::Navigate(_)
            | InputEvent::ActionDown
            | InputEvent::ActionUp => Route::Drag,
            InputEvent::PointerSecondaryClick(_)
            | InputEvent::HotbarKey(_)
            | InputEvent::Dpad(_) => Route::Ignored,
        }
    }
}
