//! Panel open/close lifecycle

use serde::{Deserialize, Serialize};

/// Full-screen panels the player can be in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PanelKind {
    Inventory,
    Bed,
    Phone,
    InfoBoard,
}

impl PanelKind {
    /// Only the inventory blends its camera in and out
    pub fn uses_camera_blend(&self) -> bool {
        matches!(self, Self::Inventory)
    }
}

impl std::fmt::Display for PanelKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Inventory => write!(f, "inventory"),
            Self::Bed => write!(f, "bed"),
            Self::Phone => write!(f, "phone"),
            Self::InfoBoard => write!(f, "info board"),
        }
    }
}

/// Panel states
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum PanelState {
    #[default]
    Closed,
    Opening { kind: PanelKind, elapsed: f32 },
    Open { kind: PanelKind },
    Closing { kind: PanelKind, elapsed: f32 },
}

impl PanelState {
    pub fn kind(&self) -> Option<PanelKind> {
        match *self {
            Self::Closed => None,
            Self::Opening { kind, .. } | Self::Open { kind } | Self::Closing { kind, .. } => {
                Some(kind)
            }
        }
    }

    pub fn is_transitioning(&self) -> bool {
        matches!(self, Self::Opening { .. } | Self::Closing { .. })
    }
}

/// Which camera has priority
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CameraPriority {
    #[default]
    Player,
    Panel(PanelKind),
}

/// Which input map owns the controls
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InputContext {
    #[default]
    World,
    Ui,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CursorMode {
    /// Hidden and locked to the view
    #[default]
    Locked,
    /// Visible and free
    Free,
}

/// Side effects the lifecycle imposes on the rest of the game
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PanelEffects {
    pub camera: CameraPriority,
    pub input_context: InputContext,
    pub cursor: CursorMode,
    /// World movement input is zeroed
    pub movement_locked: bool,
}

impl PanelEffects {
    fn for_panel(kind: PanelKind) -> Self {
        Self {
            camera: CameraPriority::Panel(kind),
            input_context: InputContext::Ui,
            cursor: CursorMode::Free,
            movement_locked: true,
        }
    }
}

/// Notifications for camera and movement-lock collaborators
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PanelNotification {
    OpeningStarted(PanelKind),
    Opened(PanelKind),
    ClosingStarted(PanelKind),
    Closed(PanelKind),
}

/// Drives `Closed -> Opening -> Open -> Closing -> Closed`.
///
/// Effects switch at the start of each transition. Requests that arrive
/// mid-transition are dropped. The focused slot is remembered across a
/// close and handed back on the next open.
#[derive(Debug, Clone)]
pub struct PanelLifecycle {
    state: PanelState,
    effects: PanelEffects,
    /// Camera blend duration for panels that blend, in seconds
    blend_time: f32,
    notifications: Vec<PanelNotification>,
    remembered_focus: Option<usize>,
}

impl Default for PanelLifecycle {
    fn default() -> Self {
        Self::new(0.5)
    }
}

impl PanelLifecycle {
    pub fn new(blend_time: f32) -> Self {
        Self {
            state: PanelState::Closed,
            effects: PanelEffects::default(),
            blend_time: blend_time.max(0.0),
            notifications: Vec::new(),
            remembered_focus: None,
        }
    }

    pub fn state(&self) -> PanelState {
        self.state
    }

    pub fn effects(&self) -> PanelEffects {
        self.effects
    }

    pub fn is_closed(&self) -> bool {
        self.state == PanelState::Closed
    }

    /// Fully open and idle
    pub fn is_open(&self, kind: PanelKind) -> bool {
        self.state == PanelState::Open { kind }
    }

    pub fn is_transitioning(&self) -> bool {
        self.state.is_transitioning()
    }

    /// Blend duration for a panel kind
    pub fn blend_for(&self, kind: PanelKind) -> f32 {
        if kind.uses_camera_blend() {
            self.blend_time
        } else {
            0.0
        }
    }

    /// Start opening `kind`. Ignored unless fully closed.
    pub fn request_open(&mut self, kind: PanelKind) -> bool {
        if self.state != PanelState::Closed {
            log::debug!("Open {} ignored in state {:?}", kind, self.state);
            return false;
        }
        self.effects = PanelEffects::for_panel(kind);
        self.notifications.push(PanelNotification::OpeningStarted(kind));
        self.state = PanelState::Opening { kind, elapsed: 0.0 };
        log::info!("Opening {}", kind);
        self.complete_if_due();
        true
    }

    /// Start closing the open panel. Ignored unless fully open.
    pub fn request_close(&mut self) -> bool {
        let PanelState::Open { kind } = self.state else {
            log::debug!("Close ignored in state {:?}", self.state);
            return false;
        };
        self.effects = PanelEffects::default();
        self.notifications.push(PanelNotification::ClosingStarted(kind));
        self.state = PanelState::Closing { kind, elapsed: 0.0 };
        log::info!("Closing {}", kind);
        self.complete_if_due();
        true
    }

    /// Advance a running transition
    pub fn update(&mut self, dt: f32) {
        match &mut self.state {
            PanelState::Opening { elapsed, .. } | PanelState::Closing { elapsed, .. } => {
                *elapsed += dt;
            }
            _ => return,
        }
        self.complete_if_due();
    }

    /// Take queued notifications
    pub fn drain_notifications(&mut self) -> Vec<PanelNotification> {
        std::mem::take(&mut self.notifications)
    }

    /// Remember the focused slot for the next open
    pub fn remember_focus(&mut self, focus: Option<usize>) {
        self.remembered_focus = focus;
    }

    /// Slot to focus on open; falls back to 0 when nothing valid was kept
    pub fn restore_focus(&self, slot_count: usize) -> usize {
        self.remembered_focus
            .filter(|index| *index < slot_count)
            .unwrap_or(0)
    }

    fn complete_if_due(&mut self) {
        match self.state {
            PanelState::Opening { kind, elapsed } if elapsed >= self.blend_for(kind) => {
                self.state = PanelState::Open { kind };
                self.notifications.push(PanelNotification::Opened(kind));
                log::debug!("{} open", kind);
            }
            PanelState::Closing { kind, elapsed } if elapsed >= self.blend_for(kind) => {
                self.state = PanelState::Closed;
                self.notifications.push(PanelNotification::Closed(kind));
                log::debug!("{} closed", kind);
            }
            _ => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_full_cycle() {
        let mut panel = PanelLifecycle::new(0.5);

        assert!(panel.request_open(PanelKind::Inventory));
        assert_eq!(
            panel.state(),
            PanelState::Opening {
                kind: PanelKind::Inventory,
                elapsed: 0.0
            }
        );
        assert_eq!(panel.effects().input_context, InputContext::Ui);
        assert_eq!(panel.effects().cursor, CursorMode::Free);
        assert!(panel.effects().movement_locked);

        panel.update(0.3);
        assert!(panel.is_transitioning());
        panel.update(0.3);
        assert!(panel.is_open(PanelKind::Inventory));

        assert!(panel.request_close());
        assert_eq!(panel.effects(), PanelEffects::default());
        panel.update(0.6);
        assert!(panel.is_closed());

        assert_eq!(
            panel.drain_notifications(),
            vec![
                PanelNotification::OpeningStarted(PanelKind::Inventory),
                PanelNotification::Opened(PanelKind::Inventory),
                PanelNotification::ClosingStarted(PanelKind::Inventory),
                PanelNotification::Closed(PanelKind::Inventory),
            ]
        );
    }

    #[test]
    fn test_requests_ignored_mid_transition() {
        let mut panel = PanelLifecycle::new(0.5);
        panel.request_open(PanelKind::Inventory);

        assert!(!panel.request_open(PanelKind::Inventory));
        assert!(!panel.request_close());
        assert!(!panel.request_open(PanelKind::Phone));

        panel.update(0.5);
        assert!(!panel.request_open(PanelKind::Bed));
        panel.request_close();
        assert!(!panel.request_close());
        assert!(!panel.request_open(PanelKind::Inventory));
    }

    #[test]
    fn test_other_panels_switch_instantly() {
        let mut panel = PanelLifecycle::new(0.5);

        panel.request_open(PanelKind::Bed);
        assert!(panel.is_open(PanelKind::Bed));
        assert_eq!(panel.effects().camera, CameraPriority::Panel(PanelKind::Bed));

        panel.request_close();
        assert!(panel.is_closed());
        assert_eq!(panel.effects().camera, CameraPriority::Player);
    }

    #[test]
    fn test_focus_memory() {
        let mut panel = PanelLifecycle::default();
        assert_eq!(panel.restore_focus(30), 0);

        panel.remember_focus(Some(12));
        assert_eq!(panel.restore_focus(30), 12);
        assert_eq!(panel.restore_focus(10), 0);

        panel.remember_focus(None);
        assert_eq!(panel.restore_focus(30), 0);
    }

    #[test]
    fn test_update_while_idle() {
        let mut panel = PanelLifecycle::default();
        panel.update(1.0);

        assert!(panel.is_closed());
        assert!(panel.drain_notifications().is_empty());
    }
}
