//! Drag session: the in-flight reorder shared by pointer and gamepad
//!
//! Pointer drags start immediately on drag-start over an occupied slot.
//! Gamepad drags are emulated: the submit button is held on a focused slot,
//! and once the hold passes a threshold the icon lifts and follows focus.
//! Releasing before the threshold is a tap (the caller opens the context
//! menu). Both paths commit through [`Inventory::reorder`], so a pointer
//! drop and a gamepad release onto the same slots mutate identically.
//!
//! Every exit restores the lifted icon before returning to idle, including
//! [`DragSession::force_cancel`], which is reachable from any state.

use crate::scheme::ControlScheme;
use glam::Vec2;
use gravekeep_hud::{DetachedIcon, SlotViews};
use gravekeep_inventory::{Inventory, ReorderAction};

/// Default hold time before a gamepad press becomes a drag, in seconds
pub const DEFAULT_DRAG_THRESHOLD: f32 = 0.25;

/// Drag session state
#[derive(Debug, Default)]
pub enum DragState {
    #[default]
    Idle,
    /// Gamepad submit held on a slot, timer running
    Holding { slot: usize, elapsed: f32 },
    /// Icon lifted and following the cursor or focus
    Dragging {
        source: usize,
        modality: ControlScheme,
        icon: DetachedIcon,
        /// Slot currently under the cursor or focus
        target: Option<usize>,
    },
}

/// What a drag input did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DragOutcome {
    /// Input did not apply in the current state
    Nothing,
    /// Gamepad hold timer started
    HoldStarted { slot: usize },
    /// Icon lifted from `source`
    Started { source: usize },
    /// Gamepad drag target moved
    Hovering { target: Option<usize> },
    /// Reorder committed
    Committed {
        source: usize,
        target: usize,
        action: ReorderAction,
    },
    /// Drag ended with no mutation
    Cancelled { source: usize },
    /// Gamepad button released before the threshold
    Tap { slot: usize },
}

/// One reorder in flight at most
#[derive(Debug)]
pub struct DragSession {
    state: DragState,
    threshold: f32,
}

impl Default for DragSession {
    fn default() -> Self {
        Self::new(DEFAULT_DRAG_THRESHOLD)
    }
}

impl DragSession {
    /// Create an idle session with the gamepad hold threshold in seconds
    pub fn new(threshold: f32) -> Self {
        Self {
            state: DragState::Idle,
            threshold,
        }
    }

    pub fn state(&self) -> &DragState {
        &self.state
    }

    pub fn threshold(&self) -> f32 {
        self.threshold
    }

    pub fn is_idle(&self) -> bool {
        matches!(self.state, DragState::Idle)
    }

    /// Holding or dragging
    pub fn is_active(&self) -> bool {
        !self.is_idle()
    }

    pub fn is_dragging(&self) -> bool {
        matches!(self.state, DragState::Dragging { .. })
    }

    /// Scheme that opened the session
    pub fn modality(&self) -> Option<ControlScheme> {
        match &self.state {
            DragState::Idle => None,
            DragState::Holding { .. } => Some(ControlScheme::Gamepad),
            DragState::Dragging { modality, .. } => Some(*modality),
        }
    }

    /// Source slot of the session
    pub fn source(&self) -> Option<usize> {
        match &self.state {
            DragState::Idle => None,
            DragState::Holding { slot, .. } => Some(*slot),
            DragState::Dragging { source, .. } => Some(*source),
        }
    }

    // ---- pointer ----

    /// Drag started over `slot` at `position`
    pub fn pointer_begin(
        &mut self,
        slot: Option<usize>,
        position: Vec2,
        inventory: &Inventory,
        views: &mut SlotViews,
    ) -> DragOutcome {
        if !self.is_idle() {
            return DragOutcome::Nothing;
        }
        let Some(source) = slot.filter(|s| inventory.store().is_occupied(*s)) else {
            return DragOutcome::Nothing;
        };
        let Some(icon) = views.detach(source) else {
            return DragOutcome::Nothing;
        };
        views.follow(&icon, position);
        self.state = DragState::Dragging {
            source,
            modality: ControlScheme::Pointer,
            icon,
            target: None,
        };
        log::debug!("Pointer drag started on slot {}", source);
        DragOutcome::Started { source }
    }

    /// Pointer moved; the lifted icon follows it
    pub fn pointer_move(&mut self, position: Vec2, hovered: Option<usize>, views: &mut SlotViews) {
        if let DragState::Dragging {
            modality: ControlScheme::Pointer,
            icon,
            target,
            ..
        } = &mut self.state
        {
            views.follow(icon, position);
            *target = hovered;
        }
    }

    /// Pointer released over `target` (or over no slot)
    pub fn pointer_drop(
        &mut self,
        target: Option<usize>,
        inventory: &mut Inventory,
        views: &mut SlotViews,
    ) -> DragOutcome {
        if !matches!(
            self.state,
            DragState::Dragging {
                modality: ControlScheme::Pointer,
                ..
            }
        ) {
            return DragOutcome::Nothing;
        }
        self.finish(target, inventory, views)
    }

    // ---- gamepad ----

    /// Submit pressed while `focused` is selected
    pub fn gamepad_press(&mut self, focused: Option<usize>) -> DragOutcome {
        if !self.is_idle() {
            return DragOutcome::Nothing;
        }
        let Some(slot) = focused else {
            return DragOutcome::Nothing;
        };
        self.state = DragState::Holding { slot, elapsed: 0.0 };
        DragOutcome::HoldStarted { slot }
    }

    /// Advance the hold timer; once it exceeds the threshold, lifts the icon
    /// of the slot focused now, which need not be the one pressed on.
    ///
    /// An empty held slot never lifts, so its release reads as a tap.
    pub fn tick(
        &mut self,
        dt: f32,
        focused: Option<usize>,
        inventory: &Inventory,
        views: &mut SlotViews,
    ) -> DragOutcome {
        let DragState::Holding { slot, elapsed } = &mut self.state else {
            return DragOutcome::Nothing;
        };
        *elapsed += dt;
        if let Some(focused) = focused {
            *slot = focused;
        }
        if *elapsed <= self.threshold {
            return DragOutcome::Nothing;
        }
        let Some(source) = focused else {
            return DragOutcome::Nothing;
        };
        if !inventory.store().is_occupied(source) {
            return DragOutcome::Nothing;
        }
        let Some(icon) = views.detach(source) else {
            return DragOutcome::Nothing;
        };
        self.state = DragState::Dragging {
            source,
            modality: ControlScheme::Gamepad,
            icon,
            target: Some(source),
        };
        log::debug!("Gamepad drag started on slot {}", source);
        DragOutcome::Started { source }
    }

    /// Focus moved while a gamepad drag is running; the icon follows it
    pub fn gamepad_navigate(&mut self, focused: Option<usize>, views: &mut SlotViews) -> DragOutcome {
        let DragState::Dragging {
            modality: ControlScheme::Gamepad,
            icon,
            target,
            ..
        } = &mut self.state
        else {
            return DragOutcome::Nothing;
        };
        *target = focused;
        if let Some(anchor) = focused.and_then(|f| views.layout().anchor(f)) {
            views.follow(icon, anchor);
        }
        DragOutcome::Hovering { target: focused }
    }

    /// Submit released with `focused` selected. A release before the
    /// threshold taps whatever is focused at release time.
    pub fn gamepad_release(
        &mut self,
        focused: Option<usize>,
        inventory: &mut Inventory,
        views: &mut SlotViews,
    ) -> DragOutcome {
        match self.state {
            DragState::Holding { slot, .. } => {
                self.state = DragState::Idle;
                match focused {
                    Some(slot) => DragOutcome::Tap { slot },
                    None => DragOutcome::Cancelled { source: slot },
                }
            }
            DragState::Dragging {
                modality: ControlScheme::Gamepad,
                ..
            } => self.finish(focused, inventory, views),
            _ => DragOutcome::Nothing,
        }
    }

    // ---- exits ----

    /// Abort from any state, putting the lifted icon back
    pub fn force_cancel(&mut self, views: &mut SlotViews) -> DragOutcome {
        match std::mem::take(&mut self.state) {
            DragState::Idle => DragOutcome::Nothing,
            DragState::Holding { slot, .. } => {
                log::debug!("Hold on slot {} cancelled", slot);
                DragOutcome::Cancelled { source: slot }
            }
            DragState::Dragging { source, icon, .. } => {
                views.restore(icon);
                log::debug!("Drag from slot {} cancelled", source);
                DragOutcome::Cancelled { source }
            }
        }
    }

    /// Restore the icon, then commit onto `target` if it is a different,
    /// valid slot and the source still holds something.
    fn finish(
        &mut self,
        target: Option<usize>,
        inventory: &mut Inventory,
        views: &mut SlotViews,
    ) -> DragOutcome {
        let DragState::Dragging { source, icon, .. } = std::mem::take(&mut self.state) else {
            return DragOutcome::Nothing;
        };
        views.restore(icon);

        let Some(target) = target.filter(|t| *t != source) else {
            log::debug!("Drag from slot {} dropped on nothing", source);
            return DragOutcome::Cancelled { source };
        };
        if !inventory.store().is_occupied(source) {
            log::debug!("Drag source {} emptied mid-drag", source);
            return DragOutcome::Cancelled { source };
        }

        let action = inventory.reorder(source, target);
        views.refresh(inventory.store());
        if action == ReorderAction::None {
            return DragOutcome::Cancelled { source };
        }
        log::debug!("Drag {} -> {}: {:?}", source, target, action);
        DragOutcome::Committed {
            source,
            target,
            action,
        }
    }
}
