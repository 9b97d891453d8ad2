//! Inventory screen: wires the panel, input, drag, menu and HUD together
//!
//! Everything runs on the caller's frame loop. `handle_input` consumes one
//! tagged input event, `update` advances timers, and all inventory
//! mutations happen synchronously inside those calls.

use crate::config::GravekeepConfig;
use glam::{Vec2, Vec3};
use gravekeep_gamestate::{
    InputContext, InteractableSite, InteractionEffect, PanelKind, PanelLifecycle,
    PanelNotification, PanelState,
};
use gravekeep_hud::{
    ContextAction, ContextMenuController, GridLayout, MenuOutcome, SlotViews, TooltipPresenter,
};
use gravekeep_input::{
    ControlScheme, DragOutcome, DragSession, HotbarInput, InputEvent, InputModalityRouter, Route,
    RouteContext, TaggedInput,
};
use gravekeep_inventory::{
    DropPlacement, Inventory, InventoryEvent, ItemRef, PickupTargeting, Scene, SpawnPose,
    TargetChange, WorldItem,
};
use rand::rngs::StdRng;

/// Where the player stands and looks
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlayerPose {
    pub position: Vec3,
    pub forward: Vec3,
}

impl Default for PlayerPose {
    fn default() -> Self {
        Self {
            position: Vec3::ZERO,
            forward: Vec3::Z,
        }
    }
}

/// The inventory panel and everything around it
pub struct InventoryScreen {
    inventory: Inventory,
    views: SlotViews,
    tooltip: TooltipPresenter,
    menu: ContextMenuController,
    drag: DragSession,
    router: InputModalityRouter,
    hotbar: HotbarInput,
    panel: PanelLifecycle,
    /// Gamepad/keyboard focused slot
    focus: Option<usize>,
    /// Panel requested while the inventory was still closing
    pending_open: Option<PanelKind>,
    views_dirty: bool,
    drop_placement: DropPlacement,
    targeting: PickupTargeting,
    player: PlayerPose,
    rng: StdRng,
    events: Vec<InventoryEvent>,
    notifications: Vec<PanelNotification>,
}

impl InventoryScreen {
    /// Build the screen from configuration. `rng` drives drop scatter.
    pub fn new(config: &GravekeepConfig, rng: StdRng) -> Self {
        let grid = config.inventory;
        let inventory = Inventory::new(grid.columns, grid.rows);
        let mut views = SlotViews::new(GridLayout::new(grid.columns, grid.rows));
        views.refresh(inventory.store());

        Self {
            inventory,
            views,
            tooltip: TooltipPresenter::new(config.tooltip),
            menu: ContextMenuController::new(config.context_menu),
            drag: DragSession::new(config.input.drag_threshold),
            router: InputModalityRouter::default(),
            hotbar: HotbarInput::new(config.input.hotbar_settings()),
            panel: PanelLifecycle::new(config.panel.camera_blend_time),
            focus: None,
            pending_open: None,
            views_dirty: false,
            drop_placement: config.drop,
            targeting: config.pickup.targeting(),
            player: PlayerPose::default(),
            rng,
            events: Vec::new(),
            notifications: Vec::new(),
        }
    }

    pub fn inventory(&self) -> &Inventory {
        &self.inventory
    }

    pub fn views(&self) -> &SlotViews {
        &self.views
    }

    pub fn tooltip(&self) -> &TooltipPresenter {
        &self.tooltip
    }

    pub fn menu(&self) -> &ContextMenuController {
        &self.menu
    }

    pub fn drag(&self) -> &DragSession {
        &self.drag
    }

    pub fn panel(&self) -> &PanelLifecycle {
        &self.panel
    }

    pub fn focus(&self) -> Option<usize> {
        self.focus
    }

    pub fn active_scheme(&self) -> ControlScheme {
        self.router.active()
    }

    pub fn set_player_pose(&mut self, pose: PlayerPose) {
        self.player = pose;
    }

    /// Add items from outside the panel (pickups, rewards, scripted grants)
    pub fn add_item(&mut self, item: &ItemRef, amount: u32) -> bool {
        self.inventory.add_item(item, amount)
    }

    /// Destroy the contents of `slot` from outside the panel (quest hand-in,
    /// item burned up). Any drag, hold or menu on that slot is abandoned first.
    pub fn remove_item(&mut self, slot: usize, scene: &mut dyn Scene) -> Option<(ItemRef, u32)> {
        if self.drag.source() == Some(slot) {
            self.drag.force_cancel(&mut self.views);
        }
        if self.menu.slot() == Some(slot) {
            self.menu.close(false, &mut self.tooltip);
        }
        let removed = self.inventory.remove_item(slot, scene)?;
        // a menu on another slot keeps its pinned tooltip
        if !self.menu.is_open() {
            self.tooltip.force_hide();
        }
        self.collect_events();
        Some(removed)
    }

    /// Inventory events since the last call
    pub fn drain_events(&mut self) -> Vec<InventoryEvent> {
        std::mem::take(&mut self.events)
    }

    /// Panel notifications since the last call
    pub fn drain_notifications(&mut self) -> Vec<PanelNotification> {
        std::mem::take(&mut self.notifications)
    }

    // ---- per-frame ----

    /// Route one input event
    pub fn handle_input(&mut self, input: TaggedInput, scene: &mut dyn Scene) {
        if let Some(switch) = self.router.observe(input.scheme) {
            if self.drag.is_active() {
                log::info!(
                    "Drag cancelled: control scheme switched from {} to {}",
                    switch.from,
                    switch.to
                );
                self.drag.force_cancel(&mut self.views);
            }
        }

        let ctx = RouteContext {
            ui_active: self.panel.effects().input_context == InputContext::Ui,
            menu_open: self.menu.is_open(),
        };
        match self.router.dispatch(&input.event, ctx) {
            Route::Panel => self.handle_panel(input.event),
            Route::Hotbar => self.handle_hotbar(input.event, scene),
            Route::ContextMenu => self.handle_menu(input.event, scene),
            Route::Drag => self.handle_slots(input.event),
            Route::Ignored => {}
        }
        self.collect_events();
    }

    /// Advance transitions and hold timers by `dt` seconds
    pub fn update(&mut self, dt: f32) {
        self.panel.update(dt);
        for notification in self.panel.drain_notifications() {
            if notification == PanelNotification::Closed(PanelKind::Inventory) {
                if let Some(kind) = self.pending_open.take() {
                    self.panel.request_open(kind);
                }
            }
            self.notifications.push(notification);
        }
        // a pending open may itself complete instantly
        self.notifications.extend(self.panel.drain_notifications());

        if let DragOutcome::Started { source } =
            self.drag.tick(dt, self.focus, &self.inventory, &mut self.views)
        {
            self.show_tooltip_for(source);
        }

        self.collect_events();
        debug_assert!(self.inventory.is_consistent());
    }

    // ---- panel ----

    /// Open/close request from a collaborator (bed, phone, board)
    pub fn open_panel(&mut self, kind: PanelKind) -> bool {
        match self.panel.state() {
            PanelState::Closed if kind == PanelKind::Inventory => self.open_inventory(),
            PanelState::Closed => self.panel.request_open(kind),
            PanelState::Open {
                kind: PanelKind::Inventory,
            } if kind != PanelKind::Inventory => {
                self.close_inventory(false);
                self.pending_open = Some(kind);
                true
            }
            PanelState::Closing {
                kind: PanelKind::Inventory,
                ..
            } if kind != PanelKind::Inventory => {
                self.pending_open = Some(kind);
                true
            }
            state => {
                log::debug!("Open {} ignored in state {:?}", kind, state);
                false
            }
        }
    }

    /// Interact with a world object
    pub fn interact(&mut self, site: &mut InteractableSite) -> InteractionEffect {
        let effect = site.interactable.interact();
        match effect {
            InteractionEffect::OpenPanel(kind) => {
                self.open_panel(kind);
            }
            InteractionEffect::ToggleDoor { open } => {
                log::info!("{} is now {}", site.name, if open { "open" } else { "closed" });
            }
        }
        effect
    }

    /// Close whatever is open and abandon any drag or menu
    pub fn interrupt(&mut self) {
        if self.panel.is_open(PanelKind::Inventory) {
            self.close_inventory(false);
        } else if self.panel.state().kind().is_some() {
            self.panel.request_close();
        }
    }

    fn open_inventory(&mut self) -> bool {
        if !self.panel.request_open(PanelKind::Inventory) {
            return false;
        }
        self.focus = Some(self.panel.restore_focus(self.inventory.store().len()));
        self.views.refresh(self.inventory.store());
        self.views_dirty = false;
        true
    }

    /// Tear down drag and menu state, then start closing
    fn close_inventory(&mut self, restore_menu_focus: bool) -> bool {
        if !self.panel.is_open(PanelKind::Inventory) {
            return false;
        }
        self.drag.force_cancel(&mut self.views);
        if let Some(slot) = self.menu.close(restore_menu_focus, &mut self.tooltip) {
            self.focus = Some(slot);
        }
        self.tooltip.force_hide();
        self.panel.remember_focus(self.focus);
        self.panel.request_close()
    }

    fn handle_panel(&mut self, event: InputEvent) {
        match event {
            InputEvent::ToggleInventory => {
                if self.panel.is_closed() {
                    self.open_inventory();
                } else {
                    self.close_inventory(true);
                }
            }
            InputEvent::Cancel => {
                if self.panel.is_open(PanelKind::Inventory) {
                    self.close_inventory(true);
                } else if matches!(self.panel.state(), PanelState::Open { .. }) {
                    self.panel.request_close();
                }
            }
            _ => {}
        }
    }

    // ---- hotbar ----

    fn handle_hotbar(&mut self, event: InputEvent, scene: &mut dyn Scene) {
        let command = match event {
            InputEvent::HotbarKey(key) => self.hotbar.key(key),
            InputEvent::Dpad(value) => self.hotbar.dpad(value),
            _ => None,
        };
        if let Some(command) = command {
            HotbarInput::apply(command, &mut self.inventory, scene);
        }
    }

    // ---- context menu ----

    fn handle_menu(&mut self, event: InputEvent, scene: &mut dyn Scene) {
        match event {
            InputEvent::Cancel => {
                if let Some(slot) = self.menu.close(true, &mut self.tooltip) {
                    self.focus = Some(slot);
                }
            }
            InputEvent::Navigate(focused) => {
                self.menu.close(false, &mut self.tooltip);
                self.focus = focused;
                self.hover(focused);
            }
            InputEvent::PointerSecondaryClick(position) => {
                if let Some(slot) = self.views.layout().hit_test(position) {
                    self.open_menu(slot);
                }
            }
            InputEvent::MenuSelect(action) => self.activate(action, scene),
            _ => {}
        }
    }

    /// Open the context menu on `slot`; a drag or hold in flight is cancelled
    fn open_menu(&mut self, slot: usize) -> bool {
        if !self.inventory.store().is_occupied(slot) {
            return false;
        }
        if self.drag.force_cancel(&mut self.views) != DragOutcome::Nothing {
            log::debug!("Drag cancelled by context menu on slot {}", slot);
        }
        let Some(anchor) = self.views.layout().anchor(slot) else {
            return false;
        };
        self.menu.open(slot, &self.inventory, anchor, &mut self.tooltip)
    }

    fn activate(&mut self, action: ContextAction, scene: &mut dyn Scene) {
        let placement = self.drop_placement;
        let player = self.player;
        let rng = &mut self.rng;
        let outcome = self.menu.activate(
            action,
            &mut self.inventory,
            scene,
            || placement.pose(player.position, player.forward, rng),
            &mut self.tooltip,
        );
        if let MenuOutcome::Closed {
            restore_focus: Some(slot),
        } = outcome
        {
            self.focus = Some(slot);
        }
    }

    // ---- slots and drags ----

    fn handle_slots(&mut self, event: InputEvent) {
        match event {
            InputEvent::PointerMove(position) => {
                let hovered = self.views.layout().hit_test(position);
                self.drag.pointer_move(position, hovered, &mut self.views);
                self.hover(hovered);
            }
            InputEvent::PointerDragStart(position) => {
                let slot = self.views.layout().hit_test(position);
                let outcome =
                    self.drag
                        .pointer_begin(slot, position, &self.inventory, &mut self.views);
                if outcome != DragOutcome::Nothing {
                    self.tooltip.hide();
                }
            }
            InputEvent::PointerDrop(position) => {
                let target = self.views.layout().hit_test(position);
                self.drag.pointer_drop(target, &mut self.inventory, &mut self.views);
            }
            InputEvent::Navigate(focused) => {
                self.focus = focused;
                if self.drag.is_dragging() {
                    self.drag.gamepad_navigate(focused, &mut self.views);
                }
                self.hover(focused);
            }
            InputEvent::ActionDown => {
                self.drag.gamepad_press(self.focus);
            }
            InputEvent::ActionUp => {
                let outcome =
                    self.drag
                        .gamepad_release(self.focus, &mut self.inventory, &mut self.views);
                if let DragOutcome::Tap { slot } = outcome {
                    self.open_menu(slot);
                }
            }
            _ => {}
        }
    }

    /// Tooltip follows whatever slot is hovered or focused
    fn hover(&mut self, slot: Option<usize>) {
        match slot {
            Some(slot) => self.show_tooltip_for(slot),
            None => self.tooltip.hide(),
        }
    }

    fn show_tooltip_for(&mut self, slot: usize) {
        let name = self.inventory.store().item_at(slot).map(|i| i.name.as_str());
        match (name, self.views.layout().anchor(slot)) {
            (Some(name), Some(anchor)) => self.tooltip.show(name, anchor),
            _ => self.tooltip.hide(),
        }
    }

    fn collect_events(&mut self) {
        for event in self.inventory.drain_events() {
            if event == InventoryEvent::Refreshed {
                self.views_dirty = true;
            }
            self.events.push(event);
        }
        // lifted icons stay up until their drag ends
        if self.views_dirty && !self.drag.is_dragging() {
            self.views.refresh(self.inventory.store());
            self.views_dirty = false;
        }
    }

    // ---- world ----

    /// Re-pick the world item under the player's view
    pub fn update_targeting(&mut self, world: &[WorldItem]) -> Option<TargetChange> {
        self.targeting
            .select(self.player.position, self.player.forward, world)
    }

    /// Pick up the targeted world item.
    ///
    /// The world item is removed only when every unit fit.
    pub fn try_pickup(&mut self, world: &mut Vec<WorldItem>) -> bool {
        let Some(target) = self.targeting.current() else {
            return false;
        };
        let Some(index) = world.iter().position(|w| w.id == target) else {
            self.targeting.clear();
            return false;
        };
        let picked = self.inventory.pickup(&world[index]);
        if picked {
            let item = world.remove(index);
            log::info!("Picked up {} x {}", item.quantity, item.item.name);
            self.targeting.clear();
        }
        self.collect_events();
        picked
    }

    /// Screen position of a slot, for scripted pointer input
    pub fn slot_position(&self, slot: usize) -> Option<Vec2> {
        self.views.layout().anchor(slot)
    }

    /// Drop pose in front of the player
    pub fn drop_pose(&mut self) -> SpawnPose {
        self.drop_placement
            .pose(self.player.position, self.player.forward, &mut self.rng)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::ItemCatalog;
    use gravekeep_gamestate::Interactable;
    use gravekeep_hud::IconParent;
    use gravekeep_inventory::{RecordingScene, ReorderAction, WorldItemId};
    use rand::SeedableRng;

    fn screen() -> (InventoryScreen, ItemCatalog) {
        let config = GravekeepConfig::default();
        let screen = InventoryScreen::new(&config, StdRng::seed_from_u64(42));
        (screen, ItemCatalog::with_defaults())
    }

    fn stocked() -> InventoryScreen {
        let (mut screen, catalog) = screen();
        screen.add_item(&catalog.get("shovel").unwrap(), 1);
        screen.add_item(&catalog.get("lantern").unwrap(), 1);
        screen.add_item(&catalog.get("moss").unwrap(), 5);
        screen.add_item(&catalog.get("candle").unwrap(), 3);
        screen
    }

    fn open(screen: &mut InventoryScreen, scene: &mut RecordingScene) {
        screen.handle_input(TaggedInput::pointer(InputEvent::ToggleInventory), scene);
        screen.update(0.5);
        assert!(screen.panel().is_open(PanelKind::Inventory));
    }

    fn pad(screen: &mut InventoryScreen, scene: &mut RecordingScene, event: InputEvent) {
        screen.handle_input(TaggedInput::gamepad(event), scene);
    }

    fn mouse(screen: &mut InventoryScreen, scene: &mut RecordingScene, event: InputEvent) {
        screen.handle_input(TaggedInput::pointer(event), scene);
    }

    fn pos(screen: &InventoryScreen, slot: usize) -> Vec2 {
        screen.slot_position(slot).unwrap()
    }

    #[test]
    fn test_gamepad_drag_cancelled_by_panel_close() {
        let mut screen = stocked();
        let mut scene = RecordingScene::default();
        open(&mut screen, &mut scene);
        let before = screen.inventory().store().slots().to_vec();
        let view_before = screen.views().view(2).unwrap().clone();

        pad(&mut screen, &mut scene, InputEvent::Navigate(Some(2)));
        pad(&mut screen, &mut scene, InputEvent::ActionDown);
        screen.update(0.3);
        assert!(screen.drag().is_dragging());
        assert_eq!(
            screen.views().view(2).unwrap().icon_parent,
            IconParent::Floating
        );
        pad(&mut screen, &mut scene, InputEvent::Navigate(Some(8)));

        pad(&mut screen, &mut scene, InputEvent::ToggleInventory);

        assert!(screen.drag().is_idle());
        assert_eq!(screen.inventory().store().slots(), &before[..]);
        assert_eq!(screen.views().view(2).unwrap(), &view_before);
        assert!(!screen.tooltip().is_visible());
        screen.update(0.5);
        assert!(screen.panel().is_closed());
    }

    #[test]
    fn test_pointer_and_gamepad_converge() {
        let mut by_mouse = stocked();
        let mut by_pad = stocked();
        let mut scene = RecordingScene::default();
        open(&mut by_mouse, &mut scene);
        open(&mut by_pad, &mut scene);

        let (from, to) = (pos(&by_mouse, 0), pos(&by_mouse, 12));
        mouse(&mut by_mouse, &mut scene, InputEvent::PointerDragStart(from));
        mouse(&mut by_mouse, &mut scene, InputEvent::PointerMove(to));
        mouse(&mut by_mouse, &mut scene, InputEvent::PointerDrop(to));

        pad(&mut by_pad, &mut scene, InputEvent::Navigate(Some(0)));
        pad(&mut by_pad, &mut scene, InputEvent::ActionDown);
        by_pad.update(0.3);
        pad(&mut by_pad, &mut scene, InputEvent::Navigate(Some(12)));
        pad(&mut by_pad, &mut scene, InputEvent::ActionUp);

        assert_eq!(by_mouse.inventory().store().item_at(12).unwrap().id, "shovel");
        assert_eq!(
            by_mouse.inventory().store().slots(),
            by_pad.inventory().store().slots()
        );
        assert_eq!(by_mouse.views().views(), by_pad.views().views());
        let swaps = |s: &mut InventoryScreen| {
            s.drain_events()
                .into_iter()
                .filter(|e| matches!(e, InventoryEvent::Swapped { .. }))
                .count()
        };
        assert_eq!(swaps(&mut by_mouse), 1);
        assert_eq!(swaps(&mut by_pad), 1);
    }

    #[test]
    fn test_pointer_merge_onto_stack() {
        let (mut screen, catalog) = screen();
        let moss = catalog.get("moss").unwrap();
        let mut scene = RecordingScene::default();
        screen.add_item(&moss, 10);
        screen.add_item(&moss, 3);
        screen.add_item(&catalog.get("stone").unwrap(), 1);
        open(&mut screen, &mut scene);

        // slot 1 holds 3 moss; slot 0 is full so the drop swaps
        let (from, to) = (pos(&screen, 1), pos(&screen, 0));
        mouse(&mut screen, &mut scene, InputEvent::PointerDragStart(from));
        mouse(&mut screen, &mut scene, InputEvent::PointerDrop(to));
        assert_eq!(screen.inventory().store().get(0).unwrap().quantity(), 3);

        // back again: 10 onto 3 fills to 10 and leaves 3 behind
        let (from, to) = (pos(&screen, 1), pos(&screen, 0));
        mouse(&mut screen, &mut scene, InputEvent::PointerDragStart(from));
        mouse(&mut screen, &mut scene, InputEvent::PointerDrop(to));
        assert_eq!(screen.inventory().store().get(0).unwrap().quantity(), 10);
        assert_eq!(screen.inventory().store().get(1).unwrap().quantity(), 3);
        assert!(screen.drain_events().contains(&InventoryEvent::Merged {
            source: 1,
            target: 0,
            amount: 7
        }));
    }

    #[test]
    fn test_pointer_drop_outside_grid_cancels() {
        let mut screen = stocked();
        let mut scene = RecordingScene::default();
        open(&mut screen, &mut scene);
        let before = screen.inventory().store().slots().to_vec();

        let from = pos(&screen, 1);
        mouse(&mut screen, &mut scene, InputEvent::PointerDragStart(from));
        mouse(&mut screen, &mut scene, InputEvent::PointerDrop(Vec2::new(-50.0, -50.0)));

        assert_eq!(screen.inventory().store().slots(), &before[..]);
        assert_eq!(screen.views().view(1).unwrap().icon_parent, IconParent::Slot(1));
    }

    #[test]
    fn test_hotbar_cycles_favorites() {
        let mut screen = stocked();
        let mut scene = RecordingScene::default();
        open(&mut screen, &mut scene);
        // slot 1 (lantern) to quick-slot 0, slot 0 (shovel) to quick-slot 1
        for (slot, presses) in [(0, 2), (1, 1)] {
            pad(&mut screen, &mut scene, InputEvent::Navigate(Some(slot)));
            pad(&mut screen, &mut scene, InputEvent::ActionDown);
            pad(&mut screen, &mut scene, InputEvent::ActionUp);
            for _ in 0..presses {
                pad(
                    &mut screen,
                    &mut scene,
                    InputEvent::MenuSelect(ContextAction::Favorite),
                );
            }
            pad(&mut screen, &mut scene, InputEvent::Cancel);
        }
        pad(&mut screen, &mut scene, InputEvent::Cancel);
        screen.update(0.5);
        assert!(screen.panel().is_closed());

        pad(&mut screen, &mut scene, InputEvent::Dpad(Vec2::X));
        assert_eq!(screen.inventory().equipped_slot(), Some(1));
        pad(&mut screen, &mut scene, InputEvent::Dpad(Vec2::X)); // latched
        assert_eq!(screen.inventory().equipped_slot(), Some(1));
        pad(&mut screen, &mut scene, InputEvent::Dpad(Vec2::ZERO));
        pad(&mut screen, &mut scene, InputEvent::Dpad(Vec2::X));
        assert_eq!(screen.inventory().equipped_slot(), Some(0));
        assert_eq!(scene.live.len(), 1);

        pad(&mut screen, &mut scene, InputEvent::Dpad(Vec2::ZERO));
        pad(&mut screen, &mut scene, InputEvent::Dpad(-Vec2::Y));
        assert_eq!(screen.inventory().equipped_slot(), None);
        assert!(scene.live.is_empty());

        mouse(&mut screen, &mut scene, InputEvent::HotbarKey(1));
        assert_eq!(screen.inventory().equipped_slot(), Some(1));
        assert_eq!(scene.spawned.last().unwrap().hold_anim.as_deref(), Some("IsHoldingLantern"));
    }

    #[test]
    fn test_tap_opens_menu_and_cancel_order() {
        let mut screen = stocked();
        let mut scene = RecordingScene::default();
        open(&mut screen, &mut scene);

        pad(&mut screen, &mut scene, InputEvent::Navigate(Some(2)));
        pad(&mut screen, &mut scene, InputEvent::ActionDown);
        screen.update(0.1);
        pad(&mut screen, &mut scene, InputEvent::ActionUp);
        assert_eq!(screen.menu().slot(), Some(2));
        assert_eq!(screen.tooltip().text(), "Moss");

        // slot interaction is off while the menu is up
        pad(&mut screen, &mut scene, InputEvent::ActionDown);
        assert!(screen.drag().is_idle());

        pad(&mut screen, &mut scene, InputEvent::Cancel);
        assert!(!screen.menu().is_open());
        assert_eq!(screen.focus(), Some(2));
        assert!(screen.panel().is_open(PanelKind::Inventory));

        pad(&mut screen, &mut scene, InputEvent::Cancel);
        assert!(!screen.panel().is_open(PanelKind::Inventory));
    }

    #[test]
    fn test_navigate_closes_menu_without_restoring() {
        let mut screen = stocked();
        let mut scene = RecordingScene::default();
        open(&mut screen, &mut scene);

        let at = pos(&screen, 3);
        mouse(&mut screen, &mut scene, InputEvent::PointerSecondaryClick(at));
        assert_eq!(screen.menu().slot(), Some(3));

        pad(&mut screen, &mut scene, InputEvent::Navigate(Some(7)));
        assert!(!screen.menu().is_open());
        assert_eq!(screen.focus(), Some(7));
    }

    #[test]
    fn test_menu_drop_spawns_in_front() {
        let mut screen = stocked();
        let mut scene = RecordingScene::default();
        open(&mut screen, &mut scene);
        screen.set_player_pose(PlayerPose {
            position: Vec3::new(10.0, 0.0, 0.0),
            forward: Vec3::X,
        });

        let at = pos(&screen, 2);
        mouse(&mut screen, &mut scene, InputEvent::PointerSecondaryClick(at));
        mouse(&mut screen, &mut scene, InputEvent::MenuSelect(ContextAction::Drop));

        assert_eq!(scene.drops.len(), 1);
        assert_eq!(scene.drops[0].quantity, 5);
        let at = scene.drops[0].pose.position;
        assert!((at.x - 11.5).abs() <= 0.5);
        assert!((at.y - 0.25).abs() < 1e-6);
        assert!(screen.inventory().store().get(2).unwrap().is_empty());
        assert!(!screen.views().view(2).unwrap().icon_visible);
    }

    #[test]
    fn test_external_open_interrupts_inventory() {
        let mut screen = stocked();
        let mut scene = RecordingScene::default();
        open(&mut screen, &mut scene);
        screen.drain_notifications();

        pad(&mut screen, &mut scene, InputEvent::Navigate(Some(1)));
        pad(&mut screen, &mut scene, InputEvent::ActionDown);
        screen.update(0.3);
        assert!(screen.drag().is_dragging());

        let mut bed = InteractableSite::new("bed", Vec3::ZERO, Interactable::Bed);
        screen.interact(&mut bed);

        assert!(screen.drag().is_idle());
        assert_eq!(screen.views().view(1).unwrap().icon_parent, IconParent::Slot(1));
        assert!(matches!(screen.panel().state(), PanelState::Closing { .. }));

        screen.update(0.5);
        assert!(screen.panel().is_open(PanelKind::Bed));
        assert_eq!(
            screen.drain_notifications(),
            vec![
                PanelNotification::ClosingStarted(PanelKind::Inventory),
                PanelNotification::Closed(PanelKind::Inventory),
                PanelNotification::OpeningStarted(PanelKind::Bed),
                PanelNotification::Opened(PanelKind::Bed),
            ]
        );
    }

    #[test]
    fn test_scheme_switch_cancels_drag() {
        let mut screen = stocked();
        let mut scene = RecordingScene::default();
        open(&mut screen, &mut scene);

        let from = pos(&screen, 0);
        mouse(&mut screen, &mut scene, InputEvent::PointerDragStart(from));
        assert!(screen.drag().is_dragging());

        pad(&mut screen, &mut scene, InputEvent::Navigate(Some(5)));
        assert!(screen.drag().is_idle());
        assert_eq!(screen.active_scheme(), ControlScheme::Gamepad);
        assert_eq!(screen.views().view(0).unwrap().icon_parent, IconParent::Slot(0));
    }

    #[test]
    fn test_focus_restored_on_reopen() {
        let mut screen = stocked();
        let mut scene = RecordingScene::default();
        open(&mut screen, &mut scene);
        pad(&mut screen, &mut scene, InputEvent::Navigate(Some(14)));

        pad(&mut screen, &mut scene, InputEvent::Cancel);
        screen.update(0.5);
        pad(&mut screen, &mut scene, InputEvent::Navigate(None));
        pad(&mut screen, &mut scene, InputEvent::ToggleInventory);

        assert_eq!(screen.focus(), Some(14));
    }

    #[test]
    fn test_toggle_ignored_mid_transition() {
        let mut screen = stocked();
        let mut scene = RecordingScene::default();

        mouse(&mut screen, &mut scene, InputEvent::ToggleInventory);
        screen.update(0.2);
        mouse(&mut screen, &mut scene, InputEvent::ToggleInventory);

        assert!(matches!(screen.panel().state(), PanelState::Opening { .. }));
        screen.update(0.3);
        assert!(screen.panel().is_open(PanelKind::Inventory));
    }

    #[test]
    fn test_try_pickup_consumes_only_on_full_add() {
        let config = GravekeepConfig {
            inventory: crate::config::InventoryConfig { columns: 1, rows: 1 },
            ..Default::default()
        };
        let mut screen = InventoryScreen::new(&config, StdRng::seed_from_u64(1));
        let catalog = ItemCatalog::with_defaults();
        let moss = catalog.get("moss").unwrap();
        let mut world = vec![
            WorldItem {
                id: WorldItemId(1),
                item: moss.clone(),
                quantity: 6,
                position: Vec3::new(0.0, 0.0, 1.0),
            },
            WorldItem {
                id: WorldItemId(2),
                item: moss,
                quantity: 6,
                position: Vec3::new(0.0, 0.0, 2.0),
            },
        ];

        let change = screen.update_targeting(&world).unwrap();
        assert_eq!(change.current, Some(WorldItemId(1)));
        assert!(screen.try_pickup(&mut world));
        assert_eq!(world.len(), 1);

        screen.update_targeting(&world);
        assert!(!screen.try_pickup(&mut world));
        assert_eq!(world.len(), 1);
        assert_eq!(screen.inventory().store().count_item("moss"), 10);
    }

    #[test]
    fn test_reorder_result_matches_inventory_api() {
        let mut screen = stocked();
        let mut scene = RecordingScene::default();
        open(&mut screen, &mut scene);
        let mut direct = screen.inventory().clone();

        let action = direct.reorder(3, 2);
        pad(&mut screen, &mut scene, InputEvent::Navigate(Some(3)));
        pad(&mut screen, &mut scene, InputEvent::ActionDown);
        screen.update(0.5);
        pad(&mut screen, &mut scene, InputEvent::Navigate(Some(2)));
        pad(&mut screen, &mut scene, InputEvent::ActionUp);

        assert_eq!(action, ReorderAction::Swap);
        assert_eq!(screen.inventory().store().slots(), direct.store().slots());
    }

    #[test]
    fn test_hold_follows_focus_before_lift() {
        let mut screen = stocked();
        let mut scene = RecordingScene::default();
        open(&mut screen, &mut scene);
        let before = screen.inventory().store().slots().to_vec();

        pad(&mut screen, &mut scene, InputEvent::Navigate(Some(0)));
        pad(&mut screen, &mut scene, InputEvent::ActionDown);
        pad(&mut screen, &mut scene, InputEvent::Navigate(Some(2)));
        screen.update(0.3);
        assert_eq!(screen.drag().source(), Some(2));
        assert!(screen.views().view(2).unwrap().is_detached());
        assert!(!screen.views().view(0).unwrap().is_detached());

        pad(&mut screen, &mut scene, InputEvent::ActionUp);
        assert!(screen.drag().is_idle());
        assert_eq!(screen.inventory().store().slots(), &before[..]);
        assert!(!screen.menu().is_open());
    }

    #[test]
    fn test_remove_item_closes_menu_on_slot() {
        let mut screen = stocked();
        let mut scene = RecordingScene::default();
        open(&mut screen, &mut scene);

        let at = pos(&screen, 3);
        mouse(&mut screen, &mut scene, InputEvent::PointerSecondaryClick(at));
        assert_eq!(screen.menu().slot(), Some(3));
        assert!(screen.tooltip().is_pinned());

        let removed = screen.remove_item(3, &mut scene);
        assert_eq!(removed.map(|(item, n)| (item.id.clone(), n)), Some(("candle".to_string(), 3)));
        assert!(!screen.menu().is_open());
        assert!(!screen.tooltip().is_visible());
        assert!(!screen.tooltip().is_pinned());
        assert!(screen.inventory().store().get(3).unwrap().is_empty());
        assert!(!screen.views().view(3).unwrap().icon_visible);
        assert!(screen.inventory().is_consistent());
    }

    #[test]
    fn test_remove_item_cancels_drag_from_slot() {
        let mut screen = stocked();
        let mut scene = RecordingScene::default();
        open(&mut screen, &mut scene);

        let from = pos(&screen, 1);
        mouse(&mut screen, &mut scene, InputEvent::PointerDragStart(from));
        assert!(screen.drag().is_dragging());

        assert!(screen.remove_item(1, &mut scene).is_some());
        assert!(screen.drag().is_idle());
        assert_eq!(screen.views().view(1).unwrap().icon_parent, IconParent::Slot(1));
        assert!(!screen.views().view(1).unwrap().icon_visible);

        // the drop that follows has nothing left to commit
        let to = pos(&screen, 0);
        mouse(&mut screen, &mut scene, InputEvent::PointerDrop(to));
        assert_eq!(screen.inventory().store().item_at(0).unwrap().id, "shovel");
        assert!(screen.inventory().store().get(1).unwrap().is_empty());
        assert!(screen.remove_item(1, &mut scene).is_none());
    }

    #[test]
    fn test_secondary_click_during_drag_opens_menu() {
        let mut screen = stocked();
        let mut scene = RecordingScene::default();
        open(&mut screen, &mut scene);
        let before = screen.inventory().store().slots().to_vec();

        let from = pos(&screen, 0);
        mouse(&mut screen, &mut scene, InputEvent::PointerDragStart(from));
        assert!(screen.drag().is_dragging());

        let at = pos(&screen, 2);
        mouse(&mut screen, &mut scene, InputEvent::PointerSecondaryClick(at));
        assert!(screen.drag().is_idle());
        assert_eq!(screen.views().view(0).unwrap().icon_parent, IconParent::Slot(0));
        assert_eq!(screen.menu().slot(), Some(2));
        assert_eq!(screen.inventory().store().slots(), &before[..]);
    }
}
