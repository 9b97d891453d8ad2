//! Gravekeep headless session
//!
//! Runs a scripted inventory session against a recording scene and logs
//! what happened. Useful for checking a config file without a game build.
//!
//! Run with: cargo run -p gravekeep_runtime
//!       or: GRAVEKEEP_CONFIG=my.toml cargo run --bin gravekeep

use glam::{Vec2, Vec3};
use gravekeep_gamestate::{Interactable, InteractableSite, PanelKind};
use gravekeep_hud::ContextAction;
use gravekeep_input::{InputEvent, TaggedInput};
use gravekeep_inventory::{RecordingScene, WorldItem, WorldItemId};
use gravekeep_runtime::{GravekeepConfig, InventoryScreen, ItemCatalog, PlayerPose};
use rand::rngs::StdRng;
use rand::SeedableRng;

/// Fixed frame step for the scripted session
const FRAME: f32 = 1.0 / 60.0;

fn main() {
    // Initialize logging
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = GravekeepConfig::load();
    config.print_summary();

    let catalog = ItemCatalog::from_config(&config.items);
    log::info!("Item catalog: {}", catalog.ids().join(", "));

    let mut screen = InventoryScreen::new(&config, StdRng::from_entropy());
    let mut scene = RecordingScene::default();

    gather(&mut screen, &catalog);
    arrange(&mut screen, &mut scene);
    hotbar(&mut screen, &mut scene);
    rest(&mut screen, &mut scene);

    let store = screen.inventory().store();
    log::info!(
        "Session done: {}/{} slots used, {} held visual(s) live, {} world drop(s)",
        store.used_slots(),
        store.len(),
        scene.live.len(),
        scene.drops.len()
    );
    for event in screen.drain_events() {
        log::debug!("{:?}", event);
    }
}

/// Run frames until `seconds` have passed
fn advance(screen: &mut InventoryScreen, seconds: f32) {
    let mut elapsed = 0.0;
    while elapsed < seconds {
        screen.update(FRAME);
        elapsed += FRAME;
    }
}

/// Walk a path of world items and pick up everything in view
fn gather(screen: &mut InventoryScreen, catalog: &ItemCatalog) {
    let mut world: Vec<WorldItem> = ["shovel", "lantern", "moss", "moss", "candle"]
        .iter()
        .enumerate()
        .filter_map(|(i, id)| {
            Some(WorldItem {
                id: WorldItemId(i as u64),
                item: catalog.get(id)?,
                quantity: if *id == "moss" { 7 } else { 1 },
                position: Vec3::new(0.0, 0.0, 2.0 * i as f32 + 1.0),
            })
        })
        .collect();

    let mut step = 0.0;
    while !world.is_empty() && step < 20.0 {
        screen.set_player_pose(PlayerPose {
            position: Vec3::new(0.0, 0.0, step),
            forward: Vec3::Z,
        });
        if let Some(change) = screen.update_targeting(&world) {
            log::debug!("Pickup target: {:?} -> {:?}", change.previous, change.current);
        }
        if !screen.try_pickup(&mut world) {
            step += 1.0;
        }
    }
    if !world.is_empty() {
        log::warn!("{} world item(s) left behind", world.len());
    }
}

/// Open the inventory, reorder with both schemes and favorite the tools
fn arrange(screen: &mut InventoryScreen, scene: &mut RecordingScene) {
    screen.handle_input(TaggedInput::pointer(InputEvent::ToggleInventory), scene);
    advance(screen, transition_time(screen));

    // pointer: move the shovel to the end of the first row
    if let (Some(from), Some(to)) = (screen.slot_position(0), screen.slot_position(9)) {
        for event in [
            InputEvent::PointerDragStart(from),
            InputEvent::PointerMove(from.lerp(to, 0.5)),
            InputEvent::PointerMove(to),
            InputEvent::PointerDrop(to),
        ] {
            screen.handle_input(TaggedInput::pointer(event), scene);
        }
    }

    // gamepad: hold on the lantern and carry it next to the shovel
    for event in [InputEvent::Navigate(Some(1)), InputEvent::ActionDown] {
        screen.handle_input(TaggedInput::gamepad(event), scene);
    }
    advance(screen, 0.5);
    for event in [InputEvent::Navigate(Some(8)), InputEvent::ActionUp] {
        screen.handle_input(TaggedInput::gamepad(event), scene);
    }

    // tap each tool and favorite it once
    for slot in [9, 8] {
        for event in [
            InputEvent::Navigate(Some(slot)),
            InputEvent::ActionDown,
            InputEvent::ActionUp,
            InputEvent::MenuSelect(ContextAction::Favorite),
        ] {
            screen.handle_input(TaggedInput::gamepad(event), scene);
        }
        if let Some(label) = screen.menu().favorite_label() {
            log::info!("Slot {}: {}", slot, label);
        }
        screen.handle_input(TaggedInput::gamepad(InputEvent::Cancel), scene);
    }

    // drop the candles from the context menu
    let candle = screen
        .inventory()
        .store()
        .items()
        .find(|(_, slot)| slot.item().map(|i| i.id == "candle").unwrap_or(false))
        .map(|(index, _)| index);
    if let Some(candle) = candle.and_then(|index| screen.slot_position(index)) {
        for event in [
            InputEvent::PointerSecondaryClick(candle),
            InputEvent::MenuSelect(ContextAction::Drop),
        ] {
            screen.handle_input(TaggedInput::pointer(event), scene);
        }
    }

    screen.handle_input(TaggedInput::gamepad(InputEvent::Cancel), scene);
    advance(screen, transition_time(screen));
}

/// Cycle through the favorites with the D-pad, then put everything away
fn hotbar(screen: &mut InventoryScreen, scene: &mut RecordingScene) {
    for dpad in [Vec2::X, Vec2::ZERO, Vec2::X, Vec2::ZERO, -Vec2::Y, Vec2::ZERO] {
        screen.handle_input(TaggedInput::gamepad(InputEvent::Dpad(dpad)), scene);
        if let Some(item) = screen.inventory().equipped_item_definition() {
            log::info!("Holding {}", item.name);
        }
    }
    screen.handle_input(TaggedInput::pointer(InputEvent::HotbarKey(1)), scene);
}

/// Open the inventory, then get into bed while it is still up
fn rest(screen: &mut InventoryScreen, scene: &mut RecordingScene) {
    let mut sites = vec![
        InteractableSite::new("bed", Vec3::new(1.0, 0.0, 0.0), Interactable::Bed),
        InteractableSite::new("gate", Vec3::new(0.0, 0.0, -6.0), Interactable::Door { open: false }),
    ];
    let position = Vec3::ZERO;
    screen.set_player_pose(PlayerPose {
        position,
        forward: Vec3::X,
    });

    screen.handle_input(TaggedInput::pointer(InputEvent::ToggleInventory), scene);
    advance(screen, transition_time(screen));

    if let Some(index) = gravekeep_gamestate::closest(&sites, position, 2.0) {
        let site = &mut sites[index];
        log::info!("{}: {}", site.name, site.interactable.prompt());
        screen.interact(site);
    }
    advance(screen, transition_time(screen));
    log::info!("Bed open: {}", screen.panel().is_open(PanelKind::Bed));
    for notification in screen.drain_notifications() {
        log::debug!("{:?}", notification);
    }

    screen.interrupt();
    advance(screen, transition_time(screen));
}

/// Time a full inventory transition takes, plus a frame
fn transition_time(screen: &InventoryScreen) -> f32 {
    screen.panel().blend_for(PanelKind::Inventory) + FRAME
}
