//! Scene collaborator seams
//!
//! The inventory never creates scene objects itself. Held visuals and world
//! drops are requested through these traits; the host game decides what a
//! prefab is and where hand anchors live.

use crate::item::{EquipHand, ItemDefinition, ItemRef};
use crate::world::SpawnPose;
use glam::{Quat, Vec3};
use thiserror::Error;

/// Handle to a held visual owned by the scene
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct VisualId(pub u64);

/// Failures when spawning a held visual
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SpawnError {
    /// No anchor transform for the requested hand
    #[error("no hand anchor for {0:?} hand")]
    MissingAnchor(EquipHand),
    /// Scene does not know the prefab
    #[error("prefab not found: {0}")]
    MissingPrefab(String),
}

/// Everything the scene needs to build a held visual
#[derive(Debug, Clone, PartialEq)]
pub struct HeldVisualRequest {
    pub item_id: String,
    pub prefab: String,
    pub hand: EquipHand,
    /// Offset from the hand anchor
    pub local_position: Vec3,
    pub local_rotation: Quat,
    /// Held visuals are cosmetic: no rigid body, no collider
    pub strip_physics: bool,
    /// Animator flag to raise while held
    pub hold_anim: Option<String>,
}

impl HeldVisualRequest {
    /// Build a request for `item`, or `None` if it has no usable prefab
    pub fn for_item(item: &ItemDefinition) -> Option<Self> {
        let prefab = item.held_prefab()?;
        Some(Self {
            item_id: item.id.clone(),
            prefab: prefab.to_string(),
            hand: item.hand,
            local_position: item.grip_position,
            local_rotation: item.grip_quat(),
            strip_physics: true,
            hold_anim: item.hold_anim.clone(),
        })
    }
}

/// An item leaving the inventory into the world
#[derive(Debug, Clone)]
pub struct WorldDrop {
    pub item: ItemRef,
    pub quantity: u32,
    pub pose: SpawnPose,
}

/// Spawns and destroys the object shown in the character's hand
pub trait HeldVisualSpawner {
    fn spawn_held(&mut self, request: &HeldVisualRequest) -> Result<VisualId, SpawnError>;
    fn despawn_held(&mut self, visual: VisualId);
}

/// Receives items dropped out of the inventory
pub trait WorldDropSink {
    fn spawn_dropped(&mut self, drop: WorldDrop);
}

/// Both collaborator roles together
pub trait Scene: HeldVisualSpawner + WorldDropSink {}

impl<T: HeldVisualSpawner + WorldDropSink> Scene for T {}

/// Headless scene that records every request instead of building objects.
///
/// Used by the scripted runtime session and by tests.
#[derive(Debug, Default)]
pub struct RecordingScene {
    pub next_id: u64,
    /// Held visuals not yet despawned
    pub live: Vec<VisualId>,
    pub spawned: Vec<HeldVisualRequest>,
    pub drops: Vec<WorldDrop>,
    /// Pretend the character has no hand anchors
    pub missing_anchor: bool,
}

impl HeldVisualSpawner for RecordingScene {
    fn spawn_held(&mut self, request: &HeldVisualRequest) -> Result<VisualId, SpawnError> {
        if self.missing_anchor {
            return Err(SpawnError::MissingAnchor(request.hand));
        }
        self.next_id += 1;
        let id = VisualId(self.next_id);
        log::debug!("Spawned held '{}' as {:?}", request.prefab, id);
        self.live.push(id);
        self.spawned.push(request.clone());
        Ok(id)
    }

    fn despawn_held(&mut self, visual: VisualId) {
        log::debug!("Despawned {:?}", visual);
        self.live.retain(|v| *v != visual);
    }
}

impl WorldDropSink for RecordingScene {
    fn spawn_dropped(&mut self, drop: WorldDrop) {
        log::debug!(
            "Dropped {} x '{}' at {}",
            drop.quantity,
            drop.item.id,
            drop.pose.position
        );
        self.drops.push(drop);
    }
}
