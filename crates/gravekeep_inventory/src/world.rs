//! Items in the world: drop placement, world pickups and pickup targeting

use crate::item::ItemRef;
use glam::{Quat, Vec3};
use rand::Rng;
use serde::{Deserialize, Serialize};

/// Position and rotation for a spawned object
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpawnPose {
    pub position: Vec3,
    pub rotation: Quat,
}

impl SpawnPose {
    pub fn at(position: Vec3) -> Self {
        Self {
            position,
            rotation: Quat::IDENTITY,
        }
    }
}

impl Default for SpawnPose {
    fn default() -> Self {
        Self::at(Vec3::ZERO)
    }
}

/// Where dropped items land relative to the player
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DropPlacement {
    /// Distance in front of the player
    pub forward_distance: f32,
    /// Height above the player's feet
    pub height: f32,
    /// Max horizontal scatter on X and Z
    pub jitter: f32,
}

impl Default for DropPlacement {
    fn default() -> Self {
        Self {
            forward_distance: 1.5,
            height: 0.25,
            jitter: 0.5,
        }
    }
}

impl DropPlacement {
    /// Pose for a drop in front of `origin` looking along `forward`
    pub fn pose(&self, origin: Vec3, forward: Vec3, rng: &mut impl Rng) -> SpawnPose {
        let base = origin + forward.normalize_or_zero() * self.forward_distance + Vec3::Y * self.height;
        let scatter = if self.jitter > 0.0 {
            Vec3::new(
                rng.gen_range(-self.jitter..self.jitter),
                0.0,
                rng.gen_range(-self.jitter..self.jitter),
            )
        } else {
            Vec3::ZERO
        };
        SpawnPose::at(base + scatter)
    }
}

/// World item identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct WorldItemId(pub u64);

/// An item lying in the world, waiting to be picked up
#[derive(Debug, Clone)]
pub struct WorldItem {
    pub id: WorldItemId,
    pub item: ItemRef,
    pub quantity: u32,
    pub position: Vec3,
}

/// Highlight moved from one world item to another
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TargetChange {
    /// Name tag to hide
    pub previous: Option<WorldItemId>,
    /// Name tag to show
    pub current: Option<WorldItemId>,
}

/// Picks the world item the player would pick up
#[derive(Debug, Clone)]
pub struct PickupTargeting {
    /// Max distance from the viewer
    pub range: f32,
    /// Max angle from the view direction, in degrees
    pub angle: f32,
    current: Option<WorldItemId>,
}

impl PickupTargeting {
    pub fn new(range: f32, angle: f32) -> Self {
        Self {
            range,
            angle,
            current: None,
        }
    }

    pub fn current(&self) -> Option<WorldItemId> {
        self.current
    }

    /// Re-evaluate the target: the closest item in range and inside the view
    /// cone. Returns a change only when the target differs from last time.
    pub fn select(&mut self, eye: Vec3, forward: Vec3, items: &[WorldItem]) -> Option<TargetChange> {
        let forward = forward.normalize_or_zero();
        let best = items
            .iter()
            .filter_map(|candidate| {
                let offset = candidate.position - eye;
                let dist = offset.length();
                if dist > self.range {
                    return None;
                }
                let angle = forward.angle_between(offset.normalize_or_zero()).to_degrees();
                (angle < self.angle).then_some((candidate.id, dist))
            })
            .min_by(|a, b| a.1.total_cmp(&b.1))
            .map(|(id, _)| id);

        if best == self.current {
            return None;
        }
        let change = TargetChange {
            previous: self.current,
            current: best,
        };
        self.current = best;
        Some(change)
    }

    /// Forget the target (it was picked up or despawned)
    pub fn clear(&mut self) {
        self.current = None;
    }
}

impl Default for PickupTargeting {
    fn default() -> Self {
        Self::new(3.0, 60.0)
    }
}
