//! Stacking policy
//!
//! Pure decisions about where incoming units go and what a reorder does.
//! Nothing here mutates; [`SlotStore`](crate::store::SlotStore) applies the
//! results.

use crate::item::{same_item, ItemDefinition};
use crate::slot::Slot;

/// Units assigned to one slot by an add
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Placement {
    pub slot: usize,
    pub amount: u32,
    /// True when the slot was empty before this placement
    pub fresh: bool,
}

/// Result of planning an add
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AddPlan {
    /// Placements in the order they are applied
    pub placements: Vec<Placement>,
    /// Units that found no room
    pub leftover: u32,
}

impl AddPlan {
    /// Total units placed
    pub fn placed(&self) -> u32 {
        self.placements.iter().map(|p| p.amount).sum()
    }

    /// Whether every unit found a slot
    pub fn is_complete(&self) -> bool {
        self.leftover == 0
    }
}

/// Plan where `amount` units of `item` go.
///
/// Stackable items top up existing compatible stacks in index order first.
/// Whatever remains goes into empty slots in index order, each up to the
/// stack limit. Running out of room is not an error: the plan simply reports
/// the leftover.
pub fn plan_add(slots: &[Slot], item: &ItemDefinition, amount: u32) -> AddPlan {
    let mut plan = AddPlan::default();
    let mut remaining = amount;

    if item.is_stackable() {
        for (index, slot) in slots.iter().enumerate() {
            if remaining == 0 {
                break;
            }
            if slot.holds(item) {
                let take = slot.space_remaining().min(remaining);
                if take > 0 {
                    plan.placements.push(Placement {
                        slot: index,
                        amount: take,
                        fresh: false,
                    });
                    remaining -= take;
                }
            }
        }
    }

    let limit = item.stack_limit();
    for (index, slot) in slots.iter().enumerate() {
        if remaining == 0 {
            break;
        }
        if slot.is_empty() {
            let take = remaining.min(limit);
            plan.placements.push(Placement {
                slot: index,
                amount: take,
                fresh: true,
            });
            remaining -= take;
        }
    }

    plan.leftover = remaining;
    plan
}

/// Units a merge from `source` into `target` would move, if a merge applies
pub fn merge_amount(source: &Slot, target: &Slot) -> Option<u32> {
    let (src_item, dst_item) = (source.item()?, target.item()?);
    if !src_item.is_stackable() || !same_item(src_item, dst_item) {
        return None;
    }
    let amount = source.quantity().min(target.space_remaining());
    (amount > 0).then_some(amount)
}

/// What committing a reorder from one slot onto another does
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReorderAction {
    /// Nothing to move (empty source, same slot, or out of range)
    None,
    /// Move `amount` units onto the target stack
    Merge { amount: u32 },
    /// Exchange the two slots' contents
    Swap,
}

/// Merge when the target holds the same stackable item with room to spare,
/// otherwise swap.
pub fn resolve_reorder(source: &Slot, target: &Slot) -> ReorderAction {
    if source.is_empty() {
        return ReorderAction::None;
    }
    match merge_amount(source, target) {
        Some(amount) => ReorderAction::Merge { amount },
        None => ReorderAction::Swap,
    }
}
