//! Fixed-size slot grid

use crate::item::ItemRef;
use crate::slot::Slot;
use crate::stacking::{self, AddPlan};

/// Ordered, fixed-length collection of slots (`columns × rows`).
///
/// The store is created once per session and never resized. Index identity is
/// what favorites and the equipped slot refer to. Every operation on an
/// out-of-range or empty index is a silent no-op.
#[derive(Debug, Clone)]
pub struct SlotStore {
    slots: Vec<Slot>,
    columns: usize,
    rows: usize,
}

impl SlotStore {
    /// Create an empty grid
    pub fn new(columns: usize, rows: usize) -> Self {
        Self {
            slots: vec![Slot::empty(); columns * rows],
            columns,
            rows,
        }
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.iter().all(Slot::is_empty)
    }

    pub fn columns(&self) -> usize {
        self.columns
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    /// Get slot contents
    pub fn get(&self, index: usize) -> Option<&Slot> {
        self.slots.get(index)
    }

    /// Get the item in a slot, if any
    pub fn item_at(&self, index: usize) -> Option<&ItemRef> {
        self.get(index)?.item()
    }

    /// Check the slot exists and holds something
    pub fn is_occupied(&self, index: usize) -> bool {
        self.get(index).map(|s| !s.is_empty()).unwrap_or(false)
    }

    pub fn slots(&self) -> &[Slot] {
        &self.slots
    }

    /// Find first empty slot
    pub fn first_empty(&self) -> Option<usize> {
        self.slots.iter().position(Slot::is_empty)
    }

    /// Get number of used slots
    pub fn used_slots(&self) -> usize {
        self.slots.iter().filter(|s| !s.is_empty()).count()
    }

    /// Check if every slot is occupied
    pub fn is_full(&self) -> bool {
        self.first_empty().is_none()
    }

    /// Count total quantity of an item
    pub fn count_item(&self, item_id: &str) -> u32 {
        self.slots
            .iter()
            .filter(|s| s.item().map(|i| i.id == item_id).unwrap_or(false))
            .map(Slot::quantity)
            .sum()
    }

    /// Occupied slots with their indices
    pub fn items(&self) -> impl Iterator<Item = (usize, &Slot)> {
        self.slots.iter().enumerate().filter(|(_, s)| !s.is_empty())
    }

    /// Add units of an item, committing as much as fits.
    ///
    /// The returned plan has already been applied; a non-zero `leftover`
    /// means the store ran out of room partway. Units placed before that are
    /// kept.
    pub fn add_item(&mut self, item: &ItemRef, amount: u32) -> AddPlan {
        let plan = stacking::plan_add(&self.slots, item, amount);
        for placement in &plan.placements {
            let slot = &mut self.slots[placement.slot];
            let rest = if placement.fresh {
                slot.fill(item, placement.amount)
            } else {
                slot.add(placement.amount)
            };
            debug_assert_eq!(rest, 0);
        }
        plan
    }

    /// Exchange two slots' full contents
    pub fn swap(&mut self, a: usize, b: usize) -> bool {
        if a == b || a >= self.len() || b >= self.len() {
            return false;
        }
        self.slots.swap(a, b);
        true
    }

    /// Move as many units as fit from `source` onto `target`.
    ///
    /// Only applies when both hold the same stackable item. Returns the units
    /// moved; a source that runs dry is cleared, a partial leftover stays put.
    pub fn merge(&mut self, source: usize, target: usize) -> u32 {
        if source == target {
            return 0;
        }
        let (Some(src), Some(dst)) = (self.slots.get(source), self.slots.get(target)) else {
            return 0;
        };
        let Some(amount) = stacking::merge_amount(src, dst) else {
            return 0;
        };
        self.slots[source].remove(amount);
        self.slots[target].add(amount);
        amount
    }

    /// Move a single unit into the first empty slot.
    ///
    /// Requires at least two units at `index`. Returns the slot that received
    /// the unit.
    pub fn split(&mut self, index: usize) -> Option<usize> {
        let slot = self.slots.get(index)?;
        if slot.quantity() < 2 {
            return None;
        }
        let item = slot.item()?.clone();
        let empty = self.first_empty()?;
        self.slots[index].remove(1);
        self.slots[empty].fill(&item, 1);
        Some(empty)
    }

    /// Clear a slot, returning its contents
    pub fn take(&mut self, index: usize) -> Option<(ItemRef, u32)> {
        self.slots.get_mut(index)?.take()
    }

    #[cfg(test)]
    pub(crate) fn slots_mut(&mut self) -> &mut [Slot] {
        &mut self.slots
    }

    /// Check the slot invariant across the whole grid
    pub fn is_consistent(&self) -> bool {
        self.slots.iter().all(Slot::is_consistent)
    }
}

impl Default for SlotStore {
    fn default() -> Self {
        Self::new(10, 3)
    }
}
