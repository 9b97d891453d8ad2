//! A single inventory cell

use crate::item::{same_item, ItemDefinition, ItemRef};

/// One addressable inventory cell holding zero or one stack.
///
/// `quantity == 0` exactly when `item` is `None`; every mutator below keeps
/// that true, which is why the fields are private.
#[derive(Debug, Clone, Default)]
pub struct Slot {
    item: Option<ItemRef>,
    quantity: u32,
}

impl Slot {
    /// An empty slot
    pub fn empty() -> Self {
        Self::default()
    }

    /// A slot holding `quantity` units of `item`; zero units yields an empty slot
    pub fn with_item(item: ItemRef, quantity: u32) -> Self {
        if quantity == 0 {
            Self::empty()
        } else {
            Self {
                item: Some(item),
                quantity,
            }
        }
    }

    pub fn item(&self) -> Option<&ItemRef> {
        self.item.as_ref()
    }

    pub fn quantity(&self) -> u32 {
        self.quantity
    }

    pub fn is_empty(&self) -> bool {
        self.item.is_none()
    }

    /// Check whether this slot holds `item`
    pub fn holds(&self, item: &ItemDefinition) -> bool {
        self.item.as_ref().map(|i| same_item(i, item)).unwrap_or(false)
    }

    /// Units that still fit on top of the current stack
    pub fn space_remaining(&self) -> u32 {
        match &self.item {
            Some(item) => item.stack_limit().saturating_sub(self.quantity),
            None => 0,
        }
    }

    /// Place `amount` units of `item` into an empty slot, clamped to the
    /// stack limit. Returns the units that did not fit.
    pub(crate) fn fill(&mut self, item: &ItemRef, amount: u32) -> u32 {
        debug_assert!(self.is_empty());
        let placed = amount.min(item.stack_limit());
        if placed > 0 {
            self.item = Some(item.clone());
            self.quantity = placed;
        }
        amount - placed
    }

    /// Add to the existing stack (returns overflow)
    pub(crate) fn add(&mut self, amount: u32) -> u32 {
        let to_add = amount.min(self.space_remaining());
        self.quantity += to_add;
        amount - to_add
    }

    /// Remove units (returns amount actually removed); clears the slot at zero
    pub(crate) fn remove(&mut self, amount: u32) -> u32 {
        let removed = amount.min(self.quantity);
        self.quantity -= removed;
        if self.quantity == 0 {
            self.item = None;
        }
        removed
    }

    /// Empty the slot, returning what it held
    pub(crate) fn take(&mut self) -> Option<(ItemRef, u32)> {
        let quantity = std::mem::take(&mut self.quantity);
        self.item.take().map(|item| (item, quantity))
    }

    /// `quantity == 0 ⇔ item is empty`
    pub fn is_consistent(&self) -> bool {
        (self.quantity == 0) == self.item.is_none()
    }
}

impl PartialEq for Slot {
    fn eq(&self, other: &Self) -> bool {
        self.quantity == other.quantity
            && match (&self.item, &other.item) {
                (Some(a), Some(b)) => same_item(a, b),
                (None, None) => true,
                _ => false,
            }
    }
}
