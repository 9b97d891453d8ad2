//! Slot renderers and the grid they sit in

use glam::Vec2;
use gravekeep_inventory::{Slot, SlotStore};
use serde::{Deserialize, Serialize};

/// Screen layout of the slot grid
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GridLayout {
    pub columns: usize,
    pub rows: usize,
    /// Top-left corner of slot 0
    pub origin: Vec2,
    pub cell_size: Vec2,
    pub spacing: Vec2,
}

impl Default for GridLayout {
    fn default() -> Self {
        Self {
            columns: 10,
            rows: 3,
            origin: Vec2::new(40.0, 40.0),
            cell_size: Vec2::splat(64.0),
            spacing: Vec2::splat(8.0),
        }
    }
}

impl GridLayout {
    pub fn new(columns: usize, rows: usize) -> Self {
        Self {
            columns,
            rows,
            ..Default::default()
        }
    }

    pub fn len(&self) -> usize {
        self.columns * self.rows
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Centre of a slot cell
    pub fn anchor(&self, index: usize) -> Option<Vec2> {
        if index >= self.len() {
            return None;
        }
        let column = (index % self.columns) as f32;
        let row = (index / self.columns) as f32;
        let step = self.cell_size + self.spacing;
        Some(self.origin + Vec2::new(column * step.x, row * step.y) + self.cell_size * 0.5)
    }

    /// Slot under a screen position. The gaps between cells hit nothing.
    pub fn hit_test(&self, position: Vec2) -> Option<usize> {
        let local = position - self.origin;
        if local.x < 0.0 || local.y < 0.0 {
            return None;
        }
        let step = self.cell_size + self.spacing;
        let column = (local.x / step.x) as usize;
        let row = (local.y / step.y) as usize;
        if column >= self.columns || row >= self.rows {
            return None;
        }
        let inside = local - Vec2::new(column as f32 * step.x, row as f32 * step.y);
        if inside.x > self.cell_size.x || inside.y > self.cell_size.y {
            return None;
        }
        Some(row * self.columns + column)
    }
}

/// Where a slot's icon is attached
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IconParent {
    /// Child of its own slot cell
    Slot(usize),
    /// Lifted to the panel root and following a drag cursor
    Floating,
}

/// What one slot renderer currently shows
#[derive(Debug, Clone, PartialEq)]
pub struct SlotView {
    pub index: usize,
    pub icon: String,
    pub icon_visible: bool,
    /// Quantity label, only for stacks of two or more
    pub quantity_text: Option<String>,
    pub icon_parent: IconParent,
    /// Offset from the parent's anchor
    pub icon_offset: Vec2,
}

impl SlotView {
    fn new(index: usize) -> Self {
        Self {
            index,
            icon: String::new(),
            icon_visible: false,
            quantity_text: None,
            icon_parent: IconParent::Slot(index),
            icon_offset: Vec2::ZERO,
        }
    }

    fn show(&mut self, slot: &Slot) {
        match slot.item() {
            Some(item) => {
                self.icon.clone_from(&item.icon);
                self.icon_visible = true;
            }
            None => {
                self.icon.clear();
                self.icon_visible = false;
            }
        }
        self.quantity_text = (slot.quantity() > 1).then(|| slot.quantity().to_string());
    }

    fn reattach(&mut self) {
        self.icon_parent = IconParent::Slot(self.index);
        self.icon_offset = Vec2::ZERO;
    }

    pub fn is_detached(&self) -> bool {
        self.icon_parent == IconParent::Floating
    }
}

/// Proof that an icon was lifted off its slot; hand it back to
/// [`SlotViews::restore`] to put the icon back.
#[derive(Debug, PartialEq, Eq)]
pub struct DetachedIcon {
    slot: usize,
}

impl DetachedIcon {
    pub fn slot(&self) -> usize {
        self.slot
    }
}

/// All slot renderers of the inventory panel
#[derive(Debug, Clone)]
pub struct SlotViews {
    layout: GridLayout,
    views: Vec<SlotView>,
    /// Screen position of the floating icon, if any
    floating_at: Vec2,
}

impl SlotViews {
    pub fn new(layout: GridLayout) -> Self {
        Self {
            views: (0..layout.len()).map(SlotView::new).collect(),
            layout,
            floating_at: Vec2::ZERO,
        }
    }

    pub fn layout(&self) -> &GridLayout {
        &self.layout
    }

    pub fn view(&self, index: usize) -> Option<&SlotView> {
        self.views.get(index)
    }

    pub fn views(&self) -> &[SlotView] {
        &self.views
    }

    /// Redraw every slot from the store and put every icon back on its slot
    pub fn refresh(&mut self, store: &SlotStore) {
        for view in &mut self.views {
            match store.get(view.index) {
                Some(slot) => view.show(slot),
                None => view.show(&Slot::empty()),
            }
            view.reattach();
        }
    }

    /// Lift the icon of `index` so it can follow a cursor
    pub fn detach(&mut self, index: usize) -> Option<DetachedIcon> {
        let anchor = self.layout.anchor(index)?;
        let view = self.views.get_mut(index)?;
        if !view.icon_visible || view.is_detached() {
            return None;
        }
        view.icon_parent = IconParent::Floating;
        view.icon_offset = Vec2::ZERO;
        self.floating_at = anchor;
        log::debug!("Detached icon of slot {}", index);
        Some(DetachedIcon { slot: index })
    }

    /// Move the floating icon
    pub fn follow(&mut self, icon: &DetachedIcon, position: Vec2) {
        if self.views.get(icon.slot).map(SlotView::is_detached).unwrap_or(false) {
            self.floating_at = position;
        }
    }

    /// Screen position of the floating icon
    pub fn floating_position(&self) -> Option<Vec2> {
        self.views
            .iter()
            .any(SlotView::is_detached)
            .then_some(self.floating_at)
    }

    /// Put a lifted icon back under its slot with no offset
    pub fn restore(&mut self, icon: DetachedIcon) {
        if let Some(view) = self.views.get_mut(icon.slot) {
            view.reattach();
            log::debug!("Restored icon of slot {}", icon.slot);
        }
    }
}
