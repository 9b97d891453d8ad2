//! Item name tooltip

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Tooltip placement
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TooltipStyle {
    /// Offset from the hovered slot's anchor
    pub offset: Vec2,
}

impl Default for TooltipStyle {
    fn default() -> Self {
        Self {
            offset: Vec2::new(50.0, 50.0),
        }
    }
}

/// Shows the name of the hovered or selected item.
///
/// Presentation only: it never touches slot data. While pinned (a context
/// menu is open) hover exits do not hide it.
#[derive(Debug, Clone, Default)]
pub struct TooltipPresenter {
    style: TooltipStyle,
    visible: bool,
    text: String,
    position: Vec2,
    pinned: bool,
}

impl TooltipPresenter {
    pub fn new(style: TooltipStyle) -> Self {
        Self {
            style,
            ..Default::default()
        }
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    /// Screen position, already offset from the anchor
    pub fn position(&self) -> Vec2 {
        self.position
    }

    pub fn is_pinned(&self) -> bool {
        self.pinned
    }

    /// Show `text` next to `anchor`. An empty name hides the tooltip.
    pub fn show(&mut self, text: &str, anchor: Vec2) {
        if self.pinned {
            return;
        }
        self.place(text, anchor);
    }

    /// Hover left the slot
    pub fn hide(&mut self) {
        if !self.pinned {
            self.visible = false;
        }
    }

    /// Follow a moving target without changing the text
    pub fn track(&mut self, anchor: Vec2) {
        if self.visible {
            self.position = anchor + self.style.offset;
        }
    }

    /// Show `text` and keep it up until [`unpin`](Self::unpin)
    pub fn pin(&mut self, text: &str, anchor: Vec2) {
        self.place(text, anchor);
        self.pinned = true;
    }

    pub fn unpin(&mut self) {
        self.pinned = false;
        self.visible = false;
    }

    /// Hide regardless of pinning (panel closing)
    pub fn force_hide(&mut self) {
        self.pinned = false;
        self.visible = false;
        self.text.clear();
    }

    fn place(&mut self, text: &str, anchor: Vec2) {
        if text.is_empty() {
            self.visible = false;
            return;
        }
        self.text.clear();
        self.text.push_str(text);
        self.position = anchor + self.style.offset;
        self.visible = true;
    }
}
