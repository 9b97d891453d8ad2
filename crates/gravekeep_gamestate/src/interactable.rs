//! World objects the player can interact with

use crate::panel::PanelKind;
use glam::Vec3;

/// Kinds of interactable objects
#[derive(Debug, Clone, PartialEq)]
pub enum Interactable {
    Bed,
    Phone,
    InfoBoard,
    Door { open: bool },
}

/// What an interaction asks the game to do
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InteractionEffect {
    OpenPanel(PanelKind),
    /// Door flipped to the given open state
    ToggleDoor { open: bool },
}

impl Interactable {
    /// Prompt text for the interaction
    pub fn prompt(&self) -> &'static str {
        match self {
            Self::Bed => "Sleep",
            Self::Phone => "Use phone",
            Self::InfoBoard => "Read",
            Self::Door { open: true } => "Close",
            Self::Door { open: false } => "Open",
        }
    }

    /// Run the interaction
    pub fn interact(&mut self) -> InteractionEffect {
        match self {
            Self::Bed => InteractionEffect::OpenPanel(PanelKind::Bed),
            Self::Phone => InteractionEffect::OpenPanel(PanelKind::Phone),
            Self::InfoBoard => InteractionEffect::OpenPanel(PanelKind::InfoBoard),
            Self::Door { open } => {
                *open = !*open;
                InteractionEffect::ToggleDoor { open: *open }
            }
        }
    }
}

/// An interactable placed in the world
#[derive(Debug, Clone, PartialEq)]
pub struct InteractableSite {
    pub name: String,
    pub position: Vec3,
    pub interactable: Interactable,
}

impl InteractableSite {
    pub fn new(name: impl Into<String>, position: Vec3, interactable: Interactable) -> Self {
        Self {
            name: name.into(),
            position,
            interactable,
        }
    }
}

/// Index of the closest site within `range` of `from`
pub fn closest(sites: &[InteractableSite], from: Vec3, range: f32) -> Option<usize> {
    sites
        .iter()
        .enumerate()
        .map(|(index, site)| (index, site.position.distance(from)))
        .filter(|(_, distance)| *distance <= range)
        .min_by(|a, b| a.1.total_cmp(&b.1))
        .map(|(index, _)| index)
}
