//! Runtime configuration
//!
//! # Configuration Sources (in priority order)
//!
//! 1. Environment variables: `GRAVEKEEP_DRAG_THRESHOLD`, `GRAVEKEEP_BLEND_TIME`
//! 2. Config file named by `GRAVEKEEP_CONFIG`
//! 3. First of `gravekeep.toml`, `config/gravekeep.toml`
//! 4. Built-in defaults
//!
//! # Example Config File
//!
//! ```toml
//! [inventory]
//! columns = 10
//! rows = 3
//!
//! [panel]
//! camera_blend_time = 0.5
//!
//! [input]
//! drag_threshold = 0.25
//! stick_deadzone = 0.1
//! dpad_threshold = 0.5
//!
//! [tooltip]
//! offset = [50.0, 50.0]
//!
//! [[items]]
//! id = "moss"
//! name = "Moss"
//! stackable = true
//! max_stack = 10
//! ```

use gravekeep_hud::{ContextMenuStyle, TooltipStyle};
use gravekeep_input::HotbarSettings;
use gravekeep_inventory::{DropPlacement, ItemDefinition, PickupTargeting};
use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

/// Configuration errors
#[derive(Debug, Error)]
pub enum ConfigError {
    /// File could not be read
    #[error("IO error reading {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    /// File is not valid TOML for this config
    #[error("Parse error: {0}")]
    Parse(#[from] toml::de::Error),
    /// Values parse but make no sense
    #[error("Invalid config: {0}")]
    Invalid(String),
}

/// Slot grid size
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct InventoryConfig {
    pub columns: usize,
    pub rows: usize,
}

impl Default for InventoryConfig {
    fn default() -> Self {
        Self { columns: 10, rows: 3 }
    }
}

impl InventoryConfig {
    pub fn slot_count(&self) -> usize {
        self.columns * self.rows
    }
}

/// Panel transitions
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PanelConfig {
    /// Inventory camera blend, in seconds
    pub camera_blend_time: f32,
}

impl Default for PanelConfig {
    fn default() -> Self {
        Self {
            camera_blend_time: 0.5,
        }
    }
}

/// Input tuning
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct InputConfig {
    /// Gamepad hold time before a drag starts, in seconds
    pub drag_threshold: f32,
    pub stick_deadzone: f32,
    pub dpad_threshold: f32,
}

impl Default for InputConfig {
    fn default() -> Self {
        Self {
            drag_threshold: 0.25,
            stick_deadzone: 0.1,
            dpad_threshold: 0.5,
        }
    }
}

impl InputConfig {
    pub fn hotbar_settings(&self) -> HotbarSettings {
        HotbarSettings {
            dpad_threshold: self.dpad_threshold,
            deadzone: self.stick_deadzone,
        }
    }
}

/// World pickup targeting
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PickupConfig {
    pub range: f32,
    /// View cone half-angle, in degrees
    pub angle: f32,
}

impl Default for PickupConfig {
    fn default() -> Self {
        Self {
            range: 3.0,
            angle: 60.0,
        }
    }
}

impl PickupConfig {
    pub fn targeting(&self) -> PickupTargeting {
        PickupTargeting::new(self.range, self.angle)
    }
}

/// Complete runtime configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct GravekeepConfig {
    pub inventory: InventoryConfig,
    pub panel: PanelConfig,
    pub input: InputConfig,
    pub tooltip: TooltipStyle,
    pub context_menu: ContextMenuStyle,
    pub drop: DropPlacement,
    pub pickup: PickupConfig,
    /// Item catalog entries; merged over the built-in items
    pub items: Vec<ItemDefinition>,
    /// Config file path (for reloading)
    #[serde(skip)]
    pub config_path: Option<String>,
}

impl GravekeepConfig {
    /// Load configuration from all sources, falling back to defaults
    pub fn load() -> Self {
        let mut config = Self::default();

        // 1. Config file: explicit path first, then the well-known ones
        let explicit = std::env::var("GRAVEKEEP_CONFIG").ok().filter(|p| !p.is_empty());
        let candidates: Vec<String> = explicit
            .into_iter()
            .chain(["gravekeep.toml", "config/gravekeep.toml"].map(String::from))
            .collect();

        for path in &candidates {
            if !Path::new(path).exists() {
                continue;
            }
            match Self::load_from_file(path) {
                Ok(loaded) => {
                    config = loaded;
                    config.config_path = Some(path.clone());
                    log::info!("Loaded config from {}", path);
                    break;
                }
                Err(e) => log::warn!("Ignoring config {}: {}", path, e),
            }
        }

        // 2. Override with environment variables
        if let Some(threshold) = env_f32("GRAVEKEEP_DRAG_THRESHOLD") {
            config.input.drag_threshold = threshold;
            log::info!("Drag threshold from env: {}", threshold);
        }

        if let Some(blend) = env_f32("GRAVEKEEP_BLEND_TIME") {
            config.panel.camera_blend_time = blend;
            log::info!("Camera blend time from env: {}", blend);
        }

        config
    }

    /// Load configuration from a TOML file
    pub fn load_from_file(path: &str) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_string(),
            source,
        })?;
        Self::from_toml_str(&content)
    }

    /// Parse and validate a TOML document
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Reject values the runtime cannot work with
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.inventory.slot_count() == 0 {
            return Err(ConfigError::Invalid(format!(
                "inventory grid {}x{} has no slots",
                self.inventory.columns, self.inventory.rows
            )));
        }
        if self.input.drag_threshold < 0.0 || self.panel.camera_blend_time < 0.0 {
            return Err(ConfigError::Invalid(
                "durations must not be negative".to_string(),
            ));
        }
        let drop = self.drop;
        if ![drop.forward_distance, drop.height, drop.jitter]
            .iter()
            .all(|v| v.is_finite())
            || drop.jitter < 0.0
        {
            return Err(ConfigError::Invalid(format!(
                "drop placement must be finite with jitter >= 0 (jitter = {})",
                drop.jitter
            )));
        }
        if let Some(item) = self.items.iter().find(|i| i.id.is_empty()) {
            return Err(ConfigError::Invalid(format!(
                "item '{}' has an empty id",
                item.name
            )));
        }
        Ok(())
    }

    /// Print configuration summary
    pub fn print_summary(&self) {
        log::info!("Gravekeep Configuration:");
        log::info!(
            "  Inventory: {}x{} ({} slots)",
            self.inventory.columns,
            self.inventory.rows,
            self.inventory.slot_count()
        );
        log::info!("  Camera blend: {}s", self.panel.camera_blend_time);
        log::info!(
            "  Drag threshold: {}s, deadzone: {}, D-pad: {}",
            self.input.drag_threshold,
            self.input.stick_deadzone,
            self.input.dpad_threshold
        );
        log::info!("  Pickup: range={}, angle={}", self.pickup.range, self.pickup.angle);
        if !self.items.is_empty() {
            log::info!("  Items: {} from config", self.items.len());
        }
        if let Some(path) = &self.config_path {
            log::info!("  Config: {}", path);
        }
    }
}

fn env_f32(name: &str) -> Option<f32> {
    let value = std::env::var(name).ok()?;
    match value.parse::<f32>() {
        Ok(v) if v >= 0.0 => Some(v),
        _ => {
            log::warn!("Ignoring {}={}", name, value);
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec2;
    use gravekeep_inventory::{EquipHand, ItemCategory};

    #[test]
    fn test_default_config() {
        let config = GravekeepConfig::default();

        assert_eq!(config.inventory.slot_count(), 30);
        assert_eq!(config.panel.camera_blend_time, 0.5);
        assert_eq!(config.input.drag_threshold, 0.25);
        assert_eq!(config.tooltip.offset, Vec2::new(50.0, 50.0));
        assert_eq!(config.context_menu.offset, Vec2::new(10.0, -10.0));
        assert_eq!(config.drop.forward_distance, 1.5);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_parse_sections() {
        let config = GravekeepConfig::from_toml_str(
            r#"
            [inventory]
            columns = 5
            rows = 2

            [input]
            drag_threshold = 0.4

            [context_menu]
            offset = [0.0, 12.0]
            "#,
        )
        .unwrap();

        assert_eq!(config.inventory.slot_count(), 10);
        assert_eq!(config.input.drag_threshold, 0.4);
        assert_eq!(config.input.dpad_threshold, 0.5);
        assert_eq!(config.context_menu.offset, Vec2::new(0.0, 12.0));
        assert_eq!(config.panel.camera_blend_time, 0.5);
    }

    #[test]
    fn test_parse_items() {
        let config = GravekeepConfig::from_toml_str(
            r#"
            [[items]]
            id = "trowel"
            name = "Trowel"
            category = "tool"
            hand = "left"
            world_prefab = "trowel_world"
            grip_position = [0.0, 0.05, 0.1]
            can_use = true
            can_favorite = true

            [[items]]
            id = "bones"
            name = "Bones"
            stackable = true
            max_stack = 6
            "#,
        )
        .unwrap();

        assert_eq!(config.items.len(), 2);
        let trowel = &config.items[0];
        assert_eq!(trowel.category, ItemCategory::Tool);
        assert_eq!(trowel.hand, EquipHand::Left);
        assert!(trowel.is_favoritable());
        assert!(trowel.can_drop);
        assert_eq!(config.items[1].stack_limit(), 6);
    }

    #[test]
    fn test_invalid_grid() {
        let err = GravekeepConfig::from_toml_str("[inventory]\nrows = 0\n").unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));
    }

    #[test]
    fn test_invalid_drop_jitter() {
        let err = GravekeepConfig::from_toml_str("[drop]\njitter = inf\n").unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));
        let err = GravekeepConfig::from_toml_str("[drop]\njitter = -0.5\n").unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));
        assert!(GravekeepConfig::from_toml_str("[drop]\njitter = 0.0\n").is_ok());
    }

    #[test]
    fn test_parse_error() {
        let err = GravekeepConfig::from_toml_str("[inventory\n").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn test_missing_file() {
        let err = GravekeepConfig::load_from_file("/nonexistent/gravekeep.toml").unwrap_err();
        assert!(err.to_string().contains("/nonexistent/gravekeep.toml"));
    }
}
