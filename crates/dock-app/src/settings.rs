// Settings persistence: dock tuning stored separately from the layout record.
// Uses the platform config dir, e.g. ~/.config/spine-dock/settings.json on Linux.

use dock_core::{Rect, ZoneThresholds, DEFAULT_EDGE_TOLERANCE};
use dock_input::Classifier;
use dock_layout::STANDARD_SPLIT_TARGETS;
use serde::{Deserialize, Serialize};

use crate::config;
use crate::persist::DEFAULT_STORAGE_KEY;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DockSettings {
    #[serde(default)]
    pub zones: ZoneSettings,
    /// Pixel tolerance when comparing panel edges.
    #[serde(default = "default_tolerance")]
    pub edge_tolerance: f32,
    #[serde(default)]
    pub window: WindowSettings,
    /// Thickness of the resize grips straddling panel borders.
    #[serde(default = "default_grip")]
    pub grip_size: f32,
    #[serde(default = "default_storage_key")]
    pub storage_key: String,
    /// Panels that accept edge drops. Center drops work on every panel.
    #[serde(default = "default_split_targets")]
    pub split_targets: Vec<String>,
}

fn default_tolerance() -> f32 {
    DEFAULT_EDGE_TOLERANCE
}

fn default_grip() -> f32 {
    6.0
}

fn default_storage_key() -> String {
    DEFAULT_STORAGE_KEY.to_string()
}

fn default_split_targets() -> Vec<String> {
    STANDARD_SPLIT_TARGETS.iter().map(|s| s.to_string()).collect()
}

impl Default for DockSettings {
    fn default() -> Self {
        Self {
            zones: ZoneSettings::default(),
            edge_tolerance: default_tolerance(),
            window: WindowSettings::default(),
            grip_size: default_grip(),
            storage_key: default_storage_key(),
            split_targets: default_split_targets(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ZoneSettings {
    #[serde(default = "default_edge_fraction")]
    pub edge_fraction: f32,
    #[serde(default = "default_center_fraction")]
    pub center_fraction: f32,
}

fn default_edge_fraction() -> f32 {
    ZoneThresholds::default().edge_fraction
}

fn default_center_fraction() -> f32 {
    ZoneThresholds::default().center_fraction
}

impl Default for ZoneSettings {
    fn default() -> Self {
        Self {
            edge_fraction: default_edge_fraction(),
            center_fraction: default_center_fraction(),
        }
    }
}

/// Geometry of the headless surface used by the CLI.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WindowSettings {
    #[serde(default = "default_width")]
    pub width: f32,
    #[serde(default = "default_height")]
    pub height: f32,
    #[serde(default = "default_header_height")]
    pub panel_header_height: f32,
}

fn default_width() -> f32 {
    1600.0
}

fn default_height() -> f32 {
    1000.0
}

fn default_header_height() -> f32 {
    28.0
}

impl Default for WindowSettings {
    fn default() -> Self {
        Self {
            width: default_width(),
            height: default_height(),
            panel_header_height: default_header_height(),
        }
    }
}

impl WindowSettings {
    pub fn bounds(&self) -> Rect {
        Rect::new(0.0, 0.0, self.width, self.height)
    }
}

impl DockSettings {
    pub fn classifier(&self) -> Classifier {
        Classifier::new(
            ZoneThresholds {
                edge_fraction: self.zones.edge_fraction,
                center_fraction: self.zones.center_fraction,
            },
            self.edge_tolerance,
        )
    }
}

const SETTINGS_FILE: &str = "settings.json";

pub fn load_settings() -> DockSettings {
    config::config_path(SETTINGS_FILE)
        .and_then(|path| config::read_json(&path))
        .unwrap_or_default()
}

pub fn save_settings(settings: &DockSettings) {
    match config::config_path(SETTINGS_FILE) {
        Some(path) => {
            config::write_json(&path, settings);
        }
        None => log::warn!("Cannot determine settings path"),
    }
}
