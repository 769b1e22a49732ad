// Named layout presets. Every preset keeps the fixed header row on top.

use crate::description::LayoutDescription;
use crate::track::Track;
use crate::LayoutError;

pub const DEFAULT_PRESET: &str = "default";

pub struct LayoutRegistry {
    presets: Vec<(String, LayoutDescription)>,
}

impl LayoutRegistry {
    /// An empty registry with only the default preset.
    pub fn new() -> Self {
        Self {
            presets: vec![(DEFAULT_PRESET.to_string(), default_layout())],
        }
    }

    /// The four built-in arrangements.
    pub fn standard() -> Self {
        let mut registry = Self::new();
        registry
            .presets
            .push(("left-stacked".to_string(), left_stacked_layout()));
        registry
            .presets
            .push(("right-stacked".to_string(), right_stacked_layout()));
        registry
            .presets
            .push(("both-stacked".to_string(), both_stacked_layout()));
        registry
    }

    pub fn get(&self, name: &str) -> Option<&LayoutDescription> {
        self.presets
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, layout)| layout)
    }

    pub fn default_layout(&self) -> &LayoutDescription {
        // The default entry is created in `new()` and never removed.
        self.get(DEFAULT_PRESET)
            .unwrap_or_else(|| &self.presets[0].1)
    }

    pub fn names(&self) -> Vec<&str> {
        self.presets.iter().map(|(n, _)| n.as_str()).collect()
    }

    /// Name of the preset equal to `layout`, if any.
    pub fn name_of(&self, layout: &LayoutDescription) -> Option<&str> {
        self.presets
            .iter()
            .find(|(_, l)| l == layout)
            .map(|(n, _)| n.as_str())
    }

    /// Add or replace a named layout after validating it. The default
    /// preset cannot be replaced.
    pub fn insert_custom(&mut self, name: &str, layout: LayoutDescription) -> Result<(), LayoutError> {
        layout.validate()?;
        if name == DEFAULT_PRESET {
            return Err(LayoutError::ReservedName(name.to_string()));
        }
        match self.presets.iter_mut().find(|(n, _)| n == name) {
            Some(entry) => entry.1 = layout,
            None => self.presets.push((name.to_string(), layout)),
        }
        Ok(())
    }
}

impl Default for LayoutRegistry {
    fn default() -> Self {
        Self::standard()
    }
}

// ──────────────────────────────────────────────
// Presets
// ──────────────────────────────────────────────

const HEADER_HEIGHT: f32 = 60.0;

fn timeline_height() -> Track {
    Track::var("--timeline-height", Track::Px(200.0))
}

pub fn default_layout() -> LayoutDescription {
    LayoutDescription::from_rows(
        &[
            "header header header",
            "outliner preview properties",
            "timeline timeline timeline",
        ],
        vec![
            Track::var("--outliner-width", Track::Px(300.0)),
            Track::Fr(1.0),
            Track::var("--properties-width", Track::Px(300.0)),
        ],
        vec![Track::Px(HEADER_HEIGHT), Track::Fr(1.0), timeline_height()],
    )
}

pub fn left_stacked_layout() -> LayoutDescription {
    LayoutDescription::from_rows(
        &[
            "header header header",
            "outliner preview preview",
            "properties preview preview",
            "timeline timeline timeline",
        ],
        vec![
            Track::var("--left-panels-width", Track::Px(300.0)),
            Track::Fr(1.0),
            Track::Auto,
        ],
        vec![
            Track::Px(HEADER_HEIGHT),
            Track::Fr(1.0),
            Track::Fr(1.0),
            timeline_height(),
        ],
    )
}

pub fn right_stacked_layout() -> LayoutDescription {
    LayoutDescription::from_rows(
        &[
            "header header header",
            "outliner outliner properties",
            "outliner outliner preview",
            "timeline timeline timeline",
        ],
        vec![
            Track::Fr(1.0),
            Track::Auto,
            Track::var("--right-panels-width", Track::Px(300.0)),
        ],
        vec![
            Track::Px(HEADER_HEIGHT),
            Track::Fr(1.0),
            Track::Fr(1.0),
            timeline_height(),
        ],
    )
}

pub fn both_stacked_layout() -> LayoutDescription {
    LayoutDescription::from_rows(
        &[
            "header header header",
            "outliner preview properties",
            "outliner timeline properties",
        ],
        vec![
            Track::var("--left-width", Track::Px(250.0)),
            Track::Fr(1.0),
            Track::var("--right-width", Track::Px(250.0)),
        ],
        vec![Track::Px(HEADER_HEIGHT), Track::Fr(1.0), timeline_height()],
    )
}
