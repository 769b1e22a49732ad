// Layout persistence: one named snapshot in a key-value store.
// A record is either a preset name or a full template; restore falls back to
// the default preset and leaves a bad record where it is.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use dock_core::KeyValueStore;
use dock_layout::{LayoutDescription, LayoutError, LayoutRegistry};
use serde::{Deserialize, Serialize};

use crate::applier::check_fit;
use crate::config;
use crate::registry::PanelRegistry;

pub const DEFAULT_STORAGE_KEY: &str = "spine-editor-layout";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum LayoutRecord {
    Preset {
        preset: String,
    },
    Template {
        areas: Vec<String>,
        columns: String,
        rows: String,
    },
}

impl LayoutRecord {
    /// A preset record when `layout` is exactly a registered preset.
    pub fn capture(layout: &LayoutDescription, presets: &LayoutRegistry) -> Self {
        match presets.name_of(layout) {
            Some(name) => LayoutRecord::Preset {
                preset: name.to_string(),
            },
            None => LayoutRecord::Template {
                areas: layout.area_lines(),
                columns: layout.columns_template(),
                rows: layout.rows_template(),
            },
        }
    }

    pub fn resolve(&self, presets: &LayoutRegistry) -> Result<LayoutDescription, LayoutError> {
        match self {
            LayoutRecord::Preset { preset } => presets
                .get(preset)
                .cloned()
                .ok_or_else(|| LayoutError::UnknownPreset(preset.clone())),
            LayoutRecord::Template {
                areas,
                columns,
                rows,
            } => LayoutDescription::from_template(areas, columns, rows),
        }
    }
}

// ──────────────────────────────────────────────
// Persister
// ──────────────────────────────────────────────

#[derive(Debug, Clone)]
pub struct Persister {
    key: String,
}

impl Persister {
    pub fn new(key: &str) -> Self {
        Self {
            key: key.to_string(),
        }
    }

    pub fn save(
        &self,
        store: &mut dyn KeyValueStore,
        layout: &LayoutDescription,
        presets: &LayoutRegistry,
    ) -> bool {
        let record = LayoutRecord::capture(layout, presets);
        match serde_json::to_string(&record) {
            Ok(json) => store.set(&self.key, &json),
            Err(e) => {
                log::error!("Failed to serialize layout: {}", e);
                false
            }
        }
    }

    /// The stored layout, if there is one that parses and fits `panels`.
    /// Anything else is logged and yields `None`; the record is kept.
    pub fn load(
        &self,
        store: &dyn KeyValueStore,
        presets: &LayoutRegistry,
        panels: &PanelRegistry,
    ) -> Option<LayoutDescription> {
        let data = store.get(&self.key)?;
        let record: LayoutRecord = match serde_json::from_str(&data) {
            Ok(record) => record,
            Err(e) => {
                log::warn!("Stored layout is not readable: {}", e);
                return None;
            }
        };
        let layout = record
            .resolve(presets)
            .and_then(|layout| check_fit(&layout, panels).map(|_| layout));
        match layout {
            Ok(layout) => Some(layout),
            Err(e) => {
                log::warn!("Stored layout rejected: {}", e);
                None
            }
        }
    }

    pub fn clear(&self, store: &mut dyn KeyValueStore) {
        store.remove(&self.key);
    }
}

// ──────────────────────────────────────────────
// JsonFileStore
// ──────────────────────────────────────────────

/// Key-value store backed by one JSON object on disk. Every write rewrites
/// the file; I/O failures are logged and reported as `false`.
#[derive(Debug)]
pub struct JsonFileStore {
    path: PathBuf,
    entries: BTreeMap<String, String>,
}

pub fn storage_path() -> Option<PathBuf> {
    config::config_path("storage.json")
}

impl JsonFileStore {
    /// Open the store at `path`. A missing file is an empty store; an
    /// unreadable one is logged and treated as empty without being touched.
    pub fn open(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let entries = config::read_json(&path).unwrap_or_default();
        Self { path, entries }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn flush(&self) -> bool {
        config::write_json(&self.path, &self.entries)
    }
}

impl KeyValueStore for JsonFileStore {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: &str) -> bool {
        self.entries.insert(key.to_string(), value.to_string());
        self.flush()
    }

    fn remove(&mut self, key: &str) {
        if self.entries.remove(key).is_some() {
            self.flush();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use dock_core::{DropZone, MemoryStore, Rect};
    use dock_layout::{default_layout, mutate, RecipeTable};

    use crate::headless::{GridElement, Viewport};
    use crate::manifest::PANELS;

    fn panels() -> PanelRegistry {
        let vp = Viewport::shared(Rect::new(0.0, 0.0, 1600.0, 1000.0), 28.0);
        let mut panels = PanelRegistry::new();
        for spec in PANELS.iter() {
            panels.register(spec.id, Box::new(GridElement::new(vp.clone())), spec.dockable);
        }
        panels
    }

    #[test]
    fn preset_record_format() {
        let presets = LayoutRegistry::standard();
        let left = presets.get("left-stacked").unwrap();
        let record = LayoutRecord::capture(left, &presets);
        assert_eq!(
            serde_json::to_string(&record).unwrap(),
            r#"{"preset":"left-stacked"}"#
        );
    }

    #[test]
    fn custom_layout_saved_as_template() {
        let presets = LayoutRegistry::standard();
        let custom = mutate(
            &RecipeTable::standard(),
            &default_layout(),
            "timeline",
            "preview",
            DropZone::Top,
        )
        .unwrap();
        let record = LayoutRecord::capture(&custom, &presets);
        let LayoutRecord::Template { areas, .. } = &record else {
            panic!("expected a template record, got {:?}", record);
        };
        assert_eq!(areas, &custom.area_lines());
        assert_eq!(record.resolve(&presets), Ok(custom));
    }

    #[test]
    fn every_preset_round_trips_through_storage() {
        let presets = LayoutRegistry::standard();
        let panels = panels();
        let persister = Persister::new(DEFAULT_STORAGE_KEY);
        let mut store = MemoryStore::new();

        for name in presets.names() {
            let layout = presets.get(name).unwrap();
            assert!(persister.save(&mut store, layout, &presets));
            assert_eq!(persister.load(&store, &presets, &panels).as_ref(), Some(layout));
        }
    }

    #[test]
    fn custom_layout_round_trips_through_storage() {
        let presets = LayoutRegistry::standard();
        let panels = panels();
        let persister = Persister::new(DEFAULT_STORAGE_KEY);
        let mut store = MemoryStore::new();
        let custom = mutate(
            &RecipeTable::standard(),
            &default_layout(),
            "outliner",
            "properties",
            DropZone::Right,
        )
        .unwrap();

        persister.save(&mut store, &custom, &presets);
        assert_eq!(persister.load(&store, &presets, &panels), Some(custom));
    }

    #[test]
    fn bad_records_are_rejected_but_kept() {
        let presets = LayoutRegistry::standard();
        let panels = panels();
        let persister = Persister::new(DEFAULT_STORAGE_KEY);

        for bad in [
            "not json",
            r#"{"preset":"floating"}"#,
            r#"{"areas":["header header","outliner assets"],"columns":"1fr 1fr","rows":"60px 1fr"}"#,
            r#"{"areas":["a b","c"],"columns":"1fr 1fr","rows":"1fr 1fr"}"#,
            r#"{"areas":["header","outliner"],"columns":"1fr","rows":"60px 1fr"}"#,
        ] {
            let mut store = MemoryStore::new();
            store.set(DEFAULT_STORAGE_KEY, bad);
            assert_eq!(persister.load(&store, &presets, &panels), None, "{}", bad);
            assert_eq!(store.get(DEFAULT_STORAGE_KEY).as_deref(), Some(bad));
        }
    }

    #[test]
    fn clear_removes_record() {
        let presets = LayoutRegistry::standard();
        let persister = Persister::new("layout");
        let mut store = MemoryStore::new();
        persister.save(&mut store, &default_layout(), &presets);
        assert!(store.get("layout").is_some());
        persister.clear(&mut store);
        assert!(store.get("layout").is_none());
    }

    #[test]
    fn file_store_survives_reopen() {
        let dir = std::env::temp_dir().join(format!("spine-dock-test-{}", std::process::id()));
        let path = dir.join("storage.json");
        let _ = std::fs::remove_file(&path);

        let mut store = JsonFileStore::open(&path);
        assert!(store.set(DEFAULT_STORAGE_KEY, r#"{"preset":"default"}"#));

        let reopened = JsonFileStore::open(&path);
        assert_eq!(
            reopened.get(DEFAULT_STORAGE_KEY).as_deref(),
            Some(r#"{"preset":"default"}"#)
        );

        let _ = std::fs::remove_dir_all(&dir);
    }
}
