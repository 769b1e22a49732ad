// JSON files under the platform config dir, e.g. ~/.config/spine-dock/ on Linux.

use std::path::{Path, PathBuf};

use serde::de::DeserializeOwned;
use serde::Serialize;

const APP_DIR: &str = "spine-dock";

pub fn config_path(file: &str) -> Option<PathBuf> {
    let config_dir = dirs::config_dir()?;
    Some(config_dir.join(APP_DIR).join(file))
}

/// Read `path` as JSON. A missing file is `None`; a file that does not parse
/// is logged and also `None`.
pub fn read_json<T: DeserializeOwned>(path: &Path) -> Option<T> {
    let data = std::fs::read_to_string(path).ok()?;
    match serde_json::from_str(&data) {
        Ok(value) => Some(value),
        Err(e) => {
            log::warn!("Failed to parse {}: {}", path.display(), e);
            None
        }
    }
}

/// Write `value` to `path` as pretty JSON, creating the parent directory.
pub fn write_json<T: Serialize + ?Sized>(path: &Path, value: &T) -> bool {
    if let Some(parent) = path.parent() {
        if let Err(e) = std::fs::create_dir_all(parent) {
            log::error!("Failed to create config dir {}: {}", parent.display(), e);
            return false;
        }
    }

    let json = match serde_json::to_string_pretty(value) {
        Ok(json) => json,
        Err(e) => {
            log::error!("Failed to serialize {}: {}", path.display(), e);
            return false;
        }
    };
    match std::fs::write(path, json) {
        Ok(()) => true,
        Err(e) => {
            log::error!("Failed to write {}: {}", path.display(), e);
            false
        }
    }
}
