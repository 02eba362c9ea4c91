use anyhow::{Context, Result};
use std::{fs, path::PathBuf, sync::RwLock};

use crate::zone::{Zone, MIN_ZONE_SIZE};

const ENABLE_LOGS: bool = true;
use crate::{log_info, log_warn};

/// File-backed store for the shelf zone rectangle.
///
/// Loads the persisted `{x, y, w, h}` document at startup if present and
/// saves it back on explicit request. A missing or malformed file falls back
/// to the built-in default zone; width/height are floored at the minimum so
/// a hand-edited config can't produce a degenerate rectangle.
pub struct ZoneStore {
    path: PathBuf,
    data: RwLock<Zone>,
}

impl ZoneStore {
    pub fn new(path: PathBuf) -> Result<Self> {
        let data = if path.exists() {
            let contents = fs::read_to_string(&path)
                .with_context(|| format!("Failed to read zone config from {}", path.display()))?;
            match serde_json::from_str::<Zone>(&contents) {
                Ok(zone) => {
                    let zone = sanitize(zone);
                    log_info!("Loaded zone config from {}: {:?}", path.display(), zone);
                    zone
                }
                Err(err) => {
                    log_warn!(
                        "Ignoring malformed zone config at {}: {err}",
                        path.display()
                    );
                    Zone::default()
                }
            }
        } else {
            Zone::default()
        };

        Ok(Self {
            path,
            data: RwLock::new(data),
        })
    }

    pub fn zone(&self) -> Zone {
        *self.data.read().unwrap()
    }

    pub fn update_zone(&self, zone: Zone) {
        let mut guard = self.data.write().unwrap();
        *guard = zone;
    }

    /// Persist the current zone. Called on explicit operator action, not on
    /// every edit.
    pub fn save(&self) -> Result<()> {
        let zone = *self.data.read().unwrap();
        let serialized = serde_json::to_string_pretty(&zone)?;
        fs::write(&self.path, serialized)
            .with_context(|| format!("Failed to write zone config to {}", self.path.display()))?;
        log_info!("Saved zone config to {}: {:?}", self.path.display(), zone);
        Ok(())
    }
}

fn sanitize(mut zone: Zone) -> Zone {
    zone.w = zone.w.max(MIN_ZONE_SIZE);
    zone.h = zone.h.max(MIN_ZONE_SIZE);
    zone
}
