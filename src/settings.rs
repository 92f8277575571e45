//! Player preferences
//!
//! Persisted separately from the high score as a JSON blob.

use serde::{Deserialize, Serialize};

use crate::persistence::KeyValueStore;
use crate::renderer::Palette;

/// Game settings/preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Brighter entity colors
    pub high_contrast: bool,
    /// Show FPS counter in the HUD
    pub show_fps: bool,
    /// Start in demo mode (the autopilot plays)
    pub autopilot: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            high_contrast: false,
            show_fps: false,
            autopilot: false,
        }
    }
}

impl Settings {
    /// Storage key
    const STORAGE_KEY: &'static str = "gap_runner_settings";

    /// Palette the renderer should use
    pub fn palette(&self) -> Palette {
        if self.high_contrast {
            Palette::HIGH_CONTRAST
        } else {
            Palette::CLASSIC
        }
    }

    pub fn load(store: &impl KeyValueStore) -> Self {
        if let Some(json) = store.get(Self::STORAGE_KEY) {
            match serde_json::from_str(&json) {
                Ok(settings) => {
                    log::info!("Loaded settings");
                    return settings;
                }
                Err(e) => log::warn!("Ignoring malformed settings: {}", e),
            }
        }

        log::info!("Using default settings");
        Self::default()
    }

    pub fn save(&self, store: &mut impl KeyValueStore) {
        match serde_json::to_string(self) {
            Ok(json) => match store.set(Self::STORAGE_KEY, &json) {
                Ok(()) => log::info!("Settings saved"),
                Err(e) => log::warn!("Settings not saved: {}", e),
            },
            Err(e) => log::warn!("Settings not serialized: {}", e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::persistence::MemoryStore;

    #[test]
    fn test_save_then_load() {
        let mut store = MemoryStore::new();
        let settings = Settings {
            high_contrast: true,
            show_fps: true,
            autopilot: false,
        };
        settings.save(&mut store);
        assert_eq!(Settings::load(&store), settings);
        assert_eq!(Settings::load(&store).palette(), Palette::HIGH_CONTRAST);
    }

    #[test]
    fn test_malformed_and_partial_blobs() {
        let mut store = MemoryStore::new();
        store.set(Settings::STORAGE_KEY, "[1, 2").unwrap();
        assert_eq!(Settings::load(&store), Settings::default());

        store.set(Settings::STORAGE_KEY, r#"{ "autopilot": true }"#).unwrap();
        let settings = Settings::load(&store);
        assert!(settings.autopilot);
        assert!(!settings.high_contrast);
    }
}
