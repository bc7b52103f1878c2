//! Session settings
//!
//! Read from a JSON file by the demo binary; every field has a default.

use std::path::Path;

use serde::{Deserialize, Serialize};

/// Seed used when none is configured
pub const DEFAULT_SEED: u64 = 0x5eed_b1a5;

/// Session settings/preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// RNG seed (None = default seed)
    pub seed: Option<u64>,
    /// Lives at the start of a session
    pub starting_lives: u32,
    /// Level at the start of a session (1-based)
    pub starting_level: u32,
    /// Demo stops after this many ticks
    pub max_ticks: u64,
    /// Feed synthetic input instead of leaving the player idle
    pub autopilot: bool,
    /// Print the status line every N ticks (0 = never)
    pub status_every: u64,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            seed: None,
            starting_lives: 3,
            starting_level: 1,
            max_ticks: 20_000,
            autopilot: true,
            status_every: 500,
        }
    }
}

impl Settings {
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Load settings from a JSON file, falling back to defaults
    pub fn load(path: &Path) -> Self {
        match std::fs::read_to_string(path) {
            Ok(json) => match Self::from_json(&json) {
                Ok(settings) => {
                    log::info!("Loaded settings from {}", path.display());
                    settings
                }
                Err(e) => {
                    log::warn!("Invalid settings in {}: {e}; using defaults", path.display());
                    Self::default()
                }
            },
            Err(e) => {
                log::warn!("Cannot read {}: {e}; using defaults", path.display());
                Self::default()
            }
        }
    }

    pub fn resolved_seed(&self) -> u64 {
        self.seed.unwrap_or(DEFAULT_SEED)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_json_uses_defaults() {
        let settings = Settings::from_json(r#"{ "seed": 42, "starting_level": 3 }"#).unwrap();
        assert_eq!(settings.seed, Some(42));
        assert_eq!(settings.starting_level, 3);
        assert_eq!(settings.starting_lives, 3);
        assert!(settings.autopilot);
    }

    #[test]
    fn test_invalid_json_is_error() {
        assert!(Settings::from_json("{ not json").is_err());
    }

    #[test]
    fn test_missing_file_falls_back() {
        let settings = Settings::load(Path::new("/nonexistent/side-blaster.json"));
        assert_eq!(settings, Settings::default());
    }

    #[test]
    fn test_json_round_trip_keeps_seed() {
        let settings = Settings {
            seed: Some(7),
            ..Default::default()
        };
        let json = settings.to_json().unwrap();
        assert_eq!(Settings::from_json(&json).unwrap().resolved_seed(), 7);
    }
}
