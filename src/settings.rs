//! Hub configuration
//!
//! Loaded from a JSON file at startup. Missing fields take their defaults; an
//! unreadable or invalid file falls back to `HubSettings::default()`.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::progress::UNLOCK_COST;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum SettingsError {
    #[error("at least one stage is required")]
    NoStages,
    #[error("initial stage {initial} is out of range (0..{count})")]
    InitialStageOutOfRange { initial: usize, count: usize },
}

/// Hub configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HubSettings {
    /// Display name per stage; the stage count is this list's length
    pub stage_names: Vec<String>,
    /// Stage selected (and unlocked for free) at startup
    pub initial_stage: usize,
    /// Keys charged to unlock a stage
    pub unlock_cost: u32,
    /// Key cost of each reward, in ledger order
    pub reward_costs: Vec<u32>,
    /// Where progression is saved
    pub save_path: PathBuf,
    /// Seed for mini-game randomness
    pub seed: u64,
}

impl Default for HubSettings {
    fn default() -> Self {
        Self {
            stage_names: vec![
                "Runner".to_string(),
                "Sequence".to_string(),
                "Fish Count".to_string(),
            ],
            initial_stage: 1,
            unlock_cost: UNLOCK_COST,
            reward_costs: vec![10, 20, 30, 50],
            save_path: PathBuf::from("GameData.json"),
            seed: 0x5EED,
        }
    }
}

impl HubSettings {
    pub fn stage_count(&self) -> usize {
        self.stage_names.len()
    }

    pub fn validate(&self) -> Result<(), SettingsError> {
        let count = self.stage_count();
        if count == 0 {
            return Err(SettingsError::NoStages);
        }
        if self.initial_stage >= count {
            return Err(SettingsError::InitialStageOutOfRange {
                initial: self.initial_stage,
                count,
            });
        }
        Ok(())
    }

    /// Load settings from a JSON file, falling back to defaults
    pub fn load(path: &Path) -> Self {
        let json = match fs::read_to_string(path) {
            Ok(json) => json,
            Err(_) => {
                log::info!("No settings at {}, using defaults", path.display());
                return Self::default();
            }
        };

        match serde_json::from_str::<HubSettings>(&json) {
            Ok(settings) => match settings.validate() {
                Ok(()) => {
                    log::info!("Loaded settings from {}", path.display());
                    settings
                }
                Err(e) => {
                    log::warn!("Invalid settings in {}: {}", path.display(), e);
                    Self::default()
                }
            },
            Err(e) => {
                log::warn!("Could not parse {}: {}", path.display(), e);
                Self::default()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_valid() {
        let settings = HubSettings::default();
        assert_eq!(settings.validate(), Ok(()));
        assert_eq!(settings.stage_count(), 3);
        assert_eq!(settings.unlock_cost, 10);
    }

    #[test]
    fn test_validate_initial_stage() {
        let settings = HubSettings {
            initial_stage: 3,
            ..Default::default()
        };
        assert_eq!(
            settings.validate(),
            Err(SettingsError::InitialStageOutOfRange {
                initial: 3,
                count: 3
            })
        );
    }

    #[test]
    fn test_load_partial_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("hub.json");
        fs::write(&path, r#"{"reward_costs": [15, 40], "initial_stage": 0}"#).unwrap();

        let settings = HubSettings::load(&path);
        assert_eq!(settings.reward_costs, vec![15, 40]);
        assert_eq!(settings.initial_stage, 0);
        assert_eq!(settings.stage_count(), 3);
    }

    #[test]
    fn test_load_invalid_falls_back() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("hub.json");
        fs::write(&path, r#"{"stage_names": []}"#).unwrap();
        assert_eq!(HubSettings::load(&path), HubSettings::default());

        fs::write(&path, "not json").unwrap();
        assert_eq!(HubSettings::load(&path), HubSettings::default());
    }
}
