//! Save file on disk
//!
//! Writes go to `<path>.tmp` first, the previous save is copied to
//! `<path>.bak`, then the temp file is renamed over `<path>`. A record exists
//! at `<path>` at every point of a save. Loading falls back to `<path>.bak`
//! when the primary record is missing or unreadable.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use super::codec;
use crate::error::PersistError;
use crate::progress::ProgressionState;

/// Location of the progression save file
#[derive(Debug, Clone)]
pub struct SaveSlot {
    path: PathBuf,
}

impl SaveSlot {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn sibling(&self, ext: &str) -> PathBuf {
        let mut name = self.path.as_os_str().to_owned();
        name.push(ext);
        PathBuf::from(name)
    }

    /// Persist a state, returning once the new record is in place
    pub fn save(&self, state: &ProgressionState) -> Result<(), PersistError> {
        let bytes = codec::encode(state)?;
        if let Some(dir) = self.path.parent().filter(|d| !d.as_os_str().is_empty()) {
            fs::create_dir_all(dir)?;
        }

        let tmp = self.sibling(".tmp");
        fs::write(&tmp, &bytes)?;
        if self.path.exists() {
            fs::copy(&self.path, self.sibling(".bak"))?;
        }
        fs::rename(&tmp, &self.path)?;

        log::info!("Progress saved to {}", self.path.display());
        Ok(())
    }

    /// Read the save, recovering from the backup if the primary record is
    /// missing or bad; `Ok(None)` when neither exists
    pub fn load(
        &self,
        stage_count: usize,
        reward_count: usize,
    ) -> Result<Option<ProgressionState>, PersistError> {
        let primary = read_record(&self.path, stage_count, reward_count);
        if let Ok(Some(state)) = primary {
            return Ok(Some(state));
        }

        let backup_path = self.sibling(".bak");
        match read_record(&backup_path, stage_count, reward_count) {
            Ok(Some(state)) => {
                log::warn!(
                    "Save at {} unusable, recovered from {}",
                    self.path.display(),
                    backup_path.display()
                );
                Ok(Some(state))
            }
            Ok(None) => primary,
            Err(e) => match primary {
                Ok(None) => Err(e),
                other => other,
            },
        }
    }

    /// Read the save, substituting a fresh state when it is absent or malformed
    pub fn load_or_fresh(
        &self,
        stage_count: usize,
        reward_costs: &[u32],
        initial_stage: usize,
    ) -> ProgressionState {
        match self.load(stage_count, reward_costs.len()) {
            Ok(Some(state)) => {
                log::info!("Loaded progress from {}", self.path.display());
                state
            }
            Ok(None) => {
                log::info!("No save found, starting fresh");
                ProgressionState::new(stage_count, reward_costs, initial_stage)
            }
            Err(e) => {
                log::warn!("Ignoring save at {}: {}", self.path.display(), e);
                ProgressionState::new(stage_count, reward_costs, initial_stage)
            }
        }
    }
}

fn read_record(
    path: &Path,
    stage_count: usize,
    reward_count: usize,
) -> Result<Option<ProgressionState>, PersistError> {
    let bytes = match fs::read(path) {
        Ok(bytes) => bytes,
        Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
        Err(e) => return Err(e.into()),
    };
    codec::decode_for(&bytes, stage_count, reward_count).map(Some)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_save_then_load() {
        let dir = tempfile::tempdir().unwrap();
        let slot = SaveSlot::new(dir.path().join("progress.json"));
        let mut state = ProgressionState::new(3, &[15, 30], 1);
        state.keys = 7;
        state.rewards[1].claimed = true;

        slot.save(&state).unwrap();
        assert_eq!(slot.load(3, 2).unwrap(), Some(state));
    }

    #[test]
    fn test_load_missing_is_none() {
        let dir = tempfile::tempdir().unwrap();
        let slot = SaveSlot::new(dir.path().join("absent.json"));
        assert!(slot.load(3, 2).unwrap().is_none());
    }

    #[test]
    fn test_second_save_rotates_backup() {
        let dir = tempfile::tempdir().unwrap();
        let slot = SaveSlot::new(dir.path().join("progress.json"));
        let mut state = ProgressionState::new(2, &[], 0);
        slot.save(&state).unwrap();
        state.coin = 9;
        slot.save(&state).unwrap();

        assert!(dir.path().join("progress.json.bak").exists());
        assert!(!dir.path().join("progress.json.tmp").exists());
        assert_eq!(slot.load(2, 0).unwrap().map(|s| s.coin), Some(9));
    }

    #[test]
    fn test_malformed_falls_back_to_fresh() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("progress.json");
        fs::write(&path, b"{ truncated").unwrap();
        let slot = SaveSlot::new(path);

        assert!(matches!(slot.load(3, 2), Err(PersistError::Malformed(_))));
        let state = slot.load_or_fresh(3, &[15, 30], 1);
        assert_eq!(state, ProgressionState::new(3, &[15, 30], 1));
    }

    #[test]
    fn test_recovers_from_backup_when_save_missing() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("progress.json");
        let slot = SaveSlot::new(&path);
        let mut state = ProgressionState::new(3, &[15, 30], 1);
        state.keys = 40;
        state.coin = 90;
        slot.save(&state).unwrap();

        // Interrupted between moving the old save aside and renaming the new one in
        fs::rename(&path, dir.path().join("progress.json.bak")).unwrap();

        let loaded = slot.load_or_fresh(3, &[15, 30], 1);
        assert_eq!((loaded.keys, loaded.coin), (40, 90));
    }

    #[test]
    fn test_recovers_from_backup_when_save_corrupt() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("progress.json");
        let slot = SaveSlot::new(&path);
        let mut state = ProgressionState::new(2, &[5], 0);
        state.keys = 3;
        slot.save(&state).unwrap();
        state.keys = 8;
        slot.save(&state).unwrap();

        fs::write(&path, b"{ trunc").unwrap();
        assert_eq!(slot.load(2, 1).unwrap().map(|s| s.keys), Some(3));
    }

    #[test]
    fn test_save_keeps_primary_in_place() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("progress.json");
        let slot = SaveSlot::new(&path);
        let mut state = ProgressionState::new(2, &[], 0);
        slot.save(&state).unwrap();
        state.coin = 4;
        slot.save(&state).unwrap();

        assert!(path.exists());
        let backup = fs::read(dir.path().join("progress.json.bak")).unwrap();
        assert_eq!(codec::decode(&backup).unwrap().coin, 0);
    }
}
