//! Hub application context
//!
//! `Hub` is built once by the application loop and owns the progression
//! store, the mini-game orchestrator and the save slot. UI events arrive as
//! the intents below; rendering reads `snapshot()`.

pub mod notice;
pub mod orchestrator;

pub use notice::Notice;
pub use orchestrator::{InstanceHandle, MiniGameOrchestrator, SlotPhase};

use serde::Serialize;

use crate::error::HubError;
use crate::minigame::{Action, Catalog, MiniGameFactory, MiniGameKind};
use crate::persistence::SaveSlot;
use crate::progress::{self, CurrencyDelta, ProgressionStore, RewardView};
use crate::settings::HubSettings;

/// Read-only view of one stage
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StageView {
    pub index: usize,
    pub name: String,
    pub unlocked: bool,
    pub high_score: u32,
}

/// Everything the hub UI renders
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HubSnapshot {
    pub keys: u32,
    pub coin: u32,
    pub selected_stage: usize,
    pub phase: SlotPhase,
    pub hub_visible: bool,
    pub running: Option<MiniGameKind>,
    pub stages: Vec<StageView>,
    pub rewards: Vec<RewardView>,
}

pub struct Hub<F: MiniGameFactory = Catalog> {
    settings: HubSettings,
    store: ProgressionStore,
    orchestrator: MiniGameOrchestrator<F>,
    slot: SaveSlot,
}

impl Hub<Catalog> {
    /// Open the hub with the default mini-game catalog
    pub fn open(settings: HubSettings) -> Self {
        let catalog = Catalog::new(settings.seed);
        Self::with_factory(settings, catalog)
    }
}

impl<F: MiniGameFactory> Hub<F> {
    /// Build the hub, loading the save if one exists and unlocking the
    /// initial stage
    pub fn with_factory(settings: HubSettings, factory: F) -> Self {
        let slot = SaveSlot::new(settings.save_path.clone());
        let state = slot.load_or_fresh(
            settings.stage_count(),
            &settings.reward_costs,
            settings.initial_stage,
        );

        let mut store = ProgressionStore::from_state(state);
        if let Err(e) = store.grant_stage(settings.initial_stage) {
            log::warn!("Initial stage unavailable: {}", e);
        }

        let orchestrator = MiniGameOrchestrator::new(factory, settings.initial_stage);
        Self {
            settings,
            store,
            orchestrator,
            slot,
        }
    }

    pub fn settings(&self) -> &HubSettings {
        &self.settings
    }

    pub fn store(&self) -> &ProgressionStore {
        &self.store
    }

    pub fn orchestrator(&self) -> &MiniGameOrchestrator<F> {
        &self.orchestrator
    }

    pub fn select(&mut self, index: usize) -> Result<(), HubError> {
        self.orchestrator.select_stage(&self.store, index)
    }

    pub fn unlock(&mut self, index: usize) -> Result<(), HubError> {
        self.store.unlock_stage(index, self.settings.unlock_cost)
    }

    pub fn launch(&mut self) -> Result<InstanceHandle, HubError> {
        self.orchestrator.launch_selected(&self.store)
    }

    /// Claim a reward and write the save before returning
    pub fn claim(&mut self, index: usize) -> Result<(), HubError> {
        progress::claim(&mut self.store, index)?;
        self.persist();
        Ok(())
    }

    /// Wipe progression back to a fresh state and save it. Any running
    /// mini-game is destroyed without banking its score.
    pub fn reset(&mut self) -> Result<(), HubError> {
        self.orchestrator.abort();
        self.store.initialize(
            self.settings.stage_count(),
            &self.settings.reward_costs,
            self.settings.initial_stage,
        );
        self.orchestrator.reset_selection(self.settings.initial_stage);
        self.persist();
        Ok(())
    }

    /// Replace progression with the saved record. An absent record resets to
    /// a fresh state; a malformed one does too and is reported as
    /// `MalformedPersistedRecord`.
    pub fn load(&mut self) -> Result<(), HubError> {
        if self.orchestrator.phase() != SlotPhase::Idle {
            return Err(HubError::Busy);
        }

        let loaded = self
            .slot
            .load(self.settings.stage_count(), self.settings.reward_costs.len());
        match loaded {
            Ok(Some(state)) => {
                self.store.replace(state);
                log::info!("Progress loaded from {}", self.slot.path().display());
                Ok(())
            }
            Ok(None) => {
                self.reinitialize();
                Ok(())
            }
            Err(e) => {
                log::warn!("Save unreadable, starting fresh: {}", e);
                self.reinitialize();
                Err(e.into())
            }
        }
    }

    fn reinitialize(&mut self) {
        self.store.initialize(
            self.settings.stage_count(),
            &self.settings.reward_costs,
            self.settings.initial_stage,
        );
        self.orchestrator.reset_selection(self.settings.initial_stage);
    }

    fn persist(&self) {
        if let Err(e) = self.slot.save(self.store.state()) {
            log::error!("Failed to save progress: {}", e);
        }
    }

    /// Advance the running mini-game by `dt` seconds
    pub fn tick(&mut self, dt: f32) -> Option<CurrencyDelta> {
        self.orchestrator.tick(&mut self.store, dt)
    }

    pub fn send(&mut self, action: Action) -> Result<(), HubError> {
        self.orchestrator.send(action)
    }

    /// Player quits the running mini-game, keeping its score
    pub fn leave(&mut self) -> Result<CurrencyDelta, HubError> {
        self.orchestrator.leave(&mut self.store)
    }

    /// Tear down any running mini-game at process end
    pub fn shutdown(&mut self) {
        if self.orchestrator.abort() {
            log::info!("Running mini-game destroyed at shutdown");
        }
    }

    pub fn snapshot(&self) -> HubSnapshot {
        let state = self.store.state();
        let stages = self
            .settings
            .stage_names
            .iter()
            .enumerate()
            .map(|(index, name)| StageView {
                index,
                name: name.clone(),
                unlocked: state.stage_unlocked.get(index).copied().unwrap_or(false),
                high_score: state.stage_high_score.get(index).copied().unwrap_or(0),
            })
            .collect();

        HubSnapshot {
            keys: state.keys,
            coin: state.coin,
            selected_stage: self.orchestrator.selected_stage(),
            phase: self.orchestrator.phase(),
            hub_visible: self.orchestrator.hub_visible(),
            running: self.orchestrator.active_kind(),
            stages,
            rewards: progress::list_rewards(&self.store),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::progress::ProgressionState;
    use std::fs;

    fn settings(dir: &tempfile::TempDir) -> HubSettings {
        HubSettings {
            reward_costs: vec![15, 30],
            save_path: dir.path().join("GameData.json"),
            ..Default::default()
        }
    }

    #[test]
    fn test_open_fresh_unlocks_initial_stage() {
        let dir = tempfile::tempdir().unwrap();
        let hub = Hub::open(settings(&dir));
        let snap = hub.snapshot();
        let unlocked: Vec<bool> = snap.stages.iter().map(|s| s.unlocked).collect();
        assert_eq!(unlocked, vec![false, true, false]);
        assert_eq!(snap.selected_stage, 1);
        assert_eq!(snap.phase, SlotPhase::Idle);
        assert!(snap.hub_visible);
    }

    #[test]
    fn test_unlock_scenario() {
        let dir = tempfile::tempdir().unwrap();
        let mut hub = Hub::open(settings(&dir));
        let result = hub.unlock(0);
        assert_eq!(Notice::for_result(&result), Notice::Failure);
        assert!(matches!(result, Err(HubError::InsufficientFunds { .. })));

        hub.store.apply_currency_delta(10, 0);
        assert_eq!(hub.unlock(0), Ok(()));
        assert_eq!(hub.store().keys(), 0);
        assert_eq!(hub.store().is_stage_unlocked(0), Ok(true));
    }

    #[test]
    fn test_claim_persists_before_returning() {
        let dir = tempfile::tempdir().unwrap();
        let settings = settings(&dir);
        let mut hub = Hub::open(settings.clone());
        hub.store.apply_currency_delta(20, 0);

        assert_eq!(hub.claim(0), Ok(()));
        assert_eq!((hub.store().keys(), hub.store().coin()), (5, 15));
        assert_eq!(hub.claim(0), Err(HubError::AlreadyClaimed(0)));

        let saved = SaveSlot::new(&settings.save_path).load(3, 2).unwrap().unwrap();
        assert!(saved.rewards[0].claimed);
        assert_eq!((saved.keys, saved.coin), (5, 15));

        let reopened = Hub::open(settings);
        assert_eq!(reopened.store().state(), hub.store().state());
    }

    #[test]
    fn test_launch_locked_selection() {
        let dir = tempfile::tempdir().unwrap();
        let settings = settings(&dir);
        let mut hub = Hub::open(settings.clone());
        hub.orchestrator.reset_selection(2);

        let result = hub.launch();
        assert_eq!(result, Err(HubError::Locked(2)));
        assert_eq!(Notice::for_result(&result), Notice::Locked);
        assert_eq!(hub.snapshot().running, None);
        assert_eq!(hub.snapshot().phase, SlotPhase::Idle);
    }

    #[test]
    fn test_full_run_through_sequence_game() {
        let dir = tempfile::tempdir().unwrap();
        let mut hub = Hub::open(settings(&dir));
        hub.launch().unwrap();
        assert_eq!(hub.snapshot().running, Some(MiniGameKind::Sequence));
        assert!(!hub.snapshot().hub_visible);
        assert_eq!(hub.select(1), Err(HubError::Busy));

        hub.send(Action::Start).unwrap();
        let mut earned = None;
        for _ in 0..3 {
            // Playback of any short sequence finishes well within 60 s
            for _ in 0..600 {
                assert!(hub.tick(0.1).is_none());
            }
            // An out-of-range colour is always wrong
            hub.send(Action::Pick(usize::MAX)).unwrap();
            earned = hub.tick(0.0);
        }

        assert_eq!(earned, Some(CurrencyDelta { keys: 0, coin: 0 }));
        let snap = hub.snapshot();
        assert_eq!(snap.phase, SlotPhase::Idle);
        assert!(snap.hub_visible);
        assert_eq!(snap.running, None);
    }

    #[test]
    fn test_reset_clears_claims_and_saves() {
        let dir = tempfile::tempdir().unwrap();
        let settings = settings(&dir);
        let mut hub = Hub::open(settings.clone());
        hub.store.apply_currency_delta(40, 0);
        hub.unlock(2).unwrap();
        hub.select(2).unwrap();
        hub.claim(0).unwrap();
        hub.launch().unwrap();

        assert_eq!(hub.reset(), Ok(()));
        let snap = hub.snapshot();
        assert_eq!((snap.keys, snap.coin), (0, 0));
        assert_eq!(snap.selected_stage, 1);
        assert_eq!(snap.running, None);
        assert!(snap.rewards.iter().all(|r| !r.claimed));

        let saved = SaveSlot::new(&settings.save_path).load(3, 2).unwrap().unwrap();
        assert_eq!(&saved, hub.store().state());
    }

    #[test]
    fn test_load_malformed_falls_back() {
        let dir = tempfile::tempdir().unwrap();
        let settings = settings(&dir);
        let mut hub = Hub::open(settings.clone());
        hub.store.apply_currency_delta(12, 3);

        fs::write(&settings.save_path, "{\"keys\": ").unwrap();
        assert!(matches!(
            hub.load(),
            Err(HubError::MalformedPersistedRecord(_))
        ));
        assert_eq!((hub.store().keys(), hub.store().coin()), (0, 0));
        assert_eq!(hub.store().is_stage_unlocked(1), Ok(true));
    }

    #[test]
    fn test_load_while_running_is_busy() {
        let dir = tempfile::tempdir().unwrap();
        let mut hub = Hub::open(settings(&dir));
        hub.launch().unwrap();
        assert_eq!(hub.load(), Err(HubError::Busy));
        hub.shutdown();
        assert_eq!(hub.load(), Ok(()));
    }

    #[test]
    fn test_load_fallback_resets_selection() {
        let dir = tempfile::tempdir().unwrap();
        let settings = settings(&dir);
        let mut hub = Hub::open(settings.clone());
        hub.store.apply_currency_delta(10, 0);
        hub.unlock(0).unwrap();
        hub.select(0).unwrap();

        fs::write(&settings.save_path, "garbage").unwrap();
        assert!(hub.load().is_err());
        assert_eq!(hub.snapshot().selected_stage, 1);
        assert!(hub.launch().is_ok());
    }

    #[test]
    fn test_load_restores_saved_record() {
        let dir = tempfile::tempdir().unwrap();
        let mut hub = Hub::open(settings(&dir));
        hub.store.apply_currency_delta(25, 0);
        hub.claim(0).unwrap();
        let saved = hub.store().state().clone();

        hub.store.apply_currency_delta(100, 100);
        hub.store.record_score(2, 77).unwrap();
        assert_eq!(hub.load(), Ok(()));
        assert_eq!(hub.store().state(), &saved);
        assert_eq!((hub.store().keys(), hub.store().coin()), (10, 15));
    }

    #[test]
    fn test_load_wrong_reward_count_is_malformed() {
        let dir = tempfile::tempdir().unwrap();
        let settings = settings(&dir);
        let other = ProgressionState::new(3, &[15, 30, 45], 1);
        SaveSlot::new(&settings.save_path).save(&other).unwrap();

        let mut hub = Hub::open(settings);
        hub.store.apply_currency_delta(5, 0);
        assert!(matches!(
            hub.load(),
            Err(HubError::MalformedPersistedRecord(_))
        ));
        assert_eq!(hub.store().reward_count(), 2);
        assert_eq!(hub.store().keys(), 0);
    }
}
