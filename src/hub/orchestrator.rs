//! Mini-game lifecycle
//!
//! Owns the selected stage and at most one live mini-game. The slot moves
//! `Idle -> Selecting -> Idle` on selection and
//! `Idle -> Launched -> Running -> Terminating -> Idle` over a mini-game's life.
//! The progression store is passed in by the caller for every operation.

use serde::Serialize;

use crate::error::HubError;
use crate::minigame::{Action, MiniGame, MiniGameFactory, MiniGameKind};
use crate::progress::{self, CurrencyDelta, ProgressionStore, StageStatus};

/// Lifecycle phase of the mini-game slot
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum SlotPhase {
    Idle,
    Selecting,
    Launched,
    Running,
    Terminating,
}

/// Identifies one spawned mini-game instance
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct InstanceHandle(pub u64);

struct ActiveInstance {
    handle: InstanceHandle,
    stage: usize,
    game: Box<dyn MiniGame>,
}

pub struct MiniGameOrchestrator<F: MiniGameFactory> {
    factory: F,
    selected: usize,
    active: Option<ActiveInstance>,
    phase: SlotPhase,
    hub_visible: bool,
    next_handle: u64,
}

impl<F: MiniGameFactory> MiniGameOrchestrator<F> {
    pub fn new(factory: F, initial_stage: usize) -> Self {
        Self {
            factory,
            selected: initial_stage,
            active: None,
            phase: SlotPhase::Idle,
            hub_visible: true,
            next_handle: 1,
        }
    }

    pub fn phase(&self) -> SlotPhase {
        self.phase
    }

    pub fn selected_stage(&self) -> usize {
        self.selected
    }

    /// Whether the hub UI should be drawn (hidden while a mini-game runs)
    pub fn hub_visible(&self) -> bool {
        self.hub_visible
    }

    pub fn active_handle(&self) -> Option<InstanceHandle> {
        self.active.as_ref().map(|a| a.handle)
    }

    pub fn active_game(&self) -> Option<&dyn MiniGame> {
        self.active.as_ref().map(|a| a.game.as_ref())
    }

    pub fn active_kind(&self) -> Option<MiniGameKind> {
        self.active_game().map(|g| g.kind())
    }

    fn set_phase(&mut self, phase: SlotPhase) {
        if self.phase != phase {
            log::debug!("Slot {:?} -> {:?}", self.phase, phase);
            self.phase = phase;
        }
    }

    fn check_stage(store: &ProgressionStore, index: usize) -> Result<(), HubError> {
        match progress::validate(store, index) {
            StageStatus::Unlocked => Ok(()),
            StageStatus::Locked => Err(HubError::Locked(index)),
            StageStatus::Invalid => Err(HubError::InvalidIndex {
                index,
                len: store.stage_count(),
            }),
        }
    }

    /// Record a new selection. Only allowed from the hub (no mini-game running).
    pub fn select_stage(&mut self, store: &ProgressionStore, index: usize) -> Result<(), HubError> {
        if self.phase != SlotPhase::Idle {
            return Err(HubError::Busy);
        }
        Self::check_stage(store, index)?;

        self.set_phase(SlotPhase::Selecting);
        self.selected = index;
        log::info!("Stage {} selected", index);
        self.set_phase(SlotPhase::Idle);
        Ok(())
    }

    /// Force the selection back to `index` without validation (used on reset)
    pub fn reset_selection(&mut self, index: usize) {
        self.selected = index;
    }

    /// Spawn the mini-game for the selected stage, destroying any live one first
    pub fn launch_selected(&mut self, store: &ProgressionStore) -> Result<InstanceHandle, HubError> {
        Self::check_stage(store, self.selected)?;

        self.abort();
        self.set_phase(SlotPhase::Launched);

        let handle = InstanceHandle(self.next_handle);
        self.next_handle += 1;
        let mut game = self.factory.spawn(self.selected);
        game.on_start();
        log::info!(
            "Launched {} for stage {} (instance {})",
            game.kind().as_str(),
            self.selected,
            handle.0
        );

        self.active = Some(ActiveInstance {
            handle,
            stage: self.selected,
            game,
        });
        self.hub_visible = false;
        self.set_phase(SlotPhase::Running);
        Ok(handle)
    }

    /// Bank a finished mini-game's score. A second call after the slot is
    /// already idle reports `NoActiveInstance` and changes nothing.
    pub fn on_minigame_terminated(
        &mut self,
        store: &mut ProgressionStore,
        raw_score: u32,
    ) -> Result<CurrencyDelta, HubError> {
        let Some(mut active) = self.active.take() else {
            return Err(HubError::NoActiveInstance);
        };
        self.set_phase(SlotPhase::Terminating);

        active.game.on_terminate(raw_score);
        drop(active.game);

        let earned = progress::convert(raw_score);
        store.apply_currency_delta(i64::from(earned.keys), i64::from(earned.coin));
        if let Err(e) = store.record_score(active.stage, raw_score) {
            log::warn!("Could not record score for stage {}: {}", active.stage, e);
        }
        log::info!(
            "Instance {} ended with score {}: +{} keys, +{} coin (keys {}, coin {})",
            active.handle.0,
            raw_score,
            earned.keys,
            earned.coin,
            store.keys(),
            store.coin()
        );

        self.hub_visible = true;
        self.set_phase(SlotPhase::Idle);
        Ok(earned)
    }

    /// Advance the live mini-game, banking its score when it reports one
    pub fn tick(&mut self, store: &mut ProgressionStore, dt: f32) -> Option<CurrencyDelta> {
        let final_score = self.active.as_mut()?.game.tick(dt)?;
        self.on_minigame_terminated(store, final_score).ok()
    }

    /// Forward player input to the live mini-game
    pub fn send(&mut self, action: Action) -> Result<(), HubError> {
        let active = self.active.as_mut().ok_or(HubError::NoActiveInstance)?;
        active.game.handle(action);
        Ok(())
    }

    /// Player leaves early: bank whatever the mini-game has scored so far
    pub fn leave(&mut self, store: &mut ProgressionStore) -> Result<CurrencyDelta, HubError> {
        let score = self
            .active_game()
            .ok_or(HubError::NoActiveInstance)?
            .session()
            .score();
        self.on_minigame_terminated(store, score)
    }

    /// Destroy the live mini-game without banking anything.
    /// Returns true if there was one.
    pub fn abort(&mut self) -> bool {
        let Some(active) = self.active.take() else {
            return false;
        };
        log::info!("Destroyed instance {} (stage {})", active.handle.0, active.stage);
        drop(active);
        self.hub_visible = true;
        self.set_phase(SlotPhase::Idle);
        true
    }
}
