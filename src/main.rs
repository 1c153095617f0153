//! Stage Hub entry point
//!
//! Headless driver: opens the hub, plays the selected stage with a scripted
//! player on a fixed-timestep loop, then spends the winnings.

use std::path::PathBuf;

use stage_hub::consts::*;
use stage_hub::minigame::Action;
use stage_hub::{Hub, HubSettings, Notice};

/// Simulated frame time for the headless loop (30 fps)
const FRAME_DT: f32 = 1.0 / 30.0;
/// Give up on a run after this much simulated time
const MAX_RUN_SECS: f32 = 600.0;

/// Fixed-timestep driver around the hub
struct Host {
    hub: Hub,
    accumulator: f32,
    elapsed: f32,
}

impl Host {
    fn new(hub: Hub) -> Self {
        Self {
            hub,
            accumulator: 0.0,
            elapsed: 0.0,
        }
    }

    /// Run simulation ticks for one frame. Returns true once the mini-game ended.
    fn update(&mut self, dt: f32) -> bool {
        let dt = dt.min(0.1);
        self.accumulator += dt;
        self.elapsed += dt;

        let mut substeps = 0;
        while self.accumulator >= SIM_DT && substeps < MAX_SUBSTEPS {
            self.accumulator -= SIM_DT;
            substeps += 1;
            if let Some(earned) = self.hub.tick(SIM_DT) {
                log::info!("Run finished: +{} keys, +{} coin", earned.keys, earned.coin);
                return true;
            }
        }
        false
    }

    /// Play the selected stage with a player that mashes inputs
    fn play_selected(&mut self) {
        let launched = self.hub.launch();
        log::info!("Launch: {:?}", Notice::for_result(&launched));
        if launched.is_err() {
            return;
        }
        let _ = self.hub.send(Action::Start);

        let mut frame: u64 = 0;
        self.elapsed = 0.0;
        while self.elapsed < MAX_RUN_SECS {
            frame += 1;
            let action = if frame % 2 == 0 {
                Action::Jump
            } else {
                Action::Pick((frame / 2 % 9) as usize)
            };
            let _ = self.hub.send(action);
            if self.update(FRAME_DT) {
                return;
            }
        }

        match self.hub.leave() {
            Ok(earned) => log::info!("Left early: +{} keys, +{} coin", earned.keys, earned.coin),
            Err(e) => log::warn!("Leave failed: {}", e),
        }
    }
}

fn main() {
    env_logger::init();
    log::info!("Stage Hub (headless) starting...");

    let settings = std::env::args()
        .nth(1)
        .map(|p| HubSettings::load(&PathBuf::from(p)))
        .unwrap_or_default();

    let mut host = Host::new(Hub::open(settings));
    host.play_selected();

    for stage in 0..host.hub.settings().stage_count() {
        let unlocked = host.hub.unlock(stage);
        log::info!("Unlock stage {}: {:?}", stage, Notice::for_result(&unlocked));
    }
    for reward in 0..host.hub.settings().reward_costs.len() {
        let claimed = host.hub.claim(reward);
        log::info!("Claim reward {}: {:?}", reward, Notice::for_result(&claimed));
    }

    host.hub.shutdown();
    match serde_json::to_string_pretty(&host.hub.snapshot()) {
        Ok(json) => println!("{}", json),
        Err(e) => log::error!("Could not render snapshot: {}", e),
    }
}
