use std::path::PathBuf;

use rand::SeedableRng;
use rand::rngs::SmallRng;
use tracing::warn;

use super::ai::AiSystem;
use super::context::TickContext;
use super::diplomacy::DiplomacySystem;
use super::economy::EconomySystem;
use super::player_actions::PlayerActionSystem;
use super::rules::Rules;
use super::system::{Accumulator, Cadence, SimSystem};
use crate::model::{GameStatus, World};
use crate::save;

/// Fastest supported game speed.
pub const MAX_SPEED: u32 = 3;

/// Configuration for a simulation run.
#[derive(Debug, Clone)]
pub struct SimConfig {
    pub seed: u64,
    /// 0 pauses, 1..=3 scale how fast periodic systems come due.
    pub speed: u32,
    /// If set, a snapshot is written here after every economic turn.
    pub save_path: Option<PathBuf>,
}

impl SimConfig {
    pub fn new(seed: u64) -> Self {
        Self {
            seed,
            speed: 1,
            save_path: None,
        }
    }
}

impl Default for SimConfig {
    fn default() -> Self {
        Self::new(42)
    }
}

/// The fixed-rate driver: one call to [`Driver::step`] is one frame.
///
/// Systems run in registration order. The default order puts queued player
/// actions first, then the economic turn, then diplomacy, then the AI, so an
/// economic turn always precedes an AI cycle falling due on the same tick.
pub struct Driver {
    systems: Vec<Box<dyn SimSystem>>,
    accumulators: Vec<Accumulator>,
    rules: Rules,
    rng: SmallRng,
    speed: u32,
    save_path: Option<PathBuf>,
}

impl Driver {
    pub fn new(rules: Rules, config: SimConfig) -> Self {
        let systems: Vec<Box<dyn SimSystem>> = vec![
            Box::new(PlayerActionSystem),
            Box::new(EconomySystem),
            Box::new(DiplomacySystem),
            Box::new(AiSystem),
        ];
        Self::with_systems(systems, rules, config)
    }

    pub fn with_systems(
        systems: Vec<Box<dyn SimSystem>>,
        rules: Rules,
        config: SimConfig,
    ) -> Self {
        let accumulators = systems
            .iter()
            .map(|s| match s.cadence(&rules) {
                Cadence::EveryTick => Accumulator::new(0),
                Cadence::Every(threshold) => Accumulator::new(threshold),
            })
            .collect();
        Self {
            systems,
            accumulators,
            rules,
            rng: SmallRng::seed_from_u64(config.seed),
            speed: config.speed.min(MAX_SPEED),
            save_path: config.save_path,
        }
    }

    pub fn rules(&self) -> &Rules {
        &self.rules
    }

    pub fn speed(&self) -> u32 {
        self.speed
    }

    pub fn set_speed(&mut self, speed: u32) {
        self.speed = speed.min(MAX_SPEED);
    }

    pub fn is_paused(&self) -> bool {
        self.speed == 0
    }

    /// Advance the simulation by one frame. Returns false once the game is
    /// not (or no longer) running; nothing is mutated in that case.
    ///
    /// After a tick that ran an economic turn, a still-running game is saved
    /// to the configured slot.
    ///
    /// Signal delivery is single-pass: systems that fired emit signals in
    /// Phase 1, every system sees the whole buffer in Phase 2, and anything
    /// emitted during Phase 2 is dropped.
    pub fn step(&mut self, world: &mut World) -> bool {
        if !world.is_running() {
            return false;
        }
        world.current_tick += 1;
        let turn_before = world.turn;

        // Phase 1: tick systems that are due, collecting signals
        let mut signals = Vec::new();
        for (system, acc) in self.systems.iter_mut().zip(self.accumulators.iter_mut()) {
            if !world.is_running() {
                break;
            }
            let due = match system.cadence(&self.rules) {
                Cadence::EveryTick => true,
                Cadence::Every(_) => acc.advance(self.speed),
            };
            if due {
                let mut ctx = TickContext {
                    world,
                    rules: &self.rules,
                    rng: &mut self.rng,
                    signals: &mut signals,
                    inbox: &[],
                };
                system.tick(&mut ctx);
            }
        }

        // Phase 2: deliver signals for reaction, unless the game just ended
        if !signals.is_empty() && world.is_running() {
            for system in self.systems.iter_mut() {
                let mut dropped = Vec::new();
                let mut ctx = TickContext {
                    world,
                    rules: &self.rules,
                    rng: &mut self.rng,
                    signals: &mut dropped,
                    inbox: &signals,
                };
                system.handle_signals(&mut ctx);
            }
        }

        // Finished games are not saved.
        if world.turn != turn_before
            && world.is_running()
            && let Some(path) = &self.save_path
            && let Err(err) = save::write_snapshot(world, path)
        {
            warn!(path = %path.display(), %err, "failed to write save");
        }

        world.is_running()
    }

    /// Step up to `frames` times, stopping early when the game ends.
    pub fn run(&mut self, world: &mut World, frames: u64) -> GameStatus {
        for _ in 0..frames {
            if !self.step(world) {
                break;
            }
        }
        world.status
    }
}
