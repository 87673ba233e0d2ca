pub mod ai;
pub mod combat;
pub mod conquest;
mod context;
pub mod diplomacy;
pub mod economy;
pub mod player_actions;
mod rules;
mod runner;
mod signal;
mod system;
pub mod victory;

pub use ai::AiSystem;
pub use combat::{AttackOutcome, Rejection, attack};
pub use conquest::{Acquisition, Transfer, transfer};
pub use context::TickContext;
pub use diplomacy::DiplomacySystem;
pub use economy::EconomySystem;
pub use player_actions::PlayerActionSystem;
pub use rules::{Rules, UpgradeCost};
pub use runner::{Driver, MAX_SPEED, SimConfig};
pub use signal::{Signal, SignalKind};
pub use system::{Accumulator, Cadence, SimSystem};
