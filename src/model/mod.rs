#[macro_use]
mod macros;

pub mod action;
pub mod alliance;
pub mod event;
pub mod faction;
pub mod region;
pub mod world;

pub use action::{Action, ActionKind, ActionOutcome, ActionResult};
pub use alliance::Alliance;
pub use event::{Event, EventKind};
pub use faction::{Faction, Upgrade};
pub use region::{Owner, Region, RegionSeed};
pub use world::{GameStatus, World};
