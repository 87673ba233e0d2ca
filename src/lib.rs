pub mod flush;
pub mod id;
pub mod model;
pub mod save;
pub mod scenario;
pub mod sim;
pub mod testutil;
pub mod worldgen;

pub use id::{FactionId, IdGenerator, RegionId};
pub use model::{
    Action, ActionKind, ActionOutcome, Alliance, Event, EventKind, Faction, GameStatus, Owner,
    Region, Upgrade, World,
};
