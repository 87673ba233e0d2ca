use std::fmt;

use rand::RngCore;
use rand::seq::SliceRandom;
use tracing::info;

use super::config::WorldGenConfig;
use crate::id::{FactionId, RegionId};
use crate::model::{GameStatus, Owner, World};
use crate::sim::{Acquisition, Rules, transfer, victory};

const AI_NAMES: &[&str] = &[
    "Iron Pact", "Crimson Union", "Northern League", "Azure Republic", "Golden Horde",
    "Silver Dominion", "Emerald Coalition", "Obsidian Empire", "Amber Federation",
    "Scarlet Directorate", "Ivory Commonwealth", "Cobalt Syndicate",
];

/// Why a game could not be set up.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SetupError {
    AlreadyStarted,
    UnknownRegion(RegionId),
    RegionTaken(RegionId),
}

impl fmt::Display for SetupError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SetupError::AlreadyStarted => write!(f, "the game has already started"),
            SetupError::UnknownRegion(id) => write!(f, "{id} is not on the map"),
            SetupError::RegionTaken(id) => write!(f, "{id} is already owned"),
        }
    }
}

impl std::error::Error for SetupError {}

/// Place the human on `home`, spawn the computer factions, and start the game.
///
/// Computer factions land on distinct unclaimed regions whose output is above
/// `config.min_ai_start_output`, chosen at random. Fewer than
/// `config.num_ai_factions` spawn if the map runs out of such regions.
pub fn setup_game(
    world: &mut World,
    rules: &Rules,
    config: &WorldGenConfig,
    player_name: &str,
    home: RegionId,
    rng: &mut dyn RngCore,
) -> Result<FactionId, SetupError> {
    if world.status != GameStatus::Setup {
        return Err(SetupError::AlreadyStarted);
    }
    match world.owner_of(home) {
        None => return Err(SetupError::UnknownRegion(home)),
        Some(Owner::Faction(_)) => return Err(SetupError::RegionTaken(home)),
        Some(Owner::Unclaimed) => {}
    }

    let player = world.add_player(player_name);
    transfer(world, rules, home, player, Acquisition::Instant);

    let mut candidates: Vec<RegionId> = world
        .regions
        .values()
        .filter(|r| r.owner == Owner::Unclaimed && r.output > config.min_ai_start_output)
        .map(|r| r.id)
        .collect();
    candidates.shuffle(rng);

    for (i, region) in candidates
        .into_iter()
        .take(config.num_ai_factions as usize)
        .enumerate()
    {
        let name = match AI_NAMES.get(i) {
            Some(name) => name.to_string(),
            None => format!("Faction {}", i + 1),
        };
        let faction = world.add_faction(name, true);
        transfer(world, rules, region, faction, Acquisition::Instant);
    }

    world.status = GameStatus::Running;
    info!(
        %player,
        %home,
        ai_factions = world.factions.len() - 1,
        "game started"
    );
    // A big enough home region wins on the spot.
    victory::evaluate(world, rules);
    Ok(player)
}
