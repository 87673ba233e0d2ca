use std::fs;
use std::io;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::id::{FactionId, RegionId};
use crate::model::{Alliance, Faction, GameStatus, Owner, World};

/// The persisted part of a region. Geometry and names come from the
/// geography source on load.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RegionState {
    pub id: RegionId,
    pub owner: Owner,
    pub reserves: f64,
    pub output: f64,
    pub stability: f64,
}

/// Whole-game save slot contents. No schema version is kept.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    pub status: GameStatus,
    pub player: Option<FactionId>,
    pub current_tick: u64,
    pub turn: u64,
    pub factions: Vec<Faction>,
    pub regions: Vec<RegionState>,
    pub alliances: Vec<Alliance>,
}

const OUTPUT_EPSILON: f64 = 1e-6;

impl Snapshot {
    pub fn capture(world: &World) -> Self {
        Self {
            status: world.status,
            player: world.player,
            current_tick: world.current_tick,
            turn: world.turn,
            factions: world.factions.values().cloned().collect(),
            regions: world
                .regions
                .values()
                .map(|r| RegionState {
                    id: r.id,
                    owner: r.owner,
                    reserves: r.reserves,
                    output: r.output,
                    stability: r.stability,
                })
                .collect(),
            alliances: world.alliances.clone(),
        }
    }

    /// Apply this snapshot on top of a freshly loaded world.
    ///
    /// The snapshot must describe the same map (same region ids and outputs),
    /// reference only factions it contains, carry faction totals that agree
    /// with region ownership, and hold only finite, non-negative balances.
    /// Otherwise nothing is changed and the reason is returned.
    pub fn restore(&self, world: &mut World) -> Result<(), String> {
        let mut next = world.clone();
        next.replace_factions(self.factions.clone());

        if self.regions.len() != next.regions.len() {
            return Err(format!(
                "save has {} regions, map has {}",
                self.regions.len(),
                next.regions.len()
            ));
        }
        for state in &self.regions {
            let Some(region) = next.regions.get_mut(&state.id) else {
                return Err(format!("{} is not on this map", state.id));
            };
            if (region.output - state.output).abs() > OUTPUT_EPSILON {
                return Err(format!("{} output does not match the map", state.id));
            }
            if let Some(owner) = state.owner.faction()
                && !next.factions.contains_key(&owner)
            {
                return Err(format!("{} owned by unknown {owner}", state.id));
            }
            if !(0.0..=1.0).contains(&state.stability) || state.reserves < 0.0 {
                return Err(format!("{} has out-of-range values", state.id));
            }
            region.owner = state.owner;
            region.reserves = state.reserves.min(region.output);
            region.stability = state.stability;
            region.refresh_population();
        }
        for faction in next.factions.values() {
            if !faction.balance.is_finite() || faction.balance < 0.0 {
                return Err(format!("{} has an invalid balance", faction.id));
            }
            let (output, count) = next.recount(faction.id);
            if count != faction.region_count()
                || (output - faction.total_output()).abs() > OUTPUT_EPSILON
            {
                return Err(format!("{} totals disagree with the map", faction.id));
            }
        }
        if let Some(player) = self.player
            && !next.factions.contains_key(&player)
        {
            return Err(format!("player {player} is missing"));
        }

        next.player = self.player;
        next.status = self.status;
        next.current_tick = self.current_tick;
        next.turn = self.turn;
        next.alliances = self.alliances.clone();
        next.pending_actions.clear();
        *world = next;
        Ok(())
    }
}

/// Serialize the world into the save slot at `path`.
pub fn write_snapshot(world: &World, path: &Path) -> io::Result<()> {
    if let Some(dir) = path.parent()
        && !dir.as_os_str().is_empty()
    {
        fs::create_dir_all(dir)?;
    }
    let bytes = serde_json::to_vec(&Snapshot::capture(world))?;
    fs::write(path, bytes)
}

/// Read the save slot. A missing or unreadable save is treated as no save.
pub fn load_snapshot(path: &Path) -> Option<Snapshot> {
    let bytes = match fs::read(path) {
        Ok(bytes) => bytes,
        Err(err) if err.kind() == io::ErrorKind::NotFound => return None,
        Err(err) => {
            warn!(path = %path.display(), %err, "could not read save");
            return None;
        }
    };
    match serde_json::from_slice(&bytes) {
        Ok(snapshot) => Some(snapshot),
        Err(err) => {
            warn!(path = %path.display(), %err, "ignoring malformed save");
            None
        }
    }
}

/// Load the save slot into `world` if there is a usable one. Returns whether
/// anything was restored.
pub fn resume(world: &mut World, path: &Path) -> bool {
    let Some(snapshot) = load_snapshot(path) else {
        return false;
    };
    match snapshot.restore(world) {
        Ok(()) => {
            info!(path = %path.display(), turn = world.turn, "save restored");
            true
        }
        Err(reason) => {
            warn!(path = %path.display(), %reason, "ignoring inconsistent save");
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scenario::Scenario;

    fn game() -> (Scenario, FactionId, RegionId, RegionId) {
        let mut s = Scenario::new();
        let a = s.region("A", 400.0);
        let b = s.region("B", 600.0);
        let p = s.player("Player");
        let ai = s.ai("Rival");
        s.claim(a, p);
        s.claim(b, ai);
        s.start();
        (s, p, a, b)
    }

    #[test]
    fn capture_then_restore_reproduces_state() {
        let (mut s, p, a, _b) = game();
        s.set_balance(p, 321.0);
        s.set_reserves(a, 17.0);
        s.world.turn = 4;
        let snap = Snapshot::capture(&s.world);

        let (mut fresh, _, _, _) = game();
        snap.restore(&mut fresh.world).unwrap();
        assert_eq!(fresh.world.faction(p).unwrap().balance, 321.0);
        assert_eq!(fresh.world.region(a).unwrap().reserves, 17.0);
        assert_eq!(fresh.world.turn, 4);
        assert_eq!(fresh.world.status, GameStatus::Running);
    }

    #[test]
    fn mismatched_totals_are_rejected() {
        let (s, p, _a, _b) = game();
        let mut snap = Snapshot::capture(&s.world);
        snap.regions[0].owner = Owner::Unclaimed;

        let (mut fresh, _, _, _) = game();
        fresh.set_balance(p, 5.0);
        assert!(snap.restore(&mut fresh.world).is_err());
        assert_eq!(fresh.world.faction(p).unwrap().balance, 5.0);
    }

    #[test]
    fn invalid_balance_is_rejected() {
        for bad in [-1.0, f64::NAN, f64::INFINITY] {
            let (s, p, _a, _b) = game();
            let mut snap = Snapshot::capture(&s.world);
            snap.factions
                .iter_mut()
                .filter(|f| f.id == p)
                .for_each(|f| f.balance = bad);

            let (mut fresh, _, _, _) = game();
            fresh.set_balance(p, 12.0);
            assert!(snap.restore(&mut fresh.world).is_err(), "balance {bad}");
            assert_eq!(fresh.world.faction(p).unwrap().balance, 12.0);
        }
    }

    #[test]
    fn unknown_region_is_rejected() {
        let (s, _p, _a, _b) = game();
        let mut snap = Snapshot::capture(&s.world);
        snap.regions[1].id = RegionId(999);
        let (mut fresh, _, _, _) = game();
        assert!(snap.restore(&mut fresh.world).is_err());
    }

    #[test]
    fn write_and_resume() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("slot").join("save.json");
        let (mut s, p, _a, _b) = game();
        s.set_balance(p, 77.0);
        write_snapshot(&s.world, &path).unwrap();

        let (mut fresh, _, _, _) = game();
        assert!(resume(&mut fresh.world, &path));
        assert_eq!(fresh.world.faction(p).unwrap().balance, 77.0);
    }

    #[test]
    fn missing_or_garbage_save_is_no_save() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("none.json");
        let (mut s, _, _, _) = game();
        assert!(!resume(&mut s.world, &missing));

        let garbage = dir.path().join("bad.json");
        std::fs::write(&garbage, b"{ not json").unwrap();
        assert!(load_snapshot(&garbage).is_none());
        assert!(!resume(&mut s.world, &garbage));
        assert!(s.world.is_running());
    }
}
