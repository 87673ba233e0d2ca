use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};

use super::action::{Action, ActionResult};
use super::alliance::Alliance;
use super::event::{Event, EventKind};
use super::faction::Faction;
use super::region::{Owner, Region, RegionSeed};
use crate::id::{FactionId, IdGenerator, RegionId};

/// Where the game is in its lifecycle.
///
/// `Setup` covers world loading and initial territory assignment. Victory and
/// defeat are terminal and only reachable from `Running`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub enum GameStatus {
    #[default]
    Setup,
    Running,
    Victory,
    Defeat,
}

string_enum!(GameStatus {
    Setup => "setup",
    Running => "running",
    Victory => "victory",
    Defeat => "defeat",
});

impl GameStatus {
    pub fn is_over(self) -> bool {
        matches!(self, GameStatus::Victory | GameStatus::Defeat)
    }
}

/// The whole simulation context. Every rule takes it by explicit reference.
#[derive(Debug, Clone)]
pub struct World {
    pub regions: BTreeMap<RegionId, Region>,
    pub adjacency: BTreeMap<RegionId, BTreeSet<RegionId>>,
    pub factions: BTreeMap<FactionId, Faction>,
    pub alliances: Vec<Alliance>,
    pub events: Vec<Event>,
    pub pending_actions: Vec<Action>,
    pub action_results: Vec<ActionResult>,
    /// The human-controlled faction, once one has been created.
    pub player: Option<FactionId>,
    pub status: GameStatus,
    /// Driver ticks processed so far.
    pub current_tick: u64,
    /// Economic turns processed so far.
    pub turn: u64,
    pub id_gen: IdGenerator,
    next_faction: u32,
}

impl World {
    pub fn new() -> Self {
        Self {
            regions: BTreeMap::new(),
            adjacency: BTreeMap::new(),
            factions: BTreeMap::new(),
            alliances: Vec::new(),
            events: Vec::new(),
            pending_actions: Vec::new(),
            action_results: Vec::new(),
            player: None,
            status: GameStatus::Setup,
            current_tick: 0,
            turn: 0,
            id_gen: IdGenerator::new(),
            next_faction: 1,
        }
    }

    /// Build a world from a static geography. Regions are numbered in the
    /// order given; `edges` index into `seeds`.
    pub fn from_geography(seeds: &[RegionSeed], edges: &[(usize, usize)]) -> Self {
        let mut world = Self::new();
        let ids: Vec<RegionId> = seeds.iter().map(|s| world.add_region(s)).collect();
        for &(i, j) in edges {
            if let (Some(&a), Some(&b)) = (ids.get(i), ids.get(j)) {
                world.connect(a, b);
            }
        }
        world
    }

    // -- Regions --

    pub fn add_region(&mut self, seed: &RegionSeed) -> RegionId {
        let id = self.id_gen.next_region();
        self.regions.insert(id, Region::from_seed(id, seed));
        self.adjacency.entry(id).or_default();
        id
    }

    /// Mark two regions as neighbors. Self-loops and unknown regions are ignored.
    pub fn connect(&mut self, a: RegionId, b: RegionId) {
        if a == b || !self.regions.contains_key(&a) || !self.regions.contains_key(&b) {
            return;
        }
        self.adjacency.entry(a).or_default().insert(b);
        self.adjacency.entry(b).or_default().insert(a);
    }

    pub fn neighbors(&self, id: RegionId) -> impl Iterator<Item = RegionId> + '_ {
        self.adjacency.get(&id).into_iter().flatten().copied()
    }

    pub fn are_adjacent(&self, a: RegionId, b: RegionId) -> bool {
        self.adjacency.get(&a).is_some_and(|n| n.contains(&b))
    }

    pub fn region(&self, id: RegionId) -> Option<&Region> {
        self.regions.get(&id)
    }

    pub fn owner_of(&self, id: RegionId) -> Option<Owner> {
        self.regions.get(&id).map(|r| r.owner)
    }

    pub fn regions_of(&self, faction: FactionId) -> impl Iterator<Item = &Region> + '_ {
        self.regions.values().filter(move |r| r.owner.is(faction))
    }

    /// World-wide output, owned or not. Regions are never destroyed, so this
    /// is constant for a session.
    pub fn total_output(&self) -> f64 {
        self.regions.values().map(|r| r.output).sum()
    }

    // -- Factions --

    pub fn add_faction(&mut self, name: impl Into<String>, computer_controlled: bool) -> FactionId {
        let id = FactionId(self.next_faction);
        self.next_faction += 1;
        self.factions
            .insert(id, Faction::new(id, name, computer_controlled));
        id
    }

    /// Create the single human-controlled faction.
    pub fn add_player(&mut self, name: impl Into<String>) -> FactionId {
        let id = self.add_faction(name, false);
        self.player = Some(id);
        id
    }

    /// Replace the faction table wholesale, as when restoring a snapshot.
    pub(crate) fn replace_factions(&mut self, factions: Vec<Faction>) {
        self.factions = factions.into_iter().map(|f| (f.id, f)).collect();
        self.next_faction = self.factions.keys().map(|id| id.0 + 1).max().unwrap_or(1);
    }

    pub fn faction(&self, id: FactionId) -> Option<&Faction> {
        self.factions.get(&id)
    }

    pub fn faction_mut(&mut self, id: FactionId) -> Option<&mut Faction> {
        self.factions.get_mut(&id)
    }

    pub fn player_faction(&self) -> Option<&Faction> {
        self.player.and_then(|id| self.factions.get(&id))
    }

    /// Share of world output held by `faction`, in percent.
    pub fn control_percent(&self, faction: FactionId) -> f64 {
        let world_output = self.total_output();
        if world_output <= 0.0 {
            return 0.0;
        }
        self.factions
            .get(&faction)
            .map_or(0.0, |f| f.total_output() / world_output * 100.0)
    }

    /// Surviving factions ranked by output, largest first.
    pub fn leaderboard(&self) -> Vec<&Faction> {
        let mut ranked: Vec<&Faction> = self.factions.values().collect();
        ranked.sort_by(|a, b| {
            b.total_output()
                .total_cmp(&a.total_output())
                .then(a.id.cmp(&b.id))
        });
        ranked
    }

    /// Output and region count of `faction` recomputed from the map.
    pub fn recount(&self, faction: FactionId) -> (f64, u32) {
        self.regions_of(faction)
            .fold((0.0, 0), |(output, count), r| (output + r.output, count + 1))
    }

    // -- Alliances --

    pub fn are_allied(&self, x: FactionId, y: FactionId) -> bool {
        self.alliances.iter().any(|a| a.binds(x, y))
    }

    /// True if `owner` is `faction` itself or one of its allies.
    pub fn is_friendly(&self, faction: FactionId, owner: Owner) -> bool {
        match owner {
            Owner::Unclaimed => false,
            Owner::Faction(other) => other == faction || self.are_allied(faction, other),
        }
    }

    // -- Events & actions --

    /// Append an event stamped with the current tick. Returns it so callers
    /// can fill in participants.
    pub fn add_event(&mut self, kind: EventKind, description: String) -> &mut Event {
        let id = self.id_gen.next_id();
        self.events.push(Event {
            id,
            kind,
            tick: self.current_tick,
            description,
            actor: None,
            target: None,
            region: None,
            data: serde_json::Value::Null,
        });
        let last = self.events.len() - 1;
        &mut self.events[last]
    }

    pub fn queue_action(&mut self, action: Action) {
        self.pending_actions.push(action);
    }

    pub fn is_running(&self) -> bool {
        self.status == GameStatus::Running
    }

    pub(crate) fn name_of(&self, owner: Owner) -> &str {
        match owner {
            Owner::Unclaimed => "nobody",
            Owner::Faction(id) => self.factions.get(&id).map_or("unknown", |f| f.name.as_str()),
        }
    }
}

impl Default for World {
    fn default() -> Self {
        Self::new()
    }
}
