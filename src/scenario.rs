use crate::id::{FactionId, RegionId};
use crate::model::{GameStatus, RegionSeed, World};
use crate::sim::{Acquisition, Rules, transfer};

/// Builder for small hand-made games used in tests.
///
/// Regions are created with an exact output instead of an area, unlinked
/// until [`Scenario::link`] is called. The game stays in `Setup` until
/// [`Scenario::start`].
pub struct Scenario {
    pub world: World,
    pub rules: Rules,
}

impl Default for Scenario {
    fn default() -> Self {
        Self::new()
    }
}

impl Scenario {
    pub fn new() -> Self {
        Self {
            world: World::new(),
            rules: Rules::default(),
        }
    }

    // -- Map --

    /// Add an unclaimed region with the given output. Reserves start at half
    /// the output, as on a generated map.
    pub fn region(&mut self, name: &str, output: f64) -> RegionId {
        let x = self.world.regions.len() as f64;
        let id = self.world.add_region(&RegionSeed {
            name: name.to_string(),
            area: 0.0,
            x,
            y: 0.0,
        });
        if let Some(region) = self.world.regions.get_mut(&id) {
            region.output = output;
            region.reserves = (output / 2.0).floor();
            region.refresh_population();
        }
        id
    }

    pub fn link(&mut self, a: RegionId, b: RegionId) {
        self.world.connect(a, b);
    }

    // -- Factions --

    pub fn player(&mut self, name: &str) -> FactionId {
        self.world.add_player(name)
    }

    pub fn ai(&mut self, name: &str) -> FactionId {
        self.world.add_faction(name, true)
    }

    /// Give `region` to `faction` the way setup does (instant acquisition).
    pub fn claim(&mut self, region: RegionId, faction: FactionId) {
        let claimed = transfer(
            &mut self.world,
            &self.rules,
            region,
            faction,
            Acquisition::Instant,
        );
        assert!(claimed.is_some(), "claim of {region} by {faction} failed");
    }

    pub fn set_balance(&mut self, faction: FactionId, balance: f64) {
        let f = self.world.faction_mut(faction).expect("unknown faction");
        f.balance = balance;
    }

    pub fn set_reserves(&mut self, region: RegionId, reserves: f64) {
        let r = self.world.regions.get_mut(&region).expect("unknown region");
        r.reserves = reserves;
    }

    /// Leave setup and start the clock.
    pub fn start(&mut self) {
        self.world.status = GameStatus::Running;
    }
}
