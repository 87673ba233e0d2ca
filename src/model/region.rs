use serde::{Deserialize, Serialize};

use crate::id::{FactionId, RegionId};

/// Who controls a region.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Owner {
    #[default]
    Unclaimed,
    Faction(FactionId),
}

impl Owner {
    pub fn faction(self) -> Option<FactionId> {
        match self {
            Owner::Unclaimed => None,
            Owner::Faction(id) => Some(id),
        }
    }

    pub fn is(self, faction: FactionId) -> bool {
        self == Owner::Faction(faction)
    }
}

impl From<FactionId> for Owner {
    fn from(id: FactionId) -> Self {
        Owner::Faction(id)
    }
}

/// Static description of a region as supplied by a geography source.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RegionSeed {
    pub name: String,
    /// Surface area in steradians, the unit the output formula is tuned for.
    pub area: f64,
    /// Centroid in map units; drives adjacency.
    pub x: f64,
    pub y: f64,
}

/// A unit of ownable territory.
///
/// `output` is fixed at creation. `reserves` stays within `0..=output`
/// outside of the instant between combat damage and clamping.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Region {
    pub id: RegionId,
    pub name: String,
    pub owner: Owner,
    pub output: f64,
    pub reserves: f64,
    /// Occupation damping in `[0, 1]`; recovers toward 1.0.
    pub stability: f64,
    /// Display only.
    pub population: f64,
    pub x: f64,
    pub y: f64,
}

/// Lowest output any region can have.
pub const MIN_OUTPUT: f64 = 10.0;
/// Output per steradian of area.
pub const OUTPUT_PER_AREA: f64 = 100_000.0;
/// Population shown per point of output at full stability.
pub const POPULATION_PER_OUTPUT: f64 = 10.0;

/// Economic output derived from a region's area.
pub fn output_from_area(area: f64) -> f64 {
    let raw = (area.max(0.0) * OUTPUT_PER_AREA).floor();
    raw.max(MIN_OUTPUT)
}

impl Region {
    /// Build an unclaimed region from its seed. Starting reserves are half
    /// the output, rounded down.
    pub fn from_seed(id: RegionId, seed: &RegionSeed) -> Self {
        let output = output_from_area(seed.area);
        Self {
            id,
            name: seed.name.clone(),
            owner: Owner::Unclaimed,
            output,
            reserves: (output / 2.0).floor(),
            stability: 1.0,
            population: output * POPULATION_PER_OUTPUT,
            x: seed.x,
            y: seed.y,
        }
    }

    /// Remove up to `damage` from reserves. Reserves never go below zero.
    pub fn apply_damage(&mut self, damage: f64) {
        self.reserves = (self.reserves - damage).max(0.0);
    }

    /// Add to reserves without exceeding output.
    pub fn replenish(&mut self, amount: f64) {
        self.reserves = (self.reserves + amount).min(self.output);
    }

    pub fn is_full(&self) -> bool {
        self.reserves >= self.output
    }

    pub fn refresh_population(&mut self) {
        self.population = self.output * POPULATION_PER_OUTPUT * self.stability;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn seed(area: f64) -> RegionSeed {
        RegionSeed {
            name: "Test".to_string(),
            area,
            x: 0.0,
            y: 0.0,
        }
    }

    #[test]
    fn output_has_floor() {
        assert_eq!(output_from_area(0.0), MIN_OUTPUT);
        assert_eq!(output_from_area(0.00001), MIN_OUTPUT);
        assert_eq!(output_from_area(0.012345), 1234.0);
    }

    #[test]
    fn new_region_starts_half_garrisoned() {
        let r = Region::from_seed(RegionId(1), &seed(0.0101));
        assert_eq!(r.output, 1010.0);
        assert_eq!(r.reserves, 505.0);
        assert_eq!(r.owner, Owner::Unclaimed);
        assert_eq!(r.stability, 1.0);
        assert_eq!(r.population, 10_100.0);
    }

    #[test]
    fn damage_clamps_at_zero() {
        let mut r = Region::from_seed(RegionId(1), &seed(0.01));
        r.apply_damage(10_000.0);
        assert_eq!(r.reserves, 0.0);
    }

    #[test]
    fn replenish_caps_at_output() {
        let mut r = Region::from_seed(RegionId(1), &seed(0.01));
        r.replenish(5_000.0);
        assert_eq!(r.reserves, r.output);
        assert!(r.is_full());
    }

    #[test]
    fn owner_helpers() {
        let owner = Owner::from(FactionId(3));
        assert!(owner.is(FactionId(3)));
        assert!(!owner.is(FactionId(4)));
        assert_eq!(owner.faction(), Some(FactionId(3)));
        assert_eq!(Owner::Unclaimed.faction(), None);
    }
}
