pub mod config;
pub mod geography;
pub mod setup;

use rand::SeedableRng;
use rand::rngs::SmallRng;

use crate::model::World;

pub use config::WorldGenConfig;
pub use geography::{Geography, generate_geography};
pub use setup::{SetupError, setup_game};

/// Generate a map of unclaimed regions. Deterministic for a given seed.
pub fn generate_world(config: &WorldGenConfig) -> World {
    let mut rng = SmallRng::seed_from_u64(config.seed);
    let geography = generate_geography(config, &mut rng);
    World::from_geography(&geography.seeds, &geography.edges)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn generated_world_starts_unclaimed() {
        let config = WorldGenConfig::default();
        let world = generate_world(&config);
        assert_eq!(world.regions.len(), config.num_regions as usize);
        assert!(world.factions.is_empty());
        assert!(world.regions.values().all(|r| r.output >= 10.0));
        assert!(world.regions.keys().all(|&id| world.neighbors(id).count() > 0));
    }
}
