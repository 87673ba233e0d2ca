use rand::SeedableRng;
use rand::rngs::SmallRng;

use crate::id::FactionId;
use crate::model::World;
use crate::sim::{Driver, Rules, Signal, SimConfig, SimSystem, TickContext};
use crate::worldgen::{self, WorldGenConfig};

// ---------------------------------------------------------------------------
// Tick execution helpers
// ---------------------------------------------------------------------------

/// Run a single system tick with a fresh seeded RNG. Returns emitted signals.
pub fn tick_system(
    world: &mut World,
    rules: &Rules,
    system: &mut dyn SimSystem,
    seed: u64,
) -> Vec<Signal> {
    let mut rng = SmallRng::seed_from_u64(seed);
    let mut signals = Vec::new();
    let mut ctx = TickContext {
        world,
        rules,
        rng: &mut rng,
        signals: &mut signals,
        inbox: &[],
    };
    system.tick(&mut ctx);
    signals
}

/// Run a system's handle_signals with the given inbox. Returns newly emitted signals.
pub fn deliver_signals(
    world: &mut World,
    rules: &Rules,
    system: &mut dyn SimSystem,
    inbox: &[Signal],
    seed: u64,
) -> Vec<Signal> {
    let mut rng = SmallRng::seed_from_u64(seed);
    let mut signals = Vec::new();
    let mut ctx = TickContext {
        world,
        rules,
        rng: &mut rng,
        signals: &mut signals,
        inbox,
    };
    system.handle_signals(&mut ctx);
    signals
}

// ---------------------------------------------------------------------------
// Whole-game helpers
// ---------------------------------------------------------------------------

/// Generate a map for `seed` and set up a game with the player on the
/// smallest region. Returns the running world and the player id.
pub fn new_game(seed: u64) -> (World, FactionId) {
    let config = WorldGenConfig {
        seed,
        ..WorldGenConfig::default()
    };
    let mut world = worldgen::generate_world(&config);
    let home = world
        .regions
        .values()
        .min_by(|a, b| a.output.total_cmp(&b.output).then(a.id.cmp(&b.id)))
        .map(|r| r.id)
        .expect("generated map has regions");
    let mut rng = SmallRng::seed_from_u64(seed);
    let player = worldgen::setup_game(
        &mut world,
        &Rules::default(),
        &config,
        "Player",
        home,
        &mut rng,
    )
    .expect("setup on a fresh map succeeds");
    (world, player)
}

/// Generate a game and drive it for `frames` frames with the default systems.
pub fn generate_and_run(seed: u64, frames: u64) -> World {
    let (mut world, _) = new_game(seed);
    let mut driver = Driver::new(Rules::default(), SimConfig::new(seed));
    driver.run(&mut world, frames);
    world
}

// ---------------------------------------------------------------------------
// Invariant checks
// ---------------------------------------------------------------------------

/// Panic unless every faction's cached totals match a recount of the map.
pub fn assert_totals_consistent(world: &World) {
    for faction in world.factions.values() {
        let (output, count) = world.recount(faction.id);
        assert_eq!(
            faction.region_count(),
            count,
            "{} region count drifted",
            faction.id
        );
        assert!(
            (faction.total_output() - output).abs() < 1e-6,
            "{} total output {} != recount {output}",
            faction.id,
            faction.total_output()
        );
        assert_eq!(faction.is_eliminated(), count == 0);
    }
}

/// Panic if any region's reserves or stability are out of range.
pub fn assert_regions_in_range(world: &World) {
    for region in world.regions.values() {
        assert!(
            region.reserves >= 0.0 && region.reserves <= region.output,
            "{} reserves {} outside 0..={}",
            region.id,
            region.reserves,
            region.output
        );
        assert!(
            (0.0..=1.0).contains(&region.stability),
            "{} stability {}",
            region.id,
            region.stability
        );
    }
}
