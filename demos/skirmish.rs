use std::path::PathBuf;

use conquest_sim::flush::flush_to_jsonl;
use conquest_sim::model::{Action, ActionKind, Upgrade};
use conquest_sim::save;
use conquest_sim::sim::{Driver, Rules, SimConfig};
use conquest_sim::worldgen::{self, WorldGenConfig};
use rand::SeedableRng;
use rand::rngs::SmallRng;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let config = WorldGenConfig {
        seed: 42,
        ..WorldGenConfig::default()
    };
    let rules = Rules::default();
    let out_dir = PathBuf::from("output");
    let save_path = out_dir.join("save.json");

    let mut world = worldgen::generate_world(&config);
    let home = world
        .regions
        .values()
        .max_by(|a, b| a.output.total_cmp(&b.output))
        .map(|r| r.id)
        .expect("map has regions");
    let mut rng = SmallRng::seed_from_u64(config.seed);
    let player = worldgen::setup_game(&mut world, &rules, &config, "Player", home, &mut rng)
        .expect("fresh map");

    if save::resume(&mut world, &save_path) {
        eprintln!("Resumed at turn {}", world.turn);
    }

    let mut driver = Driver::new(
        rules,
        SimConfig {
            speed: 3,
            save_path: Some(save_path),
            ..SimConfig::new(config.seed)
        },
    );

    // Play a crude human: grab the cheapest neighbor whenever there is money.
    for _ in 0..200 {
        let status = driver.run(&mut world, 60);
        if status.is_over() {
            break;
        }
        let balance = world.faction(player).map_or(0.0, |f| f.balance);
        let target = world
            .regions_of(player)
            .flat_map(|r| world.neighbors(r.id))
            .filter_map(|id| world.region(id))
            .filter(|r| !r.owner.is(player))
            .min_by(|a, b| a.reserves.total_cmp(&b.reserves))
            .map(|r| (r.id, r.reserves));
        match target {
            Some((region, reserves)) if balance * 0.75 > reserves => {
                world.queue_action(Action {
                    faction: player,
                    kind: ActionKind::Attack {
                        region,
                        commit_percent: 75,
                    },
                });
            }
            _ if balance > 3000.0 => {
                world.queue_action(Action {
                    faction: player,
                    kind: ActionKind::Upgrade {
                        upgrade: Upgrade::Economy,
                    },
                });
            }
            _ => {}
        }
    }

    eprintln!(
        "Status: {} after {} ticks, {} turns",
        world.status, world.current_tick, world.turn
    );
    for (rank, faction) in world.leaderboard().iter().enumerate().take(5) {
        eprintln!(
            "{:>2}. {:<20} regions={:<3} output={:<8.0} control={:.1}%",
            rank + 1,
            faction.name,
            faction.region_count(),
            faction.total_output(),
            world.control_percent(faction.id)
        );
    }

    if let Err(err) = flush_to_jsonl(&world, &out_dir) {
        eprintln!("Export failed: {err}");
    }
}
