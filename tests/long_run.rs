mod common;

use conquest_sim::model::{EventKind, GameStatus, World};
use conquest_sim::save::{self, load_snapshot};
use conquest_sim::scenario::Scenario;
use conquest_sim::sim::{Driver, Rules, SimConfig};
use conquest_sim::testutil::{
    assert_regions_in_range, assert_totals_consistent, generate_and_run, new_game,
};

fn fingerprint(world: &World) -> Vec<(u64, String, u32)> {
    world
        .events
        .iter()
        .map(|e| (e.tick, e.kind.to_string(), e.actor.map_or(0, |a| a.0)))
        .collect()
}

#[test]
fn cached_totals_track_the_map_every_frame() {
    for seed in [1, 7, 23] {
        let (mut world, _player) = new_game(seed);
        let mut driver = Driver::new(Rules::default(), SimConfig::new(seed));
        for _ in 0..6_000 {
            let running = driver.step(&mut world);
            assert_totals_consistent(&world);
            assert_regions_in_range(&world);
            if !running {
                break;
            }
        }
    }
}

#[test]
fn ai_factions_fight_over_a_long_game() {
    let world = generate_and_run(11, 12_000);
    assert!(world.turn > 0);
    let fights = world
        .events
        .iter()
        .filter(|e| matches!(e.kind, EventKind::Conquest | EventKind::AttackRepelled))
        .count();
    assert!(fights > 0, "no attacks in 200 economic turns");
    // Ticks never run backwards in the log.
    assert!(world.events.windows(2).all(|w| w[0].tick <= w[1].tick));
}

#[test]
fn same_seed_same_game() {
    let a = generate_and_run(99, 4_000);
    let b = generate_and_run(99, 4_000);
    assert_eq!(a.status, b.status);
    assert_eq!(a.current_tick, b.current_tick);
    assert_eq!(fingerprint(&a), fingerprint(&b));
    let owners = |w: &World| w.regions.values().map(|r| r.owner).collect::<Vec<_>>();
    assert_eq!(owners(&a), owners(&b));
}

#[test]
fn faster_speed_runs_more_turns() {
    let (mut slow, _) = new_game(4);
    let (mut fast, _) = new_game(4);
    Driver::new(Rules::default(), SimConfig::new(4)).run(&mut slow, 600);
    let mut driver = Driver::new(Rules::default(), SimConfig::new(4));
    driver.set_speed(3);
    driver.run(&mut fast, 600);
    if slow.is_running() && fast.is_running() {
        assert!(fast.turn > slow.turn);
    }
}

#[test]
fn paused_game_does_not_advance_turns() {
    let (mut world, _) = new_game(3);
    let mut driver = Driver::new(
        Rules::default(),
        SimConfig {
            speed: 0,
            ..SimConfig::new(3)
        },
    );
    driver.run(&mut world, 1_000);
    assert_eq!(world.turn, 0);
    assert_eq!(world.current_tick, 1_000);
}

#[test]
fn snapshot_is_written_after_each_economic_turn() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("save.json");
    let (mut world, player) = new_game(8);
    let mut driver = Driver::new(
        Rules::default(),
        SimConfig {
            save_path: Some(path.clone()),
            ..SimConfig::new(8)
        },
    );

    driver.run(&mut world, 60);
    assert!(!path.exists());
    driver.run(&mut world, 1);
    let first = load_snapshot(&path).unwrap();
    assert_eq!(first.turn, 1);
    assert_eq!(first.current_tick, 61);

    driver.run(&mut world, 61);
    let second = load_snapshot(&path).unwrap();
    assert_eq!(second.turn, 2);

    // The saved game resumes onto a freshly generated copy of the map.
    let (mut fresh, _) = new_game(8);
    assert!(save::resume(&mut fresh, &path));
    assert_eq!(fresh.turn, 2);
    let saved = fresh.faction(player).unwrap().balance;
    let live = world.faction(player).unwrap().balance;
    assert!((saved - live).abs() < 1e-6);
    assert_totals_consistent(&fresh);
}

#[test]
fn game_ending_on_a_save_tick_is_not_saved() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("save.json");

    let mut s = Scenario::new();
    let home = s.region("Home", 100.0);
    let keep = s.region("Keep", 1000.0);
    s.link(home, keep);
    let player = s.player("Player");
    let rival = s.ai("Rival");
    s.claim(home, player);
    s.claim(keep, rival);
    s.set_reserves(home, 0.0);
    s.set_balance(rival, 100_000.0);
    s.start();

    let mut rules = Rules::default();
    rules.income_interval = 1;
    rules.ai_interval = 1;
    rules.ai_border_bias = 1.0;
    let mut driver = Driver::new(
        rules,
        SimConfig {
            save_path: Some(path.clone()),
            ..SimConfig::new(6)
        },
    );
    let status = driver.run(&mut s.world, 10);

    // The economic turn and the fatal attack share tick 2.
    assert_eq!(status, GameStatus::Defeat);
    assert_eq!(s.world.turn, 1);
    assert!(!path.exists());
}
