mod common;

use conquest_sim::model::{Action, ActionKind, EventKind, GameStatus, Owner, Upgrade};
use conquest_sim::scenario::Scenario;
use conquest_sim::sim::{self, Driver, Rules, SimConfig};
use conquest_sim::testutil::assert_totals_consistent;

#[test]
fn victory_is_reached_once_and_halts_the_game() {
    let mut g = common::near_win();
    let s = &mut g.scenario;
    s.set_balance(g.player, 2000.0);

    s.world.queue_action(Action {
        faction: g.player,
        kind: ActionKind::Attack {
            region: g.frontier,
            commit_percent: 50,
        },
    });
    let mut driver = Driver::new(Rules::default(), SimConfig::new(5));
    assert!(!driver.step(&mut s.world));

    assert_eq!(s.world.status, GameStatus::Victory);
    assert_eq!(s.world.owner_of(g.frontier), Some(Owner::Faction(g.player)));
    assert!(s.world.faction(g.rival).unwrap().is_eliminated());
    let victories = s
        .world
        .events
        .iter()
        .filter(|e| e.kind == EventKind::Victory)
        .count();
    assert_eq!(victories, 1);

    // Frozen from here on: no income, no actions, no clock.
    let tick = s.world.current_tick;
    let balance = s.world.faction(g.player).unwrap().balance;
    s.world.queue_action(Action {
        faction: g.player,
        kind: ActionKind::Upgrade {
            upgrade: Upgrade::Military,
        },
    });
    assert_eq!(driver.run(&mut s.world, 500), GameStatus::Victory);
    assert_eq!(s.world.current_tick, tick);
    assert_eq!(s.world.faction(g.player).unwrap().balance, balance);
    assert_totals_consistent(&s.world);
}

#[test]
fn conquest_reports_the_status_it_caused() {
    let mut g = common::near_win();
    let s = &mut g.scenario;
    s.set_balance(g.player, 1000.0);
    let outcome = sim::attack(&mut s.world, &s.rules, g.player, g.frontier, 100);
    assert_eq!(
        outcome.transfer().and_then(|t| t.game_over),
        Some(GameStatus::Victory)
    );
}

#[test]
fn losing_every_region_is_defeat() {
    let mut s = Scenario::new();
    let a = s.region("A", 300.0);
    let b = s.region("B", 300.0);
    let c = s.region("C", 300.0);
    s.link(a, b);
    s.link(b, c);
    let player = s.player("Player");
    let rival = s.ai("Rival");
    s.claim(a, player);
    s.claim(b, player);
    s.claim(c, rival);
    s.start();

    s.set_balance(rival, 10_000.0);
    let first = sim::attack(&mut s.world, &s.rules, rival, b, 50);
    assert!(first.transfer().is_some());
    assert!(s.world.is_running());
    assert_totals_consistent(&s.world);

    let second = sim::attack(&mut s.world, &s.rules, rival, a, 50);
    let transfer = second.transfer().unwrap();
    assert_eq!(transfer.eliminated, Some(player));
    assert_eq!(transfer.game_over, Some(GameStatus::Defeat));
    assert_eq!(s.world.status, GameStatus::Defeat);
    assert!(s.world.events.iter().any(|e| e.kind == EventKind::Defeat));

    let mut driver = Driver::new(Rules::default(), SimConfig::new(1));
    assert!(!driver.step(&mut s.world));
    assert_totals_consistent(&s.world);
}

#[test]
fn eliminated_rival_loses_its_alliances() {
    let mut g = common::near_win();
    let s = &mut g.scenario;
    // Raise the bar so taking the frontier does not end the game.
    let mut rules = Rules::default();
    rules.victory_percent = 95.0;
    s.rules = rules.clone();

    s.world.queue_action(Action {
        faction: g.rival,
        kind: ActionKind::ProposeAlliance {
            with: g.player,
            turns: 50,
        },
    });
    let mut driver = Driver::new(rules, SimConfig::new(2));
    driver.step(&mut s.world);
    assert!(s.world.are_allied(g.player, g.rival));

    // Allies never attack each other through the AI, but the player may
    // still break the pact by force.
    s.set_balance(g.player, 1000.0);
    s.world.queue_action(Action {
        faction: g.player,
        kind: ActionKind::Attack {
            region: g.frontier,
            commit_percent: 100,
        },
    });
    driver.step(&mut s.world);
    assert!(s.world.faction(g.rival).unwrap().is_eliminated());
    assert!(s.world.alliances.is_empty());
    assert!(s.world.is_running());
    assert_eq!(s.world.owner_of(g.home), Some(Owner::Faction(g.player)));
}
