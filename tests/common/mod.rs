#![allow(dead_code)]

use conquest_sim::id::{FactionId, RegionId};
use conquest_sim::scenario::Scenario;

pub fn read_lines(path: &std::path::Path) -> Vec<String> {
    std::fs::read_to_string(path)
        .unwrap()
        .lines()
        .filter(|l| !l.is_empty())
        .map(String::from)
        .collect()
}

/// Player on a 700-output home next to a 100-output rival region, with 200
/// of unclaimed land elsewhere. Taking the rival's region puts the player at
/// 80% of the world.
pub struct NearWin {
    pub scenario: Scenario,
    pub player: FactionId,
    pub rival: FactionId,
    pub home: RegionId,
    pub frontier: RegionId,
}

pub fn near_win() -> NearWin {
    let mut s = Scenario::new();
    let home = s.region("Heartland", 700.0);
    let frontier = s.region("Frontier", 100.0);
    let wilds = s.region("Wilds", 200.0);
    s.link(home, frontier);
    s.link(frontier, wilds);
    let player = s.player("Player");
    let rival = s.ai("Rival");
    s.claim(home, player);
    s.claim(frontier, rival);
    s.start();
    NearWin {
        scenario: s,
        player,
        rival,
        home,
        frontier,
    }
}
