mod common;

use conquest_sim::flush::flush_to_jsonl;
use conquest_sim::model::{Event, Faction, Region};
use conquest_sim::testutil::generate_and_run;

#[test]
fn exported_world_reads_back() {
    let world = generate_and_run(21, 3_000);
    let dir = tempfile::tempdir().unwrap();
    flush_to_jsonl(&world, dir.path()).unwrap();

    let regions = common::read_lines(&dir.path().join("regions.jsonl"));
    assert_eq!(regions.len(), world.regions.len());
    for line in &regions {
        let region: Region = serde_json::from_str(line).unwrap();
        let live = world.region(region.id).unwrap();
        assert_eq!(region.owner, live.owner);
        assert_eq!(region.output, live.output);
        assert!((region.reserves - live.reserves).abs() < 1e-6);
    }

    let factions = common::read_lines(&dir.path().join("factions.jsonl"));
    assert_eq!(factions.len(), world.factions.len());
    let first: Faction = serde_json::from_str(&factions[0]).unwrap();
    let live = world.faction(first.id).unwrap();
    assert_eq!(first.name, live.name);
    assert_eq!(first.region_count(), live.region_count());

    let events = common::read_lines(&dir.path().join("events.jsonl"));
    assert_eq!(events.len(), world.events.len());
    let last: Event = serde_json::from_str(events.last().unwrap()).unwrap();
    assert_eq!(last.id, world.events.last().unwrap().id);
}
