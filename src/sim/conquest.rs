use tracing::info;

use super::rules::Rules;
use super::signal::{Signal, SignalKind};
use super::victory;
use crate::id::{FactionId, RegionId};
use crate::model::{EventKind, GameStatus, Owner, World};

/// How a region is being acquired.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Acquisition {
    /// Initial territory assignment: full reserves, full stability.
    Instant,
    /// Taken by force: weak garrison and occupation unrest.
    Conquest,
}

/// Record of one ownership change.
#[derive(Debug, Clone, PartialEq)]
pub struct Transfer {
    pub region_id: RegionId,
    pub previous: Owner,
    pub new_owner: FactionId,
    pub event_id: u64,
    /// The previous owner, if this transfer took its last region.
    pub eliminated: Option<FactionId>,
    /// Terminal status reached as a result of this transfer.
    pub game_over: Option<GameStatus>,
}

impl Transfer {
    /// Signals other systems should see for this transfer.
    pub fn signals(&self) -> Vec<Signal> {
        self.eliminated
            .map(|faction_id| Signal {
                event_id: self.event_id,
                kind: SignalKind::FactionEliminated { faction_id },
            })
            .into_iter()
            .collect()
    }
}

/// Hand `region_id` to `new_owner`, keeping both factions' cached totals in
/// step, then run the victory check.
///
/// Returns `None` without touching anything if either id is unknown.
pub fn transfer(
    world: &mut World,
    rules: &Rules,
    region_id: RegionId,
    new_owner: FactionId,
    acquisition: Acquisition,
) -> Option<Transfer> {
    if !world.factions.contains_key(&new_owner) {
        return None;
    }
    let region = world.regions.get_mut(&region_id)?;
    let previous = region.owner;
    let output = region.output;

    region.owner = Owner::Faction(new_owner);
    match acquisition {
        Acquisition::Instant => {
            region.reserves = output;
            region.stability = 1.0;
        }
        Acquisition::Conquest => {
            region.reserves = (output * rules.conquest_reserve_fraction).floor();
            region.stability = rules.occupation_stability;
        }
    }
    region.refresh_population();
    let region_name = region.name.clone();

    let mut eliminated = None;
    if let Some(old) = previous.faction()
        && let Some(faction) = world.factions.get_mut(&old)
    {
        faction.lose_region(output);
        if faction.is_eliminated() {
            eliminated = Some(old);
        }
    }
    if let Some(faction) = world.factions.get_mut(&new_owner) {
        faction.gain_region(output);
    }

    let new_name = world.name_of(Owner::Faction(new_owner)).to_string();
    let old_name = world.name_of(previous).to_string();
    let (kind, description) = match acquisition {
        Acquisition::Instant => (
            EventKind::Claimed,
            format!("{new_name} claimed {region_name}"),
        ),
        Acquisition::Conquest => (
            EventKind::Conquest,
            format!("{new_name} conquered {region_name} from {old_name}"),
        ),
    };
    let event = world.add_event(kind, description);
    event.actor = Some(new_owner);
    event.target = previous.faction();
    event.region = Some(region_id);
    let event_id = event.id;

    if acquisition == Acquisition::Conquest {
        info!(region = %region_id, from = %old_name, to = %new_name, "region conquered");
    }

    // Self-transfer can't eliminate anyone.
    if let Some(old) = eliminated.filter(|&old| old != new_owner) {
        let name = world.name_of(Owner::Faction(old)).to_string();
        let event = world.add_event(
            EventKind::Elimination,
            format!("{name} lost its last region to {new_name}"),
        );
        event.actor = Some(new_owner);
        event.target = Some(old);
        event.region = Some(region_id);
        info!(faction = %old, "faction eliminated");
    } else {
        eliminated = None;
    }

    let game_over = victory::evaluate(world, rules);

    Some(Transfer {
        region_id,
        previous,
        new_owner,
        event_id,
        eliminated,
        game_over,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scenario::Scenario;

    #[test]
    fn instant_claim_fills_reserves() {
        let mut s = Scenario::new();
        let r = s.region("Vale", 800.0);
        let f = s.ai("Rival");
        let t = transfer(&mut s.world, &s.rules, r, f, Acquisition::Instant).unwrap();
        assert_eq!(t.previous, Owner::Unclaimed);
        let region = s.world.region(r).unwrap();
        assert_eq!(region.reserves, 800.0);
        assert_eq!(region.stability, 1.0);
        let faction = s.world.faction(f).unwrap();
        assert_eq!(faction.total_output(), 800.0);
        assert_eq!(faction.region_count(), 1);
    }

    #[test]
    fn conquest_leaves_weak_garrison() {
        let mut s = Scenario::new();
        let r = s.region("Vale", 805.0);
        let a = s.ai("A");
        let b = s.ai("B");
        s.claim(r, a);
        let t = transfer(&mut s.world, &s.rules, r, b, Acquisition::Conquest).unwrap();
        assert_eq!(t.previous, Owner::Faction(a));
        assert_eq!(t.eliminated, Some(a));
        let region = s.world.region(r).unwrap();
        assert_eq!(region.reserves, 80.0);
        assert_eq!(region.stability, 0.3);
        assert_eq!(region.population, 805.0 * 10.0 * 0.3);
        assert_eq!(s.world.faction(a).unwrap().region_count(), 0);
        assert_eq!(s.world.faction(b).unwrap().total_output(), 805.0);
        assert!(
            s.world
                .events
                .iter()
                .any(|e| e.kind == EventKind::Elimination && e.target == Some(a))
        );
    }

    #[test]
    fn unknown_ids_are_ignored() {
        let mut s = Scenario::new();
        let r = s.region("Vale", 100.0);
        let a = s.ai("A");
        assert!(transfer(&mut s.world, &s.rules, RegionId(999), a, Acquisition::Instant).is_none());
        assert!(transfer(&mut s.world, &s.rules, r, FactionId(99), Acquisition::Instant).is_none());
        assert_eq!(s.world.owner_of(r), Some(Owner::Unclaimed));
        assert!(s.world.events.is_empty());
    }

    #[test]
    fn round_trip_restores_totals() {
        let mut s = Scenario::new();
        let r1 = s.region("One", 300.0);
        let r2 = s.region("Two", 500.0);
        let r3 = s.region("Three", 700.0);
        let a = s.ai("A");
        let b = s.ai("B");
        s.claim(r1, a);
        s.claim(r2, a);
        s.claim(r3, b);
        let totals = |world: &World, f: FactionId| {
            let faction = world.faction(f).unwrap();
            (faction.total_output(), faction.region_count())
        };
        let before_a = totals(&s.world, a);
        let before_b = totals(&s.world, b);

        transfer(&mut s.world, &s.rules, r2, b, Acquisition::Conquest).unwrap();
        transfer(&mut s.world, &s.rules, r2, a, Acquisition::Conquest).unwrap();

        assert_eq!(totals(&s.world, a), before_a);
        assert_eq!(totals(&s.world, b), before_b);
    }

    #[test]
    fn self_transfer_keeps_totals() {
        let mut s = Scenario::new();
        let r = s.region("Vale", 400.0);
        let a = s.ai("A");
        s.claim(r, a);
        let t = transfer(&mut s.world, &s.rules, r, a, Acquisition::Conquest).unwrap();
        assert_eq!(t.eliminated, None);
        let f = s.world.faction(a).unwrap();
        assert_eq!(f.region_count(), 1);
        assert_eq!(f.total_output(), 400.0);
        assert!(!s.world.events.iter().any(|e| e.kind == EventKind::Elimination));
    }

    #[test]
    fn conquest_signals_include_elimination() {
        let mut s = Scenario::new();
        let r = s.region("Vale", 400.0);
        let a = s.ai("A");
        let b = s.ai("B");
        s.claim(r, a);
        let t = transfer(&mut s.world, &s.rules, r, b, Acquisition::Conquest).unwrap();
        let signals = t.signals();
        assert_eq!(signals.len(), 1);
        assert!(matches!(
            signals[0].kind,
            SignalKind::FactionEliminated { faction_id } if faction_id == a
        ));
    }
}
