use tracing::info;

use super::context::TickContext;
use super::rules::Rules;
use super::signal::SignalKind;
use super::system::{Cadence, SimSystem};
use crate::id::FactionId;
use crate::model::{Alliance, EventKind, Owner, World};

/// Ages alliances once per economic turn and dissolves pacts whose member
/// has been wiped off the map.
pub struct DiplomacySystem;

impl SimSystem for DiplomacySystem {
    fn name(&self) -> &str {
        "diplomacy"
    }

    fn cadence(&self, rules: &Rules) -> Cadence {
        Cadence::Every(rules.income_interval)
    }

    fn tick(&mut self, ctx: &mut TickContext) {
        expire_alliances(ctx.world);
    }

    fn handle_signals(&mut self, ctx: &mut TickContext) {
        for signal in ctx.inbox {
            if let SignalKind::FactionEliminated { faction_id } = signal.kind {
                dissolve_alliances(ctx.world, faction_id);
            }
        }
    }
}

/// Why an alliance could not be formed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AllianceRefusal {
    SameFaction,
    UnknownFaction,
    Eliminated,
    AlreadyAllied,
    NoDuration,
}

impl AllianceRefusal {
    pub fn reason(self) -> &'static str {
        match self {
            AllianceRefusal::SameFaction => "a faction cannot ally with itself",
            AllianceRefusal::UnknownFaction => "faction does not exist",
            AllianceRefusal::Eliminated => "eliminated factions cannot make pacts",
            AllianceRefusal::AlreadyAllied => "factions are already allied",
            AllianceRefusal::NoDuration => "alliance must last at least one turn",
        }
    }
}

/// Bind two factions for `turns` economic turns. Returns the event id.
pub fn form_alliance(
    world: &mut World,
    x: FactionId,
    y: FactionId,
    turns: u32,
) -> Result<u64, AllianceRefusal> {
    if x == y {
        return Err(AllianceRefusal::SameFaction);
    }
    if turns == 0 {
        return Err(AllianceRefusal::NoDuration);
    }
    let (Some(fx), Some(fy)) = (world.faction(x), world.faction(y)) else {
        return Err(AllianceRefusal::UnknownFaction);
    };
    if fx.is_eliminated() || fy.is_eliminated() {
        return Err(AllianceRefusal::Eliminated);
    }
    if world.are_allied(x, y) {
        return Err(AllianceRefusal::AlreadyAllied);
    }

    world.alliances.push(Alliance::new(x, y, turns));
    let description = format!(
        "{} and {} signed a pact for {turns} turns",
        world.name_of(Owner::Faction(x)),
        world.name_of(Owner::Faction(y)),
    );
    let event = world.add_event(EventKind::AllianceFormed, description);
    event.actor = Some(x);
    event.target = Some(y);
    let event_id = event.id;
    info!(%x, %y, turns, "alliance formed");
    Ok(event_id)
}

/// Count down every alliance by one turn and drop the ones that ran out.
pub fn expire_alliances(world: &mut World) {
    for alliance in &mut world.alliances {
        alliance.turns_remaining = alliance.turns_remaining.saturating_sub(1);
    }
    let (expired, kept): (Vec<Alliance>, Vec<Alliance>) = world
        .alliances
        .drain(..)
        .partition(|a| a.turns_remaining == 0);
    world.alliances = kept;
    for alliance in expired {
        record_end(world, alliance, "lapsed");
    }
}

/// Drop every alliance `faction` is part of.
pub fn dissolve_alliances(world: &mut World, faction: FactionId) {
    let (ended, kept): (Vec<Alliance>, Vec<Alliance>) = world
        .alliances
        .drain(..)
        .partition(|a| a.involves(faction));
    world.alliances = kept;
    for alliance in ended {
        record_end(world, alliance, "dissolved");
    }
}

fn record_end(world: &mut World, alliance: Alliance, how: &str) {
    let description = format!(
        "The pact between {} and {} {how}",
        world.name_of(Owner::Faction(alliance.a)),
        world.name_of(Owner::Faction(alliance.b)),
    );
    let event = world.add_event(EventKind::AllianceEnded, description);
    event.actor = Some(alliance.a);
    event.target = Some(alliance.b);
    info!(a = %alliance.a, b = %alliance.b, how, "alliance ended");
}
