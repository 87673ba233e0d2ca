use tracing::debug;

use super::conquest::{self, Acquisition, Transfer};
use super::rules::Rules;
use crate::id::{FactionId, RegionId};
use crate::model::{EventKind, World};

/// Why an attack did not happen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rejection {
    UnknownAttacker,
    UnknownRegion,
    CommitOutOfRange,
    NoFunds,
}

impl Rejection {
    pub fn reason(self) -> &'static str {
        match self {
            Rejection::UnknownAttacker => "attacker does not exist",
            Rejection::UnknownRegion => "target region does not exist",
            Rejection::CommitOutOfRange => "commitment must be between 1 and 100 percent",
            Rejection::NoFunds => "attacker has no funds",
        }
    }
}

/// Result of [`attack`].
#[derive(Debug, Clone, PartialEq)]
pub enum AttackOutcome {
    /// Nothing changed.
    Rejected(Rejection),
    /// Spend was consumed and the defender's reserves absorbed the damage.
    Repelled {
        spend: f64,
        damage: f64,
        defense: f64,
        event_id: u64,
    },
    /// Spend was consumed and the region changed hands.
    Conquered {
        spend: f64,
        damage: f64,
        defense: f64,
        transfer: Transfer,
    },
}

impl AttackOutcome {
    pub fn spend(&self) -> f64 {
        match self {
            AttackOutcome::Rejected(_) => 0.0,
            AttackOutcome::Repelled { spend, .. } | AttackOutcome::Conquered { spend, .. } => {
                *spend
            }
        }
    }

    pub fn transfer(&self) -> Option<&Transfer> {
        match self {
            AttackOutcome::Conquered { transfer, .. } => Some(transfer),
            _ => None,
        }
    }
}

/// Commit `commit_percent` of the attacker's balance against a region.
///
/// The spend is gone whatever happens. Damage scales with the attacker's
/// military multiplier and must strictly exceed the region's reserves scaled
/// by the owner's defense multiplier to take it; otherwise the reserves are
/// worn down, never below zero.
///
/// Self-targeting is not filtered here.
pub fn attack(
    world: &mut World,
    rules: &Rules,
    attacker: FactionId,
    target: RegionId,
    commit_percent: u8,
) -> AttackOutcome {
    if !(1..=100).contains(&commit_percent) {
        return AttackOutcome::Rejected(Rejection::CommitOutOfRange);
    }
    let Some(faction) = world.factions.get(&attacker) else {
        return AttackOutcome::Rejected(Rejection::UnknownAttacker);
    };
    let Some(region) = world.regions.get(&target) else {
        return AttackOutcome::Rejected(Rejection::UnknownRegion);
    };
    if faction.balance <= 0.0 {
        return AttackOutcome::Rejected(Rejection::NoFunds);
    }

    let spend = faction.balance * f64::from(commit_percent) / 100.0;
    let damage = spend * faction.military;
    let defense_multiplier = region
        .owner
        .faction()
        .and_then(|id| world.factions.get(&id))
        .map_or(1.0, |f| f.defense);
    let defense = region.reserves * defense_multiplier;

    if let Some(faction) = world.factions.get_mut(&attacker) {
        // spend <= balance by construction
        faction.balance = (faction.balance - spend).max(0.0);
    }

    debug!(%attacker, %target, spend, damage, defense, "attack");

    if damage > defense {
        match conquest::transfer(world, rules, target, attacker, Acquisition::Conquest) {
            Some(transfer) => AttackOutcome::Conquered {
                spend,
                damage,
                defense,
                transfer,
            },
            None => AttackOutcome::Rejected(Rejection::UnknownRegion),
        }
    } else {
        let Some(region) = world.regions.get_mut(&target) else {
            return AttackOutcome::Rejected(Rejection::UnknownRegion);
        };
        region.apply_damage(damage);
        let defender = region.owner;
        let description = format!(
            "{} held {} against {}",
            world.name_of(defender),
            world.regions.get(&target).map_or("?", |r| r.name.as_str()),
            world.name_of(attacker.into()),
        );
        let event = world.add_event(EventKind::AttackRepelled, description);
        event.actor = Some(attacker);
        event.target = defender.faction();
        event.region = Some(target);
        event.data = serde_json::json!({ "spend": spend, "damage": damage, "defense": defense });
        let event_id = event.id;
        AttackOutcome::Repelled {
            spend,
            damage,
            defense,
            event_id,
        }
    }
}
