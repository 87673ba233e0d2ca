use std::collections::BTreeSet;

use rand::Rng;
use rand::seq::IteratorRandom;
use tracing::debug;

use super::combat::{self, AttackOutcome};
use super::context::TickContext;
use super::rules::Rules;
use super::system::{Cadence, SimSystem};
use crate::id::{FactionId, RegionId};
use crate::model::World;

/// Computer-controlled factions pick a target and attack it, at most once per
/// faction per cycle.
pub struct AiSystem;

impl SimSystem for AiSystem {
    fn name(&self) -> &str {
        "ai"
    }

    fn cadence(&self, rules: &Rules) -> Cadence {
        Cadence::Every(rules.ai_interval)
    }

    fn tick(&mut self, ctx: &mut TickContext) {
        let acting: Vec<FactionId> = ctx
            .world
            .factions
            .values()
            .filter(|f| f.computer_controlled)
            .map(|f| f.id)
            .collect();

        for faction in acting {
            if !ctx.world.is_running() {
                break;
            }
            let Some(outcome) = act(ctx.world, ctx.rules, faction, &mut *ctx.rng) else {
                continue;
            };
            if let AttackOutcome::Conquered { transfer, .. } = &outcome {
                ctx.signals.extend(transfer.signals());
            }
        }
    }
}

/// One AI decision for `faction`: pick a target and attack it if it's fair game.
///
/// Returns `None` when the faction sat this cycle out.
pub fn act(
    world: &mut World,
    rules: &Rules,
    faction: FactionId,
    rng: &mut (impl Rng + ?Sized),
) -> Option<AttackOutcome> {
    let balance = world.faction(faction)?.balance;
    if balance <= rules.ai_min_balance {
        return None;
    }
    let target = choose_target(world, rules, faction, rng)?;
    let owner = world.owner_of(target)?;
    if world.is_friendly(faction, owner) {
        debug!(%faction, %target, "ai skipped friendly target");
        return None;
    }
    Some(combat::attack(
        world,
        rules,
        faction,
        target,
        rules.ai_commit_percent,
    ))
}

/// Regions next to `faction`'s territory that it could attack: neither its
/// own nor an ally's.
pub fn border_targets(world: &World, faction: FactionId) -> BTreeSet<RegionId> {
    world
        .regions_of(faction)
        .flat_map(|r| world.neighbors(r.id))
        .filter(|&id| {
            world
                .owner_of(id)
                .is_some_and(|owner| !world.is_friendly(faction, owner))
        })
        .collect()
}

/// Pick a candidate target. With probability `ai_border_bias` the pick comes
/// from the faction's border; otherwise, or when there is no border, from the
/// whole map. The result may still be friendly.
pub fn choose_target(
    world: &World,
    rules: &Rules,
    faction: FactionId,
    rng: &mut (impl Rng + ?Sized),
) -> Option<RegionId> {
    let border = border_targets(world, faction);
    if !border.is_empty() && rng.random_bool(rules.ai_border_bias.clamp(0.0, 1.0)) {
        return border.into_iter().choose(rng);
    }
    world.regions.keys().copied().choose(rng)
}
