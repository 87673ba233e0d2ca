use tracing::debug;

use super::combat::{self, AttackOutcome};
use super::context::TickContext;
use super::diplomacy;
use super::rules::Rules;
use super::signal::Signal;
use super::system::{Cadence, SimSystem};
use crate::id::{FactionId, RegionId};
use crate::model::action::{Action, ActionKind, ActionOutcome, ActionResult};
use crate::model::{EventKind, Upgrade, World};

/// Applies queued human commands at the start of every driver tick, before
/// any periodic system runs.
pub struct PlayerActionSystem;

impl SimSystem for PlayerActionSystem {
    fn name(&self) -> &str {
        "player_actions"
    }

    fn cadence(&self, _rules: &Rules) -> Cadence {
        Cadence::EveryTick
    }

    fn tick(&mut self, ctx: &mut TickContext) {
        let actions: Vec<Action> = std::mem::take(&mut ctx.world.pending_actions);

        for action in actions {
            let outcome = match action.kind {
                ActionKind::Attack {
                    region,
                    commit_percent,
                } => {
                    let (outcome, signals) =
                        attack_region(ctx.world, ctx.rules, action.faction, region, commit_percent);
                    ctx.signals.extend(signals);
                    outcome
                }
                ActionKind::Reinforce { region } => {
                    reinforce(ctx.world, ctx.rules, action.faction, region)
                }
                ActionKind::Upgrade { upgrade } => {
                    purchase_upgrade(ctx.world, ctx.rules, action.faction, upgrade)
                }
                ActionKind::ProposeAlliance { with, turns } => {
                    propose_alliance(ctx.world, action.faction, with, turns)
                }
            };
            if let ActionOutcome::Failed { reason } = &outcome {
                debug!(faction = %action.faction, reason = %reason, "action rejected");
            }
            ctx.world.action_results.push(ActionResult {
                faction: action.faction,
                outcome,
            });
        }
    }
}

fn check_running(world: &World, faction: FactionId) -> Result<(), ActionOutcome> {
    if !world.is_running() {
        return Err(ActionOutcome::failed("game is not running"));
    }
    if world.faction(faction).is_none() {
        return Err(ActionOutcome::failed(format!("{faction} does not exist")));
    }
    Ok(())
}

/// Attack a region the faction does not already own.
pub fn attack_region(
    world: &mut World,
    rules: &Rules,
    faction: FactionId,
    region: RegionId,
    commit_percent: u8,
) -> (ActionOutcome, Vec<Signal>) {
    if let Err(outcome) = check_running(world, faction) {
        return (outcome, Vec::new());
    }
    match world.owner_of(region) {
        None => {
            return (
                ActionOutcome::failed(format!("{region} does not exist")),
                Vec::new(),
            );
        }
        Some(owner) if owner.is(faction) => {
            return (
                ActionOutcome::failed("cannot attack own region"),
                Vec::new(),
            );
        }
        Some(_) => {}
    }

    match combat::attack(world, rules, faction, region, commit_percent) {
        AttackOutcome::Rejected(why) => (ActionOutcome::failed(why.reason()), Vec::new()),
        AttackOutcome::Repelled { event_id, .. } => {
            (ActionOutcome::Success { event_id }, Vec::new())
        }
        AttackOutcome::Conquered { transfer, .. } => (
            ActionOutcome::Success {
                event_id: transfer.event_id,
            },
            transfer.signals(),
        ),
    }
}

/// Pay to top up an owned region's reserves, up to its output.
pub fn reinforce(
    world: &mut World,
    rules: &Rules,
    faction: FactionId,
    region_id: RegionId,
) -> ActionOutcome {
    if let Err(outcome) = check_running(world, faction) {
        return outcome;
    }
    let Some(region) = world.regions.get(&region_id) else {
        return ActionOutcome::failed(format!("{region_id} does not exist"));
    };
    if !region.owner.is(faction) {
        return ActionOutcome::failed("can only reinforce own regions");
    }
    if region.is_full() {
        return ActionOutcome::failed("reserves are already at capacity");
    }
    let affordable = world
        .faction_mut(faction)
        .is_some_and(|f| f.try_spend(rules.reinforce_cost));
    if !affordable {
        return ActionOutcome::failed("cannot afford reinforcement");
    }

    let Some(region) = world.regions.get_mut(&region_id) else {
        return ActionOutcome::failed(format!("{region_id} does not exist"));
    };
    let before = region.reserves;
    region.replenish(rules.reinforce_amount);
    let added = region.reserves - before;
    let description = format!("{} reinforced with {added:.0}", region.name);

    let event = world.add_event(EventKind::Reinforcement, description);
    event.actor = Some(faction);
    event.region = Some(region_id);
    event.data = serde_json::json!({ "added": added, "cost": rules.reinforce_cost });
    ActionOutcome::Success { event_id: event.id }
}

/// Buy one level of `upgrade`.
pub fn purchase_upgrade(
    world: &mut World,
    rules: &Rules,
    faction: FactionId,
    upgrade: Upgrade,
) -> ActionOutcome {
    if let Err(outcome) = check_running(world, faction) {
        return outcome;
    }
    let price = rules.upgrade(upgrade);
    let Some(f) = world.faction_mut(faction) else {
        return ActionOutcome::failed(format!("{faction} does not exist"));
    };
    if !f.try_spend(price.cost) {
        return ActionOutcome::failed(format!("cannot afford {upgrade} upgrade"));
    }
    f.improve(upgrade, price.effect);
    let level = f.multiplier(upgrade);
    let description = format!("{} improved {upgrade} to {level:.2}", f.name);

    let event = world.add_event(EventKind::Upgrade, description);
    event.actor = Some(faction);
    event.data = serde_json::json!({ "upgrade": upgrade.as_str(), "multiplier": level });
    ActionOutcome::Success { event_id: event.id }
}

/// Offer a pact. Accepted whenever it is valid.
pub fn propose_alliance(
    world: &mut World,
    faction: FactionId,
    with: FactionId,
    turns: u32,
) -> ActionOutcome {
    if let Err(outcome) = check_running(world, faction) {
        return outcome;
    }
    match diplomacy::form_alliance(world, faction, with, turns) {
        Ok(event_id) => ActionOutcome::Success { event_id },
        Err(refusal) => ActionOutcome::failed(refusal.reason()),
    }
}
