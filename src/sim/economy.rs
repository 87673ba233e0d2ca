use std::collections::BTreeMap;

use tracing::debug;

use super::context::TickContext;
use super::rules::Rules;
use super::system::{Cadence, SimSystem};
use crate::id::FactionId;
use crate::model::World;

/// Pays income and regrows garrisons once per economic turn.
pub struct EconomySystem;

impl SimSystem for EconomySystem {
    fn name(&self) -> &str {
        "economy"
    }

    fn cadence(&self, rules: &Rules) -> Cadence {
        Cadence::Every(rules.income_interval)
    }

    fn tick(&mut self, ctx: &mut TickContext) {
        advance(ctx.world, ctx.rules);
    }
}

/// Run one economic turn.
///
/// Income is `total_output * income_rate * economy * stability`, where
/// stability is the mean over the faction's regions as they stood before this
/// turn's recovery. Owned regions then regrow reserves (capped at output) and
/// recover stability. Unclaimed regions are untouched.
pub fn advance(world: &mut World, rules: &Rules) {
    world.turn += 1;

    let mut stability: BTreeMap<FactionId, (f64, u32)> = BTreeMap::new();
    for region in world.regions.values() {
        if let Some(owner) = region.owner.faction() {
            let entry = stability.entry(owner).or_insert((0.0, 0));
            entry.0 += region.stability;
            entry.1 += 1;
        }
    }

    let mut paid = 0.0;
    for faction in world.factions.values_mut() {
        let stability_factor = match stability.get(&faction.id) {
            Some(&(sum, count)) if count > 0 => sum / f64::from(count),
            _ => 1.0,
        };
        let income =
            faction.total_output() * rules.income_rate * faction.economy * stability_factor;
        faction.earn(income);
        paid += income;
    }

    for region in world.regions.values_mut() {
        if region.owner.faction().is_none() {
            continue;
        }
        if region.reserves < region.output {
            region.replenish((region.output * rules.regrowth_rate).ceil());
        }
        if region.stability < 1.0 {
            region.stability = (region.stability + rules.stability_recovery).min(1.0);
            region.refresh_population();
        }
    }

    debug!(turn = world.turn, income = paid, "economic turn");
}
