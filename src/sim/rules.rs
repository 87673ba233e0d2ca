use serde::{Deserialize, Serialize};

use crate::model::Upgrade;

/// Price and effect of one upgrade purchase.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct UpgradeCost {
    pub cost: f64,
    pub effect: f64,
}

/// Every tuning constant of the game rules.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Rules {
    /// Share of output paid out as income each economic turn.
    pub income_rate: f64,
    /// Share of output restored to reserves each economic turn.
    pub regrowth_rate: f64,
    /// Reserves left in a freshly conquered region, as a share of output.
    pub conquest_reserve_fraction: f64,
    /// Stability of a freshly conquered region.
    pub occupation_stability: f64,
    /// Stability regained per economic turn.
    pub stability_recovery: f64,
    /// Accumulator threshold for the economic turn.
    pub income_interval: u32,
    /// Accumulator threshold for the AI cycle.
    pub ai_interval: u32,
    /// AI factions only act with more than this balance.
    pub ai_min_balance: f64,
    pub ai_commit_percent: u8,
    /// Probability the AI looks at its border before the whole map.
    pub ai_border_bias: f64,
    /// Percent of world output the player must hold to win.
    pub victory_percent: f64,
    pub reinforce_cost: f64,
    pub reinforce_amount: f64,
    pub military_upgrade: UpgradeCost,
    pub economy_upgrade: UpgradeCost,
    pub defense_upgrade: UpgradeCost,
}

impl Rules {
    pub fn upgrade(&self, upgrade: Upgrade) -> UpgradeCost {
        match upgrade {
            Upgrade::Military => self.military_upgrade,
            Upgrade::Economy => self.economy_upgrade,
            Upgrade::Defense => self.defense_upgrade,
        }
    }
}

impl Default for Rules {
    fn default() -> Self {
        Self {
            income_rate: 0.2,
            regrowth_rate: 0.05,
            conquest_reserve_fraction: 0.1,
            occupation_stability: 0.3,
            stability_recovery: 0.02,
            income_interval: 60,
            ai_interval: 30,
            ai_min_balance: 1000.0,
            ai_commit_percent: 50,
            ai_border_bias: 0.7,
            victory_percent: 75.0,
            reinforce_cost: 100.0,
            reinforce_amount: 500.0,
            military_upgrade: UpgradeCost {
                cost: 1000.0,
                effect: 0.1,
            },
            economy_upgrade: UpgradeCost {
                cost: 1500.0,
                effect: 0.15,
            },
            defense_upgrade: UpgradeCost {
                cost: 1200.0,
                effect: 0.12,
            },
        }
    }
}
