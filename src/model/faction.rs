use serde::{Deserialize, Serialize};

use crate::id::FactionId;

/// A purchasable permanent improvement to one of a faction's multipliers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub enum Upgrade {
    Military,
    Economy,
    Defense,
}

string_enum!(Upgrade {
    Military => "military",
    Economy => "economy",
    Defense => "defense",
});

/// An economic/military actor competing for territory.
///
/// `total_output` and `region_count` are caches over the regions this faction
/// owns. Only conquest may change them, which keeps them equal to the sums
/// they summarize without ever rescanning the map.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Faction {
    pub id: FactionId,
    pub name: String,
    pub balance: f64,
    pub military: f64,
    pub defense: f64,
    pub economy: f64,
    pub computer_controlled: bool,
    total_output: f64,
    region_count: u32,
}

impl Faction {
    pub fn new(id: FactionId, name: impl Into<String>, computer_controlled: bool) -> Self {
        Self {
            id,
            name: name.into(),
            balance: 0.0,
            military: 1.0,
            defense: 1.0,
            economy: 1.0,
            computer_controlled,
            total_output: 0.0,
            region_count: 0,
        }
    }

    pub fn total_output(&self) -> f64 {
        self.total_output
    }

    pub fn region_count(&self) -> u32 {
        self.region_count
    }

    pub fn is_eliminated(&self) -> bool {
        self.region_count == 0
    }

    pub fn multiplier(&self, upgrade: Upgrade) -> f64 {
        match upgrade {
            Upgrade::Military => self.military,
            Upgrade::Economy => self.economy,
            Upgrade::Defense => self.defense,
        }
    }

    pub(crate) fn gain_region(&mut self, output: f64) {
        self.region_count += 1;
        self.total_output += output;
    }

    pub(crate) fn lose_region(&mut self, output: f64) {
        self.region_count = self.region_count.saturating_sub(1);
        self.total_output -= output;
        if self.region_count == 0 {
            // Drop accumulated float error once the faction holds nothing.
            self.total_output = 0.0;
        }
    }

    /// Deduct `amount` if affordable. Returns false and leaves the balance
    /// untouched otherwise.
    pub fn try_spend(&mut self, amount: f64) -> bool {
        if amount < 0.0 || amount > self.balance {
            return false;
        }
        self.balance -= amount;
        true
    }

    pub fn earn(&mut self, amount: f64) {
        if amount > 0.0 {
            self.balance += amount;
        }
    }

    pub(crate) fn improve(&mut self, upgrade: Upgrade, effect: f64) {
        match upgrade {
            Upgrade::Military => self.military += effect,
            Upgrade::Economy => self.economy += effect,
            Upgrade::Defense => self.defense += effect,
        }
    }
}
