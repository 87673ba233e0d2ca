use serde::{Deserialize, Serialize};

use crate::id::FactionId;

/// A mutual non-aggression pact between two factions.
///
/// Stored with `a < b` so a pair has exactly one representation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Alliance {
    pub a: FactionId,
    pub b: FactionId,
    /// Economic turns left before the pact lapses.
    pub turns_remaining: u32,
}

impl Alliance {
    pub fn new(x: FactionId, y: FactionId, turns: u32) -> Self {
        let (a, b) = if x <= y { (x, y) } else { (y, x) };
        Self {
            a,
            b,
            turns_remaining: turns,
        }
    }

    pub fn involves(&self, faction: FactionId) -> bool {
        self.a == faction || self.b == faction
    }

    pub fn binds(&self, x: FactionId, y: FactionId) -> bool {
        (self.a == x && self.b == y) || (self.a == y && self.b == x)
    }
}
