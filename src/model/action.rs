//! Commands queued on the world by a human player.
//!
//! `PlayerActionSystem` drains `World::pending_actions` at the start of each
//! driver tick and records one `ActionResult` per action.

use serde::{Deserialize, Serialize};

use super::faction::Upgrade;
use crate::id::{FactionId, RegionId};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Action {
    pub faction: FactionId,
    pub kind: ActionKind,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ActionKind {
    Attack { region: RegionId, commit_percent: u8 },
    Reinforce { region: RegionId },
    Upgrade { upgrade: Upgrade },
    ProposeAlliance { with: FactionId, turns: u32 },
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ActionResult {
    pub faction: FactionId,
    pub outcome: ActionOutcome,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum ActionOutcome {
    Success { event_id: u64 },
    Failed { reason: String },
}

impl ActionOutcome {
    pub fn failed(reason: impl Into<String>) -> Self {
        ActionOutcome::Failed {
            reason: reason.into(),
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, ActionOutcome::Success { .. })
    }
}
