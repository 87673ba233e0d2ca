use serde::{Deserialize, Serialize};

use crate::id::FactionId;

/// A signal emitted by one system and consumed by others.
/// Carries the event that caused it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Signal {
    pub event_id: u64,
    pub kind: SignalKind,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum SignalKind {
    /// A faction lost its last region.
    FactionEliminated { faction_id: FactionId },
}
