use serde::{Deserialize, Serialize};

use crate::id::{FactionId, RegionId};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub enum EventKind {
    Claimed,
    Conquest,
    AttackRepelled,
    Reinforcement,
    Upgrade,
    AllianceFormed,
    AllianceEnded,
    Elimination,
    Victory,
    Defeat,
}

string_enum!(EventKind {
    Claimed => "claimed",
    Conquest => "conquest",
    AttackRepelled => "attack_repelled",
    Reinforcement => "reinforcement",
    Upgrade => "upgrade",
    AllianceFormed => "alliance_formed",
    AllianceEnded => "alliance_ended",
    Elimination => "elimination",
    Victory => "victory",
    Defeat => "defeat",
});

/// Something that happened, stamped with the driver tick it happened on.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Event {
    pub id: u64,
    pub kind: EventKind,
    pub tick: u64,
    pub description: String,
    /// The acting faction, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub actor: Option<FactionId>,
    /// The faction on the receiving end, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target: Option<FactionId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub region: Option<RegionId>,
    #[serde(default, skip_serializing_if = "serde_json::Value::is_null")]
    pub data: serde_json::Value,
}
