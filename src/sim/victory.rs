use tracing::info;

use super::rules::Rules;
use crate::model::{EventKind, GameStatus, World};

/// Check the human faction against the win and loss conditions.
///
/// Only acts while the game is `Running`; the first terminal state reached
/// sticks. Returns the new status when a transition happened.
pub fn evaluate(world: &mut World, rules: &Rules) -> Option<GameStatus> {
    if !world.is_running() {
        return None;
    }
    let player = world.player_faction()?;
    let player_id = player.id;
    let lost = player.is_eliminated();
    let control = world.control_percent(player_id);

    let (status, description) = if control >= rules.victory_percent {
        (
            GameStatus::Victory,
            format!("Victory: {control:.1}% of the world is under one flag"),
        )
    } else if lost {
        (
            GameStatus::Defeat,
            "Defeat: the last region has fallen".to_string(),
        )
    } else {
        return None;
    };

    world.status = status;
    let kind = match status {
        GameStatus::Victory => EventKind::Victory,
        _ => EventKind::Defeat,
    };
    world.add_event(kind, description).actor = Some(player_id);
    info!(%status, control, tick = world.current_tick, "game over");
    Some(status)
}
