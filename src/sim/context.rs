use rand::RngCore;

use super::rules::Rules;
use super::signal::Signal;
use crate::model::World;

/// Context passed to each system on every tick.
pub struct TickContext<'a> {
    pub world: &'a mut World,
    pub rules: &'a Rules,
    pub rng: &'a mut dyn RngCore,
    /// Systems push signals here during tick/handle_signals.
    pub signals: &'a mut Vec<Signal>,
    /// Signals emitted by other systems earlier in this driver tick (read-only).
    pub inbox: &'a [Signal],
}
