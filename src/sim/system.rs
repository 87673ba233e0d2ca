use super::context::TickContext;
use super::rules::Rules;

/// How often a simulation system should tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Cadence {
    /// Every driver tick, even while paused.
    EveryTick,
    /// Whenever an accumulator advanced by the game speed exceeds the threshold.
    Every(u32),
}

/// A pluggable simulation system driven by [`Driver`](super::Driver).
///
/// Object-safe so systems can be stored as `Box<dyn SimSystem>`.
pub trait SimSystem {
    fn name(&self) -> &str;
    fn cadence(&self, rules: &Rules) -> Cadence;
    fn tick(&mut self, ctx: &mut TickContext);

    /// React to signals emitted by systems during Phase 1 (`tick()`).
    ///
    /// Called once per driver tick with the full signal buffer in `ctx.inbox`,
    /// whether or not this system ticked. Signals pushed here are not
    /// re-delivered. Default: no-op.
    fn handle_signals(&mut self, ctx: &mut TickContext) {
        let _ = ctx;
    }
}

/// Debounces a periodic system against a variable step size.
///
/// Each driver tick adds the game speed; once the total exceeds the threshold
/// the system fires exactly once and the total restarts from zero. Stepping
/// without crossing the threshold never fires.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Accumulator {
    elapsed: u32,
    threshold: u32,
}

impl Accumulator {
    pub fn new(threshold: u32) -> Self {
        Self {
            elapsed: 0,
            threshold,
        }
    }

    pub fn advance(&mut self, step: u32) -> bool {
        if step == 0 {
            return false;
        }
        self.elapsed = self.elapsed.saturating_add(step);
        if self.elapsed > self.threshold {
            self.elapsed = 0;
            true
        } else {
            false
        }
    }

    pub fn elapsed(&self) -> u32 {
        self.elapsed
    }
}
