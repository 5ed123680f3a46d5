//! Per-episode bookkeeping behind the shaped reward.
mod combat;
mod movement;
pub use combat::{CombatTracker, EngagementPhase};
pub use movement::{Goal, GoalKind, MovementTracker, Position, Steer, HISTORY_LEN};

/// The trackers owned by an environment.
#[derive(Debug, Clone, Default)]
pub struct Trackers {
    /// Engagement with the current target.
    pub combat: CombatTracker,

    /// Positions and goal of the player character.
    pub movement: MovementTracker,
}

impl Trackers {
    /// Clears the state of both trackers.
    pub fn reset(&mut self) {
        self.combat.reset();
        self.movement.reset();
    }
}
