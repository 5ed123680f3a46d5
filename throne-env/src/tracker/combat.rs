//! Engagement with the selected target.
use log::{debug, info};
use std::time::Instant;

/// Reward for a kill right after acquisition.
const KILL_REWARD_MAX: f32 = 50.0;

/// Lower bound of the kill reward.
const KILL_REWARD_MIN: f32 = 10.0;

/// Decay of the kill reward per second of engagement.
const KILL_REWARD_DECAY: f32 = 2.0;

/// Reward per unit of target health removed.
const DAMAGE_WEIGHT: f32 = 20.0;

/// Penalty for a tick without damage on a visible target.
const NO_DAMAGE_PENALTY: f32 = -10.0;

/// Penalty for an episode ending with an engaged target alive.
const MISSED_TARGET_PENALTY: f32 = -20.0;

/// Phase of the engagement.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EngagementPhase {
    /// No target was acquired in this episode.
    Idle,

    /// A target was acquired and is still alive.
    Engaged,

    /// The last acquired target was killed.
    Killed,
}

impl EngagementPhase {
    /// Name of the phase, as used in records.
    pub fn name(&self) -> &'static str {
        match self {
            EngagementPhase::Idle => "idle",
            EngagementPhase::Engaged => "engaged",
            EngagementPhase::Killed => "killed",
        }
    }
}

/// Tracks the health of the target across ticks and rewards damage and kills.
#[derive(Debug, Clone, Default)]
pub struct CombatTracker {
    previous_target_health: Option<f32>,
    target_acquired_at: Option<Instant>,
    target_killed: bool,
}

impl CombatTracker {
    /// Creates a tracker with no engagement.
    pub fn new() -> Self {
        Self::default()
    }

    /// Marks the acquisition of a new target now.
    pub fn on_target_acquired(&mut self) {
        self.on_target_acquired_at(Instant::now());
    }

    /// Marks the acquisition of a new target at `now`.
    pub fn on_target_acquired_at(&mut self, now: Instant) {
        info!("Target acquired");
        self.target_acquired_at = Some(now);
        self.target_killed = false;
    }

    /// Feeds the current target health, returning `(combat_reward, kill_reward)`.
    pub fn update(&mut self, current: f32) -> (f32, f32) {
        self.update_at(current, Instant::now())
    }

    /// Same as [`CombatTracker::update`] with an explicit clock.
    pub fn update_at(&mut self, current: f32, now: Instant) -> (f32, f32) {
        let previous = match self.previous_target_health.replace(current) {
            Some(previous) => previous,
            None => return (0.0, 0.0),
        };

        if current == 0.0 && previous > 0.0 {
            self.target_killed = true;
            let elapsed = self
                .target_acquired_at
                .map(|t| now.saturating_duration_since(t).as_secs_f32())
                .unwrap_or(0.0);
            let kill_reward = (KILL_REWARD_MAX - KILL_REWARD_DECAY * elapsed).max(KILL_REWARD_MIN);
            info!(
                "Target killed after {:.1}s, kill reward: {:.1}",
                elapsed, kill_reward
            );
            (0.0, kill_reward)
        } else if current < previous {
            let reward = (previous - current) * DAMAGE_WEIGHT;
            debug!("Damage dealt: {:.3} -> {:.3}", previous, current);
            (reward, 0.0)
        } else if current > 0.0 && !self.target_killed {
            (NO_DAMAGE_PENALTY, 0.0)
        } else {
            (0.0, 0.0)
        }
    }

    /// Penalty for leaving an acquired target alive, `0` otherwise.
    pub fn on_missed_target(&self) -> f32 {
        if self.target_acquired_at.is_some() && !self.target_killed {
            MISSED_TARGET_PENALTY
        } else {
            0.0
        }
    }

    /// Clears the engagement.
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// The last target health fed to [`CombatTracker::update`].
    pub fn previous_target_health(&self) -> Option<f32> {
        self.previous_target_health
    }

    /// `true` if the last acquired target was killed.
    pub fn target_killed(&self) -> bool {
        self.target_killed
    }

    /// Current phase of the engagement.
    pub fn phase(&self) -> EngagementPhase {
        if self.target_killed {
            EngagementPhase::Killed
        } else if self.target_acquired_at.is_some() {
            EngagementPhase::Engaged
        } else {
            EngagementPhase::Idle
        }
    }
}
