//! Shaped reward.
use crate::{
    hud::{HudFrame, SpellUsage},
    tracker::Trackers,
};
use log::debug;
use serde::{Deserialize, Serialize};
use throne_core::record::{Record, RecordValue};

/// Weights and bounds of the reward.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RewardConfig {
    /// Reward per unit of player health.
    pub survival_weight: f32,

    /// Player health at or below which the low-health penalty applies.
    pub low_health_threshold: f32,

    /// Penalty per unit of health below the threshold.
    pub low_health_weight: f32,

    /// Penalty when player health reads zero.
    pub death_penalty: f32,

    /// Penalty when the game reports that the character cannot move.
    pub cannot_move_penalty: f32,

    /// Reward per spell that hit something.
    pub effective_spell_reward: f32,

    /// Penalty per spell that hit nothing.
    pub wasted_spell_penalty: f32,

    /// Reward when the goal of the episode is reached.
    pub goal_reward: f32,

    /// Penalty per step already taken in the episode.
    pub time_penalty: f32,

    /// Lower bound of the reward.
    pub min_reward: f32,

    /// Upper bound of the reward.
    pub max_reward: f32,
}

impl Default for RewardConfig {
    fn default() -> Self {
        Self {
            survival_weight: 10.0,
            low_health_threshold: 0.3,
            low_health_weight: 50.0,
            death_penalty: 500.0,
            cannot_move_penalty: 100.0,
            effective_spell_reward: 15.0,
            wasted_spell_penalty: 5.0,
            goal_reward: 200.0,
            time_penalty: 0.1,
            min_reward: -100.0,
            max_reward: 200.0,
        }
    }
}

/// Components of the reward of one tick.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct RewardBreakdown {
    /// Health term, including the low-health and death penalties.
    pub survival: f32,

    /// Damage dealt to the target.
    pub combat: f32,

    /// Kill of the target.
    pub kill: f32,

    /// Distance covered, or the cannot-move penalty.
    pub movement: f32,

    /// Spell effectiveness.
    pub spells: f32,

    /// Target acquired but left alive at the end of the episode.
    pub missed_target: f32,

    /// Goal of the episode reached.
    pub goal: f32,

    /// First visit of a position.
    pub exploration: f32,

    /// Cost of the elapsed steps.
    pub time: f32,

    /// Sum of the components before clipping.
    pub total: f32,

    /// The clipped reward.
    pub reward: f32,
}

impl RewardBreakdown {
    /// Converts the breakdown into a record with one scalar per component.
    pub fn to_record(&self) -> Record {
        Record::from_slice(&[
            ("survival_reward", RecordValue::Scalar(self.survival)),
            ("combat_reward", RecordValue::Scalar(self.combat)),
            ("kill_reward", RecordValue::Scalar(self.kill)),
            ("movement_reward", RecordValue::Scalar(self.movement)),
            ("spell_reward", RecordValue::Scalar(self.spells)),
            ("missed_target_penalty", RecordValue::Scalar(self.missed_target)),
            ("goal_reward", RecordValue::Scalar(self.goal)),
            ("exploration_reward", RecordValue::Scalar(self.exploration)),
            ("time_penalty", RecordValue::Scalar(self.time)),
            ("total_reward", RecordValue::Scalar(self.total)),
            ("reward", RecordValue::Scalar(self.reward)),
        ])
    }
}

/// Combines the readings of a frame and the trackers into a scalar reward.
#[derive(Debug, Clone, Default)]
pub struct RewardAggregator {
    config: RewardConfig,
}

impl RewardAggregator {
    /// Creates an aggregator.
    pub fn new(config: RewardConfig) -> Self {
        Self { config }
    }

    /// The configuration.
    pub fn config(&self) -> &RewardConfig {
        &self.config
    }

    /// Computes the reward of a tick.
    ///
    /// The trackers are updated as a side effect: the combat tracker consumes
    /// the target health and the movement tracker marks the player position as
    /// visited. `episode_end` is `true` on the tick that terminates or
    /// truncates the episode, the only tick where the missed-target penalty
    /// applies.
    pub fn compute(
        &self,
        frame: &HudFrame,
        trackers: &mut Trackers,
        episode_end: bool,
    ) -> RewardBreakdown {
        let c = &self.config;
        let mut r = RewardBreakdown {
            survival: self.survival(frame.player_health),
            ..Default::default()
        };

        let (combat, kill) = trackers.combat.update(frame.target_health);
        r.combat = combat;
        r.kill = kill;

        r.movement = if frame.cannot_move() {
            -c.cannot_move_penalty
        } else {
            trackers.movement.movement_reward()
        };

        if let Some(usage) = frame.info.spell_usage {
            r.spells = self.spells(&usage);
        }

        if episode_end {
            r.missed_target = trackers.combat.on_missed_target();
        }

        if frame.info.goal_reached {
            r.goal = c.goal_reward;
        }

        if let Some(position) = frame.info.player_position {
            r.exploration = trackers.movement.exploration_reward(position);
        }

        if let Some(episode_length) = frame.info.episode_length {
            r.time = -c.time_penalty * episode_length as f32;
        }

        r.total = r.survival
            + r.combat
            + r.kill
            + r.movement
            + r.spells
            + r.missed_target
            + r.goal
            + r.exploration
            + r.time;
        r.reward = r.total.clamp(c.min_reward, c.max_reward);
        debug!("Reward components: {:?}", r);

        r
    }

    fn survival(&self, health: f32) -> f32 {
        let c = &self.config;
        let mut reward = health * c.survival_weight;
        if health > 0.0 && health <= c.low_health_threshold {
            reward -= (c.low_health_threshold - health) * c.low_health_weight;
        } else if health == 0.0 {
            reward -= c.death_penalty;
        }
        reward
    }

    fn spells(&self, usage: &SpellUsage) -> f32 {
        let wasted = usage.spells_cast.saturating_sub(usage.effective_spells);
        usage.effective_spells as f32 * self.config.effective_spell_reward
            - wasted as f32 * self.config.wasted_spell_penalty
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::{
        hud::{HudFrame, CANNOT_MOVE},
        tracker::Position,
    };
    use std::time::Instant;

    fn frame(player_health: f32, target_health: f32) -> HudFrame {
        let mut frame = HudFrame::blank(16, 9);
        frame.player_health = player_health;
        frame.target_health = target_health;
        frame
    }

    fn compute(frame: &HudFrame, trackers: &mut Trackers) -> RewardBreakdown {
        RewardAggregator::default().compute(frame, trackers, false)
    }

    #[test]
    fn test_death_without_other_signals_is_clipped() {
        let r = compute(&frame(0.0, 0.0), &mut Trackers::default());
        assert_eq!(r.survival, -500.0);
        assert_eq!(r.total, -500.0);
        assert_eq!(r.reward, -100.0);
    }

    #[test]
    fn test_survival_terms() {
        let mut trackers = Trackers::default();
        assert!((compute(&frame(1.0, 0.0), &mut trackers).survival - 10.0).abs() < 1e-5);

        // 0.2 * 10 - (0.3 - 0.2) * 50
        let r = compute(&frame(0.2, 0.0), &mut trackers);
        assert!((r.survival + 3.0).abs() < 1e-5, "{}", r.survival);

        let r = compute(&frame(0.5, 0.0), &mut trackers);
        assert!((r.survival - 5.0).abs() < 1e-5);
    }

    #[test]
    fn test_cannot_move_overrides_movement() {
        let mut trackers = Trackers::default();
        trackers.movement.update_position(Position::new(0, 0));
        trackers.movement.update_position(Position::new(30, 0));

        let mut f = frame(1.0, 0.0);
        assert_eq!(compute(&f, &mut trackers).movement, 10.0);

        f.message = Some(CANNOT_MOVE.to_string());
        let r = compute(&f, &mut trackers);
        assert_eq!(r.movement, -100.0);
        assert!((r.reward + 90.0).abs() < 1e-5);
    }

    #[test]
    fn test_telemetry_terms() {
        let mut trackers = Trackers::default();
        let mut f = frame(1.0, 0.0);
        f.info.spell_usage = Some(SpellUsage {
            spells_cast: 5,
            effective_spells: 3,
        });
        f.info.player_position = Some(Position::new(1, 1));
        f.info.episode_length = Some(20);

        let r = compute(&f, &mut trackers);
        assert_eq!(r.spells, 35.0);
        assert_eq!(r.exploration, 15.0);
        assert!((r.time + 2.0).abs() < 1e-5);
        assert_eq!(r.goal, 0.0);

        f.info.goal_reached = true;
        let r = compute(&f, &mut trackers);
        assert_eq!(r.exploration, 0.0);
        assert_eq!(r.goal, 200.0);
        assert_eq!(r.reward, 200.0);
    }

    #[test]
    fn test_missed_target_only_at_episode_end() {
        let aggregator = RewardAggregator::default();
        let mut trackers = Trackers::default();
        trackers.combat.on_target_acquired_at(Instant::now());

        let f = frame(1.0, 0.5);
        assert_eq!(aggregator.compute(&f, &mut trackers, false).missed_target, 0.0);
        let r = aggregator.compute(&f, &mut trackers, true);
        assert_eq!(r.missed_target, -20.0);
        assert_eq!(r.combat, -10.0);
    }

    #[test]
    fn test_record_carries_components() {
        let r = compute(&frame(0.0, 0.0), &mut Trackers::default());
        let record = r.to_record();
        assert_eq!(record.get_scalar("reward").unwrap(), -100.0);
        assert_eq!(record.get_scalar("survival_reward").unwrap(), -500.0);
        assert_eq!(record.get_scalar("exploration_reward").unwrap(), 0.0);
    }
}
