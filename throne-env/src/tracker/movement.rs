//! Movement of the player character.
use log::{debug, info};
use serde::{Deserialize, Serialize};
use std::collections::{HashSet, VecDeque};

/// Capacity of the recent position history.
pub const HISTORY_LEN: usize = 10;

/// Distance within which a goal counts as reached.
const GOAL_RADIUS: f32 = 10.0;

/// Half-width in degrees of the cone in which the goal is straight ahead.
const FORWARD_CONE_DEG: f64 = 45.0;

/// A position of the player character in game coordinates.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Position {
    /// Horizontal coordinate.
    pub x: i32,

    /// Vertical coordinate.
    pub y: i32,
}

impl Position {
    /// Creates a position.
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Offset `(dx, dy)` from `self` to `other`.
    ///
    /// Computed in `f64` so that no pair of coordinates can overflow.
    pub fn delta(&self, other: &Position) -> (f64, f64) {
        (
            other.x as f64 - self.x as f64,
            other.y as f64 - self.y as f64,
        )
    }

    /// Euclidean distance to `other`.
    pub fn distance(&self, other: &Position) -> f32 {
        let (dx, dy) = self.delta(other);
        dx.hypot(dy) as f32
    }
}

/// Kind of a movement goal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GoalKind {
    /// A location to walk to.
    Waypoint,

    /// A target to approach.
    Target,

    /// An object to interact with.
    Interact,
}

/// A movement goal. Goals without a position are pursued by moving forward.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Goal {
    /// Kind of the goal.
    pub kind: GoalKind,

    /// Where the goal is, if known.
    pub position: Option<Position>,
}

/// A movement suggestion of [`MovementTracker::suggest_action`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Steer {
    /// No goal, wander around.
    Explore,

    /// The goal was reached.
    Stop,

    /// The goal is ahead.
    MoveForward,

    /// The goal is on the left.
    RotateLeft,

    /// The goal is on the right.
    RotateRight,
}

impl Steer {
    /// Name of the suggestion.
    pub fn name(&self) -> &'static str {
        match self {
            Steer::Explore => "explore",
            Steer::Stop => "stop",
            Steer::MoveForward => "move_forward",
            Steer::RotateLeft => "rotate_left",
            Steer::RotateRight => "rotate_right",
        }
    }
}

/// Recent positions, visited positions and the current goal.
#[derive(Debug, Clone, Default)]
pub struct MovementTracker {
    position_history: VecDeque<Position>,
    visited_positions: HashSet<Position>,
    current_goal: Option<Goal>,
}

impl MovementTracker {
    /// Creates an empty tracker.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a position to the history, evicting the oldest one when full.
    pub fn update_position(&mut self, position: Position) {
        if self.position_history.len() == HISTORY_LEN {
            self.position_history.pop_front();
        }
        self.position_history.push_back(position);
    }

    /// Rewards the distance covered between the two most recent positions.
    ///
    /// | distance   | reward |
    /// |------------|--------|
    /// | `> 15`     | `10`   |
    /// | `(5, 15]`  | `5`    |
    /// | `[2, 5]`   | `0`    |
    /// | `< 2`      | `-20`  |
    ///
    /// With fewer than two positions the reward is `0`.
    pub fn movement_reward(&self) -> f32 {
        let n = self.position_history.len();
        if n < 2 {
            return 0.0;
        }
        let distance = self.position_history[n - 2].distance(&self.position_history[n - 1]);

        if distance > 15.0 {
            10.0
        } else if distance > 5.0 {
            5.0
        } else if distance < 2.0 {
            debug!("Character seems stuck (moved {:.2})", distance);
            -20.0
        } else {
            0.0
        }
    }

    /// `15` the first time a position is seen in the episode, `0` afterwards.
    pub fn exploration_reward(&mut self, position: Position) -> f32 {
        if self.visited_positions.insert(position) {
            15.0
        } else {
            0.0
        }
    }

    /// Sets the goal to pursue.
    pub fn set_goal(&mut self, kind: GoalKind, position: Option<Position>) {
        info!("New goal: {:?} at {:?}", kind, position);
        self.current_goal = Some(Goal { kind, position });
    }

    /// Drops the current goal.
    pub fn clear_goal(&mut self) {
        self.current_goal = None;
    }

    /// Suggests how to move from `current` toward the goal.
    ///
    /// The goal is cleared once it is within reach. The bearing is measured
    /// counterclockwise from the positive x axis.
    pub fn suggest_action(&mut self, current: Option<Position>) -> Steer {
        let goal = match self.current_goal {
            Some(goal) => goal,
            None => return Steer::Explore,
        };
        let (target, current) = match (goal.position, current) {
            (Some(target), Some(current)) => (target, current),
            _ => return Steer::MoveForward,
        };

        if current.distance(&target) <= GOAL_RADIUS {
            info!("Goal {:?} reached", goal.kind);
            self.clear_goal();
            return Steer::Stop;
        }

        let (dx, dy) = current.delta(&target);
        let angle = dy.atan2(dx).to_degrees();

        if angle.abs() < FORWARD_CONE_DEG {
            Steer::MoveForward
        } else if angle > 0.0 {
            Steer::RotateLeft
        } else {
            Steer::RotateRight
        }
    }

    /// The most recent position, if any.
    pub fn latest_position(&self) -> Option<Position> {
        self.position_history.back().copied()
    }

    /// Recent positions, oldest first.
    pub fn position_history(&self) -> &VecDeque<Position> {
        &self.position_history
    }

    /// The goal being pursued.
    pub fn current_goal(&self) -> Option<&Goal> {
        self.current_goal.as_ref()
    }

    /// Number of distinct positions seen in the episode.
    pub fn n_visited(&self) -> usize {
        self.visited_positions.len()
    }

    /// Clears history, visited positions and goal.
    pub fn reset(&mut self) {
        self.position_history.clear();
        self.visited_positions.clear();
        self.current_goal = None;
    }
}

#[cfg(test)]
mod test {
    use super::*;

    fn moved(from: Position, to: Position) -> f32 {
        let mut tracker = MovementTracker::new();
        tracker.update_position(from);
        tracker.update_position(to);
        tracker.movement_reward()
    }

    #[test]
    fn test_movement_reward_bands() {
        let o = Position::new(0, 0);
        assert_eq!(moved(o, Position::new(20, 0)), 10.0);
        assert_eq!(moved(o, Position::new(16, 0)), 10.0);
        assert_eq!(moved(o, Position::new(15, 0)), 5.0);
        assert_eq!(moved(o, Position::new(3, 4)), 0.0);
        assert_eq!(moved(o, Position::new(2, 0)), 0.0);
        assert_eq!(moved(o, Position::new(1, 1)), -20.0);
        assert_eq!(moved(o, Position::new(1, 0)), -20.0);
        assert_eq!(moved(o, o), -20.0);
    }

    #[test]
    fn test_extreme_coordinates_do_not_overflow() {
        let west = Position::new(-2_000_000_000, 0);
        let east = Position::new(2_000_000_000, 0);
        assert!((west.distance(&east) - 4.0e9).abs() < 1.0e3);
        assert_eq!(moved(west, east), 10.0);

        let corner = Position::new(i32::MIN, i32::MIN);
        let opposite = Position::new(i32::MAX, i32::MAX);
        assert!(corner.distance(&opposite).is_finite());

        let mut tracker = MovementTracker::new();
        tracker.set_goal(GoalKind::Target, Some(Position::new(0, i32::MAX)));
        assert_eq!(
            tracker.suggest_action(Some(Position::new(0, i32::MIN))),
            Steer::RotateLeft
        );
        tracker.set_goal(GoalKind::Target, Some(east));
        assert_eq!(tracker.suggest_action(Some(west)), Steer::MoveForward);
    }

    #[test]
    fn test_movement_reward_needs_two_positions() {
        let mut tracker = MovementTracker::new();
        assert_eq!(tracker.movement_reward(), 0.0);
        tracker.update_position(Position::new(100, 100));
        assert_eq!(tracker.movement_reward(), 0.0);
    }

    #[test]
    fn test_history_is_bounded() {
        let mut tracker = MovementTracker::new();
        for i in 0..25 {
            tracker.update_position(Position::new(i, 0));
        }
        assert_eq!(tracker.position_history().len(), HISTORY_LEN);
        assert_eq!(tracker.position_history().front(), Some(&Position::new(15, 0)));
        assert_eq!(tracker.latest_position(), Some(Position::new(24, 0)));
    }

    #[test]
    fn test_exploration_rewards_new_positions_once() {
        let mut tracker = MovementTracker::new();
        let p = Position::new(5, 5);
        tracker.update_position(p);

        assert_eq!(tracker.exploration_reward(p), 15.0);
        assert_eq!(tracker.exploration_reward(p), 0.0);
        assert_eq!(tracker.exploration_reward(Position::new(5, 6)), 15.0);
        assert_eq!(tracker.n_visited(), 2);
    }

    #[test]
    fn test_suggest_action() {
        let mut tracker = MovementTracker::new();
        let o = Some(Position::new(0, 0));
        assert_eq!(tracker.suggest_action(o), Steer::Explore);

        tracker.set_goal(GoalKind::Waypoint, None);
        assert_eq!(tracker.suggest_action(o), Steer::MoveForward);

        tracker.set_goal(GoalKind::Target, Some(Position::new(100, 10)));
        assert_eq!(tracker.suggest_action(o), Steer::MoveForward);
        assert_eq!(tracker.suggest_action(None), Steer::MoveForward);

        tracker.set_goal(GoalKind::Target, Some(Position::new(10, 100)));
        assert_eq!(tracker.suggest_action(o), Steer::RotateLeft);

        tracker.set_goal(GoalKind::Target, Some(Position::new(-100, 5)));
        assert_eq!(tracker.suggest_action(o), Steer::RotateLeft);

        tracker.set_goal(GoalKind::Target, Some(Position::new(-100, -5)));
        assert_eq!(tracker.suggest_action(o), Steer::RotateRight);

        tracker.set_goal(GoalKind::Target, Some(Position::new(10, -100)));
        assert_eq!(tracker.suggest_action(o), Steer::RotateRight);
    }

    #[test]
    fn test_reaching_goal_clears_it() {
        let mut tracker = MovementTracker::new();
        tracker.set_goal(GoalKind::Interact, Some(Position::new(6, 8)));
        assert_eq!(tracker.suggest_action(Some(Position::new(0, 0))), Steer::Stop);
        assert!(tracker.current_goal().is_none());
        assert_eq!(tracker.suggest_action(Some(Position::new(0, 0))), Steer::Explore);
    }

    #[test]
    fn test_reset() {
        let mut tracker = MovementTracker::new();
        tracker.update_position(Position::new(1, 2));
        tracker.exploration_reward(Position::new(1, 2));
        tracker.set_goal(GoalKind::Waypoint, None);
        tracker.reset();

        assert!(tracker.position_history().is_empty());
        assert_eq!(tracker.n_visited(), 0);
        assert!(tracker.current_goal().is_none());
    }
}
