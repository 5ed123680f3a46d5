//! Actions of [`ThroneEnv`](crate::ThroneEnv).
use crate::tracker::Steer;
use std::time::Duration;
use throne_core::Act;

/// Name dispatched for an index outside of the action enumeration.
pub const UNKNOWN_ACTION: &str = "unknown_action";

/// The semantic actions of the game, indexed as seen by the learning algorithm.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GameAction {
    MoveForward,
    MoveBackward,
    MoveLeft,
    MoveRight,
    Jump,
    CameraUp,
    CameraDown,
    Attack,
    UseSkill1,
    UseSkill2,
    UseSkill3,
    UseSkill4,
    FindTarget,
    CameraLeft,
    CameraRight,
    Interact,
    /// Sentinel for indices outside of the enumeration.
    Unknown,
}

impl GameAction {
    /// The dense action enumeration, in index order.
    pub const ALL: [GameAction; 16] = [
        GameAction::MoveForward,
        GameAction::MoveBackward,
        GameAction::MoveLeft,
        GameAction::MoveRight,
        GameAction::Jump,
        GameAction::CameraUp,
        GameAction::CameraDown,
        GameAction::Attack,
        GameAction::UseSkill1,
        GameAction::UseSkill2,
        GameAction::UseSkill3,
        GameAction::UseSkill4,
        GameAction::FindTarget,
        GameAction::CameraLeft,
        GameAction::CameraRight,
        GameAction::Interact,
    ];

    /// Number of actions in the enumeration.
    pub const COUNT: usize = Self::ALL.len();

    /// Maps an index to an action, [`GameAction::Unknown`] when out of range.
    pub fn from_index(ix: usize) -> Self {
        Self::ALL.get(ix).copied().unwrap_or(GameAction::Unknown)
    }

    /// Index in the enumeration, `None` for the sentinel.
    pub fn index(&self) -> Option<usize> {
        Self::ALL.iter().position(|a| a == self)
    }

    /// Name understood by input backends.
    pub fn name(&self) -> &'static str {
        match self {
            GameAction::MoveForward => "move_forward",
            GameAction::MoveBackward => "move_backward",
            GameAction::MoveLeft => "move_left",
            GameAction::MoveRight => "move_right",
            GameAction::Jump => "jump",
            GameAction::CameraUp => "camera_up",
            GameAction::CameraDown => "camera_down",
            GameAction::Attack => "attack",
            GameAction::UseSkill1 => "use_skill_1",
            GameAction::UseSkill2 => "use_skill_2",
            GameAction::UseSkill3 => "use_skill_3",
            GameAction::UseSkill4 => "use_skill_4",
            GameAction::FindTarget => "find_target",
            GameAction::CameraLeft => "camera_left",
            GameAction::CameraRight => "camera_right",
            GameAction::Interact => "interact",
            GameAction::Unknown => UNKNOWN_ACTION,
        }
    }

    /// Converts a movement suggestion into an action. `Stop` dispatches nothing.
    pub fn from_steer(steer: Steer) -> Option<Self> {
        match steer {
            Steer::Explore | Steer::MoveForward => Some(GameAction::MoveForward),
            Steer::RotateLeft => Some(GameAction::CameraLeft),
            Steer::RotateRight => Some(GameAction::CameraRight),
            Steer::Stop => None,
        }
    }
}

/// How a key is pressed for an action.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Press {
    /// Press and release immediately.
    Tap,
    /// Keep the key down for the given duration. The caller blocks meanwhile.
    Hold(Duration),
}

/// Key bound to a semantic action.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyBinding {
    /// Key name as understood by keyboard/mouse simulators.
    pub key: &'static str,

    /// Press mode.
    pub press: Press,
}

/// Looks up the key binding of an action name.
///
/// Besides the names of [`GameAction`], the rotation names `rotate_left` and
/// `rotate_right` are bound, so that backends can be driven by steering
/// suggestions directly.
pub fn key_binding(action: &str) -> Option<KeyBinding> {
    let hold = |ms| Press::Hold(Duration::from_millis(ms));
    let (key, press) = match action {
        "move_forward" => ("w", hold(1000)),
        "move_backward" => ("s", hold(1000)),
        "move_left" => ("a", hold(1000)),
        "move_right" => ("d", hold(1000)),
        "jump" => ("space", Press::Tap),
        "camera_up" => ("up", hold(100)),
        "camera_down" => ("down", hold(100)),
        "camera_left" => ("left", hold(100)),
        "camera_right" => ("right", hold(100)),
        "attack" => ("e", Press::Tap),
        "use_skill_1" => ("1", Press::Tap),
        "use_skill_2" => ("2", Press::Tap),
        "use_skill_3" => ("3", Press::Tap),
        "use_skill_4" => ("4", Press::Tap),
        "find_target" => ("tab", Press::Tap),
        "interact" => ("f", Press::Tap),
        "rotate_left" => ("left", hold(500)),
        "rotate_right" => ("right", hold(500)),
        _ => return None,
    };
    Some(KeyBinding { key, press })
}

/// Action for [`ThroneEnv`](crate::ThroneEnv).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ThroneAct {
    /// Index into [`GameAction::ALL`].
    Index(u8),

    /// Let the movement tracker steer toward its current goal.
    Auto,
}

impl ThroneAct {
    /// Creates an indexed action.
    pub fn new(act: u8) -> Self {
        Self::Index(act)
    }
}

impl Act for ThroneAct {
    fn len(&self) -> usize {
        1
    }
}

impl From<u8> for ThroneAct {
    fn from(act: u8) -> Self {
        Self::Index(act)
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_index_mapping_is_dense() {
        for (ix, action) in GameAction::ALL.iter().enumerate() {
            assert_eq!(GameAction::from_index(ix), *action);
            assert_eq!(action.index(), Some(ix));
            assert!(key_binding(action.name()).is_some(), "{}", action.name());
        }
        assert_eq!(GameAction::from_index(7).name(), "attack");
        assert_eq!(GameAction::from_index(12).name(), "find_target");
    }

    #[test]
    fn test_out_of_range_index_is_unknown() {
        assert_eq!(GameAction::from_index(GameAction::COUNT), GameAction::Unknown);
        assert_eq!(GameAction::from_index(255).name(), UNKNOWN_ACTION);
        assert_eq!(GameAction::Unknown.index(), None);
        assert!(key_binding(UNKNOWN_ACTION).is_none());
    }

    #[test]
    fn test_press_modes() {
        let press = |action| key_binding(action).map(|b| b.press);
        let ms = |ms| Some(Press::Hold(Duration::from_millis(ms)));

        assert_eq!(press("move_left"), ms(1000));
        assert_eq!(press("rotate_right"), ms(500));
        for camera in ["camera_up", "camera_down", "camera_left", "camera_right"] {
            assert_eq!(press(camera), ms(100), "{}", camera);
        }
        for tap in ["jump", "attack", "use_skill_3", "find_target", "interact"] {
            assert_eq!(press(tap), Some(Press::Tap), "{}", tap);
        }
    }

    #[test]
    fn test_steer_mapping() {
        assert_eq!(GameAction::from_steer(Steer::Stop), None);
        assert_eq!(
            GameAction::from_steer(Steer::RotateLeft),
            Some(GameAction::CameraLeft)
        );
        assert_eq!(
            GameAction::from_steer(Steer::Explore),
            Some(GameAction::MoveForward)
        );
        assert_eq!(
            key_binding("move_forward").map(|b| b.press),
            Some(Press::Hold(Duration::from_millis(1000)))
        );
    }
}
