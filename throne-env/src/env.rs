//! The episode loop.
mod config;
use crate::{
    act::{GameAction, ThroneAct},
    backend::{InputDriver, ScreenCapture},
    error::EnvError,
    hud::HudPerception,
    obs::ThroneObs,
    reward::RewardAggregator,
    tracker::{EngagementPhase, Trackers},
};
use anyhow::Result;
pub use config::{ThroneEnvConfig, DEFAULT_WINDOW_TITLE};
use log::{error, info, warn};
use throne_core::{
    record::{Record, RecordValue},
    Env, Info, Step,
};

/// Reward of a tick that failed.
const STEP_ERROR_REWARD: f32 = -10.0;

/// Information attached to every step of [`ThroneEnv`].
#[derive(Debug, Clone, PartialEq)]
pub struct ThroneInfo {
    /// Health of the player read in the tick.
    pub player_health: f32,

    /// Health of the target read in the tick.
    pub target_health: f32,

    /// Engagement with the target after the tick.
    pub phase: EngagementPhase,
}

impl Default for ThroneInfo {
    fn default() -> Self {
        Self {
            player_health: 0.0,
            target_health: 0.0,
            phase: EngagementPhase::Idle,
        }
    }
}

impl Info for ThroneInfo {}

/// An environment playing the game through screen captures and simulated input.
///
/// Every call of [`Env::step`] performs one action, reads the HUD of the next
/// frame and turns it into a shaped reward. An episode terminates when the
/// health of the player reads zero, and is truncated after `max_steps` steps
/// if configured.
///
/// A tick never returns an error. If the input backend fails, the step carries
/// a black observation, a reward of `-10` and the terminated flag.
pub struct ThroneEnv<C, I>
where
    C: ScreenCapture,
    I: InputDriver,
{
    capture: C,
    input: I,
    perception: HudPerception,
    trackers: Trackers,
    aggregator: RewardAggregator,
    max_steps: Option<usize>,
    report_episode_length: bool,

    // Steps taken in the current episode
    count_steps: usize,
}

impl<C, I> ThroneEnv<C, I>
where
    C: ScreenCapture,
    I: InputDriver,
{
    /// Creates an environment from already built backends.
    pub fn with_backends(config: &ThroneEnvConfig<C, I>, mut capture: C, input: I) -> Self {
        let perception = HudPerception::new(
            &mut capture,
            config.window_title.clone(),
            (config.obs_width, config.obs_height),
            &config.hud_layout,
            config.fallback_window_size,
        );

        Self {
            capture,
            input,
            perception,
            trackers: Trackers::default(),
            aggregator: RewardAggregator::new(config.reward.clone()),
            max_steps: config.max_steps,
            report_episode_length: config.report_episode_length,
            count_steps: 0,
        }
    }

    /// Number of indexed actions.
    pub fn n_actions(&self) -> usize {
        GameAction::COUNT
    }

    /// Steps taken in the current episode.
    pub fn count_steps(&self) -> usize {
        self.count_steps
    }

    /// The trackers of the current episode.
    pub fn trackers(&self) -> &Trackers {
        &self.trackers
    }

    /// Mutable access to the trackers, e.g., to set a movement goal.
    pub fn trackers_mut(&mut self) -> &mut Trackers {
        &mut self.trackers
    }

    /// The input backend.
    pub fn input(&self) -> &I {
        &self.input
    }

    /// The capture backend.
    pub fn capture(&self) -> &C {
        &self.capture
    }

    fn resolve_action(&mut self, act: &ThroneAct) -> Option<GameAction> {
        match act {
            ThroneAct::Index(ix) => {
                let action = GameAction::from_index(*ix as usize);
                if action == GameAction::Unknown {
                    warn!("Action index {} is out of range", ix);
                }
                Some(action)
            }
            ThroneAct::Auto => {
                let position = self.trackers.movement.latest_position();
                let steer = self.trackers.movement.suggest_action(position);
                info!("Steering: {}", steer.name());
                GameAction::from_steer(steer)
            }
        }
    }

    fn try_step(&mut self, act: &ThroneAct) -> Result<(Step<Self>, Record)> {
        let action = self.resolve_action(act);
        if let Some(action) = action {
            info!("Performing action: {}", action.name());
            self.input
                .perform(action.name())
                .map_err(|e| EnvError::Input {
                    action: action.name().to_string(),
                    reason: e.to_string(),
                })?;
        }

        let mut frame = self.perception.process(&mut self.capture);
        self.count_steps += 1;
        if self.report_episode_length {
            frame.info.episode_length = Some(self.count_steps);
        }

        if let Some(position) = frame.info.player_position {
            self.trackers.movement.update_position(position);
        }

        let combat = &mut self.trackers.combat;
        let target_appeared = combat.previous_target_health().map_or(true, |h| h <= 0.0);
        if frame.target_health > 0.0 && target_appeared && !combat.target_killed() {
            combat.on_target_acquired();
        }

        let is_terminated = frame.player_health == 0.0;
        let is_truncated = self
            .max_steps
            .map_or(false, |max_steps| self.count_steps >= max_steps);

        let breakdown =
            self.aggregator
                .compute(&frame, &mut self.trackers, is_terminated || is_truncated);

        let mut record = breakdown.to_record();
        let action_name = action.map_or("none", |a| a.name());
        record.insert("action", RecordValue::String(action_name.to_string()));
        record.insert("player_health", RecordValue::Scalar(frame.player_health));
        record.insert("target_health", RecordValue::Scalar(frame.target_health));
        if is_terminated || is_truncated {
            info!(
                "Episode ends after {} steps (terminated: {}, truncated: {})",
                self.count_steps, is_terminated, is_truncated
            );
            record.insert(
                "episode_length",
                RecordValue::Scalar(self.count_steps as f32),
            );
        }

        let info = ThroneInfo {
            player_health: frame.player_health,
            target_health: frame.target_health,
            phase: self.trackers.combat.phase(),
        };
        let step = Step::new(
            ThroneObs::from(frame.screen),
            *act,
            vec![breakdown.reward],
            vec![is_terminated as i8],
            vec![is_truncated as i8],
            info,
            None,
        );

        Ok((step, record))
    }

    fn fail_safe_step(&self, act: &ThroneAct, e: anyhow::Error) -> (Step<Self>, Record) {
        error!("Error during step execution: {}", e);
        let (width, height) = self.perception.obs_size();
        let step = Step::new(
            ThroneObs::zeros(height as usize, width as usize),
            *act,
            vec![STEP_ERROR_REWARD],
            vec![1],
            vec![0],
            ThroneInfo::default(),
            None,
        );
        let record = Record::from_slice(&[
            ("reward", RecordValue::Scalar(STEP_ERROR_REWARD)),
            ("step_error", RecordValue::String(e.to_string())),
        ]);
        (step, record)
    }
}

impl<C, I> Env for ThroneEnv<C, I>
where
    C: ScreenCapture,
    I: InputDriver,
{
    type Config = ThroneEnvConfig<C, I>;
    type Obs = ThroneObs;
    type Act = ThroneAct;
    type Info = ThroneInfo;

    /// Builds the backends from their configurations.
    ///
    /// The environment has no randomness of its own, `seed` is ignored.
    fn build(config: &Self::Config, _seed: i64) -> Result<Self>
    where
        Self: Sized,
    {
        let capture = C::build(&config.capture_config)?;
        let input = I::build(&config.input_config)?;
        Ok(Self::with_backends(config, capture, input))
    }

    fn step(&mut self, act: &Self::Act) -> (Step<Self>, Record)
    where
        Self: Sized,
    {
        match self.try_step(act) {
            Ok(ret) => ret,
            Err(e) => self.fail_safe_step(act, e),
        }
    }

    /// Clears the trackers and returns a fresh observation.
    ///
    /// If `is_done` is given and its flag is not set, the episode goes on and
    /// only a fresh observation is returned.
    fn reset(&mut self, is_done: Option<&Vec<i8>>) -> Result<Self::Obs> {
        let needs_reset = match is_done {
            None => true,
            Some(v) => v.first() == Some(&1),
        };

        if needs_reset {
            self.trackers.reset();
            self.count_steps = 0;
        }

        let frame = self.perception.process(&mut self.capture);
        Ok(frame.screen.into())
    }

    fn reset_with_index(&mut self, ix: usize) -> Result<Self::Obs> {
        info!("Reset with index {}", ix);
        self.reset(None)
    }
}
