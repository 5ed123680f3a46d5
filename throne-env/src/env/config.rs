//! Configuration of [`ThroneEnv`](super::ThroneEnv).
use crate::{
    backend::{InputDriver, ScreenCapture},
    hud::{HudLayout, FALLBACK_WINDOW_SIZE},
    obs::{DEFAULT_OBS_HEIGHT, DEFAULT_OBS_WIDTH},
    reward::RewardConfig,
};
use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::{
    fs::File,
    io::{BufReader, Write},
    path::Path,
};

/// Title of the game window.
pub const DEFAULT_WINDOW_TITLE: &str = "TL 1.281.22.935";

#[derive(Serialize, Deserialize)]
#[serde(bound = "", default)]
/// Configurations of [`ThroneEnv`](super::ThroneEnv).
///
/// The configurations of the capture and input backends are nested, so that
/// a single YAML file describes a whole environment.
pub struct ThroneEnvConfig<C, I>
where
    C: ScreenCapture,
    I: InputDriver,
{
    pub(super) window_title: String,
    pub(super) obs_width: u32,
    pub(super) obs_height: u32,
    pub(super) hud_layout: HudLayout,
    pub(super) fallback_window_size: (u32, u32),
    pub(super) max_steps: Option<usize>,
    pub(super) report_episode_length: bool,
    pub(super) reward: RewardConfig,
    pub(super) capture_config: C::Config,
    pub(super) input_config: I::Config,
}

impl<C, I> Clone for ThroneEnvConfig<C, I>
where
    C: ScreenCapture,
    I: InputDriver,
{
    fn clone(&self) -> Self {
        Self {
            window_title: self.window_title.clone(),
            obs_width: self.obs_width,
            obs_height: self.obs_height,
            hud_layout: self.hud_layout,
            fallback_window_size: self.fallback_window_size,
            max_steps: self.max_steps,
            report_episode_length: self.report_episode_length,
            reward: self.reward.clone(),
            capture_config: self.capture_config.clone(),
            input_config: self.input_config.clone(),
        }
    }
}

impl<C, I> Default for ThroneEnvConfig<C, I>
where
    C: ScreenCapture,
    I: InputDriver,
{
    fn default() -> Self {
        Self {
            window_title: DEFAULT_WINDOW_TITLE.to_string(),
            obs_width: DEFAULT_OBS_WIDTH as u32,
            obs_height: DEFAULT_OBS_HEIGHT as u32,
            hud_layout: HudLayout::default(),
            fallback_window_size: FALLBACK_WINDOW_SIZE,
            max_steps: None,
            report_episode_length: false,
            reward: RewardConfig::default(),
            capture_config: Default::default(),
            input_config: Default::default(),
        }
    }
}

impl<C, I> ThroneEnvConfig<C, I>
where
    C: ScreenCapture,
    I: InputDriver,
{
    /// Sets the title of the game window.
    pub fn window_title(mut self, window_title: impl Into<String>) -> Self {
        self.window_title = window_title.into();
        self
    }

    /// Sets the `(width, height)` of observations.
    pub fn obs_size(mut self, width: u32, height: u32) -> Self {
        self.obs_width = width;
        self.obs_height = height;
        self
    }

    /// Sets the HUD layout in window coordinates.
    pub fn hud_layout(mut self, hud_layout: HudLayout) -> Self {
        self.hud_layout = hud_layout;
        self
    }

    /// Sets the window size assumed when the capture backend cannot report it.
    pub fn fallback_window_size(mut self, width: u32, height: u32) -> Self {
        self.fallback_window_size = (width, height);
        self
    }

    /// Sets the number of steps after which an episode is truncated.
    pub fn max_steps(mut self, max_steps: Option<usize>) -> Self {
        self.max_steps = max_steps;
        self
    }

    /// Feeds the episode length to the reward, enabling the time penalty.
    pub fn report_episode_length(mut self, v: bool) -> Self {
        self.report_episode_length = v;
        self
    }

    /// Sets the reward weights.
    pub fn reward(mut self, reward: RewardConfig) -> Self {
        self.reward = reward;
        self
    }

    /// Sets the configuration of the capture backend.
    pub fn capture_config(mut self, config: C::Config) -> Self {
        self.capture_config = config;
        self
    }

    /// Sets the configuration of the input backend.
    pub fn input_config(mut self, config: I::Config) -> Self {
        self.input_config = config;
        self
    }

    /// Title of the game window.
    pub fn get_window_title(&self) -> &str {
        &self.window_title
    }

    /// `(width, height)` of observations.
    pub fn get_obs_size(&self) -> (u32, u32) {
        (self.obs_width, self.obs_height)
    }

    /// Constructs [`ThroneEnvConfig`] from YAML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let file = File::open(path)?;
        let rdr = BufReader::new(file);
        let b = serde_yaml::from_reader(rdr)?;
        Ok(b)
    }

    /// Saves [`ThroneEnvConfig`].
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let mut file = File::create(path)?;
        file.write_all(serde_yaml::to_string(&self)?.as_bytes())?;
        Ok(())
    }
}
