//! Collaborators of the environment: screen capture and input injection.
//!
//! Both are OS-level concerns living outside of this crate. Each backend is
//! built from its own configuration, nested in
//! [`ThroneEnvConfig`](crate::ThroneEnvConfig).
use crate::{
    act::{key_binding, Press},
    hud::SpellUsage,
    tracker::Position,
};
use anyhow::Result;
use image::RgbaImage;
use log::{info, warn};
use serde::{de::DeserializeOwned, Deserialize, Serialize};

/// Readings about the game that do not come from the HUD health bars.
///
/// Every field is optional; a backend that cannot provide a reading leaves it
/// empty and the corresponding reward term contributes nothing.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Telemetry {
    /// Position of the player character.
    #[serde(default)]
    pub player_position: Option<Position>,

    /// Latest message shown by the game, e.g., `"Cannot move"`.
    #[serde(default)]
    pub message: Option<String>,

    /// Spell usage since the previous tick.
    #[serde(default)]
    pub spell_usage: Option<SpellUsage>,

    /// The current goal of the episode was reached.
    #[serde(default)]
    pub goal_reached: bool,
}

/// Supplies frames of the game window.
pub trait ScreenCapture {
    /// Configuration.
    type Config: Clone + Default + Serialize + DeserializeOwned;

    /// Builds the backend.
    fn build(config: &Self::Config) -> Result<Self>
    where
        Self: Sized;

    /// Captures the window, `None` when the window cannot be grabbed.
    fn capture(&mut self, window: &str) -> Option<RgbaImage>;

    /// Size `(width, height)` of the window, `None` if it cannot be found.
    fn window_size(&mut self, window: &str) -> Option<(u32, u32)>;

    /// Readings accompanying the most recent capture.
    fn telemetry(&mut self, _window: &str) -> Telemetry {
        Telemetry::default()
    }
}

/// Performs semantic actions with simulated key and mouse events.
///
/// Dispatch is fire-and-forget. Unknown action names must be logged and
/// ignored. An `Err` is reserved for failures of the backend itself.
pub trait InputDriver {
    /// Configuration.
    type Config: Clone + Default + Serialize + DeserializeOwned;

    /// Builds the backend.
    fn build(config: &Self::Config) -> Result<Self>
    where
        Self: Sized;

    /// Performs an action, blocking while a key is held.
    fn perform(&mut self, action: &str) -> Result<()>;
}

/// Configuration of [`LoggingInput`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LoggingInputConfig {
    /// Sleep for the hold duration of the key, as a real keyboard would block.
    #[serde(default)]
    pub simulate_hold: bool,
}

/// An input backend that logs the key bindings it would press.
///
/// Useful for dry runs of the perception and reward pipeline while a human
/// is playing.
pub struct LoggingInput {
    simulate_hold: bool,
    n_performed: usize,
}

impl LoggingInput {
    /// Number of actions with a key binding performed so far.
    pub fn n_performed(&self) -> usize {
        self.n_performed
    }
}

impl InputDriver for LoggingInput {
    type Config = LoggingInputConfig;

    fn build(config: &Self::Config) -> Result<Self> {
        Ok(Self {
            simulate_hold: config.simulate_hold,
            n_performed: 0,
        })
    }

    fn perform(&mut self, action: &str) -> Result<()> {
        let binding = match key_binding(action) {
            Some(binding) => binding,
            None => {
                warn!("Unknown action: {}", action);
                return Ok(());
            }
        };

        match binding.press {
            Press::Tap => info!("Pressed key: {} ({})", binding.key, action),
            Press::Hold(duration) => {
                info!(
                    "Holding key: {} for {:?} ({})",
                    binding.key, duration, action
                );
                if self.simulate_hold {
                    std::thread::sleep(duration);
                }
            }
        }
        self.n_performed += 1;

        Ok(())
    }
}
