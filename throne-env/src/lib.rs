//! A game environment perceived through the HUD of the game window.
//!
//! [`ThroneEnv`] implements [`throne_core::Env`] on top of two collaborators:
//! a [`ScreenCapture`] backend grabbing frames of the game window, and an
//! [`InputDriver`] backend simulating key presses. At every step the
//! environment
//!
//! 1. dispatches the name of the chosen [`GameAction`] to the input backend,
//! 2. reads the health bars of the player and of the target from a fresh frame,
//! 3. updates the combat and movement trackers of the episode,
//! 4. turns everything into a shaped, clipped reward.
//!
//! The observation is the frame resized to 160x90 by default, see [`ThroneObs`].
//!
//! Here is an example of running the environment with scripted backends and a
//! random policy.
//!
//! ```no_run
//! use anyhow::Result;
//! use throne_core::{DefaultEvaluator, Evaluator as _};
//! use throne_env::{
//!     util::test::{RandomPolicy, ScriptedCapture, ScriptedCaptureConfig},
//!     LoggingInput, Telemetry, ThroneEnv, ThroneEnvConfig,
//! };
//!
//! type Env = ThroneEnv<ScriptedCapture, LoggingInput>;
//!
//! fn main() -> Result<()> {
//!     let capture = ScriptedCaptureConfig::default()
//!         .window_size(Some((160, 90)))
//!         .push_frame(1.0, 0.5, Telemetry::default())
//!         .push_frame(0.0, 0.5, Telemetry::default());
//!     let config = ThroneEnvConfig::<ScriptedCapture, LoggingInput>::default()
//!         .hud_layout(throne_env::util::test::test_layout())
//!         .capture_config(capture);
//!
//!     let mut policy = RandomPolicy::new();
//!     let record = DefaultEvaluator::<Env>::new(&config, 0, 5)?.evaluate(&mut policy)?;
//!     println!("{:?}", record);
//!
//!     Ok(())
//! }
//! ```
pub mod act;
pub mod backend;
mod env;
pub mod error;
pub mod hud;
mod obs;
pub mod reward;
pub mod tracker;
pub mod util;
pub use act::{key_binding, GameAction, KeyBinding, Press, ThroneAct};
pub use backend::{InputDriver, LoggingInput, LoggingInputConfig, ScreenCapture, Telemetry};
pub use env::{ThroneEnv, ThroneEnvConfig, ThroneInfo, DEFAULT_WINDOW_TITLE};
pub use error::EnvError;
pub use obs::{ThroneObs, DEFAULT_OBS_HEIGHT, DEFAULT_OBS_WIDTH};
