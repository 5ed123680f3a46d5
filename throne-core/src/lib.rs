#![warn(missing_docs)]
//! Core abstractions shared by HUD-driven game environments and the agents
//! that train on them.
//!
//! The crate defines the interaction seam between a learning algorithm and an
//! environment:
//!
//! * [`Env`] - an environment driven by `reset()` and `step(action)`
//! * [`Step`] - the observation, reward and termination flags of one tick
//! * [`Policy`] - a mapping from an observation to an action
//! * [`record`] - structured events emitted by environments at every tick
//!
//! Running a few episodes of a policy and collecting the emitted records looks
//! like this:
//!
//! ```ignore
//! let mut env = MyEnv::build(&config, 0)?;
//! let mut recorder = BufferedRecorder::new();
//! let returns = util::eval_with_recorder(&mut env, &mut policy, 5, &mut recorder)?;
//! ```
pub mod error;
pub mod record;
pub mod util;

mod base;
pub use base::{Act, Env, Info, Obs, Policy, Step};

mod evaluator;
pub use evaluator::{DefaultEvaluator, Evaluator};
