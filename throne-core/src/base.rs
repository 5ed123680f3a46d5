//! Core functionalities.
mod env;
mod step;
pub use env::Env;
use std::fmt::Debug;
pub use step::{Info, Step};

/// An observation of an environment.
///
/// Environments in this workspace are not vectorized, so [`Obs::len`]
/// returns 1 for every implementation shipped here.
pub trait Obs: Clone + Debug {
    /// Returns a dummy observation.
    ///
    /// The observation created with this method is used as a placeholder,
    /// e.g., when a tick fails and the environment has to return something.
    fn dummy(n: usize) -> Self;

    /// Returns the number of observations in the object.
    fn len(&self) -> usize;
}

/// An action of an environment.
pub trait Act: Clone + Debug {
    /// Returns the number of actions in the object.
    fn len(&self) -> usize;
}

/// A policy on an environment.
///
/// A policy maps an observation to an action, either deterministically or
/// stochastically. The learning algorithm driving an environment is seen
/// through this trait during evaluation.
pub trait Policy<E: Env> {
    /// Sample an action given an observation.
    fn sample(&mut self, obs: &E::Obs) -> E::Act;
}
