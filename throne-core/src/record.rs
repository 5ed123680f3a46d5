//! Structured events emitted by environments and evaluation loops.
//!
//! Every call to [`Env::step`](crate::Env::step) returns a [`Record`] next to
//! the [`Step`](crate::Step). Environments put whatever they observed during
//! the tick into it (reward components, health readings, error messages), and
//! the caller decides where it goes by handing it to a [`Recorder`].
//!
//! ```rust
//! use throne_core::record::{Record, RecordValue};
//!
//! let mut record = Record::from_scalar("reward", -1.0);
//! record.insert("player_health", RecordValue::Scalar(0.8));
//! record.insert("action", RecordValue::String("attack".to_string()));
//! assert_eq!(record.get_scalar("reward").unwrap(), -1.0);
//! ```
//!
//! The logging backend is not involved: a [`NullRecorder`] discards records,
//! a [`BufferedRecorder`] keeps them in memory for later inspection.
mod base;
mod buffered_recorder;
mod null_recorder;
mod recorder;

pub use base::{Record, RecordValue};
pub use buffered_recorder::BufferedRecorder;
pub use null_recorder::NullRecorder;
pub use recorder::Recorder;
