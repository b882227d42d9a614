//! Turn sequencing.
//!
//! `Match` owns one game session: the active seats, token positions and
//! cut counters, the turn in progress and the event queue. It is the only
//! place that mutates match state.

pub mod event;
pub mod machine;

pub use event::{GameEvent, SoundCue};
pub use machine::{CommandOutput, Match};
