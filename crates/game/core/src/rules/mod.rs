//! Pure rule functions over the roster.
//!
//! None of these touch the phase or the log; the engine calls them and turns
//! their outcomes into transitions and messages.
pub mod night;
pub mod voting;
pub mod win;

pub use night::{Death, NightOutcome, resolve_night};
pub use voting::{VoteOutcome, resolve_votes, tally};
pub use win::evaluate;
