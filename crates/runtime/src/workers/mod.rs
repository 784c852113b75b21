//! Worker tasks that back the runtime.
//!
//! The session worker answers client commands; the driver advances the game
//! between human inputs.

mod driver;
mod session;

pub use driver::{DriverWorker, Waker};
pub use session::{Command, SessionWorker};
