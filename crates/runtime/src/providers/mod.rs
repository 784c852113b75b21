//! Decision providers bundled with the runtime.

mod random;
mod scripted;

pub use random::RandomProvider;
pub use scripted::ScriptedProvider;
