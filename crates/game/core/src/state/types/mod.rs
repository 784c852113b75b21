mod night;
mod phase;
mod player;
mod role;

pub use night::{DeathCause, RoundRecord, SeerCheck, WitchPotions};
pub use phase::{GamePhase, HunterResume};
pub use player::{Player, PlayerId};
pub use role::{Role, RoleSet, Winner};
