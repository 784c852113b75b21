//! Client configuration loaded from the environment.
use std::env;
use std::path::PathBuf;

use game_core::{GameSetup, PlayerId, Role};
use runtime::RuntimeConfig;

/// Everything the binary needs before the first game is dealt.
#[derive(Clone, Debug, Default)]
pub struct ClientConfig {
    pub runtime: RuntimeConfig,
    /// Fixed game seed. A fresh one is drawn per game when unset.
    pub seed: Option<u64>,
    pub human_role: Option<Role>,
    pub human_seat: Option<PlayerId>,
    /// Overrides the platform cache directory.
    pub log_dir: Option<PathBuf>,
}

impl ClientConfig {
    /// Construct configuration from process environment variables.
    ///
    /// Environment variables:
    /// - `WEREWOLF_SEED` - Game seed (default: random per game)
    /// - `WEREWOLF_HUMAN_ROLE` - Role to play, e.g. `seer` (default: random)
    /// - `WEREWOLF_HUMAN_SEAT` - Seat to take, 0-based (default: random)
    /// - `WEREWOLF_LOG_DIR` - Directory for the session log
    /// - `WEREWOLF_EVENT_BUFFER` and friends, see [`RuntimeConfig::from_env`]
    pub fn from_env() -> Self {
        Self {
            runtime: RuntimeConfig::from_env(),
            seed: read_env::<u64>("WEREWOLF_SEED"),
            human_role: read_env::<Role>("WEREWOLF_HUMAN_ROLE"),
            human_seat: read_env::<u8>("WEREWOLF_HUMAN_SEAT").map(PlayerId),
            log_dir: env::var("WEREWOLF_LOG_DIR").ok().map(PathBuf::from),
        }
    }

    /// Setup for the next game.
    pub fn game_setup(&self) -> GameSetup {
        let seed = self.seed.unwrap_or_else(rand::random);
        GameSetup {
            seed,
            human_role: self.human_role,
            human_seat: self.human_seat,
        }
    }
}

fn read_env<T>(key: &str) -> Option<T>
where
    T: std::str::FromStr,
{
    env::var(key).ok()?.parse().ok()
}
