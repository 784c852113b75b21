//! Random AI seat: always answers with a legal choice.
use std::sync::Mutex;

use async_trait::async_trait;
use rand::prelude::*;

use game_core::TaskKind;

use crate::api::{DecisionProvider, ProviderError};
use crate::orchestrator::DecisionRequest;

const LINES: [&str; 5] = [
    "I have nothing solid yet. Let's hear everyone out.",
    "Someone was too quiet last round. I am watching.",
    "I am on the villagers' side. Vote carefully.",
    "The last vote told us more than the speeches did.",
    "I will follow the strongest evidence today.",
];

/// Picks uniformly among the request's choices.
///
/// Optional actions (poison, hunter shot) are declined half of the time.
pub struct RandomProvider {
    /// `decide` takes `&self` but the RNG needs `&mut`.
    rng: Mutex<StdRng>,
}

impl RandomProvider {
    /// `Some(seed)` for reproducible play, `None` for system entropy.
    pub fn new(seed: Option<u64>) -> Self {
        let rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Self {
            rng: Mutex::new(rng),
        }
    }
}

#[async_trait]
impl DecisionProvider for RandomProvider {
    async fn decide(&self, request: &DecisionRequest) -> Result<String, ProviderError> {
        let mut rng = self
            .rng
            .lock()
            .map_err(|_| ProviderError::Unavailable("rng lock poisoned".into()))?;

        let pick = |rng: &mut StdRng| {
            request
                .choices
                .choose(rng)
                .map(|id| id.to_string())
                .ok_or_else(|| ProviderError::Refused("no legal choice".into()))
        };

        match request.task.kind {
            TaskKind::WerewolfTarget
            | TaskKind::GuardProtect
            | TaskKind::SeerCheck
            | TaskKind::VotePlayer => pick(&mut *rng),
            TaskKind::WitchSave => Ok(if rng.gen_bool(0.5) { "yes" } else { "no" }.to_string()),
            TaskKind::WitchPoison | TaskKind::HunterShoot => {
                if request.choices.is_empty() || rng.gen_bool(0.5) {
                    Ok("no".to_string())
                } else {
                    pick(&mut *rng)
                }
            }
            TaskKind::DiscussionStatement => Ok(LINES
                .choose(&mut *rng)
                .copied()
                .unwrap_or_default()
                .to_string()),
        }
    }
}
