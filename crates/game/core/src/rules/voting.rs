use std::collections::BTreeMap;

use crate::state::{Player, PlayerId};

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum VoteOutcome {
    Eliminated { player: PlayerId, votes: u32 },
    Tie { players: Vec<PlayerId>, votes: u32 },
    NoVotes,
}

/// Votes per living candidate. Ballots from or for dead seats, unknown seats
/// and abstentions are not counted.
pub fn tally(
    votes: &BTreeMap<PlayerId, Option<PlayerId>>,
    players: &[Player],
) -> BTreeMap<PlayerId, u32> {
    let alive = |id: &PlayerId| players.get(id.index()).is_some_and(|p| p.is_alive);
    let mut counts = BTreeMap::new();
    for (voter, target) in votes {
        let Some(target) = target else { continue };
        if alive(voter) && alive(target) {
            *counts.entry(*target).or_insert(0) += 1;
        }
    }
    counts
}

/// Tallies the ballots and eliminates a unique front-runner.
///
/// A tie at the top, or no counted ballot at all, eliminates nobody.
pub fn resolve_votes(
    votes: &BTreeMap<PlayerId, Option<PlayerId>>,
    players: &mut [Player],
) -> VoteOutcome {
    let counts = tally(votes, players);
    let max = counts.values().copied().max().unwrap_or(0);
    if max == 0 {
        return VoteOutcome::NoVotes;
    }

    let leaders: Vec<PlayerId> = counts
        .iter()
        .filter(|(_, count)| **count == max)
        .map(|(id, _)| *id)
        .collect();

    match leaders.as_slice() {
        [player] => {
            players[player.index()].kill();
            VoteOutcome::Eliminated {
                player: *player,
                votes: max,
            }
        }
        _ => VoteOutcome::Tie {
            players: leaders,
            votes: max,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::Role;

    fn table() -> Vec<Player> {
        (0..8)
            .map(|i| Player::new(PlayerId(i), Role::Villager, i == 0))
            .collect()
    }

    fn ballots(pairs: &[(u8, Option<u8>)]) -> BTreeMap<PlayerId, Option<PlayerId>> {
        pairs
            .iter()
            .map(|(v, t)| (PlayerId(*v), t.map(PlayerId)))
            .collect()
    }

    #[test]
    fn three_three_tie_eliminates_nobody() {
        let mut players = table();
        let votes = ballots(&[
            (0, Some(1)),
            (2, Some(1)),
            (3, Some(1)),
            (4, Some(5)),
            (6, Some(5)),
            (7, Some(5)),
        ]);
        let outcome = resolve_votes(&votes, &mut players);
        assert_eq!(
            outcome,
            VoteOutcome::Tie {
                players: vec![PlayerId(1), PlayerId(5)],
                votes: 3
            }
        );
        assert!(players.iter().all(|p| p.is_alive));
    }

    #[test]
    fn four_two_eliminates_the_leader() {
        let mut players = table();
        let votes = ballots(&[
            (0, Some(1)),
            (2, Some(1)),
            (3, Some(1)),
            (4, Some(1)),
            (6, Some(5)),
            (7, Some(5)),
        ]);
        let outcome = resolve_votes(&votes, &mut players);
        assert_eq!(
            outcome,
            VoteOutcome::Eliminated {
                player: PlayerId(1),
                votes: 4
            }
        );
        assert!(!players[1].is_alive);
        assert_eq!(players[1].revealed_role, Some(Role::Villager));
    }

    #[test]
    fn only_abstentions_means_no_votes() {
        let mut players = table();
        let votes = ballots(&[(0, None), (1, None)]);
        assert_eq!(resolve_votes(&votes, &mut players), VoteOutcome::NoVotes);
        assert_eq!(resolve_votes(&BTreeMap::new(), &mut players), VoteOutcome::NoVotes);
    }

    #[test]
    fn ballots_involving_dead_seats_are_ignored() {
        let mut players = table();
        players[7].kill();
        let votes = ballots(&[(7, Some(1)), (0, Some(7)), (2, Some(3))]);
        let counts = tally(&votes, &players);
        assert_eq!(counts.get(&PlayerId(3)), Some(&1));
        assert_eq!(counts.len(), 1);
    }
}
