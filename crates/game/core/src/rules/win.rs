use crate::state::{Player, Winner};

/// Decides whether the game is over, looking only at living players.
///
/// Rules are checked in order: nobody alive is a draw, no werewolf alive is
/// a village win, and werewolves matching or outnumbering the rest win.
pub fn evaluate(players: &[Player]) -> Option<Winner> {
    let (wolves, others) = players
        .iter()
        .filter(|p| p.is_alive)
        .fold((0usize, 0usize), |(w, o), p| {
            if p.is_werewolf() { (w + 1, o) } else { (w, o + 1) }
        });

    if wolves + others == 0 {
        Some(Winner::Draw)
    } else if wolves == 0 {
        Some(Winner::Villagers)
    } else if wolves >= others {
        Some(Winner::Werewolves)
    } else {
        None
    }
}
