use super::*;
use crate::action::{IntentError, ParsedAction, PlayerIntent, TargetAction, TaskKind};
use crate::log::{LogCategory, LogEntry, LogKind, Visibility};
use crate::state::{PlayerId, Role};

const HUMAN: PlayerId = PlayerId(0);

/// Seat 0 is the human villager; the rest are AI.
const TABLE: [Role; 8] = [
    Role::Villager,
    Role::Werewolf,
    Role::Werewolf,
    Role::Seer,
    Role::Witch,
    Role::Villager,
    Role::Guard,
    Role::Hunter,
];

fn game_with(roles: [Role; 8]) -> Game {
    let setup = GameSetup::with_seed(7).human_seat(HUMAN);
    let mut game = Game::new(&GameConfig::default(), &setup).unwrap();
    for (player, role) in game.state.players.iter_mut().zip(roles) {
        player.role = role;
    }
    game
}

fn started(roles: [Role; 8]) -> Game {
    let mut game = game_with(roles);
    game.engine().start().unwrap();
    game.engine().advance().unwrap();
    game.engine()
        .apply_intent(PlayerIntent::AcknowledgeRole)
        .unwrap();
    game
}

fn target(id: u8) -> Option<ParsedAction> {
    Some(ParsedAction::TargetId(PlayerId(id)))
}

fn no() -> Option<ParsedAction> {
    Some(ParsedAction::YesNo(false))
}

/// Wolves attack 3, the guard protects 3, nobody dies.
fn quiet_night(_: &GameState, task: &DecisionTask) -> Option<ParsedAction> {
    match task.kind {
        TaskKind::WerewolfTarget | TaskKind::GuardProtect => target(3),
        TaskKind::SeerCheck => target(1),
        TaskKind::WitchSave | TaskKind::WitchPoison | TaskKind::HunterShoot => no(),
        TaskKind::DiscussionStatement => Some(ParsedAction::FreeText("Nothing to add.".into())),
        TaskKind::VotePlayer => None,
    }
}

/// Runs AI decisions and transitions until `stop` holds or the game needs
/// the human or is idle.
fn drive_until(
    game: &mut Game,
    answer: impl Fn(&GameState, &DecisionTask) -> Option<ParsedAction>,
    stop: impl Fn(&GameState) -> bool,
) -> Step {
    loop {
        if stop(&game.state) {
            return game.engine().plan();
        }
        match game.engine().advance().unwrap() {
            Step::Transition(_) => {}
            Step::Decide(task) => {
                let reply = answer(&game.state, &task);
                game.engine().apply_decision(&task, reply).unwrap();
            }
            other => return other,
        }
    }
}

fn drive(
    game: &mut Game,
    answer: impl Fn(&GameState, &DecisionTask) -> Option<ParsedAction>,
) -> Step {
    drive_until(game, answer, |_| false)
}

fn public_messages(game: &Game) -> Vec<String> {
    game.log
        .entries()
        .iter()
        .filter(|e| e.visibility == Visibility::Public)
        .map(|e| e.message.clone())
        .collect()
}

#[test]
fn advance_is_idempotent_while_waiting_for_human() {
    let mut game = game_with(TABLE);
    game.engine().start().unwrap();

    let first = game.engine().advance().unwrap();
    assert!(matches!(first, Step::AwaitHuman(_)));
    let len = game.log.len();

    let second = game.engine().advance().unwrap();
    assert_eq!(first, second);
    assert_eq!(game.log.len(), len);
    assert_eq!(game.state.phase, GamePhase::ShowRoleModal);
}

#[test]
fn advance_is_idempotent_while_waiting_for_ai() {
    let mut game = started(TABLE);
    let step = drive_until(&mut game, quiet_night, |s| s.phase == GamePhase::WerewolvesAct);
    let Step::Decide(task) = step else {
        panic!("expected an AI decision, got {step:?}");
    };
    assert_eq!(task.kind, TaskKind::WerewolfTarget);
    assert_eq!(task.actor, PlayerId(1));

    let len = game.log.len();
    let snapshot = game.state.clone();
    assert_eq!(game.engine().advance().unwrap(), Step::Decide(task));
    assert_eq!(game.engine().advance().unwrap(), Step::Decide(task));
    assert_eq!(game.log.len(), len);
    assert_eq!(game.state, snapshot);
}

#[test]
fn unprotected_victim_dies_and_cause_stays_secret() {
    let mut game = started(TABLE);
    let step = drive(&mut game, |state, task| match task.kind {
        TaskKind::WerewolfTarget => target(5),
        TaskKind::GuardProtect => target(2),
        _ => quiet_night(state, task),
    });

    assert!(matches!(step, Step::AwaitHuman(_)));
    assert_eq!(game.state.phase, GamePhase::Discussion);
    assert!(!game.state.players[5].is_alive);
    assert_eq!(game.state.players[5].revealed_role, Some(Role::Villager));

    let deaths: Vec<_> = game
        .log
        .for_ui(HUMAN, Role::Villager)
        .into_iter()
        .filter(|e| e.category == LogCategory::Deaths)
        .map(|e| e.message.clone())
        .collect();
    assert_eq!(deaths[0], "Last night, Player 5 died.");
    for message in public_messages(&game) {
        let lower = message.to_lowercase();
        assert!(!lower.contains("attack"), "leaked: {message}");
        assert!(!lower.contains("poison"), "leaked: {message}");
    }
}

#[test]
fn guard_block_is_only_told_to_the_guard() {
    let mut game = started(TABLE);
    drive(&mut game, |_, task| match task.kind {
        TaskKind::WerewolfTarget | TaskKind::GuardProtect => target(5),
        TaskKind::SeerCheck => target(1),
        TaskKind::DiscussionStatement => Some(ParsedAction::Abstain),
        _ => no(),
    });

    assert!(game.state.players.iter().all(|p| p.is_alive));
    assert!(public_messages(&game).contains(&"Last night was peaceful. No one died.".to_string()));

    let blocked = |e: &&LogEntry| e.message.contains("Your protection saved Player 5");
    assert!(game.log.for_ui(PlayerId(6), Role::Guard).iter().any(blocked));
    assert!(!game.log.for_ui(HUMAN, Role::Villager).iter().any(blocked));
    assert!(!game.log.for_decision_context(Role::Werewolf).iter().any(blocked));
}

#[test]
fn witch_antidote_saves_victim_once() {
    let mut game = started(TABLE);
    drive(&mut game, |_, task| match task.kind {
        TaskKind::WerewolfTarget => target(5),
        TaskKind::GuardProtect => target(2),
        TaskKind::SeerCheck => target(1),
        TaskKind::WitchSave => Some(ParsedAction::YesNo(true)),
        _ => no(),
    });

    assert!(game.state.players[5].is_alive);
    assert!(!game.state.witch_potions.antidote);
    assert!(game.state.witch_potions.poison);

    let witch_view = game.log.for_ui(PlayerId(4), Role::Witch);
    assert!(witch_view.iter().any(|e| e.message == "Tonight the werewolves attacked Player 5."));
    assert!(witch_view.iter().any(|e| e.message == "You used the antidote on Player 5."));
    let seer_context = game.log.for_decision_context(Role::Seer);
    assert!(!seer_context.iter().any(|e| e.message.contains("antidote")));
}

#[test]
fn failed_night_decisions_take_no_effect() {
    let mut game = started(TABLE);
    let guard_before = game.state.guard_last_protected;
    drive(&mut game, |_, task| match task.kind {
        TaskKind::DiscussionStatement => Some(ParsedAction::Abstain),
        _ => None,
    });

    assert_eq!(game.state.phase, GamePhase::Discussion);
    assert_eq!(game.state.werewolf_target, None);
    assert_eq!(game.state.guard_last_protected, guard_before);
    assert_eq!(game.state.seer_last_check, None);
    assert!(game.state.players.iter().all(|p| p.is_alive));

    let failures = game
        .log
        .entries()
        .iter()
        .filter(|e| e.visibility == Visibility::System && e.kind == LogKind::Error)
        .count();
    assert!(failures >= 3);
}

#[test]
fn poisoned_and_attacked_player_dies_once() {
    let mut game = started(TABLE);
    drive(&mut game, |_, task| match task.kind {
        TaskKind::WerewolfTarget => target(5),
        TaskKind::GuardProtect => target(2),
        TaskKind::SeerCheck => target(1),
        TaskKind::WitchPoison => target(5),
        _ => no(),
    });

    assert_eq!(game.state.rounds[0].night_deaths, vec![PlayerId(5)]);
    assert!(!game.state.witch_potions.poison);
}

#[test]
fn ai_seer_checking_themself_learns_nothing() {
    let mut game = started(TABLE);
    drive_until(
        &mut game,
        |state, task| match task.kind {
            TaskKind::SeerCheck => target(3),
            _ => quiet_night(state, task),
        },
        |s| s.phase == GamePhase::Discussion,
    );

    assert_eq!(game.state.seer_last_check, None);
    assert!(game.log.entries().iter().any(|e| e.visibility == Visibility::System
        && e.kind == LogKind::Error
        && e.message.starts_with("Player 3 gave no usable SEER_CHECK")));
}

#[test]
fn discussion_walks_every_living_player_once() {
    let mut game = started(TABLE);
    game.state.players[3].kill();
    game.state.players[4].kill();
    game.state.phase = GamePhase::DayStart;

    let speakers = std::cell::RefCell::new(Vec::new());
    let answer = |_: &GameState, task: &DecisionTask| {
        if task.kind == TaskKind::DiscussionStatement {
            speakers.borrow_mut().push(task.actor);
        }
        Some(ParsedAction::FreeText(format!("I am Player {}.", task.actor)))
    };

    let step = drive(&mut game, answer);
    assert!(matches!(step, Step::AwaitHuman(_)));
    assert_eq!(game.state.current_speaker, Some(HUMAN));
    speakers.borrow_mut().push(HUMAN);
    game.engine()
        .apply_intent(PlayerIntent::SubmitSpeech("I trust nobody.".into()))
        .unwrap();

    drive_until(&mut game, answer, |s| s.phase == GamePhase::Voting);
    let expected: Vec<PlayerId> = [0, 1, 2, 5, 6, 7].into_iter().map(PlayerId).collect();
    assert_eq!(game.state.speaking_order, expected);
    assert_eq!(*speakers.borrow(), expected);
    assert_eq!(game.state.phase, GamePhase::Voting);

    let order_note = "Speaking order today: Player 0, Player 1, Player 2, Player 5, Player 6, Player 7.";
    assert!(game
        .log
        .for_decision_context(Role::Seer)
        .iter()
        .any(|e| e.message == order_note && e.visibility == Visibility::AiOnly));
    assert!(game
        .log
        .for_ui(HUMAN, Role::Villager)
        .iter()
        .all(|e| e.message != order_note));
}

#[test]
fn hunter_voted_out_gets_a_shot_before_night() {
    let mut game = started(TABLE);
    drive(&mut game, quiet_night);
    game.engine().apply_intent(PlayerIntent::Pass).unwrap();

    let step = drive(&mut game, quiet_night);
    assert!(matches!(step, Step::AwaitHuman(_)));
    assert_eq!(game.state.phase, GamePhase::Voting);
    game.engine()
        .apply_intent(PlayerIntent::CastVote(PlayerId(7)))
        .unwrap();

    let step = drive_until(
        &mut game,
        |_, task| match task.actor {
            PlayerId(7) => target(1),
            _ => target(7),
        },
        |s| s.phase == GamePhase::HunterMayAct,
    );

    assert_eq!(game.state.phase, GamePhase::HunterMayAct);
    assert!(!game.state.players[7].is_alive);
    let Step::Decide(task) = step else {
        panic!("expected the hunter's decision, got {step:?}");
    };
    assert_eq!(task.kind, TaskKind::HunterShoot);
    assert_eq!(task.actor, PlayerId(7));

    game.engine().apply_decision(&task, target(1)).unwrap();
    assert!(!game.state.players[1].is_alive);
    assert_eq!(game.state.phase, GamePhase::NightStart);
    assert_eq!(game.state.hunter_target, Some(PlayerId(1)));
    assert!(public_messages(&game)
        .iter()
        .any(|m| m.starts_with("Round 1 summary") && m.contains("the hunter shot Player 1")));
}

#[test]
fn hunter_killed_at_night_shoots_before_discussion() {
    let mut game = started(TABLE);
    drive_until(
        &mut game,
        |_, task| match task.kind {
            TaskKind::WerewolfTarget => target(7),
            TaskKind::GuardProtect => target(2),
            TaskKind::SeerCheck => target(1),
            TaskKind::HunterShoot => target(2),
            _ => no(),
        },
        |s| s.phase == GamePhase::Discussion,
    );

    assert!(!game.state.players[7].is_alive);
    assert!(!game.state.players[2].is_alive);
    assert_eq!(game.state.pending_hunter, None);
    assert!(game.state.speaking_order.iter().all(|id| game.state.is_alive(*id)));
}

#[test]
fn tied_vote_eliminates_nobody() {
    let mut game = started(TABLE);
    drive(&mut game, quiet_night);
    game.engine().apply_intent(PlayerIntent::Pass).unwrap();
    drive(&mut game, quiet_night);
    game.engine()
        .apply_intent(PlayerIntent::CastVote(PlayerId(1)))
        .unwrap();

    // 0,2,3,4 → 1 and 1,5,6,7 → 2
    drive_until(
        &mut game,
        |_, task| match task.actor.0 {
            2 | 3 | 4 => target(1),
            _ => target(2),
        },
        |s| s.phase == GamePhase::NightStart,
    );

    assert!(game.state.players.iter().all(|p| p.is_alive));
    assert!(game.state.current_votes.is_empty());
    assert!(public_messages(&game)
        .iter()
        .any(|m| m.starts_with("The vote is tied between Player 1 and Player 2")));
}

#[test]
fn unusable_ai_vote_falls_back_to_a_valid_target() {
    let mut game = started(TABLE);
    drive(&mut game, quiet_night);
    game.engine().apply_intent(PlayerIntent::Pass).unwrap();
    drive(&mut game, quiet_night);
    game.engine().apply_intent(PlayerIntent::Pass).unwrap();

    let step = game.engine().advance().unwrap();
    let Step::Decide(task) = step else {
        panic!("expected an AI vote, got {step:?}");
    };
    game.engine()
        .apply_decision(&task, Some(ParsedAction::TargetId(task.actor)))
        .unwrap();

    let vote = game.state.current_votes.get(&task.actor).copied().flatten();
    let vote = vote.expect("fallback picks a target");
    assert_ne!(vote, task.actor);
    assert!(game.state.is_alive(vote));
    assert_eq!(game.state.nonce, 1);
}

#[test]
fn werewolves_win_at_parity() {
    let mut game = started(TABLE);
    for seat in [3, 4, 5, 6] {
        game.state.players[seat].kill();
    }
    game.state.phase = GamePhase::NightResolution;
    game.state.werewolf_target = Some(PlayerId(7));

    drive(&mut game, quiet_night);
    assert_eq!(game.state.winner, Some(Winner::Werewolves));
    assert_eq!(game.state.phase, GamePhase::GameOver);
    assert_eq!(game.engine().advance().unwrap(), Step::Idle);
    assert_eq!(
        game.engine().apply_intent(PlayerIntent::Pass),
        Err(IntentError::GameOver)
    );
}

#[test]
fn invalid_human_input_is_rejected_without_changes() {
    let mut roles = TABLE;
    roles.swap(0, 6); // human guard at seat 0, villager at seat 6
    let mut game = started(roles);
    drive(&mut game, quiet_night);
    assert_eq!(game.state.phase, GamePhase::GuardActs);

    let before = (game.state.clone(), game.log.len());
    let attempts = [
        (
            PlayerIntent::SelectTarget { action: TargetAction::Check, target: PlayerId(2) },
            IntentError::WrongPhase { phase: GamePhase::GuardActs },
        ),
        (
            PlayerIntent::SelectTarget { action: TargetAction::Protect, target: PlayerId(42) },
            IntentError::UnknownTarget(PlayerId(42)),
        ),
        (PlayerIntent::CastVote(PlayerId(1)), IntentError::WrongPhase { phase: GamePhase::GuardActs }),
    ];
    for (intent, expected) in attempts {
        assert_eq!(game.engine().apply_intent(intent), Err(expected));
    }
    assert_eq!((game.state.clone(), game.log.len()), before);

    game.engine()
        .apply_intent(PlayerIntent::SelectTarget { action: TargetAction::Protect, target: PlayerId(3) })
        .unwrap();
    assert!(game.state.players[3].is_protected);
    assert_eq!(game.state.phase, GamePhase::SeerActs);

    // Next night the same target is refused.
    game.state.phase = GamePhase::GuardActs;
    assert_eq!(
        game.engine().apply_intent(PlayerIntent::SelectTarget {
            action: TargetAction::Protect,
            target: PlayerId(3)
        }),
        Err(IntentError::RepeatProtect(PlayerId(3)))
    );

    game.state.players[5].kill();
    assert_eq!(
        game.engine().apply_intent(PlayerIntent::SelectTarget {
            action: TargetAction::Protect,
            target: PlayerId(5)
        }),
        Err(IntentError::TargetDead(PlayerId(5)))
    );
}

#[test]
fn human_cannot_vote_for_themselves() {
    let mut game = started(TABLE);
    drive(&mut game, quiet_night);
    game.engine().apply_intent(PlayerIntent::Pass).unwrap();
    drive(&mut game, quiet_night);
    assert_eq!(
        game.engine().apply_intent(PlayerIntent::CastVote(HUMAN)),
        Err(IntentError::SelfTarget)
    );
    assert!(game.state.current_votes.is_empty());
}

#[test]
fn stale_decision_is_refused() {
    let mut game = started(TABLE);
    let step = drive_until(&mut game, quiet_night, |s| s.phase == GamePhase::GuardActs);
    let Step::Decide(guard_task) = step else {
        panic!("expected the guard's decision, got {step:?}");
    };
    let stale = DecisionTask {
        kind: TaskKind::WerewolfTarget,
        actor: PlayerId(1),
        ..guard_task
    };
    let err = game.engine().apply_decision(&stale, target(3)).unwrap_err();
    assert!(matches!(err, EngineError::StaleDecision { .. }));
    assert_eq!(err.severity(), ErrorSeverity::Recoverable);
    assert_eq!(game.state.werewolf_target, Some(PlayerId(3)));
    assert_eq!(game.state.phase, GamePhase::GuardActs);
}

#[test]
fn pack_is_briefed_at_start() {
    let mut game = game_with(TABLE);
    game.engine().start().unwrap();
    let briefing = |e: &&LogEntry| e.message == "The werewolf team is: Player 1, Player 2.";
    assert!(game.log.for_ui(PlayerId(1), Role::Werewolf).iter().any(briefing));
    assert!(!game.log.for_ui(HUMAN, Role::Villager).iter().any(briefing));
    assert!(matches!(
        game.engine().start(),
        Err(EngineError::AlreadyStarted { .. })
    ));
}
