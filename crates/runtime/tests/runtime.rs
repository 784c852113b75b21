mod support;

use std::sync::Arc;
use std::time::Duration;

use game_core::{GamePhase, IntentError, Role};
use runtime::{
    Blocked, Event, OutcomeEvent, PhaseEvent, ProviderKind, Runtime, RuntimeConfig, RuntimeError, Topic,
};

use support::{FirstChoice, human_answer, villager_setup};

async fn runtime_with_first_choice() -> Runtime {
    let config = RuntimeConfig {
        event_buffer_size: 1024,
        ..RuntimeConfig::default()
    };
    Runtime::builder()
        .config(config)
        .provider(ProviderKind::External, FirstChoice)
        .default_provider(ProviderKind::External)
        .build()
        .await
        .expect("runtime should build")
}

#[tokio::test]
async fn handle_drives_a_game_from_events() {
    let runtime = runtime_with_first_choice().await;
    let handle = runtime.handle();
    let mut phases = handle.subscribe(Topic::Phase);
    let mut outcomes = handle.subscribe(Topic::Outcome);

    handle.start_game(villager_setup(42)).await.unwrap();

    let play = async {
        loop {
            tokio::select! {
                Ok(event) = phases.recv() => {
                    if let Event::Phase(PhaseEvent::AwaitingHuman { .. }) = event {
                        let table = handle.table().await.unwrap();
                        if let Some(prompt) = table.prompt {
                            handle.submit(human_answer(&prompt)).await.unwrap();
                        }
                    }
                }
                Ok(event) = outcomes.recv() => {
                    if let Event::Outcome(OutcomeEvent::GameOver { winner, .. }) = event {
                        return winner;
                    }
                }
            }
        }
    };
    let winner = tokio::time::timeout(Duration::from_secs(10), play)
        .await
        .expect("game should finish");

    let table = handle.table().await.unwrap();
    assert_eq!(table.phase, GamePhase::GameOver);
    assert_eq!(table.winner, Some(winner));
    assert!(table.is_over());

    drop(handle);
    runtime.shutdown().await.unwrap();
}

#[tokio::test]
async fn table_view_keeps_hidden_roles_hidden() {
    let runtime = runtime_with_first_choice().await;
    let handle = runtime.handle();
    handle.start_game(villager_setup(5)).await.unwrap();

    let table = handle.table().await.unwrap();
    assert_eq!(table.human_role, Some(Role::Villager));

    let json = serde_json::to_value(&table).unwrap();
    let roster = json["roster"].as_array().unwrap();
    assert_eq!(roster.len(), 8);
    for seat in roster.iter().skip(1) {
        assert!(seat["known_role"].is_null(), "leaked {seat}");
    }

    // The full snapshot is for diagnostics and does carry every role.
    let state = handle.snapshot().await.unwrap();
    assert!(state.players.iter().any(|p| p.role == Role::Werewolf));
}

#[tokio::test]
async fn queries_before_start_report_not_started() {
    let runtime = runtime_with_first_choice().await;
    let handle = runtime.handle();

    assert!(matches!(handle.snapshot().await, Err(RuntimeError::NotStarted)));
    assert!(matches!(handle.table().await, Err(RuntimeError::NotStarted)));
    assert!(handle.ui_log().await.unwrap().is_empty());
}

#[tokio::test]
async fn restart_through_handle_bumps_generation() {
    let runtime = runtime_with_first_choice().await;
    let handle = runtime.handle();
    handle.start_game(villager_setup(1)).await.unwrap();

    assert!(matches!(
        handle.start_game(villager_setup(2)).await,
        Err(RuntimeError::GameInProgress)
    ));
    handle.restart(villager_setup(2)).await.unwrap();

    let state = handle.snapshot().await.unwrap();
    assert_eq!(state.game_seed, 2);
    assert_eq!(handle.table().await.unwrap().generation, 2);
}

#[tokio::test]
async fn missing_default_provider_fails_the_build() {
    let result = Runtime::builder()
        .default_provider(ProviderKind::Scripted)
        .build()
        .await;

    assert!(matches!(
        result,
        Err(RuntimeError::ProviderNotSet {
            kind: ProviderKind::Scripted
        })
    ));
}

#[tokio::test]
async fn random_provider_is_the_fallback() {
    let runtime = Runtime::builder()
        .config(RuntimeConfig {
            provider_seed: Some(9),
            ..RuntimeConfig::default()
        })
        .build()
        .await
        .unwrap();
    runtime.start_game(villager_setup(9)).await.unwrap();

    // The driver worker was woken by the start; share the controller with it.
    let controller = Arc::clone(runtime.controller());
    let mut finished = false;
    for _ in 0..1000 {
        match controller.run_until_blocked().await {
            Blocked::Human(prompt) => match controller.submit(human_answer(&prompt)).await {
                Ok(()) | Err(IntentError::Busy) => {}
                Err(err) => panic!("answer refused: {err}"),
            },
            Blocked::Busy => tokio::time::sleep(Duration::from_millis(2)).await,
            Blocked::GameOver(_) => {
                finished = true;
                break;
            }
            other => panic!("unexpected stop: {other:?}"),
        }
    }
    assert!(finished);
}
