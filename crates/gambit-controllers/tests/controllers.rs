//! Controller protocol tests: the request/response races the human
//! controller must resolve, the random agent's legality guarantee, and
//! the session loop.

use std::sync::Arc;

use gambit_core::Color;
use gambit_engine::{Board, Game};
use gambit_controllers::{legal_moves, Controller, HumanController, RandomController, Session};
use gambit_openings::{OpeningTheoryHandler, TheoryMode};

/// Yields until the controller has an armed request.
async fn until_awaiting(controller: &HumanController) {
    while !controller.is_awaiting_move() {
        tokio::task::yield_now().await;
    }
}

#[tokio::test]
async fn submit_before_request_is_not_dropped() {
    let controller = HumanController::new();
    let game = Game::new();

    // The frontend clicks before the game loop asks: the move must be
    // honored by the next request, not lost.
    controller.submit_move("e2", "e4");

    let mv = controller.request_move(&game).await;
    assert_eq!(mv, Some(("e2".to_string(), "e4".to_string())));
}

#[tokio::test]
async fn request_then_submit_resolves() {
    let controller = HumanController::new();
    let waiter = {
        let controller = controller.clone();
        tokio::spawn(async move {
            let game = Game::new();
            controller.request_move(&game).await
        })
    };

    until_awaiting(&controller).await;
    controller.submit_move("e2", "e4");

    let mv = waiter.await.unwrap();
    assert_eq!(mv, Some(("e2".to_string(), "e4".to_string())));
    assert!(!controller.is_awaiting_move());
}

#[tokio::test]
async fn multiple_submits_while_idle_keep_the_latest() {
    let controller = HumanController::new();
    let game = Game::new();

    // Rapid clicks before any request: single slot, last write wins.
    controller.submit_move("e2", "e4");
    controller.submit_move("d2", "d4");
    controller.submit_move("c2", "c4");

    let mv = controller.request_move(&game).await;
    assert_eq!(mv, Some(("c2".to_string(), "c4".to_string())));

    // The slot is consumed: the next request arms and waits.
    assert!(controller.pending_request_id().is_none());
}

#[tokio::test]
async fn second_request_supersedes_the_first() {
    let controller = HumanController::new();

    let first = {
        let controller = controller.clone();
        tokio::spawn(async move {
            let game = Game::new();
            controller.request_move(&game).await
        })
    };
    until_awaiting(&controller).await;
    let first_id = controller.pending_request_id().unwrap();

    let second = {
        let controller = controller.clone();
        tokio::spawn(async move {
            let game = Game::new();
            controller.request_move(&game).await
        })
    };
    while controller.pending_request_id() == Some(first_id) {
        tokio::task::yield_now().await;
    }

    // The abandoned waiter resolves with no move instead of hanging.
    assert_eq!(first.await.unwrap(), None);

    controller.submit_move("g1", "f3");
    assert_eq!(
        second.await.unwrap(),
        Some(("g1".to_string(), "f3".to_string()))
    );
}

#[tokio::test]
async fn cancel_resolves_with_no_move_and_controller_is_reusable() {
    let controller = HumanController::new();

    let waiter = {
        let controller = controller.clone();
        tokio::spawn(async move {
            let game = Game::new();
            controller.request_move(&game).await
        })
    };
    until_awaiting(&controller).await;

    controller.cancel_request();
    assert_eq!(waiter.await.unwrap(), None);

    // Cancelling again with nothing pending is a no-op.
    controller.cancel_request();

    // A later request still works.
    controller.submit_move("e2", "e4");
    let game = Game::new();
    let mv = controller.request_move(&game).await;
    assert_eq!(mv, Some(("e2".to_string(), "e4".to_string())));
}

#[tokio::test]
async fn sequential_requests_each_get_their_move() {
    let controller = HumanController::new();

    for (from, to) in [("e2", "e4"), ("d2", "d4")] {
        let waiter = {
            let controller = controller.clone();
            tokio::spawn(async move {
                let game = Game::new();
                controller.request_move(&game).await
            })
        };
        until_awaiting(&controller).await;
        controller.submit_move(from, to);
        assert_eq!(
            waiter.await.unwrap(),
            Some((from.to_string(), to.to_string()))
        );
    }
}

#[tokio::test]
async fn tagged_submit_ignores_stale_request_id() {
    let controller = HumanController::new();

    let waiter = {
        let controller = controller.clone();
        tokio::spawn(async move {
            let game = Game::new();
            controller.request_move(&game).await
        })
    };
    until_awaiting(&controller).await;
    let id = controller.pending_request_id().unwrap();

    // A move addressed to an old request neither fulfils nor queues.
    controller.submit_move_for("a2", "a3", id + 17);
    assert!(controller.is_awaiting_move());

    controller.submit_move_for("e2", "e4", id);
    assert_eq!(
        waiter.await.unwrap(),
        Some(("e2".to_string(), "e4".to_string()))
    );
}

#[tokio::test]
async fn random_controller_plays_a_validated_move() {
    let game = Game::new();
    let all = legal_moves(&game);
    // The standard position has exactly 20 legal first moves.
    assert_eq!(all.len(), 20);

    let controller = RandomController::instant();
    let mv = controller.request_move(&game).await.unwrap();
    assert!(all.contains(&mv));
}

#[tokio::test]
async fn random_controller_yields_none_when_stalemated() {
    // Black to move with no legal moves (and no mate detector to end
    // the game first).
    let board = Board::from_placement("7k/5Q2/6K1/8/8/8/8/8").unwrap();
    let game = Game::with_board(board, Color::Black);
    assert!(legal_moves(&game).is_empty());

    let controller = RandomController::instant();
    assert_eq!(controller.request_move(&game).await, None);
}

#[tokio::test]
async fn random_controller_respects_custom_primary_handler() {
    // With a strict opening-theory primary, enumeration collapses to
    // the book lines.
    let mut game = Game::new();
    game.set_primary_handler(OpeningTheoryHandler::new(TheoryMode::Strict));

    let mut moves = legal_moves(&game);
    moves.sort();
    let notations: Vec<String> = moves.iter().map(|(f, t)| format!("{}{}", f, t)).collect();
    assert_eq!(notations, vec!["c2c4", "d2d4", "e2e4", "g1f3"]);
}

#[tokio::test]
async fn session_executes_queued_human_move() {
    let human = HumanController::new();
    human.submit_move("e2", "e4");

    let mut session = Session::new(
        Arc::new(human.clone()),
        Arc::new(RandomController::instant()),
    );
    assert!(session.request_and_execute_next_move().await);
    assert_eq!(session.game().ply_count(), 1);
    assert_eq!(session.game().turn(), Color::Black);

    // Black (random) answers.
    assert!(session.request_and_execute_next_move().await);
    assert_eq!(session.game().ply_count(), 2);
}

#[tokio::test]
async fn session_returns_false_on_cancelled_request() {
    let human = HumanController::new();
    let mut session = Session::new(
        Arc::new(human.clone()),
        Arc::new(RandomController::instant()),
    );

    let turn = tokio::spawn(async move {
        let made = session.request_and_execute_next_move().await;
        (made, session)
    });
    until_awaiting(&human).await;
    human.cancel_request();

    let (made, session) = turn.await.unwrap();
    assert!(!made);
    assert_eq!(session.game().ply_count(), 0);
    assert_eq!(session.game().turn(), Color::White);
}

#[tokio::test]
async fn session_rejects_illegal_human_move() {
    let human = HumanController::new();
    human.submit_move("e2", "e5"); // not a legal pawn move
    let mut session = Session::new(
        Arc::new(human.clone()),
        Arc::new(RandomController::instant()),
    );
    assert!(!session.request_and_execute_next_move().await);
    assert_eq!(session.game().ply_count(), 0);
}

#[tokio::test]
async fn two_random_controllers_play_a_game() {
    let mut session = Session::new(
        Arc::new(RandomController::instant()),
        Arc::new(RandomController::instant()),
    );
    let plies = session.play(8).await;
    // Random play cannot run out of legal moves this early short of a
    // miracle mate, so the loop runs to the cap.
    assert!(plies >= 4);
    assert_eq!(session.game().ply_count(), plies);
}

#[tokio::test]
async fn session_stops_after_game_over() {
    let mut session = Session::new(
        Arc::new(RandomController::instant()),
        Arc::new(RandomController::instant()),
    );
    session.game_mut().mark_game_over();
    assert!(!session.request_and_execute_next_move().await);
    assert_eq!(session.play(5).await, 0);
}
