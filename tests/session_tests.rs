//! Session integration tests: background computer players and clocks.

use std::time::Duration;

use special_gomoku::core::{Color, GameConfig, GameMode, PlayerConfig, PlayerId, Position};
use special_gomoku::players::StrategyKind;
use special_gomoku::rules::GameState;
use special_gomoku::session::{Session, SessionEvent};

fn computer_game(one: StrategyKind, two: StrategyKind) -> GameState {
    let config = GameConfig::default()
        .with_board_size(10)
        .with_player(PlayerId::ONE, PlayerConfig::computer("One", Color::Black, one))
        .with_player(PlayerId::TWO, PlayerConfig::computer("Two", Color::White, two));
    GameState::new(config).unwrap()
}

#[test]
fn test_computer_players_take_turns_in_background() {
    let (mut session, events) =
        Session::new(computer_game(StrategyKind::Expert, StrategyKind::Aggressive));
    session.start_computer_players(Duration::from_millis(1));

    let mut changes = 0;
    while changes < 6 {
        match events.recv_timeout(Duration::from_secs(10)) {
            Ok(SessionEvent::StateChanged) => changes += 1,
            Ok(SessionEvent::ComputerMoveFailed { player, error }) => {
                panic!("{player} failed to move: {error}")
            }
            Ok(SessionEvent::ClockTick(_)) => {}
            Err(e) => panic!("no progress: {e}"),
        }
    }
    session.stop();

    let game = session.snapshot();
    assert!(game.turn() >= 6);
    assert_eq!(game.token_at(Position::new(5, 5)).unwrap().owner, PlayerId::ONE);
    assert!(session.is_idle());
}

#[test]
fn test_human_move_and_computer_reply_are_serialized() {
    let config = GameConfig::default().with_board_size(10).with_player(
        PlayerId::TWO,
        PlayerConfig::computer("Bot", Color::White, StrategyKind::Expert),
    );
    let (session, events) = Session::new(GameState::new(config).unwrap());

    session.submit_move(Position::new(4, 4)).unwrap();
    let reply = session.request_computer_move().unwrap().unwrap();
    assert_eq!(reply.player, PlayerId::TWO);
    assert_eq!(session.snapshot().turn(), 2);

    assert_eq!(events.try_iter().count(), 2);
}

#[test]
fn test_timed_out_player_loses() {
    let config = GameConfig::default()
        .with_mode(GameMode::QuickTime)
        .with_time_limit(Duration::from_millis(30));
    let (mut session, events) = Session::new(GameState::new(config).unwrap());
    session.start_clock(Duration::from_millis(5));

    let expired = loop {
        match events.recv_timeout(Duration::from_secs(10)) {
            Ok(SessionEvent::ClockTick(tick)) if tick.is_expired() => break tick,
            Ok(_) => {}
            Err(e) => panic!("clock never expired: {e}"),
        }
    };
    session.stop();

    assert_eq!(expired.player, PlayerId::ONE);
    assert_eq!(session.snapshot().winner(), Some(PlayerId::TWO));
    assert!(session.view().is_finished());
}

#[test]
fn test_untimed_clock_counts_up_without_deciding() {
    let (mut session, events) = Session::new(GameState::new(GameConfig::default()).unwrap());
    session.start_clock(Duration::from_millis(5));

    match events.recv_timeout(Duration::from_secs(10)) {
        Ok(SessionEvent::ClockTick(tick)) => {
            assert_eq!(tick.player, PlayerId::ONE);
            assert!(tick.millis >= 0);
        }
        other => panic!("expected a clock tick, got {other:?}"),
    }
    session.stop();
    assert_eq!(session.snapshot().winner(), None);
}

#[test]
fn test_session_save_restores() {
    let (session, _events) = Session::new(GameState::new(GameConfig::default()).unwrap());
    session.submit_move(Position::new(7, 7)).unwrap();

    let restored = GameState::restore(&session.save().unwrap()).unwrap();
    assert_eq!(restored.board(), session.snapshot().board());
}
