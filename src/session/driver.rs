//! A live game shared between a presentation layer and background tasks.
//!
//! ## Locking
//!
//! - `decision` serializes "decide and apply one move" so a human submission
//!   and the computer driver never interleave.
//! - `game` guards the state itself and is held only for short reads and the
//!   synchronous `play` call. Computer players search a snapshot with the
//!   game lock released.
//! - The clock reads the atomic [`TurnView`] and takes no lock until its
//!   player runs out of time.
//!
//! A poisoned lock is recovered: every mutation goes through
//! `GameState::play`, which restores the state on failure.

use std::ops::ControlFlow;
use std::sync::mpsc::{self, Receiver, Sender};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use crate::core::{Controller, PlayerId, PlayerMap, Position, Result};
use crate::pieces::TokenKind;
use crate::players::Strategy;
use crate::rules::{GameState, MoveOutcome};

use super::clock::{Clock, TurnView};
use super::events::{ClockTick, SessionEvent};
use super::task::TaskHandle;

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

struct Shared {
    game: Mutex<GameState>,
    decision: Mutex<()>,
    strategies: Mutex<PlayerMap<Option<Arc<dyn Strategy>>>>,
    view: TurnView,
    events: Mutex<Sender<SessionEvent>>,
}

impl Shared {
    fn emit(&self, event: SessionEvent) {
        // Nobody listening is fine.
        let _ = lock(&self.events).send(event);
    }

    fn publish(&self, game: &GameState) {
        self.view.publish(game.turn(), game.outcome().is_some());
    }

    fn apply(&self, position: Position) -> Result<MoveOutcome> {
        let outcome = {
            let mut game = lock(&self.game);
            let outcome = game.play(position)?;
            self.publish(&game);
            outcome
        };
        self.emit(SessionEvent::StateChanged);
        Ok(outcome)
    }

    fn submit(&self, position: Position) -> Result<MoveOutcome> {
        let _decision = lock(&self.decision);
        self.apply(position)
    }

    /// Let the computer player to move decide and apply one move.
    /// `Ok(None)` when the game is over or a human is to move.
    fn computer_move(&self) -> Result<Option<MoveOutcome>> {
        let _decision = lock(&self.decision);

        let snapshot = lock(&self.game).clone();
        if snapshot.outcome().is_some() {
            return Ok(None);
        }
        let player = snapshot.current_player();
        let Some(strategy) = lock(&self.strategies)[player].clone() else {
            return Ok(None);
        };

        let position = strategy.choose_move(&snapshot, player)?;
        self.apply(position).map(Some)
    }

    fn on_tick(&self, tick: ClockTick) {
        if tick.is_expired() {
            let mut game = lock(&self.game);
            if game.expire_clock(tick.player) {
                self.publish(&game);
            }
        }
        self.emit(SessionEvent::ClockTick(tick));
    }
}

/// A game plus its background clock and computer players.
///
/// Dropping the session stops its tasks.
pub struct Session {
    shared: Arc<Shared>,
    tasks: Vec<TaskHandle>,
}

impl Session {
    /// Wrap `game`. Players configured as computers get their strategy
    /// from the registry. Events arrive on the returned receiver.
    pub fn new(game: GameState) -> (Self, Receiver<SessionEvent>) {
        let (sender, receiver) = mpsc::channel();
        let strategies = PlayerMap::new(|player| match game.player(player).controller {
            Controller::Computer(kind) => Some(Arc::from(kind.create())),
            Controller::Human => None,
        });

        let view = TurnView::new();
        view.publish(game.turn(), game.outcome().is_some());

        let shared = Arc::new(Shared {
            game: Mutex::new(game),
            decision: Mutex::new(()),
            strategies: Mutex::new(strategies),
            view,
            events: Mutex::new(sender),
        });

        let session = Self {
            shared,
            tasks: Vec::new(),
        };
        (session, receiver)
    }

    /// Put `player` under `strategy`, replacing any configured one.
    pub fn set_strategy(&self, player: PlayerId, strategy: Box<dyn Strategy>) {
        lock(&self.shared.strategies)[player] = Some(Arc::from(strategy));
    }

    /// Hand `player` back to a human.
    pub fn clear_strategy(&self, player: PlayerId) {
        lock(&self.shared.strategies)[player] = None;
    }

    /// Apply a move for the player to move.
    pub fn submit_move(&self, position: Position) -> Result<MoveOutcome> {
        self.shared.submit(position)
    }

    /// Queue `kind` as the next token of the player to move.
    pub fn set_next_token(&self, kind: TokenKind) {
        lock(&self.shared.game).set_next_token(kind);
        self.shared.emit(SessionEvent::StateChanged);
    }

    /// Ask the computer player to move, if one is to move.
    pub fn request_computer_move(&self) -> Result<Option<MoveOutcome>> {
        self.shared.computer_move()
    }

    /// Copy of the current game state.
    #[must_use]
    pub fn snapshot(&self) -> GameState {
        lock(&self.shared.game).clone()
    }

    pub fn save(&self) -> Result<Vec<u8>> {
        lock(&self.shared.game).save()
    }

    #[must_use]
    pub fn view(&self) -> &TurnView {
        &self.shared.view
    }

    /// Start the game clock, sampled every `resolution`.
    ///
    /// In timed games a player whose clock runs out loses.
    pub fn start_clock(&mut self, resolution: Duration) {
        let limit = lock(&self.shared.game).config().clock_limit();
        let shared = Arc::clone(&self.shared);
        let handle = Clock::new(limit).spawn(self.shared.view.clone(), resolution, move |tick| {
            shared.on_tick(tick);
        });
        self.tasks.push(handle);
    }

    /// Poll the computer players every `interval` until the game ends.
    pub fn start_computer_players(&mut self, interval: Duration) {
        let shared = Arc::clone(&self.shared);
        let handle = TaskHandle::spawn(interval, move || {
            if shared.view.is_finished() {
                return ControlFlow::Break(());
            }
            if let Err(error) = shared.computer_move() {
                let player = shared.view.current_player();
                shared.emit(SessionEvent::ComputerMoveFailed { player, error });
            }
            ControlFlow::Continue(())
        });
        self.tasks.push(handle);
    }

    /// Whether every background task has exited.
    #[must_use]
    pub fn is_idle(&self) -> bool {
        self.tasks.iter().all(TaskHandle::is_finished)
    }

    /// Stop and join every background task.
    pub fn stop(&mut self) {
        for mut task in self.tasks.drain(..) {
            task.stop();
        }
    }
}

impl Drop for Session {
    fn drop(&mut self) {
        self.stop();
    }
}
