//! Per-player game clocks.
//!
//! [`Clock`] is a pure state machine: the caller feeds it elapsed time for
//! the player to move and it returns a [`ClockTick`] whenever the displayed
//! whole-second value changes. A limited clock counts down and reports a
//! negative value exactly once when it runs out; an unlimited clock counts
//! up.
//!
//! The clock task only reads the atomic [`TurnView`]; it never touches the
//! game itself.

use std::ops::ControlFlow;
use std::sync::atomic::{AtomicBool, AtomicI32, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

use crate::core::{PlayerId, PlayerMap};

use super::events::ClockTick;
use super::task::TaskHandle;

/// Lock-free mirror of the turn counter and game-over flag.
#[derive(Clone, Debug, Default)]
pub struct TurnView {
    turn: Arc<AtomicI32>,
    finished: Arc<AtomicBool>,
}

impl TurnView {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn publish(&self, turn: i32, finished: bool) {
        self.turn.store(turn, Ordering::Release);
        self.finished.store(finished, Ordering::Release);
    }

    #[must_use]
    pub fn turn(&self) -> i32 {
        self.turn.load(Ordering::Acquire)
    }

    #[must_use]
    pub fn current_player(&self) -> PlayerId {
        PlayerId::for_turn(self.turn())
    }

    #[must_use]
    pub fn is_finished(&self) -> bool {
        self.finished.load(Ordering::Acquire)
    }
}

/// Time used by each player, with an optional per-player allowance.
#[derive(Clone, Debug)]
pub struct Clock {
    limit: Option<Duration>,
    used: PlayerMap<Duration>,
    shown: PlayerMap<Option<u64>>,
    expired: PlayerMap<bool>,
}

impl Clock {
    pub fn new(limit: Option<Duration>) -> Self {
        Self {
            limit,
            used: PlayerMap::default(),
            shown: PlayerMap::default(),
            expired: PlayerMap::default(),
        }
    }

    #[must_use]
    pub fn used(&self, player: PlayerId) -> Duration {
        self.used[player]
    }

    /// Time left for `player`, if the clock is limited.
    #[must_use]
    pub fn remaining(&self, player: PlayerId) -> Option<Duration> {
        self.limit.map(|limit| limit.saturating_sub(self.used[player]))
    }

    #[must_use]
    pub fn is_expired(&self, player: PlayerId) -> bool {
        self.expired[player]
    }

    /// Charge `step` to `player` and report a tick if the display changed.
    pub fn advance(&mut self, player: PlayerId, step: Duration) -> Option<ClockTick> {
        if self.expired[player] {
            return None;
        }
        self.used[player] += step;

        let Some(limit) = self.limit else {
            let seconds = self.used[player].as_secs();
            return self.show(player, seconds, seconds as i64 * 1000);
        };

        if self.used[player] >= limit {
            self.expired[player] = true;
            let over = (self.used[player] - limit).as_millis() as i64;
            return Some(ClockTick {
                player,
                millis: -over.max(1),
            });
        }
        let seconds = limit.saturating_sub(self.used[player]).as_secs();
        self.show(player, seconds, seconds as i64 * 1000)
    }

    fn show(&mut self, player: PlayerId, seconds: u64, millis: i64) -> Option<ClockTick> {
        if self.shown[player] == Some(seconds) {
            return None;
        }
        self.shown[player] = Some(seconds);
        Some(ClockTick { player, millis })
    }

    /// Run the clock in the background, charging wall time to whoever is to
    /// move according to `view`. Stops once the game is finished.
    pub fn spawn<F>(mut self, view: TurnView, resolution: Duration, mut on_tick: F) -> TaskHandle
    where
        F: FnMut(ClockTick) + Send + 'static,
    {
        let mut last = Instant::now();
        TaskHandle::spawn(resolution, move || {
            if view.is_finished() {
                return ControlFlow::Break(());
            }
            let now = Instant::now();
            if let Some(tick) = self.advance(view.current_player(), now - last) {
                on_tick(tick);
            }
            last = now;
            ControlFlow::Continue(())
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unlimited_clock_counts_up() {
        let mut clock = Clock::new(None);
        let first = clock.advance(PlayerId::ONE, Duration::from_millis(400)).unwrap();
        assert_eq!(first.millis, 0);
        assert_eq!(clock.advance(PlayerId::ONE, Duration::from_millis(400)), None);

        let tick = clock.advance(PlayerId::ONE, Duration::from_millis(400)).unwrap();
        assert_eq!(tick.millis, 1000);
        assert_eq!(clock.used(PlayerId::TWO), Duration::ZERO);
        assert_eq!(clock.remaining(PlayerId::ONE), None);
    }

    #[test]
    fn test_limited_clock_counts_down_and_expires_once() {
        let mut clock = Clock::new(Some(Duration::from_secs(2)));
        let tick = clock.advance(PlayerId::TWO, Duration::from_millis(500)).unwrap();
        assert_eq!(tick.millis, 1000);
        assert!(!tick.is_expired());

        let tick = clock.advance(PlayerId::TWO, Duration::from_millis(1600)).unwrap();
        assert!(tick.is_expired());
        assert_eq!(tick.player, PlayerId::TWO);
        assert!(clock.is_expired(PlayerId::TWO));

        assert_eq!(clock.advance(PlayerId::TWO, Duration::from_secs(1)), None);
        assert!(!clock.is_expired(PlayerId::ONE));
    }

    #[test]
    fn test_turn_view_tracks_player() {
        let view = TurnView::new();
        assert_eq!(view.current_player(), PlayerId::ONE);
        view.publish(3, false);
        assert_eq!(view.current_player(), PlayerId::TWO);
        view.publish(4, true);
        assert!(view.is_finished());
    }

    #[test]
    fn test_spawned_clock_stops_when_finished() {
        let view = TurnView::new();
        view.publish(0, true);
        let handle = Clock::new(None).spawn(view, Duration::from_millis(1), |_| {});
        for _ in 0..1000 {
            if handle.is_finished() {
                break;
            }
            std::thread::sleep(Duration::from_millis(1));
        }
        assert!(handle.is_finished());
    }
}
