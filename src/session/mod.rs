//! Running games: shared state, computer players, and clocks.
//!
//! The rules engine is synchronous. A [`Session`] wraps one game for use
//! from several threads: human moves and computer moves are serialized, the
//! clock runs on its own timer, and every change is announced on a
//! [`SessionEvent`] channel.

pub mod clock;
pub mod driver;
pub mod events;
pub mod task;

pub use clock::{Clock, TurnView};
pub use driver::Session;
pub use events::{ClockTick, SessionEvent};
pub use task::TaskHandle;
