//! Engagement ledger - per-video reactions and view tracking
//!
//! [`transition`] is the whole like/dislike state machine; storage backends
//! read a user's current state, ask it for the next state plus counter
//! deltas, and persist both in one atomic step. [`Engagement`] is the same
//! machine held entirely in memory.

mod engagement;
mod transition;

pub use engagement::{Engagement, LedgerDrift, ReactionOutcome};
pub use transition::{clear, transition, ReactionChange, Transition};
