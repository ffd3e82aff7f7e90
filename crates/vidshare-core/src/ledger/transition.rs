use crate::value_objects::{ReactionCounts, ReactionKind, ReactionState};

/// Result of applying a reaction to one user's current state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Transition {
    pub previous: ReactionState,
    pub next: ReactionState,
    pub like_delta: i64,
    pub dislike_delta: i64,
}

impl Transition {
    const fn stay(state: ReactionState) -> Self {
        Self {
            previous: state,
            next: state,
            like_delta: 0,
            dislike_delta: 0,
        }
    }

    #[inline]
    pub const fn is_noop(&self) -> bool {
        self.like_delta == 0 && self.dislike_delta == 0
    }

    /// Counts after this transition, never dropping below zero
    pub fn apply_to(&self, counts: ReactionCounts) -> ReactionCounts {
        ReactionCounts::new(
            (counts.likes + self.like_delta).max(0),
            (counts.dislikes + self.dislike_delta).max(0),
        )
    }
}

/// Move `current` towards `desired`.
///
/// Asking for the state a user is already in changes nothing; switching
/// sides moves exactly one unit from one counter to the other.
pub const fn transition(current: ReactionState, desired: ReactionKind) -> Transition {
    let next = desired.as_state();
    let (like_delta, dislike_delta) = match (current, desired) {
        (ReactionState::Liked, ReactionKind::Like)
        | (ReactionState::Disliked, ReactionKind::Dislike) => return Transition::stay(current),
        (ReactionState::None, ReactionKind::Like) => (1, 0),
        (ReactionState::None, ReactionKind::Dislike) => (0, 1),
        (ReactionState::Disliked, ReactionKind::Like) => (1, -1),
        (ReactionState::Liked, ReactionKind::Dislike) => (-1, 1),
    };
    Transition {
        previous: current,
        next,
        like_delta,
        dislike_delta,
    }
}

/// A requested change to one user's reaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReactionChange {
    Set(ReactionKind),
    Clear,
}

impl ReactionChange {
    pub const fn step(self, current: ReactionState) -> Transition {
        match self {
            Self::Set(desired) => transition(current, desired),
            Self::Clear => clear(current),
        }
    }
}

/// Withdraw whatever reaction `current` holds.
pub const fn clear(current: ReactionState) -> Transition {
    let (like_delta, dislike_delta) = match current {
        ReactionState::None => return Transition::stay(current),
        ReactionState::Liked => (-1, 0),
        ReactionState::Disliked => (0, -1),
    };
    Transition {
        previous: current,
        next: ReactionState::None,
        like_delta,
        dislike_delta,
    }
}
