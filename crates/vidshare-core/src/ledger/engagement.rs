use std::collections::{HashMap, HashSet};

use crate::value_objects::{ReactionCounts, ReactionKind, ReactionState, Snowflake};

use super::transition::{ReactionChange, Transition};

/// What a reaction call did to the ledger.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReactionOutcome {
    pub previous: ReactionState,
    pub current: ReactionState,
    pub counts: ReactionCounts,
}

impl ReactionOutcome {
    #[inline]
    pub fn changed(&self) -> bool {
        self.previous != self.current
    }
}

/// Stored counters disagree with the reaction map.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("counters {stored:?} drifted from reaction map {actual:?}")]
pub struct LedgerDrift {
    pub stored: ReactionCounts,
    pub actual: ReactionCounts,
}

/// Engagement state of a single video.
///
/// The reaction map is authoritative; `counts` is a cached projection of it
/// that every mutation keeps in step.
#[derive(Debug, Clone, Default)]
pub struct Engagement {
    reactions: HashMap<Snowflake, ReactionKind>,
    counts: ReactionCounts,
    viewed_by: HashSet<Snowflake>,
}

impl Engagement {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state_of(&self, user: Snowflake) -> ReactionState {
        self.reactions.get(&user).copied().into()
    }

    #[inline]
    pub fn counts(&self) -> ReactionCounts {
        self.counts
    }

    #[inline]
    pub fn view_count(&self) -> i64 {
        self.viewed_by.len() as i64
    }

    pub fn has_viewed(&self, user: Snowflake) -> bool {
        self.viewed_by.contains(&user)
    }

    pub fn apply(&mut self, user: Snowflake, change: ReactionChange) -> ReactionOutcome {
        let step = change.step(self.state_of(user));
        self.commit(user, step)
    }

    pub fn record_reaction(&mut self, user: Snowflake, desired: ReactionKind) -> ReactionOutcome {
        self.apply(user, ReactionChange::Set(desired))
    }

    pub fn clear_reaction(&mut self, user: Snowflake) -> ReactionOutcome {
        self.apply(user, ReactionChange::Clear)
    }

    /// Add `user` to the view set. Returns `true` only the first time.
    pub fn record_view(&mut self, user: Snowflake) -> bool {
        self.viewed_by.insert(user)
    }

    /// Counters recomputed from the reaction map
    pub fn tally(&self) -> ReactionCounts {
        self.reactions
            .values()
            .fold(ReactionCounts::default(), |mut acc, kind| {
                match kind {
                    ReactionKind::Like => acc.likes += 1,
                    ReactionKind::Dislike => acc.dislikes += 1,
                }
                acc
            })
    }

    pub fn verify(&self) -> Result<(), LedgerDrift> {
        let actual = self.tally();
        if actual == self.counts {
            Ok(())
        } else {
            Err(LedgerDrift {
                stored: self.counts,
                actual,
            })
        }
    }

    /// Rebuild the cached counters from the reaction map.
    pub fn reconcile(&mut self) -> ReactionCounts {
        self.counts = self.tally();
        self.counts
    }

    fn commit(&mut self, user: Snowflake, step: Transition) -> ReactionOutcome {
        if !step.is_noop() {
            match step.next.kind() {
                Some(kind) => {
                    self.reactions.insert(user, kind);
                }
                None => {
                    self.reactions.remove(&user);
                }
            }
            self.counts = step.apply_to(self.counts);
        }
        ReactionOutcome {
            previous: step.previous,
            current: step.next,
            counts: self.counts,
        }
    }
}
