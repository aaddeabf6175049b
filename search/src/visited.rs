//! Visited-step tracking for one search pass.
//!
//! Membership is keyed by [`StepEquality`](lodestar_kernel::StepEquality)
//! keys. The test and the insertion are one operation ([`VisitedSet::is_new`]),
//! which is what the expander receives as its filter.
//!
//! Both scopes keep a journal of the keys they hold beyond the start.
//! Path scope journals the active path ([`VisitedSet::enter`] /
//! [`VisitedSet::leave`]); search scope journals admissions, which
//! [`VisitedSet::release`] can hand back when a subtree is set aside.

use std::collections::HashSet;
use std::hash::Hash;

use crate::policy::VisitedScope;

/// Journal position returned by [`VisitedSet::enter`] and
/// [`VisitedSet::checkpoint`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PathMark(usize);

/// Set of step keys already seen in the current pass.
#[derive(Debug)]
pub struct VisitedSet<K> {
    scope: VisitedScope,
    seen: HashSet<K>,
    batch: HashSet<K>,
    journal: Vec<K>,
}

impl<K: Eq + Hash + Clone> VisitedSet<K> {
    /// Create an empty set with the given scope.
    #[must_use]
    pub fn new(scope: VisitedScope) -> Self {
        Self {
            scope,
            seen: HashSet::new(),
            batch: HashSet::new(),
            journal: Vec::new(),
        }
    }

    /// Scope in effect.
    #[must_use]
    pub fn scope(&self) -> VisitedScope {
        self.scope
    }

    /// Forget everything and admit `start` as the first member.
    pub fn reset(&mut self, start: K) {
        self.seen.clear();
        self.batch.clear();
        self.journal.clear();
        match self.scope {
            VisitedScope::Search => {
                self.seen.insert(start);
            }
            VisitedScope::Path => {
                self.journal.push(start.clone());
                self.seen.insert(start);
            }
        }
    }

    /// Start a new expansion batch. Only meaningful for path scope, where
    /// duplicates within one expansion are still suppressed.
    pub fn begin_batch(&mut self) {
        self.batch.clear();
    }

    /// `true` and record the key the first time it is seen, `false` after.
    pub fn is_new(&mut self, key: K) -> bool {
        match self.scope {
            VisitedScope::Search => {
                if self.seen.contains(&key) {
                    return false;
                }
                self.seen.insert(key.clone());
                self.journal.push(key);
                true
            }
            VisitedScope::Path => !self.seen.contains(&key) && self.batch.insert(key),
        }
    }

    /// Put `key` on the active path. No-op for search scope.
    pub fn enter(&mut self, key: K) -> PathMark {
        let mark = PathMark(self.journal.len());
        if self.scope == VisitedScope::Path && self.seen.insert(key.clone()) {
            self.journal.push(key);
        }
        mark
    }

    /// Release every key entered since `mark`. No-op for search scope.
    pub fn leave(&mut self, mark: PathMark) {
        if self.scope == VisitedScope::Path {
            self.unwind(mark);
        }
    }

    /// Current journal position.
    #[must_use]
    pub fn checkpoint(&self) -> PathMark {
        PathMark(self.journal.len())
    }

    /// Forget every key admitted since `mark`. No-op for path scope, where
    /// [`VisitedSet::leave`] already unwinds the journal.
    pub fn release(&mut self, mark: PathMark) {
        if self.scope == VisitedScope::Search {
            self.unwind(mark);
        }
    }

    fn unwind(&mut self, mark: PathMark) {
        while self.journal.len() > mark.0 {
            if let Some(key) = self.journal.pop() {
                self.seen.remove(&key);
            }
        }
    }

    /// Whether `key` is currently a member.
    #[must_use]
    pub fn contains(&self, key: &K) -> bool {
        self.seen.contains(key)
    }

    /// Number of current members.
    #[must_use]
    pub fn len(&self) -> usize {
        self.seen.len()
    }

    /// Whether the set has no members.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.seen.is_empty()
    }
}
