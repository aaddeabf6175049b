//! Node ordering and step equality.
//!
//! Two independent comparers drive every search: a [`NodeComparer`] over
//! factors (which candidate is better, and the bound check) and a
//! [`StepEquality`] over steps (goal test and visited-set membership).
//! Factor and step types are unrelated in general, so the two are never
//! derived from one another.

use std::cmp::Ordering;
use std::fmt;
use std::hash::Hash;
use std::sync::Arc;

use crate::node::Node;

type CompareFn<F> = dyn Fn(&F, &F) -> Ordering + Send + Sync;
type KeyFn<S, K> = dyn Fn(&S) -> K + Send + Sync;

/// Whether smaller or larger factors rank first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    /// Smallest factor first (cost minimisation).
    Ascending,
    /// Largest factor first (score maximisation).
    Descending,
}

impl Direction {
    /// The opposite direction.
    #[must_use]
    pub fn flipped(self) -> Self {
        match self {
            Self::Ascending => Self::Descending,
            Self::Descending => Self::Ascending,
        }
    }

    /// Stable lowercase name for traces.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Ascending => "ascending",
            Self::Descending => "descending",
        }
    }
}

/// Total order over factors with a configurable direction.
///
/// `Less` always means "explored first": under [`Direction::Descending`]
/// the wrapped order is inverted.
pub struct NodeComparer<F> {
    compare: Arc<CompareFn<F>>,
    direction: Direction,
}

impl<F> NodeComparer<F> {
    /// Order factors with a caller-supplied comparison, ascending.
    pub fn by<C>(compare: C) -> Self
    where
        C: Fn(&F, &F) -> Ordering + Send + Sync + 'static,
    {
        Self {
            compare: Arc::new(compare),
            direction: Direction::Ascending,
        }
    }

    /// Same order, explicit direction.
    #[must_use]
    pub fn with_direction(mut self, direction: Direction) -> Self {
        self.direction = direction;
        self
    }

    /// Same order, opposite direction.
    #[must_use]
    pub fn reversed(&self) -> Self {
        Self {
            compare: Arc::clone(&self.compare),
            direction: self.direction.flipped(),
        }
    }

    /// Active direction.
    #[must_use]
    pub fn direction(&self) -> Direction {
        self.direction
    }

    /// Compare two factors under the active direction.
    pub fn compare(&self, a: &F, b: &F) -> Ordering {
        let ord = (self.compare)(a, b);
        match self.direction {
            Direction::Ascending => ord,
            Direction::Descending => ord.reverse(),
        }
    }

    /// Compare two nodes by factor.
    pub fn compare_nodes<S>(&self, a: &Node<F, S>, b: &Node<F, S>) -> Ordering {
        self.compare(&a.factor, &b.factor)
    }

    /// Whichever of `a` and `b` ranks first; `a` on ties.
    pub fn min<'a>(&self, a: &'a F, b: &'a F) -> &'a F {
        if self.compare(a, b) == Ordering::Greater {
            b
        } else {
            a
        }
    }
}

impl<F: Ord + 'static> NodeComparer<F> {
    /// The factor type's own `Ord`, ascending.
    #[must_use]
    pub fn natural() -> Self {
        Self::by(F::cmp)
    }
}

impl<F: PartialOrd + 'static> NodeComparer<F> {
    /// Order by `PartialOrd`, treating incomparable values (NaN) as equal.
    #[must_use]
    pub fn partial() -> Self {
        Self::by(|a: &F, b: &F| a.partial_cmp(b).unwrap_or(Ordering::Equal))
    }
}

impl<F> Clone for NodeComparer<F> {
    fn clone(&self) -> Self {
        Self {
            compare: Arc::clone(&self.compare),
            direction: self.direction,
        }
    }
}

impl<F> fmt::Debug for NodeComparer<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NodeComparer")
            .field("direction", &self.direction)
            .finish_non_exhaustive()
    }
}

/// Equality over steps, expressed as a projection to a hashable key.
///
/// Two steps are the same state when their keys are equal. The key is
/// also what the visited set stores.
pub struct StepEquality<S, K> {
    key: Arc<KeyFn<S, K>>,
}

impl<S, K: Eq + Hash> StepEquality<S, K> {
    /// Identify steps by a projected key.
    pub fn by_key<P>(key: P) -> Self
    where
        P: Fn(&S) -> K + Send + Sync + 'static,
    {
        Self { key: Arc::new(key) }
    }

    /// Key of a step.
    pub fn key(&self, step: &S) -> K {
        (self.key)(step)
    }

    /// Whether two steps denote the same state.
    pub fn same(&self, a: &S, b: &S) -> bool {
        self.key(a) == self.key(b)
    }
}

impl<S: Clone + Eq + Hash + 'static> StepEquality<S, S> {
    /// Value equality: a step is its own key.
    #[must_use]
    pub fn value() -> Self {
        Self::by_key(S::clone)
    }
}

impl<S, K> Clone for StepEquality<S, K> {
    fn clone(&self) -> Self {
        Self {
            key: Arc::clone(&self.key),
        }
    }
}

impl<S, K> fmt::Debug for StepEquality<S, K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StepEquality").finish_non_exhaustive()
    }
}
