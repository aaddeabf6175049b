//! Search nodes, the node arena, and path reconstruction.
//!
//! Nodes form a tree through write-once `previous` links. The arena owns
//! every node created during a search; a [`NodeId`] is an index into it,
//! so back-pointers never alias or cycle.

/// Cumulative depth or cost at which a node was reached.
pub type Level = u32;

/// Index of a node inside a [`NodeArena`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(usize);

impl NodeId {
    /// Position of the node in arena allocation order.
    #[must_use]
    pub fn index(self) -> usize {
        self.0
    }

    /// Stable numeric form used in traces and reports.
    #[must_use]
    pub fn as_u64(self) -> u64 {
        self.0 as u64
    }
}

impl std::fmt::Display for NodeId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// One state on a candidate path.
///
/// `step` is the domain state, `factor` the value the search ranks by.
/// The two are frequently different types (a grid cell ranked by an
/// integer cost estimate, a puzzle board ranked by a float).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Node<F, S> {
    /// Domain state.
    pub step: S,
    /// Heuristic value used for ordering.
    pub factor: F,
    /// Depth or accumulated cost from the start.
    pub level: Level,
    previous: Option<NodeId>,
}

impl<F, S> Node<F, S> {
    /// Create an unlinked node.
    #[must_use]
    pub fn new(step: S, factor: F, level: Level) -> Self {
        Self {
            step,
            factor,
            level,
            previous: None,
        }
    }

    /// Predecessor on the path that produced this node (`None` for seeds).
    #[must_use]
    pub fn previous(&self) -> Option<NodeId> {
        self.previous
    }
}

/// Owner of every node created during one search invocation.
#[derive(Debug, Clone)]
pub struct NodeArena<F, S> {
    nodes: Vec<Node<F, S>>,
}

impl<F, S> NodeArena<F, S> {
    /// Create an empty arena.
    #[must_use]
    pub fn new() -> Self {
        Self { nodes: Vec::new() }
    }

    /// Take ownership of `node` and return its id.
    pub fn alloc(&mut self, node: Node<F, S>) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.nodes.push(node);
        id
    }

    /// Set `child.previous = parent`.
    ///
    /// # Panics
    ///
    /// Panics if `child` is already linked, if either id is out of range,
    /// or if `child.level` is lower than `parent.level` (levels never
    /// decrease along a path).
    pub fn link(&mut self, parent: NodeId, child: NodeId) {
        assert_ne!(parent, child, "node {child} cannot precede itself");
        let parent_level = self.nodes[parent.0].level;
        let node = &mut self.nodes[child.0];
        assert!(
            node.previous.is_none(),
            "node {child} is already linked to {:?}",
            node.previous
        );
        assert!(
            node.level >= parent_level,
            "node {child} level {} is below parent {parent} level {parent_level}",
            node.level
        );
        node.previous = Some(parent);
    }

    /// Allocate `node` and link it under `parent` in one step.
    pub fn alloc_child(&mut self, parent: NodeId, node: Node<F, S>) -> NodeId {
        let id = self.alloc(node);
        self.link(parent, id);
        id
    }

    /// Borrow a node.
    ///
    /// # Panics
    ///
    /// Panics if `id` was not produced by this arena.
    #[must_use]
    pub fn get(&self, id: NodeId) -> &Node<F, S> {
        &self.nodes[id.0]
    }

    /// Look up a node by its numeric trace id.
    #[must_use]
    pub fn find(&self, id: u64) -> Option<(NodeId, &Node<F, S>)> {
        let index = usize::try_from(id).ok()?;
        self.nodes.get(index).map(|n| (NodeId(index), n))
    }

    /// Number of nodes allocated so far.
    #[must_use]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Whether no node has been allocated.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// All nodes with their ids, in allocation order.
    pub fn iter(&self) -> impl Iterator<Item = (NodeId, &Node<F, S>)> {
        self.nodes.iter().enumerate().map(|(i, n)| (NodeId(i), n))
    }

    /// Walk from `id` back to its earliest ancestor, `id` first.
    pub fn ancestors(&self, id: NodeId) -> Ancestors<'_, F, S> {
        Ancestors {
            arena: self,
            next: Some(id),
        }
    }

    /// Node ids from the earliest ancestor to `id`, inclusive.
    #[must_use]
    pub fn path_ids(&self, id: NodeId) -> Vec<NodeId> {
        let mut path: Vec<NodeId> = self.ancestors(id).collect();
        path.reverse();
        path
    }

    /// Number of links between `id` and its earliest ancestor.
    #[must_use]
    pub fn depth(&self, id: NodeId) -> usize {
        self.ancestors(id).count() - 1
    }
}

impl<F: Clone, S> NodeArena<F, S> {
    /// Factors from the earliest ancestor to `id`, inclusive.
    #[must_use]
    pub fn trace_back(&self, id: NodeId) -> Vec<F> {
        self.path_ids(id)
            .into_iter()
            .map(|n| self.nodes[n.0].factor.clone())
            .collect()
    }
}

impl<F, S: Clone> NodeArena<F, S> {
    /// Steps from the earliest ancestor to `id`, inclusive.
    #[must_use]
    pub fn trace_steps(&self, id: NodeId) -> Vec<S> {
        self.path_ids(id)
            .into_iter()
            .map(|n| self.nodes[n.0].step.clone())
            .collect()
    }
}

impl<F, S> Default for NodeArena<F, S> {
    fn default() -> Self {
        Self::new()
    }
}

/// Iterator over a node and its predecessors, nearest first.
pub struct Ancestors<'a, F, S> {
    arena: &'a NodeArena<F, S>,
    next: Option<NodeId>,
}

impl<F, S> Iterator for Ancestors<'_, F, S> {
    type Item = NodeId;

    fn next(&mut self) -> Option<NodeId> {
        let current = self.next?;
        self.next = self.arena.get(current).previous;
        Some(current)
    }
}
