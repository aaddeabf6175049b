//! `WeightedGraph`: named vertices, weighted edges, and a heuristic table.
//!
//! The factor of a vertex is `level + h(vertex)` where `level` is the
//! accumulated edge cost. Vertices missing from the heuristic table
//! estimate zero. [`WeightedGraph::romania`] is the classic road map with
//! straight-line distances to Bucharest.

use std::collections::{BTreeMap, HashMap};

use lodestar_kernel::Level;
use lodestar_search::{SearchError, SearchSpec};

use crate::contract::SearchWorld;
use crate::query::Query;

/// Directed weighted graph with an estimate per vertex.
#[derive(Debug, Clone, Default)]
pub struct WeightedGraph {
    start: String,
    goal: String,
    edges: Vec<(String, String, Level)>,
    estimates: BTreeMap<String, Level>,
}

impl WeightedGraph {
    #[must_use]
    pub fn new(start: impl Into<String>, goal: impl Into<String>) -> Self {
        Self {
            start: start.into(),
            goal: goal.into(),
            ..Self::default()
        }
    }

    /// One-way edge. Neighbours are offered in insertion order.
    #[must_use]
    pub fn edge(mut self, from: impl Into<String>, to: impl Into<String>, cost: Level) -> Self {
        self.edges.push((from.into(), to.into(), cost));
        self
    }

    /// Two-way edge.
    #[must_use]
    pub fn road(self, a: impl Into<String>, b: impl Into<String>, cost: Level) -> Self {
        let (a, b) = (a.into(), b.into());
        self.edge(a.clone(), b.clone(), cost).edge(b, a, cost)
    }

    #[must_use]
    pub fn estimate(mut self, vertex: impl Into<String>, h: Level) -> Self {
        self.estimates.insert(vertex.into(), h);
        self
    }

    /// Same graph, different endpoints.
    #[must_use]
    pub fn with_route(mut self, start: impl Into<String>, goal: impl Into<String>) -> Self {
        self.start = start.into();
        self.goal = goal.into();
        self
    }

    /// Number of directed edges.
    #[must_use]
    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    /// Road map of Romania, Arad to Bucharest.
    #[must_use]
    pub fn romania() -> Self {
        const ROADS: [(&str, &str, Level); 23] = [
            ("Arad", "Zerind", 75),
            ("Arad", "Sibiu", 140),
            ("Arad", "Timisoara", 118),
            ("Zerind", "Oradea", 71),
            ("Oradea", "Sibiu", 151),
            ("Timisoara", "Lugoj", 111),
            ("Lugoj", "Mehadia", 70),
            ("Mehadia", "Drobeta", 75),
            ("Drobeta", "Craiova", 120),
            ("Craiova", "Rimnicu Vilcea", 146),
            ("Craiova", "Pitesti", 138),
            ("Sibiu", "Fagaras", 99),
            ("Sibiu", "Rimnicu Vilcea", 80),
            ("Rimnicu Vilcea", "Pitesti", 97),
            ("Fagaras", "Bucharest", 211),
            ("Pitesti", "Bucharest", 101),
            ("Bucharest", "Giurgiu", 90),
            ("Bucharest", "Urziceni", 85),
            ("Urziceni", "Hirsova", 98),
            ("Hirsova", "Eforie", 86),
            ("Urziceni", "Vaslui", 142),
            ("Vaslui", "Iasi", 92),
            ("Iasi", "Neamt", 87),
        ];
        const STRAIGHT_LINE: [(&str, Level); 20] = [
            ("Arad", 366),
            ("Bucharest", 0),
            ("Craiova", 160),
            ("Drobeta", 242),
            ("Eforie", 161),
            ("Fagaras", 176),
            ("Giurgiu", 77),
            ("Hirsova", 151),
            ("Iasi", 226),
            ("Lugoj", 244),
            ("Mehadia", 241),
            ("Neamt", 234),
            ("Oradea", 380),
            ("Pitesti", 100),
            ("Rimnicu Vilcea", 193),
            ("Sibiu", 253),
            ("Timisoara", 329),
            ("Urziceni", 80),
            ("Vaslui", 199),
            ("Zerind", 374),
        ];

        let graph = ROADS
            .iter()
            .fold(Self::new("Arad", "Bucharest"), |g, &(a, b, cost)| {
                g.road(a, b, cost)
            });
        STRAIGHT_LINE
            .iter()
            .fold(graph, |g, &(city, h)| g.estimate(city, h))
    }
}

impl SearchWorld for WeightedGraph {
    type Step = String;
    type Factor = Level;
    type Key = String;

    #[allow(clippy::unnecessary_literal_bound)]
    fn world_id(&self) -> &str {
        "weighted_graph"
    }

    fn spec(&self) -> Result<SearchSpec<String, Level, String>, SearchError> {
        let mut adjacency: HashMap<String, Vec<String>> = HashMap::new();
        let mut costs: HashMap<(String, String), Level> = HashMap::new();
        for (from, to, cost) in &self.edges {
            adjacency.entry(from.clone()).or_default().push(to.clone());
            costs.insert((from.clone(), to.clone()), *cost);
        }
        let estimates = self.estimates.clone();

        Query::new(self.start.clone(), self.goal.clone(), move |v: &String| {
            adjacency.get(v).cloned().unwrap_or_default()
        })
        .with_step_cost(move |from: &String, to: &String| {
            costs
                .get(&(from.clone(), to.clone()))
                .copied()
                .unwrap_or(1)
        })
        .select(move |v: &String, level: Level| {
            level.saturating_add(estimates.get(v).copied().unwrap_or(0))
        })
        .order_by_natural()
        .build()
    }

    fn describe_step(&self, step: &String) -> serde_json::Value {
        serde_json::Value::String(step.clone())
    }
}
