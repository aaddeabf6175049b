//! Small hand-written graphs shared by the lock tests.
//!
//! Every fixture is a [`SearchSpec`] over `char` steps so failures print
//! readable paths.

use std::collections::HashMap;
use std::path::Path;

use lodestar_kernel::{Level, Node, NodeComparer, StepEquality};
use lodestar_search::{FnExpander, SearchSpec};

/// `(from, to, cost)` directed edges.
pub type Edges<'a> = &'a [(char, char, Level)];

/// Directed weighted graph searched with factor `level + h(step)`.
/// Steps missing from `h` estimate zero.
///
/// # Panics
///
/// Panics if the builder rejects the fixture.
#[must_use]
pub fn weighted(
    start: char,
    goal: char,
    edges: Edges<'_>,
    h: &[(char, Level)],
) -> SearchSpec<char, Level, char> {
    with_comparer(start, goal, edges, h, NodeComparer::natural())
}

/// [`weighted`] ranked by an arbitrary comparer.
///
/// # Panics
///
/// Panics if the builder rejects the fixture.
#[must_use]
pub fn with_comparer(
    start: char,
    goal: char,
    edges: Edges<'_>,
    h: &[(char, Level)],
    comparer: NodeComparer<Level>,
) -> SearchSpec<char, Level, char> {
    let mut graph: HashMap<char, Vec<(char, Level)>> = HashMap::new();
    for &(from, to, cost) in edges {
        graph.entry(from).or_default().push((to, cost));
    }
    let h: HashMap<char, Level> = h.iter().copied().collect();
    let h_seed = h.clone();

    SearchSpec::builder()
        .start(start)
        .goal(goal)
        .equality(StepEquality::value())
        .comparer(comparer)
        .expander(FnExpander::new(
            move |s: &char| vec![Node::new(*s, h_seed.get(s).copied().unwrap_or(0), 0)],
            move |s: &char, level: Level, is_new: &mut dyn FnMut(&char) -> bool| -> Vec<Node<Level, char>> {
                graph
                    .get(s)
                    .into_iter()
                    .flatten()
                    .filter(|(to, _)| is_new(to))
                    .map(|&(to, cost)| {
                        let reached = level + cost;
                        Node::new(to, reached + h.get(&to).copied().unwrap_or(0), reached)
                    })
                    .collect()
            },
        ))
        .build()
        .expect("fixture sets every builder field")
}

/// Graph whose factor is a fixed value per step, independent of level.
///
/// # Panics
///
/// Panics if the builder rejects the fixture.
#[must_use]
pub fn fixed_factor(
    start: char,
    goal: char,
    edges: &[(char, char)],
    factor: &[(char, Level)],
    comparer: NodeComparer<Level>,
) -> SearchSpec<char, Level, char> {
    let mut graph: HashMap<char, Vec<char>> = HashMap::new();
    for &(from, to) in edges {
        graph.entry(from).or_default().push(to);
    }
    let factor: HashMap<char, Level> = factor.iter().copied().collect();
    let factor_seed = factor.clone();

    SearchSpec::builder()
        .start(start)
        .goal(goal)
        .equality(StepEquality::value())
        .comparer(comparer)
        .expander(FnExpander::new(
            move |s: &char| vec![Node::new(*s, factor_seed.get(s).copied().unwrap_or(0), 0)],
            move |s: &char, level: Level, is_new: &mut dyn FnMut(&char) -> bool| -> Vec<Node<Level, char>> {
                graph
                    .get(s)
                    .into_iter()
                    .flatten()
                    .filter(|to| is_new(to))
                    .map(|&to| Node::new(to, factor.get(&to).copied().unwrap_or(0), level + 1))
                    .collect()
            },
        ))
        .build()
        .expect("fixture sets every builder field")
}

/// S → {A (1), B (2)}, A → G (5), B → G (1); `h` admissible and
/// consistent. Cheapest route is S, B, G at cost 3.
#[must_use]
pub fn optimality_graph() -> SearchSpec<char, Level, char> {
    weighted(
        'S',
        'G',
        &[('S', 'A', 1), ('S', 'B', 2), ('A', 'G', 5), ('B', 'G', 1)],
        &[('S', 3), ('A', 2), ('B', 1), ('G', 0)],
    )
}

/// Workspace root, resolved from this crate's manifest directory.
///
/// # Panics
///
/// Panics if the crate is not at `tests/lock/` inside the workspace.
#[must_use]
pub fn workspace_root() -> &'static Path {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .parent()
        .expect("tests/ exists")
        .parent()
        .expect("workspace root exists")
}
