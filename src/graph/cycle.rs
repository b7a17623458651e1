use std::collections::HashSet;

use super::ProjectGraph;

#[derive(Clone, Copy, PartialEq, Eq)]
enum Color {
    White,
    Gray,
    Black,
}

/// Find dependency cycles with a 3-color DFS over depends-on edges.
/// Each cycle is the path slice from the re-entered node up to the node that
/// closed it, so A→B→C→A yields [A, B, C] and a self-dependency yields [A].
/// Traversal follows task order and edge insertion order, so output is stable.
/// Recursion depth equals the longest dependency chain.
pub fn find_cycles(graph: &ProjectGraph) -> Vec<Vec<String>> {
    let mut color = vec![Color::White; graph.len()];
    let mut path = Vec::new();
    let mut found: Vec<Vec<usize>> = Vec::new();
    let mut seen: HashSet<Vec<usize>> = HashSet::new();

    for node in 0..graph.len() {
        if color[node] == Color::White {
            dfs(graph, node, &mut color, &mut path, &mut found, &mut seen);
        }
    }

    found
        .into_iter()
        .map(|cycle| {
            cycle
                .into_iter()
                .map(|i| graph.tasks()[i].human_id.clone())
                .collect()
        })
        .collect()
}

fn dfs(
    graph: &ProjectGraph,
    node: usize,
    color: &mut [Color],
    path: &mut Vec<usize>,
    found: &mut Vec<Vec<usize>>,
    seen: &mut HashSet<Vec<usize>>,
) {
    color[node] = Color::Gray;
    path.push(node);

    for &next in graph.dependency_indices(node) {
        match color[next] {
            Color::Gray => {
                // back edge: `next` is on the current path
                if let Some(pos) = path.iter().position(|&n| n == next) {
                    let cycle = path[pos..].to_vec();
                    if seen.insert(canonical(&cycle)) {
                        found.push(cycle);
                    }
                }
            }
            Color::White => dfs(graph, next, color, path, found, seen),
            Color::Black => {}
        }
    }

    path.pop();
    color[node] = Color::Black;
}

/// Rotation starting at the smallest index, so one cycle found from two
/// entry points is reported once.
fn canonical(cycle: &[usize]) -> Vec<usize> {
    let min_pos = cycle
        .iter()
        .enumerate()
        .min_by_key(|&(_, n)| n)
        .map(|(i, _)| i)
        .unwrap_or(0);
    cycle[min_pos..].iter().chain(&cycle[..min_pos]).copied().collect()
}
