//! Engine properties on small synthetic graphs where the reference answers
//! are computable by hand.

use std::cell::RefCell;
use std::collections::HashMap;

use queens_core::astar_search;

/// Undirected weighted graph as an adjacency list; actions name the edge.
fn graph_successors(
    edges: &HashMap<u32, Vec<(u32, i64)>>,
    s: &u32,
) -> Vec<(String, u32, i64)> {
    edges
        .get(s)
        .map(|adj| {
            adj.iter()
                .map(|&(to, w)| (format!("{s}->{to}"), to, w))
                .collect()
        })
        .unwrap_or_default()
}

fn diamond() -> HashMap<u32, Vec<(u32, i64)>> {
    // 0 -> 1 (1), 0 -> 2 (4), 1 -> 2 (1), 1 -> 3 (5), 2 -> 3 (1)
    // Shortest 0 -> 3 is 0,1,2,3 at cost 3.
    let mut edges = HashMap::new();
    edges.insert(0, vec![(1, 1), (2, 4)]);
    edges.insert(1, vec![(2, 1), (3, 5)]);
    edges.insert(2, vec![(3, 1)]);
    edges
}

#[test]
fn finds_minimum_cost_with_admissible_heuristic() {
    let edges = diamond();
    // True remaining costs: 0 -> 3, 1 -> 2, 2 -> 1, 3 -> 0; estimate stays below.
    let h = |s: &u32| -> i64 { [3, 2, 1, 0][*s as usize].min(2) };
    let out = astar_search(
        0u32,
        |s| *s == 3,
        |s| graph_successors(&edges, s),
        h,
        |s| *s,
    );
    assert!(out.found);
    assert_eq!(out.cost, Some(3));
    assert_eq!(out.actions, vec!["0->1", "1->2", "2->3"]);
}

#[test]
fn zero_heuristic_expands_in_nondecreasing_cost_order() {
    let edges = diamond();
    let expansion_order: RefCell<Vec<u32>> = RefCell::new(Vec::new());
    let out = astar_search(
        0u32,
        |_| false,
        |s| {
            expansion_order.borrow_mut().push(*s);
            graph_successors(&edges, s)
        },
        |_| 0,
        |s| *s,
    );
    assert!(!out.found);
    // Uniform-cost distances: d(0)=0, d(1)=1, d(2)=2, d(3)=3.
    let dist: HashMap<u32, i64> = [(0, 0), (1, 1), (2, 2), (3, 3)].into_iter().collect();
    let order = expansion_order.borrow();
    assert_eq!(order.len(), 4);
    for w in order.windows(2) {
        assert!(dist[&w[0]] <= dist[&w[1]], "expanded {} before {}", w[0], w[1]);
    }
}

#[test]
fn no_key_is_expanded_twice_and_counters_are_consistent() {
    let edges = diamond();
    let expansion_order: RefCell<Vec<u32>> = RefCell::new(Vec::new());
    let out = astar_search(
        0u32,
        |s| *s == 3,
        |s| {
            expansion_order.borrow_mut().push(*s);
            graph_successors(&edges, s)
        },
        |_| 0,
        |s| *s,
    );
    let order = expansion_order.borrow();
    for (i, s) in order.iter().enumerate() {
        assert!(!order[..i].contains(s), "key {s} finalized twice");
    }
    assert!(out.expanded <= out.generated);
    assert!(out.peak_nodes_in_memory >= out.expanded);
}

#[test]
fn returned_actions_replay_to_the_returned_state() {
    let edges = diamond();
    let out = astar_search(
        0u32,
        |s| *s == 3,
        |s| graph_successors(&edges, s),
        |_| 0,
        |s| *s,
    );
    assert!(out.found);

    // Replay each "a->b" action from the initial state through the graph.
    let mut cur = 0u32;
    let mut replayed_cost = 0i64;
    for action in &out.actions {
        let (next, w) = graph_successors(&edges, &cur)
            .into_iter()
            .find(|(a, _, _)| a == action)
            .map(|(_, next, w)| (next, w))
            .expect("action must be applicable in order");
        cur = next;
        replayed_cost += w;
    }
    assert_eq!(Some(cur), out.solution);
    assert_eq!(Some(replayed_cost), out.cost);
}

#[test]
fn repeated_runs_are_reproducible() {
    let edges = diamond();
    let run = || {
        astar_search(
            0u32,
            |s| *s == 3,
            |s| graph_successors(&edges, s),
            |_| 0,
            |s| *s,
        )
    };
    let a = run();
    let b = run();
    assert_eq!(a.actions, b.actions);
    assert_eq!(a.cost, b.cost);
    assert_eq!(a.expanded, b.expanded);
    assert_eq!(a.generated, b.generated);
    assert_eq!(a.peak_nodes_in_memory, b.peak_nodes_in_memory);
}

#[test]
fn outcome_serializes_for_downstream_reporting() {
    let out = astar_search(
        0u32,
        |s| *s == 1,
        |s| if *s == 0 { vec![("step", 1u32, 1)] } else { vec![] },
        |_| 0,
        |s| *s,
    );
    let v = serde_json::to_value(&out).unwrap();
    assert_eq!(v["found"], serde_json::json!(true));
    assert_eq!(v["cost"], serde_json::json!(1));
    assert_eq!(v["actions"], serde_json::json!(["step"]));
}
