use std::cmp::Ordering;
use std::collections::{BinaryHeap, HashMap, HashSet};
use std::hash::Hash;
use std::time::Instant;

use serde::Serialize;
use tracing::debug;

/// Outcome of a single search invocation.
///
/// "Not found" is a normal outcome, not an error: `found` is false, the
/// solution, actions and cost are empty, and the statistics cover whatever
/// was explored before the frontier emptied.
#[derive(Clone, Debug, Serialize)]
pub struct SearchOutcome<S, A> {
    pub found: bool,
    pub solution: Option<S>,
    pub actions: Vec<A>,
    pub cost: Option<i64>,
    pub runtime_s: f64,
    pub expanded: u64,
    pub generated: u64,
    pub branching_min: u64,
    pub branching_max: u64,
    pub branching_avg: f64,
    /// Highest simultaneous frontier + finalized node count, in nodes, not bytes.
    pub peak_nodes_in_memory: u64,
}

struct OpenNode<S, K> {
    f: i64,
    tie: u64,
    g: i64,
    key: K,
    state: S,
}

impl<S, K> PartialEq for OpenNode<S, K> {
    fn eq(&self, other: &Self) -> bool {
        self.f == other.f && self.tie == other.tie
    }
}
impl<S, K> Eq for OpenNode<S, K> {}
impl<S, K> PartialOrd for OpenNode<S, K> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}
impl<S, K> Ord for OpenNode<S, K> {
    fn cmp(&self, other: &Self) -> Ordering {
        // BinaryHeap is a max-heap; invert for min-heap behavior.
        // `tie` is unique per pushed node, so (f, tie) is a total order and
        // equal-f nodes pop in generation order.
        (other.f, other.tie).cmp(&(self.f, self.tie))
    }
}

/// Best-first search over an implicitly defined state space.
///
/// Generic A*, graph-search variant with lazy frontier invalidation: the
/// frontier is a binary min-heap on `(f, tie)` and popped entries whose `g`
/// no longer matches the best known cost for their key are discarded rather
/// than physically removed.
///
/// The caller supplies the whole problem as callbacks:
/// - `is_goal`: pure goal predicate;
/// - `successors`: enumerates `(action, next_state, step_cost)` triples,
///   step costs must be non-negative;
/// - `heuristic`: estimate of remaining cost, non-negative. The returned
///   cost is minimal only if the estimate never overestimates and is
///   consistent across transitions; neither property is checked here, and an
///   inconsistent estimate can silently yield a non-minimal result because
///   finalized keys are never reopened;
/// - `state_key`: pure identity reduction; states with equal keys are
///   interchangeable for cost bookkeeping. Zero-cost moves that cycle
///   through distinct keys will loop forever — the caller owes a space
///   where that cannot happen.
///
/// Every table and counter is local to one invocation, so concurrent
/// searches on separate threads are independent.
pub fn astar_search<S, A, K, FG, FS, FH, FK>(
    initial: S,
    is_goal: FG,
    successors: FS,
    heuristic: FH,
    state_key: FK,
) -> SearchOutcome<S, A>
where
    K: Eq + Hash + Clone,
    FG: Fn(&S) -> bool,
    FS: Fn(&S) -> Vec<(A, S, i64)>,
    FH: Fn(&S) -> i64,
    FK: Fn(&S) -> K,
{
    let t0 = Instant::now();

    let mut open: BinaryHeap<OpenNode<S, K>> = BinaryHeap::new();
    let mut tie: u64 = 0;

    let start_key = state_key(&initial);
    let mut g_best: HashMap<K, i64> = HashMap::new();
    g_best.insert(start_key.clone(), 0);
    let mut came_from: HashMap<K, (K, A)> = HashMap::new();
    let mut explored: HashSet<K> = HashSet::new();

    let f0 = heuristic(&initial);
    open.push(OpenNode { f: f0, tie, g: 0, key: start_key, state: initial });

    let mut expanded: u64 = 0;
    let mut generated: u64 = 0;
    let mut b_min: Option<u64> = None;
    let mut b_max: u64 = 0;
    let mut b_sum: u64 = 0;
    let mut peak_mem: u64 = 1;

    while let Some(node) = open.pop() {
        // The popped node still counts toward the frontier at this point.
        peak_mem = peak_mem.max((open.len() + 1 + explored.len()) as u64);

        // Discard stale entries superseded by a cheaper path to the same key.
        if g_best.get(&node.key) != Some(&node.g) {
            continue;
        }

        if is_goal(&node.state) {
            let actions = reconstruct_actions(came_from, &node.key);
            let branching_avg = if expanded > 0 { b_sum as f64 / expanded as f64 } else { 0.0 };
            debug!(expanded, generated, cost = node.g, "goal reached");
            return SearchOutcome {
                found: true,
                solution: Some(node.state),
                actions,
                cost: Some(node.g),
                runtime_s: t0.elapsed().as_secs_f64(),
                expanded,
                generated,
                branching_min: b_min.unwrap_or(0),
                branching_max: b_max,
                branching_avg,
                peak_nodes_in_memory: peak_mem,
            };
        }

        explored.insert(node.key.clone());
        expanded += 1;

        let succs = successors(&node.state);
        let b = succs.len() as u64;
        generated += b;
        b_min = Some(b_min.map_or(b, |m| m.min(b)));
        b_max = b_max.max(b);
        b_sum += b;

        for (action, next, step_cost) in succs {
            let next_key = state_key(&next);
            // Finalized keys are never reopened.
            if explored.contains(&next_key) {
                continue;
            }
            let tentative_g = node.g + step_cost;
            if g_best.get(&next_key).map_or(true, |&old| tentative_g < old) {
                g_best.insert(next_key.clone(), tentative_g);
                came_from.insert(next_key.clone(), (node.key.clone(), action));
                tie += 1;
                let f = tentative_g + heuristic(&next);
                open.push(OpenNode { f, tie, g: tentative_g, key: next_key, state: next });
            }
        }
    }

    let branching_avg = if expanded > 0 { b_sum as f64 / expanded as f64 } else { 0.0 };
    debug!(expanded, generated, "frontier exhausted");
    SearchOutcome {
        found: false,
        solution: None,
        actions: Vec::new(),
        cost: None,
        runtime_s: t0.elapsed().as_secs_f64(),
        expanded,
        generated,
        branching_min: b_min.unwrap_or(0),
        branching_max: b_max,
        branching_avg,
        peak_nodes_in_memory: peak_mem,
    }
}

/// Walk the trace table backward from the terminal key until a key with no
/// entry (the initial state), then reverse into execution order.
fn reconstruct_actions<K, A>(mut came_from: HashMap<K, (K, A)>, terminal: &K) -> Vec<A>
where
    K: Eq + Hash,
{
    let mut actions = Vec::new();
    let mut entry = came_from.remove(terminal);
    while let Some((parent, action)) = entry {
        actions.push(action);
        entry = came_from.remove(&parent);
    }
    actions.reverse();
    actions
}
