use std::time::{Duration, Instant};

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::board::Placement;

/// Terminal state of a constraint solve.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CspStatus {
    Feasible,
    Infeasible,
    /// The wall-clock limit expired before the space was decided.
    Unknown,
}

impl CspStatus {
    pub fn label(&self) -> &'static str {
        match self {
            CspStatus::Feasible => "feasible",
            CspStatus::Infeasible => "infeasible",
            CspStatus::Unknown => "unknown",
        }
    }
}

#[derive(Clone, Debug, Serialize)]
pub struct CspOutcome {
    pub found: bool,
    pub placement: Option<Placement>,
    pub runtime_s: f64,
    pub status: CspStatus,
    /// Rows reached with no legal column left (dead ends).
    pub conflicts: u64,
    /// Column assignments tried (decisions).
    pub branches: u64,
    pub wall_time_s: f64,
}

/// Depth-first constraint solver over the same placement space the search
/// engine explores, kept fully independent of it. Columns and both diagonal
/// directions are propagated as occupancy masks; rows are assigned in order
/// with a middle-out column ordering, which finds a first solution quickly
/// on large boards. Stops at the first complete placement or when the
/// optional wall-clock limit expires.
pub fn solve_queens_csp(n: u32, time_limit: Option<Duration>) -> CspOutcome {
    let t0 = Instant::now();
    let deadline = time_limit.map(|d| t0 + d);

    let size = n as usize;
    let mut cols = vec![false; size];
    let mut diag1 = vec![false; (2 * size).saturating_sub(1)];
    let mut diag2 = vec![false; (2 * size).saturating_sub(1)];
    let mut placement: Placement = Vec::with_capacity(size);

    // Middle-out: n=5 -> 2, 1, 3, 0, 4.
    let mut order: Vec<u32> = Vec::with_capacity(size);
    let mid = n / 2;
    for i in 0..n {
        let offset = (i + 1) / 2;
        order.push(if i % 2 == 0 { mid + offset } else { mid - offset });
    }
    order.retain(|&c| c < n);

    let mut branches = 0u64;
    let mut conflicts = 0u64;
    let mut timed_out = false;

    let found = place_rows(
        n,
        0,
        &order,
        &mut cols,
        &mut diag1,
        &mut diag2,
        &mut placement,
        &mut branches,
        &mut conflicts,
        deadline,
        &mut timed_out,
    );

    let status = if found {
        CspStatus::Feasible
    } else if timed_out {
        CspStatus::Unknown
    } else {
        CspStatus::Infeasible
    };
    let elapsed = t0.elapsed().as_secs_f64();
    debug!(n, status = status.label(), branches, conflicts, "constraint solve finished");

    CspOutcome {
        found,
        placement: found.then_some(placement),
        runtime_s: elapsed,
        status,
        conflicts,
        branches,
        wall_time_s: elapsed,
    }
}

#[allow(clippy::too_many_arguments)]
fn place_rows(
    n: u32,
    row: u32,
    order: &[u32],
    cols: &mut [bool],
    diag1: &mut [bool],
    diag2: &mut [bool],
    placement: &mut Placement,
    branches: &mut u64,
    conflicts: &mut u64,
    deadline: Option<Instant>,
    timed_out: &mut bool,
) -> bool {
    if row == n {
        return true;
    }
    if let Some(d) = deadline {
        if Instant::now() >= d {
            *timed_out = true;
            return false;
        }
    }

    let mut any_legal = false;
    for &col in order {
        let c = col as usize;
        let i1 = (row as i64 - col as i64 + n as i64 - 1) as usize;
        let i2 = (row + col) as usize;
        if cols[c] || diag1[i1] || diag2[i2] {
            continue;
        }
        any_legal = true;
        *branches += 1;

        cols[c] = true;
        diag1[i1] = true;
        diag2[i2] = true;
        placement.push(col);

        if place_rows(
            n, row + 1, order, cols, diag1, diag2, placement, branches, conflicts, deadline,
            timed_out,
        ) {
            return true;
        }
        if *timed_out {
            return false;
        }

        placement.pop();
        cols[c] = false;
        diag1[i1] = false;
        diag2[i2] = false;
    }

    if !any_legal {
        *conflicts += 1;
    }
    false
}
