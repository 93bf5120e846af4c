use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::board::{Placement, QueensProblem};

/// Multiplier keeping the rows-remaining term dominant over the
/// tightness term in [`Heuristic::MrvNextRow`].
pub const MRV_SCALE: i64 = 1000;
/// Estimate assigned to states whose next row has no legal column.
pub const MRV_DEAD_PENALTY: i64 = 1_000_000_000;

/// Remaining-cost estimators for the placement search.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Heuristic {
    /// Rows still to fill. Admissible and consistent: every remaining row
    /// costs at least one unit step, so the returned cost is minimal.
    BaselineRemaining,
    /// Rows remaining, scaled, plus a tightness bonus for a constrained
    /// next row (fewest legal columns first), with a large penalty for a
    /// dead next row. Deliberately overestimates: it buys guidance at the
    /// price of the optimality guarantee.
    MrvNextRow,
}

impl Heuristic {
    pub fn evaluate(&self, problem: &QueensProblem, placement: &Placement) -> i64 {
        match self {
            Heuristic::BaselineRemaining => {
                i64::from(problem.size()) - placement.len() as i64
            }
            Heuristic::MrvNextRow => {
                let row = placement.len() as u32;
                let remaining = i64::from(problem.size()) - i64::from(row);
                if remaining == 0 {
                    return 0;
                }
                let k = problem.legal_in_row(placement, row);
                if k == 0 {
                    return MRV_DEAD_PENALTY;
                }
                remaining * MRV_SCALE + MRV_SCALE / i64::from(k)
            }
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Heuristic::BaselineRemaining => "baseline_remaining",
            Heuristic::MrvNextRow => "mrv_next_row",
        }
    }

    pub const ALL: [Heuristic; 2] = [Heuristic::BaselineRemaining, Heuristic::MrvNextRow];
}

#[derive(Debug, Error, PartialEq, Eq)]
#[error("unknown heuristic: {0} (expected baseline_remaining or mrv_next_row)")]
pub struct UnknownHeuristic(String);

impl FromStr for Heuristic {
    type Err = UnknownHeuristic;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "baseline_remaining" => Ok(Heuristic::BaselineRemaining),
            "mrv_next_row" => Ok(Heuristic::MrvNextRow),
            other => Err(UnknownHeuristic(other.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn baseline_counts_remaining_rows() {
        let p = QueensProblem::new(6);
        let h = Heuristic::BaselineRemaining;
        assert_eq!(h.evaluate(&p, &Vec::new()), 6);
        assert_eq!(h.evaluate(&p, &vec![0, 2, 4]), 3);
        assert_eq!(h.evaluate(&p, &vec![1, 3, 5, 0, 2, 4]), 0);
    }

    #[test]
    fn mrv_is_zero_at_goal_and_penalizes_dead_rows() {
        let p = QueensProblem::new(4);
        let h = Heuristic::MrvNextRow;
        assert_eq!(h.evaluate(&p, &vec![1, 3, 0, 2]), 0);
        // (0,0) and (1,2) leave row 2 with no legal column.
        assert_eq!(p.legal_in_row(&vec![0, 2], 2), 0);
        assert_eq!(h.evaluate(&p, &vec![0, 2]), MRV_DEAD_PENALTY);
        // Tighter next rows estimate higher within the same depth.
        let open = h.evaluate(&p, &Vec::new());
        assert_eq!(open, 4 * MRV_SCALE + MRV_SCALE / 4);
    }

    #[test]
    fn parses_labels_and_rejects_unknown_names() {
        assert_eq!("baseline_remaining".parse::<Heuristic>(), Ok(Heuristic::BaselineRemaining));
        assert_eq!("mrv_next_row".parse::<Heuristic>(), Ok(Heuristic::MrvNextRow));
        assert!("greedy".parse::<Heuristic>().is_err());
        for h in Heuristic::ALL {
            assert_eq!(h.label().parse::<Heuristic>(), Ok(h));
        }
    }
}
