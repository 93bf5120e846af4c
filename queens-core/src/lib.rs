pub mod astar;
pub mod board;
pub mod csp;
pub mod heuristics;

pub use astar::{astar_search, SearchOutcome};
pub use board::{Placement, QueensProblem};
pub use csp::{solve_queens_csp, CspOutcome, CspStatus};
pub use heuristics::Heuristic;
