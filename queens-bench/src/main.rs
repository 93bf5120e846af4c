use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::info;
use tracing_subscriber::{fmt, EnvFilter};

use queens_core::{astar_search, solve_queens_csp, Heuristic, QueensProblem};

mod rows;
use rows::{print_header, write_csv, write_json, ReportRow};

#[derive(Parser, Debug)]
#[command(name = "queens-bench", version, about = "Sweep board sizes for both solvers and tabulate the results")]
struct Args {
    /// Board sizes for the best-first sweep (both heuristics run per size)
    #[arg(long, default_value = "4,6,8,10,12", value_name = "LIST")]
    astar_sizes: String,

    /// Board sizes for the constraint-solver sweep
    #[arg(long, default_value = "4,6,8,20,50,100", value_name = "LIST")]
    csp_sizes: String,

    /// Output CSV file
    #[arg(long, default_value = "results.csv")]
    out: PathBuf,

    /// Also write the rows as JSON
    #[arg(long, value_name = "PATH")]
    json: Option<PathBuf>,

    /// Wall-clock limit in seconds per constraint solve
    #[arg(long, value_name = "SECONDS")]
    csp_time_limit_s: Option<f64>,
}

fn parse_sizes(list: &str) -> Result<Vec<u32>> {
    list.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(|s| s.parse::<u32>().with_context(|| format!("invalid board size: {s}")))
        .collect()
}

fn run_astar(n: u32, heuristic: Heuristic) -> ReportRow {
    let problem = QueensProblem::new(n);
    let out = astar_search(
        problem.initial(),
        |s| problem.is_goal(s),
        |s| problem.successors(s),
        |s| heuristic.evaluate(&problem, s),
        |s| s.clone(),
    );
    let valid = out
        .solution
        .as_ref()
        .is_some_and(|p| problem.check_solution(p));
    ReportRow::from_astar(n, heuristic.label(), &out, valid)
}

fn run_csp(n: u32, time_limit: Option<Duration>) -> ReportRow {
    let out = solve_queens_csp(n, time_limit);
    let valid = out
        .placement
        .as_ref()
        .is_some_and(|p| QueensProblem::new(n).check_solution(p));
    ReportRow::from_csp(n, &out, valid)
}

fn main() -> Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    fmt().with_env_filter(filter).init();

    let args = Args::parse();
    let astar_sizes = parse_sizes(&args.astar_sizes).context("parsing --astar-sizes")?;
    let csp_sizes = parse_sizes(&args.csp_sizes).context("parsing --csp-sizes")?;
    let time_limit = args.csp_time_limit_s.map(Duration::from_secs_f64);

    let mut report: Vec<ReportRow> = Vec::new();
    print_header();

    for &n in &astar_sizes {
        for heuristic in Heuristic::ALL {
            info!(n, heuristic = heuristic.label(), "running best-first search");
            let row = run_astar(n, heuristic);
            row.print_line();
            report.push(row);
        }
    }

    for &n in &csp_sizes {
        info!(n, "running constraint solver");
        let row = run_csp(n, time_limit);
        row.print_line();
        report.push(row);
    }

    write_csv(&args.out, &report)?;
    info!(rows = report.len(), path = ?args.out, "wrote csv results");

    if let Some(json_path) = &args.json {
        write_json(json_path, &report)?;
        info!(path = ?json_path, "wrote json results");
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_size_lists_with_whitespace() {
        assert_eq!(parse_sizes("4,6,8").unwrap(), vec![4, 6, 8]);
        assert_eq!(parse_sizes(" 4 , 10 ").unwrap(), vec![4, 10]);
        assert!(parse_sizes("4,x").is_err());
        assert!(parse_sizes("").unwrap().is_empty());
    }

    #[test]
    fn astar_and_csp_rows_agree_on_feasibility() {
        let a = run_astar(6, Heuristic::MrvNextRow);
        let c = run_csp(6, None);
        assert!(a.found && a.valid);
        assert!(c.found && c.valid);
        assert_eq!(a.n, c.n);

        let a = run_astar(3, Heuristic::BaselineRemaining);
        let c = run_csp(3, None);
        assert!(!a.found && !c.found);
        assert!(!a.valid && !c.valid);
    }
}
