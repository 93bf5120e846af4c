use std::time::Duration;

use anyhow::{bail, Result};
use clap::Parser;
use tracing::info;
use tracing_subscriber::{fmt, EnvFilter};

use queens_core::{astar_search, solve_queens_csp, Heuristic, QueensProblem};

#[derive(Parser, Debug)]
#[command(name = "queens-cli", version, about = "Solve one N-queens instance with best-first search or the constraint solver")]
struct Args {
    /// Board size
    #[arg(long, default_value_t = 10)]
    n: u32,

    /// Solver: astar | csp
    #[arg(long, default_value = "astar")]
    method: String,

    /// Heuristic for --method astar: baseline_remaining | mrv_next_row
    #[arg(long, default_value = "mrv_next_row")]
    heuristic: String,

    /// Wall-clock limit in seconds for --method csp
    #[arg(long, value_name = "SECONDS")]
    time_limit_s: Option<f64>,

    /// Render the solved board as ASCII
    #[arg(long)]
    board: bool,
}

fn main() -> Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    fmt().with_env_filter(filter).init();

    let args = Args::parse();
    let problem = QueensProblem::new(args.n);

    match args.method.as_str() {
        "astar" => {
            let heuristic: Heuristic = args.heuristic.parse()?;
            info!(n = args.n, heuristic = heuristic.label(), "running best-first search");

            let out = astar_search(
                problem.initial(),
                |s| problem.is_goal(s),
                |s| problem.successors(s),
                |s| heuristic.evaluate(&problem, s),
                |s| s.clone(),
            );

            println!("==== astar / {} ====", heuristic.label());
            println!("found: {}", out.found);
            println!("cost: {:?}", out.cost);
            println!("runtime_s: {:.6}", out.runtime_s);
            println!("expanded: {}", out.expanded);
            println!("generated: {}", out.generated);
            println!("peak_mem: {}", out.peak_nodes_in_memory);
            println!(
                "branching min/avg/max: {} {:.2} {}",
                out.branching_min, out.branching_avg, out.branching_max
            );

            if let Some(placement) = out.solution {
                println!("placement: {placement:?}");
                if args.board {
                    println!("{}", problem.render(&placement));
                }
            }
        }
        "csp" => {
            let time_limit = args.time_limit_s.map(Duration::from_secs_f64);
            info!(n = args.n, ?time_limit, "running constraint solver");

            let out = solve_queens_csp(args.n, time_limit);

            println!("==== csp ====");
            println!("found: {}", out.found);
            println!("status: {}", out.status.label());
            println!("runtime_s: {:.6}", out.runtime_s);
            println!("conflicts: {}", out.conflicts);
            println!("branches: {}", out.branches);

            if let Some(placement) = out.placement {
                println!("placement: {placement:?}");
                if args.board {
                    println!("{}", problem.render(&placement));
                }
            }
        }
        other => bail!("unknown method: {other} (expected astar or csp)"),
    }

    Ok(())
}
