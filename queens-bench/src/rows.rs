use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use anyhow::{Context, Result};
use serde::Serialize;

use queens_core::{CspOutcome, Placement, SearchOutcome};

/// One benchmark run in the shared two-method schema. Counters that belong
/// to the other method stay `None` and render as blank cells, so rows from
/// both solvers tabulate side by side.
#[derive(Clone, Debug, Serialize)]
pub struct ReportRow {
    pub method: &'static str,
    pub heuristic: String,
    pub n: u32,
    pub found: bool,
    pub valid: bool,
    pub runtime_s: f64,

    pub expanded: Option<u64>,
    pub generated: Option<u64>,
    pub peak_mem: Option<u64>,
    pub branching_min: Option<u64>,
    pub branching_avg: Option<f64>,
    pub branching_max: Option<u64>,

    pub status: String,
    pub conflicts: Option<u64>,
    pub branches: Option<u64>,
    pub wall_time_s: Option<f64>,
}

pub const CSV_HEADER: &str = "method,heuristic,n,found,valid,runtime_s,\
expanded,generated,peak_mem,branching_min,branching_avg,branching_max,\
status,conflicts,branches,wall_time_s";

impl ReportRow {
    pub fn from_astar(
        n: u32,
        heuristic_label: &str,
        out: &SearchOutcome<Placement, u32>,
        valid: bool,
    ) -> Self {
        Self {
            method: "astar",
            heuristic: heuristic_label.to_string(),
            n,
            found: out.found,
            valid,
            runtime_s: out.runtime_s,
            expanded: Some(out.expanded),
            generated: Some(out.generated),
            peak_mem: Some(out.peak_nodes_in_memory),
            branching_min: Some(out.branching_min),
            branching_avg: Some(out.branching_avg),
            branching_max: Some(out.branching_max),
            status: String::new(),
            conflicts: None,
            branches: None,
            wall_time_s: None,
        }
    }

    pub fn from_csp(n: u32, out: &CspOutcome, valid: bool) -> Self {
        Self {
            method: "csp",
            heuristic: String::new(),
            n,
            found: out.found,
            valid,
            runtime_s: out.runtime_s,
            expanded: None,
            generated: None,
            peak_mem: None,
            branching_min: None,
            branching_avg: None,
            branching_max: None,
            status: out.status.label().to_string(),
            conflicts: Some(out.conflicts),
            branches: Some(out.branches),
            wall_time_s: Some(out.wall_time_s),
        }
    }

    pub fn to_csv(&self) -> String {
        fn opt<T: std::fmt::Display>(v: &Option<T>) -> String {
            v.as_ref().map(ToString::to_string).unwrap_or_default()
        }
        format!(
            "{},{},{},{},{},{},{},{},{},{},{},{},{},{},{},{}",
            self.method,
            self.heuristic,
            self.n,
            self.found,
            self.valid,
            self.runtime_s,
            opt(&self.expanded),
            opt(&self.generated),
            opt(&self.peak_mem),
            opt(&self.branching_min),
            opt(&self.branching_avg),
            opt(&self.branching_max),
            self.status,
            opt(&self.conflicts),
            opt(&self.branches),
            opt(&self.wall_time_s),
        )
    }

    pub fn print_line(&self) {
        fn cell<T: std::fmt::Display>(v: &Option<T>) -> String {
            v.as_ref().map(ToString::to_string).unwrap_or_else(|| "-".to_string())
        }
        println!(
            "{:<6} {:<18} {:>5} {:>6} {:>6} {:>10.4} {:>9} {:>9} {:>8} {:<10} {:>9} {:>9}",
            self.method,
            if self.heuristic.is_empty() { "-" } else { self.heuristic.as_str() },
            self.n,
            self.found,
            self.valid,
            self.runtime_s,
            cell(&self.expanded),
            cell(&self.generated),
            cell(&self.peak_mem),
            if self.status.is_empty() { "-" } else { self.status.as_str() },
            cell(&self.conflicts),
            cell(&self.branches),
        );
    }
}

pub fn print_header() {
    println!(
        "{:<6} {:<18} {:>5} {:>6} {:>6} {:>10} {:>9} {:>9} {:>8} {:<10} {:>9} {:>9}",
        "method",
        "heuristic",
        "n",
        "found",
        "valid",
        "runtime_s",
        "expanded",
        "generated",
        "peak_mem",
        "status",
        "conflicts",
        "branches",
    );
}

pub fn write_csv(path: &Path, rows: &[ReportRow]) -> Result<()> {
    let file = File::create(path).with_context(|| format!("creating {path:?}"))?;
    let mut w = BufWriter::new(file);
    writeln!(w, "{CSV_HEADER}").context("writing csv header")?;
    for row in rows {
        writeln!(w, "{}", row.to_csv()).context("writing csv row")?;
    }
    w.flush().context("flushing csv output")?;
    Ok(())
}

pub fn write_json(path: &Path, rows: &[ReportRow]) -> Result<()> {
    let file = File::create(path).with_context(|| format!("creating {path:?}"))?;
    serde_json::to_writer_pretty(BufWriter::new(file), rows)
        .with_context(|| format!("serializing rows to {path:?}"))?;
    Ok(())
}
