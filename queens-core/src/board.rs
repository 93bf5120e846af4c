use serde::{Deserialize, Serialize};

/// A partial placement: one column index per already-filled row. Row `r`
/// holds a queen at column `placement[r]`; `placement.len()` rows are filled.
pub type Placement = Vec<u32>;

/// Column chosen for the next row.
pub type ColumnAction = u32;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct QueensProblem {
    n: u32,
}

impl QueensProblem {
    pub fn new(n: u32) -> Self {
        Self { n }
    }

    pub fn size(&self) -> u32 {
        self.n
    }

    pub fn initial(&self) -> Placement {
        Vec::new()
    }

    pub fn is_goal(&self, placement: &Placement) -> bool {
        placement.len() as u32 == self.n
    }

    /// Can the next queen (row = number of filled rows) go at `col`?
    pub fn is_safe(&self, placement: &Placement, col: u32) -> bool {
        let row = placement.len() as i64;
        for (rp, &cp) in placement.iter().enumerate() {
            if cp == col {
                return false;
            }
            if (cp as i64 - col as i64).abs() == (rp as i64 - row).abs() {
                return false;
            }
        }
        true
    }

    /// Legal columns for the next row in ascending order, each a unit-cost step.
    pub fn successors(&self, placement: &Placement) -> Vec<(ColumnAction, Placement, i64)> {
        let mut out = Vec::new();
        for col in 0..self.n {
            if self.is_safe(placement, col) {
                let mut next = placement.clone();
                next.push(col);
                out.push((col, next, 1));
            }
        }
        out
    }

    /// Count of columns in `row` not attacked by any placed queen.
    pub fn legal_in_row(&self, placement: &Placement, row: u32) -> u32 {
        let mut count = 0;
        for col in 0..self.n {
            let attacked = placement.iter().enumerate().any(|(rp, &cp)| {
                cp == col || (cp as i64 - col as i64).abs() == (rp as i64 - row as i64).abs()
            });
            if !attacked {
                count += 1;
            }
        }
        count
    }

    /// Full pairwise validity of a complete placement.
    pub fn check_solution(&self, placement: &Placement) -> bool {
        if placement.len() as u32 != self.n {
            return false;
        }
        for r1 in 0..placement.len() {
            for r2 in (r1 + 1)..placement.len() {
                let (c1, c2) = (placement[r1] as i64, placement[r2] as i64);
                if c1 == c2 || (c1 - c2).abs() == (r1 as i64 - r2 as i64).abs() {
                    return false;
                }
            }
        }
        true
    }

    /// ASCII board, one line per row, `Q` for a placed queen.
    pub fn render(&self, placement: &Placement) -> String {
        let mut lines = Vec::with_capacity(self.n as usize);
        for r in 0..self.n {
            let mut row: Vec<&str> = vec!["."; self.n as usize];
            if let Some(&c) = placement.get(r as usize) {
                row[c as usize] = "Q";
            }
            lines.push(row.join(" "));
        }
        lines.join("\n")
    }
}
