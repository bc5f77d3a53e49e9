// Copyright 2024 Oxide Computer Company

//! Merge planner: picks the columns a run's rewrite will actually touch
//!

use crate::ast::{Chain, Statement};
use crate::matrix::StatementMatrix;

/// Columns populated at row `from` whose cell is an expression
/// statement, in column order. Verdict/counter/limit/log/reject
/// columns are shared identically across the whole run by construction
/// of matrix equality, so row `from`'s copy carries through unchanged;
/// nothing to plan for those.
pub fn participating_columns(
    chain: &Chain,
    matrix: &StatementMatrix,
    from: usize,
) -> Vec<usize> {
    (0..matrix.cols())
        .filter(|&c| {
            matches!(matrix.cell(chain, from, c), Some(Statement::Expression(_)))
        })
        .collect()
}
