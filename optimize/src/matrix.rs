// Copyright 2024 Oxide Computer Company

//! The `R x S` statement matrix: cell `(r, s)` names the statement
//! inside rule `r` that matches column `s`, or is empty.

use crate::ast::{Chain, Statement};
use crate::eq::{cell_eq, stmt_eq};
use crate::registry::SelectorRegistry;

/// Cells store the index of the matching statement within its row's
/// rule rather than a direct reference, so the matrix can be built
/// once and consulted both before and during the in-place rewrite that
/// follows (the caller retains ownership of the chain
/// throughout the pass).
pub struct StatementMatrix {
    rows: usize,
    cols: usize,
    cells: Vec<Option<usize>>,
}

impl StatementMatrix {
    pub fn build(chain: &Chain, registry: &SelectorRegistry) -> Self {
        let rows = chain.rules.len();
        let cols = registry.len();
        let mut cells = vec![None; rows * cols];
        for (r, rule) in chain.rules.iter().enumerate() {
            for (si, stmt) in rule.statements.iter().enumerate() {
                if let Some(c) =
                    (0..cols).find(|&c| stmt_eq(stmt, registry.column(c)))
                {
                    cells[r * cols + c] = Some(si);
                }
            }
        }
        Self { rows, cols, cells }
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    /// Index, within row `row`'s rule, of the statement occupying
    /// column `col`; `None` if that row doesn't test this selector.
    pub fn cell_index(&self, row: usize, col: usize) -> Option<usize> {
        self.cells[row * self.cols + col]
    }

    /// The statement occupying `(row, col)`, if any.
    pub fn cell<'a>(
        &self,
        chain: &'a Chain,
        row: usize,
        col: usize,
    ) -> Option<&'a Statement> {
        self.cell_index(row, col)
            .map(|si| &chain.rules[row].statements[si])
    }

    /// Two rules are matrix-equal when every column's cells compare
    /// equal under [`stmt_eq`], with two-sided-nullable empty handling.
    pub fn rows_eq(&self, chain: &Chain, i: usize, j: usize) -> bool {
        (0..self.cols).all(|c| cell_eq(self.cell(chain, i, c), self.cell(chain, j, c)))
    }
}
