// Copyright 2024 Oxide Computer Company

//! The two rewrite operations: single-selector anonymous-set formation
//! and multi-selector concatenated-set formation. Ownership
//! transfer here is what the originating C implementation's manual
//! reference counting becomes in Rust: each expression has exactly one
//! owning slot at all times, and the rewriter moves children out of
//! donor slots with `std::mem::replace` before the donor statement (or
//! row) is dropped, rather than cloning and refcounting.

use crate::ast::{Chain, Expression, ExpressionKind, Statement, ValueExpr};
use crate::error::OptimizeError;
use crate::matrix::StatementMatrix;
use crate::scan::MergeRun;

fn internal(msg: impl Into<String>) -> OptimizeError {
    OptimizeError::Internal(msg.into())
}

/// A throwaway placeholder installed in a slot being emptied by a move,
/// so the slot always holds a valid `Expression` until it is either
/// overwritten with the real replacement or dropped along with its
/// owning statement.
fn placeholder(loc: crate::ast::Location) -> Box<Expression> {
    Box::new(Expression {
        loc,
        kind: ExpressionKind::Value(ValueExpr::Identifier(String::new())),
    })
}

fn expression_relational_mut(
    stmt: &mut Statement,
) -> Result<(&mut Box<Expression>, &mut Box<Expression>), OptimizeError> {
    let Statement::Expression(expr) = stmt else {
        return Err(internal("matrix cell did not point at an expression statement"));
    };
    let ExpressionKind::Relational(left, _, right) = &mut expr.kind else {
        return Err(internal("expression statement's expression was not relational"));
    };
    Ok((left, right))
}

fn cell_stmt_mut<'a>(
    chain: &'a mut Chain,
    matrix: &StatementMatrix,
    row: usize,
    col: usize,
) -> Result<&'a mut Statement, OptimizeError> {
    let si = matrix
        .cell_index(row, col)
        .ok_or_else(|| internal("planned column missing from row"))?;
    chain.rules[row]
        .statements
        .get_mut(si)
        .ok_or_else(|| internal("matrix cell index out of range"))
}

/// Rewrites `run` using the columns `cols` (participating expression
/// columns in column order), then removes the run's other rows. A
/// `cols` of length zero means the run's rows are identical duplicates
/// with no value-bearing column to merge; row `from` already carries
/// every shared statement unchanged, so only retirement applies.
pub fn rewrite_run(
    chain: &mut Chain,
    matrix: &StatementMatrix,
    run: &MergeRun,
    cols: &[usize],
) -> Result<(), OptimizeError> {
    match cols.len() {
        0 => {}
        1 => rewrite_single(chain, matrix, run, cols[0])?,
        _ => rewrite_multi(chain, matrix, run, cols)?,
    }
    chain.rules.drain(run.from + 1..=run.to);
    Ok(())
}

/// Single-selector case: replace row `from`'s column-`C` right-hand
/// side with a fresh anonymous set whose elements are, in row order,
/// the original right-hand sides of every row in the run.
fn rewrite_single(
    chain: &mut Chain,
    matrix: &StatementMatrix,
    run: &MergeRun,
    col: usize,
) -> Result<(), OptimizeError> {
    let mut elements = Vec::with_capacity(run.len());
    for row in run.from..=run.to {
        let stmt = cell_stmt_mut(chain, matrix, row, col)?;
        let (_, right) = expression_relational_mut(stmt)?;
        let loc = right.loc.clone();
        let owned = std::mem::replace(right, placeholder(loc.clone()));
        elements.push(Expression { loc, kind: ExpressionKind::SetElem(owned) });
    }

    let stmt = cell_stmt_mut(chain, matrix, run.from, col)?;
    let (_, right_slot) = expression_relational_mut(stmt)?;
    let set_loc = right_slot.loc.clone();
    *right_slot = Box::new(Expression {
        loc: set_loc,
        kind: ExpressionKind::Set { elements, anonymous: true },
    });
    Ok(())
}

/// Multi-selector case: build a left concatenation from row `from`'s
/// `C1..Ck` left-hand sides, and a right anonymous set of per-row
/// concatenations of `C1..Ck`'s right-hand sides; install both on row
/// `from`'s `C1` statement and drop `C2..Ck` from that row entirely.
fn rewrite_multi(
    chain: &mut Chain,
    matrix: &StatementMatrix,
    run: &MergeRun,
    cols: &[usize],
) -> Result<(), OptimizeError> {
    let mut lefts = Vec::with_capacity(cols.len());
    for &col in cols {
        let stmt = cell_stmt_mut(chain, matrix, run.from, col)?;
        let (left, _) = expression_relational_mut(stmt)?;
        let loc = left.loc.clone();
        let owned = std::mem::replace(left, placeholder(loc));
        lefts.push(*owned);
    }

    let mut row_concats = Vec::with_capacity(run.len());
    for row in run.from..=run.to {
        let mut parts = Vec::with_capacity(cols.len());
        for &col in cols {
            let stmt = cell_stmt_mut(chain, matrix, row, col)?;
            let (_, right) = expression_relational_mut(stmt)?;
            let loc = right.loc.clone();
            let owned = std::mem::replace(right, placeholder(loc));
            parts.push(*owned);
        }
        let loc = parts[0].loc.clone();
        row_concats.push(Expression { loc, kind: ExpressionKind::Concat(parts) });
    }

    let c1 = cols[0];
    let stmt = cell_stmt_mut(chain, matrix, run.from, c1)?;
    let (left_slot, right_slot) = expression_relational_mut(stmt)?;
    let loc = left_slot.loc.clone();
    *left_slot = Box::new(Expression { loc: loc.clone(), kind: ExpressionKind::Concat(lefts) });
    *right_slot = Box::new(Expression {
        loc,
        kind: ExpressionKind::Set { elements: row_concats, anonymous: true },
    });

    let mut remove_indices: Vec<usize> = cols[1..]
        .iter()
        .map(|&col| {
            matrix
                .cell_index(run.from, col)
                .ok_or_else(|| internal("planned column missing from row"))
        })
        .collect::<Result<_, _>>()?;
    remove_indices.sort_unstable_by(|a, b| b.cmp(a));
    for idx in remove_indices {
        chain.rules[run.from].statements.remove(idx);
    }

    Ok(())
}
