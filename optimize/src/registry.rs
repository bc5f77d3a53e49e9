// Copyright 2024 Oxide Computer Company

//! Per-chain selector registry: the ordered set of distinct matchable
//! statements encountered, i.e. the columns of the statement matrix
//!

use crate::ast::{Chain, Statement};
use crate::error::OptimizeError;
use crate::eq::stmt_eq;

/// Column keys are cloned statements. The clone exists because the
/// registry outlives the per-rule borrows that produced it and because
/// a couple of the per-kind equality fields (limit, log) are
/// value-typed in a way that is awkward to borrow out of a specific
/// rule. A leaner implementation could store just the
/// identity-relevant fields per kind instead of a whole cloned
/// statement; that's a legitimate simplification this crate does not
/// take (DESIGN.md).
pub struct SelectorRegistry {
    columns: Vec<Statement>,
    cap: usize,
}

impl SelectorRegistry {
    pub fn new(cap: usize) -> Self {
        Self { columns: Vec::new(), cap }
    }

    pub fn len(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    pub fn column(&self, index: usize) -> &Statement {
        &self.columns[index]
    }

    /// Returns the column index `stmt` belongs to, inserting a new
    /// column cloned from `stmt` if none of the existing ones are
    /// equivalent under [`stmt_eq`]. Returns `None` on overflow.
    pub fn intern(&mut self, stmt: &Statement) -> Option<usize> {
        if let Some(i) = self.columns.iter().position(|k| stmt_eq(k, stmt)) {
            return Some(i);
        }
        if self.columns.len() >= self.cap {
            return None;
        }
        self.columns.push(stmt.clone());
        Some(self.columns.len() - 1)
    }
}

/// Scans every rule's statements in order, in rule order, growing the
/// registry. Column order is therefore insertion order: the first
/// rule's statements define the initial columns, later rules append
/// columns for statements not already equivalent to one.
pub fn build(
    chain: &Chain,
    cap: usize,
) -> Result<SelectorRegistry, OptimizeError> {
    let mut registry = SelectorRegistry::new(cap);
    for rule in &chain.rules {
        for stmt in &rule.statements {
            if registry.intern(stmt).is_none() {
                return Err(OptimizeError::RegistryOverflow {
                    chain: chain.name.clone(),
                    limit: cap,
                    encountered: registry.len() + 1,
                });
            }
        }
    }
    Ok(registry)
}
