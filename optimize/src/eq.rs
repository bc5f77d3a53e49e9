// Copyright 2024 Oxide Computer Company

//! Statement equality: "same kind, same non-value parameters". This is
//! the predicate the registry, matrix and scanner are all built on top
//! of.

use crate::ast::{
    CounterStmt, Expression, ExpressionKind, LimitStmt, LogStmt, RejectStmt,
    Statement, ValueExpr, VerdictStmt,
};

/// Two empty slots are equal; one empty and one present are unequal.
pub fn cell_eq(a: Option<&Statement>, b: Option<&Statement>) -> bool {
    match (a, b) {
        (None, None) => true,
        (Some(a), Some(b)) => stmt_eq(a, b),
        _ => false,
    }
}

/// Same kind, same non-value parameters. Unsupported statement kinds
/// (`Statement::Other`) never compare equal, even to themselves: the
/// safe default is to refuse to merge through them.
pub fn stmt_eq(a: &Statement, b: &Statement) -> bool {
    match (a, b) {
        (Statement::Expression(a), Statement::Expression(b)) => {
            expr_stmt_eq(a, b)
        }
        (Statement::Counter(a), Statement::Counter(b)) => counter_eq(a, b),
        (Statement::Notrack, Statement::Notrack) => true,
        (Statement::Verdict(a), Statement::Verdict(b)) => verdict_eq(a, b),
        (Statement::Limit(a), Statement::Limit(b)) => limit_eq(a, b),
        (Statement::Log(a), Statement::Log(b)) => log_eq(a, b),
        (Statement::Reject(a), Statement::Reject(b)) => reject_eq(a, b),
        _ => false,
    }
}

fn counter_eq(_a: &CounterStmt, _b: &CounterStmt) -> bool {
    true
}

/// Both must be relational matches, with equal left-hand selector
/// identity and operator; the right-hand comparand is deliberately
/// skipped; differing values are the entire point of merging.
fn expr_stmt_eq(a: &Expression, b: &Expression) -> bool {
    let (ExpressionKind::Relational(al, aop, _), ExpressionKind::Relational(bl, bop, _)) =
        (&a.kind, &b.kind)
    else {
        return false;
    };
    if aop != bop {
        return false;
    }
    selector_eq(al, bl)
}

/// Identity comparison for the selector kinds a match's left-hand side
/// may take. Any other left-hand kind is unsupported as a selector and
/// compares unequal.
fn selector_eq(a: &Expression, b: &Expression) -> bool {
    use ExpressionKind::*;
    match (&a.kind, &b.kind) {
        (
            Payload { header: ah, template: at },
            Payload { header: bh, template: bt },
        ) => ah == bh && at == bt,
        (
            ExtHeader { header: ah, template: at },
            ExtHeader { header: bh, template: bt },
        ) => ah == bh && at == bt,
        (Meta { key: ak, base: ab }, Meta { key: bk, base: bb }) => {
            ak == bk && ab == bb
        }
        (
            Ct { key: ak, base: ab, direction: ad, nproto: an },
            Ct { key: bk, base: bb, direction: bd, nproto: bn },
        ) => ak == bk && ab == bb && ad == bd && an == bn,
        (Rt { key: ak }, Rt { key: bk }) => ak == bk,
        (Socket { key: ak, level: al }, Socket { key: bk, level: bl }) => {
            ak == bk && al == bl
        }
        _ => false,
    }
}

/// Verdict tag equal; target chain reference either both absent or both
/// present with identical kind and, when identifier-valued, identical
/// name. Non-identifier chain expressions are unsupported and compare
/// unequal ("ambiguity in verdict equality").
fn verdict_eq(a: &VerdictStmt, b: &VerdictStmt) -> bool {
    if a.kind != b.kind {
        return false;
    }
    match (&a.chain, &b.chain) {
        (None, None) => true,
        (Some(a), Some(b)) => chain_target_eq(a, b),
        _ => false,
    }
}

fn chain_target_eq(a: &Expression, b: &Expression) -> bool {
    match (&a.kind, &b.kind) {
        (ExpressionKind::Value(ValueExpr::Identifier(a)), ExpressionKind::Value(ValueExpr::Identifier(b))) => {
            a == b
        }
        _ => false,
    }
}

fn limit_eq(a: &LimitStmt, b: &LimitStmt) -> bool {
    a.rate == b.rate
        && a.unit == b.unit
        && a.burst == b.burst
        && a.kind == b.kind
        && a.flags == b.flags
}

/// All of {snaplen, group, qthreshold, level, log-flags, flags} equal;
/// both prefixes must be immediate values with equal numeric... in this
/// model, string content (nft log prefixes are quoted strings, not
/// integers, so "numeric content" here maps to the
/// identifier payload here).
fn log_eq(a: &LogStmt, b: &LogStmt) -> bool {
    if a.snaplen != b.snaplen
        || a.group != b.group
        || a.qthreshold != b.qthreshold
        || a.level != b.level
        || a.log_flags != b.log_flags
        || a.flags != b.flags
    {
        return false;
    }
    match (&a.prefix, &b.prefix) {
        (Some(a), Some(b)) => match (&a.kind, &b.kind) {
            (ExpressionKind::Value(av), ExpressionKind::Value(bv)) => av == bv,
            _ => false,
        },
        (None, None) => true,
        _ => false,
    }
}

/// Neither may carry an extended expression payload; family, type and
/// ICMP code equal.
fn reject_eq(a: &RejectStmt, b: &RejectStmt) -> bool {
    if a.expr.is_some() || b.expr.is_some() {
        return false;
    }
    a.family == b.family && a.kind == b.kind && a.icmp_code == b.icmp_code
}
