//! Property-style coverage of spec invariants 1, 3, 4, 6 and 8 (see
//! `spec.md` §8), over small hand-written rule lists rather than a new
//! proptest dependency; the teacher's own `test/` crate is
//! example-driven, not property-based, and this crate follows suit.

use crate::common::*;
use optimize::ast::{
    ExpressionKind, LimitStmt, LimitTimeUnit, LimitType, Statement, ValueExpr,
};
use optimize::driver::ChainDriver;
use optimize::log::discard_logger;
use optimize::TextPrinter;

fn limit(rate: u64) -> Statement {
    Statement::Limit(LimitStmt {
        rate,
        unit: LimitTimeUnit::Second,
        burst: 5,
        kind: LimitType::Packets,
        flags: 0,
    })
}

/// Invariant 1: every surviving rule either kept its input position, or
/// is the first member of a collapsed run.
#[test]
fn surviving_rules_keep_position_or_are_run_heads() {
    let logger = discard_logger();
    let printer = TextPrinter;
    let driver = ChainDriver::new(&logger, &printer);

    let mut c = chain(
        "c",
        vec![
            rule(vec![tcp_dport(0, 22), accept()], 0),
            rule(vec![tcp_dport(1, 23), accept()], 1),
            rule(vec![udp_dport(2, 53), accept()], 2),
            rule(vec![tcp_dport(3, 80), accept()], 3),
            rule(vec![tcp_dport(4, 443), accept()], 4),
        ],
    );

    let (_report, result) = driver.optimize_chain(&mut c);
    assert!(result.is_ok());
    assert_eq!(c.rules.len(), 3);
    assert_eq!(c.rules[0].location, loc(0)); // head of run [0,1]
    assert_eq!(c.rules[1].location, loc(2)); // untouched single row
    assert_eq!(c.rules[2].location, loc(3)); // head of run [3,4]
}

/// Invariant 3: a non-value field differing on a non-expression column
/// (here, `limit`'s rate) prevents the merge entirely.
#[test]
fn differing_limit_rate_prevents_merge() {
    let logger = discard_logger();
    let printer = TextPrinter;
    let driver = ChainDriver::new(&logger, &printer);

    let mut c = chain(
        "c",
        vec![
            rule(vec![tcp_dport(0, 22), limit(10), accept()], 0),
            rule(vec![tcp_dport(1, 23), limit(20), accept()], 1),
        ],
    );

    let (report, result) = driver.optimize_chain(&mut c);
    assert!(result.is_ok());
    assert_eq!(report.merge_count(), 0);
    assert_eq!(c.rules.len(), 2);
}

/// Invariant 4: a single-selector merge of `n` rows yields a set of
/// exactly `n` elements, in input order, `i`-th element equal to row
/// `i`'s right-hand side.
#[test]
fn single_selector_set_preserves_count_and_order() {
    let logger = discard_logger();
    let printer = TextPrinter;
    let driver = ChainDriver::new(&logger, &printer);

    let ports = [22, 23, 25, 80, 443];
    let mut c = chain(
        "c",
        ports
            .iter()
            .enumerate()
            .map(|(i, &p)| rule(vec![tcp_dport(i, p), accept()], i))
            .collect(),
    );

    let _ = driver.optimize_chain(&mut c);
    assert_eq!(c.rules.len(), 1);

    let Statement::Expression(e) = &c.rules[0].statements[0] else { panic!() };
    let ExpressionKind::Relational(_, _, right) = &e.kind else { panic!() };
    let ExpressionKind::Set { elements, .. } = &right.kind else { panic!() };
    assert_eq!(elements.len(), ports.len());
    for (elem, &expected) in elements.iter().zip(ports.iter()) {
        let ExpressionKind::SetElem(inner) = &elem.kind else { panic!() };
        let ExpressionKind::Value(ValueExpr::Immediate(n)) = &inner.kind else { panic!() };
        assert_eq!(n.to_string().parse::<u32>().unwrap(), expected);
    }
}

/// Invariant 6: running the optimizer a second time over its own
/// output is a no-op, since no adjacent run remains.
#[test]
fn second_pass_is_idempotent() {
    let logger = discard_logger();
    let printer = TextPrinter;
    let driver = ChainDriver::new(&logger, &printer);

    let mut c = chain(
        "c",
        vec![
            rule(vec![tcp_dport(0, 22), accept()], 0),
            rule(vec![tcp_dport(1, 23), accept()], 1),
            rule(vec![tcp_dport(2, 80), accept()], 2),
        ],
    );

    let (first, _) = driver.optimize_chain(&mut c);
    assert_eq!(first.merge_count(), 1);
    let snapshot = printer.print_rule(&c.rules[0]);

    let (second, _) = driver.optimize_chain(&mut c);
    assert_eq!(second.merge_count(), 0);
    assert_eq!(printer.print_rule(&c.rules[0]), snapshot);
}

/// Invariant 8: a chain that would produce more than the column cap
/// (32) distinct selector columns is left completely unchanged.
#[test]
fn registry_overflow_leaves_chain_unchanged() {
    let logger = discard_logger();
    let printer = TextPrinter;
    let driver = ChainDriver::new(&logger, &printer);

    // `Statement::Other` never compares equal to anything, even to an
    // identical copy of itself, so 33 of them intern as 33 distinct
    // columns and blow the 32-column cap.
    let rules = (0..33)
        .map(|i| rule(vec![Statement::Other(format!("xt-match-{i}")), accept()], i))
        .collect();
    let mut c = chain("c", rules);
    let before: Vec<_> = c.rules.iter().map(|r| r.statements.len()).collect();

    let (report, result) = driver.optimize_chain(&mut c);
    assert!(result.is_ok());
    assert_eq!(report.chains_skipped_overflow, vec!["c".to_string()]);
    assert_eq!(c.rules.len(), 33);
    let after: Vec<_> = c.rules.iter().map(|r| r.statements.len()).collect();
    assert_eq!(before, after);
}
