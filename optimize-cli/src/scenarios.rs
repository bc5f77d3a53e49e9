//! Built-in demo rule sets for `optctl`. This crate owns no rule-text
//! parser (out of scope per spec §1), so, following the teacher's
//! `test/` crate, which builds pipeline input directly as Rust values
//! rather than round-tripping through P4 source, the demo CLI ships a
//! handful of named scenarios built directly as `optimize::ast` values.

use num::bigint::BigUint;
use std::sync::Arc;

use optimize::ast::*;

fn loc(line: usize) -> Location {
    Location::new(line, 0, Arc::from("demo.nft"))
}

fn relational(line: usize, left: Expression, right: Expression) -> Statement {
    Statement::Expression(Expression {
        loc: loc(line),
        kind: ExpressionKind::Relational(Box::new(left), RelOp::Eq, Box::new(right)),
    })
}

fn tcp_dport(line: usize, port: u32) -> Statement {
    relational(
        line,
        Expression {
            loc: loc(line),
            kind: ExpressionKind::Payload { header: HeaderDesc("tcp"), template: TemplateRef("dport") },
        },
        Expression { loc: loc(line), kind: ExpressionKind::Value(ValueExpr::Immediate(BigUint::from(port))) },
    )
}

fn udp_dport(line: usize, port: u32) -> Statement {
    relational(
        line,
        Expression {
            loc: loc(line),
            kind: ExpressionKind::Payload { header: HeaderDesc("udp"), template: TemplateRef("dport") },
        },
        Expression { loc: loc(line), kind: ExpressionKind::Value(ValueExpr::Immediate(BigUint::from(port))) },
    )
}

fn iifname(line: usize, name: &str) -> Statement {
    relational(
        line,
        Expression { loc: loc(line), kind: ExpressionKind::Meta { key: MetaKey::Iifname, base: ProtoBase::LinkLayer } },
        Expression { loc: loc(line), kind: ExpressionKind::Value(ValueExpr::Identifier(name.to_string())) },
    )
}

fn ip_daddr(line: usize, addr: u32) -> Statement {
    relational(
        line,
        Expression { loc: loc(line), kind: ExpressionKind::Payload { header: HeaderDesc("ip"), template: TemplateRef("daddr") } },
        Expression { loc: loc(line), kind: ExpressionKind::Value(ValueExpr::Immediate(BigUint::from(addr))) },
    )
}

fn accept() -> Statement {
    Statement::Verdict(VerdictStmt { kind: VerdictKind::Accept, chain: None })
}

fn drop() -> Statement {
    Statement::Verdict(VerdictStmt { kind: VerdictKind::Drop, chain: None })
}

fn rule(stmts: Vec<Statement>, line: usize) -> Rule {
    Rule::new(stmts, loc(line))
}

/// Mirrors spec §8 scenario S1.
pub fn single_selector() -> Chain {
    let mut c = Chain::new("input");
    c.rules = vec![
        rule(vec![tcp_dport(0, 22), accept()], 0),
        rule(vec![tcp_dport(1, 23), accept()], 1),
        rule(vec![tcp_dport(2, 80), accept()], 2),
    ];
    c
}

/// Mirrors spec §8 scenario S2.
pub fn no_merge_verdict() -> Chain {
    let mut c = Chain::new("input");
    c.rules = vec![
        rule(vec![tcp_dport(0, 22), accept()], 0),
        rule(vec![tcp_dport(1, 23), drop()], 1),
    ];
    c
}

/// Mirrors spec §8 scenario S3.
pub fn multi_selector() -> Chain {
    let mut c = Chain::new("input");
    c.rules = vec![
        rule(vec![iifname(0, "eth0"), ip_daddr(0, 1), tcp_dport(0, 22), accept()], 0),
        rule(vec![iifname(1, "eth1"), ip_daddr(1, 2), tcp_dport(1, 80), accept()], 1),
    ];
    c
}

/// Mirrors spec §8 scenario S4.
pub fn interrupted_run() -> Chain {
    let mut c = Chain::new("input");
    c.rules = vec![
        rule(vec![tcp_dport(0, 22), accept()], 0),
        rule(vec![tcp_dport(1, 23), accept()], 1),
        rule(vec![udp_dport(2, 53), accept()], 2),
        rule(vec![tcp_dport(3, 80), accept()], 3),
        rule(vec![tcp_dport(4, 443), accept()], 4),
    ];
    c
}

/// Mirrors spec §8 scenario S6: same shape as S1, but flagged for
/// hardware offload, so the optimizer must leave it untouched.
pub fn hardware_offload() -> Chain {
    let mut c = single_selector();
    c.flags.hardware_offload = true;
    c
}
