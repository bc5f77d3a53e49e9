//! Shared rule-building helpers for the scenario tests in this crate,
//! mirroring `test/src/packet.rs`'s role in the teacher's integration
//! test crate: small constructors so each scenario file reads close to
//! the rule text it is modeling, not a thicket of AST boilerplate.

use num::bigint::BigUint;
use std::sync::Arc;

use optimize::ast::*;

pub fn loc(line: usize) -> Location {
    Location::new(line, 0, Arc::from("ruleset.nft"))
}

fn relational(line: usize, left: Expression, right: Expression) -> Statement {
    Statement::Expression(Expression {
        loc: loc(line),
        kind: ExpressionKind::Relational(
            Box::new(left),
            RelOp::Eq,
            Box::new(right),
        ),
    })
}

fn immediate(line: usize, v: u32) -> Expression {
    Expression { loc: loc(line), kind: ExpressionKind::Value(ValueExpr::Immediate(BigUint::from(v))) }
}

fn identifier(line: usize, s: &str) -> Expression {
    Expression { loc: loc(line), kind: ExpressionKind::Value(ValueExpr::Identifier(s.to_string())) }
}

pub fn tcp_dport(line: usize, port: u32) -> Statement {
    relational(
        line,
        Expression { loc: loc(line), kind: ExpressionKind::Payload { header: HeaderDesc("tcp"), template: TemplateRef("dport") } },
        immediate(line, port),
    )
}

pub fn udp_dport(line: usize, port: u32) -> Statement {
    relational(
        line,
        Expression { loc: loc(line), kind: ExpressionKind::Payload { header: HeaderDesc("udp"), template: TemplateRef("dport") } },
        immediate(line, port),
    )
}

pub fn iifname(line: usize, name: &str) -> Statement {
    relational(
        line,
        Expression { loc: loc(line), kind: ExpressionKind::Meta { key: MetaKey::Iifname, base: ProtoBase::LinkLayer } },
        identifier(line, name),
    )
}

pub fn ip_daddr(line: usize, addr: u32) -> Statement {
    relational(
        line,
        Expression { loc: loc(line), kind: ExpressionKind::Payload { header: HeaderDesc("ip"), template: TemplateRef("daddr") } },
        immediate(line, addr),
    )
}

pub fn accept() -> Statement {
    Statement::Verdict(VerdictStmt { kind: VerdictKind::Accept, chain: None })
}

pub fn drop() -> Statement {
    Statement::Verdict(VerdictStmt { kind: VerdictKind::Drop, chain: None })
}

pub fn counter() -> Statement {
    Statement::Counter(CounterStmt::default())
}

pub fn log_prefix(line: usize, prefix: &str) -> Statement {
    Statement::Log(LogStmt {
        prefix: Some(identifier(line, prefix)),
        snaplen: None,
        group: None,
        qthreshold: None,
        level: None,
        log_flags: 0,
        flags: 0,
    })
}

pub fn rule(stmts: Vec<Statement>, line: usize) -> Rule {
    Rule::new(stmts, loc(line))
}

pub fn chain(name: &str, rules: Vec<Rule>) -> Chain {
    let mut c = Chain::new(name);
    c.rules = rules;
    c
}
