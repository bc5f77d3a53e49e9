// Copyright 2024 Oxide Computer Company

//! A plain-text renderer for this crate's own AST, used by
//! [`crate::collab::TextPrinter`] and by the demo CLI. Real rule
//! printing is an external collaborator; this is only a
//! stand-in faithful enough to make merge diagnostics readable.

use crate::ast::{
    Expression, ExpressionKind, LimitTimeUnit, LimitType, LogLevel, LogStmt,
    MetaKey, RejectFamily, RejectStmt, RejectType, Rule, Statement,
    ValueExpr, VerdictStmt,
};

pub fn render_rule(rule: &Rule) -> String {
    rule.statements.iter().map(render_statement).collect::<Vec<_>>().join(" ")
}

pub fn render_statement(stmt: &Statement) -> String {
    match stmt {
        Statement::Expression(e) => match &e.kind {
            ExpressionKind::Relational(l, op, r) => render_relational(l, *op, r),
            _ => render_expr(e),
        },
        Statement::Counter(_) => "counter".into(),
        Statement::Notrack => "notrack".into(),
        Statement::Verdict(v) => render_verdict_stmt(v),
        Statement::Limit(l) => format!(
            "limit rate {}/{} burst {} {}",
            l.rate,
            time_unit_name(l.unit),
            l.burst,
            limit_type_name(l.kind),
        ),
        Statement::Log(l) => render_log(l),
        Statement::Reject(r) => render_reject(r),
        Statement::Other(name) => name.clone(),
    }
}

fn render_relational(
    left: &Expression,
    op: crate::ast::RelOp,
    right: &Expression,
) -> String {
    let left_parts: Vec<&ExpressionKind> = match &left.kind {
        ExpressionKind::Concat(parts) => parts.iter().map(|p| &p.kind).collect(),
        k => vec![k],
    };
    let left_str = render_expr(left);
    let right_str = render_rhs(&left_parts, right);
    if matches!(op, crate::ast::RelOp::Eq) {
        format!("{left_str} {right_str}")
    } else {
        format!("{left_str} {op} {right_str}")
    }
}

fn render_rhs(left_parts: &[&ExpressionKind], rhs: &Expression) -> String {
    match &rhs.kind {
        ExpressionKind::Set { elements, .. } => {
            let items: Vec<String> =
                elements.iter().map(|e| render_rhs(left_parts, e)).collect();
            format!("{{ {} }}", items.join(", "))
        }
        ExpressionKind::SetElem(inner) => render_rhs(left_parts, inner),
        ExpressionKind::Concat(parts) => parts
            .iter()
            .zip(left_parts.iter())
            .map(|(p, lk)| render_value(lk, p))
            .collect::<Vec<_>>()
            .join(" . "),
        _ => render_value(left_parts.first().copied().unwrap_or(&rhs.kind), rhs),
    }
}

fn render_value(left_kind: &ExpressionKind, value: &Expression) -> String {
    match &value.kind {
        ExpressionKind::Value(ValueExpr::Immediate(n)) => n.to_string(),
        ExpressionKind::Value(ValueExpr::Identifier(s)) => {
            if quotes_identifier(left_kind) {
                format!("\"{s}\"")
            } else {
                s.clone()
            }
        }
        _ => render_expr(value),
    }
}

fn quotes_identifier(k: &ExpressionKind) -> bool {
    matches!(
        k,
        ExpressionKind::Meta { key: MetaKey::Iifname | MetaKey::Oifname, .. }
    )
}

fn render_expr(e: &Expression) -> String {
    match &e.kind {
        ExpressionKind::Payload { header, template }
        | ExpressionKind::ExtHeader { header, template } => {
            format!("{} {}", header.0, template.0)
        }
        ExpressionKind::Meta { key, .. } => meta_name(*key),
        ExpressionKind::Ct { key, .. } => format!("ct {}", ct_key_name(*key)),
        ExpressionKind::Rt { key } => format!("rt {}", rt_key_name(*key)),
        ExpressionKind::Socket { key, .. } => format!("socket {}", socket_key_name(*key)),
        ExpressionKind::Concat(parts) => {
            parts.iter().map(render_expr).collect::<Vec<_>>().join(" . ")
        }
        ExpressionKind::Value(ValueExpr::Immediate(n)) => n.to_string(),
        ExpressionKind::Value(ValueExpr::Identifier(s)) => s.clone(),
        ExpressionKind::Relational(l, op, r) => render_relational(l, *op, r),
        ExpressionKind::Set { elements, .. } => {
            format!("{{ {} }}", elements.iter().map(render_expr).collect::<Vec<_>>().join(", "))
        }
        ExpressionKind::SetElem(inner) => render_expr(inner),
        ExpressionKind::Verdict(v) => match &v.chain {
            Some(c) => format!("{} {}", v.kind, render_expr(c)),
            None => v.kind.to_string(),
        },
    }
}

fn meta_name(key: MetaKey) -> &'static str {
    match key {
        MetaKey::Iifname => "iifname",
        MetaKey::Oifname => "oifname",
        MetaKey::Iif => "meta iif",
        MetaKey::Oif => "meta oif",
        MetaKey::Mark => "meta mark",
        MetaKey::Nfproto => "meta nfproto",
        MetaKey::L4proto => "meta l4proto",
        MetaKey::Protocol => "meta protocol",
        MetaKey::Priority => "meta priority",
        MetaKey::Length => "meta length",
        MetaKey::Skuid => "meta skuid",
        MetaKey::Skgid => "meta skgid",
        MetaKey::Cgroup => "meta cgroup",
    }
}

fn ct_key_name(key: crate::ast::CtKey) -> &'static str {
    use crate::ast::CtKey::*;
    match key {
        State => "state",
        Status => "status",
        Mark => "mark",
        Expiration => "expiration",
        Direction => "direction",
        L3proto => "l3proto",
        Proto => "proto",
        Zone => "zone",
    }
}

fn rt_key_name(key: crate::ast::RtKey) -> &'static str {
    use crate::ast::RtKey::*;
    match key {
        Classid => "classid",
        Nexthop => "nexthop",
        Mtu => "mtu",
    }
}

fn socket_key_name(key: crate::ast::SocketKey) -> &'static str {
    use crate::ast::SocketKey::*;
    match key {
        Transparent => "transparent",
        Mark => "mark",
        Wildcard => "wildcard",
    }
}

fn time_unit_name(u: LimitTimeUnit) -> &'static str {
    match u {
        LimitTimeUnit::Second => "second",
        LimitTimeUnit::Minute => "minute",
        LimitTimeUnit::Hour => "hour",
        LimitTimeUnit::Day => "day",
    }
}

fn limit_type_name(t: LimitType) -> &'static str {
    match t {
        LimitType::Packets => "packets",
        LimitType::Bytes => "bytes",
    }
}

fn render_verdict_stmt(v: &VerdictStmt) -> String {
    match &v.chain {
        Some(c) => format!("{} {}", v.kind, render_chain_target(c)),
        None => v.kind.to_string(),
    }
}

fn render_chain_target(c: &Expression) -> String {
    match &c.kind {
        ExpressionKind::Value(ValueExpr::Identifier(s)) => s.clone(),
        _ => render_expr(c),
    }
}

fn render_log(l: &LogStmt) -> String {
    let mut s = String::from("log");
    if let Some(p) = &l.prefix {
        let text = match &p.kind {
            ExpressionKind::Value(ValueExpr::Identifier(v)) => v.clone(),
            ExpressionKind::Value(ValueExpr::Immediate(v)) => v.to_string(),
            _ => String::new(),
        };
        s.push_str(&format!(" prefix \"{text}\""));
    }
    if let Some(g) = l.group {
        s.push_str(&format!(" group {g}"));
    }
    if let Some(sn) = l.snaplen {
        s.push_str(&format!(" snaplen {sn}"));
    }
    if let Some(q) = l.qthreshold {
        s.push_str(&format!(" queue-threshold {q}"));
    }
    if let Some(lvl) = l.level {
        s.push_str(&format!(" level {}", log_level_name(lvl)));
    }
    s
}

fn log_level_name(l: LogLevel) -> &'static str {
    match l {
        LogLevel::Emerg => "emerg",
        LogLevel::Alert => "alert",
        LogLevel::Crit => "crit",
        LogLevel::Err => "err",
        LogLevel::Warn => "warn",
        LogLevel::Notice => "notice",
        LogLevel::Info => "info",
        LogLevel::Debug => "debug",
        LogLevel::Audit => "audit",
    }
}

fn render_reject(r: &RejectStmt) -> String {
    let mut s = String::from("reject");
    if let Some(f) = r.family {
        s.push_str(match f {
            RejectFamily::Ip => " with ip",
            RejectFamily::Ip6 => " with ip6",
        });
    }
    match r.kind {
        RejectType::TcpReset => s.push_str(" tcp-reset"),
        RejectType::IcmpUnreach => s.push_str(" icmp unreachable"),
        RejectType::Icmpx => s.push_str(" icmpx"),
    }
    if let Some(code) = r.icmp_code {
        s.push_str(&format!(" type {code}"));
    }
    s
}
