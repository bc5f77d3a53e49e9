// Copyright 2024 Oxide Computer Company

//! The data model the optimizer operates over: statements, expressions,
//! rules and chains. Parsing rule text into this shape is not this
//! crate's job (callers hand us the tree already built).

use std::fmt;
use std::sync::Arc;

use num::bigint::BigUint;

/// Opaque source position, carried by a [`Rule`] purely so diagnostics can
/// be rendered against the input; the optimizer never inspects it.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Location {
    pub line: usize,
    pub col: usize,
    pub file: Arc<str>,
}

impl Location {
    pub fn new(line: usize, col: usize, file: Arc<str>) -> Self {
        Self { line, col, file }
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}:{}", self.file, self.line + 1, self.col + 1)
    }
}

/// A protocol header descriptor. In the originating language these are
/// interned global singletons compared by pointer; here the canonical
/// name stands in for pointer identity (see DESIGN.md).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct HeaderDesc(pub &'static str);

/// A field template within a header descriptor (e.g. `dport` within `tcp`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TemplateRef(pub &'static str);

/// Which protocol layer a field is read relative to. Shared by the
/// `meta` and connection-tracking selector kinds, which both carry a
/// "base" identity field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ProtoBase {
    LinkLayer,
    Network,
    Transport,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MetaKey {
    Iifname,
    Oifname,
    Iif,
    Oif,
    Mark,
    Nfproto,
    L4proto,
    Protocol,
    Priority,
    Length,
    Skuid,
    Skgid,
    Cgroup,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CtKey {
    State,
    Status,
    Mark,
    Expiration,
    Direction,
    L3proto,
    Proto,
    Zone,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CtDirection {
    Original,
    Reply,
    Any,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NetworkProtocol {
    Ipv4,
    Ipv6,
    Any,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RtKey {
    Classid,
    Nexthop,
    Mtu,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SocketKey {
    Transparent,
    Mark,
    Wildcard,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RelOp {
    Eq,
    Neq,
    Lt,
    Gt,
    Le,
    Ge,
}

impl fmt::Display for RelOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            RelOp::Eq => "==",
            RelOp::Neq => "!=",
            RelOp::Lt => "<",
            RelOp::Gt => ">",
            RelOp::Le => "<=",
            RelOp::Ge => ">=",
        };
        write!(f, "{s}")
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValueExpr {
    Immediate(BigUint),
    Identifier(String),
}

impl fmt::Display for ValueExpr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValueExpr::Immediate(v) => write!(f, "{v}"),
            ValueExpr::Identifier(s) => write!(f, "\"{s}\""),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum VerdictKind {
    Accept,
    Drop,
    Continue,
    Return,
    Jump,
    Goto,
}

impl fmt::Display for VerdictKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            VerdictKind::Accept => "accept",
            VerdictKind::Drop => "drop",
            VerdictKind::Continue => "continue",
            VerdictKind::Return => "return",
            VerdictKind::Jump => "jump",
            VerdictKind::Goto => "goto",
        };
        write!(f, "{s}")
    }
}

/// A verdict value: the kind plus, for `jump`/`goto`, the target chain
/// expression (expected to be an identifier when present).
#[derive(Debug, Clone)]
pub struct VerdictValueExpr {
    pub kind: VerdictKind,
    pub chain: Option<Box<Expression>>,
}

#[derive(Debug, Clone)]
pub struct Expression {
    pub loc: Location,
    pub kind: ExpressionKind,
}

impl Expression {
    pub fn new(loc: Location, kind: ExpressionKind) -> Box<Self> {
        Box::new(Self { loc, kind })
    }
}

#[derive(Debug, Clone)]
pub enum ExpressionKind {
    /// A payload field, e.g. `tcp dport`.
    Payload { header: HeaderDesc, template: TemplateRef },
    /// An extension header field, e.g. an IPv6 extension header option.
    ExtHeader { header: HeaderDesc, template: TemplateRef },
    /// A meta key, e.g. `iifname`, `mark`.
    Meta { key: MetaKey, base: ProtoBase },
    /// A connection-tracking key, e.g. `ct state`.
    Ct {
        key: CtKey,
        base: ProtoBase,
        direction: CtDirection,
        nproto: NetworkProtocol,
    },
    /// A routing key, e.g. `rt classid`.
    Rt { key: RtKey },
    /// A socket key, e.g. `socket mark`.
    Socket { key: SocketKey, level: u32 },
    /// The match form used in expression statements: `left op right`.
    Relational(Box<Expression>, RelOp, Box<Expression>),
    /// An immediate value: integer or identifier.
    Value(ValueExpr),
    /// A (possibly anonymous) set of elements.
    Set { elements: Vec<Expression>, anonymous: bool },
    /// One element of a set, wrapping the value it matches.
    SetElem(Box<Expression>),
    /// An ordered tuple, used both as a compound selector and as a set
    /// element type.
    Concat(Vec<Expression>),
    /// A verdict used as a value (appears on the right of `meta mark set`
    /// style statements in principle, and as part of the `Verdict`
    /// statement's wrapped value here).
    Verdict(VerdictValueExpr),
}

/// `counter` statement. Byte/packet tallies are accounting state, not
/// identity; `stmt_eq` never inspects them.
#[derive(Debug, Clone, Default)]
pub struct CounterStmt {
    pub packets: Option<u64>,
    pub bytes: Option<u64>,
}

#[derive(Debug, Clone)]
pub struct VerdictStmt {
    pub kind: VerdictKind,
    pub chain: Option<Expression>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LimitTimeUnit {
    Second,
    Minute,
    Hour,
    Day,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LimitType {
    Packets,
    Bytes,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LimitStmt {
    pub rate: u64,
    pub unit: LimitTimeUnit,
    pub burst: u64,
    pub kind: LimitType,
    pub flags: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogLevel {
    Emerg,
    Alert,
    Crit,
    Err,
    Warn,
    Notice,
    Info,
    Debug,
    Audit,
}

#[derive(Debug, Clone)]
pub struct LogStmt {
    pub prefix: Option<Expression>,
    pub snaplen: Option<u32>,
    pub group: Option<u16>,
    pub qthreshold: Option<u16>,
    pub level: Option<LogLevel>,
    pub log_flags: u32,
    pub flags: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RejectFamily {
    Ip,
    Ip6,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RejectType {
    TcpReset,
    IcmpUnreach,
    Icmpx,
}

#[derive(Debug, Clone)]
pub struct RejectStmt {
    pub family: Option<RejectFamily>,
    pub kind: RejectType,
    pub icmp_code: Option<u8>,
    /// Extended ICMP expression payload. Reject statements carrying one
    /// are never mergeable.
    pub expr: Option<Expression>,
}

/// One element of a rule. Kinds not named here (`Other`) are never equal
/// to anything, which keeps a rule containing one out of any merge.
#[derive(Debug, Clone)]
pub enum Statement {
    /// A match: wraps a `Relational` expression.
    Expression(Expression),
    Counter(CounterStmt),
    Notrack,
    Verdict(VerdictStmt),
    Limit(LimitStmt),
    Log(LogStmt),
    Reject(RejectStmt),
    /// Any statement kind this crate does not model. Always unequal.
    Other(String),
}

#[derive(Debug, Clone)]
pub struct Rule {
    pub statements: Vec<Statement>,
    pub location: Location,
}

impl Rule {
    pub fn new(statements: Vec<Statement>, location: Location) -> Self {
        Self { statements, location }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ChainFlags {
    pub hardware_offload: bool,
}

#[derive(Debug, Clone)]
pub struct Chain {
    pub name: String,
    pub rules: Vec<Rule>,
    pub flags: ChainFlags,
}

impl Chain {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            rules: Vec::new(),
            flags: ChainFlags::default(),
        }
    }
}
