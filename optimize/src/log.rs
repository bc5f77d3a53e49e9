// Copyright 2024 Oxide Computer Company

//! Structured logging, built on the stack `p4rs` declares
//! (`slog`/`slog-term`/`slog-async`/`slog-envlogger`). This is separate
//! from the plain-text diagnostic stream in `diag.rs`: logging is
//! operational telemetry for this crate's own maintainers, never a
//! contract a caller parses.

use slog::{o, Drain};

pub fn root_logger() -> slog::Logger {
    let decorator = slog_term::TermDecorator::new().build();
    let drain = slog_term::FullFormat::new(decorator).build().fuse();
    let drain = slog_envlogger::new(drain);
    let drain = slog_async::Async::new(drain).build().fuse();
    slog::Logger::root(drain, o!("component" => "optimize"))
}

/// A logger that discards everything, for tests and callers that don't
/// want the async worker thread.
pub fn discard_logger() -> slog::Logger {
    slog::Logger::root(slog::Discard, o!())
}
