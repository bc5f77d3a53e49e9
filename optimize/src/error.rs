// Copyright 2024 Oxide Computer Company

use std::fmt;

/// Recoverable error kinds a chain pass can hit. Both are
/// handled locally by the driver: the chain's pass is aborted and its
/// rules are left untouched. Neither ever propagates as a hard failure
/// out of [`crate::optimize`]; the optimizer is best-effort.
#[derive(Debug)]
pub enum OptimizeError {
    /// More than the configured cap of distinct selector columns were
    /// encountered while building the registry for a chain.
    RegistryOverflow {
        chain: String,
        limit: usize,
        encountered: usize,
    },
    /// A structural invariant the rewriter relies on did not hold (e.g.
    /// a matrix cell pointed past the end of a rule's statement list).
    /// Given well-formed input this should never happen; surfaced
    /// rather than panicking so a malformed chain can't take down the
    /// caller.
    Internal(String),
}

impl fmt::Display for OptimizeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OptimizeError::RegistryOverflow { chain, limit, encountered } => {
                write!(
                    f,
                    "chain '{chain}' has at least {encountered} distinct \
                     selector columns, exceeding the cap of {limit}; \
                     merging skipped for this chain"
                )
            }
            OptimizeError::Internal(msg) => {
                write!(f, "internal optimizer error: {msg}")
            }
        }
    }
}

impl std::error::Error for OptimizeError {}
