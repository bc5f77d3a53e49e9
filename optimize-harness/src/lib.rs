//! Integration tests for the rule-merging optimizer: one file per
//! literal scenario in spec §8 (S1–S6), plus a property module
//! covering the invariants that cut across them. Mirrors `test/src/lib.rs`'s
//! scenario-per-module shape: each module builds its input chain
//! directly as `optimize::ast` values, the way `test/` builds pipeline
//! input directly in Rust rather than round-tripping through a parser
//! this crate doesn't own.

#[cfg(test)]
mod common;

#[cfg(test)]
mod multi_selector;
#[cfg(test)]
mod interrupted_run;
#[cfg(test)]
mod counter_log_preserved;
#[cfg(test)]
mod hardware_offload;
#[cfg(test)]
mod properties;
