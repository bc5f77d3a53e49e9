// Copyright 2024 Oxide Computer Company

//! Structured record of what a pass did, mirroring `p4::check::Diagnostics`:
//! an ordered collection callers and tests can inspect without
//! scraping the rendered diagnostic text.

use crate::ast::Location;

/// One completed merge: the retired rows (location plus recovered
/// source line, in row order, including row `from`) and the rendered
/// text of the surviving rule.
#[derive(Debug, Clone)]
pub struct MergeEvent {
    pub chain: String,
    pub retired: Vec<(Location, String)>,
    pub rendered: String,
}

#[derive(Debug, Clone, Default)]
pub struct MergeReport {
    pub events: Vec<MergeEvent>,
    pub chains_skipped_overflow: Vec<String>,
}

impl MergeReport {
    pub fn merge_count(&self) -> usize {
        self.events.len()
    }
}
