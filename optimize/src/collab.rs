// Copyright 2024 Oxide Computer Company

//! Collaborator contracts the optimizer consumes but does not own
//! rendering a rule back to text, and recovering the source
//! line a location came from. Both are real parsing/printing concerns
//! that belong to the surrounding toolchain; this crate only needs
//! trait objects to call into them when building diagnostics.

use crate::ast::{Location, Rule};

pub trait RulePrinter {
    fn print_rule(&self, rule: &Rule) -> String;
}

pub trait SourceLines {
    fn line(&self, location: &Location) -> Option<String>;
}

/// A minimal [`RulePrinter`] good enough for this crate's own tests and
/// demo CLI. A real front end has its own pretty-printer wired to its
/// parser's source spans; this one only needs to be consistent with
/// itself.
pub struct TextPrinter;

impl RulePrinter for TextPrinter {
    fn print_rule(&self, rule: &Rule) -> String {
        crate::render::render_rule(rule)
    }
}
