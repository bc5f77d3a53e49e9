// Copyright 2024 Oxide Computer Company

//! Renders the plain-text diagnostic wire format:
//!
//! ```text
//! Merging:
//! <loc> <line-of-rule-from>
//! <loc> <line-of-rule-from+1>
//! ...
//! into:
//!     <rendered merged rule>
//! ```
//!
//! Coloring follows `p4::error`'s use of the `colored` crate; it is
//! cosmetic only, never part of what tests assert on.

use std::io::{self, Write};

use colored::Colorize;

use crate::report::MergeEvent;

pub fn render_event(event: &MergeEvent, color: bool) -> String {
    let mut out = String::new();
    out.push_str(&heading("Merging:", color));
    out.push('\n');
    for (loc, line) in &event.retired {
        out.push_str(&format!("{} {}\n", location(loc, color), line));
    }
    out.push_str(&heading("into:", color));
    out.push('\n');
    out.push_str(&format!("\t{}\n", event.rendered));
    out
}

fn heading(s: &str, color: bool) -> String {
    if color {
        s.bright_white().bold().to_string()
    } else {
        s.to_string()
    }
}

fn location(loc: &crate::ast::Location, color: bool) -> String {
    let s = format!("[{}]", loc);
    if color {
        s.bright_red().to_string()
    } else {
        s
    }
}

pub fn write_event<W: Write>(
    mut w: W,
    event: &MergeEvent,
    color: bool,
) -> io::Result<()> {
    write!(w, "{}", render_event(event, color))
}
