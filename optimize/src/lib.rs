// Copyright 2024 Oxide Computer Company

//! Rule-merging optimizer: detects adjacent rules within a chain that
//! differ only in the values tested by one or more match expressions,
//! and rewrites them into a single rule whose match uses an anonymous
//! set.
//! implements.

pub mod ast;
pub mod collab;
pub mod command;
pub mod config;
pub mod diag;
pub mod driver;
pub mod error;
pub mod eq;
pub mod log;
pub mod matrix;
pub mod plan;
pub mod registry;
pub mod render;
pub mod report;
pub mod rewrite;
pub mod scan;

pub use collab::{RulePrinter, SourceLines, TextPrinter};
pub use command::{AddObject, Command, TableDef};
pub use config::Config;
pub use driver::ChainDriver;
pub use error::OptimizeError;
pub use report::{MergeEvent, MergeReport};

/// Walks `commands`; for each `Add` command whose target is a table,
/// optimizes each of the table's chains in place. Returns a
/// non-zero status only when an internal optimizer error was hit (a
/// registry overflow is recoverable and leaves the affected chain
/// untouched rather than failing the command).
pub fn optimize(
    commands: &mut [Command],
    logger: &slog::Logger,
    printer: &dyn RulePrinter,
    source: Option<&dyn SourceLines>,
) -> (i32, MergeReport) {
    optimize_with_config(commands, Config::default(), logger, printer, source)
}

pub fn optimize_with_config(
    commands: &mut [Command],
    config: Config,
    logger: &slog::Logger,
    printer: &dyn RulePrinter,
    source: Option<&dyn SourceLines>,
) -> (i32, MergeReport) {
    let mut driver = ChainDriver::new(logger, printer).with_config(config);
    if let Some(s) = source {
        driver = driver.with_source_lines(s);
    }

    let mut report = MergeReport::default();
    let mut status = 0;
    for cmd in commands.iter_mut() {
        let Command::Add(add) = cmd else { continue };
        for chain in add.table.chains.iter_mut() {
            let (chain_report, result) = driver.optimize_chain(chain);
            report.events.extend(chain_report.events);
            report.chains_skipped_overflow.extend(chain_report.chains_skipped_overflow);
            if let Err(OptimizeError::Internal(_)) = result {
                status = 1;
            }
        }
    }
    (status, report)
}
