// Copyright 2024 Oxide Computer Company

//! Chain driver: orchestrates the four phases per chain and assembles
//! the merge report.

use slog::{debug, info, warn};

use crate::ast::Chain;
use crate::collab::{RulePrinter, SourceLines};
use crate::config::Config;
use crate::error::OptimizeError;
use crate::matrix::StatementMatrix;
use crate::plan;
use crate::registry;
use crate::report::{MergeEvent, MergeReport};
use crate::rewrite;
use crate::scan;

pub struct ChainDriver<'a> {
    config: Config,
    logger: &'a slog::Logger,
    printer: &'a dyn RulePrinter,
    source: Option<&'a dyn SourceLines>,
}

impl<'a> ChainDriver<'a> {
    pub fn new(logger: &'a slog::Logger, printer: &'a dyn RulePrinter) -> Self {
        Self { config: Config::default(), logger, printer, source: None }
    }

    pub fn with_config(mut self, config: Config) -> Self {
        self.config = config;
        self
    }

    pub fn with_source_lines(mut self, source: &'a dyn SourceLines) -> Self {
        self.source = Some(source);
        self
    }

    /// Runs the optimizer over a single chain. Hardware-offload chains
    /// are left byte-identical. A registry overflow aborts the pass
    /// cleanly with the chain untouched; this is reported in the
    /// returned [`MergeReport`] but is not an [`OptimizeError`] the
    /// caller needs to treat as fatal.
    pub fn optimize_chain(
        &self,
        chain: &mut Chain,
    ) -> (MergeReport, Result<(), OptimizeError>) {
        let mut report = MergeReport::default();

        if chain.flags.hardware_offload {
            debug!(self.logger, "skipping hardware-offload chain";
                "chain" => chain.name.as_str());
            return (report, Ok(()));
        }

        let registry = match registry::build(chain, self.config.column_cap) {
            Ok(r) => r,
            Err(e @ OptimizeError::RegistryOverflow { .. }) => {
                warn!(self.logger, "registry overflow, chain left untouched";
                    "chain" => chain.name.as_str(), "error" => e.to_string());
                report.chains_skipped_overflow.push(chain.name.clone());
                return (report, Ok(()));
            }
            Err(e) => return (report, Err(e)),
        };

        let matrix = StatementMatrix::build(chain, &registry);
        let runs = scan::scan(chain, &matrix);
        debug!(self.logger, "adjacency scan complete";
            "chain" => chain.name.as_str(), "runs" => runs.len());

        // Process runs highest-row-first: retiring a run's interior rows
        // only shifts indices strictly above it, which are always
        // already-processed runs, never ones still queued.
        for run in runs.iter().rev() {
            let cols = plan::participating_columns(chain, &matrix, run.from);

            let retired = (run.from..=run.to)
                .map(|r| {
                    let loc = chain.rules[r].location.clone();
                    let line = self
                        .source
                        .and_then(|s| s.line(&loc))
                        .unwrap_or_default();
                    (loc, line)
                })
                .collect::<Vec<_>>();

            if let Err(e) = rewrite::rewrite_run(chain, &matrix, run, &cols) {
                warn!(self.logger, "merge rewrite failed";
                    "chain" => chain.name.as_str(), "error" => e.to_string());
                return (report, Err(e));
            }

            let rendered = self.printer.print_rule(&chain.rules[run.from]);
            info!(self.logger, "merged rule run";
                "chain" => chain.name.as_str(), "from" => run.from, "to" => run.to);
            report.events.push(MergeEvent { chain: chain.name.clone(), retired, rendered });
        }

        // Runs were processed highest-row-first; restore chain order for
        // readability of the emitted diagnostics.
        report.events.reverse();
        (report, Ok(()))
    }
}
