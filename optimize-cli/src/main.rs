// Copyright 2024 Oxide Computer Company

//! `optctl`, a small demo/dev front end for the `optimize` crate,
//! standing in for `x4c` the way `optimize` stands in for `p4`: a
//! `clap::Parser` opts struct and an `anyhow::Result` main, following
//! the same shape as `x4c::Opts` / `x4c`'s `run()`.

use anyhow::{anyhow, Result};
use clap::{Parser, ValueEnum};
use colored::Colorize;

use optimize::{optimize_with_config, Command, Config, RulePrinter, TextPrinter};

mod scenarios;

#[derive(Parser)]
#[clap(version, about = "Run the rule-merging optimizer over a demo ruleset")]
struct Opts {
    /// Which built-in demo scenario to run. Defaults to running all of
    /// them in sequence.
    #[clap(value_enum)]
    scenario: Option<Scenario>,

    /// Column cap before a chain's merge pass is aborted (spec default: 32).
    #[clap(long, default_value_t = optimize::config::DEFAULT_COLUMN_CAP)]
    column_cap: usize,

    /// Disable ANSI color in diagnostic output.
    #[clap(long)]
    no_color: bool,

    /// Emit operator logging (registry/matrix/scan phases) to stderr.
    #[clap(long)]
    verbose: bool,
}

#[derive(Clone, Copy, ValueEnum)]
enum Scenario {
    SingleSelector,
    NoMergeVerdict,
    MultiSelector,
    InterruptedRun,
    HardwareOffload,
}

impl Scenario {
    fn name(self) -> &'static str {
        match self {
            Scenario::SingleSelector => "single-selector",
            Scenario::NoMergeVerdict => "no-merge-verdict",
            Scenario::MultiSelector => "multi-selector",
            Scenario::InterruptedRun => "interrupted-run",
            Scenario::HardwareOffload => "hardware-offload",
        }
    }

    fn build(self) -> optimize::ast::Chain {
        match self {
            Scenario::SingleSelector => scenarios::single_selector(),
            Scenario::NoMergeVerdict => scenarios::no_merge_verdict(),
            Scenario::MultiSelector => scenarios::multi_selector(),
            Scenario::InterruptedRun => scenarios::interrupted_run(),
            Scenario::HardwareOffload => scenarios::hardware_offload(),
        }
    }

    fn all() -> [Scenario; 5] {
        [
            Scenario::SingleSelector,
            Scenario::NoMergeVerdict,
            Scenario::MultiSelector,
            Scenario::InterruptedRun,
            Scenario::HardwareOffload,
        ]
    }
}

fn main() {
    if let Err(e) = run() {
        eprintln!("{e}");
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let opts = Opts::parse();
    let logger =
        if opts.verbose { optimize::log::root_logger() } else { optimize::log::discard_logger() };
    let printer = TextPrinter;
    let color = !opts.no_color;

    let scenarios: Vec<Scenario> = match opts.scenario {
        Some(s) => vec![s],
        None => Scenario::all().to_vec(),
    };

    for scenario in scenarios {
        println!("{}", format!("=== {} ===", scenario.name()).bold());
        let mut table = optimize::TableDef::new("filter");
        table.chains.push(scenario.build());
        let mut commands = vec![Command::Add(optimize::AddObject { table })];

        let config = Config { column_cap: opts.column_cap };
        let (status, report) =
            optimize_with_config(&mut commands, config, &logger, &printer, None);
        if status != 0 {
            return Err(anyhow!("internal optimizer error running '{}'", scenario.name()));
        }

        if report.merge_count() == 0 && report.chains_skipped_overflow.is_empty() {
            println!("(no merges)");
        }
        for event in &report.events {
            print!("{}", optimize::diag::render_event(event, color));
        }
        for chain_name in &report.chains_skipped_overflow {
            println!("chain '{chain_name}' exceeded the column cap; left untouched");
        }

        let Command::Add(add) = &commands[0] else { unreachable!() };
        for chain in &add.table.chains {
            println!("final rules in '{}':", chain.name);
            for rule in &chain.rules {
                println!("  {}", printer.print_rule(rule));
            }
        }
        println!();
    }

    Ok(())
}
