//! S5: counter and log statements, being identical across the run,
//! carry through on the surviving rule unchanged; only the `tcp dport`
//! column is planned for the rewrite.

use crate::common::*;
use optimize::driver::ChainDriver;
use optimize::log::discard_logger;
use optimize::{RulePrinter, TextPrinter};

#[test]
fn counter_and_log_prefix_survive_the_merge() {
    let logger = discard_logger();
    let printer = TextPrinter;
    let driver = ChainDriver::new(&logger, &printer);

    let mut c = chain(
        "c",
        vec![
            rule(vec![tcp_dport(0, 22), counter(), log_prefix(0, "ssh"), accept()], 0),
            rule(vec![tcp_dport(1, 23), counter(), log_prefix(1, "ssh"), accept()], 1),
        ],
    );

    let (report, result) = driver.optimize_chain(&mut c);
    assert!(result.is_ok());
    assert_eq!(report.merge_count(), 1);
    assert_eq!(c.rules.len(), 1);
    assert_eq!(c.rules[0].statements.len(), 4);

    assert_eq!(
        printer.print_rule(&c.rules[0]),
        "tcp dport { 22, 23 } counter log prefix \"ssh\" accept",
    );
}
