//! S4: interrupted run. A `udp dport 53` rule in the middle splits
//! two mergeable `tcp dport` groups into two independent merges.

use crate::common::*;
use optimize::driver::ChainDriver;
use optimize::log::discard_logger;
use optimize::{RulePrinter, TextPrinter};

#[test]
fn two_tcp_groups_around_a_udp_rule_merge_separately() {
    let logger = discard_logger();
    let printer = TextPrinter;
    let driver = ChainDriver::new(&logger, &printer);

    let mut c = chain(
        "c",
        vec![
            rule(vec![tcp_dport(0, 22), accept()], 0),
            rule(vec![tcp_dport(1, 23), accept()], 1),
            rule(vec![udp_dport(2, 53), accept()], 2),
            rule(vec![tcp_dport(3, 80), accept()], 3),
            rule(vec![tcp_dport(4, 443), accept()], 4),
        ],
    );

    let (report, result) = driver.optimize_chain(&mut c);
    assert!(result.is_ok());
    assert_eq!(report.merge_count(), 2);
    assert_eq!(c.rules.len(), 3);

    assert_eq!(printer.print_rule(&c.rules[0]), "tcp dport { 22, 23 } accept");
    assert_eq!(printer.print_rule(&c.rules[1]), "udp dport 53 accept");
    assert_eq!(printer.print_rule(&c.rules[2]), "tcp dport { 80, 443 } accept");
}
