//! S3: multi-selector concatenation. `iifname`, `ip daddr` and `tcp
//! dport` vary together across two rules, so the rewrite builds a
//! three-wide left concatenation and a two-element right set of
//! three-wide tuples.

use crate::common::*;
use optimize::ast::{ExpressionKind, Statement};
use optimize::driver::ChainDriver;
use optimize::log::discard_logger;
use optimize::{RulePrinter, TextPrinter};

#[test]
fn iifname_daddr_dport_merge_into_concat_set() {
    let logger = discard_logger();
    let printer = TextPrinter;
    let driver = ChainDriver::new(&logger, &printer);

    let mut c = chain(
        "c",
        vec![
            rule(
                vec![iifname(0, "eth0"), ip_daddr(0, 1), tcp_dport(0, 22), accept()],
                0,
            ),
            rule(
                vec![iifname(1, "eth1"), ip_daddr(1, 2), tcp_dport(1, 80), accept()],
                1,
            ),
        ],
    );

    let (report, result) = driver.optimize_chain(&mut c);
    assert!(result.is_ok());
    assert_eq!(report.merge_count(), 1);
    assert_eq!(c.rules.len(), 1);
    // merged match statement + accept, the three varying selectors
    // collapsed into one concat/set pair.
    assert_eq!(c.rules[0].statements.len(), 2);

    let Statement::Expression(e) = &c.rules[0].statements[0] else { panic!() };
    let ExpressionKind::Relational(left, _, right) = &e.kind else { panic!() };
    let ExpressionKind::Concat(left_parts) = &left.kind else { panic!() };
    assert_eq!(left_parts.len(), 3);
    let ExpressionKind::Set { elements, anonymous } = &right.kind else { panic!() };
    assert!(anonymous);
    assert_eq!(elements.len(), 2);
    for elem in elements {
        let ExpressionKind::Concat(parts) = &elem.kind else { panic!() };
        assert_eq!(parts.len(), 3);
    }

    assert_eq!(
        printer.print_rule(&c.rules[0]),
        "iifname . ip daddr . tcp dport { \"eth0\" . 1 . 22, \"eth1\" . 2 . 80 } accept",
    );
}
