//! S6: a chain flagged for hardware offload is left byte-identical;
//! the same input as S1 produces no merge at all.

use crate::common::*;
use optimize::driver::ChainDriver;
use optimize::log::discard_logger;
use optimize::TextPrinter;

#[test]
fn offload_flagged_chain_is_untouched() {
    let logger = discard_logger();
    let printer = TextPrinter;
    let driver = ChainDriver::new(&logger, &printer);

    let mut c = chain(
        "c",
        vec![
            rule(vec![tcp_dport(0, 22), accept()], 0),
            rule(vec![tcp_dport(1, 23), accept()], 1),
            rule(vec![tcp_dport(2, 80), accept()], 2),
        ],
    );
    c.flags.hardware_offload = true;
    let before = c.rules.len();

    let (report, result) = driver.optimize_chain(&mut c);
    assert!(result.is_ok());
    assert_eq!(report.merge_count(), 0);
    assert_eq!(c.rules.len(), before);
}
