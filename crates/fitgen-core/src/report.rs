//! Message-number vs. generated message consistency report

use crate::logging::Logger;

const PREFIX: &str = "mesgnum-vs-msgs";

/// Log every message-number identifier that has no generated message
///
/// Emits nothing for an empty slice. Otherwise: one count line, one reminder
/// line, then one line per identifier in input order.
pub fn report_mesg_nums_without_message(logger: &Logger, mesg_nums: &[String]) {
    if mesg_nums.is_empty() {
        return;
    }

    logger.warn(format!(
        "{PREFIX}: #mesgnum values != #generated messages, diff: {}",
        mesg_nums.len()
    ));
    logger.warn(format!(
        "{PREFIX}: remember to add/verify map entries for sdk in sdk.go for the following message(s):"
    ));
    for mesg_num in mesg_nums {
        logger.warn(format!(
            "{PREFIX}: ----> mesgnum {mesg_num:?} has no corresponding message"
        ));
    }
}
