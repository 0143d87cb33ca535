//! Best-effort delivery of bot signals. Failures are logged and dropped;
//! this call must never delay or block the registration flow.

use crate::app_lib::{RequestOptions, post_for_status};

use super::signals::BotReport;

pub async fn report(report: &BotReport) {
    if let Err(err) = post_for_status("bot-report", report, &RequestOptions::new()).await {
        log::debug!("bot report not delivered: {err}");
    }
}
