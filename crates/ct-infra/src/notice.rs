use tracing::info;

use ct_core::ports::NoticePort;
use ct_core::Notice;

/// Headless notice sink: every notice becomes an `info` event carrying the
/// user-facing text.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingNoticeSink;

impl NoticePort for TracingNoticeSink {
    fn notify(&self, notice: Notice) {
        info!(target: "cotalib::notice", "{notice}");
    }
}
