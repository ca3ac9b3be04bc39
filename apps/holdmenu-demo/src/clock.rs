use holdmenu_core::{Clock, RuntimeScheduler};
use std::sync::atomic::{AtomicBool, Ordering};
use web_time::Instant;

/// Wall clock backed by `web-time`, so the same loop runs on wasm.
#[derive(Clone, Copy, Debug, Default)]
pub struct WebClock;

impl Clock for WebClock {
    type Instant = Instant;

    fn now(&self) -> Instant {
        Instant::now()
    }

    fn elapsed_nanos(&self, since: Instant) -> u64 {
        u64::try_from(since.elapsed().as_nanos()).unwrap_or(u64::MAX)
    }
}

/// Records frame requests for the demo's frame loop.
#[derive(Debug, Default)]
pub struct FrameRequests {
    requested: AtomicBool,
}

impl FrameRequests {
    /// Returns and clears the pending request.
    pub fn take(&self) -> bool {
        self.requested.swap(false, Ordering::AcqRel)
    }
}

impl RuntimeScheduler for FrameRequests {
    fn schedule_frame(&self) {
        self.requested.store(true, Ordering::Release);
    }
}
