//! Fixed-rate frame scheduler for the terminal event loop.

use std::time::{Duration, Instant};

use log::warn;
use plexus_field::{FrameHandle, FrameScheduler};

/// Holds at most one pending frame, due one interval after the last tick.
#[derive(Debug)]
pub struct TickScheduler {
    interval: Duration,
    next_id: u64,
    pending: Option<(FrameHandle, Instant)>,
    last_tick: Option<Instant>,
}

impl TickScheduler {
    pub fn new(interval: Duration) -> Self {
        Self {
            interval,
            next_id: 0,
            pending: None,
            last_tick: None,
        }
    }

    /// When the pending frame becomes due.
    pub fn deadline(&self) -> Option<Instant> {
        self.pending.map(|(_, due)| due)
    }

    /// Hand out the pending frame if it is due at `now`.
    pub fn take_due(&mut self, now: Instant) -> Option<FrameHandle> {
        match self.pending {
            Some((handle, due)) if now >= due => {
                self.pending = None;
                self.last_tick = Some(now);
                Some(handle)
            }
            _ => None,
        }
    }
}

impl FrameScheduler for TickScheduler {
    fn request_frame(&mut self) -> FrameHandle {
        self.next_id += 1;
        let handle = FrameHandle::new(self.next_id);
        let now = Instant::now();
        let due = match self.last_tick {
            Some(last) => (last + self.interval).max(now),
            None => now,
        };
        if let Some((previous, _)) = self.pending.replace((handle, due)) {
            warn!("frame {} replaced by {}", previous.id(), handle.id());
        }
        handle
    }

    fn cancel_frame(&mut self, handle: FrameHandle) {
        if self.pending.is_some_and(|(pending, _)| pending == handle) {
            self.pending = None;
        }
    }
}
