use std::sync::atomic::{AtomicU64, Ordering};

/// First id handed out by a fresh counter.
pub const SYNC_ID_START: u64 = 233;
/// Largest id issued before the counter wraps to 0.
pub const SYNC_ID_CEILING: u64 = 100_000_000;

/// Monotonic sync id source, shared by all callers of one session.
#[derive(Debug)]
pub struct SyncIds {
    next: AtomicU64,
}

impl Default for SyncIds {
    fn default() -> Self {
        Self::new()
    }
}

impl SyncIds {
    pub fn new() -> Self {
        Self::starting_at(SYNC_ID_START)
    }

    pub fn starting_at(start: u64) -> Self {
        Self {
            next: AtomicU64::new(start),
        }
    }

    /// Return the current id and advance; after `SYNC_ID_CEILING` comes 0.
    pub fn issue(&self) -> u64 {
        let step = |cur: u64| Some(if cur >= SYNC_ID_CEILING { 0 } else { cur + 1 });
        match self.next.fetch_update(Ordering::Relaxed, Ordering::Relaxed, step) {
            Ok(id) | Err(id) => id,
        }
    }
}
