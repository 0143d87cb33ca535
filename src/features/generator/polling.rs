//! Liveness bookkeeping for the dashboard's job poll. At most one poll
//! loop may be live per registry: starting a new one kills the previous
//! loop's token, and teardown kills whichever is current.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

/// Interval between job-status probes.
pub const POLL_INTERVAL_MS: u32 = 1_000;

/// Handed to a poll loop; the loop must exit once the token dies.
#[derive(Clone, Debug)]
pub struct PollToken {
    live: Arc<AtomicBool>,
}

impl PollToken {
    pub fn is_live(&self) -> bool {
        self.live.load(Ordering::Relaxed)
    }
}

#[derive(Clone, Debug, Default)]
pub struct PollRegistry {
    current: Arc<Mutex<Option<Arc<AtomicBool>>>>,
}

impl PollRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a fresh poll, killing any loop still holding the previous
    /// token.
    pub fn begin(&self) -> PollToken {
        let live = Arc::new(AtomicBool::new(true));
        if let Ok(mut current) = self.current.lock() {
            if let Some(previous) = current.replace(live.clone()) {
                previous.store(false, Ordering::Relaxed);
            }
        }
        PollToken { live }
    }

    /// Kills the current poll, if any.
    pub fn stop(&self) {
        if let Ok(mut current) = self.current.lock() {
            if let Some(previous) = current.take() {
                previous.store(false, Ordering::Relaxed);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::PollRegistry;

    #[test]
    fn starting_a_new_poll_kills_the_previous_one() {
        let registry = PollRegistry::new();
        let first = registry.begin();
        assert!(first.is_live());

        let second = registry.begin();
        assert!(!first.is_live());
        assert!(second.is_live());
    }

    #[test]
    fn stop_kills_the_current_poll_and_is_idempotent() {
        let registry = PollRegistry::new();
        let token = registry.begin();
        registry.stop();
        assert!(!token.is_live());
        registry.stop();

        let next = registry.begin();
        assert!(next.is_live());
    }
}
