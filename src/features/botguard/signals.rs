//! Interaction signals collected on the registration form. Timestamps are
//! passed in explicitly so the heuristics run the same on any target.

use serde::Serialize;

/// Submits faster than this with zero mouse movement look scripted.
const FAST_SUBMIT_MS: f64 = 2_000.0;

/// Accumulates form signals between open and submit.
#[derive(Clone, Debug)]
pub struct SignalTracker {
    opened_at_ms: f64,
    mouse_moves: u32,
    honeypot: String,
}

impl SignalTracker {
    pub fn opened_at(now_ms: f64) -> Self {
        Self {
            opened_at_ms: now_ms,
            mouse_moves: 0,
            honeypot: String::new(),
        }
    }

    pub fn record_mouse_move(&mut self) {
        self.mouse_moves = self.mouse_moves.saturating_add(1);
    }

    /// The honeypot input is invisible to humans; any value is a signal.
    pub fn set_honeypot(&mut self, value: &str) {
        self.honeypot = value.to_string();
    }

    pub fn elapsed_ms(&self, now_ms: f64) -> f64 {
        (now_ms - self.opened_at_ms).max(0.0)
    }

    pub fn report(&self, now_ms: f64) -> BotReport {
        BotReport {
            elapsed_ms: self.elapsed_ms(now_ms) as u64,
            mouse_moves: self.mouse_moves,
            honeypot_filled: !self.honeypot.trim().is_empty(),
        }
    }
}

/// Snapshot sent to the reporting endpoint at submit time.
#[derive(Clone, Debug, Serialize)]
pub struct BotReport {
    pub elapsed_ms: u64,
    pub mouse_moves: u32,
    pub honeypot_filled: bool,
}

impl BotReport {
    /// Advisory only. The server owns the verdict; nothing client-side may
    /// block registration on this.
    pub fn is_suspicious(&self) -> bool {
        self.honeypot_filled
            || (self.mouse_moves == 0 && (self.elapsed_ms as f64) < FAST_SUBMIT_MS)
    }
}

#[cfg(test)]
mod tests {
    use super::SignalTracker;

    #[test]
    fn filled_honeypot_is_always_suspicious() {
        let mut tracker = SignalTracker::opened_at(1_000.0);
        tracker.record_mouse_move();
        tracker.set_honeypot("sales@example.com");
        let report = tracker.report(60_000.0);
        assert!(report.honeypot_filled);
        assert!(report.is_suspicious());
    }

    #[test]
    fn instant_submit_without_mouse_movement_is_suspicious() {
        let tracker = SignalTracker::opened_at(1_000.0);
        let report = tracker.report(1_500.0);
        assert_eq!(report.elapsed_ms, 500);
        assert_eq!(report.mouse_moves, 0);
        assert!(report.is_suspicious());
    }

    #[test]
    fn ordinary_human_interaction_is_not_flagged() {
        let mut tracker = SignalTracker::opened_at(1_000.0);
        for _ in 0..12 {
            tracker.record_mouse_move();
        }
        let report = tracker.report(9_000.0);
        assert_eq!(report.mouse_moves, 12);
        assert!(!report.is_suspicious());
    }

    #[test]
    fn clock_skew_never_produces_a_negative_elapsed() {
        let tracker = SignalTracker::opened_at(5_000.0);
        assert_eq!(tracker.elapsed_ms(4_000.0), 0.0);
        assert_eq!(tracker.report(4_000.0).elapsed_ms, 0);
    }

    #[test]
    fn whitespace_honeypot_counts_as_empty() {
        let mut tracker = SignalTracker::opened_at(0.0);
        tracker.set_honeypot("   ");
        tracker.record_mouse_move();
        assert!(!tracker.report(10_000.0).honeypot_filled);
    }
}
