// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Roster-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Roster and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::time::Duration;

use tokio::time::Instant;

/// Trailing-edge debouncer driven by an explicit clock.
///
/// Every [`push`](Self::push) replaces the pending value and restarts the quiet period, so there
/// is at most one pending timer at any time. [`poll`](Self::poll) hands the value out once the
/// deadline has passed. The owner decides when to poll; [`deadline`](Self::deadline) tells it
/// how long it may sleep.
#[derive(Debug, Clone)]
pub struct Debouncer<T> {
    quiet_period: Duration,
    pending: Option<Pending<T>>,
    generation: u64,
}

#[derive(Debug, Clone)]
struct Pending<T> {
    value: T,
    deadline: Instant,
}

impl<T> Debouncer<T> {
    pub fn new(quiet_period: Duration) -> Self {
        Self { quiet_period, pending: None, generation: 0 }
    }

    pub fn quiet_period(&self) -> Duration {
        self.quiet_period
    }

    /// Number of restarts so far. Each push invalidates the previous pending value.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn push(&mut self, value: T, now: Instant) {
        self.generation = self.generation.wrapping_add(1);
        self.pending = Some(Pending { value, deadline: now + self.quiet_period });
    }

    pub fn deadline(&self) -> Option<Instant> {
        self.pending.as_ref().map(|pending| pending.deadline)
    }

    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    pub fn poll(&mut self, now: Instant) -> Option<T> {
        let due = self.pending.as_ref().is_some_and(|pending| pending.deadline <= now);
        if !due {
            return None;
        }
        self.pending.take().map(|pending| pending.value)
    }

    /// Drops the pending value, if any. Returns whether something was cancelled.
    pub fn cancel(&mut self) -> bool {
        self.pending.take().is_some()
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use tokio::time::Instant;

    use super::Debouncer;

    const QUIET: Duration = Duration::from_millis(350);

    #[test]
    fn nothing_settles_before_quiet_period() {
        let start = Instant::now();
        let mut debouncer = Debouncer::new(QUIET);
        debouncer.push("a", start);

        assert_eq!(debouncer.poll(start + Duration::from_millis(349)), None);
        assert_eq!(debouncer.poll(start + QUIET), Some("a"));
        assert_eq!(debouncer.poll(start + QUIET * 2), None);
    }

    #[test]
    fn rapid_pushes_coalesce_to_last_value() {
        let start = Instant::now();
        let mut debouncer = Debouncer::new(QUIET);

        let mut now = start;
        for value in ["U", "Us", "Use", "User", "User ", "User 1"] {
            debouncer.push(value, now);
            now += Duration::from_millis(100);
            assert_eq!(debouncer.poll(now), None, "settled early on {value:?}");
        }

        assert_eq!(debouncer.generation(), 6);
        let last_push = now - Duration::from_millis(100);
        assert_eq!(debouncer.deadline(), Some(last_push + QUIET));
        assert_eq!(debouncer.poll(last_push + QUIET), Some("User 1"));
        assert!(!debouncer.is_pending());
    }

    #[test]
    fn push_restarts_the_wait() {
        let start = Instant::now();
        let mut debouncer = Debouncer::new(QUIET);
        debouncer.push(1, start);
        debouncer.push(2, start + Duration::from_millis(300));

        assert_eq!(debouncer.poll(start + QUIET), None);
        assert_eq!(debouncer.poll(start + Duration::from_millis(650)), Some(2));
    }

    #[test]
    fn cancel_drops_pending_value() {
        let start = Instant::now();
        let mut debouncer = Debouncer::new(QUIET);
        debouncer.push("x", start);

        assert!(debouncer.cancel());
        assert!(!debouncer.cancel());
        assert_eq!(debouncer.deadline(), None);
        assert_eq!(debouncer.poll(start + QUIET), None);
    }

    #[test]
    fn zero_quiet_period_settles_on_next_poll() {
        let start = Instant::now();
        let mut debouncer = Debouncer::new(Duration::ZERO);
        debouncer.push("now", start);
        assert_eq!(debouncer.poll(start), Some("now"));
    }
}
