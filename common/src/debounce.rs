//! Trailing-edge [`Debouncer`].

use std::time::{Duration, Instant};

/// Collapses rapid calls into a single trailing call: only the last value
/// pushed within the delay window fires, once the window elapses without any
/// newer push.
///
/// Time is passed in explicitly, so the caller decides how to wait.
#[derive(Clone, Debug)]
pub struct Debouncer<T> {
    /// Quiet period required before a pending value fires.
    delay: Duration,

    /// Latest pushed value along with its firing deadline.
    pending: Option<(Instant, T)>,
}

impl<T> Debouncer<T> {
    /// Creates a new [`Debouncer`] with the provided `delay`.
    #[must_use]
    pub const fn new(delay: Duration) -> Self {
        Self {
            delay,
            pending: None,
        }
    }

    /// Pushes a new `value` at the moment `now`, replacing any pending one
    /// and restarting the delay window.
    pub fn push(&mut self, now: Instant, value: T) {
        self.pending = Some((now + self.delay, value));
    }

    /// Returns the deadline of the pending value, if any.
    #[must_use]
    pub fn deadline(&self) -> Option<Instant> {
        self.pending.as_ref().map(|(at, _)| *at)
    }

    /// Takes the pending value if its window has elapsed at the moment `now`.
    pub fn poll(&mut self, now: Instant) -> Option<T> {
        match &self.pending {
            Some((at, _)) if *at <= now => self.pending.take().map(|(_, v)| v),
            Some(_) | None => None,
        }
    }

    /// Takes the pending value immediately, regardless of its deadline.
    pub fn flush(&mut self) -> Option<T> {
        self.pending.take().map(|(_, v)| v)
    }
}

#[cfg(test)]
mod spec {
    use std::time::{Duration, Instant};

    use super::Debouncer;

    const DELAY: Duration = Duration::from_millis(500);

    #[test]
    fn fires_only_last_value_after_quiet_window() {
        let start = Instant::now();
        let mut debouncer = Debouncer::new(DELAY);

        debouncer.push(start, "s");
        debouncer.push(start + Duration::from_millis(100), "su");
        debouncer.push(start + Duration::from_millis(200), "sun");

        assert_eq!(debouncer.poll(start + Duration::from_millis(500)), None);
        assert_eq!(
            debouncer.poll(start + Duration::from_millis(700)),
            Some("sun"),
        );
        assert_eq!(debouncer.poll(start + Duration::from_secs(5)), None);
    }

    #[test]
    fn each_push_restarts_window() {
        let start = Instant::now();
        let mut debouncer = Debouncer::new(DELAY);

        debouncer.push(start, 1);
        assert_eq!(debouncer.deadline(), Some(start + DELAY));

        debouncer.push(start + Duration::from_millis(400), 2);
        assert_eq!(
            debouncer.deadline(),
            Some(start + Duration::from_millis(900)),
        );
        assert_eq!(debouncer.poll(start + DELAY), None);
    }

    #[test]
    fn flush_takes_pending_value() {
        let mut debouncer = Debouncer::new(DELAY);
        assert_eq!(debouncer.flush(), None::<u8>);

        debouncer.push(Instant::now(), 3);
        assert_eq!(debouncer.flush(), Some(3));
        assert_eq!(debouncer.deadline(), None);
    }
}
