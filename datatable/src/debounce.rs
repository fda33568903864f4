//! Cancellable debounce timer for search input.
//!
//! The timer holds at most one pending value. Scheduling again replaces the
//! value and restarts the window, so the last keystroke wins. Nothing runs in
//! the background: the owner polls with the current time, and an event loop
//! can wait for [`Debouncer::deadline`] with [`sleep_until_optional`]. A
//! cancelled or dropped debouncer can therefore never fire.

use log::trace;
use tokio::time::{Duration, Instant, sleep_until};

/// Quiet period before a search edit settles.
pub const DEFAULT_SEARCH_DEBOUNCE: Duration = Duration::from_millis(300);

#[derive(Debug)]
pub struct Debouncer<T> {
    window: Duration,
    pending: Option<(T, Instant)>,
}

impl<T> Debouncer<T> {
    pub fn new(window: Duration) -> Self {
        Self {
            window,
            pending: None,
        }
    }

    /// The quiet period.
    pub fn window(&self) -> Duration {
        self.window
    }

    /// Schedule `value` to settle one window after `now`.
    ///
    /// Returns `true` if a pending value was replaced.
    pub fn schedule(&mut self, value: T, now: Instant) -> bool {
        let replaced = self.pending.is_some();
        if replaced {
            trace!("Debounce restarted");
        }
        self.pending = Some((value, now + self.window));
        replaced
    }

    /// Cancel the pending value, returning it.
    pub fn cancel(&mut self) -> Option<T> {
        self.pending.take().map(|(value, _)| value)
    }

    /// When the pending value settles.
    pub fn deadline(&self) -> Option<Instant> {
        self.pending.as_ref().map(|(_, deadline)| *deadline)
    }

    /// Returns `true` if a value is waiting to settle.
    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// Take the pending value if its window has elapsed at `now`.
    pub fn poll(&mut self, now: Instant) -> Option<T> {
        let due = self.deadline().is_some_and(|deadline| now >= deadline);
        if due {
            self.cancel()
        } else {
            None
        }
    }
}

impl<T> Default for Debouncer<T> {
    fn default() -> Self {
        Self::new(DEFAULT_SEARCH_DEBOUNCE)
    }
}

/// Sleep until a deadline, or wait forever if None.
/// Meant as a branch of `tokio::select!` next to the input source.
pub async fn sleep_until_optional(deadline: Option<Instant>) {
    match deadline {
        Some(d) => sleep_until(d).await,
        None => std::future::pending::<()>().await,
    }
}
