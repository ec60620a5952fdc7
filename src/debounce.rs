//! # Settling-Window Debouncer
//!
//! Context updates can arrive in bursts (a slider being dragged, a noisy
//! sensor). Evaluating every one of them is wasted work, so the caller holds
//! each new context for a short settling window and only evaluates it once no
//! newer context has arrived in the meantime.
//!
//! ## Semantics
//!
//! - [`Debouncer::submit`] replaces any pending value and restarts the window.
//! - [`Debouncer::poll`] hands the pending value out once its window elapsed.
//! - Every submission gets a [`Ticket`]; [`Debouncer::is_current`] tells a
//!   caller whether a result computed for that ticket is still the latest or
//!   should be discarded.
//!
//! Time is always passed in explicitly, which keeps the state machine free of
//! clocks and trivially testable.
//!
//! ```text
//!   submit(a)   submit(b)          window elapsed
//!  ----|-----------|------------------------|------>
//!      Analyzing   Analyzing (a dropped)    poll() -> b, Active
//! ```

use std::time::{Duration, Instant};

/// Settling window observed in the interactive dashboard.
pub const DEFAULT_SETTLE_WINDOW: Duration = Duration::from_millis(400);

/// Identifies one submission. Later submissions have larger tickets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Ticket(u64);

/// What a status indicator should show.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EngineStatus {
    /// A context is waiting for its window to elapse.
    Analyzing,
    /// Nothing pending; the last result is current.
    Active,
}

impl EngineStatus {
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            EngineStatus::Analyzing => "Analyzing Context...",
            EngineStatus::Active => "System Active",
        }
    }
}

#[derive(Debug)]
struct Pending<T> {
    value: T,
    ticket: Ticket,
    submitted_at: Instant,
}

/// Last-value-wins debouncer.
#[derive(Debug)]
pub struct Debouncer<T> {
    window: Duration,
    pending: Option<Pending<T>>,
    latest: Option<Ticket>,
    next_ticket: u64,
}

impl<T> Debouncer<T> {
    #[must_use]
    pub fn new(window: Duration) -> Self {
        Self {
            window,
            pending: None,
            latest: None,
            next_ticket: 0,
        }
    }

    #[must_use]
    pub fn window(&self) -> Duration {
        self.window
    }

    /// Queue `value`, superseding anything still pending.
    pub fn submit(&mut self, value: T, now: Instant) -> Ticket {
        let ticket = Ticket(self.next_ticket);
        self.next_ticket += 1;

        if let Some(previous) = self.pending.replace(Pending {
            value,
            ticket,
            submitted_at: now,
        }) {
            log::trace!("Ticket {:?} superseded by {:?}", previous.ticket, ticket);
        }
        self.latest = Some(ticket);
        ticket
    }

    /// When the pending value becomes ready, if there is one.
    #[must_use]
    pub fn deadline(&self) -> Option<Instant> {
        self.pending
            .as_ref()
            .map(|pending| pending.submitted_at + self.window)
    }

    /// Take the pending value if its window has elapsed at `now`.
    pub fn poll(&mut self, now: Instant) -> Option<(Ticket, T)> {
        match self.deadline() {
            Some(deadline) if now >= deadline => self.flush(),
            _ => None,
        }
    }

    /// Take the pending value immediately, ignoring the window.
    pub fn flush(&mut self) -> Option<(Ticket, T)> {
        self.pending.take().map(|pending| (pending.ticket, pending.value))
    }

    #[must_use]
    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    #[must_use]
    pub fn status(&self) -> EngineStatus {
        if self.is_pending() {
            EngineStatus::Analyzing
        } else {
            EngineStatus::Active
        }
    }

    /// Whether `ticket` is the most recent submission.
    #[must_use]
    pub fn is_current(&self, ticket: Ticket) -> bool {
        self.latest == Some(ticket)
    }
}

impl<T> Default for Debouncer<T> {
    fn default() -> Self {
        Self::new(DEFAULT_SETTLE_WINDOW)
    }
}
