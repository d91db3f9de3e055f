use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

/// Quiet period after the last keystroke before a list search runs.
pub const DEFAULT_SEARCH_DEBOUNCE: Duration = Duration::from_millis(300);

/// Handed out by `Debouncer::schedule`; only the newest ticket fires.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DebounceTicket(u64);

/// Generation-counting debouncer. Scheduling bumps the generation, which
/// cancels every wait started for an older ticket.
#[derive(Debug, Clone)]
pub struct Debouncer {
    generation: Arc<AtomicU64>,
    quiet: Duration,
}

impl Debouncer {
    pub fn new(quiet: Duration) -> Self {
        Self {
            generation: Arc::new(AtomicU64::new(0)),
            quiet,
        }
    }

    pub fn schedule(&self) -> DebounceTicket {
        DebounceTicket(self.generation.fetch_add(1, Ordering::SeqCst) + 1)
    }

    pub fn is_current(&self, ticket: DebounceTicket) -> bool {
        self.generation.load(Ordering::SeqCst) == ticket.0
    }

    /// Sleeps for the quiet period and reports whether `ticket` is still
    /// the newest one.
    pub async fn settle(&self, ticket: DebounceTicket) -> bool {
        tokio::time::sleep(self.quiet).await;
        self.is_current(ticket)
    }
}

impl Default for Debouncer {
    fn default() -> Self {
        Self::new(DEFAULT_SEARCH_DEBOUNCE)
    }
}
