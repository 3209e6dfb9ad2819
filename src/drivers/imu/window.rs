//! Windowed fault tracking.
//!
//! On a loaded board the I2C bus drops the odd transaction. Rather than surfacing
//! each one, the driver keeps the outcomes of its last `N` transactions and only
//! reports a fault once at least `threshold` of them failed.

use heapless::HistoryBuf;

/// Outcomes of the most recent `N` attempts.
#[derive(Debug, Clone)]
pub struct ErrorWindow<E, const N: usize> {
    /// `None` for a success; the oldest outcome is overwritten once full
    outcomes: HistoryBuf<Option<E>, N>,
    threshold: usize,
}

impl<E: Copy, const N: usize> ErrorWindow<E, N> {
    /// Window reporting a fault once `threshold` of the last `N` attempts failed.
    pub const fn new(threshold: usize) -> Self {
        Self {
            outcomes: HistoryBuf::new(),
            threshold,
        }
    }

    /// Record the outcome of one attempt, evicting the oldest once the window is full.
    pub fn record(&mut self, outcome: Result<(), E>) {
        self.outcomes.write(outcome.err());
    }

    /// Failures currently in the window
    pub fn failures(&self) -> usize {
        self.outcomes.as_slice().iter().filter(|outcome| outcome.is_some()).count()
    }

    pub fn is_faulted(&self) -> bool {
        self.failures() >= self.threshold
    }

    /// The most recent failure, if the window is faulted.
    pub fn fault(&self) -> Option<E> {
        if !self.is_faulted() {
            return None;
        }
        self.outcomes.oldest_ordered().filter_map(|outcome| *outcome).last()
    }
}
