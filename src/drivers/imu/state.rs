//! State shared between the acquisition loop and the accessors.

use core::cell::RefCell;
use core::future::poll_fn;
use core::task::Poll;

use embassy_sync::blocking_mutex::{raw::CriticalSectionRawMutex, Mutex};
use embassy_sync::signal::Signal;
use embassy_sync::waitqueue::MultiWakerRegistration;

use super::convert::Sample;
use super::error::{Error, TransportError};
use super::window::ErrorWindow;

/// Transactions remembered by the fault tracker
pub const FAULT_WINDOW: usize = 10;
/// Failures within the window that make the sensor report a fault
pub const FAULT_THRESHOLD: usize = 5;
/// Concurrent `close` callers tracked before they are woken early to re-register
const CLOSE_WAITERS: usize = 4;

pub(crate) struct Shared {
    pub(crate) sample: Sample,
    pub(crate) errors: ErrorWindow<TransportError, FAULT_WINDOW>,
    pub(crate) closed: bool,
    /// Set by the runner once its loop has exited; never cleared until reset
    pub(crate) stopped: bool,
    stop_waiters: MultiWakerRegistration<CLOSE_WAITERS>,
}

impl Shared {
    const fn new() -> Self {
        Self {
            sample: Sample::ZERO,
            errors: ErrorWindow::new(FAULT_THRESHOLD),
            closed: false,
            stopped: false,
            stop_waiters: MultiWakerRegistration::new(),
        }
    }
}

/// Storage for one sensor instance.
///
/// The latest sample and the fault tracker sit behind a single critical-section
/// mutex, so a reader always sees a whole sample together with the verdict that
/// was current when it was published. Nothing in here is held across an await.
///
/// ```ignore
/// static STATE: State = State::new();
/// ```
pub struct State {
    shared: Mutex<CriticalSectionRawMutex, RefCell<Shared>>,
    /// Raised by `close` to stop the runner
    pub(crate) stop: Signal<CriticalSectionRawMutex, ()>,
}

impl State {
    pub const fn new() -> Self {
        Self {
            shared: Mutex::new(RefCell::new(Shared::new())),
            stop: Signal::new(),
        }
    }

    pub(crate) fn with<R>(&self, f: impl FnOnce(&mut Shared) -> R) -> R {
        self.shared.lock(|cell| f(&mut *cell.borrow_mut()))
    }

    /// Forget everything from a previous sensor instance.
    pub(crate) fn reset(&self) {
        self.with(|shared| *shared = Shared::new());
        self.stop.reset();
    }

    /// Called by the runner on its way out. Wakes every pending `wait_stopped`.
    pub(crate) fn mark_stopped(&self) {
        self.with(|shared| {
            shared.stopped = true;
            shared.stop_waiters.wake();
        });
    }

    /// Resolve once the runner has exited. Any number of callers may wait.
    pub(crate) async fn wait_stopped(&self) {
        poll_fn(|cx| {
            self.with(|shared| {
                if shared.stopped {
                    Poll::Ready(())
                } else {
                    shared.stop_waiters.register(cx.waker());
                    Poll::Pending
                }
            })
        })
        .await
    }

    /// Replace the published sample and record a successful transaction.
    pub(crate) fn publish(&self, sample: Sample) {
        self.with(|shared| {
            shared.sample = sample;
            shared.errors.record(Ok(()));
        });
    }

    /// Record a failed transaction, keeping the previous sample.
    pub(crate) fn record_failure(&self, error: TransportError) {
        self.with(|shared| shared.errors.record(Err(error)));
    }

    /// The latest sample and, if the fault threshold is reached, the fault.
    pub(crate) fn snapshot(&self) -> (Sample, Option<Error>) {
        self.with(|shared| (shared.sample, shared.errors.fault().map(Error::Faulted)))
    }
}

impl Default for State {
    fn default() -> Self {
        Self::new()
    }
}
