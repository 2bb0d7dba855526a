//! Cooperative cancellation shared by the render loop and the listener.

use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::mpsc::Sender;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use super::state::WindowEvent;

/// Cloneable cancellation signal.
///
/// Cancelling sets a flag that polling threads check, and wakes every
/// registered render loop by sending [`WindowEvent::Cancelled`].
#[derive(Debug, Clone, Default)]
pub struct CancelToken {
    inner: Arc<Inner>,
}

#[derive(Debug, Default)]
struct Inner {
    cancelled: AtomicBool,
    next_waiter: AtomicU64,
    waiters: Mutex<Vec<(WaiterId, Sender<WindowEvent>)>>,
}

/// Handle for a channel registered with [`CancelToken::notify`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WaiterId(u64);

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }

    /// Signal cancellation. Only the first call has any effect.
    pub fn cancel(&self) {
        if self.inner.cancelled.swap(true, Ordering::AcqRel) {
            return;
        }
        let mut waiters = self.waiters();
        for (_, waiter) in waiters.drain(..) {
            // A closed channel means that loop already exited.
            let _ = waiter.send(WindowEvent::Cancelled);
        }
    }

    pub fn is_cancelled(&self) -> bool {
        self.inner.cancelled.load(Ordering::Acquire)
    }

    /// Deliver `Cancelled` to `events` when the token fires, or right away
    /// if it already has.
    ///
    /// The token keeps `events` alive until it fires or [`CancelToken::forget`]
    /// is called with the returned id.
    pub fn notify(&self, events: Sender<WindowEvent>) -> WaiterId {
        let id = WaiterId(self.inner.next_waiter.fetch_add(1, Ordering::Relaxed));
        let mut waiters = self.waiters();
        if self.is_cancelled() {
            let _ = events.send(WindowEvent::Cancelled);
        } else {
            waiters.push((id, events));
        }
        id
    }

    /// Drop the channel registered under `id`. No-op if it is already gone.
    pub fn forget(&self, id: WaiterId) {
        self.waiters().retain(|(waiter, _)| *waiter != id);
    }

    #[cfg(test)]
    pub(crate) fn waiting(&self) -> usize {
        self.waiters().len()
    }

    fn waiters(&self) -> MutexGuard<'_, Vec<(WaiterId, Sender<WindowEvent>)>> {
        self.inner
            .waiters
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }
}
