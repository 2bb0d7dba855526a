//! The seam between the window and whatever reports terminal dimensions.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::Sender;
use std::thread::JoinHandle;

use log::warn;

use crate::error::Result;
use crate::geometry::Geometry;
use crate::window::{CancelToken, WindowEvent};

/// Source of terminal dimensions.
pub trait SizeProvider {
    /// Current size of the terminal.
    ///
    /// # Errors
    /// [`crate::Error::SizeQuery`] if the OS refuses the query.
    fn query(&self) -> Result<Geometry>;

    /// Start pushing [`WindowEvent::Resize`] into `events` whenever the
    /// terminal is resized, until `cancel` fires or the returned
    /// subscription is dropped.
    fn subscribe(&self, events: Sender<WindowEvent>, cancel: CancelToken) -> Result<Subscription>;
}

/// A running resize listener. Dropping it stops and joins the listener.
#[derive(Debug)]
pub struct Subscription {
    stop: Arc<AtomicBool>,
    handle: Option<JoinHandle<()>>,
}

impl Subscription {
    /// Own a listener thread that polls `stop`.
    pub fn new(stop: Arc<AtomicBool>, handle: JoinHandle<()>) -> Self {
        Self {
            stop,
            handle: Some(handle),
        }
    }

    /// A subscription with no listener behind it.
    pub fn detached() -> Self {
        Self {
            stop: Arc::new(AtomicBool::new(false)),
            handle: None,
        }
    }

    /// Whether the listener thread has exited on its own.
    ///
    /// Always false for a detached subscription.
    pub fn is_finished(&self) -> bool {
        self.handle.as_ref().is_some_and(JoinHandle::is_finished)
    }

    /// Stop the listener and wait for it to exit.
    pub fn stop(mut self) {
        self.release();
    }

    fn release(&mut self) {
        self.stop.store(true, Ordering::Release);
        if let Some(handle) = self.handle.take() {
            if handle.join().is_err() {
                warn!("resize listener panicked");
            }
        }
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        self.release();
    }
}
