//! Terminal size from the OS, resize notifications from crossterm.
//!
//! The size itself always comes from `ioctl(TIOCGWINSZ)` on a file
//! descriptor. Resize events only tell the listener when to ask again.

use std::io;
use std::os::fd::{AsRawFd, RawFd};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::Sender;
use std::thread;
use std::time::Duration;

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use log::{debug, warn};

use crate::error::{Error, Result};
use crate::geometry::Geometry;
use crate::window::{CancelToken, WindowEvent};

use super::provider::{SizeProvider, Subscription};

/// How long the listener waits for a terminal event before rechecking
/// whether it should stop.
const POLL_INTERVAL: Duration = Duration::from_millis(50);

/// Size provider backed by a terminal file descriptor.
#[derive(Debug, Clone, Copy)]
pub struct TerminalSize {
    fd: RawFd,
}

impl TerminalSize {
    pub fn new(fd: RawFd) -> Self {
        Self { fd }
    }

    /// Provider for the process's standard output.
    pub fn stdout() -> Self {
        Self::new(io::stdout().as_raw_fd())
    }
}

impl SizeProvider for TerminalSize {
    fn query(&self) -> Result<Geometry> {
        query_fd(self.fd).map_err(Error::SizeQuery)
    }

    fn subscribe(&self, events: Sender<WindowEvent>, cancel: CancelToken) -> Result<Subscription> {
        let stop = Arc::new(AtomicBool::new(false));
        let fd = self.fd;

        let handle = {
            let stop = Arc::clone(&stop);
            thread::Builder::new()
                .name("resize-listener".into())
                .spawn(move || listen(fd, &events, &cancel, &stop))?
        };

        Ok(Subscription::new(stop, handle))
    }
}

/// Ask the kernel for the window size behind `fd`.
pub fn query_fd(fd: RawFd) -> io::Result<Geometry> {
    // SAFETY: winsize is plain old data and TIOCGWINSZ only writes into it.
    let mut ws: libc::winsize = unsafe { std::mem::zeroed() };
    let result = unsafe { libc::ioctl(fd, libc::TIOCGWINSZ, &mut ws) };
    if result == -1 {
        return Err(io::Error::last_os_error());
    }
    Ok(Geometry::new(usize::from(ws.ws_row), usize::from(ws.ws_col)))
}

/// Whether `key` asks to stop rendering.
///
/// Raw mode turns Ctrl+C into a key event instead of SIGINT.
pub fn is_quit_key(key: KeyEvent) -> bool {
    if key.kind != KeyEventKind::Press {
        return false;
    }
    match key.code {
        KeyCode::Char('c') => key.modifiers.contains(KeyModifiers::CONTROL),
        KeyCode::Char('q') => true,
        _ => false,
    }
}

// ============================================================================
// LISTENER
// ============================================================================

/// Wait up to `timeout` for the next terminal event.
fn next_terminal_event(timeout: Duration) -> io::Result<Option<Event>> {
    if event::poll(timeout)? {
        event::read().map(Some)
    } else {
        Ok(None)
    }
}

fn listen(fd: RawFd, events: &Sender<WindowEvent>, cancel: &CancelToken, stop: &AtomicBool) {
    listen_with(next_terminal_event, || query_fd(fd), events, cancel, stop);
}

/// Forward resizes until stopped, cancelled, or the window goes away.
///
/// A failed size query keeps the previous size and listening continues.
/// A failed event source ends the listener; the window notices the thread
/// is gone.
fn listen_with<E, Q>(
    mut next_event: E,
    query: Q,
    events: &Sender<WindowEvent>,
    cancel: &CancelToken,
    stop: &AtomicBool,
) where
    E: FnMut(Duration) -> io::Result<Option<Event>>,
    Q: Fn() -> io::Result<Geometry>,
{
    debug!("resize listener started");

    while !stop.load(Ordering::Acquire) && !cancel.is_cancelled() {
        match next_event(POLL_INTERVAL) {
            Ok(Some(Event::Resize(cols, rows))) => {
                debug!("resize notification: {}x{}", cols, rows);
                match query() {
                    Ok(geometry) => {
                        if events.send(WindowEvent::Resize(geometry)).is_err() {
                            break; // window is gone
                        }
                    }
                    Err(e) => warn!("terminal size query failed, keeping previous size: {}", e),
                }
            }
            Ok(Some(Event::Key(key))) if is_quit_key(key) => cancel.cancel(),
            Ok(_) => {}
            Err(e) => {
                warn!("terminal event source failed: {}", e);
                break;
            }
        }
    }

    debug!("resize listener stopped");
}
