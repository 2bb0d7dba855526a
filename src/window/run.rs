//! The window controller: owns the canvas and drives redraws.
//!
//! Architecture: one channel, two producers.
//! - The size provider's listener thread sends `Resize` events
//! - The cancellation token sends `Cancelled`
//! The render loop is the only consumer and the only code that touches
//! the canvas. It also watches the listener thread, so a listener that dies
//! ends rendering instead of leaving the loop waiting forever.

use std::io::{self, Write};
use std::ops::ControlFlow;
use std::sync::mpsc::{self, Receiver, RecvTimeoutError, Sender};
use std::time::Duration;

use crossterm::QueueableCommand;
use crossterm::cursor::MoveTo;
use log::{debug, info, warn};

use crate::element::Element;
use crate::error::{Error, Result};
use crate::geometry::Geometry;
use crate::layout::Layout;
use crate::raster::draw_all;
use crate::terminal::{SizeProvider, Subscription, TerminalSize};

use super::cancel::CancelToken;
use super::state::{Phase, WindowEvent, WindowOptions};

/// How often an idle render loop checks that its listener is still alive.
const LISTENER_CHECK_INTERVAL: Duration = Duration::from_millis(100);

/// A terminal-sized canvas and the elements painted onto it.
#[derive(Debug)]
pub struct Window<W: Write> {
    geometry: Geometry,
    canvas: Vec<u8>,
    elements: Vec<Element>,
    sink: W,
    options: WindowOptions,
    phase: Phase,
}

impl Window<io::Stdout> {
    /// Window over the current stdout terminal with the demonstration layout.
    ///
    /// # Errors
    /// [`Error::SizeQuery`] if stdout's size cannot be read.
    pub fn new() -> Result<Self> {
        let geometry = TerminalSize::stdout().query()?;
        Ok(Window::with_elements(
            geometry,
            Layout::demo().elements,
            io::stdout(),
        ))
    }
}

impl<W: Write> Window<W> {
    pub fn with_elements(geometry: Geometry, elements: Vec<Element>, sink: W) -> Self {
        Self {
            geometry,
            canvas: geometry.canvas(),
            elements,
            sink,
            options: WindowOptions::default(),
            phase: Phase::Idle,
        }
    }

    pub fn options(mut self, options: WindowOptions) -> Self {
        self.options = options;
        self
    }

    pub fn geometry(&self) -> Geometry {
        self.geometry
    }

    pub fn canvas(&self) -> &[u8] {
        &self.canvas
    }

    pub fn elements(&self) -> &[Element] {
        &self.elements
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn sink(&self) -> &W {
        &self.sink
    }

    pub fn into_sink(self) -> W {
        self.sink
    }

    /// Draw every element into the canvas and flush it to the sink.
    pub fn draw(&mut self) -> Result<()> {
        draw_all(&self.elements, &mut self.canvas, &self.geometry)?;
        self.sink.write_all(&self.canvas)?;
        self.sink.flush()?;
        Ok(())
    }

    /// Draw once, then follow `provider`'s resizes until `cancel` fires.
    ///
    /// The listener is released before returning, on success and on error,
    /// and `cancel` no longer holds on to this window's channel.
    ///
    /// # Errors
    /// - [`Error::NotIdle`] if the window has already rendered
    /// - [`Error::Draw`] or [`Error::Io`] from the initial draw, or from a
    ///   redraw when [`WindowOptions::redraw_on_resize`] is set
    /// - [`Error::ListenerExited`] if the listener thread ends before `cancel`
    /// - whatever `provider.subscribe` reports
    pub fn render<P: SizeProvider>(&mut self, provider: &P, cancel: &CancelToken) -> Result<()> {
        if self.phase != Phase::Idle {
            return Err(Error::NotIdle(self.phase));
        }
        self.phase = Phase::Closed;

        let (tx, rx) = mpsc::channel();
        let waiter = cancel.notify(tx.clone());
        let result = self.run_subscribed(provider, cancel, tx, &rx);
        cancel.forget(waiter);

        self.phase = Phase::Closed;
        info!("rendering stopped");
        result
    }

    fn run_subscribed<P: SizeProvider>(
        &mut self,
        provider: &P,
        cancel: &CancelToken,
        tx: Sender<WindowEvent>,
        rx: &Receiver<WindowEvent>,
    ) -> Result<()> {
        let subscription = provider.subscribe(tx, cancel.clone())?;

        info!("rendering {} elements at {}", self.elements.len(), self.geometry);
        self.draw()?;
        self.phase = Phase::Rendering;

        let result = self.event_loop(rx, &subscription);
        subscription.stop();
        result
    }

    fn event_loop(
        &mut self,
        events: &Receiver<WindowEvent>,
        subscription: &Subscription,
    ) -> Result<()> {
        loop {
            match events.recv_timeout(LISTENER_CHECK_INTERVAL) {
                Ok(event) => {
                    if self.handle(event)?.is_break() {
                        return Ok(());
                    }
                }
                Err(RecvTimeoutError::Timeout) if subscription.is_finished() => {
                    // Whatever it sent before exiting still counts.
                    while let Ok(event) = events.try_recv() {
                        if self.handle(event)?.is_break() {
                            return Ok(());
                        }
                    }
                    warn!("resize listener exited while rendering");
                    return Err(Error::ListenerExited);
                }
                Err(RecvTimeoutError::Timeout) => {}
                // Every producer is gone: nothing left to wait for.
                Err(RecvTimeoutError::Disconnected) => return Ok(()),
            }
        }
    }

    fn handle(&mut self, event: WindowEvent) -> Result<ControlFlow<()>> {
        match event {
            WindowEvent::Resize(geometry) => {
                self.resize(geometry)?;
                Ok(ControlFlow::Continue(()))
            }
            WindowEvent::Cancelled => Ok(ControlFlow::Break(())),
        }
    }

    fn resize(&mut self, geometry: Geometry) -> Result<()> {
        debug!("window size changed: {} -> {}", self.geometry, geometry);
        self.geometry = geometry;

        if self.options.redraw_on_resize {
            self.canvas = geometry.canvas();
            self.sink.queue(MoveTo(0, 0))?;
            self.draw()?;
        }
        Ok(())
    }
}

// ============================================================================
// TESTS
// ============================================================================
