//! Window state algebra: events, lifecycle phases, options.

use crate::geometry::Geometry;

// ============================================================================
// EVENTS
// ============================================================================

/// Everything the render loop can receive from its channel.
///
/// Two producers feed the channel:
/// - the size provider's listener sends `Resize`
/// - the cancellation token sends `Cancelled`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WindowEvent {
    /// The terminal now has this geometry.
    Resize(Geometry),
    /// Rendering should stop.
    Cancelled,
}

// ============================================================================
// LIFECYCLE
// ============================================================================

/// Where a window is in its lifecycle. Transitions only move forward.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Phase {
    /// Constructed, nothing drawn by `render` yet.
    #[default]
    Idle,
    /// Initial draw done, event loop running.
    Rendering,
    /// Loop exited or startup failed.
    Closed,
}

impl std::fmt::Display for Phase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Phase::Idle => write!(f, "idle"),
            Phase::Rendering => write!(f, "rendering"),
            Phase::Closed => write!(f, "closed"),
        }
    }
}

// ============================================================================
// OPTIONS
// ============================================================================

/// Behavior knobs for [`super::Window`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct WindowOptions {
    /// Reallocate, redraw and flush the canvas for every new geometry.
    /// When false, resizes only update the recorded geometry.
    pub redraw_on_resize: bool,
}
