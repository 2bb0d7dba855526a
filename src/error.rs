//! Error types for termcanvas.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

use crate::window::Phase;

/// Why an element could not be rasterized.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DrawError {
    /// The canvas is empty or the geometry has no row size.
    #[error("canvas not set")]
    CanvasNotSet,

    /// The element's bottom edge lies below the last canvas row.
    #[error("element does not fit in the window: bottom edge {bottom} exceeds {rows} rows")]
    DoesNotFitVertically { bottom: usize, rows: usize },

    /// The element's right edge lies past the end of the row.
    #[error("element does not fit in the row: right edge {right} exceeds {cols} columns")]
    DoesNotFitHorizontally { right: usize, cols: usize },
}

/// Crate error type.
#[derive(Error, Debug)]
pub enum Error {
    #[error(transparent)]
    Draw(#[from] DrawError),

    /// The OS refused to report the terminal size.
    #[error("failed to query terminal size: {0}")]
    SizeQuery(#[source] io::Error),

    /// Writing to the output sink or spawning the listener failed.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("failed to read layout {}: {source}", .path.display())]
    LayoutRead {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("invalid layout {}: {source}", .path.display())]
    LayoutParse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// Serializing a layout or snapshot to JSON failed.
    #[error("failed to serialize JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// The resize listener exited while the window was still rendering.
    #[error("resize listener stopped unexpectedly")]
    ListenerExited,

    /// `render` was called on a window that is not idle.
    #[error("window is {0}, expected idle")]
    NotIdle(Phase),
}

/// Result type for termcanvas operations.
pub type Result<T> = std::result::Result<T, Error>;
