//! termcanvas: rasterize colored text elements onto a terminal-sized byte
//! canvas and keep it in step with terminal resizes.

pub mod color;
pub mod element;
pub mod error;
pub mod geometry;
pub mod layout;
pub mod raster;
pub mod snapshot;
pub mod terminal;
pub mod window;

pub use color::Color;
pub use element::{Element, Overflow};
pub use error::{DrawError, Error, Result};
pub use geometry::Geometry;
pub use layout::Layout;
pub use window::{CancelToken, Window, WindowOptions};
