//! Window controller: canvas ownership and the resize-driven render loop.
//!
//! Organized the same way as the rest of the crate's effect boundaries:
//! - `state`: events, phases and options (pure data)
//! - `cancel`: the cancellation token shared with listener threads
//! - `run`: the `Window` itself and its event loop

pub mod cancel;
pub mod run;
pub mod state;

pub use cancel::{CancelToken, WaiterId};
pub use run::Window;
pub use state::{Phase, WindowEvent, WindowOptions};
