//! Terminal boundary: size queries, resize notifications, session setup.
//!
//! - `provider`: the `SizeProvider` trait and the `Subscription` guard
//! - `size`: the ioctl/crossterm-backed provider
//! - `session`: raw mode and alternate screen for the binary

pub mod provider;
pub mod session;
pub mod size;

pub use provider::{SizeProvider, Subscription};
pub use session::TerminalSession;
pub use size::{TerminalSize, is_quit_key, query_fd};
