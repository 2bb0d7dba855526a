//! Terminal lifecycle: raw mode, alternate screen, cursor visibility.
//!
//! `TerminalSession` is a guard. Entering it prepares the terminal for a
//! full-screen canvas; dropping it restores the terminal, and a panic hook
//! does the same before the panic message is printed.

use std::io;
use std::sync::Once;

use crossterm::ExecutableCommand;
use crossterm::cursor::{Hide, Show};
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use log::warn;

static PANIC_HOOK: Once = Once::new();

/// Active full-screen terminal session.
#[derive(Debug)]
pub struct TerminalSession {
    restore: fn() -> io::Result<()>,
}

impl TerminalSession {
    /// Switch stdout to raw mode on the alternate screen with a hidden cursor.
    ///
    /// If any step after raw mode fails, the terminal is restored before the
    /// error is returned.
    pub fn enter() -> io::Result<Self> {
        install_panic_hook();
        Self::enter_with(enable_raw_mode, enter_full_screen, restore_terminal)
    }

    fn enter_with(
        raw_mode: fn() -> io::Result<()>,
        full_screen: fn() -> io::Result<()>,
        restore: fn() -> io::Result<()>,
    ) -> io::Result<Self> {
        raw_mode()?;
        let session = Self { restore };
        full_screen()?;
        Ok(session)
    }
}

impl Drop for TerminalSession {
    fn drop(&mut self) {
        if let Err(e) = (self.restore)() {
            warn!("failed to restore terminal: {}", e);
        }
    }
}

fn enter_full_screen() -> io::Result<()> {
    let mut stdout = io::stdout();
    stdout.execute(EnterAlternateScreen)?;
    stdout.execute(Hide)?;
    Ok(())
}

/// Put the terminal back the way the shell expects it.
fn restore_terminal() -> io::Result<()> {
    disable_raw_mode()?;
    let mut stdout = io::stdout();
    stdout.execute(Show)?;
    stdout.execute(LeaveAlternateScreen)?;
    Ok(())
}

/// Restore the terminal before the default hook prints a panic.
fn install_panic_hook() {
    PANIC_HOOK.call_once(|| {
        let original_hook = std::panic::take_hook();
        std::panic::set_hook(Box::new(move |panic_info| {
            // Best-effort terminal restoration
            let _ = restore_terminal();
            original_hook(panic_info);
        }));
    });
}
