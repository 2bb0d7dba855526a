//! Print every terminal size change until 'q' or Ctrl+C.
//! Run with: cargo run --example resize_watch

use std::sync::mpsc;

use termcanvas::CancelToken;
use termcanvas::terminal::{SizeProvider, TerminalSize};
use termcanvas::window::WindowEvent;

fn main() {
    let provider = TerminalSize::stdout();

    match provider.query() {
        Ok(geometry) => println!("Current size: {}", geometry),
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    }

    let cancel = CancelToken::new();
    let (tx, rx) = mpsc::channel();
    cancel.notify(tx.clone());

    let _subscription = match provider.subscribe(tx, cancel.clone()) {
        Ok(s) => s,
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    };

    println!("Resize the terminal; press q then Enter to stop.");
    while let Ok(WindowEvent::Resize(geometry)) = rx.recv() {
        println!("Resized: {}", geometry);
    }
}
