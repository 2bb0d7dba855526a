//! Draw a small layout into an in-memory canvas and print it readably.
//! Run with: cargo run --example snapshot [rows] [cols]

use std::env;

use termcanvas::raster::draw_all;
use termcanvas::snapshot::{OutputFormat, format_canvas};
use termcanvas::{Color, Element, Geometry};

fn main() {
    let args: Vec<String> = env::args().collect();
    let rows = args.get(1).and_then(|s| s.parse().ok()).unwrap_or(6);
    let cols = args.get(2).and_then(|s| s.parse().ok()).unwrap_or(24);

    let geometry = Geometry::new(rows, cols);
    let mut canvas = geometry.canvas();

    let elements = [
        Element::new("header").sized(0, 1).colored(Color::BgBlue),
        Element::new("padded\nbox")
            .at(1, 2)
            .sized(10, 4)
            .colored(Color::BgGreen)
            .padded(),
        Element::new("wraps onto the next row")
            .at(12, 2)
            .sized(8, 3)
            .colored(Color::FgYellow),
    ];

    if let Err(e) = draw_all(&elements, &mut canvas, &geometry) {
        eprintln!("Error drawing at {}: {}", geometry, e);
        std::process::exit(1);
    }

    match format_canvas(&canvas, &geometry, OutputFormat::Human) {
        Ok(out) => print!("{}", out),
        Err(e) => {
            eprintln!("Error formatting snapshot: {}", e);
            std::process::exit(1);
        }
    }
}
