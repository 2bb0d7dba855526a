//! Canvas snapshot formatting.
//!
//! Pure functions: (canvas, Geometry, OutputFormat) → String.
//! No I/O, no side effects. Raw output is the canvas itself and is written
//! by the caller.

use serde::Serialize;

use crate::error::Result;
use crate::geometry::Geometry;

/// Output format for canvas snapshots.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    /// Canvas bytes exactly as they would reach the terminal.
    Raw,
    /// One readable line per row with escapes spelled out.
    #[default]
    Human,
    /// Machine-readable JSON.
    Json,
}

/// Format a canvas for inspection.
///
/// `Raw` is returned lossily as UTF-8; write [`crate::Window::canvas`]
/// directly when the exact bytes matter.
///
/// # Errors
/// [`crate::Error::Json`] if the JSON snapshot cannot be serialized.
pub fn format_canvas(canvas: &[u8], geometry: &Geometry, format: OutputFormat) -> Result<String> {
    Ok(match format {
        OutputFormat::Raw => String::from_utf8_lossy(canvas).into_owned(),
        OutputFormat::Human => format_human(canvas, geometry),
        OutputFormat::Json => format_json(canvas, geometry)?,
    })
}

/// Readable rendering of each canvas row.
pub fn visible_rows(canvas: &[u8], geometry: &Geometry) -> Vec<String> {
    if geometry.row_size() == 0 {
        return Vec::new();
    }
    canvas
        .chunks_exact(geometry.row_size())
        .map(visible_row)
        .collect()
}

// ============================================================================
// HUMAN FORMAT
// ============================================================================

fn format_human(canvas: &[u8], geometry: &Geometry) -> String {
    let mut out = String::new();
    for row in visible_rows(canvas, geometry) {
        out.push_str(&row);
        out.push('\n');
    }
    out
}

/// `ESC` as `\e`, NUL padding dropped, other control bytes as `\xNN`.
fn visible_row(row: &[u8]) -> String {
    let mut out = String::with_capacity(row.len());
    for &byte in row {
        match byte {
            0 => {}
            0x1b => out.push_str("\\e"),
            b'\\' => out.push_str("\\\\"),
            0x20..=0x7e => out.push(byte as char),
            _ => out.push_str(&format!("\\x{:02x}", byte)),
        }
    }
    out
}

// ============================================================================
// JSON FORMAT
// ============================================================================

#[derive(Serialize)]
struct Snapshot {
    rows: usize,
    cols: usize,
    lines: Vec<String>,
}

fn format_json(canvas: &[u8], geometry: &Geometry) -> Result<String> {
    let snapshot = Snapshot {
        rows: geometry.rows(),
        cols: geometry.cols(),
        lines: visible_rows(canvas, geometry),
    };
    Ok(serde_json::to_string_pretty(&snapshot)?)
}

// ============================================================================
// TESTS
// ============================================================================
