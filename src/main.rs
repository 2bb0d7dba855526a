//! termcanvas CLI
//!
//! Render a layout of colored text elements to the terminal and follow
//! resizes until quit.

use std::io::{self, Write};
use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};

use termcanvas::geometry::Geometry;
use termcanvas::layout::{Layout, default_layout_path};
use termcanvas::raster::draw_all;
use termcanvas::snapshot::{OutputFormat, format_canvas};
use termcanvas::terminal::{SizeProvider, TerminalSession, TerminalSize};
use termcanvas::{CancelToken, Result, Window, WindowOptions};

#[derive(Parser)]
#[command(name = "termcanvas")]
#[command(about = "Render colored text elements onto the terminal")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Draw the layout full-screen and follow resizes (default)
    Render {
        /// Layout file (default: config dir, then the built-in demo)
        #[arg(long)]
        layout: Option<PathBuf>,

        /// Redraw the whole canvas whenever the terminal is resized
        #[arg(long)]
        follow_resize: bool,
    },

    /// Rasterize once into a canvas of a fixed size and print it
    Snapshot {
        /// Canvas height in rows
        #[arg(long, default_value_t = 24)]
        rows: usize,

        /// Canvas width in columns
        #[arg(long, default_value_t = 80)]
        cols: usize,

        /// Layout file (default: config dir, then the built-in demo)
        #[arg(long)]
        layout: Option<PathBuf>,

        /// Output format
        #[arg(long, value_enum, default_value = "human")]
        format: OutputFormatArg,
    },

    /// Print the built-in demo layout as JSON
    Layout,
}

#[derive(Clone, Copy, clap::ValueEnum)]
enum OutputFormatArg {
    Raw,
    Human,
    Json,
}

impl From<OutputFormatArg> for OutputFormat {
    fn from(arg: OutputFormatArg) -> Self {
        match arg {
            OutputFormatArg::Raw => OutputFormat::Raw,
            OutputFormatArg::Human => OutputFormat::Human,
            OutputFormatArg::Json => OutputFormat::Json,
        }
    }
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let cli = Cli::parse();

    let result = match cli.command {
        None => cmd_render(None, false),
        Some(Commands::Render { layout, follow_resize }) => cmd_render(layout, follow_resize),
        Some(Commands::Snapshot { rows, cols, layout, format }) => {
            cmd_snapshot(rows, cols, layout, format.into())
        }
        Some(Commands::Layout) => cmd_layout(),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}

// ============================================================================
// COMMAND HANDLERS
// ============================================================================

fn cmd_render(layout: Option<PathBuf>, follow_resize: bool) -> Result<()> {
    let layout = Layout::resolve(layout.as_deref())?;
    let provider = TerminalSize::stdout();
    let geometry = provider.query()?;

    log::info!(
        "terminal is {}, default layout path {}",
        geometry,
        default_layout_path().display()
    );

    let mut window = Window::with_elements(geometry, layout.elements, io::stdout()).options(
        WindowOptions {
            redraw_on_resize: follow_resize,
        },
    );

    // Restored on drop, before any error is printed.
    let _session = TerminalSession::enter()?;
    window.render(&provider, &CancelToken::new())
}

fn cmd_snapshot(
    rows: usize,
    cols: usize,
    layout: Option<PathBuf>,
    format: OutputFormat,
) -> Result<()> {
    let layout = Layout::resolve(layout.as_deref())?;
    let geometry = Geometry::new(rows, cols);
    let mut canvas = geometry.canvas();

    draw_all(&layout.elements, &mut canvas, &geometry)?;

    let mut stdout = io::stdout().lock();
    match format {
        OutputFormat::Raw => {
            stdout.write_all(&canvas)?;
            stdout.write_all(b"\n")?;
        }
        _ => stdout.write_all(format_canvas(&canvas, &geometry, format)?.as_bytes())?,
    }
    stdout.flush()?;
    Ok(())
}

fn cmd_layout() -> Result<()> {
    println!("{}", Layout::demo().to_json()?);
    Ok(())
}
