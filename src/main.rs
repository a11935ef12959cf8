//! # Gafete CLI
//!
//! Command-line utility for badge layout files.
//!
//! ## Usage
//!
//! ```bash
//! # Summarize the elements of a layout
//! gafete inspect layout.json
//!
//! # Strictly validate a layout, reporting the first malformed record
//! gafete validate layout.json
//!
//! # Re-emit a layout with normalized precision
//! gafete normalize layout.json
//!
//! # Normalize against a non-A4 page
//! gafete normalize --page-width 85 --page-height 54 layout.json
//! ```

use clap::{Parser, Subcommand};
use std::fs;
use std::path::PathBuf;

use gafete::LayoutError;
use gafete::editor::{EditorSession, PageViewport};
use gafete::layout::{self, LayoutRecord};
use gafete::units::PageMetrics;
use gafete::variables::VariableRegistry;

/// Gafete - badge layout utility
#[derive(Parser, Debug)]
#[command(name = "gafete")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Summarize the elements of a layout file
    Inspect {
        /// Layout JSON file
        file: PathBuf,
    },
    /// Strictly validate a layout file
    Validate {
        /// Layout JSON file
        file: PathBuf,
    },
    /// Re-emit a layout with normalized precision via a dump/load round trip
    Normalize {
        /// Layout JSON file
        file: PathBuf,

        /// Page width in millimeters
        #[arg(long, default_value = "210")]
        page_width: f64,

        /// Page height in millimeters
        #[arg(long, default_value = "297")]
        page_height: f64,

        /// Render scale (screen pixels per PDF-space unit)
        #[arg(long, default_value = "2")]
        scale: f64,
    },
}

fn main() {
    if let Err(e) = run() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run() -> Result<(), LayoutError> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Inspect { file } => {
            let records = layout::parse_records(&fs::read_to_string(file)?)?;
            if records.is_empty() {
                println!("Empty layout.");
                return Ok(());
            }
            for (i, record) in records.iter().enumerate() {
                println!("{:3}  {}", i, describe(record));
            }
        }
        Commands::Validate { file } => {
            let records = layout::parse_records_strict(&fs::read_to_string(file)?)?;
            println!("{} element(s) OK", records.len());
        }
        Commands::Normalize {
            file,
            page_width,
            page_height,
            scale,
        } => {
            let records = layout::parse_records(&fs::read_to_string(file)?)?;

            let metrics = PageMetrics::with_scale(scale)?;
            let viewport = PageViewport::new(
                metrics.mm_to_px(page_width),
                metrics.mm_to_px(page_height),
            );
            let mut session = EditorSession::new(viewport, metrics, VariableRegistry::new());
            session.load(&records);

            println!("{}", layout::to_json_pretty(&session.dump())?);
        }
    }

    Ok(())
}

/// One summary line per element.
fn describe(record: &LayoutRecord) -> String {
    match record {
        LayoutRecord::Textarea(t) => {
            let mut style = String::new();
            if t.bold {
                style.push_str(" bold");
            }
            if t.italic {
                style.push_str(" italic");
            }
            format!(
                "text     {:>8.2} x {:>8.2} mm  {} {:.1}pt{}  content={}",
                t.left, t.bottom, t.fontfamily, t.fontsize, style, t.content
            )
        }
        LayoutRecord::Barcodearea(b) => format!(
            "barcode  {:>8.2} x {:>8.2} mm  size {:.2} mm  content={}",
            b.left, b.bottom, b.size, b.content
        ),
    }
}
