//! Command line arguments.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Generate print-ready photobook PDFs from an album folder.
#[derive(Debug, Parser)]
#[command(name = "photobook", version)]
pub struct Cli {
    /// Log per-cell crop and resampling details
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// JSON file overriding the built-in print settings
    #[arg(short, long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Render the interior pages (all but the first and last album page)
    Pages {
        /// Folder containing album.json and the images it references
        folder: PathBuf,

        /// Output file [default: <folder>/photobook.pdf]
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,
    },

    /// Render the cover spread with a label on the spine
    Cover {
        /// Folder containing album.json and the images it references
        folder: PathBuf,

        /// Text printed on the spine, e.g. 2024
        year: String,

        /// Output file [default: <folder>/cover.pdf]
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,
    },
}
