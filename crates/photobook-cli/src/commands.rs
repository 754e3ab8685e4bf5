//! Command dispatch over `photobook-core`.

use std::path::{Path, PathBuf};

use photobook_core::decode::FolderImageLoader;
use photobook_core::driver::{COVER_FILE, INTERIOR_FILE};
use photobook_core::{
    generate_cover, generate_interior, load_album_folder, PhotobookConfig, PhotobookError,
    RunReport,
};

use crate::cli::{Cli, Command};

/// Execute the parsed command line.
pub fn run(cli: &Cli) -> Result<RunReport, PhotobookError> {
    let config = match &cli.config {
        Some(path) => {
            log::info!("Using configuration: {}", path.display());
            PhotobookConfig::load(path)?
        }
        None => PhotobookConfig::default(),
    };

    match &cli.command {
        Command::Pages { folder, output } => {
            let album = load_album_folder(folder, &config.print)?;
            let loader = FolderImageLoader::new(folder);
            let output = output_path(folder, output.as_deref(), INTERIOR_FILE);
            generate_interior(&album, &loader, &config.print, &output)
        }
        Command::Cover {
            folder,
            year,
            output,
        } => {
            let album = load_album_folder(folder, &config.print)?;
            let loader = FolderImageLoader::new(folder);
            let output = output_path(folder, output.as_deref(), COVER_FILE);
            generate_cover(&album, year, &loader, &config.cover, &output)
        }
    }
}

fn output_path(folder: &Path, output: Option<&Path>, default_name: &str) -> PathBuf {
    output
        .map(Path::to_path_buf)
        .unwrap_or_else(|| folder.join(default_name))
}

/// Log the end-of-run summary.
pub fn log_summary(report: &RunReport) {
    log::info!("Pages rendered: {}", report.pages_rendered);

    let missing = report.diagnostics.missing_image_count();
    if missing > 0 {
        log::warn!("{missing} image(s) were not found and left blank");
    }

    let low_resolution = report.diagnostics.low_resolution_count();
    if low_resolution > 0 {
        log::warn!(
            "{low_resolution} image(s) are below the minimum DPI and may appear pixelated when printed"
        );
    }
}
