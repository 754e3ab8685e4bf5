//! `photobook` - print-ready PDF generator
//!
//! ```text
//! photobook pages <folder>          -> <folder>/photobook.pdf
//! photobook cover <folder> <year>   -> <folder>/cover.pdf
//! ```

use std::process::ExitCode;

use clap::Parser;

mod cli;
mod commands;

use cli::Cli;

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match commands::run(&cli) {
        Ok(report) => {
            commands::log_summary(&report);
            ExitCode::SUCCESS
        }
        Err(e) => {
            log::error!("{e}");
            ExitCode::FAILURE
        }
    }
}

/// `info` by default, `RUST_LOG` when set, `debug` with `--verbose`.
fn init_logging(verbose: bool) {
    let mut builder =
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"));
    if verbose {
        builder.filter_level(log::LevelFilter::Debug);
    }
    builder.format_timestamp(None).init();
}
