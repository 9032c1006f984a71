//! Binary entry point for the `bitpack` command-line tool.
//!
//! Parses argv via [`bitpack::cli::args::Cli`], applies the requested
//! verbosity, and hands off to [`bitpack::cli::dispatch::run`], which
//! performs the file I/O and returns the process exit code.

use clap::Parser;

use bitpack::cli::args::Cli;
use bitpack::cli::constants::set_display_level;
use bitpack::cli::dispatch;

fn main() {
    let cli = Cli::parse();

    if let Some(level) = cli.verbose {
        set_display_level(level);
    }

    let exit_code = dispatch::run(cli);
    std::process::exit(exit_code);
}
