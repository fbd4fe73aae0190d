//! string-lang - enumerate, mask and visualize bounded languages
//!
//! Main entry point for the command-line application.

use clap::Parser;
use std::process;

use string_lang::cli::Args;
use string_lang::commands;
use string_lang::progress::print_error;

fn main() {
    // Parse command-line arguments
    let args = Args::parse();

    // Set up logging; an explicit RUST_LOG still wins
    let level = if args.verbose {
        "debug"
    } else if args.quiet {
        "error"
    } else {
        "warn"
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();

    if let Err(e) = commands::run(&args) {
        print_error(&format!("{}", e));

        // Print chain of errors
        for cause in e.chain().skip(1) {
            print_error(&format!("  Caused by: {}", cause));
        }

        process::exit(1);
    }
}
