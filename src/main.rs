#![forbid(unsafe_code)]

//! ascope — Audio Scope Helper CLI entry point.

use clap::Parser;

mod cli_app;

fn main() {
    let args = cli_app::Cli::parse();
    if let Err(e) = cli_app::run(&args) {
        eprintln!("ascope: {e}");
        std::process::exit(1);
    }
}
