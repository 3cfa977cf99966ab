// Author: Dustin Pilgrim
// License: MIT

mod cli;
mod config;
mod env;
mod logging;
mod paths;
mod print;
mod run;

use clap::Parser;

fn main() {
    let args = cli::Args::parse();

    let log_path = args
        .log_file
        .clone()
        .unwrap_or_else(|| paths::default_log_path("xdpi.log"));

    if let Err(e) = logging::init_logging(&log_path, args.verbose) {
        // logging should never block normal usage
        eprintln!("xdpi: failed to init logging: {e}");
    }

    eventline::debug!("verbose={}", args.verbose);
    eventline::debug!("log_path={}", log_path.display());

    if let Err(e) = run::run(args) {
        // user-facing error
        eprintln!("{e}");
        std::process::exit(1);
    }
}
