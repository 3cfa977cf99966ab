// Author: Dustin Pilgrim
// License: MIT

use std::path::PathBuf;

use clap::{Parser, ValueEnum};

use xdpi_core::Backend;

#[derive(Debug, Parser)]
#[command(name = "xdpi", version, about = "xdpi — resolution, dot pitch and scaling as X11 sees it.")]
pub struct Args {
    /// X display to query (default: $DISPLAY)
    #[arg(long, short = 'd')]
    pub display: Option<String>,

    /// Query backend(s) to run (default: config xdpi.backend, else both)
    #[arg(long, short = 'b')]
    pub backend: Option<Backend>,

    /// Output format (default: config xdpi.format, else text)
    #[arg(long, short = 'f')]
    pub format: Option<Format>,

    /// Log to stderr (in addition to the log file)
    #[arg(short = 'v', long)]
    pub verbose: bool,

    /// Override log file path (default: $XDG_STATE_HOME/xdpi/xdpi.log)
    #[arg(long)]
    pub log_file: Option<PathBuf>,
}

#[derive(Debug, Clone, Copy, ValueEnum, PartialEq, Eq)]
pub enum Format {
    Text,
    Json,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_leave_choices_to_config() {
        let args = Args::parse_from(["xdpi"]);
        assert!(args.backend.is_none());
        assert!(args.format.is_none());
        assert!(!args.verbose);
    }

    #[test]
    fn backend_and_format_flags() {
        let args = Args::parse_from(["xdpi", "--backend", "batched", "-f", "json", "-d", ":1"]);
        assert_eq!(args.backend, Some(Backend::Batched));
        assert_eq!(args.format, Some(Format::Json));
        assert_eq!(args.display.as_deref(), Some(":1"));
    }

    #[test]
    fn verify_cli() {
        use clap::CommandFactory;
        Args::command().debug_assert();
    }
}
