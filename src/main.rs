//! # colscope command-line entry point
//!
//! ```text
//! main()
//!   │
//!   ├─> Parse CLI arguments (clap)
//!   ├─> Initialize logging (stderr + rolling file)
//!   └─> Run the subcommand against a fresh Session
//! ```
//!
//! ```bash
//! colscope overview sales.csv
//! colscope numeric sales.csv amount --bins 10
//! colscope date sales.csv order_date --json
//! ```

#![warn(clippy::all, rust_2018_idioms)]
#![expect(clippy::print_stdout, clippy::print_stderr)] // Allow println! in main binary

mod cli;

use anyhow::Result;
use clap::Parser as _;

fn main() -> Result<()> {
    let cli = cli::Cli::parse();

    // Report output goes to stdout, so a logging failure is only worth a note
    if let Err(e) = colscope::logging::init(cli.verbose) {
        eprintln!("warning: file logging disabled: {e:#}");
    }

    tracing::debug!("colscope {} started", env!("CARGO_PKG_VERSION"));
    cli::run_command(cli.command)
}
