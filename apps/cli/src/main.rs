//! schemadoc CLI — Markdown catalog generator for annotated schema files.
//!
//! Reads `.yaml` or `.d.ts` schemas from a directory and writes one catalog
//! of their APIs and database records.

mod commands;

use clap::Parser;
use color_eyre::eyre::Result;

use commands::Cli;

fn main() -> Result<()> {
    color_eyre::install()?;
    let cli = Cli::parse();
    commands::init_tracing(&cli);
    commands::dispatch(cli)
}
