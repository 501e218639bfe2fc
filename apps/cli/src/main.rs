//! docindex CLI — browsable Markdown document collections from the terminal.
//!
//! Validates `docindex.json` manifests, renders the navigable index page,
//! and fetches/converts individual documents.

mod commands;
mod surface;

use clap::Parser;
use color_eyre::eyre::Result;

use commands::Cli;

#[tokio::main]
async fn main() -> Result<()> {
    color_eyre::install()?;
    let cli = Cli::parse();
    commands::init_tracing(&cli);
    commands::run(cli).await
}
