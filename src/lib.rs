#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![allow(clippy::module_name_repetitions)]

use anyhow::Result;
use clap::Parser;

mod app;
mod cli;
pub mod error;
mod logging;
pub mod providers;
mod results;
mod settings;
mod user_config;

pub use error::Error;

/// Runs the main application logic.
///
/// Parses command-line arguments, installs logging, merges flags with the
/// environment and the user config, then performs the lookup and prints the
/// report.
///
/// # Errors
///
/// Returns an error if the HTTP client cannot be built, if the lookup fails
/// (missing serial or credentials, network, HTTP status or decode errors), or
/// if printing the report fails.
pub async fn run() -> Result<()> {
  let cli = cli::Cli::parse();
  logging::init(cli.debug);

  let mut app = app::App::new(cli, user_config::load())?;
  app.run().await
}
