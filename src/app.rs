use crate::cli::Cli;
use crate::error::Result as LookupResult;
use crate::providers::SupportClient;
use crate::results::{self, Report};
use crate::settings::{Settings, TokenSource};
use crate::user_config::{self, UserConfig};
use anyhow::{Context, Result};
use indicatif::{ProgressBar, ProgressStyle};
use reqwest::Client;
use std::env;
use std::time::Duration;
use tracing::{debug, info};

pub struct App {
  cli: Cli,
  config: UserConfig,
  settings: Settings,
  client: SupportClient,
}

impl App {
  pub fn new(cli: Cli, config: UserConfig) -> Result<Self> {
    let settings = Settings::resolve(&cli, |key| env::var(key).ok(), &config);
    let http = Client::builder()
      .user_agent(format!("sn2info_cli/{}", env!("CARGO_PKG_VERSION")))
      .build()
      .context("Failed to build HTTP client")?;
    let client = SupportClient::new(http, settings.endpoints.clone())
      .with_debug(settings.debug);

    Ok(Self {
      cli,
      config,
      settings,
      client,
    })
  }

  #[cfg(test)]
  fn with_parts(settings: Settings, client: SupportClient) -> Self {
    Self {
      cli: Cli::default(),
      config: UserConfig::default(),
      settings,
      client,
    }
  }

  pub async fn run(&mut self) -> Result<()> {
    if self.cli.save_keys {
      self.save_keys()?;
    }
    if self.cli.config_show {
      return results::print_config(&self.settings.view());
    }

    let report = self.lookup().await?;
    self.print_results(&report)
  }

  /// Validate the serial, obtain a bearer token, then fetch coverage and
  /// product information in that order. The first failure ends the lookup.
  pub async fn lookup(&self) -> LookupResult<Report> {
    let serial = self.settings.require_serial()?;
    let source = self.settings.token_source()?;

    let spinner = self.spinner();
    let report = self.fetch_report(serial, source, &spinner).await;
    spinner.finish_and_clear();
    report
  }

  async fn fetch_report(
    &self,
    serial: &str,
    source: TokenSource<'_>,
    spinner: &ProgressBar,
  ) -> LookupResult<Report> {
    let token = match source {
      TokenSource::Provided(token) => {
        debug!("using pre-issued token from AUTH_TOKEN");
        token.to_string()
      }
      TokenSource::ClientCredentials(credentials) => {
        spinner.set_message("Requesting access token...");
        let issued = self.client.fetch_token(credentials).await?;
        spinner.suspend(|| println!("{}", issued.access_token));
        issued.access_token
      }
    };

    spinner.set_message(format!("Fetching coverage summary for {serial}..."));
    let coverage = self.client.coverage_summary(serial, &token).await?;
    info!(records = coverage.serial_numbers.len(), "coverage summary");

    spinner.set_message(format!("Fetching product information for {serial}..."));
    let product = self.client.product_info(serial, &token).await?;
    info!(records = product.product_list.len(), "product information");

    Ok(Report {
      serial: serial.to_string(),
      coverage,
      product,
    })
  }

  /// Spinner on stderr; hidden when stdout carries machine-readable output.
  fn spinner(&self) -> ProgressBar {
    if self.settings.json || self.settings.debug {
      return ProgressBar::hidden();
    }
    let spinner = ProgressBar::new_spinner();
    if let Ok(style) = ProgressStyle::with_template("{spinner:.cyan} {msg}") {
      spinner.set_style(style);
    }
    spinner.enable_steady_tick(Duration::from_millis(100));
    spinner
  }

  fn save_keys(&mut self) -> Result<()> {
    let changed = self.config.merge_keys(
      self.cli.client_id_flag.as_deref(),
      self.cli.client_secret_flag.as_deref(),
    );
    if !changed {
      eprintln!("No new credential flags to save.");
      return Ok(());
    }
    user_config::store(&self.config).context("Failed to save user config")?;
    match user_config::path() {
      Ok(path) => eprintln!("Saved credentials to {}", path.display()),
      Err(_) => eprintln!("Saved credentials to the user config."),
    }
    Ok(())
  }

  fn print_results(&self, report: &Report) -> Result<()> {
    if self.settings.json {
      results::print_json(report)
    } else {
      results::print_human_readable(report);
      Ok(())
    }
  }
}
