use clap::Parser;

#[derive(Parser, Debug, Clone, Default)]
#[command(name = "sn2info", version)]
#[command(
  about = "Look up warranty coverage and product details for a serial number.",
  long_about = "A command-line utility that authenticates against the vendor SSO with OAuth2 client credentials and queries the support API for the coverage summary and product information of a hardware serial number."
)]
pub struct Cli {
  /// Serial number to look up.
  #[arg(short, long, value_name = "SERIAL")]
  pub serial: Option<String>,

  /// Print the raw JSON payloads (re-indented) and enable debug logging.
  #[arg(long)]
  pub debug: bool,

  /// Output the report in JSON format instead of human-readable text.
  #[arg(long)]
  pub json: bool,

  /// OAuth2 client id.
  /// Overrides the `CLIENT_ID` environment variable if both are set.
  #[arg(long = "client-id", value_name = "ID")]
  pub client_id_flag: Option<String>,

  /// OAuth2 client secret.
  /// Overrides the `CLIENT_SECRET` environment variable if both are set.
  #[arg(long = "client-secret", value_name = "SECRET")]
  pub client_secret_flag: Option<String>,

  /// Persist any credential flags that are present into the user config file.
  #[arg(long)]
  pub save_keys: bool,

  /// Print the current merged configuration and exit.
  #[arg(long)]
  pub config_show: bool,
}
