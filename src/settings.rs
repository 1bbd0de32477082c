//! Merges CLI flags, environment variables and the user config file into the
//! values a lookup runs with. Precedence is flag, env, config, default, and
//! empty strings count as unset.

use crate::cli::Cli;
use crate::error::{Error, Result};
use crate::providers::auth::Credentials;
use crate::providers::Endpoints;
use crate::user_config::UserConfig;
use serde::Serialize;

pub const AUTH_TOKEN_VAR: &str = "AUTH_TOKEN";
pub const CLIENT_ID_VAR: &str = "CLIENT_ID";
pub const CLIENT_SECRET_VAR: &str = "CLIENT_SECRET";

#[derive(Debug, Clone, Default)]
pub struct Settings {
  pub serial: Option<String>,
  /// Pre-issued bearer token; skips the SSO exchange when set.
  pub auth_token: Option<String>,
  pub credentials: Option<Credentials>,
  pub endpoints: Endpoints,
  pub debug: bool,
  pub json: bool,
}

/// How the bearer token for this run is obtained.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TokenSource<'a> {
  Provided(&'a str),
  ClientCredentials(&'a Credentials),
}

fn present(value: Option<String>) -> Option<String> {
  value
    .map(|v| v.trim().to_string())
    .filter(|v| !v.is_empty())
}

impl Settings {
  /// `env` looks up an environment variable; passed in so callers (and tests)
  /// decide where values come from.
  pub fn resolve<F>(cli: &Cli, env: F, config: &UserConfig) -> Self
  where
    F: Fn(&str) -> Option<String>,
  {
    let client_id = present(cli.client_id_flag.clone())
      .or_else(|| present(env(CLIENT_ID_VAR)))
      .or_else(|| present(config.client_id.clone()));
    let client_secret = present(cli.client_secret_flag.clone())
      .or_else(|| present(env(CLIENT_SECRET_VAR)))
      .or_else(|| present(config.client_secret.clone()));

    let credentials = match (client_id, client_secret) {
      (Some(client_id), Some(client_secret)) => Some(Credentials {
        client_id,
        client_secret,
      }),
      _ => None,
    };

    let defaults = Endpoints::default();
    let endpoints = Endpoints {
      token_url: present(config.token_url.clone())
        .unwrap_or(defaults.token_url),
      coverage_url: present(config.coverage_url.clone())
        .unwrap_or(defaults.coverage_url),
      product_url: present(config.product_url.clone())
        .unwrap_or(defaults.product_url),
    };

    Self {
      serial: present(cli.serial.clone()),
      auth_token: present(env(AUTH_TOKEN_VAR)),
      credentials,
      endpoints,
      debug: cli.debug,
      json: cli.json,
    }
  }

  /// # Errors
  ///
  /// [`Error::MissingSerial`] when no non-empty serial number was given.
  pub fn require_serial(&self) -> Result<&str> {
    self.serial.as_deref().ok_or(Error::MissingSerial)
  }

  /// # Errors
  ///
  /// [`Error::MissingCredentials`] when neither a token nor a complete
  /// client id/secret pair is available.
  pub fn token_source(&self) -> Result<TokenSource<'_>> {
    if let Some(token) = self.auth_token.as_deref() {
      return Ok(TokenSource::Provided(token));
    }
    self
      .credentials
      .as_ref()
      .map(TokenSource::ClientCredentials)
      .ok_or(Error::MissingCredentials)
  }

  /// Printable view for `--config-show`; the secret is masked.
  #[must_use]
  pub fn view(&self) -> SettingsView<'_> {
    SettingsView {
      auth_token: self.auth_token.as_deref().map(mask),
      client_id: self.credentials.as_ref().map(|c| c.client_id.as_str()),
      client_secret: self
        .credentials
        .as_ref()
        .map(|c| mask(&c.client_secret)),
      endpoints: &self.endpoints,
    }
  }
}

#[derive(Debug, Serialize)]
pub struct SettingsView<'a> {
  pub auth_token: Option<String>,
  pub client_id: Option<&'a str>,
  pub client_secret: Option<String>,
  pub endpoints: &'a Endpoints,
}

/// Keep the last four characters of a secret.
fn mask(secret: &str) -> String {
  let chars: Vec<char> = secret.chars().collect();
  if chars.len() <= 4 {
    return "****".to_string();
  }
  let tail: String = chars[chars.len() - 4..].iter().collect();
  format!("****{tail}")
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::providers::{DEFAULT_COVERAGE_URL, DEFAULT_TOKEN_URL};
  use std::collections::HashMap;

  fn env_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
    let map: HashMap<String, String> = pairs
      .iter()
      .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
      .collect();
    move |key| map.get(key).cloned()
  }

  fn cli(serial: Option<&str>) -> Cli {
    Cli {
      serial: serial.map(str::to_string),
      ..Default::default()
    }
  }

  #[test]
  fn test_env_credentials() {
    let settings = Settings::resolve(
      &cli(Some("SN1")),
      env_from(&[("CLIENT_ID", "env-id"), ("CLIENT_SECRET", "env-secret")]),
      &UserConfig::default(),
    );
    let creds = settings.credentials.clone().unwrap();
    assert_eq!(creds.client_id, "env-id");
    assert_eq!(creds.client_secret, "env-secret");
    assert!(settings.auth_token.is_none());
    assert!(matches!(
      settings.token_source().unwrap(),
      TokenSource::ClientCredentials(_)
    ));
  }

  #[test]
  fn test_flag_overrides_env_and_env_overrides_config() {
    let mut args = cli(Some("SN1"));
    args.client_id_flag = Some("flag-id".to_string());
    let config = UserConfig {
      client_id: Some("cfg-id".to_string()),
      client_secret: Some("cfg-secret".to_string()),
      ..Default::default()
    };
    let settings = Settings::resolve(
      &args,
      env_from(&[("CLIENT_ID", "env-id"), ("CLIENT_SECRET", "env-secret")]),
      &config,
    );
    let creds = settings.credentials.unwrap();
    assert_eq!(creds.client_id, "flag-id");
    assert_eq!(creds.client_secret, "env-secret");
  }

  #[test]
  fn test_auth_token_wins_over_credentials() {
    let settings = Settings::resolve(
      &cli(Some("SN1")),
      env_from(&[
        ("AUTH_TOKEN", "pre-issued"),
        ("CLIENT_ID", "id"),
        ("CLIENT_SECRET", "secret"),
      ]),
      &UserConfig::default(),
    );
    assert_eq!(
      settings.token_source().unwrap(),
      TokenSource::Provided("pre-issued")
    );
  }

  #[test]
  fn test_empty_values_are_unset() {
    let settings = Settings::resolve(
      &cli(Some("  ")),
      env_from(&[("AUTH_TOKEN", ""), ("CLIENT_ID", "id"), ("CLIENT_SECRET", "")]),
      &UserConfig::default(),
    );
    assert!(matches!(settings.require_serial(), Err(Error::MissingSerial)));
    assert!(settings.auth_token.is_none());
    assert!(settings.credentials.is_none());
    assert!(matches!(
      settings.token_source(),
      Err(Error::MissingCredentials)
    ));
  }

  #[test]
  fn test_endpoints_default_and_override() {
    let config = UserConfig {
      coverage_url: Some("http://localhost:8080/coverage/".to_string()),
      ..Default::default()
    };
    let settings = Settings::resolve(&cli(None), env_from(&[]), &config);
    assert_eq!(settings.endpoints.token_url, DEFAULT_TOKEN_URL);
    assert_eq!(
      settings.endpoints.coverage_url,
      "http://localhost:8080/coverage/"
    );
    assert_ne!(settings.endpoints.coverage_url, DEFAULT_COVERAGE_URL);
  }

  #[test]
  fn test_view_masks_secrets() {
    let settings = Settings::resolve(
      &cli(None),
      env_from(&[
        ("AUTH_TOKEN", "tok-abcdefgh"),
        ("CLIENT_ID", "id"),
        ("CLIENT_SECRET", "supersecret"),
      ]),
      &UserConfig::default(),
    );
    let rendered = serde_json::to_string(&settings.view()).unwrap();
    assert!(rendered.contains("****cret"));
    assert!(rendered.contains("****efgh"));
    assert!(!rendered.contains("supersecret"));
    assert!(!rendered.contains("tok-abcdefgh"));
  }

  #[test]
  fn test_mask_short_secret() {
    assert_eq!(mask("abc"), "****");
  }
}
