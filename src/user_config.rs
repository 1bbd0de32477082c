use serde::{Deserialize, Serialize};
use std::path::PathBuf;

const APP_NAME: &str = "sn2info";
const FILE_NAME: Option<&str> = None;

#[derive(Debug, Serialize, Deserialize, Default, Clone, PartialEq, Eq)]
pub struct UserConfig {
  pub client_id: Option<String>,
  pub client_secret: Option<String>,
  pub token_url: Option<String>,
  pub coverage_url: Option<String>,
  pub product_url: Option<String>,
}

impl UserConfig {
  /// Copy credential flags into the config. Returns `true` if anything
  /// changed.
  pub fn merge_keys(
    &mut self,
    client_id: Option<&str>,
    client_secret: Option<&str>,
  ) -> bool {
    let mut changed = false;
    for (slot, value) in [
      (&mut self.client_id, client_id),
      (&mut self.client_secret, client_secret),
    ] {
      if let Some(value) = value.filter(|v| !v.trim().is_empty()) {
        if slot.as_deref() != Some(value) {
          *slot = Some(value.to_string());
          changed = true;
        }
      }
    }
    changed
  }
}

/// Read ~/.config/sn2info/default-config.toml (or OS equivalent).
pub fn load() -> UserConfig {
  confy::load(APP_NAME, FILE_NAME).unwrap_or_default()
}

pub fn store(cfg: &UserConfig) -> anyhow::Result<()> {
  confy::store(APP_NAME, FILE_NAME, cfg).map_err(Into::into)
}

pub fn path() -> anyhow::Result<PathBuf> {
  confy::get_configuration_file_path(APP_NAME, FILE_NAME).map_err(Into::into)
}
