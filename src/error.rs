use reqwest::StatusCode;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  #[error("Specify a serial number via the --serial flag")]
  MissingSerial,

  #[error(
    "No credentials: set AUTH_TOKEN, or CLIENT_ID and CLIENT_SECRET \
     (env vars, --client-id/--client-secret flags or the user config)"
  )]
  MissingCredentials,

  #[error("request to {url} failed: {source}")]
  Request {
    url: String,
    #[source]
    source: reqwest::Error,
  },

  #[error("{url} returned HTTP {status}: {body}")]
  Status {
    url: String,
    status: StatusCode,
    body: String,
  },

  #[error("failed to decode response from {url}: {source}")]
  Decode {
    url: String,
    #[source]
    source: serde_json::Error,
  },
}

impl Error {
  pub(crate) fn request(url: &str, source: reqwest::Error) -> Self {
    Self::Request {
      url: url.to_string(),
      source,
    }
  }

  pub(crate) fn decode(url: &str, source: serde_json::Error) -> Self {
    Self::Decode {
      url: url.to_string(),
      source,
    }
  }
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
