//! Client for the vendor support API: SSO token exchange plus the coverage
//! and product lookups keyed by serial number.

pub mod auth;
pub mod coverage;
pub mod product;

use crate::error::{Error, Result};
use reqwest::{header, Client, Response};
use serde::de::{DeserializeOwned, IgnoredAny};
use serde::{Deserialize, Serialize};
use std::io::{self, Write};
use std::sync::{Mutex, PoisonError};
use tracing::{debug, warn};

pub const DEFAULT_TOKEN_URL: &str = "https://cloudsso.cisco.com/as/token.oauth2";
pub const DEFAULT_COVERAGE_URL: &str =
  "https://api.cisco.com/sn2info/v2/coverage/summary/serial_numbers/";
pub const DEFAULT_PRODUCT_URL: &str =
  "https://api.cisco.com/product/v1/information/serial_numbers/";

/// Base URLs of the three API endpoints.
///
/// The coverage and product URLs are prefixes: the serial number is appended
/// verbatim, so they are expected to end in `/`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Endpoints {
  pub token_url: String,
  pub coverage_url: String,
  pub product_url: String,
}

impl Default for Endpoints {
  fn default() -> Self {
    Self {
      token_url: DEFAULT_TOKEN_URL.to_string(),
      coverage_url: DEFAULT_COVERAGE_URL.to_string(),
      product_url: DEFAULT_PRODUCT_URL.to_string(),
    }
  }
}

/// Paging block returned with every lookup. Decoded for display only;
/// further pages are never requested.
#[derive(Debug, Serialize, Deserialize, Clone, Default, PartialEq, Eq)]
#[serde(default)]
pub struct Pagination {
  pub last_index: i64,
  pub page_index: i64,
  pub page_records: i64,
  pub self_link: String,
  pub title: String,
  pub total_records: i64,
}

type DebugSink = Mutex<Box<dyn Write + Send>>;

pub struct SupportClient {
  http: Client,
  endpoints: Endpoints,
  debug_sink: Option<DebugSink>,
}

impl SupportClient {
  #[must_use]
  pub fn new(http: Client, endpoints: Endpoints) -> Self {
    Self {
      http,
      endpoints,
      debug_sink: None,
    }
  }

  /// Echo every raw payload, re-indented, to stdout after decoding it.
  #[must_use]
  pub fn with_debug(mut self, debug: bool) -> Self {
    if debug {
      self.with_debug_writer(io::stdout())
    } else {
      self.debug_sink = None;
      self
    }
  }

  /// Like [`Self::with_debug`], echoing into `writer` instead of stdout.
  #[must_use]
  pub fn with_debug_writer<W: Write + Send + 'static>(
    mut self,
    writer: W,
  ) -> Self {
    self.debug_sink = Some(Mutex::new(Box::new(writer)));
    self
  }

  #[must_use]
  pub const fn endpoints(&self) -> &Endpoints {
    &self.endpoints
  }

  async fn send_request(&self, url: &str, token: &str) -> Result<Response> {
    debug!(%url, "GET");
    self
      .http
      .get(url)
      .header(header::ACCEPT, "application/json")
      .bearer_auth(token)
      .send()
      .await
      .map_err(|e| Error::request(url, e))
  }

  /// GET `<base><serial>` and decode the body into `T`.
  async fn get_json<T: DeserializeOwned>(
    &self,
    base: &str,
    serial: &str,
    token: &str,
  ) -> Result<T> {
    let url = format!("{base}{serial}");
    let response = self.send_request(&url, token).await?;
    let body = read_body(&url, response).await?;

    let decoded =
      serde_json::from_slice::<T>(&body).map_err(|e| Error::decode(&url, e))?;

    self.echo(&url, &body)?;
    Ok(decoded)
  }

  fn echo(&self, url: &str, body: &[u8]) -> Result<()> {
    let Some(sink) = &self.debug_sink else {
      return Ok(());
    };
    let pretty = pretty_json(body).map_err(|e| Error::decode(url, e))?;
    let mut out = sink.lock().unwrap_or_else(PoisonError::into_inner);
    if let Err(e) = writeln!(out, "{pretty}").and_then(|()| out.flush()) {
      warn!(%url, error = %e, "failed to echo payload");
    }
    Ok(())
  }
}

/// Read a whole response body, turning non-2xx answers into
/// [`Error::Status`].
async fn read_body(url: &str, response: Response) -> Result<Vec<u8>> {
  let status = response.status();
  if !status.is_success() {
    let body = match response.text().await {
      Ok(text) => text.trim().to_string(),
      Err(e) => format!("<unreadable body: {e}>"),
    };
    return Err(Error::Status {
      url: url.to_string(),
      status,
      body,
    });
  }

  let bytes = response
    .bytes()
    .await
    .map_err(|e| Error::request(url, e))?;
  debug!(%url, %status, len = bytes.len(), "response received");
  Ok(bytes.to_vec())
}

/// Re-indent a raw JSON document with two spaces.
///
/// Only whitespace between tokens changes: strings (escapes included) and
/// numbers are copied byte for byte, key order and duplicate keys are kept,
/// and empty containers stay as `{}` / `[]`.
///
/// # Errors
///
/// Returns an error if `raw` is not valid JSON.
pub fn pretty_json(raw: &[u8]) -> serde_json::Result<String> {
  serde_json::from_slice::<IgnoredAny>(raw)?;

  let mut out = Vec::with_capacity(raw.len() + raw.len() / 2);
  let mut depth = 0usize;
  let mut pending_indent = false;
  let mut in_string = false;
  let mut escaped = false;

  for &byte in raw {
    if in_string {
      out.push(byte);
      if escaped {
        escaped = false;
      } else if byte == b'\\' {
        escaped = true;
      } else if byte == b'"' {
        in_string = false;
      }
      continue;
    }
    if byte.is_ascii_whitespace() {
      continue;
    }

    if pending_indent {
      pending_indent = false;
      if matches!(byte, b'}' | b']') {
        depth = depth.saturating_sub(1);
        out.push(byte);
        continue;
      }
      push_newline(&mut out, depth);
    }

    match byte {
      b'{' | b'[' => {
        out.push(byte);
        depth += 1;
        pending_indent = true;
      }
      b'}' | b']' => {
        depth = depth.saturating_sub(1);
        push_newline(&mut out, depth);
        out.push(byte);
      }
      b',' => {
        out.push(byte);
        push_newline(&mut out, depth);
      }
      b':' => out.extend_from_slice(b": "),
      b'"' => {
        in_string = true;
        out.push(byte);
      }
      _ => out.push(byte),
    }
  }

  String::from_utf8(out).map_err(serde::de::Error::custom)
}

fn push_newline(out: &mut Vec<u8>, depth: usize) {
  out.push(b'\n');
  out.resize(out.len() + depth * 2, b' ');
}
