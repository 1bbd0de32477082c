//! OAuth2 client-credentials exchange against the vendor SSO.

use super::{read_body, SupportClient};
use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::{debug, info};

pub const GRANT_TYPE: &str = "client_credentials";

/// Token issued by the SSO endpoint. Lives for a single run only.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct AccessToken {
  pub access_token: String,
  /// Always present on a successful exchange (usually "Bearer").
  pub token_type: String,
  /// Lifetime in seconds.
  #[serde(default)]
  pub expires_in: u64,
}

#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
  pub client_id: String,
  pub client_secret: String,
}

impl fmt::Debug for Credentials {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.debug_struct("Credentials")
      .field("client_id", &self.client_id)
      .field("client_secret", &"<redacted>")
      .finish()
  }
}

#[derive(Serialize)]
struct TokenRequest<'a> {
  client_id: &'a str,
  client_secret: &'a str,
  grant_type: &'a str,
}

impl SupportClient {
  /// Exchanges client credentials for a bearer token with a form-encoded
  /// POST to the token endpoint.
  ///
  /// # Errors
  ///
  /// - The POST could not be sent or its body could not be read.
  /// - The endpoint answered with a non-2xx status.
  /// - The body is not a token document (e.g. `token_type` missing).
  pub async fn fetch_token(
    &self,
    credentials: &Credentials,
  ) -> Result<AccessToken> {
    let url = self.endpoints.token_url.as_str();
    debug!(%url, client_id = %credentials.client_id, "requesting access token");

    let response = self
      .http
      .post(url)
      .form(&TokenRequest {
        client_id: &credentials.client_id,
        client_secret: &credentials.client_secret,
        grant_type: GRANT_TYPE,
      })
      .send()
      .await
      .map_err(|e| Error::request(url, e))?;

    let body = read_body(url, response).await?;
    let token: AccessToken =
      serde_json::from_slice(&body).map_err(|e| Error::decode(url, e))?;

    info!(
      token_type = %token.token_type,
      expires_in = token.expires_in,
      "access token issued"
    );
    Ok(token)
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::providers::tests::test_client;
  use httpmock::prelude::*;
  use serde_json::json;

  fn creds() -> Credentials {
    Credentials {
      client_id: "my-id".to_string(),
      client_secret: "p@ss&word".to_string(),
    }
  }

  #[tokio::test]
  async fn test_fetch_token_posts_form_and_decodes() {
    let server = MockServer::start();
    let mock = server.mock(|when, then| {
      when
        .method(Method::POST)
        .path("/as/token.oauth2")
        .header("content-type", "application/x-www-form-urlencoded")
        .body(
          "client_id=my-id&client_secret=p%40ss%26word&grant_type=client_credentials",
        );
      then.status(200).json_body(json!({
        "access_token": "abc123",
        "token_type": "Bearer",
        "expires_in": 3599
      }));
    });

    let token = test_client(&server).fetch_token(&creds()).await.unwrap();

    assert_eq!(mock.calls(), 1);
    assert_eq!(token.access_token, "abc123");
    assert_eq!(token.token_type, "Bearer");
    assert_eq!(token.expires_in, 3599);
  }

  #[tokio::test]
  async fn test_token_without_type_is_rejected() {
    let server = MockServer::start();
    let _m = server.mock(|when, then| {
      when.method(Method::POST).path("/as/token.oauth2");
      then.status(200).json_body(json!({"access_token": "abc123"}));
    });

    let err = test_client(&server).fetch_token(&creds()).await.unwrap_err();
    assert!(matches!(err, Error::Decode { .. }), "got {err:?}");
  }

  #[tokio::test]
  async fn test_rejected_credentials_surface_status() {
    let server = MockServer::start();
    let _m = server.mock(|when, then| {
      when.method(Method::POST).path("/as/token.oauth2");
      then
        .status(401)
        .json_body(json!({"error": "invalid_client"}));
    });

    let err = test_client(&server).fetch_token(&creds()).await.unwrap_err();
    match err {
      Error::Status { status, body, .. } => {
        assert_eq!(status.as_u16(), 401);
        assert!(body.contains("invalid_client"));
      }
      other => panic!("expected status error, got {other:?}"),
    }
  }

  #[test]
  fn test_credentials_debug_hides_secret() {
    let rendered = format!("{:?}", creds());
    assert!(rendered.contains("my-id"));
    assert!(!rendered.contains("p@ss"));
  }
}
