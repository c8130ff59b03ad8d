use std::sync::Arc;

use async_trait::async_trait;
use banksign_core::hash::base64_encode;
use banksign_core::{Context, Error, ProvideCredential, Result};
use bytes::Bytes;
use chrono::{TimeDelta, Utc};
use http::header::{AUTHORIZATION, CONTENT_TYPE};
use http::{HeaderValue, Method};
use log::debug;
use serde::Deserialize;

use crate::constants::PATH_OAUTH_TOKEN;
use crate::{Config, Credential};

/// OAuthClientCredentialProvider performs the unsigned token bootstrap.
///
/// No bearer token exists yet at this point, so the request authenticates
/// with HTTP Basic auth (`base64(client_id:client_secret)`) instead of the
/// signature scheme.
#[derive(Debug)]
pub struct OAuthClientCredentialProvider {
    config: Arc<Config>,
}

impl OAuthClientCredentialProvider {
    /// Create a new provider from the client config.
    pub fn new(config: Arc<Config>) -> Self {
        Self { config }
    }

    /// Request an access token and return the raw response body.
    ///
    /// Exposed for callers that manage token parsing themselves;
    /// [`ProvideCredential::provide_credential`] parses it into a
    /// [`Credential`].
    pub async fn request_token(&self, ctx: &Context) -> Result<String> {
        let (Some(client_id), Some(client_secret)) =
            (&self.config.client_id, &self.config.client_secret)
        else {
            return Err(Error::config_invalid(
                "client_id and client_secret are required for the token bootstrap",
            ));
        };

        let uri = format!("{}{}", self.config.base_uri(), PATH_OAUTH_TOKEN);
        let basic = base64_encode(format!("{client_id}:{client_secret}").as_bytes());

        let mut req = http::Request::builder()
            .method(Method::POST)
            .uri(uri.as_str())
            .header(
                CONTENT_TYPE,
                HeaderValue::from_static("application/x-www-form-urlencoded"),
            )
            .body(Bytes::from_static(b"grant_type=client_credentials"))?;
        req.headers_mut().insert(AUTHORIZATION, {
            let mut value: HeaderValue = format!("Basic {basic}").parse()?;
            value.set_sensitive(true);
            value
        });

        debug!("requesting access token from {uri}");
        let resp = ctx.http_send_as_string(req).await?;

        if !resp.status().is_success() {
            return Err(Error::credential_invalid(format!(
                "token request failed with status {}: {}",
                resp.status(),
                resp.body()
            )));
        }

        Ok(resp.into_body())
    }
}

#[derive(Deserialize)]
struct TokenResponse {
    access_token: String,
    #[serde(default)]
    expires_in: Option<i64>,
}

#[async_trait]
impl ProvideCredential for OAuthClientCredentialProvider {
    type Credential = Credential;

    async fn provide_credential(&self, ctx: &Context) -> Result<Option<Self::Credential>> {
        if self.config.client_id.is_none() || self.config.client_secret.is_none() {
            return Ok(None);
        }

        let raw = self.request_token(ctx).await?;
        let resp: TokenResponse = serde_json::from_str(&raw)
            .map_err(|e| Error::credential_invalid("failed to parse token response").with_source(e))?;

        let expires_at = resp
            .expires_in
            .and_then(TimeDelta::try_seconds)
            .map(|d| Utc::now() + d);

        Ok(Some(Credential::new(resp.access_token, expires_at)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use banksign_core::{HttpSend, SigningCredential};
    use http::StatusCode;
    use std::sync::Mutex;

    #[derive(Debug)]
    struct MockHttpSend {
        requests: Arc<Mutex<Vec<http::Request<Bytes>>>>,
        status: StatusCode,
        body: &'static str,
    }

    #[async_trait]
    impl HttpSend for MockHttpSend {
        async fn http_send(&self, req: http::Request<Bytes>) -> Result<http::Response<Bytes>> {
            self.requests.lock().unwrap().push(req);
            Ok(http::Response::builder()
                .status(self.status)
                .body(Bytes::from_static(self.body.as_bytes()))
                .expect("response must be valid"))
        }
    }

    fn test_config() -> Arc<Config> {
        Arc::new(
            Config::new()
                .with_host("sandbox.bank.example")
                .with_client_id("client-id")
                .with_client_secret("client-secret"),
        )
    }

    #[tokio::test]
    async fn test_token_bootstrap_wire_shape() -> anyhow::Result<()> {
        let requests = Arc::new(Mutex::new(Vec::new()));
        let ctx = Context::new().with_http_send(MockHttpSend {
            requests: requests.clone(),
            status: StatusCode::OK,
            body: r#"{"access_token":"token123","token_type":"Bearer","expires_in":3600}"#,
        });

        let provider = OAuthClientCredentialProvider::new(test_config());
        let cred = provider.provide_credential(&ctx).await?.unwrap();

        assert_eq!(cred.access_token, "token123");
        assert!(cred.expires_at.is_some());
        assert!(cred.is_valid());

        let requests = requests.lock().unwrap();
        let req = &requests[0];
        assert_eq!(req.method(), Method::POST);
        assert_eq!(
            req.uri().to_string(),
            "https://sandbox.bank.example:443/api/oauth/token"
        );
        // base64("client-id:client-secret")
        assert_eq!(
            req.headers().get(AUTHORIZATION).unwrap(),
            "Basic Y2xpZW50LWlkOmNsaWVudC1zZWNyZXQ="
        );
        assert_eq!(
            req.headers().get(CONTENT_TYPE).unwrap(),
            "application/x-www-form-urlencoded"
        );
        assert_eq!(req.body().as_ref(), b"grant_type=client_credentials");

        Ok(())
    }

    #[tokio::test]
    async fn test_non_success_status_is_credential_invalid() {
        let ctx = Context::new().with_http_send(MockHttpSend {
            requests: Arc::new(Mutex::new(Vec::new())),
            status: StatusCode::UNAUTHORIZED,
            body: r#"{"ErrorCode":"ESB-14-009"}"#,
        });

        let provider = OAuthClientCredentialProvider::new(test_config());
        let err = provider.provide_credential(&ctx).await.unwrap_err();
        assert_eq!(err.kind(), banksign_core::ErrorKind::CredentialInvalid);
    }

    #[tokio::test]
    async fn test_missing_client_credentials_yields_none() -> anyhow::Result<()> {
        let ctx = Context::new();
        let provider = OAuthClientCredentialProvider::new(Arc::new(
            Config::new().with_host("sandbox.bank.example"),
        ));

        assert!(provider.provide_credential(&ctx).await?.is_none());
        Ok(())
    }
}
