use std::sync::Arc;

use async_trait::async_trait;
use banksign_core::hash::{hex_sha256, EMPTY_STRING_SHA256};
use banksign_core::sign;
use banksign_core::time::{format_timestamp, now_in, DateTime};
use banksign_core::{Context, Error, Result, SignRequest, SigningRequest};
use bytes::Bytes;
use http::header::{AUTHORIZATION, CONTENT_TYPE};
use http::{HeaderName, HeaderValue};
use log::debug;

use crate::constants::*;
use crate::{Config, Credential};

/// RequestSigner that implements the bank's HMAC signature scheme.
///
/// Every signed call carries:
///
/// ```text
/// Content-Type:     application/json
/// Authorization:    Bearer <token>
/// X-Bank-Key:       <api_key>
/// X-Bank-Timestamp: <timestamp>
/// X-Bank-Signature: HMAC-SHA256(secret_key, METHOD:PATH:TOKEN:BODY_SHA256:TIMESTAMP)
/// ```
///
/// The body hash is computed over the exact bytes sent on the wire; callers
/// serialize bodies canonically (key-sorted, slashes unescaped) before the
/// request reaches this signer.
#[derive(Debug)]
pub struct RequestSigner {
    config: Arc<Config>,
    time: Option<DateTime>,
}

impl RequestSigner {
    /// Create a new signer from the client config.
    pub fn new(config: Arc<Config>) -> Self {
        Self { config, time: None }
    }

    /// Specify the signing time.
    ///
    /// # Note
    ///
    /// We should always take current time to sign requests.
    /// Only use this function for testing.
    #[cfg(test)]
    pub fn with_time(mut self, time: DateTime) -> Self {
        self.time = Some(time);
        self
    }
}

#[async_trait]
impl SignRequest for RequestSigner {
    type Credential = Credential;

    async fn sign_request(
        &self,
        _: &Context,
        parts: &mut http::request::Parts,
        body: &Bytes,
        credential: Option<&Self::Credential>,
    ) -> Result<()> {
        let cred = credential.ok_or_else(|| Error::credential_invalid("missing credential"))?;
        let api_key = self
            .config
            .api_key
            .as_ref()
            .ok_or_else(|| Error::config_invalid("api_key is not configured"))?;
        let secret_key = self
            .config
            .secret_key
            .as_ref()
            .ok_or_else(|| Error::config_invalid("secret_key is not configured"))?;

        let mut ctx = SigningRequest::build(parts)?;

        // One instant per request: the timestamp header, the signed string
        // and any timestamp embedded in the body must never diverge. A
        // caller that already stamped the request presets the header, so
        // only read the clock when it did not.
        let timestamp = match ctx.headers.get(X_BANK_TIMESTAMP) {
            Some(v) => v.to_str()?.to_string(),
            None => {
                let now = self.time.unwrap_or_else(|| now_in(self.config.timezone));
                format_timestamp(&now)
            }
        };

        let body_hash = if body.is_empty() {
            EMPTY_STRING_SHA256.to_string()
        } else {
            hex_sha256(body)
        };

        let string_to_sign = sign::string_to_sign(
            &ctx.method,
            &ctx.path_and_query(),
            &cred.access_token,
            &body_hash,
            &timestamp,
        );
        let signature = sign::sign(secret_key, &string_to_sign);

        debug!("signing {} {}", ctx.method, ctx.path_and_query());

        ctx.headers
            .insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        ctx.headers.insert(AUTHORIZATION, {
            let mut value: HeaderValue = format!("Bearer {}", cred.access_token).parse()?;
            value.set_sensitive(true);

            value
        });
        ctx.headers
            .insert(HeaderName::from_static(X_BANK_KEY), api_key.parse()?);
        ctx.headers.insert(
            HeaderName::from_static(X_BANK_TIMESTAMP),
            timestamp.parse()?,
        );
        ctx.headers.insert(
            HeaderName::from_static(X_BANK_SIGNATURE),
            signature.parse()?,
        );

        ctx.apply(parts)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use banksign_core::time::{datetime_in, DEFAULT_TIMEZONE};
    use http::Method;
    use pretty_assertions::assert_eq;

    fn test_signer() -> RequestSigner {
        let config = Arc::new(
            Config::new()
                .with_host("sandbox.bank.example")
                .with_api_key("api-key")
                .with_secret_key("secret"),
        );

        RequestSigner::new(config)
            .with_time(datetime_in(DEFAULT_TIMEZONE, 2024, 1, 1, 10, 0, 0).unwrap())
    }

    fn parts_for(method: Method, uri: &str) -> http::request::Parts {
        let (parts, _) = http::Request::builder()
            .method(method)
            .uri(uri)
            .body(Bytes::new())
            .unwrap()
            .into_parts();
        parts
    }

    #[tokio::test]
    async fn test_signature_known_value_empty_body() -> anyhow::Result<()> {
        let signer = test_signer();
        let cred = Credential::new("token123", None);

        let mut parts = parts_for(
            Method::GET,
            "https://sandbox.bank.example:443/banking/v3/corporates/1/accounts/001",
        );
        signer
            .sign_request(&Context::new(), &mut parts, &Bytes::new(), Some(&cred))
            .await?;

        assert_eq!(
            parts.headers.get(X_BANK_TIMESTAMP).unwrap(),
            "2024-01-01T10:00:00.000+0700"
        );
        // HMAC-SHA256("secret",
        //   "GET:/banking/v3/corporates/1/accounts/001:token123:<sha256 of "">:2024-01-01T10:00:00.000+0700")
        assert_eq!(
            parts.headers.get(X_BANK_SIGNATURE).unwrap(),
            "d853db14450143075d2d64a3f0320078f21abdf9fe795d64136087e7b25c91e6"
        );

        Ok(())
    }

    #[tokio::test]
    async fn test_preset_timestamp_header_is_reused() -> anyhow::Result<()> {
        // No pinned time; the preset header must win over the clock.
        let config = Arc::new(
            Config::new()
                .with_host("sandbox.bank.example")
                .with_api_key("api-key")
                .with_secret_key("secret"),
        );
        let signer = RequestSigner::new(config);
        let cred = Credential::new("token123", None);

        let mut parts = parts_for(
            Method::GET,
            "https://sandbox.bank.example:443/banking/v3/corporates/1/accounts/001",
        );
        parts.headers.insert(
            HeaderName::from_static(X_BANK_TIMESTAMP),
            HeaderValue::from_static("2024-01-01T10:00:00.000+0700"),
        );

        signer
            .sign_request(&Context::new(), &mut parts, &Bytes::new(), Some(&cred))
            .await?;

        assert_eq!(
            parts.headers.get(X_BANK_TIMESTAMP).unwrap(),
            "2024-01-01T10:00:00.000+0700"
        );
        // Same fixture as the known-value test: the signature is computed
        // over the preset timestamp, not a fresh clock read.
        assert_eq!(
            parts.headers.get(X_BANK_SIGNATURE).unwrap(),
            "d853db14450143075d2d64a3f0320078f21abdf9fe795d64136087e7b25c91e6"
        );

        Ok(())
    }

    #[tokio::test]
    async fn test_signature_is_deterministic() -> anyhow::Result<()> {
        let cred = Credential::new("token123", None);

        let mut first = parts_for(
            Method::GET,
            "https://sandbox.bank.example:443/general/rate/deposit",
        );
        let mut second = parts_for(
            Method::GET,
            "https://sandbox.bank.example:443/general/rate/deposit",
        );

        test_signer()
            .sign_request(&Context::new(), &mut first, &Bytes::new(), Some(&cred))
            .await?;
        test_signer()
            .sign_request(&Context::new(), &mut second, &Bytes::new(), Some(&cred))
            .await?;

        assert_eq!(
            first.headers.get(X_BANK_SIGNATURE).unwrap(),
            second.headers.get(X_BANK_SIGNATURE).unwrap()
        );

        Ok(())
    }

    #[tokio::test]
    async fn test_shared_header_set_present() -> anyhow::Result<()> {
        let signer = test_signer();
        let cred = Credential::new("token123", None);

        let mut parts = parts_for(
            Method::GET,
            "https://sandbox.bank.example:443/general/rate/forex?Currency=USD&RateType=erate",
        );
        signer
            .sign_request(&Context::new(), &mut parts, &Bytes::new(), Some(&cred))
            .await?;

        assert_eq!(parts.headers.get(CONTENT_TYPE).unwrap(), "application/json");
        assert_eq!(parts.headers.get(AUTHORIZATION).unwrap(), "Bearer token123");
        assert_eq!(parts.headers.get(X_BANK_KEY).unwrap(), "api-key");
        assert!(parts.headers.contains_key(X_BANK_TIMESTAMP));
        assert!(parts.headers.contains_key(X_BANK_SIGNATURE));

        Ok(())
    }

    #[tokio::test]
    async fn test_body_changes_signature() -> anyhow::Result<()> {
        let cred = Credential::new("token123", None);

        let mut empty = parts_for(
            Method::POST,
            "https://sandbox.bank.example:443/banking/corporates/transfers",
        );
        let mut with_body = parts_for(
            Method::POST,
            "https://sandbox.bank.example:443/banking/corporates/transfers",
        );

        test_signer()
            .sign_request(&Context::new(), &mut empty, &Bytes::new(), Some(&cred))
            .await?;
        test_signer()
            .sign_request(
                &Context::new(),
                &mut with_body,
                &Bytes::from_static(br#"{"a":"1"}"#),
                Some(&cred),
            )
            .await?;

        assert_ne!(
            empty.headers.get(X_BANK_SIGNATURE).unwrap(),
            with_body.headers.get(X_BANK_SIGNATURE).unwrap()
        );

        Ok(())
    }

    #[tokio::test]
    async fn test_missing_credential_fails() {
        let signer = test_signer();
        let mut parts = parts_for(
            Method::GET,
            "https://sandbox.bank.example:443/general/rate/deposit",
        );

        let err = signer
            .sign_request(&Context::new(), &mut parts, &Bytes::new(), None)
            .await
            .unwrap_err();
        assert_eq!(err.kind(), banksign_core::ErrorKind::CredentialInvalid);
    }
}
