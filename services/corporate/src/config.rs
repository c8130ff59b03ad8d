use std::fmt::{Debug, Formatter};
use std::time::Duration;

use banksign_core::time::DEFAULT_TIMEZONE;
use banksign_core::utils::Redact;
use banksign_core::Context;
use chrono_tz::Tz;

use crate::constants::*;

/// Config carries the credentials and settings for one bank client.
///
/// Everything here is immutable once the client is constructed; there is no
/// process-wide state.
#[derive(Clone)]
pub struct Config {
    /// Corporate identifier embedded in account-scoped request paths.
    ///
    /// Will be loaded from env value [`BANK_CORPORATE_ID`] if not set.
    pub corporate_id: Option<String>,
    /// OAuth client id for the token bootstrap.
    ///
    /// Will be loaded from env value [`BANK_CLIENT_ID`] if not set.
    pub client_id: Option<String>,
    /// OAuth client secret for the token bootstrap.
    ///
    /// Will be loaded from env value [`BANK_CLIENT_SECRET`] if not set.
    pub client_secret: Option<String>,
    /// API key sent in the `X-Bank-Key` header.
    ///
    /// Will be loaded from env value [`BANK_API_KEY`] if not set.
    pub api_key: Option<String>,
    /// Secret key used as the HMAC key for request signatures.
    ///
    /// Will be loaded from env value [`BANK_SECRET_KEY`] if not set.
    pub secret_key: Option<String>,

    /// Target the bank's sandbox environment instead of production.
    ///
    /// Selects which documented host `base_uri` falls back to; an explicit
    /// `host` always wins.
    pub sandbox: bool,
    /// URI scheme, `https` unless overridden.
    pub scheme: String,
    /// API host. When unset, the documented host for the selected
    /// environment is used.
    pub host: Option<String>,
    /// API port, 443 unless overridden.
    pub port: u16,
    /// Time zone used for request timestamps.
    pub timezone: Tz,
    /// Request timeout handed to the transport.
    pub timeout: Duration,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            corporate_id: None,
            client_id: None,
            client_secret: None,
            api_key: None,
            secret_key: None,
            sandbox: false,
            scheme: "https".to_string(),
            host: None,
            port: 443,
            timezone: DEFAULT_TIMEZONE,
            timeout: Duration::from_secs(30),
        }
    }
}

impl Config {
    /// Create a new Config
    pub fn new() -> Self {
        Self::default()
    }

    /// Set corporate_id
    pub fn with_corporate_id(mut self, corporate_id: impl Into<String>) -> Self {
        self.corporate_id = Some(corporate_id.into());
        self
    }

    /// Set client_id
    pub fn with_client_id(mut self, client_id: impl Into<String>) -> Self {
        self.client_id = Some(client_id.into());
        self
    }

    /// Set client_secret
    pub fn with_client_secret(mut self, client_secret: impl Into<String>) -> Self {
        self.client_secret = Some(client_secret.into());
        self
    }

    /// Set api_key
    pub fn with_api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = Some(api_key.into());
        self
    }

    /// Set secret_key
    pub fn with_secret_key(mut self, secret_key: impl Into<String>) -> Self {
        self.secret_key = Some(secret_key.into());
        self
    }

    /// Target the sandbox environment.
    pub fn with_sandbox(mut self, sandbox: bool) -> Self {
        self.sandbox = sandbox;
        self
    }

    /// Set scheme
    pub fn with_scheme(mut self, scheme: impl Into<String>) -> Self {
        self.scheme = scheme.into();
        self
    }

    /// Set host
    pub fn with_host(mut self, host: impl Into<String>) -> Self {
        self.host = Some(host.into());
        self
    }

    /// Set port
    pub fn with_port(mut self, port: u16) -> Self {
        self.port = port;
        self
    }

    /// Set the time zone used for request timestamps.
    pub fn with_timezone(mut self, timezone: Tz) -> Self {
        self.timezone = timezone;
        self
    }

    /// Set the request timeout handed to the transport.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Load unset credential fields from the environment.
    pub fn from_env(mut self, ctx: &Context) -> Self {
        if let Some(v) = ctx.env_var(BANK_CORPORATE_ID) {
            self.corporate_id.get_or_insert(v);
        }
        if let Some(v) = ctx.env_var(BANK_CLIENT_ID) {
            self.client_id.get_or_insert(v);
        }
        if let Some(v) = ctx.env_var(BANK_CLIENT_SECRET) {
            self.client_secret.get_or_insert(v);
        }
        if let Some(v) = ctx.env_var(BANK_API_KEY) {
            self.api_key.get_or_insert(v);
        }
        if let Some(v) = ctx.env_var(BANK_SECRET_KEY) {
            self.secret_key.get_or_insert(v);
        }

        self
    }

    /// Derive the base URI, `scheme://host:port`.
    ///
    /// When no host is configured the environment flag picks one of the
    /// documented hosts: [`SANDBOX_HOST`] if `sandbox` is set,
    /// [`DEFAULT_HOST`] otherwise.
    pub fn base_uri(&self) -> String {
        let host = self.host.as_deref().unwrap_or(if self.sandbox {
            SANDBOX_HOST
        } else {
            DEFAULT_HOST
        });

        format!("{}://{}:{}", self.scheme, host, self.port)
    }
}

impl Debug for Config {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Config")
            .field("corporate_id", &self.corporate_id)
            .field("client_id", &self.client_id.as_ref().map(Redact::from))
            .field(
                "client_secret",
                &self.client_secret.as_ref().map(Redact::from),
            )
            .field("api_key", &self.api_key.as_ref().map(Redact::from))
            .field("secret_key", &self.secret_key.as_ref().map(Redact::from))
            .field("sandbox", &self.sandbox)
            .field("scheme", &self.scheme)
            .field("host", &self.host)
            .field("port", &self.port)
            .field("timezone", &self.timezone)
            .field("timeout", &self.timeout)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use banksign_core::StaticEnv;
    use std::collections::HashMap;

    #[test]
    fn test_base_uri() {
        let config = Config::new().with_host("sandbox.bank.example");
        assert_eq!(config.base_uri(), "https://sandbox.bank.example:443");

        let config = Config::new()
            .with_scheme("http")
            .with_host("localhost")
            .with_port(8080);
        assert_eq!(config.base_uri(), "http://localhost:8080");
    }

    #[test]
    fn test_sandbox_flag_selects_default_host() {
        assert_eq!(Config::new().base_uri(), "https://api.bank.example:443");
        assert_eq!(
            Config::new().with_sandbox(true).base_uri(),
            "https://sandbox.bank.example:443"
        );
    }

    #[test]
    fn test_explicit_host_wins_over_sandbox_flag() {
        let config = Config::new()
            .with_sandbox(true)
            .with_host("intranet.bank.example");
        assert_eq!(config.base_uri(), "https://intranet.bank.example:443");
    }

    #[test]
    fn test_from_env_fills_unset_fields_only() {
        let ctx = Context::new().with_env(StaticEnv {
            envs: HashMap::from_iter([
                (BANK_CORPORATE_ID.to_string(), "ENVCORP".to_string()),
                (BANK_API_KEY.to_string(), "env-api-key".to_string()),
            ]),
        });

        let config = Config::new().with_corporate_id("CORPID").from_env(&ctx);

        assert_eq!(config.corporate_id.as_deref(), Some("CORPID"));
        assert_eq!(config.api_key.as_deref(), Some("env-api-key"));
        assert!(config.client_id.is_none());
    }

    #[test]
    fn test_debug_redacts_secrets() {
        let config = Config::new()
            .with_client_secret("a-very-long-client-secret")
            .with_secret_key("short");

        let out = format!("{config:?}");
        assert!(!out.contains("a-very-long-client-secret"));
        assert!(!out.contains("short"));
    }
}
