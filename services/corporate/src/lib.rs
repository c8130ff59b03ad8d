//! Signed client for a corporate banking REST API.
//!
//! Every business call carries a bearer token, an API key, a timestamp in
//! the bank's time zone and an HMAC-SHA256 signature binding the method,
//! path, token, body hash and timestamp. The only unsigned call is the OAuth
//! client-credentials bootstrap that obtains the bearer token.
//!
//! ## Example
//!
//! ```no_run
//! use banksign_core::Context;
//! use banksign_corporate::{Client, Config};
//! use banksign_http_send_reqwest::ReqwestHttpSend;
//!
//! # async fn example() -> banksign_core::Result<()> {
//! let config = Config::new()
//!     .with_sandbox(true)
//!     .with_corporate_id("CORPID")
//!     .with_client_id("client-id")
//!     .with_client_secret("client-secret")
//!     .with_api_key("api-key")
//!     .with_secret_key("secret-key");
//!
//! let ctx = Context::new().with_http_send(ReqwestHttpSend::with_timeout(config.timeout)?);
//! let client = Client::new(ctx, config);
//!
//! let raw = client.balance_inquiry(&["0201245680"]).await?;
//! println!("{raw}");
//! # Ok(())
//! # }
//! ```

mod config;
pub use config::Config;

mod credential;
pub use credential::Credential;

mod provide_credential;
pub use provide_credential::{
    DefaultCredentialProvider, OAuthClientCredentialProvider, StaticCredentialProvider,
};

mod sign_request;
pub use sign_request::RequestSigner;

mod transfer;
pub use transfer::TransferRequest;

mod client;
pub use client::Client;

mod constants;
