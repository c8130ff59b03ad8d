//! Core components for signing corporate banking API requests.
//!
//! This crate provides the foundational types for the banksign ecosystem:
//! the canonical encoding and signing primitives that every bank-specific
//! crate builds on, plus the abstractions that keep HTTP transport and
//! environment access injectable.
//!
//! ## Overview
//!
//! - **Context**: a container holding the HTTP sender and environment
//!   implementations used during credential loading and request sending
//! - **Traits**: abstract interfaces for credential loading
//!   ([`ProvideCredential`]) and request signing ([`SignRequest`])
//! - **Signer**: the orchestrator that loads a credential when needed and
//!   delegates to the bank-specific [`SignRequest`] implementation
//!
//! The signing scheme implemented by services on top of this crate binds the
//! HTTP method, path, bearer token, body hash and timestamp into one
//! HMAC-SHA256 signature, so [`SignRequest::sign_request`] receives the
//! request body in addition to the request parts.
//!
//! ## Example
//!
//! ```no_run
//! use banksign_core::{Context, ProvideCredential, Result, SignRequest, Signer, SigningCredential};
//! use async_trait::async_trait;
//! use bytes::Bytes;
//!
//! #[derive(Clone, Debug)]
//! struct MyCredential {
//!     token: String,
//! }
//!
//! impl SigningCredential for MyCredential {
//!     fn is_valid(&self) -> bool {
//!         !self.token.is_empty()
//!     }
//! }
//!
//! #[derive(Debug)]
//! struct MyProvider;
//!
//! #[async_trait]
//! impl ProvideCredential for MyProvider {
//!     type Credential = MyCredential;
//!
//!     async fn provide_credential(&self, _: &Context) -> Result<Option<Self::Credential>> {
//!         Ok(Some(MyCredential {
//!             token: "my-token".to_string(),
//!         }))
//!     }
//! }
//!
//! #[derive(Debug)]
//! struct MySigner;
//!
//! #[async_trait]
//! impl SignRequest for MySigner {
//!     type Credential = MyCredential;
//!
//!     async fn sign_request(
//!         &self,
//!         _ctx: &Context,
//!         _parts: &mut http::request::Parts,
//!         _body: &Bytes,
//!         _cred: Option<&Self::Credential>,
//!     ) -> Result<()> {
//!         // Build the headers and signature here.
//!         todo!()
//!     }
//! }
//!
//! # async fn example() -> Result<()> {
//! let ctx = Context::default();
//! let signer = Signer::new(ctx, MyProvider, MySigner);
//!
//! let (mut parts, body) = http::Request::builder()
//!     .method("GET")
//!     .uri("https://api.example.com/banking/v3/corporates/1/accounts/001")
//!     .body(Bytes::new())
//!     .unwrap()
//!     .into_parts();
//! signer.sign(&mut parts, &body).await?;
//! # Ok(())
//! # }
//! ```

// Make sure all our public APIs have docs.
#![warn(missing_docs)]

pub mod canonical;
pub mod hash;
pub mod sign;
pub mod time;
pub mod utils;

mod context;
pub use context::Context;
pub use context::Env;
pub use context::HttpSend;
pub use context::OsEnv;
pub use context::StaticEnv;

mod error;
pub use error::Error;
pub use error::ErrorKind;
pub use error::Result;

mod api;
pub use api::{ProvideCredential, ProvideCredentialChain, SignRequest, SigningCredential};
mod request;
pub use request::SigningRequest;
mod signer;
pub use signer::Signer;
