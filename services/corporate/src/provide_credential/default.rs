use std::sync::Arc;

use async_trait::async_trait;
use banksign_core::{Context, ProvideCredential, ProvideCredentialChain, Result};

use crate::provide_credential::OAuthClientCredentialProvider;
use crate::{Config, Credential};

/// DefaultCredentialProvider will try to load a credential from different
/// sources.
///
/// Resolution order:
///
/// 1. OAuth client-credentials bootstrap
#[derive(Debug)]
pub struct DefaultCredentialProvider {
    chain: ProvideCredentialChain<Credential>,
}

impl DefaultCredentialProvider {
    /// Create a new DefaultCredentialProvider.
    pub fn new(config: Arc<Config>) -> Self {
        let chain = ProvideCredentialChain::new().push(OAuthClientCredentialProvider::new(config));

        Self { chain }
    }

    /// Add a credential provider to the front of the default chain.
    ///
    /// # Example
    ///
    /// ```no_run
    /// use std::sync::Arc;
    /// use banksign_corporate::{Config, DefaultCredentialProvider, StaticCredentialProvider};
    ///
    /// let provider = DefaultCredentialProvider::new(Arc::new(Config::new()))
    ///     .push_front(StaticCredentialProvider::new("prefetched-token"));
    /// ```
    pub fn push_front(
        mut self,
        provider: impl ProvideCredential<Credential = Credential> + 'static,
    ) -> Self {
        self.chain = self.chain.push_front(provider);
        self
    }
}

#[async_trait]
impl ProvideCredential for DefaultCredentialProvider {
    type Credential = Credential;

    async fn provide_credential(&self, ctx: &Context) -> Result<Option<Self::Credential>> {
        self.chain.provide_credential(ctx).await
    }
}
