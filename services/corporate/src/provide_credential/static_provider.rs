use async_trait::async_trait;
use banksign_core::{Context, ProvideCredential, Result};

use crate::Credential;

/// StaticCredentialProvider returns a fixed access token.
///
/// Useful for tests or for callers that obtained a token out of band.
#[derive(Debug)]
pub struct StaticCredentialProvider {
    access_token: String,
}

impl StaticCredentialProvider {
    /// Create a provider with a fixed access token.
    pub fn new(access_token: impl Into<String>) -> Self {
        Self {
            access_token: access_token.into(),
        }
    }
}

#[async_trait]
impl ProvideCredential for StaticCredentialProvider {
    type Credential = Credential;

    async fn provide_credential(&self, _: &Context) -> Result<Option<Self::Credential>> {
        Ok(Some(Credential::new(self.access_token.clone(), None)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_static_provider() -> anyhow::Result<()> {
        let provider = StaticCredentialProvider::new("token123");
        let cred = provider.provide_credential(&Context::new()).await?.unwrap();
        assert_eq!(cred.access_token, "token123");
        assert!(cred.expires_at.is_none());
        Ok(())
    }
}
