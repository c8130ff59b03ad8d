use std::fmt::{Debug, Formatter};

use banksign_core::utils::Redact;
use banksign_core::SigningCredential;
use chrono::{DateTime, Utc};

/// Bearer credential obtained from the OAuth token bootstrap.
#[derive(Clone)]
pub struct Credential {
    /// Access token carried in the `Authorization` header and bound into
    /// every request signature.
    pub access_token: String,
    /// Expiration time for this credential.
    pub expires_at: Option<DateTime<Utc>>,
}

impl Credential {
    /// Create a new credential.
    pub fn new(access_token: impl Into<String>, expires_at: Option<DateTime<Utc>>) -> Self {
        Self {
            access_token: access_token.into(),
            expires_at,
        }
    }
}

impl Debug for Credential {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credential")
            .field("access_token", &Redact::from(&self.access_token))
            .field("expires_at", &self.expires_at)
            .finish()
    }
}

impl SigningCredential for Credential {
    fn is_valid(&self) -> bool {
        if self.access_token.is_empty() {
            return false;
        }

        // Take a 2 minute skew to avoid signing with a token that expires
        // mid-flight.
        if let Some(valid) = self
            .expires_at
            .map(|v| v > Utc::now() + chrono::TimeDelta::minutes(2))
        {
            return valid;
        }

        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_token_is_invalid() {
        assert!(!Credential::new("", None).is_valid());
    }

    #[test]
    fn test_token_without_expiry_is_valid() {
        assert!(Credential::new("token123", None).is_valid());
    }

    #[test]
    fn test_expired_token_is_invalid() {
        let expired = Utc::now() - chrono::TimeDelta::minutes(5);
        assert!(!Credential::new("token123", Some(expired)).is_valid());
    }

    #[test]
    fn test_debug_redacts_token() {
        let cred = Credential::new("super-secret-access-token", None);
        assert!(!format!("{cred:?}").contains("super-secret-access-token"));
    }
}
