mod default;
pub use default::DefaultCredentialProvider;

mod oauth;
pub use oauth::OAuthClientCredentialProvider;

mod static_provider;
pub use static_provider::StaticCredentialProvider;
