use std::sync::Arc;

use banksign_core::time::{format_timestamp, now_in};
use banksign_core::{canonical, Context, Error, ProvideCredential, Result, Signer};
use bytes::Bytes;
use http::{HeaderName, Method};
use log::debug;
use percent_encoding::utf8_percent_encode;
use serde_json::{json, Value};

use crate::constants::*;
use crate::provide_credential::DefaultCredentialProvider;
use crate::sign_request::RequestSigner;
use crate::transfer::normalize;
use crate::{Config, Credential, TransferRequest};

/// Client exposing one method per bank operation.
///
/// Each call is a stateless request/response exchange: inputs are validated,
/// the request is built and signed, the transport sends it, and the raw
/// response body comes back for the caller to parse. The only shared state
/// is the immutable [`Config`] and the signer's in-memory credential cache,
/// so the client is safe for concurrent use.
#[derive(Debug, Clone)]
pub struct Client {
    ctx: Context,
    config: Arc<Config>,
    signer: Signer<Credential>,
}

impl Client {
    /// Create a client using the default credential provider (the OAuth
    /// client-credentials bootstrap).
    pub fn new(ctx: Context, config: Config) -> Self {
        let config = Arc::new(config);
        let provider = DefaultCredentialProvider::new(config.clone());

        Self::with_credential_provider(ctx, config, provider)
    }

    /// Create a client with a custom credential provider.
    pub fn with_credential_provider(
        ctx: Context,
        config: Arc<Config>,
        provider: impl ProvideCredential<Credential = Credential>,
    ) -> Self {
        let signer = Signer::new(ctx.clone(), provider, RequestSigner::new(config.clone()));

        Self {
            ctx,
            config,
            signer,
        }
    }

    /// Balance inquiry for up to 20 accounts.
    ///
    /// Account numbers are sorted ascending, comma-joined and URL-encoded
    /// into the request path.
    pub async fn balance_inquiry(&self, accounts: &[&str]) -> Result<String> {
        if accounts.is_empty() {
            return Err(Error::request_invalid(
                "account number list must not be empty",
            ));
        }
        if accounts.len() > MAX_BALANCE_ACCOUNTS {
            return Err(Error::request_invalid(format!(
                "at most {MAX_BALANCE_ACCOUNTS} account numbers per balance inquiry, got {}",
                accounts.len()
            )));
        }

        let mut sorted = accounts.to_vec();
        sorted.sort_unstable();
        let joined = sorted.join(",");
        let encoded = utf8_percent_encode(&joined, &BANK_URI_ENCODE_SET).to_string();

        let corporate_id = self.corporate_id()?;
        self.execute(
            Method::GET,
            format!("{PATH_BALANCE}/{corporate_id}/accounts/{encoded}"),
            None,
        )
        .await
    }

    /// Account statement between two dates (`yyyy-MM-dd`).
    pub async fn account_statement(
        &self,
        account: &str,
        start_date: &str,
        end_date: &str,
    ) -> Result<String> {
        if account.is_empty() {
            return Err(Error::request_invalid("account number must not be empty"));
        }

        let query = canonical::encode(
            "=",
            "&",
            &json!({
                "StartDate": start_date,
                "EndDate": end_date,
            }),
        )?;

        let corporate_id = self.corporate_id()?;
        self.execute(
            Method::GET,
            format!("{PATH_BALANCE}/{corporate_id}/accounts/{account}/statements?{query}"),
            None,
        )
        .await
    }

    /// Nearest ATM locations around a coordinate.
    pub async fn atm_locations(
        &self,
        latitude: &str,
        longitude: &str,
        count: u32,
        radius: u32,
    ) -> Result<String> {
        let query = canonical::encode(
            "=",
            "&",
            &json!({
                "SearchBy": "Distance",
                "Latitude": latitude,
                "Longitude": longitude,
                "Count": count.to_string(),
                "Radius": radius.to_string(),
            }),
        )?;

        self.execute(Method::GET, format!("{PATH_ATM_LOCATIONS}?{query}"), None)
            .await
    }

    /// Foreign exchange rate for one currency.
    ///
    /// `currency` is uppercased and `rate_type` lowercased before encoding,
    /// matching what the remote signs against.
    pub async fn forex_rate(&self, currency: &str, rate_type: &str) -> Result<String> {
        let query = canonical::encode(
            "=",
            "&",
            &json!({
                "Currency": currency.to_uppercase(),
                "RateType": rate_type.to_lowercase(),
            }),
        )?;

        self.execute(Method::GET, format!("{PATH_FOREX_RATE}?{query}"), None)
            .await
    }

    /// Transfer funds between accounts.
    ///
    /// Identifier and remark fields are normalized (whitespace stripped,
    /// lowercased) and the body is key-sorted before hashing, so the
    /// signature matches the remote's own rendering. The clock is read once:
    /// `TransactionDate`, the timestamp header and the signed string all
    /// carry the same instant.
    pub async fn fund_transfer(&self, transfer: &TransferRequest) -> Result<String> {
        let corporate_id = self.corporate_id()?;
        let timestamp = format_timestamp(&now_in(self.config.timezone));

        let body = json!({
            "Amount": transfer.amount,
            "BeneficiaryAccountNumber": normalize(&transfer.beneficiary_account_number),
            "CorporateID": normalize(&corporate_id),
            "CurrencyCode": CURRENCY_CODE,
            "ReferenceID": normalize(&transfer.reference_id),
            "Remark1": normalize(&transfer.remark1),
            "Remark2": normalize(&transfer.remark2),
            "SourceAccountNumber": normalize(&transfer.source_account_number),
            "TransactionDate": timestamp.as_str(),
            "TransactionID": normalize(&transfer.transaction_id),
        });

        self.execute_with_timestamp(
            Method::POST,
            PATH_FUND_TRANSFER.to_string(),
            Some(&body),
            Some(timestamp),
        )
        .await
    }

    /// Current deposit rates. No body; the signature covers the empty-body
    /// hash.
    pub async fn deposit_rate(&self) -> Result<String> {
        self.execute(Method::GET, PATH_DEPOSIT_RATE.to_string(), None)
            .await
    }

    /// Status of a virtual-account payment.
    pub async fn payment_status(&self, company_code: &str, request_id: &str) -> Result<String> {
        let query = canonical::encode(
            "=",
            "&",
            &json!({
                "CompanyCode": company_code,
                "RequestID": request_id,
            }),
        )?;

        self.execute(Method::GET, format!("{PATH_PAYMENT_STATUS}?{query}"), None)
            .await
    }

    /// Request an access token and return the raw response body.
    ///
    /// This is the unsigned Basic-auth bootstrap; use it when managing
    /// tokens outside the client. The client itself refreshes tokens through
    /// its credential provider automatically.
    pub async fn access_token(&self) -> Result<String> {
        crate::provide_credential::OAuthClientCredentialProvider::new(self.config.clone())
            .request_token(&self.ctx)
            .await
    }

    fn corporate_id(&self) -> Result<String> {
        self.config
            .corporate_id
            .clone()
            .ok_or_else(|| Error::config_invalid("corporate_id is not configured"))
    }

    async fn execute(
        &self,
        method: Method,
        path_and_query: String,
        body: Option<&Value>,
    ) -> Result<String> {
        self.execute_with_timestamp(method, path_and_query, body, None)
            .await
    }

    /// Build, sign and send one request, returning the raw response body.
    ///
    /// The body is serialized canonically here so the bytes hashed by the
    /// signer are exactly the bytes sent on the wire. A caller that embeds a
    /// timestamp in the body passes it along; the signer then signs that
    /// instant instead of reading the clock again.
    async fn execute_with_timestamp(
        &self,
        method: Method,
        path_and_query: String,
        body: Option<&Value>,
        timestamp: Option<String>,
    ) -> Result<String> {
        let body = match body {
            Some(v) => Bytes::from(canonical::canonical_json(v)?),
            None => Bytes::new(),
        };

        let uri = format!("{}{}", self.config.base_uri(), path_and_query);
        let (mut parts, _) = http::Request::builder()
            .method(method)
            .uri(uri.as_str())
            .body(())?
            .into_parts();

        if let Some(ts) = timestamp {
            parts
                .headers
                .insert(HeaderName::from_static(X_BANK_TIMESTAMP), ts.parse()?);
        }

        self.signer.sign(&mut parts, &body).await?;

        let req = http::Request::from_parts(parts, body);
        let resp = self.ctx.http_send_as_string(req).await?;
        debug!("bank replied with status {} for {uri}", resp.status());

        Ok(resp.into_body())
    }
}
