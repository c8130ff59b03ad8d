use percent_encoding::AsciiSet;
use percent_encoding::NON_ALPHANUMERIC;

// Headers used by the signing scheme.
pub const X_BANK_KEY: &str = "x-bank-key";
pub const X_BANK_TIMESTAMP: &str = "x-bank-timestamp";
pub const X_BANK_SIGNATURE: &str = "x-bank-signature";

// Env values used to load configuration.
pub const BANK_CORPORATE_ID: &str = "BANK_CORPORATE_ID";
pub const BANK_CLIENT_ID: &str = "BANK_CLIENT_ID";
pub const BANK_CLIENT_SECRET: &str = "BANK_CLIENT_SECRET";
pub const BANK_API_KEY: &str = "BANK_API_KEY";
pub const BANK_SECRET_KEY: &str = "BANK_SECRET_KEY";

// Documented API hosts, used when no host is configured.
pub const DEFAULT_HOST: &str = "api.bank.example";
pub const SANDBOX_HOST: &str = "sandbox.bank.example";

// Request paths.
pub const PATH_OAUTH_TOKEN: &str = "/api/oauth/token";
pub const PATH_BALANCE: &str = "/banking/v3/corporates";
pub const PATH_ATM_LOCATIONS: &str = "/general/info-bank/atm";
pub const PATH_FOREX_RATE: &str = "/general/rate/forex";
pub const PATH_DEPOSIT_RATE: &str = "/general/rate/deposit";
pub const PATH_FUND_TRANSFER: &str = "/banking/corporates/transfers";
pub const PATH_PAYMENT_STATUS: &str = "/va/payments";

/// All transfers are denominated in the bank's home currency.
pub const CURRENCY_CODE: &str = "IDR";

/// At most this many account numbers per balance inquiry.
pub const MAX_BALANCE_ACCOUNTS: usize = 20;

/// AsciiSet for encoding values embedded in request paths.
///
/// Encodes every byte except unreserved characters, so the `,` joining
/// account numbers becomes `%2C`.
pub static BANK_URI_ENCODE_SET: AsciiSet = NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'.')
    .remove(b'_')
    .remove(b'~');
