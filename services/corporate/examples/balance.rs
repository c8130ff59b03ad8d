//! Query account balances against the sandbox.
//!
//! Required environment variables:
//! - `BANK_CORPORATE_ID`
//! - `BANK_CLIENT_ID`
//! - `BANK_CLIENT_SECRET`
//! - `BANK_API_KEY`
//! - `BANK_SECRET_KEY`
//!
//! Run with: `cargo run --example balance -- 0201245680`

use banksign_core::{Context, OsEnv};
use banksign_corporate::{Client, Config};
use banksign_http_send_reqwest::ReqwestHttpSend;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    env_logger::init();

    let ctx = Context::new().with_env(OsEnv);
    let config = Config::new().with_sandbox(true).from_env(&ctx);

    let ctx = ctx.with_http_send(ReqwestHttpSend::with_timeout(config.timeout)?);
    let client = Client::new(ctx, config);

    let accounts: Vec<String> = std::env::args().skip(1).collect();
    let accounts: Vec<&str> = accounts.iter().map(String::as_str).collect();

    let raw = client.balance_inquiry(&accounts).await?;
    println!("{raw}");

    Ok(())
}
