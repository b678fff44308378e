//! Start an Aadhaar-based ABHA registration from the command line.
//!
//! Reads `EKA_*` variables (a `.env` file in the working directory is
//! honoured), logs in, and sends the Aadhaar OTP.
//!
//! ```text
//! EKA_CLIENT_ID=... EKA_CLIENT_SECRET=... \
//!     cargo run -p eka-infra --example quickstart -- 123456789012
//! ```

use anyhow::{bail, Context};
use eka_domain::{AadhaarInitRequest, RequestHeaders};
use eka_infra::{config, init_tracing, EkaClient};
use tracing::info;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let config = config::load_from_env()?.build()?;
    init_tracing(config.log_level)?;

    let Some(aadhaar) = std::env::args().nth(1) else {
        bail!("usage: quickstart <aadhaar-number>");
    };

    let client = EkaClient::new(config)?;
    client.utils().validate_aadhaar_number(&aadhaar)?;

    if !client.ping().await.context("health check")? {
        bail!("Eka API is not healthy");
    }

    let credentials = client.login().await.context("login")?;
    info!(origin = %credentials.source, "Logged in");

    let headers = RequestHeaders::new().partner_id("quickstart");
    let txn = client
        .registration()
        .aadhaar_init(&headers, &AadhaarInitRequest::new(aadhaar))
        .await
        .context("aadhaar init")?;

    info!(txn_id = %txn.txn_id, hint = ?txn.hint, "OTP sent");
    Ok(())
}
