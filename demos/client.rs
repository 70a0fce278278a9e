//! Example client creating and verifying a Zarinpal payment
//!
//! Reads its configuration from `ZARINPAL_*` environment variables, e.g.
//! `ZARINPAL_MERCHANT_ID=... ZARINPAL_SANDBOX=true cargo run --example client`.

use zarinpal::{ClientConfig, Metadata, NewPayment, ZarinpalClient};

#[tokio::main]
async fn main() -> std::result::Result<(), Box<dyn std::error::Error>> {
    // Initialize tracing
    tracing_subscriber::fmt::init();

    let config = ClientConfig::from_env()?;
    let client = ZarinpalClient::with_config(config)?;
    println!("Using {:?} gateway at {}", client.environment(), client.api_base_url());

    let amount = 10_000;
    let payment = NewPayment::new(amount, "Demo payment", "http://localhost:8080/callback")
        .with_metadata(
            Metadata::new()
                .with_email("test@example.com")
                .with_order_id("DEMO-1"),
        );

    let created = match client.new_payment(&payment).await {
        Ok(created) => created,
        Err(e) if e.is_gateway_error() => {
            println!("Gateway rejected the payment: {}", e);
            return Ok(());
        }
        Err(e) => return Err(e.into()),
    };

    println!("Authority: {}", created.authority);
    println!("Send the payer to: {}", client.payment_url(&created.authority));

    // Verification only succeeds once the payer has completed the payment.
    match client.check_payment_status(amount, &created.authority).await {
        Ok(status) if status.is_successful => {
            println!(
                "Paid (ref {:?}, already verified: {})",
                status.ref_id, status.is_repeated
            );
        }
        Ok(status) => println!("Not paid: {}", status.message),
        Err(e) => println!("Verification failed: {}", e),
    }

    Ok(())
}
