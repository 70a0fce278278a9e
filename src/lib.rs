//! # zarinpal - Zarinpal payment gateway client
//!
//! An async client for the Zarinpal v4 payment API. It creates payments,
//! builds the payer redirect URL and verifies payments once the payer
//! returns to the merchant's callback.
//!
//! ```no_run
//! use zarinpal::{NewPayment, ZarinpalClient};
//!
//! # async fn run() -> zarinpal::Result<()> {
//! let client = ZarinpalClient::with_mode("00000000-0000-0000-0000-000000000000", true)?;
//!
//! let payment = NewPayment::new(10_000, "Order #1", "https://shop.example/callback");
//! let created = client.new_payment(&payment).await?;
//! println!("pay at {}", client.payment_url(&created.authority));
//!
//! let status = client.check_payment_status(10_000, &created.authority).await?;
//! println!("paid: {}, already verified: {}", status.is_successful, status.is_repeated);
//! # Ok(())
//! # }
//! ```

pub mod client;
pub mod config;
pub mod envelope;
pub mod error;
pub mod status;
pub mod types;

// Re-exports for convenience
pub use client::{with_cancellation, ZarinpalClient};
pub use config::ClientConfig;
pub use error::{Result, ZarinpalError};
pub use status::{classify, PaymentStatus};
pub use types::*;

/// Current version of the zarinpal library
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version_constants() {
        assert!(!VERSION.is_empty());
    }

    #[test]
    fn test_codes() {
        assert_eq!(codes::PAYMENT_SUCCESS, 100);
        assert_eq!(codes::PAYMENT_ALREADY_VERIFIED, 101);
    }

    #[test]
    fn test_endpoints() {
        assert_eq!(hosts::REQUEST_ENDPOINT, "request.json");
        assert_eq!(hosts::VERIFY_ENDPOINT, "verify.json");
    }
}
