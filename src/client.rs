//! HTTP client for the Zarinpal payment gateway

use crate::config::ClientConfig;
use crate::envelope;
use crate::status::{self, PaymentStatus};
use crate::types::*;
use crate::{Result, ZarinpalError};
use reqwest::header::CONTENT_TYPE;
use reqwest::Client;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::future::Future;
use tracing::debug;

/// Client bound to one merchant and one gateway environment
#[derive(Clone)]
pub struct ZarinpalClient {
    merchant_id: String,
    environment: Environment,
    api_base_url: String,
    payment_base_url: String,
    /// HTTP client
    client: Client,
}

impl std::fmt::Debug for ZarinpalClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ZarinpalClient")
            .field("merchant_id", &"<redacted>")
            .field("environment", &self.environment)
            .field("api_base_url", &self.api_base_url)
            .field("payment_base_url", &self.payment_base_url)
            .finish()
    }
}

impl ZarinpalClient {
    /// Create a production client for a merchant
    pub fn new(merchant_id: impl Into<String>) -> Result<Self> {
        Self::with_mode(merchant_id, false)
    }

    /// Create a client for a merchant, on the sandbox when `sandbox` is set
    pub fn with_mode(merchant_id: impl Into<String>, sandbox: bool) -> Result<Self> {
        Self::with_config(ClientConfig::new(merchant_id).sandbox(sandbox))
    }

    /// Create a client from a full configuration
    pub fn with_config(config: ClientConfig) -> Result<Self> {
        config.validate()?;

        let client = Client::builder()
            .timeout(config.timeout())
            .build()
            .map_err(|e| ZarinpalError::config(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            environment: config.environment(),
            api_base_url: config.resolved_api_base_url(),
            payment_base_url: config.resolved_payment_base_url(),
            merchant_id: config.merchant_id,
            client,
        })
    }

    /// Register a new payment and obtain its authority token
    pub async fn new_payment(&self, payment: &NewPayment) -> Result<PaymentCreationResponse> {
        let request = PaymentRequest::new(self.merchant_id.as_str(), payment);
        self.post(hosts::REQUEST_ENDPOINT, &request).await
    }

    /// Verify a payment after the payer returns to the callback URL.
    ///
    /// `amount` must be the amount the payment was created with.
    pub async fn verify_payment(
        &self,
        amount: u64,
        authority: &str,
    ) -> Result<PaymentVerificationResponse> {
        let request = PaymentVerificationRequest::new(self.merchant_id.as_str(), amount, authority);
        self.post(hosts::VERIFY_ENDPOINT, &request).await
    }

    /// Verify a payment and reduce the answer to a [`PaymentStatus`]
    pub async fn check_payment_status(&self, amount: u64, authority: &str) -> Result<PaymentStatus> {
        let verification = self.verify_payment(amount, authority).await?;
        Ok(status::classify(&verification))
    }

    /// URL the payer must be sent to in order to pay
    pub fn payment_url(&self, authority: &str) -> String {
        format!("{}{}", self.payment_base_url, authority)
    }

    pub fn merchant_id(&self) -> &str {
        &self.merchant_id
    }

    pub fn environment(&self) -> Environment {
        self.environment
    }

    pub fn api_base_url(&self) -> &str {
        &self.api_base_url
    }

    pub fn payment_base_url(&self) -> &str {
        &self.payment_base_url
    }

    async fn post<B, T>(&self, endpoint: &str, body: &B) -> Result<T>
    where
        B: Serialize,
        T: DeserializeOwned,
    {
        let payload = serde_json::to_vec(body)?;

        debug!(endpoint, "Sending request to Zarinpal");
        let response = self
            .client
            .post(format!("{}{}", self.api_base_url, endpoint))
            .header(CONTENT_TYPE, "application/json")
            .body(payload)
            .send()
            .await?;

        // Error envelopes come with 4xx statuses, so the body is decoded regardless.
        let status = response.status();
        let bytes = response.bytes().await?;
        debug!(endpoint, status = status.as_u16(), "Received response from Zarinpal");

        envelope::decode_into(&bytes).map_err(|e| {
            if let ZarinpalError::Gateway { code, message } = &e {
                debug!(endpoint, code, message = %message, "Zarinpal rejected the request");
            }
            e
        })
    }
}

/// Run a client operation until it finishes or `signal` completes.
///
/// Returns [`ZarinpalError::Cancelled`] when the signal wins; the in-flight
/// request is dropped.
pub async fn with_cancellation<T, S, F>(signal: S, operation: F) -> Result<T>
where
    S: Future<Output = ()>,
    F: Future<Output = Result<T>>,
{
    tokio::select! {
        biased;
        _ = signal => Err(ZarinpalError::Cancelled),
        result = operation => result,
    }
}
