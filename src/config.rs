//! Client configuration
//!
//! A [`ClientConfig`] can be built in code, read from `ZARINPAL_*`
//! environment variables, or loaded from a JSON file.

use crate::types::Environment;
use crate::{Result, ZarinpalError};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Default request timeout in milliseconds
pub const DEFAULT_TIMEOUT_MS: u64 = 30_000;

/// Configuration for a [`crate::ZarinpalClient`]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClientConfig {
    /// Merchant identity issued by Zarinpal
    pub merchant_id: String,
    /// Use the sandbox host instead of production
    #[serde(default)]
    pub sandbox: bool,
    /// Override for the API base URL, mainly for tests
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_base_url: Option<String>,
    /// Override for the payer redirect base URL
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub payment_base_url: Option<String>,
    /// Per-request timeout in milliseconds
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,
}

fn default_timeout_ms() -> u64 {
    DEFAULT_TIMEOUT_MS
}

impl ClientConfig {
    /// Create a production configuration for a merchant
    pub fn new(merchant_id: impl Into<String>) -> Self {
        Self {
            merchant_id: merchant_id.into(),
            sandbox: false,
            api_base_url: None,
            payment_base_url: None,
            timeout_ms: DEFAULT_TIMEOUT_MS,
        }
    }

    /// Select the sandbox or production environment
    pub fn sandbox(mut self, sandbox: bool) -> Self {
        self.sandbox = sandbox;
        self
    }

    /// Override the API base URL
    pub fn with_api_base_url(mut self, url: impl Into<String>) -> Self {
        self.api_base_url = Some(url.into());
        self
    }

    /// Override the payer redirect base URL
    pub fn with_payment_base_url(mut self, url: impl Into<String>) -> Self {
        self.payment_base_url = Some(url.into());
        self
    }

    /// Set the request timeout
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout_ms = u64::try_from(timeout.as_millis()).unwrap_or(u64::MAX);
        self
    }

    /// Load configuration from a JSON file
    pub fn from_file(path: impl AsRef<std::path::Path>) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;

        let config: ClientConfig = serde_json::from_str(&content)
            .map_err(|e| ZarinpalError::config(format!("Failed to parse config file: {}", e)))?;

        config.validate()?;
        Ok(config)
    }

    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        let merchant_id = std::env::var("ZARINPAL_MERCHANT_ID")
            .map_err(|_| ZarinpalError::config("ZARINPAL_MERCHANT_ID is required"))?;
        let mut config = Self::new(merchant_id);

        if let Ok(sandbox) = std::env::var("ZARINPAL_SANDBOX") {
            config.sandbox = sandbox
                .parse()
                .map_err(|e| ZarinpalError::config(format!("Invalid ZARINPAL_SANDBOX: {}", e)))?;
        }

        if let Ok(api_base_url) = std::env::var("ZARINPAL_API_BASE_URL") {
            config.api_base_url = Some(api_base_url);
        }

        if let Ok(payment_base_url) = std::env::var("ZARINPAL_PAYMENT_BASE_URL") {
            config.payment_base_url = Some(payment_base_url);
        }

        if let Ok(timeout) = std::env::var("ZARINPAL_TIMEOUT_MS") {
            config.timeout_ms = timeout.parse().map_err(|e| {
                ZarinpalError::config(format!("Invalid ZARINPAL_TIMEOUT_MS: {}", e))
            })?;
        }

        config.validate()?;
        Ok(config)
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        if self.merchant_id.trim().is_empty() {
            return Err(ZarinpalError::config("Merchant ID cannot be empty"));
        }

        if self.timeout_ms == 0 {
            return Err(ZarinpalError::config("Timeout must be greater than zero"));
        }

        validate_base_url("API base URL", &self.resolved_api_base_url())?;
        validate_base_url("Payment base URL", &self.resolved_payment_base_url())?;

        Ok(())
    }

    /// Environment selected by the sandbox flag
    pub fn environment(&self) -> Environment {
        Environment::from_sandbox(self.sandbox)
    }

    /// API base URL after applying the override
    pub fn resolved_api_base_url(&self) -> String {
        self.api_base_url
            .clone()
            .unwrap_or_else(|| self.environment().api_base_url())
    }

    /// Payer redirect base URL after applying the override
    pub fn resolved_payment_base_url(&self) -> String {
        self.payment_base_url
            .clone()
            .unwrap_or_else(|| self.environment().payment_base_url())
    }

    /// Request timeout
    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }
}

fn validate_base_url(name: &str, value: &str) -> Result<()> {
    if !value.starts_with("http://") && !value.starts_with("https://") {
        return Err(ZarinpalError::config(format!(
            "{} must start with http:// or https://",
            name
        )));
    }

    url::Url::parse(value)
        .map_err(|e| ZarinpalError::config(format!("Invalid {}: {}", name, e)))?;

    Ok(())
}
